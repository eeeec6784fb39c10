#![cfg_attr(feature = "allocator_api", feature(allocator_api))]


use expect_test::expect;
use gradebook::List;
use gradebook::NodeRef;
use gradebook::TryClone;
use crate::support::Budget;
use crate::support::Tracked;
use crate::support::Tracker;

fn walk<T: Copy, A: gradebook::Allocator>(list: &List<T, A>) -> Vec<T> {
  let mut r = Vec::new();
  let mut node = list.begin();
  while let Some(n) = node {
    r.push(*list.get(n).unwrap());
    node = list.advance(n);
  }
  r
}

#[test]
fn test_api() {
  let mut list = List::new();
  let _ = List::<u64>::with_capacity(4);
  let _ = List::<u64>::try_with_capacity(4);
  let _ = List::<u64>::default();
  let _ = list.append(&1_u64);
  let _ = list.try_append(&2_u64);
  let _ = list.copy();
  let _ = list.try_copy();
  let _ = list.try_clone();
  let _ = list.clone();
  let _ = list.len();
  let _ = list.is_empty();
  let _ = list.allocator();
  let _ = list.front();
  let _ = list.back();
  let _ = list.position(|&x| x == 2);
  let _ = list.iter().len();
  let _ = format!("{:?}", list.iter());
  let _ = format!("{:?}", list.begin());
  list.destroy();
}

#[test]
fn test_empty() {
  let list: List<u64> = List::new();
  assert!(list.is_empty());
  assert_eq!(list.len(), 0);
  assert_eq!(list.begin(), None);
  assert_eq!(list.front(), None);
  assert_eq!(list.back(), None);
  assert_eq!(list.iter().next(), None);
  expect!["[]"].assert_eq(&format!("{:?}", list));
}

#[test]
fn test_insertion_order() {
  let mut list = List::new();
  for i in 0 .. 100_u64 {
    let _: NodeRef = list.append(&i);
  }
  assert_eq!(list.len(), 100);
  assert_eq!(walk(&list), (0 .. 100).collect::<Vec<_>>());
  assert_eq!(list.iter().copied().collect::<Vec<_>>(), walk(&list));
  assert_eq!(list.front(), Some(&0));
  assert_eq!(list.back(), Some(&99));
}

#[test]
fn test_append_returns_node() {
  let mut list = List::new();
  let a = list.append(&10_u64);
  let b = list.append(&20_u64);
  assert_eq!(list.begin(), Some(a));
  assert_eq!(list.advance(a), Some(b));
  assert_eq!(list.advance(b), None);
  assert_eq!(list.get(b), Some(&20));
}

#[test]
fn test_advance_foreign_node() {
  let mut long = List::new();
  let mut short = List::new();
  let _ = long.append(&1_u64);
  let _ = long.append(&2_u64);
  let far = long.append(&3_u64);
  let _ = short.append(&1_u64);
  assert_eq!(short.advance(far), None);
  assert_eq!(short.get(far), None);
}

#[test]
fn test_append_copies() {
  let mut list = List::new();
  let mut name = String::from("Alice");
  let node = list.append(&name);
  name.push_str(" Smith");
  let stored = list.get(node).unwrap();
  assert_eq!(stored, "Alice");
  assert_ne!(stored.as_ptr(), name.as_ptr());
  drop(name);
  assert_eq!(list.get(node).map(String::as_str), Some("Alice"));
}

#[test]
fn test_get_mut() {
  let mut list = List::new();
  let _ = list.append(&1_u64);
  let b = list.append(&2_u64);
  *list.get_mut(b).unwrap() = 7;
  assert_eq!(list.get(b), Some(&7));
  assert_eq!(walk(&list), [1, 7]);
}

#[test]
fn test_position() {
  let mut list = List::new();
  for x in [5_u64, 8, 13, 8] {
    let _ = list.append(&x);
  }
  let n = list.position(|&x| x == 8).unwrap();
  assert_eq!(list.advance(n).and_then(|n| list.get(n)), Some(&13));
  assert_eq!(list.position(|&x| x == 21), None);
}

#[test]
fn test_append_copy_failure() {
  let tracker = Tracker::with_copies(2);
  let mut list = List::new();
  let a = Tracked::new(1, &tracker);
  let b = Tracked::new(2, &tracker);
  let c = Tracked::new(3, &tracker);
  assert!(list.try_append(&a).is_ok());
  assert!(list.try_append(&b).is_ok());
  assert!(list.try_append(&c).is_err());
  assert_eq!(list.len(), 2);
  assert_eq!(list.iter().map(|x| x.value).collect::<Vec<_>>(), [1, 2]);
  assert_eq!(tracker.live(), 5);
  drop(list);
  assert_eq!(tracker.live(), 3);
}

#[test]
#[should_panic]
fn test_append_panics_on_copy_failure() {
  let tracker = Tracker::with_copies(0);
  let mut list = List::new();
  let _ = list.append(&Tracked::new(1, &tracker));
}

#[test]
fn test_append_node_failure() {
  let tracker = Tracker::new();
  let budget = Budget::new(0);
  let mut list = List::new_in(budget.clone());
  let x = Tracked::new(1, &tracker);
  assert!(list.try_append(&x).is_err());
  assert!(list.is_empty());
  assert_eq!(tracker.live(), 1);
  assert_eq!(budget.live(), 0);
}

#[test]
fn test_append_until_storage_exhausted() {
  let budget = Budget::new(1);
  let mut list = List::new_in(budget.clone());
  let mut n = 0_u64;
  while list.try_append(&n).is_ok() {
    n = n + 1;
  }
  assert!(n > 0);
  assert_eq!(list.len() as u64, n);
  assert_eq!(walk(&list), (0 .. n).collect::<Vec<_>>());
  assert_eq!(budget.live(), 1);
  drop(list);
  assert_eq!(budget.live(), 0);
}

#[test]
fn test_try_with_capacity_too_large() {
  assert!(List::<u64>::try_with_capacity(usize::MAX).is_err());
  assert!(List::<u64, _>::try_with_capacity_in(1, Budget::new(0)).is_err());
}

#[test]
fn test_destroy_in_sequence_order() {
  let tracker = Tracker::new();
  let mut list = List::new();
  for i in 0 .. 4 {
    let _ = list.append(&Tracked::new(i, &tracker));
  }
  assert_eq!(tracker.dropped(), [0, 1, 2, 3]);
  assert_eq!(tracker.live(), 4);
  list.destroy();
  assert_eq!(tracker.dropped(), [0, 1, 2, 3, 0, 1, 2, 3]);
  assert_eq!(tracker.live(), 0);
}

#[test]
fn test_destroy_releases_storage() {
  let budget = Budget::new(usize::MAX);
  let mut list = List::new_in(budget.clone());
  for i in 0 .. 1000_u64 {
    let _ = list.append(&i);
  }
  assert_eq!(budget.live(), 1);
  list.destroy();
  assert_eq!(budget.live(), 0);
}

#[test]
fn test_copy_is_independent() {
  let mut source = List::new();
  for name in ["a", "b", "c"] {
    let _ = source.append(&String::from(name));
  }
  let copy = source.copy();
  let first = source.begin().unwrap();
  source.get_mut(first).unwrap().push('!');
  assert_ne!(source.front().unwrap().as_ptr(), copy.front().unwrap().as_ptr());
  drop(source);
  expect![[r#"["a", "b", "c"]"#]].assert_eq(&format!("{:?}", copy));
}

#[test]
fn test_copy_preserves_allocator() {
  let budget = Budget::new(usize::MAX);
  let mut source = List::new_in(budget.clone());
  let _ = source.append(&1_u64);
  let copy = source.try_copy().unwrap();
  assert_eq!(budget.live(), 2);
  drop(source);
  assert_eq!(walk(&copy), [1]);
  drop(copy);
  assert_eq!(budget.live(), 0);
}

#[test]
fn test_copy_failure_releases_partial_copy() {
  let tracker = Tracker::new();
  let mut source = List::new();
  for i in 0 .. 5 {
    let _ = source.append(&Tracked::new(i, &tracker));
  }
  let before = tracker.dropped().len();
  tracker.set_copies(2);
  assert!(source.try_copy().is_err());
  assert_eq!(tracker.live(), 5);
  assert_eq!(tracker.dropped()[before ..], [0, 1]);
  assert_eq!(source.iter().map(|x| x.value).collect::<Vec<_>>(), [0, 1, 2, 3, 4]);
}

#[test]
fn test_copy_node_failure() {
  let budget = Budget::new(1);
  let mut source = List::new_in(budget.clone());
  let _ = source.append(&1_u64);
  let _ = source.append(&2_u64);
  assert!(source.try_copy().is_err());
  assert_eq!(budget.live(), 1);
  assert_eq!(walk(&source), [1, 2]);
}

#[test]
fn test_nested_copy() {
  let mut inner = List::new();
  let _ = inner.append(&String::from("x"));
  let mut outer = List::new();
  let a = outer.append(&inner);
  let _ = inner.append(&String::from("y"));
  let b = outer.append(&inner);
  drop(inner);

  let copy = outer.try_copy().unwrap();
  let _ = outer.get_mut(a).unwrap().append(&String::from("z"));

  expect![[r#"[["x", "z"], ["x", "y"]]"#]].assert_eq(&format!("{:?}", outer));
  expect![[r#"[["x"], ["x", "y"]]"#]].assert_eq(&format!("{:?}", copy));
  assert_eq!(copy.get(b).map(List::len), Some(2));
}

#[test]
fn test_copy_of_empty() {
  let list: List<String> = List::new();
  let copy = list.try_copy().unwrap();
  assert!(copy.is_empty());
  assert_eq!(copy.begin(), None);
}

#[test]
fn test_nested_release() {
  let tracker = Tracker::new();
  let mut inner = List::new();
  let _ = inner.append(&Tracked::new(1, &tracker));
  let _ = inner.append(&Tracked::new(2, &tracker));
  let mut outer = List::new();
  let _ = outer.append(&inner);
  let _ = outer.append(&inner);
  drop(inner);
  assert_eq!(tracker.live(), 4);

  let copy = outer.try_copy().unwrap();
  assert_eq!(tracker.live(), 8);

  // Enough for the first inner list and half of the second.
  tracker.set_copies(3);
  assert!(outer.try_copy().is_err());
  assert_eq!(tracker.live(), 8);

  outer.destroy();
  assert_eq!(tracker.live(), 4);
  assert_eq!(copy.iter().map(|x| x.len()).collect::<Vec<_>>(), [2, 2]);
  drop(copy);
  assert_eq!(tracker.live(), 0);
}

#[test]
fn test_nested_storage_release() {
  let budget = Budget::new(usize::MAX);
  let mut inner = List::new_in(budget.clone());
  let _ = inner.append(&7_u64);
  let mut outer = List::new_in(budget.clone());
  let _ = outer.append(&inner);
  let _ = outer.append(&inner);
  let copy = outer.copy();
  assert_eq!(budget.live(), 7);
  drop(inner);
  drop(outer);
  assert_eq!(budget.live(), 3);
  drop(copy);
  assert_eq!(budget.live(), 0);
}
