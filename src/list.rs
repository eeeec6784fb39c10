//! An owning, append-only list with fallible deep-copy semantics.
//!
//! Nodes live in a single allocation obtained from the list's allocator and
//! are chained by index. A [`NodeRef`] names one node; it stays valid for as
//! long as the list that produced it exists, since nodes are never moved
//! out of or removed from the chain.
//!
//! Values enter the list only by copy. [`List::try_append`] asks the value
//! for a [`TryClone::try_clone`] and stores the result, so the caller keeps
//! (and may discard) the original.

use allocator_api2::alloc::Allocator;
use allocator_api2::alloc::Global;
use allocator_api2::vec::Vec;
use core::alloc::Layout;
use core::fmt;
use crate::AllocError;
use crate::TryClone;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE DEFINITIONS                                                    //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// An ordered sequence of owned elements.
///
/// Elements are kept in insertion order for the lifetime of the list. Every
/// element was produced by [`TryClone`], either when it was appended or when
/// the list was copied; none of them alias caller memory.
///
/// Dropping the list drops every element in sequence order and then releases
/// the node storage back to `A`.

pub struct List<T, A: Allocator = Global> {
  nodes: Vec<Node<T>, A>,
  head: usize,
  tail: usize,
}

/// A reference to one node of a [`List`].
///
/// Obtained from [`List::begin`] or [`List::advance`]; the end of the
/// sequence is `None`. A reference must only be used with the list that
/// produced it.

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeRef(usize);

/// Iterator over the elements of a [`List`] in sequence order.

pub struct Iter<'a, T> {
  nodes: &'a [Node<T>],
  next: usize,
  len: usize,
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

struct Node<T> {
  element: T,
  next: usize,
}

enum Error {
  NodeStorageFailed(Layout),
  ElementCopyFailed,
  TooLarge,
}

enum Panicked { }

trait Fail: Sized {
  fn fail<T>(_: Error) -> Result<T, Self>;
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// CONSTANTS                                                                  //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

const NIL: usize = usize::MAX;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Fail                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn unwrap<T>(x: Result<T, Panicked>) -> T {
  match x { Ok(x) => x, Err(e) => match e { } }
}

impl Fail for Panicked {
  #[inline(never)]
  #[cold]
  fn fail<T>(e: Error) -> Result<T, Self> {
    match e {
      Error::NodeStorageFailed(layout) =>
        alloc::alloc::handle_alloc_error(layout),
      Error::ElementCopyFailed =>
        panic!("gradebook: failed to copy a list element!"),
      Error::TooLarge =>
        panic!("gradebook: attempted an allocation that is too large!"),
    }
  }
}

impl Fail for AllocError {
  #[inline(always)]
  fn fail<T>(_: Error) -> Result<T, Self> {
    Err(AllocError)
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// List                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

fn with_capacity_in<T, A, E>(capacity: usize, allocator: A) -> Result<List<T, A>, E>
where
  A: Allocator,
  E: Fail,
{
  let mut nodes = Vec::new_in(allocator);

  if nodes.try_reserve_exact(capacity).is_err() {
    return
      match Layout::array::<Node<T>>(capacity) {
        Ok(layout) => E::fail(Error::NodeStorageFailed(layout)),
        Err(_) => E::fail(Error::TooLarge),
      };
  }

  Ok(List { nodes, head: NIL, tail: NIL })
}

fn append<T, A, E>(list: &mut List<T, A>, value: &T) -> Result<NodeRef, E>
where
  T: TryClone,
  A: Allocator,
  E: Fail,
{
  // The copy is made before any node storage is touched, so a failure on
  // either side leaves the list exactly as it was.

  let Ok(element) = value.try_clone() else {
    log::debug!("gradebook: element copy failed, append abandoned");
    return E::fail(Error::ElementCopyFailed);
  };

  if list.nodes.try_reserve(1).is_err() {
    log::debug!("gradebook: node storage exhausted at length {}", list.len());
    return E::fail(Error::NodeStorageFailed(Layout::new::<Node<T>>()));
  }

  Ok(list.link_back(element))
}

fn copy<T, A, E>(list: &List<T, A>) -> Result<List<T, A>, E>
where
  T: TryClone,
  A: Allocator + Clone,
  E: Fail,
{
  let mut r = with_capacity_in(list.len(), list.allocator().clone())?;

  for x in list.iter() {
    // On failure `r` is dropped, releasing every element copied so far.
    let Ok(y) = x.try_clone() else {
      log::debug!("gradebook: element copy failed after {} of {}", r.len(), list.len());
      return E::fail(Error::ElementCopyFailed);
    };
    let _: NodeRef = r.link_back(y);
  }

  Ok(r)
}

impl<T> List<T, Global> {
  /// Creates an empty list backed by the global allocator.
  ///
  /// Does not allocate.

  pub fn new() -> Self {
    Self::new_in(Global)
  }

  /// Creates an empty list with room for `capacity` elements.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn with_capacity(capacity: usize) -> Self {
    unwrap(with_capacity_in(capacity, Global))
  }

  /// Creates an empty list with room for `capacity` elements.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
    with_capacity_in(capacity, Global)
  }
}

impl<T, A: Allocator> List<T, A> {
  /// Creates an empty list which will take its node storage from the given
  /// allocator.

  pub fn new_in(allocator: A) -> Self {
    Self { nodes: Vec::new_in(allocator), head: NIL, tail: NIL }
  }

  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn with_capacity_in(capacity: usize, allocator: A) -> Self {
    unwrap(with_capacity_in(capacity, allocator))
  }

  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_with_capacity_in(capacity: usize, allocator: A) -> Result<Self, AllocError> {
    with_capacity_in(capacity, allocator)
  }

  /// The number of elements in the list.

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  /// Whether the list holds no elements.

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.head == NIL
  }

  /// A reference to the node allocator.

  pub fn allocator(&self) -> &A {
    self.nodes.allocator()
  }

  /// A reference to the first node, or `None` if the list is empty.

  #[inline(always)]
  pub fn begin(&self) -> Option<NodeRef> {
    if self.head == NIL { None } else { Some(NodeRef(self.head)) }
  }

  /// A reference to the node after `node`, or `None` if `node` is the last
  /// one.
  ///
  /// A reference that does not name a node of this list also yields `None`.

  #[inline(always)]
  pub fn advance(&self, node: NodeRef) -> Option<NodeRef> {
    let n = self.nodes.get(node.0)?;
    if n.next == NIL { None } else { Some(NodeRef(n.next)) }
  }

  /// The element stored at `node`.

  #[inline(always)]
  pub fn get(&self, node: NodeRef) -> Option<&T> {
    self.nodes.get(node.0).map(|n| &n.element)
  }

  /// Mutable access to the element stored at `node`.
  ///
  /// The element stays owned by the list; changes are visible to later
  /// calls to [`get`](Self::get).

  #[inline(always)]
  pub fn get_mut(&mut self, node: NodeRef) -> Option<&mut T> {
    self.nodes.get_mut(node.0).map(|n| &mut n.element)
  }

  /// The first element.

  pub fn front(&self) -> Option<&T> {
    self.get(self.begin()?)
  }

  /// The last element.

  pub fn back(&self) -> Option<&T> {
    if self.tail == NIL { None } else { self.get(NodeRef(self.tail)) }
  }

  /// Finds the first node whose element satisfies `predicate`, scanning
  /// from the front.

  pub fn position<F>(&self, predicate: F) -> Option<NodeRef>
  where
    F: FnMut(&T) -> bool
  {
    let mut predicate = predicate;
    let mut node = self.begin();

    while let Some(n) = node {
      if self.get(n).is_some_and(&mut predicate) {
        return Some(n);
      }
      node = self.advance(n);
    }

    None
  }

  /// Iterates over the elements in sequence order.

  pub fn iter(&self) -> Iter<'_, T> {
    Iter { nodes: &self.nodes, next: self.head, len: self.nodes.len() }
  }

  /// Drops every element in sequence order and releases the node storage.
  ///
  /// This is what dropping the list does; the method exists for callers
  /// which want the release to be explicit.

  pub fn destroy(self) {
    let mut this = self;
    this.nodes.clear();
  }

  // The caller must have reserved room for one more node if allocation
  // failure is to be reported rather than raised.

  fn link_back(&mut self, element: T) -> NodeRef {
    let k = self.nodes.len();

    self.nodes.push(Node { element, next: NIL });

    if self.tail == NIL {
      self.head = k;
    } else {
      self.nodes[self.tail].next = k;
    }

    self.tail = k;

    NodeRef(k)
  }
}

impl<T: TryClone, A: Allocator> List<T, A> {
  /// Appends a copy of `value` as the new last element.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory, either for the node or for the
  /// copy of `value`.

  pub fn append(&mut self, value: &T) -> NodeRef {
    unwrap(append(self, value))
  }

  /// Appends a copy of `value` as the new last element.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory. The list is left
  /// unchanged.

  pub fn try_append(&mut self, value: &T) -> Result<NodeRef, AllocError> {
    append(self, value)
  }
}

impl<T: TryClone, A: Allocator + Clone> List<T, A> {
  /// Returns a deep copy of the list, in the same allocator.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn copy(&self) -> Self {
    unwrap(copy(self))
  }

  /// Returns a deep copy of the list, in the same allocator.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory. Nothing copied
  /// before the failure survives it.

  pub fn try_copy(&self) -> Result<Self, AllocError> {
    copy(self)
  }
}

impl<T: TryClone, A: Allocator + Clone> TryClone for List<T, A> {
  #[inline(always)]
  fn try_clone(&self) -> Result<Self, AllocError> {
    copy(self)
  }
}

impl<T: TryClone, A: Allocator + Clone> Clone for List<T, A> {
  fn clone(&self) -> Self {
    self.copy()
  }
}

impl<T> Default for List<T, Global> {
  fn default() -> Self {
    Self::new()
  }
}

impl<'a, T, A: Allocator> IntoIterator for &'a List<T, A> {
  type Item = &'a T;
  type IntoIter = Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for List<T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Iter                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<'a, T> Iterator for Iter<'a, T> {
  type Item = &'a T;

  #[inline(always)]
  fn next(&mut self) -> Option<Self::Item> {
    let n = self.nodes.get(self.next)?;
    self.next = n.next;
    self.len = self.len - 1;
    Some(&n.element)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.len, Some(self.len))
  }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> { }

impl<'a, T> Clone for Iter<'a, T> {
  fn clone(&self) -> Self {
    Iter { nodes: self.nodes, next: self.next, len: self.len }
  }
}

impl<'a, T> fmt::Debug for Iter<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Iter").field(&self.len).finish()
  }
}
