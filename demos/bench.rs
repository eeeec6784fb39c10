//! Times building and deep-copying a list of short strings with
//! `gradebook::List`, `std::vec::Vec`, and a `bumpalo` vector.

use std::hint;
use std::time::Instant;
use gradebook::List;

const NAMES: [&str; 4] = ["Math", "Computer Science", "Music", "Art"];

fn warmup() {
  let mut s = 1u64;
  for i in 0 .. 1_000_000_000 { s = s.wrapping_mul(i); }
  let _: u64 = hint::black_box(s);
}

fn timeit<F: FnOnce()>(f: F) -> f64 {
  let start = Instant::now();
  f();
  let stop = Instant::now();
  stop.saturating_duration_since(start).as_nanos() as f64
}

fn run_bench<F: FnOnce(usize, usize)>(iters: usize, len: usize, name: &str, f: F) {
  let iters = hint::black_box(iters);
  let len = hint::black_box(len);
  let duration = timeit(|| f(iters, len));
  let duration = duration / ((iters * len) as f64);
  print!("{:25} {:.3} ns\n", name, duration);
}

#[inline(never)]
fn bench_list(iters: usize, len: usize) {
  for _ in 0 .. iters {
    let mut list = List::with_capacity(len);
    for i in 0 .. len {
      let _ = list.append(&String::from(NAMES[i % NAMES.len()]));
    }
    let _: List<String> = hint::black_box(list.copy());
  }
}

#[inline(never)]
fn bench_vec(iters: usize, len: usize) {
  for _ in 0 .. iters {
    let mut v = Vec::with_capacity(len);
    for i in 0 .. len {
      v.push(String::from(NAMES[i % NAMES.len()]));
    }
    let _: Vec<String> = hint::black_box(v.clone());
  }
}

#[inline(never)]
fn bench_bumpalo(iters: usize, len: usize) {
  use bumpalo::collections::String;
  use bumpalo::collections::Vec;

  let mut arena = bumpalo::Bump::new();

  for _ in 0 .. iters {
    let mut v = Vec::with_capacity_in(len, &arena);
    for i in 0 .. len {
      v.push(String::from_str_in(NAMES[i % NAMES.len()], &arena));
    }
    let _: Vec<String<'_>> = hint::black_box(v.clone());
    drop(v);
    arena.reset();
  }
}

fn main() {
  let iters = 1_000;
  let len = 1_000;

  warmup();

  run_bench(iters, len, "gradebook::List", bench_list);
  run_bench(iters, len, "std::vec::Vec", bench_vec);
  run_bench(iters, len, "bumpalo::collections::Vec", bench_bumpalo);
}
