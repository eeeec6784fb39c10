//! Fallible deep copies.
//!
//! A [`List`](crate::List) never stores a value handed to it by a caller.
//! It stores a copy made through [`TryClone`], so every element it owns is
//! independent of the caller's memory.

use alloc::string::String;
use crate::AllocError;

/// A value which can produce an independent deep copy of itself, reporting
/// allocation failure instead of aborting.
///
/// An implementation must not leak on failure: anything allocated for the
/// partial copy is released before the error is returned.

pub trait TryClone: Sized {
  /// Returns a deep copy of `self`.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  fn try_clone(&self) -> Result<Self, AllocError>;
}

/// Copies the given string into a new allocation.
///
/// # Errors
///
/// An error is returned on failure to allocate memory.

pub fn try_copy_str(src: &str) -> Result<String, AllocError> {
  let mut s = String::new();
  s.try_reserve_exact(src.len()).map_err(|_| AllocError)?;
  s.push_str(src);
  Ok(s)
}

impl TryClone for String {
  #[inline(always)]
  fn try_clone(&self) -> Result<Self, AllocError> {
    try_copy_str(self)
  }
}

macro_rules! impl_try_clone_for_copy {
  ($($t:ty),* $(,)?) => {
    $(
      impl TryClone for $t {
        #[inline(always)]
        fn try_clone(&self) -> Result<Self, AllocError> {
          Ok(*self)
        }
      }
    )*
  };
}

impl_try_clone_for_copy! {
  bool, char,
  u8, u16, u32, u64, u128, usize,
  i8, i16, i32, i64, i128, isize,
  f32, f64,
}
