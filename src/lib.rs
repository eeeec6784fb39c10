#![doc = include_str!("../README.md")]
#![no_std]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub use allocator_api2::alloc::AllocError;
pub use allocator_api2::alloc::Allocator;
pub use allocator_api2::alloc::Global;
pub use copy::TryClone;
pub use copy::try_copy_str;
pub use grades::Course;
pub use grades::Grades;
pub use grades::GradesError;
pub use grades::Student;
pub use list::Iter;
pub use list::List;
pub use list::NodeRef;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// SUBMODULES                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

pub mod grades;

pub mod list;

mod copy;
