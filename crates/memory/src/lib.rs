//! # lenstr-memory
//!
//! Length-tagged byte strings over a fail-fast checked allocator.
//!
//! The crate is built around two operations:
//! - [`allocate`] obtains an uninitialized [`Region`](buffer::Region) of an
//!   exact size, or terminates the process with `out of memory` (exit
//!   status 1) when the backend cannot provide one;
//! - [`concatenate`] copies two byte views, in order, into a fresh
//!   [`OwnedBuffer`] whose capacity equals its length.
//!
//! ## Quick Start
//!
//! ```rust
//! use lenstr_memory::prelude::*;
//!
//! let a = Buffer::borrowed(b"Hello ");
//! let b = Buffer::borrowed(b"world!!!");
//!
//! let joined = concatenate(&a, &b);
//! assert_eq!(joined, "Hello world!!!");
//! // `joined` releases its region exactly once, here
//! ```
//!
//! ## Ownership
//!
//! [`OwnedBuffer`] owns its region and hands it back to the allocator it
//! came from on drop. [`Buffer::Borrowed`](buffer::Buffer::Borrowed) views
//! bytes owned elsewhere and never touches an allocator. The two cannot be
//! confused: only the owned type has a release path at all.
//!
//! ## Allocators
//!
//! Everything allocates through the [`Allocator`](allocator::Allocator)
//! trait. [`SystemAllocator`](allocator::SystemAllocator) is the default,
//! [`BumpAllocator`](allocator::BumpAllocator) serves a fixed heap, and
//! [`TrackedAllocator`](allocator::TrackedAllocator) /
//! [`FaultInjector`](allocator::FaultInjector) exist for accounting and
//! tests. The `*_in` variants of each operation take the allocator
//! explicitly.
//!
//! ## Features
//!
//! - `logging` (default): structured logging through `lenstr-log`

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(unsafe_code)]
#![warn(rust_2018_idioms)]

// Error types
pub mod error;

pub mod allocator;
pub mod buffer;
pub mod concat;
pub mod convert;
pub mod stats;

pub use crate::allocator::{OOM_EXIT_CODE, allocate, allocate_in};
pub use crate::buffer::{Buffer, OwnedBuffer};
pub use crate::concat::{concatenate, concatenate_in};
pub use crate::error::{MemoryError, MemoryResult};

// Public API exports
pub mod prelude {
    //! Convenient re-exports of commonly used types and functions.

    pub use crate::allocator::{
        Allocator, BumpAllocator, SystemAllocator, TrackedAllocator, allocate, allocate_in,
    };
    pub use crate::buffer::{Buffer, OwnedBuffer, Region};
    pub use crate::concat::{concatenate, concatenate_in};
    pub use crate::convert::{decimal, decimal_in, from_byte, from_byte_in};
    pub use crate::error::{MemoryError, MemoryResult};
}
