//! Checked allocation: obtain a region or terminate the process
//!
//! This is the fail-fast contract every buffer constructor in the crate is
//! built on. A request that cannot be satisfied does not come back as an
//! error: [`out_of_memory`] logs it, writes `out of memory` to stderr and
//! calls [`std::process::exit`] with [`OOM_EXIT_CODE`]. The exit is not a
//! panic, so neither `catch_unwind` nor a panic hook can intercept it, and
//! destructors of live values do not run.
//!
//! Zero-byte requests always succeed and never reach the allocator.
//!
//! ```
//! use lenstr_memory::allocator::allocate;
//!
//! let mut region = allocate(5);
//! region.write(b"hello");
//! assert_eq!(region.into_buffer(), "hello");
//! ```

use std::io::{self, Write};
use std::process;

use super::{Allocator, SystemAllocator};
use crate::buffer::Region;
use crate::error::MemoryError;

#[cfg(feature = "logging")]
use lenstr_log::error;

/// Process exit status after allocation exhaustion
pub const OOM_EXIT_CODE: i32 = 1;

/// Diagnostic line written to stderr before exiting
const OOM_DIAGNOSTIC: &[u8] = b"out of memory\n";

/// Allocate `size` uninitialized bytes from the process heap.
///
/// Never returns on failure; see the [module docs](self).
#[inline]
pub fn allocate(size: usize) -> Region<SystemAllocator> {
    allocate_in(SystemAllocator, size)
}

/// Allocate `size` uninitialized bytes from `alloc`.
///
/// Never returns on failure; see the [module docs](self).
pub fn allocate_in<A: Allocator>(alloc: A, size: usize) -> Region<A> {
    match Region::try_allocate(alloc, size) {
        Ok(region) => region,
        Err(err) => out_of_memory(&err),
    }
}

/// Report `err` and terminate the process with [`OOM_EXIT_CODE`].
#[cold]
#[inline(never)]
pub fn out_of_memory(err: &MemoryError) -> ! {
    #[cfg(feature = "logging")]
    error!(
        code = err.code(),
        reason = termination_reason(err),
        error = %err,
        "allocation failed, terminating"
    );
    #[cfg(not(feature = "logging"))]
    let _ = err;

    let mut stderr = io::stderr().lock();
    // Nothing useful can be done if stderr itself is gone.
    let _ = stderr.write_all(OOM_DIAGNOSTIC);
    let _ = stderr.flush();

    process::exit(OOM_EXIT_CODE)
}

/// Whether the backend ran dry or the request could never have been served
#[cfg_attr(not(feature = "logging"), allow(dead_code))]
fn termination_reason(err: &MemoryError) -> &'static str {
    if err.is_exhaustion() {
        "exhausted"
    } else {
        "unsatisfiable"
    }
}
