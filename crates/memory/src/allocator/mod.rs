//! Allocator backends and the checked allocation entry points
//!
//! Every buffer in this crate obtains memory through the [`Allocator`] trait.
//! The trait is the replaceable seam: production code runs on
//! [`SystemAllocator`], the demo driver can switch to a fixed
//! [`BumpAllocator`] heap, and tests wrap either in a [`TrackedAllocator`] or
//! a [`FaultInjector`].
//!
//! The fallible trait methods are *not* the public contract for callers that
//! just want bytes. Those go through [`checked::allocate`] /
//! [`checked::allocate_in`], which never return on failure.

use core::alloc::Layout;
use core::num::NonZeroUsize;
use core::ptr::NonNull;

use crate::error::MemoryResult;

pub mod bump;
pub mod checked;
pub mod fault;
pub mod system;
pub mod tracked;

pub use bump::BumpAllocator;
pub use checked::{OOM_EXIT_CODE, allocate, allocate_in, out_of_memory};
pub use fault::FaultInjector;
pub use system::SystemAllocator;
pub use tracked::{AllocStats, TrackedAllocator};

/// A source of raw byte regions.
///
/// # Safety
///
/// Implementations must return regions that are valid for reads and writes
/// of `layout.size()` bytes, aligned to `layout.align()`, and that do not
/// overlap any other live region. A region stays valid until it is passed
/// back to [`deallocate`](Allocator::deallocate) on the same allocator (or
/// until the allocator itself is dropped or reset through `&mut self`).
///
/// Callers in this crate never request zero-sized layouts; backends may
/// still handle them by returning a dangling pointer.
pub unsafe trait Allocator {
    /// Obtain a fresh, uninitialized region for `layout`.
    fn allocate(&self, layout: Layout) -> MemoryResult<NonNull<[u8]>>;

    /// Return a region to the allocator.
    ///
    /// # Safety
    ///
    /// - `ptr` must have been returned by `allocate` on this allocator with
    ///   the same `layout`
    /// - `ptr` must not be used after this call
    /// - must be called at most once per region
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Allocator name for diagnostics
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

// SAFETY: forwards to the referenced allocator, which upholds the contract.
unsafe impl<A: Allocator + ?Sized> Allocator for &A {
    #[inline]
    fn allocate(&self, layout: Layout) -> MemoryResult<NonNull<[u8]>> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: caller's guarantees are forwarded unchanged.
        unsafe { (**self).deallocate(ptr, layout) }
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Dangling, suitably aligned empty region for a zero-sized `layout`
#[inline]
pub(crate) fn dangling_region(layout: Layout) -> NonNull<[u8]> {
    debug_assert_eq!(layout.size(), 0);
    // alignment is a non-zero power of two
    let addr = NonZeroUsize::new(layout.align()).unwrap_or(NonZeroUsize::MIN);
    NonNull::slice_from_raw_parts(NonNull::<u8>::dangling().with_addr(addr), 0)
}
