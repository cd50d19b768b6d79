//! Process heap backend

use core::alloc::Layout;
use core::ptr::NonNull;

use super::{Allocator, dangling_region};
use crate::error::{MemoryError, MemoryResult};

/// The global Rust allocator.
///
/// Zero-sized, so buffers that own one pay nothing for carrying it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemAllocator;

// SAFETY: delegates to the global allocator, which hands out distinct,
// properly aligned regions until they are passed to `dealloc`.
unsafe impl Allocator for SystemAllocator {
    #[inline]
    fn allocate(&self, layout: Layout) -> MemoryResult<NonNull<[u8]>> {
        if layout.size() == 0 {
            return Ok(dangling_region(layout));
        }

        // SAFETY: layout has non-zero size (checked above).
        let raw = unsafe { std::alloc::alloc(layout) };
        NonNull::new(raw)
            .map(|ptr| NonNull::slice_from_raw_parts(ptr, layout.size()))
            .ok_or_else(|| MemoryError::allocation_failed_with_layout(layout))
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }
        // SAFETY: caller guarantees `ptr` came from `allocate` with `layout`,
        // and non-zero sizes went through `std::alloc::alloc`.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }

    fn name(&self) -> &'static str {
        "system"
    }
}
