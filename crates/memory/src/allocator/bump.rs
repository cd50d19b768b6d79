//! Fixed-capacity bump heap
//!
//! One backing block is obtained up front. Allocation aligns the cursor and
//! bumps it past the request; nothing is ever handed back individually.
//! Running past the end of the block is reported as
//! [`MemoryError::ArenaExhausted`], which the checked path turns into the
//! usual "out of memory" exit.

use core::alloc::Layout;
use core::cell::Cell;
use core::fmt;
use core::ptr::NonNull;

use super::{Allocator, dangling_region};
use crate::error::{MemoryError, MemoryResult};

#[cfg(feature = "logging")]
use lenstr_log::debug;

/// Alignment of the backing block; requests up to this alignment never pay
/// for padding at the start of the heap.
const BACKING_ALIGN: usize = 16;

/// Bump allocator over a fixed heap.
///
/// Single-threaded: the cursor is a [`Cell`], so the allocator is `!Sync`.
/// Buffers allocated from it borrow it (`OwnedBuffer<&BumpAllocator>`), which
/// keeps [`reset`](Self::reset) from running while any of them is alive.
pub struct BumpAllocator {
    base: NonNull<u8>,
    capacity: usize,
    cursor: Cell<usize>,
    allocations: Cell<usize>,
}

impl BumpAllocator {
    /// Create a heap of `capacity` bytes.
    pub fn new(capacity: usize) -> MemoryResult<Self> {
        let base = if capacity == 0 {
            NonNull::dangling()
        } else {
            let layout = Self::backing_layout(capacity)?;
            // SAFETY: layout has non-zero size.
            let raw = unsafe { std::alloc::alloc(layout) };
            NonNull::new(raw).ok_or_else(|| MemoryError::allocation_failed_with_layout(layout))?
        };

        #[cfg(feature = "logging")]
        debug!(capacity, "bump heap ready");

        Ok(Self {
            base,
            capacity,
            cursor: Cell::new(0),
            allocations: Cell::new(0),
        })
    }

    fn backing_layout(capacity: usize) -> MemoryResult<Layout> {
        Layout::from_size_align(capacity, BACKING_ALIGN)
            .map_err(|_| MemoryError::invalid_layout("bump heap capacity exceeds isize::MAX"))
    }

    /// Total heap size in bytes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes consumed so far, alignment padding included
    #[inline]
    pub fn used(&self) -> usize {
        self.cursor.get()
    }

    /// Bytes left before the heap end
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.cursor.get()
    }

    /// Number of non-empty regions handed out since creation or last reset
    #[inline]
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    /// Rewind the heap to empty.
    ///
    /// Takes `&mut self`, so no buffer allocated from this heap can still be
    /// alive.
    pub fn reset(&mut self) {
        self.cursor.set(0);
        self.allocations.set(0);
    }
}

// SAFETY: regions are carved from disjoint, monotonically increasing ranges
// of the backing block, aligned as requested, and the block outlives every
// borrow of `self`. Rewinding requires `&mut self`.
unsafe impl Allocator for BumpAllocator {
    fn allocate(&self, layout: Layout) -> MemoryResult<NonNull<[u8]>> {
        if layout.size() == 0 {
            return Ok(dangling_region(layout));
        }

        let cursor = self.cursor.get();
        let available = self.capacity - cursor;
        let exhausted = || MemoryError::arena_exhausted("bump", layout.size(), available);

        // SAFETY: cursor <= capacity, so this stays within (or one past) the block.
        let padding = unsafe { self.base.add(cursor) }
            .as_ptr()
            .align_offset(layout.align());
        let start = cursor.checked_add(padding).ok_or_else(exhausted)?;
        let end = start.checked_add(layout.size()).ok_or_else(exhausted)?;
        if end > self.capacity {
            return Err(exhausted());
        }

        self.cursor.set(end);
        self.allocations.set(self.allocations.get() + 1);

        // SAFETY: start < end <= capacity.
        let ptr = unsafe { self.base.add(start) };
        Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
    }

    #[inline]
    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {
        // Reclaimed wholesale by `reset` or drop.
    }

    fn name(&self) -> &'static str {
        "bump"
    }
}

impl Drop for BumpAllocator {
    fn drop(&mut self) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(layout) = Self::backing_layout(self.capacity) {
            // SAFETY: `base` was allocated in `new` with this exact layout.
            unsafe { std::alloc::dealloc(self.base.as_ptr(), layout) }
        }
    }
}

impl fmt::Debug for BumpAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BumpAllocator")
            .field("capacity", &self.capacity)
            .field("used", &self.used())
            .field("allocations", &self.allocations())
            .finish_non_exhaustive()
    }
}
