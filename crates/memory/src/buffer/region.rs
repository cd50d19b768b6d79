//! Raw allocated regions

use core::alloc::Layout;
use core::fmt;
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};

use super::OwnedBuffer;
use crate::allocator::{Allocator, SystemAllocator};
use crate::error::{MemoryError, MemoryResult};

/// A freshly allocated span of exactly `len` bytes, owned together with the
/// allocator that must release it.
///
/// Contents start uninitialized. The region remembers how many leading bytes
/// have been [`write`](Self::write)n and only turns into an [`OwnedBuffer`]
/// once all of them have been.
///
/// A zero-length region is a dangling sentinel: it never calls the allocator
/// on creation or on drop.
pub struct Region<A: Allocator = SystemAllocator> {
    ptr: NonNull<u8>,
    layout: Layout,
    filled: usize,
    alloc: A,
}

impl<A: Allocator> Region<A> {
    /// Fallible allocation of `size` bytes from `alloc`.
    ///
    /// Most callers want [`allocate_in`](crate::allocator::allocate_in),
    /// which terminates instead of returning an error.
    pub fn try_allocate(alloc: A, size: usize) -> MemoryResult<Self> {
        let layout = Layout::array::<u8>(size)
            .map_err(|_| MemoryError::size_overflow("region size exceeds isize::MAX"))?;

        let ptr = if size == 0 {
            NonNull::dangling()
        } else {
            let region = alloc.allocate(layout)?;
            debug_assert!(region.len() >= size);
            region.cast::<u8>()
        };

        Ok(Self {
            ptr,
            layout,
            filled: 0,
            alloc,
        })
    }

    /// Size in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.layout.size()
    }

    /// Whether this is the zero-length sentinel
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.size() == 0
    }

    /// Bytes written so far
    #[inline]
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Bytes still to be written
    #[inline]
    pub fn remaining(&self) -> usize {
        self.len() - self.filled
    }

    /// Append `bytes` after the ones already written.
    ///
    /// # Panics
    ///
    /// If `bytes` does not fit in the remaining space.
    pub fn write(&mut self, bytes: &[u8]) {
        assert!(
            bytes.len() <= self.remaining(),
            "write of {} bytes overruns region ({} of {} bytes remaining)",
            bytes.len(),
            self.remaining(),
            self.len()
        );
        // SAFETY: `filled + bytes.len() <= len`, so the destination lies in
        // the region; the region is freshly allocated and cannot overlap a
        // borrowed source slice.
        unsafe {
            ptr::copy_nonoverlapping(
                bytes.as_ptr(),
                self.ptr.add(self.filled).as_ptr(),
                bytes.len(),
            );
        }
        self.filled += bytes.len();
    }

    /// Raw view of the whole region, for callers that fill it themselves.
    pub fn as_uninit_mut(&mut self) -> &mut [MaybeUninit<u8>] {
        // SAFETY: `ptr` is valid for `len` bytes (or dangling with len 0), and
        // `MaybeUninit<u8>` has no validity requirement.
        unsafe {
            core::slice::from_raw_parts_mut(self.ptr.cast::<MaybeUninit<u8>>().as_ptr(), self.len())
        }
    }

    /// Finish a fully written region.
    ///
    /// # Panics
    ///
    /// If fewer than `len` bytes were written.
    pub fn into_buffer(self) -> OwnedBuffer<A> {
        assert_eq!(
            self.filled,
            self.len(),
            "region converted to buffer before it was fully written"
        );
        OwnedBuffer::from_region(self)
    }

    /// Finish a region filled through [`as_uninit_mut`](Self::as_uninit_mut).
    ///
    /// # Safety
    ///
    /// Every byte of the region must have been initialized.
    pub unsafe fn assume_init(mut self) -> OwnedBuffer<A> {
        self.filled = self.len();
        OwnedBuffer::from_region(self)
    }

    /// Initialized prefix of the region
    #[inline]
    pub(crate) fn initialized(&self) -> &[u8] {
        // SAFETY: the first `filled` bytes were written through `write` or
        // promised initialized by `assume_init`.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.filled) }
    }
}

impl<A: Allocator> Drop for Region<A> {
    fn drop(&mut self) {
        if self.layout.size() != 0 {
            // SAFETY: non-empty regions came from `alloc.allocate(layout)` and
            // drop runs once.
            unsafe { self.alloc.deallocate(self.ptr, self.layout) }
        }
    }
}

impl<A: Allocator> fmt::Debug for Region<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("len", &self.len())
            .field("filled", &self.filled)
            .field("allocator", &self.alloc.name())
            .finish()
    }
}

// SAFETY: the region is uniquely owned; sending it moves the allocator handle
// along with it.
unsafe impl<A: Allocator + Send> Send for Region<A> {}

// SAFETY: shared access only reads initialized bytes.
unsafe impl<A: Allocator + Sync> Sync for Region<A> {}
