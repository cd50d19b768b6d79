//! Concatenation of two length-tagged buffers

use crate::allocator::{Allocator, SystemAllocator, allocate_in, out_of_memory};
use crate::buffer::OwnedBuffer;
use crate::error::MemoryError;

#[cfg(feature = "logging")]
use lenstr_log::trace;

/// Concatenate `a` and `b` into a new buffer on the process heap.
///
/// See [`concatenate_in`].
///
/// ```
/// use lenstr_memory::buffer::Buffer;
/// use lenstr_memory::concat::concatenate;
///
/// let a = Buffer::borrowed(b"Hello ");
/// let b = Buffer::borrowed(b"world!!!");
/// let joined = concatenate(&a, &b);
///
/// assert_eq!(joined.len(), 14);
/// assert_eq!(joined, "Hello world!!!");
/// ```
#[inline]
pub fn concatenate<L, R>(a: &L, b: &R) -> OwnedBuffer<SystemAllocator>
where
    L: AsRef<[u8]> + ?Sized,
    R: AsRef<[u8]> + ?Sized,
{
    concatenate_in(SystemAllocator, a, b)
}

/// Concatenate `a` and `b` into a new buffer allocated from `alloc`.
///
/// The result holds exactly `a.len() + b.len()` bytes: all of `a`, then all
/// of `b`. Both inputs are only read. The single allocation goes through the
/// checked path, so exhaustion terminates the process rather than returning.
/// So does a total above `isize::MAX`, which `Layout::array` rejects in
/// [`Region::try_allocate`](crate::buffer::Region::try_allocate). Two empty
/// inputs produce an empty buffer without allocating.
pub fn concatenate_in<A, L, R>(alloc: A, a: &L, b: &R) -> OwnedBuffer<A>
where
    A: Allocator,
    L: AsRef<[u8]> + ?Sized,
    R: AsRef<[u8]> + ?Sized,
{
    let (a, b) = (a.as_ref(), b.as_ref());
    // Slices never exceed `isize::MAX` bytes, so two of them cannot wrap
    // `usize`; the effective limit is the layout check in `try_allocate`.
    let Some(total) = a.len().checked_add(b.len()) else {
        out_of_memory(&MemoryError::size_overflow("concatenate"));
    };

    let mut region = allocate_in(alloc, total);
    region.write(a);
    region.write(b);

    #[cfg(feature = "logging")]
    trace!(left = a.len(), right = b.len(), total, "concatenated");

    region.into_buffer()
}
