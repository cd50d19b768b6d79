//! Owned, immutable byte buffers

use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Deref;
use std::io;

use super::Region;
use crate::allocator::{Allocator, SystemAllocator};

/// A length-tagged byte buffer that exclusively owns its region.
///
/// Produced by [`concatenate`](crate::concat::concatenate) and the
/// constructors in [`convert`](crate::convert). Capacity always equals
/// length. The bytes are never mutated after construction, and the region is
/// handed back to its allocator exactly once, when the buffer is dropped.
pub struct OwnedBuffer<A: Allocator = SystemAllocator> {
    region: Region<A>,
}

impl<A: Allocator> OwnedBuffer<A> {
    pub(super) fn from_region(region: Region<A>) -> Self {
        debug_assert_eq!(region.filled(), region.len());
        Self { region }
    }

    /// Number of valid bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.region.len()
    }

    /// Whether the buffer holds no bytes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    /// The buffer contents
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.region.initialized()
    }

    /// Write exactly `len` bytes to `writer`, no terminator.
    pub fn write_to<W: io::Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.as_bytes())
    }
}

impl<A: Allocator> Deref for OwnedBuffer<A> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A: Allocator> AsRef<[u8]> for OwnedBuffer<A> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A: Allocator> Borrow<[u8]> for OwnedBuffer<A> {
    #[inline]
    fn borrow(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A: Allocator> fmt::Debug for OwnedBuffer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnedBuffer(b\"{}\")", self.as_bytes().escape_ascii())
    }
}

impl<A: Allocator, B: Allocator> PartialEq<OwnedBuffer<B>> for OwnedBuffer<A> {
    #[inline]
    fn eq(&self, other: &OwnedBuffer<B>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> Eq for OwnedBuffer<A> {}

impl<A: Allocator> Hash for OwnedBuffer<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

super::impl_bytes_eq!(OwnedBuffer<A>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::allocate;

    fn owned(bytes: &[u8]) -> OwnedBuffer {
        let mut region = allocate(bytes.len());
        region.write(bytes);
        region.into_buffer()
    }

    #[test]
    fn equality_is_bytewise() {
        assert_eq!(owned(b"abc"), owned(b"abc"));
        assert_ne!(owned(b"abc"), owned(b"abd"));
        assert_ne!(owned(b"abc"), owned(b"ab"));
        assert_eq!(owned(b"abc"), "abc");
        assert_eq!(owned(b"abc"), b"abc");
        assert_eq!(owned(b""), *b"");
    }

    #[test]
    fn debug_escapes_non_printable_bytes() {
        assert_eq!(format!("{:?}", owned(b"hi\n\xff")), r#"OwnedBuffer(b"hi\n\xff")"#);
    }

    #[test]
    fn write_to_emits_exact_bytes() {
        let mut out = Vec::new();
        owned(b"no terminator").write_to(&mut out).unwrap();
        assert_eq!(out, b"no terminator");
    }
}
