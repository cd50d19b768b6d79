//! Length-tagged byte buffers
//!
//! A buffer is a byte region plus its length. Two kinds exist and the type
//! system keeps them apart:
//!
//! - [`OwnedBuffer`] exclusively owns an allocated [`Region`] and releases it
//!   exactly once, on drop, through the allocator that produced it;
//! - [`Buffer::Borrowed`] views bytes someone else owns (typically a
//!   literal) and never reaches an allocator.
//!
//! [`Buffer`] is the tagged union of the two, for code that handles both.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Deref;

use crate::allocator::{Allocator, SystemAllocator, allocate_in};

/// Byte-wise equality against slices, strings and arrays.
macro_rules! impl_bytes_eq {
    ($ty:ty $(, $lt:lifetime)?) => {
        impl<$($lt,)? A: Allocator> PartialEq<[u8]> for $ty {
            #[inline]
            fn eq(&self, other: &[u8]) -> bool {
                self.as_bytes() == other
            }
        }

        impl<$($lt,)? A: Allocator> PartialEq<&[u8]> for $ty {
            #[inline]
            fn eq(&self, other: &&[u8]) -> bool {
                self.as_bytes() == *other
            }
        }

        impl<$($lt,)? A: Allocator> PartialEq<str> for $ty {
            #[inline]
            fn eq(&self, other: &str) -> bool {
                self.as_bytes() == other.as_bytes()
            }
        }

        impl<$($lt,)? A: Allocator> PartialEq<&str> for $ty {
            #[inline]
            fn eq(&self, other: &&str) -> bool {
                self.as_bytes() == other.as_bytes()
            }
        }

        impl<$($lt,)? A: Allocator, const N: usize> PartialEq<[u8; N]> for $ty {
            #[inline]
            fn eq(&self, other: &[u8; N]) -> bool {
                self.as_bytes() == other.as_slice()
            }
        }

        impl<$($lt,)? A: Allocator, const N: usize> PartialEq<&[u8; N]> for $ty {
            #[inline]
            fn eq(&self, other: &&[u8; N]) -> bool {
                self.as_bytes() == other.as_slice()
            }
        }
    };
}
pub(crate) use impl_bytes_eq;

mod owned;
mod region;

pub use owned::OwnedBuffer;
pub use region::Region;

/// Either a borrowed view or an owned allocation.
///
/// Only the `Owned` arm ever releases memory; dropping a `Borrowed` buffer
/// is a no-op.
pub enum Buffer<'a, A: Allocator = SystemAllocator> {
    /// Bytes owned elsewhere, e.g. a literal
    Borrowed(&'a [u8]),
    /// Bytes in a region this buffer owns
    Owned(OwnedBuffer<A>),
}

impl<'a> Buffer<'a> {
    /// Wrap bytes owned elsewhere.
    ///
    /// ```
    /// use lenstr_memory::buffer::Buffer;
    ///
    /// let greeting = Buffer::borrowed(b"Hello ");
    /// assert_eq!(greeting.len(), 6);
    /// assert!(!greeting.is_owned());
    /// ```
    #[inline]
    pub const fn borrowed(bytes: &'a [u8]) -> Self {
        Self::Borrowed(bytes)
    }
}

impl<'a, A: Allocator> Buffer<'a, A> {
    /// Number of valid bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the buffer holds no bytes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The buffer contents
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Borrowed(bytes) => bytes,
            Self::Owned(owned) => owned.as_bytes(),
        }
    }

    /// Whether this buffer is responsible for releasing its region
    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// The owned buffer, if this is one
    pub fn into_owned(self) -> Option<OwnedBuffer<A>> {
        match self {
            Self::Borrowed(_) => None,
            Self::Owned(owned) => Some(owned),
        }
    }

    /// Copy the contents into a fresh region from `alloc`.
    ///
    /// Goes through the checked allocation path: exhaustion terminates the
    /// process.
    pub fn to_owned_in<B: Allocator>(&self, alloc: B) -> OwnedBuffer<B> {
        let bytes = self.as_bytes();
        let mut region = allocate_in(alloc, bytes.len());
        region.write(bytes);
        region.into_buffer()
    }
}

impl<'a, A: Allocator> From<&'a [u8]> for Buffer<'a, A> {
    #[inline]
    fn from(bytes: &'a [u8]) -> Self {
        Self::Borrowed(bytes)
    }
}

impl<'a, A: Allocator, const N: usize> From<&'a [u8; N]> for Buffer<'a, A> {
    #[inline]
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Borrowed(bytes)
    }
}

impl<'a, A: Allocator> From<&'a str> for Buffer<'a, A> {
    #[inline]
    fn from(text: &'a str) -> Self {
        Self::Borrowed(text.as_bytes())
    }
}

impl<A: Allocator> From<OwnedBuffer<A>> for Buffer<'_, A> {
    #[inline]
    fn from(owned: OwnedBuffer<A>) -> Self {
        Self::Owned(owned)
    }
}

impl<A: Allocator> Deref for Buffer<'_, A> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A: Allocator> AsRef<[u8]> for Buffer<'_, A> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A: Allocator> fmt::Debug for Buffer<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_owned() { "Owned" } else { "Borrowed" };
        write!(f, "{kind}(b\"{}\")", self.as_bytes().escape_ascii())
    }
}

impl<A: Allocator, B: Allocator> PartialEq<Buffer<'_, B>> for Buffer<'_, A> {
    #[inline]
    fn eq(&self, other: &Buffer<'_, B>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator, B: Allocator> PartialEq<OwnedBuffer<B>> for Buffer<'_, A> {
    #[inline]
    fn eq(&self, other: &OwnedBuffer<B>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator, B: Allocator> PartialEq<Buffer<'_, B>> for OwnedBuffer<A> {
    #[inline]
    fn eq(&self, other: &Buffer<'_, B>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> Eq for Buffer<'_, A> {}

impl<A: Allocator> Hash for Buffer<'_, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl_bytes_eq!(Buffer<'a, A>, 'a);
