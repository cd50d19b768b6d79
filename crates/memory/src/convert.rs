//! Owned buffers built from scalars

use crate::allocator::{Allocator, SystemAllocator, allocate_in};
use crate::buffer::OwnedBuffer;

/// Longest decimal rendering of an `i64`: `-9223372036854775808`
const MAX_DECIMAL_LEN: usize = 20;

/// One-byte buffer holding `byte`, on the process heap.
#[inline]
pub fn from_byte(byte: u8) -> OwnedBuffer<SystemAllocator> {
    from_byte_in(SystemAllocator, byte)
}

/// One-byte buffer holding `byte`, allocated from `alloc`.
pub fn from_byte_in<A: Allocator>(alloc: A, byte: u8) -> OwnedBuffer<A> {
    let mut region = allocate_in(alloc, 1);
    region.write(&[byte]);
    region.into_buffer()
}

/// ASCII decimal rendering of `n`, on the process heap.
///
/// ```
/// use lenstr_memory::convert::decimal;
///
/// assert_eq!(decimal(-42), "-42");
/// ```
#[inline]
pub fn decimal(n: i64) -> OwnedBuffer<SystemAllocator> {
    decimal_in(SystemAllocator, n)
}

/// ASCII decimal rendering of `n`, allocated from `alloc` with no slack.
pub fn decimal_in<A: Allocator>(alloc: A, n: i64) -> OwnedBuffer<A> {
    let mut digits = [0u8; MAX_DECIMAL_LEN];
    let mut start = MAX_DECIMAL_LEN;
    let mut rest = n.unsigned_abs();

    loop {
        start -= 1;
        digits[start] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    if n < 0 {
        start -= 1;
        digits[start] = b'-';
    }

    let rendered = &digits[start..];
    let mut region = allocate_in(alloc, rendered.len());
    region.write(rendered);
    region.into_buffer()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::allocator::TrackedAllocator;

    #[test]
    fn single_byte() {
        let buffer = from_byte(b'!');
        assert_eq!(buffer, b"!");
        assert_eq!(buffer.len(), 1);
    }

    #[rstest]
    #[case(0, "0")]
    #[case(7, "7")]
    #[case(10, "10")]
    #[case(-1, "-1")]
    #[case(i64::MAX, "9223372036854775807")]
    #[case(i64::MIN, "-9223372036854775808")]
    fn renders_decimal(#[case] n: i64, #[case] expected: &str) {
        assert_eq!(decimal(n), expected);
    }

    #[test]
    fn decimal_allocates_exact_length() {
        let tracked = TrackedAllocator::default();
        let rendered = decimal_in(&tracked, -12345);
        assert_eq!(tracked.stats().bytes_allocated, 6);
        assert_eq!(rendered, "-12345");
    }

    proptest! {
        #[test]
        fn decimal_matches_std(n in any::<i64>()) {
            let actual = decimal(n);
            let expected = n.to_string();
            prop_assert_eq!(actual.as_bytes(), expected.as_bytes());
        }
    }
}
