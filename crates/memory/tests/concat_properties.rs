//! Property tests for concatenation.
//!
//! Length, order, non-destructiveness and zero-length identity hold for
//! arbitrary byte inputs; every owned result is released exactly once.

use lenstr_memory::allocator::TrackedAllocator;
use lenstr_memory::buffer::Buffer;
use lenstr_memory::{concatenate, concatenate_in};
use proptest::prelude::*;

fn bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..256)
}

fn same_length_pair() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (0..64usize).prop_flat_map(|n| {
        (
            proptest::collection::vec(any::<u8>(), n),
            proptest::collection::vec(any::<u8>(), n),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn length_is_sum(a in bytes(), b in bytes()) {
        prop_assert_eq!(concatenate(&a, &b).len(), a.len() + b.len());
    }

    #[test]
    fn prefix_then_suffix(a in bytes(), b in bytes()) {
        let joined = concatenate(&a, &b);
        prop_assert_eq!(&joined[..a.len()], a.as_slice());
        prop_assert_eq!(&joined[a.len()..], b.as_slice());
    }

    #[test]
    fn swapping_distinct_inputs_changes_result((a, b) in same_length_pair()) {
        let ab = concatenate(&a, &b);
        let ba = concatenate(&b, &a);
        if a == b {
            prop_assert_eq!(ab, ba);
        } else {
            prop_assert_ne!(ab, ba);
        }
    }

    #[test]
    fn inputs_are_untouched(a in bytes(), b in bytes()) {
        let (before_a, before_b) = (a.clone(), b.clone());
        let left = Buffer::borrowed(&a);
        let right = Buffer::borrowed(&b);

        let _joined = concatenate(&left, &right);

        prop_assert_eq!(left.as_bytes(), before_a.as_slice());
        prop_assert_eq!(right.as_bytes(), before_b.as_slice());
    }

    #[test]
    fn empty_is_identity(a in bytes()) {
        let right_empty = concatenate(&a, b"");
        prop_assert_eq!(right_empty.as_bytes(), a.as_slice());
        let left_empty = concatenate(b"", &a);
        prop_assert_eq!(left_empty.as_bytes(), a.as_slice());
    }

    #[test]
    fn every_result_released_once(parts in proptest::collection::vec(bytes(), 1..8)) {
        let tracked = TrackedAllocator::default();
        {
            let mut acc = concatenate_in(&tracked, b"", &parts[0]);
            for part in &parts[1..] {
                acc = concatenate_in(&tracked, &acc, part);
            }
            let expected = parts.concat();
            prop_assert_eq!(acc.as_bytes(), expected.as_slice());
        }

        let stats = tracked.stats();
        prop_assert!(stats.is_balanced(), "unbalanced: {}", stats);
    }
}
