use proptest::prelude::*;
use seqcmp::compare::{Outcome, compare_sources};
use std::io::Cursor;

fn compare(left: &[u8], right: &[u8], buffer: usize) -> Outcome {
    compare_sources(&mut Cursor::new(left), &mut Cursor::new(right), buffer)
        .unwrap()
        .outcome
}

fn dna(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop::sample::select(b"ACGTN".to_vec()), len)
}

proptest! {
    #[test]
    fn prop_agrees_with_slice_equality(
        left in proptest::collection::vec(any::<u8>(), 0..2048),
        right in proptest::collection::vec(any::<u8>(), 0..2048),
        buffer in 1usize..4096
    ) {
        prop_assert_eq!(compare(&left, &right, buffer).is_equal(), left == right);
    }

    #[test]
    fn prop_identical_inputs_are_equal(data in dna(0..4096), buffer in 1usize..512) {
        prop_assert_eq!(compare(&data, &data, buffer), Outcome::Equal);
    }

    #[test]
    fn prop_single_byte_change_found_at_offset(
        data in dna(1..4096),
        pick in any::<prop::sample::Index>(),
        buffer in 1usize..1024
    ) {
        let k = pick.index(data.len());
        let mut other = data.clone();
        other[k] = b'X';
        prop_assert_eq!(
            compare(&data, &other, buffer),
            Outcome::ContentMismatch { offset: k as u64 }
        );
    }

    #[test]
    fn prop_result_independent_of_buffer_size(
        left in dna(0..1024),
        right in dna(0..1024),
        a in 1usize..64,
        b in 64usize..4096
    ) {
        prop_assert_eq!(compare(&left, &right, a), compare(&left, &right, b));
    }
}
