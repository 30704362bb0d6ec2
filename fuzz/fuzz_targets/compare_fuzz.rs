#![no_main]
use libfuzzer_sys::fuzz_target;
use seqcmp::compare::{Outcome, compare_sources};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First byte picks the buffer size, the rest splits into two inputs.
    let buffer = data[0] as usize + 1;
    let payload = &data[1..];
    let split = payload.len() / 2;
    let (left, right) = payload.split_at(split);

    let cmp = compare_sources(&mut Cursor::new(left), &mut Cursor::new(right), buffer).unwrap();
    assert_eq!(cmp.is_equal(), left == right);

    if let Outcome::ContentMismatch { offset } = cmp.outcome {
        let k = offset as usize;
        assert_eq!(left[..k], right[..k]);
        assert_ne!(left[k], right[k]);
    }

    let self_cmp = compare_sources(&mut Cursor::new(left), &mut Cursor::new(left), buffer).unwrap();
    assert!(self_cmp.is_equal());
});
