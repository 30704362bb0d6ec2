use seqcmp::compare::Outcome;
use seqcmp::io::compare_files;
use std::io::{Seek, SeekFrom, Write};
use tempfile::NamedTempFile;

const MIB: u64 = 1024 * 1024;

fn sparse_pair(len: u64) -> (NamedTempFile, NamedTempFile) {
    let left = NamedTempFile::new().unwrap();
    let right = NamedTempFile::new().unwrap();
    left.as_file().set_len(len).unwrap();
    right.as_file().set_len(len).unwrap();
    (left, right)
}

fn poke(file: &mut NamedTempFile, offset: u64, bytes: &[u8]) {
    file.as_file_mut().seek(SeekFrom::Start(offset)).unwrap();
    file.as_file_mut().write_all(bytes).unwrap();
    file.as_file_mut().flush().unwrap();
}

#[test]
#[ignore = "multi-GB test is opt-in due runtime and disk requirements"]
fn multi_gb_sparse_files() {
    let len = 2 * 1024 * MIB;
    let (mut left, mut right) = sparse_pair(len);
    poke(&mut left, 64 * 1024, b"ACGTACGT");
    poke(&mut right, 64 * 1024, b"ACGTACGT");

    let cmp = compare_files(left.path(), right.path(), (8 * MIB) as usize).unwrap();
    assert!(cmp.is_equal());
    assert_eq!(cmp.stats.bytes_compared, len);

    poke(&mut right, len - 1, b"T");
    let cmp = compare_files(left.path(), right.path(), (8 * MIB) as usize).unwrap();
    assert_eq!(cmp.outcome, Outcome::ContentMismatch { offset: len - 1 });
}

#[test]
fn mismatch_stops_at_containing_chunk() {
    let len = 16 * MIB;
    let (left, mut right) = sparse_pair(len);
    poke(&mut right, MIB + 17, b"G");

    let cmp = compare_files(left.path(), right.path(), MIB as usize).unwrap();
    assert_eq!(cmp.outcome, Outcome::ContentMismatch { offset: MIB + 17 });
    assert_eq!(cmp.stats.chunks, 2);
    assert_eq!(cmp.stats.bytes_compared, 2 * MIB);
}

#[test]
fn edge_case_matrix() {
    let cases: Vec<(&[u8], &[u8], bool)> = vec![
        (b"", b"", true),
        (b"", b"A", false),
        (b"A", b"", false),
        (b"\0\0\0\0\0", b"\0\0\0\0\0", true),
        (b"\0\0\0\0\0", b"\0\0\0\0\x01", false),
        (b"AGCT", b"AGCTT", false),
    ];

    for (left, right, expected) in cases {
        let l = NamedTempFile::new().unwrap();
        let r = NamedTempFile::new().unwrap();
        std::fs::write(l.path(), left).unwrap();
        std::fs::write(r.path(), right).unwrap();
        for buffer in [1usize, 2, 4, 1 << 20] {
            let cmp = compare_files(l.path(), r.path(), buffer).unwrap();
            assert_eq!(
                cmp.is_equal(),
                expected,
                "left={left:?} right={right:?} buffer={buffer}"
            );
        }
    }
}
