// File-level comparison helpers.
//
// Opens both paths, hands the handles to the chunked comparator and measures
// wall-clock time around the whole attempt. Handles are dropped (closed) on
// every return path.

use std::fs::File;
use std::path::Path;
use std::time::{Duration, Instant};

use log::debug;

use crate::compare::{self, CompareError, CompareStats, Outcome, Side};

// ---------------------------------------------------------------------------
// Buffer sizing
// ---------------------------------------------------------------------------

/// Bytes per megabyte as used for the buffer-size argument.
pub const MIB: u64 = 1024 * 1024;

/// Default chunk size in megabytes.
pub const DEFAULT_BUFFER_MB: u64 = 8;

/// Convert a buffer size in megabytes to bytes.
pub fn buffer_size_from_megabytes(megabytes: u64) -> Result<usize, CompareError> {
    if megabytes == 0 {
        return Err(CompareError::ZeroBufferSize);
    }
    megabytes
        .checked_mul(MIB)
        .and_then(|bytes| usize::try_from(bytes).ok())
        .ok_or(CompareError::BufferTooLarge { megabytes })
}

// ---------------------------------------------------------------------------
// compare_files
// ---------------------------------------------------------------------------

/// Result of comparing two files on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileComparison {
    pub outcome: Outcome,
    pub stats: CompareStats,
    /// Wall-clock time from opening the first file to the verdict.
    pub elapsed: Duration,
}

impl FileComparison {
    pub fn is_equal(&self) -> bool {
        self.outcome.is_equal()
    }
}

/// Compare the files at `left_path` and `right_path` in chunks of
/// `buffer_size` bytes.
///
/// A zero buffer size is rejected before either path is touched. Failure to
/// open either file is reported as [`CompareError::Open`] and no comparison
/// is attempted.
pub fn compare_files(
    left_path: &Path,
    right_path: &Path,
    buffer_size: usize,
) -> Result<FileComparison, CompareError> {
    if buffer_size == 0 {
        return Err(CompareError::ZeroBufferSize);
    }

    let start = Instant::now();

    let mut left = open(left_path, Side::Left)?;
    let mut right = open(right_path, Side::Right)?;

    let cmp = compare::compare_sources(&mut left, &mut right, buffer_size)?;
    let elapsed = start.elapsed();

    debug!(
        "{} vs {}: {} in {:.6}s",
        left_path.display(),
        right_path.display(),
        cmp.outcome,
        elapsed.as_secs_f64()
    );

    Ok(FileComparison {
        outcome: cmp.outcome,
        stats: cmp.stats,
        elapsed,
    })
}

fn open(path: &Path, side: Side) -> Result<File, CompareError> {
    File::open(path).map_err(|source| CompareError::Open {
        side,
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
