// Chunked lock-step comparison of two byte sources.
//
// Sizes are checked from metadata before any content is read. Content is
// then streamed through two fixed buffers, allocated once per comparison and
// overwritten on every iteration, and compared chunk by chunk. The loop stops
// at the first chunk that differs; nothing past that chunk is read.

use std::collections::TryReserveError;
use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, ErrorKind, Read};
use std::path::PathBuf;

use log::{debug, trace, warn};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// Which of the two inputs an error or measurement refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Conditions that prevent a comparison from producing a result.
///
/// A content difference is never an error; it is reported through
/// [`Outcome`].
#[derive(Debug, Error)]
pub enum CompareError {
    /// An input path could not be opened for reading.
    #[error("cannot open {side} file {}: {source}", .path.display())]
    Open {
        side: Side,
        path: PathBuf,
        source: io::Error,
    },

    /// A buffer size of zero was requested.
    #[error("buffer size must be greater than zero")]
    ZeroBufferSize,

    /// The requested buffer size overflows the address space.
    #[error("buffer size of {megabytes} MB is too large")]
    BufferTooLarge { megabytes: u64 },

    /// A chunk buffer could not be allocated.
    #[error("cannot allocate {bytes}-byte chunk buffer: {source}")]
    BufferAlloc {
        bytes: usize,
        source: TryReserveError,
    },

    /// The size of an input could not be queried.
    #[error("cannot read size of {side} input: {source}")]
    Metadata { side: Side, source: io::Error },

    /// Reading a chunk failed.
    #[error("read error on {side} input at offset {offset}: {source}")]
    Read {
        side: Side,
        offset: u64,
        source: io::Error,
    },
}

// ---------------------------------------------------------------------------
// Byte source trait
// ---------------------------------------------------------------------------

/// A readable input whose total length is known without reading it.
pub trait ByteSource: Read {
    /// Total length of the input in bytes, from metadata.
    fn byte_len(&self) -> io::Result<u64>;
}

impl ByteSource for File {
    fn byte_len(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }
}

impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn byte_len(&self) -> io::Result<u64> {
        Ok(self.get_ref().as_ref().len() as u64)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn byte_len(&self) -> io::Result<u64> {
        (**self).byte_len()
    }
}

// ---------------------------------------------------------------------------
// Outcome + stats
// ---------------------------------------------------------------------------

/// How a comparison ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every byte matched and both inputs ended together.
    Equal,
    /// Metadata sizes differ; no content was read.
    SizeMismatch { left: u64, right: u64 },
    /// A lock-step read returned different byte counts from each side.
    ChunkLengthMismatch {
        offset: u64,
        left: usize,
        right: usize,
    },
    /// The inputs differ; `offset` is the first differing byte.
    ContentMismatch { offset: u64 },
}

impl Outcome {
    pub fn is_equal(&self) -> bool {
        matches!(self, Self::Equal)
    }

    /// Absolute offset at which the inputs were found to diverge, if known.
    pub fn mismatch_offset(&self) -> Option<u64> {
        match *self {
            Self::Equal | Self::SizeMismatch { .. } => None,
            Self::ChunkLengthMismatch { offset, .. } | Self::ContentMismatch { offset } => {
                Some(offset)
            }
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => f.write_str("inputs are identical"),
            Self::SizeMismatch { left, right } => {
                write!(f, "sizes differ: left {left} bytes, right {right} bytes")
            }
            Self::ChunkLengthMismatch {
                offset,
                left,
                right,
            } => write!(
                f,
                "read lengths diverged at offset {offset}: left {left} bytes, right {right} bytes"
            ),
            Self::ContentMismatch { offset } => write!(f, "first difference at offset {offset}"),
        }
    }
}

/// Counters collected while comparing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareStats {
    /// Non-empty chunks read from each side.
    pub chunks: u64,
    /// Bytes read and compared from each side.
    pub bytes_compared: u64,
}

/// Result of [`compare_sources`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub outcome: Outcome,
    pub stats: CompareStats,
}

impl Comparison {
    pub fn is_equal(&self) -> bool {
        self.outcome.is_equal()
    }
}

// ---------------------------------------------------------------------------
// Comparator
// ---------------------------------------------------------------------------

/// Compare two sources byte for byte using chunks of `buffer_size` bytes.
///
/// Sizes are compared first and a mismatch returns without reading. The two
/// chunk buffers are allocated once, capped at the input length, and reused
/// for every read. Returns at the
/// first differing chunk, so no bytes beyond it are read from either side.
pub fn compare_sources<L, R>(
    left: &mut L,
    right: &mut R,
    buffer_size: usize,
) -> Result<Comparison, CompareError>
where
    L: ByteSource + ?Sized,
    R: ByteSource + ?Sized,
{
    if buffer_size == 0 {
        return Err(CompareError::ZeroBufferSize);
    }

    let left_len = left.byte_len().map_err(|source| CompareError::Metadata {
        side: Side::Left,
        source,
    })?;
    let right_len = right.byte_len().map_err(|source| CompareError::Metadata {
        side: Side::Right,
        source,
    })?;

    let mut stats = CompareStats::default();

    if left_len != right_len {
        debug!("size mismatch: left {left_len} bytes, right {right_len} bytes");
        return Ok(Comparison {
            outcome: Outcome::SizeMismatch {
                left: left_len,
                right: right_len,
            },
            stats,
        });
    }

    // A chunk can never hold more than the whole input.
    let chunk_size = usize::try_from(left_len)
        .map_or(buffer_size, |len| buffer_size.min(len))
        .max(1);
    debug!("comparing {left_len} bytes in chunks of {chunk_size}");

    let mut left_buf = alloc_buffer(chunk_size)?;
    let mut right_buf = alloc_buffer(chunk_size)?;
    let mut offset = 0u64;

    loop {
        let n_left = fill_chunk(&mut *left, &mut left_buf).map_err(|source| CompareError::Read {
            side: Side::Left,
            offset,
            source,
        })?;
        let n_right =
            fill_chunk(&mut *right, &mut right_buf).map_err(|source| CompareError::Read {
                side: Side::Right,
                offset,
                source,
            })?;

        // Sizes already matched, so this only fires if an input changed
        // length while being read.
        if n_left != n_right {
            warn!(
                "read lengths diverged at offset {offset}: left {n_left}, right {n_right} \
                 (input modified during comparison?)"
            );
            return Ok(Comparison {
                outcome: Outcome::ChunkLengthMismatch {
                    offset,
                    left: n_left,
                    right: n_right,
                },
                stats,
            });
        }

        if n_left == 0 {
            break;
        }

        stats.chunks += 1;
        stats.bytes_compared += n_left as u64;

        let a = &left_buf[..n_left];
        let b = &right_buf[..n_right];
        if a != b {
            let first = a.iter().zip(b).position(|(x, y)| x != y).unwrap_or(0);
            let mismatch = offset + first as u64;
            debug!("content mismatch at offset {mismatch}");
            return Ok(Comparison {
                outcome: Outcome::ContentMismatch { offset: mismatch },
                stats,
            });
        }

        trace!("chunk {} matched ({n_left} bytes at {offset})", stats.chunks);
        offset += n_left as u64;
    }

    debug!("inputs identical after {} chunks", stats.chunks);
    Ok(Comparison {
        outcome: Outcome::Equal,
        stats,
    })
}

fn alloc_buffer(bytes: usize) -> Result<Vec<u8>, CompareError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes)
        .map_err(|source| CompareError::BufferAlloc { bytes, source })?;
    buf.resize(bytes, 0);
    Ok(buf)
}

/// Read until `buf` is full or the source is exhausted.
///
/// A single `read` may return fewer bytes than requested before end of
/// input; the count returned here is short only on the final chunk.
fn fill_chunk<R: Read + ?Sized>(src: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
