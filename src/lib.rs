//! Seqcmp: chunked byte-exact comparison of large files.
//!
//! The crate provides:
//! - The lock-step chunk comparator (`compare`)
//! - File-oriented helpers with timing (`io`)
//! - Repeated-trial timing summaries (`timing`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use std::io::Cursor;
//! use seqcmp::compare::{Outcome, compare_sources};
//!
//! let mut left = Cursor::new(b"AGCT".to_vec());
//! let mut right = Cursor::new(b"AGGT".to_vec());
//!
//! let cmp = compare_sources(&mut left, &mut right, 4).unwrap();
//! assert_eq!(cmp.outcome, Outcome::ContentMismatch { offset: 2 });
//! ```

pub mod compare;
pub mod io;
pub mod timing;

#[cfg(feature = "cli")]
pub mod cli;
