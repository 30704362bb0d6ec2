// Command-line front end for seqcmp.
//
// `seqcmp <LEFT> <RIGHT> [BUFFER_MB]` compares two files and prints a short
// report. Exit status: 0 equal, 2 not equal or comparison failed, 1 bad
// invocation.

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueHint};
use log::{debug, info};

use crate::compare::CompareError;
use crate::io::{
    DEFAULT_BUFFER_MB, FileComparison, MIB, buffer_size_from_megabytes, compare_files,
};
use crate::timing::TrialSummary;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const EXIT_EQUAL: i32 = 0;
const EXIT_USAGE: i32 = 1;
const EXIT_DIFFERENT: i32 = 2;

const RULE: &str = "========================================";
const THIN_RULE: &str = "----------------------------------------";

// ---------------------------------------------------------------------------
// Byte size parsing (supports K, M, G suffixes)
// ---------------------------------------------------------------------------

fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size string".into());
    }
    let (num_part, multiplier) = match s.as_bytes().last() {
        Some(b'k' | b'K') => (&s[..s.len() - 1], 1024u64),
        Some(b'm' | b'M') => (&s[..s.len() - 1], MIB),
        Some(b'g' | b'G') => (&s[..s.len() - 1], 1024 * MIB),
        _ => (s, 1u64),
    };
    let num: u64 = num_part
        .trim()
        .parse()
        .map_err(|e| format!("invalid size '{s}': {e}"))?;
    if num == 0 {
        return Err("buffer size must be greater than zero".into());
    }
    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size overflow: '{s}'"))
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Chunked byte-exact comparison of two files.
#[derive(Parser, Debug)]
#[command(
    name = "seqcmp",
    version,
    about = "Chunked byte-exact file comparator",
    arg_required_else_help = true
)]
struct Cli {
    /// First file to compare.
    #[arg(value_hint = ValueHint::FilePath)]
    left: PathBuf,

    /// Second file to compare.
    #[arg(value_hint = ValueHint::FilePath)]
    right: PathBuf,

    /// Chunk size in megabytes [default: 8].
    #[arg(
        value_name = "BUFFER_MB",
        value_parser = clap::value_parser!(u64).range(1..),
        conflicts_with = "buffer_size"
    )]
    buffer_mb: Option<u64>,

    /// Chunk size in bytes (supports K/M/G suffix).
    #[arg(long = "buffer-size", value_name = "SIZE", value_parser = parse_byte_size)]
    buffer_size: Option<u64>,

    /// Repeat the comparison and report mean/std-dev timing.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), default_value_t = 1)]
    trials: u32,

    /// Print the report as JSON.
    #[arg(long = "json")]
    json_output: bool,

    /// Quiet mode (no report, exit status only).
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use twice for debug logging).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Options {
    left: PathBuf,
    right: PathBuf,
    buffer_bytes: usize,
    trials: u32,
    json_output: bool,
    quiet: bool,
    verbose: u8,
}

fn resolve_options(cli: Cli) -> Result<Options, CompareError> {
    let buffer_bytes = match cli.buffer_size {
        Some(bytes) => usize::try_from(bytes).map_err(|_| CompareError::BufferTooLarge {
            megabytes: bytes / MIB,
        })?,
        None => buffer_size_from_megabytes(cli.buffer_mb.unwrap_or(DEFAULT_BUFFER_MB))?,
    };

    Ok(Options {
        left: cli.left,
        right: cli.right,
        buffer_bytes,
        trials: cli.trials,
        json_output: cli.json_output,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
    })
}

/// Help and version requests succeed; every other parse failure is a usage
/// error.
fn parse_error_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_EQUAL,
        _ => EXIT_USAGE,
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("seqcmp".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Report rendering
// ---------------------------------------------------------------------------

fn format_megabytes(bytes: usize) -> String {
    let bytes = bytes as u64;
    if bytes % MIB == 0 {
        (bytes / MIB).to_string()
    } else {
        format!("{:.3}", bytes as f64 / MIB as f64)
    }
}

/// Human-readable buffer size; sizes under a megabyte are shown in bytes.
fn buffer_label(bytes: usize) -> String {
    if (bytes as u64) < MIB {
        format!("{bytes} bytes")
    } else {
        format!("{} MB", format_megabytes(bytes))
    }
}

fn verdict(cmp: &FileComparison) -> &'static str {
    if cmp.is_equal() { "EQUAL" } else { "NOT EQUAL" }
}

fn render_text(opts: &Options, cmp: &FileComparison, summary: &TrialSummary) -> String {
    let mut lines = vec![
        RULE.to_string(),
        "DNA Sequence Comparator".to_string(),
        THIN_RULE.to_string(),
        format!("File 1: {}", opts.left.display()),
        format!("File 2: {}", opts.right.display()),
        format!("Buffer Size: {}", buffer_label(opts.buffer_bytes)),
        THIN_RULE.to_string(),
        format!("Result: {}", verdict(cmp)),
        format!("Time Elapsed: {:.6} seconds", cmp.elapsed.as_secs_f64()),
    ];
    if summary.len() > 1 {
        lines.push(format!("Trials: {}", summary.len()));
        lines.push(format!("Mean Time: {:.6} seconds", summary.mean_secs()));
        lines.push(format!("Std Dev: {:.6} seconds", summary.std_dev_secs()));
    }
    lines.push(RULE.to_string());
    lines.join("\n")
}

fn render_json(opts: &Options, cmp: &FileComparison, summary: &TrialSummary) -> serde_json::Value {
    serde_json::json!({
        "left": opts.left.display().to_string(),
        "right": opts.right.display().to_string(),
        "buffer_bytes": opts.buffer_bytes,
        "buffer_mb": format_megabytes(opts.buffer_bytes),
        "result": verdict(cmp),
        "equal": cmp.is_equal(),
        "reason": cmp.outcome.to_string(),
        "mismatch_offset": cmp.outcome.mismatch_offset(),
        "chunks": cmp.stats.chunks,
        "bytes_compared": cmp.stats.bytes_compared,
        "elapsed_seconds": cmp.elapsed.as_secs_f64(),
        "trials": summary.len(),
        "mean_seconds": summary.mean_secs(),
        "std_dev_seconds": summary.std_dev_secs(),
        "runs_seconds": summary
            .runs()
            .iter()
            .map(|d| d.as_secs_f64())
            .collect::<Vec<_>>(),
    })
}

// ---------------------------------------------------------------------------
// Compare command
// ---------------------------------------------------------------------------

fn cmd_compare(opts: &Options) -> i32 {
    let mut summary = TrialSummary::new();
    let mut last: Option<FileComparison> = None;

    for trial in 1..=opts.trials {
        let cmp = match compare_files(&opts.left, &opts.right, opts.buffer_bytes) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("seqcmp: {e}");
                return EXIT_DIFFERENT;
            }
        };
        debug!(
            "trial {trial}/{}: {} in {:.6}s",
            opts.trials,
            cmp.outcome,
            cmp.elapsed.as_secs_f64()
        );

        if let Some(prev) = &last {
            if prev.outcome != cmp.outcome {
                eprintln!(
                    "seqcmp: trials disagree: '{}' then '{}' (files changed during run?)",
                    prev.outcome, cmp.outcome
                );
                return EXIT_DIFFERENT;
            }
        }

        summary.push(cmp.elapsed);
        last = Some(cmp);
    }

    let Some(cmp) = last else {
        eprintln!("seqcmp: no trials were run");
        return EXIT_USAGE;
    };

    if !cmp.is_equal() {
        info!("{}", cmp.outcome);
    }
    if opts.verbose > 0 {
        info!(
            "{} chunks, {} bytes compared per side",
            cmp.stats.chunks, cmp.stats.bytes_compared
        );
    }

    if !opts.quiet {
        if opts.json_output {
            println!("{:#}", render_json(opts, &cmp, &summary));
        } else {
            println!("{}", render_text(opts, &cmp, &summary));
        }
    }

    if cmp.is_equal() {
        EXIT_EQUAL
    } else {
        EXIT_DIFFERENT
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn init_logger(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Main CLI entry point. Parses arguments via clap and runs the comparison.
pub fn run() -> ! {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = parse_error_exit_code(&e);
            let _ = e.print();
            process::exit(code);
        }
    };

    init_logger(cli.verbose.min(2));

    let opts = match resolve_options(cli) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("seqcmp: {e}");
            process::exit(EXIT_USAGE);
        }
    };

    process::exit(cmd_compare(&opts));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
