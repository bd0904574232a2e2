// LogTally - core/loader.rs
//
// Drives the line parser over an ordered sequence of lines.
// Core layer: accepts line iterators or BufRead objects, never opens files.
//
// Failure tiers:
//   - A malformed line is counted, reported through the diagnostic callback,
//     and loading continues with the next line.
//   - A read failure on the source aborts the load; no partial result.

use crate::core::model::LogRecord;
use crate::core::parser;
use crate::util::constants;
use crate::util::error::{LoadError, ParseError};
use rayon::prelude::*;
use std::convert::Infallible;
use std::fmt;
use std::io::BufRead;
use std::path::Path;

/// Optional bounds and strategy for a load.
#[derive(Debug, Clone, Default)]
pub struct LoadConfig {
    /// Stop after this many input lines. `None` reads everything.
    pub max_lines: Option<usize>,

    /// Parse lines on the rayon pool. Output is identical to a sequential
    /// load; input order is restored before records are collected.
    pub parallel: bool,
}

/// Result of loading one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadResult {
    /// Parsed records, in input order.
    pub records: Vec<LogRecord>,
    /// Non-blank lines that failed to parse.
    pub skipped: usize,
    /// Input lines consumed, blank lines included.
    pub lines_read: usize,
    /// True when `max_lines` stopped the load before the end of input.
    pub truncated: bool,
}

/// Side-channel events emitted while loading.
///
/// These are not part of [`LoadResult`]; callers decide where they go
/// (the CLI prints them to stderr).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadDiagnostic {
    /// The line at 0-based `index` was malformed and skipped.
    SkippedLine { index: usize, reason: &'static str },

    /// Input beyond `limit` lines was not read.
    Truncated { limit: usize },

    /// Emitted once at the end of a load that skipped at least one line.
    Summary { skipped: usize },
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkippedLine { index, reason } => {
                write!(f, "Warning: skip invalid line {index} ({reason})")
            }
            Self::Truncated { limit } => {
                write!(f, "Note: stopped reading after {limit} line(s).")
            }
            Self::Summary { skipped } => write!(f, "Note: skipped {skipped} invalid line(s)."),
        }
    }
}

/// Load records from lines already in memory.
///
/// Never fails: malformed lines are skipped and reported through
/// `on_diagnostic`.
pub fn load_lines<I, S, F>(lines: I, config: &LoadConfig, on_diagnostic: F) -> LoadResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str> + Send + Sync,
    F: FnMut(&LoadDiagnostic),
{
    let lines = lines.into_iter().map(Ok::<S, Infallible>);
    match load_iter(lines, config, on_diagnostic) {
        Ok(result) => result,
        Err(never) => match never {},
    }
}

/// Load records by reading `reader` line by line, exactly once.
///
/// `source` is only used to label errors. Any read failure, including
/// invalid UTF-8, aborts with [`LoadError::SourceReadFailure`].
pub fn load_reader<R, F>(
    reader: R,
    source: &Path,
    config: &LoadConfig,
    on_diagnostic: F,
) -> Result<LoadResult, LoadError>
where
    R: BufRead,
    F: FnMut(&LoadDiagnostic),
{
    let lines = reader.lines().map(|line| {
        line.map_err(|e| LoadError::SourceReadFailure {
            path: source.to_path_buf(),
            source: e,
        })
    });
    let result = load_iter(lines, config, on_diagnostic)?;

    tracing::debug!(
        source = %source.display(),
        records = result.records.len(),
        skipped = result.skipped,
        lines = result.lines_read,
        truncated = result.truncated,
        "Load complete"
    );
    Ok(result)
}

/// Shared driver for both in-memory and reader-backed input.
fn load_iter<I, S, E, F>(lines: I, config: &LoadConfig, mut on_diagnostic: F) -> Result<LoadResult, E>
where
    I: Iterator<Item = Result<S, E>>,
    S: AsRef<str> + Send + Sync,
    F: FnMut(&LoadDiagnostic),
{
    let limit = config.max_lines.unwrap_or(usize::MAX);
    let mut result = LoadResult::default();

    if config.parallel {
        // Read the whole window first; the source is still consumed in order.
        let mut buffered: Vec<S> = Vec::new();
        for (index, line) in lines.enumerate() {
            if index >= limit {
                result.truncated = true;
                break;
            }
            buffered.push(line?);
        }

        // Indexed collect keeps input order.
        let outcomes: Vec<Option<Result<LogRecord, ParseError>>> = buffered
            .par_iter()
            .map(|line| classify(line.as_ref()))
            .collect();

        for (index, (line, outcome)) in buffered.iter().zip(outcomes).enumerate() {
            result.absorb(index, line.as_ref(), outcome, &mut on_diagnostic);
        }
    } else {
        for (index, line) in lines.enumerate() {
            if index >= limit {
                result.truncated = true;
                break;
            }
            let line = line?;
            let line = line.as_ref();
            result.absorb(index, line, classify(line), &mut on_diagnostic);
        }
    }

    if result.truncated {
        on_diagnostic(&LoadDiagnostic::Truncated { limit });
    }
    if result.skipped > 0 {
        on_diagnostic(&LoadDiagnostic::Summary {
            skipped: result.skipped,
        });
    }

    Ok(result)
}

/// `None` for blank lines, which are neither parsed nor counted.
fn classify(line: &str) -> Option<Result<LogRecord, ParseError>> {
    if line.trim().is_empty() {
        None
    } else {
        Some(parser::parse_line(line))
    }
}

impl LoadResult {
    fn absorb<F>(
        &mut self,
        index: usize,
        line: &str,
        outcome: Option<Result<LogRecord, ParseError>>,
        on_diagnostic: &mut F,
    ) where
        F: FnMut(&LoadDiagnostic),
    {
        self.lines_read += 1;
        match outcome {
            None => {}
            Some(Ok(record)) => self.records.push(record),
            Some(Err(ParseError::MalformedLine { reason })) => {
                self.skipped += 1;
                tracing::debug!(
                    line = index,
                    reason,
                    preview = %preview(line),
                    "Skipping malformed line"
                );
                on_diagnostic(&LoadDiagnostic::SkippedLine { index, reason });
            }
        }
    }
}

/// First `DEBUG_MAX_LINE_PREVIEW` characters of `line`.
fn preview(line: &str) -> String {
    line.chars().take(constants::DEBUG_MAX_LINE_PREVIEW).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    const SAMPLE: &[&str] = &[
        "2024-01-01 10:00:00 INFO service started",
        "2024-01-01 10:00:05 ERROR connection refused",
        "garbage line with no structure",
        "2024-01-01 10:00:10 WARNING retrying",
    ];

    fn collect(lines: &[&str], config: &LoadConfig) -> (LoadResult, Vec<LoadDiagnostic>) {
        let mut diagnostics = Vec::new();
        let result = load_lines(lines.iter().copied(), config, |d| diagnostics.push(d.clone()));
        (result, diagnostics)
    }

    #[test]
    fn test_malformed_line_skipped_and_reported() {
        let (result, diagnostics) = collect(SAMPLE, &LoadConfig::default());
        assert_eq!(result.records.len(), 3);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.lines_read, 4);
        assert!(!result.truncated);
        assert_eq!(
            diagnostics,
            vec![
                LoadDiagnostic::SkippedLine {
                    index: 2,
                    reason: "missing or invalid date"
                },
                LoadDiagnostic::Summary { skipped: 1 },
            ]
        );
        let levels: Vec<_> = result.records.iter().map(|r| r.level()).collect();
        assert_eq!(levels, vec!["INFO", "ERROR", "WARNING"]);
    }

    #[test]
    fn test_blank_lines_not_counted() {
        let lines = [
            "",
            "   ",
            "\t",
            "2024-01-01 10:00:00 DEBUG x",
            "",
        ];
        let (result, diagnostics) = collect(&lines, &LoadConfig::default());
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.lines_read, 5);
        assert!(diagnostics.is_empty(), "no diagnostics expected: {diagnostics:?}");
    }

    #[test]
    fn test_each_bad_line_counts_once_and_order_kept() {
        let lines = [
            "2024-01-01 10:00:00 INFO a",
            "bad one",
            "2024-01-01 10:00:01 INFO b",
            "2024-01-01 oops INFO c",
            "2024-01-01 10:00:02 INFO d",
        ];
        let (result, _) = collect(&lines, &LoadConfig::default());
        assert_eq!(result.skipped, 2);
        let messages: Vec<_> = result.records.iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_duplicates_kept() {
        let lines = ["2024-01-01 10:00:00 INFO same", "2024-01-01 10:00:00 INFO same"];
        let (result, _) = collect(&lines, &LoadConfig::default());
        assert_eq!(result.records.len(), 2);
    }

    #[test]
    fn test_max_lines_truncates() {
        let config = LoadConfig {
            max_lines: Some(2),
            ..Default::default()
        };
        let (result, diagnostics) = collect(SAMPLE, &config);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.lines_read, 2);
        assert!(result.truncated);
        assert_eq!(diagnostics, vec![LoadDiagnostic::Truncated { limit: 2 }]);
    }

    #[test]
    fn test_max_lines_equal_to_input_is_not_truncation() {
        let config = LoadConfig {
            max_lines: Some(SAMPLE.len()),
            ..Default::default()
        };
        let (result, _) = collect(SAMPLE, &config);
        assert!(!result.truncated);
        assert_eq!(result.lines_read, SAMPLE.len());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut lines: Vec<String> = Vec::new();
        for i in 0..500 {
            lines.push(match i % 4 {
                0 => format!("2024-02-03 01:02:{:02} INFO message {i}", i % 60),
                1 => format!("not a record {i}"),
                2 => String::new(),
                _ => format!("2024-02-03 01:02:{:02} error failure {i}", i % 60),
            });
        }

        let mut seq_diags = Vec::new();
        let sequential = load_lines(&lines, &LoadConfig::default(), |d| {
            seq_diags.push(d.clone())
        });
        let mut par_diags = Vec::new();
        let parallel = load_lines(
            &lines,
            &LoadConfig {
                parallel: true,
                ..Default::default()
            },
            |d| par_diags.push(d.clone()),
        );

        assert_eq!(sequential, parallel);
        assert_eq!(seq_diags, par_diags);
        assert_eq!(sequential.skipped, 125);
        assert_eq!(sequential.records.len(), 250);
    }

    #[test]
    fn test_reader_strips_line_endings() {
        let input = "2024-01-01 10:00:00 INFO one\r\n\r\n2024-01-01 10:00:01 ERROR two\n";
        let result = load_reader(
            Cursor::new(input),
            Path::new("mem.log"),
            &LoadConfig::default(),
            |_| {},
        )
        .unwrap();
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].message(), "one");
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_reader_invalid_utf8_is_fatal() {
        let mut bytes = b"2024-01-01 10:00:00 INFO ok\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        let result = load_reader(
            Cursor::new(bytes),
            Path::new("bin.log"),
            &LoadConfig::default(),
            |_| {},
        );
        assert!(
            matches!(result, Err(LoadError::SourceReadFailure { .. })),
            "expected SourceReadFailure, got {result:?}"
        );
    }

    /// Reader that fails after its first chunk.
    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::Other, "device unplugged"));
            }
            self.served = true;
            let chunk = b"2024-01-01 10:00:00 INFO first\n";
            buf[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn test_reader_io_failure_returns_no_partial_result() {
        let reader = io::BufReader::new(FailingReader { served: false });
        let err = load_reader(reader, Path::new("dev.log"), &LoadConfig::default(), |_| {})
            .unwrap_err();
        match err {
            LoadError::SourceReadFailure { path, source } => {
                assert_eq!(path, Path::new("dev.log"));
                assert_eq!(source.to_string(), "device unplugged");
            }
            other => panic!("expected SourceReadFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_diagnostic_display() {
        let skipped = LoadDiagnostic::SkippedLine {
            index: 7,
            reason: "empty line",
        };
        assert_eq!(skipped.to_string(), "Warning: skip invalid line 7 (empty line)");
        assert_eq!(
            LoadDiagnostic::Summary { skipped: 3 }.to_string(),
            "Note: skipped 3 invalid line(s)."
        );
    }
}
