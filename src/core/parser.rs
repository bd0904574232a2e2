// LogTally - core/parser.rs
//
// Single-line parsing into structured records.
// Core layer: pure function over &str, never touches I/O.
//
// Grammar (trailing newline stripped first):
//   <ws>* DATE <ws>+ TIME <ws>+ LEVEL <ws>* MESSAGE?
//
//   DATE    \d{4}-\d{2}-\d{2}    (no calendar check)
//   TIME    \d{2}:\d{2}:\d{2}    (no range check)
//   LEVEL   [A-Za-z]+            (uppercased, any alphabetic token)
//   MESSAGE rest of the line, surrounding whitespace trimmed

use crate::core::model::LogRecord;
use crate::util::error::ParseError;
use regex::Regex;
use std::sync::OnceLock;

/// Full-line record pattern.
fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^\s*(?P<date>\d{4}-\d{2}-\d{2})\s+(?P<time>\d{2}:\d{2}:\d{2})\s+(?P<level>[A-Za-z]+)\s*(?P<message>.*?)\s*$",
        )
        .expect("line_pattern: invalid regex")
    })
}

/// Parse one raw log line into a [`LogRecord`].
///
/// Returns [`ParseError::MalformedLine`] when the line does not match the
/// record grammar, including empty and whitespace-only lines. Levels outside
/// the recognized set are accepted here; counting and filtering decide what
/// to do with them.
pub fn parse_line(line: &str) -> Result<LogRecord, ParseError> {
    let line = line.trim_end_matches(['\n', '\r']);

    let Some(caps) = line_pattern().captures(line) else {
        return Err(ParseError::MalformedLine {
            reason: diagnose(line),
        });
    };

    // All four groups participate in every match; `message` may be empty.
    let field = |name: &str| caps.name(name).map_or("", |m| m.as_str());

    Ok(LogRecord::new(
        field("date"),
        field("time"),
        field("level"),
        field("message"),
    ))
}

/// Explain why `line` failed the full pattern, field by field.
fn diagnose(line: &str) -> &'static str {
    static PREFIXES: OnceLock<[Regex; 3]> = OnceLock::new();
    let [date, time, level] = PREFIXES.get_or_init(|| {
        fn re(pat: &str) -> Regex {
            Regex::new(pat).expect("diagnose: invalid regex")
        }
        [
            re(r"^\s*\d{4}-\d{2}-\d{2}(\s|$)"),
            re(r"^\s*\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}(\s|$)"),
            re(r"^\s*\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}\s+[A-Za-z]"),
        ]
    });

    if line.trim().is_empty() {
        "empty line"
    } else if !date.is_match(line) {
        "missing or invalid date"
    } else if !time.is_match(line) {
        "missing or invalid time"
    } else if !level.is_match(line) {
        "missing or non-alphabetic level"
    } else {
        "does not match record pattern"
    }
}
