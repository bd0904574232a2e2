// LogTally - ui/report.rs
//
// Plain-text rendering of analysis results: source header, per-level count
// table, and per-record detail listing. Writes to any io::Write so output
// can be captured in tests.

use crate::core::model::{LevelCounts, LogRecord};
use crate::ui::theme;
use crate::util::constants;
use std::io::{self, Write};
use std::path::Path;

/// Print the analysed source path.
pub fn write_source_header<W: Write>(out: &mut W, path: &Path, color: bool) -> io::Result<()> {
    let text = path.display().to_string();
    writeln!(out, "{}", theme::paint(&text, Some(theme::source_style()), color))
}

/// Print the count table, one row per recognized level in display order.
///
/// ```text
/// ---------|-------
///  LEVEL   | COUNT
/// ---------|-------
///  INFO    | 1
///  ...
/// ---------|-------
/// ```
pub fn write_counts_table<W: Write>(out: &mut W, counts: &LevelCounts, color: bool) -> io::Result<()> {
    let level_width = counts
        .iter()
        .map(|(level, _)| level.len())
        .chain([constants::LEVEL_COLUMN_HEADER.len()])
        .max()
        .unwrap_or_default();
    let count_width = counts
        .iter()
        .map(|(_, count)| count.to_string().len())
        .chain([constants::COUNT_COLUMN_HEADER.len()])
        .max()
        .unwrap_or_default();

    let separator = format!("-{}-|-{}-", "-".repeat(level_width), "-".repeat(count_width));

    writeln!(out, "{separator}")?;
    writeln!(
        out,
        " {} | {} ",
        theme::paint(
            &format!("{:<level_width$}", constants::LEVEL_COLUMN_HEADER),
            Some(theme::header_style()),
            color
        ),
        theme::paint(
            &format!("{:<count_width$}", constants::COUNT_COLUMN_HEADER),
            Some(theme::header_style()),
            color
        ),
    )?;
    writeln!(out, "{separator}")?;
    for (level, count) in counts.iter() {
        writeln!(
            out,
            " {} | {:<count_width$} ",
            theme::paint(&format!("{level:<level_width$}"), theme::level_style(level), color),
            count,
        )?;
    }
    writeln!(out, "{separator}")
}

/// Print the records selected for `level`, framed by a heading.
pub fn write_level_detail<W: Write>(
    out: &mut W,
    level: &str,
    records: &[&LogRecord],
    color: bool,
) -> io::Result<()> {
    let rule = "-".repeat(constants::DETAIL_RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "Logs for level: {} (total {})",
        theme::paint(level, theme::level_style(level), color),
        records.len()
    )?;
    writeln!(out, "{rule}")?;
    for record in records {
        writeln!(out, "{}", format_record(record, color))?;
    }
    Ok(())
}

/// One detail line: `date time LEVEL message`.
pub fn format_record(record: &LogRecord, color: bool) -> String {
    let level = theme::paint(record.level(), theme::level_style(record.level()), color);
    if record.message().is_empty() {
        format!("{} {} {level}", record.date(), record.time())
    } else {
        format!("{} {} {level} {}", record.date(), record.time(), record.message())
    }
}

/// User-facing error line.
pub fn format_error(message: &str, color: bool) -> String {
    theme::paint(&format!("Error: {message}"), Some(theme::error_style()), color)
}
