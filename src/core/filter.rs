// LogTally - core/filter.rs
//
// Level filter over a record collection.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{LogRecord, RecognizedLevels};
use crate::util::error::FilterError;

/// Normalise a requested level name and check it against `levels`.
///
/// Case-insensitive; surrounding whitespace is ignored. Returns the
/// canonical uppercase name on success.
pub fn resolve_level(requested: &str, levels: &RecognizedLevels) -> Result<String, FilterError> {
    let normalised = requested.trim().to_uppercase();
    if levels.contains(&normalised) {
        Ok(normalised)
    } else {
        Err(FilterError::UnknownLevel {
            requested: requested.to_string(),
            valid: levels.names().to_vec(),
        })
    }
}

/// Select the records whose level equals `requested`.
///
/// Fails with [`FilterError::UnknownLevel`] when the level is outside the
/// recognized set, even if records with that level exist. On success the
/// result keeps the original relative order and may be empty.
pub fn filter_by_level<'a>(
    records: &'a [LogRecord],
    requested: &str,
    levels: &RecognizedLevels,
) -> Result<Vec<&'a LogRecord>, FilterError> {
    let level = resolve_level(requested, levels)?;

    let selected: Vec<&LogRecord> = records.iter().filter(|r| r.level() == level).collect();

    tracing::debug!(
        level = %level,
        selected = selected.len(),
        total = records.len(),
        "Level filter applied"
    );

    Ok(selected)
}
