// LogTally - core/aggregate.rs
//
// Per-level counting over a record collection.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{LevelCounts, LogRecord, RecognizedLevels};

/// Count records per recognized level.
///
/// Every recognized level appears in the result, zero when absent.
/// Records with an unrecognized level are not counted anywhere. Never fails;
/// an empty slice yields all zeros.
pub fn count_by_level(records: &[LogRecord], levels: &RecognizedLevels) -> LevelCounts {
    let mut counts = LevelCounts::zeroed(levels);
    let mut unrecognized = 0usize;

    for record in records {
        if !counts.increment(record.level()) {
            unrecognized += 1;
        }
    }

    if unrecognized > 0 {
        tracing::debug!(
            unrecognized,
            total = records.len(),
            "Records with unrecognized levels left out of counts"
        );
    }

    counts
}
