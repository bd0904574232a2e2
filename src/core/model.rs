// LogTally - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::util::constants;

// =============================================================================
// Log Record (normalised output of parsing)
// =============================================================================

/// A single parsed log entry.
///
/// Only the parser constructs records, so a record that exists always has
/// a `YYYY-MM-DD` date, an `HH:MM:SS` time and a non-empty, uppercase,
/// letters-only level. Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    date: String,
    time: String,
    level: String,
    message: String,
}

impl LogRecord {
    pub(crate) fn new(date: &str, time: &str, level: &str, message: &str) -> Self {
        Self {
            date: date.to_string(),
            time: time.to_string(),
            level: level.to_ascii_uppercase(),
            message: message.to_string(),
        }
    }

    /// Calendar date as text (`YYYY-MM-DD`, not checked for validity).
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Time of day as text (`HH:MM:SS`, not range checked).
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Uppercase severity tag. May be outside the recognized set.
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Free text after the level token. May be empty.
    pub fn message(&self) -> &str {
        &self.message
    }
}

// =============================================================================
// Recognized levels
// =============================================================================

/// The closed, ordered set of severity names that are counted and can be
/// filtered on.
///
/// Passed explicitly to the aggregator and the filter. The order is the
/// display order of [`LevelCounts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedLevels {
    names: Vec<String>,
}

impl RecognizedLevels {
    /// Build a level set from arbitrary names.
    ///
    /// Names are trimmed and uppercased. Empty or non-alphabetic names and
    /// repeats are dropped, first occurrence wins. Returns `None` when no
    /// valid name remains.
    pub fn new<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalised: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
                continue;
            }
            let upper = name.to_ascii_uppercase();
            if !normalised.contains(&upper) {
                normalised.push(upper);
            }
        }
        if normalised.is_empty() {
            None
        } else {
            Some(Self { names: normalised })
        }
    }

    /// Level names in display order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `level` (already uppercase) is one of the recognized names.
    pub fn contains(&self, level: &str) -> bool {
        self.names.iter().any(|n| n == level)
    }

    /// Position of `level` in display order.
    pub fn position(&self, level: &str) -> Option<usize> {
        self.names.iter().position(|n| n == level)
    }
}

impl Default for RecognizedLevels {
    fn default() -> Self {
        Self {
            names: constants::DEFAULT_RECOGNIZED_LEVELS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

// =============================================================================
// Level counts
// =============================================================================

/// Per-level record counts.
///
/// Always holds one entry per recognized level (zero-filled), iterated in
/// the recognized order. Serialises as an ordered JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCounts {
    entries: Vec<(String, usize)>,
}

impl LevelCounts {
    /// All recognized levels at zero.
    pub fn zeroed(levels: &RecognizedLevels) -> Self {
        Self {
            entries: levels.names().iter().map(|n| (n.clone(), 0)).collect(),
        }
    }

    /// Increment the counter for `level`. Returns false, changing nothing,
    /// when `level` is not tracked.
    pub(crate) fn increment(&mut self, level: &str) -> bool {
        match self.entries.iter_mut().find(|(name, _)| name == level) {
            Some((_, count)) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    /// Count for `level`, or `None` if the level is not tracked.
    pub fn get(&self, level: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| name == level)
            .map(|(_, count)| *count)
    }

    /// `(level, count)` pairs in recognized order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Sum over all tracked levels.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for LevelCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, count) in &self.entries {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels_order() {
        let levels = RecognizedLevels::default();
        assert_eq!(levels.names(), &["INFO", "ERROR", "DEBUG", "WARNING"]);
        assert_eq!(levels.position("DEBUG"), Some(2));
        assert!(!levels.contains("TRACE"));
    }

    #[test]
    fn test_new_levels_normalised_and_deduplicated() {
        let levels = RecognizedLevels::new([" trace ", "Fatal", "TRACE", "", "e2e"]).unwrap();
        assert_eq!(levels.names(), &["TRACE", "FATAL"]);
    }

    #[test]
    fn test_new_levels_empty_is_none() {
        assert!(RecognizedLevels::new(Vec::<String>::new()).is_none());
        assert!(RecognizedLevels::new(["123", " "]).is_none());
    }

    #[test]
    fn test_counts_zero_filled_in_order() {
        let counts = LevelCounts::zeroed(&RecognizedLevels::default());
        let pairs: Vec<_> = counts.iter().collect();
        assert_eq!(
            pairs,
            vec![("INFO", 0), ("ERROR", 0), ("DEBUG", 0), ("WARNING", 0)]
        );
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_counts_increment_untracked_is_noop() {
        let mut counts = LevelCounts::zeroed(&RecognizedLevels::default());
        assert!(counts.increment("ERROR"));
        assert!(!counts.increment("TRACE"));
        assert_eq!(counts.get("ERROR"), Some(1));
        assert_eq!(counts.get("TRACE"), None);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn test_counts_serialise_in_display_order() {
        let mut counts = LevelCounts::zeroed(&RecognizedLevels::default());
        counts.increment("WARNING");
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"INFO":0,"ERROR":0,"DEBUG":0,"WARNING":1}"#);
    }

    #[test]
    fn test_record_level_uppercased() {
        let record = LogRecord::new("2024-01-01", "10:00:00", "warning", "disk low");
        assert_eq!(record.level(), "WARNING");
        assert_eq!(record.message(), "disk low");
    }
}
