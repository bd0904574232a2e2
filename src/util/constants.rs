// LogTally - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogTally";

/// Application identifier used for config directories.
pub const APP_ID: &str = "LogTally";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Severity levels
// =============================================================================

/// Default recognized severity names, in display order.
///
/// Display order is this order, not alphabetical and not first-seen.
pub const DEFAULT_RECOGNIZED_LEVELS: &[&str] = &["INFO", "ERROR", "DEBUG", "WARNING"];

/// Maximum number of recognized levels accepted from config.toml.
pub const MAX_RECOGNIZED_LEVELS: usize = 32;

// =============================================================================
// Loading limits
// =============================================================================

// Loading is unbounded unless `[loading] max_lines` or `--max-lines` is set.

/// Minimum user-configurable line cap.
pub const MIN_MAX_LINES: usize = 1;

/// Hard upper bound on the user-configurable line cap.
pub const ABSOLUTE_MAX_LINES: usize = 100_000_000;

/// Maximum length of a raw line included in debug output.
/// Prevents accidental exposure of sensitive data in long lines.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Rendering
// =============================================================================

/// Width of the horizontal rule around the per-level detail listing.
pub const DETAIL_RULE_WIDTH: usize = 80;

/// Column header for the level column of the count table.
pub const LEVEL_COLUMN_HEADER: &str = "LEVEL";

/// Column header for the count column of the count table.
pub const COUNT_COLUMN_HEADER: &str = "COUNT";

// =============================================================================
// Exit codes
// =============================================================================

/// Source could not be validated, opened or read; config or export failure.
pub const EXIT_FAILURE: i32 = 1;

/// Requested filter level is not one of the recognized levels.
pub const EXIT_UNKNOWN_LEVEL: i32 = 2;

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Kept at `warn` so stderr only carries the user-facing
/// diagnostics unless `--debug` or `RUST_LOG` asks for more.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in the `[logging]` config section.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable that disables coloured output when set.
pub const NO_COLOR_ENV: &str = "NO_COLOR";
