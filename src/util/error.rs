// LogTally - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation. All errors preserve the causal chain
// for diagnostic logging.
//
// Two tiers of failure during loading:
//   - ParseError: one line is bad. Recoverable, absorbed by the loader.
//   - LoadError: the source itself is unusable. Fatal to the current load.

use std::fmt;
use std::io;
use std::path::PathBuf;

use super::constants;

/// Top-level error type for all LogTally operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogTallyError {
    /// The log source could not be validated, opened or read.
    Load(LoadError),

    /// A level filter request was rejected.
    Filter(FilterError),

    /// Configuration loading failed.
    Config(ConfigError),

    /// Export operation failed.
    Export(ExportError),

    /// Writing a report failed.
    Io {
        operation: &'static str,
        source: io::Error,
    },
}

impl LogTallyError {
    /// Process exit code the CLI uses for this error.
    ///
    /// A bad filter argument is distinguishable from an unreadable source.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Filter(_) => constants::EXIT_UNKNOWN_LEVEL,
            Self::Load(_) | Self::Config(_) | Self::Export(_) | Self::Io { .. } => {
                constants::EXIT_FAILURE
            }
        }
    }
}

impl fmt::Display for LogTallyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "{e}"),
            Self::Filter(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io { operation, source } => write!(f, "I/O error during {operation}: {source}"),
        }
    }
}

impl std::error::Error for LogTallyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// A single line does not match the record grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line is not `DATE TIME LEVEL [MESSAGE]`.
    MalformedLine { reason: &'static str },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine { reason } => write!(f, "Malformed log line: {reason}"),
        }
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// The log source cannot be used at all. Loading aborts without a partial
/// result.
#[derive(Debug)]
pub enum LoadError {
    /// The path does not exist.
    SourceNotFound { path: PathBuf, source: io::Error },

    /// The path exists but is not a regular file.
    NotAFile { path: PathBuf },

    /// The process may not read the path.
    PermissionDenied { path: PathBuf, source: io::Error },

    /// Any other I/O failure while opening or reading, including invalid
    /// UTF-8 content.
    SourceReadFailure { path: PathBuf, source: io::Error },
}

impl LoadError {
    /// Map an `io::Error` raised while opening or reading `path` to the
    /// matching variant.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::SourceNotFound { path, source },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::SourceReadFailure { path, source },
        }
    }

    /// Path of the source that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::SourceNotFound { path, .. }
            | Self::NotAFile { path }
            | Self::PermissionDenied { path, .. }
            | Self::SourceReadFailure { path, .. } => path,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotFound { path, .. } => {
                write!(f, "File '{}' does not exist", path.display())
            }
            Self::NotAFile { path } => write!(f, "'{}' is not a file", path.display()),
            Self::PermissionDenied { path, .. } => {
                write!(f, "No permission to read '{}'", path.display())
            }
            Self::SourceReadFailure { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceNotFound { source, .. } => Some(source),
            Self::PermissionDenied { source, .. } => Some(source),
            Self::SourceReadFailure { source, .. } => Some(source),
            Self::NotAFile { .. } => None,
        }
    }
}

impl From<LoadError> for LogTallyError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to level filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The requested level is outside the recognized set.
    UnknownLevel {
        /// Level name exactly as the caller supplied it.
        requested: String,
        /// Recognized level names, in display order.
        valid: Vec<String>,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLevel { requested, valid } => write!(
                f,
                "Unknown level '{requested}'. Use one of: {}",
                valid.join(", ")
            ),
        }
    }
}

impl std::error::Error for FilterError {}

impl From<FilterError> for LogTallyError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LogTallyError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for LogTallyError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogTally results.
pub type Result<T> = std::result::Result<T, LogTallyError>;
