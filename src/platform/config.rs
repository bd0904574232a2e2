// LogTally - platform/config.rs
//
// Platform-specific config directory resolution and config.toml loading
// with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::RecognizedLevels;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogTally configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logtally/ or %APPDATA%\LogTally\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[levels]` section.
    pub levels: LevelsSection,
    /// `[loading]` section.
    pub loading: LoadingSection,
    /// `[output]` section.
    pub output: OutputSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[levels]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LevelsSection {
    /// Recognized severity names, in display order.
    pub recognized: Option<Vec<String>>,
}

/// `[loading]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoadingSection {
    /// Maximum input lines read per load.
    pub max_lines: Option<usize>,
    /// Parse lines on the rayon pool.
    pub parallel: Option<bool>,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Coloured terminal output.
    pub color: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Levels counted and accepted by the filter.
    pub levels: RecognizedLevels,
    /// Line cap per load (`None` = unbounded).
    pub max_lines: Option<usize>,
    /// Parallel parsing.
    pub parallel: bool,
    /// Coloured output.
    pub color: bool,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            levels: RecognizedLevels::default(),
            max_lines: None,
            parallel: false,
            color: true,
            log_level: None,
        }
    }
}

/// Load config.toml from the platform location.
///
/// A missing file yields defaults with no warnings (first run). An unreadable
/// or unparseable file yields defaults plus a warning; startup continues.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    match load_explicit_config(config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

/// Load a config file the user named explicitly (`--config`).
///
/// Unlike [`load_config`], a missing or unparseable file is an error.
pub fn load_explicit_config(config_path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
        path: config_path.to_path_buf(),
        source: e,
    })?;
    let loaded = parse_config(&content, config_path)?;
    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    Ok(loaded)
}

/// Parse and validate config.toml content.
///
/// Returns the validated config and all non-fatal warnings.
pub fn parse_config(content: &str, path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(validate(raw))
}

/// Validate each field against named constants, accumulating all warnings.
/// Parse a `--max-lines` style value, enforcing the same bounds as
/// `[loading] max_lines`.
pub fn parse_max_lines(value: &str) -> Result<usize, String> {
    let lines: usize = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a line count"))?;
    if (constants::MIN_MAX_LINES..=constants::ABSOLUTE_MAX_LINES).contains(&lines) {
        Ok(lines)
    } else {
        Err(format!(
            "{lines} is out of range ({}-{})",
            constants::MIN_MAX_LINES,
            constants::ABSOLUTE_MAX_LINES,
        ))
    }
}

fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Levels: recognized --
    if let Some(names) = raw.levels.recognized {
        if names.len() > constants::MAX_RECOGNIZED_LEVELS {
            warnings.push(format!(
                "[levels] recognized has {} names, maximum is {}. Using default ({}).",
                names.len(),
                constants::MAX_RECOGNIZED_LEVELS,
                constants::DEFAULT_RECOGNIZED_LEVELS.join(", "),
            ));
        } else {
            let invalid: Vec<&String> = names
                .iter()
                .filter(|n| n.trim().is_empty() || !n.trim().chars().all(|c| c.is_ascii_alphabetic()))
                .collect();
            if !invalid.is_empty() {
                warnings.push(format!(
                    "[levels] recognized contains non-alphabetic names {invalid:?}; they are ignored.",
                ));
            }
            match RecognizedLevels::new(&names) {
                Some(levels) => config.levels = levels,
                None => warnings.push(format!(
                    "[levels] recognized has no valid level names. Using default ({}).",
                    constants::DEFAULT_RECOGNIZED_LEVELS.join(", "),
                )),
            }
        }
    }

    // -- Loading: max_lines --
    if let Some(lines) = raw.loading.max_lines {
        if (constants::MIN_MAX_LINES..=constants::ABSOLUTE_MAX_LINES).contains(&lines) {
            config.max_lines = Some(lines);
        } else {
            warnings.push(format!(
                "[loading] max_lines = {lines} is out of range ({}-{}). Using default (unbounded).",
                constants::MIN_MAX_LINES,
                constants::ABSOLUTE_MAX_LINES,
            ));
        }
    }

    // -- Loading: parallel --
    if let Some(parallel) = raw.loading.parallel {
        config.parallel = parallel;
    }

    // -- Output: color --
    if let Some(color) = raw.output.color {
        config.color = color;
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: {}. Using default ({}).",
                constants::VALID_LOG_LEVELS.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}
