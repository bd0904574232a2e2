// LogTally - app/analysis.rs
//
// One analysis run: validate and open the source, load records, count
// levels, and optionally select a level. Holds the recognized-level set and
// load bounds so the core functions never read ambient state.

use crate::core::aggregate::count_by_level;
use crate::core::export;
use crate::core::filter;
use crate::core::loader::{self, LoadConfig, LoadDiagnostic, LoadResult};
use crate::core::model::{LevelCounts, LogRecord, RecognizedLevels};
use crate::platform::config::AppConfig;
use crate::platform::fs;
use crate::util::error::{ExportError, FilterError, LoadError};
use crate::util::timing::OutermostTimer;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Output of one analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Source the records came from.
    pub source: PathBuf,
    /// Level set the counts and selections use.
    pub levels: RecognizedLevels,
    /// Loaded records and skip totals.
    pub load: LoadResult,
    /// Per-level counts over `load.records`.
    pub counts: LevelCounts,
}

/// Records selected for one level.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    /// Canonical uppercase level name.
    pub level: String,
    /// Matching records, in load order.
    pub records: Vec<&'a LogRecord>,
}

impl Analysis {
    pub fn records(&self) -> &[LogRecord] {
        &self.load.records
    }

    /// Select the records of one recognized level.
    ///
    /// An unknown level is reported without touching the counts or records.
    pub fn select(&self, requested: &str) -> Result<Selection<'_>, FilterError> {
        let level = filter::resolve_level(requested, &self.levels)?;
        let records = filter::filter_by_level(&self.load.records, &level, &self.levels)?;
        Ok(Selection { level, records })
    }
}

/// Export file format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.csv` (any case) selects CSV; everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Runs analyses with a fixed level set and load configuration.
#[derive(Debug)]
pub struct Analyzer {
    levels: RecognizedLevels,
    load_config: LoadConfig,
    timer: OutermostTimer,
}

impl Analyzer {
    pub fn new(levels: RecognizedLevels, load_config: LoadConfig) -> Self {
        Self {
            levels,
            load_config,
            timer: OutermostTimer::new("analysis"),
        }
    }

    /// Build from validated configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.levels.clone(),
            LoadConfig {
                max_lines: config.max_lines,
                parallel: config.parallel,
            },
        )
    }

    pub fn levels(&self) -> &RecognizedLevels {
        &self.levels
    }

    /// Validate, open and analyse a log file.
    ///
    /// Per-line problems go to `on_diagnostic`; only source-level failures
    /// are returned as errors.
    pub fn analyse_file<F>(&self, path: &Path, on_diagnostic: F) -> Result<Analysis, LoadError>
    where
        F: FnMut(&LoadDiagnostic),
    {
        self.timer.run(|| -> Result<Analysis, LoadError> {
            fs::validate_source_path(path)?;
            let reader = fs::open_source(path)?;
            let load = loader::load_reader(reader, path, &self.load_config, on_diagnostic)?;
            Ok(self.finish(path.to_path_buf(), load))
        })
    }

    /// Analyse lines already in memory. `source` only labels the result.
    pub fn analyse_lines<I, S, F>(&self, source: &Path, lines: I, on_diagnostic: F) -> Analysis
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str> + Send + Sync,
        F: FnMut(&LoadDiagnostic),
    {
        self.timer.run(|| {
            let load = loader::load_lines(lines, &self.load_config, on_diagnostic);
            self.finish(source.to_path_buf(), load)
        })
    }

    /// Wall-clock time of the last completed analysis.
    pub fn last_elapsed(&self) -> Option<Duration> {
        self.timer.last_elapsed()
    }

    fn finish(&self, source: PathBuf, load: LoadResult) -> Analysis {
        let counts = count_by_level(&load.records, &self.levels);
        tracing::info!(
            source = %source.display(),
            records = load.records.len(),
            skipped = load.skipped,
            counted = counts.total(),
            "Analysis complete"
        );
        Analysis {
            source,
            levels: self.levels.clone(),
            load,
            counts,
        }
    }
}

/// Write `records` to `path`, with the analysis counts for JSON output.
///
/// Returns the number of records written.
pub fn export_to_path(
    analysis: &Analysis,
    records: &[&LogRecord],
    path: &Path,
) -> Result<usize, ExportError> {
    let file = File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let writer = BufWriter::new(file);

    let written = match ExportFormat::from_path(path) {
        ExportFormat::Csv => export::export_csv(records.iter().copied(), writer, path)?,
        ExportFormat::Json => export::export_json(
            records.iter().copied(),
            &analysis.counts,
            analysis.load.skipped,
            writer,
            path,
        )?,
    };

    tracing::info!(path = %path.display(), records = written, "Export complete");
    Ok(written)
}
