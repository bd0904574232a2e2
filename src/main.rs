// LogTally - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. One analysis run with per-line diagnostics on stderr
// 4. Report rendering, optional export, and exit-code selection

use logtally::app::analysis::{export_to_path, Analyzer};
use logtally::platform::config::{self, AppConfig, PlatformPaths};
use logtally::ui::report;
use logtally::util::{self, constants, error::LogTallyError};

use clap::Parser;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

/// LogTally - count and filter log records by severity level.
///
/// Reads a log file of `YYYY-MM-DD HH:MM:SS LEVEL message` lines, prints a
/// per-level count table, and optionally lists the records of one level.
#[derive(Parser, Debug)]
#[command(name = "logtally", version, about)]
struct Cli {
    /// Log file to analyse.
    path: PathBuf,

    /// Level to list in detail (case-insensitive).
    level: Option<String>,

    /// Configuration file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Stop reading after this many lines.
    #[arg(short = 'n', long = "max-lines", value_parser = config::parse_max_lines)]
    max_lines: Option<usize>,

    /// Parse lines in parallel.
    #[arg(long = "parallel")]
    parallel: bool,

    /// Write records to this file (.csv for CSV, JSON otherwise). With a
    /// level argument only that level's records are written.
    #[arg(short = 'e', long = "export")]
    export: Option<PathBuf>,

    /// Disable coloured output.
    #[arg(long = "no-color")]
    no_color: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let color = !cli.no_color
        && std::env::var_os(constants::NO_COLOR_ENV).is_none()
        && std::io::stdout().is_terminal();

    let (mut config, config_warnings) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => exit_with(&e, color),
    };

    util::logging::init(cli.debug, config.log_level.as_deref());
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    // CLI flags override config values.
    if cli.max_lines.is_some() {
        config.max_lines = cli.max_lines;
    }
    config.parallel |= cli.parallel;
    let color = color && config.color;

    tracing::debug!(
        version = constants::APP_VERSION,
        path = %cli.path.display(),
        level = ?cli.level,
        "LogTally starting"
    );

    if let Err(e) = run(&cli, &config, color) {
        exit_with(&e, color);
    }
}

/// Load the explicit `--config` file strictly, or the platform default
/// leniently.
fn load_config(cli: &Cli) -> Result<(AppConfig, Vec<String>), LogTallyError> {
    match cli.config {
        Some(ref path) => Ok(config::load_explicit_config(path)?),
        None => Ok(config::load_config(&PlatformPaths::resolve().config_file())),
    }
}

/// One analysis run: counts first, then the optional level listing, so an
/// unknown level never hides the counts.
fn run(cli: &Cli, config: &AppConfig, color: bool) -> Result<(), LogTallyError> {
    let analyzer = Analyzer::from_config(config);

    let analysis = analyzer.analyse_file(&cli.path, |diagnostic| {
        eprintln!("{diagnostic}");
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let write_err = |e: std::io::Error| LogTallyError::Io {
        operation: "writing report",
        source: e,
    };

    report::write_source_header(&mut out, &analysis.source, color).map_err(write_err)?;
    report::write_counts_table(&mut out, &analysis.counts, color).map_err(write_err)?;

    let selection = match cli.level {
        Some(ref level) => {
            let selection = analysis.select(level)?;
            report::write_level_detail(&mut out, &selection.level, &selection.records, color)
                .map_err(write_err)?;
            Some(selection)
        }
        None => None,
    };
    out.flush().map_err(write_err)?;

    if let Some(ref export_path) = cli.export {
        let records: Vec<_> = match selection {
            Some(ref selection) => selection.records.clone(),
            None => analysis.records().iter().collect(),
        };
        export_to_path(&analysis, &records, export_path)?;
    }

    if let Some(elapsed) = analyzer.last_elapsed() {
        tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "Run finished");
    }

    Ok(())
}

/// Report a failure as one uniform user-facing line and exit with the code
/// mapped from its kind.
fn exit_with(error: &LogTallyError, color: bool) -> ! {
    tracing::debug!(error = ?error, "Run failed");
    eprintln!("{}", report::format_error(&error.to_string(), color));
    std::process::exit(error.exit_code());
}
