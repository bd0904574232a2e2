// LogTally - core/export.rs
//
// CSV and JSON export of records and level counts.
// Core layer: writes to any Write trait object.

use crate::core::model::{LevelCounts, LogRecord};
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Export records to CSV.
///
/// Writes: date, time, level, message. Returns the number of records written.
pub fn export_csv<'a, W, I>(records: I, writer: W, export_path: &Path) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a LogRecord>,
{
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["date", "time", "level", "message"])
        .map_err(csv_err)?;

    let mut count = 0;
    for record in records {
        csv_writer
            .write_record([
                record.date(),
                record.time(),
                record.level(),
                record.message(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Shape of the JSON export document.
#[derive(Serialize)]
struct JsonReport<'a> {
    counts: &'a LevelCounts,
    skipped: usize,
    records: Vec<&'a LogRecord>,
}

/// Export counts, skip total and records as one pretty-printed JSON object.
///
/// `counts` keeps its display order in the output.
pub fn export_json<'a, W, I>(
    records: I,
    counts: &LevelCounts,
    skipped: usize,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a LogRecord>,
{
    let report = JsonReport {
        counts,
        skipped,
        records: records.into_iter().collect(),
    };
    let count = report.records.len();
    serde_json::to_writer_pretty(&mut writer, &report).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(count)
}
