// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{RecordExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Lets spreadsheet applications detect UTF-8 and show the Japanese headers.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// JSON array of rows, keys are the sheet headers.
pub(crate) fn export_json(records: &[RecordExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting {} record(s) to JSON: {}", records.len(), path.display()));

    let json_data = serde_json::to_string_pretty(records)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    File::create(path)?.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// CSV with a BOM and a header row taken from the serde names.
pub(crate) fn export_csv(records: &[RecordExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting {} record(s) to CSV: {}", records.len(), path.display()));

    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut wtr = csv::Writer::from_writer(file);
    for item in records {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
