// src/export/logic.rs

use crate::core::id::id_date;
use crate::core::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::RecordExport;
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::models::Record;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;

/// Which collection an export reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportSource {
    Completed,
    InProgress,
}

impl ExportSource {
    /// Worksheet name used for XLSX exports.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            ExportSource::Completed => "完了記録",
            ExportSource::InProgress => "作業中",
        }
    }
}

/// Entry point for record exports.
pub struct ExportLogic;

impl ExportLogic {
    /// Export of one record collection.
    ///
    /// - `file`: absolute output path
    /// - `range`: `None`, `"all"` or a period filtered on the creation date
    ///   embedded in each record id:
    ///   - `YYYY`
    ///   - `YYYY-MM`
    ///   - `YYYY-MM-DD`
    ///   - `YYYY:YYYY`
    ///   - `YYYY-MM:YYYY-MM`
    ///   - `YYYY-MM-DD:YYYY-MM-DD`
    ///
    /// Returns the number of records written.
    pub fn export<S: RecordStore>(
        store: &S,
        source: ExportSource,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let date_bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let records = match source {
            ExportSource::Completed => store.list_completed()?,
            ExportSource::InProgress => store.list_in_progress()?,
        };
        let rows = filter_by_bounds(&records, date_bounds);

        if rows.is_empty() {
            warning("No records found for selected range. Nothing to export.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path, source.sheet_name())?,
        }

        Ok(rows.len())
    }
}

/// Records whose id date falls inside `bounds`; ids without a date are kept
/// only when no bounds are given.
fn filter_by_bounds(
    records: &[Record],
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> Vec<RecordExport> {
    records
        .iter()
        .filter(|r| match bounds {
            None => true,
            Some((start, end)) => id_date(&r.id).is_some_and(|d| d >= start && d <= end),
        })
        .map(RecordExport::from)
        .collect()
}
