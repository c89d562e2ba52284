// src/export/model.rs

use crate::models::Record;
use crate::models::record::RECORD_HEADER;
use serde::Serialize;

/// Flat export row; serde names carry the sheet header.
#[derive(Serialize, Clone, Debug)]
pub struct RecordExport {
    #[serde(rename = "記録ID")]
    pub record_id: String,
    #[serde(rename = "製品名")]
    pub product_name: String,
    #[serde(rename = "工程名")]
    pub process_name: String,
    #[serde(rename = "詳細")]
    pub detail: String,
    #[serde(rename = "開始時間")]
    pub start_time: String,
    #[serde(rename = "終了時間")]
    pub end_time: String,
    #[serde(rename = "作業時間_分")]
    pub work_minutes: i64,
    #[serde(rename = "出来数")]
    pub quantity: i64,
    #[serde(rename = "作業人数")]
    pub workers: i64,
    #[serde(rename = "ステータス")]
    pub status: String,
}

impl From<&Record> for RecordExport {
    fn from(r: &Record) -> Self {
        Self {
            record_id: r.id.clone(),
            product_name: r.product_name.clone(),
            process_name: r.process.label().to_string(),
            detail: r.detail.clone(),
            start_time: r.start_str(),
            end_time: r.end_str(),
            work_minutes: r.work_minutes,
            quantity: r.quantity,
            workers: r.workers,
            status: r.status.to_db_str().to_string(),
        }
    }
}

/// Column header shared by CSV, JSON and XLSX
pub(crate) fn get_headers() -> Vec<&'static str> {
    RECORD_HEADER.to_vec()
}

/// Cell kinds in column order; numbers are written as numbers in XLSX,
/// everything else (ids included) as text.
pub(crate) fn numeric_columns() -> [bool; 10] {
    [
        false, false, false, false, false, false, true, true, true, false,
    ]
}

pub(crate) fn record_to_row(e: &RecordExport) -> Vec<String> {
    vec![
        e.record_id.clone(),
        e.product_name.clone(),
        e.process_name.clone(),
        e.detail.clone(),
        e.start_time.clone(),
        e.end_time.clone(),
        e.work_minutes.to_string(),
        e.quantity.to_string(),
        e.workers.to_string(),
        e.status.clone(),
    ]
}
