use super::{process::Process, status::RecordStatus};
use crate::utils::time::format_optional_time;
use chrono::NaiveTime;

/// Column order of both collections and of every export.
pub const RECORD_HEADER: [&str; 10] = [
    "記録ID",
    "製品名",
    "工程名",
    "詳細",
    "開始時間",
    "終了時間",
    "作業時間_分",
    "出来数",
    "作業人数",
    "ステータス",
];

/// One unit of work on a product at a process step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,                    // ⇔ record_id (sortable timestamp, "" until committed)
    pub product_name: String,          // ⇔ product_name
    pub process: Process,              // ⇔ process_name (label)
    pub detail: String,                // ⇔ detail ("30分", "8p" or "")
    pub start_time: Option<NaiveTime>, // ⇔ start_time ("HH:MM" or "")
    pub end_time: Option<NaiveTime>,   // ⇔ end_time ("HH:MM" or "")
    pub work_minutes: i64,             // ⇔ work_minutes (cutting only)
    pub quantity: i64,                 // ⇔ quantity
    pub workers: i64,                  // ⇔ workers
    pub status: RecordStatus,          // ⇔ status
}

impl Record {
    /// Uncommitted record: no id yet, in-progress status, one worker.
    pub fn candidate(product_name: impl Into<String>, process: Process) -> Self {
        Self {
            id: String::new(),
            product_name: product_name.into(),
            process,
            detail: String::new(),
            start_time: None,
            end_time: None,
            work_minutes: 0,
            quantity: 0,
            workers: 1,
            status: RecordStatus::InProgress,
        }
    }

    pub fn is_committed(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn start_str(&self) -> String {
        format_optional_time(self.start_time)
    }

    pub fn end_str(&self) -> String {
        format_optional_time(self.end_time)
    }

    /// One-line summary as shown in selection lists.
    pub fn summary(&self) -> String {
        if self.detail.is_empty() {
            format!(
                "{} / {} - {}個",
                self.product_name,
                self.process.label(),
                self.quantity
            )
        } else {
            format!(
                "{} / {} ({}) - {}個",
                self.product_name,
                self.process.label(),
                self.detail,
                self.quantity
            )
        }
    }
}
