#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    InProgress, // 作業中
    Completed,  // 完了
}

impl RecordStatus {
    /// Convert enum → DB string (the labels shown on the sheets)
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RecordStatus::InProgress => "作業中",
            RecordStatus::Completed => "完了",
        }
    }

    /// Convert DB string → enum.
    /// Accepts the sheet labels as well as the ASCII names.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim() {
            "作業中" | "IN_PROGRESS" => Some(RecordStatus::InProgress),
            "完了" | "COMPLETED" => Some(RecordStatus::Completed),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RecordStatus::Completed)
    }
}
