//! Bookbinding processes and the input fields each of them collects.

/// Page counts offered for folding.
pub const PAGE_COUNT_OPTIONS: [&str; 5] = ["4p", "6p", "8p", "16p", "その他"];

/// Work-minute picker used by cutting: 10, 20, ... 720.
pub const WORK_MINUTES_STEP: i64 = 10;
pub const WORK_MINUTES_MAX: i64 = 12 * 60;

pub fn work_minute_options() -> impl Iterator<Item = i64> {
    (1..=WORK_MINUTES_MAX / WORK_MINUTES_STEP).map(|i| i * WORK_MINUTES_STEP)
}

pub fn is_work_minute_option(m: i64) -> bool {
    (WORK_MINUTES_STEP..=WORK_MINUTES_MAX).contains(&m) && m % WORK_MINUTES_STEP == 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Process {
    Cutting,           // 断裁
    Folding,           // 折
    SaddleStitching,   // 中綴じ
    PerfectBinding,    // 無線綴じ
    PerforateScore,    // ミシン・スジ
    CalendarBinding,   // 綴じ（カレンダー）
    CalendarCollating, // 丁合（カレンダー）
    Packing,           // 梱包
    Sorting,           // 区分け
}

/// How the `detail` column of a record is filled for a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailInput {
    /// Fixed-duration picker; detail becomes "{minutes}分".
    WorkMinutes,
    /// Page-count picker; detail is the chosen label.
    PageCount,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSet {
    pub detail: DetailInput,
    pub times: bool,
}

const CUTTING_FIELDS: FieldSet = FieldSet {
    detail: DetailInput::WorkMinutes,
    times: false,
};

const FOLDING_FIELDS: FieldSet = FieldSet {
    detail: DetailInput::PageCount,
    times: true,
};

const TIMES_ONLY: FieldSet = FieldSet {
    detail: DetailInput::None,
    times: true,
};

impl Process {
    /// Display order used by every selection list.
    pub const ALL: [Process; 9] = [
        Process::Cutting,
        Process::Folding,
        Process::SaddleStitching,
        Process::PerfectBinding,
        Process::PerforateScore,
        Process::CalendarBinding,
        Process::CalendarCollating,
        Process::Packing,
        Process::Sorting,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Process::Cutting => "断裁",
            Process::Folding => "折",
            Process::SaddleStitching => "中綴じ",
            Process::PerfectBinding => "無線綴じ",
            Process::PerforateScore => "ミシン・スジ",
            Process::CalendarBinding => "綴じ（カレンダー）",
            Process::CalendarCollating => "丁合（カレンダー）",
            Process::Packing => "梱包",
            Process::Sorting => "区分け",
        }
    }

    /// ASCII key accepted on the command line as an alternative to the label.
    pub fn key(&self) -> &'static str {
        match self {
            Process::Cutting => "cutting",
            Process::Folding => "folding",
            Process::SaddleStitching => "saddle-stitching",
            Process::PerfectBinding => "perfect-binding",
            Process::PerforateScore => "perforate-score",
            Process::CalendarBinding => "calendar-binding",
            Process::CalendarCollating => "calendar-collating",
            Process::Packing => "packing",
            Process::Sorting => "sorting",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.label()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Process::ALL.into_iter().find(|p| p.label() == s)
    }

    /// Helper: resolve CLI input, either the label or the ASCII key
    pub fn from_input(s: &str) -> Option<Self> {
        let s = s.trim();
        Process::from_db_str(s)
            .or_else(|| Process::ALL.into_iter().find(|p| p.key().eq_ignore_ascii_case(s)))
    }

    /// Inputs the detail form collects for this process.
    pub fn fields(&self) -> FieldSet {
        match self {
            Process::Cutting => CUTTING_FIELDS,
            Process::Folding => FOLDING_FIELDS,
            Process::SaddleStitching
            | Process::PerfectBinding
            | Process::PerforateScore
            | Process::CalendarBinding
            | Process::CalendarCollating
            | Process::Packing
            | Process::Sorting => TIMES_ONLY,
        }
    }
}

impl FieldSet {
    /// Short human description, used by `processes`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        match self.detail {
            DetailInput::WorkMinutes => parts.push(format!(
                "work minutes ({}-{} step {})",
                WORK_MINUTES_STEP, WORK_MINUTES_MAX, WORK_MINUTES_STEP
            )),
            DetailInput::PageCount => {
                parts.push(format!("page count ({})", PAGE_COUNT_OPTIONS.join(", ")))
            }
            DetailInput::None => {}
        }
        if self.times {
            parts.push("start/end time".to_string());
        }
        parts.join(" + ")
    }
}
