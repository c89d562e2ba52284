//! Record identifiers: local timestamps at microsecond resolution,
//! `YYYYMMDDHHMMSSffffff`, so string order equals creation order.

use chrono::{DateTime, Local, NaiveDate};

pub const ID_FORMAT: &str = "%Y%m%d%H%M%S%6f";
pub const ID_LEN: usize = 20;

#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: Option<u128>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start after the largest id already issued, so ids are never reused
    /// even if the clock went backwards between runs.
    /// Ids that are not in the timestamp form are ignored.
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a str>) -> Self {
        let last = existing.into_iter().filter_map(parse_id).max();
        Self { last }
    }

    pub fn next_id(&mut self) -> String {
        self.next_at(Local::now())
    }

    /// Id for the given instant. When that instant does not sort after the
    /// previous id, the previous id plus one is issued instead.
    pub fn next_at(&mut self, now: DateTime<Local>) -> String {
        let candidate = parse_id(&now.format(ID_FORMAT).to_string()).unwrap_or(0);

        let value = match self.last {
            Some(last) if candidate <= last => last + 1,
            _ => candidate,
        };

        self.last = Some(value);
        format!("{:0width$}", value, width = ID_LEN)
    }
}

fn parse_id(id: &str) -> Option<u128> {
    if id.len() != ID_LEN || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    id.parse().ok()
}

/// Creation date embedded in an id (first eight digits).
pub fn id_date(id: &str) -> Option<NaiveDate> {
    let prefix = id.get(..8)?;
    NaiveDate::parse_from_str(prefix, "%Y%m%d").ok()
}
