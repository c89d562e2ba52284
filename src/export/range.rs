// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Parse --range (year / month / day / interval) into inclusive date bounds.
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = match r.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(range_err("start and end must have same format"));
            }
            (bounds_of(s)?.0, bounds_of(e)?.1)
        }
        None => bounds_of(r.trim())?,
    };

    if end < start {
        return Err(range_err("range end is before range start"));
    }
    Ok((start, end))
}

/// First and last day covered by a single period expression.
fn bounds_of(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| range_err("invalid year"))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| range_err("invalid year"))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| range_err("invalid year"))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| range_err("invalid month"))?;
            let next = if d1.month() == 12 {
                NaiveDate::from_ymd_opt(d1.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(d1.year(), d1.month() + 1, 1)
            };
            let d2 = next
                .and_then(|n| n.pred_opt())
                .ok_or_else(|| range_err("invalid month"))?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| range_err("invalid date"))?;
            Ok((d, d))
        }
        _ => Err(range_err("unsupported --range format")),
    }
}

fn range_err(msg: &str) -> AppError {
    AppError::Export(msg.to_string())
}
