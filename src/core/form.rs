//! Turns operator input into a candidate record, keeping only the fields the
//! selected process collects.

use crate::errors::ValidationError;
use crate::models::process::{DetailInput, PAGE_COUNT_OPTIONS, is_work_minute_option};
use crate::models::{Process, Record};
use chrono::NaiveTime;

#[derive(Debug, Clone)]
pub struct FormInput {
    pub quantity: i64,
    pub workers: i64,
    pub work_minutes: Option<i64>,
    pub page_count: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            quantity: 0,
            workers: 1,
            work_minutes: None,
            page_count: None,
            start_time: None,
            end_time: None,
        }
    }
}

impl FormInput {
    /// Names of supplied inputs that `process` does not collect.
    pub fn ignored_for(&self, process: Process) -> Vec<&'static str> {
        let fields = process.fields();
        let mut ignored = Vec::new();

        if self.work_minutes.is_some() && fields.detail != DetailInput::WorkMinutes {
            ignored.push("minutes");
        }
        if self.page_count.is_some() && fields.detail != DetailInput::PageCount {
            ignored.push("pages");
        }
        if !fields.times {
            if self.start_time.is_some() {
                ignored.push("start");
            }
            if self.end_time.is_some() {
                ignored.push("end");
            }
        }
        ignored
    }
}

pub fn assemble(
    product_name: &str,
    process: Process,
    input: &FormInput,
) -> Result<Record, ValidationError> {
    let product = product_name.trim();
    if product.is_empty() {
        return Err(ValidationError::InvalidField(
            "product name must not be empty".into(),
        ));
    }

    let fields = process.fields();
    let mut record = Record::candidate(product, process);
    record.quantity = input.quantity;
    record.workers = input.workers;

    match fields.detail {
        DetailInput::WorkMinutes => {
            let minutes = input.work_minutes.ok_or_else(|| {
                ValidationError::InvalidField(format!(
                    "{} requires the work time in minutes",
                    process.label()
                ))
            })?;
            if !is_work_minute_option(minutes) {
                return Err(ValidationError::InvalidField(format!(
                    "work minutes must be a multiple of 10 between 10 and 720, got {}",
                    minutes
                )));
            }
            record.work_minutes = minutes;
            record.detail = format!("{}分", minutes);
        }
        DetailInput::PageCount => {
            let pages = input.page_count.as_deref().map(str::trim).unwrap_or("");
            if !pages.is_empty() && !PAGE_COUNT_OPTIONS.contains(&pages) {
                return Err(ValidationError::InvalidField(format!(
                    "page count must be one of {}, got '{}'",
                    PAGE_COUNT_OPTIONS.join(", "),
                    pages
                )));
            }
            record.detail = pages.to_string();
        }
        DetailInput::None => {}
    }

    if fields.times {
        record.start_time = input.start_time;
        record.end_time = input.end_time;
    }

    Ok(record)
}
