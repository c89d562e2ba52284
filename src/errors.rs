//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

/// Rejections produced while checking a candidate record.
/// Nothing is written to the store when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("End time must be later than start time")]
    InvalidTimeRange,

    #[error("Quantity must not be negative")]
    InvalidQuantity,

    #[error("Number of workers must be at least 1")]
    InvalidWorkerCount,

    #[error("Invalid field: {0}")]
    InvalidField(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    /// The completed batch was written but at least one in-progress row
    /// could not be removed. Those rows now exist in both collections.
    #[error(
        "Completion partially applied: {appended} record(s) written to the completed log, \
         {deleted} removed from in-progress, still present in both: [{}] ({cause})",
        not_deleted.join(", ")
    )]
    PartialCompletion {
        appended: usize,
        deleted: usize,
        not_deleted: Vec<String>,
        cause: String,
    },

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Unknown process: {0}")]
    InvalidProcess(String),

    #[error("Invalid status label: {0}")]
    InvalidStatus(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
