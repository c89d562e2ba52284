//! SQLite connection wrapper (lightweight for CLI usage).

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))
            .map_err(|e| AppError::StoreUnavailable(format!("{}: {}", path, e)))?;
        Ok(Self { conn })
    }

    /// Private in-memory database.
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::StoreUnavailable(format!(":memory: {}", e)))?;
        Ok(Self { conn })
    }
}
