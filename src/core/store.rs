//! Record store capability consumed by the lifecycle engine.
//!
//! The engine only ever addresses rows by record id. Backends that delete by
//! row position (spreadsheets, SQLite rowids) resolve the position themselves.

use crate::errors::AppResult;
use crate::models::Record;

pub trait RecordStore {
    /// Full in-progress collection, in insertion order. Never cached.
    fn list_in_progress(&self) -> AppResult<Vec<Record>>;

    /// Full completed collection, in insertion order.
    fn list_completed(&self) -> AppResult<Vec<Record>>;

    fn append_in_progress(&mut self, record: &Record) -> AppResult<()>;

    /// Appends every record in one call. Batching saves round-trips; it is not
    /// a transaction spanning later deletes.
    fn append_completed_batch(&mut self, records: &[Record]) -> AppResult<()>;

    fn find_in_progress(&self, id: &str) -> AppResult<Option<Record>>;

    /// Removes the in-progress row carrying `id`.
    /// Returns `false` when no such row exists.
    fn delete_in_progress(&mut self, id: &str) -> AppResult<bool>;
}

/// Store kept entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    in_progress: Vec<Record>,
    completed: Vec<Record>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(in_progress: Vec<Record>, completed: Vec<Record>) -> Self {
        Self {
            in_progress,
            completed,
        }
    }
}

impl RecordStore for MemoryStore {
    fn list_in_progress(&self) -> AppResult<Vec<Record>> {
        Ok(self.in_progress.clone())
    }

    fn list_completed(&self) -> AppResult<Vec<Record>> {
        Ok(self.completed.clone())
    }

    fn append_in_progress(&mut self, record: &Record) -> AppResult<()> {
        self.in_progress.push(record.clone());
        Ok(())
    }

    fn append_completed_batch(&mut self, records: &[Record]) -> AppResult<()> {
        self.completed.extend_from_slice(records);
        Ok(())
    }

    fn find_in_progress(&self, id: &str) -> AppResult<Option<Record>> {
        Ok(self.in_progress.iter().find(|r| r.id == id).cloned())
    }

    fn delete_in_progress(&mut self, id: &str) -> AppResult<bool> {
        match self.in_progress.iter().position(|r| r.id == id) {
            Some(idx) => {
                self.in_progress.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
