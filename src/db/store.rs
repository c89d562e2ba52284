//! SQLite-backed record store.

use crate::core::store::RecordStore;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries::{self, Table};
use crate::errors::{AppError, AppResult};
use crate::models::Record;
use rusqlite::Connection;

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open the database at `path` and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn).map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

impl RecordStore for SqliteStore {
    fn list_in_progress(&self) -> AppResult<Vec<Record>> {
        queries::load_records(&self.pool.conn, Table::InProgress)
    }

    fn list_completed(&self) -> AppResult<Vec<Record>> {
        queries::load_records(&self.pool.conn, Table::Completed)
    }

    fn append_in_progress(&mut self, record: &Record) -> AppResult<()> {
        queries::insert_record(&self.pool.conn, Table::InProgress, record)
    }

    fn append_completed_batch(&mut self, records: &[Record]) -> AppResult<()> {
        let tx = self.pool.conn.transaction()?;
        for rec in records {
            queries::insert_record(&tx, Table::Completed, rec)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn find_in_progress(&self, id: &str) -> AppResult<Option<Record>> {
        Ok(queries::find_in_progress(&self.pool.conn, id)?.map(|(_, rec)| rec))
    }

    fn delete_in_progress(&mut self, id: &str) -> AppResult<bool> {
        let Some((rowid, _)) = queries::find_in_progress(&self.pool.conn, id)? else {
            return Ok(false);
        };
        Ok(queries::delete_in_progress_row(&self.pool.conn, rowid)? > 0)
    }
}
