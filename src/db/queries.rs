use crate::errors::{AppError, AppResult};
use crate::models::{Process, Record, RecordStatus};
use crate::utils::time::parse_time;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// The two record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    InProgress,
    Completed,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::InProgress => "in_progress",
            Table::Completed => "completed",
        }
    }
}

const COLUMNS: &str = "record_id, product_name, process_name, detail, start_time, end_time, \
                       work_minutes, quantity, workers, status";

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<Record> {
    let process_str: String = row.get("process_name")?;
    let process = Process::from_db_str(&process_str)
        .ok_or_else(|| conversion_error(AppError::InvalidProcess(process_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = RecordStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(AppError::InvalidStatus(status_str.clone())))?;

    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;

    Ok(Record {
        id: row.get("record_id")?,
        product_name: row.get("product_name")?,
        process,
        detail: row.get("detail")?,
        start_time: parse_stored_time(&start_str)?,
        end_time: parse_stored_time(&end_str)?,
        work_minutes: row.get("work_minutes")?,
        quantity: row.get("quantity")?,
        workers: row.get("workers")?,
        status,
    })
}

fn parse_stored_time(s: &str) -> Result<Option<chrono::NaiveTime>> {
    if s.is_empty() {
        return Ok(None);
    }
    parse_time(s)
        .map(Some)
        .ok_or_else(|| conversion_error(AppError::InvalidTime(s.to_string())))
}

pub fn load_records(conn: &Connection, table: Table) -> AppResult<Vec<Record>> {
    let sql = format!(
        "SELECT {} FROM {} ORDER BY rowid ASC",
        COLUMNS,
        table.name()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_record(conn: &Connection, table: Table, rec: &Record) -> AppResult<()> {
    let sql = format!(
        "INSERT INTO {} ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        table.name(),
        COLUMNS
    );
    conn.execute(
        &sql,
        params![
            rec.id,
            rec.product_name,
            rec.process.to_db_str(),
            rec.detail,
            rec.start_str(),
            rec.end_str(),
            rec.work_minutes,
            rec.quantity,
            rec.workers,
            rec.status.to_db_str(),
        ],
    )?;
    Ok(())
}

/// Row position of an in-progress record, with the record itself.
pub fn find_in_progress(conn: &Connection, id: &str) -> AppResult<Option<(i64, Record)>> {
    let sql = format!(
        "SELECT rowid, {} FROM in_progress WHERE record_id = ?1",
        COLUMNS
    );
    let found = conn
        .query_row(&sql, [id], |row| {
            let rowid: i64 = row.get(0)?;
            Ok((rowid, map_row(row)?))
        })
        .optional()?;
    Ok(found)
}

/// Delete by row position. Returns the number of rows removed.
pub fn delete_in_progress_row(conn: &Connection, rowid: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM in_progress WHERE rowid = ?1", [rowid])?)
}

pub fn count_records(conn: &Connection, table: Table) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.name());
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}

pub fn load_log(conn: &Connection) -> AppResult<Vec<(i64, String, String, String, String)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, IFNULL(target, ''), message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
