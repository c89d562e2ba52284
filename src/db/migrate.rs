use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension};

/// Schema steps, applied in order. Each one is recorded in the `log` table
/// (`operation = 'migration_applied'`, `target = version`) once done.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250601_0001_create_record_tables",
        "Created in_progress and completed tables",
        r#"
        CREATE TABLE IF NOT EXISTS in_progress (
            record_id     TEXT NOT NULL UNIQUE,
            product_name  TEXT NOT NULL,
            process_name  TEXT NOT NULL,
            detail        TEXT NOT NULL DEFAULT '',
            start_time    TEXT NOT NULL DEFAULT '',
            end_time      TEXT NOT NULL DEFAULT '',
            work_minutes  INTEGER NOT NULL DEFAULT 0,
            quantity      INTEGER NOT NULL DEFAULT 0,
            workers       INTEGER NOT NULL DEFAULT 1,
            status        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS completed (
            record_id     TEXT NOT NULL,
            product_name  TEXT NOT NULL,
            process_name  TEXT NOT NULL,
            detail        TEXT NOT NULL DEFAULT '',
            start_time    TEXT NOT NULL DEFAULT '',
            end_time      TEXT NOT NULL DEFAULT '',
            work_minutes  INTEGER NOT NULL DEFAULT 0,
            quantity      INTEGER NOT NULL DEFAULT 0,
            workers       INTEGER NOT NULL DEFAULT 1,
            status        TEXT NOT NULL
        );
        "#,
    ),
    (
        "20250610_0002_index_record_lookups",
        "Added product and record id indexes",
        r#"
        CREATE INDEX IF NOT EXISTS idx_in_progress_product ON in_progress(product_name);
        CREATE INDEX IF NOT EXISTS idx_completed_product ON completed(product_name);
        CREATE INDEX IF NOT EXISTS idx_completed_record_id ON completed(record_id);
        "#,
    ),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn db_file_path(conn: &Connection) -> String {
    conn.query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default()
}

/// Zip the database file next to itself before altering an existing schema.
fn backup_before_migration(db_path: &str, version: &str) -> AppResult<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_db_pre_{}.zip",
        Local::now().format("%Y%m%d_%H%M%S"),
        version
    );

    let backup_path = std::path::Path::new(db_path)
        .parent()
        .ok_or_else(|| AppError::Migration(format!("no parent directory for {}", db_path)))?
        .join(&backup_name);

    let to_migration_err = |stage: &str, e: &dyn std::fmt::Display| {
        AppError::Migration(format!("Backup failed ({}): {}", stage, e))
    };

    let file = File::create(&backup_path).map_err(|e| to_migration_err("create", &e))?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| to_migration_err("start_file", &e))?;

    let db_content = fs::read(db_path).map_err(|e| to_migration_err("read", &e))?;
    zip.write_all(&db_content)
        .map_err(|e| to_migration_err("write_all", &e))?;
    zip.finish().map_err(|e| to_migration_err("finish", &e))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by `db::initialize::init_db` and `bindlog db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let pending: Vec<_> = MIGRATIONS
        .iter()
        .map(|m| is_applied(conn, m.0).map(|applied| (m, applied)))
        .collect::<AppResult<Vec<_>>>()?
        .into_iter()
        .filter(|(_, applied)| !applied)
        .map(|(m, _)| m)
        .collect();

    if pending.is_empty() {
        return Ok(());
    }

    // Existing data → safety copy before touching the schema.
    if table_exists(conn, "in_progress")? || table_exists(conn, "completed")? {
        warning("Existing record tables detected, creating safety backup before migration...");
        let db_path = db_file_path(conn);
        if db_path.is_empty() {
            warning("Could not determine DB path, backup skipped.");
        } else {
            backup_before_migration(&db_path, pending[0].0)?;
        }
    }

    for (version, message, sql) in pending {
        conn.execute_batch(sql)
            .map_err(|e| AppError::Migration(format!("{}: {}", version, e)))?;
        mark_applied(conn, version, message)?;
        success(format!("Migration applied: {} → {}", version, message));
    }

    Ok(())
}
