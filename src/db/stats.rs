use crate::core::id::id_date;
use crate::db::queries::{Table, count_records};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::{Connection, OptionalExtension};
use std::fs;

pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) RECORD COUNTS
    //
    let in_progress = count_records(conn, Table::InProgress)?;
    let completed = count_records(conn, Table::Completed)?;
    let products: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT product_name) FROM in_progress",
        [],
        |row| row.get(0),
    )?;

    println!(
        "{}• In-progress records:{} {}{}{} ({} product(s))",
        CYAN, RESET, GREEN, in_progress, RESET, products
    );
    println!(
        "{}• Completed records:{} {}{}{}",
        CYAN, RESET, GREEN, completed, RESET
    );

    //
    // 3) COMPLETED LOG RANGE (from record ids)
    //
    let first_id: Option<String> = conn
        .query_row(
            "SELECT record_id FROM completed ORDER BY record_id ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let last_id: Option<String> = conn
        .query_row(
            "SELECT record_id FROM completed ORDER BY record_id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_date = |id: Option<String>| {
        id.as_deref()
            .and_then(id_date)
            .map(|d| d.to_string())
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Completed log range:{}", CYAN, RESET);
    println!("    from: {}", fmt_date(first_id));
    println!("    to:   {}", fmt_date(last_id));

    println!();
    Ok(())
}
