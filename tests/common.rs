#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use bindlog::core::store::RecordStore;
use bindlog::db::store::SqliteStore;
use bindlog::models::Record;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn bl() -> Command {
    cargo_bin_cmd!("bindlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_bindlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_bindlog_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run `init` in test mode (no config file written)
pub fn init_db(db_path: &str) {
    bl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Add an in-progress record through the CLI
pub fn add(db_path: &str, args: &[&str]) {
    let mut full = vec!["--db", db_path, "add"];
    full.extend_from_slice(args);
    bl().args(&full).assert().success();
}

/// Initialize DB and put two products in progress:
/// Flyer-A (cutting + folding) and Book-B (saddle stitching)
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);
    add(db_path, &["Flyer-A", "cutting", "--minutes", "30", "--quantity", "500"]);
    add(
        db_path,
        &[
            "Flyer-A", "folding", "--pages", "8p", "--start", "09:00", "--end", "10:00",
            "--quantity", "500",
        ],
    );
    add(db_path, &["Book-B", "中綴じ", "--quantity", "200", "--workers", "2"]);
}

pub fn in_progress(db_path: &str) -> Vec<Record> {
    SqliteStore::open(db_path)
        .expect("open store")
        .list_in_progress()
        .expect("list in progress")
}

pub fn completed(db_path: &str) -> Vec<Record> {
    SqliteStore::open(db_path)
        .expect("open store")
        .list_completed()
        .expect("list completed")
}
