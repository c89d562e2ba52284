mod common;
use bindlog::core::id::id_date;
use common::{bl, completed, in_progress, init_db_with_data, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;

fn complete_flyer(db_path: &str) {
    bl().args([
        "--db", db_path, "add", "Flyer-A", "packing", "--quantity", "500", "--complete",
    ])
    .assert()
    .success();
}

#[test]
fn test_export_completed_csv() {
    let db_path = setup_test_db("export_completed_csv");
    init_db_with_data(&db_path);
    complete_flyer(&db_path);

    let out = temp_out("export_completed_csv", "csv");

    bl().args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with('\u{feff}'));
    let mut lines = content.trim_start_matches('\u{feff}').lines();
    assert_eq!(
        lines.next(),
        Some("記録ID,製品名,工程名,詳細,開始時間,終了時間,作業時間_分,出来数,作業人数,ステータス")
    );
    assert_eq!(lines.count(), 3);
    assert!(content.contains("30分"));
    assert!(content.contains("梱包"));
    assert!(content.contains("完了"));
    assert!(!content.contains("Book-B"));
}

#[test]
fn test_export_in_progress_json() {
    let db_path = setup_test_db("export_in_progress_json");
    init_db_with_data(&db_path);

    let out = temp_out("export_in_progress_json", "json");

    bl().args([
        "--db", &db_path, "export", "--format", "json", "--file", &out, "--in-progress",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["詳細"], "8p");
    assert_eq!(rows[1]["開始時間"], "09:00");
    assert_eq!(rows[2]["作業人数"], 2);
    assert_eq!(rows[0]["ステータス"], "作業中");
}

#[test]
fn test_export_range_filters_on_record_date() {
    let db_path = setup_test_db("export_range_filter");
    init_db_with_data(&db_path);
    complete_flyer(&db_path);

    let day = id_date(&completed(&db_path)[0].id).expect("dated id");

    let out = temp_out("export_range_today", "csv");
    bl().args([
        "--db",
        &db_path,
        "export",
        "--file",
        &out,
        "--range",
        &day.format("%Y-%m").to_string(),
    ])
    .assert()
    .success();
    assert!(fs::read_to_string(&out).expect("read").contains("Flyer-A"));

    let old = temp_out("export_range_old", "csv");
    bl().args(["--db", &db_path, "export", "--file", &old, "--range", "1999"])
        .assert()
        .success()
        .stdout(contains("Nothing to export"));
    assert!(!std::path::Path::new(&old).exists());
}

#[test]
fn test_export_xlsx_written() {
    let db_path = setup_test_db("export_xlsx");
    init_db_with_data(&db_path);
    complete_flyer(&db_path);

    let out = temp_out("export_xlsx", "xlsx");
    bl().args(["--db", &db_path, "export", "--format", "xlsx", "--file", &out])
        .assert()
        .success();

    let meta = fs::metadata(&out).expect("xlsx exists");
    assert!(meta.len() > 0);
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative_path");
    init_db_with_data(&db_path);

    bl().args([
        "--db",
        &db_path,
        "export",
        "--file",
        "relative.csv",
        "--in-progress",
    ])
    .assert()
    .failure()
    .stderr(contains("must be absolute"));
}

#[test]
fn test_export_does_not_modify_records() {
    let db_path = setup_test_db("export_read_only");
    init_db_with_data(&db_path);

    let out = temp_out("export_read_only", "csv");
    bl().args([
        "--db", &db_path, "export", "--file", &out, "--in-progress", "--force",
    ])
    .assert()
    .success();

    assert_eq!(in_progress(&db_path).len(), 3);
    assert!(completed(&db_path).is_empty());
}
