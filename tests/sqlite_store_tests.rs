use bindlog::core::lifecycle::LifecycleEngine;
use bindlog::core::store::RecordStore;
use bindlog::db::pool::DbPool;
use bindlog::db::store::SqliteStore;
use bindlog::errors::AppError;
use bindlog::models::{Process, Record, RecordStatus};
use chrono::NaiveTime;

mod common;
use common::setup_test_db;

fn memory_engine() -> LifecycleEngine<SqliteStore> {
    let pool = DbPool::in_memory().expect("in-memory db");
    let store = SqliteStore::from_pool(pool).expect("store");
    LifecycleEngine::new(store).expect("engine")
}

fn folding(product: &str) -> Record {
    let mut r = Record::candidate(product, Process::Folding);
    r.detail = "16p".into();
    r.start_time = NaiveTime::from_hms_opt(13, 0, 0);
    r.end_time = NaiveTime::from_hms_opt(14, 30, 0);
    r.quantity = 1200;
    r.workers = 3;
    r
}

#[test]
fn records_survive_the_sqlite_round_trip() {
    let mut engine = memory_engine();
    let added = engine.add_in_progress(folding("Catalog")).expect("add");

    let listed = engine.in_progress().expect("list");
    assert_eq!(listed, vec![added.clone()]);

    let found = engine
        .store()
        .find_in_progress(&added.id)
        .expect("find")
        .expect("present");
    assert_eq!(found.detail, "16p");
    assert_eq!(found.workers, 3);
}

#[test]
fn status_is_stored_with_its_display_label() {
    let mut engine = memory_engine();
    let added = engine.add_in_progress(folding("Catalog")).expect("add");

    let status: String = engine
        .store()
        .conn()
        .query_row(
            "SELECT status FROM in_progress WHERE record_id = ?1",
            [&added.id],
            |row| row.get(0),
        )
        .expect("status");
    assert_eq!(status, RecordStatus::InProgress.to_db_str());
}

#[test]
fn complete_moves_rows_between_tables() {
    let mut engine = memory_engine();
    engine.add_in_progress(folding("Catalog")).expect("add");
    engine.add_in_progress(folding("Catalog")).expect("add");
    let other = engine.add_in_progress(folding("Poster")).expect("add");

    let mut packing = Record::candidate("Catalog", Process::Packing);
    packing.quantity = 1200;
    let result = engine.complete(packing, "Catalog").expect("complete");

    assert_eq!(result.moved.len(), 2);
    assert_eq!(engine.in_progress().expect("list"), vec![other]);

    let completed = engine.completed().expect("list");
    assert_eq!(completed.len(), 3);
    assert!(completed.iter().all(|r| r.status == RecordStatus::Completed));
    assert_eq!(completed[2].process, Process::Packing);
}

#[test]
fn delete_missing_id_is_not_found() {
    let mut engine = memory_engine();
    let err = engine.delete("20000101000000000000").unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn ids_keep_increasing_across_reopen() {
    let db_path = setup_test_db("ids_across_reopen");

    let first = {
        let store = SqliteStore::open(&db_path).expect("open");
        let mut engine = LifecycleEngine::new(store).expect("engine");
        engine.add_in_progress(folding("Catalog")).expect("add")
    };

    let store = SqliteStore::open(&db_path).expect("reopen");
    let mut engine = LifecycleEngine::new(store).expect("engine");
    let second = engine.add_in_progress(folding("Catalog")).expect("add");

    assert!(second.id > first.id);
    assert_eq!(engine.in_progress().expect("list").len(), 2);
}

#[test]
fn migrations_are_recorded_once() {
    let db_path = setup_test_db("migrations_recorded_once");

    SqliteStore::open(&db_path).expect("open");
    let store = SqliteStore::open(&db_path).expect("reopen");

    let applied: i64 = store
        .conn()
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .expect("count");
    assert_eq!(applied, 2);
}
