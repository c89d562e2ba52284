use bindlog::core::lifecycle::{LifecycleEngine, validate};
use bindlog::core::store::{MemoryStore, RecordStore};
use bindlog::errors::{AppError, AppResult, ValidationError};
use bindlog::models::{Process, Record, RecordStatus};
use chrono::NaiveTime;
use std::collections::HashSet;

fn hm(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

fn candidate(product: &str, process: Process, quantity: i64) -> Record {
    let mut r = Record::candidate(product, process);
    r.quantity = quantity;
    r
}

/// Store whose deletes misbehave for chosen ids: either the backend refuses,
/// or the row was already removed by someone else.
struct FlakyStore {
    inner: MemoryStore,
    refuse: HashSet<String>,
    already_gone: HashSet<String>,
}

impl FlakyStore {
    fn new(in_progress: Vec<Record>) -> Self {
        Self {
            inner: MemoryStore::with_records(in_progress, vec![]),
            refuse: HashSet::new(),
            already_gone: HashSet::new(),
        }
    }
}

impl RecordStore for FlakyStore {
    fn list_in_progress(&self) -> AppResult<Vec<Record>> {
        self.inner.list_in_progress()
    }

    fn list_completed(&self) -> AppResult<Vec<Record>> {
        self.inner.list_completed()
    }

    fn append_in_progress(&mut self, record: &Record) -> AppResult<()> {
        self.inner.append_in_progress(record)
    }

    fn append_completed_batch(&mut self, records: &[Record]) -> AppResult<()> {
        self.inner.append_completed_batch(records)
    }

    fn find_in_progress(&self, id: &str) -> AppResult<Option<Record>> {
        self.inner.find_in_progress(id)
    }

    fn delete_in_progress(&mut self, id: &str) -> AppResult<bool> {
        if self.refuse.contains(id) {
            return Err(AppError::StoreUnavailable(format!("delete of {} refused", id)));
        }
        if self.already_gone.contains(id) {
            self.inner.delete_in_progress(id)?;
            return Ok(false);
        }
        self.inner.delete_in_progress(id)
    }
}

fn stored(id: &str, product: &str, process: Process) -> Record {
    let mut r = Record::candidate(product, process);
    r.id = id.to_string();
    r
}

#[test]
fn validate_accepts_minimal_candidate() {
    let r = candidate("Flyer-A", Process::Packing, 0);
    assert_eq!(validate(&r), Ok(()));
}

#[test]
fn validate_rejects_end_not_after_start() {
    let mut r = candidate("Flyer-A", Process::Folding, 10);
    r.start_time = hm(10, 0);
    r.end_time = hm(10, 0);
    assert_eq!(validate(&r), Err(ValidationError::InvalidTimeRange));

    r.end_time = hm(9, 30);
    assert_eq!(validate(&r), Err(ValidationError::InvalidTimeRange));

    // one side missing: nothing to compare
    r.end_time = None;
    assert_eq!(validate(&r), Ok(()));
}

#[test]
fn validate_rejects_negative_quantity_and_no_workers() {
    let r = candidate("Flyer-A", Process::Packing, -1);
    assert_eq!(validate(&r), Err(ValidationError::InvalidQuantity));

    let mut r = candidate("Flyer-A", Process::Packing, 5);
    r.workers = 0;
    assert_eq!(validate(&r), Err(ValidationError::InvalidWorkerCount));
}

#[test]
fn validate_reports_time_range_first() {
    let mut r = candidate("Flyer-A", Process::Folding, -5);
    r.workers = 0;
    r.start_time = hm(12, 0);
    r.end_time = hm(11, 0);
    assert_eq!(validate(&r), Err(ValidationError::InvalidTimeRange));
}

#[test]
fn generated_ids_are_unique_and_increasing() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");

    let ids: Vec<String> = (0..500).map(|_| engine.generate_id()).collect();

    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert!(ids.iter().all(|id| id.len() == 20));
}

#[test]
fn ids_continue_after_existing_records() {
    let far_future = "29991231235959999999";
    let store = MemoryStore::with_records(vec![stored(far_future, "X", Process::Packing)], vec![]);
    let mut engine = LifecycleEngine::new(store).expect("engine");

    let id = engine.generate_id();
    assert!(id.as_str() > far_future);
}

#[test]
fn add_in_progress_commits_with_id_and_status() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");

    let rec = engine
        .add_in_progress(candidate("Flyer-A", Process::Packing, 10))
        .expect("add");

    assert!(rec.is_committed());
    assert_eq!(rec.status, RecordStatus::InProgress);

    let stored = engine.in_progress().expect("list");
    assert_eq!(stored, vec![rec]);
    assert!(engine.completed().expect("list").is_empty());
}

#[test]
fn add_in_progress_never_merges_same_product_and_process() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");

    let a = engine
        .add_in_progress(candidate("Flyer-A", Process::Packing, 10))
        .expect("add");
    let b = engine
        .add_in_progress(candidate("Flyer-A", Process::Packing, 10))
        .expect("add");

    assert_ne!(a.id, b.id);
    assert_eq!(engine.in_progress().expect("list").len(), 2);
}

#[test]
fn invalid_candidate_writes_nothing() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");

    let err = engine
        .add_in_progress(candidate("Flyer-A", Process::Packing, -3))
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::InvalidQuantity)
    ));

    let err = engine
        .complete(candidate("Flyer-A", Process::Packing, -3), "Flyer-A")
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert!(engine.in_progress().expect("list").is_empty());
    assert!(engine.completed().expect("list").is_empty());
}

#[test]
fn complete_sweeps_every_in_progress_record_of_the_product() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");
    let r1 = engine
        .add_in_progress(candidate("P", Process::Cutting, 100))
        .expect("add");
    let r2 = engine
        .add_in_progress(candidate("P", Process::Folding, 100))
        .expect("add");

    let result = engine
        .complete(candidate("P", Process::Packing, 100), "P")
        .expect("complete");

    assert!(engine.in_progress().expect("list").is_empty());

    let completed = engine.completed().expect("list");
    let ids: Vec<&str> = completed.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec![r1.id.as_str(), r2.id.as_str(), result.appended.id.as_str()]);
    assert!(completed.iter().all(|r| r.status == RecordStatus::Completed));
    assert_eq!(result.moved.len(), 2);
    assert_eq!(result.total(), 3);
    assert!(result.missing.is_empty());
}

#[test]
fn complete_without_in_progress_appends_only_the_candidate() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");

    let result = engine
        .complete(candidate("Solo", Process::Packing, 1), "Solo")
        .expect("complete");

    assert!(result.moved.is_empty());
    assert_eq!(engine.completed().expect("list"), vec![result.appended]);
}

#[test]
fn complete_leaves_other_products_untouched() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");
    engine
        .add_in_progress(candidate("A", Process::Cutting, 1))
        .expect("add");
    let other = engine
        .add_in_progress(candidate("B", Process::Cutting, 1))
        .expect("add");

    engine
        .complete(candidate("A", Process::Packing, 1), "A")
        .expect("complete");

    assert_eq!(engine.in_progress().expect("list"), vec![other]);
}

#[test]
fn complete_rejects_candidate_for_another_product() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");
    let err = engine
        .complete(candidate("A", Process::Packing, 1), "B")
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::InvalidField(_))
    ));
    assert!(engine.completed().expect("list").is_empty());
}

#[test]
fn complete_reads_in_progress_fresh() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");
    let listed_before = engine.in_progress().expect("list");
    assert!(listed_before.is_empty());

    // added after the caller's snapshot
    let late = engine
        .add_in_progress(candidate("P", Process::Sorting, 4))
        .expect("add");

    let result = engine
        .complete(candidate("P", Process::Packing, 4), "P")
        .expect("complete");
    assert_eq!(result.moved.len(), 1);
    assert_eq!(result.moved[0].id, late.id);
}

#[test]
fn failed_delete_reports_partial_completion_and_keeps_duplicates() {
    let r1 = stored("20250101090000000001", "P", Process::Cutting);
    let r2 = stored("20250101090000000002", "P", Process::Folding);
    let mut store = FlakyStore::new(vec![r1, r2.clone()]);
    store.refuse.insert(r2.id.clone());

    let mut engine = LifecycleEngine::new(store).expect("engine");
    let err = engine
        .complete(candidate("P", Process::Packing, 1), "P")
        .unwrap_err();

    match err {
        AppError::PartialCompletion {
            appended,
            deleted,
            not_deleted,
            ..
        } => {
            assert_eq!(appended, 3);
            assert_eq!(deleted, 1);
            assert_eq!(not_deleted, vec![r2.id.clone()]);
        }
        other => panic!("unexpected error: {other}"),
    }

    // duplication, never loss
    let completed = engine.completed().expect("list");
    assert_eq!(completed.len(), 3);
    let remaining = engine.in_progress().expect("list");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, r2.id);
}

#[test]
fn sweep_continues_past_rows_already_gone() {
    let r1 = stored("20250101090000000001", "P", Process::Cutting);
    let r2 = stored("20250101090000000002", "P", Process::Folding);
    let r3 = stored("20250101090000000003", "P", Process::Sorting);
    let mut store = FlakyStore::new(vec![r1.clone(), r2.clone(), r3.clone()]);
    store.already_gone.insert(r2.id.clone());

    let mut engine = LifecycleEngine::new(store).expect("engine");
    let result = engine
        .complete(candidate("P", Process::Packing, 1), "P")
        .expect("a vanished row does not abort the sweep");

    assert_eq!(result.missing, vec![r2.id.clone()]);
    let moved: Vec<&str> = result.moved.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(moved, vec![r1.id.as_str(), r2.id.as_str(), r3.id.as_str()]);
    assert!(engine.in_progress().expect("list").is_empty());
    assert_eq!(engine.completed().expect("list").len(), 4);
}

#[test]
fn listing_twice_without_changes_is_stable() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");
    engine
        .add_in_progress(candidate("A", Process::Cutting, 1))
        .expect("add");
    engine
        .add_in_progress(candidate("B", Process::Folding, 2))
        .expect("add");

    let first = engine.store().list_in_progress().expect("list");
    let second = engine.store().list_in_progress().expect("list");
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn delete_removes_only_the_target() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");
    let a = engine
        .add_in_progress(candidate("P", Process::Cutting, 1))
        .expect("add");
    let b = engine
        .add_in_progress(candidate("P", Process::Folding, 1))
        .expect("add");

    let removed = engine.delete(&a.id).expect("delete");
    assert_eq!(removed, a);
    assert_eq!(engine.in_progress().expect("list"), vec![b]);
    assert!(engine.completed().expect("list").is_empty());
}

#[test]
fn delete_unknown_id_is_not_found() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");
    let err = engine.delete("20990101000000000000").unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn completed_records_cannot_be_deleted() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");
    let result = engine
        .complete(candidate("P", Process::Packing, 1), "P")
        .expect("complete");

    let err = engine.delete(&result.appended.id).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(engine.completed().expect("list").len(), 1);
}

#[test]
fn flyer_scenario_moves_both_steps_then_appends_packing() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");

    let mut cut = candidate("Flyer-A", Process::Cutting, 500);
    cut.work_minutes = 30;
    cut.detail = "30分".into();
    let cut = engine.add_in_progress(cut).expect("add cutting");

    let mut fold = candidate("Flyer-A", Process::Folding, 500);
    fold.detail = "8p".into();
    fold.start_time = hm(9, 0);
    fold.end_time = hm(10, 0);
    let fold = engine.add_in_progress(fold).expect("add folding");

    let packing = candidate("Flyer-A", Process::Packing, 500);
    let result = engine.complete(packing, "Flyer-A").expect("complete");

    let completed = engine.completed().expect("list");
    assert_eq!(completed.len(), 3);
    assert_eq!(completed[0].id, cut.id);
    assert_eq!(completed[0].detail, "30分");
    assert_eq!(completed[1].id, fold.id);
    assert_eq!(completed[1].start_time, hm(9, 0));
    assert_eq!(completed[2].process, Process::Packing);
    assert_eq!(completed[2].id, result.appended.id);
    assert!(engine.in_progress().expect("list").is_empty());

    let store = engine.into_store();
    assert!(store.list_in_progress().expect("list").is_empty());
}

#[test]
fn flyer_cutting_then_folding_completion() {
    let mut engine = LifecycleEngine::new(MemoryStore::new()).expect("engine");

    let mut cut = candidate("Flyer-A", Process::Cutting, 500);
    cut.workers = 2;
    cut.work_minutes = 30;
    cut.detail = "30分".into();
    let cut = engine.add_in_progress(cut).expect("add cutting");
    assert_eq!(cut.status, RecordStatus::InProgress);

    let mut fold = candidate("Flyer-A", Process::Folding, 500);
    fold.detail = "8p".into();
    fold.start_time = hm(9, 0);
    fold.end_time = hm(9, 40);
    engine.complete(fold, "Flyer-A").expect("complete");

    let completed = engine.completed().expect("list");
    assert_eq!(completed.len(), 2);
    assert_eq!(completed[0].id, cut.id);
    assert_eq!(completed[0].status, RecordStatus::Completed);
    assert_eq!(completed[1].process, Process::Folding);
    assert_eq!(completed[1].end_time, hm(9, 40));
    assert!(engine.in_progress().expect("list").is_empty());
}
