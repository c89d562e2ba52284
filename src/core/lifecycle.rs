//! Record lifecycle: validation, in-progress creation, the completion sweep
//! and deletion.
//!
//! A record moves `CREATED → IN_PROGRESS → {DELETED | COMPLETED}`.
//! Completing a product finalizes every in-progress record of that product
//! together with the submitted one.

use crate::core::id::IdGenerator;
use crate::core::store::RecordStore;
use crate::errors::{AppError, AppResult, ValidationError};
use crate::models::{Record, RecordStatus};

/// Outcome of a completion transition.
#[derive(Debug, Clone)]
pub struct CompletionResult {
    /// Former in-progress records, now `COMPLETED`.
    pub moved: Vec<Record>,
    /// The submitted record, written straight to the completed log.
    pub appended: Record,
    /// Ids that had already disappeared from in-progress when their delete ran.
    pub missing: Vec<String>,
}

impl CompletionResult {
    pub fn total(&self) -> usize {
        self.moved.len() + 1
    }
}

/// Checks a candidate before anything is written.
pub fn validate(candidate: &Record) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (candidate.start_time, candidate.end_time)
        && end <= start
    {
        return Err(ValidationError::InvalidTimeRange);
    }
    if candidate.quantity < 0 || candidate.work_minutes < 0 {
        return Err(ValidationError::InvalidQuantity);
    }
    if candidate.workers < 1 {
        return Err(ValidationError::InvalidWorkerCount);
    }
    Ok(())
}

pub struct LifecycleEngine<S: RecordStore> {
    store: S,
    ids: IdGenerator,
}

impl<S: RecordStore> LifecycleEngine<S> {
    /// Wraps `store`, seeding the id generator from both collections.
    pub fn new(store: S) -> AppResult<Self> {
        let in_progress = store.list_in_progress()?;
        let completed = store.list_completed()?;
        let ids = IdGenerator::seeded(
            in_progress
                .iter()
                .chain(completed.iter())
                .map(|r| r.id.as_str()),
        );
        Ok(Self { store, ids })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn generate_id(&mut self) -> String {
        self.ids.next_id()
    }

    pub fn in_progress(&self) -> AppResult<Vec<Record>> {
        self.store.list_in_progress()
    }

    pub fn completed(&self) -> AppResult<Vec<Record>> {
        self.store.list_completed()
    }

    /// Distinct product names currently in progress, sorted.
    pub fn in_progress_products(&self) -> AppResult<Vec<String>> {
        let mut products: Vec<String> = self
            .store
            .list_in_progress()?
            .into_iter()
            .map(|r| r.product_name)
            .collect();
        products.sort();
        products.dedup();
        Ok(products)
    }

    /// Commits `candidate` as a new in-progress record.
    /// Records for the same product/process are never merged.
    pub fn add_in_progress(&mut self, mut candidate: Record) -> AppResult<Record> {
        validate(&candidate)?;

        candidate.id = self.generate_id();
        candidate.status = RecordStatus::InProgress;
        self.store.append_in_progress(&candidate)?;

        Ok(candidate)
    }

    /// Completion transition for `product_name`.
    ///
    /// The completed batch is appended before any in-progress row is removed:
    /// a failure in between leaves duplicates, never lost records.
    pub fn complete(
        &mut self,
        mut candidate: Record,
        product_name: &str,
    ) -> AppResult<CompletionResult> {
        validate(&candidate)?;
        if candidate.product_name != product_name {
            return Err(ValidationError::InvalidField(format!(
                "record is for '{}' but completion targets '{}'",
                candidate.product_name, product_name
            ))
            .into());
        }

        // Always re-read: the caller's view may be stale.
        let moved: Vec<Record> = self
            .store
            .list_in_progress()?
            .into_iter()
            .filter(|r| r.product_name == product_name)
            .map(|mut r| {
                r.status = RecordStatus::Completed;
                r
            })
            .collect();

        candidate.id = self.generate_id();
        candidate.status = RecordStatus::Completed;

        let mut batch = moved.clone();
        batch.push(candidate.clone());
        self.store.append_completed_batch(&batch)?;

        let mut missing = Vec::new();
        for (idx, rec) in moved.iter().enumerate() {
            match self.store.delete_in_progress(&rec.id) {
                Ok(true) => {}
                Ok(false) => missing.push(rec.id.clone()),
                Err(e) => {
                    return Err(AppError::PartialCompletion {
                        appended: batch.len(),
                        deleted: idx - missing.len(),
                        not_deleted: moved[idx..].iter().map(|r| r.id.clone()).collect(),
                        cause: e.to_string(),
                    });
                }
            }
        }

        Ok(CompletionResult {
            moved,
            appended: candidate,
            missing,
        })
    }

    /// Removes one in-progress record. No cascade.
    pub fn delete(&mut self, record_id: &str) -> AppResult<Record> {
        let record = self
            .store
            .find_in_progress(record_id)?
            .ok_or_else(|| AppError::NotFound(record_id.to_string()))?;

        if !self.store.delete_in_progress(record_id)? {
            return Err(AppError::NotFound(record_id.to_string()));
        }

        Ok(record)
    }
}
