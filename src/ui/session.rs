//! Screen state of the two-screen entry flow, passed explicitly between
//! handlers: process/product selection, then the detail form.

use crate::core::form::{FormInput, assemble};
use crate::core::lifecycle::{CompletionResult, LifecycleEngine};
use crate::core::store::RecordStore;
use crate::errors::{AppError, AppResult, ValidationError};
use crate::models::{Process, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    SelectProcess,
    InputForm { product: String, process: Process },
}

/// The two submit buttons of the detail form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    InProgress,
    Complete,
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Added(Record),
    Completed(CompletionResult),
}

#[derive(Debug, Clone)]
pub struct Session {
    view: View,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            view: View::SelectProcess,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Leave the selection screen for the detail form.
    pub fn start_input(
        &mut self,
        product: &str,
        process: Option<Process>,
    ) -> Result<(), ValidationError> {
        let product = product.trim();
        if product.is_empty() {
            return Err(ValidationError::InvalidField(
                "select or enter a product first".into(),
            ));
        }
        let process = process
            .ok_or_else(|| ValidationError::InvalidField("select a process first".into()))?;

        self.view = View::InputForm {
            product: product.to_string(),
            process,
        };
        Ok(())
    }

    pub fn back(&mut self) {
        self.view = View::SelectProcess;
    }

    /// Submit the detail form.
    ///
    /// Validation failures keep the form open so the operator can correct the
    /// input. Any other outcome, success or store failure, returns to the
    /// selection screen.
    pub fn submit<S: RecordStore>(
        &mut self,
        engine: &mut LifecycleEngine<S>,
        input: &FormInput,
        mode: SubmitMode,
    ) -> AppResult<SubmitOutcome> {
        let View::InputForm { product, process } = &self.view else {
            return Err(AppError::Other(
                "no product/process selected for submission".into(),
            ));
        };
        let product = product.clone();

        let result = assemble(&product, *process, input)
            .map_err(AppError::from)
            .and_then(|candidate| match mode {
                SubmitMode::InProgress => engine.add_in_progress(candidate).map(SubmitOutcome::Added),
                SubmitMode::Complete => engine
                    .complete(candidate, &product)
                    .map(SubmitOutcome::Completed),
            });

        if !matches!(result, Err(AppError::Validation(_))) {
            self.view = View::SelectProcess;
        }
        result
    }
}
