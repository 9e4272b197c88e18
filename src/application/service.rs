use log::{debug, info, warn};

use crate::domain::{
    Cents, Field, FieldError, Operation, OperationId, OperationInput, Summary, ValidationError,
    sample_operations, summarize,
};
use crate::storage::{Repository, RepositoryStats};

use super::{CategoryReport, LedgerError, build_category_report};

/// The ledger: an owned, in-memory collection of operations plus the rules
/// for changing it. This is the primary interface for any client (CLI, TUI, ...).
///
/// Mutations take `&mut self`, so a ledger has exactly one writer at a time.
/// Each mutation either applies fully or returns an error with the collection
/// unchanged.
///
/// The sum of the magnitudes of every stored amount (the turnover) always fits
/// in `Cents`, so summaries and reports never overflow.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    repo: Repository,
    turnover: Cents,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger on top of an existing repository.
    pub fn with_repository(repo: Repository) -> Self {
        let turnover = repo
            .iter()
            .fold(0, |acc: Cents, op| acc.saturating_add(op.amount_cents.saturating_abs()));
        Self { repo, turnover }
    }

    /// Create a ledger seeded with the starter operations.
    pub fn with_sample_data() -> Self {
        Self::with_repository(Repository::with_operations(sample_operations()))
    }

    // ========================
    // Mutations
    // ========================

    /// Validate `input` and record it as the newest operation.
    pub fn create(&mut self, input: &OperationInput) -> Result<Operation, LedgerError> {
        let valid = input.validate().inspect_err(log_rejected("create"))?;
        let turnover = self
            .turnover_with(valid.amount_cents, 0)
            .inspect_err(log_rejected("create"))?;
        let operation = valid.into_operation();

        self.repo.prepend(operation.clone());
        self.turnover = turnover;
        info!(
            "event=operation_create status=ok id={} amount_cents={} count={}",
            operation.id,
            operation.amount_cents,
            self.repo.len()
        );
        Ok(operation)
    }

    /// Replace every field of the operation `id` except the id itself.
    /// The operation keeps its place in the collection.
    pub fn update(
        &mut self,
        id: OperationId,
        input: &OperationInput,
    ) -> Result<Operation, LedgerError> {
        let Some(previous) = self.repo.get(id).map(|op| op.amount_cents) else {
            warn!("event=operation_update status=not_found id={}", id);
            return Err(LedgerError::NotFound(id));
        };

        let valid = input.validate().inspect_err(log_rejected("update"))?;
        let turnover = self
            .turnover_with(valid.amount_cents, previous)
            .inspect_err(log_rejected("update"))?;
        let operation = self.repo.get_mut(id).ok_or(LedgerError::NotFound(id))?;
        valid.apply_to(operation);
        self.turnover = turnover;

        info!(
            "event=operation_update status=ok id={} amount_cents={}",
            operation.id, operation.amount_cents
        );
        Ok(operation.clone())
    }

    /// Remove the operation `id` and return it.
    pub fn delete(&mut self, id: OperationId) -> Result<Operation, LedgerError> {
        match self.repo.remove(id) {
            Some(operation) => {
                self.turnover = self
                    .turnover
                    .saturating_sub(operation.amount_cents.saturating_abs());
                info!(
                    "event=operation_delete status=ok id={} count={}",
                    id,
                    self.repo.len()
                );
                Ok(operation)
            }
            None => {
                warn!("event=operation_delete status=not_found id={}", id);
                Err(LedgerError::NotFound(id))
            }
        }
    }

    // ========================
    // Queries
    // ========================

    /// Get an operation by ID.
    pub fn get(&self, id: OperationId) -> Result<&Operation, LedgerError> {
        self.repo.get(id).ok_or(LedgerError::NotFound(id))
    }

    /// Iterate operations, newest first.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.repo.iter()
    }

    /// List operations in a category (case-insensitive), newest first.
    pub fn operations_in_category(&self, category: &str) -> Vec<&Operation> {
        self.repo.list_by_category(category)
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }

    /// Balance, income, expenses and savings rate of the current collection.
    pub fn summarize(&self) -> Summary {
        let summary = summarize(self.repo.iter());
        debug!(
            "event=ledger_summarize count={} balance_cents={}",
            self.repo.len(),
            summary.total_balance
        );
        summary
    }

    /// Totals per category.
    pub fn category_report(&self) -> CategoryReport {
        build_category_report(self.repo.iter())
    }

    /// Check that every stored operation has a distinct id.
    pub fn check_integrity(&self) -> RepositoryStats {
        self.repo.stats()
    }

    /// Turnover after adding an amount of `added` and dropping one of `removed`.
    fn turnover_with(&self, added: Cents, removed: Cents) -> Result<Cents, ValidationError> {
        self.turnover
            .checked_sub(removed.saturating_abs())
            .and_then(|rest| rest.checked_add(added.abs()))
            .ok_or_else(turnover_exceeded)
    }
}

fn turnover_exceeded() -> ValidationError {
    ValidationError {
        errors: vec![FieldError::new(
            Field::Amount,
            "amount would push the ledger totals out of range",
        )],
    }
}

fn log_rejected(action: &'static str) -> impl Fn(&ValidationError) {
    move |err: &ValidationError| {
        let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
        warn!(
            "event=operation_{} status=invalid fields={}",
            action,
            fields.join(",")
        );
    }
}
