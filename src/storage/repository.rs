use std::collections::VecDeque;

use crate::domain::{Operation, OperationId};

/// Statistics about the stored collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryStats {
    pub operation_count: usize,
    pub duplicate_ids: usize,
}

/// In-memory store for operations, newest first.
///
/// The repository does no validation; it only keeps order and identity.
/// Every method either applies fully or leaves the collection untouched.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    operations: VecDeque<Operation>,
}

impl Repository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `operations` in the given order.
    pub fn with_operations(operations: Vec<Operation>) -> Self {
        Self {
            operations: operations.into(),
        }
    }

    /// Insert an operation at the head of the collection.
    pub fn prepend(&mut self, operation: Operation) {
        self.operations.push_front(operation);
    }

    /// Get an operation by ID.
    pub fn get(&self, id: OperationId) -> Option<&Operation> {
        self.operations.iter().find(|op| op.id == id)
    }

    /// Get a mutable reference to an operation by ID. Its position is kept.
    pub fn get_mut(&mut self, id: OperationId) -> Option<&mut Operation> {
        self.operations.iter_mut().find(|op| op.id == id)
    }

    /// Position of an operation, 0 being the newest.
    pub fn position(&self, id: OperationId) -> Option<usize> {
        self.operations.iter().position(|op| op.id == id)
    }

    /// Remove an operation, keeping the relative order of the others.
    pub fn remove(&mut self, id: OperationId) -> Option<Operation> {
        let index = self.position(id)?;
        self.operations.remove(index)
    }

    /// Iterate operations, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// List operations with the given category (case-insensitive).
    pub fn list_by_category(&self, category: &str) -> Vec<&Operation> {
        self.operations
            .iter()
            .filter(|op| op.category.eq_ignore_ascii_case(category))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Collect statistics used to verify the identity invariant.
    pub fn stats(&self) -> RepositoryStats {
        let mut seen = std::collections::HashSet::new();
        let duplicate_ids = self
            .operations
            .iter()
            .filter(|op| !seen.insert(op.id))
            .count();

        RepositoryStats {
            operation_count: self.operations.len(),
            duplicate_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn make_operation(label: &str, amount: i64) -> Operation {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Operation::new(label, amount, "test", date)
    }

    fn labels(repo: &Repository) -> Vec<&str> {
        repo.iter().map(|op| op.label.as_str()).collect()
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut repo = Repository::new();
        repo.prepend(make_operation("a", 1));
        repo.prepend(make_operation("b", 2));
        repo.prepend(make_operation("c", 3));

        assert_eq!(labels(&repo), vec!["c", "b", "a"]);
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let a = make_operation("a", 1);
        let b = make_operation("b", 2);
        let c = make_operation("c", 3);
        let b_id = b.id;
        let mut repo = Repository::with_operations(vec![a, b, c]);

        let removed = repo.remove(b_id).unwrap();

        assert_eq!(removed.label, "b");
        assert_eq!(labels(&repo), vec!["a", "c"]);
        assert!(repo.get(b_id).is_none());
    }

    #[test]
    fn test_remove_missing_leaves_collection() {
        let mut repo = Repository::with_operations(vec![make_operation("a", 1)]);
        assert!(repo.remove(OperationId::new()).is_none());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_get_mut_keeps_position() {
        let a = make_operation("a", 1);
        let b = make_operation("b", 2);
        let b_id = b.id;
        let mut repo = Repository::with_operations(vec![a, b]);

        repo.get_mut(b_id).unwrap().label = "renamed".into();

        assert_eq!(repo.position(b_id), Some(1));
        assert_eq!(labels(&repo), vec!["a", "renamed"]);
    }

    #[test]
    fn test_list_by_category() {
        let mut repo = Repository::new();
        let mut groceries = make_operation("Market", -3000);
        groceries.category = "Groceries".into();
        repo.prepend(groceries);
        repo.prepend(make_operation("Other", 100));

        let found = repo.list_by_category("groceries");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label, "Market");
    }

    #[test]
    fn test_stats_detects_duplicates() {
        let a = make_operation("a", 1);
        let copy = a.clone();
        let repo = Repository::with_operations(vec![a, copy, make_operation("b", 2)]);

        let stats = repo.stats();
        assert_eq!(stats.operation_count, 3);
        assert_eq!(stats.duplicate_ids, 1);
    }
}
