use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

/// Opaque identifier of an operation, assigned by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(Uuid);

impl OperationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(Self)
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Money coming in (positive amount)
    Income,
    /// Money going out (negative amount)
    Expense,
    /// Zero amount, counts towards neither side
    Neutral,
}

impl OperationKind {
    pub fn of(amount_cents: Cents) -> Self {
        match amount_cents {
            a if a > 0 => OperationKind::Income,
            a if a < 0 => OperationKind::Expense,
            _ => OperationKind::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Income => "income",
            OperationKind::Expense => "expense",
            OperationKind::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded monetary event.
/// The `id` never changes; every other field can be replaced by an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub id: OperationId,
    /// Human-readable description (never empty)
    pub label: String,
    /// Signed amount in cents: positive is income, negative is expense
    pub amount_cents: Cents,
    /// Free-form tag such as "income", "expense", "groceries"
    pub category: String,
    /// Calendar date of the operation, serialized as YYYY-MM-DD
    pub date: NaiveDate,
}

impl Operation {
    /// Build an operation from already-validated fields with a fresh id.
    pub fn new(
        label: impl Into<String>,
        amount_cents: Cents,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: OperationId::new(),
            label: label.into(),
            amount_cents,
            category: category.into(),
            date,
        }
    }

    pub fn kind(&self) -> OperationKind {
        OperationKind::of(self.amount_cents)
    }

    pub fn is_income(&self) -> bool {
        self.amount_cents > 0
    }

    pub fn is_expense(&self) -> bool {
        self.amount_cents < 0
    }
}
