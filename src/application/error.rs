use thiserror::Error;

use crate::domain::{OperationId, ValidationError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid operation: {0}")]
    Validation(#[from] ValidationError),

    #[error("Operation not found: {0}")]
    NotFound(OperationId),
}

impl LedgerError {
    /// The user should fix their input and retry.
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }

    /// The referenced operation is gone; the user should refresh.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound(_))
    }

    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            LedgerError::Validation(err) => Some(err),
            LedgerError::NotFound(_) => None,
        }
    }
}
