// Application layer - the ledger and what it reports.
// Validation lives in the domain (`OperationInput::validate`); storage order
// and identity live in `storage::Repository`.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
