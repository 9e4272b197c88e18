//! Validation boundary between raw form input and [`Operation`] fields.
//!
//! Everything the presentation layer sends arrives here first. Nothing is
//! stored unless every field passes; all failing fields are reported at once.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Cents, Operation, ParseCentsError, cents_from_units, format_cents, parse_cents};

/// Date format accepted for operation dates (ISO-8601 calendar date).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Amount as entered by the user: text from a form field, or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    pub fn to_cents(&self) -> Result<Cents, ParseCentsError> {
        match self {
            AmountInput::Number(value) => cents_from_units(*value),
            AmountInput::Text(text) => parse_cents(text),
        }
    }
}

impl From<&str> for AmountInput {
    fn from(s: &str) -> Self {
        AmountInput::Text(s.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(s: String) -> Self {
        AmountInput::Text(s)
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

/// Candidate record for `create` and `update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationInput {
    pub label: String,
    pub amount: AmountInput,
    pub category: String,
    pub date: String,
}

impl OperationInput {
    pub fn new(
        label: impl Into<String>,
        amount: impl Into<AmountInput>,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
            category: category.into(),
            date: date.into(),
        }
    }

    /// Pre-fill an input from an existing operation, the way an edit form does.
    pub fn from_operation(operation: &Operation) -> Self {
        Self {
            label: operation.label.clone(),
            amount: AmountInput::Text(format_cents(operation.amount_cents)),
            category: operation.category.clone(),
            date: operation.date.format(DATE_FORMAT).to_string(),
        }
    }

    /// Check and coerce every field.
    pub fn validate(&self) -> Result<ValidOperation, ValidationError> {
        let mut errors = Vec::new();

        let label = self.label.trim();
        if label.is_empty() {
            errors.push(FieldError::new(Field::Label, "label is required"));
        }

        let category = self.category.trim();
        if category.is_empty() {
            errors.push(FieldError::new(Field::Category, "category is required"));
        }

        let amount_cents = match self.amount.to_cents() {
            Ok(cents) => Some(cents),
            Err(err) => {
                errors.push(FieldError::new(Field::Amount, err.to_string()));
                None
            }
        };

        let date = match parse_date(&self.date) {
            Ok(date) => Some(date),
            Err(message) => {
                errors.push(FieldError::new(Field::Date, message));
                None
            }
        };

        match (amount_cents, date) {
            (Some(amount_cents), Some(date)) if errors.is_empty() => Ok(ValidOperation {
                label: label.to_string(),
                amount_cents,
                category: category.to_string(),
                date,
            }),
            _ => Err(ValidationError { errors }),
        }
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("date is required".to_string());
    }
    let invalid = || format!("invalid date '{}', use YYYY-MM-DD", input);
    if !is_iso_date_shape(input) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())
}

/// `dddd-dd-dd`: zero-padded, no sign.
fn is_iso_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Fields of an operation that passed validation. Carries no id: the ledger
/// decides whether this becomes a new operation or replaces an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidOperation {
    pub label: String,
    pub amount_cents: Cents,
    pub category: String,
    pub date: NaiveDate,
}

impl ValidOperation {
    pub fn into_operation(self) -> Operation {
        Operation::new(self.label, self.amount_cents, self.category, self.date)
    }

    /// Replace every field of `operation` except its id.
    pub fn apply_to(self, operation: &mut Operation) {
        operation.label = self.label;
        operation.amount_cents = self.amount_cents;
        operation.category = self.category;
        operation.date = self.date;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Label,
    Amount,
    Category,
    Date,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Label => "label",
            Field::Amount => "amount",
            Field::Category => "category",
            Field::Date => "date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// One or more fields failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn has_field(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
