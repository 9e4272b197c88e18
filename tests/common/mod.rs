// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use debora::Ledger;
use debora::auth::MemoryAuthenticator;
use debora::cli::Shell;
use debora::domain::{AmountInput, Operation, OperationInput};

/// Helper to build form input with a text amount
pub fn input(label: &str, amount: &str, category: &str, date: &str) -> OperationInput {
    OperationInput::new(label, amount, category, date)
}

/// Helper to build form input with a numeric amount
pub fn numeric_input(label: &str, amount: f64, category: &str, date: &str) -> OperationInput {
    OperationInput::new(label, AmountInput::Number(amount), category, date)
}

/// Labels in ledger order, newest first
pub fn labels(ledger: &Ledger) -> Vec<String> {
    ledger.operations().map(|op| op.label.clone()).collect()
}

/// Full copy of the ledger contents, for before/after comparisons
pub fn snapshot(ledger: &Ledger) -> Vec<Operation> {
    ledger.operations().cloned().collect()
}

/// Test fixture: a ledger with a month of typical activity
pub struct StandardLedger;

impl StandardLedger {
    /// Salary, rent and a couple of small expenses
    pub fn create_month(ledger: &mut Ledger) -> Result<()> {
        ledger.create(&input("Salary", "5000", "income", "2024-03-01"))?;
        ledger.create(&input("Rent", "-1500", "expense", "2024-03-02"))?;
        ledger.create(&input("Groceries", "-230.40", "groceries", "2024-03-09"))?;
        ledger.create(&input("Coffee", "-4.5", "dining", "2024-03-10"))?;
        Ok(())
    }
}

/// A session that already has an account and is signed in
pub fn signed_in_shell(ledger: Ledger) -> Result<Shell<MemoryAuthenticator>> {
    let mut shell = Shell::new(ledger, MemoryAuthenticator::new());
    let mut sink = Vec::new();
    shell.execute(
        "register --email alice@example.com --password secret123",
        &mut sink,
    )?;
    shell.execute(
        "login --email alice@example.com --password secret123",
        &mut sink,
    )?;
    Ok(shell)
}

/// Run one line and return what it printed
pub fn exec(shell: &mut Shell<MemoryAuthenticator>, line: &str) -> Result<String> {
    let mut out = Vec::new();
    shell.execute(line, &mut out)?;
    Ok(String::from_utf8(out)?)
}
