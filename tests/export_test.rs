mod common;

use std::fs;

use anyhow::Result;
use common::{StandardLedger, exec, signed_in_shell};
use debora::io::{Exporter, LedgerSnapshot};
use debora::{Ledger, Operation, Summary};
use tempfile::TempDir;

#[test]
fn test_export_operations_csv_to_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("operations.csv");
    let mut ledger = Ledger::new();
    StandardLedger::create_month(&mut ledger)?;

    let count = Exporter::new(&ledger).export_operations_csv(fs::File::create(&path)?)?;

    assert_eq!(count, 4);
    let mut reader = csv::Reader::from_path(&path)?;
    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    assert_eq!(rows.len(), 4);
    // Newest first
    assert_eq!(&rows[0][1], "Coffee");
    assert_eq!(&rows[0][2], "-4.50");
    assert_eq!(&rows[3][1], "Salary");
    assert_eq!(&rows[3][2], "5000.00");
    assert_eq!(&rows[3][4], "2024-03-01");
    Ok(())
}

#[test]
fn test_export_operations_json() -> Result<()> {
    let ledger = Ledger::with_sample_data();

    let mut out = Vec::new();
    let count = Exporter::new(&ledger).export_operations_json(&mut out)?;
    let operations: Vec<Operation> = serde_json::from_slice(&out)?;

    assert_eq!(count, 2);
    let original: Vec<Operation> = ledger.operations().cloned().collect();
    assert_eq!(operations, original);
    Ok(())
}

#[test]
fn test_export_summary_json() -> Result<()> {
    let ledger = Ledger::with_sample_data();

    let mut out = Vec::new();
    Exporter::new(&ledger).export_summary_json(&mut out)?;
    let value: serde_json::Value = serde_json::from_slice(&out)?;
    let summary: Summary = serde_json::from_value(value.clone())?;

    assert_eq!(value["totalBalance"], 350000);
    assert_eq!(value["savingsRate"], 70.0);
    assert_eq!(summary, ledger.summarize());
    Ok(())
}

#[test]
fn test_session_export_to_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("full.json");
    let mut shell = signed_in_shell(Ledger::with_sample_data())?;

    let out = exec(
        &mut shell,
        &format!("export full --output '{}'", path.display()),
    )?;

    assert!(out.starts_with("Exported 2 record(s)"));
    let snapshot: LedgerSnapshot = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(snapshot.operations.len(), 2);
    assert_eq!(snapshot.summary.total_income, 500000);
    Ok(())
}
