use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::Ledger;
use crate::domain::{DATE_FORMAT, Operation, Summary, format_cents};

/// Ledger snapshot for a full JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub operations: Vec<Operation>,
    pub summary: Summary,
}

/// Exporter for writing ledger data in various formats
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Export operations to CSV format, newest first
    pub fn export_operations_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "label", "amount", "category", "date"])?;

        let mut count = 0;
        for op in self.ledger.operations() {
            csv_writer.write_record(&[
                op.id.to_string(),
                op.label.clone(),
                format_cents(op.amount_cents),
                op.category.clone(),
                op.date.format(DATE_FORMAT).to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export operations to JSON format
    pub fn export_operations_json<W: Write>(&self, writer: W) -> Result<usize> {
        let operations: Vec<&Operation> = self.ledger.operations().collect();
        serde_json::to_writer_pretty(writer, &operations)?;
        Ok(operations.len())
    }

    /// Export the summary metrics to JSON format
    pub fn export_summary_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.ledger.summarize())?;
        Ok(())
    }

    /// Export operations and summary together
    pub fn export_full_json<W: Write>(&self, writer: W) -> Result<usize> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            operations: self.ledger.operations().cloned().collect(),
            summary: self.ledger.summarize(),
        };
        serde_json::to_writer_pretty(writer, &snapshot)?;
        Ok(snapshot.operations.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OperationInput;

    #[test]
    fn test_operations_csv() {
        let mut ledger = Ledger::new();
        ledger
            .create(&OperationInput::new(
                "Coffee, large",
                "-4.5",
                "expense",
                "2024-03-20",
            ))
            .unwrap();

        let mut out = Vec::new();
        let count = Exporter::new(&ledger)
            .export_operations_csv(&mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(count, 1);
        assert_eq!(lines[0], "id,label,amount,category,date");
        assert!(lines[1].ends_with(",\"Coffee, large\",-4.50,expense,2024-03-20"));
    }

    #[test]
    fn test_full_json_snapshot() {
        let ledger = Ledger::with_sample_data();

        let mut out = Vec::new();
        let count = Exporter::new(&ledger).export_full_json(&mut out).unwrap();
        let snapshot: LedgerSnapshot = serde_json::from_slice(&out).unwrap();

        assert_eq!(count, 2);
        assert_eq!(snapshot.operations[0].label, "Salary");
        assert_eq!(snapshot.summary.total_balance, 350000);
        assert_eq!(snapshot.summary.savings_rate, 70.0);
    }
}
