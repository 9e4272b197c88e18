use chrono::NaiveDate;

use super::Operation;

/// Operations a fresh dashboard starts with, newest first.
pub fn sample_operations() -> Vec<Operation> {
    vec![
        Operation::new("Salary", 500000, "income", ymd(2024, 3, 15)),
        Operation::new("Rent", -150000, "expense", ymd(2024, 3, 1)),
    ]
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // Constant dates, all valid.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
