use serde::{Deserialize, Serialize};

use super::{Cents, Operation};

/// Derived metrics over a set of operations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sum of every amount, signed
    pub total_balance: Cents,
    /// Sum of the positive amounts
    pub total_income: Cents,
    /// Magnitude of the sum of the negative amounts
    pub total_expenses: Cents,
    /// Percentage of income left after expenses, one decimal place
    pub savings_rate: f64,
}

/// Compute the summary for a list of operations.
/// Zero amounts only count towards the balance.
pub fn summarize<'a, I>(operations: I) -> Summary
where
    I: IntoIterator<Item = &'a Operation>,
{
    let (total_income, expenses) =
        operations
            .into_iter()
            .fold((0, 0), |(income, expenses), op| match op.amount_cents {
                a if a > 0 => (income + a, expenses),
                a if a < 0 => (income, expenses + a),
                _ => (income, expenses),
            });

    let total_expenses = expenses.abs();

    Summary {
        total_balance: total_income + expenses,
        total_income,
        total_expenses,
        savings_rate: savings_rate(total_income, total_expenses),
    }
}

/// `(income - expenses) / income * 100`, rounded to one decimal place.
///
/// Returns 0 when there is no income. That is a policy, not a limit: a
/// ledger with expenses and no income has no meaningful rate to show.
pub fn savings_rate(total_income: Cents, total_expenses: Cents) -> f64 {
    if total_income == 0 {
        return 0.0;
    }
    let rate = (total_income - total_expenses) as f64 / total_income as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn make_operation(amount: Cents) -> Operation {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Operation::new("test", amount, "test", date)
    }

    #[test]
    fn test_summarize_empty() {
        let operations: Vec<Operation> = Vec::new();
        let summary = summarize(&operations);
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.savings_rate, 0.0);
    }

    #[test]
    fn test_summarize_income_and_expense() {
        let operations = vec![make_operation(500000), make_operation(-150000)];
        let summary = summarize(&operations);

        assert_eq!(summary.total_balance, 350000);
        assert_eq!(summary.total_income, 500000);
        assert_eq!(summary.total_expenses, 150000);
        assert_eq!(summary.savings_rate, 70.0);
    }

    #[test]
    fn test_zero_amount_only_touches_balance() {
        let operations = vec![make_operation(0), make_operation(1000)];
        let summary = summarize(&operations);

        assert_eq!(summary.total_balance, 1000);
        assert_eq!(summary.total_income, 1000);
        assert_eq!(summary.total_expenses, 0);
    }

    #[test]
    fn test_no_income_means_zero_rate() {
        let operations = vec![make_operation(-2500), make_operation(-100)];
        let summary = summarize(&operations);

        assert_eq!(summary.total_expenses, 2600);
        assert_eq!(summary.total_balance, -2600);
        assert_eq!(summary.savings_rate, 0.0);
    }

    #[test]
    fn test_savings_rate_rounding() {
        // 2/3 kept -> 66.666... -> 66.7
        assert_eq!(savings_rate(300, 100), 66.7);
        // spending more than earned gives a negative rate
        assert_eq!(savings_rate(1000, 1500), -50.0);
        assert_eq!(savings_rate(1000, 1000), 0.0);
        assert_eq!(savings_rate(0, 5000), 0.0);
    }

    #[test]
    fn test_balance_is_income_minus_expenses() {
        let amounts = [12345, -999, 0, -1, 77, -50000, 250000];
        let operations: Vec<_> = amounts.iter().copied().map(make_operation).collect();
        let summary = summarize(&operations);

        assert_eq!(
            summary.total_balance,
            summary.total_income - summary.total_expenses
        );
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = summarize(&[make_operation(500000), make_operation(-150000)]);
        let json = serde_json::to_value(summary).unwrap();

        assert_eq!(json["totalBalance"], 350000);
        assert_eq!(json["totalIncome"], 500000);
        assert_eq!(json["totalExpenses"], 150000);
        assert_eq!(json["savingsRate"], 70.0);
    }
}
