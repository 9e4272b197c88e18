use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Cents, Operation};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub categories: Vec<CategorySummary>,
    /// Sum of the magnitudes of every amount
    pub total: Cents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    /// Signed sum of the amounts in this category
    pub total: Cents,
    pub count: i64,
    pub average: Cents,
    /// Share of the report total, by magnitude
    pub percentage: f64,
}

// Helper struct for aggregation
#[derive(Debug, Clone, Default)]
struct CategoryAggregate {
    count: i64,
    total: Cents,
    magnitude: Cents,
}

/// Group operations by category.
///
/// Categories are compared exactly as stored. The result is sorted by
/// magnitude (largest first), then by category name.
pub fn build_category_report<'a, I>(operations: I) -> CategoryReport
where
    I: IntoIterator<Item = &'a Operation>,
{
    let mut aggregates: HashMap<&str, CategoryAggregate> = HashMap::new();

    for op in operations {
        let entry = aggregates.entry(op.category.as_str()).or_default();
        entry.count += 1;
        entry.total += op.amount_cents;
        entry.magnitude += op.amount_cents.abs();
    }

    let total: Cents = aggregates.values().map(|a| a.magnitude).sum();

    let mut categories: Vec<(CategorySummary, Cents)> = aggregates
        .into_iter()
        .map(|(category, agg)| {
            let percentage = if total > 0 {
                agg.magnitude as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            let summary = CategorySummary {
                category: category.to_string(),
                total: agg.total,
                count: agg.count,
                average: agg.total / agg.count,
                percentage,
            };
            (summary, agg.magnitude)
        })
        .collect();

    categories.sort_by(|(a, a_mag), (b, b_mag)| {
        b_mag.cmp(a_mag).then_with(|| a.category.cmp(&b.category))
    });

    CategoryReport {
        categories: categories.into_iter().map(|(summary, _)| summary).collect(),
        total,
    }
}
