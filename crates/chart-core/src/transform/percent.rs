// File: crates/chart-core/src/transform/percent.rs
// Summary: Percentage-of-total transform for single-row stacked columns.

use crate::error::{ChartError, Result};
use crate::loader::RawRecord;
use crate::transform::parse_number;

#[derive(Clone, Debug, PartialEq)]
pub struct PercentEntry {
    pub category: String,
    /// Share of the row total, 0..=100.
    pub percent: f64,
    /// Value as read from the file.
    pub original: f64,
}

/// One row rescaled so its categories sum to 100.
#[derive(Clone, Debug, PartialEq)]
pub struct PercentRow {
    pub label: String,
    pub total: f64,
    pub entries: Vec<PercentEntry>,
}

impl PercentRow {
    pub fn get(&self, category: &str) -> Option<&PercentEntry> {
        self.entries.iter().find(|e| e.category == category)
    }

    /// Percent values in category order, ready for stacking.
    pub fn percents(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.percent).collect()
    }
}

/// Replace each category value with its share of the row total.
/// `label_column` names the row label (e.g. `Location`); missing label is allowed.
pub fn percentage_of_total(
    row: &RawRecord,
    label_column: &str,
    categories: &[String],
) -> Result<PercentRow> {
    if categories.is_empty() {
        return Err(ChartError::EmptyData("no category columns".into()));
    }
    let values = categories
        .iter()
        .map(|c| parse_number(0, c, row.require(c)?))
        .collect::<Result<Vec<f64>>>()?;
    let total: f64 = values.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(ChartError::NonPositiveTotal(total));
    }
    let entries = categories
        .iter()
        .zip(values)
        .map(|(c, v)| PercentEntry { category: c.clone(), percent: v / total * 100.0, original: v })
        .collect();
    Ok(PercentRow {
        label: row.get(label_column).unwrap_or_default().to_string(),
        total,
        entries,
    })
}
