// File: crates/chart-core/src/transform/timeseries.rs
// Summary: Time-series records (year -> date, numeric coercion) and their stacked layers.

use chrono::{Datelike, NaiveDate};

use crate::error::{ChartError, Result};
use crate::loader::RawTable;
use crate::transform::parse_number;
use crate::transform::stack::{stack, StackLayer};

#[derive(Clone, Debug, PartialEq)]
pub struct TimeRecord {
    /// January 1st of the record's year.
    pub date: NaiveDate,
    /// `(column, value)` for every non-date column, in file order.
    pub values: Vec<(String, f64)>,
}

impl TimeRecord {
    pub fn year(&self) -> i32 { self.date.year() }

    /// Value of `column`; absent columns read as 0.
    pub fn value(&self, column: &str) -> f64 {
        self.values.iter().find(|(c, _)| c == column).map(|(_, v)| *v).unwrap_or(0.0)
    }

    pub fn total(&self, keys: &[String]) -> f64 {
        keys.iter().map(|k| self.value(k)).sum()
    }
}

/// Parse a year cell into January 1st of that year.
pub fn parse_year(row: usize, column: &str, raw: &str) -> Result<NaiveDate> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
        .ok_or_else(|| ChartError::ParseNumber { row, column: column.to_string(), value: raw.to_string() })
}

/// Parse every row: `date_column` becomes a date, all other columns numbers.
pub fn time_records(table: &RawTable, date_column: &str) -> Result<Vec<TimeRecord>> {
    if !table.has_column(date_column) {
        return Err(ChartError::MissingColumn(date_column.to_string()));
    }
    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let date = parse_year(i, date_column, row.require(date_column)?)?;
            let values = table
                .columns
                .iter()
                .filter(|c| c.as_str() != date_column)
                .map(|c| Ok((c.clone(), parse_number(i, c, row.require(c)?)?)))
                .collect::<Result<Vec<_>>>()?;
            Ok(TimeRecord { date, values })
        })
        .collect()
}

/// Stack time records over `keys` in the given order.
pub fn stack_time_records(records: &[TimeRecord], keys: &[String]) -> Result<Vec<StackLayer>> {
    if let Some(first) = records.first() {
        if let Some(missing) = keys.iter().find(|k| !first.values.iter().any(|(c, _)| c == *k)) {
            return Err(ChartError::MissingColumn(missing.clone()));
        }
    }
    Ok(stack(records, keys, |r, k| r.value(&keys[k])))
}
