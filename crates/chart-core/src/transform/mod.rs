// File: crates/chart-core/src/transform/mod.rs
// Summary: Raw records -> chart-ready shapes (percentages, stacks, buckets).

pub mod buckets;
pub mod percent;
pub mod stack;
pub mod timeseries;

use crate::error::{ChartError, Result};

/// Coerce a cell to a number; an empty cell reads as 0.
pub fn parse_number(row: usize, column: &str, raw: &str) -> Result<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ChartError::ParseNumber { row, column: column.to_string(), value: raw.to_string() })
}
