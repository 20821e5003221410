// File: crates/chart-core/src/transform/buckets.rs
// Summary: Threshold bucketing of region counts and the region/feature join.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ChartError, Result};
use crate::loader::RawTable;
use crate::topology::Feature;
use crate::types::Color;

/// Inclusive count range with its legend label and fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub lower: u64,
    /// `None` means unbounded above.
    #[serde(default)]
    pub upper: Option<u64>,
    pub color: Color,
}

impl Bucket {
    pub fn new(label: impl Into<String>, lower: u64, upper: Option<u64>, color: Color) -> Self {
        Self { label: label.into(), lower, upper, color }
    }

    pub fn contains(&self, count: u64) -> bool {
        count >= self.lower && self.upper.map_or(true, |u| count <= u)
    }
}

/// Ordered bucket list; the first bucket containing a count wins.
/// Counts covered by no bucket are left unbucketed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    pub buckets: Vec<Bucket>,
}

impl Default for ThresholdTable {
    /// Grid-project legend, in legend order. 81..=288 is intentionally uncovered.
    fn default() -> Self {
        Self {
            buckets: vec![
                Bucket::new("≥ 289", 289, None, Color::rgb(0x4f, 0x9b, 0x52)),
                Bucket::new("20-80", 20, Some(80), Color::rgb(0x94, 0xce, 0x89)),
                Bucket::new("5-19", 5, Some(19), Color::rgb(0x8a, 0xb4, 0xe0)),
                Bucket::new("1-4", 1, Some(4), Color::rgb(0xc7, 0x7c, 0x7c)),
                Bucket::new("0", 0, Some(0), Color::rgb(0xaa, 0x49, 0x49)),
            ],
        }
    }
}

impl ThresholdTable {
    /// Index of the first bucket containing `count`.
    pub fn assign(&self, count: u64) -> Option<usize> {
        self.buckets.iter().position(|b| b.contains(count))
    }

    pub fn bucket(&self, count: u64) -> Option<&Bucket> {
        self.assign(count).map(|i| &self.buckets[i])
    }

    /// Contiguous count ranges covered by no bucket, below the highest lower bound.
    pub fn gaps(&self) -> Vec<(u64, u64)> {
        let mut ranges = self
            .buckets
            .iter()
            .map(|b| (b.lower, b.upper.unwrap_or(u64::MAX)))
            .collect::<Vec<_>>();
        ranges.sort_unstable();
        let mut gaps = Vec::new();
        let mut next = 0u64;
        for (lo, hi) in ranges {
            if lo > next {
                gaps.push((next, lo - 1));
            }
            if hi == u64::MAX {
                return gaps;
            }
            next = next.max(hi + 1);
        }
        gaps
    }
}

/// One row of the region table after bucketing.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionDatum {
    pub region: String,
    /// Count cell as read from the file.
    pub raw: String,
    /// `None` when the cell has no leading integer or is negative.
    pub count: Option<u64>,
    pub bucket: Option<usize>,
}

/// A feature joined with its datum.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinedRegion {
    pub feature: Feature,
    /// Count cell text; `None` for regions absent from the table.
    pub raw: Option<String>,
    pub count: Option<u64>,
    pub bucket: Option<usize>,
    pub fill: Color,
}

impl JoinedRegion {
    pub fn name(&self) -> &str {
        self.feature.name().or(self.feature.id.as_deref()).unwrap_or("")
    }
}

/// Leading integer of `raw` (`"4.0" -> 4`, `"12 units" -> 12`).
/// Blank, non-numeric and negative cells read as `None`.
pub fn parse_count(raw: &str) -> Option<u64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    let n = digits[..end].parse::<u64>().ok()?;
    if negative && n > 0 {
        return None;
    }
    Some(n)
}

/// Bucket every row of `table` keyed by `region_column`.
/// Unreadable or uncovered counts leave the row unbucketed; only missing columns are errors.
pub fn bucket_regions(
    table: &RawTable,
    region_column: &str,
    count_column: &str,
    thresholds: &ThresholdTable,
) -> Result<Vec<RegionDatum>> {
    for col in [region_column, count_column] {
        if !table.has_column(col) {
            return Err(ChartError::MissingColumn(col.to_string()));
        }
    }
    let mut unbucketed = Vec::new();
    let data = table
        .rows
        .iter()
        .map(|row| {
            let raw = row.require(count_column)?.to_string();
            let region = row.require(region_column)?.to_string();
            let count = parse_count(&raw);
            let bucket = count.and_then(|c| thresholds.assign(c));
            if bucket.is_none() {
                unbucketed.push(format!("{region}={raw:?}"));
            }
            Ok(RegionDatum { region, raw, count, bucket })
        })
        .collect::<Result<Vec<_>>>()?;
    if !unbucketed.is_empty() {
        warn!(regions = ?unbucketed, "counts outside every threshold bucket; using default fill");
    }
    Ok(data)
}

/// Attach bucket colors to features by id. Unmatched features get `default_fill`.
pub fn join_regions(features: Vec<Feature>, data: &[RegionDatum], thresholds: &ThresholdTable, default_fill: Color) -> Vec<JoinedRegion> {
    let by_id: HashMap<&str, &RegionDatum> = data.iter().map(|d| (d.region.as_str(), d)).collect();
    features
        .into_iter()
        .map(|feature| {
            let datum = feature.id.as_deref().and_then(|id| by_id.get(id));
            let raw = datum.map(|d| d.raw.clone());
            let count = datum.and_then(|d| d.count);
            let bucket = datum.and_then(|d| d.bucket);
            let fill = bucket.map(|b| thresholds.buckets[b].color).unwrap_or(default_fill);
            JoinedRegion { feature, raw, count, bucket, fill }
        })
        .collect()
}
