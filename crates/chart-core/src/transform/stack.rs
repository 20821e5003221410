// File: crates/chart-core/src/transform/stack.rs
// Summary: Stacking transform: per-key cumulative [baseline, top] pairs in declared key order.

/// One record's slice of a layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackPoint {
    pub baseline: f64,
    pub top: f64,
    /// Index of the source record.
    pub record: usize,
}

impl StackPoint {
    pub fn value(&self) -> f64 { self.top - self.baseline }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StackLayer {
    pub key: String,
    /// Position of `key` in the declared order.
    pub index: usize,
    pub points: Vec<StackPoint>,
}

impl StackLayer {
    pub fn last(&self) -> Option<&StackPoint> { self.points.last() }
}

/// Stack `records` over `keys`. `value(record, key_index)` supplies each cell.
///
/// Layer 0 starts at 0; layer i starts where layer i-1 ends, per record.
pub fn stack<R>(records: &[R], keys: &[String], value: impl Fn(&R, usize) -> f64) -> Vec<StackLayer> {
    let mut running = vec![0.0f64; records.len()];
    keys.iter()
        .enumerate()
        .map(|(k, key)| {
            let points = records
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    let baseline = running[i];
                    let top = baseline + value(r, k);
                    running[i] = top;
                    StackPoint { baseline, top, record: i }
                })
                .collect();
            StackLayer { key: key.clone(), index: k, points }
        })
        .collect()
}

/// Largest top across all layers (0 when empty).
pub fn max_top(layers: &[StackLayer]) -> f64 {
    layers
        .iter()
        .flat_map(|l| l.points.iter().map(|p| p.top))
        .fold(0.0, f64::max)
}
