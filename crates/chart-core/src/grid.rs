// File: crates/chart-core/src/grid.rs
// Summary: Simple grid/tick layout helpers.

use chrono::NaiveDate;

/// `start, start+step, ...` strictly below `stop`.
pub fn range_step(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || stop <= start { return Vec::new(); }
    let n = ((stop - start) / step).ceil() as usize;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// January 1st of every `every`-th year from `first` through `last`.
pub fn year_ticks(first: i32, last: i32, every: i32) -> Vec<NaiveDate> {
    let every = every.max(1);
    (first..=last)
        .step_by(every as usize)
        .filter_map(|y| NaiveDate::from_ymd_opt(y, 1, 1))
        .collect()
}

/// Round tick step for `count` ticks over `[start, stop]` (1, 2 or 5 times a power of ten).
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if raw <= 0.0 || !raw.is_finite() { return 0.0; }
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    power * factor
}

/// Approximately `count` round ticks within `[start, stop]`.
/// Sub-unit steps divide by the inverse step so `0.3` stays `0.3`.
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let step = tick_step(start, stop, count);
    if step == 0.0 { return vec![start]; }
    if step < 1.0 {
        let inv = (1.0 / step).round();
        let first = (start * inv).ceil() as i64;
        let last = (stop * inv).floor() as i64;
        return (first..=last).map(|i| i as f64 / inv).collect();
    }
    let first = (start / step).ceil() as i64;
    let last = (stop / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}
