// File: crates/chart-core/src/scale.rs
// Summary: Positional scales (linear, time, band) mapping data domains to pixels.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Continuous scale operations shared by linear and time scales.
pub trait ContinuousScale {
    type Domain;
    fn to_px(&self, v: Self::Domain) -> f64;
    fn from_px(&self, px: f64) -> Self::Domain;
}

/// Linear mapping from `[d0, d1]` to `[r0, r1]`. Ranges may be inverted
/// (`[inner_height, 0]`) for y axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (d0, mut d1) = domain;
        if (d1 - d0).abs() < 1e-12 { d1 = d0 + 1.0; }
        Self { domain: (d0, d1), range }
    }
}

impl ContinuousScale for LinearScale {
    type Domain = f64;

    #[inline]
    fn to_px(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    #[inline]
    fn from_px(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span.abs() < 1e-12 { return d0; }
        d0 + (px - r0) / span * (d1 - d0)
    }
}

/// Linear scale over calendar dates (milliseconds since the Unix epoch).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    linear: LinearScale,
}

fn date_ms(d: NaiveDate) -> f64 {
    d.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        Self { linear: LinearScale::new((date_ms(domain.0), date_ms(domain.1)), range) }
    }

    /// Domain extent of `dates`, `None` when empty.
    pub fn extent(dates: impl IntoIterator<Item = NaiveDate>) -> Option<(NaiveDate, NaiveDate)> {
        dates.into_iter().fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }

    pub fn range(&self) -> (f64, f64) { self.linear.range }
}

impl ContinuousScale for TimeScale {
    type Domain = NaiveDate;

    fn to_px(&self, d: NaiveDate) -> f64 {
        self.linear.to_px(date_ms(d))
    }

    /// Date under `px` (time of day truncated).
    fn from_px(&self, px: f64) -> NaiveDate {
        let ms = self.linear.from_px(px).round() as i64;
        chrono::DateTime::from_timestamp_millis(ms)
            .map(|dt| dt.naive_utc())
            .unwrap_or(NaiveDateTime::MIN)
            .date()
    }
}

/// Discrete categories mapped to evenly spaced bands.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    step: f64,
    start: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f64, f64)) -> Self {
        let mut s = Self { domain, range, padding_inner: 0.0, padding_outer: 0.0, align: 0.5, step: 0.0, start: 0.0 };
        s.rescale();
        s
    }

    /// Set inner and outer padding together.
    pub fn padding(mut self, p: f64) -> Self {
        self.padding_inner = p.clamp(0.0, 1.0);
        self.padding_outer = p.max(0.0);
        self.rescale();
        self
    }

    pub fn padding_inner(mut self, p: f64) -> Self {
        self.padding_inner = p.clamp(0.0, 1.0);
        self.rescale();
        self
    }

    pub fn padding_outer(mut self, p: f64) -> Self {
        self.padding_outer = p.max(0.0);
        self.rescale();
        self
    }

    pub fn align(mut self, a: f64) -> Self {
        self.align = a.clamp(0.0, 1.0);
        self.rescale();
        self
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (lo, hi, reverse) = if r1 < r0 { (r1, r0, true) } else { (r0, r1, false) };
        self.step = (hi - lo) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        let start = lo + (hi - lo - self.step * (n - self.padding_inner)) * self.align;
        self.start = if reverse { start + self.step * (n - 1.0) } else { start };
        if reverse { self.step = -self.step; }
    }

    /// Left edge of `key`'s band, `None` for unknown keys.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain.iter().position(|k| k == key).map(|i| self.start + self.step * i as f64)
    }

    pub fn bandwidth(&self) -> f64 { self.step.abs() * (1.0 - self.padding_inner) }
    pub fn step(&self) -> f64 { self.step.abs() }
    pub fn domain(&self) -> &[String] { &self.domain }
}

/// Round `value` up to the next multiple of `step`.
pub fn nice_ceil(value: f64, step: f64) -> f64 {
    if step <= 0.0 { return value; }
    (value / step).ceil() * step
}
