// File: crates/chart-core/src/charts/mod.rs
// Summary: Chart instances: transformed data + scales, producing scenes and handling hover.

pub mod choropleth;
pub mod stacked_area;
pub mod stacked_column;

use crate::interaction::{InteractionState, Interactive};
use crate::layout::ContainerGeometry;
use crate::scene::Scene;

pub use choropleth::{ChoroplethChart, ChoroplethOptions};
pub use stacked_area::{StackedAreaChart, StackedAreaOptions};
pub use stacked_column::{StackedColumnChart, StackedColumnOptions};

/// A built chart: immutable data and scales, rendered against an interaction state.
pub trait ChartView: Interactive {
    fn kind(&self) -> &'static str;
    fn geometry(&self) -> &ContainerGeometry;
    /// Draw the chart with hover styling from `state` applied.
    fn scene(&self, state: &InteractionState) -> Scene;
}

/// Rough text box for legend hit tests (no font metrics available here).
pub(crate) fn approx_text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.6
}
