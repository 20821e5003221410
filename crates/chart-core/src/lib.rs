// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the chart pipeline API.

pub mod axis;
pub mod charts;
pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod interaction;
pub mod layout;
pub mod loader;
pub mod pipeline;
pub mod projection;
pub mod scale;
pub mod scene;
pub mod theme;
pub mod topology;
pub mod transform;
pub mod types;

pub use charts::{ChartView, ChoroplethChart, StackedAreaChart, StackedColumnChart};
pub use color::OrdinalScale;
pub use config::{ChartConfig, PipelineConfig};
pub use error::{ChartError, Result};
pub use interaction::{handle_pointer, InteractionState, PointerEvent, Tooltip};
pub use layout::{ContainerGeometry, LayoutSpec};
pub use loader::{load_table, load_topology, DataSource, RawRecord, RawTable};
pub use pipeline::{build_all, build_chart, BuiltChart};
pub use scale::{BandScale, ContinuousScale, LinearScale, TimeScale};
pub use scene::Scene;
pub use theme::Theme;
pub use topology::Topology;
pub use types::Color;
