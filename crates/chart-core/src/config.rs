// File: crates/chart-core/src/config.rs
// Summary: Pipeline configuration (TOML or JSON), defaulting to the three built-in charts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::charts::{ChoroplethOptions, StackedAreaOptions, StackedColumnOptions};
use crate::error::{ChartError, Result};
use crate::layout::LayoutSpec;
use crate::loader::DataSource;
use crate::types::DEFAULT_CONTAINER_WIDTH;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Measured container width shared by every chart unless overridden.
    pub container_width: f64,
    pub charts: Vec<ChartConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            container_width: DEFAULT_CONTAINER_WIDTH,
            charts: vec![
                ChartConfig::StackedColumn(StackedColumnConfig::default()),
                ChartConfig::Choropleth(ChoroplethConfig::default()),
                ChartConfig::StackedArea(StackedAreaConfig::default()),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartConfig {
    StackedColumn(StackedColumnConfig),
    StackedArea(StackedAreaConfig),
    Choropleth(ChoroplethConfig),
}

impl ChartConfig {
    pub fn id(&self) -> &str {
        match self {
            ChartConfig::StackedColumn(c) => &c.id,
            ChartConfig::StackedArea(c) => &c.id,
            ChartConfig::Choropleth(c) => &c.id,
        }
    }

    pub fn container_width(&self) -> Option<f64> {
        match self {
            ChartConfig::StackedColumn(c) => c.container_width,
            ChartConfig::StackedArea(c) => c.container_width,
            ChartConfig::Choropleth(c) => c.container_width,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedColumnConfig {
    pub id: String,
    pub container_width: Option<f64>,
    pub layout: LayoutSpec,
    pub data: DataSource,
    #[serde(flatten)]
    pub options: StackedColumnOptions,
}

impl Default for StackedColumnConfig {
    fn default() -> Self {
        Self {
            id: "carbon-footprint-stacked-column-chart".into(),
            container_width: None,
            layout: LayoutSpec::STACKED_COLUMN,
            data: DataSource::path("./data/carbon-footprint/carbon-footprint1.csv"),
            options: StackedColumnOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedAreaConfig {
    pub id: String,
    pub container_width: Option<f64>,
    pub layout: LayoutSpec,
    pub data: DataSource,
    #[serde(flatten)]
    pub options: StackedAreaOptions,
}

impl Default for StackedAreaConfig {
    fn default() -> Self {
        Self {
            id: "stacked-area-chart3".into(),
            container_width: None,
            layout: LayoutSpec::STACKED_AREA,
            data: DataSource::path("./data/graph-15-data.csv"),
            options: StackedAreaOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoroplethConfig {
    pub id: String,
    pub container_width: Option<f64>,
    pub layout: LayoutSpec,
    pub topology: DataSource,
    pub data: DataSource,
    #[serde(flatten)]
    pub options: ChoroplethOptions,
}

impl Default for ChoroplethConfig {
    fn default() -> Self {
        Self {
            id: "grid-energy-interactive-map".into(),
            container_width: None,
            layout: LayoutSpec::CHOROPLETH,
            topology: DataSource::path("./data/energy/grid-energy/states.topo.json"),
            data: DataSource::path("./data/energy/grid-energy/grid-energy1.csv"),
            options: ChoroplethOptions::default(),
        }
    }
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            other => Err(ChartError::Config(format!("unsupported config extension: {other:?}"))),
        }
    }
}

impl PipelineConfig {
    pub fn parse_str(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| ChartError::Config(format!("JSON parse error: {e}"))),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| ChartError::Config(format!("TOML parse error: {e}"))),
        }
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ChartError::Config(format!("reading {}: {e}", path.display())))?;
        Self::parse_str(&content, format)
    }

    /// Use `width` for every chart, dropping per-chart overrides.
    pub fn override_width(&mut self, width: f64) {
        self.container_width = width;
        for chart in &mut self.charts {
            let slot = match chart {
                ChartConfig::StackedColumn(c) => &mut c.container_width,
                ChartConfig::StackedArea(c) => &mut c.container_width,
                ChartConfig::Choropleth(c) => &mut c.container_width,
            };
            *slot = None;
        }
    }

    /// Width for `chart`, falling back to the pipeline default.
    pub fn width_for(&self, chart: &ChartConfig) -> f64 {
        chart.container_width().unwrap_or(self.container_width)
    }
}
