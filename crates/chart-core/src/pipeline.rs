// File: crates/chart-core/src/pipeline.rs
// Summary: Per-chart pipeline: layout -> load -> transform/scale -> chart instance.

use tracing::{debug, error, info};

use crate::charts::{ChartView, ChoroplethChart, StackedAreaChart, StackedColumnChart};
use crate::config::{ChartConfig, PipelineConfig};
use crate::error::Result;
use crate::layout::ContainerGeometry;
use crate::loader::{load_table, load_topology};

/// A chart that made it through every stage.
pub struct BuiltChart {
    pub id: String,
    pub view: Box<dyn ChartView + Send + Sync>,
}

/// Run one chart's pipeline. The layout is validated before any I/O.
pub async fn build_chart(config: &ChartConfig, container_width: f64) -> Result<BuiltChart> {
    let id = config.id().to_string();
    let view: Box<dyn ChartView + Send + Sync> = match config {
        ChartConfig::StackedColumn(c) => {
            let geometry = ContainerGeometry::resolve(container_width, &c.layout)?;
            let table = load_table(&c.data).await?;
            Box::new(StackedColumnChart::build(geometry, &table, &c.options)?)
        }
        ChartConfig::StackedArea(c) => {
            let geometry = ContainerGeometry::resolve(container_width, &c.layout)?;
            let table = load_table(&c.data).await?;
            Box::new(StackedAreaChart::build(geometry, &table, &c.options)?)
        }
        ChartConfig::Choropleth(c) => {
            let geometry = ContainerGeometry::resolve(container_width, &c.layout)?;
            // Both loads must succeed before anything is drawn.
            let (topology, table) = tokio::try_join!(load_topology(&c.topology), load_table(&c.data))?;
            Box::new(ChoroplethChart::build(geometry, &topology, &table, &c.options)?)
        }
    };
    debug!(%id, kind = view.kind(), width = container_width, "chart built");
    Ok(BuiltChart { id, view })
}

/// Run every configured chart independently; one failure does not stop the others.
pub async fn build_all(config: &PipelineConfig) -> Vec<(String, Result<BuiltChart>)> {
    let mut out = Vec::with_capacity(config.charts.len());
    for chart in &config.charts {
        let res = build_chart(chart, config.width_for(chart)).await;
        match &res {
            Ok(_) => info!(id = chart.id(), "chart ready"),
            Err(e) => error!(id = chart.id(), error = %e, "chart pipeline failed"),
        }
        out.push((chart.id().to_string(), res));
    }
    out
}
