// File: crates/demo/src/main.rs
// Summary: CLI that runs the chart pipelines, writes SVG (and optionally PNG) output, and reports hover tooltips.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chart_core::geometry::Point;
use chart_core::interaction::handle_pointer;
use chart_core::{build_all, build_chart, BuiltChart, InteractionState, PipelineConfig, PointerEvent, Tooltip};
use chart_render_skia::{render_to_png, RenderOptions};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "chart-demo")]
#[command(about = "Render stacked column, choropleth and stacked area charts from static data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (.toml or .json); built-in charts when omitted
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Container width in pixels for every chart, replacing any widths in the config
    #[arg(short, long, global = true)]
    width: Option<f64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every configured chart and write one SVG per chart
    Render {
        /// Output directory
        #[arg(short, long, default_value = "target/out")]
        out: PathBuf,
        /// Also rasterize each chart to PNG
        #[arg(long)]
        png: bool,
    },
    /// Hover one chart at a container-space position and print the tooltip
    Hover {
        /// Chart id from the config
        id: String,
        x: f64,
        y: f64,
        /// Write the highlighted chart to this SVG file
        #[arg(long, value_name = "FILE")]
        svg: Option<PathBuf>,
    },
    /// Print the effective configuration as JSON
    PrintConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .await
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(w) = cli.width {
        config.override_width(w);
    }

    match cli.command {
        Commands::Render { out, png } => render_all(&config, &out, png).await,
        Commands::Hover { id, x, y, svg } => hover(&config, &id, Point::new(x, y), svg.as_deref()).await,
        Commands::PrintConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

async fn render_all(config: &PipelineConfig, out: &Path, png: bool) -> Result<()> {
    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    let mut failed = 0usize;
    for (id, res) in build_all(config).await {
        let chart = match res {
            Ok(chart) => chart,
            Err(_) => {
                // Already logged by the pipeline.
                failed += 1;
                continue;
            }
        };
        let scene = chart.view.scene(&InteractionState::default());
        let svg_path = out.join(format!("{id}.svg"));
        std::fs::write(&svg_path, scene.to_svg()).with_context(|| format!("writing {}", svg_path.display()))?;
        info!(path = %svg_path.display(), "wrote svg");
        if png {
            let png_path = svg_path.with_extension("png");
            render_to_png(&scene, &RenderOptions::default(), &png_path)?;
            info!(path = %png_path.display(), "wrote png");
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} charts failed", config.charts.len());
    }
    Ok(())
}

async fn hover(config: &PipelineConfig, id: &str, at: Point, svg: Option<&Path>) -> Result<()> {
    let chart_cfg = config
        .charts
        .iter()
        .find(|c| c.id() == id)
        .with_context(|| format!("no chart with id '{id}'"))?;
    let BuiltChart { view, .. } = build_chart(chart_cfg, config.width_for(chart_cfg))
        .await
        .with_context(|| format!("building chart '{id}'"))?;

    let mut state = InteractionState::default();
    let p = view.geometry().to_plot(at);
    handle_pointer(view.as_ref(), &mut state, PointerEvent::Enter(p));
    match &state.tooltip {
        Some(t) => print_tooltip(t),
        None => warn!(x = at.x, y = at.y, "nothing under the pointer"),
    }
    if let Some(path) = svg {
        std::fs::write(path, view.scene(&state).to_svg()).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote highlighted svg");
    }
    Ok(())
}

fn print_tooltip(t: &Tooltip) {
    println!("{}", t.title);
    for row in &t.rows {
        println!("  {:<24} {}", row.label, row.value);
    }
    if let Some(total) = &t.total {
        println!("  {:<24} {}", total.label, total.value);
    }
}
