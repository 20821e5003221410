// File: crates/chart-core/src/charts/stacked_column.rs
// Summary: Single-row stacked column of category shares (percentage of total).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::{Axis, Tick};
use crate::charts::ChartView;
use crate::color::OrdinalScale;
use crate::error::{ChartError, Result};
use crate::geometry::{Point, Rect};
use crate::grid::range_step;
use crate::interaction::{emphasis, Hover, InteractionState, Interactive, Tooltip, TooltipRow};
use crate::layout::ContainerGeometry;
use crate::loader::RawTable;
use crate::scale::{BandScale, ContinuousScale, LinearScale};
use crate::scene::{Anchor, Node, Role, Scene, Shape, Style};
use crate::theme::{Theme, COLUMN_PALETTE};
use crate::transform::percent::{percentage_of_total, PercentRow};
use crate::transform::stack::{stack, StackLayer};
use crate::types::Color;
use crate::format;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedColumnOptions {
    pub title: String,
    /// Row label column. Categories default to every column after the first.
    pub label_column: String,
    pub categories: Option<Vec<String>>,
    pub palette: Vec<Color>,
    /// Name of the single band.
    pub band: String,
    pub padding: f64,
}

impl Default for StackedColumnOptions {
    fn default() -> Self {
        Self {
            title: "Greenhouse Gases Contribution by Food Type in Average Diet".into(),
            label_column: "Location".into(),
            categories: None,
            palette: COLUMN_PALETTE.to_vec(),
            band: "Total".into(),
            padding: 0.1,
        }
    }
}

pub struct StackedColumnChart {
    geometry: ContainerGeometry,
    theme: Theme,
    title: String,
    band: String,
    row: PercentRow,
    layers: Vec<StackLayer>,
    x: BandScale,
    y: LinearScale,
    colors: OrdinalScale,
}

impl StackedColumnChart {
    /// Shares of the first row of `table`.
    pub fn build(geometry: ContainerGeometry, table: &RawTable, opts: &StackedColumnOptions) -> Result<Self> {
        let categories = match &opts.categories {
            Some(c) => c.clone(),
            None => table.value_columns().to_vec(),
        };
        let first = table.rows.first().ok_or_else(|| ChartError::EmptyData("table has no rows".into()))?;
        let row = percentage_of_total(first, &opts.label_column, &categories)?;
        let layers = stack(std::slice::from_ref(&row), &categories, |r, k| r.entries[k].percent);
        debug!(categories = categories.len(), total = row.total, "stacked column built");

        let x = BandScale::new(vec![opts.band.clone()], (0.0, geometry.inner_width)).padding(opts.padding);
        let y = LinearScale::new((0.0, 100.0), (geometry.inner_height, 0.0));
        let colors = OrdinalScale::new(categories, opts.palette.clone());
        Ok(Self {
            geometry,
            theme: Theme::default(),
            title: opts.title.clone(),
            band: opts.band.clone(),
            row,
            layers,
            x,
            y,
            colors,
        })
    }

    pub fn row(&self) -> &PercentRow { &self.row }
    pub fn layers(&self) -> &[StackLayer] { &self.layers }
    pub fn x_scale(&self) -> &BandScale { &self.x }
    pub fn y_scale(&self) -> &LinearScale { &self.y }
    pub fn colors(&self) -> &OrdinalScale { &self.colors }

    /// Plot-space rectangle of category `k`.
    pub fn segment_rect(&self, k: usize) -> Option<Rect> {
        let p = self.layers.get(k)?.points.first()?;
        let left = self.x.position(&self.band)?;
        let top = self.y.to_px(p.top);
        let bottom = self.y.to_px(p.baseline);
        Some(Rect::from_ltrb(left, top, left + self.x.bandwidth(), bottom))
    }

    fn color(&self, key: &str) -> Color {
        self.colors.get_or(key, self.theme.missing_fill)
    }
}

impl Interactive for StackedColumnChart {
    fn hit_test(&self, p: Point) -> Option<Hover> {
        (0..self.layers.len())
            .find(|&k| self.segment_rect(k).is_some_and(|r| r.contains(p)))
            .map(|k| Hover::element(Role::Segment(k)))
    }

    fn tooltip(&self, hover: &Hover, p: Point) -> Option<Tooltip> {
        let Some(Role::Segment(k)) = hover.role else { return None };
        let entry = self.row.entries.get(k)?;
        let origin = self.geometry.origin();
        Some(Tooltip {
            title: entry.category.clone(),
            swatch: Some(self.color(&entry.category)),
            rows: vec![TooltipRow::new(None, "Percent", format::percent(entry.percent))],
            total: None,
            position: Point::new(p.x + origin.x + 15.0, p.y + origin.y - 28.0),
            opacity: 0.9,
        })
    }
}

impl ChartView for StackedColumnChart {
    fn kind(&self) -> &'static str { "stacked_column" }

    fn geometry(&self) -> &ContainerGeometry { &self.geometry }

    fn scene(&self, state: &InteractionState) -> Scene {
        let g = &self.geometry;
        let mut scene = Scene::new(g.width, g.height, g.origin());
        scene.background = Some(self.theme.background);
        let hovered = state.hovered_role();

        scene.push(Node::new(
            "chart-title",
            Shape::Text {
                pos: Point::new(-g.margins.left, -g.margins.top / 2.0),
                text: self.title.clone(),
                anchor: Anchor::Start,
                size: 16.0,
            },
            Style::fill(self.theme.axis_label),
        ));

        for layer in &self.layers {
            let Some(rect) = self.segment_rect(layer.index) else { continue };
            let role = Role::Segment(layer.index);
            let mut style = Style::fill(self.color(&layer.key));
            style.opacity = emphasis(hovered, role, 0.5);
            if hovered == Some(role) {
                style = style.with_stroke(self.theme.highlight_stroke, 3.0);
            }
            scene.push(Node::new("layer", Shape::Rect(rect), style).with_role(role));
        }

        // Category labels to the right of each segment.
        for layer in &self.layers {
            let Some(rect) = self.segment_rect(layer.index) else { continue };
            scene.push(Node::new(
                "chart-labels",
                Shape::Text {
                    pos: Point::new(rect.right + 5.0, (rect.top + rect.bottom) / 2.0 + 0.35 * 10.0),
                    text: layer.key.clone(),
                    anchor: Anchor::Start,
                    size: 10.0,
                },
                Style::fill(self.theme.axis_label),
            ));
        }

        let y_ticks = range_step(0.0, 101.0, 20.0)
            .into_iter()
            .map(|v| Tick::new(self.y.to_px(v), format!("{v}%")))
            .collect();
        scene.extend(Axis::left(self.y.range, y_ticks).nodes(&self.theme, 0.0));

        let band_mid = self.x.position(&self.band).unwrap_or(0.0) + self.x.bandwidth() / 2.0;
        let x_axis = Axis::bottom((0.0, g.inner_width), g.inner_height, vec![Tick::new(band_mid, self.band.clone())])
            .tick_sizes(0.0, 0.0)
            .tick_padding(5.0);
        scene.extend(x_axis.nodes(&self.theme, 0.0));
        scene
    }
}
