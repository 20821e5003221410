// File: crates/chart-core/src/charts/stacked_area.rs
// Summary: Stacked area time series with legend, hover markers and per-year tooltip.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::{Axis, Tick};
use crate::charts::{approx_text_width, ChartView};
use crate::color::OrdinalScale;
use crate::error::{ChartError, Result};
use crate::format;
use crate::geometry::{Point, Rect};
use crate::grid::{linear_ticks, year_ticks};
use crate::interaction::{Hover, InteractionState, Interactive, Tooltip, TooltipRow};
use crate::layout::ContainerGeometry;
use crate::loader::RawTable;
use crate::scale::{nice_ceil, ContinuousScale, LinearScale, TimeScale};
use crate::scene::{Anchor, Node, PathCmd, Role, Scene, Shape, Style};
use crate::theme::{owned_keys, Theme, AREA_CATEGORIES, AREA_PALETTE};
use crate::transform::stack::{max_top, StackLayer};
use crate::transform::timeseries::{stack_time_records, time_records, TimeRecord};
use crate::types::Color;

const LEGEND_FONT_SIZE: f64 = 10.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedAreaOptions {
    pub date_column: String,
    /// Stack order, bottom first.
    pub keys: Vec<String>,
    pub palette: Vec<Color>,
    pub y_label: String,
    /// Label every n-th year on the x axis.
    pub year_tick_every: i32,
    /// The y domain is rounded up to a multiple of this.
    pub y_round_to: f64,
}

impl Default for StackedAreaOptions {
    fn default() -> Self {
        Self {
            date_column: "Year".into(),
            keys: owned_keys(&AREA_CATEGORIES),
            palette: AREA_PALETTE.to_vec(),
            y_label: "Gigawatts (GW)".into(),
            year_tick_every: 2,
            y_round_to: 100.0,
        }
    }
}

pub struct StackedAreaChart {
    geometry: ContainerGeometry,
    theme: Theme,
    y_label: String,
    year_tick_every: i32,
    keys: Vec<String>,
    records: Vec<TimeRecord>,
    layers: Vec<StackLayer>,
    x: TimeScale,
    y: LinearScale,
    colors: OrdinalScale,
}

impl StackedAreaChart {
    pub fn build(geometry: ContainerGeometry, table: &RawTable, opts: &StackedAreaOptions) -> Result<Self> {
        let records = time_records(table, &opts.date_column)?;
        Self::from_records(geometry, records, opts)
    }

    pub fn from_records(geometry: ContainerGeometry, records: Vec<TimeRecord>, opts: &StackedAreaOptions) -> Result<Self> {
        let extent = TimeScale::extent(records.iter().map(|r| r.date))
            .ok_or_else(|| ChartError::EmptyData("time series has no records".into()))?;
        let layers = stack_time_records(&records, &opts.keys)?;
        let y_max = nice_ceil(max_top(&layers), opts.y_round_to);
        debug!(records = records.len(), layers = layers.len(), y_max, "stacked area built");

        let x = TimeScale::new(extent, (0.0, geometry.inner_width));
        let y = LinearScale::new((0.0, y_max), (geometry.inner_height, 0.0));
        let colors = OrdinalScale::new(opts.keys.clone(), opts.palette.clone());
        Ok(Self {
            geometry,
            theme: Theme::default(),
            y_label: opts.y_label.clone(),
            year_tick_every: opts.year_tick_every,
            keys: opts.keys.clone(),
            records,
            layers,
            x,
            y,
            colors,
        })
    }

    pub fn records(&self) -> &[TimeRecord] { &self.records }
    pub fn layers(&self) -> &[StackLayer] { &self.layers }
    pub fn x_scale(&self) -> &TimeScale { &self.x }
    pub fn y_scale(&self) -> &LinearScale { &self.y }

    fn color(&self, key: &str) -> Color {
        self.colors.get_or(key, self.theme.missing_fill)
    }

    /// Record whose year matches the date under `px`.
    pub fn record_at(&self, px: f64) -> Option<usize> {
        let year = self.x.from_px(px).year();
        self.records.iter().position(|r| r.year() == year)
    }

    /// Layer whose band at `record` spans plot y `py` (top edge inclusive).
    pub fn layer_at(&self, record: usize, py: f64) -> Option<usize> {
        let rec = self.records.get(record)?;
        let mut cumulative = 0.0;
        let mut found = None;
        for (k, key) in self.keys.iter().enumerate() {
            let y0 = self.y.to_px(cumulative);
            cumulative += rec.value(key);
            let y1 = self.y.to_px(cumulative);
            if py >= y1 && py < y0 {
                found = Some(k);
            }
        }
        found
    }

    /// Legend label anchor: right edge, centred on the last record's band.
    fn legend_pos(&self, layer: &StackLayer) -> Option<Point> {
        let last = layer.last()?;
        let y0 = self.y.to_px(last.baseline);
        let y1 = self.y.to_px(last.top);
        Some(Point::new(self.geometry.inner_width + 5.0, y0 + (y1 - y0) / 2.0))
    }

    fn legend_rect(&self, layer: &StackLayer) -> Option<Rect> {
        let p = self.legend_pos(layer)?;
        let w = approx_text_width(&layer.key, LEGEND_FONT_SIZE);
        Some(Rect::from_ltwh(p.x, p.y - LEGEND_FONT_SIZE / 2.0, w, LEGEND_FONT_SIZE))
    }

    /// Listening area: the plot widened by a quarter of the left margin.
    fn listening_rect(&self) -> Rect {
        let g = &self.geometry;
        Rect::from_ltwh(0.0, 0.0, g.inner_width + g.margins.left / 4.0, g.inner_height)
    }

    fn area_path(&self, layer: &StackLayer) -> Vec<PathCmd> {
        let mut cmds = Vec::with_capacity(layer.points.len() * 2 + 1);
        for (i, p) in layer.points.iter().enumerate() {
            let pt = Point::new(self.x.to_px(self.records[p.record].date), self.y.to_px(p.top));
            cmds.push(if i == 0 { PathCmd::MoveTo(pt) } else { PathCmd::LineTo(pt) });
        }
        for p in layer.points.iter().rev() {
            cmds.push(PathCmd::LineTo(Point::new(
                self.x.to_px(self.records[p.record].date),
                self.y.to_px(p.baseline),
            )));
        }
        if !cmds.is_empty() {
            cmds.push(PathCmd::Close);
        }
        cmds
    }

    fn top_line(&self, layer: &StackLayer) -> Vec<PathCmd> {
        let pts = layer
            .points
            .iter()
            .map(|p| Point::new(self.x.to_px(self.records[p.record].date), self.y.to_px(p.top)))
            .collect::<Vec<_>>();
        crate::scene::polyline(&pts, false)
    }

    fn x_axis(&self) -> Axis {
        let (Some(first), Some(last)) = (self.records.iter().map(TimeRecord::year).min(), self.records.iter().map(TimeRecord::year).max()) else {
            return Axis::bottom(self.x.range(), self.geometry.inner_height, Vec::new());
        };
        let dates = year_ticks(first, last, self.year_tick_every);
        let n = dates.len();
        let ticks = dates
            .into_iter()
            .enumerate()
            .map(|(i, d)| {
                let mut t = Tick::new(self.x.to_px(d), d.year().to_string());
                if i == 0 {
                    t.anchor = Anchor::Start;
                } else if i + 1 == n && d.year() == last {
                    t.anchor = Anchor::End;
                }
                t
            })
            .collect();
        Axis::bottom(self.x.range(), self.geometry.inner_height, ticks)
    }

    fn y_axis(&self) -> Axis {
        let ticks = linear_ticks(self.y.domain.0, self.y.domain.1, 10)
            .into_iter()
            .map(|v| Tick::new(self.y.to_px(v), format::grouped_auto(v)))
            .collect();
        Axis::left(self.y.range, ticks).with_label(self.y_label.clone())
    }
}

impl Interactive for StackedAreaChart {
    fn hit_test(&self, p: Point) -> Option<Hover> {
        if let Some(k) = self.layers.iter().position(|l| self.legend_rect(l).is_some_and(|r| r.contains(p))) {
            return Some(Hover::element(Role::Layer(k)));
        }
        if !self.listening_rect().contains(p) {
            return None;
        }
        let record = self.record_at(p.x)?;
        Some(Hover { role: self.layer_at(record, p.y).map(Role::Layer), record: Some(record) })
    }

    fn tooltip(&self, hover: &Hover, p: Point) -> Option<Tooltip> {
        let rec = self.records.get(hover.record?)?;
        let total = rec.total(&self.keys);
        let share = |v: f64| if total != 0.0 { v / total * 100.0 } else { 0.0 };
        // Top of the stack first.
        let rows = self
            .keys
            .iter()
            .rev()
            .map(|k| {
                let v = rec.value(k);
                TooltipRow::new(
                    Some(self.color(k)),
                    k.clone(),
                    format!("{} ({}%)", format::grouped(v, 2), format::grouped(share(v), 1)),
                )
            })
            .collect();
        let origin = self.geometry.origin();
        Some(Tooltip {
            title: rec.year().to_string(),
            swatch: None,
            rows,
            total: Some(TooltipRow::new(None, "Total", format!("{} (100%)", format::grouped(total, 2)))),
            position: Point::new(p.x + origin.x + self.geometry.margins.left / 4.0, p.y + origin.y),
            opacity: 0.9,
        })
    }
}

impl ChartView for StackedAreaChart {
    fn kind(&self) -> &'static str { "stacked_area" }

    fn geometry(&self) -> &ContainerGeometry { &self.geometry }

    fn scene(&self, state: &InteractionState) -> Scene {
        let g = &self.geometry;
        let mut scene = Scene::new(g.width, g.height, g.origin());
        scene.background = Some(self.theme.background);
        let highlighted = match state.hovered_role() {
            Some(Role::Layer(k)) => Some(k),
            _ => None,
        };

        scene.extend(self.x_axis().nodes(&self.theme, 0.0));
        scene.extend(self.y_axis().nodes(&self.theme, g.margins.top / 2.0));

        for layer in &self.layers {
            let color = self.color(&layer.key);
            let mut fill = Style::fill(color);
            if highlighted.is_some_and(|k| k != layer.index) {
                fill.fill_opacity = 0.2;
            }
            scene.push(Node::new("area-path", Shape::Path(self.area_path(layer)), fill).with_role(Role::Layer(layer.index)));
            scene.push(Node::new("area-line", Shape::Path(self.top_line(layer)), Style::stroke(color, 0.5)));
        }

        for layer in &self.layers {
            let Some(pos) = self.legend_pos(layer) else { continue };
            scene.push(
                Node::new(
                    "chart-labels",
                    Shape::Text { pos, text: layer.key.clone(), anchor: Anchor::Start, size: LEGEND_FONT_SIZE },
                    Style::fill(self.color(&layer.key)),
                )
                .with_role(Role::LegendItem(layer.index)),
            );
        }

        if let Some(rec) = state.hovered_record().and_then(|i| self.records.get(i)) {
            let x = self.x.to_px(rec.date);
            scene.push(Node::new(
                "mouse-line",
                Shape::Line { from: Point::new(x, 0.0), to: Point::new(x, g.inner_height) },
                Style::stroke(self.theme.guide_line, 0.5),
            ));
            let mut cumulative = 0.0;
            for key in &self.keys {
                cumulative += rec.value(key);
                scene.push(Node::new(
                    "mouse-marker",
                    Shape::Circle { center: Point::new(x, self.y.to_px(cumulative)), radius: 4.0 },
                    Style::fill(self.color(key)).with_stroke(self.theme.marker_stroke, 1.0),
                ));
            }
        }
        scene
    }
}
