// File: crates/chart-core/src/charts/choropleth.rs
// Summary: Choropleth map: bucketed region counts joined onto TopoJSON features.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::{approx_text_width, ChartView};
use crate::error::Result;
use crate::geometry::{bounds, rings_contain, Point, Rect};
use crate::interaction::{Hover, InteractionState, Interactive, Tooltip, TooltipRow};
use crate::layout::ContainerGeometry;
use crate::loader::RawTable;
use crate::projection::ScaleProjection;
use crate::scene::{polyline, Anchor, Node, Role, Scene, Shape, Style};
use crate::theme::Theme;
use crate::topology::Topology;
use crate::transform::buckets::{bucket_regions, join_regions, JoinedRegion, ThresholdTable};

const LEGEND_FONT_SIZE: f64 = 10.0;
const LEGEND_GAP: f64 = 5.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoroplethOptions {
    /// Topology object holding the regions.
    pub object: String,
    /// CSV column matching feature ids.
    pub region_column: String,
    pub count_column: String,
    /// Label used in the tooltip row.
    pub count_label: String,
    pub thresholds: ThresholdTable,
    /// Topology width that maps onto the full inner width.
    pub reference_width: f64,
}

impl Default for ChoroplethOptions {
    fn default() -> Self {
        Self {
            object: "states".into(),
            region_column: "States".into(),
            count_column: "Projects".into(),
            count_label: "Projects".into(),
            thresholds: ThresholdTable::default(),
            reference_width: 850.0,
        }
    }
}

struct ProjectedRegion {
    region: JoinedRegion,
    rings: Vec<Vec<Point>>,
    bounds: Option<Rect>,
}

pub struct ChoroplethChart {
    geometry: ContainerGeometry,
    theme: Theme,
    count_label: String,
    thresholds: ThresholdTable,
    projection: ScaleProjection,
    regions: Vec<ProjectedRegion>,
}

impl ChoroplethChart {
    pub fn build(geometry: ContainerGeometry, topology: &Topology, table: &RawTable, opts: &ChoroplethOptions) -> Result<Self> {
        let features = topology.features(&opts.object)?;
        let data = bucket_regions(table, &opts.region_column, &opts.count_column, &opts.thresholds)?;
        let theme = Theme::default();
        let joined = join_regions(features, &data, &opts.thresholds, theme.missing_fill);
        let projection = ScaleProjection::fit_width(geometry.inner_width, opts.reference_width);

        let regions = joined
            .into_iter()
            .map(|region| {
                let rings = region
                    .feature
                    .geometry
                    .rings()
                    .into_iter()
                    .map(|r| projection.project_all(r))
                    .collect::<Vec<_>>();
                let bounds = bounds(rings.iter().flatten());
                ProjectedRegion { region, rings, bounds }
            })
            .collect::<Vec<_>>();
        debug!(regions = regions.len(), rows = data.len(), k = projection.k, "choropleth built");

        Ok(Self {
            geometry,
            theme,
            count_label: opts.count_label.clone(),
            thresholds: opts.thresholds.clone(),
            projection,
            regions,
        })
    }

    pub fn regions(&self) -> impl Iterator<Item = &JoinedRegion> {
        self.regions.iter().map(|r| &r.region)
    }

    pub fn projection(&self) -> &ScaleProjection { &self.projection }
    pub fn thresholds(&self) -> &ThresholdTable { &self.thresholds }

    /// Legend square size: 2% of container width/height.
    fn legend_square(&self) -> (f64, f64) {
        (self.geometry.width * 0.02, self.geometry.height * 0.02)
    }

    fn legend_origin(&self) -> Point {
        let g = &self.geometry;
        Point::new(g.inner_width + g.margins.left / 2.0, g.inner_height / 2.0)
    }

    /// Plot-space square of legend entry `i`.
    pub fn legend_rect(&self, i: usize) -> Rect {
        let (w, h) = self.legend_square();
        let o = self.legend_origin();
        Rect::from_ltwh(o.x, o.y + i as f64 * (h + LEGEND_GAP), w, h)
    }

    /// Square plus its label, for hovering.
    fn legend_hit_rect(&self, i: usize) -> Rect {
        let sq = self.legend_rect(i);
        let label = &self.thresholds.buckets[i].label;
        let text = Rect::from_ltwh(
            sq.right + LEGEND_GAP,
            sq.bottom - LEGEND_FONT_SIZE,
            approx_text_width(label, LEGEND_FONT_SIZE),
            LEGEND_FONT_SIZE,
        );
        sq.union(&text)
    }

    /// Index of the region containing plot point `p` (last drawn wins).
    pub fn region_at(&self, p: Point) -> Option<usize> {
        self.regions
            .iter()
            .enumerate()
            .rev()
            .find(|(_, r)| r.bounds.is_some_and(|b| p.x >= b.left && p.x <= b.right && p.y >= b.top && p.y <= b.bottom) && rings_contain(&r.rings, p))
            .map(|(i, _)| i)
    }

    fn region_style(&self, i: usize, r: &ProjectedRegion, hovered: Option<Role>) -> Style {
        let mut style = Style::fill(r.region.fill).with_stroke(self.theme.region_stroke, 0.5);
        match hovered {
            Some(Role::LegendItem(b)) => {
                let legend_color = self.thresholds.buckets.get(b).map(|b| b.color);
                style.opacity = if legend_color == Some(r.region.fill) { 1.0 } else { 0.2 };
            }
            Some(Role::Region(h)) if h == i => style.stroke_width = 1.5,
            Some(Role::Region(_)) => style.fill_opacity = 0.7,
            _ => {}
        }
        style
    }
}

impl Interactive for ChoroplethChart {
    fn hit_test(&self, p: Point) -> Option<Hover> {
        if let Some(i) = (0..self.thresholds.buckets.len()).find(|&i| self.legend_hit_rect(i).contains(p)) {
            return Some(Hover::element(Role::LegendItem(i)));
        }
        self.region_at(p).map(|i| Hover::element(Role::Region(i)))
    }

    fn tooltip(&self, hover: &Hover, p: Point) -> Option<Tooltip> {
        let Some(Role::Region(i)) = hover.role else { return None };
        let region = &self.regions.get(i)?.region;
        let origin = self.geometry.origin();
        Some(Tooltip {
            title: region.name().to_string(),
            swatch: None,
            rows: vec![TooltipRow::new(
                None,
                self.count_label.clone(),
                region.raw.clone().unwrap_or_else(|| "0".to_string()),
            )],
            total: None,
            position: Point::new(p.x + origin.x, p.y + origin.y),
            opacity: 0.9,
        })
    }
}

impl ChartView for ChoroplethChart {
    fn kind(&self) -> &'static str { "choropleth" }

    fn geometry(&self) -> &ContainerGeometry { &self.geometry }

    fn scene(&self, state: &InteractionState) -> Scene {
        let g = &self.geometry;
        let mut scene = Scene::new(g.width, g.height, g.origin());
        scene.background = Some(self.theme.background);
        let hovered = state.hovered_role();

        for (i, r) in self.regions.iter().enumerate() {
            let cmds = r.rings.iter().flat_map(|ring| polyline(ring, true)).collect::<Vec<_>>();
            if cmds.is_empty() { continue; }
            scene.push(Node::new("region", Shape::Path(cmds), self.region_style(i, r, hovered)).with_role(Role::Region(i)));
        }

        for (i, bucket) in self.thresholds.buckets.iter().enumerate() {
            let role = Role::LegendItem(i);
            let rect = self.legend_rect(i);
            let mut style = Style::fill(bucket.color).with_stroke(self.theme.region_stroke, 0.5);
            if matches!(hovered, Some(Role::LegendItem(h)) if h != i) {
                style.opacity = 0.2;
            }
            scene.push(Node::new("legend", Shape::Rect(rect), style).with_role(role));
            scene.push(
                Node::new(
                    "chart-labels",
                    Shape::Text {
                        pos: Point::new(rect.right + LEGEND_GAP, rect.bottom),
                        text: bucket.label.clone(),
                        anchor: Anchor::Start,
                        size: LEGEND_FONT_SIZE,
                    },
                    Style::fill(self.theme.axis_label),
                )
                .with_role(role),
            );
        }
        scene
    }
}
