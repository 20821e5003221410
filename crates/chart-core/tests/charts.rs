// File: crates/chart-core/tests/charts.rs
// Purpose: Chart construction, hit testing, tooltips and hover styling for all three charts.

use chart_core::charts::{ChoroplethOptions, StackedAreaOptions, StackedColumnOptions};
use chart_core::geometry::Point;
use chart_core::interaction::Interactive;
use chart_core::scene::{Role, Shape};
use chart_core::{
    handle_pointer, ChartView, ChoroplethChart, Color, ContainerGeometry, ContinuousScale, InteractionState,
    LayoutSpec, PointerEvent, RawTable, StackedAreaChart, StackedColumnChart, Topology,
};

const STATES: &[u8] = include_bytes!("../../../data/energy/grid-energy/states.topo.json");
const PROJECTS: &str = "States,Projects\n06,420\n48,35\n15,3\n26,150\n";

fn table(csv: &str) -> RawTable {
    RawTable::from_reader(csv.as_bytes()).expect("parse csv")
}

fn column_chart() -> StackedColumnChart {
    let g = ContainerGeometry::resolve(1000.0, &LayoutSpec::STACKED_COLUMN).expect("layout");
    StackedColumnChart::build(g, &table("Location,A,B,C\nWorld,50,30,20\n"), &StackedColumnOptions::default())
        .expect("build")
}

fn area_chart() -> StackedAreaChart {
    let g = ContainerGeometry::resolve(1000.0, &LayoutSpec::STACKED_AREA).expect("layout");
    let opts = StackedAreaOptions { keys: vec!["China".into(), "U.S.".into()], ..Default::default() };
    StackedAreaChart::build(g, &table("Year,China,U.S.\n2010,10,5\n2011,20,10\n2012,30,12\n"), &opts).expect("build")
}

fn map_chart() -> ChoroplethChart {
    let g = ContainerGeometry::resolve(960.0, &LayoutSpec::CHOROPLETH).expect("layout");
    let topo = Topology::from_slice(STATES).expect("topology");
    ChoroplethChart::build(g, &topo, &table(PROJECTS), &ChoroplethOptions::default()).expect("build")
}

// ---- stacked column ----------------------------------------------------------

#[test]
fn column_segments_fill_the_band_top_to_bottom() {
    let chart = column_chart();
    // inner area 320 x 560
    let a = chart.segment_rect(0).expect("A");
    let c = chart.segment_rect(2).expect("C");
    assert!((a.bottom - 560.0).abs() < 1e-9);
    assert!((a.top - 280.0).abs() < 1e-9);
    assert!(c.top.abs() < 1e-9);
    assert!((a.width() - chart.x_scale().bandwidth()).abs() < 1e-9);
    assert_eq!(chart.layers().len(), 3);
    assert_eq!(chart.row().percents(), vec![50.0, 30.0, 20.0]);
}

#[test]
fn column_hover_shows_category_share() {
    let chart = column_chart();
    let mut state = InteractionState::default();
    handle_pointer(&chart, &mut state, PointerEvent::Enter(Point::new(160.0, 400.0)));
    assert_eq!(state.hovered_role(), Some(Role::Segment(0)));

    let tip = state.tooltip.as_ref().expect("tooltip");
    assert_eq!(tip.title, "A");
    assert_eq!(tip.rows[0].label, "Percent");
    assert_eq!(tip.rows[0].value, "50%");
    // 15px right, 28px up from the pointer, in container space (left 80, top 105)
    assert!((tip.position.x - 255.0).abs() < 1e-9);
    assert!((tip.position.y - 477.0).abs() < 1e-9);

    handle_pointer(&chart, &mut state, PointerEvent::Move(Point::new(160.0, 200.0)));
    assert_eq!(state.hovered_role(), Some(Role::Segment(1)));

    handle_pointer(&chart, &mut state, PointerEvent::Move(Point::new(5.0, 200.0)));
    assert_eq!(state, InteractionState::default());
}

#[test]
fn column_hover_dims_siblings() {
    let chart = column_chart();
    let mut state = InteractionState::default();
    handle_pointer(&chart, &mut state, PointerEvent::Enter(Point::new(160.0, 200.0)));
    let scene = chart.scene(&state);

    let layer = |k| scene.nodes_with_role(Role::Segment(k)).next().expect("segment").style;
    assert_eq!(layer(0).opacity, 0.5);
    assert_eq!(layer(2).opacity, 0.5);
    assert_eq!(layer(1).opacity, 1.0);
    assert_eq!(layer(1).stroke, Some(Color::WHITE));
    assert_eq!(layer(1).stroke_width, 3.0);

    handle_pointer(&chart, &mut state, PointerEvent::Leave);
    let idle = chart.scene(&state);
    assert!(idle.nodes_with_class("layer").all(|n| n.style.opacity == 1.0 && n.style.stroke.is_none()));
}

#[test]
fn column_labels_and_axis_ticks() {
    let scene = column_chart().scene(&InteractionState::default());
    let texts = scene
        .nodes_with_class("chart-labels")
        .filter_map(|n| match &n.shape {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>();
    // Category labels come first, then the axis tick labels.
    assert_eq!(&texts[..3], &["A", "B", "C"]);
    for label in ["0%", "20%", "100%", "Total"] {
        assert!(texts.contains(&label), "missing tick {label}: {texts:?}");
    }
    assert!(!texts.contains(&"120%"));
    // The band axis has no tick marks.
    assert_eq!(scene.nodes_with_class("tick").count(), 6);
}

// ---- stacked area ------------------------------------------------------------

#[test]
fn area_domain_rounds_up() {
    let chart = area_chart();
    assert_eq!(chart.y_scale().domain, (0.0, 100.0));
    assert_eq!(chart.layers()[1].points[2].top, 42.0);
}

#[test]
fn area_hover_finds_year_and_layer() {
    let chart = area_chart();
    let (w, y) = (780.0, chart.y_scale());
    // Mid 2011.
    let px = w * 0.6;

    assert_eq!(chart.record_at(px), Some(1));
    assert_eq!(chart.layer_at(1, y.to_px(10.0)), Some(0));
    assert_eq!(chart.layer_at(1, y.to_px(25.0)), Some(1));
    assert_eq!(chart.layer_at(1, y.to_px(50.0)), None);

    let mut state = InteractionState::default();
    handle_pointer(&chart, &mut state, PointerEvent::Enter(Point::new(px, y.to_px(25.0))));
    assert_eq!(state.hovered_role(), Some(Role::Layer(1)));
    assert_eq!(state.hovered_record(), Some(1));

    let tip = state.tooltip.as_ref().expect("tooltip");
    assert_eq!(tip.title, "2011");
    let rows = tip.rows.iter().map(|r| (r.label.as_str(), r.value.as_str())).collect::<Vec<_>>();
    assert_eq!(rows, vec![("U.S.", "10.00 (33.3%)"), ("China", "20.00 (66.7%)")]);
    assert_eq!(tip.total.as_ref().map(|r| r.value.as_str()), Some("30.00 (100%)"));

    // Above the stack: record stays hovered, no layer.
    handle_pointer(&chart, &mut state, PointerEvent::Move(Point::new(px, y.to_px(80.0))));
    assert_eq!(state.hovered_role(), None);
    assert_eq!(state.hovered_record(), Some(1));
    assert!(state.tooltip.is_some());
}

#[test]
fn area_highlight_fades_other_layers() {
    let chart = area_chart();
    let y = chart.y_scale();
    let mut state = InteractionState::default();
    handle_pointer(&chart, &mut state, PointerEvent::Enter(Point::new(468.0, y.to_px(5.0))));
    assert_eq!(state.hovered_role(), Some(Role::Layer(0)));

    let scene = chart.scene(&state);
    let areas = scene.nodes_with_class("area-path").collect::<Vec<_>>();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0].style.fill_opacity, 1.0);
    assert_eq!(areas[1].style.fill_opacity, 0.2);
    assert_eq!(scene.nodes_with_class("mouse-line").count(), 1);
    assert_eq!(scene.nodes_with_class("mouse-marker").count(), 2);

    handle_pointer(&chart, &mut state, PointerEvent::Leave);
    let idle = chart.scene(&state);
    assert_eq!(idle.nodes_with_class("mouse-line").count(), 0);
    assert!(idle.nodes_with_class("area-path").all(|n| n.style.fill_opacity == 1.0));
}

#[test]
fn area_pointer_outside_clears() {
    let chart = area_chart();
    let mut state = InteractionState::default();
    handle_pointer(&chart, &mut state, PointerEvent::Enter(Point::new(100.0, 100.0)));
    assert!(state.hover.is_some());
    handle_pointer(&chart, &mut state, PointerEvent::Move(Point::new(-20.0, 100.0)));
    assert_eq!(state, InteractionState::default());
}

// ---- choropleth --------------------------------------------------------------

#[test]
fn map_joins_counts_and_buckets() {
    let chart = map_chart();
    let regions = chart.regions().collect::<Vec<_>>();
    assert_eq!(regions.len(), 5);

    let by_name = |n: &str| regions.iter().find(|r| r.name() == n).copied().expect("region");
    let green = Color::from_hex("#4f9b52").expect("hex");
    assert_eq!(by_name("California").fill, green);
    assert_eq!(by_name("California").count, Some(420));
    assert_eq!(by_name("Texas").bucket, Some(1));
    assert_eq!(by_name("Hawaii").bucket, Some(3));
    // 150 falls in the uncovered 81..=288 range.
    assert_eq!(by_name("Michigan").bucket, None);
    assert_eq!(by_name("Michigan").fill, Color::WHITE);
    assert_eq!(by_name("Alaska").count, None);
    assert_eq!(by_name("Alaska").fill, Color::WHITE);
}

#[test]
fn map_projection_fits_reference_width() {
    let chart = map_chart();
    // inner width 739.2 over an 850-unit topology
    assert!((chart.projection().k - 739.2 / 850.0).abs() < 1e-12);
    let p = chart.projection().project(Point::new(850.0, 0.0));
    assert!((p.x - 739.2).abs() < 1e-9);
}

#[test]
fn map_region_hover_and_tooltip() {
    let chart = map_chart();
    let mut state = InteractionState::default();
    handle_pointer(&chart, &mut state, PointerEvent::Enter(Point::new(150.0, 200.0)));
    assert_eq!(state.hovered_role(), Some(Role::Region(0)));
    let tip = state.tooltip.as_ref().expect("tooltip");
    assert_eq!(tip.title, "California");
    assert_eq!(tip.rows[0].label, "Projects");
    assert_eq!(tip.rows[0].value, "420");

    handle_pointer(&chart, &mut state, PointerEvent::Move(Point::new(350.0, 200.0)));
    assert_eq!(chart.region_at(Point::new(350.0, 200.0)), Some(1));
    assert_eq!(state.tooltip.as_ref().map(|t| t.title.as_str()), Some("Texas"));

    let scene = chart.scene(&state);
    let style = |i| scene.nodes_with_role(Role::Region(i)).next().expect("region").style;
    assert_eq!(style(1).stroke_width, 1.5);
    assert_eq!(style(0).fill_opacity, 0.7);

    // Ocean between shapes.
    handle_pointer(&chart, &mut state, PointerEvent::Move(Point::new(480.0, 30.0)));
    assert_eq!(state, InteractionState::default());
}

#[test]
fn map_legend_hover_highlights_matching_fill() {
    let chart = map_chart();
    let sq = chart.legend_rect(0);
    let center = Point::new((sq.left + sq.right) / 2.0, (sq.top + sq.bottom) / 2.0);
    assert_eq!(chart.hit_test(center).and_then(|h| h.role), Some(Role::LegendItem(0)));

    let mut state = InteractionState::default();
    handle_pointer(&chart, &mut state, PointerEvent::Enter(center));
    assert!(state.tooltip.is_none());
    let scene = chart.scene(&state);
    let opacity = |i| scene.nodes_with_role(Role::Region(i)).next().expect("region").style.opacity;
    assert_eq!(opacity(0), 1.0);
    assert_eq!(opacity(1), 0.2);
    assert_eq!(opacity(3), 0.2);

    // Legend squares stack downwards with a 5px gap.
    let next = chart.legend_rect(1);
    assert!((next.top - (sq.bottom + 5.0)).abs() < 1e-9);
    assert_eq!(scene.nodes_with_class("legend").count(), 5);
}

#[test]
fn flat_series_axis_labels_are_clean() {
    let g = ContainerGeometry::resolve(1000.0, &LayoutSpec::STACKED_AREA).expect("layout");
    let opts = StackedAreaOptions { keys: vec!["China".into(), "U.S.".into()], ..Default::default() };
    let chart = StackedAreaChart::build(g, &table("Year,China,U.S.\n2009,0,0\n2010,0,0\n"), &opts).expect("build");
    assert_eq!(chart.y_scale().domain, (0.0, 1.0));

    let scene = chart.scene(&InteractionState::default());
    let labels = scene
        .nodes_with_class("chart-labels")
        .filter_map(|n| match &n.shape {
            Shape::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect::<Vec<_>>();
    for want in ["0.3", "0.6", "0.7", "1"] {
        assert!(labels.iter().any(|l| l == want), "missing {want}: {labels:?}");
    }
    let numeric = labels.iter().filter(|l| l.parse::<f64>().is_ok()).collect::<Vec<_>>();
    assert!(numeric.iter().all(|l| l.len() <= 4), "noisy label in {numeric:?}");
}

#[test]
fn map_tolerates_unreadable_counts() {
    let g = ContainerGeometry::resolve(960.0, &LayoutSpec::CHOROPLETH).expect("layout");
    let topo = Topology::from_slice(STATES).expect("topology");
    let csv = "States,Projects\n06,\n48,4.0\n15,-1\n";
    let chart = ChoroplethChart::build(g, &topo, &table(csv), &ChoroplethOptions::default()).expect("build");

    let regions = chart.regions().collect::<Vec<_>>();
    assert_eq!(regions[0].bucket, None);
    assert_eq!(regions[0].fill, Color::WHITE);
    assert_eq!(regions[1].count, Some(4));
    assert_eq!(regions[1].bucket, Some(3));
    assert_eq!(regions[2].fill, Color::WHITE);

    // Tooltip echoes the cell as written.
    let mut state = InteractionState::default();
    handle_pointer(&chart, &mut state, PointerEvent::Enter(Point::new(350.0, 200.0)));
    assert_eq!(state.tooltip.as_ref().map(|t| t.rows[0].value.as_str()), Some("4.0"));
    // Regions absent from the table read as zero.
    let alaska = chart.regions().position(|r| r.name() == "Alaska").expect("alaska");
    let tip = chart
        .tooltip(&chart_core::interaction::Hover::element(Role::Region(alaska)), Point::new(0.0, 0.0))
        .expect("tooltip");
    assert_eq!(tip.rows[0].value, "0");
}
