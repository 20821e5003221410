// File: crates/chart-core/tests/layout.rs
// Purpose: Container geometry resolution and its fail-fast rules.

use chart_core::error::ChartError;
use chart_core::geometry::Point;
use chart_core::types::MarginFractions;
use chart_core::{ContainerGeometry, LayoutSpec};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn stacked_area_layout_at_1000px() {
    let g = ContainerGeometry::resolve(1000.0, &LayoutSpec::STACKED_AREA).expect("resolve");
    assert!(approx(g.height, 700.0));
    assert!(approx(g.margins.top, 70.0));
    assert!(approx(g.margins.right, 150.0));
    assert!(approx(g.margins.bottom, 70.0));
    assert!(approx(g.margins.left, 70.0));
    assert!(approx(g.inner_width, 780.0));
    assert!(approx(g.inner_height, 560.0));
    assert_eq!(g.view_box(), "0 0 1000 700");
}

#[test]
fn inner_area_is_width_minus_margins() {
    for spec in [LayoutSpec::STACKED_AREA, LayoutSpec::CHOROPLETH, LayoutSpec::STACKED_COLUMN] {
        for w in [320.0, 960.0, 1440.5] {
            let g = ContainerGeometry::resolve(w, &spec).expect("resolve");
            assert!(approx(g.height, w * spec.aspect_ratio));
            assert!(approx(g.inner_width, g.width - g.margins.left - g.margins.right));
            assert!(approx(g.inner_height, g.height - g.margins.top - g.margins.bottom));
            assert!(g.inner_width > 0.0 && g.inner_height > 0.0);
        }
    }
}

#[test]
fn container_to_plot_translation() {
    let g = ContainerGeometry::resolve(1000.0, &LayoutSpec::STACKED_AREA).expect("resolve");
    assert_eq!(g.origin(), Point::new(70.0, 70.0));
    assert_eq!(g.to_plot(Point::new(100.0, 90.0)), Point::new(30.0, 20.0));
    assert!(g.plot_rect().contains(Point::new(0.0, 0.0)));
    assert!(!g.plot_rect().contains(Point::new(780.0, 10.0)));
}

#[test]
fn zero_or_negative_width_is_rejected() {
    for w in [0.0, -5.0, f64::NAN] {
        let err = ContainerGeometry::resolve(w, &LayoutSpec::STACKED_AREA).unwrap_err();
        assert!(matches!(err, ChartError::InvalidContainer(_)), "width {w}: {err}");
    }
}

#[test]
fn margins_consuming_the_container_are_rejected() {
    let spec = LayoutSpec { aspect_ratio: 0.7, margins: MarginFractions::new(0.1, 0.6, 0.1, 0.4) };
    assert!(matches!(ContainerGeometry::resolve(800.0, &spec), Err(ChartError::InvalidContainer(_))));

    let spec = LayoutSpec { aspect_ratio: 0.7, margins: MarginFractions::new(-0.1, 0.1, 0.1, 0.1) };
    assert!(matches!(ContainerGeometry::resolve(800.0, &spec), Err(ChartError::InvalidContainer(_))));

    let spec = LayoutSpec { aspect_ratio: 0.0, margins: MarginFractions::new(0.1, 0.1, 0.1, 0.1) };
    assert!(matches!(ContainerGeometry::resolve(800.0, &spec), Err(ChartError::InvalidContainer(_))));
}
