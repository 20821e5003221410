// File: crates/chart-core/src/layout.rs
// Summary: Container geometry resolver (aspect ratio + proportional margins).

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::geometry::{Point, Rect};
use crate::types::{MarginFractions, Margins};

/// Fixed layout parameters of one chart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Height-to-width proportion.
    pub aspect_ratio: f64,
    pub margins: MarginFractions,
}

impl LayoutSpec {
    pub const STACKED_AREA: LayoutSpec = LayoutSpec {
        aspect_ratio: 0.7,
        margins: MarginFractions::new(0.1, 0.15, 0.1, 0.07),
    };

    pub const CHOROPLETH: LayoutSpec = LayoutSpec {
        aspect_ratio: 0.65,
        margins: MarginFractions::new(0.05, 0.15, 0.1, 0.08),
    };

    pub const STACKED_COLUMN: LayoutSpec = LayoutSpec {
        aspect_ratio: 0.7,
        margins: MarginFractions::new(0.15, 0.6, 0.05, 0.08),
    };
}

/// Resolved pixel geometry of a chart container.
/// Contract: `inner_width > 0` and `inner_height > 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerGeometry {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub inner_width: f64,
    pub inner_height: f64,
}

impl ContainerGeometry {
    /// Derive height, margins and the inner drawing area from a measured width.
    pub fn resolve(container_width: f64, spec: &LayoutSpec) -> Result<Self> {
        if !container_width.is_finite() || container_width <= 0.0 {
            return Err(ChartError::InvalidContainer(format!(
                "container width must be positive, got {container_width}"
            )));
        }
        if !spec.aspect_ratio.is_finite() || spec.aspect_ratio <= 0.0 {
            return Err(ChartError::InvalidContainer(format!(
                "aspect ratio must be positive, got {}",
                spec.aspect_ratio
            )));
        }
        let f = spec.margins;
        if [f.top, f.right, f.bottom, f.left].iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ChartError::InvalidContainer("margin fractions must be non-negative".into()));
        }
        if f.left + f.right >= 1.0 || f.top + f.bottom >= 1.0 {
            return Err(ChartError::InvalidContainer(format!(
                "margin fractions leave no drawing area (horizontal {}, vertical {})",
                f.left + f.right,
                f.top + f.bottom
            )));
        }

        let width = container_width;
        let height = width * spec.aspect_ratio;
        let margins = Margins {
            top: height * f.top,
            right: width * f.right,
            bottom: height * f.bottom,
            left: width * f.left,
        };
        let inner_width = width - margins.hsum();
        let inner_height = height - margins.vsum();
        // Tiny widths can still underflow.
        if inner_width <= 0.0 || inner_height <= 0.0 {
            return Err(ChartError::InvalidContainer(format!(
                "inner area {inner_width}x{inner_height} is empty"
            )));
        }
        Ok(Self { width, height, margins, inner_width, inner_height })
    }

    /// `viewBox` attribute value for the outer drawing surface.
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    /// Translation from container to plot coordinates.
    pub fn origin(&self) -> Point {
        Point::new(self.margins.left, self.margins.top)
    }

    /// Plot area in plot coordinates.
    pub fn plot_rect(&self) -> Rect {
        Rect::from_ltwh(0.0, 0.0, self.inner_width, self.inner_height)
    }

    /// Convert a container-space point into plot space.
    pub fn to_plot(&self, p: Point) -> Point {
        Point::new(p.x - self.margins.left, p.y - self.margins.top)
    }
}
