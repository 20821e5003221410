// File: crates/chart-core/src/projection.rs
// Summary: Planar projection that uniformly scales pre-projected topology coordinates.

use crate::geometry::Point;

/// Multiplies every coordinate by `k`; used for topologies already projected to screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleProjection {
    pub k: f64,
}

impl ScaleProjection {
    pub fn new(k: f64) -> Self {
        Self { k }
    }

    /// Scale so a map `reference_width` units wide fills `target_width` pixels.
    pub fn fit_width(target_width: f64, reference_width: f64) -> Self {
        if reference_width <= 0.0 { return Self::new(1.0); }
        Self::new(target_width / reference_width)
    }

    #[inline]
    pub fn project(&self, p: Point) -> Point {
        Point::new(p.x * self.k, p.y * self.k)
    }

    pub fn project_all(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.project(*p)).collect()
    }
}
