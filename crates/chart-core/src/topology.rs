// File: crates/chart-core/src/topology.rs
// Summary: TopoJSON decoding into features (quantized delta arcs -> absolute rings).

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ChartError, Result};
use crate::geometry::Point;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl Transform {
    #[inline]
    fn apply(&self, x: f64, y: f64) -> Point {
        Point::new(x * self.scale[0] + self.translate[0], y * self.scale[1] + self.translate[1])
    }
}

/// A TopoJSON document. Arc positions may carry extra dimensions; only x/y are read.
#[derive(Clone, Debug, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub transform: Option<Transform>,
    #[serde(default)]
    pub arcs: Vec<Vec<Vec<f64>>>,
    #[serde(default)]
    pub objects: HashMap<String, GeometryObject>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GeometryObject {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub kind: GeometryKind,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum GeometryKind {
    GeometryCollection { geometries: Vec<GeometryObject> },
    Point { coordinates: Vec<f64> },
    MultiPoint { coordinates: Vec<Vec<f64>> },
    LineString { arcs: Vec<i64> },
    MultiLineString { arcs: Vec<Vec<i64>> },
    Polygon { arcs: Vec<Vec<i64>> },
    MultiPolygon { arcs: Vec<Vec<Vec<i64>>> },
}

/// Decoded geometry in topology coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point),
    MultiPoint(Vec<Point>),
    LineString(Vec<Point>),
    MultiLineString(Vec<Vec<Point>>),
    Polygon(Vec<Vec<Point>>),
    MultiPolygon(Vec<Vec<Vec<Point>>>),
    Collection(Vec<Geometry>),
}

impl Geometry {
    /// All closed rings (polygon outers and holes), for fills and hit tests.
    pub fn rings(&self) -> Vec<&Vec<Point>> {
        match self {
            Geometry::Polygon(rings) => rings.iter().collect(),
            Geometry::MultiPolygon(polys) => polys.iter().flatten().collect(),
            Geometry::Collection(items) => items.iter().flat_map(Geometry::rings).collect(),
            _ => Vec::new(),
        }
    }

    /// All open lines.
    pub fn lines(&self) -> Vec<&Vec<Point>> {
        match self {
            Geometry::LineString(l) => vec![l],
            Geometry::MultiLineString(ls) => ls.iter().collect(),
            Geometry::Collection(items) => items.iter().flat_map(Geometry::lines).collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: Geometry,
}

impl Feature {
    /// `properties.name` when it is a string.
    pub fn name(&self) -> Option<&str> {
        self.properties.get("name").and_then(Value::as_str)
    }
}

impl Topology {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Convert a named object into features; a collection yields one feature per member.
    pub fn features(&self, object: &str) -> Result<Vec<Feature>> {
        let obj = self
            .objects
            .get(object)
            .ok_or_else(|| ChartError::UnknownObject(object.to_string()))?;
        let decoded = self.decode_arcs()?;
        let dec = Decoder { topo: self, arcs: &decoded };
        match &obj.kind {
            GeometryKind::GeometryCollection { geometries } => {
                geometries.iter().map(|g| dec.feature(g)).collect()
            }
            _ => Ok(vec![dec.feature(obj)?]),
        }
    }

    /// Absolute coordinates of every arc (delta decoding + transform when quantized).
    fn decode_arcs(&self) -> Result<Vec<Vec<Point>>> {
        self.arcs
            .iter()
            .enumerate()
            .map(|(i, arc)| {
                let (mut x, mut y) = (0.0, 0.0);
                arc.iter()
                    .map(|pos| {
                        let (px, py) = match pos.as_slice() {
                            [a, b, ..] => (*a, *b),
                            _ => return Err(ChartError::Topology(format!("arc {i} has a short position"))),
                        };
                        Ok(match &self.transform {
                            Some(t) => {
                                x += px;
                                y += py;
                                t.apply(x, y)
                            }
                            None => Point::new(px, py),
                        })
                    })
                    .collect()
            })
            .collect()
    }

    fn point(&self, pos: &[f64]) -> Result<Point> {
        match pos {
            [x, y, ..] => Ok(match &self.transform {
                Some(t) => t.apply(*x, *y),
                None => Point::new(*x, *y),
            }),
            _ => Err(ChartError::Topology("point has fewer than two coordinates".into())),
        }
    }
}

struct Decoder<'a> {
    topo: &'a Topology,
    arcs: &'a [Vec<Point>],
}

impl Decoder<'_> {
    fn feature(&self, obj: &GeometryObject) -> Result<Feature> {
        Ok(Feature {
            id: obj.id.as_ref().and_then(id_string),
            properties: obj.properties.clone().unwrap_or_default(),
            geometry: self.geometry(&obj.kind)?,
        })
    }

    fn geometry(&self, kind: &GeometryKind) -> Result<Geometry> {
        Ok(match kind {
            GeometryKind::GeometryCollection { geometries } => Geometry::Collection(
                geometries.iter().map(|g| self.geometry(&g.kind)).collect::<Result<_>>()?,
            ),
            GeometryKind::Point { coordinates } => Geometry::Point(self.topo.point(coordinates)?),
            GeometryKind::MultiPoint { coordinates } => Geometry::MultiPoint(
                coordinates.iter().map(|c| self.topo.point(c)).collect::<Result<_>>()?,
            ),
            GeometryKind::LineString { arcs } => Geometry::LineString(self.line(arcs)?),
            GeometryKind::MultiLineString { arcs } => {
                Geometry::MultiLineString(arcs.iter().map(|a| self.line(a)).collect::<Result<_>>()?)
            }
            GeometryKind::Polygon { arcs } => Geometry::Polygon(self.polygon(arcs)?),
            GeometryKind::MultiPolygon { arcs } => {
                Geometry::MultiPolygon(arcs.iter().map(|p| self.polygon(p)).collect::<Result<_>>()?)
            }
        })
    }

    /// Append arc `index` to `points`, sharing the joint with the previous arc.
    /// Negative indices (`!i`) reference arc `i` reversed.
    fn push_arc(&self, index: i64, points: &mut Vec<Point>) -> Result<()> {
        let reversed = index < 0;
        let k = if reversed { !index } else { index };
        let arc = usize::try_from(k)
            .ok()
            .and_then(|k| self.arcs.get(k))
            .ok_or_else(|| ChartError::Topology(format!("arc index {index} out of range")))?;
        points.pop();
        let start = points.len();
        points.extend_from_slice(arc);
        if reversed {
            points[start..].reverse();
        }
        Ok(())
    }

    fn line(&self, arcs: &[i64]) -> Result<Vec<Point>> {
        let mut points = Vec::new();
        for &i in arcs {
            self.push_arc(i, &mut points)?;
        }
        if points.len() < 2 {
            if let Some(&p) = points.first() {
                points.push(p);
            }
        }
        Ok(points)
    }

    fn ring(&self, arcs: &[i64]) -> Result<Vec<Point>> {
        let mut points = self.line(arcs)?;
        if let Some(&p) = points.first() {
            while points.len() < 4 {
                points.push(p);
            }
        }
        Ok(points)
    }

    fn polygon(&self, rings: &[Vec<i64>]) -> Result<Vec<Vec<Point>>> {
        rings.iter().map(|r| self.ring(r)).collect()
    }
}

fn id_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
