// File: crates/chart-core/src/axis.rs
// Summary: Axis model with ticks and labels, emitted as scene nodes.

use crate::geometry::Point;
use crate::scene::{Anchor, Node, PathCmd, Shape, Style};
use crate::theme::Theme;

pub const TICK_FONT_SIZE: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Left,
    Bottom,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Pixel position along the axis.
    pub pos: f64,
    pub label: String,
    pub anchor: Anchor,
}

impl Tick {
    pub fn new(pos: f64, label: impl Into<String>) -> Self {
        Self { pos, label: label.into(), anchor: Anchor::Middle }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub orientation: Orientation,
    /// Pixel extent of the axis line, `(start, end)`.
    pub range: (f64, f64),
    /// Perpendicular offset (a bottom axis sits at `inner_height`).
    pub offset: f64,
    pub ticks: Vec<Tick>,
    pub label: Option<String>,
    pub tick_size_inner: f64,
    pub tick_size_outer: f64,
    pub tick_padding: f64,
}

impl Axis {
    pub fn new(orientation: Orientation, range: (f64, f64), offset: f64, ticks: Vec<Tick>) -> Self {
        Self {
            orientation,
            range,
            offset,
            ticks,
            label: None,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
        }
    }

    pub fn left(range: (f64, f64), ticks: Vec<Tick>) -> Self {
        let ticks = ticks.into_iter().map(|t| Tick { anchor: Anchor::End, ..t }).collect();
        Self::new(Orientation::Left, range, 0.0, ticks)
    }

    pub fn bottom(range: (f64, f64), offset: f64, ticks: Vec<Tick>) -> Self {
        Self::new(Orientation::Bottom, range, offset, ticks)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn tick_sizes(mut self, inner: f64, outer: f64) -> Self {
        self.tick_size_inner = inner;
        self.tick_size_outer = outer;
        self
    }

    pub fn tick_padding(mut self, padding: f64) -> Self {
        self.tick_padding = padding;
        self
    }

    /// Domain line, tick marks, tick labels and the optional axis label.
    /// `label_offset` places the axis label above a left axis (negative y).
    pub fn nodes(&self, theme: &Theme, label_offset: f64) -> Vec<Node> {
        let line = Style::stroke(theme.axis_line, 1.0);
        let text = Style::fill(theme.axis_label);
        let (r0, r1) = self.range;
        let outer = self.tick_size_outer;
        let mut nodes = Vec::with_capacity(self.ticks.len() * 2 + 2);

        let domain = match self.orientation {
            Orientation::Left => vec![
                PathCmd::MoveTo(Point::new(-outer, r0)),
                PathCmd::LineTo(Point::new(0.0, r0)),
                PathCmd::LineTo(Point::new(0.0, r1)),
                PathCmd::LineTo(Point::new(-outer, r1)),
            ],
            Orientation::Bottom => vec![
                PathCmd::MoveTo(Point::new(r0, self.offset + outer)),
                PathCmd::LineTo(Point::new(r0, self.offset)),
                PathCmd::LineTo(Point::new(r1, self.offset)),
                PathCmd::LineTo(Point::new(r1, self.offset + outer)),
            ],
        };
        nodes.push(Node::new("domain", Shape::Path(domain), line));

        let spacing = self.tick_size_inner.max(0.0) + self.tick_padding;
        for t in &self.ticks {
            let (mark, label_pos) = match self.orientation {
                Orientation::Left => (
                    Shape::Line { from: Point::new(-self.tick_size_inner, t.pos), to: Point::new(0.0, t.pos) },
                    Point::new(-spacing, t.pos + TICK_FONT_SIZE * 0.32),
                ),
                Orientation::Bottom => (
                    Shape::Line {
                        from: Point::new(t.pos, self.offset),
                        to: Point::new(t.pos, self.offset + self.tick_size_inner),
                    },
                    Point::new(t.pos, self.offset + spacing + TICK_FONT_SIZE * 0.71),
                ),
            };
            if self.tick_size_inner > 0.0 {
                nodes.push(Node::new("tick", mark, line));
            }
            nodes.push(Node::new(
                "chart-labels",
                Shape::Text { pos: label_pos, text: t.label.clone(), anchor: t.anchor, size: TICK_FONT_SIZE },
                text,
            ));
        }

        if let Some(label) = &self.label {
            let pos = match self.orientation {
                Orientation::Left => Point::new(0.0, -label_offset),
                Orientation::Bottom => Point::new((r0 + r1) * 0.5, self.offset + label_offset),
            };
            nodes.push(Node::new(
                "chart-labels",
                Shape::Text { pos, text: label.clone(), anchor: Anchor::Middle, size: TICK_FONT_SIZE },
                text,
            ));
        }
        nodes
    }
}
