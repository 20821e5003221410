// File: crates/chart-core/src/scene.rs
// Summary: Renderer-agnostic drawing primitives and the SVG serializer.
//
// Node coordinates are in plot space; the scene origin translates plot space
// into container space (the margins). Back ends draw nodes in order.

use std::fmt::Write;

use crate::geometry::{Point, Rect};
use crate::types::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

/// Build path commands for a polyline, optionally closed.
pub fn polyline(points: &[Point], close: bool) -> Vec<PathCmd> {
    let mut cmds = Vec::with_capacity(points.len() + 1);
    for (i, p) in points.iter().enumerate() {
        cmds.push(if i == 0 { PathCmd::MoveTo(*p) } else { PathCmd::LineTo(*p) });
    }
    if close && !cmds.is_empty() {
        cmds.push(PathCmd::Close);
    }
    cmds
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect(Rect),
    Path(Vec<PathCmd>),
    Circle { center: Point, radius: f64 },
    Line { from: Point, to: Point },
    Text { pos: Point, text: String, anchor: Anchor, size: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub fill_opacity: f64,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self { fill: None, fill_opacity: 1.0, stroke: None, stroke_width: 0.0, opacity: 1.0 }
    }
}

impl Style {
    pub fn fill(color: Color) -> Self {
        Self { fill: Some(color), ..Self::default() }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self { stroke: Some(color), stroke_width: width, ..Self::default() }
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }
}

/// Interactive element a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Stacked-column segment by category index.
    Segment(usize),
    /// Stacked-area layer by key index.
    Layer(usize),
    /// Map region by feature index.
    Region(usize),
    /// Legend entry by index.
    LegendItem(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub class: &'static str,
    pub role: Option<Role>,
    pub shape: Shape,
    pub style: Style,
}

impl Node {
    pub fn new(class: &'static str, shape: Shape, style: Style) -> Self {
        Self { class, role: None, shape, style }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    /// Plot origin in container space.
    pub origin: Point,
    pub background: Option<Color>,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(width: f64, height: f64, origin: Point) -> Self {
        Self { width, height, origin, background: None, nodes: Vec::new() }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.nodes.extend(nodes);
    }

    pub fn nodes_with_role(&self, role: Role) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.role == Some(role))
    }

    pub fn nodes_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| n.class == class)
    }

    /// Serialize as a standalone SVG document scaled by its viewBox.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_svg(&mut out);
        out
    }

    fn write_svg(&self, out: &mut String) -> std::fmt::Result {
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" preserveAspectRatio="xMinYMin meet">"#,
            num(self.width),
            num(self.height)
        )?;
        if let Some(bg) = self.background {
            writeln!(out, r#"<rect width="100%" height="100%" fill="{bg}"/>"#)?;
        }
        writeln!(out, r#"<g transform="translate({},{})">"#, num(self.origin.x), num(self.origin.y))?;
        for node in &self.nodes {
            write_node(out, node)?;
        }
        writeln!(out, "</g>")?;
        writeln!(out, "</svg>")
    }
}

fn write_node(out: &mut String, node: &Node) -> std::fmt::Result {
    let style = style_attrs(&node.style);
    let class = node.class;
    match &node.shape {
        Shape::Rect(r) => writeln!(
            out,
            r#"<rect class="{class}" x="{}" y="{}" width="{}" height="{}"{style}/>"#,
            num(r.left),
            num(r.top),
            num(r.width()),
            num(r.height())
        ),
        Shape::Path(cmds) => writeln!(out, r#"<path class="{class}" d="{}"{style}/>"#, path_data(cmds)),
        Shape::Circle { center, radius } => writeln!(
            out,
            r#"<circle class="{class}" cx="{}" cy="{}" r="{}"{style}/>"#,
            num(center.x),
            num(center.y),
            num(*radius)
        ),
        Shape::Line { from, to } => writeln!(
            out,
            r#"<line class="{class}" x1="{}" y1="{}" x2="{}" y2="{}"{style}/>"#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y)
        ),
        Shape::Text { pos, text, anchor, size } => writeln!(
            out,
            r#"<text class="{class}" x="{}" y="{}" text-anchor="{}" font-size="{}"{style}>{}</text>"#,
            num(pos.x),
            num(pos.y),
            anchor.as_str(),
            num(*size),
            xml_escape(text)
        ),
    }
}

fn style_attrs(s: &Style) -> String {
    let mut out = String::new();
    match s.fill {
        Some(c) => { let _ = write!(out, r#" fill="{c}""#); }
        None => out.push_str(r#" fill="none""#),
    }
    if s.fill_opacity < 1.0 {
        let _ = write!(out, r#" fill-opacity="{}""#, num(s.fill_opacity));
    }
    if let Some(c) = s.stroke {
        let _ = write!(out, r#" stroke="{c}" stroke-width="{}""#, num(s.stroke_width));
    }
    if s.opacity < 1.0 {
        let _ = write!(out, r#" opacity="{}""#, num(s.opacity));
    }
    out
}

/// SVG path `d` attribute for `cmds`.
pub fn path_data(cmds: &[PathCmd]) -> String {
    let mut d = String::new();
    for c in cmds {
        let _ = match c {
            PathCmd::MoveTo(p) => write!(d, "M{},{}", num(p.x), num(p.y)),
            PathCmd::LineTo(p) => write!(d, "L{},{}", num(p.x), num(p.y)),
            PathCmd::Close => write!(d, "Z"),
        };
    }
    d
}

/// Three decimals, trailing zeros trimmed.
fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Escape the five XML special characters.
fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
