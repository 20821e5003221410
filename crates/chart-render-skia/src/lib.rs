// File: crates/chart-render-skia/src/lib.rs
// Summary: Headless PNG rendering of chart-core scenes using Skia CPU raster surfaces.

use anyhow::Result;
use chart_core::geometry::Rect;
use chart_core::scene::{Anchor, Node, PathCmd, Scene, Shape, Style};
use chart_core::Color;
use skia_safe as skia;
use tracing::debug;

pub struct RenderOptions {
    /// Device pixels per scene unit.
    pub scale: f32,
    /// Used when the scene has no background of its own.
    pub background: skia::Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { scale: 1.0, background: skia::Color::WHITE }
    }
}

/// Render `scene` and encode it as PNG bytes.
pub fn render_png_bytes(scene: &Scene, opts: &RenderOptions) -> Result<Vec<u8>> {
    let w = (scene.width as f32 * opts.scale).ceil().max(1.0) as i32;
    let h = (scene.height as f32 * opts.scale).ceil().max(1.0) as i32;
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| anyhow::anyhow!("failed to create {w}x{h} raster surface"))?;
    let canvas = surface.canvas();

    canvas.clear(scene.background.map(to_skia).unwrap_or(opts.background));
    canvas.save();
    canvas.scale((opts.scale, opts.scale));
    canvas.translate((scene.origin.x as f32, scene.origin.y as f32));
    for node in &scene.nodes {
        draw_node(canvas, node);
    }
    canvas.restore();

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    debug!(width = w, height = h, nodes = scene.nodes.len(), "rendered scene");
    Ok(data.as_bytes().to_vec())
}

/// Render `scene` to a PNG file, creating parent directories.
pub fn render_to_png(scene: &Scene, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
    let bytes = render_png_bytes(scene, opts)?;
    if let Some(parent) = output_png_path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_png_path, bytes)?;
    Ok(())
}

// ---- helpers ----------------------------------------------------------------

fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(255, c.r, c.g, c.b)
}

fn to_rect(r: &Rect) -> skia::Rect {
    skia::Rect::from_ltrb(r.left as f32, r.top as f32, r.right as f32, r.bottom as f32)
}

fn fill_paint(style: &Style) -> Option<skia::Paint> {
    let color = style.fill?;
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(to_skia(color));
    paint.set_alpha_f((style.fill_opacity * style.opacity) as f32);
    Some(paint)
}

fn stroke_paint(style: &Style) -> Option<skia::Paint> {
    let color = style.stroke?;
    if style.stroke_width <= 0.0 {
        return None;
    }
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(style.stroke_width as f32);
    paint.set_color(to_skia(color));
    paint.set_alpha_f(style.opacity as f32);
    Some(paint)
}

fn to_path(cmds: &[PathCmd]) -> skia::Path {
    let mut path = skia::Path::new();
    for c in cmds {
        match c {
            PathCmd::MoveTo(p) => { path.move_to((p.x as f32, p.y as f32)); }
            PathCmd::LineTo(p) => { path.line_to((p.x as f32, p.y as f32)); }
            PathCmd::Close => { path.close(); }
        }
    }
    path
}

fn draw_node(canvas: &skia::Canvas, node: &Node) {
    let fill = fill_paint(&node.style);
    let stroke = stroke_paint(&node.style);
    match &node.shape {
        Shape::Rect(r) => {
            let rect = to_rect(r);
            if let Some(p) = &fill { canvas.draw_rect(rect, p); }
            if let Some(p) = &stroke { canvas.draw_rect(rect, p); }
        }
        Shape::Path(cmds) => {
            let path = to_path(cmds);
            if let Some(p) = &fill { canvas.draw_path(&path, p); }
            if let Some(p) = &stroke { canvas.draw_path(&path, p); }
        }
        Shape::Circle { center, radius } => {
            let c = (center.x as f32, center.y as f32);
            if let Some(p) = &fill { canvas.draw_circle(c, *radius as f32, p); }
            if let Some(p) = &stroke { canvas.draw_circle(c, *radius as f32, p); }
        }
        Shape::Line { from, to } => {
            if let Some(p) = &stroke {
                canvas.draw_line((from.x as f32, from.y as f32), (to.x as f32, to.y as f32), p);
            }
        }
        Shape::Text { pos, text, anchor, size } => {
            let Some(paint) = &fill else { return };
            let mut font = skia::Font::default();
            font.set_size(*size as f32);
            let (width, _) = font.measure_str(text, Some(paint));
            let x = match anchor {
                Anchor::Start => pos.x as f32,
                Anchor::Middle => pos.x as f32 - width / 2.0,
                Anchor::End => pos.x as f32 - width,
            };
            canvas.draw_str(text, (x, pos.y as f32), &font, paint);
        }
    }
}
