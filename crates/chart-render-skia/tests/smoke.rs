// File: crates/chart-render-skia/tests/smoke.rs
// Purpose: End-to-end raster smoke test: scene -> PNG bytes -> decoded pixels.

use chart_core::geometry::{Point, Rect};
use chart_core::scene::{Node, Scene, Shape, Style};
use chart_core::Color;
use chart_render_skia::{render_png_bytes, render_to_png, RenderOptions};

fn red_square_scene() -> Scene {
    let mut scene = Scene::new(40.0, 30.0, Point::new(10.0, 5.0));
    scene.push(Node::new(
        "layer",
        Shape::Rect(Rect::from_ltwh(0.0, 0.0, 20.0, 20.0)),
        Style::fill(Color::rgb(255, 0, 0)),
    ));
    scene
}

#[test]
fn render_smoke_png() {
    let scene = red_square_scene();
    let bytes = render_png_bytes(&scene, &RenderOptions::default()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!((img.width(), img.height()), (40, 30));
    // Inside the translated square.
    let inside = img.get_pixel(20, 15);
    assert_eq!((inside[0], inside[1], inside[2]), (255, 0, 0));
    // Background outside it.
    let outside = img.get_pixel(2, 2);
    assert_eq!((outside[0], outside[1], outside[2]), (255, 255, 255));
}

#[test]
fn render_scaled_to_file() {
    let scene = red_square_scene();
    let out = std::path::PathBuf::from("target/test_out/red_square.png");
    let opts = RenderOptions { scale: 2.0, ..RenderOptions::default() };
    render_to_png(&scene, &opts, &out).expect("render should succeed");
    let img = image::open(&out).expect("output exists").to_rgba8();
    assert_eq!((img.width(), img.height()), (80, 60));
}
