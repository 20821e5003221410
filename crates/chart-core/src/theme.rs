// File: crates/chart-core/src/theme.rs
// Summary: Declared palettes and neutral colors used by the chart pipelines.

use crate::types::Color;

/// Neutral colors for axes, strokes and guides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub region_stroke: Color,
    /// Fill for regions without data or bucket.
    pub missing_fill: Color,
    pub highlight_stroke: Color,
    pub guide_line: Color,
    pub marker_stroke: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::WHITE,
            axis_line: Color::BLACK,
            axis_label: Color::BLACK,
            region_stroke: Color::BLACK,
            missing_fill: Color::WHITE,
            highlight_stroke: Color::WHITE,
            guide_line: Color::rgb(0x99, 0x99, 0x99),
            marker_stroke: Color::WHITE,
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Stacked-area categories, bottom of the stack first.
pub const AREA_CATEGORIES: [&str; 5] = ["Rest of the World", "China", "U.S.", "Germany", "India"];

pub const AREA_PALETTE: [Color; 5] = [
    Color::rgb(0xeb, 0x52, 0x50),
    Color::rgb(0x62, 0x98, 0xc6),
    Color::rgb(0x75, 0xbf, 0x70),
    Color::rgb(0xae, 0x71, 0xb6),
    Color::rgb(0xf3, 0x8f, 0x53),
];

pub const COLUMN_PALETTE: [Color; 7] = [
    Color::rgb(0x31, 0x67, 0xa4),
    Color::rgb(0x8f, 0xc8, 0xe5),
    Color::rgb(0x38, 0x66, 0x60),
    Color::rgb(0xe2, 0xe2, 0x7a),
    Color::rgb(0xff, 0xcb, 0x03),
    Color::rgb(0xce, 0x58, 0x45),
    Color::rgb(0xed, 0x97, 0x4a),
];

/// Owned copies of a palette/category constant.
pub fn owned_keys(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}
