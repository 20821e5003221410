// File: crates/chart-core/src/color.rs
// Summary: Ordinal color scale (category key -> palette color, declaration order).

use crate::types::Color;

#[derive(Clone, Debug, PartialEq)]
pub struct OrdinalScale {
    domain: Vec<String>,
    palette: Vec<Color>,
}

impl OrdinalScale {
    /// Keys are assigned palette entries in order, cycling when the palette is shorter.
    pub fn new(domain: Vec<String>, palette: Vec<Color>) -> Self {
        Self { domain, palette }
    }

    /// Color for `key`; `None` for keys outside the domain or an empty palette.
    pub fn get(&self, key: &str) -> Option<Color> {
        if self.palette.is_empty() { return None; }
        self.domain
            .iter()
            .position(|k| k == key)
            .map(|i| self.palette[i % self.palette.len()])
    }

    /// Color for `key`, or `fallback` when unmapped.
    pub fn get_or(&self, key: &str, fallback: Color) -> Color {
        self.get(key).unwrap_or(fallback)
    }

    pub fn domain(&self) -> &[String] { &self.domain }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.domain.iter().position(|k| k == key)
    }
}
