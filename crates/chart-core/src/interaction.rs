// File: crates/chart-core/src/interaction.rs
// Summary: Pointer events, hover state and tooltip content shared by every chart.

use crate::geometry::Point;
use crate::scene::Role;
use crate::types::Color;

/// Pointer event in plot coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Enter(Point),
    Move(Point),
    Leave,
}

/// What the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hover {
    /// Highlighted element, if any.
    pub role: Option<Role>,
    /// Data record under the pointer (time-series charts).
    pub record: Option<usize>,
}

impl Hover {
    pub fn element(role: Role) -> Self {
        Self { role: Some(role), record: None }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipRow {
    pub swatch: Option<Color>,
    pub label: String,
    pub value: String,
}

impl TooltipRow {
    pub fn new(swatch: Option<Color>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { swatch, label: label.into(), value: value.into() }
    }
}

/// Structured tooltip content; markup is left to the host.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub swatch: Option<Color>,
    pub rows: Vec<TooltipRow>,
    pub total: Option<TooltipRow>,
    /// Top-left corner in container coordinates.
    pub position: Point,
    pub opacity: f64,
}

/// Transient hover state; cleared on pointer leave.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
    pub hover: Option<Hover>,
    pub pointer: Option<Point>,
    pub tooltip: Option<Tooltip>,
}

impl InteractionState {
    pub fn hovered_role(&self) -> Option<Role> {
        self.hover.and_then(|h| h.role)
    }

    pub fn hovered_record(&self) -> Option<usize> {
        self.hover.and_then(|h| h.record)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Hit testing and tooltip content of a chart.
pub trait Interactive {
    /// Element/record under plot point `p`.
    fn hit_test(&self, p: Point) -> Option<Hover>;
    /// Tooltip for `hover` with the pointer at plot point `p`.
    fn tooltip(&self, hover: &Hover, p: Point) -> Option<Tooltip>;
}

/// Apply one pointer event: enter/move update hover and tooltip, leave restores defaults.
pub fn handle_pointer<C: Interactive + ?Sized>(chart: &C, state: &mut InteractionState, event: PointerEvent) {
    match event {
        PointerEvent::Enter(p) | PointerEvent::Move(p) => match chart.hit_test(p) {
            Some(hover) => {
                state.tooltip = chart.tooltip(&hover, p);
                state.hover = Some(hover);
                state.pointer = Some(p);
            }
            None => state.clear(),
        },
        PointerEvent::Leave => state.clear(),
    }
}

/// Opacity of `role` given the hovered element: full when hovered or idle, `dim` otherwise.
pub fn emphasis(hovered: Option<Role>, role: Role, dim: f64) -> f64 {
    match hovered {
        Some(h) if h != role => dim,
        _ => 1.0,
    }
}
