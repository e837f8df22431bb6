// Shared pointer state, written by mouse listeners and read each frame.

use vecmath::Vector2;

#[derive(Debug, Clone, Copy)]
pub struct PointerState {
    pos: Option<Vector2<f64>>,
    radius: f64,
}

impl PointerState {
    pub const DEFAULT_RADIUS: f64 = 120.0;

    pub fn new() -> PointerState {
        PointerState {
            pos: None,
            radius: Self::DEFAULT_RADIUS,
        }
    }

    pub fn set(&mut self, x: f64, y: f64) {
        self.pos = Some([x, y]);
    }

    /// Called when the pointer leaves the document; repulsion stops
    /// applying until the next move event.
    pub fn clear(&mut self) {
        self.pos = None;
    }

    pub fn position(&self) -> Option<Vector2<f64>> {
        self.pos
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}
