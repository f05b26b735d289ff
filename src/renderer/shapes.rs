//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::{Color, Vertex};

/// Axis-aligned rectangle in surface pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Nothing to draw
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }
}

/// Generate the two triangles covering a filled rectangle
pub fn rect(rect: Rect, color: Color) -> [Vertex; 6] {
    let a = rect.min;
    let c = rect.max();
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, a.y, color),
        Vertex::new(a.x, c.y, color),
        Vertex::new(a.x, c.y, color),
        Vertex::new(c.x, a.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}
