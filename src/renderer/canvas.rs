//! Drawing surface abstraction
//!
//! The scene draws through `Canvas`; `VertexBatch` collects the result as
//! triangles for the GPU pipeline.

use super::shapes::{self, Rect};
use super::vertex::{Color, Vertex, colors};

/// A 2D surface that accepts solid fills
pub trait Canvas {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    /// Fill one rectangle
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// One frame's worth of colored triangles in surface pixels
#[derive(Debug, Clone)]
pub struct VertexBatch {
    pub clear_color: Color,
    pub vertices: Vec<Vertex>,
}

impl Default for VertexBatch {
    fn default() -> Self {
        Self {
            clear_color: colors::BACKGROUND,
            vertices: Vec::new(),
        }
    }
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rectangles recorded since the last clear
    pub fn rect_count(&self) -> usize {
        self.vertices.len() / 6
    }
}

impl Canvas for VertexBatch {
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        self.vertices.extend_from_slice(&shapes::rect(rect, color));
    }
}
