//! Rendering module
//!
//! The scene draws through the `Canvas` trait; `VertexBatch` turns the fills
//! into triangles that `RenderState` presents with WebGPU.

pub mod canvas;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use canvas::{Canvas, VertexBatch};
pub use pipeline::RenderState;
pub use scene::draw;
pub use shapes::Rect;
