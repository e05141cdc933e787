//! WebGPU rendering module
//!
//! Scenes are built on the CPU as screen-space triangle lists and drawn by a
//! single flat-colour pipeline.

pub mod canvas;
pub mod font;
pub mod pipeline;
pub mod runners_scene;
pub mod shapes;
pub mod tag_scene;
pub mod vertex;

pub use canvas::Canvas;
pub use pipeline::RenderState;
pub use vertex::Vertex;
