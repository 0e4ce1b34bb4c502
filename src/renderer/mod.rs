//! WebGPU rendering module
//!
//! Shapes are tessellated on the CPU in field coordinates and drawn with a
//! single flat-color pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene;
pub use vertex::Vertex;
