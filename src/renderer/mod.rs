//! WebGPU rendering module
//!
//! The scene is built as flat-colored triangles in screen coordinates and
//! drawn with a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{build_scene, score_label, status_label};
pub use vertex::Vertex;
