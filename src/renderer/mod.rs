//! WebGPU rendering module
//!
//! The scene is rebuilt every frame as a flat-colored triangle list in play
//! coordinates and drawn in a single pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, play_to_ndc};
pub use scene::{AvatarPose, SceneView, build_scene};
pub use vertex::Vertex;
