//! wgpu render backend for the cubeview viewer.
//!
//! Renders a single unit cube whose flat material color is modulated by a
//! procedural pattern texture. Camera uses an orbit model: drag to orbit,
//! scroll to zoom, secondary-drag to pan.
//!
//! # Invariants
//! - The renderer never mutates viewer settings; it reads them each frame.
//! - Pattern textures are uploaded only when the caller says the pattern
//!   changed, never per frame.

mod camera;
mod error;
mod gpu;
mod material;
mod shaders;

pub use camera::OrbitCamera;
pub use error::RenderError;
pub use gpu::CubeRenderer;
pub use material::ViewerSettings;
