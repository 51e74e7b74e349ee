//! Graphics API seam for the shaderpass runtime.
//!
//! This crate defines the [`GraphicsBackend`] trait, the set of GPU
//! operations the pass compiler and frame executor issue, together with the
//! handle and reflection types that cross it. [`gl::GlBackend`] implements it
//! on OpenGL 4.6 with direct state access.

pub mod backend;
pub mod gl;
pub mod types;

pub use backend::GraphicsBackend;
pub use types::{
    BufferId, Capability, FramebufferId, IndirectTarget, InputInfo, OutputInfo, ProgramId, ShaderId,
    StorageBlockInfo, TextureBinding, TextureId, UniformInfo, VertexArrayId, VertexAttribute,
    VertexLayout,
};
