//! OpenGL 4.6 implementation of [`GraphicsBackend`](crate::GraphicsBackend).
//!
//! Resources are created and edited through direct state access, so the only
//! context bindings that change are the ones the frame executor asks for.

mod backend;
mod query;

pub use backend::GlBackend;
