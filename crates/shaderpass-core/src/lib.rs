//! Backend-independent building blocks for the shaderpass runtime.
//!
//! Everything in this crate is pure: it parses and describes a shader
//! document but never touches a GPU. The runtime crate (`shaderpass`) drives
//! a [`GraphicsBackend`](../shaderpass_backend/trait.GraphicsBackend.html)
//! with the information produced here.
//!
//! - [`Document`] discovers passes and stage guards and assembles per-stage
//!   compilation units.
//! - [`Params`] holds the key/value directives of one scope.
//! - [`naming`] decodes the texture and buffer naming conventions.
//! - [`EngineState`] is the per-frame state block shared with every pass,
//!   updated from [`InputEvent`]s.

pub mod bytes;
pub mod document;
pub mod error;
pub mod glsl_type;
pub mod inputs;
pub mod naming;
pub mod parameters;
pub mod stage;
pub mod state;

pub use bytes::AsBytes;
pub use document::{Document, SectionKeyword};
pub use error::{Error, ResourceKind, Result};
pub use glsl_type::{ComponentType, GlslType};
pub use inputs::InputEvent;
pub use parameters::{Params, Scope};
pub use stage::StageKind;
pub use state::{EngineState, FrameClock};
