//! Multi-pass GPU pipeline runtime.
//!
//! This crate ties together [`shaderpass_core`] (document, parameters and
//! naming rules), [`shaderpass_backend`] (the graphics API seam) and
//! [`shaderpass_window`] (window and GL context) into a runnable pipeline.
//!
//! # Overview
//!
//! - [`compiler`] builds one program per pass from the guarded stages.
//! - [`reflect`] maps a program's interface onto registry resources.
//! - [`ResourceRegistry`] owns every named texture and buffer.
//! - [`Pass`] is a compiled pass with its bindings.
//! - [`Engine`] loads a document and runs its passes once per tick.
//! - [`app`] wires the engine to a window for the `shaderpass` binary.

pub mod app;
pub mod compiler;
pub mod engine;
pub mod pass;
pub mod preamble;
pub mod reflect;
pub mod registry;

#[cfg(test)]
mod testing;

pub use engine::{BuiltinBuffers, Engine};
pub use pass::{Pass, PassState};
pub use registry::ResourceRegistry;
