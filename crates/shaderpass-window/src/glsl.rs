//! GLSL version detection.

use glium::CapabilitiesSource;
use shaderpass_core::Error;

/// Oldest GLSL version able to compile the engine preamble.
pub const REQUIRED_GLSL: glium::Version = glium::Version(glium::Api::Gl, 4, 6);

/// Whether the context accepts `#version 460 core` shaders.
pub fn supports_required_glsl(ctx: &impl CapabilitiesSource) -> bool {
    ctx.get_capabilities()
        .supported_glsl_versions
        .iter()
        .any(|v| *v >= REQUIRED_GLSL)
}

/// Fail with a configuration error when the context is too old.
pub fn require_glsl(ctx: &impl CapabilitiesSource) -> Result<(), Error> {
    if supports_required_glsl(ctx) {
        Ok(())
    } else {
        let versions = &ctx.get_capabilities().supported_glsl_versions;
        Err(Error::configuration(format!(
            "GLSL 4.60 is required, the context supports {versions:?}"
        )))
    }
}
