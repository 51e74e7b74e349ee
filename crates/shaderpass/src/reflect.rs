//! Turns a linked program's interface into registry resources.
//!
//! - `image2D` / `sampler2D` uniforms name textures.
//! - Fragment outputs name render targets, except a lone `defaultOutput`.
//!   Built-in outputs such as `gl_FragDepth` are ignored.
//! - Storage blocks other than the reserved ones name buffers. They may not
//!   use a reserved binding point.
//! - Vertex inputs become a tightly packed layout over one buffer.

use shaderpass_backend::{
    BufferId, GraphicsBackend, InputInfo, OutputInfo, ProgramId, TextureBinding, TextureId,
    VertexAttribute, VertexLayout,
};
use shaderpass_core::{Error, GlslType, Result};
use tracing::debug;

use crate::preamble::{is_reserved_binding, is_reserved_block};
use crate::registry::ResourceRegistry;

/// Output name that selects the default framebuffer.
pub const DEFAULT_OUTPUT: &str = "defaultOutput";

/// A texture bound for one pass, in reflection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundTexture {
    pub name: String,
    pub texture: TextureId,
    pub binding: TextureBinding,
    pub location: i32,
}

/// A storage buffer bound for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundBuffer {
    pub name: String,
    pub buffer: BufferId,
    pub binding: u32,
}

pub fn textures<B: GraphicsBackend + ?Sized>(
    backend: &mut B,
    registry: &mut ResourceRegistry,
    pass: usize,
    program: ProgramId,
) -> Result<Vec<BoundTexture>> {
    let mut bound = Vec::new();
    for uniform in backend.active_uniforms(program) {
        let binding = match GlslType::from_gl(uniform.ty) {
            Some(GlslType::Image2D) => TextureBinding::Image,
            Some(GlslType::Sampler2D) => TextureBinding::Sampler,
            _ => {
                return Err(Error::UnsupportedInterface {
                    pass,
                    name: uniform.name,
                    ty: uniform.ty,
                })
            }
        };
        let texture = registry.resolve_texture(backend, &uniform.name)?;
        debug!(pass, name = %uniform.name, ?binding, location = uniform.location, "bound texture");
        bound.push(BoundTexture {
            name: uniform.name,
            texture,
            binding,
            location: uniform.location,
        });
    }
    Ok(bound)
}

/// Built-in outputs never name a render target.
pub fn is_builtin_output(output: &OutputInfo) -> bool {
    output.name.starts_with("gl_") || output.location < 0
}

/// Whether `outputs` render straight to the default framebuffer.
pub fn uses_default_framebuffer(outputs: &[OutputInfo]) -> bool {
    let mut user = outputs.iter().filter(|o| !is_builtin_output(o));
    match (user.next(), user.next()) {
        (None, _) => true,
        (Some(only), None) => only.name == DEFAULT_OUTPUT,
        _ => false,
    }
}

/// Color attachments for the program's outputs, empty when the pass draws
/// to the default framebuffer.
pub fn render_targets<B: GraphicsBackend + ?Sized>(
    backend: &mut B,
    registry: &mut ResourceRegistry,
    program: ProgramId,
) -> Result<Vec<(u32, TextureId)>> {
    let outputs = backend.program_outputs(program);
    if uses_default_framebuffer(&outputs) {
        return Ok(Vec::new());
    }

    let mut attachments = Vec::with_capacity(outputs.len());
    for output in outputs.iter().filter(|o| !is_builtin_output(o)) {
        let texture = registry.resolve_texture(backend, &output.name)?;
        attachments.push((output.location as u32, texture));
    }
    Ok(attachments)
}

pub fn storage_buffers<B: GraphicsBackend + ?Sized>(
    backend: &mut B,
    registry: &mut ResourceRegistry,
    pass: usize,
    program: ProgramId,
) -> Result<Vec<BoundBuffer>> {
    let mut bound = Vec::new();
    for block in backend.storage_blocks(program) {
        if is_reserved_block(&block.name) {
            continue;
        }
        if is_reserved_binding(block.binding) {
            return Err(Error::configuration(format!(
                "pass {pass}: storage block {} uses reserved binding {}",
                block.name, block.binding
            )));
        }
        let buffer = registry.resolve_buffer(backend, &block.name, block.data_size)?;
        debug!(pass, name = %block.name, binding = block.binding, "bound storage buffer");
        bound.push(BoundBuffer {
            name: block.name,
            buffer,
            binding: block.binding,
        });
    }
    Ok(bound)
}

/// Built-in inputs are not fed from the vertex buffer.
pub fn is_builtin_input(input: &InputInfo) -> bool {
    input.name.starts_with("gl_") || input.location < 0
}

/// Pack the user inputs in location order with no padding.
pub fn vertex_layout(pass: usize, inputs: &[InputInfo]) -> Result<VertexLayout> {
    let mut inputs: Vec<&InputInfo> = inputs.iter().filter(|i| !is_builtin_input(i)).collect();
    inputs.sort_by_key(|input| input.location);

    let mut layout = VertexLayout::default();
    let mut offset: usize = 0;
    for input in inputs {
        let unsupported = || Error::UnsupportedInterface {
            pass,
            name: input.name.clone(),
            ty: input.ty,
        };
        let (components, component) = GlslType::from_gl(input.ty)
            .and_then(GlslType::vertex_format)
            .ok_or_else(unsupported)?;

        layout.attributes.push(VertexAttribute {
            location: input.location as u32,
            components,
            component,
            offset: offset as u32,
        });
        offset += components as usize * component.size_bytes();
    }
    layout.stride = offset as i32;
    Ok(layout)
}
