//! [`GlBackend`]: raw `gl` calls behind the backend trait.

use std::ffi::c_void;
use std::ptr;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLsizeiptr, GLuint};
use shaderpass_core::{ComponentType, StageKind};
use tracing::trace;

use super::query;
use crate::types::{
    BufferId, Capability, FramebufferId, IndirectTarget, InputInfo, OutputInfo, ProgramId,
    ShaderId, StorageBlockInfo, TextureBinding, TextureId, UniformInfo, VertexArrayId,
    VertexLayout,
};
use crate::GraphicsBackend;

/// Vertex buffers are always attached at this binding index.
const VERTEX_BINDING: GLuint = 0;

const CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

/// OpenGL backend for the context current on the calling thread.
///
/// GL function pointers must already be loaded and a 4.6 core context must
/// be current whenever a method is called.
#[derive(Debug, Default)]
pub struct GlBackend {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl GlBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn status(object: GLuint, pname: GLenum, get: unsafe fn(GLuint, GLenum, *mut GLint)) -> bool {
        let mut status: GLint = 0;
        unsafe { get(object, pname, &mut status) };
        status == gl::TRUE as GLint
    }
}

impl GraphicsBackend for GlBackend {
    fn create_shader(&mut self, stage: StageKind) -> ShaderId {
        ShaderId(unsafe { gl::CreateShader(stage.gl_enum()) })
    }

    fn compile_shader(&mut self, shader: ShaderId, source: &str) -> Result<(), String> {
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe {
            gl::ShaderSource(shader.0, 1, &ptr, &len);
            gl::CompileShader(shader.0);
        }

        if Self::status(shader.0, gl::COMPILE_STATUS, gl::GetShaderiv) {
            Ok(())
        } else {
            Err(query::shader_log(shader.0))
        }
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        unsafe { gl::DeleteShader(shader.0) }
    }

    fn create_program(&mut self) -> ProgramId {
        ProgramId(unsafe { gl::CreateProgram() })
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        unsafe { gl::AttachShader(program.0, shader.0) }
    }

    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        unsafe { gl::DetachShader(program.0, shader.0) }
    }

    fn link_program(&mut self, program: ProgramId) -> Result<(), String> {
        unsafe { gl::LinkProgram(program.0) };
        if Self::status(program.0, gl::LINK_STATUS, gl::GetProgramiv) {
            Ok(())
        } else {
            Err(query::program_log(program.0))
        }
    }

    fn validate_program(&mut self, program: ProgramId) -> Result<(), String> {
        unsafe { gl::ValidateProgram(program.0) };
        if Self::status(program.0, gl::VALIDATE_STATUS, gl::GetProgramiv) {
            Ok(())
        } else {
            Err(query::program_log(program.0))
        }
    }

    fn delete_program(&mut self, program: ProgramId) {
        unsafe { gl::DeleteProgram(program.0) }
    }

    fn active_uniforms(&self, program: ProgramId) -> Vec<UniformInfo> {
        (0..query::active_resources(program.0, gl::UNIFORM))
            .filter_map(|index| {
                let [ty, location, block] = query::resource_props(
                    program.0,
                    gl::UNIFORM,
                    index,
                    [gl::TYPE, gl::LOCATION, gl::BLOCK_INDEX],
                );
                (block == -1).then(|| UniformInfo {
                    name: query::resource_name(program.0, gl::UNIFORM, index),
                    ty: ty as GLenum,
                    location,
                })
            })
            .collect()
    }

    fn storage_blocks(&self, program: ProgramId) -> Vec<StorageBlockInfo> {
        let interface = gl::SHADER_STORAGE_BLOCK;
        (0..query::active_resources(program.0, interface))
            .map(|index| {
                let [binding, size] = query::resource_props(
                    program.0,
                    interface,
                    index,
                    [gl::BUFFER_BINDING, gl::BUFFER_DATA_SIZE],
                );
                StorageBlockInfo {
                    name: query::resource_name(program.0, interface, index),
                    binding: binding.max(0) as GLuint,
                    data_size: size.max(0) as usize,
                }
            })
            .collect()
    }

    fn program_inputs(&self, program: ProgramId) -> Vec<InputInfo> {
        let interface = gl::PROGRAM_INPUT;
        (0..query::active_resources(program.0, interface))
            .map(|index| {
                let [ty, location] =
                    query::resource_props(program.0, interface, index, [gl::TYPE, gl::LOCATION]);
                InputInfo {
                    name: query::resource_name(program.0, interface, index),
                    ty: ty as GLenum,
                    location,
                }
            })
            .collect()
    }

    fn program_outputs(&self, program: ProgramId) -> Vec<OutputInfo> {
        let interface = gl::PROGRAM_OUTPUT;
        (0..query::active_resources(program.0, interface))
            .map(|index| {
                let [location] = query::resource_props(program.0, interface, index, [gl::LOCATION]);
                OutputInfo {
                    name: query::resource_name(program.0, interface, index),
                    location,
                }
            })
            .collect()
    }

    fn create_texture(&mut self, width: u32, height: u32) -> TextureId {
        let mut texture: GLuint = 0;
        unsafe {
            gl::CreateTextures(gl::TEXTURE_2D, 1, &mut texture);
            gl::TextureStorage2D(texture, 1, gl::RGBA8, width as GLsizei, height as GLsizei);
            gl::TextureParameteri(texture, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
            gl::TextureParameteri(texture, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
            gl::TextureParameteri(texture, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
            gl::TextureParameteri(texture, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);
        }
        trace!(texture, width, height, "created texture");
        TextureId(texture)
    }

    fn delete_texture(&mut self, texture: TextureId) {
        unsafe { gl::DeleteTextures(1, &texture.0) }
    }

    fn create_buffer(&mut self, size: usize, data: Option<&[u8]>) -> BufferId {
        let mut buffer: GLuint = 0;
        let contents = data.map_or(ptr::null(), |bytes| bytes.as_ptr() as *const c_void);
        unsafe {
            gl::CreateBuffers(1, &mut buffer);
            gl::NamedBufferData(buffer, size as GLsizeiptr, contents, gl::DYNAMIC_DRAW);
        }
        trace!(buffer, size, "created buffer");
        BufferId(buffer)
    }

    fn write_buffer(&mut self, buffer: BufferId, data: &[u8]) {
        unsafe {
            gl::NamedBufferData(
                buffer.0,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::DYNAMIC_DRAW,
            );
        }
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        unsafe { gl::DeleteBuffers(1, &buffer.0) }
    }

    fn create_framebuffer(&mut self, attachments: &[(u32, TextureId)]) -> FramebufferId {
        let mut framebuffer: GLuint = 0;
        unsafe { gl::CreateFramebuffers(1, &mut framebuffer) };

        let slots = attachments.iter().map(|&(index, _)| index + 1).max().unwrap_or(0);
        let mut draw_buffers = vec![gl::NONE; slots as usize];
        for &(index, texture) in attachments {
            let attachment = gl::COLOR_ATTACHMENT0 + index;
            unsafe { gl::NamedFramebufferTexture(framebuffer, attachment, texture.0, 0) };
            draw_buffers[index as usize] = attachment;
        }
        unsafe {
            gl::NamedFramebufferDrawBuffers(
                framebuffer,
                draw_buffers.len() as GLsizei,
                draw_buffers.as_ptr(),
            );
        }

        FramebufferId(framebuffer)
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId) {
        unsafe { gl::DeleteFramebuffers(1, &framebuffer.0) }
    }

    fn create_vertex_array(
        &mut self,
        layout: &VertexLayout,
        vertices: BufferId,
        indices: Option<BufferId>,
    ) -> VertexArrayId {
        let mut vao: GLuint = 0;
        unsafe {
            gl::CreateVertexArrays(1, &mut vao);
            gl::VertexArrayVertexBuffer(vao, VERTEX_BINDING, vertices.0, 0, layout.stride);

            for attribute in &layout.attributes {
                let location = attribute.location;
                let ty = attribute.component.gl_enum();
                gl::EnableVertexArrayAttrib(vao, location);
                match attribute.component {
                    ComponentType::Float => gl::VertexArrayAttribFormat(
                        vao,
                        location,
                        attribute.components,
                        ty,
                        gl::FALSE,
                        attribute.offset,
                    ),
                    ComponentType::Double => gl::VertexArrayAttribLFormat(
                        vao,
                        location,
                        attribute.components,
                        ty,
                        attribute.offset,
                    ),
                    ComponentType::Int | ComponentType::UnsignedInt | ComponentType::Bool => {
                        gl::VertexArrayAttribIFormat(
                            vao,
                            location,
                            attribute.components,
                            ty,
                            attribute.offset,
                        )
                    }
                }
                gl::VertexArrayAttribBinding(vao, location, VERTEX_BINDING);
            }

            if let Some(indices) = indices {
                gl::VertexArrayElementBuffer(vao, indices.0);
            }
        }
        VertexArrayId(vao)
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) {
        unsafe { gl::DeleteVertexArrays(1, &vertex_array.0) }
    }

    fn enable(&mut self, capability: Capability) {
        unsafe { gl::Enable(capability.gl_enum()) }
    }

    fn viewport(&mut self, width: i32, height: i32) {
        unsafe { gl::Viewport(0, 0, width, height) }
    }

    fn clear(&mut self) {
        let [r, g, b, a] = CLEAR_COLOR;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    fn use_program(&mut self, program: ProgramId) {
        unsafe { gl::UseProgram(program.0) }
    }

    fn bind_storage_buffer(&mut self, binding: u32, buffer: BufferId) {
        unsafe { gl::BindBufferBase(gl::SHADER_STORAGE_BUFFER, binding, buffer.0) }
    }

    fn bind_indirect_buffer(&mut self, target: IndirectTarget, buffer: BufferId) {
        unsafe { gl::BindBuffer(target.gl_enum(), buffer.0) }
    }

    fn bind_texture(
        &mut self,
        unit: u32,
        texture: TextureId,
        binding: TextureBinding,
        location: i32,
    ) {
        unsafe {
            gl::Uniform1i(location, unit as GLint);
            match binding {
                TextureBinding::Image => gl::BindImageTexture(
                    unit,
                    texture.0,
                    0,
                    gl::FALSE,
                    0,
                    gl::READ_WRITE,
                    gl::RGBA8,
                ),
                TextureBinding::Sampler => gl::BindTextureUnit(unit, texture.0),
            }
        }
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>) {
        unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, framebuffer.map_or(0, |f| f.0)) }
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>) {
        unsafe { gl::BindVertexArray(vertex_array.map_or(0, |v| v.0)) }
    }

    fn dispatch_indirect(&mut self) {
        unsafe { gl::DispatchComputeIndirect(0) }
    }

    fn memory_barrier(&mut self) {
        unsafe {
            gl::MemoryBarrier(
                gl::COMMAND_BARRIER_BIT
                    | gl::SHADER_STORAGE_BARRIER_BIT
                    | gl::SHADER_IMAGE_ACCESS_BARRIER_BIT
                    | gl::VERTEX_ATTRIB_ARRAY_BARRIER_BIT
                    | gl::ELEMENT_ARRAY_BARRIER_BIT,
            );
        }
    }

    fn multi_draw_indirect(&mut self, indexed: bool, max_draws: i32, stride: i32) {
        unsafe {
            if indexed {
                gl::MultiDrawElementsIndirect(
                    gl::TRIANGLES,
                    gl::UNSIGNED_INT,
                    ptr::null(),
                    max_draws,
                    stride,
                );
            } else {
                gl::MultiDrawArraysIndirect(gl::TRIANGLES, ptr::null(), max_draws, stride);
            }
        }
    }
}
