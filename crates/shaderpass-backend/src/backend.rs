//! The [`GraphicsBackend`] trait.

use shaderpass_core::StageKind;

use crate::types::{
    BufferId, Capability, FramebufferId, IndirectTarget, InputInfo, OutputInfo, ProgramId,
    ShaderId, StorageBlockInfo, TextureBinding, TextureId, UniformInfo, VertexArrayId,
    VertexLayout,
};

/// GPU operations needed to build and run a pass pipeline.
///
/// Implementations are bound to the thread owning the graphics context.
/// Object creation never fails at this level; compile, link and validate
/// report failure through their `Err` value, which carries the driver's
/// info log.
pub trait GraphicsBackend {
    // Shaders and programs

    fn create_shader(&mut self, stage: StageKind) -> ShaderId;

    /// Upload `source` and compile it.
    fn compile_shader(&mut self, shader: ShaderId, source: &str) -> Result<(), String>;

    fn delete_shader(&mut self, shader: ShaderId);

    fn create_program(&mut self) -> ProgramId;

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId);

    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId);

    fn link_program(&mut self, program: ProgramId) -> Result<(), String>;

    fn validate_program(&mut self, program: ProgramId) -> Result<(), String>;

    fn delete_program(&mut self, program: ProgramId);

    // Interface reflection on a linked program

    /// Active uniforms that are not members of a block.
    fn active_uniforms(&self, program: ProgramId) -> Vec<UniformInfo>;

    fn storage_blocks(&self, program: ProgramId) -> Vec<StorageBlockInfo>;

    fn program_inputs(&self, program: ProgramId) -> Vec<InputInfo>;

    fn program_outputs(&self, program: ProgramId) -> Vec<OutputInfo>;

    // Resources

    /// Create an immutable RGBA8 texture with a single mip level.
    fn create_texture(&mut self, width: u32, height: u32) -> TextureId;

    fn delete_texture(&mut self, texture: TextureId);

    /// Create a buffer of `size` bytes, optionally filled from `data`.
    fn create_buffer(&mut self, size: usize, data: Option<&[u8]>) -> BufferId;

    /// Replace the contents of `buffer` with `data`.
    fn write_buffer(&mut self, buffer: BufferId, data: &[u8]);

    fn delete_buffer(&mut self, buffer: BufferId);

    /// Create a framebuffer with each texture attached at
    /// `COLOR_ATTACHMENT0 + index`.
    fn create_framebuffer(&mut self, attachments: &[(u32, TextureId)]) -> FramebufferId;

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId);

    fn create_vertex_array(
        &mut self,
        layout: &VertexLayout,
        vertices: BufferId,
        indices: Option<BufferId>,
    ) -> VertexArrayId;

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId);

    // Global state

    fn enable(&mut self, capability: Capability);

    fn viewport(&mut self, width: i32, height: i32);

    /// Clear color and depth of the default framebuffer.
    fn clear(&mut self);

    // Per-pass binding

    fn use_program(&mut self, program: ProgramId);

    fn bind_storage_buffer(&mut self, binding: u32, buffer: BufferId);

    fn bind_indirect_buffer(&mut self, target: IndirectTarget, buffer: BufferId);

    /// Bind `texture` to `unit` and point the uniform at `location` to it.
    fn bind_texture(
        &mut self,
        unit: u32,
        texture: TextureId,
        binding: TextureBinding,
        location: i32,
    );

    /// `None` restores the default framebuffer.
    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>);

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>);

    // Execution

    /// Dispatch compute work with group counts read from the bound dispatch
    /// buffer.
    fn dispatch_indirect(&mut self);

    /// Make all shader writes visible to subsequent commands, storage, image
    /// and vertex fetches.
    fn memory_barrier(&mut self);

    /// Issue up to `max_draws` triangle draws from the bound draw buffer.
    ///
    /// `indexed` selects element draws over the bound index buffer.
    fn multi_draw_indirect(&mut self, indexed: bool, max_draws: i32, stride: i32);
}
