//! A [`GraphicsBackend`] that records calls and replays scripted reflection.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use shaderpass_backend::{
    BufferId, Capability, FramebufferId, GraphicsBackend, IndirectTarget, InputInfo, OutputInfo,
    ProgramId, ShaderId, StorageBlockInfo, TextureBinding, TextureId, UniformInfo, VertexArrayId,
    VertexLayout,
};
use shaderpass_core::{GlslType, StageKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(StageKind),
    CompileShader { pass: Option<usize>, stage: StageKind },
    DeleteShader(ShaderId),
    CreateProgram(ProgramId),
    AttachShader(ProgramId, ShaderId),
    DetachShader(ProgramId, ShaderId),
    LinkProgram(ProgramId),
    ValidateProgram(ProgramId),
    DeleteProgram(ProgramId),
    CreateTexture { width: u32, height: u32 },
    DeleteTexture(TextureId),
    CreateBuffer { size: usize },
    WriteBuffer { buffer: BufferId, len: usize },
    DeleteBuffer(BufferId),
    CreateFramebuffer(Vec<(u32, TextureId)>),
    DeleteFramebuffer(FramebufferId),
    CreateVertexArray {
        layout: VertexLayout,
        vertices: BufferId,
        indices: Option<BufferId>,
    },
    DeleteVertexArray(VertexArrayId),
    Enable(Capability),
    Viewport(i32, i32),
    Clear,
    UseProgram(ProgramId),
    BindStorageBuffer { binding: u32, buffer: BufferId },
    BindIndirectBuffer(IndirectTarget, BufferId),
    BindTexture {
        unit: u32,
        texture: TextureId,
        binding: TextureBinding,
        location: i32,
    },
    BindFramebuffer(Option<FramebufferId>),
    BindVertexArray(Option<VertexArrayId>),
    DispatchIndirect,
    MemoryBarrier,
    MultiDrawIndirect { indexed: bool, max_draws: i32, stride: i32 },
}

/// Reflection results and failures for one pass.
#[derive(Debug, Clone, Default)]
pub struct PassScript {
    uniforms: Vec<UniformInfo>,
    blocks: Vec<StorageBlockInfo>,
    inputs: Vec<InputInfo>,
    outputs: Vec<OutputInfo>,
    compile_failure: Option<StageKind>,
    link_failure: bool,
    validate_failure: bool,
}

impl PassScript {
    pub fn uniform(mut self, name: &str, ty: GlslType, location: i32) -> Self {
        self.uniforms.push(UniformInfo {
            name: name.to_owned(),
            ty: ty as u32,
            location,
        });
        self
    }

    /// A uniform whose type the runtime does not provision.
    pub fn raw_uniform(mut self, name: &str, ty: u32, location: i32) -> Self {
        self.uniforms.push(UniformInfo {
            name: name.to_owned(),
            ty,
            location,
        });
        self
    }

    pub fn block(mut self, name: &str, binding: u32, data_size: usize) -> Self {
        self.blocks.push(StorageBlockInfo {
            name: name.to_owned(),
            binding,
            data_size,
        });
        self
    }

    pub fn input(mut self, name: &str, ty: GlslType, location: i32) -> Self {
        self.inputs.push(InputInfo {
            name: name.to_owned(),
            ty: ty as u32,
            location,
        });
        self
    }

    pub fn output(mut self, name: &str, location: i32) -> Self {
        self.outputs.push(OutputInfo {
            name: name.to_owned(),
            location,
        });
        self
    }

    pub fn fail_compile(mut self, stage: StageKind) -> Self {
        self.compile_failure = Some(stage);
        self
    }

    pub fn fail_link(mut self) -> Self {
        self.link_failure = true;
        self
    }

    pub fn fail_validate(mut self) -> Self {
        self.validate_failure = true;
        self
    }
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    scripts: BTreeMap<usize, PassScript>,
    next_id: u32,
    live: Rc<RefCell<BTreeSet<u32>>>,
    shaders: HashMap<ShaderId, (Option<usize>, StageKind)>,
    programs: HashMap<ProgramId, usize>,
    contents: HashMap<BufferId, Vec<u8>>,
}

impl RecordingBackend {
    pub fn script(mut self, pass: usize, script: PassScript) -> Self {
        self.scripts.insert(pass, script);
        self
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }

    /// Last bytes uploaded to `buffer`, at creation or by a write.
    pub fn contents(&self, buffer: BufferId) -> Option<&[u8]> {
        self.contents.get(&buffer).map(Vec::as_slice)
    }

    /// Handles created and not yet deleted.
    pub fn live_objects(&self) -> usize {
        self.live.borrow().len()
    }

    /// Live handle set that stays readable after the backend is dropped.
    pub fn live_handles(&self) -> Rc<RefCell<BTreeSet<u32>>> {
        Rc::clone(&self.live)
    }

    fn allocate(&mut self) -> u32 {
        self.next_id += 1;
        self.live.borrow_mut().insert(self.next_id);
        self.next_id
    }

    fn free(&mut self, id: u32) {
        self.live.borrow_mut().remove(&id);
    }

    fn program_script(&self, program: ProgramId) -> PassScript {
        self.programs
            .get(&program)
            .and_then(|pass| self.scripts.get(pass))
            .cloned()
            .unwrap_or_default()
    }
}

/// Pass index from the `#define <KEYWORD>_<i>` line of a compilation unit.
fn pass_of(source: &str) -> Option<usize> {
    source.lines().find_map(|line| {
        let rest = line
            .strip_prefix("#define PASS_")
            .or_else(|| line.strip_prefix("#define PROGRAM_"))?;
        rest.parse().ok()
    })
}

impl GraphicsBackend for RecordingBackend {
    fn create_shader(&mut self, stage: StageKind) -> ShaderId {
        let shader = ShaderId(self.allocate());
        self.shaders.insert(shader, (None, stage));
        self.calls.push(Call::CreateShader(stage));
        shader
    }

    fn compile_shader(&mut self, shader: ShaderId, source: &str) -> Result<(), String> {
        let pass = pass_of(source);
        let stage = self.shaders[&shader].1;
        self.shaders.insert(shader, (pass, stage));
        self.calls.push(Call::CompileShader { pass, stage });

        let failing = pass
            .and_then(|p| self.scripts.get(&p))
            .and_then(|s| s.compile_failure);
        if failing == Some(stage) {
            Err(format!("0:1(1): error: scripted {stage} failure"))
        } else {
            Ok(())
        }
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.free(shader.0);
        self.calls.push(Call::DeleteShader(shader));
    }

    fn create_program(&mut self) -> ProgramId {
        let program = ProgramId(self.allocate());
        self.calls.push(Call::CreateProgram(program));
        program
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        if let Some(pass) = self.shaders.get(&shader).and_then(|s| s.0) {
            self.programs.insert(program, pass);
        }
        self.calls.push(Call::AttachShader(program, shader));
    }

    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        self.calls.push(Call::DetachShader(program, shader));
    }

    fn link_program(&mut self, program: ProgramId) -> Result<(), String> {
        self.calls.push(Call::LinkProgram(program));
        if self.program_script(program).link_failure {
            Err("error: scripted link failure".to_owned())
        } else {
            Ok(())
        }
    }

    fn validate_program(&mut self, program: ProgramId) -> Result<(), String> {
        self.calls.push(Call::ValidateProgram(program));
        if self.program_script(program).validate_failure {
            Err("error: scripted validation failure".to_owned())
        } else {
            Ok(())
        }
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.free(program.0);
        self.calls.push(Call::DeleteProgram(program));
    }

    fn active_uniforms(&self, program: ProgramId) -> Vec<UniformInfo> {
        self.program_script(program).uniforms
    }

    fn storage_blocks(&self, program: ProgramId) -> Vec<StorageBlockInfo> {
        self.program_script(program).blocks
    }

    fn program_inputs(&self, program: ProgramId) -> Vec<InputInfo> {
        self.program_script(program).inputs
    }

    fn program_outputs(&self, program: ProgramId) -> Vec<OutputInfo> {
        self.program_script(program).outputs
    }

    fn create_texture(&mut self, width: u32, height: u32) -> TextureId {
        self.calls.push(Call::CreateTexture { width, height });
        TextureId(self.allocate())
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.free(texture.0);
        self.calls.push(Call::DeleteTexture(texture));
    }

    fn create_buffer(&mut self, size: usize, data: Option<&[u8]>) -> BufferId {
        self.calls.push(Call::CreateBuffer { size });
        let buffer = BufferId(self.allocate());
        if let Some(data) = data {
            self.contents.insert(buffer, data.to_vec());
        }
        buffer
    }

    fn write_buffer(&mut self, buffer: BufferId, data: &[u8]) {
        self.calls.push(Call::WriteBuffer {
            buffer,
            len: data.len(),
        });
        self.contents.insert(buffer, data.to_vec());
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.free(buffer.0);
        self.calls.push(Call::DeleteBuffer(buffer));
    }

    fn create_framebuffer(&mut self, attachments: &[(u32, TextureId)]) -> FramebufferId {
        self.calls.push(Call::CreateFramebuffer(attachments.to_vec()));
        FramebufferId(self.allocate())
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId) {
        self.free(framebuffer.0);
        self.calls.push(Call::DeleteFramebuffer(framebuffer));
    }

    fn create_vertex_array(
        &mut self,
        layout: &VertexLayout,
        vertices: BufferId,
        indices: Option<BufferId>,
    ) -> VertexArrayId {
        self.calls.push(Call::CreateVertexArray {
            layout: layout.clone(),
            vertices,
            indices,
        });
        VertexArrayId(self.allocate())
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) {
        self.free(vertex_array.0);
        self.calls.push(Call::DeleteVertexArray(vertex_array));
    }

    fn enable(&mut self, capability: Capability) {
        self.calls.push(Call::Enable(capability));
    }

    fn viewport(&mut self, width: i32, height: i32) {
        self.calls.push(Call::Viewport(width, height));
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn use_program(&mut self, program: ProgramId) {
        self.calls.push(Call::UseProgram(program));
    }

    fn bind_storage_buffer(&mut self, binding: u32, buffer: BufferId) {
        self.calls.push(Call::BindStorageBuffer { binding, buffer });
    }

    fn bind_indirect_buffer(&mut self, target: IndirectTarget, buffer: BufferId) {
        self.calls.push(Call::BindIndirectBuffer(target, buffer));
    }

    fn bind_texture(
        &mut self,
        unit: u32,
        texture: TextureId,
        binding: TextureBinding,
        location: i32,
    ) {
        self.calls.push(Call::BindTexture {
            unit,
            texture,
            binding,
            location,
        });
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>) {
        self.calls.push(Call::BindFramebuffer(framebuffer));
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>) {
        self.calls.push(Call::BindVertexArray(vertex_array));
    }

    fn dispatch_indirect(&mut self) {
        self.calls.push(Call::DispatchIndirect);
    }

    fn memory_barrier(&mut self) {
        self.calls.push(Call::MemoryBarrier);
    }

    fn multi_draw_indirect(&mut self, indexed: bool, max_draws: i32, stride: i32) {
        self.calls.push(Call::MultiDrawIndirect {
            indexed,
            max_draws,
            stride,
        });
    }
}
