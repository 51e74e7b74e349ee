//! A compiled pass with every resource it binds.

use std::collections::BTreeSet;

use shaderpass_backend::{BufferId, FramebufferId, GraphicsBackend, ProgramId, VertexArrayId};
use shaderpass_core::parameters::keys;
use shaderpass_core::{Document, Error, Params, Result, StageKind};
use tracing::debug;

use crate::compiler::{self, CompiledProgram};
use crate::preamble::{DRAW_COMMAND_SIZE, MAX_DRAW_COMMANDS};
use crate::reflect::{self, BoundBuffer, BoundTexture};
use crate::registry::ResourceRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    /// Built, not executed yet.
    Pending,
    /// Runs every frame.
    Active,
    /// Skipped for the rest of the run. Never reverts.
    Ignored,
}

#[derive(Debug)]
pub struct Pass {
    index: usize,
    program: ProgramId,
    stages: BTreeSet<StageKind>,
    params: Params,
    textures: Vec<BoundTexture>,
    buffers: Vec<BoundBuffer>,
    framebuffer: Option<FramebufferId>,
    vertex_array: Option<VertexArrayId>,
    index_buffer: Option<BufferId>,
    run_once: bool,
    state: PassState,
}

impl Pass {
    /// Compile pass `index` of `document` and provision everything its
    /// interface references.
    ///
    /// On failure the pass's own objects (program, framebuffer, vertex array)
    /// are deleted. Registry resources stay with the registry.
    pub fn build<B: GraphicsBackend + ?Sized>(
        backend: &mut B,
        registry: &mut ResourceRegistry,
        document: &Document,
        preamble: &str,
        index: usize,
    ) -> Result<Self> {
        let params = document.pass_params(index);
        let CompiledProgram { program, stages } =
            compiler::compile_pass(backend, document, preamble, index)?;

        let mut pass = Pass {
            index,
            program,
            stages,
            run_once: params.contains(keys::ONCE),
            params,
            textures: Vec::new(),
            buffers: Vec::new(),
            framebuffer: None,
            vertex_array: None,
            index_buffer: None,
            state: PassState::Pending,
        };

        if let Err(err) = pass.provision(backend, registry) {
            pass.release(backend);
            return Err(err);
        }
        debug!(
            pass = index,
            textures = pass.textures.len(),
            buffers = pass.buffers.len(),
            framebuffer = pass.framebuffer.is_some(),
            "provisioned pass"
        );
        Ok(pass)
    }

    fn provision<B: GraphicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        registry: &mut ResourceRegistry,
    ) -> Result<()> {
        let index = self.index;

        self.textures = reflect::textures(backend, registry, index, self.program)?;

        let targets = reflect::render_targets(backend, registry, self.program)?;
        if !targets.is_empty() {
            self.framebuffer = Some(backend.create_framebuffer(&targets));
        }

        self.buffers = reflect::storage_buffers(backend, registry, index, self.program)?;

        if !self.is_compute() {
            let layout = reflect::vertex_layout(index, &backend.program_inputs(self.program))?;
            let vbo = self.params.get(keys::VBO).ok_or_else(|| {
                Error::configuration(format!("pass {index} needs a {} parameter", keys::VBO))
            })?;
            let vertices = registry.resolve_buffer(backend, vbo, 0)?;
            self.index_buffer = match self.params.get(keys::EBO) {
                Some(ebo) => Some(registry.resolve_buffer(backend, ebo, 0)?),
                None => None,
            };
            self.vertex_array =
                Some(backend.create_vertex_array(&layout, vertices, self.index_buffer));
        }

        if self.params.contains(keys::CUSTOM_FRAMEBUFFER) {
            debug!(pass = index, "CUSTOM_FRAMEBUFFER has no effect");
        }
        Ok(())
    }

    /// Record this pass's commands for one frame.
    ///
    /// Does nothing once the pass is ignored. A run-once pass becomes
    /// ignored after its first execution.
    pub fn execute<B: GraphicsBackend + ?Sized>(&mut self, backend: &mut B) {
        match self.state {
            PassState::Ignored => return,
            PassState::Pending => self.state = PassState::Active,
            PassState::Active => {}
        }

        backend.use_program(self.program);
        for buffer in &self.buffers {
            backend.bind_storage_buffer(buffer.binding, buffer.buffer);
        }
        for (unit, texture) in (0u32..).zip(&self.textures) {
            backend.bind_texture(unit, texture.texture, texture.binding, texture.location);
        }
        if let Some(framebuffer) = self.framebuffer {
            backend.bind_framebuffer(Some(framebuffer));
        }

        if self.is_compute() {
            backend.dispatch_indirect();
            backend.memory_barrier();
        } else {
            backend.bind_vertex_array(self.vertex_array);
            backend.multi_draw_indirect(
                self.index_buffer.is_some(),
                MAX_DRAW_COMMANDS as i32,
                DRAW_COMMAND_SIZE as i32,
            );
            backend.bind_framebuffer(None);
            backend.bind_vertex_array(None);
        }

        if self.run_once {
            self.state = PassState::Ignored;
        }
    }

    /// Delete the objects owned by this pass.
    pub fn release<B: GraphicsBackend + ?Sized>(&mut self, backend: &mut B) {
        if let Some(vertex_array) = self.vertex_array.take() {
            backend.delete_vertex_array(vertex_array);
        }
        if let Some(framebuffer) = self.framebuffer.take() {
            backend.delete_framebuffer(framebuffer);
        }
        backend.delete_program(self.program);
        self.state = PassState::Ignored;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn program(&self) -> ProgramId {
        self.program
    }

    pub fn stages(&self) -> &BTreeSet<StageKind> {
        &self.stages
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn is_compute(&self) -> bool {
        self.stages.contains(&StageKind::Compute)
    }

    pub fn runs_once(&self) -> bool {
        self.run_once
    }

    pub fn state(&self) -> PassState {
        self.state
    }

    pub fn is_ignored(&self) -> bool {
        self.state == PassState::Ignored
    }

    pub fn textures(&self) -> &[BoundTexture] {
        &self.textures
    }

    pub fn buffers(&self) -> &[BoundBuffer] {
        &self.buffers
    }

    pub fn framebuffer(&self) -> Option<FramebufferId> {
        self.framebuffer
    }

    pub fn vertex_array(&self) -> Option<VertexArrayId> {
        self.vertex_array
    }

    pub fn index_buffer(&self) -> Option<BufferId> {
        self.index_buffer
    }
}
