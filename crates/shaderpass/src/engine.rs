//! The frame executor: owns the passes, the registry and the built-in
//! buffers, and runs every active pass once per tick.

use std::time::Instant;

use shaderpass_backend::{BufferId, Capability, GraphicsBackend, IndirectTarget};
use shaderpass_core::parameters::keys;
use shaderpass_core::{AsBytes, Document, EngineState, Error, FrameClock, InputEvent, Params, Result};
use tracing::{debug, info, warn};

use crate::pass::Pass;
use crate::preamble::{
    self, DRAW_COMMAND_BINDING, DRAW_COMMAND_SIZE, ENGINE_BINDING, MAX_DRAW_COMMANDS,
    WORK_GROUP_BINDING,
};
use crate::registry::ResourceRegistry;

/// Buffers behind the reserved storage blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinBuffers {
    /// `EngineBuffer`, rewritten every tick.
    pub engine: BufferId,
    /// `WorkGroupBuffer`, also the indirect dispatch source.
    pub work_groups: BufferId,
    /// `DrawCommandBuffer`, also the indirect draw source.
    pub draw_commands: BufferId,
}

impl BuiltinBuffers {
    fn create<B: GraphicsBackend + ?Sized>(backend: &mut B, state: &EngineState) -> Self {
        let engine = state.as_bytes();
        let groups = [1u32, 1, 1];
        let commands = vec![0u8; MAX_DRAW_COMMANDS * DRAW_COMMAND_SIZE];

        Self {
            engine: backend.create_buffer(engine.len(), Some(engine)),
            work_groups: backend.create_buffer(groups.as_bytes().len(), Some(groups.as_bytes())),
            draw_commands: backend.create_buffer(commands.len(), Some(&commands)),
        }
    }

    fn bind<B: GraphicsBackend + ?Sized>(&self, backend: &mut B) {
        backend.bind_storage_buffer(ENGINE_BINDING, self.engine);
        backend.bind_storage_buffer(WORK_GROUP_BINDING, self.work_groups);
        backend.bind_storage_buffer(DRAW_COMMAND_BINDING, self.draw_commands);
        backend.bind_indirect_buffer(IndirectTarget::Dispatch, self.work_groups);
        backend.bind_indirect_buffer(IndirectTarget::Draw, self.draw_commands);
    }

    fn release<B: GraphicsBackend + ?Sized>(&self, backend: &mut B) {
        backend.delete_buffer(self.engine);
        backend.delete_buffer(self.work_groups);
        backend.delete_buffer(self.draw_commands);
    }
}

/// A loaded pipeline bound to one graphics backend.
///
/// Everything the engine created is released when it is dropped.
#[derive(Debug)]
pub struct Engine<B: GraphicsBackend> {
    backend: B,
    document: Document,
    params: Params,
    registry: ResourceRegistry,
    builtins: BuiltinBuffers,
    passes: Vec<Pass>,
    state: EngineState,
    clock: FrameClock,
    benchmark: bool,
}

impl<B: GraphicsBackend> Engine<B> {
    /// Apply the global parameters, create the built-in buffers and build
    /// every pass of `document` in order.
    ///
    /// The first failing pass aborts loading; everything created up to that
    /// point is released.
    pub fn load(mut backend: B, document: Document) -> Result<Self> {
        let params = document.global_params();
        let mut state = EngineState::default();
        if let Some(width) = dimension(&params, keys::WIDTH)? {
            state.width = width;
        }
        if let Some(height) = dimension(&params, keys::HEIGHT)? {
            state.height = height;
        }

        for (key, capability) in [
            (keys::ENABLE_DEPTH_TEST, Capability::DepthTest),
            (keys::ENABLE_STENCIL_TEST, Capability::StencilTest),
            (keys::ENABLE_CULL_FACE, Capability::CullFace),
        ] {
            if params.contains(key) {
                debug!(?capability, "enabling capability");
                backend.enable(capability);
            }
        }
        backend.viewport(state.width, state.height);

        let builtins = BuiltinBuffers::create(&mut backend, &state);
        builtins.bind(&mut backend);

        let mut engine = Self {
            backend,
            benchmark: params.contains(keys::BENCHMARK),
            document,
            params,
            registry: ResourceRegistry::new(),
            builtins,
            passes: Vec::new(),
            state,
            clock: FrameClock::new(),
        };
        engine.build_passes()?;
        Ok(engine)
    }

    fn build_passes(&mut self) -> Result<()> {
        let count = self.document.pass_count();
        if count == 0 {
            warn!(keyword = %self.document.keyword(), "document declares no passes");
        }

        for index in 0..count {
            let pass = Pass::build(
                &mut self.backend,
                &mut self.registry,
                &self.document,
                preamble::preamble(),
                index,
            )?;
            self.passes.push(pass);
        }
        info!(
            passes = count,
            textures = self.registry.textures().count(),
            buffers = self.registry.buffers().count(),
            "pipeline loaded"
        );
        Ok(())
    }

    /// Run one frame.
    pub fn tick(&mut self) {
        let started = Instant::now();

        self.clock.tick(&mut self.state);
        self.backend
            .write_buffer(self.builtins.engine, self.state.as_bytes());
        self.builtins.bind(&mut self.backend);
        self.backend.clear();

        for pass in &mut self.passes {
            pass.execute(&mut self.backend);
        }

        if self.benchmark {
            info!(
                frame = self.state.frame,
                micros = started.elapsed().as_micros() as u64,
                "frame time"
            );
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        self.state.apply(event);
        if let InputEvent::Resized { .. } = event {
            self.backend.viewport(self.state.width, self.state.height);
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn builtins(&self) -> BuiltinBuffers {
        self.builtins
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: GraphicsBackend> Drop for Engine<B> {
    fn drop(&mut self) {
        for pass in &mut self.passes {
            pass.release(&mut self.backend);
        }
        self.passes.clear();
        self.registry.release(&mut self.backend);
        self.builtins.release(&mut self.backend);
    }
}

/// A strictly positive `WIDTH`/`HEIGHT` value.
fn dimension(params: &Params, key: &str) -> Result<Option<i32>> {
    match params.value::<i32>(key)? {
        Some(value) if value <= 0 => Err(Error::configuration(format!(
            "{key} must be positive, got {value}"
        ))),
        value => Ok(value),
    }
}
