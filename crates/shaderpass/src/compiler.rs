//! Per-pass shader compilation and linking.

use std::collections::BTreeSet;

use shaderpass_backend::{GraphicsBackend, ProgramId, ShaderId};
use shaderpass_core::{Document, Error, Result, StageKind};
use tracing::{debug, info};

/// A linked and validated program together with the stages it was built
/// from. Stage objects are already deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledProgram {
    pub program: ProgramId,
    pub stages: BTreeSet<StageKind>,
}

impl CompiledProgram {
    pub fn is_compute(&self) -> bool {
        self.stages.contains(&StageKind::Compute)
    }
}

/// Compile every stage pass `index` guards, then link and validate.
///
/// Nothing is leaked on failure: stage objects are deleted on every path and
/// the program is deleted when linking or validation fails.
pub fn compile_pass<B: GraphicsBackend + ?Sized>(
    backend: &mut B,
    document: &Document,
    preamble: &str,
    index: usize,
) -> Result<CompiledProgram> {
    let stages = document.stages(index);
    if stages.is_empty() {
        return Err(Error::configuration(format!(
            "pass {index} declares no shader stages"
        )));
    }

    let mut shaders: Vec<ShaderId> = Vec::with_capacity(stages.len());
    for &stage in &stages {
        debug!(pass = index, %stage, "compiling stage");
        let shader = backend.create_shader(stage);
        shaders.push(shader);

        let unit = document.compilation_unit(preamble, index, stage);
        if let Err(log) = backend.compile_shader(shader, &unit) {
            delete_shaders(backend, &shaders);
            return Err(Error::Compile {
                pass: index,
                stage,
                log,
            });
        }
    }

    let program = backend.create_program();
    for &shader in &shaders {
        backend.attach_shader(program, shader);
    }
    let linked = backend.link_program(program);
    for &shader in &shaders {
        backend.detach_shader(program, shader);
    }
    delete_shaders(backend, &shaders);

    let checked = linked
        .map_err(|log| Error::Link { pass: index, log })
        .and_then(|()| {
            backend
                .validate_program(program)
                .map_err(|log| Error::Validation { pass: index, log })
        });
    if let Err(err) = checked {
        backend.delete_program(program);
        return Err(err);
    }

    info!(pass = index, ?stages, "compiled pass");
    Ok(CompiledProgram {
        program,
        stages: stages.into_iter().collect(),
    })
}

fn delete_shaders<B: GraphicsBackend + ?Sized>(backend: &mut B, shaders: &[ShaderId]) {
    for &shader in shaders {
        backend.delete_shader(shader);
    }
}
