//! Shader stage kinds recognized inside a pass block.

use std::fmt;

use gl::types::GLenum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageKind {
    Compute,
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
}

impl StageKind {
    /// Every stage, in the order stages are compiled and attached.
    pub const ALL: [StageKind; 6] = [
        StageKind::Compute,
        StageKind::Vertex,
        StageKind::TessControl,
        StageKind::TessEvaluation,
        StageKind::Geometry,
        StageKind::Fragment,
    ];

    /// The `<STAGE>` part of a `#ifdef <SCOPE>_<i>_<STAGE>_SHADER` guard.
    pub fn marker(self) -> &'static str {
        match self {
            StageKind::Compute => "COMPUTE",
            StageKind::Vertex => "VERTEX",
            StageKind::TessControl => "TESS_CONTROL",
            StageKind::TessEvaluation => "TESS_EVALUATION",
            StageKind::Geometry => "GEOMETRY",
            StageKind::Fragment => "FRAGMENT",
        }
    }

    pub fn gl_enum(self) -> GLenum {
        match self {
            StageKind::Compute => gl::COMPUTE_SHADER,
            StageKind::Vertex => gl::VERTEX_SHADER,
            StageKind::TessControl => gl::TESS_CONTROL_SHADER,
            StageKind::TessEvaluation => gl::TESS_EVALUATION_SHADER,
            StageKind::Geometry => gl::GEOMETRY_SHADER,
            StageKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageKind::Compute => "compute",
            StageKind::Vertex => "vertex",
            StageKind::TessControl => "tessellation control",
            StageKind::TessEvaluation => "tessellation evaluation",
            StageKind::Geometry => "geometry",
            StageKind::Fragment => "fragment",
        };
        f.write_str(name)
    }
}
