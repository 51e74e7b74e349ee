//! Handles and reflection records exchanged with a [`GraphicsBackend`](crate::GraphicsBackend).

use gl::types::{GLenum, GLint, GLuint};
use shaderpass_core::ComponentType;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub GLuint);
    };
}

handle!(
    /// A shader object for a single stage.
    ShaderId
);
handle!(
    /// A linked program object.
    ProgramId
);
handle!(TextureId);
handle!(BufferId);
handle!(FramebufferId);
handle!(VertexArrayId);

/// An active uniform outside any block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformInfo {
    pub name: String,
    /// Raw GL type enum.
    pub ty: GLenum,
    pub location: GLint,
}

/// An active shader storage block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageBlockInfo {
    pub name: String,
    pub binding: GLuint,
    /// Minimum buffer size the block requires, in bytes.
    pub data_size: usize,
}

/// An active input of the first program stage.
///
/// Built-in inputs report a location of `-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputInfo {
    pub name: String,
    pub ty: GLenum,
    pub location: GLint,
}

/// An active output of the last program stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputInfo {
    pub name: String,
    /// Output location, used as the color attachment index. Negative for
    /// built-ins such as `gl_FragDepth`.
    pub location: GLint,
}

/// One attribute of a tightly packed, single-binding vertex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: GLuint,
    pub components: GLint,
    pub component: ComponentType,
    /// Byte offset from the start of a vertex.
    pub offset: GLuint,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    pub attributes: Vec<VertexAttribute>,
    /// Byte distance between consecutive vertices.
    pub stride: GLint,
}

/// Global pipeline capabilities toggled from document parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    DepthTest,
    StencilTest,
    CullFace,
}

impl Capability {
    pub fn gl_enum(self) -> GLenum {
        match self {
            Capability::DepthTest => gl::DEPTH_TEST,
            Capability::StencilTest => gl::STENCIL_TEST,
            Capability::CullFace => gl::CULL_FACE,
        }
    }
}

/// How a texture is exposed to a shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureBinding {
    /// `image2D`, bound to an image unit for load/store.
    Image,
    /// `sampler2D`, bound to a texture unit.
    Sampler,
}

/// Indirect command buffer targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndirectTarget {
    /// Source of `DispatchComputeIndirect` work group counts.
    Dispatch,
    /// Source of `MultiDraw*Indirect` commands.
    Draw,
}

impl IndirectTarget {
    pub fn gl_enum(self) -> GLenum {
        match self {
            IndirectTarget::Dispatch => gl::DISPATCH_INDIRECT_BUFFER,
            IndirectTarget::Draw => gl::DRAW_INDIRECT_BUFFER,
        }
    }
}
