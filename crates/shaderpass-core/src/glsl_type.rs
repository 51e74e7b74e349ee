//! GLSL types reported by program interface queries.

use gl::types::{GLenum, GLint};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// GLSL types the runtime knows how to provision.
///
/// Discriminants are the GL enum values returned by reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u32)]
pub enum GlslType {
    Float = gl::FLOAT,
    FloatVec2 = gl::FLOAT_VEC2,
    FloatVec3 = gl::FLOAT_VEC3,
    FloatVec4 = gl::FLOAT_VEC4,
    Double = gl::DOUBLE,
    DoubleVec2 = gl::DOUBLE_VEC2,
    DoubleVec3 = gl::DOUBLE_VEC3,
    DoubleVec4 = gl::DOUBLE_VEC4,
    Int = gl::INT,
    IntVec2 = gl::INT_VEC2,
    IntVec3 = gl::INT_VEC3,
    IntVec4 = gl::INT_VEC4,
    UnsignedInt = gl::UNSIGNED_INT,
    UnsignedIntVec2 = gl::UNSIGNED_INT_VEC2,
    UnsignedIntVec3 = gl::UNSIGNED_INT_VEC3,
    UnsignedIntVec4 = gl::UNSIGNED_INT_VEC4,
    Bool = gl::BOOL,
    BoolVec2 = gl::BOOL_VEC2,
    BoolVec3 = gl::BOOL_VEC3,
    BoolVec4 = gl::BOOL_VEC4,
    Image2D = gl::IMAGE_2D,
    Sampler2D = gl::SAMPLER_2D,
}

/// Scalar type of one vertex attribute component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Float,
    Double,
    Int,
    UnsignedInt,
    Bool,
}

impl ComponentType {
    pub fn size_bytes(self) -> usize {
        match self {
            ComponentType::Double => 8,
            ComponentType::Float
            | ComponentType::Int
            | ComponentType::UnsignedInt
            | ComponentType::Bool => 4,
        }
    }

    pub fn gl_enum(self) -> GLenum {
        match self {
            ComponentType::Float => gl::FLOAT,
            ComponentType::Double => gl::DOUBLE,
            ComponentType::Int => gl::INT,
            ComponentType::UnsignedInt => gl::UNSIGNED_INT,
            // Booleans travel as 32-bit integers.
            ComponentType::Bool => gl::INT,
        }
    }
}

impl GlslType {
    pub fn from_gl(ty: GLenum) -> Option<Self> {
        Self::from_u32(ty)
    }

    /// Whether a uniform of this type names a registry texture.
    pub fn is_texture(self) -> bool {
        matches!(self, GlslType::Image2D | GlslType::Sampler2D)
    }

    /// Component count and scalar type, for types usable as vertex inputs.
    pub fn vertex_format(self) -> Option<(GLint, ComponentType)> {
        use ComponentType as C;
        use GlslType::*;

        let format = match self {
            Float => (1, C::Float),
            FloatVec2 => (2, C::Float),
            FloatVec3 => (3, C::Float),
            FloatVec4 => (4, C::Float),
            Double => (1, C::Double),
            DoubleVec2 => (2, C::Double),
            DoubleVec3 => (3, C::Double),
            DoubleVec4 => (4, C::Double),
            Int => (1, C::Int),
            IntVec2 => (2, C::Int),
            IntVec3 => (3, C::Int),
            IntVec4 => (4, C::Int),
            UnsignedInt => (1, C::UnsignedInt),
            UnsignedIntVec2 => (2, C::UnsignedInt),
            UnsignedIntVec3 => (3, C::UnsignedInt),
            UnsignedIntVec4 => (4, C::UnsignedInt),
            Bool => (1, C::Bool),
            BoolVec2 => (2, C::Bool),
            BoolVec3 => (3, C::Bool),
            BoolVec4 => (4, C::Bool),
            Image2D | Sampler2D => return None,
        };
        Some(format)
    }

    /// Tightly packed byte size of one vertex attribute of this type.
    pub fn vertex_size(self) -> Option<usize> {
        self.vertex_format()
            .map(|(count, component)| count as usize * component.size_bytes())
    }
}
