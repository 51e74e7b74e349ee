//! Error taxonomy shared by every shaderpass crate.
//!
//! Every variant aborts loading of the whole pipeline. Nothing here is
//! produced while frames are executing.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::stage::StageKind;

/// Kind of registry resource a name was meant to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Texture,
    Buffer,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Texture => f.write_str("texture"),
            ResourceKind::Buffer => f.write_str("buffer"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration, or a context that is not usable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The source document could not be opened or read.
    #[error("could not read shader document {path:?}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A resource name does not follow its naming convention.
    #[error("invalid {kind} name `{name}` (expected {})", expected_form(.kind))]
    Naming { kind: ResourceKind, name: String },

    #[error("pass {pass}: failed to compile {stage} shader:\n{log}")]
    Compile {
        pass: usize,
        stage: StageKind,
        log: String,
    },

    #[error("pass {pass}: failed to link program:\n{log}")]
    Link { pass: usize, log: String },

    #[error("pass {pass}: program failed validation:\n{log}")]
    Validation { pass: usize, log: String },

    /// A reflected interface entry the runtime does not know how to provision.
    #[error("pass {pass}: `{name}` has unsupported type 0x{ty:04X}")]
    UnsupportedInterface { pass: usize, name: String, ty: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    pub(crate) fn naming(kind: ResourceKind, name: &str) -> Self {
        Error::Naming {
            kind,
            name: name.to_owned(),
        }
    }
}

fn expected_form(kind: &ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Texture => "<name>_<width>x<height>",
        ResourceKind::Buffer => "<alphanumeric name>[_<size in bytes>]",
    }
}
