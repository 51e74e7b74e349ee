//! Name-keyed texture and buffer tables shared by every pass.
//!
//! A name resolves to the same GPU object for the lifetime of the registry.
//! Objects are created on first use from the size encoded in the name (or
//! the size reflection reports) and are never resized.

use std::collections::BTreeMap;

use shaderpass_backend::{BufferId, GraphicsBackend, TextureId};
use shaderpass_core::naming::{self, TextureSize};
use shaderpass_core::Result;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureEntry {
    pub id: TextureId,
    pub size: TextureSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferEntry {
    pub id: BufferId,
    /// Size in bytes fixed at creation.
    pub size: usize,
}

#[derive(Debug, Default)]
pub struct ResourceRegistry {
    textures: BTreeMap<String, TextureEntry>,
    buffers: BTreeMap<String, BufferEntry>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up or create the texture called `name` (`<ident>_<W>x<H>`).
    pub fn resolve_texture<B: GraphicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        name: &str,
    ) -> Result<TextureId> {
        if let Some(entry) = self.textures.get(name) {
            return Ok(entry.id);
        }

        let size = naming::texture_size(name)?;
        let id = backend.create_texture(size.width, size.height);
        debug!(name, width = size.width, height = size.height, ?id, "created texture");

        self.textures.insert(name.to_owned(), TextureEntry { id, size });
        Ok(id)
    }

    /// Look up or create the buffer called `name`.
    ///
    /// A new buffer takes the `_<bytes>` suffix of its name as size when it
    /// has one, and `fallback` otherwise. Existing buffers are returned as-is
    /// whatever `fallback` is.
    pub fn resolve_buffer<B: GraphicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        name: &str,
        fallback: usize,
    ) -> Result<BufferId> {
        if let Some(entry) = self.buffers.get(name) {
            return Ok(entry.id);
        }

        let size = naming::buffer_size(name, fallback)?;
        if size == 0 {
            warn!(name, "creating zero-sized buffer");
        }
        let id = backend.create_buffer(size, None);
        debug!(name, size, ?id, "created buffer");

        self.buffers.insert(name.to_owned(), BufferEntry { id, size });
        Ok(id)
    }

    pub fn texture(&self, name: &str) -> Option<&TextureEntry> {
        self.textures.get(name)
    }

    pub fn buffer(&self, name: &str) -> Option<&BufferEntry> {
        self.buffers.get(name)
    }

    pub fn textures(&self) -> impl Iterator<Item = (&str, &TextureEntry)> {
        self.textures.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn buffers(&self) -> impl Iterator<Item = (&str, &BufferEntry)> {
        self.buffers.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Delete every owned object and empty both tables.
    pub fn release<B: GraphicsBackend + ?Sized>(&mut self, backend: &mut B) {
        for (_, entry) in std::mem::take(&mut self.textures) {
            backend.delete_texture(entry.id);
        }
        for (_, entry) in std::mem::take(&mut self.buffers) {
            backend.delete_buffer(entry.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use shaderpass_core::{Error, ResourceKind};

    use super::*;
    use crate::testing::{Call, RecordingBackend};

    #[test]
    fn textures_resolve_once() {
        let mut backend = RecordingBackend::default();
        let mut registry = ResourceRegistry::new();

        let first = registry.resolve_texture(&mut backend, "tex_64x64").unwrap();
        let second = registry.resolve_texture(&mut backend, "tex_64x64").unwrap();

        assert_eq!(first, second);
        assert_eq!(backend.count(|c| matches!(c, Call::CreateTexture { .. })), 1);
        assert_eq!(
            registry.texture("tex_64x64").unwrap().size,
            TextureSize {
                width: 64,
                height: 64
            }
        );
    }

    #[test]
    fn bad_texture_names_never_resolve() {
        let mut backend = RecordingBackend::default();
        let mut registry = ResourceRegistry::new();

        for _ in 0..2 {
            let err = registry.resolve_texture(&mut backend, "tex_64").unwrap_err();
            assert!(matches!(err, Error::Naming { kind: ResourceKind::Texture, .. }));
        }
        assert!(backend.calls.is_empty());
        assert_eq!(registry.textures().count(), 0);
    }

    #[test]
    fn buffer_size_suffix_overrides_reflection() {
        let mut backend = RecordingBackend::default();
        let mut registry = ResourceRegistry::new();

        registry.resolve_buffer(&mut backend, "foo_256", 128).unwrap();
        registry.resolve_buffer(&mut backend, "foo", 128).unwrap();

        assert_eq!(registry.buffer("foo_256").unwrap().size, 256);
        assert_eq!(registry.buffer("foo").unwrap().size, 128);
        assert!(backend.calls.contains(&Call::CreateBuffer { size: 256 }));
        assert!(backend.calls.contains(&Call::CreateBuffer { size: 128 }));
    }

    #[test]
    fn buffers_keep_their_first_size() {
        let mut backend = RecordingBackend::default();
        let mut registry = ResourceRegistry::new();

        let a = registry.resolve_buffer(&mut backend, "particles", 64).unwrap();
        let b = registry.resolve_buffer(&mut backend, "particles", 4096).unwrap();

        assert_eq!(a, b);
        assert_eq!(registry.buffer("particles").unwrap().size, 64);
    }

    proptest! {
        #[test]
        fn texture_lookup_is_idempotent(width in 1u32..4096, height in 1u32..4096, repeats in 1usize..5) {
            let mut backend = RecordingBackend::default();
            let mut registry = ResourceRegistry::new();
            let name = format!("target_{width}x{height}");

            let first = registry.resolve_texture(&mut backend, &name).unwrap();
            for _ in 0..repeats {
                prop_assert_eq!(registry.resolve_texture(&mut backend, &name).unwrap(), first);
            }
            prop_assert_eq!(backend.calls.clone(), vec![Call::CreateTexture { width, height }]);
        }

        #[test]
        fn unsuffixed_buffers_use_fallback(name in "[a-z][a-zA-Z]{0,12}", fallback in 0usize..1 << 20) {
            let mut backend = RecordingBackend::default();
            let mut registry = ResourceRegistry::new();

            registry.resolve_buffer(&mut backend, &name, fallback).unwrap();
            prop_assert_eq!(registry.buffer(&name).unwrap().size, fallback);
        }
    }

    #[test]
    fn release_deletes_everything() {
        let mut backend = RecordingBackend::default();
        let mut registry = ResourceRegistry::new();
        let texture = registry.resolve_texture(&mut backend, "a_2x2").unwrap();
        let buffer = registry.resolve_buffer(&mut backend, "b", 4).unwrap();

        registry.release(&mut backend);

        assert!(backend.calls.contains(&Call::DeleteTexture(texture)));
        assert!(backend.calls.contains(&Call::DeleteBuffer(buffer)));
        assert_eq!(registry.textures().count() + registry.buffers().count(), 0);
    }
}
