//! Naming conventions that carry resource dimensions.
//!
//! Textures encode their size in the name (`albedo_512x512`), buffers may
//! carry an explicit byte size (`particles_65536`) that overrides whatever
//! size reflection reports.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, ResourceKind, Result};

static TEXTURE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+_(\d+)x(\d+)$").expect("texture pattern is valid"));

static BUFFER_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_]*?(?:_(\d+))?$").expect("buffer pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSize {
    pub width: u32,
    pub height: u32,
}

/// Decode `<name>_<width>x<height>`.
///
/// Zero or out-of-range dimensions are rejected along with names that do
/// not follow the pattern.
pub fn texture_size(name: &str) -> Result<TextureSize> {
    let invalid = || Error::naming(ResourceKind::Texture, name);

    let caps = TEXTURE_NAME.captures(name).ok_or_else(invalid)?;
    let width: u32 = caps[1].parse().map_err(|_| invalid())?;
    let height: u32 = caps[2].parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 || i32::try_from(width.max(height)).is_err() {
        return Err(invalid());
    }

    Ok(TextureSize { width, height })
}

/// Byte size for the buffer called `name`.
///
/// A trailing `_<digits>` segment wins over `fallback`. Sizes past
/// `isize::MAX` are rejected.
pub fn buffer_size(name: &str, fallback: usize) -> Result<usize> {
    let invalid = || Error::naming(ResourceKind::Buffer, name);

    let caps = BUFFER_NAME.captures(name).ok_or_else(invalid)?;
    match caps.get(1) {
        Some(size) => {
            let size: usize = size.as_str().parse().map_err(|_| invalid())?;
            if isize::try_from(size).is_err() {
                return Err(invalid());
            }
            Ok(size)
        }
        None => Ok(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_dimensions_come_from_the_suffix() {
        assert_eq!(
            texture_size("tex_64x32").unwrap(),
            TextureSize {
                width: 64,
                height: 32
            }
        );
        assert_eq!(texture_size("g_buffer_normal_1920x1080").unwrap().height, 1080);
    }

    #[test]
    fn malformed_texture_names_fail() {
        for name in ["tex_64", "tex64x64", "tex_64x", "_x64", "tex_0x64", "tex_64x64_", "tex_99999999999x1"] {
            assert!(
                matches!(texture_size(name), Err(Error::Naming { kind: ResourceKind::Texture, .. })),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn buffer_size_override_wins() {
        assert_eq!(buffer_size("foo_256", 128).unwrap(), 256);
        assert_eq!(buffer_size("foo", 128).unwrap(), 128);
        assert_eq!(buffer_size("color_buffer", 16).unwrap(), 16);
        assert_eq!(buffer_size("vertices_2_4096", 0).unwrap(), 4096);
        assert_eq!(buffer_size("42", 8).unwrap(), 8);
    }

    #[test]
    fn malformed_buffer_names_fail() {
        for name in ["", "_foo", "foo.bar", "Block[0]", "foo bar"] {
            assert!(
                matches!(buffer_size(name, 4), Err(Error::Naming { kind: ResourceKind::Buffer, .. })),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn oversized_buffers_fail() {
        let largest = isize::MAX as usize;
        assert_eq!(buffer_size(&format!("huge_{largest}"), 0).unwrap(), largest);
        for size in [largest as u128 + 1, usize::MAX as u128, u128::MAX] {
            assert!(
                matches!(
                    buffer_size(&format!("huge_{size}"), 0),
                    Err(Error::Naming { kind: ResourceKind::Buffer, .. })
                ),
                "{size} should be rejected"
            );
        }
    }
}
