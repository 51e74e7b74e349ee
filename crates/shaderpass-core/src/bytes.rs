//! Byte views of plain-data structs uploaded to GPU buffers.

/// View a `#[repr(C)]` struct as the bytes uploaded to a storage buffer.
///
/// # Safety
///
/// Only implement on `#[repr(C)]` structs made of plain numeric fields (and
/// arrays of them) with no implicit padding, no pointers and no references.
pub unsafe trait AsBytes: Sized {
    /// The returned slice has length `std::mem::size_of::<Self>()`.
    fn as_bytes(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(self as *const Self as *const u8, std::mem::size_of::<Self>())
        }
    }
}

unsafe impl AsBytes for [u32; 3] {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_covers_the_whole_value() {
        let groups = [1u32, 2, 3];
        let bytes = groups.as_bytes();
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[4..8], &2u32.to_ne_bytes());
    }
}
