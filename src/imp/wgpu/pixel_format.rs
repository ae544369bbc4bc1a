use crate::pixel_formats::{InternalFormat, PhysicalFormat, StorageType};

/// Storage type a sized internal format implies.
const fn implied_storage(internal_format: InternalFormat) -> StorageType {
    use InternalFormat::*;
    match internal_format {
        R32F | RG32F | RGB32F | RGBA32F => StorageType::Float,
        R16F | RG16F | RGB16F | RGBA16F => StorageType::HalfFloat,
        // unsized formats are stored bytewise unless the upload says otherwise
        R8 | RG8 | Rgb | Rgba => StorageType::UnsignedByte,
        R8I | RG8I | RGB8I | RGBA8I => StorageType::Byte,
        R16I | RG16I | RGB16I | RGBA16I => StorageType::Short,
        R16UI | RG16UI | RGB16UI | RGBA16UI => StorageType::UnsignedShort,
        R32I | RG32I | RGB32I | RGBA32I => StorageType::Int,
        R32UI | RG32UI | RGB32UI | RGBA32UI => StorageType::UnsignedInt,
    }
}

/**
The wgpu format storing `format`, and its channel count.

wgpu has no 3-channel formats, so those are stored in the 4-channel format of the same
precision; see [`pad_texels`].  Returns `None` when the internal format and storage type
disagree.
*/
pub(super) fn wgpu_format(format: &PhysicalFormat) -> Option<(wgpu::TextureFormat, u8)> {
    use wgpu::TextureFormat as F;
    // unsized formats take their precision from the storage type
    if !format.internal_format.is_unsized() && implied_storage(format.internal_format) != format.storage_type {
        return None;
    }
    let channels = match format.internal_format.channels() {
        3 => 4,
        c => c,
    };
    let texture_format = match (format.storage_type, channels) {
        (StorageType::Float, 1) => F::R32Float,
        (StorageType::Float, 2) => F::Rg32Float,
        (StorageType::Float, 4) => F::Rgba32Float,
        (StorageType::HalfFloat, 1) => F::R16Float,
        (StorageType::HalfFloat, 2) => F::Rg16Float,
        (StorageType::HalfFloat, 4) => F::Rgba16Float,
        (StorageType::UnsignedByte, 1) => F::R8Unorm,
        (StorageType::UnsignedByte, 2) => F::Rg8Unorm,
        (StorageType::UnsignedByte, 4) => F::Rgba8Unorm,
        (StorageType::Byte, 1) => F::R8Sint,
        (StorageType::Byte, 2) => F::Rg8Sint,
        (StorageType::Byte, 4) => F::Rgba8Sint,
        (StorageType::UnsignedShort, 1) => F::R16Uint,
        (StorageType::UnsignedShort, 2) => F::Rg16Uint,
        (StorageType::UnsignedShort, 4) => F::Rgba16Uint,
        (StorageType::Short, 1) => F::R16Sint,
        (StorageType::Short, 2) => F::Rg16Sint,
        (StorageType::Short, 4) => F::Rgba16Sint,
        (StorageType::UnsignedInt, 1) => F::R32Uint,
        (StorageType::UnsignedInt, 2) => F::Rg32Uint,
        (StorageType::UnsignedInt, 4) => F::Rgba32Uint,
        (StorageType::Int, 1) => F::R32Sint,
        (StorageType::Int, 2) => F::Rg32Sint,
        (StorageType::Int, 4) => F::Rgba32Sint,
        _ => return None,
    };
    Some((texture_format, channels))
}

/// Widen each texel from `from` to `to` channels, zero-filling the new ones.
pub(super) fn pad_texels(bytes: &[u8], scalar_bytes: usize, from: u8, to: u8) -> Vec<u8> {
    let from_len = scalar_bytes * from as usize;
    let to_len = scalar_bytes * to as usize;
    let mut out = vec![0; bytes.len() / from_len * to_len];
    for (source, dest) in bytes.chunks_exact(from_len).zip(out.chunks_exact_mut(to_len)) {
        dest[..from_len].copy_from_slice(source);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_formats::UploadFormat;

    fn format(internal_format: InternalFormat, storage_type: StorageType, channels: u8) -> PhysicalFormat {
        PhysicalFormat {
            internal_format,
            upload_format: UploadFormat::for_channels(channels).unwrap(),
            storage_type,
            channels,
        }
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn three_channels_are_widened() {
        assert_eq!(
            wgpu_format(&format(InternalFormat::RGB32F, StorageType::Float, 3)),
            Some((wgpu::TextureFormat::Rgba32Float, 4))
        );
        assert_eq!(
            wgpu_format(&format(InternalFormat::Rgb, StorageType::UnsignedByte, 3)),
            Some((wgpu::TextureFormat::Rgba8Unorm, 4))
        );
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn sized_formats() {
        assert_eq!(
            wgpu_format(&format(InternalFormat::RG16F, StorageType::HalfFloat, 2)),
            Some((wgpu::TextureFormat::Rg16Float, 2))
        );
        assert_eq!(
            wgpu_format(&format(InternalFormat::R16UI, StorageType::UnsignedShort, 1)),
            Some((wgpu::TextureFormat::R16Uint, 1))
        );
        assert_eq!(
            wgpu_format(&format(InternalFormat::RGBA32I, StorageType::Int, 4)),
            Some((wgpu::TextureFormat::Rgba32Sint, 4))
        );
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn mismatched_storage() {
        assert_eq!(wgpu_format(&format(InternalFormat::R32F, StorageType::UnsignedByte, 1)), None);
        assert_eq!(wgpu_format(&format(InternalFormat::R8, StorageType::HalfFloat, 1)), None);
        // legacy unsized formats accept any storage type
        assert_eq!(
            wgpu_format(&format(InternalFormat::Rgba, StorageType::HalfFloat, 4)),
            Some((wgpu::TextureFormat::Rgba16Float, 4))
        );
        assert_eq!(
            wgpu_format(&format(InternalFormat::Rgb, StorageType::Float, 3)),
            Some((wgpu::TextureFormat::Rgba32Float, 4))
        );
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn padding() {
        let padded = pad_texels(&[1, 2, 3, 4, 5, 6], 1, 3, 4);
        assert_eq!(padded, vec![1, 2, 3, 0, 4, 5, 6, 0]);
        let padded = pad_texels(&[1, 1, 2, 2, 3, 3], 2, 3, 4);
        assert_eq!(padded, vec![1, 1, 2, 2, 3, 3, 0, 0]);
    }
}
