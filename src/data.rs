// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Caller-supplied layer data, and packing it into texture layout.

Textures store `width * height` texels of `channels` scalars each.  Callers hand us
`length * num_components` scalars (or `width * height * num_components` for 2D layers).
When those two layouts differ, [`pack`] scatters each logical element into the first
`num_components` slots of its texel and leaves the padding zeroed.  When they already
agree the caller's data is used as-is, without a copy.

`float32` data bound for `float16` storage is narrowed to half precision on the way.
*/

use crate::pixel_formats::{ElementType, f16, scalars_as_bytes};
use std::borrow::Cow;

/// Typed data for a layer, one variant per [`ElementType`].
#[derive(Debug, Clone, PartialEq)]
pub enum LayerData {
    Float32(Vec<f32>),
    Float16(Vec<f16>),
    Uint8(Vec<u8>),
    Int8(Vec<i8>),
    Uint16(Vec<u16>),
    Int16(Vec<i16>),
    Uint32(Vec<u32>),
    Int32(Vec<i32>),
}

impl LayerData {
    /// Number of scalars.
    pub fn len(&self) -> usize {
        match self {
            LayerData::Float32(v) => v.len(),
            LayerData::Float16(v) => v.len(),
            LayerData::Uint8(v) => v.len(),
            LayerData::Int8(v) => v.len(),
            LayerData::Uint16(v) => v.len(),
            LayerData::Int16(v) => v.len(),
            LayerData::Uint32(v) => v.len(),
            LayerData::Int32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The runtime element type of the data.
    pub fn element_type(&self) -> ElementType {
        match self {
            LayerData::Float32(_) => ElementType::Float32,
            LayerData::Float16(_) => ElementType::Float16,
            LayerData::Uint8(_) => ElementType::Uint8,
            LayerData::Int8(_) => ElementType::Int8,
            LayerData::Uint16(_) => ElementType::Uint16,
            LayerData::Int16(_) => ElementType::Int16,
            LayerData::Uint32(_) => ElementType::Uint32,
            LayerData::Int32(_) => ElementType::Int32,
        }
    }

    /// Raw little-endian bytes, ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            LayerData::Float32(v) => scalars_as_bytes(v),
            LayerData::Float16(v) => scalars_as_bytes(v),
            LayerData::Uint8(v) => scalars_as_bytes(v),
            LayerData::Int8(v) => scalars_as_bytes(v),
            LayerData::Uint16(v) => scalars_as_bytes(v),
            LayerData::Int16(v) => scalars_as_bytes(v),
            LayerData::Uint32(v) => scalars_as_bytes(v),
            LayerData::Int32(v) => scalars_as_bytes(v),
        }
    }
}

impl From<Vec<f32>> for LayerData {
    fn from(value: Vec<f32>) -> Self {
        LayerData::Float32(value)
    }
}
impl From<Vec<f16>> for LayerData {
    fn from(value: Vec<f16>) -> Self {
        LayerData::Float16(value)
    }
}
impl From<Vec<u8>> for LayerData {
    fn from(value: Vec<u8>) -> Self {
        LayerData::Uint8(value)
    }
}
impl From<Vec<i8>> for LayerData {
    fn from(value: Vec<i8>) -> Self {
        LayerData::Int8(value)
    }
}
impl From<Vec<u16>> for LayerData {
    fn from(value: Vec<u16>) -> Self {
        LayerData::Uint16(value)
    }
}
impl From<Vec<i16>> for LayerData {
    fn from(value: Vec<i16>) -> Self {
        LayerData::Int16(value)
    }
}
impl From<Vec<u32>> for LayerData {
    fn from(value: Vec<u32>) -> Self {
        LayerData::Uint32(value)
    }
}
impl From<Vec<i32>> for LayerData {
    fn from(value: Vec<i32>) -> Self {
        LayerData::Int32(value)
    }
}

/// Everything [`pack`] needs to know about the destination texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackLayout {
    /// Logical elements: `length` for 1D layers, `width * height` for 2D layers.
    pub logical_elements: usize,
    pub num_components: u8,
    /// Texels in the backing texture, `width * height`.
    pub texels: usize,
    pub channels: u8,
    /// The resolved element type of the layer.
    pub element_type: ElementType,
}

/// Why caller data was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    #[error("expected {expected} values, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("expected {expected} data, got {actual}")]
    Type { expected: ElementType, actual: ElementType },
}

/**
Validate `data` against `layout` and bring it into texture layout.

Returns the caller's data unmodified (borrowed) when it already has the texture's length
and no narrowing is needed; otherwise a new, zero-padded buffer.

```
use data_layers::data::{pack, LayerData, PackLayout};
use data_layers::pixel_formats::ElementType;
use std::borrow::Cow;

let layout = PackLayout {
    logical_elements: 2,
    num_components: 2,
    texels: 2,
    channels: 3,
    element_type: ElementType::Uint8,
};
let data = LayerData::Uint8(vec![1, 2, 3, 4]);
let packed = pack(&data, &layout).unwrap();
assert_eq!(packed, Cow::<LayerData>::Owned(LayerData::Uint8(vec![1, 2, 0, 3, 4, 0])));
```
*/
pub fn pack<'a>(data: &'a LayerData, layout: &PackLayout) -> Result<Cow<'a, LayerData>, PackError> {
    let expected = layout.logical_elements * layout.num_components as usize;
    if data.len() != expected {
        return Err(PackError::Length {
            expected,
            actual: data.len(),
        });
    }
    // Half floats may be supplied directly, or as f32 which we narrow ourselves.
    let type_ok = data.element_type() == layout.element_type
        || (layout.element_type == ElementType::Float16 && data.element_type() == ElementType::Float32);
    if !type_ok {
        return Err(PackError::Type {
            expected: layout.element_type,
            actual: data.element_type(),
        });
    }

    let image_len = layout.texels * layout.channels as usize;
    let narrowing = layout.element_type == ElementType::Float16 && data.element_type() == ElementType::Float32;
    if !narrowing && data.len() == image_len {
        return Ok(Cow::Borrowed(data));
    }
    let n = layout.num_components as usize;
    let c = layout.channels as usize;
    let packed = match data {
        LayerData::Float32(v) if narrowing => LayerData::Float16(scatter(v, n, c, image_len, f16::from_f32)),
        LayerData::Float32(v) => LayerData::Float32(scatter(v, n, c, image_len, |x| x)),
        LayerData::Float16(v) => LayerData::Float16(scatter(v, n, c, image_len, |x| x)),
        LayerData::Uint8(v) => LayerData::Uint8(scatter(v, n, c, image_len, |x| x)),
        LayerData::Int8(v) => LayerData::Int8(scatter(v, n, c, image_len, |x| x)),
        LayerData::Uint16(v) => LayerData::Uint16(scatter(v, n, c, image_len, |x| x)),
        LayerData::Int16(v) => LayerData::Int16(scatter(v, n, c, image_len, |x| x)),
        LayerData::Uint32(v) => LayerData::Uint32(scatter(v, n, c, image_len, |x| x)),
        LayerData::Int32(v) => LayerData::Int32(scatter(v, n, c, image_len, |x| x)),
    };
    Ok(Cow::Owned(packed))
}

fn scatter<S: Copy, D: Copy + Default, F: Fn(S) -> D>(
    source: &[S],
    num_components: usize,
    channels: usize,
    image_len: usize,
    convert: F,
) -> Vec<D> {
    let mut out = vec![D::default(); image_len];
    for (element, values) in source.chunks_exact(num_components).enumerate() {
        let texel = &mut out[element * channels..element * channels + num_components];
        for (slot, value) in texel.iter_mut().zip(values) {
            *slot = convert(*value);
        }
    }
    out
}
