// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Element types and physical texture formats.
//!
//! A data layer is described to callers in terms of an [`ElementType`] (the numeric
//! kind of each component) and a component count.  The GPU, however, stores the data
//! in a concrete texture format, described here by [`PhysicalFormat`]:
//!
//! - [`InternalFormat`] - how the texture is stored on the GPU (sized or unsized)
//! - [`UploadFormat`] - the channel layout of the data we upload
//! - [`StorageType`] - the per-channel scalar type of the uploaded data
//! - a physical channel count, which may exceed the logical component count
//!
//! The mapping from the caller-facing description to a physical format lives in
//! [`crate::negotiate`].
//!
//! # Examples
//!
//! ```
//! use data_layers::pixel_formats::ElementType;
//!
//! assert!(ElementType::Float16.is_float());
//! assert_eq!(ElementType::Uint16.bytes_per_component(), 2);
//! assert_eq!(ElementType::Int8.to_string(), "int8");
//! ```

/*
Quick note on type design.  It's tempting to encode pixel formats as zero-sized types so
that texture reads and writes typecheck.  That doesn't work here: the element type a layer
ends up with is only known at runtime, after we've asked the context what it can render
into, and it may be downgraded along the way.  So element types are a closed enum, and
everything physical is derived from it through lookup tables.
 */

use crate::pixel_formats::sealed::ReprC;
use std::fmt::Display;

pub use half::f16;

pub(crate) mod sealed {
    /// Marker trait indicating C-compatible memory layout.
    ///
    /// # Safety
    ///
    /// Implementors must have no padding and no uninitialized bytes, so that a slice of
    /// them may be viewed as bytes.
    pub unsafe trait ReprC: Copy {}
}

unsafe impl ReprC for f32 {}
unsafe impl ReprC for half::f16 {}
unsafe impl ReprC for u8 {}
unsafe impl ReprC for i8 {}
unsafe impl ReprC for u16 {}
unsafe impl ReprC for i16 {}
unsafe impl ReprC for u32 {}
unsafe impl ReprC for i32 {}

// Uploads hand these bytes straight to the context, which expects little-endian scalars.
#[cfg(not(target_endian = "little"))]
compile_error!("data_layers uploads native-endian bytes and requires a little-endian target");

/// View a slice of scalars as raw bytes, little-endian.
pub(crate) fn scalars_as_bytes<T: ReprC>(t: &[T]) -> &[u8] {
    //safe because we know that T is repr(C)
    //(we offloaded the safety check to the ReprC trait)
    unsafe { std::slice::from_raw_parts(t.as_ptr() as *const u8, std::mem::size_of_val(t)) }
}

/// The numeric kind of each component of a data layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Float32,
    Float16,
    Uint8,
    Int8,
    Uint16,
    Int16,
    Uint32,
    Int32,
}

impl ElementType {
    /// All element types, in declaration order.
    pub const ALL: [ElementType; 8] = [
        ElementType::Float32,
        ElementType::Float16,
        ElementType::Uint8,
        ElementType::Int8,
        ElementType::Uint16,
        ElementType::Int16,
        ElementType::Uint32,
        ElementType::Int32,
    ];

    /// True for the two floating point kinds.
    pub const fn is_float(self) -> bool {
        matches!(self, ElementType::Float32 | ElementType::Float16)
    }

    pub const fn bytes_per_component(self) -> usize {
        match self {
            ElementType::Uint8 | ElementType::Int8 => 1,
            ElementType::Float16 | ElementType::Uint16 | ElementType::Int16 => 2,
            ElementType::Float32 | ElementType::Uint32 | ElementType::Int32 => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ElementType::Float32 => "float32",
            ElementType::Float16 => "float16",
            ElementType::Uint8 => "uint8",
            ElementType::Int8 => "int8",
            ElementType::Uint16 => "uint16",
            ElementType::Int16 => "int16",
            ElementType::Uint32 => "uint32",
            ElementType::Int32 => "int32",
        }
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// GPU-side storage format of a texture.
///
/// Sized formats name both channel layout and precision.  The unsized [`InternalFormat::Rgb`]
/// and [`InternalFormat::Rgba`] leave precision to the [`StorageType`] of the upload, which is
/// the only option on legacy contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InternalFormat {
    R32F,
    RG32F,
    RGB32F,
    RGBA32F,
    R16F,
    RG16F,
    RGB16F,
    RGBA16F,
    R8,
    RG8,
    Rgb,
    Rgba,
    R8I,
    RG8I,
    RGB8I,
    RGBA8I,
    R16I,
    RG16I,
    RGB16I,
    RGBA16I,
    R16UI,
    RG16UI,
    RGB16UI,
    RGBA16UI,
    R32I,
    RG32I,
    RGB32I,
    RGBA32I,
    R32UI,
    RG32UI,
    RGB32UI,
    RGBA32UI,
}

impl InternalFormat {
    /// Number of color channels stored per texel.
    pub const fn channels(self) -> u8 {
        use InternalFormat::*;
        match self {
            R32F | R16F | R8 | R8I | R16I | R16UI | R32I | R32UI => 1,
            RG32F | RG16F | RG8 | RG8I | RG16I | RG16UI | RG32I | RG32UI => 2,
            RGB32F | RGB16F | Rgb | RGB8I | RGB16I | RGB16UI | RGB32I | RGB32UI => 3,
            RGBA32F | RGBA16F | Rgba | RGBA8I | RGBA16I | RGBA16UI | RGBA32I | RGBA32UI => 4,
        }
    }

    /// True for formats whose precision is implied by the upload type.
    pub const fn is_unsized(self) -> bool {
        matches!(self, InternalFormat::Rgb | InternalFormat::Rgba)
    }
}

/// Channel layout of uploaded pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadFormat {
    Red,
    Rg,
    Rgb,
    Rgba,
}

impl UploadFormat {
    /// The upload format for a channel count in 1..=4.
    pub const fn for_channels(channels: u8) -> Option<UploadFormat> {
        match channels {
            1 => Some(UploadFormat::Red),
            2 => Some(UploadFormat::Rg),
            3 => Some(UploadFormat::Rgb),
            4 => Some(UploadFormat::Rgba),
            _ => None,
        }
    }

    pub const fn channels(self) -> u8 {
        match self {
            UploadFormat::Red => 1,
            UploadFormat::Rg => 2,
            UploadFormat::Rgb => 3,
            UploadFormat::Rgba => 4,
        }
    }
}

/// Scalar type of each uploaded channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    Float,
    HalfFloat,
    UnsignedByte,
    Byte,
    UnsignedShort,
    Short,
    UnsignedInt,
    Int,
}

impl StorageType {
    pub const fn bytes(self) -> usize {
        match self {
            StorageType::UnsignedByte | StorageType::Byte => 1,
            StorageType::HalfFloat | StorageType::UnsignedShort | StorageType::Short => 2,
            StorageType::Float | StorageType::UnsignedInt | StorageType::Int => 4,
        }
    }

    /// The element type whose values are stored with this scalar type.
    pub const fn element_type(self) -> ElementType {
        match self {
            StorageType::Float => ElementType::Float32,
            StorageType::HalfFloat => ElementType::Float16,
            StorageType::UnsignedByte => ElementType::Uint8,
            StorageType::Byte => ElementType::Int8,
            StorageType::UnsignedShort => ElementType::Uint16,
            StorageType::Short => ElementType::Int16,
            StorageType::UnsignedInt => ElementType::Uint32,
            StorageType::Int => ElementType::Int32,
        }
    }
}

/// The concrete texture format chosen for a layer.
///
/// `channels` is always at least the layer's logical component count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicalFormat {
    pub internal_format: InternalFormat,
    pub upload_format: UploadFormat,
    pub storage_type: StorageType,
    pub channels: u8,
}

impl PhysicalFormat {
    pub const fn bytes_per_texel(&self) -> usize {
        self.storage_type.bytes() * self.channels as usize
    }
}

/// Texture sampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Nearest,
    Linear,
}

/// Texture coordinate wrap mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wrap {
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

/// Sampling parameters applied to every texture of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sampling {
    pub filter: Filter,
    pub wrap_s: Wrap,
    pub wrap_t: Wrap,
}

impl Default for Sampling {
    fn default() -> Self {
        Sampling {
            filter: Filter::Nearest,
            wrap_s: Wrap::ClampToEdge,
            wrap_t: Wrap::ClampToEdge,
        }
    }
}
