// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Format negotiation.

Given what a context can do ([`CapabilityInfo`]) and what a layer asks for, pick the element
type, physical format and sampling parameters the layer will actually use.

Everything here is a pure function of its arguments.  The one piece of context I/O the
decision needs, whether the context can render into a given float type, is passed in as a
closure (see [`crate::context::BoundContext::test_framebuffer_write`]).

Degradations follow three rules:

1.  Type downgrades (`float32` to `float16`) are reported through [`Diagnostics`].
2.  Filter and wrap coercions are silent apart from a log line.
3.  When no fallback exists the result is a [`NegotiationError`].
*/

use crate::capabilities::{ApiTier, CapabilityInfo, Extension};
use crate::diagnostics::Diagnostics;
use crate::pixel_formats::{
    ElementType, Filter, InternalFormat, PhysicalFormat, StorageType, UploadFormat, Wrap,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum NegotiationError {
    #[error("unsupported type {element_type} on a {api_tier:?} context")]
    UnsupportedType {
        element_type: ElementType,
        api_tier: ApiTier,
    },
    #[error("unsupported number of components {0}, must be 1 to 4")]
    UnsupportedComponents(u8),
    #[error("invalid physical channel count {channels} for {num_components} components")]
    InvalidChannels { channels: u8, num_components: u8 },
    #[error("{element_type} textures need {extension}, which this context lacks")]
    MissingExtension {
        element_type: ElementType,
        extension: Extension,
    },
    #[error("this context does not support rendering to half-float textures")]
    NoWritableFloat,
}

/**
Decide which element type a layer really gets.

On legacy contexts `float32` needs [`Extension::TextureFloat`]; without it, or if a writable
layer can't be rendered into as `float32`, the type falls back to `float16`.  A writable
`float16` layer that can't be rendered into has nowhere left to go.

`write_test` is only invoked for writable float layers on legacy contexts.
*/
pub fn resolve_type<W: FnMut(ElementType) -> bool>(
    capabilities: &CapabilityInfo,
    element_type: ElementType,
    writable: bool,
    mut write_test: W,
    diagnostics: &Diagnostics,
) -> Result<ElementType, NegotiationError> {
    if capabilities.is_modern() {
        return Ok(element_type);
    }
    let mut resolved = element_type;
    if resolved == ElementType::Float32 {
        if !capabilities.has(Extension::TextureFloat) {
            diagnostics.report(&format!(
                "float32 textures are not supported ({} unavailable), falling back to float16.",
                Extension::TextureFloat
            ));
            resolved = ElementType::Float16;
        }
        // Float textures may be supported while rendering to them is not; this is
        // common on mobile hardware.
        else if writable && !write_test(ElementType::Float32) {
            diagnostics.report("Rendering to float32 textures is not supported, falling back to float16.");
            resolved = ElementType::Float16;
        }
    }
    if resolved == ElementType::Float16 && writable && !write_test(ElementType::Float16) {
        diagnostics.report("This context does not support rendering to half-float textures.");
        return Err(NegotiationError::NoWritableFloat);
    }
    Ok(resolved)
}

/// Sized formats for the modern tier, indexed by [`ElementType::ALL`] order, then channel count - 1.
const MODERN_FORMATS: [[InternalFormat; 4]; 8] = {
    use InternalFormat::*;
    [
        [R32F, RG32F, RGB32F, RGBA32F],
        [R16F, RG16F, RGB16F, RGBA16F],
        [R8, RG8, Rgb, Rgba],
        [R8I, RG8I, RGB8I, RGBA8I],
        [R16UI, RG16UI, RGB16UI, RGBA16UI],
        [R16I, RG16I, RGB16I, RGBA16I],
        [R32UI, RG32UI, RGB32UI, RGBA32UI],
        [R32I, RG32I, RGB32I, RGBA32I],
    ]
};

const fn type_index(element_type: ElementType) -> usize {
    match element_type {
        ElementType::Float32 => 0,
        ElementType::Float16 => 1,
        ElementType::Uint8 => 2,
        ElementType::Int8 => 3,
        ElementType::Uint16 => 4,
        ElementType::Int16 => 5,
        ElementType::Uint32 => 6,
        ElementType::Int32 => 7,
    }
}

const fn storage_type(element_type: ElementType) -> StorageType {
    match element_type {
        ElementType::Float32 => StorageType::Float,
        ElementType::Float16 => StorageType::HalfFloat,
        ElementType::Uint8 => StorageType::UnsignedByte,
        ElementType::Int8 => StorageType::Byte,
        ElementType::Uint16 => StorageType::UnsignedShort,
        ElementType::Int16 => StorageType::Short,
        ElementType::Uint32 => StorageType::UnsignedInt,
        ElementType::Int32 => StorageType::Int,
    }
}

/**
Storage type for a legacy context.

Signed integers have no legacy upload type.  The half float upload type only exists through
[`Extension::TextureHalfFloat`].
*/
fn legacy_storage_type(
    capabilities: &CapabilityInfo,
    element_type: ElementType,
) -> Result<StorageType, NegotiationError> {
    match element_type {
        ElementType::Int8 | ElementType::Int16 | ElementType::Int32 => Err(NegotiationError::UnsupportedType {
            element_type,
            api_tier: ApiTier::Legacy,
        }),
        ElementType::Float16 if !capabilities.has(Extension::TextureHalfFloat) => {
            Err(NegotiationError::MissingExtension {
                element_type,
                extension: Extension::TextureHalfFloat,
            })
        }
        _ => Ok(storage_type(element_type)),
    }
}

/**
Pick the physical format for an (already resolved) element type.

Modern contexts store exactly `num_components` channels, except that writable 3-component
layers are padded to 4: 3-channel sized float formats aren't color-renderable on common
drivers.  Legacy contexts only offer unsized RGB and RGBA, so 1 to 3 components all land in
RGB, and `float16` is only available with [`Extension::TextureHalfFloat`].
*/
pub fn negotiate(
    capabilities: &CapabilityInfo,
    element_type: ElementType,
    num_components: u8,
    writable: bool,
) -> Result<PhysicalFormat, NegotiationError> {
    if !(1..=4).contains(&num_components) {
        return Err(NegotiationError::UnsupportedComponents(num_components));
    }
    let format = match capabilities.api_tier {
        ApiTier::Modern => {
            let channels = if num_components == 3 && writable { 4 } else { num_components };
            let upload_format = UploadFormat::for_channels(channels)
                .ok_or(NegotiationError::UnsupportedComponents(channels))?;
            PhysicalFormat {
                internal_format: MODERN_FORMATS[type_index(element_type)][channels as usize - 1],
                upload_format,
                storage_type: storage_type(element_type),
                channels,
            }
        }
        ApiTier::Legacy => {
            //todo: read-only legacy layers could use ALPHA / LUMINANCE_ALPHA for 1 and 2 components
            let (internal_format, upload_format, channels) = if num_components <= 3 {
                (InternalFormat::Rgb, UploadFormat::Rgb, 3)
            } else {
                (InternalFormat::Rgba, UploadFormat::Rgba, 4)
            };
            let storage_type = legacy_storage_type(capabilities, element_type)?;
            PhysicalFormat {
                internal_format,
                upload_format,
                storage_type,
                channels,
            }
        }
    };
    validate(&format, num_components)?;
    Ok(format)
}

fn validate(format: &PhysicalFormat, num_components: u8) -> Result<(), NegotiationError> {
    let consistent = (1..=4).contains(&format.channels)
        && format.channels >= num_components
        && format.upload_format.channels() == format.channels
        && format.internal_format.channels() == format.channels;
    if consistent {
        Ok(())
    } else {
        Err(NegotiationError::InvalidChannels {
            channels: format.channels,
            num_components,
        })
    }
}

/**
Coerce a requested filter to one the context can apply.

Nearest always works.  Linear filtering of float textures needs the matching linear
extension; `float16` also accepts the `float32` one.
*/
pub fn resolve_filter(capabilities: &CapabilityInfo, filter: Filter, element_type: ElementType) -> Filter {
    if filter == Filter::Nearest {
        return filter;
    }
    let supported = match element_type {
        ElementType::Float16 => {
            capabilities.has(Extension::TextureHalfFloatLinear) || capabilities.has(Extension::TextureFloatLinear)
        }
        ElementType::Float32 => capabilities.has(Extension::TextureFloatLinear),
        _ => true,
    };
    if supported {
        filter
    } else {
        logwise::info_sync!(
            "Linear filtering unavailable for {element_type}, using nearest",
            element_type = logwise::privacy::LogIt(&element_type)
        );
        Filter::Nearest
    }
}

/**
Coerce a requested wrap mode to one the context can apply.

Legacy drivers misrender non-power-of-two float textures with repeat or mirrored wrapping
(some power-of-two sizes work, others don't), so legacy float layers always clamp.
*/
pub fn resolve_wrap(capabilities: &CapabilityInfo, wrap: Wrap, element_type: ElementType) -> Wrap {
    if capabilities.is_modern() || wrap == Wrap::ClampToEdge || !element_type.is_float() {
        return wrap;
    }
    logwise::info_sync!(
        "Wrap {wrap} unavailable for legacy {element_type} textures, clamping to edge",
        wrap = logwise::privacy::LogIt(&wrap),
        element_type = logwise::privacy::LogIt(&element_type)
    );
    Wrap::ClampToEdge
}
