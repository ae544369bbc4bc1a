// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! What a graphics context can do.
//!
//! Contexts come in two [`ApiTier`]s.  The modern tier has sized floating point render
//! targets and 1- to 4-channel formats natively; the legacy tier only has coarse,
//! unsized formats and needs optional [`Extension`]s for anything floating point.
//!
//! [`CapabilityInfo`] is a plain snapshot of both.  It is produced by
//! [`crate::context::BoundContext::capabilities`] and consumed by the pure functions in
//! [`crate::negotiate`], so format selection can be exercised without any context at all.

use std::collections::HashSet;
use std::fmt::Display;

/// Capability class of the underlying graphics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiTier {
    /// Native floating point render targets and flexible channel layouts.
    Modern,
    /// Unsized formats only; floating point support comes from extensions.
    Legacy,
}

/// Optional context extensions that affect format and filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    /// 32-bit float textures on legacy contexts.
    TextureFloat,
    /// 16-bit float textures on legacy contexts.
    TextureHalfFloat,
    /// Linear filtering of 32-bit float textures.
    TextureFloatLinear,
    /// Linear filtering of 16-bit float textures.
    TextureHalfFloatLinear,
    /// 16- and 32-bit unsigned integer textures on legacy contexts.
    DepthTexture,
    /// Rendering into floating point textures on modern contexts.
    ColorBufferFloat,
}

impl Extension {
    pub const ALL: [Extension; 6] = [
        Extension::TextureFloat,
        Extension::TextureHalfFloat,
        Extension::TextureFloatLinear,
        Extension::TextureHalfFloatLinear,
        Extension::DepthTexture,
        Extension::ColorBufferFloat,
    ];

    /// The registry name of the extension.
    pub const fn name(self) -> &'static str {
        match self {
            Extension::TextureFloat => "OES_texture_float",
            Extension::TextureHalfFloat => "OES_texture_half_float",
            Extension::TextureFloatLinear => "OES_texture_float_linear",
            Extension::TextureHalfFloatLinear => "OES_texture_half_float_linear",
            Extension::DepthTexture => "WEBGL_depth_texture",
            Extension::ColorBufferFloat => "EXT_color_buffer_float",
        }
    }
}

impl Display for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a missing extension should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Missing is reported through the diagnostic callback.
    Required,
    /// Missing is expected; the caller degrades silently.
    Optional,
}

/// A snapshot of a context's API tier and supported extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityInfo {
    pub api_tier: ApiTier,
    pub extensions: HashSet<Extension>,
}

impl CapabilityInfo {
    pub fn new(api_tier: ApiTier, extensions: impl IntoIterator<Item = Extension>) -> Self {
        CapabilityInfo {
            api_tier,
            extensions: extensions.into_iter().collect(),
        }
    }

    pub fn has(&self, extension: Extension) -> bool {
        self.extensions.contains(&extension)
    }

    pub fn is_modern(&self) -> bool {
        self.api_tier == ApiTier::Modern
    }
}
