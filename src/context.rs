// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
The graphics context, and probing it for capabilities.

[`GraphicsContext`] is the seam between this crate and a real graphics API.  It exposes the
handful of primitives data layers need: textures, render targets bound to them, uploads and
capability queries.  Backends include [`crate::software::SoftwareContext`] and, with the
`backend_wgpu` feature, `WgpuContext`.

[`BoundContext`] wraps a context for use by layers.  It is the only place that queries the
context about what it supports: it caches extension lookups and runs the framebuffer write
test used by [`crate::negotiate::resolve_type`].
*/

use crate::capabilities::{ApiTier, CapabilityInfo, Extension, Requirement};
use crate::diagnostics::Diagnostics;
use crate::negotiate::negotiate;
use crate::pixel_formats::{ElementType, InternalFormat, PhysicalFormat, Sampling, StorageType};
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::sync::{Arc, Mutex, PoisonError};

/// Side of the square texture allocated by the framebuffer write test.
const WRITE_TEST_SIZE: u32 = 100;

/// Completeness of a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetStatus {
    Complete,
    /// The attached texture has no storage, or storage that can't be rendered into.
    IncompleteAttachment,
    /// The context can't render into this combination of formats at all.
    Unsupported,
}

impl Display for TargetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetStatus::Complete => write!(f, "complete"),
            TargetStatus::IncompleteAttachment => write!(f, "incomplete attachment"),
            TargetStatus::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// A context refused to allocate something.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ContextError {
    #[error("could not create texture: {0}")]
    TextureCreation(String),
    #[error("could not create render target: {0}")]
    RenderTargetCreation(String),
    #[error("storage {internal_format:?} / {storage_type:?} is not supported")]
    UnsupportedStorage {
        internal_format: InternalFormat,
        storage_type: StorageType,
    },
    #[error("{width}x{height} exceeds the maximum texture size {max}")]
    TooLarge { width: u32, height: u32, max: u32 },
    #[error("expected {expected} bytes of pixel data, got {actual}")]
    DataSize { expected: usize, actual: usize },
    #[error("texture has no storage")]
    NoStorage,
    #[error("handle does not belong to this context")]
    UnknownHandle,
}

/**
Primitive operations a graphics context provides to data layers.

All methods take `&self`; contexts are shared between layers and use interior mutability
where they need it.  Callers serialize access: no two calls run concurrently against the
same context.
*/
pub trait GraphicsContext {
    type Texture: Debug;
    type RenderTarget: Debug;

    fn api_tier(&self) -> ApiTier;
    fn has_extension(&self, extension: Extension) -> bool;

    fn create_texture(&self, label: &str) -> Result<Self::Texture, ContextError>;
    fn configure_texture(&self, texture: &Self::Texture, sampling: &Sampling);
    /// Allocate storage for `texture` and fill it with `data`, or zeros when `data` is `None`.
    ///
    /// Any previous storage is discarded.
    fn upload_texture(
        &self,
        texture: &Self::Texture,
        format: &PhysicalFormat,
        width: u32,
        height: u32,
        data: Option<&[u8]>,
    ) -> Result<(), ContextError>;
    fn delete_texture(&self, texture: Self::Texture);

    /// Create a render target whose color output is `texture`.
    fn create_render_target(&self, texture: &Self::Texture) -> Result<Self::RenderTarget, ContextError>;
    fn render_target_status(&self, target: &Self::RenderTarget) -> TargetStatus;
    /// Make `target` the active render destination; `None` restores the default.
    fn bind_render_target(&self, target: Option<&Self::RenderTarget>);
    fn delete_render_target(&self, target: Self::RenderTarget);
}

/**
A context prepared for use by data layers.

Wraps the context together with its API tier (queried once) and a cache of extension
lookups, so asking about the same extension twice never reaches the context twice.
*/
pub struct BoundContext<C: GraphicsContext> {
    context: C,
    api_tier: ApiTier,
    extensions: Mutex<HashMap<Extension, bool>>,
}

impl<C: GraphicsContext> BoundContext<C> {
    pub fn bind(context: C) -> Arc<Self> {
        let api_tier = context.api_tier();
        logwise::info_sync!("Bound context with API tier {tier}", tier = logwise::privacy::LogIt(&api_tier));
        Arc::new(BoundContext {
            context,
            api_tier,
            extensions: Mutex::new(HashMap::new()),
        })
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn api_tier(&self) -> ApiTier {
        self.api_tier
    }

    fn lookup(&self, extension: Extension) -> bool {
        let mut cache = self.extensions.lock().unwrap_or_else(PoisonError::into_inner);
        *cache
            .entry(extension)
            .or_insert_with(|| self.context.has_extension(extension))
    }

    /**
    Look up an extension.

    A missing [`Requirement::Required`] extension is reported through `diagnostics`; a missing
    optional one is not.  Neither is an error.
    */
    pub fn extension(
        &self,
        extension: Extension,
        requirement: Requirement,
        diagnostics: &Diagnostics,
    ) -> Option<Extension> {
        if self.lookup(extension) {
            Some(extension)
        } else {
            if requirement == Requirement::Required {
                diagnostics.report(&format!("Required extension {extension} is not supported by this context."));
            }
            None
        }
    }

    /// Snapshot of the API tier and every known extension.
    pub fn capabilities(&self) -> CapabilityInfo {
        CapabilityInfo::new(
            self.api_tier,
            Extension::ALL.into_iter().filter(|e| self.lookup(*e)),
        )
    }

    /**
    Check that the context can really render into a texture of `element_type`.

    Support for a float texture type does not imply it can be rendered into, so this
    allocates a small single-channel texture, attaches a render target and asks whether the
    target is complete.  Everything it allocates is released before returning.
    */
    pub fn test_framebuffer_write(&self, element_type: ElementType) -> bool {
        let Ok(format) = negotiate(&self.capabilities(), element_type, 1, true) else {
            return false;
        };
        let Ok(texture) = self.context.create_texture("framebuffer write test") else {
            return false;
        };
        self.context.configure_texture(&texture, &Sampling::default());
        let complete = self
            .context
            .upload_texture(&texture, &format, WRITE_TEST_SIZE, WRITE_TEST_SIZE, None)
            .and_then(|_| self.context.create_render_target(&texture))
            .map(|target| {
                let status = self.context.render_target_status(&target);
                self.context.delete_render_target(target);
                status == TargetStatus::Complete
            })
            .unwrap_or(false);
        self.context.delete_texture(texture);
        logwise::info_sync!(
            "Framebuffer write test for {element_type}: {complete}",
            element_type = logwise::privacy::LogIt(&element_type),
            complete = complete
        );
        complete
    }
}

impl<C: GraphicsContext + Debug> Debug for BoundContext<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundContext")
            .field("context", &self.context)
            .field("api_tier", &self.api_tier)
            .finish_non_exhaustive()
    }
}
