// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Software graphics context.

[`SoftwareContext`] implements [`GraphicsContext`] entirely on the CPU.  Textures are byte
buffers, render targets are records of which texture they point at, and nothing is ever
drawn.  It is useful for:

- Running data layer code where no GPU is available
- Emulating the capability matrix of a particular driver (tier, extensions, which storage
  types can be rendered into) to see which formats a layer would end up with
- Debugging and testing, since every call is recorded and can be inspected

# Example

```
use data_layers::context::BoundContext;
use data_layers::layer::{DataLayer, LayerOptions};
use data_layers::diagnostics::Diagnostics;
use data_layers::pixel_formats::ElementType;
use data_layers::software::SoftwareContext;

let context = BoundContext::bind(SoftwareContext::modern());
let layer = DataLayer::new(
    "positions",
    &context,
    LayerOptions::new(100, 2, ElementType::Float32),
    Diagnostics::log_only(),
    true,
    2,
).unwrap();
assert_eq!(layer.dimensions(), (16, 8));
assert_eq!(context.context().live_textures(), 2);
assert_eq!(context.context().live_render_targets(), 2);
```
*/

use crate::capabilities::{ApiTier, Extension};
use crate::context::{ContextError, GraphicsContext, TargetStatus};
use crate::pixel_formats::{InternalFormat, PhysicalFormat, Sampling, StorageType};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Largest texture side the software context accepts by default.
const DEFAULT_MAX_DIMENSION: u32 = 4096;

/// Handle to a [`SoftwareContext`] texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

/// Handle to a [`SoftwareContext`] render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetId(u32);

/// One recorded call into a [`SoftwareContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    QueryExtension(Extension),
    CreateTexture(TextureId),
    ConfigureTexture(TextureId, Sampling),
    UploadTexture {
        texture: TextureId,
        format: PhysicalFormat,
        width: u32,
        height: u32,
        with_data: bool,
    },
    DeleteTexture(TextureId),
    CreateRenderTarget(RenderTargetId, TextureId),
    RenderTargetStatus(RenderTargetId),
    BindRenderTarget(Option<RenderTargetId>),
    DeleteRenderTarget(RenderTargetId),
}

/// Storage of a software texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureStorage {
    pub format: PhysicalFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct SoftwareTexture {
    sampling: Option<Sampling>,
    storage: Option<TextureStorage>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u32,
    textures: HashMap<u32, SoftwareTexture>,
    render_targets: HashMap<u32, u32>,
    bound: Option<RenderTargetId>,
    calls: Vec<Call>,
}

impl State {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// A CPU-only [`GraphicsContext`] with a configurable capability matrix.
#[derive(Debug)]
pub struct SoftwareContext {
    api_tier: ApiTier,
    extensions: HashSet<Extension>,
    renderable: HashSet<StorageType>,
    unrenderable_formats: HashSet<InternalFormat>,
    max_dimension: u32,
    texture_limit: Option<usize>,
    render_target_limit: Option<usize>,
    state: Mutex<State>,
}

impl SoftwareContext {
    fn new(api_tier: ApiTier) -> Self {
        SoftwareContext {
            api_tier,
            extensions: HashSet::new(),
            renderable: HashSet::new(),
            unrenderable_formats: HashSet::new(),
            max_dimension: DEFAULT_MAX_DIMENSION,
            texture_limit: None,
            render_target_limit: None,
            state: Mutex::new(State::default()),
        }
    }

    /**
    A modern-tier context with every extension.

    Every storage type can be rendered into, except through the 3-channel sized float
    formats, which (as on most drivers) are not color-renderable.
    */
    pub fn modern() -> Self {
        let mut context = SoftwareContext::new(ApiTier::Modern);
        context.extensions.extend(Extension::ALL);
        context.renderable.extend([
            StorageType::Float,
            StorageType::HalfFloat,
            StorageType::UnsignedByte,
            StorageType::Byte,
            StorageType::UnsignedShort,
            StorageType::Short,
            StorageType::UnsignedInt,
            StorageType::Int,
        ]);
        context
            .unrenderable_formats
            .extend([InternalFormat::RGB32F, InternalFormat::RGB16F]);
        context
    }

    /// A legacy-tier context with no extensions that can only render into bytes.
    pub fn legacy() -> Self {
        let mut context = SoftwareContext::new(ApiTier::Legacy);
        context.renderable.insert(StorageType::UnsignedByte);
        context
    }

    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extensions.insert(extension);
        self
    }

    pub fn without_extension(mut self, extension: Extension) -> Self {
        self.extensions.remove(&extension);
        self
    }

    /// Allow render targets on textures stored as `storage_type`.
    pub fn with_renderable(mut self, storage_type: StorageType) -> Self {
        self.renderable.insert(storage_type);
        self
    }

    pub fn without_renderable(mut self, storage_type: StorageType) -> Self {
        self.renderable.remove(&storage_type);
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Refuse to create textures once `limit` are alive.
    pub fn with_texture_limit(mut self, limit: usize) -> Self {
        self.texture_limit = Some(limit);
        self
    }

    /// Refuse to create render targets once `limit` are alive.
    pub fn with_render_target_limit(mut self, limit: usize) -> Self {
        self.render_target_limit = Some(limit);
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn live_textures(&self) -> usize {
        self.state().textures.len()
    }

    pub fn live_render_targets(&self) -> usize {
        self.state().render_targets.len()
    }

    pub fn bound_render_target(&self) -> Option<RenderTargetId> {
        self.state().bound
    }

    /// The texture a render target writes into.
    pub fn render_target_texture(&self, target: RenderTargetId) -> Option<TextureId> {
        self.state().render_targets.get(&target.0).map(|t| TextureId(*t))
    }

    pub fn texture_storage(&self, texture: TextureId) -> Option<TextureStorage> {
        self.state().textures.get(&texture.0)?.storage.clone()
    }

    pub fn texture_sampling(&self, texture: TextureId) -> Option<Sampling> {
        self.state().textures.get(&texture.0)?.sampling
    }

    fn status_of(&self, storage: Option<&TextureStorage>) -> TargetStatus {
        match storage {
            None => TargetStatus::IncompleteAttachment,
            Some(s) if self.unrenderable_formats.contains(&s.format.internal_format) => TargetStatus::Unsupported,
            Some(s) if !self.renderable.contains(&s.format.storage_type) => TargetStatus::IncompleteAttachment,
            Some(_) => TargetStatus::Complete,
        }
    }
}

impl GraphicsContext for SoftwareContext {
    type Texture = TextureId;
    type RenderTarget = RenderTargetId;

    fn api_tier(&self) -> ApiTier {
        self.api_tier
    }

    fn has_extension(&self, extension: Extension) -> bool {
        self.state().calls.push(Call::QueryExtension(extension));
        self.extensions.contains(&extension)
    }

    fn create_texture(&self, _label: &str) -> Result<TextureId, ContextError> {
        let mut state = self.state();
        if let Some(limit) = self.texture_limit
            && state.textures.len() >= limit
        {
            return Err(ContextError::TextureCreation(format!("limit of {limit} textures reached")));
        }
        let id = TextureId(state.next_id());
        state.textures.insert(id.0, SoftwareTexture::default());
        state.calls.push(Call::CreateTexture(id));
        Ok(id)
    }

    fn configure_texture(&self, texture: &TextureId, sampling: &Sampling) {
        let mut state = self.state();
        state.calls.push(Call::ConfigureTexture(*texture, *sampling));
        if let Some(t) = state.textures.get_mut(&texture.0) {
            t.sampling = Some(*sampling);
        }
    }

    fn upload_texture(
        &self,
        texture: &TextureId,
        format: &PhysicalFormat,
        width: u32,
        height: u32,
        data: Option<&[u8]>,
    ) -> Result<(), ContextError> {
        let mut state = self.state();
        state.calls.push(Call::UploadTexture {
            texture: *texture,
            format: *format,
            width,
            height,
            with_data: data.is_some(),
        });
        if width > self.max_dimension || height > self.max_dimension {
            return Err(ContextError::TooLarge {
                width,
                height,
                max: self.max_dimension,
            });
        }
        let expected = width as usize * height as usize * format.bytes_per_texel();
        let bytes = match data {
            Some(d) if d.len() != expected => {
                return Err(ContextError::DataSize {
                    expected,
                    actual: d.len(),
                });
            }
            Some(d) => d.to_vec(),
            None => vec![0; expected],
        };
        let t = state.textures.get_mut(&texture.0).ok_or(ContextError::UnknownHandle)?;
        t.storage = Some(TextureStorage {
            format: *format,
            width,
            height,
            bytes,
        });
        Ok(())
    }

    fn delete_texture(&self, texture: TextureId) {
        let mut state = self.state();
        state.calls.push(Call::DeleteTexture(texture));
        state.textures.remove(&texture.0);
    }

    fn create_render_target(&self, texture: &TextureId) -> Result<RenderTargetId, ContextError> {
        let mut state = self.state();
        if let Some(limit) = self.render_target_limit
            && state.render_targets.len() >= limit
        {
            return Err(ContextError::RenderTargetCreation(format!(
                "limit of {limit} render targets reached"
            )));
        }
        if !state.textures.contains_key(&texture.0) {
            return Err(ContextError::UnknownHandle);
        }
        let id = RenderTargetId(state.next_id());
        state.render_targets.insert(id.0, texture.0);
        state.calls.push(Call::CreateRenderTarget(id, *texture));
        Ok(id)
    }

    fn render_target_status(&self, target: &RenderTargetId) -> TargetStatus {
        let mut state = self.state();
        state.calls.push(Call::RenderTargetStatus(*target));
        let storage = state
            .render_targets
            .get(&target.0)
            .and_then(|t| state.textures.get(t))
            .and_then(|t| t.storage.as_ref());
        self.status_of(storage)
    }

    fn bind_render_target(&self, target: Option<&RenderTargetId>) {
        let mut state = self.state();
        state.calls.push(Call::BindRenderTarget(target.copied()));
        state.bound = target.copied();
    }

    fn delete_render_target(&self, target: RenderTargetId) {
        let mut state = self.state();
        state.calls.push(Call::DeleteRenderTarget(target));
        state.render_targets.remove(&target.0);
        if state.bound == Some(target) {
            state.bound = None;
        }
    }
}
