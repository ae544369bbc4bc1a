// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use super::pixel_format::{pad_texels, wgpu_format};
use super::sampler::create_sampler;
use crate::capabilities::{ApiTier, Extension};
use crate::context::{ContextError, GraphicsContext, TargetStatus};
use crate::pixel_formats::{PhysicalFormat, Sampling};
use std::sync::{Mutex, MutexGuard, PoisonError};
use wgpu::{Extent3d, TexelCopyBufferLayout, TexelCopyTextureInfo};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/**
A [`GraphicsContext`] backed by a wgpu device.

wgpu exposes a single capability class, so this always reports [`ApiTier::Modern`]; the
extensions map onto wgpu features and per-format capabilities of the adapter.

Rendering is up to the caller: [`WgpuContext::bound_target`] returns the view the most
recently bound render target draws into, for use as a render pass color attachment.
*/
#[derive(Debug)]
pub struct WgpuContext {
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    bound: Mutex<Option<wgpu::TextureView>>,
}

impl WgpuContext {
    pub fn new(adapter: wgpu::Adapter, device: wgpu::Device, queue: wgpu::Queue) -> Self {
        WgpuContext {
            adapter,
            device,
            queue,
            bound: Mutex::new(None),
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// The color attachment of the bound render target, if any.
    pub fn bound_target(&self) -> Option<wgpu::TextureView> {
        lock(&self.bound).clone()
    }
}

#[derive(Debug)]
struct Storage {
    texture: wgpu::Texture,
    renderable: bool,
}

/// A texture of a [`WgpuContext`].  Storage is created on upload.
#[derive(Debug)]
pub struct WgpuTexture {
    label: String,
    storage: Mutex<Option<Storage>>,
    sampler: Mutex<Option<wgpu::Sampler>>,
}

impl WgpuTexture {
    pub fn texture(&self) -> Option<wgpu::Texture> {
        lock(&self.storage).as_ref().map(|s| s.texture.clone())
    }

    /// The sampler matching the layer's filter and wrap modes.
    pub fn sampler(&self) -> Option<wgpu::Sampler> {
        lock(&self.sampler).clone()
    }
}

/// A render target of a [`WgpuContext`].
#[derive(Debug)]
pub struct WgpuRenderTarget {
    view: wgpu::TextureView,
    status: TargetStatus,
}

impl WgpuRenderTarget {
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

impl GraphicsContext for WgpuContext {
    type Texture = WgpuTexture;
    type RenderTarget = WgpuRenderTarget;

    fn api_tier(&self) -> ApiTier {
        ApiTier::Modern
    }

    fn has_extension(&self, extension: Extension) -> bool {
        match extension {
            Extension::TextureFloatLinear => self.device.features().contains(wgpu::Features::FLOAT32_FILTERABLE),
            Extension::TextureHalfFloatLinear => self
                .adapter
                .get_texture_format_features(wgpu::TextureFormat::Rgba16Float)
                .flags
                .contains(wgpu::TextureFormatFeatureFlags::FILTERABLE),
            Extension::ColorBufferFloat => self
                .adapter
                .get_texture_format_features(wgpu::TextureFormat::Rgba32Float)
                .allowed_usages
                .contains(wgpu::TextureUsages::RENDER_ATTACHMENT),
            Extension::TextureFloat | Extension::TextureHalfFloat | Extension::DepthTexture => true,
        }
    }

    fn create_texture(&self, label: &str) -> Result<WgpuTexture, ContextError> {
        Ok(WgpuTexture {
            label: label.to_string(),
            storage: Mutex::new(None),
            sampler: Mutex::new(None),
        })
    }

    fn configure_texture(&self, texture: &WgpuTexture, sampling: &Sampling) {
        let sampler = create_sampler(&self.device, &texture.label, sampling);
        *lock(&texture.sampler) = Some(sampler);
    }

    fn upload_texture(
        &self,
        texture: &WgpuTexture,
        format: &PhysicalFormat,
        width: u32,
        height: u32,
        data: Option<&[u8]>,
    ) -> Result<(), ContextError> {
        let (texture_format, channels) = wgpu_format(format).ok_or(ContextError::UnsupportedStorage {
            internal_format: format.internal_format,
            storage_type: format.storage_type,
        })?;
        let max = self.device.limits().max_texture_dimension_2d;
        if width > max || height > max {
            return Err(ContextError::TooLarge { width, height, max });
        }
        let expected = width as usize * height as usize * format.bytes_per_texel();
        if let Some(data) = data
            && data.len() != expected
        {
            return Err(ContextError::DataSize {
                expected,
                actual: data.len(),
            });
        }

        let allowed = self.adapter.get_texture_format_features(texture_format).allowed_usages;
        let renderable = allowed.contains(wgpu::TextureUsages::RENDER_ATTACHMENT);
        let mut usage = wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST;
        if renderable {
            usage |= wgpu::TextureUsages::RENDER_ATTACHMENT;
        }
        let size = Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let new_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(texture.label.as_str()),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: texture_format,
            usage,
            view_formats: &[],
        });
        //new textures are zero-initialized by wgpu
        if let Some(data) = data {
            let scalar_bytes = format.storage_type.bytes();
            let padded;
            let bytes = if channels == format.channels {
                data
            } else {
                padded = pad_texels(data, scalar_bytes, format.channels, channels);
                &padded[..]
            };
            self.queue.write_texture(
                TexelCopyTextureInfo {
                    texture: &new_texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                bytes,
                TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(width * (scalar_bytes * channels as usize) as u32),
                    rows_per_image: Some(height),
                },
                size,
            );
        }
        let previous = lock(&texture.storage).replace(Storage {
            texture: new_texture,
            renderable,
        });
        if let Some(previous) = previous {
            previous.texture.destroy();
        }
        Ok(())
    }

    fn delete_texture(&self, texture: WgpuTexture) {
        if let Some(storage) = lock(&texture.storage).take() {
            storage.texture.destroy();
        }
    }

    fn create_render_target(&self, texture: &WgpuTexture) -> Result<WgpuRenderTarget, ContextError> {
        let storage = lock(&texture.storage);
        let storage = storage.as_ref().ok_or(ContextError::NoStorage)?;
        let status = if storage.renderable {
            TargetStatus::Complete
        } else {
            TargetStatus::Unsupported
        };
        Ok(WgpuRenderTarget {
            view: storage.texture.create_view(&wgpu::TextureViewDescriptor::default()),
            status,
        })
    }

    fn render_target_status(&self, target: &WgpuRenderTarget) -> TargetStatus {
        target.status
    }

    fn bind_render_target(&self, target: Option<&WgpuRenderTarget>) {
        *lock(&self.bound) = target.map(|t| t.view.clone());
    }

    fn delete_render_target(&self, target: WgpuRenderTarget) {
        let mut bound = lock(&self.bound);
        if bound.as_ref() == Some(&target.view) {
            *bound = None;
        }
    }
}
