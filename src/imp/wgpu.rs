// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
mod context;
mod pixel_format;
mod sampler;

pub use context::{WgpuContext, WgpuRenderTarget, WgpuTexture};
