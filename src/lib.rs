/*! data_layers stores numeric arrays in GPU textures for shader-based general-purpose computation.

Each logical array ("data layer") of 1D or 2D numeric data, with 1 to 4 components per
element, lives in one or more equally-sized textures.  A compute pass reads from one texture
and writes into another through an offscreen render target; the result becomes the next
pass's input.  This is ping-pong buffering.

The hard part is choosing a texture format.  Which numeric types a context can store, render
into and filter depends on its API tier and a patchwork of optional extensions, and drivers
disagree with their own claims.  This crate owns that decision:

| Stage            | Module                   | Does                                                              |
|------------------|--------------------------|-------------------------------------------------------------------|
| Capability probe | [`context`]              | Queries tier and extensions (cached), runs the framebuffer write test |
| Negotiation      | [`negotiate`]            | Pure function from a capability snapshot to a physical format     |
| Packing          | [`data`]                 | Validates caller data, pads channels, narrows `f32` to `f16`      |
| Buffers          | [`layer`]                | Owns textures and render targets, rotation, resize, clear, destroy |

Fallbacks (a `float32` layer quietly stored as `float16`, linear filtering coerced to nearest)
are reported through the injected [`diagnostics::Diagnostics`] callback.  Mistakes in the
request are returned as [`error::Error`].

# Backends

Layers talk to the graphics API through the [`context::GraphicsContext`] trait.

- [`software::SoftwareContext`] runs on the CPU with a configurable capability matrix.
  It records every call, which is how the tests in this crate work.
- With the `backend_wgpu` feature (on by default), `WgpuContext` runs on a
  [wgpu](https://wgpu.rs) device.

# Example

```
use data_layers::context::BoundContext;
use data_layers::diagnostics::Diagnostics;
use data_layers::layer::{DataLayer, LayerOptions};
use data_layers::pixel_formats::ElementType;
use data_layers::software::SoftwareContext;

let context = BoundContext::bind(SoftwareContext::legacy());
let layer = DataLayer::new(
    "velocities",
    &context,
    LayerOptions::new(1000, 2, ElementType::Uint8),
    Diagnostics::new(|message| eprintln!("{message}")),
    true,
    2,
)
.unwrap();
// legacy contexts only offer 3 or 4 channel textures
assert_eq!(layer.physical_format().channels, 3);
assert_eq!(layer.dimensions(), (32, 32));
```
*/

pub mod capabilities;
pub mod context;
pub mod data;
pub mod diagnostics;
pub mod error;
mod imp;
pub mod layer;
mod multibuffer;
pub mod negotiate;
pub mod pixel_formats;
pub mod software;

#[cfg(feature = "backend_wgpu")]
pub use imp::{WgpuContext, WgpuRenderTarget, WgpuTexture};
