// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Data layers: numeric arrays stored in GPU textures.

A [`DataLayer`] is a 1D or 2D array of elements with 1 to 4 components each, backed by one
or more equally-sized textures.  A compute pass samples the [current texture](DataLayer::current_texture)
and renders into [another buffer](DataLayer::bind_for_write); the output becomes the next
pass's input.

Construction validates the request and any initial data, probes the context, negotiates a
physical format, packs the data and allocates every buffer.  Problems with the caller's
request are returned as [`Error`].  Problems the context has allocating storage are only
reported through [`Diagnostics`], leaving a degraded layer rather than failing the whole
pipeline.

```
use data_layers::context::BoundContext;
use data_layers::diagnostics::Diagnostics;
use data_layers::layer::{DataLayer, LayerOptions};
use data_layers::pixel_formats::ElementType;
use data_layers::software::SoftwareContext;

let context = BoundContext::bind(SoftwareContext::modern());
let mut layer = DataLayer::new(
    "heights",
    &context,
    LayerOptions::new((4, 4), 1, ElementType::Uint8).with_data(vec![7u8; 16]),
    Diagnostics::log_only(),
    true,
    2,
)
.unwrap();
layer.bind_for_write(true).unwrap();
assert_eq!(layer.buffer_index(), 1);
```
*/

use crate::capabilities::{ApiTier, Extension, Requirement};
use crate::context::{BoundContext, ContextError, GraphicsContext, TargetStatus};
use crate::data::{LayerData, PackError, PackLayout, pack};
use crate::diagnostics::Diagnostics;
use crate::error::Error;
use crate::multibuffer::Multibuffer;
use crate::negotiate::{negotiate, resolve_filter, resolve_type, resolve_wrap};
use crate::pixel_formats::{ElementType, Filter, PhysicalFormat, Sampling, Wrap};
use std::borrow::Cow;
use std::fmt::{Debug, Display};
use std::sync::Arc;

/// The shape of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimensions {
    /// A 1D array; the backing texture is sized by [`calc_width_height`].
    Length(u32),
    Size { width: u32, height: u32 },
}

impl Dimensions {
    pub fn is_1d(&self) -> bool {
        matches!(self, Dimensions::Length(_))
    }

    /// Elements in the logical array.
    fn logical_elements(&self) -> usize {
        match *self {
            Dimensions::Length(length) => length as usize,
            Dimensions::Size { width, height } => width as usize * height as usize,
        }
    }
}

impl From<u32> for Dimensions {
    fn from(length: u32) -> Self {
        Dimensions::Length(length)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Dimensions::Size { width, height }
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimensions::Length(length) => write!(f, "{length}"),
            Dimensions::Size { width, height } => write!(f, "{width}x{height}"),
        }
    }
}

/**
Texture size for a 1D array of `length` elements.

Returns `(width, height)`, both powers of two, with `width * height >= length` and width
equal to or twice the height.  The exponent of `length` rounded up to a power of two is
split between the axes, with the odd factor going to the width.  `None` if that power of
two doesn't fit in a `u32`.

```
use data_layers::layer::calc_width_height;
assert_eq!(calc_width_height(1), Some((2, 1)));
assert_eq!(calc_width_height(5), Some((4, 2)));
assert_eq!(calc_width_height(100), Some((16, 8)));
```
*/
pub fn calc_width_height(length: u32) -> Option<(u32, u32)> {
    let exp = length.checked_next_power_of_two()?.trailing_zeros().max(1);
    Some((1 << (exp / 2 + exp % 2), 1 << (exp / 2)))
}

/**
Options for a new [`DataLayer`].

```
use data_layers::layer::LayerOptions;
use data_layers::pixel_formats::{ElementType, Filter, Wrap};

let options = LayerOptions::new(1000, 2, ElementType::Float32)
    .with_filter(Filter::Linear)
    .with_wrap_s(Wrap::Repeat)
    .with_data(vec![0.0f32; 2000]);
```
*/
#[derive(Debug, Clone, PartialEq)]
pub struct LayerOptions {
    dimensions: Dimensions,
    num_components: u8,
    element_type: ElementType,
    filter: Option<Filter>,
    wrap_s: Wrap,
    wrap_t: Wrap,
    data: Option<LayerData>,
}

impl LayerOptions {
    pub fn new(dimensions: impl Into<Dimensions>, num_components: u8, element_type: ElementType) -> Self {
        LayerOptions {
            dimensions: dimensions.into(),
            num_components,
            element_type,
            filter: None,
            wrap_s: Wrap::ClampToEdge,
            wrap_t: Wrap::ClampToEdge,
            data: None,
        }
    }

    /// Defaults to nearest for 1D layers and linear for 2D layers.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_wrap_s(mut self, wrap: Wrap) -> Self {
        self.wrap_s = wrap;
        self
    }

    pub fn with_wrap_t(mut self, wrap: Wrap) -> Self {
        self.wrap_t = wrap;
        self
    }

    /// Initial contents.  Without data the textures are zero-filled.
    pub fn with_data(mut self, data: impl Into<LayerData>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// One buffer: a texture, plus a render target into it when the layer is writable.
///
/// Releases both on drop, render target first.
struct Slot<C: GraphicsContext> {
    context: Arc<BoundContext<C>>,
    texture: Option<C::Texture>,
    render_target: Option<C::RenderTarget>,
}

impl<C: GraphicsContext> Drop for Slot<C> {
    fn drop(&mut self) {
        if let Some(target) = self.render_target.take() {
            self.context.context().delete_render_target(target);
        }
        if let Some(texture) = self.texture.take() {
            self.context.context().delete_texture(texture);
        }
    }
}

impl<C: GraphicsContext> Debug for Slot<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("texture", &self.texture)
            .field("render_target", &self.render_target)
            .finish()
    }
}

/**
A numeric array stored in one or more textures.

See the [module documentation](self).
*/
pub struct DataLayer<C: GraphicsContext> {
    name: String,
    context: Arc<BoundContext<C>>,
    diagnostics: Diagnostics,
    dimensions: Dimensions,
    width: u32,
    height: u32,
    num_components: u8,
    element_type: ElementType,
    sampling: Sampling,
    format: PhysicalFormat,
    writable: bool,
    buffers: Multibuffer<Slot<C>>,
}

fn fatal(diagnostics: &Diagnostics, error: Error) -> Error {
    diagnostics.report(&error.to_string());
    error
}

fn texture_size(name: &str, dimensions: Dimensions) -> Result<(u32, u32), Error> {
    let configuration = |reason: String| Error::Configuration {
        name: name.to_string(),
        reason,
    };
    match dimensions {
        Dimensions::Length(0) => Err(configuration("length must be positive".to_string())),
        Dimensions::Length(length) => calc_width_height(length)
            .ok_or_else(|| configuration(format!("length {length} is too large for a texture"))),
        Dimensions::Size { width, height } if width == 0 || height == 0 => Err(configuration(format!(
            "dimensions {width}x{height} must be positive"
        ))),
        Dimensions::Size { width, height } => Ok((width, height)),
    }
}

fn check_length(name: &str, dimensions: Dimensions, num_components: u8, data: Option<&LayerData>) -> Result<(), Error> {
    let Some(data) = data else {
        return Ok(());
    };
    if data.len() != dimensions.logical_elements() * num_components as usize {
        return Err(Error::InvalidDataLength {
            name: name.to_string(),
            actual: data.len(),
            shape: dimensions.to_string(),
            num_components,
        });
    }
    Ok(())
}

/**
Reject data that can't match the layer type under any type resolution.

`float32` data is accepted for `float16` layers (it is narrowed on upload), and `float16`
data for `float32` layers, which may still fall back to `float16`.  Whether that last case
holds is only known after resolution, when [`pack`] checks it again.
*/
fn check_type(name: &str, element_type: ElementType, data: Option<&LayerData>) -> Result<(), Error> {
    let Some(data) = data else {
        return Ok(());
    };
    let actual = data.element_type();
    let compatible = actual == element_type
        || matches!(
            (element_type, actual),
            (ElementType::Float16, ElementType::Float32) | (ElementType::Float32, ElementType::Float16)
        );
    if !compatible {
        return Err(Error::InvalidDataType {
            name: name.to_string(),
            actual,
            expected: element_type,
        });
    }
    Ok(())
}

/// Extensions a resolved type can't do without.  Missing ones are reported, not fatal.
fn required_extensions(api_tier: ApiTier, element_type: ElementType) -> &'static [Extension] {
    match (api_tier, element_type) {
        (ApiTier::Legacy, ElementType::Float16) => &[Extension::TextureHalfFloat],
        (ApiTier::Legacy, ElementType::Uint16 | ElementType::Uint32) => &[Extension::DepthTexture],
        (ApiTier::Modern, ElementType::Float16 | ElementType::Float32) => &[Extension::ColorBufferFloat],
        _ => &[],
    }
}

impl<C: GraphicsContext> DataLayer<C> {
    /**
    Create a layer and allocate `buffer_count` buffers for it.

    `name` only appears in diagnostics.  Writable layers get a render target per buffer.

    # Errors
    - [`Error::Configuration`] for a zero `buffer_count`, an empty shape or a component
      count outside 1 to 4.
    - [`Error::InvalidDataLength`] and [`Error::InvalidDataType`] when initial data doesn't
      match the shape and type.  These are raised before the context is touched, except for
      `float16` data on a `float32` layer that keeps its type.
    - [`Error::UnsupportedFormat`] when the context offers no format for the request.

    Every error is also reported through `diagnostics`.
    */
    pub fn new(
        name: impl Into<String>,
        context: &Arc<BoundContext<C>>,
        options: LayerOptions,
        diagnostics: Diagnostics,
        writable: bool,
        buffer_count: usize,
    ) -> Result<Self, Error> {
        let name = name.into();
        let LayerOptions {
            dimensions,
            num_components,
            element_type,
            filter,
            wrap_s,
            wrap_t,
            data,
        } = options;

        if buffer_count == 0 {
            return Err(fatal(
                &diagnostics,
                Error::Configuration {
                    name,
                    reason: "buffer count must be at least 1".to_string(),
                },
            ));
        }
        if !(1..=4).contains(&num_components) {
            return Err(fatal(
                &diagnostics,
                Error::Configuration {
                    name,
                    reason: format!("{num_components} components, must be 1 to 4"),
                },
            ));
        }
        let (width, height) = texture_size(&name, dimensions).map_err(|e| fatal(&diagnostics, e))?;
        check_length(&name, dimensions, num_components, data.as_ref()).map_err(|e| fatal(&diagnostics, e))?;
        check_type(&name, element_type, data.as_ref()).map_err(|e| fatal(&diagnostics, e))?;

        let capabilities = context.capabilities();
        let element_type = resolve_type(
            &capabilities,
            element_type,
            writable,
            |candidate| context.test_framebuffer_write(candidate),
            &diagnostics,
        )
        // resolve_type reports its own failures
        .map_err(|e| Error::UnsupportedFormat {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        for extension in required_extensions(capabilities.api_tier, element_type) {
            context.extension(*extension, Requirement::Required, &diagnostics);
        }

        let filter = filter.unwrap_or(if dimensions.is_1d() { Filter::Nearest } else { Filter::Linear });
        let sampling = Sampling {
            filter: resolve_filter(&capabilities, filter, element_type),
            wrap_s: resolve_wrap(&capabilities, wrap_s, element_type),
            wrap_t: resolve_wrap(&capabilities, wrap_t, element_type),
        };
        let format = negotiate(&capabilities, element_type, num_components, writable).map_err(|e| {
            fatal(
                &diagnostics,
                Error::UnsupportedFormat {
                    name: name.clone(),
                    reason: e.to_string(),
                },
            )
        })?;

        let mut layer = DataLayer {
            name,
            context: context.clone(),
            diagnostics,
            dimensions,
            width,
            height,
            num_components,
            element_type,
            sampling,
            format,
            writable,
            buffers: Multibuffer::new(buffer_count),
        };
        let packed = match &data {
            Some(data) => Some(layer.pack(data, dimensions, width, height)?),
            None => None,
        };
        layer.allocate(packed.as_deref());
        Ok(layer)
    }

    fn pack<'a>(
        &self,
        data: &'a LayerData,
        dimensions: Dimensions,
        width: u32,
        height: u32,
    ) -> Result<Cow<'a, LayerData>, Error> {
        let layout = PackLayout {
            logical_elements: dimensions.logical_elements(),
            num_components: self.num_components,
            texels: width as usize * height as usize,
            channels: self.format.channels,
            element_type: self.element_type,
        };
        pack(data, &layout).map_err(|e| {
            let error = match e {
                PackError::Length { actual, .. } => Error::InvalidDataLength {
                    name: self.name.clone(),
                    actual,
                    shape: dimensions.to_string(),
                    num_components: self.num_components,
                },
                PackError::Type { expected, actual } => Error::InvalidDataType {
                    name: self.name.clone(),
                    actual,
                    expected,
                },
            };
            fatal(&self.diagnostics, error)
        })
    }

    /// Create every buffer.  Failures are reported and leave the layer degraded.
    fn allocate(&mut self, data: Option<&LayerData>) {
        logwise::info_sync!(
            "Allocating {count} buffers of {width}x{height} for DataLayer {name}",
            count = self.buffers.count(),
            width = self.width,
            height = self.height,
            name = self.name.clone()
        );
        if let Err(e) = self.allocate_slots(data.map(LayerData::as_bytes)) {
            logwise::error_sync!(
                "Allocation failed for DataLayer {name}: {error}",
                name = self.name.clone(),
                error = logwise::privacy::LogIt(&e)
            );
            self.diagnostics
                .report(&format!("Could not allocate buffers for DataLayer {}: {e}.", self.name));
        }
        if self.writable {
            self.context.context().bind_render_target(None);
        }
    }

    fn allocate_slots(&mut self, bytes: Option<&[u8]>) -> Result<(), ContextError> {
        let bound = self.context.clone();
        let context = bound.context();
        for index in self.buffers.len()..self.buffers.count() {
            let mut slot = Slot {
                context: bound.clone(),
                texture: None,
                render_target: None,
            };
            let texture = &*slot
                .texture
                .insert(context.create_texture(&format!("{} buffer {index}", self.name))?);
            context.configure_texture(texture, &self.sampling);
            context.upload_texture(texture, &self.format, self.width, self.height, bytes)?;
            if self.writable {
                let target = context.create_render_target(texture)?;
                let status = context.render_target_status(&target);
                if status != TargetStatus::Complete {
                    // the texture is still usable for reads
                    self.diagnostics.report(&format!(
                        "Invalid status for render target of DataLayer {}: {status}.",
                        self.name
                    ));
                }
                slot.render_target = Some(target);
            }
            self.buffers.push(slot);
        }
        Ok(())
    }

    /**
    The texture of the current buffer, for sampling.

    `None` only when allocation failed and the current buffer was never created.
    */
    pub fn current_texture(&self) -> Option<&C::Texture> {
        self.buffers.current()?.texture.as_ref()
    }

    /**
    Make the current buffer the render destination, optionally advancing to the next
    buffer first.

    # Errors
    [`Error::NotWritable`] for read-only layers, without touching the context.
    */
    pub fn bind_for_write(&mut self, rotate: bool) -> Result<(), Error> {
        if !self.writable {
            return Err(fatal(
                &self.diagnostics,
                Error::NotWritable {
                    name: self.name.clone(),
                },
            ));
        }
        if rotate {
            let index = self.buffers.rotate();
            logwise::trace_sync!(
                "DataLayer {name} rotated to buffer {index}",
                name = self.name.clone(),
                index = index
            );
        }
        match self.buffers.current().and_then(|slot| slot.render_target.as_ref()) {
            Some(target) => self.context.context().bind_render_target(Some(target)),
            None => self.diagnostics.report(&format!(
                "DataLayer {} has no render target for buffer {}.",
                self.name,
                self.buffers.index()
            )),
        }
        Ok(())
    }

    /**
    Change the shape, replacing the contents with `data` or zeros.

    The shape kind (1D or 2D) can't change.  The new data is validated before anything is
    released, so a failing resize leaves the layer as it was.  The format is unchanged.
    */
    pub fn resize(&mut self, dimensions: impl Into<Dimensions>, data: Option<&LayerData>) -> Result<(), Error> {
        let dimensions = dimensions.into();
        if dimensions.is_1d() != self.dimensions.is_1d() {
            let reason = if self.dimensions.is_1d() {
                format!("1D layer can't be resized to {dimensions}, specify a length")
            } else {
                format!("2D layer can't be resized to length {dimensions}, specify a width and height")
            };
            return Err(fatal(
                &self.diagnostics,
                Error::WrongShapeKind {
                    name: self.name.clone(),
                    reason,
                },
            ));
        }
        let (width, height) = texture_size(&self.name, dimensions).map_err(|e| fatal(&self.diagnostics, e))?;
        let packed = match data {
            Some(data) => Some(self.pack(data, dimensions, width, height)?),
            None => None,
        };
        logwise::info_sync!(
            "Resizing DataLayer {name} to {width}x{height}",
            name = self.name.clone(),
            width = width,
            height = height
        );
        self.buffers.clear();
        self.dimensions = dimensions;
        self.width = width;
        self.height = height;
        self.allocate(packed.as_deref());
        Ok(())
    }

    /// Zero every buffer by reallocating it.  Shape and format are unchanged.
    pub fn clear(&mut self) {
        logwise::info_sync!("Clearing DataLayer {name}", name = self.name.clone());
        self.buffers.clear();
        self.allocate(None);
    }

    /// Release every texture and render target.
    pub fn destroy(mut self) {
        logwise::info_sync!("Destroying DataLayer {name}", name = self.name.clone());
        self.buffers.clear();
    }

    /// `(width, height)` of the backing textures, for both shape kinds.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn shape(&self) -> Dimensions {
        self.dimensions
    }

    /// Logical length of a 1D layer.
    pub fn length(&self) -> Result<u32, Error> {
        match self.dimensions {
            Dimensions::Length(length) => Ok(length),
            Dimensions::Size { .. } => Err(Error::WrongShapeKind {
                name: self.name.clone(),
                reason: "length is only defined for 1D layers, use dimensions()".to_string(),
            }),
        }
    }

    pub fn num_components(&self) -> u8 {
        self.num_components
    }

    /// The element type in use, after any fallback.
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn buffer_index(&self) -> usize {
        self.buffers.index()
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.count()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn writable(&self) -> bool {
        self.writable
    }

    pub fn filter(&self) -> Filter {
        self.sampling.filter
    }

    pub fn wrap_s(&self) -> Wrap {
        self.sampling.wrap_s
    }

    pub fn wrap_t(&self) -> Wrap {
        self.sampling.wrap_t
    }

    pub fn physical_format(&self) -> PhysicalFormat {
        self.format
    }
}

impl<C: GraphicsContext> Debug for DataLayer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataLayer")
            .field("name", &self.name)
            .field("dimensions", &self.dimensions)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("num_components", &self.num_components)
            .field("element_type", &self.element_type)
            .field("format", &self.format)
            .field("writable", &self.writable)
            .field("buffers", &self.buffers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::software::{Call, SoftwareContext};

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn width_height_small_lengths() {
        assert_eq!(calc_width_height(1), Some((2, 1)));
        assert_eq!(calc_width_height(2), Some((2, 1)));
        assert_eq!(calc_width_height(3), Some((2, 2)));
        assert_eq!(calc_width_height(4), Some((2, 2)));
        assert_eq!(calc_width_height(5), Some((4, 2)));
        assert_eq!(calc_width_height(8), Some((4, 2)));
        assert_eq!(calc_width_height(9), Some((4, 4)));
        assert_eq!(calc_width_height(1 << 31), Some((1 << 16, 1 << 15)));
        assert_eq!(calc_width_height((1 << 31) + 1), None);
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn width_height_properties() {
        for length in (1..5000).chain([65_535, 65_536, 65_537, 1_000_000]) {
            let (w, h) = calc_width_height(length).unwrap();
            assert!(w.is_power_of_two() && h.is_power_of_two(), "{length}");
            assert!(w as u64 * h as u64 >= length as u64, "{length}");
            assert!(w == h || w == 2 * h, "{length}");
        }
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn default_filters_follow_shape() {
        let context = BoundContext::bind(SoftwareContext::modern());
        let one = DataLayer::new(
            "1d",
            &context,
            LayerOptions::new(10, 1, ElementType::Float32),
            Diagnostics::log_only(),
            false,
            1,
        )
        .unwrap();
        assert_eq!(one.filter(), Filter::Nearest);
        let two = DataLayer::new(
            "2d",
            &context,
            LayerOptions::new((3, 3), 1, ElementType::Float32),
            Diagnostics::log_only(),
            false,
            1,
        )
        .unwrap();
        assert_eq!(two.filter(), Filter::Linear);
        assert_eq!(two.wrap_s(), Wrap::ClampToEdge);
        assert_eq!(two.wrap_t(), Wrap::ClampToEdge);
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn configuration_is_checked_before_the_context() {
        let context = BoundContext::bind(SoftwareContext::modern());
        let cases = [
            (LayerOptions::new(10, 1, ElementType::Uint8), 0),
            (LayerOptions::new(10, 0, ElementType::Uint8), 1),
            (LayerOptions::new(10, 5, ElementType::Uint8), 1),
            (LayerOptions::new(0, 1, ElementType::Uint8), 1),
            (LayerOptions::new((4, 0), 1, ElementType::Uint8), 1),
        ];
        for (options, buffer_count) in cases {
            let err = DataLayer::new("bad", &context, options, Diagnostics::log_only(), true, buffer_count).unwrap_err();
            assert!(matches!(err, Error::Configuration { .. }), "{err}");
        }
        assert!(context.context().calls().is_empty());
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn writable_allocation_unbinds() {
        let context = BoundContext::bind(SoftwareContext::modern());
        let layer = DataLayer::new(
            "w",
            &context,
            LayerOptions::new((2, 2), 3, ElementType::Float32),
            Diagnostics::log_only(),
            true,
            2,
        )
        .unwrap();
        // padded for renderability
        assert_eq!(layer.physical_format().channels, 4);
        let calls = context.context().calls();
        assert_eq!(calls.last(), Some(&Call::BindRenderTarget(None)));
        assert_eq!(context.context().bound_render_target(), None);
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn length_is_only_for_1d() {
        let context = BoundContext::bind(SoftwareContext::modern());
        let layer = DataLayer::new(
            "l",
            &context,
            LayerOptions::new(100, 1, ElementType::Int8),
            Diagnostics::log_only(),
            false,
            1,
        )
        .unwrap();
        assert_eq!(layer.length().unwrap(), 100);
        assert_eq!(layer.dimensions(), (16, 8));
        let layer = DataLayer::new(
            "s",
            &context,
            LayerOptions::new((5, 3), 1, ElementType::Int8),
            Diagnostics::log_only(),
            false,
            1,
        )
        .unwrap();
        assert!(matches!(layer.length(), Err(Error::WrongShapeKind { .. })));
        assert_eq!(layer.dimensions(), (5, 3));
    }
}
