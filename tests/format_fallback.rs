//! Type, filter and wrap fallbacks on constrained contexts.

use data_layers::capabilities::Extension;
use data_layers::context::BoundContext;
use data_layers::diagnostics::Diagnostics;
use data_layers::error::Error;
use data_layers::layer::{DataLayer, LayerOptions};
use data_layers::pixel_formats::{ElementType, Filter, InternalFormat, StorageType, Wrap, f16};
use data_layers::software::SoftwareContext;
use std::sync::{Arc, Mutex};

fn collecting() -> (Diagnostics, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let move_seen = seen.clone();
    let diagnostics = Diagnostics::new(move |message| move_seen.lock().unwrap().push(message.to_string()));
    (diagnostics, seen)
}

fn half_capable_legacy() -> SoftwareContext {
    SoftwareContext::legacy()
        .with_extension(Extension::TextureHalfFloat)
        .with_renderable(StorageType::HalfFloat)
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn legacy_float32_without_extension_falls_back_to_half() {
    let context = BoundContext::bind(half_capable_legacy());
    let (diagnostics, seen) = collecting();
    let data = vec![1.0f32, -2.5, 0.5, 2.0];
    let layer = DataLayer::new(
        "positions",
        &context,
        LayerOptions::new(4, 1, ElementType::Float32).with_data(data.clone()),
        diagnostics,
        true,
        1,
    )
    .unwrap();
    assert_eq!(layer.element_type(), ElementType::Float16);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("float16"), "{}", seen[0]);

    // 1 component is stored in a 3 channel legacy texture, narrowed to half precision
    let format = layer.physical_format();
    assert_eq!(format.internal_format, InternalFormat::Rgb);
    assert_eq!(format.storage_type, StorageType::HalfFloat);
    assert_eq!(format.channels, 3);
    let storage = context
        .context()
        .texture_storage(*layer.current_texture().unwrap())
        .unwrap();
    let mut expected = Vec::new();
    for value in data {
        expected.extend(f16::from_f32(value).to_le_bytes());
        expected.extend([0; 4]);
    }
    assert_eq!(storage.bytes, expected);
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn legacy_float32_that_cannot_be_rendered_falls_back_to_half() {
    let context = BoundContext::bind(half_capable_legacy().with_extension(Extension::TextureFloat));
    let (diagnostics, seen) = collecting();
    let layer = DataLayer::new(
        "positions",
        &context,
        LayerOptions::new(16, 2, ElementType::Float32),
        diagnostics,
        true,
        2,
    )
    .unwrap();
    assert_eq!(layer.element_type(), ElementType::Float16);
    assert_eq!(seen.lock().unwrap().len(), 1);
    // the write tests released everything they allocated
    assert_eq!(context.context().live_textures(), 2);
    assert_eq!(context.context().live_render_targets(), 2);
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn legacy_float32_read_only_keeps_its_type() {
    let context = BoundContext::bind(SoftwareContext::legacy().with_extension(Extension::TextureFloat));
    let (diagnostics, seen) = collecting();
    let layer = DataLayer::new(
        "constants",
        &context,
        LayerOptions::new(16, 4, ElementType::Float32),
        diagnostics,
        false,
        1,
    )
    .unwrap();
    assert_eq!(layer.element_type(), ElementType::Float32);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn no_writable_float_at_all_is_fatal() {
    let context = BoundContext::bind(SoftwareContext::legacy().with_extension(Extension::TextureHalfFloat));
    let (diagnostics, seen) = collecting();
    let err = DataLayer::new(
        "positions",
        &context,
        LayerOptions::new(16, 1, ElementType::Float32),
        diagnostics,
        true,
        1,
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { .. }), "{err}");
    // fallback to half, then the half float failure
    assert_eq!(seen.lock().unwrap().len(), 2);
    assert_eq!(context.context().live_textures(), 0);
    assert_eq!(context.context().live_render_targets(), 0);
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn legacy_half_floats_need_their_extension() {
    let context = BoundContext::bind(SoftwareContext::legacy());
    // float32 falls back to float16, which has no upload type either
    for element_type in [ElementType::Float32, ElementType::Float16] {
        let (diagnostics, seen) = collecting();
        let err = DataLayer::new(
            "constants",
            &context,
            LayerOptions::new(4, 1, element_type),
            diagnostics,
            false,
            1,
        )
        .unwrap_err();
        match err {
            Error::UnsupportedFormat { reason, .. } => {
                assert!(reason.contains("OES_texture_half_float"), "{reason}")
            }
            other => panic!("unexpected {other}"),
        }
        assert!(seen.lock().unwrap().iter().any(|m| m.contains("OES_texture_half_float")));
    }
    assert_eq!(context.context().live_textures(), 0);
    assert_eq!(context.context().live_render_targets(), 0);
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn legacy_signed_integers_are_unsupported() {
    let context = BoundContext::bind(SoftwareContext::legacy());
    for element_type in [ElementType::Int8, ElementType::Int16, ElementType::Int32] {
        let err = DataLayer::new(
            "signed",
            &context,
            LayerOptions::new(4, 1, element_type),
            Diagnostics::log_only(),
            false,
            1,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }), "{err}");
    }
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn missing_required_extensions_are_reported_not_fatal() {
    let context = BoundContext::bind(SoftwareContext::legacy());
    let (diagnostics, seen) = collecting();
    let layer = DataLayer::new(
        "ids",
        &context,
        LayerOptions::new(4, 1, ElementType::Uint32),
        diagnostics,
        false,
        1,
    );
    assert!(layer.is_ok());
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("WEBGL_depth_texture"), "{}", seen[0]);

    let context = BoundContext::bind(SoftwareContext::modern().without_extension(Extension::ColorBufferFloat));
    let (diagnostics, seen) = collecting();
    DataLayer::new(
        "field",
        &context,
        LayerOptions::new((2, 2), 2, ElementType::Float16),
        diagnostics,
        true,
        1,
    )
    .unwrap();
    assert!(seen.lock().unwrap()[0].contains("EXT_color_buffer_float"));
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn linear_filtering_needs_an_extension() {
    let context = BoundContext::bind(SoftwareContext::modern().without_extension(Extension::TextureFloatLinear));
    let (diagnostics, seen) = collecting();
    let float = DataLayer::new(
        "float",
        &context,
        LayerOptions::new((2, 2), 1, ElementType::Float32),
        diagnostics.clone(),
        false,
        1,
    )
    .unwrap();
    assert_eq!(float.filter(), Filter::Nearest);
    // half floats can use the half float linear extension instead
    let half = DataLayer::new(
        "half",
        &context,
        LayerOptions::new((2, 2), 1, ElementType::Float16),
        diagnostics,
        false,
        1,
    )
    .unwrap();
    assert_eq!(half.filter(), Filter::Linear);
    // coercions are silent
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn legacy_float_wrapping_is_clamped() {
    let context = BoundContext::bind(half_capable_legacy());
    let half = DataLayer::new(
        "half",
        &context,
        LayerOptions::new((4, 4), 4, ElementType::Float16)
            .with_wrap_s(Wrap::Repeat)
            .with_wrap_t(Wrap::MirroredRepeat),
        Diagnostics::log_only(),
        false,
        1,
    )
    .unwrap();
    assert_eq!(half.wrap_s(), Wrap::ClampToEdge);
    assert_eq!(half.wrap_t(), Wrap::ClampToEdge);
    assert_eq!(half.physical_format().internal_format, InternalFormat::Rgba);

    let bytes = DataLayer::new(
        "bytes",
        &context,
        LayerOptions::new((4, 4), 4, ElementType::Uint8).with_wrap_s(Wrap::Repeat),
        Diagnostics::log_only(),
        false,
        1,
    )
    .unwrap();
    assert_eq!(bytes.wrap_s(), Wrap::Repeat);
    assert_eq!(bytes.wrap_t(), Wrap::ClampToEdge);
}

#[test]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn modern_layers_keep_their_type() {
    let context = BoundContext::bind(SoftwareContext::modern());
    for element_type in ElementType::ALL {
        let layer = DataLayer::new(
            "any",
            &context,
            LayerOptions::new(7, 3, element_type),
            Diagnostics::log_only(),
            false,
            1,
        )
        .unwrap();
        assert_eq!(layer.element_type(), element_type);
        // read-only layers aren't padded
        assert_eq!(layer.physical_format().channels, 3);
    }
}
