use crate::pixel_formats::{Filter, Sampling, Wrap};
use wgpu::{AddressMode, FilterMode, SamplerDescriptor};

const fn filter_mode(filter: Filter) -> FilterMode {
    match filter {
        Filter::Nearest => FilterMode::Nearest,
        Filter::Linear => FilterMode::Linear,
    }
}

const fn address_mode(wrap: Wrap) -> AddressMode {
    match wrap {
        Wrap::ClampToEdge => AddressMode::ClampToEdge,
        Wrap::Repeat => AddressMode::Repeat,
        Wrap::MirroredRepeat => AddressMode::MirrorRepeat,
    }
}

pub(super) fn create_sampler(device: &wgpu::Device, label: &str, sampling: &Sampling) -> wgpu::Sampler {
    let filter = filter_mode(sampling.filter);
    let s = SamplerDescriptor {
        label: Some(label),
        address_mode_u: address_mode(sampling.wrap_s),
        address_mode_v: address_mode(sampling.wrap_t),
        address_mode_w: AddressMode::ClampToEdge,
        mag_filter: filter,
        min_filter: filter,
        //layers have a single mip level
        mipmap_filter: FilterMode::Nearest,
        lod_min_clamp: 0.0,
        lod_max_clamp: 0.0,
        compare: None,
        anisotropy_clamp: 1,
        border_color: None,
    };
    device.create_sampler(&s)
}
