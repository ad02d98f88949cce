/// Conversions between gfxboot value types and D3D12 / DXGI structures

use gfx_bootstrap::gfxboot::{
    CommandListType, CpuDescriptorHandle, DescriptorHeapFlags, DescriptorHeapType, FeatureLevel,
    Format, Rational, SampleDesc, SwapChainDesc, SwapChainFlags, SwapEffect,
};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;

pub(crate) fn dxgi_format(format: Format) -> DXGI_FORMAT {
    match format {
        Format::R8G8B8A8_UNORM => DXGI_FORMAT_R8G8B8A8_UNORM,
        Format::R8G8B8A8_UNORM_SRGB => DXGI_FORMAT_R8G8B8A8_UNORM_SRGB,
        Format::B8G8R8A8_UNORM => DXGI_FORMAT_B8G8R8A8_UNORM,
        Format::B8G8R8A8_UNORM_SRGB => DXGI_FORMAT_B8G8R8A8_UNORM_SRGB,
        Format::R10G10B10A2_UNORM => DXGI_FORMAT_R10G10B10A2_UNORM,
        Format::R16G16B16A16_FLOAT => DXGI_FORMAT_R16G16B16A16_FLOAT,
        Format::D24_UNORM_S8_UINT => DXGI_FORMAT_D24_UNORM_S8_UINT,
        Format::D32_FLOAT => DXGI_FORMAT_D32_FLOAT,
        Format::D32_FLOAT_S8X24_UINT => DXGI_FORMAT_D32_FLOAT_S8X24_UINT,
    }
}

pub(crate) fn d3d_feature_level(level: FeatureLevel) -> D3D_FEATURE_LEVEL {
    match level {
        FeatureLevel::Level11_0 => D3D_FEATURE_LEVEL_11_0,
        FeatureLevel::Level11_1 => D3D_FEATURE_LEVEL_11_1,
        FeatureLevel::Level12_0 => D3D_FEATURE_LEVEL_12_0,
        FeatureLevel::Level12_1 => D3D_FEATURE_LEVEL_12_1,
        FeatureLevel::Level12_2 => D3D_FEATURE_LEVEL_12_2,
    }
}

pub(crate) fn command_list_type(ty: CommandListType) -> D3D12_COMMAND_LIST_TYPE {
    match ty {
        CommandListType::Direct => D3D12_COMMAND_LIST_TYPE_DIRECT,
        CommandListType::Compute => D3D12_COMMAND_LIST_TYPE_COMPUTE,
        CommandListType::Copy => D3D12_COMMAND_LIST_TYPE_COPY,
    }
}

pub(crate) fn descriptor_heap_type(ty: DescriptorHeapType) -> D3D12_DESCRIPTOR_HEAP_TYPE {
    match ty {
        DescriptorHeapType::Rtv => D3D12_DESCRIPTOR_HEAP_TYPE_RTV,
        DescriptorHeapType::Dsv => D3D12_DESCRIPTOR_HEAP_TYPE_DSV,
        DescriptorHeapType::CbvSrvUav => D3D12_DESCRIPTOR_HEAP_TYPE_CBV_SRV_UAV,
        DescriptorHeapType::Sampler => D3D12_DESCRIPTOR_HEAP_TYPE_SAMPLER,
    }
}

pub(crate) fn descriptor_heap_flags(flags: DescriptorHeapFlags) -> D3D12_DESCRIPTOR_HEAP_FLAGS {
    if flags.contains(DescriptorHeapFlags::SHADER_VISIBLE) {
        D3D12_DESCRIPTOR_HEAP_FLAG_SHADER_VISIBLE
    } else {
        D3D12_DESCRIPTOR_HEAP_FLAG_NONE
    }
}

pub(crate) fn swap_effect(effect: SwapEffect) -> DXGI_SWAP_EFFECT {
    match effect {
        SwapEffect::Discard => DXGI_SWAP_EFFECT_DISCARD,
        SwapEffect::Sequential => DXGI_SWAP_EFFECT_SEQUENTIAL,
        SwapEffect::FlipSequential => DXGI_SWAP_EFFECT_FLIP_SEQUENTIAL,
        SwapEffect::FlipDiscard => DXGI_SWAP_EFFECT_FLIP_DISCARD,
    }
}

/// DXGI swap chain flags are a plain `UINT` in the description
pub(crate) fn swap_chain_flags(flags: SwapChainFlags) -> u32 {
    let mut bits = 0;
    if flags.contains(SwapChainFlags::ALLOW_MODE_SWITCH) {
        bits |= DXGI_SWAP_CHAIN_FLAG_ALLOW_MODE_SWITCH.0 as u32;
    }
    if flags.contains(SwapChainFlags::ALLOW_TEARING) {
        bits |= DXGI_SWAP_CHAIN_FLAG_ALLOW_TEARING.0 as u32;
    }
    bits
}

pub(crate) fn sample_desc(desc: SampleDesc) -> DXGI_SAMPLE_DESC {
    DXGI_SAMPLE_DESC {
        Count: desc.count,
        Quality: desc.quality,
    }
}

pub(crate) fn rational(rate: Rational) -> DXGI_RATIONAL {
    DXGI_RATIONAL {
        Numerator: rate.numerator,
        Denominator: rate.denominator,
    }
}

pub(crate) fn swap_chain_desc(desc: &SwapChainDesc, window: HWND) -> DXGI_SWAP_CHAIN_DESC {
    DXGI_SWAP_CHAIN_DESC {
        BufferDesc: DXGI_MODE_DESC {
            Width: desc.width,
            Height: desc.height,
            RefreshRate: rational(desc.refresh_rate),
            Format: dxgi_format(desc.format),
            ScanlineOrdering: DXGI_MODE_SCANLINE_ORDER_UNSPECIFIED,
            Scaling: DXGI_MODE_SCALING_UNSPECIFIED,
        },
        SampleDesc: sample_desc(desc.sample_desc),
        BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
        BufferCount: desc.buffer_count,
        OutputWindow: window,
        Windowed: desc.windowed.into(),
        SwapEffect: swap_effect(desc.swap_effect),
        Flags: swap_chain_flags(desc.flags),
    }
}

pub(crate) fn cpu_handle(handle: CpuDescriptorHandle) -> D3D12_CPU_DESCRIPTOR_HANDLE {
    D3D12_CPU_DESCRIPTOR_HANDLE { ptr: handle.ptr }
}

pub(crate) fn from_cpu_handle(handle: D3D12_CPU_DESCRIPTOR_HANDLE) -> CpuDescriptorHandle {
    CpuDescriptorHandle::new(handle.ptr)
}

#[cfg(test)]
#[path = "d3d12_format_tests.rs"]
mod tests;
