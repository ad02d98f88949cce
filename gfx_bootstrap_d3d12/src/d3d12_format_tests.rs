//! Unit tests for D3D12 / DXGI conversion functions
//!
//! Tests pure conversion functions without requiring a GPU.

use super::*;
use gfx_bootstrap::gfxboot::BootstrapConfig;

// ============================================================================
// FORMAT CONVERSION TESTS
// ============================================================================

#[test]
fn test_dxgi_format_color_formats() {
    assert_eq!(dxgi_format(Format::R8G8B8A8_UNORM), DXGI_FORMAT_R8G8B8A8_UNORM);
    assert_eq!(dxgi_format(Format::R8G8B8A8_UNORM_SRGB), DXGI_FORMAT_R8G8B8A8_UNORM_SRGB);
    assert_eq!(dxgi_format(Format::B8G8R8A8_UNORM), DXGI_FORMAT_B8G8R8A8_UNORM);
    assert_eq!(dxgi_format(Format::R10G10B10A2_UNORM), DXGI_FORMAT_R10G10B10A2_UNORM);
    assert_eq!(dxgi_format(Format::R16G16B16A16_FLOAT), DXGI_FORMAT_R16G16B16A16_FLOAT);
}

#[test]
fn test_dxgi_format_depth_formats() {
    assert_eq!(dxgi_format(Format::D24_UNORM_S8_UINT), DXGI_FORMAT_D24_UNORM_S8_UINT);
    assert_eq!(dxgi_format(Format::D32_FLOAT), DXGI_FORMAT_D32_FLOAT);
    assert_eq!(dxgi_format(Format::D32_FLOAT_S8X24_UINT), DXGI_FORMAT_D32_FLOAT_S8X24_UINT);
}

#[test]
fn test_feature_levels() {
    assert_eq!(d3d_feature_level(FeatureLevel::Level11_0), D3D_FEATURE_LEVEL_11_0);
    assert_eq!(d3d_feature_level(FeatureLevel::Level12_2), D3D_FEATURE_LEVEL_12_2);
}

// ============================================================================
// COMMAND / HEAP CONVERSION TESTS
// ============================================================================

#[test]
fn test_command_list_types() {
    assert_eq!(command_list_type(CommandListType::Direct), D3D12_COMMAND_LIST_TYPE_DIRECT);
    assert_eq!(command_list_type(CommandListType::Compute), D3D12_COMMAND_LIST_TYPE_COMPUTE);
    assert_eq!(command_list_type(CommandListType::Copy), D3D12_COMMAND_LIST_TYPE_COPY);
}

#[test]
fn test_descriptor_heap_types_and_flags() {
    assert_eq!(descriptor_heap_type(DescriptorHeapType::Rtv), D3D12_DESCRIPTOR_HEAP_TYPE_RTV);
    assert_eq!(descriptor_heap_type(DescriptorHeapType::Dsv), D3D12_DESCRIPTOR_HEAP_TYPE_DSV);
    assert_eq!(descriptor_heap_flags(DescriptorHeapFlags::empty()), D3D12_DESCRIPTOR_HEAP_FLAG_NONE);
    assert_eq!(
        descriptor_heap_flags(DescriptorHeapFlags::SHADER_VISIBLE),
        D3D12_DESCRIPTOR_HEAP_FLAG_SHADER_VISIBLE
    );
}

#[test]
fn test_cpu_handle_keeps_address() {
    let handle = CpuDescriptorHandle::new(0x2000).offset(2, 32);
    assert_eq!(cpu_handle(handle).ptr, 0x2040);
    assert_eq!(from_cpu_handle(cpu_handle(handle)), handle);
}

// ============================================================================
// SWAP CHAIN DESCRIPTION TESTS
// ============================================================================

#[test]
fn test_swap_chain_flags() {
    assert_eq!(swap_chain_flags(SwapChainFlags::empty()), 0);
    assert_eq!(
        swap_chain_flags(SwapChainFlags::ALLOW_MODE_SWITCH),
        DXGI_SWAP_CHAIN_FLAG_ALLOW_MODE_SWITCH.0 as u32
    );
    assert_eq!(
        swap_chain_flags(SwapChainFlags::ALLOW_MODE_SWITCH | SwapChainFlags::ALLOW_TEARING),
        (DXGI_SWAP_CHAIN_FLAG_ALLOW_MODE_SWITCH.0 | DXGI_SWAP_CHAIN_FLAG_ALLOW_TEARING.0) as u32
    );
}

#[test]
fn test_default_swap_chain_desc() {
    let config = BootstrapConfig::default();
    let desc = SwapChainDesc::from_config(&config, 1).unwrap();
    let dxgi = swap_chain_desc(&desc, HWND::default());

    assert_eq!(dxgi.BufferDesc.Width, 800);
    assert_eq!(dxgi.BufferDesc.Height, 700);
    assert_eq!(dxgi.BufferDesc.RefreshRate.Numerator, 60);
    assert_eq!(dxgi.BufferDesc.RefreshRate.Denominator, 1);
    assert_eq!(dxgi.BufferDesc.Format, DXGI_FORMAT_R8G8B8A8_UNORM);
    assert_eq!(dxgi.SampleDesc.Count, 1);
    assert_eq!(dxgi.SampleDesc.Quality, 0);
    assert_eq!(dxgi.BufferUsage, DXGI_USAGE_RENDER_TARGET_OUTPUT);
    assert_eq!(dxgi.BufferCount, 2);
    assert!(dxgi.Windowed.as_bool());
    assert_eq!(dxgi.SwapEffect, DXGI_SWAP_EFFECT_FLIP_DISCARD);
}

#[test]
fn test_msaa_swap_chain_desc() {
    let config = BootstrapConfig::default().with_msaa(true, 4);
    let desc = SwapChainDesc::from_config(&config, 3).unwrap();
    let dxgi = swap_chain_desc(&desc, HWND::default());

    assert_eq!(dxgi.SampleDesc.Count, 4);
    assert_eq!(dxgi.SampleDesc.Quality, 2);
}
