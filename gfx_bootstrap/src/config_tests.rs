//! Unit tests for config.rs

use crate::config::{BootstrapConfig, MsaaConfig, MAX_BUFFER_COUNT};
use crate::device::{FeatureLevel, Format};
use crate::error::Error;

fn assert_invalid(config: BootstrapConfig, needle: &str) {
    match config.validate() {
        Err(Error::InvalidConfig(msg)) => assert!(
            msg.contains(needle),
            "message {:?} does not mention {:?}",
            msg,
            needle
        ),
        other => panic!("expected InvalidConfig, got {:?}", other),
    }
}

// ============================================================================
// DEFAULTS
// ============================================================================

#[test]
fn test_default_config() {
    let config = BootstrapConfig::default();

    assert_eq!(config.width, 800);
    assert_eq!(config.height, 700);
    assert_eq!(config.buffer_count, 2);
    assert_eq!(config.back_buffer_format, Format::R8G8B8A8_UNORM);
    assert_eq!(config.depth_stencil_format, Format::D24_UNORM_S8_UINT);
    assert_eq!(config.refresh_rate, 60);
    assert_eq!(config.msaa, MsaaConfig { enabled: false, sample_count: 4 });
    assert!(config.windowed);
    assert_eq!(config.min_feature_level, FeatureLevel::Level11_0);
    assert!(config.allow_software_fallback);
    assert_eq!(config.enable_debug_layer, cfg!(debug_assertions));
    assert_eq!(config.window_title, "3D App");
}

#[test]
fn test_default_config_is_valid() {
    assert!(BootstrapConfig::default().validate().is_ok());
}

#[test]
fn test_builders() {
    let config = BootstrapConfig::default()
        .with_size(1280, 720)
        .with_buffer_count(3)
        .with_back_buffer_format(Format::B8G8R8A8_UNORM)
        .with_depth_stencil_format(Format::D32_FLOAT)
        .with_refresh_rate(144)
        .with_msaa(true, 8)
        .with_windowed(false)
        .with_min_feature_level(FeatureLevel::Level12_0)
        .with_software_fallback(false)
        .with_debug_layer(true)
        .with_window_title("Viewer");

    assert_eq!((config.width, config.height), (1280, 720));
    assert_eq!(config.buffer_count, 3);
    assert_eq!(config.back_buffer_format, Format::B8G8R8A8_UNORM);
    assert_eq!(config.depth_stencil_format, Format::D32_FLOAT);
    assert_eq!(config.refresh_rate, 144);
    assert!(config.msaa.enabled);
    assert_eq!(config.msaa.sample_count, 8);
    assert!(!config.windowed);
    assert_eq!(config.min_feature_level, FeatureLevel::Level12_0);
    assert!(!config.allow_software_fallback);
    assert!(config.enable_debug_layer);
    assert_eq!(config.window_title, "Viewer");
    assert!(config.validate().is_ok());
}

// ============================================================================
// VALIDATION
// ============================================================================

#[test]
fn test_zero_size_rejected() {
    assert_invalid(BootstrapConfig::default().with_size(0, 700), "client size");
    assert_invalid(BootstrapConfig::default().with_size(800, 0), "client size");
}

#[test]
fn test_buffer_count_bounds() {
    assert_invalid(BootstrapConfig::default().with_buffer_count(0), "buffer_count");
    assert_invalid(
        BootstrapConfig::default().with_buffer_count(MAX_BUFFER_COUNT + 1),
        "buffer_count",
    );
    assert!(BootstrapConfig::default().with_buffer_count(MAX_BUFFER_COUNT).validate().is_ok());
}

#[test]
fn test_single_buffer_accepted() {
    assert!(BootstrapConfig::default().with_buffer_count(1).validate().is_ok());
}

#[test]
fn test_zero_refresh_rate_rejected() {
    assert_invalid(BootstrapConfig::default().with_refresh_rate(0), "refresh_rate");
}

#[test]
fn test_sample_count_must_be_power_of_two() {
    assert_invalid(BootstrapConfig::default().with_msaa(true, 3), "sample count");
    assert_invalid(BootstrapConfig::default().with_msaa(false, 0), "sample count");
    assert_invalid(BootstrapConfig::default().with_msaa(true, 32), "sample count");

    for count in [2, 4, 8, 16] {
        assert!(BootstrapConfig::default().with_msaa(true, count).validate().is_ok());
    }
}

#[test]
fn test_enabled_msaa_needs_several_samples() {
    assert_invalid(BootstrapConfig::default().with_msaa(true, 1), "at least 2");

    // A single sample is fine while MSAA is off
    assert!(BootstrapConfig::default().with_msaa(false, 1).validate().is_ok());
}

#[test]
fn test_depth_back_buffer_rejected() {
    assert_invalid(
        BootstrapConfig::default().with_back_buffer_format(Format::D32_FLOAT),
        "back buffer format",
    );
}

#[test]
fn test_color_depth_stencil_rejected() {
    assert_invalid(
        BootstrapConfig::default().with_depth_stencil_format(Format::R8G8B8A8_UNORM),
        "depth-stencil format",
    );
}
