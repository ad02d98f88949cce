//! Bootstrap configuration
//!
//! Collects every startup parameter (client size, buffering, formats, MSAA,
//! device requirements) into one structure passed to the `Bootstrapper`.

use crate::device::{FeatureLevel, Format};
use crate::error::{Error, Result};

/// Largest swap-chain buffer count accepted by `validate()`
pub const MAX_BUFFER_COUNT: u32 = 16;

/// Multisample anti-aliasing settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsaaConfig {
    /// Render into a multisampled back buffer
    pub enabled: bool,
    /// Sample count queried at startup (and used when `enabled`)
    pub sample_count: u32,
}

impl Default for MsaaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            sample_count: 4,
        }
    }
}

/// Graphics context configuration
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Number of swap-chain buffers (2 = double buffering)
    pub buffer_count: u32,
    /// Back-buffer pixel format
    pub back_buffer_format: Format,
    /// Depth-stencil view format
    pub depth_stencil_format: Format,
    /// Refresh rate numerator (denominator is always 1)
    pub refresh_rate: u32,
    pub msaa: MsaaConfig,
    pub windowed: bool,
    /// Minimum feature level requested from the device
    pub min_feature_level: FeatureLevel,
    /// Retry on the software (WARP) adapter when no hardware device can be created
    pub allow_software_fallback: bool,
    /// Enable the driver debug layer before creating the factory
    pub enable_debug_layer: bool,
    /// Native window title
    pub window_title: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 700,
            buffer_count: 2,
            back_buffer_format: Format::R8G8B8A8_UNORM,
            depth_stencil_format: Format::D24_UNORM_S8_UINT,
            refresh_rate: 60,
            msaa: MsaaConfig::default(),
            windowed: true,
            min_feature_level: FeatureLevel::Level11_0,
            allow_software_fallback: true,
            enable_debug_layer: cfg!(debug_assertions),
            window_title: "3D App".to_string(),
        }
    }
}

impl BootstrapConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn with_back_buffer_format(mut self, format: Format) -> Self {
        self.back_buffer_format = format;
        self
    }

    pub fn with_depth_stencil_format(mut self, format: Format) -> Self {
        self.depth_stencil_format = format;
        self
    }

    pub fn with_refresh_rate(mut self, refresh_rate: u32) -> Self {
        self.refresh_rate = refresh_rate;
        self
    }

    /// Enable or disable MSAA with the given sample count
    pub fn with_msaa(mut self, enabled: bool, sample_count: u32) -> Self {
        self.msaa = MsaaConfig { enabled, sample_count };
        self
    }

    pub fn with_windowed(mut self, windowed: bool) -> Self {
        self.windowed = windowed;
        self
    }

    pub fn with_min_feature_level(mut self, level: FeatureLevel) -> Self {
        self.min_feature_level = level;
        self
    }

    pub fn with_software_fallback(mut self, allow: bool) -> Self {
        self.allow_software_fallback = allow;
        self
    }

    pub fn with_debug_layer(mut self, enable: bool) -> Self {
        self.enable_debug_layer = enable;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    /// Check the configuration before any driver call is made
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if:
    /// - width or height is 0
    /// - buffer_count is outside 1..=16
    /// - refresh_rate is 0
    /// - the MSAA sample count is not 1, 2, 4, 8 or 16
    /// - MSAA is enabled with a single sample
    /// - the back-buffer format is a depth format, or the depth-stencil format is not
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "client size must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if self.buffer_count == 0 || self.buffer_count > MAX_BUFFER_COUNT {
            return Err(Error::InvalidConfig(format!(
                "buffer_count must be in 1..={}, got {}",
                MAX_BUFFER_COUNT, self.buffer_count
            )));
        }

        if self.refresh_rate == 0 {
            return Err(Error::InvalidConfig(
                "refresh_rate must be positive".to_string(),
            ));
        }

        if !matches!(self.msaa.sample_count, 1 | 2 | 4 | 8 | 16) {
            return Err(Error::InvalidConfig(format!(
                "MSAA sample count must be 1, 2, 4, 8 or 16, got {}",
                self.msaa.sample_count
            )));
        }

        if self.msaa.enabled && self.msaa.sample_count < 2 {
            return Err(Error::InvalidConfig(format!(
                "MSAA enabled with sample count {}; a multisampled back buffer needs at least 2",
                self.msaa.sample_count
            )));
        }

        if self.back_buffer_format.is_depth() {
            return Err(Error::InvalidConfig(format!(
                "back buffer format {:?} is a depth format",
                self.back_buffer_format
            )));
        }

        if !self.depth_stencil_format.is_depth() {
            return Err(Error::InvalidConfig(format!(
                "depth-stencil format {:?} is not a depth format",
                self.depth_stencil_format
            )));
        }

        if self.buffer_count == 1 {
            crate::gfx_warn!(
                "gfxboot::Config",
                "Single-buffered swap chain requested; presentation may tear"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
