/// Swap chain descriptor

use crate::config::BootstrapConfig;
use crate::device::{Format, Rational, SampleDesc, SwapChainFlags, SwapEffect};
use crate::error::{Error, Result};

/// Parameters of a swap chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapChainDesc {
    pub width: u32,
    pub height: u32,
    pub format: Format,
    pub refresh_rate: Rational,
    pub sample_desc: SampleDesc,
    pub buffer_count: u32,
    pub windowed: bool,
    pub swap_effect: SwapEffect,
    pub flags: SwapChainFlags,
}

impl SwapChainDesc {
    /// Build the description for `config`
    ///
    /// With MSAA enabled the buffers use `config.msaa.sample_count` samples (4 by
    /// default) at quality `msaa_quality - 1`, since the query result is a count
    /// and the quality field is an index. With MSAA disabled they use 1 sample at
    /// quality 0 whatever `msaa_quality` is.
    ///
    /// # Errors
    ///
    /// `Error::UnsupportedMultisample` when MSAA is enabled and `msaa_quality` is 0.
    pub fn from_config(config: &BootstrapConfig, msaa_quality: u32) -> Result<Self> {
        let sample_desc = if config.msaa.enabled {
            let quality = msaa_quality.checked_sub(1).ok_or(Error::UnsupportedMultisample {
                format: config.back_buffer_format,
                sample_count: config.msaa.sample_count,
            })?;
            SampleDesc {
                count: config.msaa.sample_count,
                quality,
            }
        } else {
            SampleDesc::SINGLE
        };

        Ok(Self {
            width: config.width,
            height: config.height,
            format: config.back_buffer_format,
            refresh_rate: Rational::new(config.refresh_rate, 1),
            sample_desc,
            buffer_count: config.buffer_count,
            windowed: config.windowed,
            swap_effect: SwapEffect::FlipDiscard,
            flags: SwapChainFlags::ALLOW_MODE_SWITCH,
        })
    }

    pub fn is_multisampled(&self) -> bool {
        self.sample_desc.count > 1
    }
}

#[cfg(test)]
#[path = "swap_chain_tests.rs"]
mod tests;
