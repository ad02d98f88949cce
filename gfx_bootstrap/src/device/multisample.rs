/// Multisample capability reported by the device

use crate::device::Format;
use crate::error::{Error, Result};

/// Result of a quality-level query for one (format, sample count) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultisampleCapability {
    pub format: Format,
    pub sample_count: u32,
    /// Number of quality levels (0 = unsupported)
    pub quality_levels: u32,
}

impl MultisampleCapability {
    pub fn new(format: Format, sample_count: u32, quality_levels: u32) -> Self {
        Self {
            format,
            sample_count,
            quality_levels,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.quality_levels > 0
    }

    /// Highest usable zero-based quality index
    pub fn max_quality(&self) -> Option<u32> {
        self.quality_levels.checked_sub(1)
    }

    /// Reject an unsupported combination
    ///
    /// # Errors
    ///
    /// `Error::UnsupportedMultisample` when the device reported 0 quality levels.
    pub fn require_supported(self) -> Result<Self> {
        if self.is_supported() {
            Ok(self)
        } else {
            Err(Error::UnsupportedMultisample {
                format: self.format,
                sample_count: self.sample_count,
            })
        }
    }
}

#[cfg(test)]
#[path = "multisample_tests.rs"]
mod tests;
