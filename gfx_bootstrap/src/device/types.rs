/// Plain value types shared by the backend traits and the bootstrapper

use bitflags::bitflags;

/// Pixel format for back buffers and depth-stencil views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Format {
    // Color formats
    R8G8B8A8_UNORM,
    R8G8B8A8_UNORM_SRGB,
    B8G8R8A8_UNORM,
    B8G8R8A8_UNORM_SRGB,
    R10G10B10A2_UNORM,
    R16G16B16A16_FLOAT,

    // Depth-stencil formats
    D24_UNORM_S8_UINT,
    D32_FLOAT,
    D32_FLOAT_S8X24_UINT,
}

impl Format {
    /// True for formats usable only as depth/stencil views
    pub fn is_depth(self) -> bool {
        matches!(
            self,
            Format::D24_UNORM_S8_UINT | Format::D32_FLOAT | Format::D32_FLOAT_S8X24_UINT
        )
    }

    /// True for formats carrying a stencil channel
    pub fn has_stencil(self) -> bool {
        matches!(self, Format::D24_UNORM_S8_UINT | Format::D32_FLOAT_S8X24_UINT)
    }
}

/// Minimum device feature level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureLevel {
    Level11_0,
    Level11_1,
    Level12_0,
    Level12_1,
    Level12_2,
}

impl FeatureLevel {
    /// (major, minor) version pair
    pub fn version(self) -> (u32, u32) {
        match self {
            FeatureLevel::Level11_0 => (11, 0),
            FeatureLevel::Level11_1 => (11, 1),
            FeatureLevel::Level12_0 => (12, 0),
            FeatureLevel::Level12_1 => (12, 1),
            FeatureLevel::Level12_2 => (12, 2),
        }
    }
}

impl std::fmt::Display for FeatureLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (major, minor) = self.version();
        write!(f, "{}.{}", major, minor)
    }
}

/// Command list / queue type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandListType {
    /// Graphics + compute + copy
    Direct,
    Compute,
    Copy,
}

/// Descriptor heap type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorHeapType {
    /// Render-target views
    Rtv,
    /// Depth-stencil views
    Dsv,
    CbvSrvUav,
    Sampler,
}

bitflags! {
    /// Descriptor heap visibility flags (empty = CPU-only)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DescriptorHeapFlags: u32 {
        const SHADER_VISIBLE = 0x1;
    }
}

/// Multisample count and zero-based quality index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleDesc {
    pub count: u32,
    pub quality: u32,
}

impl SampleDesc {
    /// One sample, quality 0
    pub const SINGLE: SampleDesc = SampleDesc { count: 1, quality: 0 };
}

impl Default for SampleDesc {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Rational number (refresh rates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self { numerator, denominator }
    }
}

/// Presentation model of a swap chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapEffect {
    Discard,
    Sequential,
    FlipSequential,
    FlipDiscard,
}

bitflags! {
    /// Swap chain creation flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SwapChainFlags: u32 {
        /// Allow fullscreen/windowed mode switches
        const ALLOW_MODE_SWITCH = 0x1;
        const ALLOW_TEARING = 0x2;
    }
}

/// CPU address of a descriptor slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CpuDescriptorHandle {
    pub ptr: usize,
}

impl CpuDescriptorHandle {
    pub fn new(ptr: usize) -> Self {
        Self { ptr }
    }

    /// Handle `count` descriptors further, each `stride` bytes wide
    pub fn offset(self, count: u32, stride: u32) -> Self {
        Self {
            ptr: self.ptr + count as usize * stride as usize,
        }
    }
}

/// Kind of adapter a device was created on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    /// Hardware adapter (default adapter chosen by the driver)
    Hardware,
    /// Software rasterizer (WARP)
    Software,
}

/// Adapter description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterInfo {
    pub name: String,
    pub kind: AdapterKind,
    /// Dedicated video memory in bytes
    pub dedicated_video_memory: u64,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
