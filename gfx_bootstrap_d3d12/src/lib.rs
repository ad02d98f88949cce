/*!
# GfxBootstrap - Direct3D 12 Backend

Direct3D 12 / DXGI implementation of the gfx_bootstrap backend traits.

This crate provides `D3D12Backend`, which creates real driver objects through
the `windows` crate bindings, and `NativeWindow`, a plain Win32 window that can
serve as the swap-chain target. Any window exposing a Win32 handle through
`raw-window-handle` (winit, etc.) works as well.

The backend only builds on Windows. Validation statistics are available on
every platform so that tools can report them uniformly.
*/

// Validation message statistics (platform-agnostic)
mod debug;

#[cfg(windows)]
mod d3d12_error;
#[cfg(windows)]
mod d3d12_format;
#[cfg(windows)]
mod d3d12_backend;
#[cfg(windows)]
mod d3d12_device;
#[cfg(windows)]
mod d3d12_command;
#[cfg(windows)]
mod d3d12_swap_chain;
#[cfg(windows)]
mod d3d12_descriptor_heap;
#[cfg(windows)]
mod d3d12_window;

// Main gfxboot namespace module
pub mod gfxboot {
    #[cfg(windows)]
    pub use crate::d3d12_backend::{D3D12Adapter, D3D12Backend, D3D12Factory, Hwnd};
    #[cfg(windows)]
    pub use crate::d3d12_device::{D3D12Device, D3D12Fence};
    #[cfg(windows)]
    pub use crate::d3d12_command::{D3D12CommandAllocator, D3D12CommandList, D3D12CommandQueue};
    #[cfg(windows)]
    pub use crate::d3d12_swap_chain::{D3D12Resource, D3D12SwapChain};
    #[cfg(windows)]
    pub use crate::d3d12_descriptor_heap::D3D12DescriptorHeap;
    #[cfg(windows)]
    pub use crate::d3d12_window::NativeWindow;

    /// Graphics context bootstrapped on Direct3D 12
    #[cfg(windows)]
    pub type D3D12Context = gfx_bootstrap::gfxboot::GraphicsContext<D3D12Backend>;
}

// Re-export debug utilities
pub use debug::{
    get_validation_stats, init_debug_config, print_validation_stats_report, Config as DebugConfig,
    DebugSeverity, ValidationStats,
};
