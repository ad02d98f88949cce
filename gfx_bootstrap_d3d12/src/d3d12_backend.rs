/// D3D12Backend - DXGI factory, adapters and the backend entry point

use gfx_bootstrap::gfxboot::{
    AdapterInfo, AdapterKind, Backend, Factory, FeatureLevel, Result, SwapChainDesc,
    Adapter as RendererAdapter,
};
use gfx_bootstrap::{gfx_bail, gfx_debug, gfx_err, gfx_info};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use std::ffi::c_void;
use windows::core::{IUnknown, Interface};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::*;

use crate::d3d12_command::{D3D12CommandAllocator, D3D12CommandList, D3D12CommandQueue};
use crate::d3d12_descriptor_heap::D3D12DescriptorHeap;
use crate::d3d12_device::{D3D12Device, D3D12Fence};
use crate::d3d12_error::{driver_error, SOURCE};
use crate::d3d12_format::{d3d_feature_level, swap_chain_desc};
use crate::d3d12_swap_chain::{D3D12Resource, D3D12SwapChain};
use crate::debug::Config as DebugConfig;

// ============================================================================
// Window handle
// ============================================================================

/// Win32 window handle used as the swap-chain output window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hwnd(pub HWND);

impl Hwnd {
    /// Extract the HWND of any window exposing a raw window handle
    ///
    /// # Errors
    ///
    /// `Error::BackendError` when the handle is unavailable or not a Win32 handle.
    pub fn from_window(window: &impl HasWindowHandle) -> Result<Self> {
        let handle = window
            .window_handle()
            .map_err(|e| gfx_err!(SOURCE, "Failed to get window handle: {}", e))?;

        match handle.as_raw() {
            RawWindowHandle::Win32(win32) => Ok(Self(HWND(win32.hwnd.get() as *mut c_void))),
            other => gfx_bail!(SOURCE, "Window handle is not a Win32 handle: {:?}", other),
        }
    }
}

// ============================================================================
// Backend
// ============================================================================

/// Direct3D 12 backend
///
/// # Example
///
/// ```no_run
/// use gfx_bootstrap::gfxboot::{BootstrapConfig, Bootstrapper};
/// use gfx_bootstrap_d3d12::gfxboot::{D3D12Backend, NativeWindow};
///
/// # fn main() -> gfx_bootstrap::gfxboot::Result<()> {
/// let config = BootstrapConfig::default();
/// let window = NativeWindow::create(&config.window_title, config.width, config.height)?;
/// let context = Bootstrapper::new(D3D12Backend::new(), config)?.run(window.hwnd())?;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, Default)]
pub struct D3D12Backend {
    debug_config: DebugConfig,
}

impl D3D12Backend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how debug layer messages are filtered once the device exists
    ///
    /// Only used with the `d3d12-info-queue` feature and the debug layer on.
    pub fn with_debug_config(mut self, config: DebugConfig) -> Self {
        self.debug_config = config;
        self
    }
}

impl Backend for D3D12Backend {
    type Factory = D3D12Factory;
    type Adapter = D3D12Adapter;
    type Device = D3D12Device;
    type Fence = D3D12Fence;
    type CommandQueue = D3D12CommandQueue;
    type CommandAllocator = D3D12CommandAllocator;
    type CommandList = D3D12CommandList;
    type SwapChain = D3D12SwapChain;
    type DescriptorHeap = D3D12DescriptorHeap;
    type Resource = D3D12Resource;
    type WindowHandle = Hwnd;

    fn name(&self) -> &'static str {
        "d3d12"
    }

    fn enable_debug_layer(&self) -> Result<()> {
        let mut debug: Option<ID3D12Debug> = None;
        unsafe { D3D12GetDebugInterface(&mut debug) }
            .map_err(|e| driver_error("D3D12GetDebugInterface", &e))?;
        let debug = debug.ok_or_else(|| gfx_err!(SOURCE, "D3D12GetDebugInterface returned no interface"))?;

        unsafe { debug.EnableDebugLayer() };
        gfx_debug!(SOURCE, "ID3D12Debug::EnableDebugLayer");
        Ok(())
    }

    fn create_factory(&self, debug: bool) -> Result<D3D12Factory> {
        let flags = if debug {
            DXGI_CREATE_FACTORY_DEBUG
        } else {
            DXGI_CREATE_FACTORY_FLAGS(0)
        };

        let factory = unsafe { CreateDXGIFactory2::<IDXGIFactory4>(flags) }
            .map_err(|e| driver_error("CreateDXGIFactory2", &e))?;
        gfx_debug!(SOURCE, "CreateDXGIFactory2 (debug: {})", debug);

        Ok(D3D12Factory {
            factory,
            debug,
            debug_config: self.debug_config.clone(),
        })
    }
}

// ============================================================================
// Factory
// ============================================================================

/// DXGI factory (IDXGIFactory4)
pub struct D3D12Factory {
    factory: IDXGIFactory4,
    debug: bool,
    #[cfg_attr(not(feature = "d3d12-info-queue"), allow(dead_code))]
    debug_config: DebugConfig,
}

impl D3D12Factory {
    pub fn raw(&self) -> &IDXGIFactory4 {
        &self.factory
    }

    /// Whether the factory was created with the debug flag
    pub fn is_debug(&self) -> bool {
        self.debug
    }
}

impl Factory<D3D12Backend> for D3D12Factory {
    fn create_device(&self, adapter: Option<&D3D12Adapter>, min_level: FeatureLevel) -> Result<D3D12Device> {
        let level = d3d_feature_level(min_level);
        let mut device: Option<ID3D12Device> = None;

        unsafe {
            match adapter {
                Some(adapter) => D3D12CreateDevice(&adapter.adapter, level, &mut device),
                None => D3D12CreateDevice(None::<&IUnknown>, level, &mut device),
            }
        }
        .map_err(|e| driver_error("D3D12CreateDevice", &e))?;

        let device = device.ok_or_else(|| gfx_err!(SOURCE, "D3D12CreateDevice returned no device"))?;
        gfx_debug!(SOURCE, "D3D12CreateDevice (feature level {})", min_level);

        D3D12Device::new(device, min_level, self.debug, &self.debug_config)
    }

    fn enum_warp_adapter(&self) -> Result<D3D12Adapter> {
        let adapter = unsafe { self.factory.EnumWarpAdapter::<IDXGIAdapter>() }
            .map_err(|e| driver_error("IDXGIFactory4::EnumWarpAdapter", &e))?;

        let adapter = D3D12Adapter {
            adapter,
            kind: AdapterKind::Software,
        };
        gfx_info!(SOURCE, "WARP adapter: {}", adapter.info().name);
        Ok(adapter)
    }

    fn create_swap_chain(&self, queue: &D3D12CommandQueue, window: Hwnd, desc: &SwapChainDesc) -> Result<D3D12SwapChain> {
        let dxgi_desc = swap_chain_desc(desc, window.0);
        let mut swap_chain: Option<IDXGISwapChain> = None;

        unsafe { self.factory.CreateSwapChain(queue.raw(), &dxgi_desc, &mut swap_chain) }
            .ok()
            .map_err(|e| driver_error("IDXGIFactory::CreateSwapChain", &e))?;

        let swap_chain = swap_chain.ok_or_else(|| gfx_err!(SOURCE, "CreateSwapChain returned no swap chain"))?;
        let swap_chain = swap_chain
            .cast::<IDXGISwapChain3>()
            .map_err(|e| driver_error("IDXGISwapChain::QueryInterface(IDXGISwapChain3)", &e))?;

        gfx_debug!(
            SOURCE,
            "CreateSwapChain {}x{} {:?}, {} buffer(s), {} sample(s)",
            desc.width,
            desc.height,
            desc.format,
            desc.buffer_count,
            desc.sample_desc.count
        );
        Ok(D3D12SwapChain::new(swap_chain, *desc))
    }
}

// ============================================================================
// Adapter
// ============================================================================

/// Explicitly enumerated DXGI adapter
pub struct D3D12Adapter {
    adapter: IDXGIAdapter,
    kind: AdapterKind,
}

impl D3D12Adapter {
    pub fn raw(&self) -> &IDXGIAdapter {
        &self.adapter
    }
}

impl RendererAdapter for D3D12Adapter {
    fn info(&self) -> AdapterInfo {
        match unsafe { self.adapter.GetDesc() } {
            Ok(desc) => {
                let len = desc
                    .Description
                    .iter()
                    .position(|&c| c == 0)
                    .unwrap_or(desc.Description.len());
                AdapterInfo {
                    name: String::from_utf16_lossy(&desc.Description[..len]),
                    kind: self.kind,
                    dedicated_video_memory: desc.DedicatedVideoMemory as u64,
                }
            }
            Err(_) => AdapterInfo {
                name: "Unknown adapter".to_string(),
                kind: self.kind,
                dedicated_video_memory: 0,
            },
        }
    }
}

