/// D3D12SwapChain - DXGI swap chain and its buffers

use gfx_bootstrap::gfxboot::{Resource, Result, SwapChain, SwapChainDesc};
use windows::Win32::Graphics::Direct3D12::ID3D12Resource;
use windows::Win32::Graphics::Dxgi::IDXGISwapChain3;

use crate::d3d12_backend::D3D12Backend;
use crate::d3d12_error::driver_error;

/// DXGI swap chain (IDXGISwapChain3 for the current back-buffer index)
pub struct D3D12SwapChain {
    swap_chain: IDXGISwapChain3,
    desc: SwapChainDesc,
}

impl D3D12SwapChain {
    pub(crate) fn new(swap_chain: IDXGISwapChain3, desc: SwapChainDesc) -> Self {
        Self { swap_chain, desc }
    }

    pub fn raw(&self) -> &IDXGISwapChain3 {
        &self.swap_chain
    }
}

impl SwapChain<D3D12Backend> for D3D12SwapChain {
    fn desc(&self) -> SwapChainDesc {
        self.desc
    }

    fn buffer(&self, index: u32) -> Result<D3D12Resource> {
        let resource = unsafe { self.swap_chain.GetBuffer::<ID3D12Resource>(index) }
            .map_err(|e| driver_error("IDXGISwapChain::GetBuffer", &e))?;
        Ok(D3D12Resource { resource })
    }

    fn current_back_buffer_index(&self) -> u32 {
        unsafe { self.swap_chain.GetCurrentBackBufferIndex() }
    }
}

/// Swap-chain buffer or other GPU resource
pub struct D3D12Resource {
    resource: ID3D12Resource,
}

impl D3D12Resource {
    pub fn raw(&self) -> &ID3D12Resource {
        &self.resource
    }
}

impl Resource for D3D12Resource {}
