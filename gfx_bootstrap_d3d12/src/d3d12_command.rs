/// Command queue, allocator and graphics command list

use gfx_bootstrap::gfxboot::{CommandAllocator, CommandList, CommandListType, CommandQueue, Result};
use windows::core::Interface;
use windows::Win32::Graphics::Direct3D12::*;

use crate::d3d12_backend::D3D12Backend;
use crate::d3d12_error::driver_error;

/// Direct3D 12 command queue
pub struct D3D12CommandQueue {
    queue: ID3D12CommandQueue,
    ty: CommandListType,
}

impl D3D12CommandQueue {
    pub(crate) fn new(queue: ID3D12CommandQueue, ty: CommandListType) -> Self {
        Self { queue, ty }
    }

    pub fn raw(&self) -> &ID3D12CommandQueue {
        &self.queue
    }
}

impl CommandQueue<D3D12Backend> for D3D12CommandQueue {
    fn list_type(&self) -> CommandListType {
        self.ty
    }

    fn execute(&self, list: &D3D12CommandList) -> Result<()> {
        let list = list
            .raw()
            .cast::<ID3D12CommandList>()
            .map_err(|e| driver_error("ID3D12GraphicsCommandList::QueryInterface(ID3D12CommandList)", &e))?;
        unsafe { self.queue.ExecuteCommandLists(&[Some(list)]) };
        Ok(())
    }
}

/// Direct3D 12 command allocator
pub struct D3D12CommandAllocator {
    allocator: ID3D12CommandAllocator,
}

impl D3D12CommandAllocator {
    pub(crate) fn new(allocator: ID3D12CommandAllocator) -> Self {
        Self { allocator }
    }

    pub fn raw(&self) -> &ID3D12CommandAllocator {
        &self.allocator
    }
}

impl CommandAllocator for D3D12CommandAllocator {
    fn reset(&self) -> Result<()> {
        unsafe { self.allocator.Reset() }.map_err(|e| driver_error("ID3D12CommandAllocator::Reset", &e))
    }
}

/// Direct3D 12 graphics command list
pub struct D3D12CommandList {
    list: ID3D12GraphicsCommandList,
    ty: CommandListType,
}

impl D3D12CommandList {
    pub(crate) fn new(list: ID3D12GraphicsCommandList, ty: CommandListType) -> Self {
        Self { list, ty }
    }

    pub fn raw(&self) -> &ID3D12GraphicsCommandList {
        &self.list
    }
}

impl CommandList<D3D12Backend> for D3D12CommandList {
    fn list_type(&self) -> CommandListType {
        self.ty
    }

    fn close(&self) -> Result<()> {
        unsafe { self.list.Close() }.map_err(|e| driver_error("ID3D12GraphicsCommandList::Close", &e))
    }

    fn reset(&self, allocator: &D3D12CommandAllocator) -> Result<()> {
        unsafe { self.list.Reset(allocator.raw(), None::<&ID3D12PipelineState>) }
            .map_err(|e| driver_error("ID3D12GraphicsCommandList::Reset", &e))
    }
}
