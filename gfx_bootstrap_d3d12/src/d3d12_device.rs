/// D3D12Device - logical device and fence

use gfx_bootstrap::gfxboot::{
    CommandListType, CpuDescriptorHandle, DescriptorHeapDesc, DescriptorHeapType, Device, Fence,
    FeatureLevel, Format, Result,
};
use gfx_bootstrap::gfx_debug;
#[cfg(feature = "d3d12-info-queue")]
use gfx_bootstrap::gfx_warn;
use std::ffi::c_void;
use windows::Win32::Graphics::Direct3D12::*;

use crate::d3d12_backend::D3D12Backend;
use crate::d3d12_command::{D3D12CommandAllocator, D3D12CommandList, D3D12CommandQueue};
use crate::d3d12_descriptor_heap::D3D12DescriptorHeap;
use crate::d3d12_error::{driver_error, SOURCE};
use crate::d3d12_format::{command_list_type, cpu_handle, descriptor_heap_flags, descriptor_heap_type, dxgi_format};
use crate::d3d12_swap_chain::D3D12Resource;
use crate::debug::Config as DebugConfig;

/// Direct3D 12 logical device
pub struct D3D12Device {
    /// Message callback registration, unregistered on drop
    #[cfg(feature = "d3d12-info-queue")]
    info_queue: Option<(ID3D12InfoQueue1, u32)>,
    device: ID3D12Device,
    feature_level: FeatureLevel,
}

impl D3D12Device {
    pub(crate) fn new(
        device: ID3D12Device,
        feature_level: FeatureLevel,
        debug: bool,
        debug_config: &DebugConfig,
    ) -> Result<Self> {
        #[cfg(feature = "d3d12-info-queue")]
        let info_queue = if debug {
            register_message_callback(&device, debug_config)
        } else {
            None
        };
        #[cfg(not(feature = "d3d12-info-queue"))]
        let _ = (debug, debug_config);

        Ok(Self {
            #[cfg(feature = "d3d12-info-queue")]
            info_queue,
            device,
            feature_level,
        })
    }

    pub fn raw(&self) -> &ID3D12Device {
        &self.device
    }
}

/// Forward info-queue messages to the logger
///
/// `ID3D12InfoQueue1` needs a recent runtime; without it messages stay in the
/// debugger output only.
#[cfg(feature = "d3d12-info-queue")]
fn register_message_callback(device: &ID3D12Device, config: &DebugConfig) -> Option<(ID3D12InfoQueue1, u32)> {
    use windows::core::Interface;

    let info_queue = match device.cast::<ID3D12InfoQueue1>() {
        Ok(queue) => queue,
        Err(e) => {
            gfx_warn!(SOURCE, "ID3D12InfoQueue1 unavailable, debug messages not forwarded: {}", e.message());
            return None;
        }
    };

    crate::debug::init_debug_config(config.clone());

    let mut cookie = 0u32;
    let registered = unsafe {
        info_queue.RegisterMessageCallback(
            Some(crate::debug::d3d12_message_callback),
            D3D12_MESSAGE_CALLBACK_FLAG_NONE,
            std::ptr::null_mut(),
            &mut cookie,
        )
    };

    match registered {
        Ok(()) => {
            gfx_debug!(SOURCE, "Info-queue message callback registered (cookie {})", cookie);
            Some((info_queue, cookie))
        }
        Err(e) => {
            gfx_warn!(SOURCE, "RegisterMessageCallback failed: {}", e.message());
            None
        }
    }
}

#[cfg(feature = "d3d12-info-queue")]
impl Drop for D3D12Device {
    fn drop(&mut self) {
        if let Some((info_queue, cookie)) = self.info_queue.take() {
            let _ = unsafe { info_queue.UnregisterMessageCallback(cookie) };
        }
    }
}

impl Device<D3D12Backend> for D3D12Device {
    fn feature_level(&self) -> FeatureLevel {
        self.feature_level
    }

    fn create_fence(&self, initial_value: u64) -> Result<D3D12Fence> {
        let fence = unsafe { self.device.CreateFence::<ID3D12Fence>(initial_value, D3D12_FENCE_FLAG_NONE) }
            .map_err(|e| driver_error("ID3D12Device::CreateFence", &e))?;
        gfx_debug!(SOURCE, "CreateFence (initial value {})", initial_value);
        Ok(D3D12Fence { fence })
    }

    fn query_multisample_quality_levels(&self, format: Format, sample_count: u32) -> Result<u32> {
        let mut data = D3D12_FEATURE_DATA_MULTISAMPLE_QUALITY_LEVELS {
            Format: dxgi_format(format),
            SampleCount: sample_count,
            Flags: D3D12_MULTISAMPLE_QUALITY_LEVELS_FLAG_NONE,
            NumQualityLevels: 0,
        };

        unsafe {
            self.device.CheckFeatureSupport(
                D3D12_FEATURE_MULTISAMPLE_QUALITY_LEVELS,
                &mut data as *mut _ as *mut c_void,
                std::mem::size_of::<D3D12_FEATURE_DATA_MULTISAMPLE_QUALITY_LEVELS>() as u32,
            )
        }
        .map_err(|e| driver_error("ID3D12Device::CheckFeatureSupport", &e))?;

        gfx_debug!(
            SOURCE,
            "CheckFeatureSupport({:?}, {}x) -> {} quality level(s)",
            format,
            sample_count,
            data.NumQualityLevels
        );
        Ok(data.NumQualityLevels)
    }

    fn create_command_queue(&self, ty: CommandListType) -> Result<D3D12CommandQueue> {
        let desc = D3D12_COMMAND_QUEUE_DESC {
            Type: command_list_type(ty),
            Priority: D3D12_COMMAND_QUEUE_PRIORITY_NORMAL.0,
            Flags: D3D12_COMMAND_QUEUE_FLAG_NONE,
            NodeMask: 0,
        };

        let queue = unsafe { self.device.CreateCommandQueue::<ID3D12CommandQueue>(&desc) }
            .map_err(|e| driver_error("ID3D12Device::CreateCommandQueue", &e))?;
        Ok(D3D12CommandQueue::new(queue, ty))
    }

    fn create_command_allocator(&self, ty: CommandListType) -> Result<D3D12CommandAllocator> {
        let allocator = unsafe { self.device.CreateCommandAllocator::<ID3D12CommandAllocator>(command_list_type(ty)) }
            .map_err(|e| driver_error("ID3D12Device::CreateCommandAllocator", &e))?;
        Ok(D3D12CommandAllocator::new(allocator))
    }

    fn create_command_list(&self, ty: CommandListType, allocator: &D3D12CommandAllocator) -> Result<D3D12CommandList> {
        let list: ID3D12GraphicsCommandList = unsafe {
            self.device.CreateCommandList(
                0,
                command_list_type(ty),
                allocator.raw(),
                None::<&ID3D12PipelineState>,
            )
        }
        .map_err(|e| driver_error("ID3D12Device::CreateCommandList", &e))?;
        Ok(D3D12CommandList::new(list, ty))
    }

    fn create_descriptor_heap(&self, desc: &DescriptorHeapDesc) -> Result<D3D12DescriptorHeap> {
        let heap_desc = D3D12_DESCRIPTOR_HEAP_DESC {
            Type: descriptor_heap_type(desc.ty),
            NumDescriptors: desc.num_descriptors,
            Flags: descriptor_heap_flags(desc.flags),
            NodeMask: 0,
        };

        let heap = unsafe { self.device.CreateDescriptorHeap::<ID3D12DescriptorHeap>(&heap_desc) }
            .map_err(|e| driver_error("ID3D12Device::CreateDescriptorHeap", &e))?;
        gfx_debug!(SOURCE, "CreateDescriptorHeap({:?}, {} slot(s))", desc.ty, desc.num_descriptors);
        Ok(D3D12DescriptorHeap::new(heap, *desc))
    }

    fn descriptor_handle_increment_size(&self, ty: DescriptorHeapType) -> u32 {
        unsafe { self.device.GetDescriptorHandleIncrementSize(descriptor_heap_type(ty)) }
    }

    fn create_render_target_view(&self, resource: &D3D12Resource, handle: CpuDescriptorHandle) -> Result<()> {
        unsafe {
            self.device
                .CreateRenderTargetView(resource.raw(), None, cpu_handle(handle))
        };
        Ok(())
    }
}

/// Direct3D 12 fence
pub struct D3D12Fence {
    fence: ID3D12Fence,
}

impl D3D12Fence {
    pub fn raw(&self) -> &ID3D12Fence {
        &self.fence
    }
}

impl Fence for D3D12Fence {
    fn completed_value(&self) -> u64 {
        unsafe { self.fence.GetCompletedValue() }
    }
}

#[cfg(all(test, feature = "d3d12-info-queue"))]
#[path = "d3d12_device_tests.rs"]
mod tests;
