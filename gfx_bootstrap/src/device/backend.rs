/// Backend traits - the driver surface the bootstrapper is written against
///
/// A backend is a value implementing `Backend`; each driver object type it
/// creates is an associated type implementing the matching object trait, so the
/// bootstrapper moves concrete objects around without downcasting.

use std::fmt;

use crate::device::{
    AdapterInfo, CommandListType, CpuDescriptorHandle, DescriptorHeapDesc, DescriptorHeapType,
    FeatureLevel, Format, SwapChainDesc,
};
use crate::error::Result;

// ============================================================================
// Backend trait
// ============================================================================

/// Graphics backend entry point
///
/// Implemented by `D3D12Backend` and, in unit tests, by `MockBackend`.
pub trait Backend: Sized + 'static {
    type Factory: Factory<Self>;
    type Adapter: Adapter;
    type Device: Device<Self>;
    type Fence: Fence;
    type CommandQueue: CommandQueue<Self>;
    type CommandAllocator: CommandAllocator;
    type CommandList: CommandList<Self>;
    type SwapChain: SwapChain<Self>;
    type DescriptorHeap: DescriptorHeap;
    type Resource: Resource;
    /// Native presentation target (e.g. an HWND)
    type WindowHandle: Copy + fmt::Debug;

    /// Backend name used in logs (e.g. "d3d12")
    fn name(&self) -> &'static str;

    /// Enable the driver debug layer
    ///
    /// Must be called before the factory and device are created.
    fn enable_debug_layer(&self) -> Result<()>;

    /// Create the adapter enumeration entry point
    ///
    /// # Arguments
    ///
    /// * `debug` - Create the factory with its debug flag set
    fn create_factory(&self, debug: bool) -> Result<Self::Factory>;
}

// ============================================================================
// Object traits
// ============================================================================

/// Adapter enumeration and presentation-surface factory
pub trait Factory<B: Backend> {
    /// Create a device on `adapter`, or on the default hardware adapter when `None`
    ///
    /// # Arguments
    ///
    /// * `adapter` - Explicit adapter, `None` for the driver's default
    /// * `min_level` - Minimum feature level the device must support
    fn create_device(&self, adapter: Option<&B::Adapter>, min_level: FeatureLevel) -> Result<B::Device>;

    /// First software (WARP) adapter
    fn enum_warp_adapter(&self) -> Result<B::Adapter>;

    /// Create a swap chain presenting through `queue` into `window`
    fn create_swap_chain(
        &self,
        queue: &B::CommandQueue,
        window: B::WindowHandle,
        desc: &SwapChainDesc,
    ) -> Result<B::SwapChain>;
}

pub trait Adapter {
    fn info(&self) -> AdapterInfo;
}

/// Logical device; creates every other driver object
pub trait Device<B: Backend> {
    /// Feature level the device was created with
    fn feature_level(&self) -> FeatureLevel;

    fn create_fence(&self, initial_value: u64) -> Result<B::Fence>;

    /// Number of quality levels supported for (format, sample_count)
    ///
    /// 0 means the combination is unsupported.
    fn query_multisample_quality_levels(&self, format: Format, sample_count: u32) -> Result<u32>;

    fn create_command_queue(&self, ty: CommandListType) -> Result<B::CommandQueue>;

    fn create_command_allocator(&self, ty: CommandListType) -> Result<B::CommandAllocator>;

    /// Create a command list bound to `allocator`, in the recording state
    fn create_command_list(&self, ty: CommandListType, allocator: &B::CommandAllocator) -> Result<B::CommandList>;

    fn create_descriptor_heap(&self, desc: &DescriptorHeapDesc) -> Result<B::DescriptorHeap>;

    /// Byte distance between two consecutive descriptors of `ty`
    fn descriptor_handle_increment_size(&self, ty: DescriptorHeapType) -> u32;

    /// Write a render-target view of `resource` into the slot at `handle`
    fn create_render_target_view(&self, resource: &B::Resource, handle: CpuDescriptorHandle) -> Result<()>;
}

/// Monotonic CPU/GPU synchronization counter
pub trait Fence {
    /// Last value signaled by the GPU
    fn completed_value(&self) -> u64;
}

pub trait CommandQueue<B: Backend> {
    fn list_type(&self) -> CommandListType;

    /// Submit a closed command list
    fn execute(&self, list: &B::CommandList) -> Result<()>;
}

pub trait CommandAllocator {
    /// Reclaim the memory of every list recorded from this allocator
    fn reset(&self) -> Result<()>;
}

pub trait CommandList<B: Backend> {
    fn list_type(&self) -> CommandListType;

    /// Stop recording
    fn close(&self) -> Result<()>;

    /// Reopen for recording, backed by `allocator`
    fn reset(&self, allocator: &B::CommandAllocator) -> Result<()>;
}

/// Rotating set of presentable buffers
pub trait SwapChain<B: Backend> {
    /// Description the swap chain was created with
    fn desc(&self) -> SwapChainDesc;

    /// Buffer resource at `index` (0..buffer_count)
    fn buffer(&self, index: u32) -> Result<B::Resource>;

    /// Index of the buffer that will be rendered to next
    fn current_back_buffer_index(&self) -> u32;
}

/// Contiguous array of descriptor slots
pub trait DescriptorHeap {
    fn desc(&self) -> DescriptorHeapDesc;

    /// Handle of slot 0
    fn cpu_start(&self) -> CpuDescriptorHandle;
}

/// GPU resource owned by a swap chain or the device
pub trait Resource {}
