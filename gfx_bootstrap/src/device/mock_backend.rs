/// Mock backend for unit tests (no GPU required)
///
/// Every driver call is recorded by name into a shared call log. The behavior
/// can be scripted: no hardware adapter, no WARP adapter, no debug layer, a
/// fixed quality-level answer, or a failure at one named call.

use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::device::{
    Adapter, AdapterInfo, AdapterKind, Backend, CommandAllocator, CommandList, CommandListType,
    CommandQueue, CpuDescriptorHandle, DescriptorHeap, DescriptorHeapDesc, DescriptorHeapType,
    Device, Factory, FeatureLevel, Fence, Format, Resource, SwapChain, SwapChainDesc,
};
use crate::error::{Error, Result};

/// HRESULT returned by scripted failures (E_FAIL)
pub const MOCK_FAILURE_CODE: i32 = 0x80004005u32 as i32;

/// HRESULT returned when no hardware adapter exists (DXGI_ERROR_UNSUPPORTED)
pub const MOCK_UNSUPPORTED_CODE: i32 = 0x887A0004u32 as i32;

/// Scripted behavior of the mock driver
#[derive(Debug, Clone)]
pub struct MockBehavior {
    pub hardware_available: bool,
    pub warp_available: bool,
    pub debug_layer_available: bool,
    /// Answer to every multisample quality query
    pub quality_levels: u32,
    /// Name of the call that fails (e.g. "CreateSwapChain")
    pub fail_at: Option<&'static str>,
    pub rtv_stride: u32,
    pub dsv_stride: u32,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            hardware_available: true,
            warp_available: true,
            debug_layer_available: true,
            quality_levels: 17,
            fail_at: None,
            rtv_stride: 32,
            dsv_stride: 8,
        }
    }
}

/// State shared by the backend and every object it creates
#[derive(Debug, Default)]
pub struct MockState {
    behavior: Mutex<MockBehavior>,
    calls: Mutex<Vec<String>>,
    live_swap_chains: AtomicUsize,
    rtv_bindings: Mutex<Vec<(u32, CpuDescriptorHandle)>>,
    heaps_created: AtomicUsize,
}

impl MockState {
    fn behavior(&self) -> MockBehavior {
        self.behavior.lock().unwrap().clone()
    }

    /// Log `call`, failing if it is the scripted failure point
    fn record(&self, call: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(call.to_string());
        if self.behavior().fail_at == Some(call) {
            return Err(Error::DriverError {
                call: call.to_string(),
                code: MOCK_FAILURE_CODE,
                message: "Unspecified error".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Mock Backend
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<MockState>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(behavior: MockBehavior) -> Self {
        let backend = Self::default();
        *backend.state.behavior.lock().unwrap() = behavior;
        backend
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Number of times `call` was made
    pub fn call_count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    /// Swap chains created and not yet dropped
    pub fn live_swap_chains(&self) -> usize {
        self.state.live_swap_chains.load(Ordering::SeqCst)
    }

    /// (buffer index, RTV handle) for every view created, in creation order
    pub fn rtv_bindings(&self) -> Vec<(u32, CpuDescriptorHandle)> {
        self.state.rtv_bindings.lock().unwrap().clone()
    }
}

impl Backend for MockBackend {
    type Factory = MockFactory;
    type Adapter = MockAdapter;
    type Device = MockDevice;
    type Fence = MockFence;
    type CommandQueue = MockCommandQueue;
    type CommandAllocator = MockCommandAllocator;
    type CommandList = MockCommandList;
    type SwapChain = MockSwapChain;
    type DescriptorHeap = MockDescriptorHeap;
    type Resource = MockResource;
    type WindowHandle = MockWindow;

    fn name(&self) -> &'static str {
        "mock"
    }

    fn enable_debug_layer(&self) -> Result<()> {
        self.state.record("EnableDebugLayer")?;
        if !self.state.behavior().debug_layer_available {
            return Err(Error::InitializationFailed(
                "Debug layer is not installed".to_string(),
            ));
        }
        Ok(())
    }

    fn create_factory(&self, debug: bool) -> Result<MockFactory> {
        self.state.record("CreateFactory")?;
        Ok(MockFactory {
            state: self.state.clone(),
            debug,
        })
    }
}

/// Window handle placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockWindow(pub u32);

// ============================================================================
// Mock Factory / Adapter
// ============================================================================

#[derive(Debug)]
pub struct MockFactory {
    state: Arc<MockState>,
    pub debug: bool,
}

impl Factory<MockBackend> for MockFactory {
    fn create_device(&self, adapter: Option<&MockAdapter>, min_level: FeatureLevel) -> Result<MockDevice> {
        self.state.record("CreateDevice")?;

        let kind = adapter.map(|a| a.kind).unwrap_or(AdapterKind::Hardware);
        if kind == AdapterKind::Hardware && !self.state.behavior().hardware_available {
            return Err(Error::DriverError {
                call: "D3D12CreateDevice".to_string(),
                code: MOCK_UNSUPPORTED_CODE,
                message: "The specified device interface or feature level is not supported on this system."
                    .to_string(),
            });
        }

        Ok(MockDevice {
            state: self.state.clone(),
            level: min_level,
            kind,
        })
    }

    fn enum_warp_adapter(&self) -> Result<MockAdapter> {
        self.state.record("EnumWarpAdapter")?;
        if !self.state.behavior().warp_available {
            return Err(Error::InitializationFailed("No WARP adapter".to_string()));
        }
        Ok(MockAdapter {
            kind: AdapterKind::Software,
        })
    }

    fn create_swap_chain(
        &self,
        _queue: &MockCommandQueue,
        window: MockWindow,
        desc: &SwapChainDesc,
    ) -> Result<MockSwapChain> {
        self.state.record("CreateSwapChain")?;
        self.state.live_swap_chains.fetch_add(1, Ordering::SeqCst);
        Ok(MockSwapChain {
            state: self.state.clone(),
            desc: *desc,
            window,
        })
    }
}

#[derive(Debug)]
pub struct MockAdapter {
    kind: AdapterKind,
}

impl Adapter for MockAdapter {
    fn info(&self) -> AdapterInfo {
        AdapterInfo {
            name: match self.kind {
                AdapterKind::Hardware => "Mock GPU".to_string(),
                AdapterKind::Software => "Mock Basic Render Driver".to_string(),
            },
            kind: self.kind,
            dedicated_video_memory: 0,
        }
    }
}

// ============================================================================
// Mock Device
// ============================================================================

#[derive(Debug)]
pub struct MockDevice {
    state: Arc<MockState>,
    level: FeatureLevel,
    pub kind: AdapterKind,
}

impl Device<MockBackend> for MockDevice {
    fn feature_level(&self) -> FeatureLevel {
        self.level
    }

    fn create_fence(&self, initial_value: u64) -> Result<MockFence> {
        self.state.record("CreateFence")?;
        Ok(MockFence { value: initial_value })
    }

    fn query_multisample_quality_levels(&self, _format: Format, _sample_count: u32) -> Result<u32> {
        self.state.record("CheckFeatureSupport")?;
        Ok(self.state.behavior().quality_levels)
    }

    fn create_command_queue(&self, ty: CommandListType) -> Result<MockCommandQueue> {
        self.state.record("CreateCommandQueue")?;
        Ok(MockCommandQueue {
            state: self.state.clone(),
            ty,
        })
    }

    fn create_command_allocator(&self, ty: CommandListType) -> Result<MockCommandAllocator> {
        self.state.record("CreateCommandAllocator")?;
        Ok(MockCommandAllocator {
            state: self.state.clone(),
            ty,
        })
    }

    fn create_command_list(&self, ty: CommandListType, allocator: &MockCommandAllocator) -> Result<MockCommandList> {
        self.state.record("CreateCommandList")?;
        if allocator.ty != ty {
            return Err(Error::InvalidState(format!(
                "allocator type {:?} does not match list type {:?}",
                allocator.ty, ty
            )));
        }
        Ok(MockCommandList {
            state: self.state.clone(),
            ty,
            recording: Cell::new(true),
        })
    }

    fn create_descriptor_heap(&self, desc: &DescriptorHeapDesc) -> Result<MockDescriptorHeap> {
        self.state.record("CreateDescriptorHeap")?;
        let index = self.state.heaps_created.fetch_add(1, Ordering::SeqCst);
        Ok(MockDescriptorHeap {
            desc: *desc,
            start: CpuDescriptorHandle::new(0x1000 * (index + 1)),
        })
    }

    fn descriptor_handle_increment_size(&self, ty: DescriptorHeapType) -> u32 {
        let behavior = self.state.behavior();
        match ty {
            DescriptorHeapType::Rtv => behavior.rtv_stride,
            DescriptorHeapType::Dsv => behavior.dsv_stride,
            DescriptorHeapType::CbvSrvUav | DescriptorHeapType::Sampler => 32,
        }
    }

    fn create_render_target_view(&self, resource: &MockResource, handle: CpuDescriptorHandle) -> Result<()> {
        self.state.record("CreateRenderTargetView")?;
        self.state
            .rtv_bindings
            .lock()
            .unwrap()
            .push((resource.buffer_index, handle));
        Ok(())
    }
}

// ============================================================================
// Mock Command Objects
// ============================================================================

#[derive(Debug)]
pub struct MockFence {
    value: u64,
}

impl Fence for MockFence {
    fn completed_value(&self) -> u64 {
        self.value
    }
}

#[derive(Debug)]
pub struct MockCommandQueue {
    state: Arc<MockState>,
    ty: CommandListType,
}

impl CommandQueue<MockBackend> for MockCommandQueue {
    fn list_type(&self) -> CommandListType {
        self.ty
    }

    fn execute(&self, list: &MockCommandList) -> Result<()> {
        // Driver removes the device when an open list is submitted
        assert!(!list.recording.get(), "open command list reached the queue");
        self.state.record("ExecuteCommandLists")
    }
}

#[derive(Debug)]
pub struct MockCommandAllocator {
    state: Arc<MockState>,
    ty: CommandListType,
}

impl CommandAllocator for MockCommandAllocator {
    fn reset(&self) -> Result<()> {
        self.state.record("CommandAllocator::Reset")
    }
}

#[derive(Debug)]
pub struct MockCommandList {
    state: Arc<MockState>,
    ty: CommandListType,
    recording: Cell<bool>,
}

impl MockCommandList {
    pub fn is_recording(&self) -> bool {
        self.recording.get()
    }
}

impl CommandList<MockBackend> for MockCommandList {
    fn list_type(&self) -> CommandListType {
        self.ty
    }

    fn close(&self) -> Result<()> {
        self.state.record("Close")?;
        self.recording.set(false);
        Ok(())
    }

    fn reset(&self, _allocator: &MockCommandAllocator) -> Result<()> {
        self.state.record("CommandList::Reset")?;
        self.recording.set(true);
        Ok(())
    }
}

// ============================================================================
// Mock Swap Chain / Heap / Resource
// ============================================================================

#[derive(Debug)]
pub struct MockSwapChain {
    state: Arc<MockState>,
    desc: SwapChainDesc,
    pub window: MockWindow,
}

impl SwapChain<MockBackend> for MockSwapChain {
    fn desc(&self) -> SwapChainDesc {
        self.desc
    }

    fn buffer(&self, index: u32) -> Result<MockResource> {
        self.state.record("GetBuffer")?;
        if index >= self.desc.buffer_count {
            return Err(Error::InvalidResource(format!(
                "swap chain has {} buffers, requested {}",
                self.desc.buffer_count, index
            )));
        }
        Ok(MockResource { buffer_index: index })
    }

    fn current_back_buffer_index(&self) -> u32 {
        0
    }
}

impl Drop for MockSwapChain {
    fn drop(&mut self) {
        self.state.live_swap_chains.fetch_sub(1, Ordering::SeqCst);
        self.state.calls.lock().unwrap().push("ReleaseSwapChain".to_string());
    }
}

#[derive(Debug)]
pub struct MockDescriptorHeap {
    desc: DescriptorHeapDesc,
    start: CpuDescriptorHandle,
}

impl DescriptorHeap for MockDescriptorHeap {
    fn desc(&self) -> DescriptorHeapDesc {
        self.desc
    }

    fn cpu_start(&self) -> CpuDescriptorHandle {
        self.start
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct MockResource {
    pub buffer_index: u32,
}

impl Resource for MockResource {}
