//! Graphics context bootstrapper
//!
//! Brings a backend from "not initialized" to "ready to accept render commands"
//! by running eight steps in a fixed order:
//!
//! 1. factory acquisition
//! 2. device acquisition (hardware, then software fallback)
//! 3. fence creation
//! 4. multisample capability query
//! 5. command queue / allocator / list creation (list closed)
//! 6. swap chain creation
//! 7. RTV / DSV descriptor heap creation
//! 8. back-buffer view binding
//!
//! Each step is a public function so it can be driven on its own. Any failure
//! aborts startup with `Error::StepFailed` naming the step; objects created by
//! earlier steps are released on the way out.

use std::fmt;

use crate::config::BootstrapConfig;
use crate::device::{
    Adapter, AdapterInfo, AdapterKind, Backend, CommandListType, CommandObjects,
    CpuDescriptorHandle, DescriptorCursor, DescriptorHeap, DescriptorHeapDesc, DescriptorHeapType,
    Device, Factory, Format, MultisampleCapability, SwapChain, SwapChainDesc,
};
use crate::error::{Error, Result};
use crate::{gfx_debug, gfx_error, gfx_info, gfx_warn};

const SOURCE: &str = "gfxboot::Bootstrapper";

// ============================================================================
// Steps
// ============================================================================

/// One step of the startup sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootstrapStep {
    Factory,
    Device,
    Fence,
    MultisampleQuery,
    CommandObjects,
    SwapChain,
    DescriptorHeaps,
    BackBufferViews,
}

impl BootstrapStep {
    /// Every step, in execution order
    pub const ALL: [BootstrapStep; 8] = [
        BootstrapStep::Factory,
        BootstrapStep::Device,
        BootstrapStep::Fence,
        BootstrapStep::MultisampleQuery,
        BootstrapStep::CommandObjects,
        BootstrapStep::SwapChain,
        BootstrapStep::DescriptorHeaps,
        BootstrapStep::BackBufferViews,
    ];

    /// Progress message logged when the step starts
    pub fn action(self) -> &'static str {
        match self {
            BootstrapStep::Factory => "Creating factory",
            BootstrapStep::Device => "Creating device",
            BootstrapStep::Fence => "Creating fence",
            BootstrapStep::MultisampleQuery => "Querying multisample quality levels",
            BootstrapStep::CommandObjects => "Creating command queue, allocator and list",
            BootstrapStep::SwapChain => "Creating swap chain",
            BootstrapStep::DescriptorHeaps => "Creating RTV and DSV descriptor heaps",
            BootstrapStep::BackBufferViews => "Binding back-buffer render-target views",
        }
    }
}

impl fmt::Display for BootstrapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BootstrapStep::Factory => "Factory acquisition",
            BootstrapStep::Device => "Device acquisition",
            BootstrapStep::Fence => "Fence creation",
            BootstrapStep::MultisampleQuery => "Multisample capability query",
            BootstrapStep::CommandObjects => "Command object creation",
            BootstrapStep::SwapChain => "Swap chain creation",
            BootstrapStep::DescriptorHeaps => "Descriptor heap creation",
            BootstrapStep::BackBufferViews => "Back-buffer view binding",
        };
        f.write_str(name)
    }
}

fn begin(step: BootstrapStep) {
    gfx_info!(SOURCE, "{}...", step.action());
}

fn done(step: BootstrapStep) {
    gfx_info!(SOURCE, "{} succeeded", step);
}

/// Log a step failure and wrap it
fn fail(step: BootstrapStep, error: Error) -> Error {
    gfx_error!(SOURCE, "{} failed: {}", step, error);
    error.in_step(step)
}

// ============================================================================
// Step results
// ============================================================================

/// Device and the kind of adapter it runs on
pub struct AcquiredDevice<B: Backend> {
    pub device: B::Device,
    pub adapter_kind: AdapterKind,
    /// Description of the explicit adapter, when one was enumerated
    pub adapter_info: Option<AdapterInfo>,
}

/// Render-target and depth-stencil view heaps
pub struct DescriptorHeaps<B: Backend> {
    pub rtv: B::DescriptorHeap,
    pub dsv: B::DescriptorHeap,
    pub rtv_descriptor_size: u32,
    pub dsv_descriptor_size: u32,
    /// Format the DSV slot is reserved for
    pub depth_format: Format,
}

/// One swap-chain buffer and the RTV slot it is bound to
pub struct BackBuffer<B: Backend> {
    pub index: u32,
    pub resource: B::Resource,
    pub rtv: CpuDescriptorHandle,
}

// ============================================================================
// Step functions
// ============================================================================

/// Step 1: create the factory, enabling the debug layer first when configured
///
/// A missing debug layer is logged as a warning and the factory is then
/// created without its debug flag.
pub fn acquire_factory<B: Backend>(backend: &B, config: &BootstrapConfig) -> Result<B::Factory> {
    let step = BootstrapStep::Factory;
    begin(step);

    let debug = config.enable_debug_layer
        && match backend.enable_debug_layer() {
            Ok(()) => {
                gfx_info!(SOURCE, "{} debug layer enabled", backend.name());
                true
            }
            Err(e) => {
                gfx_warn!(SOURCE, "Debug layer unavailable, continuing without it: {}", e);
                false
            }
        };

    let factory = backend.create_factory(debug).map_err(|e| fail(step, e))?;
    done(step);
    Ok(factory)
}

/// Step 2: create a hardware device, or fall back to the WARP adapter
///
/// The fallback runs only when hardware creation fails and
/// `config.allow_software_fallback` is set.
pub fn acquire_device<B: Backend>(factory: &B::Factory, config: &BootstrapConfig) -> Result<AcquiredDevice<B>> {
    let step = BootstrapStep::Device;
    begin(step);

    let acquired: AcquiredDevice<B> = match factory.create_device(None, config.min_feature_level) {
        Ok(device) => AcquiredDevice {
            device,
            adapter_kind: AdapterKind::Hardware,
            adapter_info: None,
        },
        Err(hardware_error) if config.allow_software_fallback => {
            gfx_warn!(
                SOURCE,
                "Hardware device unavailable ({}), falling back to the WARP adapter",
                hardware_error
            );
            let adapter = factory.enum_warp_adapter().map_err(|e| fail(step, e))?;
            let info = adapter.info();
            let device = factory
                .create_device(Some(&adapter), config.min_feature_level)
                .map_err(|e| fail(step, e))?;
            gfx_info!(SOURCE, "Using software adapter: {}", info.name);
            AcquiredDevice {
                device,
                adapter_kind: info.kind,
                adapter_info: Some(info),
            }
        }
        Err(e) => return Err(fail(step, e)),
    };

    gfx_debug!(
        SOURCE,
        "Device feature level {} on {:?} adapter",
        acquired.device.feature_level(),
        acquired.adapter_kind
    );
    done(step);
    Ok(acquired)
}

/// Step 3: create the fence at value 0
pub fn create_fence<B: Backend>(device: &B::Device) -> Result<B::Fence> {
    let step = BootstrapStep::Fence;
    begin(step);
    let fence = device.create_fence(0).map_err(|e| fail(step, e))?;
    done(step);
    Ok(fence)
}

/// Step 4: query quality levels for (format, sample_count)
///
/// Zero quality levels is fatal; the caller must pick another combination.
pub fn query_multisample<B: Backend>(
    device: &B::Device,
    format: Format,
    sample_count: u32,
) -> Result<MultisampleCapability> {
    let step = BootstrapStep::MultisampleQuery;
    begin(step);

    let quality_levels = device
        .query_multisample_quality_levels(format, sample_count)
        .map_err(|e| fail(step, e))?;
    let capability = MultisampleCapability::new(format, sample_count, quality_levels)
        .require_supported()
        .map_err(|e| fail(step, e))?;

    gfx_debug!(
        SOURCE,
        "{}x MSAA on {:?}: {} quality level(s)",
        sample_count,
        format,
        quality_levels
    );
    done(step);
    Ok(capability)
}

/// Step 5: create queue, allocator and list of type `ty`, then close the list
pub fn create_command_objects<B: Backend>(device: &B::Device, ty: CommandListType) -> Result<CommandObjects<B>> {
    let step = BootstrapStep::CommandObjects;
    begin(step);

    let queue = device.create_command_queue(ty).map_err(|e| fail(step, e))?;
    let allocator = device.create_command_allocator(ty).map_err(|e| fail(step, e))?;
    let list = device
        .create_command_list(ty, &allocator)
        .map_err(|e| fail(step, e))?;

    let mut objects = CommandObjects::new(queue, allocator, list);
    objects.close().map_err(|e| fail(step, e))?;

    done(step);
    Ok(objects)
}

/// Step 6: (re)create the swap chain into `slot`
///
/// Any swap chain already in `slot` is released before the new one is created.
pub fn create_swap_chain<B: Backend>(
    factory: &B::Factory,
    queue: &B::CommandQueue,
    window: B::WindowHandle,
    config: &BootstrapConfig,
    msaa_quality: u32,
    slot: &mut Option<B::SwapChain>,
) -> Result<()> {
    let step = BootstrapStep::SwapChain;
    begin(step);

    if let Some(previous) = slot.take() {
        drop(previous);
        gfx_debug!(SOURCE, "Released previous swap chain");
    }

    let desc = SwapChainDesc::from_config(config, msaa_quality).map_err(|e| fail(step, e))?;
    gfx_debug!(
        SOURCE,
        "Swap chain {}x{} {:?}, {} buffer(s), {} sample(s) quality {}",
        desc.width,
        desc.height,
        desc.format,
        desc.buffer_count,
        desc.sample_desc.count,
        desc.sample_desc.quality
    );

    let swap_chain = factory
        .create_swap_chain(queue, window, &desc)
        .map_err(|e| fail(step, e))?;
    *slot = Some(swap_chain);

    done(step);
    Ok(())
}

/// Step 7: create an RTV heap with `buffer_count` slots and a one-slot DSV heap
pub fn create_descriptor_heaps<B: Backend>(
    device: &B::Device,
    buffer_count: u32,
    depth_format: Format,
) -> Result<DescriptorHeaps<B>> {
    let step = BootstrapStep::DescriptorHeaps;
    begin(step);

    if !depth_format.is_depth() {
        return Err(fail(
            step,
            Error::InvalidConfig(format!("{:?} cannot back a depth-stencil view", depth_format)),
        ));
    }

    let rtv = device
        .create_descriptor_heap(&DescriptorHeapDesc::render_targets(buffer_count))
        .map_err(|e| fail(step, e))?;
    let dsv = device
        .create_descriptor_heap(&DescriptorHeapDesc::depth_stencil())
        .map_err(|e| fail(step, e))?;

    let heaps = DescriptorHeaps {
        rtv,
        dsv,
        rtv_descriptor_size: device.descriptor_handle_increment_size(DescriptorHeapType::Rtv),
        dsv_descriptor_size: device.descriptor_handle_increment_size(DescriptorHeapType::Dsv),
        depth_format,
    };
    gfx_debug!(
        SOURCE,
        "RTV descriptor size {}, DSV descriptor size {}",
        heaps.rtv_descriptor_size,
        heaps.dsv_descriptor_size
    );
    gfx_debug!(
        SOURCE,
        "DSV slot reserved for {:?} ({})",
        depth_format,
        if depth_format.has_stencil() { "depth + stencil" } else { "depth only" }
    );

    done(step);
    Ok(heaps)
}

/// Step 8: bind buffer `i` of the swap chain to RTV slot `i`, for every buffer
pub fn bind_back_buffers<B: Backend>(
    device: &B::Device,
    swap_chain: &B::SwapChain,
    rtv_heap: &B::DescriptorHeap,
    buffer_count: u32,
) -> Result<Vec<BackBuffer<B>>> {
    let step = BootstrapStep::BackBufferViews;
    begin(step);

    let heap_slots = rtv_heap.desc().num_descriptors;
    if heap_slots != buffer_count {
        return Err(fail(
            step,
            Error::InvalidResource(format!(
                "RTV heap has {} slots for {} swap-chain buffers",
                heap_slots, buffer_count
            )),
        ));
    }

    let stride = device.descriptor_handle_increment_size(DescriptorHeapType::Rtv);
    let mut cursor = DescriptorCursor::new(rtv_heap.cpu_start(), stride, heap_slots);
    let mut back_buffers = Vec::with_capacity(buffer_count as usize);

    for index in 0..buffer_count {
        let resource = swap_chain.buffer(index).map_err(|e| fail(step, e))?;
        let rtv = cursor.allocate().map_err(|e| fail(step, e))?;
        device
            .create_render_target_view(&resource, rtv)
            .map_err(|e| fail(step, e))?;
        back_buffers.push(BackBuffer { index, resource, rtv });
    }

    done(step);
    Ok(back_buffers)
}

// ============================================================================
// Bootstrapper
// ============================================================================

/// Runs the whole startup sequence for one backend and configuration
///
/// # Example
///
/// ```no_run
/// # fn demo<B: gfx_bootstrap::gfxboot::Backend>(backend: B, window: B::WindowHandle)
/// #     -> gfx_bootstrap::gfxboot::Result<()> {
/// use gfx_bootstrap::gfxboot::{Bootstrapper, BootstrapConfig};
///
/// let context = Bootstrapper::new(backend, BootstrapConfig::default())?.run(window)?;
/// println!("{} back buffers", context.back_buffer_count());
/// # Ok(()) }
/// ```
pub struct Bootstrapper<B: Backend> {
    backend: B,
    config: BootstrapConfig,
}

impl<B: Backend> Bootstrapper<B> {
    /// # Errors
    ///
    /// `Error::InvalidConfig` when `config.validate()` fails.
    pub fn new(backend: B, config: BootstrapConfig) -> Result<Self> {
        config.validate().map_err(|e| {
            gfx_error!(SOURCE, "Rejected configuration: {}", e);
            e
        })?;
        Ok(Self { backend, config })
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Execute every step in order against `window`
    pub fn run(self, window: B::WindowHandle) -> Result<GraphicsContext<B>> {
        let Self { backend, config } = self;
        gfx_info!(
            SOURCE,
            "Bootstrapping {} graphics context: {}x{}, {} buffer(s), {:?}, MSAA {}",
            backend.name(),
            config.width,
            config.height,
            config.buffer_count,
            config.back_buffer_format,
            if config.msaa.enabled { "on" } else { "off" }
        );

        let factory = acquire_factory(&backend, &config)?;
        let AcquiredDevice { device, adapter_kind, .. } = acquire_device::<B>(&factory, &config)?;
        let fence = create_fence::<B>(&device)?;
        let multisample =
            query_multisample::<B>(&device, config.back_buffer_format, config.msaa.sample_count)?;
        let commands = create_command_objects::<B>(&device, CommandListType::Direct)?;

        let mut slot = None;
        create_swap_chain::<B>(
            &factory,
            commands.queue(),
            window,
            &config,
            multisample.quality_levels,
            &mut slot,
        )?;
        let swap_chain = slot.ok_or_else(|| {
            Error::InvalidState("swap chain slot empty after creation".to_string())
                .in_step(BootstrapStep::SwapChain)
        })?;

        let heaps = create_descriptor_heaps::<B>(&device, config.buffer_count, config.depth_stencil_format)?;
        let back_buffers = bind_back_buffers::<B>(&device, &swap_chain, &heaps.rtv, config.buffer_count)?;

        gfx_info!(SOURCE, "Graphics context ready");

        Ok(GraphicsContext {
            back_buffers,
            heaps,
            swap_chain,
            commands,
            multisample,
            fence,
            device,
            adapter_kind,
            factory,
            window,
            backend,
            config,
        })
    }
}

// ============================================================================
// Graphics context
// ============================================================================

/// Every object created by the bootstrapper
///
/// Fields drop in declaration order: back buffers and views first, then the
/// swap chain and command objects, then the device, the factory last.
pub struct GraphicsContext<B: Backend> {
    back_buffers: Vec<BackBuffer<B>>,
    heaps: DescriptorHeaps<B>,
    swap_chain: B::SwapChain,
    commands: CommandObjects<B>,
    multisample: MultisampleCapability,
    fence: B::Fence,
    device: B::Device,
    adapter_kind: AdapterKind,
    factory: B::Factory,
    window: B::WindowHandle,
    backend: B,
    config: BootstrapConfig,
}

impl<B: Backend> GraphicsContext<B> {
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn device(&self) -> &B::Device {
        &self.device
    }

    pub fn factory(&self) -> &B::Factory {
        &self.factory
    }

    pub fn fence(&self) -> &B::Fence {
        &self.fence
    }

    pub fn adapter_kind(&self) -> AdapterKind {
        self.adapter_kind
    }

    pub fn multisample(&self) -> MultisampleCapability {
        self.multisample
    }

    pub fn commands(&self) -> &CommandObjects<B> {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandObjects<B> {
        &mut self.commands
    }

    pub fn swap_chain(&self) -> &B::SwapChain {
        &self.swap_chain
    }

    pub fn window(&self) -> B::WindowHandle {
        self.window
    }

    pub fn rtv_heap(&self) -> &B::DescriptorHeap {
        &self.heaps.rtv
    }

    pub fn dsv_heap(&self) -> &B::DescriptorHeap {
        &self.heaps.dsv
    }

    pub fn back_buffers(&self) -> &[BackBuffer<B>] {
        &self.back_buffers
    }

    pub fn back_buffer_count(&self) -> u32 {
        self.back_buffers.len() as u32
    }

    pub fn rtv_descriptor_size(&self) -> u32 {
        self.heaps.rtv_descriptor_size
    }

    /// Buffer the next frame renders into
    pub fn current_back_buffer(&self) -> Result<&BackBuffer<B>> {
        let index = self.swap_chain.current_back_buffer_index();
        self.back_buffers.get(index as usize).ok_or_else(|| {
            Error::InvalidResource(format!(
                "current back buffer {} out of range ({} buffers)",
                index,
                self.back_buffers.len()
            ))
        })
    }

    /// RTV handle of the current back buffer, by direct heap indexing
    pub fn current_back_buffer_view(&self) -> Result<CpuDescriptorHandle> {
        self.back_buffer_view(self.swap_chain.current_back_buffer_index())
    }

    /// RTV handle of buffer `index`
    pub fn back_buffer_view(&self, index: u32) -> Result<CpuDescriptorHandle> {
        DescriptorCursor::new(
            self.heaps.rtv.cpu_start(),
            self.heaps.rtv_descriptor_size,
            self.heaps.rtv.desc().num_descriptors,
        )
        .handle(index)
    }

    /// Handle of the single DSV slot
    pub fn depth_stencil_view(&self) -> CpuDescriptorHandle {
        self.heaps.dsv.cpu_start()
    }

    pub fn depth_stencil_format(&self) -> Format {
        self.heaps.depth_format
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;
