/// D3D12DescriptorHeap - CPU-visible descriptor heap

use gfx_bootstrap::gfxboot::{CpuDescriptorHandle, DescriptorHeap, DescriptorHeapDesc};
use windows::Win32::Graphics::Direct3D12::ID3D12DescriptorHeap;

use crate::d3d12_format::from_cpu_handle;

pub struct D3D12DescriptorHeap {
    heap: ID3D12DescriptorHeap,
    desc: DescriptorHeapDesc,
}

impl D3D12DescriptorHeap {
    pub(crate) fn new(heap: ID3D12DescriptorHeap, desc: DescriptorHeapDesc) -> Self {
        Self { heap, desc }
    }

    pub fn raw(&self) -> &ID3D12DescriptorHeap {
        &self.heap
    }
}

impl DescriptorHeap for D3D12DescriptorHeap {
    fn desc(&self) -> DescriptorHeapDesc {
        self.desc
    }

    fn cpu_start(&self) -> CpuDescriptorHandle {
        from_cpu_handle(unsafe { self.heap.GetCPUDescriptorHandleForHeapStart() })
    }
}
