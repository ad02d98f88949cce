/// Descriptor heap descriptor and slot cursor

use crate::device::{CpuDescriptorHandle, DescriptorHeapFlags, DescriptorHeapType};
use crate::error::{Error, Result};

/// Parameters of a descriptor heap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorHeapDesc {
    pub ty: DescriptorHeapType,
    pub num_descriptors: u32,
    pub flags: DescriptorHeapFlags,
}

impl DescriptorHeapDesc {
    /// CPU-only render-target heap with one slot per swap-chain buffer
    pub fn render_targets(buffer_count: u32) -> Self {
        Self {
            ty: DescriptorHeapType::Rtv,
            num_descriptors: buffer_count,
            flags: DescriptorHeapFlags::empty(),
        }
    }

    /// CPU-only depth-stencil heap with a single slot
    pub fn depth_stencil() -> Self {
        Self {
            ty: DescriptorHeapType::Dsv,
            num_descriptors: 1,
            flags: DescriptorHeapFlags::empty(),
        }
    }
}

/// Hands out consecutive slots of a descriptor heap
///
/// Slot `i` lives at `start + i * stride`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorCursor {
    start: CpuDescriptorHandle,
    stride: u32,
    capacity: u32,
    next: u32,
}

impl DescriptorCursor {
    pub fn new(start: CpuDescriptorHandle, stride: u32, capacity: u32) -> Self {
        Self {
            start,
            stride,
            capacity,
            next: 0,
        }
    }

    /// Next free slot
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` once every slot has been handed out.
    pub fn allocate(&mut self) -> Result<CpuDescriptorHandle> {
        let handle = self.handle(self.next)?;
        self.next += 1;
        Ok(handle)
    }

    /// Slot `index`, independently of the cursor position
    pub fn handle(&self, index: u32) -> Result<CpuDescriptorHandle> {
        if index >= self.capacity {
            return Err(Error::InvalidResource(format!(
                "descriptor slot {} out of range (heap has {} slots)",
                index, self.capacity
            )));
        }
        Ok(self.start.offset(index, self.stride))
    }

    pub fn allocated(&self) -> u32 {
        self.next
    }

    pub fn remaining(&self) -> u32 {
        self.capacity - self.next
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

#[cfg(test)]
#[path = "descriptor_heap_tests.rs"]
mod tests;
