/*!
# GfxBootstrap

Platform-agnostic core of the graphics context bootstrapper.

This crate brings a low-level graphics backend from "not initialized" to "ready
to accept render commands". Backend implementations (Direct3D 12, etc.) provide
concrete driver objects through the `Backend` trait; the `Bootstrapper` drives
them through a fixed startup sequence and hands back a `GraphicsContext`.

## Architecture

- **Backend**: entry point trait with one associated type per driver object
- **Bootstrapper**: runs the eight startup steps in order, aborting on the first failure
- **GraphicsContext**: owns every created object and releases them in dependency order
- **BootstrapConfig**: every startup parameter in one structure
- **Diagnostics**: global, replaceable logger used by the core and the backends
*/

// Internal modules
mod error;
mod diagnostics;
pub mod log;
pub mod config;
pub mod device;
pub mod bootstrap;

// Main gfxboot namespace module
pub mod gfxboot {
    // Error types
    pub use crate::error::{Error, Result};

    // Global logger
    pub use crate::diagnostics::Diagnostics;

    // Configuration
    pub use crate::config::{BootstrapConfig, MsaaConfig, MAX_BUFFER_COUNT};

    // Backend traits and value types
    pub use crate::device::*;

    // Startup sequence
    pub use crate::bootstrap::{
        acquire_device, acquire_factory, bind_back_buffers, create_command_objects,
        create_descriptor_heaps, create_fence, create_swap_chain, query_multisample,
        AcquiredDevice, BackBuffer, BootstrapStep, Bootstrapper, DescriptorHeaps, GraphicsContext,
    };

    // Logging sub-module (types only; the gfx_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }
}
