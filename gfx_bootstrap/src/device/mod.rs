/// Device module - backend traits and the descriptors passed through them

// Module declarations
pub mod types;
pub mod backend;
pub mod multisample;
pub mod swap_chain;
pub mod descriptor_heap;
pub mod command_list;

#[cfg(test)]
pub mod mock_backend;

// Re-export everything
pub use types::*;
pub use backend::*;
pub use multisample::*;
pub use swap_chain::*;
pub use descriptor_heap::*;
pub use command_list::*;
