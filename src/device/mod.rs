//! Device memory primitives
//!
//! The actual device runtime is an external collaborator; this module owns
//! only the seam: an allocator trait the orchestrator injects, a host-backed
//! reference implementation, and the typed buffer type that enforces
//! exactly-once freeing.

pub mod allocator;
pub mod buffer;
pub mod error;

pub use allocator::{DeviceAllocator, SystemAllocator, DEVICE_ALIGNMENT};
pub use buffer::DeviceBuffer;
pub use error::{DeviceError, DeviceResult};
