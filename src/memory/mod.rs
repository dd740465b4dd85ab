//! Memory pool management for benchmark buffers
//!
//! Layers in a benchmark graph refer to device buffers by integer chunk id;
//! this module owns those buffers. One [`DataPool`] exists per element type,
//! collected in a [`PoolRegistry`] that the orchestrator constructs with an
//! injected device allocator. Pool teardown frees every buffer exactly once.

pub mod generator;
pub mod pool;
pub mod registry;

use thiserror::Error;

pub use generator::UniformGenerator;
pub use pool::DataPool;
pub use registry::{HasPool, PoolRegistry};

/// Identifier of one buffer chunk, unique and dense within one pool.
pub type ChunkId = usize;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("no chunk with id {0} exists in this pool")]
    ChunkNotFound(ChunkId),

    #[error("device error: {0}")]
    Device(#[from] crate::device::DeviceError),
}

pub type MemoryResult<T> = Result<T, MemoryError>;
