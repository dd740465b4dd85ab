//! Typed device memory pool
//!
//! One pool exists per element type. Layers share buffers by chunk id; the
//! pool owns every buffer it creates and frees them all when it is dropped.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::datatype::{Element, ElementKind};
use crate::device::{DeviceAllocator, DeviceBuffer};

use super::generator::UniformGenerator;
use super::{ChunkId, MemoryError, MemoryResult};

/// Pool of device buffers for one element type, indexed by chunk id.
///
/// Ids are dense, start at 0, and are never reused, even if a chunk is
/// released. All allocations go through the injected allocator.
#[derive(Debug)]
pub struct DataPool<T: Element> {
    chunks: BTreeMap<ChunkId, DeviceBuffer<T>>,
    next_id: ChunkId,
    allocator: Arc<dyn DeviceAllocator>,
}

impl<T: Element> DataPool<T> {
    pub fn new(allocator: Arc<dyn DeviceAllocator>) -> Self {
        DataPool {
            chunks: BTreeMap::new(),
            next_id: 0,
            allocator,
        }
    }

    /// Element type this pool serves.
    pub fn element_kind(&self) -> ElementKind {
        T::KIND
    }

    /// Allocate a new chunk of `element_count` elements and return its id.
    ///
    /// Ids are handed out sequentially and never reused. Propagates the
    /// allocator's error if the device cannot satisfy the request.
    pub fn create_data(&mut self, element_count: usize) -> MemoryResult<ChunkId> {
        let buffer = DeviceBuffer::new(element_count, Arc::clone(&self.allocator))?;
        let chunk_id = self.next_id;
        self.next_id += 1;
        self.chunks.insert(chunk_id, buffer);
        tracing::debug!(
            "DataPool[{:?}]: created chunk {} ({} elements)",
            T::KIND,
            chunk_id,
            element_count
        );
        Ok(chunk_id)
    }

    /// Checked lookup of a chunk by id.
    pub fn get_data(&self, chunk_id: ChunkId) -> MemoryResult<&DeviceBuffer<T>> {
        self.chunks
            .get(&chunk_id)
            .ok_or(MemoryError::ChunkNotFound(chunk_id))
    }

    /// Redraw the chunk's contents from the uniform generator.
    ///
    /// Non-idempotent: every call uploads freshly drawn values. The chunk
    /// must already exist.
    pub fn fill(&mut self, chunk_id: ChunkId, generator: &mut UniformGenerator) -> MemoryResult<()> {
        let buffer = self
            .chunks
            .get(&chunk_id)
            .ok_or(MemoryError::ChunkNotFound(chunk_id))?;
        let host = generator.draw_vec::<T>(buffer.len());
        buffer.upload(&host)?;
        tracing::trace!(
            "DataPool[{:?}]: filled chunk {} with {} uniform values",
            T::KIND,
            chunk_id,
            host.len()
        );
        Ok(())
    }

    /// Release one chunk. Its id is retired, not recycled.
    pub fn release(&mut self, chunk_id: ChunkId) -> MemoryResult<()> {
        self.chunks
            .remove(&chunk_id)
            .map(|_| ())
            .ok_or(MemoryError::ChunkNotFound(chunk_id))
    }

    /// Number of live chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total elements across all live chunks.
    pub fn total_elements(&self) -> usize {
        self.chunks.values().map(|b| b.len()).sum()
    }
}
