//! One memory pool per element type
//!
//! The reference design used lazily constructed process-wide singletons.
//! Here the registry is an ordinary value built by the orchestrator and
//! passed to whoever needs it, preserving "one pool per element type"
//! without hidden global state.

use std::sync::Arc;

use half::f16;

use crate::datatype::Element;
use crate::device::DeviceAllocator;

use super::pool::DataPool;

/// Holds exactly one [`DataPool`] per supported element type.
///
/// Chunk-id sequences are independent per pool: the f32 pool and the f64
/// pool each count from 0.
#[derive(Debug)]
pub struct PoolRegistry {
    f16_pool: DataPool<f16>,
    f32_pool: DataPool<f32>,
    f64_pool: DataPool<f64>,
}

impl PoolRegistry {
    /// Build the registry; every pool shares the injected allocator.
    pub fn new(allocator: Arc<dyn DeviceAllocator>) -> Self {
        PoolRegistry {
            f16_pool: DataPool::new(Arc::clone(&allocator)),
            f32_pool: DataPool::new(Arc::clone(&allocator)),
            f64_pool: DataPool::new(allocator),
        }
    }

    /// Typed access to the pool for `T`.
    pub fn pool<T: Element>(&self) -> &DataPool<T>
    where
        Self: HasPool<T>,
    {
        HasPool::pool(self)
    }

    /// Typed mutable access to the pool for `T`.
    pub fn pool_mut<T: Element>(&mut self) -> &mut DataPool<T>
    where
        Self: HasPool<T>,
    {
        HasPool::pool_mut(self)
    }
}

/// Maps an element type to its pool field. Implemented once per supported
/// type; a type without an impl cannot get a pool, keeping the "one pool
/// per type" set closed.
pub trait HasPool<T: Element> {
    fn pool(&self) -> &DataPool<T>;
    fn pool_mut(&mut self) -> &mut DataPool<T>;
}

impl HasPool<f16> for PoolRegistry {
    fn pool(&self) -> &DataPool<f16> {
        &self.f16_pool
    }
    fn pool_mut(&mut self) -> &mut DataPool<f16> {
        &mut self.f16_pool
    }
}

impl HasPool<f32> for PoolRegistry {
    fn pool(&self) -> &DataPool<f32> {
        &self.f32_pool
    }
    fn pool_mut(&mut self) -> &mut DataPool<f32> {
        &mut self.f32_pool
    }
}

impl HasPool<f64> for PoolRegistry {
    fn pool(&self) -> &DataPool<f64> {
        &self.f64_pool
    }
    fn pool_mut(&mut self) -> &mut DataPool<f64> {
        &mut self.f64_pool
    }
}
