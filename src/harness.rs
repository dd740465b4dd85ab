//! Benchmark harness facade
//!
//! Ties the parsed configuration to the memory pools. The execution layer
//! (kernel launches, timing loops) lives outside this crate; it queries the
//! harness for the run mode, the ordered layers, pooled buffers, and the
//! type-erased identity scalars it passes to the compute API.

use std::path::Path;
use std::sync::Arc;

use crate::config::{BenchConfig, DataParams, Layer, LayerKind, RunMode};
use crate::datatype::{Element, ElementKind, Scalar};
use crate::device::DeviceAllocator;
use crate::error::DnnMarkResult;
use crate::memory::{ChunkId, DataPool, HasPool, PoolRegistry, UniformGenerator};

/// Top-level benchmark state: configuration plus per-type memory pools.
#[derive(Debug)]
pub struct Harness {
    config: BenchConfig,
    pools: PoolRegistry,
    generator: UniformGenerator,
}

impl Harness {
    /// Build a harness from already-parsed configuration.
    pub fn new(config: BenchConfig, allocator: Arc<dyn DeviceAllocator>) -> Self {
        Harness {
            config,
            pools: PoolRegistry::new(allocator),
            generator: UniformGenerator::from_entropy(),
        }
    }

    /// Parse `path` and build a harness around the result.
    pub fn from_config_file<P: AsRef<Path>>(
        path: P,
        allocator: Arc<dyn DeviceAllocator>,
    ) -> DnnMarkResult<Self> {
        let config = BenchConfig::parse_file(path)?;
        Ok(Self::new(config, allocator))
    }

    /// Parse configuration text and build a harness around the result.
    pub fn from_config_str(
        text: &str,
        allocator: Arc<dyn DeviceAllocator>,
    ) -> DnnMarkResult<Self> {
        let config = BenchConfig::parse_str(text)?;
        Ok(Self::new(config, allocator))
    }

    /// Use a fixed seed for buffer fills (reproducible benchmark inputs).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.generator = UniformGenerator::from_seed(seed);
        self
    }

    /// Global run mode from the `[DNNMark]` section.
    pub fn run_mode(&self) -> RunMode {
        self.config.run_mode
    }

    /// All layers in file order.
    pub fn layers(&self) -> &[Layer] {
        &self.config.layers
    }

    /// Data layers in file order.
    pub fn data_layers(&self) -> impl Iterator<Item = &Layer> {
        self.config.layers_of_kind(LayerKind::Data)
    }

    /// Convolution layers in file order.
    pub fn conv_layers(&self) -> impl Iterator<Item = &Layer> {
        self.config.layers_of_kind(LayerKind::Convolution)
    }

    /// Diagnostics collected while parsing.
    pub fn warnings(&self) -> &[String] {
        &self.config.warnings
    }

    /// The memory pool for element type `T`.
    pub fn pool<T: Element>(&self) -> &DataPool<T>
    where
        PoolRegistry: HasPool<T>,
    {
        self.pools.pool::<T>()
    }

    /// Mutable access to the memory pool for element type `T`.
    pub fn pool_mut<T: Element>(&mut self) -> &mut DataPool<T>
    where
        PoolRegistry: HasPool<T>,
    {
        self.pools.pool_mut::<T>()
    }

    /// Multiplicative identity for `kind`, for type-erased compute calls.
    pub fn one(&self, kind: ElementKind) -> &'static Scalar {
        Scalar::one(kind)
    }

    /// Additive identity for `kind`.
    pub fn zero(&self, kind: ElementKind) -> &'static Scalar {
        Scalar::zero(kind)
    }

    /// Allocate a chunk sized for `params` and fill it with uniform data.
    ///
    /// Convenience for the common data-layer setup step: the chunk's element
    /// count is `params.element_count()`.
    pub fn prepare_data_chunk<T: Element>(
        &mut self,
        params: &DataParams,
    ) -> DnnMarkResult<ChunkId>
    where
        PoolRegistry: HasPool<T>,
    {
        let pool = self.pools.pool_mut::<T>();
        let chunk_id = pool.create_data(params.element_count())?;
        pool.fill(chunk_id, &mut self.generator)?;
        Ok(chunk_id)
    }
}
