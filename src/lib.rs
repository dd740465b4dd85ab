//! DNNMark core - micro-benchmark harness for DNN primitives
//!
//! The crate owns the two pieces every benchmark run needs before any kernel
//! launches: typed device-memory pools that hand out numbered buffer chunks
//! shared across layers, and a section-aware configuration parser that
//! builds an ordered graph of benchmark layers with per-layer parameters.
//!
//! Kernel invocation, timing loops, and process entry are external
//! collaborators; they consume this crate through [`Harness`].

#![allow(clippy::needless_range_loop)] // Clearer for buffer setup code

pub mod config;
pub mod datatype;
pub mod device;
pub mod error;
pub mod harness;
pub mod logging;
pub mod memory;

pub use config::{BenchConfig, ConfigError, ConvParams, DataParams, Layer, LayerKind, RunMode};
pub use datatype::{Element, ElementKind, Scalar};
pub use device::{DeviceAllocator, DeviceBuffer, DeviceError, SystemAllocator};
pub use error::{DnnMarkError, DnnMarkResult, ErrorCategory};
pub use harness::Harness;
pub use memory::{ChunkId, DataPool, PoolRegistry, UniformGenerator};
