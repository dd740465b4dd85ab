//! Benchmark configuration: keyword tables, layer model, section parser

pub mod keywords;
pub mod layer;
pub mod parser;

pub use layer::{ConvParams, DataParams, Layer, LayerKind, LayerParams, RunMode};
pub use parser::{BenchConfig, ConfigError, ConfigResult};
