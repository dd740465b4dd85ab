//! Section-based configuration parser
//!
//! Reads a benchmark configuration file in one forward pass and builds the
//! run mode plus an ordered sequence of layer descriptors. The parser is a
//! small state machine over trimmed lines:
//!
//! - seeking: skip everything until a recognized section marker
//! - in a section: consume `key = value` lines against that section's own
//!   keyword table
//!
//! Re-encountering a non-global section marker starts a *new* layer, so one
//! file can define several layers of the same kind. Any recognized marker
//! ends the section that was being consumed.
//!
//! Layer ids are assigned from a single counter in file order, across all
//! section kinds; the id doubles as the layer's position in the sequence.
//!
//! Unrecognized keywords and unrecognized `run_mode` values are diagnostics,
//! not errors: they are logged, recorded on the result, and parsing
//! continues. Unreadable files and non-integer values for numeric keywords
//! are fatal.

use std::path::Path;

use thiserror::Error;

use super::keywords;
use super::layer::{ConvParams, DataParams, Layer, LayerKind, LayerParams, RunMode};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("value for '{keyword}' is not an integer: '{value}'")]
    InvalidNumber { keyword: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Parsed benchmark configuration: global run mode plus layers in file order.
#[derive(Debug, Default)]
pub struct BenchConfig {
    /// Global run mode. Last recognized value wins if `[DNNMark]` repeats.
    pub run_mode: RunMode,
    /// Layer descriptors, ordered by id (= file order).
    pub layers: Vec<Layer>,
    /// Non-fatal diagnostics emitted while parsing.
    pub warnings: Vec<String>,
}

impl BenchConfig {
    /// Parse configuration text.
    pub fn parse_str(text: &str) -> ConfigResult<Self> {
        let mut parser = Parser::default();
        for raw in text.lines() {
            parser.consume_line(raw.trim())?;
        }
        Ok(parser.finish())
    }

    /// Read and parse a configuration file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::parse_str(&text)
    }

    /// Layers of one kind, still in file order.
    pub fn layers_of_kind(&self, kind: LayerKind) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(move |l| l.kind() == kind)
    }
}

/// Which section's keyword table is currently in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Global,
    Data,
    Convolution,
}

/// Parser state: outside any section, or consuming one section's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ParserState {
    #[default]
    SeekingSection,
    InSection(SectionKind),
}

#[derive(Debug, Default)]
struct Parser {
    state: ParserState,
    next_layer_id: usize,
    config: BenchConfig,
}

impl Parser {
    fn consume_line(&mut self, line: &str) -> ConfigResult<()> {
        if line.is_empty() || keywords::is_comment(line) {
            return Ok(());
        }

        // Section markers switch state in either parser state; a marker for
        // a layer section always opens a fresh layer.
        if keywords::is_global_section(line) {
            self.state = ParserState::InSection(SectionKind::Global);
            return Ok(());
        }
        if keywords::is_data_section(line) {
            self.push_layer(Layer::new_data(0), SectionKind::Data);
            return Ok(());
        }
        if keywords::is_conv_section(line) {
            self.push_layer(Layer::new_convolution(0), SectionKind::Convolution);
            return Ok(());
        }

        match self.state {
            // Lines before any recognized section are skipped
            ParserState::SeekingSection => Ok(()),
            ParserState::InSection(kind) => self.consume_key_value(kind, line),
        }
    }

    fn push_layer(&mut self, layer: Layer, kind: SectionKind) {
        let id = self.next_layer_id;
        self.next_layer_id += 1;
        let layer = Layer { id, ..layer };
        tracing::debug!("config: layer {} opened ({:?})", id, layer.kind());
        self.config.layers.push(layer);
        self.state = ParserState::InSection(kind);
    }

    fn consume_key_value(&mut self, kind: SectionKind, line: &str) -> ConfigResult<()> {
        let Some((key, value)) = line.split_once('=') else {
            self.warn(format!("ignoring malformed line: '{}'", line));
            return Ok(());
        };
        let key = key.trim();
        let value = value.trim();

        match kind {
            SectionKind::Global => self.assign_global(key, value),
            SectionKind::Data => self.assign_data(key, value)?,
            SectionKind::Convolution => self.assign_conv(key, value)?,
        }
        Ok(())
    }

    fn assign_global(&mut self, key: &str, value: &str) {
        if !keywords::is_global_keyword(key) {
            self.warn(format!("unknown keyword '{}' in [DNNMark] section", key));
            return;
        }
        // run_mode is the only global keyword
        match RunMode::parse(value) {
            Some(mode) => self.config.run_mode = mode,
            None => self.warn(format!("unknown run mode '{}'", value)),
        }
    }

    fn assign_data(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        if !keywords::is_data_keyword(key) {
            self.warn(format!("unknown keyword '{}' in [Data] section", key));
            return Ok(());
        }
        let number = parse_usize(key, value)?;
        let params = self.current_data_params();
        match key {
            "n" => params.n = number,
            "c" => params.c = number,
            "h" => params.h = number,
            "w" => params.w = number,
            _ => unreachable!("keyword table and match arms disagree"),
        }
        Ok(())
    }

    fn assign_conv(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        if !keywords::is_conv_keyword(key) {
            self.warn(format!("unknown keyword '{}' in [Convolution] section", key));
            return Ok(());
        }
        if key == "name" {
            self.current_conv_params().name = value.to_string();
            return Ok(());
        }
        let number = parse_usize(key, value)?;
        let params = self.current_conv_params();
        match key {
            "output_num" => params.output_num = number,
            "kernel_size" => params.kernel_size = number,
            "pad" => params.pad = number,
            "stride" => params.stride = number,
            _ => unreachable!("keyword table and match arms disagree"),
        }
        Ok(())
    }

    /// The layer opened by the most recent `[Data]` marker. Only called in
    /// the Data state, which is entered by pushing a data layer.
    fn current_data_params(&mut self) -> &mut DataParams {
        match self.config.layers.last_mut() {
            Some(Layer { params: LayerParams::Data(p), .. }) => p,
            _ => unreachable!("Data state without a current data layer"),
        }
    }

    fn current_conv_params(&mut self) -> &mut ConvParams {
        match self.config.layers.last_mut() {
            Some(Layer { params: LayerParams::Convolution(p), .. }) => p,
            _ => unreachable!("Convolution state without a current conv layer"),
        }
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("config: {}", message);
        self.config.warnings.push(message);
    }

    fn finish(self) -> BenchConfig {
        tracing::debug!(
            "config: parsed {} layers, run mode {:?}, {} warnings",
            self.config.layers.len(),
            self.config.run_mode,
            self.config.warnings.len()
        );
        self.config
    }
}

fn parse_usize(keyword: &str, value: &str) -> ConfigResult<usize> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidNumber {
        keyword: keyword.to_string(),
        value: value.to_string(),
    })
}
