//! Parsed layer descriptors and run configuration

/// Global execution mode read from the `[DNNMark]` section.
///
/// `None` means unset: either no global section appeared or its `run_mode`
/// value was unrecognized. If the global section is repeated, the last
/// recognized value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    None,
    Standalone,
    Composed,
}

impl RunMode {
    /// Parse the exact, case-sensitive config-file spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "None" => Some(RunMode::None),
            "Standalone" => Some(RunMode::Standalone),
            "Composed" => Some(RunMode::Composed),
            _ => None,
        }
    }
}

/// Kind of benchmark layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Data,
    Convolution,
}

/// Input tensor geometry: batch, channels, height, width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataParams {
    pub n: usize,
    pub c: usize,
    pub h: usize,
    pub w: usize,
}

impl DataParams {
    /// Total elements one buffer for this layer needs. Allocation sizes are
    /// derived from this later; the parser itself never allocates.
    pub fn element_count(&self) -> usize {
        self.n * self.c * self.h * self.w
    }
}

/// Convolution filter geometry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConvParams {
    pub name: String,
    pub output_num: usize,
    pub kernel_size: usize,
    pub pad: usize,
    pub stride: usize,
}

impl ConvParams {
    /// Output spatial size for an input of `h` x `w`, or None when the
    /// stride is zero or the kernel does not fit.
    pub fn output_dims(&self, h: usize, w: usize) -> Option<(usize, usize)> {
        if self.stride == 0 {
            return None;
        }
        let span_h = h + 2 * self.pad;
        let span_w = w + 2 * self.pad;
        if self.kernel_size == 0 || self.kernel_size > span_h || self.kernel_size > span_w {
            return None;
        }
        Some((
            (span_h - self.kernel_size) / self.stride + 1,
            (span_w - self.kernel_size) / self.stride + 1,
        ))
    }
}

/// Kind-specific parameter set of one layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerParams {
    Data(DataParams),
    Convolution(ConvParams),
}

/// One benchmark layer, in file order.
///
/// A layer is appended when its section marker is encountered and its
/// parameters accumulate until the section ends; once appended it is never
/// removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Position in the ordered layer sequence, unique across all kinds.
    pub id: usize,
    pub params: LayerParams,
}

impl Layer {
    pub fn new_data(id: usize) -> Self {
        Layer {
            id,
            params: LayerParams::Data(DataParams::default()),
        }
    }

    pub fn new_convolution(id: usize) -> Self {
        Layer {
            id,
            params: LayerParams::Convolution(ConvParams::default()),
        }
    }

    pub fn kind(&self) -> LayerKind {
        match self.params {
            LayerParams::Data(_) => LayerKind::Data,
            LayerParams::Convolution(_) => LayerKind::Convolution,
        }
    }

    pub fn data_params(&self) -> Option<&DataParams> {
        match &self.params {
            LayerParams::Data(p) => Some(p),
            _ => None,
        }
    }

    pub fn conv_params(&self) -> Option<&ConvParams> {
        match &self.params {
            LayerParams::Convolution(p) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_mode_parse_is_case_sensitive() {
        assert_eq!(RunMode::parse("None"), Some(RunMode::None));
        assert_eq!(RunMode::parse("Standalone"), Some(RunMode::Standalone));
        assert_eq!(RunMode::parse("Composed"), Some(RunMode::Composed));
        assert_eq!(RunMode::parse("standalone"), None);
        assert_eq!(RunMode::parse("Bogus"), None);
    }

    #[test]
    fn test_data_params_element_count() {
        let p = DataParams { n: 4, c: 3, h: 32, w: 32 };
        assert_eq!(p.element_count(), 4 * 3 * 32 * 32);
        assert_eq!(DataParams::default().element_count(), 0);
    }

    #[test]
    fn test_conv_output_dims() {
        let conv = ConvParams {
            name: "conv1".to_string(),
            output_num: 64,
            kernel_size: 3,
            pad: 1,
            stride: 1,
        };
        assert_eq!(conv.output_dims(32, 32), Some((32, 32)));

        let strided = ConvParams { stride: 2, ..conv.clone() };
        assert_eq!(strided.output_dims(32, 32), Some((16, 16)));

        let degenerate = ConvParams { stride: 0, ..conv };
        assert_eq!(degenerate.output_dims(32, 32), None);
    }

    #[test]
    fn test_layer_kind_and_accessors() {
        let data = Layer::new_data(0);
        assert_eq!(data.kind(), LayerKind::Data);
        assert!(data.data_params().is_some());
        assert!(data.conv_params().is_none());

        let conv = Layer::new_convolution(1);
        assert_eq!(conv.kind(), LayerKind::Convolution);
        assert!(conv.conv_params().is_some());
    }
}
