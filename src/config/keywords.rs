//! Recognized section markers and per-section keywords
//!
//! All tables are fixed at build time. Each predicate takes a trimmed line
//! and answers exact membership; keyword checks always consult the table of
//! the section being parsed, never another section's table.

/// Global section marker.
pub const GLOBAL_SECTION: &str = "[DNNMark]";
/// Data layer section marker.
pub const DATA_SECTION: &str = "[Data]";
/// Convolution layer section marker.
pub const CONV_SECTION: &str = "[Convolution]";

/// Closed set of recognized section markers.
pub const SECTION_MARKERS: &[&str] = &[GLOBAL_SECTION, DATA_SECTION, CONV_SECTION];

/// Keywords legal inside `[DNNMark]`.
pub const GLOBAL_KEYWORDS: &[&str] = &["run_mode"];

/// Keywords legal inside `[Data]`: batch, channels, height, width.
pub const DATA_KEYWORDS: &[&str] = &["n", "c", "h", "w"];

/// Keywords legal inside `[Convolution]`.
pub const CONV_KEYWORDS: &[&str] = &["name", "output_num", "kernel_size", "pad", "stride"];

/// Leading marker for comment lines.
pub const COMMENT_MARKER: char = '#';

pub fn is_section(s: &str) -> bool {
    SECTION_MARKERS.contains(&s)
}

pub fn is_global_section(s: &str) -> bool {
    s == GLOBAL_SECTION
}

pub fn is_global_keyword(s: &str) -> bool {
    GLOBAL_KEYWORDS.contains(&s)
}

pub fn is_data_section(s: &str) -> bool {
    s == DATA_SECTION
}

pub fn is_data_keyword(s: &str) -> bool {
    DATA_KEYWORDS.contains(&s)
}

pub fn is_conv_section(s: &str) -> bool {
    s == CONV_SECTION
}

pub fn is_conv_keyword(s: &str) -> bool {
    CONV_KEYWORDS.contains(&s)
}

pub fn is_comment(s: &str) -> bool {
    s.starts_with(COMMENT_MARKER)
}
