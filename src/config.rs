use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::text::RunAttributes;

/// All composition parameters in one struct.
/// Serializable so a recording can carry the settings it was made with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    // -- Output --
    /// Capture per-run attributes on each line.
    pub include_attributes: bool,
    /// Keep the composed path on the result. When false only the
    /// structural model and metrics are returned.
    pub include_path: bool,

    // -- Layout --
    /// Attributes used when the engine reports a run without any.
    pub default_attributes: RunAttributes,
    /// Characters whose glyphs are dropped from the model.
    pub ignored: IgnoredChars,

    // -- Decorations --
    /// Text shaped in isolation to measure decoration thickness.
    pub decoration_probe: String,
    /// Bounds given to the engine for the probe.
    pub probe_bounds: Size,
    /// Thickness used when the probe yields nothing.
    pub fallback_thickness: f64,
}

/// Which characters produce no glyph entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum IgnoredChars {
    /// Unicode `White_Space`, which includes line breaks.
    #[default]
    WhitespaceAndNewlines,
    /// An explicit set.
    Custom(Vec<char>),
}

impl IgnoredChars {
    pub fn contains(&self, c: char) -> bool {
        match self {
            IgnoredChars::WhitespaceAndNewlines => c.is_whitespace(),
            IgnoredChars::Custom(chars) => chars.contains(&c),
        }
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            include_attributes: true,
            include_path: true,
            default_attributes: RunAttributes::default(),
            ignored: IgnoredChars::WhitespaceAndNewlines,
            decoration_probe: "-".to_string(),
            probe_bounds: Size::new(100.0, 100.0),
            fallback_thickness: 1.0,
        }
    }
}
