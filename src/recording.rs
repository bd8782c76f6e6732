//! Captured shaping output, replayable as a [`Shaper`].
//!
//! A recording stores the engine's layouts (keyed by the exact styled
//! text that was shaped) and every glyph outline those layouts reference,
//! as SVG path data. Replaying it reproduces the original composition
//! without the engine being present.

use std::collections::HashMap;
use std::path::Path;

use kurbo::{BezPath, Size};
use serde::{Deserialize, Serialize};

use crate::config::ComposeConfig;
use crate::error::{ShapeError, TextPathError};
use crate::shaping::{GlyphId, ShapedLayout, Shaper};
use crate::text::{AttributedText, FontSpec, RunAttributes};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Text the recording was made for.
    pub text: AttributedText,
    /// Bounds it was laid out in.
    pub bounds: Size,
    /// Settings used when recording, if any.
    #[serde(default)]
    pub config: Option<ComposeConfig>,
    pub layouts: Vec<RecordedLayout>,
    pub outlines: Vec<RecordedOutline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedLayout {
    pub text: AttributedText,
    pub layout: ShapedLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedOutline {
    pub font: FontSpec,
    pub glyph: GlyphId,
    /// SVG path data.
    pub path: String,
}

impl Recording {
    pub fn load(path: &Path) -> Result<Self, TextPathError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, TextPathError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, TextPathError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), TextPathError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Record everything a composition of `text` asks of `shaper`: the main
    /// layout, the decoration probe for each run font, and all outlines.
    pub fn capture(
        shaper: &dyn Shaper,
        text: &AttributedText,
        bounds: Size,
        config: &ComposeConfig,
    ) -> Result<Self, TextPathError> {
        let layout = shaper.shape(text, bounds)?;

        let mut fonts: Vec<FontSpec> = Vec::new();
        let mut outlines: Vec<RecordedOutline> = Vec::new();
        let mut layouts = Vec::new();
        record_outlines(shaper, &layout, config, &mut fonts, &mut outlines);
        layouts.push(RecordedLayout {
            text: text.clone(),
            layout,
        });

        for font in fonts.clone() {
            let probe = AttributedText::styled(
                config.decoration_probe.as_str(),
                RunAttributes::new(font),
            );
            // Probe failures are tolerated at composition time too.
            if let Ok(layout) = shaper.shape(&probe, config.probe_bounds) {
                record_outlines(shaper, &layout, config, &mut fonts, &mut outlines);
                layouts.push(RecordedLayout {
                    text: probe,
                    layout,
                });
            }
        }

        Ok(Self {
            text: text.clone(),
            bounds,
            config: Some(config.clone()),
            layouts,
            outlines,
        })
    }
}

fn record_outlines(
    shaper: &dyn Shaper,
    layout: &ShapedLayout,
    config: &ComposeConfig,
    fonts: &mut Vec<FontSpec>,
    outlines: &mut Vec<RecordedOutline>,
) {
    for run in layout.lines.iter().flat_map(|line| &line.runs) {
        let font = run
            .attributes
            .as_ref()
            .unwrap_or(&config.default_attributes)
            .font
            .clone();
        for &glyph in &run.glyphs {
            let known = outlines
                .iter()
                .any(|o| o.glyph == glyph && o.font == font);
            if known {
                continue;
            }
            if let Some(path) = shaper.glyph_outline(&font, glyph) {
                outlines.push(RecordedOutline {
                    font: font.clone(),
                    glyph,
                    path: path.to_svg(),
                });
            }
        }
        if !fonts.contains(&font) {
            fonts.push(font);
        }
    }
}

/// Hashable identity of a font.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FontKey {
    family: String,
    size_bits: u64,
    weight: u16,
}

impl From<&FontSpec> for FontKey {
    fn from(font: &FontSpec) -> Self {
        Self {
            family: font.family.clone(),
            size_bits: font.size.to_bits(),
            weight: font.weight,
        }
    }
}

/// Replays a [`Recording`].
#[derive(Debug, Clone)]
pub struct RecordedShaper {
    layouts: Vec<RecordedLayout>,
    outlines: HashMap<(FontKey, GlyphId), BezPath>,
}

impl RecordedShaper {
    pub fn from_recording(recording: &Recording) -> Result<Self, TextPathError> {
        let mut outlines = HashMap::with_capacity(recording.outlines.len());
        for outline in &recording.outlines {
            let path = BezPath::from_svg(&outline.path).map_err(|e| {
                TextPathError::Recording(format!(
                    "outline of glyph {} in {}: {e}",
                    outline.glyph, outline.font.family
                ))
            })?;
            outlines.insert((FontKey::from(&outline.font), outline.glyph), path);
        }
        Ok(Self {
            layouts: recording.layouts.clone(),
            outlines,
        })
    }
}

impl Shaper for RecordedShaper {
    fn shape(&self, text: &AttributedText, _bounds: Size) -> Result<ShapedLayout, ShapeError> {
        self.layouts
            .iter()
            .find(|recorded| recorded.text == *text)
            .map(|recorded| recorded.layout.clone())
            .ok_or_else(|| ShapeError::NoLayout(text.plain().to_string()))
    }

    fn glyph_outline(&self, font: &FontSpec, glyph: GlyphId) -> Option<BezPath> {
        self.outlines.get(&(FontKey::from(font), glyph)).cloned()
    }
}
