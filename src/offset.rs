//! Vertical drift correction between lines.
//!
//! A line's nominal metrics can come from a run that draws nothing, e.g. a
//! line break that inherited the next run's larger font. Placing glyphs by
//! what is actually drawn keeps line spacing tight; the running shift keeps
//! the following lines consistent with that.

/// Running vertical shift accumulated over lines, top to bottom.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineShift {
    shift: f64,
}

/// Nominal and glyph-derived metrics of one line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineMetrics {
    pub ascent: f64,
    pub descent: f64,
    pub effective_ascent: f64,
    pub effective_descent: f64,
}

impl LineShift {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.shift
    }

    /// Vertical offset for every glyph placed on the current line.
    pub fn glyph_offset(&self, metrics: &LineMetrics) -> f64 {
        self.shift + (metrics.ascent - metrics.effective_ascent)
    }

    /// Account for a finished line. Called for every line, including those
    /// that retained no glyphs.
    pub fn advance(&mut self, metrics: &LineMetrics) {
        self.shift += (metrics.ascent + metrics.descent)
            - (metrics.effective_ascent + metrics.effective_descent);
    }
}
