use std::collections::HashMap;

/// Glyph metrics used for line breaking and vertical rhythm.
///
/// Implementations must be pure: the same input always measures the same.
pub trait TextMeasure {
    /// Advance width and line height of `text` at `scale`.
    fn measure(&self, text: &str, scale: f32) -> (f32, f32);

    fn line_height(&self, scale: f32) -> f32 {
        self.measure("", scale).1
    }
}

/// Fixed advance per glyph, keyed by character.
///
/// Characters without an entry use the fallback advance, so an empty table
/// behaves like the average-glyph-width estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMetrics {
    line_height: f32,
    fallback_advance: f32,
    advances: HashMap<char, f32>,
}

impl GlyphMetrics {
    /// Line height of the 14pt face rendered at 72 dpi.
    pub const DEFAULT_LINE_HEIGHT: f32 = 16.0;

    /// Every glyph is 60% of the line height wide.
    pub fn monospace(line_height: f32) -> Self {
        Self {
            line_height,
            fallback_advance: line_height * 0.6,
            advances: HashMap::new(),
        }
    }

    pub fn with_advance(mut self, ch: char, advance: f32) -> Self {
        self.advances.insert(ch, advance);
        self
    }

    pub fn with_fallback_advance(mut self, advance: f32) -> Self {
        self.fallback_advance = advance;
        self
    }

    pub fn advance(&self, ch: char) -> f32 {
        self.advances
            .get(&ch)
            .copied()
            .unwrap_or(self.fallback_advance)
    }
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self::monospace(Self::DEFAULT_LINE_HEIGHT)
    }
}

impl TextMeasure for GlyphMetrics {
    fn measure(&self, text: &str, scale: f32) -> (f32, f32) {
        let width: f32 = text.chars().map(|ch| self.advance(ch)).sum();
        (width * scale, self.line_height * scale)
    }

    fn line_height(&self, scale: f32) -> f32 {
        self.line_height * scale
    }
}
