//! The text measurement oracle consumed by text-bearing widgets.
//!
//! Shaping and rasterization live outside this crate; widgets only need
//! measured extents to place carets, selections and wraps.

/// Measured extents of a run of text at a given font size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Advance width of the run, in pixels.
    pub width: f32,
    /// Line height (baseline to baseline), in pixels.
    pub line_height: f32,
}

/// An opaque measurement oracle: string + font size in, extents out.
///
/// Implementations wrap whatever shaping stack the host application uses.
/// Measurements must be consistent: measuring a prefix never yields a
/// width greater than measuring the whole run.
pub trait TextMeasure {
    /// Measure a single-line run at `font_size` pixels.
    fn measure(&self, text: &str, font_size: f32) -> TextMetrics;
}

/// Fixed-advance measurement, for tests and headless use.
///
/// Every character advances `font_size * aspect` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    /// Advance as a fraction of the font size.
    pub aspect: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { aspect: 0.6 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, font_size: f32) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as f32 * font_size * self.aspect,
            line_height: font_size * 1.2,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/text.rs"]
mod tests;
