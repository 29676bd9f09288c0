//! Source of per character outlines and metrics.

use read_fonts::types::Point;

use crate::{error::ProviderError, outline::RawOutline};

/// Advance and kerning for one character, in font design units.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct GlyphMetrics {
    /// Horizontal advance width.
    pub advance: i32,
    /// Adjustment relative to the preceding character.
    pub kerning: Point<i32>,
}

/// Supplies raw outlines and metrics to the layout engine.
///
/// A character without a glyph is not an error: implementations return an
/// empty outline and whatever advance they have for it (possibly zero).
pub trait GlyphOutlineProvider {
    /// Distance between baselines in font design units.
    ///
    /// The layout scale maps this onto the requested text height.
    fn line_height(&self) -> f64;

    /// Returns the outline for `ch` in font design units.
    fn outline(&self, ch: char) -> Result<RawOutline, ProviderError>;

    /// Returns the advance width for `ch`, zero if unknown.
    fn advance(&self, ch: char) -> i32;

    /// Returns the kerning adjustment between `prev` and `ch`.
    fn kerning(&self, prev: char, ch: char) -> Point<i32> {
        let _ = (prev, ch);
        Point::default()
    }

    /// Returns the combined metrics for `ch` following `prev`.
    fn metrics(&self, prev: Option<char>, ch: char) -> GlyphMetrics {
        GlyphMetrics {
            advance: self.advance(ch),
            kerning: prev
                .map(|prev| self.kerning(prev, ch))
                .unwrap_or_default(),
        }
    }
}

impl<T: GlyphOutlineProvider + ?Sized> GlyphOutlineProvider for &T {
    fn line_height(&self) -> f64 {
        (**self).line_height()
    }

    fn outline(&self, ch: char) -> Result<RawOutline, ProviderError> {
        (**self).outline(ch)
    }

    fn advance(&self, ch: char) -> i32 {
        (**self).advance(ch)
    }

    fn kerning(&self, prev: char, ch: char) -> Point<i32> {
        (**self).kerning(prev, ch)
    }

    fn metrics(&self, prev: Option<char>, ch: char) -> GlyphMetrics {
        (**self).metrics(prev, ch)
    }
}
