//! In-memory glyph provider for unit tests.

use std::collections::HashMap;

use read_fonts::types::{GlyphId, Point};

use crate::{
    error::ProviderError,
    outline::{CurveTag, RawOutline},
    provider::GlyphOutlineProvider,
};

#[derive(Clone, Debug, Default)]
pub(crate) struct MockProvider {
    line_height: f64,
    glyphs: HashMap<char, (RawOutline, i32)>,
    kerning: HashMap<(char, char), Point<i32>>,
    broken: Vec<char>,
}

impl MockProvider {
    pub fn new(line_height: f64) -> Self {
        Self {
            line_height,
            ..Default::default()
        }
    }

    /// Adds a glyph made of the given contours of `(x, y, on_curve)`.
    pub fn glyph(mut self, ch: char, advance: i32, contours: &[&[(i32, i32, bool)]]) -> Self {
        let mut outline = RawOutline::new();
        for contour in contours {
            outline.push_contour(
                contour
                    .iter()
                    .map(|&(x, y, on)| (Point::new(x, y), CurveTag::from(on))),
            );
        }
        self.glyphs.insert(ch, (outline, advance));
        self
    }

    /// Adds a glyph with a hand built outline.
    pub fn raw_glyph(mut self, ch: char, advance: i32, outline: RawOutline) -> Self {
        self.glyphs.insert(ch, (outline, advance));
        self
    }

    pub fn kern(mut self, prev: char, ch: char, x: i32) -> Self {
        self.kerning.insert((prev, ch), Point::new(x, 0));
        self
    }

    /// Makes outline loading fail for `ch`.
    pub fn broken(mut self, ch: char, advance: i32) -> Self {
        self.glyphs.insert(ch, (RawOutline::new(), advance));
        self.broken.push(ch);
        self
    }

    /// A 100x100 square at the origin.
    pub fn square() -> &'static [(i32, i32, bool)] {
        &[(0, 0, true), (0, 100, true), (100, 100, true), (100, 0, true)]
    }
}

impl GlyphOutlineProvider for MockProvider {
    fn line_height(&self) -> f64 {
        self.line_height
    }

    fn outline(&self, ch: char) -> Result<RawOutline, ProviderError> {
        if self.broken.contains(&ch) {
            return Err(ProviderError::RecursionLimitExceeded(GlyphId::new(ch as u32)));
        }
        Ok(self
            .glyphs
            .get(&ch)
            .map(|(outline, _)| outline.clone())
            .unwrap_or_default())
    }

    fn advance(&self, ch: char) -> i32 {
        self.glyphs
            .get(&ch)
            .map(|(_, advance)| *advance)
            .unwrap_or_default()
    }

    fn kerning(&self, prev: char, ch: char) -> Point<i32> {
        self.kerning
            .get(&(prev, ch))
            .copied()
            .unwrap_or_default()
    }
}
