//! Baseline layout of decomposed glyphs.
//!
//! Characters are placed strictly left to right. For each character the pen
//! first moves by the kerning against the previous character, the outline
//! is decomposed and positioned at the pen, and the pen then moves by the
//! scaled advance. Tracking is added between each pair of characters.

use core::iter::Enumerate;
use core::str::Chars;

use kurbo::{Affine, BezPath};

use crate::{
    error::{GlyphError, LayoutError},
    outline::Segment,
    pen::{draw_contour, OutlinePen},
    provider::GlyphOutlineProvider,
};

/// Default text height in output units.
pub const DEFAULT_HEIGHT: f64 = 1000.0;

/// Uniform factor mapping font design units to output units.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scale {
    factor: f64,
}

impl Scale {
    /// Unscaled, output units are font units.
    pub const IDENTITY: Self = Self { factor: 1.0 };

    /// Returns the scale that maps a line of `line_height` font units onto
    /// `height` output units.
    pub fn for_height(height: f64, line_height: f64) -> Result<Self, LayoutError> {
        let factor = height / line_height;
        if !(factor.is_finite() && factor > 0.0) {
            return Err(LayoutError::InvalidScale {
                height,
                line_height,
            });
        }
        Ok(Self { factor })
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Horizontal factor; always equal to [`Scale::y`].
    pub fn x(&self) -> f64 {
        self.factor
    }

    /// Vertical factor; always equal to [`Scale::x`].
    pub fn y(&self) -> f64 {
        self.factor
    }

    pub fn to_affine(&self) -> Affine {
        Affine::scale(self.factor)
    }
}

/// What to do with a glyph whose outline can't be loaded or decomposed.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MalformedGlyphPolicy {
    /// Fail the whole layout with the glyph error.
    #[default]
    Abort,
    /// Leave the glyph out, record the error and keep going.
    Skip,
}

/// Parameters of a layout call.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    /// Height of a line of text in output units.
    pub height: f64,
    /// Extra spacing between characters, in output units. Must be finite.
    pub tracking: f64,
    pub on_malformed: MalformedGlyphPolicy,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            tracking: 0.0,
            on_malformed: MalformedGlyphPolicy::default(),
        }
    }
}

impl LayoutOptions {
    pub fn new(height: f64, tracking: f64) -> Self {
        Self {
            height,
            tracking,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_policy(self, on_malformed: MalformedGlyphPolicy) -> Self {
        Self {
            on_malformed,
            ..self
        }
    }
}

/// Positioned geometry of one character.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphGeometry {
    pub character: char,
    /// Index of the character in the input string, counted in chars.
    pub index: usize,
    /// Pen position the glyph was placed at, after kerning.
    pub origin: f64,
    /// Scaled advance width.
    pub advance: f64,
    /// One list of segments per contour, in output units.
    pub contours: Vec<Vec<Segment>>,
}

impl GlyphGeometry {
    /// Returns true if the character produced no contours.
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Returns an iterator over all segments of all contours.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.contours.iter().flatten()
    }

    /// Replays the positioned contours into `pen`.
    pub fn draw(&self, pen: &mut impl OutlinePen) {
        for contour in &self.contours {
            draw_contour(contour, pen);
        }
    }
}

/// Result of laying out a whole string.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextGeometry {
    pub scale: Scale,
    /// Geometry for each character that produced contours, in order.
    pub glyphs: Vec<GlyphGeometry>,
    /// Final pen position.
    pub advance: f64,
    /// Glyphs left out under [`MalformedGlyphPolicy::Skip`].
    #[cfg_attr(feature = "serde", serde(skip))]
    pub skipped: Vec<GlyphError>,
}

impl TextGeometry {
    /// Replays every glyph into `pen`.
    pub fn draw(&self, pen: &mut impl OutlinePen) {
        for glyph in &self.glyphs {
            glyph.draw(pen);
        }
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        self.draw(&mut path);
        path
    }
}

#[derive(Copy, Clone, Debug)]
enum LayoutState {
    Start,
    Positioning { prev: char },
    Done,
}

/// Iterator that positions each character of a string in turn.
///
/// Yields one item per character, including characters with no outline.
/// A failed glyph yields an error but leaves the pen where it would have
/// been had the glyph succeeded, so iteration may continue.
#[derive(Clone, Debug)]
pub struct GlyphLayout<'a, P> {
    provider: P,
    chars: Enumerate<Chars<'a>>,
    scale: Scale,
    tracking: f64,
    pen: f64,
    state: LayoutState,
}

impl<'a, P: GlyphOutlineProvider> GlyphLayout<'a, P> {
    pub fn new(provider: P, text: &'a str, scale: Scale, tracking: f64) -> Self {
        Self {
            provider,
            chars: text.chars().enumerate(),
            scale,
            tracking,
            pen: 0.0,
            state: LayoutState::Start,
        }
    }

    /// Current pen position in output units.
    pub fn pen_position(&self) -> f64 {
        self.pen
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    fn decompose(
        &self,
        index: usize,
        ch: char,
        origin: f64,
    ) -> Result<Vec<Vec<Segment>>, GlyphError> {
        let outline = self
            .provider
            .outline(ch)
            .map_err(|e| GlyphError::provider(ch, index, e))?;
        // scale first; translation is in output units
        let transform = Affine::translate((origin, 0.0)) * self.scale.to_affine();
        outline
            .contours()
            .enumerate()
            .map(|(contour_ix, contour)| {
                let normalized = contour
                    .and_then(|contour| contour.normalize())
                    .map_err(|e| GlyphError::decompose(ch, index, contour_ix, e))?;
                let segments = normalized
                    .segments()
                    .map(|segment| segment.transform(transform))
                    .collect::<Vec<_>>();
                log::trace!(
                    "{ch:?} contour {contour_ix}: {} segments",
                    segments.len()
                );
                Ok(segments)
            })
            .collect()
    }
}

impl<P: GlyphOutlineProvider> Iterator for GlyphLayout<'_, P> {
    type Item = Result<GlyphGeometry, GlyphError>;

    fn next(&mut self) -> Option<Self::Item> {
        let prev = match self.state {
            LayoutState::Done => return None,
            LayoutState::Start => None,
            LayoutState::Positioning { prev } => Some(prev),
        };
        let Some((index, ch)) = self.chars.next() else {
            self.state = LayoutState::Done;
            return None;
        };
        if prev.is_some() {
            self.pen += self.tracking;
        }
        let metrics = self.provider.metrics(prev, ch);
        self.pen += metrics.kerning.x as f64 * self.scale.x();
        let origin = self.pen;
        let advance = metrics.advance as f64 * self.scale.x();
        self.pen += advance;
        self.state = LayoutState::Positioning { prev: ch };
        log::debug!(
            "{ch:?}: kerning {} advance {} origin {origin} pen {}",
            metrics.kerning.x,
            metrics.advance,
            self.pen
        );
        let result = self
            .decompose(index, ch, origin)
            .map(|contours| GlyphGeometry {
                character: ch,
                index,
                origin,
                advance,
                contours,
            });
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            LayoutState::Done => (0, Some(0)),
            _ => self.chars.size_hint(),
        }
    }
}

/// Lays out `text` on a baseline starting at the origin.
///
/// The scale is chosen so that a line of the provider's line height maps
/// onto `options.height`. Characters without contours advance the pen but
/// are left out of the result.
///
/// Fails with [`LayoutError::InvalidScale`] or
/// [`LayoutError::InvalidTracking`] before any glyph is loaded.
pub fn layout<P: GlyphOutlineProvider>(
    provider: P,
    text: &str,
    options: &LayoutOptions,
) -> Result<TextGeometry, LayoutError> {
    let scale = Scale::for_height(options.height, provider.line_height())?;
    if !options.tracking.is_finite() {
        return Err(LayoutError::InvalidTracking(options.tracking));
    }
    let mut glyphs = GlyphLayout::new(provider, text, scale, options.tracking);
    let mut geometry = Vec::new();
    let mut skipped = Vec::new();
    for glyph in glyphs.by_ref() {
        match glyph {
            Ok(glyph) if glyph.is_empty() => {}
            Ok(glyph) => geometry.push(glyph),
            Err(e) => match options.on_malformed {
                MalformedGlyphPolicy::Abort => return Err(e.into()),
                MalformedGlyphPolicy::Skip => {
                    log::warn!("skipping malformed glyph: {e}");
                    skipped.push(e);
                }
            },
        }
    }
    Ok(TextGeometry {
        scale,
        glyphs: geometry,
        advance: glyphs.pen_position(),
        skipped,
    })
}
