//! Raw glyph outlines and their decomposition into segments.
//!
//! An outline arrives as the three parallel arrays every rasterizer
//! exposes: points in font design units, one [`CurveTag`] per point and the
//! index of the last point of each contour. Each contour is then
//! [normalized](RawContour::normalize) so that it never holds two
//! consecutive off-curve points, and the normalized contour is split into
//! [`Segment`]s.

mod contour;
mod segment;

pub use contour::{NormalizedContour, Step};
pub use segment::{segment, Segment, Segments};

use read_fonts::types::Point;

use crate::error::DecomposeError;

/// Classification of a single outline point.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveTag {
    /// The outline passes through this point.
    OnCurve,
    /// Control point of a quadratic (TrueType) Bézier.
    ConicControl,
    /// Control point of a cubic (PostScript) Bézier.
    ///
    /// Never valid input for decomposition; see
    /// [`DecomposeError::UnsupportedCubic`].
    CubicControl,
}

impl CurveTag {
    const ON_BIT: u8 = 0b01;
    const CUBIC_BIT: u8 = 0b10;

    /// Decodes a FreeType style point tag.
    ///
    /// Bit 0 marks an on-curve point, bit 1 distinguishes cubic from conic
    /// control points. Higher bits (dropout modes) are ignored.
    pub fn from_bits(bits: u8) -> Self {
        if bits & Self::ON_BIT != 0 {
            Self::OnCurve
        } else if bits & Self::CUBIC_BIT != 0 {
            Self::CubicControl
        } else {
            Self::ConicControl
        }
    }

    /// Returns true if the point lies on the outline.
    pub fn is_on_curve(self) -> bool {
        self == Self::OnCurve
    }

    /// Returns true for either kind of control point.
    pub fn is_off_curve(self) -> bool {
        !self.is_on_curve()
    }
}

impl From<bool> for CurveTag {
    /// Maps a TrueType on-curve flag to a tag.
    fn from(on_curve: bool) -> Self {
        if on_curve {
            Self::OnCurve
        } else {
            Self::ConicControl
        }
    }
}

/// Combination of a point in output space and its tag.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ContourPoint {
    pub point: kurbo::Point,
    pub tag: CurveTag,
}

impl ContourPoint {
    pub fn new(point: impl Into<kurbo::Point>, tag: CurveTag) -> Self {
        Self {
            point: point.into(),
            tag,
        }
    }

    pub fn on_curve(x: f64, y: f64) -> Self {
        Self::new((x, y), CurveTag::OnCurve)
    }

    pub fn conic(x: f64, y: f64) -> Self {
        Self::new((x, y), CurveTag::ConicControl)
    }
}

/// Outline of a single glyph in font design units.
///
/// No winding or nesting information is computed; contours are kept in
/// font order.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct RawOutline {
    pub points: Vec<Point<i32>>,
    pub tags: Vec<CurveTag>,
    /// Index of the last point of each contour.
    pub contour_ends: Vec<usize>,
}

impl RawOutline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the outline has no contours (whitespace or a missing
    /// glyph).
    pub fn is_empty(&self) -> bool {
        self.contour_ends.is_empty()
    }

    pub fn num_contours(&self) -> usize {
        self.contour_ends.len()
    }

    /// Appends a contour built from the given points.
    ///
    /// Empty iterators are ignored.
    pub fn push_contour(&mut self, points: impl IntoIterator<Item = (Point<i32>, CurveTag)>) {
        let start = self.points.len();
        for (point, tag) in points {
            self.points.push(point);
            self.tags.push(tag);
        }
        if self.points.len() > start {
            self.contour_ends.push(self.points.len() - 1);
        }
    }

    /// Returns the points and tags of the contour at `index`.
    pub fn contour(&self, index: usize) -> Result<RawContour<'_>, DecomposeError> {
        if self.points.len() != self.tags.len() {
            return Err(DecomposeError::PointTagMismatch {
                num_points: self.points.len(),
                num_tags: self.tags.len(),
            });
        }
        let end = *self
            .contour_ends
            .get(index)
            .ok_or(DecomposeError::ContourOrder(index))?;
        let start = index
            .checked_sub(1)
            .and_then(|prev| self.contour_ends.get(prev))
            .map(|prev_end| prev_end + 1)
            .unwrap_or_default();
        if end < start || end >= self.points.len() {
            return Err(DecomposeError::ContourOrder(index));
        }
        Ok(RawContour {
            start,
            points: &self.points[start..=end],
            tags: &self.tags[start..=end],
        })
    }

    /// Returns an iterator over all contours, in order.
    pub fn contours(&self) -> impl Iterator<Item = Result<RawContour<'_>, DecomposeError>> + '_ {
        (0..self.num_contours()).map(|ix| self.contour(ix))
    }
}

/// View of one contour of a [`RawOutline`].
#[derive(Copy, Clone, Debug)]
pub struct RawContour<'a> {
    start: usize,
    points: &'a [Point<i32>],
    tags: &'a [CurveTag],
}

impl<'a> RawContour<'a> {
    /// Creates a contour view over parallel point and tag slices.
    pub fn new(points: &'a [Point<i32>], tags: &'a [CurveTag]) -> Result<Self, DecomposeError> {
        if points.len() != tags.len() {
            return Err(DecomposeError::PointTagMismatch {
                num_points: points.len(),
                num_tags: tags.len(),
            });
        }
        Ok(Self {
            start: 0,
            points,
            tags,
        })
    }

    /// Index of the first point of this contour in the owning outline.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn points(&self) -> &'a [Point<i32>] {
        self.points
    }

    pub fn tags(&self) -> &'a [CurveTag] {
        self.tags
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Inserts the implied on-curve points and closes the contour.
    ///
    /// Errors report point indices relative to the owning outline.
    pub fn normalize(&self) -> Result<NormalizedContour, DecomposeError> {
        contour::normalize(self.points, self.tags).map_err(|e| e.offset_by(self.start))
    }
}
