//! Contour segmentation.

use kurbo::{Affine, Line, PathSeg, Point, QuadBez};

use super::{ContourPoint, CurveTag, Step};
use crate::error::DecomposeError;

/// Elementary piece of a contour.
///
/// Every segment starts and ends on an on-curve point. Only lines and
/// quadratic curves are produced from TrueType outlines.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Segment {
    /// Straight line between two on-curve points.
    Line(Line),
    /// Quadratic Bézier: on-curve start, control point, on-curve end.
    Quad(QuadBez),
}

impl Segment {
    pub fn line(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self::Line(Line::new(p0, p1))
    }

    pub fn quad(p0: impl Into<Point>, ctrl: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self::Quad(QuadBez::new(p0.into(), ctrl.into(), p1.into()))
    }

    /// The on-curve start point.
    pub fn start(&self) -> Point {
        match self {
            Self::Line(line) => line.p0,
            Self::Quad(quad) => quad.p0,
        }
    }

    /// The on-curve end point.
    pub fn end(&self) -> Point {
        match self {
            Self::Line(line) => line.p1,
            Self::Quad(quad) => quad.p2,
        }
    }

    /// The control point of a curve segment.
    pub fn control(&self) -> Option<Point> {
        match self {
            Self::Line(_) => None,
            Self::Quad(quad) => Some(quad.p1),
        }
    }

    /// All defining points in order: two for a line, three for a curve.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (p0, ctrl, p1) = match self {
            Self::Line(line) => (line.p0, None, line.p1),
            Self::Quad(quad) => (quad.p0, Some(quad.p1), quad.p2),
        };
        core::iter::once(p0)
            .chain(ctrl)
            .chain(core::iter::once(p1))
    }

    /// Returns the segment with every point mapped through `affine`.
    #[must_use]
    pub fn transform(&self, affine: Affine) -> Self {
        match self {
            Self::Line(line) => Self::Line(affine * *line),
            Self::Quad(quad) => Self::Quad(affine * *quad),
        }
    }
}

impl From<Segment> for PathSeg {
    fn from(value: Segment) -> Self {
        match value {
            Segment::Line(line) => PathSeg::Line(line),
            Segment::Quad(quad) => PathSeg::Quad(quad),
        }
    }
}

/// Iterator over the segments of a
/// [`NormalizedContour`](super::NormalizedContour).
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    current: Point,
    steps: core::slice::Iter<'a, Step>,
}

impl<'a> Segments<'a> {
    pub(super) fn new(start: Point, steps: &'a [Step]) -> Self {
        Self {
            current: start,
            steps: steps.iter(),
        }
    }
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.steps.next()?;
        let p0 = self.current;
        self.current = step.end();
        Some(match *step {
            Step::Line { to } => Segment::line(p0, to),
            Step::Quad { ctrl, to } => Segment::quad(p0, ctrl, to),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

impl ExactSizeIterator for Segments<'_> {}

#[derive(Copy, Clone)]
enum ScanState {
    /// Nothing consumed yet.
    Start,
    /// Last point consumed was on-curve.
    OnCurve(Point),
    /// An on-curve point followed by a single pending control point.
    PendingQuad(Point, Point),
}

/// Splits an already closed point sequence into segments.
///
/// The sequence must start on an on-curve point, must not contain two
/// consecutive off-curve points and must end on an on-curve point; this is
/// exactly what [`NormalizedContour::points`](super::NormalizedContour::points)
/// yields. Anything else is reported with the index of the offending point.
pub fn segment(points: &[ContourPoint]) -> Result<Vec<Segment>, DecomposeError> {
    let mut segments = Vec::with_capacity(points.len());
    let mut state = ScanState::Start;
    for (ix, point) in points.iter().enumerate() {
        let p = point.point;
        state = match (state, point.tag) {
            (_, CurveTag::CubicControl) => return Err(DecomposeError::UnsupportedCubic(ix)),
            (ScanState::Start, CurveTag::OnCurve) => ScanState::OnCurve(p),
            (ScanState::Start, CurveTag::ConicControl) => {
                return Err(DecomposeError::ExpectedOnCurve(ix))
            }
            (ScanState::OnCurve(p0), CurveTag::OnCurve) => {
                segments.push(Segment::line(p0, p));
                ScanState::OnCurve(p)
            }
            (ScanState::OnCurve(p0), CurveTag::ConicControl) => ScanState::PendingQuad(p0, p),
            (ScanState::PendingQuad(p0, ctrl), CurveTag::OnCurve) => {
                segments.push(Segment::quad(p0, ctrl, p));
                ScanState::OnCurve(p)
            }
            (ScanState::PendingQuad(..), CurveTag::ConicControl) => {
                return Err(DecomposeError::ExpectedOnCurve(ix))
            }
        };
    }
    if let ScanState::PendingQuad(..) = state {
        return Err(DecomposeError::TruncatedCurve(points.len() - 1));
    }
    Ok(segments)
}
