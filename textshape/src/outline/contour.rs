//! Contour normalization.
//!
//! TrueType allows any number of consecutive quadratic control points with
//! an implied on-curve point halfway between each pair. Normalization makes
//! those implied points explicit and closes the contour so that it can be
//! read as a simple chain of lines and single-control quadratic curves.

use kurbo::Point;
use read_fonts::types::Point as RawPoint;

use super::{ContourPoint, CurveTag, Segments};
use crate::error::DecomposeError;

/// One element of a normalized contour, ending on an on-curve point.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Step {
    /// Straight line to the given point.
    Line { to: Point },
    /// Quadratic curve through a single control point.
    Quad { ctrl: Point, to: Point },
}

impl Step {
    /// The on-curve point this step ends on.
    pub fn end(&self) -> Point {
        match self {
            Self::Line { to } | Self::Quad { to, .. } => *to,
        }
    }
}

/// A closed contour with no two consecutive off-curve points.
///
/// The contour is stored as an on-curve start point followed by steps that
/// each end on an on-curve point. The last step always ends back on the
/// start point.
#[derive(Clone, PartialEq, Debug)]
pub struct NormalizedContour {
    start: Point,
    steps: Vec<Step>,
}

impl NormalizedContour {
    /// The on-curve point the contour starts (and ends) on.
    pub fn start(&self) -> Point {
        self.start
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of distinct on-curve points, which equals the number of
    /// segments.
    pub fn num_on_curve(&self) -> usize {
        self.steps.len()
    }

    /// Returns the normalized point sequence, including the trailing copy of
    /// the start point that closes the contour.
    pub fn points(&self) -> impl Iterator<Item = ContourPoint> + '_ {
        let start = core::iter::once(ContourPoint::new(self.start, CurveTag::OnCurve));
        start.chain(self.steps.iter().flat_map(|step| {
            let (ctrl, to) = match *step {
                Step::Line { to } => (None, to),
                Step::Quad { ctrl, to } => (Some(ctrl), to),
            };
            ctrl.map(|ctrl| ContourPoint::new(ctrl, CurveTag::ConicControl))
                .into_iter()
                .chain(core::iter::once(ContourPoint::new(to, CurveTag::OnCurve)))
        }))
    }

    /// Returns an iterator over the segments of the contour.
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(self.start, &self.steps)
    }
}

/// Normalizes a single contour given as parallel point and tag slices.
///
/// A contour that starts with an off-curve point is rotated to begin at its
/// first on-curve point. If it has no on-curve point at all, it begins at
/// the implied midpoint between its last and first points.
pub(super) fn normalize(
    points: &[RawPoint<i32>],
    tags: &[CurveTag],
) -> Result<NormalizedContour, DecomposeError> {
    if points.len() != tags.len() {
        return Err(DecomposeError::PointTagMismatch {
            num_points: points.len(),
            num_tags: tags.len(),
        });
    }
    if points.is_empty() {
        return Err(DecomposeError::EmptyContour);
    }
    if let Some(ix) = tags.iter().position(|tag| *tag == CurveTag::CubicControl) {
        return Err(DecomposeError::UnsupportedCubic(ix));
    }
    let to_point = |p: &RawPoint<i32>| Point::new(p.x as f64, p.y as f64);
    let len = points.len();
    let (start, first_ix, count) = match tags.iter().position(|tag| tag.is_on_curve()) {
        // skip the start point itself; it is revisited when closing
        Some(ix) => (to_point(&points[ix]), ix + 1, len - 1),
        None => {
            let first = to_point(&points[0]);
            let last = to_point(&points[len - 1]);
            (last.midpoint(first), 0, len)
        }
    };
    let rotated = (first_ix..first_ix + count)
        .map(|ix| ix % len)
        .map(|ix| (to_point(&points[ix]), tags[ix]));
    let mut steps = Vec::with_capacity(len);
    let mut pending: Option<Point> = None;
    for (point, tag) in rotated {
        match (pending, tag.is_on_curve()) {
            (None, true) => steps.push(Step::Line { to: point }),
            (None, false) => pending = Some(point),
            (Some(ctrl), true) => {
                steps.push(Step::Quad { ctrl, to: point });
                pending = None;
            }
            (Some(ctrl), false) => {
                // two controls in a row imply an on-curve point between them
                steps.push(Step::Quad {
                    ctrl,
                    to: ctrl.midpoint(point),
                });
                pending = Some(point);
            }
        }
    }
    steps.push(match pending {
        Some(ctrl) => Step::Quad { ctrl, to: start },
        None => Step::Line { to: start },
    });
    log::trace!(
        "normalized contour: {} points in, {} on-curve out",
        points.len(),
        steps.len()
    );
    Ok(NormalizedContour { start, steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn contour(points: &[(i32, i32, bool)]) -> (Vec<RawPoint<i32>>, Vec<CurveTag>) {
        points
            .iter()
            .map(|&(x, y, on)| (RawPoint::new(x, y), CurveTag::from(on)))
            .unzip()
    }

    fn normalized(points: &[(i32, i32, bool)]) -> Vec<ContourPoint> {
        let (points, tags) = contour(points);
        normalize(&points, &tags).unwrap().points().collect()
    }

    fn expected(points: &[(f64, f64, bool)]) -> Vec<ContourPoint> {
        points
            .iter()
            .map(|&(x, y, on)| ContourPoint::new((x, y), CurveTag::from(on)))
            .collect()
    }

    #[test]
    fn already_normalized_is_only_closed() {
        let input = [
            (0, 0, true),
            (50, 100, false),
            (100, 0, true),
            (100, -50, true),
            (50, -80, false),
        ];
        let result = normalized(&input);
        let mut closed = input.to_vec();
        closed.push(input[0]);
        let closed = closed
            .iter()
            .map(|&(x, y, on)| (x as f64, y as f64, on))
            .collect::<Vec<_>>();
        assert_eq!(result, expected(&closed));
    }

    #[test]
    fn implied_point_at_exact_midpoint() {
        let result = normalized(&[(20, -20, true), (0, 0, false), (10, 10, false), (30, 0, true)]);
        assert_eq!(
            result,
            expected(&[
                (20.0, -20.0, true),
                (0.0, 0.0, false),
                (5.0, 5.0, true),
                (10.0, 10.0, false),
                (30.0, 0.0, true),
                (20.0, -20.0, true),
            ])
        );
    }

    #[test]
    fn implied_point_keeps_half_units() {
        let result = normalized(&[(0, 0, true), (1, 0, false), (2, 3, false)]);
        assert_eq!(result[2], ContourPoint::on_curve(1.5, 1.5));
    }

    #[test]
    fn trailing_control_closes_with_curve() {
        let (points, tags) = contour(&[(0, 0, true), (100, 0, true), (50, 50, false)]);
        let contour = normalize(&points, &tags).unwrap();
        assert_eq!(
            contour.steps(),
            &[
                Step::Line {
                    to: Point::new(100.0, 0.0)
                },
                Step::Quad {
                    ctrl: Point::new(50.0, 50.0),
                    to: Point::new(0.0, 0.0)
                },
            ]
        );
    }

    #[test]
    fn no_adjacent_off_curve_points() {
        let result = normalized(&[
            (0, 0, true),
            (10, 0, false),
            (20, 10, false),
            (20, 20, false),
            (10, 30, false),
            (0, 30, true),
        ]);
        for pair in result.windows(2) {
            assert!(pair[0].tag.is_on_curve() || pair[1].tag.is_on_curve());
        }
        assert_eq!(result.first(), result.last());
        assert_eq!(result.len(), 10);
    }

    #[test]
    fn off_curve_start_rotates_to_first_on_curve() {
        let result = normalized(&[(0, 0, false), (300, 0, true), (300, 300, true), (0, 300, true)]);
        assert_eq!(
            result,
            expected(&[
                (300.0, 0.0, true),
                (300.0, 300.0, true),
                (0.0, 300.0, true),
                (0.0, 0.0, false),
                (300.0, 0.0, true),
            ])
        );
    }

    #[test]
    fn all_off_curve_starts_at_implied_point() {
        // (640, 128) and (128, 128) imply a start at (384, 128)
        let result = normalized(&[
            (640, 128, false),
            (256, 64, false),
            (640, 64, false),
            (128, 128, false),
        ]);
        assert_eq!(
            result,
            expected(&[
                (384.0, 128.0, true),
                (640.0, 128.0, false),
                (448.0, 96.0, true),
                (256.0, 64.0, false),
                (448.0, 64.0, true),
                (640.0, 64.0, false),
                (384.0, 96.0, true),
                (128.0, 128.0, false),
                (384.0, 128.0, true),
            ])
        );
    }

    #[test]
    fn single_point_contour() {
        let result = normalized(&[(7, 7, true)]);
        assert_eq!(result, expected(&[(7.0, 7.0, true), (7.0, 7.0, true)]));
    }

    #[test]
    fn cubic_controls_are_rejected() {
        let points = [RawPoint::new(0, 0); 4];
        let tags = [
            CurveTag::OnCurve,
            CurveTag::CubicControl,
            CurveTag::CubicControl,
            CurveTag::OnCurve,
        ];
        assert!(matches!(
            normalize(&points, &tags),
            Err(DecomposeError::UnsupportedCubic(1))
        ));
    }

    #[test]
    fn empty_contour() {
        assert!(matches!(
            normalize(&[], &[]),
            Err(DecomposeError::EmptyContour)
        ));
    }
}
