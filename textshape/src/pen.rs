//! Types for collecting positioned glyph geometry.

use kurbo::BezPath;

use crate::outline::Segment;

/// Interface for accepting a sequence of path commands.
///
/// This is the boundary to whatever builds renderable geometry from the
/// laid out segments.
pub trait OutlinePen {
    /// Emit a command to begin a new subpath at (x, y).
    fn move_to(&mut self, x: f64, y: f64);

    /// Emit a line segment from the current point to (x, y).
    fn line_to(&mut self, x: f64, y: f64);

    /// Emit a quadratic bezier segment from the current point with a control
    /// point at (cx0, cy0) and ending at (x, y).
    fn quad_to(&mut self, cx0: f64, cy0: f64, x: f64, y: f64);

    /// Emit a command to close the current subpath.
    fn close(&mut self);
}

impl OutlinePen for BezPath {
    fn move_to(&mut self, x: f64, y: f64) {
        BezPath::move_to(self, (x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        BezPath::line_to(self, (x, y));
    }

    fn quad_to(&mut self, cx0: f64, cy0: f64, x: f64, y: f64) {
        BezPath::quad_to(self, (cx0, cy0), (x, y));
    }

    fn close(&mut self) {
        self.close_path();
    }
}

impl<T: OutlinePen + ?Sized> OutlinePen for &mut T {
    fn move_to(&mut self, x: f64, y: f64) {
        (**self).move_to(x, y)
    }

    fn line_to(&mut self, x: f64, y: f64) {
        (**self).line_to(x, y)
    }

    fn quad_to(&mut self, cx0: f64, cy0: f64, x: f64, y: f64) {
        (**self).quad_to(cx0, cy0, x, y)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Replays one closed contour into a pen.
///
/// Empty contours emit nothing.
pub fn draw_contour(contour: &[Segment], pen: &mut impl OutlinePen) {
    let Some(first) = contour.first() else {
        return;
    };
    let start = first.start();
    pen.move_to(start.x, start.y);
    for segment in contour {
        match segment {
            Segment::Line(line) => pen.line_to(line.p1.x, line.p1.y),
            Segment::Quad(quad) => pen.quad_to(quad.p1.x, quad.p1.y, quad.p2.x, quad.p2.y),
        }
    }
    pen.close();
}
