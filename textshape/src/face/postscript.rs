//! PostScript (CFF and CFF2) outlines.
//!
//! These are cubic outlines. They are drawn through skrifa into a pen that
//! records points with their tags, so the cubic control points reach the
//! normalizer and are rejected there.

use read_fonts::types::{GlyphId, Point};
use skrifa::{
    outline::{DrawSettings, OutlinePen},
    prelude::{LocationRef, Size},
    OutlineGlyphCollection,
};

use crate::{
    error::ProviderError,
    outline::{CurveTag, RawOutline},
};

/// Pen that rebuilds point, tag and contour end arrays from path commands.
#[derive(Default)]
pub(crate) struct TagRecorder {
    outline: RawOutline,
    contour_start: usize,
}

impl TagRecorder {
    fn push(&mut self, x: f32, y: f32, tag: CurveTag) {
        self.outline
            .points
            .push(Point::new(x.round() as i32, y.round() as i32));
        self.outline.tags.push(tag);
    }

    fn finish_contour(&mut self) {
        let outline = &mut self.outline;
        let len = outline.points.len() - self.contour_start;
        // an explicit line back to the start duplicates the first point
        if len > 1
            && outline.tags.last() == Some(&CurveTag::OnCurve)
            && outline.points.last() == outline.points.get(self.contour_start)
        {
            outline.points.pop();
            outline.tags.pop();
        }
        if outline.points.len() > self.contour_start {
            outline.contour_ends.push(outline.points.len() - 1);
        }
        self.contour_start = outline.points.len();
    }

    pub fn finish(mut self) -> RawOutline {
        self.finish_contour();
        self.outline
    }
}

impl OutlinePen for TagRecorder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.finish_contour();
        self.push(x, y, CurveTag::OnCurve);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push(x, y, CurveTag::OnCurve);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.push(cx0, cy0, CurveTag::ConicControl);
        self.push(x, y, CurveTag::OnCurve);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.push(cx0, cy0, CurveTag::CubicControl);
        self.push(cx1, cy1, CurveTag::CubicControl);
        self.push(x, y, CurveTag::OnCurve);
    }

    fn close(&mut self) {
        self.finish_contour();
    }
}

/// Draws `glyph_id` unscaled and returns the recorded outline.
pub(crate) fn outline(
    outlines: &OutlineGlyphCollection,
    glyph_id: GlyphId,
) -> Result<RawOutline, ProviderError> {
    let Some(glyph) = outlines.get(glyph_id) else {
        return Ok(RawOutline::new());
    };
    let mut recorder = TagRecorder::default();
    glyph.draw(
        DrawSettings::unhinted(Size::unscaled(), LocationRef::default()),
        &mut recorder,
    )?;
    Ok(recorder.finish())
}
