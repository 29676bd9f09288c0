//! Raw TrueType outlines.
//!
//! Simple glyphs are read point for point with their on-curve flags so that
//! the implied on-curve points are left for the normalizer. Composite glyphs
//! are flattened into a single outline.

use kurbo::{Affine, Point, Vec2};
use read_fonts::{
    tables::{
        glyf::{Anchor, Component, CompositeGlyph, CompositeGlyphFlags, Glyf, Glyph, SimpleGlyph},
        loca::Loca,
    },
    types::GlyphId,
    FontRef, ReadError, TableProvider,
};

use crate::{
    error::ProviderError,
    outline::{CurveTag, RawOutline},
};

/// Maximum nesting depth of composite glyphs.
pub const COMPOSITE_RECURSION_LIMIT: usize = 32;

#[derive(Clone)]
pub(crate) struct GlyfOutlines<'a> {
    loca: Loca<'a>,
    glyf: Glyf<'a>,
}

/// Outline under construction, with coordinates kept unrounded until all
/// component transforms have been applied.
#[derive(Default)]
struct Accumulator {
    points: Vec<Point>,
    tags: Vec<CurveTag>,
    contour_ends: Vec<usize>,
}

impl Accumulator {
    fn into_outline(self) -> RawOutline {
        RawOutline {
            points: self
                .points
                .iter()
                .map(|p| read_fonts::types::Point::new(p.x.round() as i32, p.y.round() as i32))
                .collect(),
            tags: self.tags,
            contour_ends: self.contour_ends,
        }
    }
}

impl<'a> GlyfOutlines<'a> {
    pub fn new(font: &FontRef<'a>) -> Result<Self, ReadError> {
        Ok(Self {
            loca: font.loca(None)?,
            glyf: font.glyf()?,
        })
    }

    /// Loads the outline of `glyph_id`, flattening composites.
    pub fn outline(&self, glyph_id: GlyphId) -> Result<RawOutline, ProviderError> {
        let mut acc = Accumulator::default();
        self.load(glyph_id, 0, &mut acc)?;
        Ok(acc.into_outline())
    }

    fn load(
        &self,
        glyph_id: GlyphId,
        recurse_depth: usize,
        acc: &mut Accumulator,
    ) -> Result<(), ProviderError> {
        if recurse_depth > COMPOSITE_RECURSION_LIMIT {
            return Err(ProviderError::RecursionLimitExceeded(glyph_id));
        }
        match self.loca.get_glyf(glyph_id, &self.glyf)? {
            Some(Glyph::Simple(simple)) => load_simple(&simple, acc),
            Some(Glyph::Composite(composite)) => {
                self.load_composite(&composite, glyph_id, recurse_depth, acc)
            }
            // empty glyphs, such as space
            None => Ok(()),
        }
    }

    fn load_composite(
        &self,
        glyph: &CompositeGlyph,
        glyph_id: GlyphId,
        recurse_depth: usize,
        acc: &mut Accumulator,
    ) -> Result<(), ProviderError> {
        // points loaded before this composite are not available to anchors
        let point_base = acc.points.len();
        for component in glyph.components() {
            let start_point = acc.points.len();
            self.load(GlyphId::from(component.glyph), recurse_depth + 1, acc)?;
            let (transform, have_xform) = component_transform(&component);
            if have_xform {
                for point in &mut acc.points[start_point..] {
                    *point = transform * *point;
                }
            }
            let offset = match component.anchor {
                Anchor::Offset { x, y } => {
                    let mut offset = Vec2::new(x as f64, y as f64);
                    if have_xform
                        && component.flags
                            & (CompositeGlyphFlags::SCALED_COMPONENT_OFFSET
                                | CompositeGlyphFlags::UNSCALED_COMPONENT_OFFSET)
                            == CompositeGlyphFlags::SCALED_COMPONENT_OFFSET
                    {
                        let [xx, yx, xy, yy, ..] = transform.as_coeffs();
                        offset.x *= xx.hypot(xy);
                        offset.y *= yy.hypot(yx);
                    }
                    offset
                }
                Anchor::Point { base, component } => {
                    let base_point = acc.points[point_base..start_point]
                        .get(base as usize)
                        .copied()
                        .ok_or(ProviderError::InvalidAnchorPoint(glyph_id, base))?;
                    let component_point = acc.points[start_point..]
                        .get(component as usize)
                        .copied()
                        .ok_or(ProviderError::InvalidAnchorPoint(glyph_id, component))?;
                    base_point - component_point
                }
            };
            for point in &mut acc.points[start_point..] {
                *point += offset;
            }
        }
        Ok(())
    }
}

fn load_simple(glyph: &SimpleGlyph, acc: &mut Accumulator) -> Result<(), ProviderError> {
    let point_base = acc.points.len();
    for point in glyph.points() {
        acc.points.push(Point::new(point.x as f64, point.y as f64));
        acc.tags.push(CurveTag::from(point.on_curve));
    }
    if acc.points.len() - point_base != glyph.num_points() {
        return Err(ReadError::MalformedData("glyph point data is truncated").into());
    }
    acc.contour_ends.extend(
        glyph
            .end_pts_of_contours()
            .iter()
            .map(|end| point_base + end.get() as usize),
    );
    Ok(())
}

/// Returns the linear part of the component transform and whether the
/// component has one at all.
fn component_transform(component: &Component) -> (Affine, bool) {
    let have_xform = component.flags.intersects(
        CompositeGlyphFlags::WE_HAVE_A_SCALE
            | CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE
            | CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO,
    );
    let xform = &component.transform;
    let transform = Affine::new([
        xform.xx.to_f32() as f64,
        xform.yx.to_f32() as f64,
        xform.xy.to_f32() as f64,
        xform.yy.to_f32() as f64,
        0.0,
        0.0,
    ]);
    (transform, have_xform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use read_fonts::types::Point as RawPoint;
    use textshape_test_data::{glyphs, FontBuilder};

    fn outline(data: &[u8], gid: u32) -> Result<RawOutline, ProviderError> {
        let font = FontRef::new(data).unwrap();
        GlyfOutlines::new(&font)
            .unwrap()
            .outline(GlyphId::new(gid))
    }

    #[test]
    fn simple_glyph_keeps_off_curve_points() {
        let data = textshape_test_data::simple_font();
        let o = outline(&data, glyphs::O).unwrap();
        assert_eq!(o.contour_ends, [5]);
        assert_eq!(
            o.tags,
            [true, false, false, true, false, false].map(CurveTag::from)
        );
        assert_eq!(o.points[2], RawPoint::new(500, 700));
    }

    #[test]
    fn empty_glyph() {
        let data = textshape_test_data::simple_font();
        assert!(outline(&data, glyphs::SPACE).unwrap().is_empty());
    }

    #[test]
    fn composite_is_flattened() {
        let data = textshape_test_data::simple_font();
        let a = outline(&data, glyphs::A).unwrap();
        let a_dieresis = outline(&data, glyphs::A_DIERESIS).unwrap();
        assert_eq!(a_dieresis.num_contours(), a.num_contours() + 1);
        assert_eq!(&a_dieresis.points[..a.points.len()], &a.points[..]);
        // the dieresis square is moved by the component offset
        let last_contour = a_dieresis.contour(a_dieresis.num_contours() - 1).unwrap();
        assert_eq!(last_contour.points()[0], RawPoint::new(250, 800));
        assert_eq!(last_contour.start(), a.points.len());
    }

    #[test]
    fn scaled_component() {
        // dieresis scaled by 1.5 at (10, 20)
        let data = FontBuilder::new()
            .scaled_component_glyph(glyphs::DIERESIS, 1.5, (10, 20))
            .build();
        let scaled = outline(&data, glyphs::CUSTOM).unwrap();
        assert_eq!(
            scaled.points,
            [
                RawPoint::new(10, 20),
                RawPoint::new(10, 170),
                RawPoint::new(160, 170),
                RawPoint::new(160, 20),
            ]
        );
    }

    #[test]
    fn recursion_limit() {
        let data = FontBuilder::new().self_referencing_glyph().build();
        assert!(matches!(
            outline(&data, glyphs::CUSTOM),
            Err(ProviderError::RecursionLimitExceeded(_))
        ));
    }

    #[test]
    fn out_of_range_glyph() {
        let data = textshape_test_data::simple_font();
        assert!(matches!(
            outline(&data, 1000),
            Err(ProviderError::Read(_))
        ));
    }
}
