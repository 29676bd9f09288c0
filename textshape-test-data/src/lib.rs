//! Test data shared between the textshape crates.
//!
//! Fonts are compiled in memory from a small fixed glyph set so that tests
//! can reason about exact coordinates. [`FontBuilder`] allows tweaking the
//! font for individual tests.

pub mod kern;

use std::error::Error;

use read_fonts::{tables::glyf::CurvePoint, FontRef};
use write_fonts::{
    tables::{
        cmap::Cmap,
        glyf::{
            Anchor, Bbox, Component as GlyfComponent, ComponentFlags, CompositeGlyph,
            Contour as GlyfContour, Glyf, GlyfLocaBuilder, SimpleGlyph, Transform,
        },
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        loca::{Loca, LocaFormat},
        maxp::Maxp,
    },
    types::{F2Dot14, FWord, GlyphId, GlyphId16, Tag, UfWord},
};

/// Glyph identifiers of the default glyph set.
pub mod glyphs {
    pub const NOTDEF: u32 = 0;
    pub const SPACE: u32 = 1;
    /// Two triangles.
    pub const A: u32 = 2;
    /// Six on-curve points.
    pub const V: u32 = 3;
    /// Only two on-curve points; consecutive off-curve points on both sides.
    pub const O: u32 = 4;
    /// Starts with an off-curve point.
    pub const C: u32 = 5;
    /// 100 x 100 square at the origin.
    pub const DIERESIS: u32 = 6;
    /// Composite of [`A`] and [`DIERESIS`].
    pub const A_DIERESIS: u32 = 7;
    /// First glyph added by [`FontBuilder`](super::FontBuilder) methods.
    pub const CUSTOM: u32 = 8;
}

/// Advance of `.notdef`, also used for unmapped characters.
pub const NOTDEF_ADVANCE: u16 = 500;
pub const UNITS_PER_EM: u16 = 1000;
pub const ASCENDER: i16 = 800;
pub const DESCENDER: i16 = -200;
/// Kerning between `A` and `V` in [`kern::DEFAULT_FONT`].
pub const KERN_A_V: i16 = -80;
/// Kerning between `V` and `A` in [`kern::DEFAULT_FONT`].
pub const KERN_V_A: i16 = -60;
/// Character mapped to [`glyphs::CUSTOM`].
pub const CUSTOM_CHAR: char = '\u{E000}';

/// Neither a TrueType font nor a collection.
#[rustfmt::skip]
pub static NOT_A_FONT: &[u8] = &[
    0x77, 0x4F, 0x46, 0x46, // signature 'wOFF'
    0x00, 0x00,             // numTables=0
    0x00, 0x00,             // searchRange
    0x00, 0x00,             // entrySelector
    0x00, 0x00,             // rangeShift
];

/// Header of a collection holding one font directly after it.
#[rustfmt::skip]
static TTC_HEADER: &[u8] = &[
    0x74, 0x74, 0x63, 0x66, // ttcTag 'ttcf'
    0x00, 0x01, 0x00, 0x00, // version=1.0
    0x00, 0x00, 0x00, 0x01, // numFonts=1
    0x00, 0x00, 0x00, 0x10, // tableDirectoryOffsets[0]=16
];

/// sfntVersion, numTables, searchRange, entrySelector, rangeShift
const TABLE_DIRECTORY_HEADER_LEN: usize = 12;
const TABLE_RECORD_LEN: usize = 16;
/// Position of the offset field inside a table record.
const TABLE_RECORD_OFFSET_POS: usize = 8;

const CFF: Tag = Tag::new(b"CFF ");
const KERN: Tag = Tag::new(b"kern");

/// Outline of one contour as `(x, y, on_curve)` triples.
pub type Contour = Vec<(i16, i16, bool)>;

#[derive(Clone, Debug)]
pub enum ComponentAnchor {
    Offset(i16, i16),
    /// Point in the glyph built so far and point in the component.
    Point(u16, u16),
}

#[derive(Clone, Debug)]
pub struct Component {
    pub glyph: u16,
    pub anchor: ComponentAnchor,
    pub scale: Option<f32>,
}

#[derive(Clone, Debug)]
pub enum GlyphData {
    Empty,
    Simple(Vec<Contour>),
    Composite(Vec<Component>),
}

#[derive(Clone, Debug)]
struct TestGlyph {
    advance: u16,
    data: GlyphData,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Outlines {
    TrueType,
    /// A placeholder `CFF ` table instead of `glyf` and `loca`.
    PostScript,
    None,
}

/// Assembles a TrueType font with `cmap`, `glyf`, `head`, `hhea`, `hmtx`,
/// `kern`, `loca` and `maxp` tables.
#[derive(Clone, Debug)]
pub struct FontBuilder {
    glyphs: Vec<TestGlyph>,
    cmap: Vec<(char, u32)>,
    kern: Option<&'static [u8]>,
    ascender: i16,
    descender: i16,
    line_gap: i16,
    outlines: Outlines,
}

impl Default for FontBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBuilder {
    /// Creates a builder holding the default glyph set.
    pub fn new() -> Self {
        let simple = |contours: &[&[(i16, i16, bool)]]| {
            GlyphData::Simple(contours.iter().map(|c| c.to_vec()).collect())
        };
        let glyphs = vec![
            TestGlyph {
                advance: NOTDEF_ADVANCE,
                data: GlyphData::Empty,
            },
            TestGlyph {
                advance: 250,
                data: GlyphData::Empty,
            },
            TestGlyph {
                advance: 600,
                data: simple(&[
                    &[(0, 0, true), (300, 700, true), (600, 0, true)],
                    &[(200, 100, true), (400, 100, true), (300, 300, true)],
                ]),
            },
            TestGlyph {
                advance: 600,
                data: simple(&[&[
                    (0, 700, true),
                    (100, 700, true),
                    (300, 150, true),
                    (500, 700, true),
                    (600, 700, true),
                    (350, 0, true),
                ]]),
            },
            TestGlyph {
                advance: 500,
                data: simple(&[&[
                    (250, 0, true),
                    (500, 0, false),
                    (500, 700, false),
                    (250, 700, true),
                    (0, 700, false),
                    (0, 0, false),
                ]]),
            },
            TestGlyph {
                advance: 400,
                data: simple(&[&[
                    (0, 0, false),
                    (300, 0, true),
                    (300, 300, true),
                    (0, 300, true),
                ]]),
            },
            TestGlyph {
                advance: 300,
                data: simple(&[&[(0, 0, true), (0, 100, true), (100, 100, true), (100, 0, true)]]),
            },
            TestGlyph {
                advance: 600,
                data: GlyphData::Composite(vec![
                    Component {
                        glyph: glyphs::A as u16,
                        anchor: ComponentAnchor::Offset(0, 0),
                        scale: None,
                    },
                    Component {
                        glyph: glyphs::DIERESIS as u16,
                        anchor: ComponentAnchor::Offset(250, 800),
                        scale: None,
                    },
                ]),
            },
        ];
        let cmap = vec![
            (' ', glyphs::SPACE),
            ('A', glyphs::A),
            ('C', glyphs::C),
            ('O', glyphs::O),
            ('V', glyphs::V),
            ('\u{A8}', glyphs::DIERESIS),
            ('\u{C4}', glyphs::A_DIERESIS),
        ];
        Self {
            glyphs,
            cmap,
            kern: Some(kern::DEFAULT_FONT),
            ascender: ASCENDER,
            descender: DESCENDER,
            line_gap: 0,
            outlines: Outlines::TrueType,
        }
    }

    /// Appends a glyph, optionally mapped to `ch`.
    pub fn glyph(mut self, ch: Option<char>, advance: u16, data: GlyphData) -> Self {
        let gid = self.glyphs.len() as u32;
        self.glyphs.push(TestGlyph { advance, data });
        if let Some(ch) = ch {
            self.cmap.push((ch, gid));
        }
        self
    }

    /// Appends a glyph mapped to [`CUSTOM_CHAR`] holding `component` scaled
    /// uniformly and placed at `offset`.
    pub fn scaled_component_glyph(self, component: u32, scale: f32, offset: (i16, i16)) -> Self {
        self.glyph(
            Some(CUSTOM_CHAR),
            500,
            GlyphData::Composite(vec![Component {
                glyph: component as u16,
                anchor: ComponentAnchor::Offset(offset.0, offset.1),
                scale: Some(scale),
            }]),
        )
    }

    /// Appends a glyph mapped to [`CUSTOM_CHAR`] made of `A` and the
    /// dieresis, attached by matching points.
    pub fn anchored_component_glyph(self, base_point: u16, component_point: u16) -> Self {
        self.glyph(
            Some(CUSTOM_CHAR),
            600,
            GlyphData::Composite(vec![
                Component {
                    glyph: glyphs::A as u16,
                    anchor: ComponentAnchor::Offset(0, 0),
                    scale: None,
                },
                Component {
                    glyph: glyphs::DIERESIS as u16,
                    anchor: ComponentAnchor::Point(base_point, component_point),
                    scale: None,
                },
            ]),
        )
    }

    /// Appends a composite glyph mapped to [`CUSTOM_CHAR`] that references
    /// itself.
    pub fn self_referencing_glyph(self) -> Self {
        let gid = self.glyphs.len() as u16;
        self.glyph(
            Some(CUSTOM_CHAR),
            500,
            GlyphData::Composite(vec![Component {
                glyph: gid,
                anchor: ComponentAnchor::Offset(0, 0),
                scale: None,
            }]),
        )
    }

    pub fn without_kerning(mut self) -> Self {
        self.kern = None;
        self
    }

    /// Replaces the `kern` table with raw bytes, such as the fixtures in
    /// [`kern`].
    pub fn kern_table(mut self, data: &'static [u8]) -> Self {
        self.kern = Some(data);
        self
    }

    pub fn line_metrics(mut self, ascender: i16, descender: i16, line_gap: i16) -> Self {
        self.ascender = ascender;
        self.descender = descender;
        self.line_gap = line_gap;
        self
    }

    /// Drops the outline tables entirely.
    pub fn without_outlines(mut self) -> Self {
        self.outlines = Outlines::None;
        self
    }

    /// Replaces `glyf` and `loca` with an empty `CFF ` table.
    pub fn postscript_outlines(mut self) -> Self {
        self.outlines = Outlines::PostScript;
        self
    }

    /// Builds a single font file.
    ///
    /// # Panics
    ///
    /// Panics if a table fails to compile, for example when a glyph holds
    /// more points than `glyf` can address.
    pub fn build(&self) -> Vec<u8> {
        match self.compile() {
            Ok(data) => data,
            Err(e) => panic!("invalid test font: {e}"),
        }
    }

    /// Builds a font collection holding this font as its only member.
    pub fn build_collection(&self) -> Vec<u8> {
        let font = self.build();
        let num_tables = FontRef::new(&font)
            .map(|font| font.table_directory.num_tables() as usize)
            .unwrap_or_default();
        let mut data = [TTC_HEADER, &font].concat();
        // table offsets are relative to the start of the collection
        for ix in 0..num_tables {
            let pos = TTC_HEADER.len()
                + TABLE_DIRECTORY_HEADER_LEN
                + ix * TABLE_RECORD_LEN
                + TABLE_RECORD_OFFSET_POS;
            let field = &mut data[pos..pos + 4];
            let mut offset = [0; 4];
            offset.copy_from_slice(field);
            let shifted = u32::from_be_bytes(offset) + TTC_HEADER.len() as u32;
            field.copy_from_slice(&shifted.to_be_bytes());
        }
        data
    }

    fn compile(&self) -> Result<Vec<u8>, Box<dyn Error>> {
        let mut builder = write_fonts::FontBuilder::new();
        let mut index_to_loc_format = 0;
        match self.outlines {
            Outlines::TrueType => {
                let (glyf, loca, format) = self.glyf_and_loca()?;
                index_to_loc_format = format as i16;
                builder.add_table(&glyf)?.add_table(&loca)?;
            }
            Outlines::PostScript => {
                builder.add_raw(CFF, Vec::new());
            }
            Outlines::None => {}
        }
        let head = Head {
            units_per_em: UNITS_PER_EM,
            x_min: 0,
            y_min: self.descender,
            x_max: 600,
            y_max: self.ascender,
            lowest_rec_ppem: 8,
            index_to_loc_format,
            ..Default::default()
        };
        let hhea = Hhea {
            ascender: FWord::new(self.ascender),
            descender: FWord::new(self.descender),
            line_gap: FWord::new(self.line_gap),
            advance_width_max: UfWord::new(self.advance_max()),
            x_max_extent: FWord::new(600),
            caret_slope_rise: 1,
            number_of_h_metrics: self.glyphs.len() as u16,
            ..Default::default()
        };
        let maxp = Maxp {
            num_glyphs: self.glyphs.len() as u16,
            ..Default::default()
        };
        let hmtx = Hmtx::new(
            self.glyphs
                .iter()
                .map(|glyph| LongMetric::new(glyph.advance, 0))
                .collect(),
            Vec::new(),
        );
        let mappings = self.cmap.iter().map(|&(ch, gid)| (ch, GlyphId::new(gid)));
        let cmap = Cmap::from_mappings(mappings)?;
        builder
            .add_table(&head)?
            .add_table(&hhea)?
            .add_table(&maxp)?
            .add_table(&hmtx)?
            .add_table(&cmap)?;
        if let Some(kern) = self.kern {
            builder.add_raw(KERN, kern);
        }
        Ok(builder.build())
    }

    fn advance_max(&self) -> u16 {
        self.glyphs
            .iter()
            .map(|glyph| glyph.advance)
            .max()
            .unwrap_or_default()
    }

    fn glyf_and_loca(&self) -> Result<(Glyf, Loca, LocaFormat), Box<dyn Error>> {
        let mut builder = GlyfLocaBuilder::new();
        for glyph in &self.glyphs {
            match &glyph.data {
                GlyphData::Empty => builder.add_glyph(&SimpleGlyph::default())?,
                GlyphData::Simple(contours) => builder.add_glyph(&simple_glyph(contours))?,
                GlyphData::Composite(components) => builder.add_glyph(&composite_glyph(components))?,
            };
        }
        Ok(builder.build())
    }
}

/// Builds the default font.
pub fn simple_font() -> Vec<u8> {
    FontBuilder::new().build()
}

/// The default font, cut off inside its table directory.
pub fn truncated_font() -> Vec<u8> {
    let mut data = simple_font();
    data.truncate(20);
    data
}

/// Keeps every point as given, including implied on-curve points.
fn simple_glyph(contours: &[Contour]) -> SimpleGlyph {
    let mut glyph = SimpleGlyph {
        contours: contours
            .iter()
            .map(|contour| {
                GlyfContour::from(
                    contour
                        .iter()
                        .map(|&(x, y, on_curve)| CurvePoint::new(x, y, on_curve))
                        .collect::<Vec<_>>(),
                )
            })
            .collect(),
        ..Default::default()
    };
    glyph.recompute_bounding_box();
    glyph
}

/// Bounds of composites are not read, so they are left empty.
fn composite_glyph(components: &[Component]) -> CompositeGlyph {
    let mut components = components.iter().map(|component| {
        let anchor = match component.anchor {
            ComponentAnchor::Offset(x, y) => Anchor::Offset { x, y },
            ComponentAnchor::Point(base, component) => Anchor::Point { base, component },
        };
        let transform = match component.scale {
            Some(scale) => Transform {
                xx: F2Dot14::from_f32(scale),
                yy: F2Dot14::from_f32(scale),
                ..Default::default()
            },
            None => Transform::default(),
        };
        GlyfComponent::new(
            GlyphId16::new(component.glyph),
            anchor,
            transform,
            ComponentFlags::default(),
        )
    });
    let mut glyph = match components.next() {
        Some(first) => CompositeGlyph::new(first, Bbox::default()),
        None => panic!("composite test glyph without components"),
    };
    for component in components {
        glyph.add_component(component, Bbox::default());
    }
    glyph
}
