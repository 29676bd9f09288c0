//! Font backed glyph outlines.
//!
//! A [`Face`] owns the bytes of a font file and validates them once on
//! acquisition. Outlines, advances and kerning are read on demand through a
//! borrowed [`GlyphSource`].

mod glyf;
mod kern;
mod postscript;

use std::{fmt, path::Path, sync::Arc};

use read_fonts::{
    types::{GlyphId, Point, Tag},
    FontRef, ReadError, TableProvider,
};
use skrifa::{
    charmap::Charmap,
    metrics::GlyphMetrics as HorizontalMetrics,
    prelude::{LocationRef, Size},
    MetadataProvider, OutlineGlyphCollection,
};

use crate::{
    error::{FaceError, LayoutError, ProviderError},
    layout::{layout, LayoutOptions, TextGeometry},
    outline::RawOutline,
    provider::GlyphOutlineProvider,
};

pub use glyf::COMPOSITE_RECURSION_LIMIT;

const CFF: Tag = Tag::new(b"CFF ");
const CFF2: Tag = Tag::new(b"CFF2");

/// The kind of outlines stored in a face.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum OutlineFormat {
    /// Quadratic outlines in the `glyf` table.
    TrueType,
    /// Cubic outlines in the `CFF ` or `CFF2` table.
    PostScript,
}

/// A validated font face.
///
/// Clones share the underlying data.
#[derive(Clone)]
pub struct Face {
    data: Arc<[u8]>,
    nominal_size: f32,
    units_per_em: u16,
    line_height: f64,
    format: OutlineFormat,
}

impl Face {
    /// Reads and validates the font file at `path`.
    ///
    /// Collections resolve to their first face.
    pub fn open(path: impl AsRef<Path>, nominal_size: f32) -> Result<Self, FaceError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                FaceError::FileNotFound(path.to_owned())
            } else {
                FaceError::Io {
                    path: path.to_owned(),
                    source,
                }
            }
        })?;
        let face = Self::from_bytes(data, nominal_size)?;
        log::debug!(
            "opened '{}': {} units per em, line height {}, {:?} outlines",
            path.display(),
            face.units_per_em,
            face.line_height,
            face.format
        );
        Ok(face)
    }

    /// Validates in-memory font data.
    pub fn from_bytes(data: impl Into<Arc<[u8]>>, nominal_size: f32) -> Result<Self, FaceError> {
        if !nominal_size.is_finite() || nominal_size <= 0.0 {
            return Err(FaceError::InvalidSize(nominal_size));
        }
        let data = data.into();
        let font = FontRef::from_index(&data, 0).map_err(read_error)?;
        let units_per_em = font
            .head()
            .map_err(|e| FaceError::CorruptFile(format!("head table: {e}")))?
            .units_per_em();
        let format = outline_format(&font)?;
        let metrics = font.metrics(Size::unscaled(), LocationRef::default());
        let line_height = (metrics.ascent - metrics.descent + metrics.leading) as f64;
        if line_height <= 0.0 {
            return Err(FaceError::CorruptFile(format!(
                "line height {line_height} is not positive"
            )));
        }
        Ok(Self {
            data,
            nominal_size,
            units_per_em,
            line_height,
            format,
        })
    }

    /// Returns a provider for the glyphs of this face.
    pub fn source(&self) -> Result<GlyphSource<'_>, FaceError> {
        GlyphSource::new(self)
    }

    /// Lays out `text` with the glyphs of this face.
    pub fn layout(&self, text: &str, options: &LayoutOptions) -> Result<TextGeometry, LayoutError> {
        let source = self.source()?;
        layout(&source, text, options)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The size requested on acquisition.
    ///
    /// Outlines are always produced in unscaled design units; layout scale
    /// comes from [`LayoutOptions::height`].
    pub fn nominal_size(&self) -> f32 {
        self.nominal_size
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Ascent minus descent plus leading, in font design units.
    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    pub fn format(&self) -> OutlineFormat {
        self.format
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Face")
            .field("len", &self.data.len())
            .field("nominal_size", &self.nominal_size)
            .field("units_per_em", &self.units_per_em)
            .field("line_height", &self.line_height)
            .field("format", &self.format)
            .finish()
    }
}

fn read_error(err: ReadError) -> FaceError {
    match err {
        ReadError::InvalidSfnt(_) | ReadError::InvalidTtc(_) => {
            FaceError::UnsupportedFormat(err.to_string())
        }
        _ => FaceError::CorruptFile(err.to_string()),
    }
}

fn outline_format(font: &FontRef) -> Result<OutlineFormat, FaceError> {
    let has_table = |tag| font.table_data(tag).is_some();
    if has_table(Tag::new(b"glyf")) && has_table(Tag::new(b"loca")) {
        Ok(OutlineFormat::TrueType)
    } else if has_table(CFF) || has_table(CFF2) {
        Ok(OutlineFormat::PostScript)
    } else {
        Err(FaceError::UnsupportedFormat(
            "font has no glyf or CFF outlines".into(),
        ))
    }
}

enum Outlines<'a> {
    TrueType(glyf::GlyfOutlines<'a>),
    PostScript(OutlineGlyphCollection<'a>),
}

/// Glyph data of a [`Face`], looked up by character.
pub struct GlyphSource<'a> {
    charmap: Charmap<'a>,
    metrics: HorizontalMetrics<'a>,
    outlines: Outlines<'a>,
    kern: kern::Kern<'a>,
    line_height: f64,
}

impl<'a> GlyphSource<'a> {
    fn new(face: &'a Face) -> Result<Self, FaceError> {
        let font = FontRef::from_index(&face.data, 0).map_err(read_error)?;
        let outlines = match face.format {
            OutlineFormat::TrueType => Outlines::TrueType(
                glyf::GlyfOutlines::new(&font)
                    .map_err(|e| FaceError::CorruptFile(format!("glyf outlines: {e}")))?,
            ),
            OutlineFormat::PostScript => Outlines::PostScript(font.outline_glyphs()),
        };
        let kern = match font.kern() {
            Ok(table) => kern::Kern::new(&table),
            Err(ReadError::TableIsMissing(_)) => Default::default(),
            Err(e) => {
                log::warn!("ignoring malformed kern table: {e}");
                Default::default()
            }
        };
        Ok(Self {
            charmap: font.charmap(),
            metrics: font.glyph_metrics(Size::unscaled(), LocationRef::default()),
            outlines,
            kern,
            line_height: face.line_height,
        })
    }

    /// Returns the glyph mapped to `ch`, if any.
    pub fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.charmap.map(ch)
    }

    /// Loads the outline of a glyph by identifier.
    pub fn glyph_outline(&self, glyph_id: GlyphId) -> Result<RawOutline, ProviderError> {
        match &self.outlines {
            Outlines::TrueType(glyf) => glyf.outline(glyph_id),
            Outlines::PostScript(outlines) => postscript::outline(outlines, glyph_id),
        }
    }
}

impl GlyphOutlineProvider for GlyphSource<'_> {
    fn line_height(&self) -> f64 {
        self.line_height
    }

    fn outline(&self, ch: char) -> Result<RawOutline, ProviderError> {
        match self.glyph_id(ch) {
            Some(glyph_id) => self.glyph_outline(glyph_id),
            None => {
                log::warn!("no glyph for {ch:?} (U+{:04X})", ch as u32);
                Ok(RawOutline::new())
            }
        }
    }

    fn advance(&self, ch: char) -> i32 {
        let glyph_id = self.glyph_id(ch).unwrap_or(GlyphId::NOTDEF);
        self.metrics
            .advance_width(glyph_id)
            .map(|advance| advance.round() as i32)
            .unwrap_or_default()
    }

    fn kerning(&self, prev: char, ch: char) -> Point<i32> {
        if self.kern.is_empty() {
            return Point::default();
        }
        match (self.glyph_id(prev), self.glyph_id(ch)) {
            (Some(left), Some(right)) => Point::new(self.kern.kerning(left, right), 0),
            _ => Point::default(),
        }
    }
}
