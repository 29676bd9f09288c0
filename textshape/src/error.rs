//! Error types.

use std::path::PathBuf;

use read_fonts::{types::GlyphId, ReadError};
use skrifa::outline::DrawError;
use thiserror::Error;

/// Errors that may occur when acquiring a font face.
///
/// All of these are fatal to the face; no partial state is kept.
#[derive(Debug, Error)]
pub enum FaceError {
    #[error("font file '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read font file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported font format: {0}")]
    UnsupportedFormat(String),

    #[error("corrupt font file: {0}")]
    CorruptFile(String),

    #[error("invalid nominal size {0}, expected a finite positive value")]
    InvalidSize(f32),
}

/// Errors raised while decomposing a single contour.
///
/// Point indices refer to the outline the contour belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecomposeError {
    #[error("end point of contour {0} is out of order or out of range")]
    ContourOrder(usize),

    #[error("outline has {num_points} points but {num_tags} tags")]
    PointTagMismatch { num_points: usize, num_tags: usize },

    #[error("contour has no points")]
    EmptyContour,

    #[error("cubic control point at index {0} is not supported")]
    UnsupportedCubic(usize),

    #[error("expected an on-curve point at index {0}")]
    ExpectedOnCurve(usize),

    #[error("curve starting before index {0} has no on-curve end point")]
    TruncatedCurve(usize),
}

impl DecomposeError {
    /// Shifts any point index carried by the error by `offset`.
    pub(crate) fn offset_by(self, offset: usize) -> Self {
        match self {
            Self::UnsupportedCubic(ix) => Self::UnsupportedCubic(ix + offset),
            Self::ExpectedOnCurve(ix) => Self::ExpectedOnCurve(ix + offset),
            Self::TruncatedCurve(ix) => Self::TruncatedCurve(ix + offset),
            other => other,
        }
    }
}

/// Errors that may occur when loading a glyph outline from a font.
#[derive(Clone, Debug, Error)]
pub enum ProviderError {
    #[error("failed to read glyph data: {0}")]
    Read(#[from] ReadError),

    #[error("failed to draw glyph: {0}")]
    Draw(DrawError),

    #[error("recursion limit exceeded when loading composite component {0}")]
    RecursionLimitExceeded(GlyphId),

    #[error("invalid anchor point index ({1}) for composite glyph {0}")]
    InvalidAnchorPoint(GlyphId, u16),
}

impl From<DrawError> for ProviderError {
    fn from(value: DrawError) -> Self {
        Self::Draw(value)
    }
}

/// What went wrong with a [`GlyphError`].
#[derive(Clone, Debug, Error)]
pub enum GlyphErrorKind {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Decompose(#[from] DecomposeError),
}

/// A recoverable failure for one character of a laid out string.
///
/// The pen position is unaffected by the failure, so the caller may skip
/// the glyph and continue with the rest of the string.
#[derive(Clone, Debug, Error)]
#[error("glyph for {character:?} at index {index}{}: {kind}", contour_suffix(.contour))]
pub struct GlyphError {
    /// The offending character.
    pub character: char,
    /// Index of the character in the input string, counted in chars.
    pub index: usize,
    /// Index of the malformed contour, if the failure was contour specific.
    pub contour: Option<usize>,
    #[source]
    pub kind: GlyphErrorKind,
}

fn contour_suffix(contour: &Option<usize>) -> String {
    contour
        .map(|ix| format!(", contour {ix}"))
        .unwrap_or_default()
}

impl GlyphError {
    pub(crate) fn provider(character: char, index: usize, error: ProviderError) -> Self {
        Self {
            character,
            index,
            contour: None,
            kind: error.into(),
        }
    }

    pub(crate) fn decompose(
        character: char,
        index: usize,
        contour: usize,
        error: DecomposeError,
    ) -> Self {
        Self {
            character,
            index,
            contour: Some(contour),
            kind: error.into(),
        }
    }
}

/// Errors that abort a layout call.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid scale: height {height} over line height {line_height}")]
    InvalidScale { height: f64, line_height: f64 },

    #[error("invalid tracking {0}, expected a finite value")]
    InvalidTracking(f64),

    #[error(transparent)]
    Face(#[from] FaceError),

    #[error(transparent)]
    Glyph(#[from] GlyphError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_only_point_indices() {
        assert_eq!(
            DecomposeError::ExpectedOnCurve(2).offset_by(10),
            DecomposeError::ExpectedOnCurve(12)
        );
        assert_eq!(
            DecomposeError::ContourOrder(2).offset_by(10),
            DecomposeError::ContourOrder(2)
        );
        assert_eq!(
            DecomposeError::EmptyContour.offset_by(10),
            DecomposeError::EmptyContour
        );
    }

    #[test]
    fn glyph_error_message() {
        let err = GlyphError::decompose('O', 3, 1, DecomposeError::TruncatedCurve(7));
        assert_eq!(
            err.to_string(),
            "glyph for 'O' at index 3, contour 1: curve starting before index 7 has no on-curve end point"
        );
        let err = GlyphError::provider(
            'A',
            0,
            ProviderError::RecursionLimitExceeded(GlyphId::new(4)),
        );
        assert_eq!(
            err.to_string(),
            "glyph for 'A' at index 0: recursion limit exceeded when loading composite component GID_4"
        );
    }
}
