//! Glyph outline decomposition and baseline layout.
//!
//! Textshape turns a string into positioned 2D outline geometry made of
//! straight lines and quadratic Bézier curves, suitable for building wires,
//! faces or extrusions in a geometry kernel.
//!
//! The pipeline has three stages:
//!
//! * a [`GlyphOutlineProvider`] supplies raw outlines, advances and kerning
//!   for each character; [`Face`] provides these from a TrueType font,
//! * each contour is [normalized](outline::RawContour::normalize) so that it
//!   never holds two consecutive off-curve points, then split into
//!   [`Segment`]s,
//! * the [`layout()`] function walks the string, scales each glyph to the
//!   requested text height and places it along the baseline.
//!
//! Logging goes through the [`log`] facade; no logger is installed.

#![forbid(unsafe_code)]

pub mod error;
pub mod face;
pub mod layout;
pub mod outline;
pub mod pen;
pub mod provider;

#[cfg(test)]
mod testing;

pub use error::{DecomposeError, FaceError, GlyphError, LayoutError, ProviderError};
pub use face::{Face, GlyphSource, OutlineFormat};
pub use layout::{
    layout, GlyphGeometry, GlyphLayout, LayoutOptions, MalformedGlyphPolicy, Scale, TextGeometry,
};
pub use outline::{CurveTag, RawOutline, Segment};
pub use pen::OutlinePen;
pub use provider::{GlyphMetrics, GlyphOutlineProvider};

/// Expose the underlying parser crates.
pub extern crate read_fonts as raw;
pub extern crate skrifa;
