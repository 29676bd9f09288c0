//! Pair kerning from the legacy `kern` table.
//!
//! Parsing is left to read-fonts, which understands both the Microsoft
//! header (16-bit version 0) and the Apple header (32-bit version 1.0).
//! This module decides which subtables take part and how their values
//! combine.

use read_fonts::{
    tables::kern::{Kern as KernTable, Subtable, Subtable0, SubtableKind},
    types::GlyphId,
};

/// Coverage bits that only exist in the Microsoft subtable header.
const MS_MINIMUM: u16 = 0x0002;
const MS_OVERRIDE: u16 = 0x0008;

/// A format 0 subtable that takes part in pair kerning.
#[derive(Clone)]
struct PairTable<'a> {
    pairs: Subtable0<'a>,
    replaces: bool,
}

/// The usable subtables of a `kern` table.
#[derive(Clone, Default)]
pub(crate) struct Kern<'a> {
    subtables: Vec<PairTable<'a>>,
}

impl<'a> Kern<'a> {
    /// Collects the format 0 horizontal subtables of a parsed table.
    ///
    /// Minimum, cross-stream and variation subtables are skipped, as are
    /// subtables that fail to parse.
    pub fn new(table: &KernTable<'a>) -> Self {
        let mut subtables = Vec::new();
        for (ix, subtable) in table.subtables().enumerate() {
            let subtable = match subtable {
                Ok(subtable) => subtable,
                Err(e) => {
                    log::warn!("ignoring kern subtables from {ix}: {e}");
                    break;
                }
            };
            let ms_coverage = match &subtable {
                Subtable::Ot(ot) => ot.coverage(),
                Subtable::Aat(_) => 0,
            };
            if !subtable.is_horizontal()
                || subtable.is_cross_stream()
                || subtable.is_variable()
                || ms_coverage & MS_MINIMUM != 0
            {
                log::debug!("skipping kern subtable {ix}");
                continue;
            }
            match subtable.kind() {
                Ok(SubtableKind::Format0(pairs)) => subtables.push(PairTable {
                    pairs,
                    replaces: ms_coverage & MS_OVERRIDE != 0,
                }),
                Ok(_) => log::debug!("skipping kern subtable {ix}: not format 0"),
                Err(e) => log::warn!("ignoring malformed kern subtable {ix}: {e}"),
            }
        }
        Self { subtables }
    }

    pub fn is_empty(&self) -> bool {
        self.subtables.is_empty()
    }

    /// Returns the horizontal adjustment for the pair, in font units.
    ///
    /// Values accumulate across subtables; a subtable with the override
    /// bit replaces what has been accumulated so far.
    pub fn kerning(&self, left: GlyphId, right: GlyphId) -> i32 {
        self.subtables.iter().fold(0, |value, subtable| {
            match subtable.pairs.kerning(left, right).map(i32::from) {
                Some(adjust) if subtable.replaces => adjust,
                Some(adjust) => value + adjust,
                None => value,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use read_fonts::{FontData, FontRead};
    use textshape_test_data::kern as data;

    fn kern(bytes: &[u8]) -> Kern<'_> {
        Kern::new(&KernTable::read(FontData::new(bytes)).unwrap())
    }

    fn gid(id: u32) -> GlyphId {
        GlyphId::new(id)
    }

    #[test]
    fn microsoft_format0() {
        let kern = kern(data::MS_FORMAT0);
        assert_eq!(kern.kerning(gid(4), gid(12)), -40);
        assert_eq!(kern.kerning(gid(4), gid(28)), 40);
        assert_eq!(kern.kerning(gid(5), gid(40)), -50);
        assert_eq!(kern.kerning(gid(12), gid(4)), 0);
        assert_eq!(kern.kerning(gid(0), gid(0)), 0);
        assert_eq!(kern.kerning(gid(70_000), gid(4)), 0);
    }

    #[test]
    fn apple_format0() {
        let kern = kern(data::APPLE_FORMAT0);
        assert_eq!(kern.kerning(gid(4), gid(12)), -40);
        assert_eq!(kern.kerning(gid(5), gid(40)), -50);
    }

    #[test]
    fn subtables_accumulate() {
        let kern = kern(data::MS_TWO_SUBTABLES);
        // -40 from the first subtable plus -10 from the second
        assert_eq!(kern.kerning(gid(4), gid(12)), -50);
        assert_eq!(kern.kerning(gid(4), gid(28)), 40);
    }

    #[test]
    fn override_replaces_accumulated_value() {
        let kern = kern(data::MS_OVERRIDE);
        assert_eq!(kern.kerning(gid(4), gid(12)), 15);
    }

    #[test]
    fn cross_stream_subtable_is_skipped() {
        let kern = kern(data::MS_CROSS_STREAM);
        assert!(kern.is_empty());
        assert_eq!(kern.kerning(gid(4), gid(12)), 0);
    }

    #[test]
    fn truncated_pairs_are_ignored() {
        let kern = kern(data::MS_TRUNCATED_PAIRS);
        assert!(kern.is_empty());
        assert_eq!(kern.kerning(gid(4), gid(12)), 0);
    }

    #[test]
    fn malformed_header() {
        assert!(KernTable::read(FontData::new(&[0, 2, 0, 0])).is_err());
        assert!(KernTable::read(FontData::new(&[])).is_err());
    }
}
