//! Raw `kern` tables.

#[rustfmt::skip]
pub static MS_FORMAT0: &[u8] = &[
    0x00, 0x00,             //  0: version=0
    0x00, 0x01,             //  2: nTables=1
    0x00, 0x00,             //  4: subtable version=0
    0x00, 0x20,             //  6: length=32
    0x00,                   //  8: format=0
    0x01,                   //  9: coverage=horizontal
    0x00, 0x03,             // 10: nPairs=3
    0x00, 0x0C,             // 12: searchRange=12
    0x00, 0x01,             // 14: entrySelector=1
    0x00, 0x06,             // 16: rangeShift=6
    0x00, 0x04, 0x00, 0x0C, 0xFF, 0xD8, // 18: l=4, r=12, v=-40
    0x00, 0x04, 0x00, 0x1C, 0x00, 0x28, // 24: l=4, r=28, v=40
    0x00, 0x05, 0x00, 0x28, 0xFF, 0xCE, // 30: l=5, r=40, v=-50
];

#[rustfmt::skip]
pub static APPLE_FORMAT0: &[u8] = &[
    0x00, 0x01, 0x00, 0x00, //  0: version=1.0
    0x00, 0x00, 0x00, 0x01, //  4: nTables=1
    0x00, 0x00, 0x00, 0x22, //  8: length=34
    0x00,                   // 12: coverage=horizontal
    0x00,                   // 13: format=0
    0x00, 0x00,             // 14: tupleIndex=0
    0x00, 0x03,             // 16: nPairs=3
    0x00, 0x0C,             // 18: searchRange=12
    0x00, 0x01,             // 20: entrySelector=1
    0x00, 0x06,             // 22: rangeShift=6
    0x00, 0x04, 0x00, 0x0C, 0xFF, 0xD8, // 24: l=4, r=12, v=-40
    0x00, 0x04, 0x00, 0x1C, 0x00, 0x28, // 30: l=4, r=28, v=40
    0x00, 0x05, 0x00, 0x28, 0xFF, 0xCE, // 36: l=5, r=40, v=-50
];

#[rustfmt::skip]
pub static MS_TWO_SUBTABLES: &[u8] = &[
    0x00, 0x00,             //  0: version=0
    0x00, 0x02,             //  2: nTables=2
    // first subtable
    0x00, 0x00,             //  4: subtable version=0
    0x00, 0x20,             //  6: length=32
    0x00,                   //  8: format=0
    0x01,                   //  9: coverage=horizontal
    0x00, 0x03,             // 10: nPairs=3
    0x00, 0x0C,             // 12: searchRange=12
    0x00, 0x01,             // 14: entrySelector=1
    0x00, 0x06,             // 16: rangeShift=6
    0x00, 0x04, 0x00, 0x0C, 0xFF, 0xD8, // 18: l=4, r=12, v=-40
    0x00, 0x04, 0x00, 0x1C, 0x00, 0x28, // 24: l=4, r=28, v=40
    0x00, 0x05, 0x00, 0x28, 0xFF, 0xCE, // 30: l=5, r=40, v=-50
    // second subtable
    0x00, 0x00,             // 36: subtable version=0
    0x00, 0x14,             // 38: length=20
    0x00,                   // 40: format=0
    0x01,                   // 41: coverage=horizontal
    0x00, 0x01,             // 42: nPairs=1
    0x00, 0x06,             // 44: searchRange=6
    0x00, 0x00,             // 46: entrySelector=0
    0x00, 0x00,             // 48: rangeShift=0
    0x00, 0x04, 0x00, 0x0C, 0xFF, 0xF6, // 50: l=4, r=12, v=-10
];

#[rustfmt::skip]
pub static MS_OVERRIDE: &[u8] = &[
    0x00, 0x00,             //  0: version=0
    0x00, 0x02,             //  2: nTables=2
    // first subtable
    0x00, 0x00,             //  4: subtable version=0
    0x00, 0x14,             //  6: length=20
    0x00,                   //  8: format=0
    0x01,                   //  9: coverage=horizontal
    0x00, 0x01,             // 10: nPairs=1
    0x00, 0x06,             // 12: searchRange=6
    0x00, 0x00,             // 14: entrySelector=0
    0x00, 0x00,             // 16: rangeShift=0
    0x00, 0x04, 0x00, 0x0C, 0xFF, 0xD8, // 18: l=4, r=12, v=-40
    // second subtable
    0x00, 0x00,             // 24: subtable version=0
    0x00, 0x14,             // 26: length=20
    0x00,                   // 28: format=0
    0x09,                   // 29: coverage=horizontal|override
    0x00, 0x01,             // 30: nPairs=1
    0x00, 0x06,             // 32: searchRange=6
    0x00, 0x00,             // 34: entrySelector=0
    0x00, 0x00,             // 36: rangeShift=0
    0x00, 0x04, 0x00, 0x0C, 0x00, 0x0F, // 38: l=4, r=12, v=15
];

#[rustfmt::skip]
pub static MS_CROSS_STREAM: &[u8] = &[
    0x00, 0x00,             //  0: version=0
    0x00, 0x01,             //  2: nTables=1
    0x00, 0x00,             //  4: subtable version=0
    0x00, 0x14,             //  6: length=20
    0x00,                   //  8: format=0
    0x05,                   //  9: coverage=horizontal|cross-stream
    0x00, 0x01,             // 10: nPairs=1
    0x00, 0x06,             // 12: searchRange=6
    0x00, 0x00,             // 14: entrySelector=0
    0x00, 0x00,             // 16: rangeShift=0
    0x00, 0x04, 0x00, 0x0C, 0xFF, 0xD8, // 18: l=4, r=12, v=-40
];

/// Declares three pairs but only holds one.
#[rustfmt::skip]
pub static MS_TRUNCATED_PAIRS: &[u8] = &[
    0x00, 0x00,             //  0: version=0
    0x00, 0x01,             //  2: nTables=1
    0x00, 0x00,             //  4: subtable version=0
    0x00, 0x14,             //  6: length=20
    0x00,                   //  8: format=0
    0x01,                   //  9: coverage=horizontal
    0x00, 0x03,             // 10: nPairs=3
    0x00, 0x0C,             // 12: searchRange=12
    0x00, 0x01,             // 14: entrySelector=1
    0x00, 0x06,             // 16: rangeShift=6
    0x00, 0x04, 0x00, 0x0C, 0xFF, 0xD8, // 18: l=4, r=12, v=-40
];

/// The pairs of the default test font: `A V` and `V A`.
#[rustfmt::skip]
pub static DEFAULT_FONT: &[u8] = &[
    0x00, 0x00,             //  0: version=0
    0x00, 0x01,             //  2: nTables=1
    0x00, 0x00,             //  4: subtable version=0
    0x00, 0x1A,             //  6: length=26
    0x00,                   //  8: format=0
    0x01,                   //  9: coverage=horizontal
    0x00, 0x02,             // 10: nPairs=2
    0x00, 0x0C,             // 12: searchRange=12
    0x00, 0x01,             // 14: entrySelector=1
    0x00, 0x00,             // 16: rangeShift=0
    0x00, 0x02, 0x00, 0x03, 0xFF, 0xB0, // 18: l=A, r=V, v=-80
    0x00, 0x03, 0x00, 0x02, 0xFF, 0xC4, // 24: l=V, r=A, v=-60
];
