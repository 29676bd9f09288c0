//! Layout against in-memory and on-disk fonts.

use std::io::Write;

use kurbo::Point;
use pretty_assertions::assert_eq;
use textshape::{
    error::GlyphErrorKind, Face, FaceError, LayoutError, LayoutOptions, MalformedGlyphPolicy,
    OutlineFormat, Segment,
};
use textshape_test_data::{self as data, FontBuilder};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn simple_face() -> Face {
    init_logging();
    Face::from_bytes(data::simple_font(), 12.0).unwrap()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn open_from_disk() {
    init_logging();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&data::simple_font()).unwrap();
    let face = Face::open(file.path(), 12.0).unwrap();
    assert_eq!(face.units_per_em(), 1000);
    assert_eq!(face.data().len(), data::simple_font().len());
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.ttf");
    match Face::open(&path, 12.0) {
        Err(FaceError::FileNotFound(missing)) => assert_eq!(missing, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn directory_is_not_a_font() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Face::open(dir.path(), 12.0),
        Err(FaceError::Io { .. })
    ));
}

#[test]
fn unsupported_and_corrupt_data() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(data::NOT_A_FONT).unwrap();
    assert!(matches!(
        Face::open(file.path(), 12.0),
        Err(FaceError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        Face::from_bytes(data::truncated_font(), 12.0),
        Err(FaceError::CorruptFile(_))
    ));
}

#[test]
fn kerning_tracking_and_scale() {
    let face = simple_face();
    // line height 1000 mapped onto 500 gives a scale of 0.5
    let text = face.layout("AVA", &LayoutOptions::new(500.0, 10.0)).unwrap();
    assert_close(text.scale.factor(), 0.5);
    let origins = text.glyphs.iter().map(|g| g.origin).collect::<Vec<_>>();
    // V: 300 + 10 tracking - 40 kerning; A: 570 + 10 - 30
    assert_eq!(origins, [0.0, 270.0, 550.0]);
    assert_close(text.advance, 850.0);
    // sum of (kerning + advance) scaled, plus tracking between pairs
    let expected = (600.0 + (600.0 - 80.0) + (600.0 - 60.0)) * 0.5 + 10.0 * 2.0;
    assert_close(text.advance, expected);
}

#[test]
fn glyphs_are_scaled_then_translated() {
    let face = simple_face();
    let text = face.layout("AA", &LayoutOptions::new(500.0, 0.0)).unwrap();
    let second = &text.glyphs[1];
    assert_close(second.origin, 300.0);
    // apex of A at (300, 700) in font units
    assert_eq!(second.contours[0][0].end(), Point::new(450.0, 350.0));
}

#[test]
fn implied_on_curve_points() {
    let face = simple_face();
    let text = face.layout("O", &LayoutOptions::default()).unwrap();
    let contour = &text.glyphs[0].contours[0];
    assert_eq!(contour.len(), 4);
    assert!(contour.iter().all(|s| s.control().is_some()));
    assert_eq!(contour[0].start(), Point::new(250.0, 0.0));
    assert_eq!(contour[0].end(), Point::new(500.0, 350.0));
    assert_eq!(contour[3].end(), contour[0].start());
}

#[test]
fn off_curve_start_is_rotated() {
    let face = simple_face();
    let text = face.layout("C", &LayoutOptions::default()).unwrap();
    let contour = &text.glyphs[0].contours[0];
    assert_eq!(
        contour,
        &[
            Segment::line((300.0, 0.0), (300.0, 300.0)),
            Segment::line((300.0, 300.0), (0.0, 300.0)),
            Segment::quad((0.0, 300.0), (0.0, 0.0), (300.0, 0.0)),
        ]
    );
}

#[test]
fn contours_are_closed() {
    let face = simple_face();
    let text = face.layout("AVOC", &LayoutOptions::default()).unwrap();
    for glyph in &text.glyphs {
        for contour in &glyph.contours {
            let (first, last) = (contour.first().unwrap(), contour.last().unwrap());
            assert_eq!(last.end(), first.start(), "{:?}", glyph.character);
            for pair in contour.windows(2) {
                assert_eq!(pair[0].end(), pair[1].start());
            }
        }
    }
}

#[test]
fn missing_character_advances_by_notdef() {
    let face = simple_face();
    let text = face.layout("AzA", &LayoutOptions::default()).unwrap();
    assert_eq!(text.glyphs.len(), 2);
    assert_close(text.glyphs[1].origin, 1100.0);
    assert_eq!(text.glyphs[1].index, 2);
}

#[test]
fn space_has_no_geometry() {
    let face = simple_face();
    let text = face.layout("A A", &LayoutOptions::default()).unwrap();
    assert_eq!(text.glyphs.len(), 2);
    assert_close(text.glyphs[1].origin, 850.0);
}

#[test]
fn composite_glyph() {
    let face = simple_face();
    let text = face.layout("\u{C4}", &LayoutOptions::default()).unwrap();
    let contours = &text.glyphs[0].contours;
    assert_eq!(contours.len(), 3);
    assert_eq!(contours[2][0].start(), Point::new(250.0, 800.0));
}

#[test]
fn empty_text() {
    let face = simple_face();
    let text = face.layout("", &LayoutOptions::default()).unwrap();
    assert!(text.glyphs.is_empty());
    assert_eq!(text.advance, 0.0);
}

#[test]
fn collection() {
    init_logging();
    let face = Face::from_bytes(FontBuilder::new().build_collection(), 12.0).unwrap();
    let text = face.layout("AV", &LayoutOptions::default()).unwrap();
    assert_close(text.advance, 1120.0);
}

#[test]
fn postscript_face() {
    init_logging();
    let face = Face::from_bytes(FontBuilder::new().postscript_outlines().build(), 12.0).unwrap();
    assert_eq!(face.format(), OutlineFormat::PostScript);
    // the placeholder table holds no outlines; advances still come from hmtx
    let text = face.layout("AV", &LayoutOptions::default()).unwrap();
    assert!(text.glyphs.is_empty());
    assert_close(text.advance, 1120.0);
}

fn broken_face() -> Face {
    init_logging();
    Face::from_bytes(FontBuilder::new().self_referencing_glyph().build(), 12.0).unwrap()
}

#[test]
fn malformed_glyph_aborts() {
    let face = broken_face();
    let text = format!("A{}V", data::CUSTOM_CHAR);
    match face.layout(&text, &LayoutOptions::default()) {
        Err(LayoutError::Glyph(err)) => {
            assert_eq!(err.character, data::CUSTOM_CHAR);
            assert_eq!(err.index, 1);
            assert!(matches!(err.kind, GlyphErrorKind::Provider(_)));
        }
        other => panic!("expected a glyph error, got {other:?}"),
    }
}

#[test]
fn malformed_glyph_is_skipped() {
    let face = broken_face();
    let text = format!("A{}V", data::CUSTOM_CHAR);
    let options = LayoutOptions::default().with_policy(MalformedGlyphPolicy::Skip);
    let geometry = face.layout(&text, &options).unwrap();
    assert_eq!(geometry.skipped.len(), 1);
    assert_eq!(geometry.glyphs.len(), 2);
    // the skipped glyph still advances the pen
    assert_close(geometry.glyphs[1].origin, 1100.0);
}

#[test]
fn draws_into_bez_path() {
    let face = simple_face();
    let text = face.layout("AO", &LayoutOptions::default()).unwrap();
    let path = text.to_bez_path();
    // A: two triangles of move, 3 lines, close; O: move, 4 quads, close
    assert_eq!(path.elements().len(), 2 * 5 + 6);
}
