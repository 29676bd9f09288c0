//! Lays out a string and writes its outlines.

use std::{
    fmt::Write as _,
    io::Write as _,
    path::{Path, PathBuf},
};

use clap::Parser;
use kurbo::{Affine, BezPath, PathEl, Point, Rect, Shape};
use textshape::{
    pen::draw_contour, Face, FaceError, LayoutError, LayoutOptions, MalformedGlyphPolicy,
    TextGeometry,
};
use thiserror::Error;

/// Space around the outlines in the SVG view box, in output units.
const SVG_MARGIN: f64 = 10.0;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to a TrueType font or font collection
    font: PathBuf,
    /// The text to lay out
    text: String,
    /// Height of one line of text in output units
    #[arg(long)]
    height: Option<f64>,
    /// Extra space between characters in output units
    #[arg(long, allow_negative_numbers = true)]
    tracking: Option<f64>,
    /// Nominal size requested from the font
    #[arg(long, default_value_t = 12.0)]
    size: f32,
    /// Leave out glyphs with malformed outlines instead of failing
    #[arg(long)]
    skip_malformed: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,
    /// Round SVG path coordinates to this many decimal places
    #[arg(long)]
    precision: Option<usize>,
    /// JSON file with layout options; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Copy, Clone, Default, PartialEq, Eq, Debug)]
enum Format {
    #[default]
    Svg,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read config '{}'", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}'", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Face(#[from] FaceError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("failed to serialize geometry")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output")]
    Write(#[from] std::io::Error),
}

impl Args {
    fn layout_options(&self) -> Result<LayoutOptions, CliError> {
        let mut options = match &self.config {
            Some(path) => load_config(path)?,
            None => LayoutOptions::default(),
        };
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(tracking) = self.tracking {
            options.tracking = tracking;
        }
        if self.skip_malformed {
            options.on_malformed = MalformedGlyphPolicy::Skip;
        }
        Ok(options)
    }
}

fn load_config(path: &Path) -> Result<LayoutOptions, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: path.to_owned(),
        source,
    })
}

/// Renders the geometry as an SVG document with y pointing down.
fn render_svg(geometry: &TextGeometry, precision: Option<usize>) -> String {
    let paths = geometry
        .glyphs
        .iter()
        .map(|glyph| {
            let mut path = BezPath::new();
            for contour in &glyph.contours {
                draw_contour(contour, &mut path);
            }
            path.apply_affine(Affine::FLIP_Y);
            if let Some(precision) = precision {
                round_points(&mut path, precision);
            }
            (glyph.character, path)
        })
        .collect::<Vec<_>>();
    let bounds = paths
        .iter()
        .filter(|(_, path)| !path.elements().is_empty())
        .map(|(_, path)| path.bounding_box())
        .reduce(|a, b| a.union(b))
        .unwrap_or(Rect::new(0.0, 0.0, geometry.advance, 0.0))
        .inflate(SVG_MARGIN, SVG_MARGIN);
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        bounds.x0,
        bounds.y0,
        bounds.width(),
        bounds.height()
    );
    for (ch, path) in &paths {
        let _ = writeln!(
            svg,
            r#"  <path data-char="U+{:04X}" d="{}"/>"#,
            *ch as u32,
            path.to_svg()
        );
    }
    svg.push_str("</svg>\n");
    svg
}

/// Rounds every point of `path` to `precision` decimal places.
fn round_points(path: &mut BezPath, precision: usize) {
    let factor = 10f64.powi(precision.min(f64::DIGITS as usize) as i32);
    // adding zero turns a negative zero into a positive one
    let round_coord = |v: f64| (v * factor).round() / factor + 0.0;
    let round = |p: Point| Point::new(round_coord(p.x), round_coord(p.y));
    for el in path.elements_mut() {
        *el = match *el {
            PathEl::MoveTo(p) => PathEl::MoveTo(round(p)),
            PathEl::LineTo(p) => PathEl::LineTo(round(p)),
            PathEl::QuadTo(p1, p2) => PathEl::QuadTo(round(p1), round(p2)),
            PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(round(p1), round(p2), round(p3)),
            PathEl::ClosePath => PathEl::ClosePath,
        };
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let options = args.layout_options()?;
    let face = Face::open(&args.font, args.size)?;
    let geometry = face.layout(&args.text, &options)?;
    for skipped in &geometry.skipped {
        log::warn!("{skipped}");
    }
    log::info!(
        "{} glyphs, advance {}",
        geometry.glyphs.len(),
        geometry.advance
    );
    let output = match args.format {
        Format::Svg => render_svg(&geometry, args.precision),
        Format::Json => serde_json::to_string_pretty(&geometry)? + "\n",
    };
    std::io::stdout().lock().write_all(output.as_bytes())?;
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        let mut message = format!("error: {e}");
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            let _ = write!(message, ": {cause}");
            source = cause.source();
        }
        eprintln!("{message}");
        std::process::exit(1);
    }
}
