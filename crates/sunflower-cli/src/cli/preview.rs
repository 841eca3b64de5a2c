//! Raster preview: the full canvas with measurement grid and dots.
//!
//! The preview is drawn as an SVG in device pixels and rendered with resvg,
//! the same way swatch sheets and the pattern view are rasterized. Unlike
//! the vector exports it keeps the rectangular canvas and isn't clipped.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use image::{DynamicImage, ImageFormat, RgbaImage};
use resvg::usvg;
use tiny_skia::{Pixmap, Transform};
use tracing::debug;

use sunflower::{Config, Dot, ExportFormat, Marker, PX_PER_MM, Sheet};

const MINOR_GRID_COLOR: &str = "#c8daf0";
const MAJOR_GRID_COLOR: &str = "#90b0d8";
const AXIS_COLOR: &str = "#e05050";

/// Render the preview of `sheet` at `scale` times the 96 dpi pixel size.
pub fn render_preview(config: &Config, sheet: &Sheet, scale: f64) -> Result<RgbaImage> {
    let (width, height) = sheet.canvas.size_px(scale);
    let svg = preview_svg(config, sheet, scale);

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(&svg, &options).context("Failed to parse preview SVG")?;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| anyhow!("Cannot create a {width}x{height} image"))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    debug!(width, height, dots = sheet.dots.len(), "rendered preview");
    RgbaImage::from_raw(width, height, pixmap.take()).context("Failed to create image")
}

/// Save a rendered preview. JPEG has no alpha channel, so it gets RGB.
pub fn save_preview(image: RgbaImage, path: &Path, format: ExportFormat) -> Result<()> {
    let image = DynamicImage::ImageRgba8(image);
    let result = match format {
        ExportFormat::Jpeg => image.to_rgb8().save_with_format(path, ImageFormat::Jpeg),
        _ => image.save_with_format(path, ImageFormat::Png),
    };
    result.with_context(|| format!("Failed to write {}", path.display()))
}

/// Build the preview document in device pixels.
pub fn preview_svg(config: &Config, sheet: &Sheet, scale: f64) -> String {
    let (width, height) = sheet.canvas.size_px(scale);
    let (w, h) = (width as f64, height as f64);
    let px_per_mm = PX_PER_MM * scale;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
<rect width="100%" height="100%" fill="white"/>
"#
    );

    if config.show_grid {
        push_grid(&mut svg, w, h, px_per_mm, MINOR_GRID_COLOR, 0.5 * scale);
    }
    if config.show_major_grid {
        push_grid(&mut svg, w, h, px_per_mm * 10.0, MAJOR_GRID_COLOR, scale);
    }
    if config.show_axes {
        let (cx, cy) = (w / 2.0, h / 2.0);
        svg.push_str(&format!(
            "<path d=\"M{cx:.2},0 L{cx:.2},{h:.2} M0,{cy:.2} L{w:.2},{cy:.2}\" stroke=\"{AXIS_COLOR}\" stroke-width=\"{scale}\" stroke-dasharray=\"{} {}\" fill=\"none\"/>\n",
            6.0 * scale,
            4.0 * scale,
        ));
    }

    let center = (w / 2.0, h / 2.0);
    for dot in &sheet.dots {
        push_dot(&mut svg, sheet, dot, center, px_per_mm, scale);
    }

    svg.push_str("</svg>\n");
    svg
}

/// Grid lines every `step` px from the top-left corner, on half-pixel
/// positions so thin lines stay crisp.
fn push_grid(svg: &mut String, w: f64, h: f64, step: f64, color: &str, width: f64) {
    if !(step > 0.0) {
        return;
    }

    let mut d = String::new();
    let mut x = 0.0;
    while x <= w {
        let px = x.round() + 0.5;
        d.push_str(&format!("M{px},0 L{px},{h} "));
        x += step;
    }
    let mut y = 0.0;
    while y <= h {
        let py = y.round() + 0.5;
        d.push_str(&format!("M0,{py} L{w},{py} "));
        y += step;
    }

    svg.push_str(&format!(
        "<path d=\"{}\" stroke=\"{color}\" stroke-width=\"{width}\" fill=\"none\"/>\n",
        d.trim_end()
    ));
}

fn push_dot(svg: &mut String, sheet: &Sheet, dot: &Dot, center: (f64, f64), px_per_mm: f64, scale: f64) {
    let to_px = |x: f64, y: f64| (center.0 + x * px_per_mm, center.1 + y * px_per_mm);

    let opacity = sheet.style.opacity;
    let paint = match (sheet.style.fill_dots, dot.stroke) {
        (true, None) => format!(r#"fill="{}""#, dot.fill),
        (true, Some(stroke)) => format!(
            r#"fill="{}" stroke="{stroke}" stroke-width="{:.2}""#,
            dot.fill,
            (0.3 * PX_PER_MM).max(1.0) * scale
        ),
        (false, stroke) => format!(
            r#"fill="none" stroke="{}" stroke-width="{:.2}""#,
            stroke.unwrap_or(dot.fill),
            (0.15 * PX_PER_MM).max(0.5) * scale
        ),
    };

    match sheet.marker {
        Marker::Circle => {
            let (x, y) = to_px(dot.position.x, dot.position.y);
            svg.push_str(&format!(
                "<circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{:.2}\" {paint} opacity=\"{opacity}\"/>\n",
                dot.radius * px_per_mm
            ));
        }
        Marker::Diamond => {
            let points = dot
                .diamond()
                .iter()
                .map(|p| {
                    let (x, y) = to_px(p.x, p.y);
                    format!("{x:.2},{y:.2}")
                })
                .collect::<Vec<_>>()
                .join(" ");
            svg.push_str(&format!("<polygon points=\"{points}\" {paint} opacity=\"{opacity}\"/>\n"));
        }
    }
}
