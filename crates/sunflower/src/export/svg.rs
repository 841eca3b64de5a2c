//! SVG export with a circular boundary.
//!
//! The document is a square of side `min(width, height)` mm with the pattern
//! center in the middle. Dots are clipped to the inscribed circle, which is
//! also drawn as a border, and a small crosshair marks the center for CAD
//! alignment. No grid: that is a preview-only decoration.

use crate::geometry::{Dot, Marker};
use crate::patterns::Sheet;

/// Crosshair arm length (mm).
pub const CROSSHAIR_ARM: f64 = 2.0;

/// Stroke width of outlined dots (mm).
const OUTLINE_WIDTH: f64 = 0.15;

/// Stroke width of the second-family outline on filled dots (mm).
const FAMILY_OUTLINE_WIDTH: f64 = 0.3;

const FRAME_COLOR: &str = "#333";
const BORDER_WIDTH: f64 = 0.25;

/// Render a sheet as an SVG document (millimeter units).
pub fn to_svg(sheet: &Sheet) -> String {
    let radius = sheet.canvas.inscribed_radius();
    let diameter = radius * 2.0;
    let (cx, cy) = (radius, radius);

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{d:.2}mm" height="{d:.2}mm" viewBox="0 0 {d:.2} {d:.2}">
  <defs>
    <clipPath id="circleClip">
      <circle cx="{cx:.2}" cy="{cy:.2}" r="{radius:.2}"/>
    </clipPath>
  </defs>
  <circle cx="{cx:.2}" cy="{cy:.2}" r="{radius:.2}" fill="white"/>
  <g clip-path="url(#circleClip)">
"#,
        d = diameter,
    ));

    for dot in &sheet.dots {
        push_dot(&mut svg, sheet, dot, cx, cy);
    }

    svg.push_str("  </g>\n");

    let arm = CROSSHAIR_ARM;
    svg.push_str(&format!(
        "  <line x1=\"{:.2}\" y1=\"{cy:.2}\" x2=\"{:.2}\" y2=\"{cy:.2}\" stroke=\"{FRAME_COLOR}\" stroke-width=\"{OUTLINE_WIDTH}\"/>\n",
        cx - arm,
        cx + arm,
    ));
    svg.push_str(&format!(
        "  <line x1=\"{cx:.2}\" y1=\"{:.2}\" x2=\"{cx:.2}\" y2=\"{:.2}\" stroke=\"{FRAME_COLOR}\" stroke-width=\"{OUTLINE_WIDTH}\"/>\n",
        cy - arm,
        cy + arm,
    ));
    svg.push_str(&format!(
        "  <circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{radius:.2}\" fill=\"none\" stroke=\"{FRAME_COLOR}\" stroke-width=\"{BORDER_WIDTH}\"/>\n"
    ));
    svg.push_str("</svg>\n");
    svg
}

/// Paint attributes for one dot: fill or outline, plus opacity.
fn paint(sheet: &Sheet, dot: &Dot) -> String {
    let opacity = sheet.style.opacity;
    match (sheet.style.fill_dots, dot.stroke) {
        (true, None) => format!(r#"fill="{}" opacity="{opacity}""#, dot.fill),
        (true, Some(stroke)) => format!(
            r#"fill="{}" stroke="{stroke}" stroke-width="{FAMILY_OUTLINE_WIDTH}" opacity="{opacity}""#,
            dot.fill
        ),
        (false, stroke) => format!(
            r#"fill="none" stroke="{}" stroke-width="{OUTLINE_WIDTH}" opacity="{opacity}""#,
            stroke.unwrap_or(dot.fill)
        ),
    }
}

fn push_dot(svg: &mut String, sheet: &Sheet, dot: &Dot, cx: f64, cy: f64) {
    let paint = paint(sheet, dot);
    match sheet.marker {
        Marker::Circle => svg.push_str(&format!(
            "    <circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\" {paint}/>\n",
            cx + dot.position.x,
            cy + dot.position.y,
            dot.radius,
        )),
        Marker::Diamond => {
            let points = dot
                .diamond()
                .iter()
                .map(|p| format!("{:.3},{:.3}", cx + p.x, cy + p.y))
                .collect::<Vec<_>>()
                .join(" ");
            svg.push_str(&format!("    <polygon points=\"{points}\" {paint}/>\n"));
        }
    }
}
