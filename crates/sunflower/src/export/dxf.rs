//! Minimal DXF (AutoCAD R12-style ASCII) export.
//!
//! Three sections are written: HEADER (units), TABLES (three layers) and
//! ENTITIES. Coordinates are millimeters centered on the pattern origin.
//! DXF's Y axis points up, so Y is negated to keep the drawing the same way
//! up as the preview.

use crate::geometry::{Dot, Marker, Point};
use crate::patterns::Sheet;

use super::svg::CROSSHAIR_ARM;

const LAYER_DOTS: &str = "DOTS";
const LAYER_BORDER: &str = "BORDER";
const LAYER_CENTER: &str = "CENTER";

/// Render a sheet as DXF text.
pub fn to_dxf(sheet: &Sheet) -> String {
    let mut dxf = String::new();

    // HEADER: $INSUNITS 4 = millimeters, $MEASUREMENT 1 = metric
    dxf.push_str("0\nSECTION\n2\nHEADER\n");
    dxf.push_str("9\n$INSUNITS\n70\n4\n");
    dxf.push_str("9\n$MEASUREMENT\n70\n1\n");
    dxf.push_str("0\nENDSEC\n");

    // TABLES: layer name, ACI color, linetype
    dxf.push_str("0\nSECTION\n2\nTABLES\n");
    dxf.push_str("0\nTABLE\n2\nLAYER\n70\n3\n");
    for (name, color, linetype) in [
        (LAYER_DOTS, 7, "CONTINUOUS"),
        (LAYER_BORDER, 5, "CONTINUOUS"),
        (LAYER_CENTER, 1, "CENTER"),
    ] {
        dxf.push_str(&format!("0\nLAYER\n2\n{name}\n70\n0\n62\n{color}\n6\n{linetype}\n"));
    }
    dxf.push_str("0\nENDTAB\n");
    dxf.push_str("0\nENDSEC\n");

    dxf.push_str("0\nSECTION\n2\nENTITIES\n");

    for dot in &sheet.dots {
        match sheet.marker {
            Marker::Circle => circle(&mut dxf, flip(dot.position), dot.radius, LAYER_DOTS),
            Marker::Diamond => diamond(&mut dxf, dot, LAYER_DOTS),
        }
    }

    circle(
        &mut dxf,
        Point::new(0.0, 0.0),
        sheet.canvas.inscribed_radius(),
        LAYER_BORDER,
    );

    let arm = CROSSHAIR_ARM;
    line(&mut dxf, Point::new(-arm, 0.0), Point::new(arm, 0.0), LAYER_CENTER);
    line(&mut dxf, Point::new(0.0, -arm), Point::new(0.0, arm), LAYER_CENTER);

    dxf.push_str("0\nENDSEC\n");
    dxf.push_str("0\nEOF\n");
    dxf
}

/// Screen coordinates (Y down) to drawing coordinates (Y up).
#[inline]
fn flip(p: Point) -> Point {
    // 0.0 - y rather than -y, so a dot on the axis doesn't print as -0.0000
    Point::new(p.x, 0.0 - p.y)
}

fn circle(dxf: &mut String, center: Point, radius: f64, layer: &str) {
    dxf.push_str(&format!(
        "0\nCIRCLE\n8\n{layer}\n10\n{:.4}\n20\n{:.4}\n30\n0.0\n40\n{:.4}\n",
        center.x, center.y, radius
    ));
}

/// Closed four-vertex LWPOLYLINE (group 70 = 1 marks it closed).
fn diamond(dxf: &mut String, dot: &Dot, layer: &str) {
    dxf.push_str(&format!("0\nLWPOLYLINE\n8\n{layer}\n90\n4\n70\n1\n"));
    for vertex in dot.diamond().map(flip) {
        dxf.push_str(&format!("10\n{:.4}\n20\n{:.4}\n", vertex.x, vertex.y));
    }
}

fn line(dxf: &mut String, from: Point, to: Point, layer: &str) {
    dxf.push_str(&format!(
        "0\nLINE\n8\n{layer}\n10\n{:.4}\n20\n{:.4}\n30\n0.0\n11\n{:.4}\n21\n{:.4}\n31\n0.0\n",
        from.x, from.y, to.x, to.y
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::config::{Config, PatternType};
    use crate::geometry::Canvas;
    use crate::patterns::Style;

    /// (group code, value) pairs.
    fn pairs(dxf: &str) -> Vec<(&str, &str)> {
        let lines: Vec<&str> = dxf.lines().collect();
        assert_eq!(lines.len() % 2, 0, "DXF must be code/value pairs");
        lines.chunks(2).map(|c| (c[0], c[1])).collect()
    }

    fn sheet(dots: Vec<Dot>, marker: Marker) -> Sheet {
        Sheet {
            pattern: PatternType::Sunflower,
            dots,
            canvas: Canvas::new(80.0, 120.0),
            marker,
            style: Style {
                fill_dots: true,
                opacity: 1.0,
            },
        }
    }

    #[test]
    fn sections_and_layers() {
        let dxf = to_dxf(&sheet(Vec::new(), Marker::Circle));
        let p = pairs(&dxf);
        assert_eq!(p[0], ("0", "SECTION"));
        assert_eq!(p[1], ("2", "HEADER"));
        assert!(p.contains(&("9", "$INSUNITS")));
        assert_eq!(p.iter().filter(|&&x| x == ("0", "SECTION")).count(), 3);
        for layer in ["DOTS", "BORDER", "CENTER"] {
            assert!(p.contains(&("2", layer)), "missing layer {layer}");
        }
        assert_eq!(p.last(), Some(&("0", "EOF")));
    }

    #[test]
    fn border_and_crosshair() {
        let dxf = to_dxf(&sheet(Vec::new(), Marker::Circle));
        assert!(dxf.contains("0\nCIRCLE\n8\nBORDER\n10\n0.0000\n20\n0.0000\n30\n0.0\n40\n40.0000\n"));
        assert_eq!(dxf.matches("0\nLINE\n8\nCENTER\n").count(), 2);
        assert!(dxf.contains("10\n-2.0000\n20\n0.0000\n30\n0.0\n11\n2.0000\n21\n0.0000\n"));
    }

    #[test]
    fn circle_dot_y_is_flipped() {
        let dot = Dot::new(Point::new(3.0, 4.0), 0.25, 0.0, Rgb::BLACK);
        let dxf = to_dxf(&sheet(vec![dot], Marker::Circle));
        assert!(dxf.contains("0\nCIRCLE\n8\nDOTS\n10\n3.0000\n20\n-4.0000\n30\n0.0\n40\n0.2500\n"));
    }

    #[test]
    fn diamonds_are_closed_polylines() {
        let dot = Dot::new(Point::new(0.0, 10.0), 1.0, std::f64::consts::FRAC_PI_2, Rgb::BLACK);
        let dxf = to_dxf(&sheet(vec![dot], Marker::Diamond));
        assert!(dxf.contains("0\nLWPOLYLINE\n8\nDOTS\n90\n4\n70\n1\n"));
        // Outer tip: 2r along the bearing (down on screen), so y = -(10 + 2).
        assert!(dxf.contains("10\n0.0000\n20\n-12.0000\n"));
    }

    #[test]
    fn one_entity_per_dot() {
        let config = Config {
            pattern: PatternType::DoubleSpiral,
            dot_count: 89,
            ..Config::default()
        };
        let dxf = to_dxf(&Sheet::from_config(&config));
        // dots + border
        assert_eq!(dxf.matches("0\nCIRCLE\n").count(), 90);
    }
}
