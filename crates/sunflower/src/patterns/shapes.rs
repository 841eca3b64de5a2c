//! Dots on or inside a circle, rectangle or equilateral triangle.
//!
//! Outline mode walks the perimeter once at equal arc-length steps
//! (`i / n` of the way round). Filled mode uses a different sampler per shape:
//! a Vogel spiral for the circle, an aspect-matched grid for the rectangle
//! and horizontal scan-lines for the triangle.

use std::f64::consts::{PI, TAU};

use tracing::debug;

use crate::color::Rgb;
use crate::config::{Config, GOLDEN_ANGLE_DEG, HoleSizeMode, PatternType, ShapeFillMode};
use crate::geometry::{Dot, Point};
use crate::layout::fibonacci_radii;

/// Filled circles always use the true golden angle, whatever angle the
/// spiral patterns are configured with.
const GOLDEN_ANGLE_RAD: f64 = GOLDEN_ANGLE_DEG * (PI / 180.0);

/// Row widths below this (mm) get a single dot.
const MIN_ROW_WIDTH: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Triangle,
}

/// Everything a shape pattern needs, with scale and margin already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeParams {
    pub kind: ShapeKind,
    pub fill_mode: ShapeFillMode,
    pub dot_count: u32,
    /// Half extents after `shape_size` scaling.
    pub half_width_mm: f64,
    pub half_height_mm: f64,
    pub margin_mm: f64,
    pub hole_size_mode: HoleSizeMode,
    pub dot_diameter_mm: f64,
    pub min_dot_diameter_mm: f64,
    pub color: Rgb,
}

impl ShapeParams {
    /// Shape parameters for a `shape-*` pattern, `None` for spirals.
    pub fn from_config(config: &Config) -> Option<Self> {
        let kind = match config.pattern {
            PatternType::ShapeCircle => ShapeKind::Circle,
            PatternType::ShapeRectangle => ShapeKind::Rectangle,
            PatternType::ShapeTriangle => ShapeKind::Triangle,
            _ => return None,
        };
        let scale = config.shape_size_pct / 100.0;

        Some(Self {
            kind,
            fill_mode: config.shape_fill_mode,
            dot_count: config.effective_dot_count(),
            half_width_mm: (config.canvas.width_mm / 2.0 * scale).max(0.0),
            half_height_mm: (config.canvas.height_mm / 2.0 * scale).max(0.0),
            margin_mm: config.edge_margin_mm,
            hole_size_mode: config.hole_size_mode,
            dot_diameter_mm: config.dot_diameter_mm.max(0.0),
            min_dot_diameter_mm: config.min_dot_diameter_mm.max(0.0),
            color: config.dot_color,
        })
    }

    /// Radius of the circle, or circumradius of the triangle.
    fn inner_radius(&self) -> f64 {
        (self.half_width_mm.min(self.half_height_mm) - self.margin_mm).max(0.0)
    }

    /// Width and height of the rectangle inside the margin.
    fn inner_rect(&self) -> (f64, f64) {
        (
            (self.half_width_mm * 2.0 - 2.0 * self.margin_mm).max(0.0),
            (self.half_height_mm * 2.0 - 2.0 * self.margin_mm).max(0.0),
        )
    }

    /// Per-dot radius, indexed by placement order.
    fn dot_radii(&self) -> Vec<f64> {
        let n = self.dot_count;
        match self.hole_size_mode {
            HoleSizeMode::Fibonacci if n > 1 => {
                fibonacci_radii(n, self.min_dot_diameter_mm, self.dot_diameter_mm)
            }
            _ => vec![self.dot_diameter_mm / 2.0; n as usize],
        }
    }
}

/// Generate the dots for a shape pattern.
pub fn generate_shape(params: &ShapeParams) -> Vec<Dot> {
    // (position, bearing) per dot, in placement order
    let placements = match (params.kind, params.fill_mode) {
        (ShapeKind::Circle, ShapeFillMode::Outline) => circle_outline(params),
        (ShapeKind::Rectangle, ShapeFillMode::Outline) => rectangle_outline(params),
        (ShapeKind::Triangle, ShapeFillMode::Outline) => triangle_outline(params),
        (ShapeKind::Circle, ShapeFillMode::Filled) => circle_filled(params),
        (ShapeKind::Rectangle, ShapeFillMode::Filled) => rectangle_filled(params),
        (ShapeKind::Triangle, ShapeFillMode::Filled) => triangle_filled(params),
    };

    let radii = params.dot_radii();
    placements
        .into_iter()
        .enumerate()
        .map(|(i, (position, bearing))| {
            let radius = radii
                .get(i)
                .copied()
                .unwrap_or(params.dot_diameter_mm / 2.0);
            Dot::new(position, radius, bearing, params.color)
        })
        .collect()
}

fn circle_outline(params: &ShapeParams) -> Vec<(Point, f64)> {
    let r = params.inner_radius();
    let n = params.dot_count;
    (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            (Point::polar(r, angle), angle)
        })
        .collect()
}

fn rectangle_outline(params: &ShapeParams) -> Vec<(Point, f64)> {
    let (w, h) = params.inner_rect();
    let perimeter = 2.0 * (w + h);
    let n = params.dot_count;

    (0..n)
        .map(|i| {
            let d = perimeter * i as f64 / n as f64;
            // Clockwise from the top-left corner (Y down).
            let p = if d < w {
                Point::new(-w / 2.0 + d, -h / 2.0)
            } else if d < w + h {
                Point::new(w / 2.0, -h / 2.0 + (d - w))
            } else if d < 2.0 * w + h {
                Point::new(w / 2.0 - (d - w - h), h / 2.0)
            } else {
                Point::new(-w / 2.0, h / 2.0 - (d - 2.0 * w - h))
            };
            (p, p.angle())
        })
        .collect()
}

/// Equilateral triangle with circumradius `r`, apex up, centered on its
/// bounding box rather than its centroid.
pub fn triangle_vertices(r: f64) -> [Point; 3] {
    let raw = [-PI / 2.0, -PI / 2.0 + 2.0 * PI / 3.0, -PI / 2.0 + 4.0 * PI / 3.0]
        .map(|a| Point::polar(r, a));
    let min_y = raw.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = raw.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    let shift = -(min_y + max_y) / 2.0;
    raw.map(|p| Point::new(p.x, p.y + shift))
}

fn triangle_outline(params: &ShapeParams) -> Vec<(Point, f64)> {
    let [v0, v1, v2] = triangle_vertices(params.inner_radius());
    let edges = [(v0, v1), (v1, v2), (v2, v0)];
    let lengths = edges.map(|(a, b)| a.distance(b));
    let total: f64 = lengths.iter().sum();
    let n = params.dot_count;

    (0..n)
        .map(|i| {
            let mut d = total * i as f64 / n as f64;
            let mut p = v0;
            for (e, &(a, b)) in edges.iter().enumerate() {
                if d <= lengths[e] || e == 2 {
                    let t = if lengths[e] > 0.0 { d / lengths[e] } else { 0.0 };
                    p = a.lerp(b, t);
                    break;
                }
                d -= lengths[e];
            }
            (p, p.angle())
        })
        .collect()
}

/// Vogel spiral: `radius = R * sqrt(i / (n - 1))`, `angle = i * golden angle`.
fn circle_filled(params: &ShapeParams) -> Vec<(Point, f64)> {
    let r = params.inner_radius();
    let n = params.dot_count;
    (0..n)
        .map(|i| {
            let frac = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
            let angle = i as f64 * GOLDEN_ANGLE_RAD;
            (Point::polar(r * frac.sqrt(), angle), angle)
        })
        .collect()
}

/// Grid whose `cols * rows` is closest to `n`, ties going to the column/row
/// ratio closest to the rectangle's aspect.
///
/// Returns `(cols, rows)`. The product can fall short of `n`; the grid is
/// then placed as-is and the pattern has fewer dots than requested.
pub fn best_grid(n: u32, aspect: f64) -> (u32, u32) {
    let (mut best_cols, mut best_rows) = (1u32, 1u32);
    let mut best_diff = f64::INFINITY;

    for c in 1..=n {
        let r = (c as f64 / aspect).round();
        // NaN from a zero-area rectangle also lands here.
        if !(r >= 1.0) || r > u32::MAX as f64 {
            continue;
        }
        let diff = (c as f64 * r - n as f64).abs();
        let ratio_err = (c as f64 / r - aspect).abs();
        let best_ratio_err = (best_cols as f64 / best_rows as f64 - aspect).abs();
        if diff < best_diff || (diff == best_diff && ratio_err < best_ratio_err) {
            best_diff = diff;
            best_cols = c;
            best_rows = r as u32;
        }
    }

    (best_cols, best_rows)
}

fn rectangle_filled(params: &ShapeParams) -> Vec<(Point, f64)> {
    let n = params.dot_count;
    if n == 1 {
        return vec![(Point::new(0.0, 0.0), 0.0)];
    }

    let (w, h) = params.inner_rect();
    let (cols, rows) = best_grid(n, w / h);
    debug!(cols, rows, requested = n, "rectangle grid");

    let coord = |index: u32, count: u32, extent: f64| {
        if count > 1 {
            -extent / 2.0 + index as f64 * extent / (count - 1) as f64
        } else {
            0.0
        }
    };

    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .take(n as usize)
        .map(|(row, col)| {
            let p = Point::new(coord(col, cols, w), coord(row, rows, h));
            (p, p.angle())
        })
        .collect()
}

/// Left/right span of the triangle at height `y`, if the scan-line hits it.
///
/// Returns every edge crossing; a horizontal edge on the line counts once,
/// at its midpoint.
fn scan_crossings(verts: &[Point; 3], y: f64) -> Vec<f64> {
    let [v0, v1, v2] = *verts;
    [(v0, v1), (v1, v2), (v2, v0)]
        .iter()
        .filter(|(a, b)| (a.y <= y && b.y >= y) || (b.y <= y && a.y >= y))
        .map(|(a, b)| {
            let t = if a.y == b.y { 0.5 } else { (y - a.y) / (b.y - a.y) };
            a.x + t * (b.x - a.x)
        })
        .collect()
}

fn span(xs: &[f64]) -> (f64, f64) {
    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

/// Dots in one scan-line row of width `row_width` at the given row pitch.
fn dots_in_row(row_width: f64, pitch: f64) -> usize {
    if row_width < MIN_ROW_WIDTH {
        1
    } else {
        ((row_width / pitch).round() as usize).max(1)
    }
}

fn triangle_filled(params: &ShapeParams) -> Vec<(Point, f64)> {
    let n = params.dot_count;
    let verts = triangle_vertices(params.inner_radius());
    let [v0, v1, v2] = verts;
    let centroid = Point::new((v0.x + v1.x + v2.x) / 3.0, (v0.y + v1.y + v2.y) / 3.0);

    if n == 1 {
        return vec![(centroid, 0.0)];
    }

    let min_y = v0.y.min(v1.y).min(v2.y);
    let max_y = v0.y.max(v1.y).max(v2.y);
    let tri_h = max_y - min_y;
    if tri_h <= MIN_ROW_WIDTH {
        return vec![(centroid, 0.0); n as usize];
    }

    let row_y = |row: u32, rows: u32| {
        if rows > 1 {
            min_y + row as f64 * tri_h / (rows - 1) as f64
        } else {
            min_y + tri_h / 2.0
        }
    };
    let pitch = |rows: u32| if rows > 1 { tri_h / (rows - 1) as f64 } else { tri_h };

    // Search for the row count whose sample total lands closest to n.
    let target = n as f64;
    let (mut best_rows, mut best_total) = (1u32, 1usize);
    for rows in 1..=n {
        let total: usize = (0..rows)
            .map(|row| {
                let xs = scan_crossings(&verts, row_y(row, rows));
                if xs.len() >= 2 {
                    let (lo, hi) = span(&xs);
                    dots_in_row(hi - lo, pitch(rows))
                } else {
                    1
                }
            })
            .sum();

        if (total as f64 - target).abs() < (best_total as f64 - target).abs() {
            best_rows = rows;
            best_total = total;
        }
        if total as f64 >= target * 1.5 {
            break;
        }
    }
    debug!(rows = best_rows, samples = best_total, requested = n, "triangle scan-lines");

    let mut samples = Vec::with_capacity(best_total);
    for row in 0..best_rows {
        let y = row_y(row, best_rows);
        let xs = scan_crossings(&verts, y);
        match xs.len() {
            0 => {}
            1 => samples.push(Point::new(xs[0], y)),
            _ => {
                let (lo, hi) = span(&xs);
                let width = hi - lo;
                let count = dots_in_row(width, pitch(best_rows));
                for c in 0..count {
                    let x = if count > 1 {
                        lo + c as f64 * width / (count - 1) as f64
                    } else {
                        (lo + hi) / 2.0
                    };
                    samples.push(Point::new(x, y));
                }
            }
        }
    }

    // Subsample evenly when there are too many, pad at the centroid when
    // there are too few.
    let len = samples.len();
    let mut placements: Vec<(Point, f64)> = (0..(n as usize).min(len))
        .map(|i| {
            let idx = if len > n as usize {
                (i as f64 * (len - 1) as f64 / (n - 1) as f64).round() as usize
            } else {
                i
            };
            let p = samples[idx.min(len - 1)];
            (p, p.angle())
        })
        .collect();
    placements.resize(n as usize, (centroid, 0.0));
    placements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(pattern: PatternType, fill: ShapeFillMode, n: u32) -> ShapeParams {
        let config = Config {
            pattern,
            shape_fill_mode: fill,
            dot_count: n,
            ..Config::default()
        };
        ShapeParams::from_config(&config).unwrap()
    }

    #[test]
    fn spirals_have_no_shape() {
        assert!(ShapeParams::from_config(&Config::default()).is_none());
    }

    #[test]
    fn circle_outline_equal_steps() {
        let n = 24;
        let dots = generate_shape(&shape(PatternType::ShapeCircle, ShapeFillMode::Outline, n));
        assert_eq!(dots.len(), n as usize);
        let step = TAU / n as f64;
        for pair in dots.windows(2) {
            assert!((pair[1].bearing - pair[0].bearing - step).abs() < 1e-12);
        }
        // 100 mm * 0.9 / 2 - 2 mm margin
        for dot in &dots {
            assert!((dot.position.radius() - 43.0).abs() < 1e-9);
        }
    }

    #[test]
    fn rectangle_outline_stays_on_perimeter() {
        let mut params = shape(PatternType::ShapeRectangle, ShapeFillMode::Outline, 40);
        params.half_width_mm = 30.0;
        params.half_height_mm = 20.0;
        params.margin_mm = 0.0;
        let dots = generate_shape(&params);
        assert_eq!(dots.len(), 40);
        assert_eq!(dots[0].position, Point::new(-30.0, -20.0));
        for dot in &dots {
            let p = dot.position;
            let on_x = (p.x.abs() - 30.0).abs() < 1e-9;
            let on_y = (p.y.abs() - 20.0).abs() < 1e-9;
            assert!(on_x || on_y, "{p:?} is off the perimeter");
        }
    }

    #[test]
    fn triangle_is_bounding_box_centered() {
        let [a, b, c] = triangle_vertices(10.0);
        let min_y = a.y.min(b.y).min(c.y);
        let max_y = a.y.max(b.y).max(c.y);
        assert!((min_y + max_y).abs() < 1e-12);
        assert!(a.x.abs() < 1e-12);
        assert!(a.y < 0.0, "apex should point up (negative y)");
    }

    #[test]
    fn triangle_outline_count_and_start() {
        let params = shape(PatternType::ShapeTriangle, ShapeFillMode::Outline, 30);
        let dots = generate_shape(&params);
        assert_eq!(dots.len(), 30);
        let [apex, _, _] = triangle_vertices(43.0);
        assert!(dots[0].position.distance(apex) < 1e-9);
    }

    #[test]
    fn filled_circle_is_vogel_spiral() {
        let dots = generate_shape(&shape(PatternType::ShapeCircle, ShapeFillMode::Filled, 100));
        assert_eq!(dots.len(), 100);
        assert_eq!(dots[0].position.radius(), 0.0);
        assert!((dots[99].position.radius() - 43.0).abs() < 1e-9);
        assert!((dots[1].bearing - GOLDEN_ANGLE_RAD).abs() < 1e-12);
    }

    #[test]
    fn grid_search() {
        assert_eq!(best_grid(12, 4.0 / 3.0), (4, 3));
        assert_eq!(best_grid(16, 1.0), (4, 4));
        assert_eq!(best_grid(50, 2.0), (10, 5));
        assert_eq!(best_grid(7, f64::NAN), (1, 1));
    }

    #[test]
    fn filled_rectangle_spans_corners() {
        let dots = generate_shape(&shape(PatternType::ShapeRectangle, ShapeFillMode::Filled, 16));
        assert_eq!(dots.len(), 16);
        // 90 mm square less 2 mm margin each side
        assert_eq!(dots[0].position, Point::new(-43.0, -43.0));
        assert_eq!(dots[15].position, Point::new(43.0, 43.0));
    }

    #[test]
    fn filled_rectangle_can_fall_short() {
        // A square only admits square grids: 3x3 is the closest to 12.
        assert_eq!(best_grid(12, 1.0), (3, 3));
        let dots = generate_shape(&shape(PatternType::ShapeRectangle, ShapeFillMode::Filled, 12));
        assert_eq!(dots.len(), 9);
    }

    #[test]
    fn filled_triangle_hits_exact_count() {
        for n in [2, 3, 10, 50, 144] {
            let dots = generate_shape(&shape(PatternType::ShapeTriangle, ShapeFillMode::Filled, n));
            assert_eq!(dots.len(), n as usize, "n = {n}");
        }
    }

    #[test]
    fn single_dot_shapes_are_centered() {
        let rect = generate_shape(&shape(PatternType::ShapeRectangle, ShapeFillMode::Filled, 1));
        assert_eq!(rect[0].position, Point::new(0.0, 0.0));
        let circle = generate_shape(&shape(PatternType::ShapeCircle, ShapeFillMode::Filled, 1));
        assert_eq!(circle[0].position.radius(), 0.0);
        let tri = generate_shape(&shape(PatternType::ShapeTriangle, ShapeFillMode::Filled, 1));
        assert_eq!(tri[0].bearing, 0.0);
    }

    #[test]
    fn zero_extent_does_not_panic() {
        for pattern in [
            PatternType::ShapeCircle,
            PatternType::ShapeRectangle,
            PatternType::ShapeTriangle,
        ] {
            for fill in [ShapeFillMode::Outline, ShapeFillMode::Filled] {
                let mut params = shape(pattern, fill, 20);
                params.half_width_mm = 0.0;
                params.half_height_mm = 0.0;
                let dots = generate_shape(&params);
                assert!(!dots.is_empty());
                assert!(dots.iter().all(|d| d.position.x.is_finite() && d.position.y.is_finite()));
            }
        }
    }

    #[test]
    fn collapsed_triangle_stacks_at_centroid() {
        let mut config = Config {
            pattern: PatternType::ShapeTriangle,
            shape_fill_mode: ShapeFillMode::Filled,
            dot_count: 50_000,
            ..Config::default()
        };
        config.edge_margin_mm = 60.0;
        let params = ShapeParams::from_config(&config).unwrap();
        assert_eq!(params.inner_radius(), 0.0);

        let dots = generate_shape(&params);
        assert_eq!(dots.len(), 50_000);
        assert!(dots.iter().all(|d| d.position == Point::new(0.0, 0.0)));
    }

    #[test]
    fn uniform_holes() {
        let mut params = shape(PatternType::ShapeCircle, ShapeFillMode::Outline, 30);
        params.hole_size_mode = HoleSizeMode::Uniform;
        assert!(generate_shape(&params).iter().all(|d| d.radius == 0.5));
    }

    #[test]
    fn fibonacci_holes_are_tiered() {
        let params = shape(PatternType::ShapeCircle, ShapeFillMode::Outline, 12);
        let mut radii: Vec<f64> = generate_shape(&params).iter().map(|d| d.radius).collect();
        radii.sort_by(f64::total_cmp);
        radii.dedup();
        assert_eq!(radii.len(), 3);
    }
}
