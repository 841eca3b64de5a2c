//! Core geometry types for sunflower.
//!
//! All coordinates are millimeters relative to the pattern center, with the
//! Y axis pointing down (screen convention). Exporters convert from here.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = can duplicate the value (Copy = implicitly)
//! - `PartialEq` = can compare with `==`

use crate::color::Rgb;

/// CSS reference pixels per millimeter (96 dpi).
pub const PX_PER_MM: f64 = 3.7795275591;

/// Diamond long half-axis as a multiple of the dot radius (along the bearing).
pub const DIAMOND_LONG: f64 = 2.0;

/// Diamond short half-axis as a multiple of the dot radius (across the bearing).
pub const DIAMOND_SHORT: f64 = 0.9;

/// Convert millimeters to CSS pixels.
#[inline]
pub fn mm_to_px(mm: f64) -> f64 {
    mm * PX_PER_MM
}

/// A 2D point in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` along `angle` (radians) from the origin.
    #[inline]
    pub fn polar(radius: f64, angle: f64) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Distance from the pattern center.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle from the pattern center, as `atan2(y, x)`.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Linear interpolation from `self` toward `other`.
    #[inline]
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(self.x + t * (other.x - self.x), self.y + t * (other.y - self.y))
    }
}

/// The shape a renderer draws for each dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    /// Radially oriented rhombus (pinecone scales).
    Diamond,
}

/// One rendered primitive.
///
/// Generation order matters for color-family assignment only; renderers may
/// draw dots in any order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    /// Center, in mm from the pattern center.
    pub position: Point,
    /// Marker radius in mm (never negative).
    pub radius: f64,
    /// Orientation in radians, used to rotate non-circular markers.
    pub bearing: f64,
    pub fill: Rgb,
    /// Separate outline color (dual-family coloring only).
    pub stroke: Option<Rgb>,
}

impl Dot {
    pub fn new(position: Point, radius: f64, bearing: f64, fill: Rgb) -> Self {
        Self {
            position,
            radius: radius.max(0.0),
            bearing,
            fill,
            stroke: None,
        }
    }

    /// Diamond vertices in mm: outer tip, right, inner tip, left.
    pub fn diamond(&self) -> [Point; 4] {
        let long_r = self.radius * DIAMOND_LONG;
        let short_r = self.radius * DIAMOND_SHORT;
        let (sin, cos) = self.bearing.sin_cos();
        [
            (long_r, 0.0),
            (0.0, short_r),
            (-long_r, 0.0),
            (0.0, -short_r),
        ]
        .map(|(px, py)| {
            Point::new(
                self.position.x + px * cos - py * sin,
                self.position.y + px * sin + py * cos,
            )
        })
    }
}

/// Physical drawing area in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl Canvas {
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self { width_mm, height_mm }
    }

    /// Half of the smaller side: radius of the inscribed circle.
    #[inline]
    pub fn inscribed_radius(&self) -> f64 {
        self.width_mm.min(self.height_mm).max(0.0) / 2.0
    }

    /// Canvas size in device pixels at the given preview scale.
    pub fn size_px(&self, scale: f64) -> (u32, u32) {
        let to_px = |mm: f64| (mm_to_px(mm.max(0.0)) * scale).round().max(1.0) as u32;
        (to_px(self.width_mm), to_px(self.height_mm))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(100.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn polar_roundtrip() {
        let p = Point::polar(5.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 5.0).abs() < 1e-12);
        assert!((p.radius() - 5.0).abs() < 1e-12);
        assert!((p.angle() - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn diamond_is_oriented_along_bearing() {
        let dot = Dot::new(Point::new(10.0, 0.0), 1.0, 0.0, Rgb::BLACK);
        let [tip, right, inner, left] = dot.diamond();
        assert_eq!(tip, Point::new(12.0, 0.0));
        assert_eq!(inner, Point::new(8.0, 0.0));
        assert!((right.y - 0.9).abs() < 1e-12);
        assert!((left.y + 0.9).abs() < 1e-12);
    }

    #[test]
    fn negative_radius_clamps_to_zero() {
        let dot = Dot::new(Point::new(0.0, 0.0), -3.0, 0.0, Rgb::BLACK);
        assert_eq!(dot.radius, 0.0);
    }

    #[test]
    fn canvas_pixel_size() {
        let canvas = Canvas::new(100.0, 50.0);
        assert_eq!(canvas.size_px(1.0), (378, 189));
        assert_eq!(canvas.inscribed_radius(), 25.0);
    }
}
