//! Generation parameters.
//!
//! A [`Config`] is a flat, immutable snapshot of every control. Generating a
//! new pattern means building a new `Config` and calling
//! [`generate`](crate::generate) again; nothing is shared between calls.
//!
//! ## Rust Lesson #25: `try_from` / `into` for Serde
//!
//! The stored form of a config (preset files, YAML/JSON config files) uses
//! the original camelCase keys, every one optional. Rather than sprinkling
//! `Option` through `Config`, serde goes through a separate
//! [`ConfigRecord`]: `#[serde(try_from = "ConfigRecord")]` fills the gaps
//! with defaults and turns unknown variant names into errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::geometry::{Canvas, Marker};

/// The true golden angle in degrees: 360 * (1 - 1/phi).
pub const GOLDEN_ANGLE_DEG: f64 = 137.507_764_050_037_85;

/// Requested golden angles closer than this (degrees) snap to the exact value.
pub const GOLDEN_SNAP_THRESHOLD: f64 = 0.15;

/// Snap an angle near the golden angle onto it exactly.
///
/// ```
/// use sunflower::config::{snap_golden_angle, GOLDEN_ANGLE_DEG};
/// assert_eq!(snap_golden_angle(137.5), GOLDEN_ANGLE_DEG);
/// assert_eq!(snap_golden_angle(137.3), 137.3);
/// ```
pub fn snap_golden_angle(deg: f64) -> f64 {
    if (deg - GOLDEN_ANGLE_DEG).abs() < GOLDEN_SNAP_THRESHOLD {
        GOLDEN_ANGLE_DEG
    } else {
        deg
    }
}

/// Available pattern types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PatternType {
    #[default]
    Sunflower,
    Pinecone,
    DoubleSpiral,
    ShapeCircle,
    ShapeRectangle,
    ShapeTriangle,
}

impl PatternType {
    /// Get all available pattern types.
    pub fn all() -> &'static [PatternType] {
        &[
            PatternType::Sunflower,
            PatternType::Pinecone,
            PatternType::DoubleSpiral,
            PatternType::ShapeCircle,
            PatternType::ShapeRectangle,
            PatternType::ShapeTriangle,
        ]
    }

    /// Get pattern name as string.
    pub fn name(&self) -> &'static str {
        match self {
            PatternType::Sunflower => "sunflower",
            PatternType::Pinecone => "pinecone",
            PatternType::DoubleSpiral => "double-spiral",
            PatternType::ShapeCircle => "shape-circle",
            PatternType::ShapeRectangle => "shape-rectangle",
            PatternType::ShapeTriangle => "shape-triangle",
        }
    }

    /// Parse pattern from string.
    pub fn from_name(name: &str) -> Option<PatternType> {
        match name.trim().to_lowercase().as_str() {
            "sunflower" | "phyllotaxis" => Some(PatternType::Sunflower),
            "pinecone" => Some(PatternType::Pinecone),
            "double-spiral" | "dual" => Some(PatternType::DoubleSpiral),
            "shape-circle" | "circle" => Some(PatternType::ShapeCircle),
            "shape-rectangle" | "rectangle" | "rect" => Some(PatternType::ShapeRectangle),
            "shape-triangle" | "triangle" => Some(PatternType::ShapeTriangle),
            _ => None,
        }
    }

    /// Brief description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            PatternType::Sunflower => "Phyllotaxis spiral of round dots",
            PatternType::Pinecone => "Phyllotaxis spiral of radially oriented diamonds",
            PatternType::DoubleSpiral => "Two interleaved spiral arms, CW and CCW families",
            PatternType::ShapeCircle => "Dots around or inside a circle",
            PatternType::ShapeRectangle => "Dots around or inside a rectangle",
            PatternType::ShapeTriangle => "Dots around or inside an equilateral triangle",
        }
    }

    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            PatternType::ShapeCircle | PatternType::ShapeRectangle | PatternType::ShapeTriangle
        )
    }

    /// Marker drawn for each dot of this pattern.
    pub fn marker(&self) -> Marker {
        match self {
            PatternType::Pinecone => Marker::Diamond,
            _ => Marker::Circle,
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::UnknownPattern(s.to_string()))
    }
}

/// Generates `name()`, `from_name()`, `Display` and `FromStr` for a
/// categorical option whose names map one-to-one onto variants.
macro_rules! named_option {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn name(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }

            pub fn from_name(name: &str) -> Option<$ty> {
                match name.trim().to_lowercase().as_str() {
                    $($name => Some($ty::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::from_name(s).ok_or_else(|| Error::UnknownOption {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }
    };
}

/// How dot size varies along a spiral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeGradient {
    #[default]
    None,
    /// Small at the center, full size at the edge.
    InnerOuter,
    /// Full size at the center, small at the edge.
    OuterInner,
}

named_option!(SizeGradient, "size gradient", {
    None => "none",
    InnerOuter => "inner-outer",
    OuterInner => "outer-inner",
});

/// Whether shape patterns trace the perimeter or fill the interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeFillMode {
    #[default]
    Outline,
    Filled,
}

named_option!(ShapeFillMode, "shape fill mode", {
    Outline => "outline",
    Filled => "filled",
});

/// Dot sizing for shape patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoleSizeMode {
    Uniform,
    /// Shuffled Fibonacci size tiers.
    #[default]
    Fibonacci,
}

named_option!(HoleSizeMode, "hole size mode", {
    Uniform => "uniform",
    Fibonacci => "fibonacci",
});

/// Every parameter of one generation call.
///
/// Lengths are millimeters, angles degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigRecord", into = "ConfigRecord")]
pub struct Config {
    pub pattern: PatternType,
    pub canvas: Canvas,

    // Spiral law
    pub dot_count: u32,
    pub spacing_mm: f64,
    pub radial_power: f64,
    pub center_packing: f64,
    pub start_angle_deg: f64,
    pub golden_angle_deg: f64,
    pub spiral_b_offset_deg: f64,
    pub pinecone_scale: f64,

    // Dot size
    pub dot_diameter_mm: f64,
    pub min_dot_diameter_mm: f64,
    pub size_gradient: SizeGradient,

    // Color
    pub dot_color: Rgb,
    pub dot_color2: Rgb,
    pub color_spirals: bool,
    pub dual_family_colors: bool,
    pub spiral_families: u32,
    pub fib_cw: u32,
    pub fib_ccw: u32,

    // Shapes
    pub edge_margin_mm: f64,
    pub shape_fill_mode: ShapeFillMode,
    pub hole_size_mode: HoleSizeMode,
    pub shape_size_pct: f64,

    // Rendering
    pub fill_dots: bool,
    pub dot_opacity: f64,
    pub show_grid: bool,
    pub show_major_grid: bool,
    pub show_axes: bool,
    pub show_labels: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: PatternType::Sunflower,
            canvas: Canvas::default(),
            dot_count: 50,
            spacing_mm: 2.2,
            radial_power: 0.5,
            center_packing: 0.0,
            start_angle_deg: 0.0,
            golden_angle_deg: GOLDEN_ANGLE_DEG,
            spiral_b_offset_deg: 180.0,
            pinecone_scale: 0.7,
            dot_diameter_mm: 1.0,
            min_dot_diameter_mm: 0.2,
            size_gradient: SizeGradient::None,
            dot_color: Rgb::new(0xd4, 0xa0, 0x17),
            dot_color2: Rgb::new(0x43, 0x63, 0xd8),
            color_spirals: false,
            dual_family_colors: false,
            spiral_families: 21,
            fib_cw: 21,
            fib_ccw: 34,
            edge_margin_mm: 2.0,
            shape_fill_mode: ShapeFillMode::Outline,
            hole_size_mode: HoleSizeMode::Fibonacci,
            shape_size_pct: 90.0,
            fill_dots: true,
            dot_opacity: 1.0,
            show_grid: true,
            show_major_grid: true,
            show_axes: true,
            show_labels: true,
        }
    }
}

impl Config {
    /// Dot count with the `>= 1` floor applied.
    #[inline]
    pub fn effective_dot_count(&self) -> u32 {
        self.dot_count.max(1)
    }

    /// Replace the spacing with the auto-fit value for the current canvas.
    pub fn with_auto_fit(mut self) -> Self {
        self.spacing_mm = crate::layout::auto_fit_spacing(
            self.effective_dot_count(),
            self.canvas.width_mm,
            self.canvas.height_mm,
            self.edge_margin_mm,
        );
        self
    }

    /// Decode a stored record, filling missing fields from the defaults.
    pub fn from_record(record: ConfigRecord) -> Result<Self> {
        let d = Config::default();

        let pattern = match record.pattern_type.as_deref() {
            Some(name) => name.parse()?,
            None => d.pattern,
        };
        let size_gradient = match record.size_gradient.as_deref() {
            Some(name) => name.parse()?,
            None => d.size_gradient,
        };
        let shape_fill_mode = match record.shape_fill_mode.as_deref() {
            Some(name) => name.parse()?,
            None => d.shape_fill_mode,
        };
        let hole_size_mode = match (record.hole_size_mode.as_deref(), record.shape_fib_sizes) {
            (Some(name), _) => name.parse()?,
            (None, Some(false)) => HoleSizeMode::Uniform,
            (None, _) => d.hole_size_mode,
        };

        Ok(Self {
            pattern,
            canvas: Canvas::new(
                record.canvas_width.unwrap_or(d.canvas.width_mm),
                record.canvas_height.unwrap_or(d.canvas.height_mm),
            ),
            dot_count: record.num_dots.unwrap_or(d.dot_count),
            spacing_mm: record.spacing.unwrap_or(d.spacing_mm),
            radial_power: record.radial_power.unwrap_or(d.radial_power),
            center_packing: record.center_packing.unwrap_or(d.center_packing),
            start_angle_deg: record.start_angle.unwrap_or(d.start_angle_deg),
            golden_angle_deg: record.golden_angle.unwrap_or(d.golden_angle_deg),
            spiral_b_offset_deg: record.spiral_b_offset.unwrap_or(d.spiral_b_offset_deg),
            pinecone_scale: record.pinecone_scale.unwrap_or(d.pinecone_scale),
            dot_diameter_mm: record.dot_size.unwrap_or(d.dot_diameter_mm),
            min_dot_diameter_mm: record.dot_size_min.unwrap_or(d.min_dot_diameter_mm),
            size_gradient,
            dot_color: color_or(record.dot_color.as_deref(), "dotColor", d.dot_color),
            dot_color2: color_or(record.dot_color2.as_deref(), "dotColor2", d.dot_color2),
            color_spirals: record.color_spirals.unwrap_or(d.color_spirals),
            dual_family_colors: record.dual_family_colors.unwrap_or(d.dual_family_colors),
            spiral_families: record.spiral_families.unwrap_or(d.spiral_families),
            fib_cw: record.fib_cw.unwrap_or(d.fib_cw),
            fib_ccw: record.fib_ccw.unwrap_or(d.fib_ccw),
            edge_margin_mm: record
                .edge_margin
                .or(record.shape_margin)
                .unwrap_or(d.edge_margin_mm),
            shape_fill_mode,
            hole_size_mode,
            shape_size_pct: record.shape_size.unwrap_or(d.shape_size_pct),
            fill_dots: record.fill_dots.unwrap_or(d.fill_dots),
            dot_opacity: record.dot_opacity.unwrap_or(d.dot_opacity),
            show_grid: record.show_grid.unwrap_or(d.show_grid),
            show_major_grid: record.show_major_grid.unwrap_or(d.show_major_grid),
            show_axes: record.show_axes.unwrap_or(d.show_axes),
            show_labels: record.show_labels.unwrap_or(d.show_labels),
        })
    }
}

fn color_or(value: Option<&str>, key: &str, fallback: Rgb) -> Rgb {
    match value {
        None => fallback,
        Some(s) => Rgb::parse(s).unwrap_or_else(|_| {
            warn!(key, value = s, "unparseable color, using default {fallback}");
            fallback
        }),
    }
}

/// The stored form of a [`Config`], keyed the way saved presets are.
///
/// Every field is optional so records written by older versions still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_dots: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radial_power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot_size_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub golden_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_grid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_major_grid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_axes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_labels: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot_color2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinecone_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spiral_b_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_packing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_dots: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_spirals: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_gradient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_margin: Option<f64>,
    /// Older name of `edgeMargin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_margin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_fill_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hole_size_mode: Option<String>,
    /// Older boolean form of `holeSizeMode` (`false` = uniform).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_fib_sizes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spiral_families: Option<u32>,
    #[serde(default, rename = "fibCW", skip_serializing_if = "Option::is_none")]
    pub fib_cw: Option<u32>,
    #[serde(default, rename = "fibCCW", skip_serializing_if = "Option::is_none")]
    pub fib_ccw: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dual_family_colors: Option<bool>,
}

impl From<Config> for ConfigRecord {
    fn from(c: Config) -> Self {
        Self {
            canvas_width: Some(c.canvas.width_mm),
            canvas_height: Some(c.canvas.height_mm),
            num_dots: Some(c.dot_count),
            spacing: Some(c.spacing_mm),
            radial_power: Some(c.radial_power),
            dot_size: Some(c.dot_diameter_mm),
            dot_size_min: Some(c.min_dot_diameter_mm),
            dot_opacity: Some(c.dot_opacity),
            start_angle: Some(c.start_angle_deg),
            golden_angle: Some(c.golden_angle_deg),
            show_grid: Some(c.show_grid),
            show_major_grid: Some(c.show_major_grid),
            show_axes: Some(c.show_axes),
            show_labels: Some(c.show_labels),
            dot_color: Some(c.dot_color.to_string()),
            dot_color2: Some(c.dot_color2.to_string()),
            pattern_type: Some(c.pattern.name().to_string()),
            pinecone_scale: Some(c.pinecone_scale),
            spiral_b_offset: Some(c.spiral_b_offset_deg),
            center_packing: Some(c.center_packing),
            fill_dots: Some(c.fill_dots),
            color_spirals: Some(c.color_spirals),
            size_gradient: Some(c.size_gradient.name().to_string()),
            edge_margin: Some(c.edge_margin_mm),
            shape_margin: None,
            shape_fill_mode: Some(c.shape_fill_mode.name().to_string()),
            hole_size_mode: Some(c.hole_size_mode.name().to_string()),
            shape_fib_sizes: None,
            shape_size: Some(c.shape_size_pct),
            spiral_families: Some(c.spiral_families),
            fib_cw: Some(c.fib_cw),
            fib_ccw: Some(c.fib_ccw),
            dual_family_colors: Some(c.dual_family_colors),
        }
    }
}

impl TryFrom<ConfigRecord> for Config {
    type Error = Error;

    fn try_from(record: ConfigRecord) -> Result<Self> {
        Config::from_record(record)
    }
}
