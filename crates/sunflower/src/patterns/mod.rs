//! Dot pattern generators.
//!
//! Every pattern is a pure function from a [`Config`] to an ordered list of
//! [`Dot`]s. [`Variant`] carries the per-pattern parameters and
//! [`generate`] is the single entry point.

mod shapes;
mod spiral;

pub use shapes::{best_grid, generate_shape, triangle_vertices, ShapeKind, ShapeParams};
pub use spiral::{
    generate_double_spiral, generate_pinecone, generate_sunflower, split_arms, DualArms,
    SpiralColoring, SpiralParams,
};

use tracing::debug;

use crate::config::{Config, PatternType};
use crate::geometry::{Canvas, Dot, Marker};

/// A pattern with its parameters resolved from a [`Config`].
///
/// ## Rust Lesson #24: Enums Carrying Parameters
///
/// Each variant carries only the fields its generator reads, so a pinecone
/// can't accidentally see shape margins and a shape can't see spiral arms.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Sunflower(SpiralParams),
    Pinecone { spiral: SpiralParams, scale: f64 },
    DoubleSpiral { spiral: SpiralParams, arms: DualArms },
    Shape(ShapeParams),
}

impl Variant {
    pub fn from_config(config: &Config) -> Self {
        if let Some(shape) = ShapeParams::from_config(config) {
            return Variant::Shape(shape);
        }

        let spiral = SpiralParams::from_config(config);
        match config.pattern {
            PatternType::Pinecone => Variant::Pinecone {
                spiral,
                scale: config.pinecone_scale,
            },
            PatternType::DoubleSpiral => Variant::DoubleSpiral {
                // Arms use their own family coloring.
                spiral: SpiralParams {
                    coloring: SpiralColoring::Solid,
                    ..spiral
                },
                arms: DualArms::from_config(config),
            },
            _ => Variant::Sunflower(spiral),
        }
    }

    /// Run the generator for this variant.
    pub fn generate(&self) -> Vec<Dot> {
        match self {
            Variant::Sunflower(spiral) => generate_sunflower(spiral),
            Variant::Pinecone { spiral, scale } => generate_pinecone(spiral, *scale),
            Variant::DoubleSpiral { spiral, arms } => generate_double_spiral(spiral, arms),
            Variant::Shape(shape) => generate_shape(shape),
        }
    }
}

/// Generate the dots for a configuration.
///
/// Deterministic: the same config always yields the same list, in the same
/// order.
pub fn generate(config: &Config) -> Vec<Dot> {
    let dots = Variant::from_config(config).generate();
    debug!(pattern = %config.pattern, dots = dots.len(), "generated pattern");
    dots
}

/// How dots are painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Filled markers, or outlines only.
    pub fill_dots: bool,
    /// 0.0 to 1.0
    pub opacity: f64,
}

/// A generated pattern plus what a renderer needs to draw it.
///
/// The preview, SVG and DXF outputs all read the same `Sheet`, so they
/// can't disagree about where a dot is.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub pattern: PatternType,
    pub dots: Vec<Dot>,
    pub canvas: Canvas,
    pub marker: Marker,
    pub style: Style,
}

impl Sheet {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pattern: config.pattern,
            dots: generate(config),
            canvas: config.canvas,
            marker: config.pattern.marker(),
            style: Style {
                fill_dots: config.fill_dots,
                opacity: config.dot_opacity.clamp(0.0, 1.0),
            },
        }
    }
}

/// One-line statistics for a configuration.
///
/// ```
/// use sunflower::{summary, Config};
/// assert_eq!(
///     summary(&Config::default()),
///     "Pattern: sunflower | Radius: 15.4 mm | Dots: 50 | Power: 0.50"
/// );
/// ```
pub fn summary(config: &Config) -> String {
    let n = config.effective_dot_count();
    let r_max = crate::layout::max_radius(n, config.spacing_mm);

    match config.pattern {
        PatternType::DoubleSpiral => {
            let (a, b) = split_arms(n);
            format!(
                "{} CW \u{d7} {} CCW spirals | Radius: {:.1} mm | Dots: {} ({} + {})",
                config.fib_cw, config.fib_ccw, r_max, n, a, b
            )
        }
        pattern => format!(
            "Pattern: {} | Radius: {:.1} mm | Dots: {} | Power: {:.2}",
            pattern, r_max, n, config.radial_power
        ),
    }
}
