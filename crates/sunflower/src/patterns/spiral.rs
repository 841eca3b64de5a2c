//! Phyllotaxis spirals: sunflower, pinecone and the two-armed double spiral.
//!
//! Algorithm (one arm of `count` dots, total pattern size `n`):
//!   r_max  = spacing * sqrt(max(1, n - 1))
//!   for i in 0..count:
//!     t      = i / (count - 1)
//!     radius = r_max * (t ^ (1 + packing)) ^ power
//!     theta  = i * golden_angle + start_angle + arm_offset
//!
//! `r_max` does not depend on power or packing, so those two only reshape
//! the density curve inside a fixed extent.

use tracing::debug;

use crate::color::{self, Rgb, COOL_PALETTE, SPIRAL_PALETTE, WARM_PALETTE};
use crate::config::{Config, SizeGradient};
use crate::geometry::{Dot, Point};
use crate::layout::max_radius;

/// How single-spiral dots are colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpiralColoring {
    /// Every dot gets the primary color.
    Solid,
    /// Distinct hue per family, `index mod families`.
    Families { families: u32 },
    /// Warm fill by `index mod cw`, cool outline by `index mod ccw`.
    DualFamilies { cw: u32, ccw: u32 },
}

/// Parameters shared by every spiral variant.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralParams {
    /// Total dots in the pattern (both arms for the double spiral).
    pub dot_count: u32,
    pub spacing_mm: f64,
    pub radial_power: f64,
    pub center_packing: f64,
    pub golden_angle_rad: f64,
    pub start_angle_rad: f64,
    pub dot_radius_mm: f64,
    pub min_dot_radius_mm: f64,
    pub size_gradient: SizeGradient,
    pub color: Rgb,
    pub coloring: SpiralColoring,
}

impl SpiralParams {
    pub fn from_config(config: &Config) -> Self {
        let coloring = match (config.color_spirals, config.dual_family_colors) {
            (false, _) => SpiralColoring::Solid,
            (true, false) => SpiralColoring::Families {
                families: config.spiral_families.max(1),
            },
            (true, true) => SpiralColoring::DualFamilies {
                cw: config.fib_cw.max(1),
                ccw: config.fib_ccw.max(1),
            },
        };

        Self {
            dot_count: config.effective_dot_count(),
            spacing_mm: config.spacing_mm.max(0.0),
            radial_power: config.radial_power.max(0.0),
            center_packing: config.center_packing,
            golden_angle_rad: config.golden_angle_deg.to_radians(),
            start_angle_rad: config.start_angle_deg.to_radians(),
            dot_radius_mm: config.dot_diameter_mm.max(0.0) / 2.0,
            min_dot_radius_mm: config.min_dot_diameter_mm.max(0.0) / 2.0,
            size_gradient: config.size_gradient,
            color: config.dot_color,
            coloring,
        }
    }

    /// Outer radius of the whole pattern.
    #[inline]
    pub fn max_radius(&self) -> f64 {
        max_radius(self.dot_count, self.spacing_mm)
    }
}

/// Second-arm settings for the double spiral.
#[derive(Debug, Clone, PartialEq)]
pub struct DualArms {
    /// Extra rotation of arm B.
    pub b_offset_rad: f64,
    pub color_b: Rgb,
    /// Family count used to color arm A.
    pub fib_cw: u32,
    /// Family count used to color arm B.
    pub fib_ccw: u32,
    /// Warm/cool palettes instead of shaded base colors.
    pub color_spirals: bool,
}

impl DualArms {
    pub fn from_config(config: &Config) -> Self {
        Self {
            b_offset_rad: config.spiral_b_offset_deg.to_radians(),
            color_b: config.dot_color2,
            fib_cw: config.fib_cw.max(1),
            fib_ccw: config.fib_ccw.max(1),
            color_spirals: config.color_spirals,
        }
    }
}

/// Split a dot count between the two arms: `(ceil(n/2), n - ceil(n/2))`.
///
/// ```
/// use sunflower::patterns::split_arms;
/// assert_eq!(split_arms(7), (4, 3));
/// ```
#[inline]
pub fn split_arms(n: u32) -> (u32, u32) {
    let a = n.div_ceil(2);
    (a, n - a)
}

/// Lay out one arm of `count` dots.
///
/// `pinecone_scale` remaps the size gradient so the smallest dot keeps
/// `1 - scale` of the size range.
fn spiral_arm(
    params: &SpiralParams,
    count: u32,
    arm_offset: f64,
    color: Rgb,
    pinecone_scale: Option<f64>,
) -> Vec<Dot> {
    let r_max = params.max_radius();
    let exponent = (1.0 + params.center_packing).max(0.0);
    let span = count.saturating_sub(1).max(1) as f64;

    (0..count)
        .map(|i| {
            let t = if count > 1 { i as f64 / span } else { 0.0 };

            // A lone dot sits on the center even when 0^0 would say otherwise.
            let radius = if count > 1 {
                r_max * t.powf(exponent).powf(params.radial_power)
            } else {
                0.0
            };
            let theta = i as f64 * params.golden_angle_rad + params.start_angle_rad + arm_offset;

            let dot_radius = match params.size_gradient {
                SizeGradient::None => params.dot_radius_mm,
                gradient => {
                    let mut g = t;
                    if gradient == SizeGradient::OuterInner {
                        g = 1.0 - g;
                    }
                    if let Some(scale) = pinecone_scale {
                        g = (1.0 - scale) + scale * g;
                    }
                    params.min_dot_radius_mm + (params.dot_radius_mm - params.min_dot_radius_mm) * g
                }
            };

            Dot::new(Point::polar(radius, theta), dot_radius, theta, color)
        })
        .collect()
}

/// Apply single-spiral family coloring in generation order.
fn color_families(dots: &mut [Dot], coloring: SpiralColoring) {
    match coloring {
        SpiralColoring::Solid => {}
        SpiralColoring::Families { families } => {
            for (i, dot) in dots.iter_mut().enumerate() {
                dot.fill = color::palette_color(&SPIRAL_PALETTE, i % families as usize);
            }
        }
        SpiralColoring::DualFamilies { cw, ccw } => {
            for (i, dot) in dots.iter_mut().enumerate() {
                dot.fill = color::palette_color(&WARM_PALETTE, i % cw as usize);
                dot.stroke = Some(color::palette_color(&COOL_PALETTE, i % ccw as usize));
            }
        }
    }
}

/// Classic sunflower: one arm of round dots.
pub fn generate_sunflower(params: &SpiralParams) -> Vec<Dot> {
    let mut dots = spiral_arm(params, params.dot_count, 0.0, params.color, None);
    color_families(&mut dots, params.coloring);
    dots
}

/// Pinecone: one arm whose size gradient keeps at least `1 - scale` of the range.
///
/// The dots are drawn as diamonds along their bearing; see
/// [`Dot::diamond`](crate::geometry::Dot::diamond).
pub fn generate_pinecone(params: &SpiralParams, scale: f64) -> Vec<Dot> {
    let mut dots = spiral_arm(params, params.dot_count, 0.0, params.color, Some(scale));
    color_families(&mut dots, params.coloring);
    dots
}

/// Double spiral: arm A then arm B, each colored by its own family count.
pub fn generate_double_spiral(params: &SpiralParams, arms: &DualArms) -> Vec<Dot> {
    let (n_a, n_b) = split_arms(params.dot_count);

    let mut arm_a = spiral_arm(params, n_a, 0.0, params.color, None);
    let mut arm_b = spiral_arm(params, n_b, arms.b_offset_rad, arms.color_b, None);

    let cw = arms.fib_cw as usize;
    let ccw = arms.fib_ccw as usize;
    for (i, dot) in arm_a.iter_mut().enumerate() {
        dot.fill = if arms.color_spirals {
            color::palette_color(&WARM_PALETTE, i % cw)
        } else {
            color::shade(params.color, i % cw, cw)
        };
    }
    for (i, dot) in arm_b.iter_mut().enumerate() {
        dot.fill = if arms.color_spirals {
            color::palette_color(&COOL_PALETTE, i % ccw)
        } else {
            color::shade(arms.color_b, i % ccw, ccw)
        };
    }

    debug!(arm_a = n_a, arm_b = n_b, "double spiral arms");
    arm_a.append(&mut arm_b);
    arm_a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GOLDEN_ANGLE_DEG;
    use std::f64::consts::PI;

    fn params(n: u32) -> SpiralParams {
        let config = Config {
            dot_count: n,
            ..Config::default()
        };
        SpiralParams::from_config(&config)
    }

    fn outermost(dots: &[Dot]) -> f64 {
        dots.iter().map(|d| d.position.radius()).fold(0.0, f64::max)
    }

    #[test]
    fn last_dot_reaches_max_radius() {
        for power in [0.0, 0.25, 0.5, 1.0, 2.0] {
            let p = SpiralParams {
                radial_power: power,
                ..params(50)
            };
            let dots = generate_sunflower(&p);
            assert_eq!(dots.len(), 50);
            assert!((outermost(&dots) - 2.2 * 7.0).abs() < 1e-9, "power {power}");
        }
    }

    #[test]
    fn single_dot_sits_at_center() {
        let p = SpiralParams {
            radial_power: 0.0,
            center_packing: -1.0,
            ..params(1)
        };
        let dots = generate_sunflower(&p);
        assert_eq!(dots.len(), 1);
        assert_eq!(dots[0].position.radius(), 0.0);
    }

    #[test]
    fn angles_step_by_golden_angle() {
        let dots = generate_sunflower(&params(5));
        let step = GOLDEN_ANGLE_DEG.to_radians();
        for (i, dot) in dots.iter().enumerate() {
            assert!((dot.bearing - i as f64 * step).abs() < 1e-12);
        }
    }

    #[test]
    fn packing_pulls_dots_inward() {
        let linear = generate_sunflower(&params(100));
        let packed = generate_sunflower(&SpiralParams {
            center_packing: 2.0,
            ..params(100)
        });
        assert!(packed[50].position.radius() < linear[50].position.radius());
        assert!((outermost(&packed) - outermost(&linear)).abs() < 1e-9);
    }

    #[test]
    fn inner_outer_gradient() {
        let p = SpiralParams {
            size_gradient: SizeGradient::InnerOuter,
            ..params(11)
        };
        let dots = generate_sunflower(&p);
        assert!((dots[0].radius - 0.1).abs() < 1e-12);
        assert!((dots[10].radius - 0.5).abs() < 1e-12);

        let reversed = generate_sunflower(&SpiralParams {
            size_gradient: SizeGradient::OuterInner,
            ..p
        });
        assert!((reversed[0].radius - 0.5).abs() < 1e-12);
        assert!((reversed[10].radius - 0.1).abs() < 1e-12);
    }

    #[test]
    fn pinecone_gradient_keeps_floor() {
        let p = SpiralParams {
            size_gradient: SizeGradient::InnerOuter,
            ..params(11)
        };
        let dots = generate_pinecone(&p, 0.7);
        // g = 0.3 at the center: 0.1 + 0.4 * 0.3
        assert!((dots[0].radius - 0.22).abs() < 1e-12);
        assert!((dots[10].radius - 0.5).abs() < 1e-12);
    }

    #[test]
    fn split_arms_sum() {
        assert_eq!(split_arms(7), (4, 3));
        assert_eq!(split_arms(1), (1, 0));
        for n in 0..100 {
            let (a, b) = split_arms(n);
            assert_eq!(a + b, n);
            assert!(a >= b && a - b <= 1);
        }
    }

    #[test]
    fn double_spiral_arm_b_is_offset() {
        let p = params(10);
        let arms = DualArms {
            b_offset_rad: PI,
            color_b: Rgb::BLACK,
            fib_cw: 21,
            fib_ccw: 34,
            color_spirals: true,
        };
        let dots = generate_double_spiral(&p, &arms);
        assert_eq!(dots.len(), 10);
        assert!((dots[5].bearing - PI).abs() < 1e-12);
        assert_eq!(dots[0].fill, WARM_PALETTE[0]);
        assert_eq!(dots[5].fill, COOL_PALETTE[0]);
        assert_eq!(dots[6].fill, COOL_PALETTE[1]);
    }

    #[test]
    fn double_spiral_shades_families() {
        let p = params(50);
        let arms = DualArms {
            b_offset_rad: PI,
            color_b: Rgb::WHITE,
            fib_cw: 21,
            fib_ccw: 34,
            color_spirals: false,
        };
        let dots = generate_double_spiral(&p, &arms);
        assert_eq!(dots[0].fill, color::shade(p.color, 0, 21));
        assert_eq!(dots[21].fill, dots[0].fill);
        assert_eq!(dots[25].fill, color::shade(Rgb::WHITE, 0, 34));
    }

    #[test]
    fn families_cycle_by_modulus() {
        let p = SpiralParams {
            coloring: SpiralColoring::Families { families: 21 },
            ..params(50)
        };
        let dots = generate_sunflower(&p);
        assert_eq!(dots[21].fill, dots[0].fill);
        assert_ne!(dots[1].fill, dots[0].fill);
    }

    #[test]
    fn dual_families_set_outline() {
        let p = SpiralParams {
            coloring: SpiralColoring::DualFamilies { cw: 21, ccw: 34 },
            ..params(40)
        };
        let dots = generate_sunflower(&p);
        assert_eq!(dots[22].fill, WARM_PALETTE[1]);
        assert_eq!(dots[22].stroke, Some(COOL_PALETTE[22]));
    }
}
