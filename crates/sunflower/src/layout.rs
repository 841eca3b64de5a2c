//! Layout and sizing helpers shared by the pattern generators.
//!
//! - Fibonacci decomposition of the dot count into size groups
//! - Per-dot size tiers, shuffled with the deterministic [`Rng`]
//! - The spiral extent formula and the auto-fit solver that inverts it

use tracing::debug;

use crate::rng::Rng;

/// Fibonacci numbers used for size grouping, including the leading `1, 1`.
///
/// The duplicate is kept on purpose so group sizes match existing layouts.
pub const FIB_TABLE: [u32; 19] = [
    1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610, 987, 1597, 2584, 4181,
];

/// Fraction of the usable half-extent the auto-fit spiral should fill.
pub const AUTO_FIT_FILL: f64 = 0.85;

/// Spacing range accepted by auto-fit (mm).
pub const SPACING_MIN: f64 = 0.1;
pub const SPACING_MAX: f64 = 15.0;

/// Split `n` into Fibonacci addends, greedily taking the largest that fits.
///
/// A remainder the table cannot cover becomes one extra group. Groups are
/// returned smallest first.
///
/// ```
/// use sunflower::layout::fib_decompose;
/// assert_eq!(fib_decompose(12), vec![1, 3, 8]);
/// ```
pub fn fib_decompose(n: u32) -> Vec<u32> {
    let mut groups = Vec::new();
    let mut remaining = n;

    for &fib in FIB_TABLE.iter().rev() {
        if remaining == 0 {
            break;
        }
        if fib <= remaining {
            groups.push(fib);
            remaining -= fib;
        }
    }

    if remaining > 0 {
        groups.push(remaining);
    }

    groups.sort_unstable();
    groups
}

/// Radius for every dot index, drawn from Fibonacci size tiers.
///
/// Each group from [`fib_decompose`] becomes one tier, interpolated from
/// `min_diameter / 2` (first, smallest group) to `base_diameter / 2` (last,
/// largest group). The per-dot list is then shuffled with the generator
/// seeded from `n`, so the result is exactly reproducible for a given count.
pub fn fibonacci_radii(n: u32, min_diameter: f64, base_diameter: f64) -> Vec<f64> {
    if n <= 1 {
        return vec![(base_diameter / 2.0).max(0.0); n as usize];
    }

    let groups = fib_decompose(n);
    let tiers = groups.len();

    let mut radii = Vec::with_capacity(n as usize);
    for (g, &size) in groups.iter().enumerate() {
        let t = if tiers > 1 {
            g as f64 / (tiers - 1) as f64
        } else {
            0.5
        };
        let radius = ((min_diameter + (base_diameter - min_diameter) * t) / 2.0).max(0.0);
        radii.extend(std::iter::repeat_n(radius, size as usize));
    }

    Rng::for_dot_count(n).shuffle(&mut radii);

    debug!(dots = n, tiers, ?groups, "fibonacci size tiers");
    radii
}

/// Outer radius of a spiral of `n` dots: `spacing * sqrt(max(1, n - 1))`.
///
/// Independent of radial power and center packing, which only reshape the
/// density curve inside this extent.
#[inline]
pub fn max_radius(n: u32, spacing_mm: f64) -> f64 {
    spacing_mm.max(0.0) * (n.saturating_sub(1).max(1) as f64).sqrt()
}

/// Exact spacing whose spiral reaches 85% of the usable canvas half-extent.
///
/// The inverse of [`max_radius`]. Not rounded or clamped, so it can be zero
/// or negative when the margin eats the canvas.
pub fn auto_fit_exact(n: u32, width_mm: f64, height_mm: f64, margin_mm: f64) -> f64 {
    let half_min = width_mm.min(height_mm) / 2.0;
    let target = (half_min - margin_mm) * AUTO_FIT_FILL;
    target / (n.saturating_sub(1).max(1) as f64).sqrt()
}

/// [`auto_fit_exact`] rounded to one decimal and clamped to the spacing
/// range, as stored in a config.
pub fn auto_fit_spacing(n: u32, width_mm: f64, height_mm: f64, margin_mm: f64) -> f64 {
    let spacing = auto_fit_exact(n, width_mm, height_mm, margin_mm);
    let rounded = (spacing * 10.0).round() / 10.0;
    let fitted = rounded.clamp(SPACING_MIN, SPACING_MAX);
    debug!(dots = n, exact = spacing, spacing = fitted, "auto-fit spacing");
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_twelve() {
        assert_eq!(fib_decompose(12), vec![1, 3, 8]);
    }

    #[test]
    fn decomposes_one() {
        assert_eq!(fib_decompose(1), vec![1]);
    }

    #[test]
    fn decompositions_sum_to_n() {
        for n in 1..3000 {
            let groups = fib_decompose(n);
            assert_eq!(groups.iter().sum::<u32>(), n, "n = {n}");
            assert!(groups.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn fibonacci_numbers_are_single_groups() {
        assert_eq!(fib_decompose(2), vec![2]);
        assert_eq!(fib_decompose(21), vec![21]);
        assert_eq!(fib_decompose(50), vec![3, 13, 34]);
    }

    #[test]
    fn beyond_table_leaves_remainder_group() {
        let total: u32 = FIB_TABLE.iter().sum();
        let groups = fib_decompose(total + 500);
        assert_eq!(groups[0], 500);
        assert_eq!(groups.len(), FIB_TABLE.len() + 1);
    }

    #[test]
    fn radii_follow_group_sizes() {
        let radii = fibonacci_radii(12, 0.2, 1.0);
        assert_eq!(radii.len(), 12);

        let count = |r: f64| radii.iter().filter(|&&x| (x - r).abs() < 1e-12).count();
        // groups [1, 3, 8] -> tiers 0.1, 0.3, 0.5
        assert_eq!(count(0.1), 1);
        assert_eq!(count(0.3), 3);
        assert_eq!(count(0.5), 8);
    }

    #[test]
    fn shuffled_tiers_for_twelve() {
        let expected = [0.5, 0.5, 0.5, 0.5, 0.5, 0.3, 0.3, 0.5, 0.5, 0.3, 0.5, 0.1];
        let radii = fibonacci_radii(12, 0.2, 1.0);
        assert_eq!(radii.len(), expected.len());
        for (i, (got, want)) in radii.iter().zip(expected).enumerate() {
            assert!((got - want).abs() < 1e-12, "dot {i}: {got} != {want}");
        }
    }

    #[test]
    fn radii_are_reproducible() {
        assert_eq!(fibonacci_radii(89, 0.2, 1.0), fibonacci_radii(89, 0.2, 1.0));
    }

    #[test]
    fn single_group_uses_midpoint_tier() {
        let radii = fibonacci_radii(2, 0.2, 1.0);
        assert_eq!(radii.len(), 2);
        assert!(radii.iter().all(|r| (r - 0.3).abs() < 1e-12));
    }

    #[test]
    fn single_dot_uses_base_size() {
        assert_eq!(fibonacci_radii(1, 0.2, 1.0), vec![0.5]);
        assert!(fibonacci_radii(0, 0.2, 1.0).is_empty());
    }

    #[test]
    fn max_radius_degenerate_counts() {
        assert_eq!(max_radius(1, 2.0), 2.0);
        assert_eq!(max_radius(0, 2.0), 2.0);
        assert_eq!(max_radius(50, -1.0), 0.0);
        assert!((max_radius(50, 2.0) - 2.0 * 7.0).abs() < 1e-12);
    }

    #[test]
    fn auto_fit_round_trip_within_one_percent() {
        for &(n, w, h, margin) in &[
            (50, 100.0, 100.0, 2.0),
            (200, 150.0, 100.0, 5.0),
            (1000, 300.0, 300.0, 2.0),
            (377, 200.0, 200.0, 0.0),
        ] {
            let spacing = auto_fit_spacing(n, w, h, margin);
            let target = AUTO_FIT_FILL * (f64::min(w, h) / 2.0 - margin);
            let achieved = max_radius(n, spacing);
            assert!(
                (achieved - target).abs() / target < 0.01,
                "n={n}: spacing {spacing} gives {achieved}, target {target}"
            );
        }
    }

    #[test]
    fn exact_solver_inverts_max_radius() {
        for &(n, w, h, margin) in &[(50, 100.0, 100.0, 2.0), (5000, 120.0, 80.0, 3.0), (2, 10.0, 40.0, 0.0)] {
            let target = AUTO_FIT_FILL * (f64::min(w, h) / 2.0 - margin);
            let achieved = max_radius(n, auto_fit_exact(n, w, h, margin));
            assert!((achieved - target).abs() < 1e-9 * target);
        }
    }

    #[test]
    fn auto_fit_clamps() {
        assert_eq!(auto_fit_spacing(2, 1000.0, 1000.0, 0.0), SPACING_MAX);
        assert_eq!(auto_fit_spacing(5000, 10.0, 10.0, 4.9), SPACING_MIN);
        assert_eq!(auto_fit_spacing(50, 100.0, 100.0, 2.0), 5.8);
    }
}
