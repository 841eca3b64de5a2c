//! Deterministic pseudo-random numbers for reproducible layouts.
//!
//! Dot-size shuffles must come out identical on every run and in every
//! implementation of the same recurrence, so this is a fixed Park–Miller
//! "minimal standard" generator rather than a platform random source.

/// Park–Miller multiplier.
pub const MULTIPLIER: u64 = 16807;

/// Park–Miller modulus (2^31 - 1).
pub const MODULUS: u64 = 2_147_483_647;

/// A minimal-standard Lehmer generator: `s = s * 16807 mod (2^31 - 1)`.
///
/// # Example
/// ```
/// use sunflower::rng::Rng;
///
/// let mut rng = Rng::for_dot_count(12);
/// let value = rng.next_f64(); // Returns value in [0, 1)
/// assert!((0.0..1.0).contains(&value));
/// ```
#[derive(Clone, Debug)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a generator from a raw seed.
    ///
    /// The seed is reduced modulo 2^31 - 1 (which leaves the sequence
    /// unchanged). A seed that reduces to zero would lock the sequence at
    /// zero, so it is replaced with 1.
    #[inline]
    pub fn new(seed: u64) -> Self {
        let state = match seed % MODULUS {
            0 => 1,
            s => s,
        };
        Self { state }
    }

    /// The generator used for size-tier shuffles: `seed = n * 7 + 13`.
    #[inline]
    pub fn for_dot_count(dot_count: u32) -> Self {
        Self::new(dot_count as u64 * 7 + 13)
    }

    /// Advance and return the raw state in `1..MODULUS`.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        // state < 2^31 and MULTIPLIER < 2^15, so the product fits in u64.
        self.state = (self.state * MULTIPLIER) % MODULUS;
        self.state as u32
    }

    /// Get a value in the range [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u32() as f64 - 1.0) / (MODULUS - 1) as f64
    }

    /// Get a random index in the range [0, len).
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        ((self.next_f64() * len as f64).floor() as usize).min(len.saturating_sub(1))
    }

    /// Fisher–Yates shuffle in place, walking from the last index down.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn minimal_standard_sequence() {
        // Park & Miller's published check: seed 1 reaches 1043618065 at step 10000.
        let mut rng = Rng::new(1);
        assert_eq!(rng.next_u32(), 16807);
        assert_eq!(rng.next_u32(), 282_475_249);
        for _ in 2..10_000 {
            rng.next_u32();
        }
        assert_eq!(rng.state, 1_043_618_065);
    }

    #[test]
    fn dot_count_seed() {
        let mut a = Rng::for_dot_count(12);
        let mut b = Rng::new(97);
        assert_eq!(a.next_u32(), b.next_u32());
        assert_eq!(Rng::new(97 * 16807 % MODULUS).state, a.state);
    }

    #[test]
    fn f64_in_range() {
        let mut rng = Rng::new(12345);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn zero_seed_does_not_stall() {
        let mut rng = Rng::new(MODULUS * 3);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn shuffle_is_a_reproducible_permutation() {
        let mut first: Vec<u32> = (0..50).collect();
        let mut second = first.clone();
        Rng::for_dot_count(50).shuffle(&mut first);
        Rng::for_dot_count(50).shuffle(&mut second);
        assert_eq!(first, second);

        let mut sorted = first.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(first, sorted);
    }

    #[test]
    fn shuffle_matches_hand_computed_swaps() {
        // seed 13: s1 = 218491, s2 = 1524694590
        let mut rng = Rng::new(13);
        let mut items = [0, 1, 2];
        rng.shuffle(&mut items);
        // i = 2: r = 218490 / 2147483646 -> j = 0
        // i = 1: r = 1524694589 / 2147483646 ≈ 0.7100 -> j = 1
        assert_eq!(items, [2, 1, 0]);
    }
}
