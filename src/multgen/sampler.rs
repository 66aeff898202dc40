// SPDX-License-Identifier: Apache-2.0

//! Uniform integer sampling on top of a seeded generator.
//!
//! Every structural decision the generator makes goes through
//! `RandomSource::sample_below`, so a given seed always yields the same draw
//! sequence and therefore a byte-identical circuit.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Number of distinct values one generator draw can take (a full `u32`).
const DRAW_RANGE: u64 = 1 << 32;

pub trait RandomSource {
    /// Returns a value uniformly distributed in `[0, max)`; `0` when `max` is
    /// zero.
    fn sample_below(&mut self, max: usize) -> usize;
}

/// Rejection sampler over the full `u32` output range of `R`.
pub struct SeededSampler<R: RngCore = Pcg64Mcg> {
    rng: R,
}

impl SeededSampler<Pcg64Mcg> {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl<R: RngCore> SeededSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> RandomSource for SeededSampler<R> {
    fn sample_below(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        let max = max as u64;
        assert!(max <= DRAW_RANGE, "sample_below: max {} exceeds draw range", max);
        // Draws in the trailing partial period would favor small outcomes.
        let limit = DRAW_RANGE - DRAW_RANGE % max;
        loop {
            let x = self.rng.next_u32() as u64;
            if x < limit {
                return (x % max) as usize;
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    /// Yields a fixed sequence of `u32` values.
    struct FixedRng {
        values: Vec<u32>,
        next: usize,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            let v = self.values[self.next];
            self.next += 1;
            v
        }

        fn next_u64(&mut self) -> u64 {
            self.next_u32() as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    #[test]
    fn test_zero_max_returns_zero_without_drawing() {
        let mut sampler = SeededSampler::new(FixedRng {
            values: vec![],
            next: 0,
        });
        assert_eq!(sampler.sample_below(0), 0);
    }

    #[test]
    fn test_rejects_trailing_partial_period() {
        // 2^32 % 3 == 1, so u32::MAX is the single rejected draw.
        let mut sampler = SeededSampler::new(FixedRng {
            values: vec![u32::MAX, 5],
            next: 0,
        });
        assert_eq!(sampler.sample_below(3), 2);
        assert_eq!(sampler.rng.next, 2);
    }

    #[test]
    fn test_power_of_two_never_rejects() {
        let mut sampler = SeededSampler::new(FixedRng {
            values: vec![u32::MAX, 6],
            next: 0,
        });
        assert_eq!(sampler.sample_below(4), 3);
        assert_eq!(sampler.sample_below(4), 2);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut lhs = SeededSampler::from_seed(42);
        let mut rhs = SeededSampler::from_seed(42);
        let lhs_draws: Vec<usize> = (0..64).map(|i| lhs.sample_below(i + 1)).collect();
        let rhs_draws: Vec<usize> = (0..64).map(|i| rhs.sample_below(i + 1)).collect();
        assert_eq!(lhs_draws, rhs_draws);
    }

    #[test]
    fn test_distribution_is_close_to_uniform() {
        const BUCKETS: usize = 6;
        const TRIALS: usize = 60_000;
        let mut sampler = SeededSampler::from_seed(0xdead_beef);
        let mut counts = [0usize; BUCKETS];
        for _ in 0..TRIALS {
            let v = sampler.sample_below(BUCKETS);
            assert!(v < BUCKETS);
            counts[v] += 1;
        }
        // Chi-square with 5 degrees of freedom; 20.5 is p < 0.001.
        let expected = (TRIALS / BUCKETS) as f64;
        let chi_square: f64 = counts
            .iter()
            .map(|c| {
                let d = *c as f64 - expected;
                d * d / expected
            })
            .sum();
        assert!(chi_square < 20.5, "counts {:?} chi^2 {}", counts, chi_square);
    }
}
