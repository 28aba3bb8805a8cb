//! Seeded simulation RNG and the random-source capability schedulers need.
//!
//! Schedulers only ever ask for two things: a uniform permutation of
//! `0..n`, and `k` distinct indices drawn uniformly from `0..n`.  Those two
//! operations form the [`RandomSource`] trait.  [`SimRng`] implements it on
//! top of a seeded `SmallRng`; tests can substitute a scripted source.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── RandomSource ──────────────────────────────────────────────────────────────

/// Uniform permutation and without-replacement sampling over index ranges.
pub trait RandomSource {
    /// A uniformly random ordering of `0..n`.
    fn permutation(&mut self, n: usize) -> Vec<usize>;

    /// `k` distinct indices from `0..n`, chosen uniformly without replacement,
    /// in random order.
    ///
    /// Callers must ensure `k <= n`.
    fn sample(&mut self, n: usize, k: usize) -> Vec<usize>;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        (**self).permutation(n)
    }

    fn sample(&mut self, n: usize, k: usize) -> Vec<usize> {
        (**self).sample(n, k)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        (**self).permutation(n)
    }

    fn sample(&mut self, n: usize, k: usize) -> Vec<usize> {
        (**self).sample(n, k)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG.
///
/// Used only in single-threaded contexts.  Give each consumer that needs its
/// own stream (a scheduler, an environment) a [`child`](Self::child) so that
/// adding draws in one place does not shift the sequence seen by another.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice, `None` if it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

impl RandomSource for SimRng {
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        self.shuffle(&mut order);
        order
    }

    fn sample(&mut self, n: usize, k: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, n, k).into_vec()
    }
}
