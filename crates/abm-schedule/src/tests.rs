//! Unit tests for abm-schedule.

use abm_core::{RandomSource, SimRng};

/// Deterministic source: permutations come out reversed, samples are the
/// first `k` indices.
struct Scripted;

impl RandomSource for Scripted {
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        (0..n).rev().collect()
    }

    fn sample(&mut self, _n: usize, k: usize) -> Vec<usize> {
        (0..k).collect()
    }
}

fn agents(n: usize) -> Vec<u32> {
    (0..n as u32).collect()
}

#[cfg(test)]
mod in_order_tests {
    use super::*;
    use crate::{InOrderScheduler, Scheduler};

    #[test]
    fn ascending_regardless_of_time_and_env() {
        let mut s = InOrderScheduler;
        let pop = agents(4);
        for t in [0u64, 7, 1_000] {
            assert_eq!(s.step(t, &pop[..], &"any env"), vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn empty_population() {
        let mut s = InOrderScheduler;
        assert!(Scheduler::<u64, u32, ()>::step(&mut s, 1, &[], &()).is_empty());
        assert_eq!(Scheduler::<u64, u32, ()>::sample_size(&s), None);
    }
}

#[cfg(test)]
mod random_order_tests {
    use super::*;
    use crate::{RandomOrderScheduler, Scheduler};

    #[test]
    fn uses_injected_source() {
        let mut s = RandomOrderScheduler::new(Scripted);
        assert_eq!(s.step(1u64, &agents(3)[..], &()), vec![2, 1, 0]);
    }

    #[test]
    fn order_changes_between_steps() {
        let mut s = RandomOrderScheduler::new(SimRng::new(7));
        let pop = agents(30);
        let first = s.step(1u64, &pop[..], &());
        let second = s.step(2u64, &pop[..], &());
        assert_ne!(first, second, "30! orders; a repeat is vanishingly unlikely");
    }

    #[test]
    fn same_seed_same_schedule() {
        let pop = agents(12);
        let mut a = RandomOrderScheduler::new(SimRng::new(99));
        let mut b = RandomOrderScheduler::new(SimRng::new(99));
        for t in 1..5u64 {
            assert_eq!(a.step(t, &pop[..], &()), b.step(t, &pop[..], &()));
        }
    }

    #[test]
    fn one_permutation_drawn_per_step() {
        let pop = agents(8);
        let mut s = RandomOrderScheduler::new(SimRng::new(21));
        let mut direct = SimRng::new(21);
        for t in 1..=3u64 {
            assert_eq!(s.step(t, &pop[..], &()), direct.permutation(8));
        }
        let mut recovered = s.into_rng();
        assert_eq!(recovered.permutation(8), direct.permutation(8), "stream continues");
    }
}

#[cfg(test)]
mod random_sample_tests {
    use super::*;
    use crate::{RandomSampleScheduler, Scheduler};

    #[test]
    fn uses_injected_source() {
        let mut s = RandomSampleScheduler::new(2, Scripted);
        assert_eq!(s.step(1u64, &agents(5)[..], &()), vec![0, 1]);
        assert_eq!(Scheduler::<u64, u32, ()>::sample_size(&s), Some(2));
    }

    #[test]
    fn zero_sample_is_empty() {
        let mut s = RandomSampleScheduler::new(0, SimRng::new(1));
        assert!(s.step(1u64, &agents(5)[..], &()).is_empty());
    }

    #[test]
    fn oversized_sample_is_clamped() {
        let mut s = RandomSampleScheduler::new(10, SimRng::new(1));
        let mut picked = s.step(1u64, &agents(3)[..], &());
        picked.sort_unstable();
        assert_eq!(picked, vec![0, 1, 2]);
    }

    #[test]
    fn boxed_scheduler_forwards() {
        let mut s: Box<dyn Scheduler<u64, u32, ()>> =
            Box::new(RandomSampleScheduler::new(1, Scripted));
        assert_eq!(s.sample_size(), Some(1));
        assert_eq!(s.step(1, &agents(4)[..], &()), vec![0]);
    }
}

#[cfg(test)]
mod property_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::{RandomOrderScheduler, RandomSampleScheduler, Scheduler};

    proptest! {
        #[test]
        fn random_order_is_a_permutation(n in 0usize..200, seed in any::<u64>()) {
            let mut s = RandomOrderScheduler::new(SimRng::new(seed));
            let mut order = s.step(1u64, &agents(n)[..], &());
            order.sort_unstable();
            prop_assert_eq!(order, (0..n).collect::<Vec<_>>());
        }

        #[test]
        fn random_sample_is_distinct(
            (n, k) in (0usize..200).prop_flat_map(|n| (Just(n), 0..=n)),
            seed in any::<u64>(),
        ) {
            let mut s = RandomSampleScheduler::new(k, SimRng::new(seed));
            let picked = s.step(1u64, &agents(n)[..], &());
            prop_assert_eq!(picked.len(), k);
            let unique: HashSet<usize> = picked.iter().copied().collect();
            prop_assert_eq!(unique.len(), k);
            prop_assert!(picked.iter().all(|&i| i < n));
        }
    }
}

#[cfg(test)]
mod terminator_tests {
    use super::*;
    use crate::{NeverTerminate, Terminator};

    #[test]
    fn never_terminate_is_false() {
        let pop = agents(3);
        for t in 0..100u64 {
            assert!(!NeverTerminate.test(t, &pop[..], &()));
        }
    }

    #[test]
    fn closure_sees_agents_and_env() {
        let crowded = |_t: u64, agents: &[u32], limit: &usize| agents.len() > *limit;
        assert!(Terminator::<u64, u32, usize>::test(&crowded, 1, &agents(5), &3));
        assert!(!Terminator::<u64, u32, usize>::test(&crowded, 1, &agents(2), &3));
    }
}
