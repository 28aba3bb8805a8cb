//! Unit tests for abm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, IdGenerator};

    #[test]
    fn generator_is_sequential() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(), AgentId(0));
        assert_eq!(ids.next_id(), AgentId(1));
        assert_eq!(ids.peek(), AgentId(2));
    }

    #[test]
    fn generators_are_independent() {
        let mut a = IdGenerator::new();
        let mut b = IdGenerator::starting_at(100);
        a.next_id();
        a.next_id();
        assert_eq!(b.next_id(), AgentId(100));
        assert_eq!(a.next_id(), AgentId(2));
    }

    #[test]
    fn generator_as_iterator() {
        let ids: Vec<AgentId> = IdGenerator::starting_at(5).take(3).collect();
        assert_eq!(ids, vec![AgentId(5), AgentId(6), AgentId(7)]);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{CoreError, FixedTime, InfiniteTime, SimConfig, TimeSource};

    #[test]
    fn fixed_time_yields_exact_sequence_then_exhausts() {
        let mut t = FixedTime::new(3, 10u64, 2).unwrap();
        assert_eq!(t.start_time(), 10);
        assert_eq!(t.next_time(), Some(12));
        assert_eq!(t.next_time(), Some(14));
        assert_eq!(t.next_time(), Some(16));
        assert_eq!(t.next_time(), None);
        assert_eq!(t.next_time(), None, "stays exhausted");
    }

    #[test]
    fn fixed_time_unit_steps() {
        let values: Vec<u64> = FixedTime::steps(5).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn fixed_time_zero_steps_is_empty() {
        let mut t = FixedTime::steps(0);
        assert_eq!(t.remaining(), Some(0));
        assert_eq!(t.next_time(), None);
    }

    #[test]
    fn fixed_time_remaining_counts_down() {
        let mut t = FixedTime::steps(2);
        assert_eq!(t.remaining(), Some(2));
        t.next_time();
        assert_eq!(t.remaining(), Some(1));
        assert_eq!(t.size_hint(), (1, Some(1)));
    }

    #[test]
    fn real_valued_steps_do_not_drift() {
        let values: Vec<f64> = FixedTime::new(1000, 0.0, 0.1).unwrap().collect();
        assert_eq!(values.len(), 1000);
        assert_eq!(values[999], 0.1 * 1000.0);
    }

    #[test]
    fn non_positive_step_rejected() {
        assert!(matches!(
            FixedTime::new(3, 0i64, 0),
            Err(CoreError::NonPositiveStep(_))
        ));
        assert!(FixedTime::new(3, 0i64, -1).is_err());
        assert!(InfiniteTime::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn unrepresentable_last_value_rejected() {
        assert!(matches!(
            FixedTime::<u32>::new(3, u32::MAX - 1, 1),
            Err(CoreError::Config(_))
        ));
        assert!(FixedTime::<i64>::new(2, 0, i64::MAX).is_err());
        assert!(FixedTime::<f64>::new(2, f64::MAX, f64::MAX).is_err());
        // More steps than an i32 can count.
        assert!(FixedTime::<i32>::new(u64::from(u32::MAX) + 1, 0, 1).is_err());

        let cfg = SimConfig { start: u32::MAX, step_size: 1u32, num_steps: Some(1), seed: 0 };
        assert!(matches!(cfg.fixed_time(), Err(CoreError::Config(_))));
    }

    #[test]
    fn fixed_time_may_end_exactly_at_type_max() {
        let values: Vec<u32> = FixedTime::<u32>::new(2, u32::MAX - 2, 1).unwrap().collect();
        assert_eq!(values, vec![u32::MAX - 1, u32::MAX]);
    }

    #[test]
    fn infinite_time_exhausts_at_type_max() {
        let mut t = InfiniteTime::<u32>::new(u32::MAX - 2, 1).unwrap();
        assert_eq!(t.next_time(), Some(u32::MAX - 1));
        assert_eq!(t.next_time(), Some(u32::MAX));
        assert_eq!(t.next_time(), None);
        assert_eq!(t.next_time(), None, "stays exhausted");
    }

    #[test]
    fn infinite_time_kth_value() {
        let mut t = InfiniteTime::new(5i64, 3).unwrap();
        assert_eq!(t.start_time(), 5);
        for k in 1..=10_000i64 {
            assert_eq!(t.next_time(), Some(5 + k * 3));
        }
        assert_eq!(t.remaining(), None);
    }

    #[test]
    fn infinite_time_default_counts_from_one() {
        let first: Vec<u64> = InfiniteTime::default().take(3).collect();
        assert_eq!(first, vec![1, 2, 3]);
    }

    #[test]
    fn config_builds_fixed_time() {
        let cfg = SimConfig { start: 10u64, step_size: 1, num_steps: Some(3), seed: 0 };
        let values: Vec<u64> = cfg.fixed_time().unwrap().collect();
        assert_eq!(values, vec![11, 12, 13]);
    }

    #[test]
    fn config_without_steps_cannot_build_fixed_time() {
        let cfg = SimConfig { num_steps: None, ..SimConfig::default() };
        assert!(matches!(cfg.fixed_time(), Err(CoreError::Config(_))));
        assert!(cfg.infinite_time().is_ok());
    }
}

#[cfg(test)]
mod rng {
    use std::collections::HashSet;

    use crate::{RandomSource, SimConfig, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        assert_eq!(r1.permutation(50), r2.permutation(50));
        for _ in 0..100 {
            let a: f32 = r1.random();
            let b: f32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn permutation_covers_range() {
        let mut rng = SimRng::new(1);
        let mut order = rng.permutation(100);
        order.sort_unstable();
        assert_eq!(order, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn sample_is_distinct_and_in_range() {
        let mut rng = SimRng::new(2);
        let picked = rng.sample(20, 7);
        assert_eq!(picked.len(), 7);
        let unique: HashSet<_> = picked.iter().copied().collect();
        assert_eq!(unique.len(), 7);
        assert!(picked.iter().all(|&i| i < 20));
    }

    #[test]
    fn sample_edges() {
        let mut rng = SimRng::new(3);
        assert!(rng.sample(5, 0).is_empty());
        let mut all = rng.sample(5, 5);
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(9);
        let mut a = root.child(0);
        let mut b = root.child(1);
        let x: u64 = a.random();
        let y: u64 = b.random();
        assert_ne!(x, y);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimConfig::default().make_rng();
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        assert!(rng.choose::<u8>(&[]).is_none());
    }
}
