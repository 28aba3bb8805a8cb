//! Scheduling policies: which agents update this step, and in what order.

use abm_core::RandomSource;
use tracing::{trace, warn};

/// Decides the update order for one step.
///
/// The returned `Vec` holds positions into the simulation's agent list (not
/// `AgentId`s).  It is recomputed every step and never kept across steps.
///
/// # Example: update only even-indexed agents
///
/// ```rust
/// use abm_schedule::Scheduler;
///
/// struct EvenOnly;
///
/// impl<T, A, E> Scheduler<T, A, E> for EvenOnly {
///     fn step(&mut self, _time: T, agents: &[A], _env: &E) -> Vec<usize> {
///         (0..agents.len()).step_by(2).collect()
///     }
/// }
///
/// let order = Scheduler::<u64, char, ()>::step(&mut EvenOnly, 1, &['a', 'b', 'c'], &());
/// assert_eq!(order, vec![0, 2]);
/// ```
pub trait Scheduler<T, A, E> {
    /// Agent positions to update at `time`.
    fn step(&mut self, time: T, agents: &[A], env: &E) -> Vec<usize>;

    /// Number of agents this policy selects per step, when fixed.
    ///
    /// The simulation builder rejects a policy whose sample size exceeds the
    /// agent count.  Policies that always cover every agent return `None`.
    fn sample_size(&self) -> Option<usize> {
        None
    }
}

impl<T, A, E, S: Scheduler<T, A, E> + ?Sized> Scheduler<T, A, E> for Box<S> {
    fn step(&mut self, time: T, agents: &[A], env: &E) -> Vec<usize> {
        (**self).step(time, agents, env)
    }

    fn sample_size(&self) -> Option<usize> {
        (**self).sample_size()
    }
}

// ── InOrderScheduler ──────────────────────────────────────────────────────────

/// Every agent, every step, in list order.
#[derive(Clone, Copy, Debug, Default)]
pub struct InOrderScheduler;

impl<T, A, E> Scheduler<T, A, E> for InOrderScheduler {
    fn step(&mut self, _time: T, agents: &[A], _env: &E) -> Vec<usize> {
        (0..agents.len()).collect()
    }
}

// ── RandomOrderScheduler ──────────────────────────────────────────────────────

/// Every agent, every step, in a fresh uniformly random order.
#[derive(Clone, Debug)]
pub struct RandomOrderScheduler<R> {
    rng: R,
}

impl<R: RandomSource> RandomOrderScheduler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_rng(self) -> R {
        self.rng
    }
}

impl<T, A, E, R: RandomSource> Scheduler<T, A, E> for RandomOrderScheduler<R> {
    fn step(&mut self, _time: T, agents: &[A], _env: &E) -> Vec<usize> {
        let order = self.rng.permutation(agents.len());
        trace!(agents = agents.len(), "random order scheduled");
        order
    }
}

// ── RandomSampleScheduler ─────────────────────────────────────────────────────

/// `size` distinct agents per step, chosen uniformly without replacement.
///
/// With `size == 0` every step gets an empty schedule; the simulation still
/// advances time and notifies observers.
#[derive(Clone, Debug)]
pub struct RandomSampleScheduler<R> {
    size: usize,
    rng:  R,
}

impl<R: RandomSource> RandomSampleScheduler<R> {
    pub fn new(size: usize, rng: R) -> Self {
        Self { size, rng }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl<T, A, E, R: RandomSource> Scheduler<T, A, E> for RandomSampleScheduler<R> {
    fn step(&mut self, _time: T, agents: &[A], _env: &E) -> Vec<usize> {
        let n = agents.len();
        let k = if self.size > n {
            warn!(size = self.size, agents = n, "sample size exceeds agent count; clamping");
            n
        } else {
            self.size
        };
        let picked = self.rng.sample(n, k);
        trace!(agents = n, sampled = k, "random sample scheduled");
        picked
    }

    fn sample_size(&self) -> Option<usize> {
        Some(self.size)
    }
}
