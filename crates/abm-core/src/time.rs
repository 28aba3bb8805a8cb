//! Simulation time model.
//!
//! # Design
//!
//! A run advances through a sequence of time values pulled one at a time from
//! a [`TimeSource`].  The source also reports a separate *start* time, used
//! once for initialization before the first step:
//!
//!   start, start + step, start + 2·step, …
//!   ^^^^^  ^^^^^^^^^^^^ first value handed to the step loop
//!
//! The k-th value is computed as `start + step * k` rather than by repeated
//! addition, so floating-point clocks do not drift over long runs.
//!
//! Running out of values (`None`) is the normal way a fixed-length run ends.
//! It is not an error.

use std::fmt;

use crate::{CoreError, CoreResult, SimRng};

// ── TimeValue ─────────────────────────────────────────────────────────────────

/// An ordered scalar usable as a simulation clock position.
///
/// Implemented for the common integer and floating-point types.
pub trait TimeValue: Copy + PartialOrd + fmt::Debug + fmt::Display {
    const ZERO: Self;

    /// The value `n` steps of size `step` after `self`, or `None` if the
    /// type cannot represent it.
    fn offset(self, step: Self, n: u64) -> Option<Self>;
}

macro_rules! integer_time {
    ($($t:ty),* $(,)?) => {
        $(
            impl TimeValue for $t {
                const ZERO: $t = 0;

                #[inline]
                fn offset(self, step: $t, n: u64) -> Option<$t> {
                    let n = <$t>::try_from(n).ok()?;
                    self.checked_add(step.checked_mul(n)?)
                }
            }
        )*
    };
}

macro_rules! float_time {
    ($($t:ty),* $(,)?) => {
        $(
            impl TimeValue for $t {
                const ZERO: $t = 0.0;

                #[inline]
                fn offset(self, step: $t, n: u64) -> Option<$t> {
                    let value = self + step * (n as $t);
                    value.is_finite().then_some(value)
                }
            }
        )*
    };
}

integer_time!(u32, u64, i32, i64);
float_time!(f32, f64);

// ── TimeSource ────────────────────────────────────────────────────────────────

/// Produces the time values a simulation advances through.
///
/// Sources are consumed as the run progresses; they are never rewound.  Build
/// a fresh source for a fresh run.
pub trait TimeSource {
    type Time: TimeValue;

    /// The time at which the simulation is initialized.  Never returned by
    /// [`next_time`](Self::next_time).
    fn start_time(&self) -> Self::Time;

    /// The next step's time, or `None` once the source is exhausted.
    fn next_time(&mut self) -> Option<Self::Time>;

    /// How many values are left, if the source is finite.
    fn remaining(&self) -> Option<u64> {
        None
    }
}

fn check_step<T: TimeValue>(step_size: T) -> CoreResult<()> {
    // `!(x > 0)` rather than `x <= 0` so NaN is rejected too.
    if !(step_size > T::ZERO) {
        return Err(CoreError::NonPositiveStep(format!("{step_size:?}")));
    }
    Ok(())
}

// ── FixedTime ─────────────────────────────────────────────────────────────────

/// A fixed number of evenly spaced steps.
///
/// `FixedTime::new(3, 10, 1)` yields 11, 12, 13 and then `None` forever.
#[derive(Clone, Debug)]
pub struct FixedTime<T: TimeValue = u64> {
    start:     T,
    step_size: T,
    num_steps: u64,
    produced:  u64,
}

impl<T: TimeValue> FixedTime<T> {
    /// `num_steps` values spaced `step_size` apart, starting after `start`.
    ///
    /// Fails if `step_size` is not strictly positive, or if the last value
    /// does not fit in `T`.
    pub fn new(num_steps: u64, start: T, step_size: T) -> CoreResult<Self> {
        check_step(step_size)?;
        if start.offset(step_size, num_steps).is_none() {
            return Err(CoreError::Config(format!(
                "{num_steps} steps of {step_size} from {start} overflow the time type"
            )));
        }
        Ok(Self { start, step_size, num_steps, produced: 0 })
    }

    pub fn num_steps(&self) -> u64 {
        self.num_steps
    }

    pub fn step_size(&self) -> T {
        self.step_size
    }
}

impl FixedTime<u64> {
    /// `num_steps` unit steps from 0: yields 1, 2, …, `num_steps`.
    pub fn steps(num_steps: u64) -> Self {
        Self { start: 0, step_size: 1, num_steps, produced: 0 }
    }
}

impl<T: TimeValue> TimeSource for FixedTime<T> {
    type Time = T;

    fn start_time(&self) -> T {
        self.start
    }

    fn next_time(&mut self) -> Option<T> {
        if self.produced >= self.num_steps {
            return None;
        }
        let time = self.start.offset(self.step_size, self.produced + 1)?;
        self.produced += 1;
        Some(time)
    }

    fn remaining(&self) -> Option<u64> {
        Some(self.num_steps - self.produced)
    }
}

impl<T: TimeValue> Iterator for FixedTime<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.next_time()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.num_steps - self.produced).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

// ── InfiniteTime ──────────────────────────────────────────────────────────────

/// Evenly spaced steps with no end.
///
/// A run driven by `InfiniteTime` only stops through a terminator or an
/// observer-requested stop, or once the next value no longer fits in `T`,
/// at which point the source reports exhaustion.
#[derive(Clone, Debug)]
pub struct InfiniteTime<T: TimeValue = u64> {
    start:     T,
    step_size: T,
    produced:  u64,
}

impl<T: TimeValue> InfiniteTime<T> {
    pub fn new(start: T, step_size: T) -> CoreResult<Self> {
        check_step(step_size)?;
        Ok(Self { start, step_size, produced: 0 })
    }

    pub fn step_size(&self) -> T {
        self.step_size
    }
}

impl Default for InfiniteTime<u64> {
    fn default() -> Self {
        Self { start: 0, step_size: 1, produced: 0 }
    }
}

impl<T: TimeValue> TimeSource for InfiniteTime<T> {
    type Time = T;

    fn start_time(&self) -> T {
        self.start
    }

    fn next_time(&mut self) -> Option<T> {
        let k = self.produced.checked_add(1)?;
        let time = self.start.offset(self.step_size, k)?;
        self.produced = k;
        Some(time)
    }
}

impl<T: TimeValue> Iterator for InfiniteTime<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.next_time()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically filled from command-line flags or a JSON file by the application
/// and turned into a time source and RNG before the simulation is built.
///
/// With the `serde` feature, omitted fields take their [`Default`] values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(default, bound(deserialize = "T: serde::Deserialize<'de>, SimConfig<T>: Default"))
)]
pub struct SimConfig<T = u64> {
    /// Time at which the simulation is initialized.
    pub start: T,

    /// Spacing between consecutive step times.  Must be strictly positive.
    pub step_size: T,

    /// Number of steps to run.  `None` runs until a terminator or observer
    /// stops the simulation.
    pub num_steps: Option<u64>,

    /// Master RNG seed.  The same seed always produces identical schedules.
    pub seed: u64,
}

impl Default for SimConfig<u64> {
    fn default() -> Self {
        Self { start: 0, step_size: 1, num_steps: Some(10), seed: 42 }
    }
}

impl<T: TimeValue> SimConfig<T> {
    /// Build the fixed-length time source for this run.
    ///
    /// Fails if `num_steps` is unset or the step size is not positive.
    pub fn fixed_time(&self) -> CoreResult<FixedTime<T>> {
        let num_steps = self.num_steps.ok_or_else(|| {
            CoreError::Config("num_steps is required for a fixed-length run".into())
        })?;
        FixedTime::new(num_steps, self.start, self.step_size)
    }

    /// Build an unbounded time source, ignoring `num_steps`.
    pub fn infinite_time(&self) -> CoreResult<InfiniteTime<T>> {
        InfiniteTime::new(self.start, self.step_size)
    }

    /// Construct a `SimRng` seeded for this run.
    pub fn make_rng(&self) -> SimRng {
        SimRng::new(self.seed)
    }
}
