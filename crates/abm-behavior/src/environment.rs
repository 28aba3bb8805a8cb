//! The shared environment agents act in.

use crate::BehaviorResult;

/// Shared, mutable world state for one run.
///
/// `T` is the run's time type and `A` its agent type.  Domain-specific
/// operations agents call (moving on a grid, trading, …) are the
/// environment's own inherent methods; the engine only calls the hooks below.
pub trait Environment<T, A> {
    /// Called once before any agent's `init`.
    fn init(&mut self, _start: T) -> BehaviorResult<()> {
        Ok(())
    }

    /// Called once per step before any agent update.
    fn step(&mut self, time: T, agents: &[A]) -> BehaviorResult<()>;

    /// Called once per step after all agents have committed.
    ///
    /// Only two-stage simulations call this hook.
    fn commit(&mut self, _time: T, _agents: &[A]) -> BehaviorResult<()> {
        Ok(())
    }
}

/// An [`Environment`] with no state that does nothing.
///
/// Useful for populations whose agents only interact with themselves, and in
/// tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEnvironment;

impl<T, A> Environment<T, A> for NoopEnvironment {
    fn step(&mut self, _time: T, _agents: &[A]) -> BehaviorResult<()> {
        Ok(())
    }
}
