//! Early-stop predicates, independent of the time source running out.

/// Decides whether the run should stop before executing the step at `time`.
///
/// Evaluated once per step, after the next time value is pulled and before
/// any agent or environment update.  Returning `true` ends the run without
/// executing that step.
///
/// Any `Fn(T, &[A], &E) -> bool` closure is a terminator:
///
/// ```rust
/// use abm_schedule::Terminator;
///
/// let stop_at_three = |t: u64, _agents: &[i32], _env: &()| t >= 3;
/// let no_agents: &[i32] = &[];
/// assert!(!Terminator::<u64, i32, ()>::test(&stop_at_three, 2, no_agents, &()));
/// assert!(Terminator::<u64, i32, ()>::test(&stop_at_three, 3, no_agents, &()));
/// ```
pub trait Terminator<T, A, E> {
    fn test(&self, time: T, agents: &[A], env: &E) -> bool;
}

impl<T, A, E, F> Terminator<T, A, E> for F
where
    F: Fn(T, &[A], &E) -> bool,
{
    fn test(&self, time: T, agents: &[A], env: &E) -> bool {
        self(time, agents, env)
    }
}

/// Never stops the run; stopping is left to the time source or an observer.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverTerminate;

impl<T, A, E> Terminator<T, A, E> for NeverTerminate {
    fn test(&self, _time: T, _agents: &[A], _env: &E) -> bool {
        false
    }
}
