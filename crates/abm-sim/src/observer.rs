//! Observer hooks for progress reporting, data collection, and run control.

use tracing::warn;

use crate::{ObserverError, ObserverResult};

/// What an observer wants the simulation to do after a hook returns.
///
/// Ordered by strength, so combining several requests is a `max`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum Control {
    /// Keep going.
    #[default]
    Continue,
    /// Suspend before the next step; a later `run()` resumes.
    Pause,
    /// End the run; `done` fires and the simulation cannot be resumed.
    Stop,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at lifecycle points.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  `T`, `A`, `E` are the run's time, agent,
/// and environment types.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl<A, E> Observer<u64, A, E> for ProgressPrinter {
///     fn step(&mut self, time: u64, agents: &[A], _env: &E) -> ObserverResult<Control> {
///         println!("t={time}: {} agents", agents.len());
///         Ok(Control::Continue)
///     }
/// }
/// ```
pub trait Observer<T, A, E> {
    /// Called once after initialization, before the first step.
    fn start(&mut self, _time: T, _agents: &[A], _env: &E) -> ObserverResult<Control> {
        Ok(Control::Continue)
    }

    /// Called after every completed step.
    fn step(&mut self, _time: T, _agents: &[A], _env: &E) -> ObserverResult<Control> {
        Ok(Control::Continue)
    }

    /// Called exactly once when the run stops, whatever the reason.
    fn done(&mut self, _agents: &[A], _env: &E) -> ObserverResult<()> {
        Ok(())
    }
}

impl<T, A, E, O: Observer<T, A, E> + ?Sized> Observer<T, A, E> for &mut O {
    fn start(&mut self, time: T, agents: &[A], env: &E) -> ObserverResult<Control> {
        (**self).start(time, agents, env)
    }

    fn step(&mut self, time: T, agents: &[A], env: &E) -> ObserverResult<Control> {
        (**self).step(time, agents, env)
    }

    fn done(&mut self, agents: &[A], env: &E) -> ObserverResult<()> {
        (**self).done(agents, env)
    }
}

impl<T, A, E, O: Observer<T, A, E> + ?Sized> Observer<T, A, E> for Box<O> {
    fn start(&mut self, time: T, agents: &[A], env: &E) -> ObserverResult<Control> {
        (**self).start(time, agents, env)
    }

    fn step(&mut self, time: T, agents: &[A], env: &E) -> ObserverResult<Control> {
        (**self).step(time, agents, env)
    }

    fn done(&mut self, agents: &[A], env: &E) -> ObserverResult<()> {
        (**self).done(agents, env)
    }
}

/// An [`Observer`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl<T, A, E> Observer<T, A, E> for NoopObserver {}

// ── ChainedObserver ───────────────────────────────────────────────────────────

/// Drives several observers as one, in registration order.
///
/// Every observer receives every hook call, even when an earlier one in the
/// chain failed.  Once the whole chain has run, the first error is returned
/// (later ones are logged).  The combined [`Control`] is the strongest any
/// observer asked for.
pub struct ChainedObserver<T, A, E> {
    observers: Vec<Box<dyn Observer<T, A, E>>>,
}

impl<T, A, E> ChainedObserver<T, A, E> {
    pub fn new() -> Self {
        Self { observers: Vec::new() }
    }

    /// Append `observer` and return the chain, for fluent construction.
    pub fn with<O: Observer<T, A, E> + 'static>(mut self, observer: O) -> Self {
        self.push(observer);
        self
    }

    pub fn push<O: Observer<T, A, E> + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<T, A, E> Default for ChainedObserver<T, A, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the first error; log the rest.
fn keep_first(first: &mut Option<ObserverError>, err: ObserverError, hook: &'static str) {
    match first {
        None => *first = Some(err),
        Some(_) => warn!(hook, error = %err, "additional observer failure in chain"),
    }
}

impl<T: Copy, A, E> Observer<T, A, E> for ChainedObserver<T, A, E> {
    fn start(&mut self, time: T, agents: &[A], env: &E) -> ObserverResult<Control> {
        let mut control = Control::Continue;
        let mut first = None;
        for obs in &mut self.observers {
            match obs.start(time, agents, env) {
                Ok(c) => control = control.max(c),
                Err(e) => keep_first(&mut first, e, "start"),
            }
        }
        first.map_or(Ok(control), Err)
    }

    fn step(&mut self, time: T, agents: &[A], env: &E) -> ObserverResult<Control> {
        let mut control = Control::Continue;
        let mut first = None;
        for obs in &mut self.observers {
            match obs.step(time, agents, env) {
                Ok(c) => control = control.max(c),
                Err(e) => keep_first(&mut first, e, "step"),
            }
        }
        first.map_or(Ok(control), Err)
    }

    fn done(&mut self, agents: &[A], env: &E) -> ObserverResult<()> {
        let mut first = None;
        for obs in &mut self.observers {
            if let Err(e) = obs.done(agents, env) {
                keep_first(&mut first, e, "done");
            }
        }
        first.map_or(Ok(()), Err)
    }
}
