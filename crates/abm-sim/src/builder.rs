//! Fluent builder for constructing a [`Sim`].

use std::collections::HashSet;
use std::marker::PhantomData;

use abm_core::{CoreError, TimeSource};
use abm_schedule::{InOrderScheduler, NeverTerminate, Scheduler};

use crate::mode::{OneStage, StepMode, TwoStage};
use crate::{NoopObserver, Sim, SimError, SimResult, SimState};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - the agents, in the order schedulers will index them
/// - the environment
/// - a [`TimeSource`] (e.g. [`abm_core::FixedTime`])
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default              |
/// |---------------------|----------------------|
/// | `.scheduler(s)`     | [`InOrderScheduler`] |
/// | `.terminator(x)`    | [`NeverTerminate`]   |
/// | `.observer(o)`      | [`NoopObserver`]     |
///
/// Finish with [`one_stage`](Self::one_stage) or
/// [`two_stage`](Self::two_stage), which validate the configuration.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(agents, env, FixedTime::steps(100))
///     .scheduler(RandomOrderScheduler::new(config.make_rng()))
///     .observer(StdoutObserver)
///     .two_stage()?;
/// sim.run()?;
/// ```
pub struct SimBuilder<A, E, TS, S = InOrderScheduler, X = NeverTerminate, O = NoopObserver> {
    agents:     Vec<A>,
    env:        E,
    time:       TS,
    scheduler:  S,
    terminator: X,
    observer:   O,
}

impl<A, E, TS: TimeSource> SimBuilder<A, E, TS> {
    /// Create a builder with all required inputs.
    pub fn new(agents: Vec<A>, env: E, time: TS) -> Self {
        Self {
            agents,
            env,
            time,
            scheduler:  InOrderScheduler,
            terminator: NeverTerminate,
            observer:   NoopObserver,
        }
    }
}

impl<A, E, TS: TimeSource, S, X, O> SimBuilder<A, E, TS, S, X, O> {
    /// Replace the scheduling policy.
    pub fn scheduler<S2>(self, scheduler: S2) -> SimBuilder<A, E, TS, S2, X, O> {
        SimBuilder {
            agents:     self.agents,
            env:        self.env,
            time:       self.time,
            scheduler,
            terminator: self.terminator,
            observer:   self.observer,
        }
    }

    /// Replace the early-stop predicate.
    pub fn terminator<X2>(self, terminator: X2) -> SimBuilder<A, E, TS, S, X2, O> {
        SimBuilder {
            agents:     self.agents,
            env:        self.env,
            time:       self.time,
            scheduler:  self.scheduler,
            terminator,
            observer:   self.observer,
        }
    }

    /// Replace the observer.  Use [`ChainedObserver`][crate::ChainedObserver]
    /// to attach several.
    pub fn observer<O2>(self, observer: O2) -> SimBuilder<A, E, TS, S, X, O2> {
        SimBuilder {
            agents:     self.agents,
            env:        self.env,
            time:       self.time,
            scheduler:  self.scheduler,
            terminator: self.terminator,
            observer,
        }
    }

    /// Validate and return a simulation whose agents update one after
    /// another.
    pub fn one_stage(self) -> SimResult<Sim<OneStage, A, E, TS, S, X, O>>
    where
        OneStage: StepMode<TS::Time, A, E>,
        S: Scheduler<TS::Time, A, E>,
    {
        self.build()
    }

    /// Validate and return a simulation whose agents decide together, then
    /// commit together.
    pub fn two_stage(self) -> SimResult<Sim<TwoStage, A, E, TS, S, X, O>>
    where
        TwoStage: StepMode<TS::Time, A, E>,
        S: Scheduler<TS::Time, A, E>,
    {
        self.build()
    }

    fn build<M>(self) -> SimResult<Sim<M, A, E, TS, S, X, O>>
    where
        M: StepMode<TS::Time, A, E>,
        S: Scheduler<TS::Time, A, E>,
    {
        // ── Agent ids must be unique within a run ─────────────────────────
        let mut seen = HashSet::with_capacity(self.agents.len());
        for agent in &self.agents {
            let id = M::agent_id(agent);
            if !seen.insert(id) {
                return Err(SimError::DuplicateAgentId(id));
            }
        }

        // ── A fixed sample cannot exceed the population ───────────────────
        if let Some(requested) = self.scheduler.sample_size() {
            if requested > self.agents.len() {
                return Err(SimError::Core(CoreError::SampleTooLarge {
                    requested,
                    available: self.agents.len(),
                }));
            }
        }

        Ok(Sim {
            agents:     self.agents,
            env:        self.env,
            time:       self.time,
            scheduler:  self.scheduler,
            terminator: self.terminator,
            observer:   self.observer,
            state:      SimState::Created,
            now:        None,
            steps:      0,
            mode:       PhantomData,
        })
    }
}
