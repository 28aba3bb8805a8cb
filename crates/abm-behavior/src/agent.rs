//! Agent capability traits: the main extension point for user code.

use abm_core::AgentId;

use crate::BehaviorResult;

/// An agent updated by a one-stage simulation.
///
/// `T` is the run's time type and `E` its environment type.  Only
/// [`id`](Self::id) and [`step`](Self::step) are required.
///
/// # Example
///
/// ```rust
/// use abm_behavior::{Agent, BehaviorResult};
/// use abm_core::AgentId;
///
/// struct Counter { id: AgentId }
///
/// impl Agent<u64, Vec<AgentId>> for Counter {
///     fn id(&self) -> AgentId { self.id }
///
///     fn step(&mut self, _time: u64, log: &mut Vec<AgentId>) -> BehaviorResult<()> {
///         log.push(self.id);
///         Ok(())
///     }
/// }
/// ```
pub trait Agent<T, E> {
    /// Stable identifier, unique within a run.
    fn id(&self) -> AgentId;

    /// Called once before the first step, after the environment's own `init`.
    fn init(&mut self, _start: T, _env: &mut E) -> BehaviorResult<()> {
        Ok(())
    }

    /// Called once per step in which the scheduler selects this agent.
    ///
    /// Changes made to `env` are visible to agents scheduled later in the
    /// same step.
    fn step(&mut self, time: T, env: &mut E) -> BehaviorResult<()>;
}

/// An agent updated by a two-stage simulation.
///
/// Each step splits into a *decide* phase, where every scheduled agent reads
/// the environment and returns an [`Intent`](Self::Intent), and a *commit*
/// phase, where intents are applied in schedule order.
pub trait StagedAgent<T, E> {
    /// What the agent wants to do this step.
    type Intent;

    /// Stable identifier, unique within a run.
    fn id(&self) -> AgentId;

    /// Called once before the first step, after the environment's own `init`.
    fn init(&mut self, _start: T, _env: &mut E) -> BehaviorResult<()> {
        Ok(())
    }

    /// Decide against the environment as it stood at the start of the step.
    ///
    /// The agent may update its own private state here; the environment is
    /// read-only.
    fn decide(&mut self, time: T, env: &E) -> BehaviorResult<Self::Intent>;

    /// Apply the intent returned by [`decide`](Self::decide) this step.
    fn commit(&mut self, time: T, intent: Self::Intent, env: &mut E) -> BehaviorResult<()>;
}
