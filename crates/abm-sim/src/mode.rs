//! How agent and environment updates are sequenced within one step.
//!
//! ```text
//! OneStage                         TwoStage
//! ────────                         ────────
//! env.step(t, agents)              env.step(t, agents)
//! for i in schedule:               for i in schedule:          ← decide (&E)
//!   agents[i].step(t, &mut env)      intents.push(agents[i].decide(t, &env))
//!                                  for (i, intent) in intents: ← commit (&mut E)
//!                                    agents[i].commit(t, intent, &mut env)
//!                                  env.commit(t, agents)
//! ```

use abm_behavior::{Agent, BehaviorResult, Environment, StagedAgent};
use abm_core::AgentId;
use tracing::trace;

/// A step-sequencing strategy, selected by the type parameter `M` of
/// [`Sim`](crate::Sim).
///
/// `schedule` indices are validated by the simulation before `update` runs.
pub trait StepMode<T, A, E> {
    /// Short name used in log output.
    const NAME: &'static str;

    fn agent_id(agent: &A) -> AgentId;

    /// Environment `init`, then every agent's `init` in list order.
    fn init(start: T, agents: &mut [A], env: &mut E) -> BehaviorResult<()>;

    /// Execute one step for the scheduled agents.
    fn update(time: T, schedule: &[usize], agents: &mut [A], env: &mut E) -> BehaviorResult<()>;
}

/// Agents update one after another, each seeing its predecessors' changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct OneStage;

impl<T, A, E> StepMode<T, A, E> for OneStage
where
    T: Copy,
    A: Agent<T, E>,
    E: Environment<T, A>,
{
    const NAME: &'static str = "one-stage";

    fn agent_id(agent: &A) -> AgentId {
        agent.id()
    }

    fn init(start: T, agents: &mut [A], env: &mut E) -> BehaviorResult<()> {
        env.init(start)?;
        for agent in agents.iter_mut() {
            agent.init(start, env)?;
        }
        Ok(())
    }

    fn update(time: T, schedule: &[usize], agents: &mut [A], env: &mut E) -> BehaviorResult<()> {
        env.step(time, agents)?;
        for &i in schedule {
            agents[i].step(time, env)?;
        }
        trace!(updated = schedule.len(), "one-stage update applied");
        Ok(())
    }
}

/// All scheduled agents decide against the same environment state, then all
/// commit.
#[derive(Clone, Copy, Debug, Default)]
pub struct TwoStage;

impl<T, A, E> StepMode<T, A, E> for TwoStage
where
    T: Copy,
    A: StagedAgent<T, E>,
    E: Environment<T, A>,
{
    const NAME: &'static str = "two-stage";

    fn agent_id(agent: &A) -> AgentId {
        agent.id()
    }

    fn init(start: T, agents: &mut [A], env: &mut E) -> BehaviorResult<()> {
        env.init(start)?;
        for agent in agents.iter_mut() {
            agent.init(start, env)?;
        }
        Ok(())
    }

    fn update(time: T, schedule: &[usize], agents: &mut [A], env: &mut E) -> BehaviorResult<()> {
        env.step(time, agents)?;

        // ── Decide: the environment is only shared-borrowed ───────────────
        let view: &E = env;
        let mut intents = Vec::with_capacity(schedule.len());
        for &i in schedule {
            intents.push((i, agents[i].decide(time, view)?));
        }
        trace!(decided = intents.len(), "decide phase complete");

        // ── Commit: apply in schedule order ───────────────────────────────
        for (i, intent) in intents {
            agents[i].commit(time, intent, env)?;
        }
        env.commit(time, agents)?;
        trace!(committed = schedule.len(), "commit phase complete");
        Ok(())
    }
}
