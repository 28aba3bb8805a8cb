use abm_core::AgentId;
use thiserror::Error;

/// Failure raised by an agent or environment hook.
///
/// The simulation never swallows these: they stop the run and surface from
/// `Sim::run`.
#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("agent {agent} failed: {reason}")]
    Agent { agent: AgentId, reason: String },

    #[error("environment failed: {0}")]
    Environment(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BehaviorError {
    /// Shorthand for an agent-scoped failure.
    pub fn agent(agent: AgentId, reason: impl Into<String>) -> Self {
        Self::Agent { agent, reason: reason.into() }
    }
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
