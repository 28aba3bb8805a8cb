use abm_behavior::BehaviorError;
use abm_core::{AgentId, CoreError};
use thiserror::Error;

use crate::SimState;

/// Failure raised by an observer hook.
#[derive(Debug, Error)]
pub enum ObserverError {
    #[error("observer I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("observer failed: {0}")]
    Failed(String),
}

pub type ObserverResult<T> = Result<T, ObserverError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("agent id {0} appears more than once")]
    DuplicateAgentId(AgentId),

    #[error("scheduler returned index {index} for {agents} agents")]
    ScheduleOutOfRange { index: usize, agents: usize },

    #[error("cannot run a simulation in state {0:?}")]
    InvalidState(SimState),

    #[error("agent or environment failure: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("observer failure: {0}")]
    Observer(#[from] ObserverError),
}

pub type SimResult<T> = Result<T, SimError>;
