//! `abm-behavior`: the traits user code implements to plug domain logic into
//! the engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`agent`]       | `Agent` (one-stage) and `StagedAgent` (decide/commit)      |
//! | [`environment`] | `Environment` trait, `NoopEnvironment`                     |
//! | [`error`]       | `BehaviorError`, `BehaviorResult<T>`                       |
//!
//! # Design notes
//!
//! A step can be executed two ways by abm-sim:
//!
//! 1. **One-stage**: each scheduled agent's `step` gets `&mut E` and applies
//!    its changes immediately.  Agents later in the schedule see the changes
//!    of agents earlier in it.
//!
//! 2. **Two-stage**: every scheduled agent first `decide`s against `&E`,
//!    producing an intent; only after all decisions are in does each agent
//!    `commit` its intent with `&mut E`.  The shared borrow during the decide
//!    phase makes it impossible for one agent's decision to observe another
//!    agent's commit from the same step.

pub mod agent;
pub mod environment;
pub mod error;


pub use agent::{Agent, StagedAgent};
pub use environment::{Environment, NoopEnvironment};
pub use error::{BehaviorError, BehaviorResult};
