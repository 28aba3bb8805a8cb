//! `abm-sim`: the simulation state machine for the abm framework.
//!
//! # Step loop
//!
//! ```text
//! initialize: env.init(start) → agent.init(start, env)… → observer.start
//! loop:
//!   ① Time      : pull the next value; exhausted → stop
//!   ② Terminate : terminator.test(t, agents, env) → stop without updating
//!   ③ Schedule  : scheduler.step(t, agents, env) → agent positions
//!   ④ Update    : OneStage: env.step, then agent.step in schedule order
//!                 TwoStage: env.step, agent.decide for all, agent.commit
//!                           for all, env.commit
//!   ⑤ Observe   : observer.step → continue / pause / stop
//! on stop: observer.done, exactly once
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use abm_core::FixedTime;
//! use abm_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(agents, env, FixedTime::steps(100))
//!     .observer(NoopObserver)
//!     .one_stage()?;
//! sim.run()?;
//! ```

pub mod builder;
pub mod error;
pub mod mode;
pub mod observer;
pub mod pause;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{ObserverError, ObserverResult, SimError, SimResult};
pub use mode::{OneStage, StepMode, TwoStage};
pub use observer::{ChainedObserver, Control, NoopObserver, Observer};
pub use pause::{DelayObserver, KeyPauseObserver, PauseObserver};
pub use sim::{OneStageSim, RunOutcome, Sim, SimState, StopReason, TwoStageSim};
