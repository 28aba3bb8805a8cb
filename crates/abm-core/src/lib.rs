//! `abm-core`: foundational types for the `abm` simulation engine.
//!
//! This crate is a dependency of every other `abm-*` crate.  It has no
//! `abm-*` dependencies and only two external ones (`rand` and `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`ids`]   | `AgentId`, `IdGenerator`                                    |
//! | [`time`]  | `TimeValue`, `TimeSource`, `FixedTime`, `InfiniteTime`, `SimConfig` |
//! | [`rng`]   | `SimRng`, `RandomSource`                                    |
//! | [`error`] | `CoreError`, `CoreResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and `SimConfig`.     |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, IdGenerator};
pub use rng::{RandomSource, SimRng};
pub use time::{FixedTime, InfiniteTime, SimConfig, TimeSource, TimeValue};
