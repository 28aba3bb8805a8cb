//! `abm-spatial`: occupancy maps for grid- and graph-based environments.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`grid`]    | `Grid<T>`, `Cell`                                          |
//! | [`network`] | `Network<T>`, `NetworkBuilder`, `NodeId`                   |
//! | [`error`]   | `GridError`, `NetworkError`, and their result aliases      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                         |
//! |---------|------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Cell` and `NodeId`. |

pub mod error;
pub mod grid;
pub mod network;


pub use error::{GridError, GridResult, NetworkError, NetworkResult};
pub use grid::{Cell, Grid};
pub use network::{Network, NetworkBuilder, NodeId};
