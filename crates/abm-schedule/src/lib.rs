//! `abm-schedule`: which agents update each step, and when to stop early.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`scheduler`]  | `Scheduler` trait, `InOrderScheduler`, `RandomOrderScheduler`, `RandomSampleScheduler` |
//! | [`terminator`] | `Terminator` trait, `NeverTerminate`                            |
//!
//! Both traits are generic over the time type `T`, agent type `A`, and
//! environment type `E` of a run, and both only ever get shared borrows:
//! neither a scheduler nor a terminator can mutate simulation state.

pub mod scheduler;
pub mod terminator;

#[cfg(test)]
mod tests;

pub use scheduler::{InOrderScheduler, RandomOrderScheduler, RandomSampleScheduler, Scheduler};
pub use terminator::{NeverTerminate, Terminator};
