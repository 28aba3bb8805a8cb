//! Agent identifiers and the factory that hands them out.
//!
//! An `AgentId` is a stable label carried by an agent for the whole run.  It
//! is deliberately *not* the agent's position in the simulation's agent list:
//! schedulers work over positions, observers and domain code over ids.

use std::fmt;

/// Stable identifier of one agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Sentinel meaning "no valid ID".
    pub const INVALID: AgentId = AgentId(u32::MAX);

    #[inline(always)]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for AgentId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

impl TryFrom<usize> for AgentId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<AgentId, Self::Error> {
        u32::try_from(n).map(AgentId)
    }
}

// ── IdGenerator ───────────────────────────────────────────────────────────────

/// Sequential `AgentId` factory.
///
/// Pass one generator to every agent factory that populates a run.  Two
/// generators never share state, so separate runs in the same process get
/// independent id sequences.
///
/// ```rust
/// use abm_core::{AgentId, IdGenerator};
///
/// let mut ids = IdGenerator::new();
/// assert_eq!(ids.next_id(), AgentId(0));
/// assert_eq!(ids.next_id(), AgentId(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start handing out ids at `first`.
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Return the next unused id.
    ///
    /// # Panics
    /// Panics if the `u32` id space is exhausted.
    pub fn next_id(&mut self) -> AgentId {
        assert!(self.next != u32::MAX, "agent id space exhausted");
        let id = AgentId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> AgentId {
        AgentId(self.next)
    }
}

impl Iterator for IdGenerator {
    type Item = AgentId;

    fn next(&mut self) -> Option<AgentId> {
        if self.next == u32::MAX {
            return None;
        }
        Some(self.next_id())
    }
}
