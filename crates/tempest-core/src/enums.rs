//! Enumeration types used throughout the chain pipeline.

use serde::{Deserialize, Serialize};

/// Result of the search-reject predicate for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchVerdict {
    Accept,
    Reject,
}

impl SearchVerdict {
    pub fn is_accept(self) -> bool {
        self == SearchVerdict::Accept
    }
}

/// Lifecycle phase of a chain-cast's state.
///
/// `Uninitialized` is represented by the absence of a state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainPhase {
    /// Initialized, still accepting hops.
    #[default]
    Active,
    /// Cap reached. No further hops.
    Exhausted,
}

/// What the hooks do when a cast context no longer resolves to a state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingStatePolicy {
    /// Reject every candidate and stop the chain.
    #[default]
    FailClosed,
    /// Accept every candidate and keep chaining. Legacy behavior of one
    /// of the two lightning abilities.
    FailOpen,
}

/// How chain states are keyed in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyScope {
    /// One state per cast instance. Overlapping casts never collide.
    #[default]
    PerCast,
    /// One state per caster. A new cast overwrites the caster's previous
    /// state even if that cast is still chaining.
    PerCaster,
}
