//! Events emitted by a host while driving chain-casts, for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::ids::{CastId, CasterId, TargetId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChainEvent {
    /// A chain ability began casting.
    CastStarted {
        caster: CasterId,
        cast: CastId,
        ability: String,
    },
    /// A hop struck a target.
    HopStruck {
        cast: CastId,
        target: TargetId,
        hop_index: u32,
        damage: f64,
    },
    /// A struck target's health reached zero.
    TargetKilled { cast: CastId, target: TargetId },
    /// The cast reached its hop cap.
    ChainExhausted { cast: CastId, hops: u32 },
    /// No acceptable target was found; the chain stopped early.
    ChainFizzled { cast: CastId, hops: u32 },
}
