//! Chain/bounce targeting for TEMPEST lightning abilities.
//!
//! Exposes the four hooks a host effect pipeline calls during a chain-cast
//! (initialize, search reject, record, damage amount) and the per-cast
//! state they share. No ECS or engine dependency — operates on plain ids.

pub mod decay;
pub mod hooks;
pub mod recorder;
pub mod reject;
pub mod store;

pub use tempest_core as core;
pub use hooks::ChainHooks;
pub use store::{CastContext, ChainState, ChainStateStore};
