//! Reference host for TEMPEST chain abilities.
//!
//! Owns a hecs world of combatants and drives the chain hooks the way an
//! engine's effect pipeline would: search, impact, record, damage.
//! Completely headless, enabling deterministic testing.

pub mod engine;
pub mod handles;
pub mod systems;
pub mod world_setup;

pub use engine::{ArenaConfig, ArenaEngine};
pub use tempest_chain as chain;
pub use tempest_core as core;

#[cfg(test)]
mod tests;
