//! ECS components for host entities.
//!
//! Components are plain data structs with no methods.
//! Chain logic lives in `tempest-chain`, host logic in systems.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// World position (meters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec3);

/// Hit points. An entity at zero is dead and awaits cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

/// Marks an entity that can be struck by chain hops.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Combatant;

/// Marks an entity able to cast chain abilities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Caster;

/// Running tally of what a combatant has absorbed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DamageTaken {
    pub total: f64,
    pub hits: u32,
}
