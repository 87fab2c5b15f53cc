//! Cleanup system: removes combatants whose health reached zero.

use hecs::{Entity, World};

use tempest_core::components::{Combatant, Health};

/// Despawn dead combatants. Uses a pre-allocated buffer to avoid per-call allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (health, _combatant)) in world.query_mut::<(&Health, &Combatant)>() {
        if health.current <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
