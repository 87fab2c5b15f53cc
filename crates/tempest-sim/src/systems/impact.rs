//! Impact system — applies a hop's damage to the struck entity.

use hecs::{Entity, World};

use tempest_core::components::{DamageTaken, Health};
use tempest_core::events::ChainEvent;
use tempest_core::ids::CastId;

use crate::handles::target_id;

/// Apply `damage` to `target`, emitting hop and kill events.
pub fn apply(
    world: &mut World,
    cast: CastId,
    target: Entity,
    hop_index: u32,
    damage: f64,
    events: &mut Vec<ChainEvent>,
) {
    let id = target_id(target);

    events.push(ChainEvent::HopStruck {
        cast,
        target: id,
        hop_index,
        damage,
    });

    if let Ok(mut taken) = world.get::<&mut DamageTaken>(target) {
        taken.total += damage;
        taken.hits += 1;
    }

    if let Ok(mut health) = world.get::<&mut Health>(target) {
        let was_alive = health.current > 0.0;
        health.current = (health.current - damage).max(0.0);
        if was_alive && health.current <= 0.0 {
            events.push(ChainEvent::TargetKilled { cast, target: id });
        }
    }
}
