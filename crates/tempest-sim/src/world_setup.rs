//! Entity spawn factories for setting up the arena.

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use tempest_core::components::*;
use tempest_core::constants::DUMMY_HEALTH;

/// Spawn an entity able to cast chain abilities. Casters are not struck.
pub fn spawn_caster(world: &mut World, position: DVec3) -> hecs::Entity {
    world.spawn((Caster, Position(position)))
}

/// Spawn a training dummy that chain hops can strike.
pub fn spawn_dummy(world: &mut World, position: DVec3, health: f64) -> hecs::Entity {
    world.spawn((
        Combatant,
        Position(position),
        Health {
            current: health,
            max: health,
        },
        DamageTaken::default(),
    ))
}

/// Spawn `count` dummies at random bearings around `center`, each between
/// half of `radius` and `radius` away, on the ground plane.
pub fn spawn_dummy_ring(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    center: DVec3,
    count: usize,
    radius: f64,
) -> Vec<hecs::Entity> {
    (0..count)
        .map(|_| {
            let bearing: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
            let range: f64 = rng.gen_range(radius * 0.5..=radius);
            let offset = DVec3::new(range * bearing.sin(), range * bearing.cos(), 0.0);
            spawn_dummy(world, center + offset, DUMMY_HEALTH)
        })
        .collect()
}
