//! Target search — finds the next hop target around the last impact point.

use glam::DVec3;
use hecs::{Entity, World};

use tempest_chain::{CastContext, ChainHooks};
use tempest_core::components::{Combatant, Health, Position};

use crate::handles::target_id;

/// Nearest living combatant within `radius` of `origin` that the cast's
/// search-reject hook accepts. Ties are broken by entity id.
pub fn find_next_target(
    world: &World,
    hooks: &ChainHooks,
    ctx: &CastContext,
    origin: DVec3,
    radius: f64,
) -> Option<(Entity, DVec3)> {
    let radius_sq = radius * radius;

    let mut candidates: Vec<(f64, Entity, DVec3)> = Vec::new();
    {
        let mut query = world.query::<(&Position, &Health, &Combatant)>();
        for (entity, (pos, health, _)) in query.iter() {
            if health.current <= 0.0 {
                continue;
            }
            let dist_sq = pos.0.distance_squared(origin);
            if dist_sq <= radius_sq {
                candidates.push((dist_sq, entity, pos.0));
            }
        }
    }

    candidates.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then_with(|| a.1.to_bits().cmp(&b.1.to_bits()))
    });

    candidates
        .into_iter()
        .find(|(_, entity, _)| hooks.search_reject(ctx, target_id(*entity)).is_accept())
        .map(|(_, entity, pos)| (entity, pos))
}

/// Whether `entity` is a living combatant the search-reject hook accepts.
/// Used for the first hop, which is aimed rather than searched.
pub fn accepts_first_target(
    world: &World,
    hooks: &ChainHooks,
    ctx: &CastContext,
    entity: Entity,
) -> Option<DVec3> {
    if world.get::<&Combatant>(entity).is_err() {
        return None;
    }
    let alive = world
        .get::<&Health>(entity)
        .map(|h| h.current > 0.0)
        .unwrap_or(false);
    if !alive {
        return None;
    }
    if !hooks.search_reject(ctx, target_id(entity)).is_accept() {
        return None;
    }
    world.get::<&Position>(entity).ok().map(|pos| pos.0)
}
