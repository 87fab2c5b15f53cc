//! Mapping between hecs entities and chain identities.

use hecs::Entity;

use tempest_core::ids::{CasterId, TargetId};

pub fn target_id(entity: Entity) -> TargetId {
    TargetId(entity.to_bits().get())
}

pub fn caster_id(entity: Entity) -> CasterId {
    CasterId(entity.to_bits().get())
}

/// The entity a target id was built from, if the bits are valid.
pub fn target_entity(target: TargetId) -> Option<Entity> {
    Entity::from_bits(target.0)
}
