//! Tests for the arena engine driving chain-casts end to end.

use std::collections::HashSet;

use glam::DVec3;

use tempest_core::components::{DamageTaken, Health};
use tempest_core::constants::*;
use tempest_core::enums::{KeyScope, MissingStatePolicy};
use tempest_core::events::ChainEvent;

use crate::engine::{ArenaConfig, ArenaEngine, ChainEnd, StepResult};
use crate::handles::{target_entity, target_id};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Caster at (-5, 0, 0), `count` dummies along +x from the origin, 5 m apart.
fn line_arena(config: ArenaConfig, count: usize) -> (ArenaEngine, hecs::Entity, Vec<hecs::Entity>) {
    let mut engine = ArenaEngine::new(config);
    let caster = engine.spawn_caster(DVec3::new(-5.0, 0.0, 0.0));
    let dummies = engine.spawn_dummy_line(DVec3::ZERO, count, 5.0);
    (engine, caster, dummies)
}

fn hits_on(engine: &ArenaEngine, entity: hecs::Entity) -> u32 {
    engine
        .world()
        .get::<&DamageTaken>(entity)
        .map(|d| d.hits)
        .unwrap_or(0)
}

// ---- Full casts ----

#[test]
fn test_lightning_arrow_strikes_three_with_decay() {
    let (mut engine, caster, dummies) = line_arena(ArenaConfig::default(), 6);
    let report = engine.run_cast(caster, LIGHTNING_ARROW, dummies[0]).unwrap();

    assert_eq!(report.end, ChainEnd::Exhausted);
    assert_eq!(report.struck, dummies[..3].to_vec());
    assert_close(report.damage[0], 85.0);
    assert_close(report.damage[1], 72.25);
    assert_close(report.damage[2], 61.4125);

    let health = engine.world().get::<&Health>(dummies[1]).unwrap();
    assert_close(health.current, DUMMY_HEALTH - 72.25);
}

#[test]
fn test_chain_lightning_strikes_five_then_stops() {
    let (mut engine, caster, dummies) = line_arena(ArenaConfig::default(), 7);
    let report = engine.run_cast(caster, CHAIN_LIGHTNING, dummies[0]).unwrap();

    assert_eq!(report.end, ChainEnd::Exhausted);
    assert_eq!(report.struck.len(), 5);
    assert_close(report.total_damage(), CHAIN_LIGHTNING_BASE_DAMAGE * 5.0);

    // The sixth dummy was in range of the fifth but never struck.
    assert_eq!(hits_on(&engine, dummies[5]), 0);

    let events = engine.drain_events();
    assert!(matches!(
        events.last(),
        Some(ChainEvent::ChainExhausted { hops: 5, .. })
    ));
}

#[test]
fn test_chain_fizzles_without_targets() {
    let (mut engine, caster, dummies) = line_arena(ArenaConfig::default(), 2);
    let report = engine.run_cast(caster, CHAIN_LIGHTNING, dummies[0]).unwrap();

    assert_eq!(report.end, ChainEnd::Fizzled);
    assert_eq!(report.struck, dummies);

    let events = engine.drain_events();
    assert!(matches!(
        events.last(),
        Some(ChainEvent::ChainFizzled { hops: 2, .. })
    ));
}

#[test]
fn test_out_of_range_targets_are_not_searched() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    let caster = engine.spawn_caster(DVec3::ZERO);
    let near = engine.spawn_dummy(DVec3::new(3.0, 0.0, 0.0), DUMMY_HEALTH);
    let far = engine.spawn_dummy(DVec3::new(3.0 + BOUNCE_RADIUS + 1.0, 0.0, 0.0), DUMMY_HEALTH);

    let report = engine.run_cast(caster, CHAIN_LIGHTNING, near).unwrap();
    assert_eq!(report.struck, vec![near]);
    assert_eq!(report.end, ChainEnd::Fizzled);
    assert_eq!(hits_on(&engine, far), 0);
}

#[test]
fn test_never_strikes_the_same_target_twice() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    let caster = engine.spawn_caster(DVec3::ZERO);
    // Ring diameter fits inside the bounce radius: every dummy reaches every other.
    let dummies = engine.spawn_dummy_ring(DVec3::ZERO, 20, 6.0);

    let report = engine.run_cast(caster, CHAIN_LIGHTNING, dummies[0]).unwrap();
    let unique: HashSet<hecs::Entity> = report.struck.iter().copied().collect();
    assert_eq!(unique.len(), report.struck.len());
    assert_eq!(report.struck.len(), CHAIN_LIGHTNING_MAX_HOPS as usize);
    for entity in &report.struck {
        assert_eq!(hits_on(&engine, *entity), 1);
    }
}

#[test]
fn test_events_map_back_to_entities() {
    let (mut engine, caster, dummies) = line_arena(ArenaConfig::default(), 3);
    engine.run_cast(caster, LIGHTNING_ARROW, dummies[0]).unwrap();

    let struck: Vec<hecs::Entity> = engine
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            ChainEvent::HopStruck { target, .. } => target_entity(target),
            _ => None,
        })
        .collect();
    assert_eq!(struck, dummies);
    assert_eq!(target_entity(target_id(dummies[1])), Some(dummies[1]));
}

// ---- Kills and cleanup ----

#[test]
fn test_killed_targets_are_despawned() {
    let mut engine = ArenaEngine::new(ArenaConfig::default());
    let caster = engine.spawn_caster(DVec3::ZERO);
    let fragile = engine.spawn_dummy(DVec3::new(2.0, 0.0, 0.0), 50.0);
    let sturdy = engine.spawn_dummy(DVec3::new(6.0, 0.0, 0.0), DUMMY_HEALTH);

    let report = engine.run_cast(caster, CHAIN_LIGHTNING, fragile).unwrap();
    assert_eq!(report.struck, vec![fragile, sturdy]);

    assert!(!engine.world().contains(fragile));
    assert!(engine.world().contains(sturdy));

    let killed: Vec<ChainEvent> = engine
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, ChainEvent::TargetKilled { .. }))
        .collect();
    assert_eq!(killed.len(), 1);
}

// ---- Refusals ----

#[test]
fn test_unknown_ability_does_not_cast() {
    let (mut engine, caster, dummies) = line_arena(ArenaConfig::default(), 3);
    assert!(engine.run_cast(caster, "fireball", dummies[0]).is_none());
    assert!(engine.drain_events().is_empty());
}

#[test]
fn test_non_caster_cannot_cast() {
    let (mut engine, _caster, dummies) = line_arena(ArenaConfig::default(), 3);
    assert!(engine.begin_cast(dummies[0], CHAIN_LIGHTNING, dummies[1]).is_none());
}

#[test]
fn test_aiming_at_caster_fizzles() {
    let (mut engine, caster, _dummies) = line_arena(ArenaConfig::default(), 3);
    let report = engine.run_cast(caster, CHAIN_LIGHTNING, caster).unwrap();
    assert!(report.struck.is_empty());
    assert_eq!(report.end, ChainEnd::Fizzled);
}

#[test]
fn test_finished_handle_stays_finished() {
    let (mut engine, caster, dummies) = line_arena(ArenaConfig::default(), 1);
    let mut handle = engine.begin_cast(caster, LIGHTNING_ARROW, dummies[0]).unwrap();
    assert!(matches!(engine.step_cast(&mut handle), StepResult::Struck { .. }));
    assert_eq!(engine.step_cast(&mut handle), StepResult::Fizzled);
    assert!(handle.is_finished());
    assert_eq!(engine.step_cast(&mut handle), StepResult::Finished);
}

#[test]
fn test_refused_hop_is_not_delivered() {
    let (mut engine, caster, dummies) = line_arena(ArenaConfig::default(), 3);
    let mut handle = engine.begin_cast(caster, LIGHTNING_ARROW, dummies[0]).unwrap();
    assert!(matches!(engine.step_cast(&mut handle), StepResult::Struck { .. }));

    // Host hands back a target the cast already struck.
    let result = engine.deliver_hop(&mut handle, dummies[0], DVec3::ZERO);
    assert_eq!(result, StepResult::Fizzled);
    assert!(handle.is_finished());
    assert_eq!(hits_on(&engine, dummies[0]), 1);

    let struck = engine
        .drain_events()
        .iter()
        .filter(|e| matches!(e, ChainEvent::HopStruck { .. }))
        .count();
    assert_eq!(struck, 1);
}

// ---- Overlapping casts ----

#[test]
fn test_overlapping_casts_per_caster_restrike() {
    let config = ArenaConfig {
        key_scope: KeyScope::PerCaster,
        ..Default::default()
    };
    let (mut engine, caster, dummies) = line_arena(config, 8);

    let mut first = engine.begin_cast(caster, CHAIN_LIGHTNING, dummies[0]).unwrap();
    engine.step_cast(&mut first);
    engine.step_cast(&mut first);

    // Second cast by the same caster before the first finishes.
    let _second = engine.begin_cast(caster, CHAIN_LIGHTNING, dummies[6]).unwrap();

    // The first cast lost its struck set and hits dummy 1 again.
    match engine.step_cast(&mut first) {
        StepResult::Struck { target, .. } => assert_eq!(target, dummies[1]),
        other => panic!("expected a hop, got {other:?}"),
    }
    assert_eq!(hits_on(&engine, dummies[1]), 2);
}

#[test]
fn test_overlapping_casts_per_cast_are_isolated() {
    let (mut engine, caster, dummies) = line_arena(ArenaConfig::default(), 8);

    let mut first = engine.begin_cast(caster, CHAIN_LIGHTNING, dummies[0]).unwrap();
    engine.step_cast(&mut first);
    engine.step_cast(&mut first);

    let mut second = engine.begin_cast(caster, CHAIN_LIGHTNING, dummies[6]).unwrap();
    assert!(matches!(engine.step_cast(&mut second), StepResult::Struck { .. }));

    match engine.step_cast(&mut first) {
        StepResult::Struck { target, hop_index, .. } => {
            assert_eq!(target, dummies[2]);
            assert_eq!(hop_index, 2);
        }
        other => panic!("expected a hop, got {other:?}"),
    }
    assert_eq!(hits_on(&engine, dummies[1]), 1);
}

// ---- Missing state ----

fn evicted_handle_arena(
    missing_state: MissingStatePolicy,
) -> (ArenaEngine, crate::engine::CastHandle) {
    let config = ArenaConfig {
        missing_state,
        ..Default::default()
    };
    let (mut engine, caster, dummies) = line_arena(config, 3);
    let mut handles: Vec<_> = (0..=MAX_LIVE_CASTS_PER_CASTER)
        .map(|_| engine.begin_cast(caster, CHAIN_LIGHTNING, dummies[0]).unwrap())
        .collect();
    let oldest = handles.remove(0);
    assert!(engine.hooks().state(&oldest.ctx).is_none());
    (engine, oldest)
}

#[test]
fn test_evicted_cast_fails_closed() {
    let (mut engine, mut handle) = evicted_handle_arena(MissingStatePolicy::FailClosed);
    assert_eq!(engine.step_cast(&mut handle), StepResult::Fizzled);
    assert_eq!(handle.hops(), 0);
}

#[test]
fn test_evicted_cast_fail_open_hits_host_ceiling() {
    let (mut engine, mut handle) = evicted_handle_arena(MissingStatePolicy::FailOpen);
    loop {
        match engine.step_cast(&mut handle) {
            StepResult::Struck { damage, .. } => assert_eq!(damage, 0.0),
            _ => break,
        }
    }
    assert_eq!(handle.hops(), HOST_HOP_CEILING);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let run = |seed: u64| {
        let mut engine = ArenaEngine::new(ArenaConfig {
            seed,
            ..Default::default()
        });
        let caster = engine.spawn_caster(DVec3::ZERO);
        let dummies = engine.spawn_dummy_ring(DVec3::ZERO, 12, 10.0);
        engine.run_cast(caster, CHAIN_LIGHTNING, dummies[0]).unwrap();
        engine.run_cast(caster, LIGHTNING_ARROW, dummies[3]);
        serde_json::to_string(&engine.drain_events()).unwrap()
    };

    assert_eq!(run(12345), run(12345), "events diverged with same seed");
}

#[test]
fn test_dummy_ring_depends_on_seed() {
    let positions = |seed: u64| {
        let mut engine = ArenaEngine::new(ArenaConfig {
            seed,
            ..Default::default()
        });
        let dummies = engine.spawn_dummy_ring(DVec3::ZERO, 4, 10.0);
        dummies
            .iter()
            .map(|e| engine.world().get::<&tempest_core::components::Position>(*e).unwrap().0)
            .collect::<Vec<_>>()
    };

    let a = positions(111);
    let b = positions(222);
    assert_ne!(a, b);
    for pos in a {
        let range = pos.length();
        assert!((5.0..=10.0 + 1e-9).contains(&range), "range {range}");
    }
}
