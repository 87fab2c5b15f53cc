//! Arena engine — a headless host effect pipeline.
//!
//! `ArenaEngine` owns the hecs world, the chain hooks, and an event buffer.
//! A cast is driven hop by hop with `step_cast`, or to completion with
//! `run_cast`. Stepping lets several casts interleave, as overlapping
//! casts do in a real engine.

use glam::DVec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tempest_chain::{CastContext, ChainHooks, ChainStateStore};
use tempest_core::components::{Caster, Position};
use tempest_core::config::AbilityTable;
use tempest_core::constants::{BOUNCE_RADIUS, DUMMY_HEALTH, HOST_HOP_CEILING};
use tempest_core::enums::{KeyScope, MissingStatePolicy};
use tempest_core::events::ChainEvent;
use tempest_core::ids::CastId;

use crate::handles::{caster_id, target_id};
use crate::systems;
use crate::world_setup;

/// Configuration for a new arena.
pub struct ArenaConfig {
    /// RNG seed for determinism. Same seed = same arena.
    pub seed: u64,
    /// Chain abilities the hooks will accept.
    pub abilities: AbilityTable,
    pub key_scope: KeyScope,
    pub missing_state: MissingStatePolicy,
    /// Search radius around the last impact for the next hop.
    pub bounce_radius: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            abilities: AbilityTable::builtin(),
            key_scope: KeyScope::default(),
            missing_state: MissingStatePolicy::default(),
            bounce_radius: BOUNCE_RADIUS,
        }
    }
}

/// One in-flight chain-cast driven by the engine.
#[derive(Debug, Clone)]
pub struct CastHandle {
    pub ctx: CastContext,
    /// Aimed target for the first hop; consumed by the first step.
    first_target: Option<Entity>,
    /// Where the next search is centered.
    origin: DVec3,
    hops: u32,
    finished: bool,
}

impl CastHandle {
    pub fn cast(&self) -> CastId {
        self.ctx.cast
    }

    pub fn hops(&self) -> u32 {
        self.hops
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Outcome of one `step_cast`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepResult {
    /// A hop landed. `continue_chain` is false on the hop that fills the cap.
    Struck {
        target: Entity,
        hop_index: u32,
        damage: f64,
        continue_chain: bool,
    },
    /// No acceptable target; the chain ended early.
    Fizzled,
    /// The cast had already ended.
    Finished,
}

/// How a completed cast ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainEnd {
    Exhausted,
    Fizzled,
}

/// Summary of a cast run to completion.
#[derive(Debug, Clone)]
pub struct CastReport {
    pub cast: CastId,
    /// Struck entities in hop order.
    pub struck: Vec<Entity>,
    /// Damage of each hop, in hop order.
    pub damage: Vec<f64>,
    pub end: ChainEnd,
}

impl CastReport {
    pub fn total_damage(&self) -> f64 {
        self.damage.iter().sum()
    }
}

/// The arena engine. Owns the ECS world and the chain hooks.
pub struct ArenaEngine {
    world: World,
    rng: ChaCha8Rng,
    hooks: ChainHooks,
    bounce_radius: f64,
    events: Vec<ChainEvent>,
    despawn_buffer: Vec<Entity>,
}

impl ArenaEngine {
    pub fn new(config: ArenaConfig) -> Self {
        let store = ChainStateStore::new(config.key_scope, config.missing_state);
        Self {
            world: World::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            hooks: ChainHooks::new(config.abilities, store),
            bounce_radius: config.bounce_radius,
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn hooks(&self) -> &ChainHooks {
        &self.hooks
    }

    pub fn spawn_caster(&mut self, position: DVec3) -> Entity {
        world_setup::spawn_caster(&mut self.world, position)
    }

    pub fn spawn_dummy(&mut self, position: DVec3, health: f64) -> Entity {
        world_setup::spawn_dummy(&mut self.world, position, health)
    }

    /// Spawn `count` full-health dummies at random bearings around `center`.
    pub fn spawn_dummy_ring(&mut self, center: DVec3, count: usize, radius: f64) -> Vec<Entity> {
        world_setup::spawn_dummy_ring(&mut self.world, &mut self.rng, center, count, radius)
    }

    /// Spawn dummies in a line along +x, `spacing` apart, starting at `start`.
    pub fn spawn_dummy_line(&mut self, start: DVec3, count: usize, spacing: f64) -> Vec<Entity> {
        (0..count)
            .map(|i| {
                let offset = DVec3::new(spacing * i as f64, 0.0, 0.0);
                world_setup::spawn_dummy(&mut self.world, start + offset, DUMMY_HEALTH)
            })
            .collect()
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<ChainEvent> {
        std::mem::take(&mut self.events)
    }

    /// Initialize a chain-cast of `ability` by `caster`, aimed at `first_target`.
    ///
    /// Returns `None` if `caster` is not a caster or the hooks refuse to proceed.
    pub fn begin_cast(
        &mut self,
        caster: Entity,
        ability: &str,
        first_target: Entity,
    ) -> Option<CastHandle> {
        let origin = match self.world.query_one_mut::<(&Caster, &Position)>(caster) {
            Ok((_, pos)) => pos.0,
            Err(_) => {
                log::warn!("{caster:?} cannot cast {ability:?}: not a caster");
                return None;
            }
        };

        let ctx = self.hooks.initialize(caster_id(caster), ability)?;
        self.events.push(ChainEvent::CastStarted {
            caster: ctx.caster,
            cast: ctx.cast,
            ability: ctx.ability.clone(),
        });

        Some(CastHandle {
            ctx,
            first_target: Some(first_target),
            origin,
            hops: 0,
            finished: false,
        })
    }

    /// Drive one hop of `handle`: acquire a target, record it, apply damage.
    pub fn step_cast(&mut self, handle: &mut CastHandle) -> StepResult {
        if handle.finished {
            return StepResult::Finished;
        }

        if handle.hops >= HOST_HOP_CEILING {
            log::warn!(
                "{}: host hop ceiling {} reached, stopping",
                handle.ctx.cast,
                HOST_HOP_CEILING
            );
            return self.fizzle(handle);
        }

        let acquired = match handle.first_target.take() {
            Some(aimed) => {
                systems::search::accepts_first_target(&self.world, &self.hooks, &handle.ctx, aimed)
                    .map(|pos| (aimed, pos))
            }
            None => systems::search::find_next_target(
                &self.world,
                &self.hooks,
                &handle.ctx,
                handle.origin,
                self.bounce_radius,
            ),
        };

        let Some((target, position)) = acquired else {
            return self.fizzle(handle);
        };

        self.deliver_hop(handle, target, position)
    }

    /// Record `target` for `handle` and, if the hooks accept it, apply the hop.
    /// A refused hop ends the cast without touching the target.
    pub(crate) fn deliver_hop(
        &mut self,
        handle: &mut CastHandle,
        target: Entity,
        position: DVec3,
    ) -> StepResult {
        let outcome = self.hooks.record_hop(&handle.ctx, target_id(target));
        if !outcome.accepted {
            log::warn!("{}: hop on {target:?} refused by the recorder", handle.ctx.cast);
            return self.fizzle(handle);
        }

        let damage = self.hooks.damage_amount(&handle.ctx);
        systems::impact::apply(
            &mut self.world,
            handle.ctx.cast,
            target,
            outcome.hop_index,
            damage,
            &mut self.events,
        );

        handle.origin = position;
        handle.hops += 1;

        if !outcome.continue_chain {
            handle.finished = true;
            self.events.push(ChainEvent::ChainExhausted {
                cast: handle.ctx.cast,
                hops: handle.hops,
            });
        }

        StepResult::Struck {
            target,
            hop_index: outcome.hop_index,
            damage,
            continue_chain: outcome.continue_chain,
        }
    }

    /// Run a chain-cast to completion, then despawn the dead.
    pub fn run_cast(
        &mut self,
        caster: Entity,
        ability: &str,
        first_target: Entity,
    ) -> Option<CastReport> {
        let mut handle = self.begin_cast(caster, ability, first_target)?;
        let mut report = CastReport {
            cast: handle.cast(),
            struck: Vec::new(),
            damage: Vec::new(),
            end: ChainEnd::Fizzled,
        };

        loop {
            match self.step_cast(&mut handle) {
                StepResult::Struck {
                    target,
                    damage,
                    continue_chain,
                    ..
                } => {
                    report.struck.push(target);
                    report.damage.push(damage);
                    if !continue_chain {
                        report.end = ChainEnd::Exhausted;
                        break;
                    }
                }
                StepResult::Fizzled | StepResult::Finished => break,
            }
        }

        self.cleanup();
        Some(report)
    }

    /// Despawn combatants whose health reached zero.
    pub fn cleanup(&mut self) {
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    fn fizzle(&mut self, handle: &mut CastHandle) -> StepResult {
        handle.finished = true;
        self.events.push(ChainEvent::ChainFizzled {
            cast: handle.ctx.cast,
            hops: handle.hops,
        });
        StepResult::Fizzled
    }
}
