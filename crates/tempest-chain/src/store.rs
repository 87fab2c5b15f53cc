//! Chain state storage — one "already struck" set per chain-cast.
//!
//! States are addressed through the `CastContext` returned by `create`.
//! Under `KeyScope::PerCaster` the context's cast id is ignored and every
//! cast of a caster shares a single slot, so the last `create` wins.

use std::collections::{HashMap, HashSet};

use tempest_core::constants::MAX_LIVE_CASTS_PER_CASTER;
use tempest_core::enums::{ChainPhase, KeyScope, MissingStatePolicy};
use tempest_core::ids::{CastId, CasterId, TargetId};
use tempest_core::policy::ChainPolicy;

/// Handle a host threads through every hook call of one chain-cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastContext {
    pub caster: CasterId,
    pub cast: CastId,
    pub ability: String,
}

/// Bookkeeping for one in-progress chain-cast.
#[derive(Debug, Clone)]
pub struct ChainState {
    caster: CasterId,
    cast: CastId,
    ability: String,
    policy: ChainPolicy,
    hits: HashSet<TargetId>,
    phase: ChainPhase,
}

impl ChainState {
    fn new(caster: CasterId, cast: CastId, ability: &str, policy: ChainPolicy) -> Self {
        Self {
            caster,
            cast,
            ability: ability.to_string(),
            policy,
            hits: HashSet::new(),
            phase: ChainPhase::Active,
        }
    }

    pub fn caster(&self) -> CasterId {
        self.caster
    }

    pub fn cast(&self) -> CastId {
        self.cast
    }

    pub fn ability(&self) -> &str {
        &self.ability
    }

    pub fn policy(&self) -> &ChainPolicy {
        &self.policy
    }

    pub fn max_hops(&self) -> u32 {
        self.policy.max_hops
    }

    pub fn phase(&self) -> ChainPhase {
        self.phase
    }

    /// Number of distinct targets struck so far.
    pub fn hit_count(&self) -> u32 {
        self.hits.len() as u32
    }

    pub fn contains(&self, target: TargetId) -> bool {
        self.hits.contains(&target)
    }

    /// Whether the hop cap has been reached.
    pub fn is_full(&self) -> bool {
        self.hit_count() >= self.policy.max_hops
    }

    /// Struck targets, in no particular order.
    pub fn hits(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.hits.iter().copied()
    }

    /// Insert a struck target. Returns false if it was already present.
    pub(crate) fn insert_hit(&mut self, target: TargetId) -> bool {
        self.hits.insert(target)
    }

    pub(crate) fn set_phase(&mut self, phase: ChainPhase) {
        self.phase = phase;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum StateKey {
    Cast(CasterId, CastId),
    Caster(CasterId),
}

/// Arena of chain states.
#[derive(Debug, Default)]
pub struct ChainStateStore {
    scope: KeyScope,
    missing_state: MissingStatePolicy,
    states: HashMap<StateKey, ChainState>,
    next_cast_id: u64,
}

impl ChainStateStore {
    pub fn new(scope: KeyScope, missing_state: MissingStatePolicy) -> Self {
        Self {
            scope,
            missing_state,
            states: HashMap::new(),
            next_cast_id: 0,
        }
    }

    pub fn scope(&self) -> KeyScope {
        self.scope
    }

    pub fn missing_state_policy(&self) -> MissingStatePolicy {
        self.missing_state
    }

    /// Start a fresh, empty state for `caster` and return its context.
    ///
    /// Exhausted states of every caster are pruned first.
    /// Per-caster scope replaces any state the caster already holds.
    /// Per-cast scope also evicts the caster's oldest live states past
    /// `MAX_LIVE_CASTS_PER_CASTER`.
    pub fn create(&mut self, caster: CasterId, ability: &str, policy: ChainPolicy) -> CastContext {
        let cast = CastId(self.next_cast_id);
        self.next_cast_id += 1;

        self.prune_exhausted();

        let key = match self.scope {
            KeyScope::PerCast => {
                self.evict_oldest_live(caster);
                StateKey::Cast(caster, cast)
            }
            KeyScope::PerCaster => {
                if let Some(previous) = self.states.get(&StateKey::Caster(caster)) {
                    if previous.phase() == ChainPhase::Active {
                        log::debug!(
                            "{caster}: {} overwrites unfinished {}",
                            cast,
                            previous.cast()
                        );
                    }
                }
                StateKey::Caster(caster)
            }
        };

        self.states
            .insert(key, ChainState::new(caster, cast, ability, policy));

        CastContext {
            caster,
            cast,
            ability: ability.to_string(),
        }
    }

    pub fn get(&self, ctx: &CastContext) -> Option<&ChainState> {
        self.states.get(&self.key(ctx))
    }

    pub(crate) fn get_mut(&mut self, ctx: &CastContext) -> Option<&mut ChainState> {
        let key = self.key(ctx);
        self.states.get_mut(&key)
    }

    /// Whether `target` was already struck by the cast. False if the state is absent.
    pub fn contains(&self, ctx: &CastContext, target: TargetId) -> bool {
        self.get(ctx).is_some_and(|state| state.contains(target))
    }

    /// Number of states currently held.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of states held for one caster.
    pub fn states_for(&self, caster: CasterId) -> usize {
        self.states.values().filter(|s| s.caster() == caster).count()
    }

    fn key(&self, ctx: &CastContext) -> StateKey {
        match self.scope {
            KeyScope::PerCast => StateKey::Cast(ctx.caster, ctx.cast),
            KeyScope::PerCaster => StateKey::Caster(ctx.caster),
        }
    }

    fn prune_exhausted(&mut self) {
        self.states.retain(|_, s| s.phase() != ChainPhase::Exhausted);
    }

    fn evict_oldest_live(&mut self, caster: CasterId) {
        let mut live: Vec<(CastId, StateKey)> = self
            .states
            .iter()
            .filter(|(_, s)| s.caster() == caster)
            .map(|(key, s)| (s.cast(), *key))
            .collect();

        if live.len() < MAX_LIVE_CASTS_PER_CASTER {
            return;
        }

        // Oldest first; keep room for the cast being created.
        live.sort_by_key(|(cast, _)| *cast);
        let excess = live.len() + 1 - MAX_LIVE_CASTS_PER_CASTER;
        for (cast, key) in live.into_iter().take(excess) {
            log::debug!("{caster}: evicting orphaned {cast}");
            self.states.remove(&key);
        }
    }
}
