//! Hook facade registered with the host effect pipeline.
//!
//! A host drives one chain-cast as:
//! `initialize` → per candidate `search_reject` → on impact `record`
//! → `damage_amount` → repeat while `record` returned true and a
//! candidate is accepted.

use tempest_core::config::AbilityTable;
use tempest_core::enums::{KeyScope, MissingStatePolicy, SearchVerdict};
use tempest_core::ids::{CasterId, TargetId};

use crate::decay;
use crate::recorder::{self, HopOutcome};
use crate::reject;
use crate::store::{CastContext, ChainState, ChainStateStore};

/// The chain hooks and the state they share.
#[derive(Debug)]
pub struct ChainHooks {
    abilities: AbilityTable,
    store: ChainStateStore,
}

impl ChainHooks {
    pub fn new(abilities: AbilityTable, store: ChainStateStore) -> Self {
        Self { abilities, store }
    }

    /// Per-cast keying, fail-closed on missing state.
    pub fn with_abilities(abilities: AbilityTable) -> Self {
        Self::new(
            abilities,
            ChainStateStore::new(KeyScope::PerCast, MissingStatePolicy::FailClosed),
        )
    }

    pub fn abilities(&self) -> &AbilityTable {
        &self.abilities
    }

    pub fn store(&self) -> &ChainStateStore {
        &self.store
    }

    /// Begin a chain-cast of `ability` by `caster`.
    ///
    /// Returns `None` (do not proceed) when the ability is not registered.
    pub fn initialize(&mut self, caster: CasterId, ability: &str) -> Option<CastContext> {
        let Some(policy) = self.abilities.get(ability).copied() else {
            log::warn!("{caster}: {ability:?} is not a registered chain ability");
            return None;
        };
        let ctx = self.store.create(caster, ability, policy);
        log::debug!(
            "{caster}: {} {ability} (max_hops={}, decay={})",
            ctx.cast,
            policy.max_hops,
            policy.decay_factor
        );
        Some(ctx)
    }

    pub fn search_reject(&self, ctx: &CastContext, candidate: TargetId) -> SearchVerdict {
        reject::search_reject(&self.store, ctx, candidate)
    }

    /// Record an impact. Returns whether the chain may continue.
    pub fn record(&mut self, ctx: &CastContext, impacted: TargetId) -> bool {
        self.record_hop(ctx, impacted).continue_chain
    }

    /// Record an impact, also reporting the hop index.
    pub fn record_hop(&mut self, ctx: &CastContext, impacted: TargetId) -> HopOutcome {
        recorder::record(&mut self.store, ctx, impacted)
    }

    /// Damage of the most recently recorded hop (hop 0 before any record).
    pub fn damage_amount(&self, ctx: &CastContext) -> f64 {
        match self.store.get(ctx) {
            Some(state) => {
                let hop_index = state.hit_count().saturating_sub(1);
                decay::policy_damage(state.policy(), hop_index)
            }
            None => {
                log::warn!("{} ({}): no chain state for damage", ctx.cast, ctx.ability);
                0.0
            }
        }
    }

    pub fn state(&self, ctx: &CastContext) -> Option<&ChainState> {
        self.store.get(ctx)
    }
}
