//! Search-reject predicate — invoked once per candidate by the host's search loop.

use tempest_core::enums::{MissingStatePolicy, SearchVerdict};
use tempest_core::ids::TargetId;

use crate::store::{CastContext, ChainState, ChainStateStore};

/// Reject if the candidate was already struck or the cap is reached.
pub fn verdict_for(state: &ChainState, candidate: TargetId) -> SearchVerdict {
    if state.contains(candidate) || state.is_full() {
        SearchVerdict::Reject
    } else {
        SearchVerdict::Accept
    }
}

/// Evaluate one search candidate for the cast addressed by `ctx`.
pub fn search_reject(
    store: &ChainStateStore,
    ctx: &CastContext,
    candidate: TargetId,
) -> SearchVerdict {
    match store.get(ctx) {
        Some(state) => verdict_for(state, candidate),
        None => {
            let policy = store.missing_state_policy();
            log::warn!(
                "{} ({}): no chain state while searching, {:?}",
                ctx.cast,
                ctx.ability,
                policy
            );
            match policy {
                MissingStatePolicy::FailClosed => SearchVerdict::Reject,
                MissingStatePolicy::FailOpen => SearchVerdict::Accept,
            }
        }
    }
}
