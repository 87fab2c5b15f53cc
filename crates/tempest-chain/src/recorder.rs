//! Hop recorder — stores a struck target and decides whether the chain continues.

use tempest_core::enums::{ChainPhase, MissingStatePolicy};
use tempest_core::ids::TargetId;

use crate::store::{CastContext, ChainStateStore};

/// Result of recording one hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HopOutcome {
    /// Zero-based index of the recorded hop (hops recorded before it).
    pub hop_index: u32,
    /// Whether the hop should be delivered. False when the target was
    /// refused: already struck, cap reached, or no state under fail-closed.
    pub accepted: bool,
    /// Whether the host may attempt another hop.
    pub continue_chain: bool,
}

/// Record `target` as struck by the cast addressed by `ctx`.
///
/// The hop that fills the cap is still recorded; only the next one is refused.
pub fn record(store: &mut ChainStateStore, ctx: &CastContext, target: TargetId) -> HopOutcome {
    let missing_state = store.missing_state_policy();
    let Some(state) = store.get_mut(ctx) else {
        log::warn!(
            "{} ({}): no chain state while recording {target}, {:?}",
            ctx.cast,
            ctx.ability,
            missing_state
        );
        let fail_open = missing_state == MissingStatePolicy::FailOpen;
        return HopOutcome {
            hop_index: 0,
            accepted: fail_open,
            continue_chain: fail_open,
        };
    };

    let accepted = if state.contains(target) {
        // Host offered a target search-reject had refused.
        log::debug!("{}: {target} already struck, ignoring", ctx.cast);
        false
    } else if state.is_full() {
        log::warn!(
            "{}: hop cap {} reached, refusing {target}",
            ctx.cast,
            state.max_hops()
        );
        false
    } else {
        state.insert_hit(target)
    };

    let continue_chain = !state.is_full();
    if !continue_chain {
        state.set_phase(ChainPhase::Exhausted);
    }

    HopOutcome {
        hop_index: state.hit_count().saturating_sub(1),
        accepted,
        continue_chain,
    }
}
