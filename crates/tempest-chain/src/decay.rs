//! Per-hop damage decay.
//!
//! `damage = base * factor^hop_index`. A factor of 1.0 gives flat damage.

use tempest_core::policy::ChainPolicy;

/// Damage of the hop at `hop_index` (hops already recorded before it).
pub fn damage(hop_index: u32, base_damage: f64, decay_factor: f64) -> f64 {
    let exponent = i32::try_from(hop_index).unwrap_or(i32::MAX);
    base_damage * decay_factor.powi(exponent)
}

/// Damage of the hop at `hop_index` under `policy`.
pub fn policy_damage(policy: &ChainPolicy, hop_index: u32) -> f64 {
    damage(hop_index, policy.base_damage, policy.decay_factor)
}

/// Damage of every hop a full chain delivers, in hop order.
pub fn schedule(policy: &ChainPolicy) -> Vec<f64> {
    (0..policy.max_hops)
        .map(|hop| policy_damage(policy, hop))
        .collect()
}

/// Total damage a full chain delivers.
pub fn total_damage(policy: &ChainPolicy) -> f64 {
    schedule(policy).iter().sum()
}
