//! Ability constants and tuning parameters.

// --- Chain lightning ---

/// Registered name of the chain lightning ability.
pub const CHAIN_LIGHTNING: &str = "chain_lightning";

/// Maximum distinct targets struck by one chain lightning cast.
pub const CHAIN_LIGHTNING_MAX_HOPS: u32 = 5;

/// Damage dealt by every chain lightning hop.
pub const CHAIN_LIGHTNING_BASE_DAMAGE: f64 = 60.0;

/// Chain lightning does not decay.
pub const CHAIN_LIGHTNING_DECAY: f64 = 1.0;

// --- Lightning arrow ---

/// Registered name of the lightning arrow ability.
pub const LIGHTNING_ARROW: &str = "lightning_arrow";

/// Maximum distinct targets struck by one lightning arrow cast.
pub const LIGHTNING_ARROW_MAX_HOPS: u32 = 3;

/// Damage of the first lightning arrow hop.
pub const LIGHTNING_ARROW_BASE_DAMAGE: f64 = 85.0;

/// Each lightning arrow hop deals this fraction of the previous one.
pub const LIGHTNING_ARROW_DECAY: f64 = 0.85;

// --- Ability table ---

/// Largest `max_hops` an ability may register.
pub const MAX_HOPS_LIMIT: u32 = 256;

// --- State store ---

/// Live states one caster may hold in the per-cast store before the
/// oldest is evicted. Bounds orphans left by abandoned casts.
pub const MAX_LIVE_CASTS_PER_CASTER: usize = 8;

// --- Reference host ---

/// Search radius around the last struck target for the next hop (meters).
pub const BOUNCE_RADIUS: f64 = 12.0;

/// Hard ceiling on hops the reference host will drive for one cast,
/// regardless of what the hooks report.
pub const HOST_HOP_CEILING: u32 = 64;

/// Default health of a training dummy.
pub const DUMMY_HEALTH: f64 = 250.0;
