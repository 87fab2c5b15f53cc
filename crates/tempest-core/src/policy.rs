//! Chain policy: the per-ability parameters of a chain-cast.
//!
//! Flat-damage and decaying chains are both instances of `ChainPolicy`;
//! abilities differ only in the values they register.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::constants::*;

/// Hop cap and damage curve for one chain ability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainPolicy {
    /// Maximum distinct targets per cast, in 1..=`MAX_HOPS_LIMIT`.
    pub max_hops: u32,
    /// Damage of the first hop.
    pub base_damage: f64,
    /// Multiplier applied per successive hop, in (0, 1].
    #[serde(default = "default_decay")]
    pub decay_factor: f64,
}

fn default_decay() -> f64 {
    1.0
}

impl ChainPolicy {
    /// Chain lightning: five hops, flat damage.
    pub fn chain_lightning() -> Self {
        Self {
            max_hops: CHAIN_LIGHTNING_MAX_HOPS,
            base_damage: CHAIN_LIGHTNING_BASE_DAMAGE,
            decay_factor: CHAIN_LIGHTNING_DECAY,
        }
    }

    /// Lightning arrow: three hops, 85% of the previous hop each time.
    pub fn lightning_arrow() -> Self {
        Self {
            max_hops: LIGHTNING_ARROW_MAX_HOPS,
            base_damage: LIGHTNING_ARROW_BASE_DAMAGE,
            decay_factor: LIGHTNING_ARROW_DECAY,
        }
    }

    /// Whether damage stays constant across hops.
    pub fn is_flat(&self) -> bool {
        self.decay_factor == 1.0
    }

    /// Check the policy invariants for the ability registered as `name`.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.max_hops == 0 {
            return Err(ConfigError::ZeroMaxHops {
                ability: name.to_string(),
            });
        }
        if self.max_hops > MAX_HOPS_LIMIT {
            return Err(ConfigError::MaxHopsTooLarge {
                ability: name.to_string(),
                value: self.max_hops,
                limit: MAX_HOPS_LIMIT,
            });
        }
        if !self.base_damage.is_finite() || self.base_damage < 0.0 {
            return Err(ConfigError::InvalidBaseDamage {
                ability: name.to_string(),
                value: self.base_damage,
            });
        }
        if !(self.decay_factor > 0.0 && self.decay_factor <= 1.0) {
            return Err(ConfigError::InvalidDecayFactor {
                ability: name.to_string(),
                value: self.decay_factor,
            });
        }
        Ok(())
    }
}
