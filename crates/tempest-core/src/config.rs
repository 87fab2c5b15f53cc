//! Ability table: the name → `ChainPolicy` registry hosts select from.
//!
//! Loaded from JSON of the form
//! `{"abilities": [{"name": "...", "max_hops": 5, "base_damage": 60.0, "decay_factor": 1.0}]}`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{CHAIN_LIGHTNING, LIGHTNING_ARROW};
use crate::policy::ChainPolicy;

/// Errors raised while loading or validating an ability table.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read ability table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed ability table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("ability {ability:?} has max_hops = 0")]
    ZeroMaxHops { ability: String },

    #[error("ability {ability:?} has max_hops = {value}, limit is {limit}")]
    MaxHopsTooLarge {
        ability: String,
        value: u32,
        limit: u32,
    },

    #[error("ability {ability:?} has invalid base_damage {value}")]
    InvalidBaseDamage { ability: String, value: f64 },

    #[error("ability {ability:?} has decay_factor {value}, expected (0, 1]")]
    InvalidDecayFactor { ability: String, value: f64 },

    #[error("ability {0:?} is registered twice")]
    DuplicateAbility(String),
}

/// One entry of the on-disk table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityEntry {
    pub name: String,
    #[serde(flatten)]
    pub policy: ChainPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AbilityTableFile {
    abilities: Vec<AbilityEntry>,
}

/// Registered chain abilities, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbilityTable {
    abilities: BTreeMap<String, ChainPolicy>,
}

impl AbilityTable {
    /// The two lightning abilities with their stock tuning.
    pub fn builtin() -> Self {
        let mut abilities = BTreeMap::new();
        abilities.insert(CHAIN_LIGHTNING.to_string(), ChainPolicy::chain_lightning());
        abilities.insert(LIGHTNING_ARROW.to_string(), ChainPolicy::lightning_arrow());
        Self { abilities }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let file: AbilityTableFile = serde_json::from_str(json)?;
        let mut table = Self::default();
        for entry in file.abilities {
            table.register(entry.name, entry.policy)?;
        }
        Ok(table)
    }

    /// Register a validated policy under `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        policy: ChainPolicy,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        policy.validate(&name)?;
        if self.abilities.contains_key(&name) {
            return Err(ConfigError::DuplicateAbility(name));
        }
        self.abilities.insert(name, policy);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ChainPolicy> {
        self.abilities.get(name)
    }

    /// Abilities in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChainPolicy)> {
        self.abilities.iter().map(|(name, policy)| (name.as_str(), policy))
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        let file = AbilityTableFile {
            abilities: self
                .iter()
                .map(|(name, policy)| AbilityEntry {
                    name: name.to_string(),
                    policy: *policy,
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }
}
