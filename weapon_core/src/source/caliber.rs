//! CaliberTable - Per-caliber stats and baseline bullet damage

use crate::types::de_or_default;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ammo-dependent stats that a caliber swap replaces verbatim
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaliberStats {
    #[serde(rename = "ProjectileCount")]
    pub projectile_count: f64,
    #[serde(rename = "Spread")]
    pub spread: f64,
    #[serde(rename = "Recoil")]
    pub recoil: f64,
}

/// Caliber data used by chamber chisels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaliberTable {
    #[serde(default, deserialize_with = "de_or_default")]
    pub calibers: BTreeMap<String, CaliberStats>,
    /// Baseline damage per bullet, keyed by ammo type
    #[serde(
        rename = "baseAmmoDamage",
        alias = "base_ammo_damage",
        default,
        deserialize_with = "de_or_default"
    )]
    pub base_ammo_damage: BTreeMap<String, f64>,
}

impl CaliberTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a caliber with its stats and baseline bullet damage
    pub fn with_caliber(mut self, name: impl Into<String>, stats: CaliberStats, base_damage: f64) -> Self {
        let name = name.into();
        self.base_ammo_damage.insert(name.clone(), base_damage);
        self.calibers.insert(name, stats);
        self
    }

    /// Register only a baseline damage (native ammo types that no chisel targets)
    pub fn with_ammo_damage(mut self, ammo_type: impl Into<String>, base_damage: f64) -> Self {
        self.base_ammo_damage.insert(ammo_type.into(), base_damage);
        self
    }

    pub fn caliber(&self, name: &str) -> Option<&CaliberStats> {
        self.calibers.get(name)
    }

    pub fn base_damage(&self, ammo_type: &str) -> Option<f64> {
        self.base_ammo_damage.get(ammo_type).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.calibers.is_empty() && self.base_ammo_damage.is_empty()
    }
}
