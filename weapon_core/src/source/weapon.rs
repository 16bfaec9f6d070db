//! Weapon - Catalog weapon record

use crate::types::{de_id, de_or_default, stat, SlotCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A weapon as it appears in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    /// Weapon category (pistol, shotgun, ...)
    #[serde(rename = "type", default)]
    pub category: String,
    /// Native caliber, looked up in the caliber table's base damage map
    #[serde(rename = "ammoType", alias = "ammo_type", default)]
    pub ammo_type: String,
    #[serde(
        rename = "baseStats",
        alias = "base_stats",
        default,
        deserialize_with = "de_or_default"
    )]
    pub base_stats: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Slots this weapon accepts; empty when the catalog doesn't say
    #[serde(
        rename = "attachmentSlots",
        alias = "attachment_slots",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attachment_slots: Vec<SlotCategory>,
}

impl Weapon {
    /// Create a weapon with no base stats
    pub fn new(id: impl Into<String>, name: impl Into<String>, ammo_type: impl Into<String>) -> Self {
        Weapon {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            ammo_type: ammo_type.into(),
            base_stats: BTreeMap::new(),
            image: None,
            attachment_slots: Vec::new(),
        }
    }

    /// Set a base stat
    pub fn with_stat(mut self, name: impl Into<String>, value: f64) -> Self {
        self.base_stats.insert(name.into(), value);
        self
    }

    /// Catalog base value of a stat, 0 when absent
    pub fn base(&self, name: &str) -> f64 {
        self.base_stats.get(name).copied().unwrap_or(0.0)
    }

    /// Projectiles per shot, 1 when the catalog doesn't list it
    pub fn projectile_count(&self) -> f64 {
        self.base_stats
            .get(stat::PROJECTILE_COUNT)
            .copied()
            .unwrap_or(1.0)
    }

    /// Whether the weapon accepts attachments in `slot`
    pub fn accepts(&self, slot: SlotCategory) -> bool {
        self.attachment_slots.is_empty() || self.attachment_slots.contains(&slot)
    }
}
