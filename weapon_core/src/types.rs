//! Core types shared by the catalog, the engine and builds

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stat names the engine treats specially
pub mod stat {
    pub const DAMAGE: &str = "Damage";
    pub const PROJECTILE_COUNT: &str = "ProjectileCount";
    pub const SPREAD: &str = "Spread";
    pub const RECOIL: &str = "Recoil";
    pub const CRIT_CHANCE: &str = "CritChance";
    pub const ADS_CRIT_CHANCE: &str = "ADSCritChance";

    /// Crit stats ignore declared modifier kinds and always add
    pub fn is_additive_only(name: &str) -> bool {
        name == CRIT_CHANCE || name == ADS_CRIT_CHANCE
    }
}

/// Attachment slot on a weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotCategory {
    Muzzle,
    Sight,
    Laser,
    Chamber,
    Chisel,
    Insurance,
}

impl SlotCategory {
    /// Get all slot categories, in display order
    pub fn all() -> &'static [SlotCategory] {
        &[
            SlotCategory::Muzzle,
            SlotCategory::Sight,
            SlotCategory::Laser,
            SlotCategory::Chamber,
            SlotCategory::Chisel,
            SlotCategory::Insurance,
        ]
    }

    /// Identifier used in catalog data and build files
    pub fn key(&self) -> &'static str {
        match self {
            SlotCategory::Muzzle => "muzzle",
            SlotCategory::Sight => "sight",
            SlotCategory::Laser => "laser",
            SlotCategory::Chamber => "chamber",
            SlotCategory::Chisel => "chisel",
            SlotCategory::Insurance => "insurance",
        }
    }

    /// Catalog file holding this slot's attachments
    pub fn file_name(&self) -> &'static str {
        match self {
            SlotCategory::Muzzle => "attachments-muzzle.json",
            SlotCategory::Sight => "attachments-sights.json",
            SlotCategory::Laser => "attachments-lasers.json",
            SlotCategory::Chamber => "attachments-chamber.json",
            SlotCategory::Chisel => "attachments-chisels.json",
            SlotCategory::Insurance => "attachments-insurance.json",
        }
    }

    /// Normalize a free-form slot term (as written on wiki pages) to a slot
    pub fn from_term(term: &str) -> Option<SlotCategory> {
        match term.trim().to_lowercase().as_str() {
            "muzzle" | "muzzle attachment" | "muzzle attachments" => Some(SlotCategory::Muzzle),
            "sight" | "sights" => Some(SlotCategory::Sight),
            "laser" | "laser sight" | "laser sights" => Some(SlotCategory::Laser),
            "chamber" | "chamber attachment" | "chamber attachments" | "gun crank" => {
                Some(SlotCategory::Chamber)
            }
            "chisel" | "chamber chisel" | "chamber chisels" => Some(SlotCategory::Chisel),
            "insurance" => Some(SlotCategory::Insurance),
            _ => None,
        }
    }
}

impl fmt::Display for SlotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for SlotCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotCategory::from_term(s).ok_or_else(|| format!("unknown attachment slot: {}", s))
    }
}

/// Deserialize a record id that may be written as a string or a number
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}

/// Deserialize a JSON value as a truthy flag (null, false, 0 and "" are off)
pub(crate) fn de_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Deserialize an optional object, treating `null` the same as a missing field
pub(crate) fn de_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
