//! Enchantment - Oils and scrolls

use crate::modifier::Modifier;
use crate::source::ModifierSource;
use crate::types::{de_id, de_or_default, de_truthy};
use serde::{Deserialize, Serialize};

/// Special effects an oil or scroll may carry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnchantmentEffects {
    /// Modifiers re-base the weapon before any other enchantment applies
    #[serde(rename = "ConvertWpn", default, deserialize_with = "de_truthy")]
    pub convert_weapon: bool,
    /// Adds flat per-bullet damage that skips percentage math
    #[serde(rename = "bypassPercentages", default, deserialize_with = "de_truthy")]
    pub bypass_percentages: bool,
    #[serde(
        rename = "perBulletDamage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub per_bullet_damage: Option<f64>,
}

/// An oil or scroll record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enchantment {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    /// Applied in list order within each pass
    #[serde(default, deserialize_with = "de_or_default")]
    pub modifiers: Vec<Modifier>,
    #[serde(
        rename = "specialEffects",
        default,
        deserialize_with = "de_or_default"
    )]
    pub special_effects: EnchantmentEffects,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Enchantment {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Enchantment {
            id: id.into(),
            name: name.into(),
            modifiers: Vec::new(),
            special_effects: EnchantmentEffects::default(),
            description: None,
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Mark as a weapon-converting scroll
    pub fn converting(mut self) -> Self {
        self.special_effects.convert_weapon = true;
        self
    }

    /// Mark as a percentage-bypassing scroll adding `damage` per bullet
    pub fn bypassing(mut self, damage: f64) -> Self {
        self.special_effects.bypass_percentages = true;
        self.special_effects.per_bullet_damage = Some(damage);
        self
    }

    pub fn converts_weapon(&self) -> bool {
        self.special_effects.convert_weapon
    }

    pub fn bypasses_percentages(&self) -> bool {
        self.special_effects.bypass_percentages
    }
}

impl ModifierSource for Enchantment {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn stat_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modifiers.iter().map(|m| m.attribute.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
