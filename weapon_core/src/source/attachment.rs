//! Attachment - Slot items with flat/percent stat changes

use crate::modifier::AttachmentModifier;
use crate::source::ModifierSource;
use crate::types::{de_id, de_or_default, SlotCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Special effects an attachment may carry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentEffects {
    /// Target caliber; swaps the weapon's ammo-dependent stats
    #[serde(
        rename = "caliberConversion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub caliber_conversion: Option<String>,
    #[serde(rename = "firingMode", default, skip_serializing_if = "Option::is_none")]
    pub firing_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protection: Option<serde_json::Value>,
}

/// An attachment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    /// Filled in by the catalog from the file the record came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<SlotCategory>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub modifiers: BTreeMap<String, AttachmentModifier>,
    #[serde(
        rename = "specialEffects",
        default,
        deserialize_with = "de_or_default"
    )]
    pub special_effects: AttachmentEffects,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Attachment {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slot: SlotCategory) -> Self {
        Attachment {
            id: id.into(),
            name: name.into(),
            slot: Some(slot),
            modifiers: BTreeMap::new(),
            special_effects: AttachmentEffects::default(),
            image: None,
        }
    }

    /// Add a stat modifier
    pub fn with_modifier(mut self, stat: impl Into<String>, modifier: AttachmentModifier) -> Self {
        self.modifiers.insert(stat.into(), modifier);
        self
    }

    /// Make this attachment convert the weapon to `caliber`
    pub fn with_caliber_conversion(mut self, caliber: impl Into<String>) -> Self {
        self.special_effects.caliber_conversion = Some(caliber.into());
        self
    }

    /// Target caliber if this is a caliber-converting chisel
    pub fn caliber_conversion(&self) -> Option<&str> {
        self.special_effects.caliber_conversion.as_deref()
    }
}

impl ModifierSource for Attachment {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn stat_names(&self) -> Vec<&str> {
        self.modifiers.keys().map(String::as_str).collect()
    }

    fn has_effect(&self) -> bool {
        !self.modifiers.is_empty() || self.special_effects != AttachmentEffects::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::AttachmentModKind;

    #[test]
    fn test_parse_chisel() {
        let json = r#"{
            "id": "chisel_12ga",
            "name": "Chamber Chisel (12ga)",
            "modifiers": {"Weight": 0.5, "Spread": {"value": 0.1, "type": "percent"}},
            "specialEffects": {"caliberConversion": "12ga"}
        }"#;
        let chisel: Attachment = serde_json::from_str(json).unwrap();
        assert_eq!(chisel.caliber_conversion(), Some("12ga"));
        assert_eq!(chisel.slot, None);
        assert_eq!(chisel.modifiers["Spread"].kind, AttachmentModKind::Percent);
        assert_eq!(chisel.stat_names(), vec!["Spread", "Weight"]);
    }

    #[test]
    fn test_effect_only_attachment_has_effect() {
        let insurance: Attachment = serde_json::from_str(
            r#"{"id": 3, "name": "Insurance", "specialEffects": {"protection": 1}}"#,
        )
        .unwrap();
        assert!(insurance.stat_names().is_empty());
        assert!(insurance.has_effect());
    }
}
