//! Build - a chosen weapon plus its attachment, oil and scroll selection

mod store;

pub use store::{BuildStore, FileStore, KeyValueStore, MemoryStore, SavedBuild, StoreError};

use crate::catalog::Catalog;
use crate::engine::{self, StatSheet};
use crate::source::{Attachment, Enchantment, ModifierSource};
use crate::types::SlotCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Oil slots when no scroll is selected
pub const MAX_OILS: usize = 5;

/// Selection rule violations and unknown catalog ids
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Unknown weapon: {0}")]
    UnknownWeapon(String),
    #[error("Unknown attachment: {0}")]
    UnknownAttachment(String),
    #[error("Unknown oil: {0}")]
    UnknownOil(String),
    #[error("Unknown scroll: {0}")]
    UnknownScroll(String),
    #[error("Attachment {attachment} belongs in the {actual} slot, not {slot}")]
    SlotMismatch {
        attachment: String,
        slot: SlotCategory,
        actual: SlotCategory,
    },
    #[error("Weapon {weapon} has no {slot} slot")]
    IncompatibleSlot { weapon: String, slot: SlotCategory },
    #[error("At most {max} oils can be selected")]
    TooManyOils { max: usize },
    #[error("Oil {0} is already selected")]
    DuplicateOil(String),
    #[error("Oil {0} has no modifiers")]
    InertOil(String),
}

/// A weapon and the modifier ids selected for it
///
/// Ids refer to catalog records. Oils keep their selection order because the
/// engine applies them in that order within each pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Build {
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub attachments: BTreeMap<SlotCategory, String>,
    #[serde(default)]
    pub oils: Vec<String>,
    #[serde(default)]
    pub scroll: Option<String>,
}

impl Build {
    pub fn new(weapon: impl Into<String>) -> Self {
        Build {
            weapon: Some(weapon.into()),
            ..Build::default()
        }
    }

    /// Oil slots available given the scroll selection
    pub fn max_oils(&self) -> usize {
        if self.scroll.is_some() {
            MAX_OILS - 1
        } else {
            MAX_OILS
        }
    }

    /// Whether anything besides the weapon is selected
    pub fn has_modifiers(&self) -> bool {
        !self.attachments.is_empty() || !self.oils.is_empty() || self.scroll.is_some()
    }

    pub fn set_weapon(&mut self, catalog: &Catalog, id: &str) -> Result<(), BuildError> {
        catalog
            .weapon(id)
            .ok_or_else(|| BuildError::UnknownWeapon(id.to_string()))?;
        self.weapon = Some(id.to_string());
        Ok(())
    }

    /// Put an attachment in its slot, replacing whatever was there
    pub fn select_attachment(&mut self, catalog: &Catalog, id: &str) -> Result<SlotCategory, BuildError> {
        let attachment = catalog
            .attachment(id)
            .ok_or_else(|| BuildError::UnknownAttachment(id.to_string()))?;
        let slot = attachment_slot(attachment)?;
        self.check_slot_compatible(catalog, slot)?;
        self.attachments.insert(slot, id.to_string());
        Ok(slot)
    }

    pub fn remove_attachment(&mut self, slot: SlotCategory) -> Option<String> {
        self.attachments.remove(&slot)
    }

    pub fn clear_attachments(&mut self) {
        self.attachments.clear();
    }

    /// Append an oil to the selection
    pub fn add_oil(&mut self, catalog: &Catalog, id: &str) -> Result<(), BuildError> {
        let oil = catalog
            .oil(id)
            .ok_or_else(|| BuildError::UnknownOil(id.to_string()))?;
        if !oil.has_effect() {
            return Err(BuildError::InertOil(id.to_string()));
        }
        if self.oils.iter().any(|o| o == id) {
            return Err(BuildError::DuplicateOil(id.to_string()));
        }
        if self.oils.len() >= self.max_oils() {
            return Err(BuildError::TooManyOils {
                max: self.max_oils(),
            });
        }
        self.oils.push(id.to_string());
        Ok(())
    }

    pub fn remove_oil(&mut self, index: usize) -> Option<String> {
        (index < self.oils.len()).then(|| self.oils.remove(index))
    }

    pub fn clear_oils(&mut self) {
        self.oils.clear();
    }

    /// Select or clear the scroll
    ///
    /// A scroll takes one of the five enchantment slots, so it can't be added
    /// while five oils are selected.
    pub fn set_scroll(&mut self, catalog: &Catalog, id: Option<&str>) -> Result<(), BuildError> {
        let Some(id) = id else {
            self.scroll = None;
            return Ok(());
        };
        catalog
            .scroll(id)
            .ok_or_else(|| BuildError::UnknownScroll(id.to_string()))?;
        if self.oils.len() >= MAX_OILS {
            return Err(BuildError::TooManyOils { max: MAX_OILS - 1 });
        }
        self.scroll = Some(id.to_string());
        Ok(())
    }

    pub fn clear_enchantments(&mut self) {
        self.oils.clear();
        self.scroll = None;
    }

    /// Drop the weapon and every selection
    pub fn reset(&mut self) {
        *self = Build::default();
    }

    /// Check a build assembled elsewhere (loaded from a store, parsed from
    /// arguments) against the catalog and the selection rules
    pub fn validate(&self, catalog: &Catalog) -> Result<(), BuildError> {
        if let Some(id) = &self.weapon {
            catalog
                .weapon(id)
                .ok_or_else(|| BuildError::UnknownWeapon(id.clone()))?;
        }

        for (&slot, id) in &self.attachments {
            let attachment = catalog
                .attachment(id)
                .ok_or_else(|| BuildError::UnknownAttachment(id.clone()))?;
            let actual = attachment_slot(attachment)?;
            if actual != slot {
                return Err(BuildError::SlotMismatch {
                    attachment: id.clone(),
                    slot,
                    actual,
                });
            }
            self.check_slot_compatible(catalog, slot)?;
        }

        if self.oils.len() > self.max_oils() {
            return Err(BuildError::TooManyOils {
                max: self.max_oils(),
            });
        }
        for (i, id) in self.oils.iter().enumerate() {
            let oil = catalog
                .oil(id)
                .ok_or_else(|| BuildError::UnknownOil(id.clone()))?;
            if !oil.has_effect() {
                return Err(BuildError::InertOil(id.clone()));
            }
            if self.oils[..i].contains(id) {
                return Err(BuildError::DuplicateOil(id.clone()));
            }
        }

        if let Some(id) = &self.scroll {
            catalog
                .scroll(id)
                .ok_or_else(|| BuildError::UnknownScroll(id.clone()))?;
        }

        Ok(())
    }

    /// Validate, then run the resolution engine on this selection
    ///
    /// `Ok(None)` means there is nothing to resolve (no weapon, or no
    /// modifiers selected) and the catalog stats should be shown as-is.
    pub fn resolve(&self, catalog: &Catalog) -> Result<Option<StatSheet>, BuildError> {
        self.validate(catalog)?;

        let weapon = self.weapon.as_deref().and_then(|id| catalog.weapon(id));
        let attachments: Vec<&Attachment> = self
            .attachments
            .values()
            .filter_map(|id| catalog.attachment(id))
            .collect();
        let enchantments: Vec<&Enchantment> = self
            .oils
            .iter()
            .filter_map(|id| catalog.oil(id))
            .chain(self.scroll.as_deref().and_then(|id| catalog.scroll(id)))
            .collect();

        Ok(engine::resolve(
            weapon,
            &attachments,
            &enchantments,
            &catalog.calibers,
        ))
    }

    fn check_slot_compatible(&self, catalog: &Catalog, slot: SlotCategory) -> Result<(), BuildError> {
        let Some(weapon) = self.weapon.as_deref().and_then(|id| catalog.weapon(id)) else {
            return Ok(());
        };
        if weapon.accepts(slot) {
            Ok(())
        } else {
            Err(BuildError::IncompatibleSlot {
                weapon: weapon.id.clone(),
                slot,
            })
        }
    }
}

fn attachment_slot(attachment: &Attachment) -> Result<SlotCategory, BuildError> {
    attachment
        .slot
        .ok_or_else(|| BuildError::UnknownAttachment(attachment.id.clone()))
}
