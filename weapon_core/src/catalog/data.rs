//! Catalog - weapons, attachments, oils, scrolls and the caliber table

use super::{parse_json, CatalogError};
use crate::source::{Attachment, CaliberTable, Enchantment, ModifierSource, Weapon};
use crate::types::SlotCategory;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const WEAPONS_FILE: &str = "weapons.json";
const OILS_FILE: &str = "enchantments.json";
const SCROLLS_FILE: &str = "scrolls.json";
const CALIBERS_FILE: &str = "caliber-modifiers.json";
const COMPATIBILITY_FILE: &str = "weapon-attachment-compatibility.json";

/// Bundled sample catalog, keyed by file name
pub const BUILTIN_FILES: &[(&str, &str)] = &[
    (WEAPONS_FILE, include_str!("../../data/weapons.json")),
    (OILS_FILE, include_str!("../../data/enchantments.json")),
    (SCROLLS_FILE, include_str!("../../data/scrolls.json")),
    ("attachments-muzzle.json", include_str!("../../data/attachments-muzzle.json")),
    ("attachments-sights.json", include_str!("../../data/attachments-sights.json")),
    ("attachments-lasers.json", include_str!("../../data/attachments-lasers.json")),
    ("attachments-chamber.json", include_str!("../../data/attachments-chamber.json")),
    ("attachments-chisels.json", include_str!("../../data/attachments-chisels.json")),
    ("attachments-insurance.json", include_str!("../../data/attachments-insurance.json")),
    (CALIBERS_FILE, include_str!("../../data/caliber-modifiers.json")),
    (COMPATIBILITY_FILE, include_str!("../../data/weapon-attachment-compatibility.json")),
];

/// Everything the engine's collaborators pick from
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub weapons: Vec<Weapon>,
    pub oils: Vec<Enchantment>,
    pub scrolls: Vec<Enchantment>,
    pub attachments: BTreeMap<SlotCategory, Vec<Attachment>>,
    pub calibers: CaliberTable,
}

impl Catalog {
    /// Load from a directory of catalog JSON files
    ///
    /// `weapons.json` is required; every other file may be absent.
    pub fn load_dir(dir: &Path) -> Result<Catalog, CatalogError> {
        debug!(dir = %dir.display(), "loading catalog");
        Catalog::load_with(|file| {
            let path = dir.join(file);
            if !path.exists() {
                return Ok(None);
            }
            fs::read_to_string(&path)
                .map(Some)
                .map_err(|source| CatalogError::IoError {
                    path: path.display().to_string(),
                    source,
                })
        })
    }

    /// Load the bundled sample catalog
    pub fn builtin() -> Result<Catalog, CatalogError> {
        Catalog::load_with(|file| {
            Ok(BUILTIN_FILES
                .iter()
                .find(|(name, _)| *name == file)
                .map(|(_, content)| content.to_string()))
        })
    }

    /// Load using `read` to fetch each file's contents by name
    pub fn load_with<F>(mut read: F) -> Result<Catalog, CatalogError>
    where
        F: FnMut(&str) -> Result<Option<String>, CatalogError>,
    {
        let weapons_json = read(WEAPONS_FILE)?.ok_or_else(|| {
            CatalogError::ValidationError(format!("{} is required", WEAPONS_FILE))
        })?;
        let mut weapons: Vec<Weapon> = parse_list(WEAPONS_FILE, &weapons_json, "weapons")?;

        let oils = read_list(&mut read, OILS_FILE, "enchantments")?;
        let scrolls = read_list(&mut read, SCROLLS_FILE, "scrolls")?;

        let mut attachments = BTreeMap::new();
        for &slot in SlotCategory::all() {
            let mut items: Vec<Attachment> = read_list(&mut read, slot.file_name(), "attachments")?;
            for item in &mut items {
                item.slot = Some(slot);
            }
            attachments.insert(slot, items);
        }

        let calibers = match read(CALIBERS_FILE)? {
            Some(content) => parse_json(CALIBERS_FILE, &content)?,
            None => {
                warn!(file = CALIBERS_FILE, "catalog file missing, chisels will not convert");
                CaliberTable::default()
            }
        };

        if let Some(content) = read(COMPATIBILITY_FILE)? {
            let compatibility: BTreeMap<String, Vec<String>> = parse_json(COMPATIBILITY_FILE, &content)?;
            apply_compatibility(&mut weapons, &compatibility);
        }

        let catalog = Catalog {
            weapons,
            oils,
            scrolls,
            attachments,
            calibers,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reject duplicate ids within each record kind
    fn validate(&self) -> Result<(), CatalogError> {
        check_unique("weapon", self.weapons.iter().map(|w| w.id.as_str()))?;
        check_unique("oil", self.oils.iter().map(|e| e.id.as_str()))?;
        check_unique("scroll", self.scrolls.iter().map(|e| e.id.as_str()))?;
        check_unique(
            "attachment",
            self.attachments.values().flatten().map(|a| a.id.as_str()),
        )?;
        Ok(())
    }

    pub fn weapon(&self, id: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.id == id)
    }

    pub fn oil(&self, id: &str) -> Option<&Enchantment> {
        self.oils.iter().find(|e| e.id == id)
    }

    pub fn scroll(&self, id: &str) -> Option<&Enchantment> {
        self.scrolls.iter().find(|e| e.id == id)
    }

    /// Find an attachment in any slot
    pub fn attachment(&self, id: &str) -> Option<&Attachment> {
        self.attachments.values().flatten().find(|a| a.id == id)
    }

    pub fn attachments_for(&self, slot: SlotCategory) -> &[Attachment] {
        self.attachments.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Oils that can be selected (those carrying at least one modifier)
    pub fn selectable_oils(&self) -> impl Iterator<Item = &Enchantment> {
        self.oils.iter().filter(|e| e.has_effect())
    }

    /// Slots `weapon` accepts
    pub fn compatible_slots(&self, weapon: &Weapon) -> Vec<SlotCategory> {
        SlotCategory::all()
            .iter()
            .copied()
            .filter(|slot| weapon.accepts(*slot))
            .collect()
    }
}

fn read_list<T, F>(read: &mut F, file: &str, key: &str) -> Result<Vec<T>, CatalogError>
where
    T: DeserializeOwned,
    F: FnMut(&str) -> Result<Option<String>, CatalogError>,
{
    match read(file)? {
        Some(content) => parse_list(file, &content, key),
        None => {
            warn!(file, "catalog file missing, using empty list");
            Ok(Vec::new())
        }
    }
}

/// Parse a bare array, or an object wrapping the array under `key`
fn parse_list<T: DeserializeOwned>(file: &str, content: &str, key: &str) -> Result<Vec<T>, CatalogError> {
    let value: Value = parse_json(file, content)?;
    let list = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map.remove(key).unwrap_or(Value::Array(Vec::new())),
        _ => {
            return Err(CatalogError::ValidationError(format!(
                "{}: expected an array or an object with \"{}\"",
                file, key
            )))
        }
    };
    serde_json::from_value(list).map_err(|source| CatalogError::JsonError {
        file: file.to_string(),
        source,
    })
}

/// Fill in weapon slot lists from a weapon-name → slot-terms map
fn apply_compatibility(weapons: &mut [Weapon], compatibility: &BTreeMap<String, Vec<String>>) {
    for weapon in weapons.iter_mut().filter(|w| w.attachment_slots.is_empty()) {
        let Some(terms) = compatibility.get(&weapon.name) else {
            continue;
        };
        let mut slots: Vec<SlotCategory> = terms
            .iter()
            .filter_map(|term| {
                let slot = SlotCategory::from_term(term);
                if slot.is_none() {
                    warn!(weapon = %weapon.name, term = %term, "unknown attachment slot term");
                }
                slot
            })
            .collect();
        slots.sort();
        slots.dedup();
        weapon.attachment_slots = slots;
    }
}

fn check_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), CatalogError> {
    let mut seen = std::collections::BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::ValidationError(format!(
                "duplicate {} id: {}",
                kind, id
            )));
        }
    }
    Ok(())
}
