//! Application state

use crate::display;
use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use std::fmt::Write;
use tracing::{debug, info};
use weapon_core::{
    Build, BuildStore, Catalog, Enchantment, FileStore, KeyValueStore, ModifierSource, Settings,
    SlotCategory,
};

/// Catalog section for `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Weapons,
    Oils,
    Scrolls,
    Attachments,
}

/// Ids picked on the command line
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub weapon: String,
    pub attachments: Vec<String>,
    pub oils: Vec<String>,
    pub scroll: Option<String>,
}

/// Loaded catalog plus the build store
pub struct App<S = FileStore> {
    pub catalog: Catalog,
    pub builds: BuildStore<S>,
}

impl App<FileStore> {
    /// Open the catalog and store named by `settings`
    pub fn open(settings: &Settings) -> Result<Self> {
        let catalog = match &settings.data_dir {
            Some(dir) => Catalog::load_dir(dir)
                .with_context(|| format!("loading catalog from {}", dir.display()))?,
            None => Catalog::builtin().context("loading bundled catalog")?,
        };
        info!(
            weapons = catalog.weapons.len(),
            oils = catalog.oils.len(),
            scrolls = catalog.scrolls.len(),
            "catalog loaded"
        );
        let builds = BuildStore::new(FileStore::new(&settings.store_dir));
        Ok(App { catalog, builds })
    }
}

impl<S: KeyValueStore> App<S> {
    pub fn new(catalog: Catalog, store: S) -> Self {
        App {
            catalog,
            builds: BuildStore::new(store),
        }
    }

    /// Turn a selection into a build, enforcing the selection rules
    pub fn assemble(&self, selection: &Selection) -> Result<Build> {
        let mut build = Build::default();
        build.set_weapon(&self.catalog, &selection.weapon)?;
        for id in &selection.attachments {
            let slot = build.select_attachment(&self.catalog, id)?;
            debug!(attachment = %id, %slot, "attachment selected");
        }
        build.set_scroll(&self.catalog, selection.scroll.as_deref())?;
        for id in &selection.oils {
            build.add_oil(&self.catalog, id)?;
        }
        Ok(build)
    }

    pub fn list(&self, kind: ListKind, slot: Option<SlotCategory>) -> String {
        let mut out = String::new();
        match kind {
            ListKind::Weapons => {
                for weapon in &self.catalog.weapons {
                    let _ = writeln!(
                        out,
                        "{:<8}{:<28}{:<12}{}",
                        weapon.id, weapon.name, weapon.category, weapon.ammo_type
                    );
                }
            }
            ListKind::Oils => {
                for oil in self.catalog.selectable_oils() {
                    write_enchantment(&mut out, oil);
                }
            }
            ListKind::Scrolls => {
                for scroll in &self.catalog.scrolls {
                    write_enchantment(&mut out, scroll);
                }
            }
            ListKind::Attachments => {
                let slots = match slot {
                    Some(slot) => vec![slot],
                    None => SlotCategory::all().to_vec(),
                };
                for slot in slots {
                    for attachment in self.catalog.attachments_for(slot) {
                        let _ = writeln!(
                            out,
                            "{:<10}{:<24}{:<28}{}",
                            slot.key(),
                            attachment.id,
                            attachment.name,
                            attachment.stat_names().join(", ")
                        );
                    }
                }
            }
        }
        out
    }

    /// Render a build's stats; catalog stats when nothing is selected
    pub fn render(&self, build: &Build, json: bool) -> Result<String> {
        let weapon_id = build
            .weapon
            .as_deref()
            .ok_or_else(|| anyhow!("build has no weapon"))?;
        let weapon = self
            .catalog
            .weapon(weapon_id)
            .ok_or_else(|| anyhow!("unknown weapon: {}", weapon_id))?;
        let sheet = build.resolve(&self.catalog)?;

        if json {
            let doc = display::build_json(weapon, build, sheet.as_ref());
            return Ok(serde_json::to_string_pretty(&doc)?);
        }
        Ok(match &sheet {
            Some(sheet) => display::render_sheet(weapon, sheet),
            None => display::render_base(weapon),
        })
    }

    /// Resolve a selection and keep it as the current build
    pub fn resolve(&mut self, selection: &Selection, json: bool) -> Result<String> {
        let build = self.assemble(selection)?;
        let output = self.render(&build, json)?;
        self.builds.save_current(&build)?;
        Ok(output)
    }

    pub fn list_builds(&self) -> Result<String> {
        let saved = self.builds.load_saved()?;
        if saved.is_empty() {
            return Ok("No saved builds\n".to_string());
        }
        let mut out = String::new();
        for (index, entry) in saved.iter().enumerate() {
            let weapon = entry
                .build
                .weapon
                .as_deref()
                .and_then(|id| self.catalog.weapon(id))
                .map(|w| w.name.as_str())
                .unwrap_or("?");
            let _ = writeln!(
                out,
                "{:>3}  {:<24}{:<28}{} oils{}",
                index,
                entry.name,
                weapon,
                entry.build.oils.len(),
                if entry.build.scroll.is_some() { " + scroll" } else { "" }
            );
        }
        Ok(out)
    }

    pub fn save_build(&mut self, name: &str, selection: &Selection) -> Result<String> {
        let build = self.assemble(selection)?;
        self.builds.save_named(name, &build)?;
        Ok(format!("Saved build '{}'\n", name))
    }

    pub fn show_build(&self, name: &str, json: bool) -> Result<String> {
        let saved = self
            .builds
            .find_named(name)?
            .ok_or_else(|| anyhow!("no saved build named '{}'", name))?;
        self.render(&saved.build, json)
    }

    pub fn delete_build(&mut self, name: &str) -> Result<String> {
        match self.builds.delete_named(name)? {
            0 => bail!("no saved build named '{}'", name),
            1 => Ok(format!("Deleted build '{}'\n", name)),
            n => Ok(format!("Deleted {} builds named '{}'\n", n, name)),
        }
    }

    pub fn show_current(&self, json: bool) -> Result<String> {
        match self.builds.load_current()? {
            Some(build) => self.render(&build, json),
            None => Ok("No current build\n".to_string()),
        }
    }

    pub fn clear_current(&mut self) -> Result<String> {
        self.builds.clear_current()?;
        Ok("Cleared current build\n".to_string())
    }
}

fn write_enchantment(out: &mut String, enchantment: &Enchantment) {
    let mods: Vec<String> = enchantment
        .modifiers
        .iter()
        .map(|m| {
            if m.kind.is_percent() {
                format!("{} {:+}%", m.attribute, (m.value * 100.0).round())
            } else {
                format!("{} {:+}", m.attribute, m.value)
            }
        })
        .collect();
    let _ = writeln!(out, "{:<20}{:<24}{}", enchantment.id, enchantment.name, mods.join(", "));
}
