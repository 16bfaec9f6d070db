//! Modifier resolution engine
//!
//! Turns a weapon plus a selection of attachments, oils and scrolls into
//! final stat values. Stages, per stat:
//!
//! 0. Caliber conversion rebases the weapon (chisel only)
//! 1. Convert scrolls: Flat → PercentAdd → PercentMult
//! 2. Attachments: flat, then compounding percent
//! 3. Oils and other scrolls: Flat → PercentAdd → PercentMult
//! 4. Bypass scrolls add per-bullet damage to `Damage`
//!
//! `ADSCritChance` is then reconciled against the resolved `CritChance`.
//! Inputs are never mutated and nothing is cached between calls.

mod caliber;
mod classify;
mod crit;
mod result;

pub use caliber::effective_base;
pub use classify::{AttachmentGroups, ModifierBuckets, ModifierGroups};
pub use crit::reconcile_ads;
pub use result::{round2, StatResult, StatSheet};

use crate::modifier::{apply_attachment_mods, apply_ordered, StatRule};
use crate::source::{Attachment, CaliberTable, Enchantment, Weapon};
use crate::types::stat;
use std::collections::BTreeSet;
use tracing::debug;

/// Resolve a weapon's final stats under a modifier selection
///
/// Returns `None` when there is no weapon or nothing is selected, so callers
/// can fall back to showing the catalog stats unmodified.
pub fn resolve(
    weapon: Option<&Weapon>,
    attachments: &[&Attachment],
    enchantments: &[&Enchantment],
    calibers: &CaliberTable,
) -> Option<StatSheet> {
    let weapon = weapon?;
    if attachments.is_empty() && enchantments.is_empty() {
        return None;
    }

    let buckets = ModifierBuckets::classify(attachments, enchantments);
    let effective = effective_base(weapon, buckets.chisel, calibers);

    debug!(
        weapon = %weapon.id,
        convert = buckets.convert.len(),
        attachments = buckets.attachments.len(),
        other = buckets.other.len(),
        bypass = buckets.bypass.len(),
        "resolving weapon stats"
    );

    let mut stat_names: BTreeSet<&str> = effective.keys().map(String::as_str).collect();
    stat_names.extend(buckets.stat_names());
    if buckets.per_bullet_damage.is_some() {
        stat_names.insert(stat::DAMAGE);
    }

    let mut results = Vec::with_capacity(stat_names.len() + 1);
    let mut ads_bonus = None;

    for name in stat_names {
        let entry = effective.get(name).copied().unwrap_or(0.0);
        let mut value = resolve_stat(name, entry, &buckets);

        if name == stat::DAMAGE {
            if let Some(per_bullet) = buckets.per_bullet_damage {
                let projectiles = effective
                    .get(stat::PROJECTILE_COUNT)
                    .copied()
                    .unwrap_or(1.0);
                value += per_bullet * projectiles;
            }
        }

        if name == stat::ADS_CRIT_CHANCE {
            ads_bonus = Some(value);
        }

        results.push(StatResult::new(name, weapon.base(name), value));
    }

    reconcile_ads(&mut results, ads_bonus, weapon);

    Some(StatSheet::new(results))
}

/// Run the three modifier stages for one stat
fn resolve_stat(name: &str, entry: f64, buckets: &ModifierBuckets<'_>) -> f64 {
    let rule = StatRule::for_stat(name);
    let mut value = entry;

    if let Some(mods) = buckets.convert.get(name) {
        value = apply_ordered(value, mods, rule);
    }

    if let Some(mods) = buckets.attachments.get(name) {
        value = apply_attachment_mods(value, mods, rule);
    }

    let enchantment_mods = buckets.enchantment_mods(name);
    if !enchantment_mods.is_empty() {
        value = apply_ordered(value, &enchantment_mods, rule);
    }

    value
}
