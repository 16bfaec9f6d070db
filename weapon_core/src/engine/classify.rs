//! Modifier classification - splits sources into ordered per-stat buckets

use crate::modifier::{AttachmentModKind, AttachmentModifier, ModKind, Modifier};
use crate::source::{Attachment, Enchantment};
use std::collections::BTreeMap;
use tracing::warn;

/// Modifiers grouped by target stat, in selection order
pub type ModifierGroups<'a> = BTreeMap<&'a str, Vec<&'a Modifier>>;

/// Attachment modifiers grouped by target stat, in selection order
pub type AttachmentGroups<'a> = BTreeMap<&'a str, Vec<&'a AttachmentModifier>>;

/// Every modifier of a selection, partitioned by the stage that applies it
#[derive(Debug, Default)]
pub struct ModifierBuckets<'a> {
    /// Caliber-converting attachment, consumed before the pipeline
    pub chisel: Option<&'a Attachment>,
    /// Scrolls with `ConvertWpn`
    pub convert: ModifierGroups<'a>,
    /// Scrolls with `bypassPercentages`
    pub bypass: ModifierGroups<'a>,
    /// Oils and ordinary scrolls
    pub other: ModifierGroups<'a>,
    /// All attachments except caliber converters
    pub attachments: AttachmentGroups<'a>,
    /// Summed `perBulletDamage` of bypass scrolls, if any carries one
    pub per_bullet_damage: Option<f64>,
}

impl<'a> ModifierBuckets<'a> {
    pub fn classify(attachments: &[&'a Attachment], enchantments: &[&'a Enchantment]) -> Self {
        let mut buckets = ModifierBuckets::default();

        for &attachment in attachments {
            if attachment.caliber_conversion().is_some() {
                // Only the first converter rebases; others are dropped like it
                if buckets.chisel.is_none() {
                    buckets.chisel = Some(attachment);
                }
                continue;
            }
            for (stat, modifier) in &attachment.modifiers {
                if modifier.kind == AttachmentModKind::Unknown {
                    warn!(attachment = %attachment.id, stat = %stat, "unknown attachment modifier type");
                }
                buckets
                    .attachments
                    .entry(stat.as_str())
                    .or_default()
                    .push(modifier);
            }
        }

        for &enchantment in enchantments {
            // Per-bullet damage holds even when the scroll also converts
            if enchantment.bypasses_percentages() {
                if let Some(damage) = enchantment.special_effects.per_bullet_damage {
                    *buckets.per_bullet_damage.get_or_insert(0.0) += damage;
                }
            }
            let target = if enchantment.converts_weapon() {
                &mut buckets.convert
            } else if enchantment.bypasses_percentages() {
                &mut buckets.bypass
            } else {
                &mut buckets.other
            };
            group_into(target, enchantment);
        }

        buckets
    }

    /// Every stat name some bucket touches
    pub fn stat_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.convert
            .keys()
            .chain(self.attachments.keys())
            .chain(self.other.keys())
            .chain(self.bypass.keys())
            .copied()
    }

    /// Enchantment-stage modifiers for a stat: oils and ordinary scrolls,
    /// followed by bypass scrolls' own modifiers
    pub fn enchantment_mods(&self, stat: &str) -> Vec<&'a Modifier> {
        let other = self.other.get(stat).into_iter().flatten();
        let bypass = self.bypass.get(stat).into_iter().flatten();
        other.chain(bypass).copied().collect()
    }
}

fn group_into<'a>(groups: &mut ModifierGroups<'a>, enchantment: &'a Enchantment) {
    for modifier in &enchantment.modifiers {
        if modifier.kind == ModKind::Unknown {
            warn!(
                enchantment = %enchantment.id,
                stat = %modifier.attribute,
                "unknown modifier kind, treating as no-op"
            );
        }
        groups
            .entry(modifier.attribute.as_str())
            .or_default()
            .push(modifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SlotCategory;

    #[test]
    fn test_enchantments_split_into_disjoint_buckets() {
        let light = Enchantment::new("light", "Scroll of Light")
            .converting()
            .with_modifier(Modifier::percent_mult("Damage", 0.5));
        let pellets = Enchantment::new("pellets", "Scroll of Pellets")
            .bypassing(5.0)
            .with_modifier(Modifier::flat("Spread", 1.0));
        let oil = Enchantment::new("oil", "Oil")
            .with_modifier(Modifier::flat("Damage", 2.0))
            .with_modifier(Modifier::percent_add("RPM", 0.1));

        let buckets = ModifierBuckets::classify(&[], &[&light, &pellets, &oil]);

        assert_eq!(buckets.convert.len(), 1);
        assert_eq!(buckets.bypass.keys().copied().collect::<Vec<_>>(), vec!["Spread"]);
        assert_eq!(buckets.other["Damage"].len(), 1);
        assert_eq!(buckets.other["RPM"].len(), 1);
        assert_eq!(buckets.per_bullet_damage, Some(5.0));
    }

    #[test]
    fn test_converting_bypass_scroll_counts_per_bullet_damage() {
        let both = Enchantment::new("both", "Scroll of Both")
            .converting()
            .bypassing(5.0)
            .with_modifier(Modifier::percent_mult("Damage", 0.5));

        let buckets = ModifierBuckets::classify(&[], &[&both]);

        assert_eq!(buckets.convert["Damage"].len(), 1);
        assert!(buckets.bypass.is_empty());
        assert_eq!(buckets.per_bullet_damage, Some(5.0));
    }

    #[test]
    fn test_chisel_is_held_out_of_attachment_stage() {
        let chisel = Attachment::new("c", "Chisel", SlotCategory::Chisel)
            .with_caliber_conversion("12ga")
            .with_modifier("Weight", AttachmentModifier::flat(1.0));
        let muzzle = Attachment::new("m", "Muzzle", SlotCategory::Muzzle)
            .with_modifier("Spread", AttachmentModifier::percent(-0.2));

        let buckets = ModifierBuckets::classify(&[&chisel, &muzzle], &[]);

        assert_eq!(buckets.chisel.map(|c| c.id.as_str()), Some("c"));
        assert!(!buckets.attachments.contains_key("Weight"));
        assert_eq!(buckets.attachments["Spread"].len(), 1);
    }

    #[test]
    fn test_same_stat_keeps_selection_order() {
        let first = Enchantment::new("a", "A").with_modifier(Modifier::flat("Damage", 1.0));
        let second = Enchantment::new("b", "B").with_modifier(Modifier::flat("Damage", 2.0));

        let buckets = ModifierBuckets::classify(&[], &[&first, &second]);
        let values: Vec<f64> = buckets.other["Damage"].iter().map(|m| m.value).collect();
        assert_eq!(values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_enchantment_mods_appends_bypass_scrolls() {
        let oil = Enchantment::new("oil", "Oil").with_modifier(Modifier::flat("Damage", 2.0));
        let pellets = Enchantment::new("p", "P")
            .bypassing(1.0)
            .with_modifier(Modifier::flat("Damage", 3.0));

        let buckets = ModifierBuckets::classify(&[], &[&pellets, &oil]);
        let values: Vec<f64> = buckets.enchantment_mods("Damage").iter().map(|m| m.value).collect();
        assert_eq!(values, vec![2.0, 3.0]);
        assert!(buckets.enchantment_mods("Recoil").is_empty());
    }
}
