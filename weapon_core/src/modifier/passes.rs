//! Ordered modifier passes: Flat → PercentAdd → PercentMult

use super::{AttachmentModKind, AttachmentModifier, ModKind, Modifier};

/// Per-stat arithmetic rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatRule {
    /// Declared modifier kinds apply as written
    Standard,
    /// Every recognized modifier adds its value (crit chance stats)
    AdditiveOnly,
}

impl StatRule {
    pub fn for_stat(name: &str) -> StatRule {
        if crate::types::stat::is_additive_only(name) {
            StatRule::AdditiveOnly
        } else {
            StatRule::Standard
        }
    }
}

const PASS_ORDER: [ModKind; 3] = [ModKind::Flat, ModKind::PercentAdd, ModKind::PercentMult];

/// Run one stage of enchantment modifiers over `entry`
///
/// Modifiers are applied in three passes, all Flat first, then PercentAdd,
/// then PercentMult, keeping their relative order inside each pass. The
/// reference base for PercentAdd is the value entering its pass, so
/// percentages build on the flat result rather than on `entry`.
pub fn apply_ordered(entry: f64, mods: &[&Modifier], rule: StatRule) -> f64 {
    let mut value = entry;
    for pass in PASS_ORDER {
        let reference = value;
        for modifier in mods.iter().filter(|m| m.kind == pass) {
            value = modifier.apply(value, reference, rule);
        }
    }
    value
}

/// Run the attachment stage over `entry`
///
/// Flat contributions are summed first; percent contributions then compound
/// one after another on the running value.
pub fn apply_attachment_mods(entry: f64, mods: &[&AttachmentModifier], rule: StatRule) -> f64 {
    let flats = mods.iter().filter(|m| m.kind == AttachmentModKind::Flat);
    let percents = mods.iter().filter(|m| m.kind == AttachmentModKind::Percent);

    let mut value = entry;
    for modifier in flats.chain(percents) {
        value = modifier.apply(value, rule);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(mods: &[Modifier]) -> Vec<&Modifier> {
        mods.iter().collect()
    }

    #[test]
    fn test_flat_runs_before_percent_regardless_of_order() {
        // 100 + 20 flat = 120, then +50% of 120 = 180
        let mods = vec![
            Modifier::percent_add("Damage", 0.5),
            Modifier::flat("Damage", 20.0),
        ];
        let value = apply_ordered(100.0, &refs(&mods), StatRule::Standard);
        assert!((value - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_add_shares_reference_within_pass() {
        // Both +10% read the same 100 reference: 100 + 10 + 10
        let mods = vec![
            Modifier::percent_add("Damage", 0.1),
            Modifier::percent_add("Damage", 0.1),
        ];
        let value = apply_ordered(100.0, &refs(&mods), StatRule::Standard);
        assert!((value - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_mult_compounds() {
        let mods = vec![
            Modifier::percent_mult("Damage", 0.1),
            Modifier::percent_mult("Damage", 0.1),
        ];
        let value = apply_ordered(100.0, &refs(&mods), StatRule::Standard);
        assert!((value - 121.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_three_pass_stage() {
        // (100 + 10) = 110; + 110 * 0.2 = 132; * 1.5 = 198
        let mods = vec![
            Modifier::percent_mult("Damage", 0.5),
            Modifier::percent_add("Damage", 0.2),
            Modifier::flat("Damage", 10.0),
        ];
        let value = apply_ordered(100.0, &refs(&mods), StatRule::Standard);
        assert!((value - 198.0).abs() < 1e-9);
    }

    #[test]
    fn test_additive_only_stage() {
        let mods = vec![
            Modifier::percent_mult("CritChance", 0.5),
            Modifier::percent_add("CritChance", 0.05),
        ];
        let value = apply_ordered(0.1, &refs(&mods), StatRule::AdditiveOnly);
        assert!((value - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_attachment_percent_compounds_after_flats() {
        // 100 + 10 = 110; * 1.1 = 121; * 0.9 = 108.9
        let mods = [
            AttachmentModifier::percent(0.1),
            AttachmentModifier::flat(10.0),
            AttachmentModifier::percent(-0.1),
        ];
        let refs: Vec<&AttachmentModifier> = mods.iter().collect();
        let value = apply_attachment_mods(100.0, &refs, StatRule::Standard);
        assert!((value - 108.9).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stage_passes_through() {
        assert!((apply_ordered(42.0, &[], StatRule::Standard) - 42.0).abs() < f64::EPSILON);
        assert!((apply_attachment_mods(42.0, &[], StatRule::Standard) - 42.0).abs() < f64::EPSILON);
    }
}
