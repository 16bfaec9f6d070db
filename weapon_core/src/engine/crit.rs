//! ADS crit chance reconciliation

use super::result::{round2, StatResult};
use crate::source::Weapon;
use crate::types::stat;

/// Rewrite `ADSCritChance` as a bonus layered on top of `CritChance`
///
/// `ads_bonus` is the unrounded resolved `ADSCritChance`, or `None` when no
/// entry was produced. In that case an unchanged entry is synthesized so the
/// stat is always reported.
pub fn reconcile_ads(results: &mut Vec<StatResult>, ads_bonus: Option<f64>, weapon: &Weapon) {
    let base_crit = results
        .iter()
        .find(|r| r.stat == stat::CRIT_CHANCE)
        .map(|r| r.modified_value)
        .unwrap_or_else(|| weapon.base(stat::CRIT_CHANCE));

    let reconciled = match ads_bonus {
        Some(bonus) => StatResult {
            stat: stat::ADS_CRIT_CHANCE.to_string(),
            base_value: base_crit,
            modified_value: round2(base_crit + bonus),
            change: round2(bonus),
        },
        None => StatResult {
            stat: stat::ADS_CRIT_CHANCE.to_string(),
            base_value: base_crit,
            modified_value: base_crit,
            change: 0.0,
        },
    };

    match results.iter_mut().find(|r| r.stat == stat::ADS_CRIT_CHANCE) {
        Some(existing) => *existing = reconciled,
        None => results.push(reconciled),
    }
}
