//! Caliber conversion - rebases ammo-dependent stats before any modifier runs

use crate::source::{Attachment, CaliberTable, Weapon};
use crate::types::stat;
use std::collections::BTreeMap;
use tracing::debug;

/// Effective base stats after an optional chisel's caliber swap
///
/// Without a converting chisel, or when the table lacks the target caliber,
/// this is a copy of the catalog base stats. Otherwise `Damage` keeps the
/// weapon's multiplier over its native ammo's bullet damage, and
/// `ProjectileCount`, `Spread` and `Recoil` come straight from the table.
pub fn effective_base(
    weapon: &Weapon,
    chisel: Option<&Attachment>,
    table: &CaliberTable,
) -> BTreeMap<String, f64> {
    let mut stats = weapon.base_stats.clone();

    let Some(target) = chisel.and_then(Attachment::caliber_conversion) else {
        return stats;
    };

    let (Some(caliber), Some(new_bullet_damage)) = (table.caliber(target), table.base_damage(target))
    else {
        debug!(
            weapon = %weapon.id,
            caliber = target,
            "caliber missing from table, skipping conversion"
        );
        return stats;
    };

    let damage = weapon.base(stat::DAMAGE);
    let weapon_multiplier = match table.base_damage(&weapon.ammo_type) {
        Some(native) if native > 0.0 => damage / native,
        _ => 1.0,
    };
    let new_damage = new_bullet_damage * weapon_multiplier;

    debug!(
        weapon = %weapon.id,
        from = %weapon.ammo_type,
        to = target,
        weapon_multiplier,
        new_damage,
        "applying caliber conversion"
    );

    stats.insert(stat::DAMAGE.to_string(), new_damage);
    stats.insert(stat::PROJECTILE_COUNT.to_string(), caliber.projectile_count);
    stats.insert(stat::SPREAD.to_string(), caliber.spread);
    stats.insert(stat::RECOIL.to_string(), caliber.recoil);
    stats
}
