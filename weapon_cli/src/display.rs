//! Stat sheet rendering - ordering, display names and value formatting

use serde_json::{json, Value};
use std::fmt::Write;
use weapon_core::{stat, Build, StatResult, StatSheet, Weapon};

/// Display order; anything else sorts alphabetically after these
const STAT_ORDER: &[&str] = &[
    "Damage",
    "CritChance",
    "ADSCritChance",
    "ProjectileCount",
    "RPM",
    "MagazineSize",
    "Spread",
    "Recoil",
    "Durability",
    "MaxDurability",
    "Weight",
    "ProjectileSpeed",
    "ReloadTime",
    "Range",
    "ReloadSpeed",
    "BulletSpeed",
    "AmmoConsumeChance",
    "BulletDrop",
    "BulletBounces",
    "BulletPenetrations",
    "BulletSize",
    "JumpPower",
    "LootChance",
    "MoveSpeed",
    "MoveAccuracy",
    "BulletBounciness",
];

/// Only shown once something changes them
const CONDITIONAL_STATS: &[&str] = &[
    "CritChance",
    "ADSCritChance",
    "ProjectileSpeed",
    "AmmoConsumeChance",
    "BulletDrop",
    "BulletBounces",
    "BulletPenetrations",
    "BulletSize",
    "JumpPower",
    "LootChance",
    "MoveSpeed",
    "MoveAccuracy",
    "BulletBounciness",
];

/// Human-readable stat name
pub fn display_name(name: &str) -> &str {
    match name {
        "CritChance" => "Crit Chance",
        "ADSCritChance" => "ADS Crit Chance",
        "ProjectileCount" => "Projectile Count",
        "MagazineSize" => "Magazine Size",
        "ReloadTime" => "Reload Time",
        "MaxDurability" => "Max Durability",
        "ProjectileSpeed" => "Projectile Speed",
        "ReloadSpeed" => "Reload Speed",
        "BulletSpeed" => "Bullet Speed",
        "AmmoConsumeChance" => "Ammo Consume Chance",
        "BulletDrop" => "Bullet Drop",
        "BulletBounces" => "Bullet Bounces",
        "BulletPenetrations" => "Bullet Penetrations",
        "BulletSize" => "Bullet Size",
        "JumpPower" => "Jump Power",
        "LootChance" => "Loot Chance",
        "MoveSpeed" => "Move Speed",
        "MoveAccuracy" => "Move Accuracy",
        "BulletBounciness" => "Bullet Bounciness",
        other => other,
    }
}

fn order_key(name: &str) -> (usize, &str) {
    let rank = STAT_ORDER
        .iter()
        .position(|s| *s == name)
        .unwrap_or(STAT_ORDER.len());
    (rank, name)
}

fn is_conditional(name: &str) -> bool {
    CONDITIONAL_STATS.contains(&name)
}

fn is_crit(name: &str) -> bool {
    name == stat::CRIT_CHANCE || name == stat::ADS_CRIT_CHANCE
}

/// Results in display order, hiding unchanged conditional stats
pub fn visible_results(sheet: &StatSheet) -> Vec<&StatResult> {
    let mut rows: Vec<&StatResult> = sheet
        .iter()
        .filter(|r| !is_conditional(&r.stat) || r.is_changed())
        .collect();
    rows.sort_by(|a, b| order_key(&a.stat).cmp(&order_key(&b.stat)));
    rows
}

/// Catalog stats in display order, conditional stats left out
pub fn base_rows(weapon: &Weapon) -> Vec<(&str, f64)> {
    let mut rows: Vec<(&str, f64)> = weapon
        .base_stats
        .iter()
        .filter(|(name, _)| !is_conditional(name))
        .map(|(name, value)| (name.as_str(), *value))
        .collect();
    rows.sort_by(|a, b| order_key(a.0).cmp(&order_key(b.0)));
    rows
}

/// Format one value; `projectiles` turns Damage into `DxP`
pub fn format_value(name: &str, value: f64, projectiles: f64) -> String {
    if is_crit(name) {
        format!("{}%", (value * 100.0).round())
    } else if name == stat::PROJECTILE_COUNT {
        format!("{}", value.round())
    } else if name == stat::DAMAGE && projectiles > 1.0 {
        format!("{}x{}", value, projectiles.round())
    } else {
        format!("{}", value)
    }
}

fn format_change(name: &str, change: f64) -> String {
    if change == 0.0 {
        String::new()
    } else if is_crit(name) {
        format!("{:+}%", (change * 100.0).round())
    } else {
        format!("{:+}", change)
    }
}

/// Damage times projectile count, to two decimals
pub fn total_damage(damage: f64, projectiles: f64) -> f64 {
    weapon_core::round2(damage * projectiles)
}

fn resolved_projectiles(sheet: &StatSheet, weapon: &Weapon) -> f64 {
    sheet
        .value(stat::PROJECTILE_COUNT)
        .unwrap_or_else(|| weapon.projectile_count())
}

fn header(out: &mut String, weapon: &Weapon) {
    let _ = writeln!(out, "{} ({} • {})", weapon.name, weapon.category, weapon.ammo_type);
}

/// Catalog stats table for a weapon with no selection
pub fn render_base(weapon: &Weapon) -> String {
    let mut out = String::new();
    header(&mut out, weapon);
    let projectiles = weapon.projectile_count();
    for (name, value) in base_rows(weapon) {
        let _ = writeln!(
            out,
            "  {:<22}{:>12}",
            display_name(name),
            format_value(name, value, projectiles)
        );
    }
    let _ = writeln!(
        out,
        "  {:<22}{:>12}",
        "Total Damage",
        total_damage(weapon.base(stat::DAMAGE), projectiles)
    );
    out
}

/// Base / modified / change table for a resolved build
pub fn render_sheet(weapon: &Weapon, sheet: &StatSheet) -> String {
    let mut out = String::new();
    header(&mut out, weapon);
    let _ = writeln!(out, "  {:<22}{:>12}{:>12}{:>10}", "Stat", "Base", "Modified", "Change");

    let base_projectiles = weapon.projectile_count();
    let projectiles = resolved_projectiles(sheet, weapon);
    for row in visible_results(sheet) {
        let _ = writeln!(
            out,
            "  {:<22}{:>12}{:>12}{:>10}",
            display_name(&row.stat),
            format_value(&row.stat, row.base_value, base_projectiles),
            format_value(&row.stat, row.modified_value, projectiles),
            format_change(&row.stat, row.change)
        );
    }

    let damage = sheet
        .value(stat::DAMAGE)
        .unwrap_or_else(|| weapon.base(stat::DAMAGE));
    let _ = writeln!(
        out,
        "  {:<22}{:>12}{:>12}",
        "Total Damage",
        total_damage(weapon.base(stat::DAMAGE), base_projectiles),
        total_damage(damage, projectiles)
    );
    out
}

/// JSON document for a build, with `stats` null when nothing resolved
pub fn build_json(weapon: &Weapon, build: &Build, sheet: Option<&StatSheet>) -> Value {
    let total = match sheet {
        Some(sheet) => {
            let damage = sheet
                .value(stat::DAMAGE)
                .unwrap_or_else(|| weapon.base(stat::DAMAGE));
            total_damage(damage, resolved_projectiles(sheet, weapon))
        }
        None => total_damage(weapon.base(stat::DAMAGE), weapon.projectile_count()),
    };
    json!({
        "weapon": {
            "id": weapon.id,
            "name": weapon.name,
            "type": weapon.category,
            "ammoType": weapon.ammo_type,
        },
        "build": build,
        "baseStats": weapon.base_stats,
        "stats": sheet,
        "totalDamage": total,
    })
}
