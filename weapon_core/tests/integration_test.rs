//! Integration test: Load catalog -> Assemble build -> Resolve -> Save -> Reload
//!
//! This test validates the full flow from catalog files on disk to saved builds.

use std::fs;
use weapon_core::{
    build::{Build, BuildError, BuildStore, FileStore},
    catalog::{Catalog, BUILTIN_FILES},
    engine::StatSheet,
    types::SlotCategory,
};

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

/// Helper to print a resolved sheet
fn print_sheet(sheet: &StatSheet) {
    for result in sheet {
        println!(
            "    {:<16} {:>8} -> {:>8} ({:+})",
            result.stat, result.base_value, result.modified_value, result.change
        );
    }
}

fn assert_stat(sheet: &StatSheet, stat: &str, base: f64, value: f64) {
    let result = sheet
        .get(stat)
        .unwrap_or_else(|| panic!("{} missing from sheet", stat));
    assert!(
        (result.base_value - base).abs() < 1e-9,
        "{} base: expected {}, got {}",
        stat,
        base,
        result.base_value
    );
    assert!(
        (result.modified_value - value).abs() < 1e-9,
        "{} value: expected {}, got {}",
        stat,
        value,
        result.modified_value
    );
}

#[test]
fn test_full_catalog_to_saved_build_flow() {
    separator("INTEGRATION TEST: Catalog -> Build -> Resolve -> Store");

    // =========================================================================
    // STEP 1: Write the catalog to disk and load it back
    // =========================================================================
    separator("STEP 1: Loading Catalog Directory");

    let data_dir = tempfile::tempdir().expect("Failed to create data dir");
    for (name, content) in BUILTIN_FILES {
        fs::write(data_dir.path().join(name), content).expect("Failed to write catalog file");
    }

    let catalog = Catalog::load_dir(data_dir.path()).expect("Failed to load catalog");
    println!("  Loaded {} weapons", catalog.weapons.len());
    println!("  Loaded {} oils", catalog.oils.len());
    println!("  Loaded {} scrolls", catalog.scrolls.len());
    assert_eq!(catalog.weapons.len(), 3);

    let handgun = catalog.weapon("1").expect("Handgun not found");
    assert_eq!(handgun.name, "Handgun");
    assert_eq!(
        catalog.compatible_slots(handgun),
        vec![
            SlotCategory::Muzzle,
            SlotCategory::Sight,
            SlotCategory::Laser,
            SlotCategory::Chisel,
            SlotCategory::Insurance,
        ]
    );

    // =========================================================================
    // STEP 2: Assemble a build on the handgun
    // =========================================================================
    separator("STEP 2: Assembling Build");

    let mut build = Build::new("1");
    build
        .select_attachment(&catalog, "chisel_12ga")
        .expect("Failed to fit chisel");
    build
        .select_attachment(&catalog, "muzzle_choke")
        .expect("Failed to fit choke");
    build
        .add_oil(&catalog, "oil_sharpening")
        .expect("Failed to add oil");
    build
        .set_scroll(&catalog, Some("scroll_pellets"))
        .expect("Failed to set scroll");

    // The handgun has no chamber slot
    assert!(matches!(
        build.select_attachment(&catalog, "chamber_gun_crank"),
        Err(BuildError::IncompatibleSlot { .. })
    ));

    println!("  Build: {:?}", build);

    // =========================================================================
    // STEP 3: Resolve
    // =========================================================================
    separator("STEP 3: Resolving Stats");

    let sheet = build
        .resolve(&catalog)
        .expect("Build failed validation")
        .expect("Build produced no result");
    print_sheet(&sheet);

    // 12ga chisel: 4.5 * (20 / 10) = 9; choke +1 = 10; oil +10% = 11;
    // pellets add 5 per bullet over 8 pellets = 51
    assert_stat(&sheet, "Damage", 20.0, 51.0);
    assert_stat(&sheet, "ProjectileCount", 0.0, 8.0);
    // 6 from the caliber table, choke -40%
    assert_stat(&sheet, "Spread", 1.5, 3.6);
    assert_stat(&sheet, "Recoil", 2.0, 5.0);
    assert_stat(&sheet, "MaxDurability", 400.0, 375.0);
    assert_stat(&sheet, "RPM", 300.0, 300.0);
    assert_stat(&sheet, "ADSCritChance", 0.1, 0.1);

    // =========================================================================
    // STEP 4: Save the build and reload it from a fresh store
    // =========================================================================
    separator("STEP 4: Saving And Reloading");

    let store_dir = tempfile::tempdir().expect("Failed to create store dir");
    {
        let mut store = BuildStore::new(FileStore::new(store_dir.path()));
        store.save_named("pellet handgun", &build).expect("Failed to save build");
        store.save_current(&build).expect("Failed to save current build");
    }

    let store = BuildStore::new(FileStore::new(store_dir.path()));
    let saved = store
        .find_named("pellet handgun")
        .expect("Failed to read store")
        .expect("Saved build missing");
    assert_eq!(saved.build, build);
    assert!(saved.timestamp > 0);

    let reloaded = saved
        .build
        .resolve(&catalog)
        .expect("Reloaded build failed validation")
        .expect("Reloaded build produced no result");
    assert_eq!(reloaded, sheet);

    let current = store.load_current().expect("Failed to read current build");
    assert_eq!(current, Some(build));

    separator("INTEGRATION TEST COMPLETE");
}

#[test]
fn test_missing_caliber_leaves_weapon_native() {
    let catalog = Catalog::builtin().expect("Failed to load builtin catalog");

    let mut build = Build::new("1");
    build
        .select_attachment(&catalog, "chisel_50bmg")
        .expect("Failed to fit chisel");
    build
        .add_oil(&catalog, "oil_heavy")
        .expect("Failed to add oil");

    let sheet = build
        .resolve(&catalog)
        .expect("Build failed validation")
        .expect("Build produced no result");

    // .50 BMG is not in the caliber table, so the handgun stays 9mm
    assert_stat(&sheet, "Damage", 20.0, 24.0);
    assert!(sheet.get("ProjectileCount").is_none());
}

#[test]
fn test_convert_scroll_runs_before_attachments_and_oils() {
    let catalog = Catalog::builtin().expect("Failed to load builtin catalog");

    let mut build = Build::new("3");
    build
        .select_attachment(&catalog, "chamber_gun_crank")
        .expect("Failed to fit gun crank");
    build
        .add_oil(&catalog, "oil_haste")
        .expect("Failed to add oil");
    build
        .set_scroll(&catalog, Some("scroll_light"))
        .expect("Failed to set scroll");

    let sheet = build
        .resolve(&catalog)
        .expect("Build failed validation")
        .expect("Build produced no result");

    // 60 RPM: scroll x0.8 = 48; crank +25% = 60; haste x1.15 = 69
    assert_stat(&sheet, "RPM", 60.0, 69.0);
    // 72 damage x1.5 from the scroll
    assert_stat(&sheet, "Damage", 72.0, 108.0);
}

#[test]
fn test_ads_bonus_from_sight_and_scroll() {
    let catalog = Catalog::builtin().expect("Failed to load builtin catalog");

    let mut build = Build::new("1");
    build
        .select_attachment(&catalog, "sight_reflex")
        .expect("Failed to fit sight");
    build
        .add_oil(&catalog, "oil_precision")
        .expect("Failed to add oil");
    build
        .set_scroll(&catalog, Some("scroll_focus"))
        .expect("Failed to set scroll");

    let sheet = build
        .resolve(&catalog)
        .expect("Build failed validation")
        .expect("Build produced no result");

    // Crit 0.1 + 0.05 from the oil, added even though it is a percent kind
    assert_stat(&sheet, "CritChance", 0.1, 0.15);
    // ADS bonus 0.05 (sight) + 0.1 (scroll) on top of the resolved crit
    assert_stat(&sheet, "ADSCritChance", 0.15, 0.3);
    let ads = sheet.get("ADSCritChance").expect("ADS missing");
    assert!((ads.change - 0.15).abs() < 1e-9);
}
