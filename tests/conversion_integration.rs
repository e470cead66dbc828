//! Conversion pipeline integration tests
//!
//! End-to-end conversions through the public entry points, including the
//! boundary scenarios the statblock format is defined by.

use quickstrike::catalog::{EquipmentCatalog, MiscDef, MiscFlag, SpecialWeapon, WeaponClass, WeaponDef};
use quickstrike::conversion::loadout::Loadout;
use quickstrike::conversion::weapons::aggregate_weapons;
use quickstrike::conversion::{
    classify, convert, Ability, AbilityValue, AsUnitType, BucketLocation, Converter, DamageBands,
    DamageVector, FinalDamage, MoveMode, Statblock,
};
use quickstrike::core::{ConvertError, UnitIdentity};
use quickstrike::unit::{
    AeroData, AmmoMount, CapitalData, ExcludedKind, HeatSinkType, HeatSinks, InfantryData,
    InfantryMotive, Location, MekData, MiscMount, MotiveType, SourceUnit, UnitKind, VehicleData,
    WeaponMount,
};

fn catalog() -> EquipmentCatalog {
    EquipmentCatalog::from_defs(
        vec![
            WeaponDef::new("small-laser", WeaponClass::Energy, DamageVector::new(0.3, 0.0, 0.0), 1.0),
            WeaponDef::new("medium-laser", WeaponClass::Energy, DamageVector::new(0.5, 0.5, 0.0), 3.0),
            WeaponDef::new("ppc", WeaponClass::Energy, DamageVector::new(1.0, 1.0, 1.0), 10.0),
            WeaponDef::new("rifle", WeaponClass::Autocannon, DamageVector::new(2.0, 2.0, 1.0), 1.0)
                .with_ammo("rifle", 20),
            WeaponDef::new("lrm-20", WeaponClass::Lrm, DamageVector::new(1.2, 1.2, 1.2), 6.0)
                .with_ammo("lrm", 20)
                .with_indirect()
                .with_cluster(),
            WeaponDef::special("tag", SpecialWeapon::Tag),
            WeaponDef::new(
                "naval-ppc",
                WeaponClass::Capital,
                DamageVector::with_extreme(2.0, 2.0, 2.0, 2.0),
                135.0,
            ),
        ],
        vec![
            MiscDef::new("beagle-probe", vec![MiscFlag::ActiveProbe]),
            MiscDef::new("guardian-ecm", vec![MiscFlag::Ecm]),
            MiscDef::new("c3-slave", vec![MiscFlag::C3Slave]),
            MiscDef::new("c3-master", vec![MiscFlag::C3Master]),
        ],
    )
    .unwrap()
}

fn mek(chassis: &str, weight: f64) -> SourceUnit {
    SourceUnit::new(
        UnitIdentity::new(chassis, "TST-1"),
        UnitKind::Mek(MekData::default()),
        weight,
    )
}

fn single_sinks(count: u32) -> HeatSinks {
    HeatSinks::new(count, HeatSinkType::Single)
}

/// A 10-ton mek with nothing on it: zero damage, no armor, one structure
#[test]
fn test_empty_unit_gets_floor_point_value() {
    let catalog = catalog();
    let unit = mek("Husk", 10.0);
    let statblock = convert(&unit, &catalog).unwrap();

    assert_eq!(statblock.unit_type, AsUnitType::BattleMek);
    assert_eq!(statblock.size, 1);
    assert!(statblock.damage.is_zero());
    assert_eq!(statblock.armor, 0);
    assert_eq!(statblock.structure, 1);
    assert!(statblock.abilities.is_empty());
    assert_eq!(statblock.point_value, 1);
}

/// One weapon, ample ammo, no heat trouble: damage is the table, rounded
#[test]
fn test_single_weapon_damage_matches_table() {
    let catalog = catalog();
    let unit = mek("Rifleman", 50.0)
        .with_movement(4, 0)
        .with_weapon(WeaponMount::new("rifle", Location::RightArm))
        .with_ammo(AmmoMount::new("rifle", 20, 10));
    let statblock = convert(&unit, &catalog).unwrap();

    assert_eq!(statblock.damage.short, FinalDamage { value: 2, minimal: false });
    assert_eq!(statblock.damage.medium, FinalDamage { value: 2, minimal: false });
    assert_eq!(statblock.damage.long, FinalDamage { value: 1, minimal: false });
    assert_eq!(statblock.damage.extreme, None);
    assert_eq!(statblock.overheat, 0);
    assert!(!statblock.has_ability(Ability::Ene));
}

/// Running short of ammunition scales damage by exactly three quarters
#[test]
fn test_ammo_starved_weapon_scaled_by_three_quarters() {
    let catalog = catalog();
    let supplied = mek("Rifleman", 50.0)
        .with_weapon(WeaponMount::new("rifle", Location::RightArm))
        .with_ammo(AmmoMount::new("rifle", 20, 10));
    let starved = mek("Rifleman", 50.0)
        .with_weapon(WeaponMount::new("rifle", Location::RightArm))
        .with_ammo(AmmoMount::new("rifle", 20, 5));

    let totals = |unit: &SourceUnit| {
        let classification = classify(unit).unwrap();
        let loadout = Loadout::resolve(unit, &catalog, false);
        aggregate_weapons(unit, &classification, &catalog, &loadout, false).headline()
    };
    let full = totals(&supplied);
    let short = totals(&starved);

    assert_eq!(short.short, full.short * 0.75);
    assert_eq!(short.medium, full.medium * 0.75);
    assert_eq!(short.long, full.long * 0.75);
}

/// Heat exactly at the buffer above capacity is not overheating
#[test]
fn test_heat_at_buffer_boundary_has_no_overheat() {
    let catalog = catalog();
    // 3 PPCs = 30 heat, +2 for running = 32; 32 - 4 = 28 = capacity
    let build = |sinks: u32| {
        mek("Awesome", 80.0)
            .with_movement(3, 0)
            .with_heat_sinks(single_sinks(sinks))
            .with_weapon(WeaponMount::new("ppc", Location::RightArm))
            .with_weapon(WeaponMount::new("ppc", Location::LeftArm))
            .with_weapon(WeaponMount::new("ppc", Location::RightTorso))
    };
    let boundary = convert(&build(28), &catalog).unwrap();
    let cool = convert(&build(40), &catalog).unwrap();

    assert_eq!(boundary.overheat, 0);
    assert_eq!(boundary.damage, cool.damage);
    assert_eq!(boundary.damage.medium.value, 3);
}

#[test]
fn test_heat_over_capacity_sets_overheat() {
    let catalog = catalog();
    let mut unit = mek("Hot Dog", 75.0)
        .with_movement(4, 0)
        .with_heat_sinks(single_sinks(19));
    for location in [Location::RightArm, Location::LeftArm, Location::RightTorso, Location::LeftTorso] {
        unit = unit.with_weapon(WeaponMount::new("ppc", location));
    }
    let statblock = convert(&unit, &catalog).unwrap();
    assert_eq!(statblock.overheat, 2);
    assert!(statblock.overheat_long);
    assert_eq!(statblock.damage.medium.value, 2);
}

/// Two probes of the same kind still give one sub-variant tag
#[test]
fn test_duplicate_probes_yield_one_sub_variant() {
    let catalog = catalog();
    let unit = mek("Raven", 35.0)
        .with_misc(MiscMount::new("beagle-probe", Location::LeftTorso))
        .with_misc(MiscMount::new("beagle-probe", Location::RightTorso));
    let statblock = convert(&unit, &catalog).unwrap();

    let probe_tags = statblock
        .abilities
        .tags()
        .filter(|t| matches!(t, Ability::Prb | Ability::Bh | Ability::Lprb | Ability::Wat))
        .count();
    assert_eq!(probe_tags, 1);
    assert!(statblock.has_ability(Ability::Prb));
    assert!(statblock.has_ability(Ability::Rcn));
}

#[test]
fn test_excluded_kinds_are_not_convertible() {
    let catalog = catalog();
    for kind in [
        ExcludedKind::TeleMissile,
        ExcludedKind::FighterSquadron,
        ExcludedKind::EjectedCrew,
        ExcludedKind::ArmlessMek,
        ExcludedKind::GunEmplacement,
    ] {
        let unit = SourceUnit::new(UnitIdentity::new("Thing", ""), UnitKind::Excluded { kind }, 10.0);
        assert_eq!(
            convert(&unit, &catalog),
            Err(ConvertError::NotConvertible {
                unit: "Thing".into(),
                kind,
            })
        );
    }
}

#[test]
fn test_unknown_equipment_is_skipped() {
    let catalog = catalog();
    let unit = mek("Mystery", 50.0)
        .with_heat_sinks(single_sinks(10))
        .with_weapon(WeaponMount::new("medium-laser", Location::RightArm))
        .with_weapon(WeaponMount::new("plasma-lance", Location::LeftArm))
        .with_misc(MiscMount::new("quantum-widget", Location::Head));
    let statblock = convert(&unit, &catalog).unwrap();
    assert_eq!(statblock.damage.medium.value, 1);
    assert!(statblock.has_ability(Ability::Ene));
}

#[test]
fn test_indirect_fire_and_missile_class() {
    let catalog = catalog();
    let unit = mek("Archer", 70.0)
        .with_movement(4, 0)
        .with_heat_sinks(single_sinks(10))
        .with_weapon(WeaponMount::new("lrm-20", Location::LeftTorso))
        .with_ammo(AmmoMount::new("lrm", 20, 12));
    let statblock = convert(&unit, &catalog).unwrap();

    assert_eq!(statblock.ability(Ability::If), Some(&AbilityValue::Integer(2)));
    let lrm = statblock
        .ability(Ability::Lrm)
        .and_then(AbilityValue::as_damage)
        .unwrap();
    assert_eq!(lrm.to_string(), "2/2/2");
}

#[test]
fn test_vehicle_turret_bucket() {
    let catalog = catalog();
    let tank = SourceUnit::new(
        UnitIdentity::new("Vedette", ""),
        UnitKind::CombatVehicle(VehicleData {
            motive: MotiveType::Tracked,
        }),
        50.0,
    )
    .with_movement(5, 0)
    .with_armor(Location::Front, 30, 0, 5)
    .with_armor(Location::Turret, 30, 0, 5)
    .with_weapon(WeaponMount::new("medium-laser", Location::Turret))
    .with_weapon(WeaponMount::new("medium-laser", Location::Turret));
    let statblock = convert(&tank, &catalog).unwrap();

    assert_eq!(statblock.unit_type, AsUnitType::CombatVehicle);
    assert_eq!(statblock.movement.get(MoveMode::Tracked), Some(10));
    assert_eq!(statblock.tmm, Some(2));
    assert_eq!(statblock.armor, 2);
    assert_eq!(statblock.structure, 1);
    assert_eq!(statblock.damage.to_string(), "1/1/0");
    let turret = statblock.location(BucketLocation::Turret).unwrap();
    assert_eq!(turret.to_string(), "1/1/0");
    assert!(statblock.has_ability(Ability::Tur));
}

#[test]
fn test_conventional_infantry_platoon() {
    let catalog = catalog();
    let platoon = SourceUnit::new(
        UnitIdentity::new("Foot Platoon", "Rifle"),
        UnitKind::Infantry(InfantryData {
            troopers: 28,
            damage_per_trooper: 0.35,
            weapon_range: 3,
            damage_divisor: 1.0,
            motive: InfantryMotive::Foot,
            anti_mek: true,
        }),
        3.0,
    )
    .with_movement(1, 0);
    let statblock = convert(&platoon, &catalog).unwrap();

    assert_eq!(statblock.unit_type, AsUnitType::Infantry);
    assert_eq!(statblock.damage.to_string(), "1/0/0");
    assert_eq!(statblock.armor, 1);
    assert_eq!(statblock.structure, 1);
    assert_eq!(statblock.movement.to_string(), "2\"f");
    assert!(statblock.has_ability(Ability::Am));
}

#[test]
fn test_fighter_has_threshold_and_no_tmm() {
    let catalog = catalog();
    let fighter = SourceUnit::new(
        UnitIdentity::new("Sparrowhawk", "SPR-H5"),
        UnitKind::AerospaceFighter(AeroData {
            structural_integrity: 7,
            vstol: true,
        }),
        30.0,
    )
    .with_movement(7, 0)
    .with_heat_sinks(single_sinks(10))
    .with_armor(Location::Nose, 210, 0, 0)
    .with_weapon(WeaponMount::new("medium-laser", Location::Nose))
    .with_weapon(WeaponMount::new("medium-laser", Location::Nose));
    let statblock = convert(&fighter, &catalog).unwrap();

    assert_eq!(statblock.unit_type, AsUnitType::AerospaceFighter);
    assert_eq!(statblock.tmm, None);
    assert_eq!(statblock.threshold, Some(3));
    assert_eq!(statblock.movement.to_string(), "7a");
    assert_eq!(statblock.damage.to_string(), "1/1/0/0");
    assert!(statblock.has_ability(Ability::Vstol));
}

#[test]
fn test_warship_arcs() {
    let catalog = catalog();
    let ship = SourceUnit::new(
        UnitIdentity::new("Essex", ""),
        UnitKind::WarShip(CapitalData {
            structural_integrity: 50,
        }),
        360_000.0,
    )
    .with_armor(Location::Nose, 150, 0, 0)
    .with_armor(Location::Aft, 50, 0, 0)
    .with_weapon(WeaponMount::bay(
        "ppc-bay",
        Location::LeftWing,
        vec!["ppc".into(), "ppc".into()],
    ));
    let statblock = convert(&ship, &catalog).unwrap();

    assert_eq!(statblock.unit_type, AsUnitType::WarShip);
    assert_eq!(statblock.size, 1);
    assert_eq!(statblock.armor, 66);
    let left = statblock.location(BucketLocation::LeftSide).unwrap();
    assert_eq!(left.to_string(), "2/2/2/0");
    assert!(statblock.location(BucketLocation::Nose).is_none());
}

fn capital_ship(bay_location: Option<Location>) -> SourceUnit {
    let ship = SourceUnit::new(
        UnitIdentity::new("Kirov", ""),
        UnitKind::WarShip(CapitalData {
            structural_integrity: 40,
        }),
        800_000.0,
    )
    .with_movement(3, 0)
    .with_armor(Location::Nose, 300, 0, 0);
    match bay_location {
        Some(location) => ship.with_weapon(WeaponMount::bay(
            "naval-ppc-bay",
            location,
            vec!["naval-ppc".into(), "naval-ppc".into()],
        )),
        None => ship,
    }
}

#[test]
fn test_broadside_capital_bay_is_published_and_scored() {
    let catalog = catalog();
    let unarmed = convert(&capital_ship(None), &catalog).unwrap();
    let nose = convert(&capital_ship(Some(Location::Nose)), &catalog).unwrap();
    let broadside = convert(&capital_ship(Some(Location::LeftWing)), &catalog).unwrap();

    let cap = |value: Option<&AbilityValue>| value.and_then(AbilityValue::as_damage).map(|d| d.to_string());
    assert_eq!(cap(nose.ability(Ability::Cap)), Some("4/4/4/4".to_string()));
    assert!(nose.arc(BucketLocation::LeftSide).unwrap().capital.is_empty());

    assert!(!broadside.has_ability(Ability::Cap));
    let left = broadside.arc(BucketLocation::LeftSide).unwrap();
    assert_eq!(left.damage.to_string(), "0/0/0/0");
    assert_eq!(cap(left.capital.get(Ability::Cap)), Some("4/4/4/4".to_string()));

    // One capital arc scores the same wherever it faces
    assert!(nose.point_value > unarmed.point_value);
    assert_eq!(broadside.point_value, nose.point_value);
}

#[test]
fn test_second_capital_arc_adds_at_reduced_weight() {
    let catalog = catalog();
    let one = convert(&capital_ship(Some(Location::LeftWing)), &catalog).unwrap();
    let two = capital_ship(Some(Location::LeftWing)).with_weapon(WeaponMount::bay(
        "naval-ppc-bay",
        Location::RightWing,
        vec!["naval-ppc".into(), "naval-ppc".into()],
    ));
    let two = convert(&two, &catalog).unwrap();

    assert!(two.arc(BucketLocation::RightSide).unwrap().capital.contains(Ability::Cap));
    assert!(two.point_value > one.point_value);
    let unarmed = convert(&capital_ship(None), &catalog).unwrap();
    assert!(two.point_value - unarmed.point_value < 2 * (one.point_value - unarmed.point_value));
}

#[test]
fn test_tag_linked_to_c3_master_designates_for_network() {
    let catalog = catalog();
    let linked = mek("Spotter", 45.0)
        .with_movement(5, 0)
        .with_misc(MiscMount::new("c3-master", Location::RightTorso))
        .with_weapon(WeaponMount::new("tag", Location::RightArm).linked_to(0));
    let statblock = convert(&linked, &catalog).unwrap();
    assert!(statblock.has_ability(Ability::C3m));
    assert!(!statblock.has_ability(Ability::Tag));

    let loose = mek("Spotter", 45.0)
        .with_movement(5, 0)
        .with_misc(MiscMount::new("c3-master", Location::RightTorso))
        .with_weapon(WeaponMount::new("tag", Location::RightArm));
    let statblock = convert(&loose, &catalog).unwrap();
    assert!(statblock.has_ability(Ability::C3m));
    assert!(statblock.has_ability(Ability::Tag));
}

#[test]
fn test_force_abilities_raise_point_value() {
    let catalog = catalog();
    let base = mek("Watcher", 40.0)
        .with_movement(6, 0)
        .with_heat_sinks(single_sinks(10))
        .with_armor(Location::CenterTorso, 120, 0, 10)
        .with_weapon(WeaponMount::new("medium-laser", Location::RightArm));
    let equipped = base
        .clone()
        .with_misc(MiscMount::new("guardian-ecm", Location::LeftTorso))
        .with_misc(MiscMount::new("c3-slave", Location::Head))
        .with_weapon(WeaponMount::new("tag", Location::LeftArm));

    let plain = convert(&base, &catalog).unwrap();
    let rich = convert(&equipped, &catalog).unwrap();
    assert!(rich.point_value > plain.point_value);
    assert!(rich.has_ability(Ability::Ecm));
    assert!(rich.has_ability(Ability::C3s));
    assert!(rich.has_ability(Ability::Tag));
}

#[test]
fn test_conversion_is_deterministic() {
    let catalog = catalog();
    let unit = mek("Archer", 70.0)
        .with_movement(4, 0)
        .with_heat_sinks(single_sinks(12))
        .with_armor(Location::CenterTorso, 200, 0, 20)
        .with_weapon(WeaponMount::new("lrm-20", Location::LeftTorso))
        .with_weapon(WeaponMount::new("lrm-20", Location::RightTorso))
        .with_weapon(WeaponMount::new("medium-laser", Location::CenterTorso).rear_facing())
        .with_ammo(AmmoMount::new("lrm", 20, 12));

    let first = serde_json::to_string(&convert(&unit, &catalog).unwrap()).unwrap();
    for _ in 0..5 {
        let again = serde_json::to_string(&convert(&unit, &catalog).unwrap()).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn test_batch_matches_single_conversions() {
    let catalog = catalog();
    let units: Vec<SourceUnit> = (0..10)
        .map(|i| {
            mek(&format!("Mek {i}"), 20.0 + 5.0 * i as f64)
                .with_movement(4, i % 3)
                .with_heat_sinks(single_sinks(10))
                .with_weapon(WeaponMount::new("medium-laser", Location::RightArm))
        })
        .collect();

    let converter = Converter::new(&catalog);
    let batch = converter.convert_batch(&units);
    assert_eq!(batch.len(), units.len());
    for (unit, result) in units.iter().zip(&batch) {
        assert_eq!(result.as_ref().ok(), converter.convert(unit).ok().as_ref());
    }
}

#[test]
fn test_statblock_round_trips_through_json() {
    let catalog = catalog();
    let unit = mek("Locust", 20.0)
        .with_movement(8, 0)
        .with_heat_sinks(single_sinks(10))
        .with_armor(Location::CenterTorso, 64, 0, 6)
        .with_weapon(WeaponMount::new("medium-laser", Location::CenterTorso))
        .with_weapon(WeaponMount::new("small-laser", Location::LeftArm));
    let statblock = convert(&unit, &catalog).unwrap();

    let json = serde_json::to_string(&statblock).unwrap();
    let back: Statblock = serde_json::from_str(&json).unwrap();
    assert_eq!(back, statblock);

    let expected = DamageBands::from_vector(&DamageVector::new(0.8, 0.5, 0.0), false);
    assert_eq!(statblock.damage, expected);
}
