//! Stage 7: ability derivation
//!
//! Rules run in a fixed order:
//! 1. weapon-routed and damage-class abilities, as produced upstream
//! 2. one pass over misc equipment in mount order
//! 3. probe sub-variant by priority
//! 4. armor-type tag, then structure-type tag
//! 5. unit-level checks
//! 6. CASE II supersedes CASE

use super::abilities::{Ability, AbilityRegistry};
use super::loadout::{Loadout, MiscItem};
use super::weapons::WeaponTotals;
use crate::catalog::MiscFlag;
use crate::unit::{ArmorType, SourceUnit, StructureType, TechBase, UnitKind};

/// Probe sub-variants, highest priority first
const PROBE_PRIORITY: [Ability; 4] = [Ability::Bh, Ability::Prb, Ability::Wat, Ability::Lprb];

/// Transport bay: capacity tag, door tag, whether it grants mobile basing
fn bay_tags(flag: MiscFlag) -> Option<(Ability, Option<Ability>, bool)> {
    let tags = match flag {
        MiscFlag::MekBay => (Ability::Mt, Some(Ability::Mtd), false),
        MiscFlag::ProtoMekBay => (Ability::Pt, Some(Ability::Ptd), false),
        MiscFlag::LightVehicleBay => (Ability::Vtm, Some(Ability::Vtmd), false),
        MiscFlag::HeavyVehicleBay => (Ability::Vth, Some(Ability::Vthd), false),
        MiscFlag::SuperHeavyVehicleBay => (Ability::Vts, Some(Ability::Vtsd), false),
        MiscFlag::FighterBay => (Ability::At, Some(Ability::Atd), true),
        MiscFlag::SmallCraftBay => (Ability::St, Some(Ability::Std), true),
        MiscFlag::InfantryBay | MiscFlag::BattleArmorBay => (Ability::It, None, false),
        MiscFlag::CargoBay => (Ability::Ct, None, false),
        MiscFlag::DockingCollar => (Ability::Dt, None, false),
        _ => return None,
    };
    Some(tags)
}

/// Tags that carry a plain presence flag
fn simple_tag(flag: MiscFlag) -> Option<Ability> {
    let tag = match flag {
        MiscFlag::Ecm => Ability::Ecm,
        MiscFlag::AngelEcm => Ability::Aecm,
        MiscFlag::LightEcm => Ability::Lecm,
        MiscFlag::C3Master => Ability::C3m,
        MiscFlag::C3Slave => Ability::C3s,
        MiscFlag::C3i => Ability::C3i,
        MiscFlag::C3BoostedMaster => Ability::C3bsm,
        MiscFlag::C3BoostedSlave => Ability::C3bss,
        MiscFlag::C3EmergencyMaster => Ability::C3em,
        MiscFlag::NavalC3 => Ability::Nc3,
        MiscFlag::C3RemoteSensor => Ability::C3rs,
        MiscFlag::Case => Ability::Case,
        MiscFlag::CaseII => Ability::CaseII,
        MiscFlag::Shield => Ability::Shld,
        MiscFlag::Mimetic => Ability::Mas,
        MiscFlag::LightMimetic => Ability::Lmas,
        MiscFlag::Searchlight => Ability::Srch,
        MiscFlag::Mash => Ability::Mash,
        MiscFlag::Hpg => Ability::Hpg,
        MiscFlag::DroneOs => Ability::Dro,
        MiscFlag::DroneCarrier => Ability::Dcc,
        MiscFlag::Melee => Ability::Mel,
        MiscFlag::Amphibious => Ability::Amp,
        MiscFlag::Sealed => Ability::Seal,
        MiscFlag::SpaceAdapted => Ability::Soa,
        MiscFlag::Saw => Ability::Saw,
        MiscFlag::Engineering => Ability::Eng,
        _ => return None,
    };
    Some(tag)
}

/// At most one tag from the armor type
fn armor_tag(armor: ArmorType) -> Option<Ability> {
    match armor {
        ArmorType::Stealth => Some(Ability::Stl),
        ArmorType::Reactive => Some(Ability::Rca),
        ArmorType::Reflective => Some(Ability::Rfa),
        ArmorType::FerroLamellor => Some(Ability::Cr),
        ArmorType::FireResistant => Some(Ability::Fr),
        ArmorType::BallisticReinforced => Some(Ability::Bra),
        ArmorType::ImpactResistant => Some(Ability::Ira),
        ArmorType::AntiPenetrativeAblation => Some(Ability::Aba),
        ArmorType::Commercial => Some(Ability::Bar),
        _ => None,
    }
}

fn structure_tag(structure: StructureType) -> Option<Ability> {
    match structure {
        StructureType::Reinforced => Some(Ability::Cr),
        _ => None,
    }
}

/// Capacity of a variable-size item, 1 when unsized
fn item_size(item: &MiscItem<'_>) -> f64 {
    item.mount.size.unwrap_or(1.0)
}

fn derive_misc(item: &MiscItem<'_>, abilities: &mut AbilityRegistry, probes: &mut Vec<Ability>) {
    for &flag in &item.def.flags {
        if let Some(tag) = simple_tag(flag) {
            abilities.flag(tag);
            continue;
        }
        if let Some((capacity, doors, mobile_basing)) = bay_tags(flag) {
            match capacity {
                Ability::It | Ability::Ct => abilities.accumulate(capacity, item_size(item)),
                _ => abilities.increment(capacity, item_size(item).round() as u32),
            }
            if let Some(door_tag) = doors {
                if item.mount.doors > 0 {
                    abilities.increment(door_tag, item.mount.doors);
                }
            }
            if mobile_basing {
                abilities.flag(Ability::Mfb);
            }
            continue;
        }
        match flag {
            MiscFlag::BloodhoundProbe => {
                abilities.flag(Ability::Rcn);
                probes.push(Ability::Bh);
            }
            MiscFlag::ActiveProbe => {
                abilities.flag(Ability::Rcn);
                probes.push(Ability::Prb);
            }
            MiscFlag::LightProbe => {
                abilities.flag(Ability::Rcn);
                probes.push(Ability::Lprb);
            }
            MiscFlag::Watchdog => {
                abilities.flag(Ability::Rcn);
                abilities.flag(Ability::Ecm);
                probes.push(Ability::Wat);
            }
            MiscFlag::Nova => {
                abilities.flag(Ability::Nova);
                abilities.flag(Ability::Ecm);
            }
            MiscFlag::MobileHq => abilities.increment(Ability::Mhq, item_size(item).round() as u32),
            MiscFlag::MineDispenser => abilities.increment(Ability::Mds, 1),
            _ => {}
        }
    }
}

/// Highest-priority probe among the candidates seen
fn best_probe(candidates: &[Ability]) -> Option<Ability> {
    PROBE_PRIORITY
        .iter()
        .copied()
        .find(|tag| candidates.contains(tag))
}

fn derive_unit_level(unit: &SourceUnit, totals: &WeaponTotals, abilities: &mut AbilityRegistry) {
    if unit.omni {
        abilities.flag(Ability::Omni);
    }
    if totals.damage_weapons > 0 && !totals.uses_ammo && unit.ammo.is_empty() {
        abilities.flag(Ability::Ene);
    }
    if unit.tech_base == TechBase::Clan && !unit.ammo.is_empty() {
        abilities.flag(Ability::Case);
    }
    match &unit.kind {
        UnitKind::BattleArmor(ba) => {
            if ba.mechanized {
                abilities.flag(Ability::Mec);
            }
            if ba.extended_mechanized {
                abilities.flag(Ability::Xmec);
            }
        }
        UnitKind::Infantry(inf) if inf.anti_mek => abilities.flag(Ability::Am),
        UnitKind::AerospaceFighter(aero) | UnitKind::ConventionalFighter(aero) if aero.vstol => {
            abilities.flag(Ability::Vstol)
        }
        _ => {}
    }
}

/// Build the final ability registry
///
/// `upstream` holds weapon-routed and damage-class abilities; it is consumed
/// so its insertion order leads the result.
pub fn derive_abilities(
    unit: &SourceUnit,
    loadout: &Loadout<'_>,
    totals: &WeaponTotals,
    upstream: AbilityRegistry,
) -> AbilityRegistry {
    let mut abilities = upstream;
    let mut probes = Vec::new();

    for item in loadout.items() {
        derive_misc(item, &mut abilities, &mut probes);
    }

    if let Some(probe) = best_probe(&probes) {
        abilities.flag(probe);
    }

    if let Some(tag) = armor_tag(unit.armor_type) {
        abilities.flag(tag);
    }
    if let Some(tag) = structure_tag(unit.structure_type) {
        abilities.flag(tag);
    }

    derive_unit_level(unit, totals, &mut abilities);

    if abilities.contains(Ability::CaseII) {
        abilities.remove(Ability::Case);
    }

    abilities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EquipmentCatalog, MiscDef, WeaponClass, WeaponDef};
    use crate::conversion::abilities::AbilityValue;
    use crate::conversion::classifier::classify;
    use crate::conversion::damage::DamageVector;
    use crate::conversion::weapons::aggregate_weapons;
    use crate::core::UnitIdentity;
    use crate::unit::{
        AmmoMount, BattleArmorData, CapitalData, Location, MekData, MiscMount, WeaponMount,
    };

    fn catalog() -> EquipmentCatalog {
        EquipmentCatalog::from_defs(
            vec![
                WeaponDef::new("medium-laser", WeaponClass::Energy, DamageVector::new(0.5, 0.5, 0.0), 3.0),
                WeaponDef::new("srm-6", WeaponClass::Srm, DamageVector::new(0.8, 0.8, 0.0), 4.0)
                    .with_ammo("srm", 6),
            ],
            vec![
                MiscDef::new("beagle", vec![MiscFlag::ActiveProbe]),
                MiscDef::new("bloodhound", vec![MiscFlag::BloodhoundProbe]),
                MiscDef::new("watchdog", vec![MiscFlag::Watchdog]),
                MiscDef::new("case", vec![MiscFlag::Case]),
                MiscDef::new("case-ii", vec![MiscFlag::CaseII]),
                MiscDef::new("mek-bay", vec![MiscFlag::MekBay]),
                MiscDef::new("fighter-bay", vec![MiscFlag::FighterBay]),
                MiscDef::new("cargo", vec![MiscFlag::CargoBay]),
                MiscDef::new("c3-slave", vec![MiscFlag::C3Slave]),
            ],
        )
        .unwrap()
    }

    fn derive(unit: &SourceUnit) -> AbilityRegistry {
        let catalog = catalog();
        let c = classify(unit).unwrap();
        let loadout = Loadout::resolve(unit, &catalog, false);
        let totals = aggregate_weapons(unit, &c, &catalog, &loadout, false);
        let upstream = totals.abilities.clone();
        derive_abilities(unit, &loadout, &totals, upstream)
    }

    fn mek() -> SourceUnit {
        SourceUnit::new(UnitIdentity::new("Test", "M"), UnitKind::Mek(MekData::default()), 50.0)
    }

    #[test]
    fn test_two_equal_probes_give_one_sub_variant() {
        let unit = mek()
            .with_misc(MiscMount::new("beagle", Location::Head))
            .with_misc(MiscMount::new("beagle", Location::LeftTorso));
        let abilities = derive(&unit);
        let probe_tags: Vec<_> = abilities
            .tags()
            .filter(|t| PROBE_PRIORITY.contains(t))
            .collect();
        assert_eq!(probe_tags, vec![Ability::Prb]);
        assert!(abilities.contains(Ability::Rcn));
    }

    #[test]
    fn test_probe_priority() {
        let unit = mek()
            .with_misc(MiscMount::new("watchdog", Location::Head))
            .with_misc(MiscMount::new("beagle", Location::LeftTorso))
            .with_misc(MiscMount::new("bloodhound", Location::RightTorso));
        let abilities = derive(&unit);
        assert!(abilities.contains(Ability::Bh));
        assert!(!abilities.contains(Ability::Prb));
        assert!(!abilities.contains(Ability::Wat));
        // Watchdog still forces ECM
        assert!(abilities.contains(Ability::Ecm));
    }

    #[test]
    fn test_case_ii_supersedes_case() {
        let unit = mek()
            .with_misc(MiscMount::new("case", Location::LeftTorso))
            .with_misc(MiscMount::new("case-ii", Location::RightTorso));
        let abilities = derive(&unit);
        assert!(abilities.contains(Ability::CaseII));
        assert!(!abilities.contains(Ability::Case));
    }

    #[test]
    fn test_clan_ammo_gets_case() {
        let mut unit = mek()
            .with_weapon(WeaponMount::new("srm-6", Location::LeftTorso))
            .with_ammo(AmmoMount::new("srm", 6, 15));
        unit.tech_base = TechBase::Clan;
        let abilities = derive(&unit);
        assert!(abilities.contains(Ability::Case));
        assert!(!abilities.contains(Ability::Ene));
    }

    #[test]
    fn test_energy_only_unit() {
        let unit = mek().with_weapon(WeaponMount::new("medium-laser", Location::RightArm));
        assert!(derive(&unit).contains(Ability::Ene));
        assert!(!derive(&mek()).contains(Ability::Ene));
    }

    #[test]
    fn test_armor_and_structure_tags() {
        let mut unit = mek();
        unit.armor_type = ArmorType::Reactive;
        unit.structure_type = StructureType::Reinforced;
        let abilities = derive(&unit);
        assert!(abilities.contains(Ability::Rca));
        assert!(abilities.contains(Ability::Cr));

        let mut lamellor = mek();
        lamellor.armor_type = ArmorType::FerroLamellor;
        lamellor.structure_type = StructureType::Reinforced;
        assert_eq!(derive(&lamellor).tags().filter(|t| *t == Ability::Cr).count(), 1);
    }

    #[test]
    fn test_bays_and_doors() {
        let ship = SourceUnit::new(
            UnitIdentity::new("Union", ""),
            UnitKind::DropShip(Default::default()),
            3_500.0,
        )
        .with_misc(MiscMount::new("mek-bay", Location::Nose).with_size(12.0).with_doors(3))
        .with_misc(MiscMount::new("fighter-bay", Location::Aft).with_size(2.0).with_doors(1))
        .with_misc(MiscMount::new("cargo", Location::Aft).with_size(75.5));
        let abilities = derive(&ship);
        assert_eq!(abilities.count(Ability::Mt), 12);
        assert_eq!(abilities.count(Ability::Mtd), 3);
        assert_eq!(abilities.count(Ability::At), 2);
        assert!(abilities.contains(Ability::Mfb));
        assert_eq!(abilities.get(Ability::Ct), Some(&AbilityValue::Fraction(75.5)));
    }

    #[test]
    fn test_unit_level_flags() {
        let ba = SourceUnit::new(
            UnitIdentity::new("Elemental", ""),
            UnitKind::BattleArmor(BattleArmorData {
                troopers: 5,
                armor_per_trooper: 10,
                trooper_weight: 1.0,
                mechanized: true,
                extended_mechanized: false,
            }),
            5.0,
        );
        let abilities = derive(&ba);
        assert!(abilities.contains(Ability::Mec));
        assert!(!abilities.contains(Ability::Xmec));

        let mut omni = mek().with_misc(MiscMount::new("c3-slave", Location::Head));
        omni.omni = true;
        let abilities = derive(&omni);
        assert!(abilities.contains(Ability::Omni));
        assert!(abilities.contains(Ability::C3s));

        let station = SourceUnit::new(
            UnitIdentity::new("Station", ""),
            UnitKind::SpaceStation(CapitalData::default()),
            100_000.0,
        );
        assert!(derive(&station).is_empty());
    }
}
