//! Stage 4: armor, structure and damage threshold
//!
//! Exactly one armor path applies per unit: standard, capital or infantry.

use serde::{Deserialize, Serialize};

use super::classifier::Classification;
use super::constants::{
    AERO_STRUCTURE_MULTIPLIER, ARMOR_POINTS_PER_PIP, CAPITAL_ARMOR_MULTIPLIER,
    CAPITAL_STRUCTURE_MULTIPLIER, LARGE_CRAFT_THRESHOLD_DIVISOR, MODULAR_ARMOR_POINTS,
    SMALL_CRAFT_STRUCTURE, THRESHOLD_DIVISOR, VEHICLE_STRUCTURE_DIVISOR,
};
use super::loadout::Loadout;
use crate::catalog::MiscFlag;
use crate::core::types::round_tenth;
use crate::unit::{MotiveType, SourceUnit, StructureType, UnitKind};

/// Final armor, structure and threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durability {
    pub armor: u32,
    pub structure: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
}

/// Mek structure by weight row (10 to 100 tons in 5-ton steps) and engine column
/// Columns: standard, light/clan XL, IS XL, XXL, compact
const MEK_STRUCTURE: [[u32; 5]; 19] = [
    [1, 1, 1, 1, 1],   // 10
    [1, 1, 1, 1, 2],   // 15
    [2, 2, 1, 1, 2],   // 20
    [2, 2, 1, 1, 3],   // 25
    [3, 2, 2, 1, 3],   // 30
    [3, 3, 2, 1, 4],   // 35
    [4, 3, 2, 2, 4],   // 40
    [4, 3, 2, 2, 5],   // 45
    [4, 4, 3, 2, 5],   // 50
    [5, 4, 3, 2, 5],   // 55
    [5, 4, 3, 2, 6],   // 60
    [5, 5, 3, 2, 6],   // 65
    [6, 5, 4, 3, 7],   // 70
    [6, 5, 4, 3, 7],   // 75
    [6, 5, 4, 3, 8],   // 80
    [7, 6, 4, 3, 8],   // 85
    [7, 6, 5, 3, 9],   // 90
    [8, 6, 5, 3, 9],   // 95
    [8, 7, 5, 4, 10],  // 100
];

/// Ceiling that ignores float noise from decimal multipliers
fn settled_ceil(value: f64) -> u32 {
    round_tenth(value).ceil() as u32
}

fn mek_structure_row(weight: f64) -> usize {
    let clamped = weight.clamp(10.0, 100.0);
    ((clamped - 10.0) / 5.0).floor() as usize
}

/// Structure divisor for the heaviest support vehicle band
fn large_support_vehicle_divisor(motive: MotiveType) -> f64 {
    match motive {
        MotiveType::Rail | MotiveType::Airship => 20.0,
        MotiveType::Naval | MotiveType::Hydrofoil | MotiveType::Submarine => 30.0,
        _ => 15.0,
    }
}

/// Sum of armor points weighted by armor type, plus modular pods
fn weighted_armor(unit: &SourceUnit, loadout: &Loadout<'_>) -> f64 {
    let pods = loadout.count(MiscFlag::ModularArmor) as f64;
    unit.total_armor() as f64 * unit.armor_type.armor_multiplier() + pods * MODULAR_ARMOR_POINTS
}

fn resolve_armor(unit: &SourceUnit, classification: &Classification, loadout: &Loadout<'_>) -> u32 {
    match &unit.kind {
        UnitKind::BattleArmor(ba) => {
            let raw = ba.troopers as f64 * (ba.armor_per_trooper as f64 + 1.0);
            (raw / ARMOR_POINTS_PER_PIP).round() as u32
        }
        UnitKind::Infantry(inf) => {
            let raw = inf.troopers as f64 * inf.damage_divisor;
            (raw / ARMOR_POINTS_PER_PIP).round() as u32
        }
        _ if classification.unit_type.is_capital() => {
            (weighted_armor(unit, loadout) * CAPITAL_ARMOR_MULTIPLIER).round() as u32
        }
        _ => (weighted_armor(unit, loadout) / ARMOR_POINTS_PER_PIP).round() as u32,
    }
}

fn resolve_structure(unit: &SourceUnit, classification: &Classification) -> u32 {
    let internal = unit.total_internal() as f64;
    match &unit.kind {
        UnitKind::Mek(_) | UnitKind::IndustrialMek(_) => {
            let base = MEK_STRUCTURE[mek_structure_row(unit.weight)][unit.engine.structure_column()];
            match unit.structure_type {
                StructureType::Reinforced => base * 2,
                StructureType::Composite => base.div_ceil(2),
                _ => base,
            }
        }
        UnitKind::ProtoMek(_) => {
            if unit.weight > 9.0 {
                2
            } else {
                1
            }
        }
        UnitKind::CombatVehicle(_) => settled_ceil(internal / VEHICLE_STRUCTURE_DIVISOR),
        UnitKind::SupportVehicle(v) => {
            let divisor = if classification.size >= 4 {
                large_support_vehicle_divisor(v.motive)
            } else {
                VEHICLE_STRUCTURE_DIVISOR
            };
            settled_ceil(internal / divisor)
        }
        UnitKind::BattleArmor(ba) => ba.troopers.div_ceil(3),
        UnitKind::Infantry(_) => 1,
        UnitKind::AerospaceFighter(aero) | UnitKind::ConventionalFighter(aero) => {
            settled_ceil(aero.structural_integrity as f64 * AERO_STRUCTURE_MULTIPLIER)
        }
        UnitKind::SmallCraft(_) => SMALL_CRAFT_STRUCTURE,
        UnitKind::DropShip(ds) => {
            settled_ceil(ds.structural_integrity as f64 * AERO_STRUCTURE_MULTIPLIER)
        }
        UnitKind::JumpShip(cap) | UnitKind::WarShip(cap) | UnitKind::SpaceStation(cap) => {
            settled_ceil(cap.structural_integrity as f64 * CAPITAL_STRUCTURE_MULTIPLIER)
        }
        UnitKind::Excluded { .. } => 0,
    }
}

/// Threshold from the final armor value; aerospace only
fn resolve_threshold(armor: u32, classification: &Classification) -> Option<u32> {
    if !classification.is_aerospace() {
        return None;
    }
    let per_third = armor as f64 / THRESHOLD_DIVISOR;
    let threshold = if classification.unit_type.is_large_craft() {
        per_third / LARGE_CRAFT_THRESHOLD_DIVISOR
    } else {
        per_third
    };
    Some(settled_ceil(threshold))
}

pub fn resolve_durability(
    unit: &SourceUnit,
    classification: &Classification,
    loadout: &Loadout<'_>,
) -> Durability {
    let armor = resolve_armor(unit, classification, loadout);
    Durability {
        armor,
        structure: resolve_structure(unit, classification),
        threshold: resolve_threshold(armor, classification),
    }
}
