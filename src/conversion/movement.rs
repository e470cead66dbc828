//! Stage 3: movement profile and target movement modifier

use serde::{Deserialize, Serialize};
use std::fmt;

use super::classifier::{AsUnitType, Classification};
use super::constants::{DOUBLE_BOOST_MULTIPLIER, INCHES_PER_MP, SINGLE_BOOST_MULTIPLIER};
use super::loadout::Loadout;
use crate::catalog::MiscFlag;
use crate::unit::{CraftShape, InfantryMotive, MotiveType, SourceUnit, UnitKind};

/// Movement mode, rendered as its one-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveMode {
    Walk,
    Jump,
    Underwater,
    Glider,
    Tracked,
    Wheeled,
    Hover,
    Vtol,
    Naval,
    Wige,
    Rail,
    Airship,
    Foot,
    Motorized,
    /// Aerodyne thrust
    Aerodyne,
    /// Spheroid thrust
    Spheroid,
    /// Station keeping
    Station,
}

impl MoveMode {
    pub fn code(&self) -> &'static str {
        match self {
            MoveMode::Walk => "",
            MoveMode::Jump => "j",
            MoveMode::Underwater => "s",
            MoveMode::Glider | MoveMode::Wige => "g",
            MoveMode::Tracked => "t",
            MoveMode::Wheeled => "w",
            MoveMode::Hover => "h",
            MoveMode::Vtol => "v",
            MoveMode::Naval => "n",
            MoveMode::Rail => "r",
            MoveMode::Airship => "i",
            MoveMode::Foot => "f",
            MoveMode::Motorized => "m",
            MoveMode::Aerodyne => "a",
            MoveMode::Spheroid => "p",
            MoveMode::Station => "k",
        }
    }

    /// Thrust modes are in thrust points, not inches
    pub fn is_thrust(&self) -> bool {
        matches!(self, MoveMode::Aerodyne | MoveMode::Spheroid | MoveMode::Station)
    }

    fn from_motive(motive: MotiveType) -> Self {
        match motive {
            MotiveType::Tracked => MoveMode::Tracked,
            MotiveType::Wheeled => MoveMode::Wheeled,
            MotiveType::Hover => MoveMode::Hover,
            MotiveType::Vtol => MoveMode::Vtol,
            MotiveType::Naval | MotiveType::Hydrofoil => MoveMode::Naval,
            MotiveType::Submarine => MoveMode::Underwater,
            MotiveType::Wige => MoveMode::Wige,
            MotiveType::Rail => MoveMode::Rail,
            MotiveType::Airship => MoveMode::Airship,
            MotiveType::FixedWing => MoveMode::Aerodyne,
        }
    }

    fn from_infantry(motive: InfantryMotive) -> Self {
        match motive {
            InfantryMotive::Foot => MoveMode::Foot,
            InfantryMotive::Motorized => MoveMode::Motorized,
            InfantryMotive::Jump => MoveMode::Jump,
            InfantryMotive::Wheeled => MoveMode::Wheeled,
            InfantryMotive::Tracked => MoveMode::Tracked,
            InfantryMotive::Hover => MoveMode::Hover,
            InfantryMotive::Microcopter => MoveMode::Vtol,
            InfantryMotive::Scuba => MoveMode::Underwater,
        }
    }
}

impl fmt::Display for MoveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One movement entry: a mode and its speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub mode: MoveMode,
    /// Inches for ground modes, thrust points for thrust modes
    pub speed: u32,
}

/// Ordered movement entries; never empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementProfile {
    entries: Vec<MoveEntry>,
}

impl MovementProfile {
    fn push(&mut self, mode: MoveMode, speed: u32) {
        if speed > 0 {
            self.entries.push(MoveEntry { mode, speed });
        }
    }

    /// Keep at least one entry, even if it is a zero
    fn ensure_entry(&mut self, fallback: MoveMode) {
        if self.entries.is_empty() {
            self.entries.push(MoveEntry {
                mode: fallback,
                speed: 0,
            });
        }
    }

    pub fn entries(&self) -> &[MoveEntry] {
        &self.entries
    }

    pub fn get(&self, mode: MoveMode) -> Option<u32> {
        self.entries.iter().find(|e| e.mode == mode).map(|e| e.speed)
    }

    pub fn has_jump(&self) -> bool {
        self.get(MoveMode::Jump).is_some()
    }

    /// Fastest entry of any mode
    pub fn best(&self) -> u32 {
        self.entries.iter().map(|e| e.speed).max().unwrap_or(0)
    }

    /// Fastest entry that is neither jump nor thrust
    pub fn best_ground(&self) -> Option<u32> {
        self.entries
            .iter()
            .filter(|e| e.mode != MoveMode::Jump && !e.mode.is_thrust())
            .map(|e| e.speed)
            .max()
    }
}

impl FromIterator<MoveEntry> for MovementProfile {
    fn from_iter<I: IntoIterator<Item = MoveEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for MovementProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            if entry.mode.is_thrust() {
                write!(f, "{}{}", entry.speed, entry.mode)?;
            } else {
                write!(f, "{}\"{}", entry.speed, entry.mode)?;
            }
        }
        Ok(())
    }
}

fn boost_multiplier(masc: bool, supercharger: bool) -> f64 {
    match (masc, supercharger) {
        (true, true) => DOUBLE_BOOST_MULTIPLIER,
        (true, false) | (false, true) => SINGLE_BOOST_MULTIPLIER,
        (false, false) => 1.0,
    }
}

fn inches(mp: u32) -> u32 {
    mp * INCHES_PER_MP
}

fn boosted_inches(mp: u32, multiplier: f64) -> u32 {
    (mp as f64 * multiplier).round() as u32 * INCHES_PER_MP
}

/// Ground, jump and underwater entries for legged units
fn legged_profile(unit: &SourceUnit, ground_mode: MoveMode, multiplier: f64) -> MovementProfile {
    let mut profile = MovementProfile::default();
    let walk = unit
        .movement
        .walk
        .saturating_sub(unit.armor_type.movement_penalty());
    let ground = boosted_inches(walk, multiplier);
    let jump = inches(unit.movement.jump);

    if jump == 0 || jump != ground {
        profile.push(ground_mode, ground);
    }
    profile.push(MoveMode::Jump, jump);
    profile.push(MoveMode::Underwater, inches(unit.movement.underwater));
    profile.ensure_entry(ground_mode);
    profile
}

/// Build the movement profile for a unit
pub fn resolve_movement(unit: &SourceUnit, loadout: &Loadout<'_>) -> MovementProfile {
    let mp = unit.movement;
    match &unit.kind {
        UnitKind::Mek(_) | UnitKind::IndustrialMek(_) => {
            let multiplier = boost_multiplier(
                loadout.has(MiscFlag::Masc),
                loadout.has(MiscFlag::Supercharger),
            );
            legged_profile(unit, MoveMode::Walk, multiplier)
        }
        UnitKind::ProtoMek(pm) => {
            let mode = if pm.glider {
                MoveMode::Glider
            } else {
                MoveMode::Walk
            };
            legged_profile(unit, mode, 1.0)
        }
        UnitKind::BattleArmor(_) => legged_profile(unit, MoveMode::Walk, 1.0),
        UnitKind::CombatVehicle(v) | UnitKind::SupportVehicle(v) => {
            let mut profile = MovementProfile::default();
            let mode = MoveMode::from_motive(v.motive);
            if mode.is_thrust() {
                profile.push(mode, mp.walk);
            } else {
                let multiplier = boost_multiplier(false, loadout.has(MiscFlag::Supercharger));
                profile.push(mode, boosted_inches(mp.walk, multiplier));
                profile.push(MoveMode::Jump, inches(mp.jump));
            }
            profile.ensure_entry(mode);
            profile
        }
        UnitKind::Infantry(inf) => {
            let mut profile = MovementProfile::default();
            let mode = MoveMode::from_infantry(inf.motive);
            let speed = if mode == MoveMode::Jump && mp.jump > 0 {
                mp.jump
            } else {
                mp.walk
            };
            profile.push(mode, inches(speed));
            profile.ensure_entry(mode);
            profile
        }
        UnitKind::DropShip(ds) => {
            let mode = match ds.shape {
                CraftShape::Spheroid => MoveMode::Spheroid,
                CraftShape::Aerodyne => MoveMode::Aerodyne,
            };
            thrust_profile(mode, mp.walk)
        }
        UnitKind::JumpShip(_) | UnitKind::SpaceStation(_) => thrust_profile(MoveMode::Station, 0),
        UnitKind::AerospaceFighter(_)
        | UnitKind::ConventionalFighter(_)
        | UnitKind::SmallCraft(_)
        | UnitKind::WarShip(_) => thrust_profile(MoveMode::Aerodyne, mp.walk),
        // Rejected by eligibility before this stage runs
        UnitKind::Excluded { .. } => thrust_profile(MoveMode::Walk, 0),
    }
}

fn thrust_profile(mode: MoveMode, thrust: u32) -> MovementProfile {
    let mut profile = MovementProfile::default();
    profile.push(mode, thrust);
    profile.ensure_entry(mode);
    profile
}

/// Inch bands for the target movement modifier, as (ceiling, modifier)
const TMM_BANDS: [(u32, u8); 5] = [(4, 0), (8, 1), (12, 2), (18, 3), (34, 4)];
const TMM_MAX: u8 = 5;

pub fn tmm_for_inches(inches: u32) -> u8 {
    TMM_BANDS
        .iter()
        .find(|(ceiling, _)| inches <= *ceiling)
        .map(|(_, tmm)| *tmm)
        .unwrap_or(TMM_MAX)
}

/// Target movement modifier; aerospace units have none
pub fn target_movement_modifier(
    profile: &MovementProfile,
    classification: &Classification,
) -> Option<u8> {
    if classification.is_aerospace() {
        return None;
    }
    let ground = profile.best_ground().map(tmm_for_inches).unwrap_or(0);
    let jumper = matches!(
        classification.unit_type,
        AsUnitType::BattleMek | AsUnitType::IndustrialMek | AsUnitType::ProtoMek | AsUnitType::BattleArmor
    );
    let jump = match profile.get(MoveMode::Jump) {
        Some(speed) if jumper => tmm_for_inches(speed) + 1,
        Some(speed) => tmm_for_inches(speed),
        None => 0,
    };
    Some(ground.max(jump))
}
