//! The read-only source unit consumed by the converter
//!
//! Owned by the detailed-combat side. The converter only ever borrows it.

use serde::{Deserialize, Serialize};

use crate::core::UnitIdentity;
use crate::unit::construction::{
    ArmorType, EngineType, FireControl, HeatSinks, StructureType, TechBase,
};
use crate::unit::kind::UnitKind;
use crate::unit::mounts::{AmmoMount, Location, MiscMount, WeaponMount};

/// Movement points in the detailed ruleset's own units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementPoints {
    /// Walking MP, cruising MP, or safe thrust for aerospace units
    pub walk: u32,
    #[serde(default)]
    pub jump: u32,
    #[serde(default)]
    pub underwater: u32,
}

impl MovementPoints {
    pub fn new(walk: u32, jump: u32) -> Self {
        Self {
            walk,
            jump,
            underwater: 0,
        }
    }
}

/// Armor and internal structure points on one location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationArmor {
    pub location: Location,
    pub armor: u32,
    #[serde(default)]
    pub rear: u32,
    #[serde(default)]
    pub internal: u32,
}

/// Crew skill ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    pub gunnery: u8,
    pub piloting: u8,
}

/// A fully detailed combat unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    #[serde(flatten)]
    pub identity: UnitIdentity,
    pub kind: UnitKind,
    /// Tonnage (per-suit weight lives in the battle armor payload)
    pub weight: f64,
    #[serde(default)]
    pub tech_base: TechBase,
    #[serde(default)]
    pub omni: bool,
    #[serde(default)]
    pub movement: MovementPoints,
    #[serde(default)]
    pub armor_type: ArmorType,
    #[serde(default)]
    pub structure_type: StructureType,
    #[serde(default)]
    pub engine: EngineType,
    #[serde(default)]
    pub locations: Vec<LocationArmor>,
    #[serde(default)]
    pub heat_sinks: HeatSinks,
    #[serde(default)]
    pub fire_control: FireControl,
    #[serde(default)]
    pub weapons: Vec<WeaponMount>,
    #[serde(default)]
    pub equipment: Vec<MiscMount>,
    #[serde(default)]
    pub ammo: Vec<AmmoMount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew: Option<Crew>,
}

impl SourceUnit {
    /// A bare unit with no equipment, armor or movement
    pub fn new(identity: UnitIdentity, kind: UnitKind, weight: f64) -> Self {
        Self {
            identity,
            kind,
            weight,
            tech_base: TechBase::default(),
            omni: false,
            movement: MovementPoints::default(),
            armor_type: ArmorType::default(),
            structure_type: StructureType::default(),
            engine: EngineType::default(),
            locations: Vec::new(),
            heat_sinks: HeatSinks::default(),
            fire_control: FireControl::default(),
            weapons: Vec::new(),
            equipment: Vec::new(),
            ammo: Vec::new(),
            crew: None,
        }
    }

    pub fn with_movement(mut self, walk: u32, jump: u32) -> Self {
        self.movement = MovementPoints::new(walk, jump);
        self
    }

    pub fn with_armor(mut self, location: Location, armor: u32, rear: u32, internal: u32) -> Self {
        self.locations.push(LocationArmor {
            location,
            armor,
            rear,
            internal,
        });
        self
    }

    pub fn with_weapon(mut self, mount: WeaponMount) -> Self {
        self.weapons.push(mount);
        self
    }

    pub fn with_misc(mut self, mount: MiscMount) -> Self {
        self.equipment.push(mount);
        self
    }

    pub fn with_ammo(mut self, mount: AmmoMount) -> Self {
        self.ammo.push(mount);
        self
    }

    pub fn with_heat_sinks(mut self, heat_sinks: HeatSinks) -> Self {
        self.heat_sinks = heat_sinks;
        self
    }

    pub fn name(&self) -> String {
        self.identity.full_name()
    }

    /// Front plus rear armor over every location
    pub fn total_armor(&self) -> u32 {
        self.locations.iter().map(|l| l.armor + l.rear).sum()
    }

    /// Internal structure over every location
    pub fn total_internal(&self) -> u32 {
        self.locations.iter().map(|l| l.internal).sum()
    }
}
