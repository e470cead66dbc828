//! Unit kinds and their category-specific data
//!
//! A closed enum: every pipeline stage matches on it exhaustively, so adding
//! a kind is a compile error until each stage handles it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mek leg configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MekConfig {
    #[default]
    Biped,
    Quad,
    Tripod,
}

/// Data carried by BattleMeks and IndustrialMeks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MekData {
    #[serde(default)]
    pub config: MekConfig,
}

/// Data carried by ProtoMeks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtoMekData {
    /// Glider protos move over ground effect instead of walking
    #[serde(default)]
    pub glider: bool,
}

/// Propulsion of ground, naval and atmospheric vehicles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotiveType {
    Tracked,
    Wheeled,
    Hover,
    Vtol,
    Naval,
    Hydrofoil,
    Submarine,
    Wige,
    Rail,
    Airship,
    /// Fixed-wing support vehicles fly as aerospace units
    FixedWing,
}

/// Data carried by combat and support vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleData {
    pub motive: MotiveType,
}

/// Data carried by battle armor squads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleArmorData {
    pub troopers: u32,
    /// Armor points on each suit
    pub armor_per_trooper: u32,
    /// Suit weight in tons, used for the size class
    pub trooper_weight: f64,
    /// Can ride omni carriers
    #[serde(default)]
    pub mechanized: bool,
    /// Can ride any carrier
    #[serde(default)]
    pub extended_mechanized: bool,
}

/// How conventional infantry gets around
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InfantryMotive {
    #[default]
    Foot,
    Motorized,
    Jump,
    Wheeled,
    Tracked,
    Hover,
    Microcopter,
    Scuba,
}

/// Data carried by conventional infantry platoons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfantryData {
    pub troopers: u32,
    /// Standard-scale damage each trooper inflicts per turn
    pub damage_per_trooper: f64,
    /// Maximum range of the primary weapon, in hexes
    pub weapon_range: u32,
    /// Armor kit damage divisor
    #[serde(default = "default_divisor")]
    pub damage_divisor: f64,
    #[serde(default)]
    pub motive: InfantryMotive,
    /// Trained for leg and swarm attacks
    #[serde(default)]
    pub anti_mek: bool,
}

fn default_divisor() -> f64 {
    1.0
}

/// Data carried by fighters and small craft
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AeroData {
    pub structural_integrity: u32,
    #[serde(default)]
    pub vstol: bool,
}

/// Hull shape of a DropShip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CraftShape {
    #[default]
    Spheroid,
    Aerodyne,
}

/// Data carried by DropShips
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropShipData {
    pub structural_integrity: u32,
    #[serde(default)]
    pub shape: CraftShape,
}

/// Data carried by capital-scale craft
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalData {
    pub structural_integrity: u32,
}

/// Kinds that exist in the detailed ruleset but have no statblock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExcludedKind {
    /// Guided capital missile flying as its own unit
    TeleMissile,
    /// Aggregate of fighters; its members convert individually
    FighterSquadron,
    /// Ejected pilot or escape pod
    EjectedCrew,
    /// Placeholder for a mek that lost its arms
    ArmlessMek,
    /// Static turret emplacement
    GunEmplacement,
}

impl fmt::Display for ExcludedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExcludedKind::TeleMissile => "tele-missile",
            ExcludedKind::FighterSquadron => "fighter squadron",
            ExcludedKind::EjectedCrew => "ejected crew",
            ExcludedKind::ArmlessMek => "armless mek",
            ExcludedKind::GunEmplacement => "gun emplacement",
        };
        f.write_str(name)
    }
}

/// What the source unit is, with the data only that kind carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UnitKind {
    Mek(MekData),
    IndustrialMek(MekData),
    ProtoMek(ProtoMekData),
    CombatVehicle(VehicleData),
    SupportVehicle(VehicleData),
    BattleArmor(BattleArmorData),
    Infantry(InfantryData),
    AerospaceFighter(AeroData),
    ConventionalFighter(AeroData),
    SmallCraft(AeroData),
    DropShip(DropShipData),
    JumpShip(CapitalData),
    WarShip(CapitalData),
    SpaceStation(CapitalData),
    Excluded { kind: ExcludedKind },
}

impl UnitKind {
    /// Squad size for battle armor, platoon size for infantry, 1 otherwise
    pub fn troopers(&self) -> u32 {
        match self {
            UnitKind::BattleArmor(ba) => ba.troopers,
            UnitKind::Infantry(inf) => inf.troopers,
            _ => 1,
        }
    }
}
