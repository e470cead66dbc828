//! Stage 2: unit type and size class
//!
//! Size thresholds are inclusive upper bounds checked in ascending order;
//! the first ceiling the weight fits under wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::ConvertError;
use crate::unit::{CraftShape, MotiveType, SourceUnit, UnitKind};

/// Abstracted unit category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsUnitType {
    BattleMek,          // BM
    IndustrialMek,      // IM
    ProtoMek,           // PM
    CombatVehicle,      // CV
    SupportVehicle,     // SV
    BattleArmor,        // BA
    Infantry,           // CI
    AerospaceFighter,   // AF
    ConventionalFighter, // CF
    SmallCraft,         // SC
    DropShip,           // DS, spheroid
    AerodyneDropShip,   // DA
    JumpShip,           // JS
    WarShip,            // WS
    SpaceStation,       // SS
}

impl AsUnitType {
    pub fn code(&self) -> &'static str {
        match self {
            AsUnitType::BattleMek => "BM",
            AsUnitType::IndustrialMek => "IM",
            AsUnitType::ProtoMek => "PM",
            AsUnitType::CombatVehicle => "CV",
            AsUnitType::SupportVehicle => "SV",
            AsUnitType::BattleArmor => "BA",
            AsUnitType::Infantry => "CI",
            AsUnitType::AerospaceFighter => "AF",
            AsUnitType::ConventionalFighter => "CF",
            AsUnitType::SmallCraft => "SC",
            AsUnitType::DropShip => "DS",
            AsUnitType::AerodyneDropShip => "DA",
            AsUnitType::JumpShip => "JS",
            AsUnitType::WarShip => "WS",
            AsUnitType::SpaceStation => "SS",
        }
    }

    /// Only these categories compare weapon heat against sink capacity
    pub fn tracks_heat(&self) -> bool {
        matches!(
            self,
            AsUnitType::BattleMek | AsUnitType::IndustrialMek | AsUnitType::AerospaceFighter
        )
    }

    pub fn is_mek(&self) -> bool {
        matches!(self, AsUnitType::BattleMek | AsUnitType::IndustrialMek)
    }

    /// Craft that publish four firing arcs instead of front/rear
    pub fn is_large_craft(&self) -> bool {
        matches!(
            self,
            AsUnitType::DropShip
                | AsUnitType::AerodyneDropShip
                | AsUnitType::JumpShip
                | AsUnitType::WarShip
                | AsUnitType::SpaceStation
        )
    }

    pub fn is_capital(&self) -> bool {
        matches!(
            self,
            AsUnitType::JumpShip | AsUnitType::WarShip | AsUnitType::SpaceStation
        )
    }
}

impl fmt::Display for AsUnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which point-value formula family applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringFamily {
    Ground,
    Aerospace,
}

/// Output of the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub unit_type: AsUnitType,
    pub size: u8,
    pub family: ScoringFamily,
}

impl Classification {
    pub fn is_aerospace(&self) -> bool {
        self.family == ScoringFamily::Aerospace
    }

    /// Fighters and fixed-wing support vehicles: front and rear only
    pub fn is_fighter_like(&self) -> bool {
        self.is_aerospace() && !self.unit_type.is_large_craft()
    }
}

const MEK_SIZE_CEILINGS: [f64; 3] = [35.0, 55.0, 75.0];
const VEHICLE_SIZE_CEILINGS: [f64; 3] = [39.0, 59.0, 79.0];
const BATTLE_ARMOR_SIZE_CEILINGS: [f64; 3] = [0.8, 1.0, 1.5];
const FIGHTER_SIZE_CEILINGS: [f64; 2] = [45.0, 70.0];
const DROPSHIP_SIZE_CEILINGS: [f64; 2] = [2_499.0, 9_999.0];
const CAPITAL_SIZE_CEILINGS: [f64; 3] = [500_000.0, 800_000.0, 1_200_000.0];

/// Support vehicles below this weight are always size 1
const SMALL_SUPPORT_VEHICLE_LIMIT: f64 = 5.0;

/// First ceiling `value` fits under, as a 1-based size; one past the table otherwise
fn banded_size(value: f64, ceilings: &[f64]) -> u8 {
    ceilings
        .iter()
        .position(|ceiling| value <= *ceiling)
        .unwrap_or(ceilings.len()) as u8
        + 1
}

/// Medium and large weight ceilings for a support vehicle's propulsion
pub fn support_vehicle_ceilings(motive: MotiveType) -> (f64, f64) {
    match motive {
        MotiveType::Wheeled | MotiveType::Wige => (80.0, 160.0),
        MotiveType::Tracked => (100.0, 200.0),
        MotiveType::Hover => (50.0, 100.0),
        MotiveType::Vtol => (30.0, 60.0),
        MotiveType::Naval | MotiveType::Hydrofoil | MotiveType::Submarine => (300.0, 6_000.0),
        MotiveType::Airship => (300.0, 1_000.0),
        MotiveType::Rail => (300.0, 600.0),
        MotiveType::FixedWing => (200.0, 500.0),
    }
}

fn support_vehicle_size(weight: f64, motive: MotiveType) -> u8 {
    if weight < SMALL_SUPPORT_VEHICLE_LIMIT {
        return 1;
    }
    let (medium, large) = support_vehicle_ceilings(motive);
    1 + banded_size(weight, &[medium, large])
}

/// Classify a unit; excluded kinds get the same error eligibility reports
pub fn classify(unit: &SourceUnit) -> Result<Classification, ConvertError> {
    let weight = unit.weight;
    let (unit_type, size) = match &unit.kind {
        UnitKind::Mek(_) => (AsUnitType::BattleMek, banded_size(weight, &MEK_SIZE_CEILINGS)),
        UnitKind::IndustrialMek(_) => (
            AsUnitType::IndustrialMek,
            banded_size(weight, &MEK_SIZE_CEILINGS),
        ),
        UnitKind::ProtoMek(_) => (AsUnitType::ProtoMek, 1),
        UnitKind::CombatVehicle(_) => (
            AsUnitType::CombatVehicle,
            banded_size(weight, &VEHICLE_SIZE_CEILINGS),
        ),
        UnitKind::SupportVehicle(v) => (
            AsUnitType::SupportVehicle,
            support_vehicle_size(weight, v.motive),
        ),
        UnitKind::BattleArmor(ba) => (
            AsUnitType::BattleArmor,
            banded_size(ba.trooper_weight, &BATTLE_ARMOR_SIZE_CEILINGS),
        ),
        UnitKind::Infantry(_) => (AsUnitType::Infantry, 1),
        UnitKind::AerospaceFighter(_) => (
            AsUnitType::AerospaceFighter,
            banded_size(weight, &FIGHTER_SIZE_CEILINGS),
        ),
        UnitKind::ConventionalFighter(_) => (
            AsUnitType::ConventionalFighter,
            banded_size(weight, &FIGHTER_SIZE_CEILINGS),
        ),
        UnitKind::SmallCraft(_) => (AsUnitType::SmallCraft, 1),
        UnitKind::DropShip(ds) => {
            let unit_type = match ds.shape {
                CraftShape::Spheroid => AsUnitType::DropShip,
                CraftShape::Aerodyne => AsUnitType::AerodyneDropShip,
            };
            (unit_type, banded_size(weight, &DROPSHIP_SIZE_CEILINGS))
        }
        UnitKind::JumpShip(_) => (AsUnitType::JumpShip, banded_size(weight, &CAPITAL_SIZE_CEILINGS)),
        UnitKind::WarShip(_) => (AsUnitType::WarShip, banded_size(weight, &CAPITAL_SIZE_CEILINGS)),
        UnitKind::SpaceStation(_) => (
            AsUnitType::SpaceStation,
            banded_size(weight, &CAPITAL_SIZE_CEILINGS),
        ),
        UnitKind::Excluded { kind } => {
            return Err(ConvertError::NotConvertible {
                unit: unit.name(),
                kind: *kind,
            })
        }
    };

    let family = match (&unit.kind, unit_type) {
        (UnitKind::SupportVehicle(v), _) if v.motive == MotiveType::FixedWing => {
            ScoringFamily::Aerospace
        }
        (
            _,
            AsUnitType::AerospaceFighter
            | AsUnitType::ConventionalFighter
            | AsUnitType::SmallCraft
            | AsUnitType::DropShip
            | AsUnitType::AerodyneDropShip
            | AsUnitType::JumpShip
            | AsUnitType::WarShip
            | AsUnitType::SpaceStation,
        ) => ScoringFamily::Aerospace,
        _ => ScoringFamily::Ground,
    };

    Ok(Classification {
        unit_type,
        size,
        family,
    })
}
