//! Construction properties of a source unit
//!
//! Armor, structure, engine and heat-sink categories. Each enum carries the
//! lookup the converter needs from it, so the tables sit next to the types.

use serde::{Deserialize, Serialize};

/// Technology base of the design
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TechBase {
    #[default]
    InnerSphere,
    Clan,
    Mixed,
}

/// Armor material
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArmorType {
    #[default]
    Standard,
    FerroFibrous,
    LightFerro,
    HeavyFerro,
    Industrial,
    /// Low-grade armor with a barrier rating below 10
    Commercial,
    Stealth,
    Reactive,
    Reflective,
    Hardened,
    FerroLamellor,
    FireResistant,
    BallisticReinforced,
    ImpactResistant,
    AntiPenetrativeAblation,
}

impl ArmorType {
    /// Weight applied to raw armor points before the /30 conversion
    pub fn armor_multiplier(&self) -> f64 {
        match self {
            ArmorType::Commercial => 0.5,
            ArmorType::FerroLamellor => 1.2,
            ArmorType::Hardened => 1.5,
            ArmorType::Reactive | ArmorType::Reflective => 0.75,
            _ => 1.0,
        }
    }

    /// Hardened plate costs a point of ground movement
    pub fn movement_penalty(&self) -> u32 {
        match self {
            ArmorType::Hardened => 1,
            _ => 0,
        }
    }
}

/// Internal structure material
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructureType {
    #[default]
    Standard,
    EndoSteel,
    EndoComposite,
    Composite,
    Reinforced,
    Industrial,
}

/// Engine family, as far as the structure table cares
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineType {
    #[default]
    Standard,
    Ice,
    FuelCell,
    Fission,
    Light,
    Xl,
    ClanXl,
    Xxl,
    Compact,
}

impl EngineType {
    /// Column in the mek structure table
    pub fn structure_column(&self) -> usize {
        match self {
            EngineType::Standard | EngineType::Ice | EngineType::FuelCell | EngineType::Fission => 0,
            EngineType::Light | EngineType::ClanXl => 1,
            EngineType::Xl => 2,
            EngineType::Xxl => 3,
            EngineType::Compact => 4,
        }
    }
}

/// Heat sink technology
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeatSinkType {
    #[default]
    Single,
    Double,
    Laser,
}

impl HeatSinkType {
    /// Heat points dissipated per sink per turn
    pub fn capacity(&self) -> u32 {
        match self {
            HeatSinkType::Single => 1,
            HeatSinkType::Double | HeatSinkType::Laser => 2,
        }
    }
}

/// Heat sinks installed on the unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatSinks {
    pub count: u32,
    #[serde(default)]
    pub kind: HeatSinkType,
}

impl HeatSinks {
    pub fn new(count: u32, kind: HeatSinkType) -> Self {
        Self { count, kind }
    }

    /// Total dissipation from sinks alone
    pub fn capacity(&self) -> u32 {
        self.count * self.kind.capacity()
    }
}

/// Fire control installed on industrial designs and support vehicles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FireControl {
    /// Military-grade fire control (all combat units)
    #[default]
    Advanced,
    Basic,
    None,
}
