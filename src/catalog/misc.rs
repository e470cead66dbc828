//! Non-weapon equipment definitions
//!
//! The converter never type-checks equipment. It asks which capability
//! flags an item carries.

use serde::{Deserialize, Serialize};

/// Capability flags a misc item can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MiscFlag {
    // Electronic warfare
    Ecm,
    AngelEcm,
    LightEcm,
    BloodhoundProbe,
    ActiveProbe,
    LightProbe,
    Watchdog,
    Nova,
    // Networks
    C3Master,
    C3Slave,
    C3i,
    C3BoostedMaster,
    C3BoostedSlave,
    C3EmergencyMaster,
    NavalC3,
    C3RemoteSensor,
    // Protection
    Case,
    #[serde(rename = "case-ii")]
    CaseII,
    ModularArmor,
    Shield,
    Mimetic,
    LightMimetic,
    // Utility
    Searchlight,
    Mash,
    MobileHq,
    Hpg,
    DroneOs,
    DroneCarrier,
    Melee,
    Amphibious,
    Sealed,
    SpaceAdapted,
    Saw,
    Engineering,
    MineDispenser,
    // Damage and movement modifiers
    TargetingComputer,
    Masc,
    Supercharger,
    Aes,
    ArtemisIv,
    ArtemisV,
    Apollo,
    // Transport
    MekBay,
    ProtoMekBay,
    LightVehicleBay,
    HeavyVehicleBay,
    SuperHeavyVehicleBay,
    FighterBay,
    SmallCraftBay,
    InfantryBay,
    BattleArmorBay,
    CargoBay,
    DockingCollar,
}

/// One entry of the misc equipment table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiscDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub flags: Vec<MiscFlag>,
    /// Extra heat dissipation the item provides
    #[serde(default)]
    pub heat_dissipation: f64,
    /// Heat the item generates while active
    #[serde(default)]
    pub heat_load: f64,
}

impl MiscDef {
    pub fn new(id: impl Into<String>, flags: Vec<MiscFlag>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            flags,
            heat_dissipation: 0.0,
            heat_load: 0.0,
        }
    }

    pub fn with_heat_load(mut self, heat: f64) -> Self {
        self.heat_load = heat;
        self
    }

    pub fn with_heat_dissipation(mut self, heat: f64) -> Self {
        self.heat_dissipation = heat;
        self
    }

    pub fn has(&self, flag: MiscFlag) -> bool {
        self.flags.contains(&flag)
    }
}
