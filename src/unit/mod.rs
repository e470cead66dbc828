//! Source unit model
//!
//! The immutable view of a detailed combat unit that the converter reads.

pub mod construction;
pub mod kind;
pub mod mounts;
pub mod source;

pub use construction::{
    ArmorType, EngineType, FireControl, HeatSinkType, HeatSinks, StructureType, TechBase,
};
pub use kind::{
    AeroData, BattleArmorData, CapitalData, CraftShape, DropShipData, ExcludedKind,
    InfantryData, InfantryMotive, MekConfig, MekData, MotiveType, ProtoMekData, UnitKind,
    VehicleData,
};
pub use mounts::{AmmoMount, CraftSide, CyclicRate, Location, MiscMount, WeaponMount};
pub use source::{Crew, LocationArmor, MovementPoints, SourceUnit};
