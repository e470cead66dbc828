//! Equipment catalog
//!
//! A data-driven table of weapon and misc definitions keyed by id. Mounts on
//! a source unit reference these ids; the converter resolves them here.

pub mod misc;
pub mod registry;
pub mod weapon;

pub use misc::{MiscDef, MiscFlag};
pub use registry::{CatalogFile, EquipmentCatalog};
pub use weapon::{AmmoUse, ArtilleryKind, SpecialWeapon, WeaponClass, WeaponDef};
