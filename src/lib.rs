//! Quickstrike - detailed combat unit to abstracted statblock conversion

pub mod catalog;
pub mod conversion;
pub mod core;
pub mod unit;

pub use catalog::EquipmentCatalog;
pub use conversion::{convert, Converter, Statblock};
pub use core::{CatalogError, ConvertError, ConverterConfig};
pub use unit::SourceUnit;
