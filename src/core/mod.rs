pub mod config;
pub mod error;
pub mod types;

pub use config::ConverterConfig;
pub use error::{CatalogError, ConvertError};
pub use types::{round_half, round_tenth, round_up, UnitIdentity};
