use thiserror::Error;

use crate::unit::ExcludedKind;

/// Outcome of a conversion call that produced no statblock.
///
/// This is an expected result, not a fault: the unit simply has no
/// counterpart in the abstracted ruleset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("{unit} is not convertible: {kind} units have no statblock")]
    NotConvertible { unit: String, kind: ExcludedKind },
}

/// Errors raised while loading the equipment catalog or unit files.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Duplicate equipment id: {0}")]
    DuplicateId(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
