//! Stage 1: decide whether a unit has a statblock at all

use crate::core::error::ConvertError;
use crate::unit::{SourceUnit, UnitKind};

/// Reject excluded unit kinds before any other stage runs
pub fn check_eligible(unit: &SourceUnit) -> Result<(), ConvertError> {
    match &unit.kind {
        UnitKind::Excluded { kind } => Err(ConvertError::NotConvertible {
            unit: unit.name(),
            kind: *kind,
        }),
        _ => Ok(()),
    }
}

pub fn is_convertible(unit: &SourceUnit) -> bool {
    check_eligible(unit).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UnitIdentity;
    use crate::unit::{ExcludedKind, MekData};

    #[test]
    fn test_gun_emplacement_rejected() {
        let unit = SourceUnit::new(
            UnitIdentity::new("Bunker", "Mk II"),
            UnitKind::Excluded {
                kind: ExcludedKind::GunEmplacement,
            },
            40.0,
        );
        let err = check_eligible(&unit).unwrap_err();
        assert_eq!(
            err,
            ConvertError::NotConvertible {
                unit: "Bunker Mk II".into(),
                kind: ExcludedKind::GunEmplacement,
            }
        );
        assert!(!is_convertible(&unit));
    }

    #[test]
    fn test_mek_accepted() {
        let unit = SourceUnit::new(
            UnitIdentity::new("Atlas", "AS7-D"),
            UnitKind::Mek(MekData::default()),
            100.0,
        );
        assert!(is_convertible(&unit));
    }
}
