//! Unit conversion pipeline
//!
//! Stages run in a fixed order over a borrowed source unit:
//! eligibility, classification, movement, durability, weapon aggregation,
//! heat, abilities, points. Each stage is a pure function of the unit, the
//! catalog and the outputs of earlier stages.

pub mod abilities;
pub mod classifier;
pub mod constants;
pub mod damage;
pub mod eligibility;
pub mod heat;
pub mod loadout;
pub mod movement;
pub mod points;
pub mod specials;
pub mod statblock;
pub mod structure;
pub mod weapons;

pub use abilities::{Ability, AbilityEntry, AbilityRegistry, AbilityValue};
pub use classifier::{classify, AsUnitType, Classification, ScoringFamily};
pub use damage::{BucketLocation, DamageBands, DamageVector, FinalDamage, RangeBand};
pub use eligibility::{check_eligible, is_convertible};
pub use heat::HeatProfile;
pub use movement::{MoveEntry, MoveMode, MovementProfile};
pub use points::{adjusted_point_value, PointBreakdown};
pub use statblock::{LocationDamage, Statblock};
pub use structure::Durability;

use rayon::prelude::*;

use crate::catalog::EquipmentCatalog;
use crate::core::{ConvertError, ConverterConfig};
use crate::unit::SourceUnit;

/// Converts source units against one equipment catalog
///
/// Holds no mutable state; one converter can be shared across threads.
#[derive(Debug, Clone)]
pub struct Converter<'a> {
    catalog: &'a EquipmentCatalog,
    config: ConverterConfig,
}

impl<'a> Converter<'a> {
    pub fn new(catalog: &'a EquipmentCatalog) -> Self {
        Self::with_config(catalog, ConverterConfig::default())
    }

    pub fn with_config(catalog: &'a EquipmentCatalog, config: ConverterConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert one unit, or report why it has no statblock
    pub fn convert(&self, unit: &SourceUnit) -> Result<Statblock, ConvertError> {
        eligibility::check_eligible(unit)?;
        let classification = classify(unit)?;
        let strict = self.config.strict_lookups;

        let loadout = loadout::Loadout::resolve(unit, self.catalog, strict);
        let movement = movement::resolve_movement(unit, &loadout);
        let tmm = movement::target_movement_modifier(&movement, &classification);
        let durability = structure::resolve_durability(unit, &classification, &loadout);

        let mut totals =
            weapons::aggregate_weapons(unit, &classification, self.catalog, &loadout, strict);
        let heat = heat::apply_heat(&mut totals, unit, &classification, &loadout);

        let mut upstream = std::mem::take(&mut totals.abilities);
        upstream.merge(weapons::class_abilities(&totals, &classification));
        let abilities = specials::derive_abilities(unit, &loadout, &totals, upstream);

        let aerospace = classification.is_aerospace();
        let damage = DamageBands::from_vector(&totals.headline(), aerospace);
        let locations = weapons::location_damage(&totals, &classification);

        let points = points::score(&points::ScoreInput {
            classification: &classification,
            damage: &damage,
            movement: &movement,
            tmm,
            durability: &durability,
            heat: &heat,
            abilities: &abilities,
            locations: &locations,
            fire_control: unit.fire_control,
        });
        let skill = unit
            .crew
            .map(|crew| crew.gunnery)
            .unwrap_or(self.config.default_skill);

        Ok(Statblock {
            identity: unit.identity.clone(),
            unit_type: classification.unit_type,
            size: classification.size,
            movement,
            tmm,
            armor: durability.armor,
            structure: durability.structure,
            threshold: durability.threshold,
            damage,
            locations,
            overheat: heat.overheat,
            overheat_long: heat.overheat_long,
            abilities,
            point_value: points.point_value,
            skill,
            adjusted_point_value: adjusted_point_value(points.point_value, skill),
        })
    }

    /// Convert many units; results keep input order
    pub fn convert_batch(&self, units: &[SourceUnit]) -> Vec<Result<Statblock, ConvertError>> {
        if units.len() >= self.config.parallel_threshold {
            units.par_iter().map(|unit| self.convert(unit)).collect()
        } else {
            units.iter().map(|unit| self.convert(unit)).collect()
        }
    }
}

/// Convert one unit with the default configuration
pub fn convert(unit: &SourceUnit, catalog: &EquipmentCatalog) -> Result<Statblock, ConvertError> {
    Converter::new(catalog).convert(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{WeaponClass, WeaponDef};
    use crate::core::UnitIdentity;
    use crate::unit::{
        Crew, ExcludedKind, HeatSinkType, HeatSinks, Location, MekData, UnitKind, WeaponMount,
    };

    fn catalog() -> EquipmentCatalog {
        EquipmentCatalog::from_defs(
            vec![WeaponDef::new(
                "medium-laser",
                WeaponClass::Energy,
                DamageVector::new(0.5, 0.5, 0.0),
                3.0,
            )],
            vec![],
        )
        .unwrap()
    }

    fn mek(name: &str, lasers: usize) -> SourceUnit {
        let mut unit = SourceUnit::new(
            UnitIdentity::new(name, ""),
            UnitKind::Mek(MekData::default()),
            20.0,
        )
        .with_movement(6, 0)
        .with_armor(Location::CenterTorso, 40, 0, 6)
        .with_heat_sinks(HeatSinks::new(10, HeatSinkType::Double));
        for _ in 0..lasers {
            unit = unit.with_weapon(WeaponMount::new("medium-laser", Location::CenterTorso));
        }
        unit
    }

    #[test]
    fn test_excluded_unit_short_circuits() {
        let catalog = catalog();
        let unit = SourceUnit::new(
            UnitIdentity::new("Pod", ""),
            UnitKind::Excluded {
                kind: ExcludedKind::EjectedCrew,
            },
            1.0,
        );
        let err = convert(&unit, &catalog).unwrap_err();
        assert!(matches!(err, ConvertError::NotConvertible { kind: ExcludedKind::EjectedCrew, .. }));
    }

    #[test]
    fn test_crew_skill_drives_adjusted_value() {
        let catalog = catalog();
        let mut unit = mek("Locust", 2);
        let base = convert(&unit, &catalog).unwrap();
        assert_eq!(base.skill, 4);
        assert_eq!(base.adjusted_point_value, base.point_value);

        unit.crew = Some(Crew {
            gunnery: 2,
            piloting: 3,
        });
        let elite = convert(&unit, &catalog).unwrap();
        assert_eq!(elite.skill, 2);
        assert!(elite.adjusted_point_value > elite.point_value);
    }

    #[test]
    fn test_batch_keeps_order_on_both_paths() {
        let catalog = catalog();
        let units: Vec<_> = (0..8).map(|i| mek(&format!("Unit {i}"), i)).collect();

        let serial = Converter::new(&catalog).convert_batch(&units);
        let config = ConverterConfig {
            parallel_threshold: 1,
            ..Default::default()
        };
        let parallel = Converter::with_config(&catalog, config).convert_batch(&units);

        assert_eq!(serial, parallel);
        for (i, result) in parallel.iter().enumerate() {
            assert_eq!(result.as_ref().unwrap().identity.chassis, format!("Unit {i}"));
        }
    }
}
