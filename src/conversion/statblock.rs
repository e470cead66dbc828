//! The converted statblock
//!
//! Created fresh by each conversion and owned by the caller. Nothing in it
//! refers back to the source unit.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::abilities::{Ability, AbilityRegistry, AbilityValue};
use super::classifier::AsUnitType;
use super::constants::DEFAULT_SKILL;
use super::damage::{BucketLocation, DamageBands};
use super::movement::MovementProfile;
use super::points::adjusted_point_value;
use crate::core::UnitIdentity;

/// Rounded damage for one non-standard bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDamage {
    pub location: BucketLocation,
    pub damage: DamageBands,
    /// CAP, SCAP and MSL fired from this arc; large craft only
    #[serde(default, skip_serializing_if = "AbilityRegistry::is_empty")]
    pub capital: AbilityRegistry,
}

/// Abstracted per-unit combat record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statblock {
    #[serde(flatten)]
    pub identity: UnitIdentity,
    pub unit_type: AsUnitType,
    pub size: u8,
    pub movement: MovementProfile,
    /// Target movement modifier; absent for aerospace units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmm: Option<u8>,
    pub armor: u32,
    pub structure: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
    pub damage: DamageBands,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<LocationDamage>,
    pub overheat: u8,
    #[serde(default)]
    pub overheat_long: bool,
    pub abilities: AbilityRegistry,
    pub point_value: u32,
    pub skill: u8,
    pub adjusted_point_value: u32,
}

impl Statblock {
    pub fn name(&self) -> String {
        self.identity.full_name()
    }

    pub fn has_ability(&self, tag: Ability) -> bool {
        self.abilities.contains(tag)
    }

    pub fn ability(&self, tag: Ability) -> Option<&AbilityValue> {
        self.abilities.get(tag)
    }

    pub fn location(&self, location: BucketLocation) -> Option<&DamageBands> {
        self.arc(location).map(|l| &l.damage)
    }

    /// Full entry for a non-standard bucket, capital tags included
    pub fn arc(&self, location: BucketLocation) -> Option<&LocationDamage> {
        self.locations.iter().find(|l| l.location == location)
    }

    /// Same statblock fielded with a different crew skill
    pub fn with_skill(mut self, skill: u8) -> Self {
        self.skill = skill;
        self.adjusted_point_value = adjusted_point_value(self.point_value, skill);
        self
    }
}

impl fmt::Display for Statblock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}{}] MV {}",
            self.name(),
            self.unit_type,
            self.size,
            self.movement
        )?;
        if let Some(tmm) = self.tmm {
            write!(f, " TMM {}", tmm)?;
        }
        write!(f, " A/S {}/{}", self.armor, self.structure)?;
        if let Some(threshold) = self.threshold {
            write!(f, " TH {}", threshold)?;
        }
        write!(f, " DMG {} OV {}", self.damage, self.overheat)?;
        if self.overheat_long {
            f.write_str(" OVL")?;
        }
        write!(f, " PV {}", self.point_value)?;
        if self.skill != DEFAULT_SKILL {
            write!(f, " ({} at skill {})", self.adjusted_point_value, self.skill)?;
        }
        if !self.abilities.is_empty() {
            write!(f, " | {}", self.abilities)?;
        }
        Ok(())
    }
}
