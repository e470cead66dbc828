//! Damage vectors and location buckets
//!
//! Raw damage stays in `f64` through aggregation and heat adjustment. Only
//! `FinalDamage::from_raw` rounds, once, when the statblock is assembled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

use super::constants::MINIMAL_DAMAGE_CREDIT;
use crate::core::types::{round_tenth, round_up};

/// Range bands, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RangeBand {
    Short,
    Medium,
    Long,
    Extreme,
}

impl RangeBand {
    pub const ALL: [RangeBand; 4] = [
        RangeBand::Short,
        RangeBand::Medium,
        RangeBand::Long,
        RangeBand::Extreme,
    ];
}

/// Damage per range band
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageVector {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
    #[serde(default)]
    pub extreme: f64,
}

impl DamageVector {
    pub const ZERO: DamageVector = DamageVector {
        short: 0.0,
        medium: 0.0,
        long: 0.0,
        extreme: 0.0,
    };

    pub fn new(short: f64, medium: f64, long: f64) -> Self {
        Self {
            short,
            medium,
            long,
            extreme: 0.0,
        }
    }

    pub fn with_extreme(short: f64, medium: f64, long: f64, extreme: f64) -> Self {
        Self {
            short,
            medium,
            long,
            extreme,
        }
    }

    pub fn band(&self, band: RangeBand) -> f64 {
        match band {
            RangeBand::Short => self.short,
            RangeBand::Medium => self.medium,
            RangeBand::Long => self.long,
            RangeBand::Extreme => self.extreme,
        }
    }

    fn band_mut(&mut self, band: RangeBand) -> &mut f64 {
        match band {
            RangeBand::Short => &mut self.short,
            RangeBand::Medium => &mut self.medium,
            RangeBand::Long => &mut self.long,
            RangeBand::Extreme => &mut self.extreme,
        }
    }

    /// Every band multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            short: self.short * factor,
            medium: self.medium * factor,
            long: self.long * factor,
            extreme: self.extreme * factor,
        }
    }

    /// Bands up to and including `last` multiplied by `factor`
    pub fn scaled_through(&self, factor: f64, last: RangeBand) -> Self {
        let mut out = *self;
        for band in RangeBand::ALL.into_iter().filter(|b| *b <= last) {
            *out.band_mut(band) *= factor;
        }
        out
    }

    pub fn is_zero(&self) -> bool {
        RangeBand::ALL.iter().all(|b| self.band(*b) == 0.0)
    }

    pub fn is_non_negative(&self) -> bool {
        RangeBand::ALL.iter().all(|b| self.band(*b) >= 0.0)
    }
}

impl Add for DamageVector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            short: self.short + rhs.short,
            medium: self.medium + rhs.medium,
            long: self.long + rhs.long,
            extreme: self.extreme + rhs.extreme,
        }
    }
}

impl AddAssign for DamageVector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// A finalized band value: an integer, or minimal damage ("0*")
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalDamage {
    pub value: u32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub minimal: bool,
}

/// Raw damage below this (but above zero) is published as minimal damage
const MINIMAL_DAMAGE_CEILING: f64 = 0.5;

impl FinalDamage {
    pub const ZERO: FinalDamage = FinalDamage {
        value: 0,
        minimal: false,
    };

    /// Settle to a tenth, then round up; tiny positive values become "0*"
    pub fn from_raw(raw: f64) -> Self {
        debug_assert!(raw >= 0.0, "negative damage reached finalization: {raw}");
        let settled = round_tenth(raw.max(0.0));
        if settled > 0.0 && settled < MINIMAL_DAMAGE_CEILING {
            Self {
                value: 0,
                minimal: true,
            }
        } else {
            Self {
                value: round_up(settled) as u32,
                minimal: false,
            }
        }
    }

    /// Value used by the point-value formulas; minimal damage counts half
    pub fn credit(&self) -> f64 {
        if self.minimal {
            MINIMAL_DAMAGE_CREDIT
        } else {
            self.value as f64
        }
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0 && !self.minimal
    }
}

impl fmt::Display for FinalDamage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minimal {
            f.write_str("0*")
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// Rounded damage per band as printed on the statblock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageBands {
    pub short: FinalDamage,
    pub medium: FinalDamage,
    pub long: FinalDamage,
    /// Only aerospace units publish an extreme band
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extreme: Option<FinalDamage>,
}

impl DamageBands {
    pub fn from_vector(raw: &DamageVector, with_extreme: bool) -> Self {
        Self {
            short: FinalDamage::from_raw(raw.short),
            medium: FinalDamage::from_raw(raw.medium),
            long: FinalDamage::from_raw(raw.long),
            extreme: with_extreme.then(|| FinalDamage::from_raw(raw.extreme)),
        }
    }

    pub fn extreme_or_zero(&self) -> FinalDamage {
        self.extreme.unwrap_or(FinalDamage::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.short.is_zero()
            && self.medium.is_zero()
            && self.long.is_zero()
            && self.extreme_or_zero().is_zero()
    }
}

impl fmt::Display for DamageBands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.short, self.medium, self.long)?;
        if let Some(extreme) = self.extreme {
            write!(f, "/{}", extreme)?;
        }
        Ok(())
    }
}

/// Where a bucket's damage is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BucketLocation {
    /// Forward damage of ground units and fighters
    Standard,
    Rear,
    Turret,
    Nose,
    LeftSide,
    RightSide,
    Aft,
}

impl BucketLocation {
    pub fn code(&self) -> &'static str {
        match self {
            BucketLocation::Standard => "STD",
            BucketLocation::Rear => "REAR",
            BucketLocation::Turret => "TUR",
            BucketLocation::Nose => "NOSE",
            BucketLocation::LeftSide => "LS",
            BucketLocation::RightSide => "RS",
            BucketLocation::Aft => "AFT",
        }
    }
}

/// Weapon families tracked as sub-totals inside a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DamageClass {
    Autocannon,
    Lrm,
    Srm,
    Flak,
    Torpedo,
    Heat,
    Capital,
    SubCapital,
    CapitalMissile,
}

/// Accumulated damage for one delivery location
#[derive(Debug, Clone, PartialEq)]
pub struct LocationBucket {
    pub location: BucketLocation,
    /// Normal buckets feed the headline damage and class abilities
    pub normal: bool,
    pub damage: DamageVector,
    /// Class sub-totals in first-seen order
    pub classes: Vec<(DamageClass, DamageVector)>,
    /// Long-range damage from indirect-fire weapons
    pub indirect: f64,
}

impl LocationBucket {
    pub fn new(location: BucketLocation, normal: bool) -> Self {
        Self {
            location,
            normal,
            damage: DamageVector::ZERO,
            classes: Vec::new(),
            indirect: 0.0,
        }
    }

    pub fn add_class(&mut self, class: DamageClass, damage: DamageVector) {
        match self.classes.iter_mut().find(|(c, _)| *c == class) {
            Some((_, total)) => *total += damage,
            None => self.classes.push((class, damage)),
        }
    }

    /// Sub-total for a class, zero when the class never appeared
    pub fn class(&self, class: DamageClass) -> DamageVector {
        self.classes
            .iter()
            .find(|(c, _)| *c == class)
            .map(|(_, d)| *d)
            .unwrap_or(DamageVector::ZERO)
    }

    /// Scale damage and class sub-totals through `last`; indirect on request
    pub fn scale_through(&mut self, factor: f64, last: RangeBand, include_indirect: bool) {
        self.damage = self.damage.scaled_through(factor, last);
        for (_, total) in &mut self.classes {
            *total = total.scaled_through(factor, last);
        }
        if include_indirect {
            self.indirect *= factor;
        }
    }
}
