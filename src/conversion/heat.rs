//! Stage 6: heat adjustment
//!
//! Units that track heat compare weapon and movement heat against their sink
//! capacity. Within the buffer nothing changes, bit for bit.

use serde::{Deserialize, Serialize};

use super::classifier::Classification;
use super::constants::{HEAT_BUFFER, MAX_OVERHEAT, MIN_JUMP_HEAT, RUN_HEAT};
use super::damage::RangeBand;
use super::loadout::Loadout;
use super::weapons::{scale_buckets, WeaponTotals};
use crate::core::types::{round_tenth, round_up};
use crate::unit::SourceUnit;

/// Outcome of the heat stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatProfile {
    /// Overheat rating, 0 to 4
    pub overheat: u8,
    /// Overheat also applies at long range
    pub overheat_long: bool,
    /// Scale factor applied to damage, when heat exceeded capacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<f64>,
}

/// Heat sink capacity plus dissipation from equipment
pub fn heat_capacity(unit: &SourceUnit, loadout: &Loadout<'_>) -> f64 {
    unit.heat_sinks.capacity() as f64 + loadout.heat_dissipation()
}

/// Heat generated by moving: the worse of running and jumping
pub fn movement_heat(unit: &SourceUnit, classification: &Classification) -> f64 {
    if !classification.unit_type.is_mek() {
        return 0.0;
    }
    let jump = unit.movement.jump;
    if jump > 0 {
        RUN_HEAT.max(MIN_JUMP_HEAT.max(jump as f64))
    } else {
        RUN_HEAT
    }
}

fn finalized(value: f64) -> f64 {
    round_up(round_tenth(value))
}

/// Rounding delta between unscaled and scaled damage
fn rounding_delta(damage: f64, factor: f64) -> f64 {
    finalized(damage) - finalized(damage * factor)
}

/// Scale factor when `heat` exceeds capacity by more than the buffer
fn excess_factor(heat: f64, capacity: f64) -> Option<f64> {
    let effective = heat - HEAT_BUFFER;
    (effective > capacity).then(|| capacity / effective)
}

/// Adjust damage for insufficient heat dissipation
pub fn apply_heat(
    totals: &mut WeaponTotals,
    unit: &SourceUnit,
    classification: &Classification,
    loadout: &Loadout<'_>,
) -> HeatProfile {
    if !classification.unit_type.tracks_heat() {
        return HeatProfile::default();
    }

    let capacity = heat_capacity(unit, loadout);
    let base_heat = movement_heat(unit, classification) + loadout.heat_load();
    let Some(factor) = excess_factor(totals.heat_medium + base_heat, capacity) else {
        return HeatProfile::default();
    };

    let headline = totals.headline();
    let overheat = rounding_delta(headline.medium, factor).clamp(0.0, MAX_OVERHEAT) as u8;

    let overheat_long = overheat > 0
        && excess_factor(totals.heat_long + base_heat, capacity)
            .map(|long_factor| rounding_delta(headline.long, long_factor) > 0.0)
            .unwrap_or(false);

    if overheat_long {
        scale_buckets(totals, factor, RangeBand::Extreme, true);
    } else {
        scale_buckets(totals, factor, RangeBand::Medium, false);
    }

    debug_assert!(totals.is_non_negative(), "negative damage after heat adjustment");
    HeatProfile {
        overheat,
        overheat_long,
        factor: Some(factor),
    }
}
