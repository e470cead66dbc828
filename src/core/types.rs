//! Core type definitions used throughout the codebase
//!
//! The three rounding policies are defined here so every stage uses the
//! same arithmetic. Which policy applies is fixed per stage:
//! - `round_up` finalizes damage, heat deltas and ability values
//! - `round_tenth` settles damage sums and offensive/defensive values
//! - `round_half` settles the defense interaction rating

use serde::{Deserialize, Serialize};

/// Identity fields copied verbatim from the source unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitIdentity {
    pub chassis: String,
    pub model: String,
    /// Master unit list id, when the unit has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mul_id: Option<u32>,
}

impl UnitIdentity {
    pub fn new(chassis: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            chassis: chassis.into(),
            model: model.into(),
            mul_id: None,
        }
    }

    /// "Chassis Model", or just the chassis when the model is blank
    pub fn full_name(&self) -> String {
        if self.model.is_empty() {
            self.chassis.clone()
        } else {
            format!("{} {}", self.chassis, self.model)
        }
    }
}

/// Up-biased rounding: add 0.4, then round to the nearest integer
///
/// Applied to values already settled to a tenth, this is a ceiling that
/// ignores float noise below 0.1.
pub fn round_up(value: f64) -> f64 {
    (value + 0.4).round()
}

/// Round to the nearest tenth
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to the nearest half
pub fn round_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}
