//! Converter configuration with documented defaults
//!
//! Ruleset constants live in `conversion::constants` and are not tunable.
//! This struct only covers how the engine is driven, never what it computes.

use serde::{Deserialize, Serialize};

/// Configuration for a [`Converter`](crate::conversion::Converter)
///
/// There is no global instance. Callers build one (or take the default)
/// and hand it to the converter explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Minimum batch size before `convert_batch` fans out over rayon
    ///
    /// A single conversion is a few microseconds of arithmetic, so small
    /// batches finish faster on the calling thread.
    pub parallel_threshold: usize,

    /// Skill rating assumed when a unit carries no crew record
    ///
    /// 4 is the ruleset baseline at which the skill-adjusted point value
    /// equals the base point value.
    pub default_skill: u8,

    /// Log unresolved equipment ids at `error` instead of `warn`
    ///
    /// Unknown equipment is skipped either way; this only raises the
    /// volume for catalog maintenance runs.
    pub strict_lookups: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
            default_skill: 4,
            strict_lookups: false,
        }
    }
}

impl ConverterConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.parallel_threshold == 0 {
            return Err("parallel_threshold must be at least 1".into());
        }

        if self.default_skill > 8 {
            return Err(format!(
                "default_skill ({}) must be between 0 and 8",
                self.default_skill
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConverterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = ConverterConfig {
            parallel_threshold: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_skill_out_of_range_rejected() {
        let config = ConverterConfig {
            default_skill: 9,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ConverterConfig = toml::from_str("default_skill = 3").unwrap();
        assert_eq!(config.default_skill, 3);
        assert_eq!(config.parallel_threshold, 64);
    }
}
