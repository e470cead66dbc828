//! Ruleset constants - every fixed conversion number in one place
//!
//! These encode tabletop balance decisions. They are not configuration and
//! are never tuned at runtime.

// Heat
pub const HEAT_BUFFER: f64 = 4.0;
pub const MAX_OVERHEAT: f64 = 4.0;
pub const RUN_HEAT: f64 = 2.0;
pub const MIN_JUMP_HEAT: f64 = 3.0;

// Weapon damage modifiers
pub const AMMO_TURNS_REQUIRED: f64 = 10.0;
pub const LOW_AMMO_MULTIPLIER: f64 = 0.75;
pub const ONE_SHOT_MULTIPLIER: f64 = 0.1;
pub const TARGETING_COMPUTER_MULTIPLIER: f64 = 1.1;
pub const AES_MULTIPLIER: f64 = 1.05;
pub const ARTEMIS_IV_MULTIPLIER: f64 = 1.2;
pub const ARTEMIS_V_MULTIPLIER: f64 = 1.3;
pub const APOLLO_MULTIPLIER: f64 = 1.1;
pub const MML_MEDIUM_SPLIT: f64 = 0.5;

// Derived ability thresholds
pub const CLASS_ABILITY_FLOOR: f64 = 1.0;
pub const REAR_ABILITY_FLOOR: f64 = 1.0;
pub const HOT_TIER_ONE: f64 = 0.5;
pub const HOT_TIER_TWO: f64 = 1.5;
pub const AMS_POINT_DEFENSE: f64 = 0.3;

// Infantry firepower
pub const INFANTRY_DAMAGE_DIVISOR: f64 = 10.0;
pub const INFANTRY_MEDIUM_RANGE: u32 = 4;
pub const INFANTRY_LONG_RANGE: u32 = 13;

// Movement
pub const INCHES_PER_MP: u32 = 2;
pub const SINGLE_BOOST_MULTIPLIER: f64 = 1.25;
pub const DOUBLE_BOOST_MULTIPLIER: f64 = 1.5;

// Armor and structure
pub const ARMOR_POINTS_PER_PIP: f64 = 30.0;
pub const MODULAR_ARMOR_POINTS: f64 = 10.0;
pub const CAPITAL_ARMOR_MULTIPLIER: f64 = 0.33;
pub const VEHICLE_STRUCTURE_DIVISOR: f64 = 10.0;
pub const AERO_STRUCTURE_MULTIPLIER: f64 = 0.5;
pub const CAPITAL_STRUCTURE_MULTIPLIER: f64 = 0.66;
pub const SMALL_CRAFT_STRUCTURE: u32 = 2;
pub const THRESHOLD_DIVISOR: f64 = 3.0;
pub const LARGE_CRAFT_THRESHOLD_DIVISOR: f64 = 4.0;

// Point value: offense
pub const DEFAULT_SKILL: u8 = 4;
pub const MINIMAL_DAMAGE_CREDIT: f64 = 0.5;
pub const OVERHEAT_CREDIT: f64 = 0.5;
pub const OVERHEAT_LONG_CREDIT: f64 = 1.0;
pub const BASIC_FIRE_CONTROL_PENALTY: f64 = 0.1;
pub const NO_FIRE_CONTROL_PENALTY: f64 = 0.2;
pub const SHIELD_PENALTY: f64 = 0.1;
pub const DRONE_PENALTY: f64 = 0.1;
pub const MEK_SIZE_BONUS_PER_CLASS: f64 = 0.5;
pub const AERO_EXTREME_WEIGHT: f64 = 0.5;
pub const CAPITAL_SECONDARY_ARC_WEIGHT: f64 = 0.5;

// Point value: defense
pub const JUMP_MOVE_BONUS: f64 = 0.5;
pub const DEFENSE_FACTOR_BREAK: f64 = 2.0;
pub const DEFENSE_FACTOR_LOW_SLOPE: f64 = 0.05;
pub const DEFENSE_FACTOR_HIGH_BASE: f64 = 1.1;
pub const DEFENSE_FACTOR_HIGH_SLOPE: f64 = 0.1;
pub const AERO_THRUST_WEIGHT: f64 = 0.25;
pub const AERO_THRESHOLD_WEIGHT: f64 = 0.1;

// Point value: after the subtotal
pub const BRAWLER_MAX_MOVE: u32 = 6;
pub const BRAWLER_MALUS: f64 = 1.0;
pub const AGILE_MIN_TMM: u8 = 2;
pub const NETWORK_BONUS_FRACTION: f64 = 0.05;
pub const MHQ_BONUS_PER_POINT: f64 = 0.5;
