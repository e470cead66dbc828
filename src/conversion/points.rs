//! Stage 8: point value
//!
//! Offense and defense come from one of two formula families. Bonuses and
//! maluses are applied to their sum. Offense, defense and the subtotal
//! settle to a tenth; the damage-infliction rating settles to a half.

use serde::{Deserialize, Serialize};

use super::abilities::{Ability, AbilityRegistry, AbilityValue};
use super::classifier::{AsUnitType, Classification, ScoringFamily};
use super::constants::{
    AERO_EXTREME_WEIGHT, AERO_THRESHOLD_WEIGHT, AERO_THRUST_WEIGHT, AGILE_MIN_TMM,
    BASIC_FIRE_CONTROL_PENALTY, BRAWLER_MALUS, BRAWLER_MAX_MOVE, CAPITAL_SECONDARY_ARC_WEIGHT,
    DEFAULT_SKILL,
    DEFENSE_FACTOR_BREAK, DEFENSE_FACTOR_HIGH_BASE, DEFENSE_FACTOR_HIGH_SLOPE,
    DEFENSE_FACTOR_LOW_SLOPE, DRONE_PENALTY, JUMP_MOVE_BONUS, MEK_SIZE_BONUS_PER_CLASS,
    MHQ_BONUS_PER_POINT, NETWORK_BONUS_FRACTION, NO_FIRE_CONTROL_PENALTY, OVERHEAT_CREDIT,
    OVERHEAT_LONG_CREDIT, SHIELD_PENALTY,
};
use super::damage::DamageBands;
use super::heat::HeatProfile;
use super::statblock::LocationDamage;
use super::movement::MovementProfile;
use super::structure::Durability;
use crate::core::types::{round_half, round_tenth};
use crate::unit::FireControl;

/// Offense per artillery piece
const ARTILLERY_VALUES: &[(Ability, f64)] = &[
    (Ability::ArtAis, 12.0),
    (Ability::ArtAc, 12.0),
    (Ability::ArtBa, 7.0),
    (Ability::ArtCm5, 5.0),
    (Ability::ArtCm7, 7.0),
    (Ability::ArtCm9, 9.0),
    (Ability::ArtCm12, 12.0),
    (Ability::ArtLt, 10.0),
    (Ability::ArtLtc, 10.0),
    (Ability::ArtS, 6.0),
    (Ability::ArtSc, 6.0),
    (Ability::ArtT, 4.0),
    (Ability::ArtTc, 4.0),
];

const OFFENSIVE_SPECIALS: &[(Ability, f64)] = &[
    (Ability::Snarc, 1.0),
    (Ability::Inarc, 1.0),
    (Ability::Tag, 0.5),
    (Ability::Ltag, 0.25),
    (Ability::Tsemp, 5.0),
    (Ability::Mel, 0.5),
];

const DEFENSIVE_SPECIALS: &[(Ability, f64)] = &[
    (Ability::Ams, 1.0),
    (Ability::Rca, 0.75),
    (Ability::Rfa, 0.75),
    (Ability::Aba, 0.5),
    (Ability::Bra, 0.5),
    (Ability::Ira, 0.5),
    (Ability::Fr, 0.5),
    (Ability::Cr, 0.25),
    (Ability::Shld, 1.0),
];

const FORCE_BONUSES: &[(Ability, f64)] = &[
    (Ability::Stl, 1.0),
    (Ability::Mas, 1.0),
    (Ability::Rcn, 2.0),
    (Ability::Ecm, 1.0),
    (Ability::Aecm, 1.5),
    (Ability::Lecm, 0.5),
    (Ability::Prb, 1.0),
    (Ability::Bh, 1.5),
    (Ability::Lprb, 0.5),
    (Ability::Wat, 1.0),
    (Ability::Nova, 1.0),
];

const CAPITAL_TAGS: &[Ability] = &[Ability::Cap, Ability::Scap, Ability::Msl];

/// Abilities that keep a slow short-ranged unit from counting as a brawler
const BRAWLER_EXEMPT: &[Ability] = &[
    Ability::If,
    Ability::Tag,
    Ability::Ltag,
    Ability::Snarc,
    Ability::Inarc,
];

/// Everything the scorer reads, borrowed from earlier stages
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput<'a> {
    pub classification: &'a Classification,
    pub damage: &'a DamageBands,
    pub movement: &'a MovementProfile,
    pub tmm: Option<u8>,
    pub durability: &'a Durability,
    pub heat: &'a HeatProfile,
    pub abilities: &'a AbilityRegistry,
    /// Non-standard buckets, with per-arc capital tags on large craft
    pub locations: &'a [LocationDamage],
    pub fire_control: FireControl,
}

/// Components of the final point value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointBreakdown {
    pub offense: f64,
    pub defense: f64,
    pub agile: f64,
    pub brawler: f64,
    pub force: f64,
    pub network: f64,
    pub point_value: u32,
}

impl PointBreakdown {
    pub fn subtotal(&self) -> f64 {
        self.offense + self.defense
    }
}

/// Count for integer-valued tags, 1 for a bare flag, 0 when absent
fn multiplicity(abilities: &AbilityRegistry, tag: Ability) -> f64 {
    match abilities.get(tag) {
        Some(AbilityValue::Integer(n)) => *n as f64,
        Some(_) => 1.0,
        None => 0.0,
    }
}

fn table_sum(abilities: &AbilityRegistry, table: &[(Ability, f64)]) -> f64 {
    table
        .iter()
        .map(|(tag, value)| multiplicity(abilities, *tag) * value)
        .sum()
}

/// Piecewise-linear factor on the damage-infliction rating
pub fn defense_factor(score: f64) -> f64 {
    if score <= DEFENSE_FACTOR_BREAK {
        1.0 + DEFENSE_FACTOR_LOW_SLOPE * score
    } else {
        DEFENSE_FACTOR_HIGH_BASE + DEFENSE_FACTOR_HIGH_SLOPE * (score - DEFENSE_FACTOR_BREAK)
    }
}

/// Armor and structure weights for ground units
fn ground_dir_multipliers(unit_type: AsUnitType) -> (f64, f64) {
    match unit_type {
        AsUnitType::BattleMek | AsUnitType::IndustrialMek | AsUnitType::ProtoMek => (2.0, 1.0),
        AsUnitType::CombatVehicle | AsUnitType::SupportVehicle => (2.0, 0.5),
        AsUnitType::BattleArmor => (2.0, 1.5),
        _ => (1.0, 1.0),
    }
}

fn overheat_bonus(heat: &HeatProfile) -> f64 {
    let per_point = if heat.overheat_long {
        OVERHEAT_LONG_CREDIT
    } else {
        OVERHEAT_CREDIT
    };
    heat.overheat as f64 * per_point
}

fn blanket_multiplier(input: &ScoreInput<'_>) -> f64 {
    let mut multiplier = 1.0;
    match input.fire_control {
        FireControl::Advanced => {}
        FireControl::Basic => multiplier -= BASIC_FIRE_CONTROL_PENALTY,
        FireControl::None => multiplier -= NO_FIRE_CONTROL_PENALTY,
    }
    if input.abilities.contains(Ability::Shld) {
        multiplier -= SHIELD_PENALTY;
    }
    if input.abilities.contains(Ability::Dro) {
        multiplier -= DRONE_PENALTY;
    }
    multiplier
}

fn offensive_specials(abilities: &AbilityRegistry) -> f64 {
    let hot = abilities
        .get(Ability::Ht)
        .and_then(AbilityValue::as_damage)
        .map(|bands| bands.medium.credit())
        .unwrap_or(0.0);
    table_sum(abilities, ARTILLERY_VALUES) + table_sum(abilities, OFFENSIVE_SPECIALS) + hot
}

fn band_credit(bands: &DamageBands) -> f64 {
    bands.short.credit()
        + 2.0 * bands.medium.credit()
        + bands.long.credit()
        + AERO_EXTREME_WEIGHT * bands.extreme_or_zero().credit()
}

fn capital_arc_value(abilities: &AbilityRegistry) -> f64 {
    CAPITAL_TAGS
        .iter()
        .filter_map(|tag| abilities.get(*tag).and_then(AbilityValue::as_damage))
        .map(band_credit)
        .sum()
}

/// Capital damage over every arc; the strongest arc counts in full
fn capital_offense(input: &ScoreInput<'_>) -> f64 {
    let mut arcs: Vec<f64> = std::iter::once(capital_arc_value(input.abilities))
        .chain(input.locations.iter().map(|l| capital_arc_value(&l.capital)))
        .collect();
    arcs.sort_by(|a, b| b.total_cmp(a));
    arcs.iter()
        .enumerate()
        .map(|(i, value)| if i == 0 { *value } else { value * CAPITAL_SECONDARY_ARC_WEIGHT })
        .sum()
}

fn offensive_value(input: &ScoreInput<'_>) -> f64 {
    let damage = input.damage;
    let mut base =
        damage.short.credit() + 2.0 * damage.medium.credit() + damage.long.credit();
    match input.classification.family {
        ScoringFamily::Ground => {
            if input.classification.unit_type == AsUnitType::BattleMek {
                base += input.classification.size as f64 * MEK_SIZE_BONUS_PER_CLASS;
            }
        }
        ScoringFamily::Aerospace => {
            base += AERO_EXTREME_WEIGHT * damage.extreme_or_zero().credit();
            base += capital_offense(input);
        }
    }
    base += overheat_bonus(input.heat) + offensive_specials(input.abilities);
    round_tenth(base * blanket_multiplier(input))
}

fn ground_defensive_value(input: &ScoreInput<'_>) -> f64 {
    let jump = input.movement.has_jump();
    let mut movement_factor = round_half(input.movement.best() as f64 / 4.0);
    if jump {
        movement_factor += JUMP_MOVE_BONUS;
    }

    let (armor_weight, structure_weight) =
        ground_dir_multipliers(input.classification.unit_type);
    let dir = round_half(
        input.durability.armor as f64 * armor_weight
            + input.durability.structure as f64 * structure_weight,
    );

    let abilities = input.abilities;
    let mut evasion = input.tmm.unwrap_or(0) as f64;
    if jump {
        evasion += 1.0;
    }
    if abilities.contains(Ability::Stl) {
        evasion += 1.0;
    }
    if abilities.contains(Ability::Mas) {
        evasion += 1.0;
    }
    if abilities.contains(Ability::Lmas) {
        evasion += 0.5;
    }

    round_tenth(
        movement_factor + table_sum(abilities, DEFENSIVE_SPECIALS) + dir * defense_factor(evasion),
    )
}

fn aerospace_defensive_value(input: &ScoreInput<'_>) -> f64 {
    let thrust = input.movement.best() as f64;
    let threshold = input.durability.threshold.unwrap_or(0) as f64;
    let dir = round_half(
        input.durability.armor as f64 * 2.0 * (1.0 + threshold * AERO_THRESHOLD_WEIGHT)
            + input.durability.structure as f64,
    );
    round_tenth(
        thrust * AERO_THRUST_WEIGHT
            + table_sum(input.abilities, DEFENSIVE_SPECIALS)
            + dir * defense_factor(thrust / 3.0),
    )
}

fn agile_bonus(input: &ScoreInput<'_>) -> f64 {
    let Some(tmm) = input.tmm else {
        return 0.0;
    };
    if tmm < AGILE_MIN_TMM || input.damage.long.credit() > 0.0 {
        return 0.0;
    }
    let close = input.damage.short.credit().max(input.damage.medium.credit());
    (tmm - 1) as f64 * close / 2.0
}

fn is_brawler(input: &ScoreInput<'_>) -> bool {
    if input.classification.family != ScoringFamily::Ground
        || input.movement.best() > BRAWLER_MAX_MOVE
    {
        return false;
    }
    let abilities = input.abilities;
    if abilities.contains_any(BRAWLER_EXEMPT) || abilities.tags().any(|t| t.is_artillery()) {
        return false;
    }
    input.damage.long.credit() == 0.0 && input.damage.extreme_or_zero().credit() == 0.0
}

fn force_bonus(abilities: &AbilityRegistry) -> f64 {
    table_sum(abilities, FORCE_BONUSES)
        + abilities.count(Ability::Mhq) as f64 * MHQ_BONUS_PER_POINT
}

/// Score a converted unit
pub fn score(input: &ScoreInput<'_>) -> PointBreakdown {
    let offense = offensive_value(input);
    let defense = match input.classification.family {
        ScoringFamily::Ground => ground_defensive_value(input),
        ScoringFamily::Aerospace => aerospace_defensive_value(input),
    };
    let subtotal = offense + defense;

    let agile = agile_bonus(input);
    let brawler = if is_brawler(input) { BRAWLER_MALUS } else { 0.0 };
    let force = force_bonus(input.abilities);
    let network = if input.abilities.tags().any(|t| t.is_c3()) {
        NETWORK_BONUS_FRACTION * subtotal
    } else {
        0.0
    };

    let total = round_tenth(subtotal + agile - brawler + force + network);
    PointBreakdown {
        offense,
        defense,
        agile,
        brawler,
        force,
        network,
        point_value: total.round().max(1.0) as u32,
    }
}

/// Point value adjusted for crew skill; 4 is the baseline
pub fn adjusted_point_value(point_value: u32, skill: u8) -> u32 {
    let pv = point_value as i64;
    let adjusted = if skill < DEFAULT_SKILL {
        let steps = (DEFAULT_SKILL - skill) as i64;
        pv + steps * (1 + (pv - 3).max(0) / 5)
    } else {
        let steps = (skill - DEFAULT_SKILL) as i64;
        pv - steps * (1 + (pv - 5).max(0) / 10)
    };
    adjusted.max(1) as u32
}
