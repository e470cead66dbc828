//! Stage 5: weapon aggregation
//!
//! Every weapon mount is resolved against the catalog, modified, and
//! scattered into the location buckets for the unit's layout. Special
//! weapons are routed to abilities instead. Nothing is rounded here.

use ahash::AHashMap;
use tracing::warn;

use super::abilities::{Ability, AbilityRegistry, AbilityValue};
use super::classifier::Classification;
use super::constants::{
    AES_MULTIPLIER, AMMO_TURNS_REQUIRED, AMS_POINT_DEFENSE, APOLLO_MULTIPLIER,
    ARTEMIS_IV_MULTIPLIER, ARTEMIS_V_MULTIPLIER, CLASS_ABILITY_FLOOR, HOT_TIER_ONE, HOT_TIER_TWO,
    INFANTRY_DAMAGE_DIVISOR, INFANTRY_LONG_RANGE, INFANTRY_MEDIUM_RANGE, LOW_AMMO_MULTIPLIER,
    MML_MEDIUM_SPLIT, ONE_SHOT_MULTIPLIER, REAR_ABILITY_FLOOR, TARGETING_COMPUTER_MULTIPLIER,
};
use super::damage::{
    BucketLocation, DamageBands, DamageClass, DamageVector, FinalDamage, LocationBucket, RangeBand,
};
use super::loadout::{report_missing, Loadout, MiscItem};
use super::statblock::LocationDamage;
use crate::catalog::{
    ArtilleryKind, EquipmentCatalog, MiscFlag, SpecialWeapon, WeaponClass, WeaponDef,
};
use crate::core::types::{round_tenth, round_up};
use crate::unit::{CraftSide, Location, SourceUnit, UnitKind, WeaponMount};

/// Everything the aggregator produces
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponTotals {
    /// Buckets in layout order; the first is the normal one
    pub buckets: Vec<LocationBucket>,
    /// Heat of weapons that fire at short or medium range
    pub heat_medium: f64,
    /// Heat of weapons that fire at long range
    pub heat_long: f64,
    /// Abilities granted by special weapons
    pub abilities: AbilityRegistry,
    /// Raw point-defense value for aerospace units
    pub point_defense: f64,
    /// Resolved weapons that deal damage
    pub damage_weapons: usize,
    /// Whether any resolved weapon draws ammunition
    pub uses_ammo: bool,
}

impl WeaponTotals {
    pub fn bucket(&self, location: BucketLocation) -> Option<&LocationBucket> {
        self.buckets.iter().find(|b| b.location == location)
    }

    fn bucket_mut(&mut self, location: BucketLocation) -> Option<&mut LocationBucket> {
        self.buckets.iter_mut().find(|b| b.location == location)
    }

    /// Sum of all normal buckets
    pub fn headline(&self) -> DamageVector {
        self.buckets
            .iter()
            .filter(|b| b.normal)
            .fold(DamageVector::ZERO, |acc, b| acc + b.damage)
    }

    /// Class sub-total summed over normal buckets
    pub fn class_total(&self, class: DamageClass) -> DamageVector {
        self.buckets
            .iter()
            .filter(|b| b.normal)
            .fold(DamageVector::ZERO, |acc, b| acc + b.class(class))
    }

    /// Indirect-fire total over normal buckets
    pub fn indirect_total(&self) -> f64 {
        self.buckets.iter().filter(|b| b.normal).map(|b| b.indirect).sum()
    }

    /// True when every value in every bucket is non-negative
    pub fn is_non_negative(&self) -> bool {
        self.buckets.iter().all(|b| {
            b.damage.is_non_negative()
                && b.indirect >= 0.0
                && b.classes.iter().all(|(_, d)| d.is_non_negative())
        })
    }
}

/// Empty buckets for a unit's layout
pub fn bucket_layout(classification: &Classification) -> Vec<LocationBucket> {
    let locations: &[BucketLocation] = if classification.unit_type.is_large_craft() {
        &[
            BucketLocation::Nose,
            BucketLocation::LeftSide,
            BucketLocation::RightSide,
            BucketLocation::Aft,
        ]
    } else if classification.is_fighter_like() {
        &[BucketLocation::Standard, BucketLocation::Rear]
    } else {
        &[
            BucketLocation::Standard,
            BucketLocation::Rear,
            BucketLocation::Turret,
        ]
    };
    locations
        .iter()
        .enumerate()
        .map(|(i, loc)| LocationBucket::new(*loc, i == 0))
        .collect()
}

/// Buckets a mount fires into, with the multiplier for each
fn bucket_targets(mount: &WeaponMount, classification: &Classification) -> Vec<(BucketLocation, f64)> {
    if classification.unit_type.is_large_craft() {
        let side = if mount.rear {
            CraftSide::Aft
        } else {
            mount.location.craft_side()
        };
        let location = match side {
            CraftSide::Nose => BucketLocation::Nose,
            CraftSide::Left => BucketLocation::LeftSide,
            CraftSide::Right => BucketLocation::RightSide,
            CraftSide::Aft => BucketLocation::Aft,
        };
        return vec![(location, 1.0)];
    }

    if mount.rear || matches!(mount.location, Location::Rear | Location::Aft) {
        return vec![(BucketLocation::Rear, 1.0)];
    }
    if !classification.is_aerospace() && mount.location == Location::Turret {
        return vec![(BucketLocation::Standard, 1.0), (BucketLocation::Turret, 1.0)];
    }
    vec![(BucketLocation::Standard, 1.0)]
}

fn damage_class(class: WeaponClass) -> Option<DamageClass> {
    match class {
        WeaponClass::Autocannon => Some(DamageClass::Autocannon),
        WeaponClass::Lrm => Some(DamageClass::Lrm),
        WeaponClass::Srm => Some(DamageClass::Srm),
        WeaponClass::Flak => Some(DamageClass::Flak),
        WeaponClass::Torpedo => Some(DamageClass::Torpedo),
        WeaponClass::Heat => Some(DamageClass::Heat),
        WeaponClass::Capital => Some(DamageClass::Capital),
        WeaponClass::SubCapital => Some(DamageClass::SubCapital),
        WeaponClass::CapitalMissile => Some(DamageClass::CapitalMissile),
        WeaponClass::Energy
        | WeaponClass::Ballistic
        | WeaponClass::Mml
        | WeaponClass::Missile
        | WeaponClass::Artillery
        | WeaponClass::PointDefense
        | WeaponClass::Special => None,
    }
}

fn artillery_ability(kind: ArtilleryKind, def: &WeaponDef) -> Ability {
    match kind {
        ArtilleryKind::ArrowIv if def.clan => Ability::ArtAc,
        ArtilleryKind::ArrowIv => Ability::ArtAis,
        ArtilleryKind::LongTom => Ability::ArtLt,
        ArtilleryKind::Sniper => Ability::ArtS,
        ArtilleryKind::Thumper => Ability::ArtT,
        ArtilleryKind::LongTomCannon => Ability::ArtLtc,
        ArtilleryKind::SniperCannon => Ability::ArtSc,
        ArtilleryKind::ThumperCannon => Ability::ArtTc,
        ArtilleryKind::CruiseMissile => match def.rack_size {
            0..=50 => Ability::ArtCm5,
            51..=70 => Ability::ArtCm7,
            71..=90 => Ability::ArtCm9,
            _ => Ability::ArtCm12,
        },
        ArtilleryKind::BattleArmorTube => Ability::ArtBa,
    }
}

/// A mount with its members resolved
struct ResolvedMount<'a> {
    mount: &'a WeaponMount,
    members: Vec<&'a WeaponDef>,
}

fn resolve_mounts<'a>(
    unit: &'a SourceUnit,
    catalog: &'a EquipmentCatalog,
    strict: bool,
) -> Vec<ResolvedMount<'a>> {
    let name = unit.name();
    unit.weapons
        .iter()
        .filter_map(|mount| {
            let members: Vec<&WeaponDef> = mount
                .member_ids()
                .into_iter()
                .filter_map(|id| {
                    let def = catalog.weapon(id);
                    if def.is_none() {
                        report_missing(strict, &name, "weapon", id);
                    }
                    def
                })
                .collect();
            (!members.is_empty()).then_some(ResolvedMount { mount, members })
        })
        .collect()
}

fn is_one_shot(mount: &WeaponMount, def: &WeaponDef) -> bool {
    mount.one_shot || def.one_shot
}

/// Weapon ids whose ammunition cannot sustain ten turns of fire
fn starved_weapons<'a>(unit: &SourceUnit, mounts: &[ResolvedMount<'a>]) -> AHashMap<&'a str, bool> {
    let mut copies: AHashMap<&'a str, (u32, &'a WeaponDef)> = AHashMap::new();
    for resolved in mounts {
        for &def in &resolved.members {
            if def.ammo.is_some() && !is_one_shot(resolved.mount, def) {
                copies.entry(def.id.as_str()).or_insert((0, def)).0 += 1;
            }
        }
    }

    copies
        .into_iter()
        .map(|(id, (count, def))| {
            let turns: f64 = def
                .ammo
                .as_ref()
                .map(|ammo_use| {
                    unit.ammo
                        .iter()
                        .filter(|a| a.ammo_type == ammo_use.kind && a.rack_size == ammo_use.rack)
                        .map(|a| a.turns_of_fire())
                        .sum()
                })
                .unwrap_or(0.0);
            (id, turns < AMMO_TURNS_REQUIRED * count as f64)
        })
        .collect()
}

/// The misc item a mount is linked to, if it resolved
fn linked_item<'l, 'a>(
    mount: &WeaponMount,
    loadout: &'l Loadout<'a>,
    unit: &SourceUnit,
) -> Option<&'l MiscItem<'a>> {
    let index = mount.linked?;
    let item = loadout.at(index);
    if item.is_none() && index >= unit.equipment.len() {
        warn!(unit = %unit.name(), weapon = %mount.id, index, "Weapon linked to missing equipment");
    }
    item
}

/// Multiplier from a linked fire-control item, for missile weapons
fn link_multiplier(def: &WeaponDef, linked: Option<&MiscItem<'_>>) -> f64 {
    let Some(item) = linked else {
        return 1.0;
    };
    if !def.class.is_missile() {
        return 1.0;
    }
    if item.has(MiscFlag::ArtemisV) {
        ARTEMIS_V_MULTIPLIER
    } else if item.has(MiscFlag::ArtemisIv) {
        ARTEMIS_IV_MULTIPLIER
    } else if item.has(MiscFlag::Apollo) {
        APOLLO_MULTIPLIER
    } else {
        1.0
    }
}

fn aes_applies(mount: &WeaponMount, classification: &Classification, loadout: &Loadout<'_>) -> bool {
    classification.unit_type.is_mek()
        && mount.location.is_arm()
        && loadout
            .with_flag(MiscFlag::Aes)
            .any(|item| item.mount.location == mount.location)
}

/// Ability for a designator; a linked C3 master designates for its network
fn designator_ability(plain: Ability, linked: Option<&MiscItem<'_>>) -> Ability {
    match linked {
        Some(item) if item.has(MiscFlag::C3BoostedMaster) => Ability::C3bsm,
        Some(item) if item.has(MiscFlag::C3Master) => Ability::C3m,
        Some(item) if item.has(MiscFlag::C3EmergencyMaster) => Ability::C3em,
        _ => plain,
    }
}

/// Route a special or artillery weapon; returns false for damage weapons
fn route_special(
    def: &WeaponDef,
    linked: Option<&MiscItem<'_>>,
    classification: &Classification,
    totals: &mut WeaponTotals,
) -> bool {
    if let Some(kind) = def.artillery {
        let ability = artillery_ability(kind, def);
        totals.abilities.increment(ability, 1);
        return true;
    }

    let Some(special) = def.special else {
        return false;
    };
    let abilities = &mut totals.abilities;
    match special {
        SpecialWeapon::Narc => abilities.flag(Ability::Snarc),
        SpecialWeapon::ImprovedNarc => abilities.flag(Ability::Inarc),
        SpecialWeapon::Ams if classification.is_aerospace() => {
            totals.point_defense += AMS_POINT_DEFENSE
        }
        SpecialWeapon::Ams => abilities.flag(Ability::Ams),
        SpecialWeapon::Tag => abilities.flag(designator_ability(Ability::Tag, linked)),
        SpecialWeapon::LightTag => abilities.flag(designator_ability(Ability::Ltag, linked)),
        SpecialWeapon::ScreenLauncher => abilities.increment(Ability::Scr, 1),
        SpecialWeapon::MicroBomb => abilities.increment(Ability::Bomb, 1),
        SpecialWeapon::MekTaser => abilities.increment(Ability::Mtas, 1),
        SpecialWeapon::BattleArmorTaser => abilities.increment(Ability::Btas, 1),
        SpecialWeapon::Tsemp => abilities.increment(Ability::Tsemp, 1),
        SpecialWeapon::MineDispenser => abilities.increment(Ability::Mds, 1),
        SpecialWeapon::Melee => abilities.flag(Ability::Mel),
        SpecialWeapon::AntiMek => abilities.flag(Ability::Am),
    }
    true
}

/// Add one weapon's modified damage to the target buckets
fn scatter(
    totals: &mut WeaponTotals,
    targets: &[(BucketLocation, f64)],
    def: &WeaponDef,
    damage: DamageVector,
    track_indirect: bool,
) {
    for (location, weight) in targets {
        let Some(bucket) = totals.bucket_mut(*location) else {
            continue;
        };
        let weighted = damage.scaled(*weight);
        if def.class.counts_as_standard() {
            bucket.damage += weighted;
        }
        if def.class == WeaponClass::Mml {
            bucket.add_class(
                DamageClass::Srm,
                DamageVector::new(weighted.short, weighted.medium * MML_MEDIUM_SPLIT, 0.0),
            );
            bucket.add_class(
                DamageClass::Lrm,
                DamageVector::new(0.0, weighted.medium * MML_MEDIUM_SPLIT, weighted.long),
            );
        } else if let Some(class) = damage_class(def.class) {
            bucket.add_class(class, weighted);
        }
        if track_indirect && def.indirect {
            bucket.indirect += weighted.long;
        }
    }
}

/// Conventional infantry firepower from the platoon's stats
fn infantry_damage(unit: &SourceUnit) -> Option<DamageVector> {
    let UnitKind::Infantry(inf) = &unit.kind else {
        return None;
    };
    let base = inf.troopers as f64 * inf.damage_per_trooper / INFANTRY_DAMAGE_DIVISOR;
    let medium = if inf.weapon_range >= INFANTRY_MEDIUM_RANGE { base } else { 0.0 };
    let long = if inf.weapon_range >= INFANTRY_LONG_RANGE { base } else { 0.0 };
    Some(DamageVector::new(base, medium, long))
}

/// Aggregate all weapon mounts into location buckets
pub fn aggregate_weapons(
    unit: &SourceUnit,
    classification: &Classification,
    catalog: &EquipmentCatalog,
    loadout: &Loadout<'_>,
    strict: bool,
) -> WeaponTotals {
    let mut totals = WeaponTotals {
        buckets: bucket_layout(classification),
        heat_medium: 0.0,
        heat_long: 0.0,
        abilities: AbilityRegistry::new(),
        point_defense: 0.0,
        damage_weapons: 0,
        uses_ammo: false,
    };

    if let Some(front) = infantry_damage(unit) {
        if let Some(bucket) = totals.bucket_mut(BucketLocation::Standard) {
            bucket.damage += front;
        }
    }

    let mounts = resolve_mounts(unit, catalog, strict);
    let starved = starved_weapons(unit, &mounts);
    let targeting_computer = loadout.has(MiscFlag::TargetingComputer);
    let troopers = match unit.kind {
        UnitKind::BattleArmor(_) => unit.kind.troopers() as f64,
        _ => 1.0,
    };
    let track_indirect = !classification.is_aerospace();

    for resolved in &mounts {
        let mount = resolved.mount;
        let targets = bucket_targets(mount, classification);
        let aes = aes_applies(mount, classification, loadout);
        let linked = linked_item(mount, loadout, unit);

        for def in &resolved.members {
            if route_special(def, linked, classification, &mut totals) {
                continue;
            }
            if def.class == WeaponClass::PointDefense {
                if classification.is_aerospace() {
                    totals.point_defense += def.damage.short;
                } else {
                    totals.abilities.flag(Ability::Ams);
                }
                continue;
            }

            let mut multiplier = troopers;
            if is_one_shot(mount, def) {
                multiplier *= ONE_SHOT_MULTIPLIER;
            } else if starved.get(def.id.as_str()).copied().unwrap_or(false) {
                multiplier *= LOW_AMMO_MULTIPLIER;
            }
            if targeting_computer && def.is_direct_fire() {
                multiplier *= TARGETING_COMPUTER_MULTIPLIER;
            }
            if aes {
                multiplier *= AES_MULTIPLIER;
            }
            multiplier *= link_multiplier(def, linked);

            let damage = def.damage.scaled(multiplier);
            scatter(&mut totals, &targets, def, damage, track_indirect);

            if def.damage.short > 0.0 || def.damage.medium > 0.0 {
                totals.heat_medium += def.heat;
            }
            if def.damage.long > 0.0 {
                totals.heat_long += def.heat;
            }
            totals.damage_weapons += 1;
            totals.uses_ammo |= def.ammo.is_some();
        }
    }

    debug_assert!(totals.is_non_negative(), "negative damage after aggregation");
    totals
}

fn hot_tier(heat_damage: f64) -> u32 {
    if heat_damage >= HOT_TIER_TWO {
        2
    } else if heat_damage >= HOT_TIER_ONE {
        1
    } else {
        0
    }
}

fn damage_value(raw: &DamageVector, with_extreme: bool) -> AbilityValue {
    AbilityValue::Damage(DamageBands::from_vector(raw, with_extreme))
}

const STANDARD_CLASSES: &[(DamageClass, Ability)] = &[
    (DamageClass::Autocannon, Ability::Ac),
    (DamageClass::Lrm, Ability::Lrm),
    (DamageClass::Srm, Ability::Srm),
    (DamageClass::Flak, Ability::Flk),
    (DamageClass::Torpedo, Ability::Tor),
];

/// Capital classes; published for every arc of a large craft
const CAPITAL_CLASSES: &[(DamageClass, Ability)] = &[
    (DamageClass::Capital, Ability::Cap),
    (DamageClass::SubCapital, Ability::Scap),
    (DamageClass::CapitalMissile, Ability::Msl),
];

fn set_class_abilities(
    abilities: &mut AbilityRegistry,
    classes: &[(DamageClass, Ability)],
    class_total: impl Fn(DamageClass) -> DamageVector,
    with_extreme: bool,
) {
    for (class, ability) in classes {
        let total = class_total(*class);
        if total.medium >= CLASS_ABILITY_FLOOR {
            abilities.set(*ability, damage_value(&total, with_extreme));
        }
    }
}

/// Abilities that depend on final (heat-adjusted) damage totals
pub fn class_abilities(totals: &WeaponTotals, classification: &Classification) -> AbilityRegistry {
    let mut abilities = AbilityRegistry::new();
    let aerospace = classification.is_aerospace();

    let class_total = |class: DamageClass| totals.class_total(class);
    set_class_abilities(&mut abilities, STANDARD_CLASSES, class_total, aerospace);
    set_class_abilities(&mut abilities, CAPITAL_CLASSES, class_total, aerospace);

    let indirect = totals.indirect_total();
    if indirect >= CLASS_ABILITY_FLOOR {
        abilities.set(
            Ability::If,
            AbilityValue::Integer(FinalDamage::from_raw(indirect).value),
        );
    }

    let heat = totals.class_total(DamageClass::Heat);
    let tiers = DamageBands {
        short: FinalDamage {
            value: hot_tier(heat.short),
            minimal: false,
        },
        medium: FinalDamage {
            value: hot_tier(heat.medium),
            minimal: false,
        },
        long: FinalDamage {
            value: hot_tier(heat.long),
            minimal: false,
        },
        extreme: aerospace.then(|| FinalDamage {
            value: hot_tier(heat.extreme),
            minimal: false,
        }),
    };
    if !tiers.is_zero() {
        abilities.set(Ability::Ht, AbilityValue::Damage(tiers));
    }

    if let Some(rear) = totals.bucket(BucketLocation::Rear) {
        if rear.damage.medium >= REAR_ABILITY_FLOOR {
            abilities.set(Ability::Rear, damage_value(&rear.damage, aerospace));
        }
    }
    if let Some(turret) = totals.bucket(BucketLocation::Turret) {
        if !turret.damage.is_zero() {
            abilities.set(Ability::Tur, damage_value(&turret.damage, false));
        }
    }

    if aerospace && totals.point_defense > 0.0 {
        let pnt = round_up(round_tenth(totals.point_defense)) as u32;
        abilities.set(Ability::Pnt, AbilityValue::Integer(pnt));
    }

    abilities
}

/// Rounded damage for every non-normal bucket, in layout order
///
/// Large-craft arcs also carry their own capital-class tags.
pub fn location_damage(totals: &WeaponTotals, classification: &Classification) -> Vec<LocationDamage> {
    let aerospace = classification.is_aerospace();
    totals
        .buckets
        .iter()
        .filter(|b| !b.normal)
        .map(|b| {
            let mut capital = AbilityRegistry::new();
            if classification.unit_type.is_large_craft() {
                set_class_abilities(&mut capital, CAPITAL_CLASSES, |class| b.class(class), aerospace);
            }
            LocationDamage {
                location: b.location,
                damage: DamageBands::from_vector(&b.damage, aerospace),
                capital,
            }
        })
        .collect()
}

/// Scale helper used by the heat stage
pub fn scale_buckets(totals: &mut WeaponTotals, factor: f64, last: RangeBand, include_indirect: bool) {
    for bucket in &mut totals.buckets {
        bucket.scale_through(factor, last, include_indirect);
    }
}
