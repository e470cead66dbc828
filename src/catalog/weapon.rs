//! Weapon definitions
//!
//! Damage here is already in abstracted units per range band, so a medium
//! laser is 0.5/0.5/0. The converter never sees to-hit numbers.

use serde::{Deserialize, Serialize};

use crate::conversion::damage::DamageVector;

/// Weapon family, used for class sub-totals and fire-control eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeaponClass {
    Energy,
    Ballistic,
    Autocannon,
    Lrm,
    Srm,
    /// Dual-mode rack firing either SRM or LRM ammunition
    Mml,
    /// Other missile systems (MRM, rocket launchers)
    Missile,
    Flak,
    Torpedo,
    /// Flamers and plasma weapons that also inflict heat
    Heat,
    Artillery,
    PointDefense,
    Capital,
    SubCapital,
    CapitalMissile,
    /// No damage of its own; see `SpecialWeapon`
    Special,
}

impl WeaponClass {
    /// Whether damage in this class lands in the standard damage vector
    pub fn counts_as_standard(&self) -> bool {
        !matches!(
            self,
            WeaponClass::Torpedo
                | WeaponClass::Artillery
                | WeaponClass::PointDefense
                | WeaponClass::Capital
                | WeaponClass::SubCapital
                | WeaponClass::CapitalMissile
                | WeaponClass::Special
        )
    }

    pub fn is_missile(&self) -> bool {
        matches!(
            self,
            WeaponClass::Lrm | WeaponClass::Srm | WeaponClass::Mml | WeaponClass::Missile
        )
    }
}

/// Artillery pieces, each with its own ability tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtilleryKind {
    ArrowIv,
    LongTom,
    Sniper,
    Thumper,
    LongTomCannon,
    SniperCannon,
    ThumperCannon,
    /// Rack size picks the tag: 50, 70, 90 or 120
    CruiseMissile,
    BattleArmorTube,
}

/// Weapons that grant an ability instead of dealing damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialWeapon {
    Narc,
    ImprovedNarc,
    Ams,
    Tag,
    LightTag,
    ScreenLauncher,
    MicroBomb,
    MekTaser,
    BattleArmorTaser,
    Tsemp,
    MineDispenser,
    Melee,
    AntiMek,
}

/// Ammunition a weapon draws from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AmmoUse {
    pub kind: String,
    pub rack: u32,
}

/// One entry of the weapon table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDef {
    pub id: String,
    pub name: String,
    pub class: WeaponClass,
    #[serde(default)]
    pub damage: DamageVector,
    #[serde(default)]
    pub heat: f64,
    /// Cluster weapons roll for hits and get no targeting-computer bonus
    #[serde(default)]
    pub cluster: bool,
    /// Can fire indirectly
    #[serde(default)]
    pub indirect: bool,
    /// Inherently single-use
    #[serde(default)]
    pub one_shot: bool,
    #[serde(default)]
    pub clan: bool,
    #[serde(default)]
    pub rack_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo: Option<AmmoUse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artillery: Option<ArtilleryKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<SpecialWeapon>,
}

impl WeaponDef {
    pub fn new(
        id: impl Into<String>,
        class: WeaponClass,
        damage: DamageVector,
        heat: f64,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            class,
            damage,
            heat,
            cluster: false,
            indirect: false,
            one_shot: false,
            clan: false,
            rack_size: 0,
            ammo: None,
            artillery: None,
            special: None,
        }
    }

    /// A weapon that only grants an ability
    pub fn special(id: impl Into<String>, special: SpecialWeapon) -> Self {
        Self {
            special: Some(special),
            ..Self::new(id, WeaponClass::Special, DamageVector::ZERO, 0.0)
        }
    }

    /// An artillery piece
    pub fn artillery(id: impl Into<String>, kind: ArtilleryKind, rack_size: u32) -> Self {
        Self {
            artillery: Some(kind),
            rack_size,
            ..Self::new(id, WeaponClass::Artillery, DamageVector::ZERO, 0.0)
        }
    }

    pub fn with_ammo(mut self, kind: impl Into<String>, rack: u32) -> Self {
        self.ammo = Some(AmmoUse {
            kind: kind.into(),
            rack,
        });
        self
    }

    pub fn with_indirect(mut self) -> Self {
        self.indirect = true;
        self
    }

    pub fn with_cluster(mut self) -> Self {
        self.cluster = true;
        self
    }

    pub fn with_clan(mut self) -> Self {
        self.clan = true;
        self
    }

    /// Direct-fire, non-cluster weapons benefit from a targeting computer
    pub fn is_direct_fire(&self) -> bool {
        !self.cluster
            && matches!(
                self.class,
                WeaponClass::Energy | WeaponClass::Ballistic | WeaponClass::Autocannon
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_fire_excludes_cluster() {
        let lbx = WeaponDef::new(
            "lb-10x",
            WeaponClass::Autocannon,
            DamageVector::new(1.0, 1.0, 1.0),
            2.0,
        )
        .with_cluster();
        let ppc = WeaponDef::new("ppc", WeaponClass::Energy, DamageVector::new(1.0, 1.0, 1.0), 10.0);
        assert!(!lbx.is_direct_fire());
        assert!(ppc.is_direct_fire());
    }

    #[test]
    fn test_missiles_never_direct_fire() {
        let lrm = WeaponDef::new("lrm-10", WeaponClass::Lrm, DamageVector::new(0.6, 0.6, 0.6), 4.0);
        assert!(!lrm.is_direct_fire());
        assert!(lrm.class.is_missile());
    }

    #[test]
    fn test_standard_damage_classes() {
        assert!(WeaponClass::Heat.counts_as_standard());
        assert!(WeaponClass::Mml.counts_as_standard());
        assert!(!WeaponClass::Torpedo.counts_as_standard());
        assert!(!WeaponClass::Capital.counts_as_standard());
    }

    #[test]
    fn test_weapon_def_from_toml() {
        let def: WeaponDef = toml::from_str(
            r#"
            id = "lrm-15"
            name = "LRM 15"
            class = "lrm"
            heat = 5
            indirect = true
            damage = { short = 0.9, medium = 0.9, long = 0.9 }
            ammo = { kind = "lrm", rack = 15 }
            "#,
        )
        .unwrap();
        assert_eq!(def.class, WeaponClass::Lrm);
        assert!(def.indirect);
        assert_eq!(def.damage.extreme, 0.0);
        assert_eq!(def.ammo.unwrap().rack, 15);
    }
}
