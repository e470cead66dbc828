//! Ability tags and the ordered ability registry
//!
//! The registry keeps insertion order. Overwriting a tag keeps its original
//! slot; removing a tag and setting it again moves it to the end.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::damage::DamageBands;

macro_rules! abilities {
    ($($variant:ident => $code:literal),+ $(,)?) => {
        /// Closed set of ability tags
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Ability {
            $($variant),+
        }

        impl Ability {
            pub const ALL: &'static [Ability] = &[$(Ability::$variant),+];

            /// Short ruleset code
            pub fn code(&self) -> &'static str {
                match self {
                    $(Ability::$variant => $code),+
                }
            }
        }
    };
}

abilities! {
    // Artillery
    ArtAis => "ARTAIS",
    ArtAc => "ARTAC",
    ArtBa => "ARTBA",
    ArtCm5 => "ARTCM5",
    ArtCm7 => "ARTCM7",
    ArtCm9 => "ARTCM9",
    ArtCm12 => "ARTCM12",
    ArtLt => "ARTLT",
    ArtLtc => "ARTLTC",
    ArtS => "ARTS",
    ArtSc => "ARTSC",
    ArtT => "ARTT",
    ArtTc => "ARTTC",
    // Damage-derived
    Ac => "AC",
    Lrm => "LRM",
    Srm => "SRM",
    Flk => "FLK",
    Tor => "TOR",
    Ht => "HT",
    If => "IF",
    Rear => "REAR",
    Tur => "TUR",
    Cap => "CAP",
    Scap => "SCAP",
    Msl => "MSL",
    Pnt => "PNT",
    // Weapon-routed
    Snarc => "SNARC",
    Inarc => "INARC",
    Ams => "AMS",
    Tag => "TAG",
    Ltag => "LTAG",
    Scr => "SCR",
    Bomb => "BOMB",
    Mtas => "MTAS",
    Btas => "BTAS",
    Tsemp => "TSEMP",
    Mds => "MDS",
    Mel => "MEL",
    Am => "AM",
    // Electronic warfare
    Ecm => "ECM",
    Aecm => "AECM",
    Lecm => "LECM",
    Rcn => "RCN",
    Bh => "BH",
    Prb => "PRB",
    Lprb => "LPRB",
    Wat => "WAT",
    Nova => "NOVA",
    // Networks
    C3m => "C3M",
    C3s => "C3S",
    C3i => "C3I",
    C3bsm => "C3BSM",
    C3bss => "C3BSS",
    C3em => "C3EM",
    Nc3 => "NC3",
    C3rs => "C3RS",
    // Protection
    Case => "CASE",
    CaseII => "CASEII",
    Shld => "SHLD",
    Mas => "MAS",
    Lmas => "LMAS",
    Stl => "STL",
    Rca => "RCA",
    Rfa => "RFA",
    Cr => "CR",
    Fr => "FR",
    Bra => "BRA",
    Ira => "IRA",
    Aba => "ABA",
    Bar => "BAR",
    // Utility
    Srch => "SRCH",
    Mash => "MASH",
    Mhq => "MHQ",
    Hpg => "HPG",
    Dro => "DRO",
    Dcc => "DCC",
    Amp => "AMP",
    Seal => "SEAL",
    Soa => "SOA",
    Saw => "SAW",
    Eng => "ENG",
    Omni => "OMNI",
    Ene => "ENE",
    Mec => "MEC",
    Xmec => "XMEC",
    Vstol => "VSTOL",
    // Transport
    Mt => "MT",
    Mtd => "MTD",
    Pt => "PT",
    Ptd => "PTD",
    Vtm => "VTM",
    Vtmd => "VTMD",
    Vth => "VTH",
    Vthd => "VTHD",
    Vts => "VTS",
    Vtsd => "VTSD",
    At => "AT",
    Atd => "ATD",
    St => "ST",
    Std => "STD",
    It => "IT",
    Ct => "CT",
    Dt => "DT",
    Mfb => "MFB",
}

impl Ability {
    pub fn from_code(code: &str) -> Option<Ability> {
        Ability::ALL.iter().copied().find(|a| a.code() == code)
    }

    pub fn is_artillery(&self) -> bool {
        matches!(
            self,
            Ability::ArtAis
                | Ability::ArtAc
                | Ability::ArtBa
                | Ability::ArtCm5
                | Ability::ArtCm7
                | Ability::ArtCm9
                | Ability::ArtCm12
                | Ability::ArtLt
                | Ability::ArtLtc
                | Ability::ArtS
                | Ability::ArtSc
                | Ability::ArtT
                | Ability::ArtTc
        )
    }

    pub fn is_c3(&self) -> bool {
        matches!(
            self,
            Ability::C3m
                | Ability::C3s
                | Ability::C3i
                | Ability::C3bsm
                | Ability::C3bss
                | Ability::C3em
                | Ability::Nc3
                | Ability::C3rs
        )
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Ability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Ability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ability::from_code(&code)
            .ok_or_else(|| de::Error::custom(format!("unknown ability code {code:?}")))
    }
}

/// Value attached to an ability tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AbilityValue {
    /// Presence only
    #[default]
    Flag,
    Integer(u32),
    Fraction(f64),
    Damage(DamageBands),
}

impl AbilityValue {
    pub fn is_flag(&self) -> bool {
        matches!(self, AbilityValue::Flag)
    }

    pub fn as_integer(&self) -> Option<u32> {
        match self {
            AbilityValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_damage(&self) -> Option<&DamageBands> {
        match self {
            AbilityValue::Damage(d) => Some(d),
            _ => None,
        }
    }
}

impl fmt::Display for AbilityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbilityValue::Flag => Ok(()),
            AbilityValue::Integer(n) => write!(f, "{}", n),
            AbilityValue::Fraction(x) => write!(f, "{}", x),
            AbilityValue::Damage(d) => write!(f, "{}", d),
        }
    }
}

/// One registry entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityEntry {
    pub tag: Ability,
    #[serde(default, skip_serializing_if = "AbilityValue::is_flag")]
    pub value: AbilityValue,
}

/// Tag to value mapping; each tag appears at most once
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityRegistry {
    entries: Vec<AbilityEntry>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, tag: Ability) -> Option<usize> {
        self.entries.iter().position(|e| e.tag == tag)
    }

    /// Set a tag, overwriting any value already present
    pub fn set(&mut self, tag: Ability, value: AbilityValue) {
        match self.position(tag) {
            Some(i) => self.entries[i].value = value,
            None => self.entries.push(AbilityEntry { tag, value }),
        }
    }

    pub fn flag(&mut self, tag: Ability) {
        if !self.contains(tag) {
            self.set(tag, AbilityValue::Flag);
        }
    }

    /// Add to an integer-valued tag, inserting it at `amount` if absent
    pub fn increment(&mut self, tag: Ability, amount: u32) {
        match self.position(tag) {
            Some(i) => {
                let current = self.entries[i].value.as_integer().unwrap_or(0);
                self.entries[i].value = AbilityValue::Integer(current + amount);
            }
            None => self.entries.push(AbilityEntry {
                tag,
                value: AbilityValue::Integer(amount),
            }),
        }
    }

    /// Add to a fractional tag, inserting it at `amount` if absent
    pub fn accumulate(&mut self, tag: Ability, amount: f64) {
        match self.position(tag) {
            Some(i) => {
                let current = match self.entries[i].value {
                    AbilityValue::Fraction(x) => x,
                    AbilityValue::Integer(n) => n as f64,
                    _ => 0.0,
                };
                self.entries[i].value = AbilityValue::Fraction(current + amount);
            }
            None => self.entries.push(AbilityEntry {
                tag,
                value: AbilityValue::Fraction(amount),
            }),
        }
    }

    pub fn remove(&mut self, tag: Ability) -> Option<AbilityValue> {
        self.position(tag).map(|i| self.entries.remove(i).value)
    }

    pub fn get(&self, tag: Ability) -> Option<&AbilityValue> {
        self.entries.iter().find(|e| e.tag == tag).map(|e| &e.value)
    }

    pub fn contains(&self, tag: Ability) -> bool {
        self.position(tag).is_some()
    }

    pub fn contains_any(&self, tags: &[Ability]) -> bool {
        tags.iter().any(|t| self.contains(*t))
    }

    /// Integer value of a tag, 0 when absent
    pub fn count(&self, tag: Ability) -> u32 {
        self.get(tag).and_then(AbilityValue::as_integer).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityEntry> {
        self.entries.iter()
    }

    pub fn tags(&self) -> impl Iterator<Item = Ability> + '_ {
        self.entries.iter().map(|e| e.tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append another registry's entries, overwriting shared tags in place
    pub fn merge(&mut self, other: AbilityRegistry) {
        for entry in other.entries {
            self.set(entry.tag, entry.value);
        }
    }
}

impl fmt::Display for AbilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}{}", entry.tag, entry.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::damage::{DamageVector, DamageBands};

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in Ability::ALL.iter().enumerate() {
            for b in &Ability::ALL[i + 1..] {
                assert_ne!(a.code(), b.code(), "{a:?} and {b:?} share a code");
            }
        }
    }

    #[test]
    fn test_from_code_round_trip() {
        for ability in Ability::ALL {
            assert_eq!(Ability::from_code(ability.code()), Some(*ability));
        }
        assert_eq!(Ability::from_code("NOPE"), None);
    }

    #[test]
    fn test_set_keeps_slot_and_single_entry() {
        let mut reg = AbilityRegistry::new();
        reg.flag(Ability::Ecm);
        reg.set(Ability::If, AbilityValue::Integer(1));
        reg.set(Ability::Ecm, AbilityValue::Flag);
        reg.set(Ability::If, AbilityValue::Integer(2));

        assert_eq!(reg.len(), 2);
        let tags: Vec<_> = reg.tags().collect();
        assert_eq!(tags, vec![Ability::Ecm, Ability::If]);
        assert_eq!(reg.count(Ability::If), 2);
    }

    #[test]
    fn test_increment_counts() {
        let mut reg = AbilityRegistry::new();
        reg.increment(Ability::ArtLt, 1);
        reg.increment(Ability::ArtLt, 1);
        assert_eq!(reg.count(Ability::ArtLt), 2);
        assert_eq!(reg.count(Ability::ArtS), 0);
    }

    #[test]
    fn test_remove() {
        let mut reg = AbilityRegistry::new();
        reg.flag(Ability::Case);
        reg.flag(Ability::CaseII);
        assert_eq!(reg.remove(Ability::Case), Some(AbilityValue::Flag));
        assert!(!reg.contains(Ability::Case));
        assert_eq!(reg.remove(Ability::Case), None);
    }

    #[test]
    fn test_sparse_serialization() {
        let mut reg = AbilityRegistry::new();
        reg.flag(Ability::Ecm);
        reg.increment(Ability::If, 1);
        reg.set(
            Ability::Srm,
            AbilityValue::Damage(DamageBands::from_vector(&DamageVector::new(2.0, 2.0, 0.0), false)),
        );
        let json = serde_json::to_string(&reg).unwrap();
        assert!(json.starts_with(r#"[{"tag":"ECM"},{"tag":"IF","value":1},{"tag":"SRM","value":"#));

        let back: AbilityRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reg);
    }

    #[test]
    fn test_display() {
        let mut reg = AbilityRegistry::new();
        reg.flag(Ability::Ecm);
        reg.increment(Ability::If, 2);
        reg.set(
            Ability::Srm,
            AbilityValue::Damage(DamageBands::from_vector(&DamageVector::new(2.0, 2.0, 0.0), false)),
        );
        assert_eq!(reg.to_string(), "ECM, IF2, SRM2/2/0");
    }
}
