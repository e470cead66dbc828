//! Equipment mounts on a source unit
//!
//! Mounts only reference catalog entries by id. What a weapon does is looked
//! up in the [`EquipmentCatalog`](crate::catalog::EquipmentCatalog).

use serde::{Deserialize, Serialize};

/// Physical location of a mount or armor section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    // Meks and protos
    Head,
    CenterTorso,
    LeftTorso,
    RightTorso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    // Vehicles
    Front,
    Left,
    Right,
    Rear,
    Turret,
    Body,
    // Aerospace
    Nose,
    LeftWing,
    RightWing,
    Aft,
    FrontLeft,
    FrontRight,
    AftLeft,
    AftRight,
    // Infantry
    Squad,
}

impl Location {
    pub fn is_arm(&self) -> bool {
        matches!(self, Location::LeftArm | Location::RightArm)
    }

    /// Facing of the location on a large craft, for arc bucketing
    pub fn craft_side(&self) -> CraftSide {
        match self {
            Location::LeftWing | Location::FrontLeft | Location::AftLeft | Location::Left => {
                CraftSide::Left
            }
            Location::RightWing | Location::FrontRight | Location::AftRight | Location::Right => {
                CraftSide::Right
            }
            Location::Aft | Location::Rear => CraftSide::Aft,
            _ => CraftSide::Nose,
        }
    }
}

/// Coarse facing of a large-craft location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CraftSide {
    Nose,
    Left,
    Right,
    Aft,
}

/// A weapon mount (or a bay of several weapons fired as one)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponMount {
    /// Catalog id; for bays, a label for the bay itself
    pub id: String,
    pub location: Location,
    /// Mounted facing backwards (mek torsos, fighter wings)
    #[serde(default)]
    pub rear: bool,
    /// Single-use mount (OS launchers, expendable racks)
    #[serde(default)]
    pub one_shot: bool,
    /// Index into the unit's misc equipment of a linked fire-control system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked: Option<usize>,
    /// Catalog ids of bay members; empty for an individual weapon
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bay: Vec<String>,
}

impl WeaponMount {
    pub fn new(id: impl Into<String>, location: Location) -> Self {
        Self {
            id: id.into(),
            location,
            rear: false,
            one_shot: false,
            linked: None,
            bay: Vec::new(),
        }
    }

    /// A bay mount aggregating several weapons
    pub fn bay(label: impl Into<String>, location: Location, members: Vec<String>) -> Self {
        Self {
            bay: members,
            ..Self::new(label, location)
        }
    }

    pub fn rear_facing(mut self) -> Self {
        self.rear = true;
        self
    }

    pub fn one_shot(mut self) -> Self {
        self.one_shot = true;
        self
    }

    pub fn linked_to(mut self, misc_index: usize) -> Self {
        self.linked = Some(misc_index);
        self
    }

    pub fn is_bay(&self) -> bool {
        !self.bay.is_empty()
    }

    /// Catalog ids of the weapons this mount fires
    pub fn member_ids(&self) -> Vec<&str> {
        if self.is_bay() {
            self.bay.iter().map(String::as_str).collect()
        } else {
            vec![self.id.as_str()]
        }
    }
}

/// A non-weapon equipment mount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiscMount {
    pub id: String,
    pub location: Location,
    /// Tonnage or capacity for variable-size items (bays, MASH, HQ)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Door count for transport bays
    #[serde(default)]
    pub doors: u32,
}

impl MiscMount {
    pub fn new(id: impl Into<String>, location: Location) -> Self {
        Self {
            id: id.into(),
            location,
            size: None,
            doors: 0,
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_doors(mut self, doors: u32) -> Self {
        self.doors = doors;
        self
    }
}

/// How many rounds a weapon burns through per turn with this ammo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CyclicRate {
    #[default]
    Standard,
    /// Ultra autocannons double-tap
    Ultra,
    /// Rotary autocannons fire up to six rounds
    Rotary,
}

impl CyclicRate {
    pub fn rounds_per_turn(&self) -> u32 {
        match self {
            CyclicRate::Standard => 1,
            CyclicRate::Ultra => 2,
            CyclicRate::Rotary => 6,
        }
    }
}

/// An ammunition bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmoMount {
    /// Ammunition family shared with the weapons that fire it
    pub ammo_type: String,
    pub rack_size: u32,
    pub shots: u32,
    #[serde(default)]
    pub cyclic: CyclicRate,
}

impl AmmoMount {
    pub fn new(ammo_type: impl Into<String>, rack_size: u32, shots: u32) -> Self {
        Self {
            ammo_type: ammo_type.into(),
            rack_size,
            shots,
            cyclic: CyclicRate::Standard,
        }
    }

    pub fn with_cyclic(mut self, cyclic: CyclicRate) -> Self {
        self.cyclic = cyclic;
        self
    }

    /// Turns of fire this bin sustains for a single weapon
    pub fn turns_of_fire(&self) -> f64 {
        self.shots as f64 / self.cyclic.rounds_per_turn() as f64
    }
}
