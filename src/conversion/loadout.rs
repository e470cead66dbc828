//! Equipment resolution against the catalog
//!
//! Misc mounts are resolved once per conversion. Unknown ids are logged and
//! dropped here so later stages only ever see definitions that exist.

use tracing::{error, warn};

use crate::catalog::{EquipmentCatalog, MiscDef, MiscFlag};
use crate::unit::{MiscMount, SourceUnit};

/// A misc mount paired with its catalog definition
#[derive(Debug, Clone, Copy)]
pub struct MiscItem<'a> {
    /// Position in the unit's equipment list
    pub index: usize,
    pub mount: &'a MiscMount,
    pub def: &'a MiscDef,
}

impl MiscItem<'_> {
    pub fn has(&self, flag: MiscFlag) -> bool {
        self.def.has(flag)
    }
}

/// The resolved misc equipment of one unit, in mount order
#[derive(Debug, Clone, Default)]
pub struct Loadout<'a> {
    items: Vec<MiscItem<'a>>,
    unresolved: usize,
}

impl<'a> Loadout<'a> {
    pub fn resolve(unit: &'a SourceUnit, catalog: &'a EquipmentCatalog, strict: bool) -> Self {
        let mut items = Vec::with_capacity(unit.equipment.len());
        let mut unresolved = 0;
        for (index, mount) in unit.equipment.iter().enumerate() {
            match catalog.misc(&mount.id) {
                Some(def) => items.push(MiscItem { index, mount, def }),
                None => {
                    report_missing(strict, &unit.name(), "misc", &mount.id);
                    unresolved += 1;
                }
            }
        }
        Self { items, unresolved }
    }

    pub fn items(&self) -> &[MiscItem<'a>] {
        &self.items
    }

    pub fn has(&self, flag: MiscFlag) -> bool {
        self.items.iter().any(|item| item.has(flag))
    }

    pub fn count(&self, flag: MiscFlag) -> usize {
        self.items.iter().filter(|item| item.has(flag)).count()
    }

    pub fn with_flag(&self, flag: MiscFlag) -> impl Iterator<Item = &MiscItem<'a>> + '_ {
        self.items.iter().filter(move |item| item.has(flag))
    }

    /// Look up by position in the unit's equipment list
    pub fn at(&self, index: usize) -> Option<&MiscItem<'a>> {
        self.items.iter().find(|item| item.index == index)
    }

    /// Mounts whose id had no catalog entry
    pub fn unresolved(&self) -> usize {
        self.unresolved
    }

    /// Total extra dissipation from misc equipment
    pub fn heat_dissipation(&self) -> f64 {
        self.items.iter().map(|item| item.def.heat_dissipation).sum()
    }

    /// Total heat generated by misc equipment
    pub fn heat_load(&self) -> f64 {
        self.items.iter().map(|item| item.def.heat_load).sum()
    }
}

/// Log an id the catalog could not resolve; the mount is skipped either way
pub fn report_missing(strict: bool, unit: &str, table: &str, id: &str) {
    if strict {
        error!(unit, table, id, "Unknown equipment id, mount skipped");
    } else {
        warn!(unit, table, id, "Unknown equipment id, mount skipped");
    }
}
