//! Equipment catalog for resolving mount ids.
//!
//! The catalog is loaded once (from TOML or built in code) and then only read.
//! It is handed to the converter explicitly; nothing here is global.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::misc::{MiscDef, MiscFlag};
use super::weapon::WeaponDef;
use crate::core::error::{CatalogError, Result};

/// On-disk layout of a catalog file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub weapon: Vec<WeaponDef>,
    #[serde(default)]
    pub misc: Vec<MiscDef>,
}

/// Read-only table of weapon and misc definitions, indexed by id
#[derive(Debug, Clone, Default)]
pub struct EquipmentCatalog {
    weapons: Vec<WeaponDef>,
    misc: Vec<MiscDef>,
    /// Map from weapon id to position in `weapons`
    weapon_index: AHashMap<String, usize>,
    /// Map from misc id to position in `misc`
    misc_index: AHashMap<String, usize>,
}

impl EquipmentCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a weapon definition
    pub fn insert_weapon(&mut self, def: WeaponDef) -> Result<()> {
        if self.weapon_index.contains_key(&def.id) {
            return Err(CatalogError::DuplicateId(def.id));
        }
        self.weapon_index.insert(def.id.clone(), self.weapons.len());
        self.weapons.push(def);
        Ok(())
    }

    /// Register a misc equipment definition
    pub fn insert_misc(&mut self, def: MiscDef) -> Result<()> {
        if self.misc_index.contains_key(&def.id) {
            return Err(CatalogError::DuplicateId(def.id));
        }
        self.misc_index.insert(def.id.clone(), self.misc.len());
        self.misc.push(def);
        Ok(())
    }

    /// Build a catalog from definitions already in memory
    pub fn from_defs(weapons: Vec<WeaponDef>, misc: Vec<MiscDef>) -> Result<Self> {
        let mut catalog = Self::new();
        for def in weapons {
            catalog.insert_weapon(def)?;
        }
        for def in misc {
            catalog.insert_misc(def)?;
        }
        Ok(catalog)
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut catalog = Self::new();
        catalog.merge_toml_str(content, "<inline>")?;
        Ok(catalog)
    }

    /// Load a single TOML catalog file
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)?;
        self.merge_toml_str(&content, &path.display().to_string())
    }

    /// Load all .toml files from a directory recursively
    pub fn load_directory(&mut self, path: &Path) -> Result<usize> {
        let mut loaded = 0;
        let mut entries: Vec<_> = std::fs::read_dir(path)?.collect::<std::io::Result<_>>()?;
        // Directory order is platform-dependent; duplicate detection must not be.
        entries.sort_by_key(|e| e.path());

        for entry in entries {
            let entry_path = entry.path();
            if entry_path.is_dir() {
                loaded += self.load_directory(&entry_path)?;
            } else if entry_path.extension().map_or(false, |ext| ext == "toml") {
                self.load_file(&entry_path)?;
                loaded += 1;
            }
        }
        Ok(loaded)
    }

    fn merge_toml_str(&mut self, content: &str, origin: &str) -> Result<()> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| CatalogError::Parse(format!("{}: {}", origin, e)))?;
        for def in file.weapon {
            self.insert_weapon(def)?;
        }
        for def in file.misc {
            self.insert_misc(def)?;
        }
        Ok(())
    }

    /// Get a weapon definition by id
    pub fn weapon(&self, id: &str) -> Option<&WeaponDef> {
        self.weapon_index.get(id).map(|&i| &self.weapons[i])
    }

    /// Get a misc definition by id
    pub fn misc(&self, id: &str) -> Option<&MiscDef> {
        self.misc_index.get(id).map(|&i| &self.misc[i])
    }

    /// All misc definitions carrying a flag, in registration order
    pub fn misc_with_flag(&self, flag: MiscFlag) -> impl Iterator<Item = &MiscDef> + '_ {
        self.misc.iter().filter(move |def| def.has(flag))
    }

    pub fn weapon_count(&self) -> usize {
        self.weapons.len()
    }

    pub fn misc_count(&self) -> usize {
        self.misc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty() && self.misc.is_empty()
    }
}
