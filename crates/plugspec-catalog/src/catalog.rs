//! The platform catalog.
//!
//! Built once, before any resolution, then shared by reference. Lookups
//! never modify the catalog.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::platform::{PlatformInfo, PlatformType};

/// Read-only table of platform types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCatalog {
    entries: BTreeMap<PlatformType, PlatformInfo>,
}

impl PlatformCatalog {
    /// The built-in platform table.
    pub fn builtin() -> Self {
        let entries = PlatformInfo::builtin_entries()
            .into_iter()
            .map(|info| (info.platform_type.clone(), info))
            .collect();
        Self { entries }
    }

    /// Build a catalog from explicit entries. Type codes must be unique.
    pub fn with_entries(entries: Vec<PlatformInfo>) -> Result<Self> {
        let entries = index_unique(entries)?;
        debug!(platforms = entries.len(), "built platform catalog");
        Ok(Self { entries })
    }

    /// Layer project-local entries over this catalog.
    ///
    /// A local entry replaces an existing entry with the same type code.
    /// Codes must still be unique among the local entries themselves.
    pub fn extended(mut self, local: Vec<PlatformInfo>) -> Result<Self> {
        for (code, info) in index_unique(local)? {
            if self.entries.insert(code.clone(), info).is_some() {
                debug!(platform = %code, "local catalog entry replaces built-in");
            }
        }
        Ok(self)
    }

    /// Look up a platform type.
    pub fn lookup(&self, platform_type: &PlatformType) -> Option<&PlatformInfo> {
        self.entries.get(platform_type)
    }

    pub fn contains(&self, platform_type: &PlatformType) -> bool {
        self.entries.contains_key(platform_type)
    }

    /// Entries ordered by type code.
    pub fn iter(&self) -> impl Iterator<Item = &PlatformInfo> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PlatformCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn index_unique(entries: Vec<PlatformInfo>) -> Result<BTreeMap<PlatformType, PlatformInfo>> {
    let mut map = BTreeMap::new();
    for info in entries {
        let code = info.platform_type.clone();
        if map.insert(code.clone(), info).is_some() {
            return Err(CatalogError::DuplicatePlatform {
                code: code.to_string(),
            });
        }
    }
    Ok(map)
}
