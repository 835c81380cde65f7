//! Seed data loader for data-driven catalog initialization
//!
//! The catalog can be loaded from `data/seeds/catalog.json` so operators can
//! add missions, badges and unlock rules without recompiling.

use crate::hunt::badge::BadgeRule;
use crate::hunt::catalog::Catalog;
use crate::hunt::seeds::canonical_catalog;
use crate::hunt::types::{Badge, Mission};
use crate::hunt::HuntError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk catalog schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSeed {
    pub missions: Vec<Mission>,
    #[serde(default)]
    pub badges: Vec<Badge>,
    pub thresholds: Vec<u32>,
    #[serde(default)]
    pub rules: Vec<BadgeRule>,
}

impl From<&Catalog> for CatalogSeed {
    fn from(catalog: &Catalog) -> Self {
        Self {
            missions: catalog.missions().to_vec(),
            badges: catalog.badges().to_vec(),
            thresholds: catalog.thresholds().to_vec(),
            rules: catalog.rules().to_vec(),
        }
    }
}

/// Load and validate a catalog from a JSON seed file.
pub fn load_catalog_from_json<P: AsRef<Path>>(path: P) -> Result<Catalog, HuntError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let seed: CatalogSeed = serde_json::from_str(&contents).map_err(|e| {
        HuntError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Failed to parse {}: {}", path.display(), e),
        ))
    })?;

    Catalog::new(seed.missions, seed.badges, seed.thresholds, seed.rules)
}

/// Write `catalog` as a pretty-printed seed file, creating parent directories.
pub fn write_catalog_json<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<(), HuntError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let data = serde_json::to_string_pretty(&CatalogSeed::from(catalog))?;
    fs::write(path, data)?;
    Ok(())
}

/// Use the seed file when one is configured and loads cleanly, otherwise the
/// compiled-in catalog.
pub fn resolve_catalog(seed_path: Option<&str>) -> Catalog {
    let Some(path) = seed_path else {
        debug!("No catalog seed configured; using canonical catalog");
        return canonical_catalog();
    };
    if !Path::new(path).exists() {
        debug!("Catalog seed {} not present; using canonical catalog", path);
        return canonical_catalog();
    }
    match load_catalog_from_json(path) {
        Ok(catalog) => {
            debug!(
                "Loaded catalog from {} ({} missions, {} badges)",
                path,
                catalog.missions().len(),
                catalog.badges().len()
            );
            catalog
        }
        Err(e) => {
            warn!("Catalog seed {} unusable ({}); using canonical catalog", path, e);
            canonical_catalog()
        }
    }
}
