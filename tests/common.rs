//! Test utilities & fixtures.
//! Provides the seed catalog shipped in `data/seeds` and throwaway stores.

use std::path::{Path, PathBuf};

use codexhunt::config::HuntConfig;
use codexhunt::hunt::{load_catalog_from_json, Catalog};
use codexhunt::storage::{JsonFileStore, DEFAULT_SAVE_KEY};

/// Path to the catalog seed committed with the repository.
pub fn seed_catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("seeds")
        .join("catalog.json")
}

/// Catalog loaded from the committed seed file.
#[allow(dead_code)]
pub fn seed_catalog() -> Catalog {
    load_catalog_from_json(seed_catalog_path()).expect("seed catalog")
}

/// Fresh JSON store rooted in a temp dir. Keep the `TempDir` alive for the test.
#[allow(dead_code)]
pub fn temp_store() -> (tempfile::TempDir, JsonFileStore) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(tmp.path().join("data"), DEFAULT_SAVE_KEY);
    (tmp, store)
}

/// Shell timing with short, explicit delays.
#[allow(dead_code)]
pub fn fast_config() -> HuntConfig {
    HuntConfig {
        username: "tester".to_string(),
        success_delay_ms: 20,
        completion_delay_ms: 30,
    }
}
