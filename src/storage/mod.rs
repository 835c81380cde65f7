//! # Storage Module - Progress Persistence
//!
//! The hunt keeps a single opaque snapshot of the player's [`UserState`],
//! stored as one JSON file keyed by a fixed, versioned save key:
//!
//! ```text
//! data/
//! ├── codex_save_v1.json   ← progress snapshot
//! └── seeds/
//!     └── catalog.json     ← optional catalog override
//! ```
//!
//! ## Contract
//!
//! - `load()` never fails: an absent, unreadable or corrupt snapshot yields
//!   `UserState::default()` (level 1, 0 XP, empty lists, placeholder name).
//! - `save()` replaces the whole snapshot. Errors are returned to the caller,
//!   which logs them and keeps playing.
//! - File access is guarded with fs2 file locks (shared for read, exclusive
//!   for write).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use codexhunt::storage::{JsonFileStore, ProgressStore};
//!
//! let store = JsonFileStore::new("./data", "codex_save_v1");
//! let mut state = store.load();
//! state.username = "neo".to_string();
//! store.save(&state).expect("save progress");
//! ```

use fs2::FileExt;
use log::{debug, info, warn};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::hunt::catalog::Catalog;
use crate::hunt::errors::HuntError;
use crate::hunt::types::{UserState, STARTING_LEVEL};
use crate::logutil::escape_log;

/// Default save key; bump the suffix when the snapshot format changes.
pub const DEFAULT_SAVE_KEY: &str = "codex_save_v1";

/// Whole-snapshot persistence collaborator.
pub trait ProgressStore {
    /// Restore the snapshot, or the default state when none is usable.
    fn load(&self) -> UserState;
    /// Replace the snapshot.
    fn save(&self, state: &UserState) -> Result<(), HuntError>;
    /// Forget the snapshot so the next load yields the default state.
    fn reset(&self) -> Result<(), HuntError>;
}

/// JSON snapshot at `<data_dir>/<save_key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    save_key: String,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>, save_key: &str) -> Self {
        Self {
            data_dir: data_dir.into(),
            save_key: save_key.to_string(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.save_key))
    }

    fn ensure_dir(path: &Path) -> std::io::Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> UserState {
        let path = self.path();
        let mut f = match fs::OpenOptions::new().read(true).open(&path) {
            Ok(f) => f,
            Err(_) => {
                debug!("No snapshot at {:?}; starting fresh", path);
                return UserState::default();
            }
        };
        let _ = f.lock_shared();
        let mut s = String::new();
        let read = f.read_to_string(&mut s);
        let _ = f.unlock();
        if let Err(e) = read {
            warn!("storage: failed reading {:?}: {}", path, e);
            return UserState::default();
        }
        // A torn write can leave leading NULs behind
        let cleaned = s.trim_start_matches('\0');
        match serde_json::from_str(cleaned) {
            Ok(state) => state,
            Err(e) => {
                warn!("storage: corrupt snapshot {:?} ({}); using default state", path, e);
                UserState::default()
            }
        }
    }

    fn save(&self, state: &UserState) -> Result<(), HuntError> {
        Self::ensure_dir(&self.data_dir)?;
        let data = serde_json::to_string_pretty(state)?;
        let path = self.path();
        let mut f = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        f.lock_exclusive()?;
        let written = f
            .write_all(data.as_bytes())
            .and_then(|_| f.flush())
            .and_then(|_| f.sync_all());
        let _ = f.unlock();
        written?;
        debug!(
            "Saved snapshot for {} to {:?}",
            escape_log(&state.username),
            path
        );
        Ok(())
    }

    fn reset(&self) -> Result<(), HuntError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Progress snapshot {:?} removed", path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<UserState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: UserState) -> Self {
        Self {
            snapshot: Mutex::new(Some(state)),
        }
    }

    /// Last saved snapshot, if any.
    pub fn snapshot(&self) -> Option<UserState> {
        self.snapshot.lock().ok().and_then(|guard| guard.clone())
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> UserState {
        self.snapshot().unwrap_or_default()
    }

    fn save(&self, state: &UserState) -> Result<(), HuntError> {
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| HuntError::Internal("memory store mutex poisoned".into()))?;
        *guard = Some(state.clone());
        Ok(())
    }

    fn reset(&self) -> Result<(), HuntError> {
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| HuntError::Internal("memory store mutex poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

/// Drop references the catalog no longer knows about, collapse duplicates and
/// clamp the level so a restored snapshot satisfies the state invariants.
pub fn sanitize_state(state: UserState, catalog: &Catalog) -> UserState {
    let mut clean = UserState {
        level: state.level.max(STARTING_LEVEL),
        current_xp: state.current_xp,
        completed_missions: Vec::with_capacity(state.completed_missions.len()),
        unlocked_badges: Vec::with_capacity(state.unlocked_badges.len()),
        username: state.username,
    };

    for id in state.completed_missions {
        if !catalog.contains_mission(&id) {
            warn!("storage: dropping unknown mission id {}", escape_log(&id));
        } else if !clean.completed_missions.contains(&id) {
            clean.completed_missions.push(id);
        }
    }
    for id in state.unlocked_badges {
        if !catalog.contains_badge(&id) {
            warn!("storage: dropping unknown badge id {}", escape_log(&id));
        } else if !clean.unlocked_badges.contains(&id) {
            clean.unlocked_badges.push(id);
        }
    }

    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hunt::seeds::canonical_catalog;
    use tempfile::tempdir;

    #[test]
    fn json_store_round_trips_snapshot() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data"), DEFAULT_SAVE_KEY);

        let mut state = UserState::new("trinity");
        state.level = 2;
        state.current_xp = 100;
        state.completed_missions.push("m001".into());
        store.save(&state).unwrap();

        assert!(store.path().ends_with("codex_save_v1.json"));
        assert_eq!(store.load(), state);
    }

    #[test]
    fn missing_or_corrupt_snapshot_loads_default() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path(), DEFAULT_SAVE_KEY);
        assert_eq!(store.load(), UserState::default());

        fs::write(store.path(), "{\"level\": \"nope\"").unwrap();
        assert_eq!(store.load(), UserState::default());
    }

    #[test]
    fn leading_nuls_are_ignored() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path(), DEFAULT_SAVE_KEY);
        let json = serde_json::to_string(&UserState::new("morpheus")).unwrap();
        fs::write(store.path(), format!("\0\0{}", json)).unwrap();
        assert_eq!(store.load().username, "morpheus");
    }

    #[test]
    fn reset_removes_snapshot_and_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path(), DEFAULT_SAVE_KEY);
        store.save(&UserState::new("x")).unwrap();
        store.reset().unwrap();
        assert!(!store.path().exists());
        store.reset().unwrap();
        assert_eq!(store.load(), UserState::default());
    }

    #[test]
    fn memory_store_behaves_like_file_store() {
        let store = MemoryStore::new();
        assert_eq!(store.load(), UserState::default());
        store.save(&UserState::new("x")).unwrap();
        assert_eq!(store.load().username, "x");
        store.reset().unwrap();
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn sanitize_drops_unknown_and_duplicate_ids() {
        let catalog = canonical_catalog();
        let state = UserState {
            level: 0,
            current_xp: 100,
            completed_missions: vec!["m001".into(), "m001".into(), "ghost".into()],
            unlocked_badges: vec!["b001".into(), "b999".into()],
            username: "x".into(),
        };
        let clean = sanitize_state(state, &catalog);
        assert_eq!(clean.level, 1);
        assert_eq!(clean.completed_missions, vec!["m001"]);
        assert_eq!(clean.unlocked_badges, vec!["b001"]);
        assert_eq!(clean.current_xp, 100);
    }
}
