//! # Codexhunt - Progression Tracker for a Programming Treasure Hunt
//!
//! Codexhunt tracks a player ("Engineer") through a fixed catalog of puzzle
//! missions. Solving a mission awards XP, may raise the access level and may
//! unlock badges; progress is saved as a single JSON snapshot.
//!
//! ## Features
//!
//! - **Pure Progress Engine**: idempotent completion transition with
//!   threshold-table level-ups and declarative badge rules.
//! - **Data-Driven Catalog**: built-in missions and badges, overridable by a
//!   JSON seed file.
//! - **Mission Terminal**: simulated secure shell with answer verification and
//!   cancelable deferred rewards.
//! - **Oracle Hints**: optional Gemini-backed hints that never fail the player.
//! - **Persistence**: fs2-locked JSON snapshot that falls back to a fresh
//!   state when missing or corrupt.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use codexhunt::config::Config;
//! use codexhunt::hunt::resolve_catalog;
//! use codexhunt::shell::HuntShell;
//! use codexhunt::storage::JsonFileStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let catalog = resolve_catalog(config.storage.catalog_file.as_deref());
//!     let store = JsonFileStore::new(&config.storage.data_dir, &config.storage.save_key);
//!
//!     let mut shell = HuntShell::open(catalog, store, config.hunt.clone());
//!     shell.complete_now("m001");
//!     println!("Level {}", shell.state().level);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`hunt`] - Domain model, catalog, progress engine and projections
//! - [`shell`] - Terminal sessions, scheduler, hint client and text views
//! - [`storage`] - Progress snapshot persistence
//! - [`config`] - Configuration management
//! - [`metrics`] - Process-wide counters
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   CLI / Shell   │ ← Views, terminal, deferred transitions
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Hunt Engine   │ ← Pure state transitions and projections
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Storage       │ ← Snapshot persistence
//! └─────────────────┘
//! ```

pub mod config;
pub mod hunt;
pub mod logutil;
pub mod metrics;
pub mod shell;
pub mod storage;
