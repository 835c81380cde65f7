//! Hunt domain: catalog data, the progress engine and its projections.
//! Nothing in here performs I/O except the seed loader; the completion
//! transition and every projection are pure functions.

pub mod answer;
pub mod badge;
pub mod catalog;
pub mod errors;
pub mod progress;
pub mod seed_loader;
pub mod seeds;
pub mod status;
pub mod types;

pub use answer::{normalize_answer, verify_answer};
pub use badge::{evaluate_rules, BadgeRule, BadgeTrigger};
pub use catalog::{Catalog, UNREACHABLE_XP};
pub use errors::HuntError;
pub use progress::{complete_mission, next_state, Completion, CompletionReport, SkipReason};
pub use seed_loader::{load_catalog_from_json, resolve_catalog, write_catalog_json, CatalogSeed};
pub use seeds::canonical_catalog;
pub use status::{
    completion_summary, is_badge_unlocked, level_progress, mission_board, mission_status,
    next_mission, LevelProgress,
};
pub use types::*;
