//! Read-only projections over the current `UserState` and catalog.
//!
//! Everything here is recomputed on demand; nothing is cached, so results are
//! always consistent with the latest state.
use crate::hunt::catalog::{Catalog, UNREACHABLE_XP};
use crate::hunt::types::{Mission, MissionStatus, UserState};

pub fn mission_status(state: &UserState, mission: &Mission) -> MissionStatus {
    if state.has_completed(&mission.id) {
        MissionStatus::Completed
    } else if mission.required_level <= state.level {
        MissionStatus::Active
    } else {
        MissionStatus::Locked
    }
}

pub fn is_badge_unlocked(state: &UserState, badge_id: &str) -> bool {
    state.has_badge(badge_id)
}

/// First mission in catalog order that is attemptable and not yet completed.
pub fn next_mission<'a>(state: &UserState, catalog: &'a Catalog) -> Option<&'a Mission> {
    catalog
        .missions()
        .iter()
        .find(|m| mission_status(state, m) == MissionStatus::Active)
}

/// Missions paired with their current status, in display order.
pub fn mission_board<'a>(
    state: &UserState,
    catalog: &'a Catalog,
) -> Vec<(&'a Mission, MissionStatus)> {
    catalog
        .missions()
        .iter()
        .map(|m| (m, mission_status(state, m)))
        .collect()
}

/// XP bar shown next to the username.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    pub xp: u32,
    /// `None` once the threshold table is exhausted
    pub next_threshold: Option<u32>,
    pub percent: u32,
}

pub fn level_progress(state: &UserState, catalog: &Catalog) -> LevelProgress {
    let threshold = catalog.threshold_for(state.level);
    if threshold == UNREACHABLE_XP {
        return LevelProgress {
            level: state.level,
            xp: state.current_xp,
            next_threshold: None,
            percent: 100,
        };
    }
    // Nearest whole percent, halves round up
    let xp = state.current_xp as u64;
    let threshold_xp = threshold as u64;
    let percent = ((xp * 200 + threshold_xp) / (threshold_xp * 2)).min(100) as u32;
    LevelProgress {
        level: state.level,
        xp: state.current_xp,
        next_threshold: Some(threshold),
        percent,
    }
}

/// (completed, total) counted against the catalog.
pub fn completion_summary(state: &UserState, catalog: &Catalog) -> (usize, usize) {
    let completed = catalog
        .missions()
        .iter()
        .filter(|m| state.has_completed(&m.id))
        .count();
    (completed, catalog.missions().len())
}
