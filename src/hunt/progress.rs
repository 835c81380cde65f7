//! Mission completion transition.
//!
//! Pure function over (state, mission id, catalog): no I/O, no clock, no
//! randomness. Unknown ids and already-completed missions are absorbed as
//! no-ops so a replayed or malformed event can never double-award XP or
//! badges.
use crate::hunt::badge::evaluate_rules;
use crate::hunt::catalog::{Catalog, UNREACHABLE_XP};
use crate::hunt::types::UserState;

/// Why a completion event left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnknownMission,
    AlreadyCompleted,
}

/// Details of an applied completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub state: UserState,
    pub mission_id: String,
    pub xp_awarded: u32,
    pub previous_level: u32,
    pub new_level: u32,
    pub new_badges: Vec<String>,
}

impl CompletionReport {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.previous_level
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied(CompletionReport),
    Skipped(SkipReason),
}

impl Completion {
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied(_))
    }

    pub fn leveled_up(&self) -> bool {
        match self {
            Completion::Applied(report) => report.leveled_up(),
            Completion::Skipped(_) => false,
        }
    }

    /// The resulting state: the new snapshot, or `original` when skipped.
    pub fn into_state(self, original: &UserState) -> UserState {
        match self {
            Completion::Applied(report) => report.state,
            Completion::Skipped(_) => original.clone(),
        }
    }
}

/// Apply a mission completion event.
///
/// The level check is single-step: XP is compared against the threshold of
/// the level currently held, and at most one level is gained per event even
/// when the reward also clears the following thresholds.
pub fn complete_mission(state: &UserState, mission_id: &str, catalog: &Catalog) -> Completion {
    let mission = match catalog.mission(mission_id) {
        Ok(mission) => mission,
        Err(_) => return Completion::Skipped(SkipReason::UnknownMission),
    };
    if state.has_completed(mission_id) {
        return Completion::Skipped(SkipReason::AlreadyCompleted);
    }

    let new_xp = state.current_xp.saturating_add(mission.xp_reward);

    let threshold = catalog.threshold_for(state.level);
    let mut new_level = state.level;
    if threshold != UNREACHABLE_XP && new_xp >= threshold {
        new_level += 1;
    }

    let mut completed = state.completed_missions.clone();
    completed.push(mission_id.to_string());

    let new_badges = evaluate_rules(
        catalog.rules(),
        &completed,
        new_level,
        &state.unlocked_badges,
    );
    let mut unlocked = state.unlocked_badges.clone();
    unlocked.extend(new_badges.iter().cloned());

    Completion::Applied(CompletionReport {
        state: UserState {
            level: new_level,
            current_xp: new_xp,
            completed_missions: completed,
            unlocked_badges: unlocked,
            username: state.username.clone(),
        },
        mission_id: mission_id.to_string(),
        xp_awarded: mission.xp_reward,
        previous_level: state.level,
        new_level,
        new_badges,
    })
}

/// Convenience wrapper returning only the next state.
pub fn next_state(state: &UserState, mission_id: &str, catalog: &Catalog) -> UserState {
    complete_mission(state, mission_id, catalog).into_state(state)
}
