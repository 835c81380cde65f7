//! # Hunt Shell
//!
//! Explicit application state for one player: the catalog, the current
//! [`UserState`], the persistence collaborator, the selected view, the open
//! mission terminal (if any) and the queue of deferred transitions.
//!
//! ## Flow
//!
//! ```text
//! Dashboard ──open_mission──▶ Terminal ──submit(correct)──▶ [success_delay]
//!     ▲                                                          │
//!     │                                                CompleteMission
//!     │                                                 (engine + save)
//!     └──────── ReturnToDashboard ◀──── [completion_delay] ◀─────┘
//! ```
//!
//! Time is always passed in by the caller, so the same code drives the
//! interactive `play` loop and deterministic tests.

use log::{debug, info, warn};
use std::time::Instant;

use crate::config::HuntConfig;
use crate::hunt::catalog::Catalog;
use crate::hunt::errors::HuntError;
use crate::hunt::progress::{complete_mission, Completion, SkipReason};
use crate::hunt::status::mission_status;
use crate::hunt::types::{MissionStatus, UserState, DEFAULT_USERNAME};
use crate::logutil::escape_log;
use crate::metrics;
use crate::shell::scheduler::Scheduler;
use crate::shell::terminal::{HintRequest, LogLevel, SubmitOutcome, TerminalSession};
use crate::storage::{sanitize_state, ProgressStore};

/// Name for a fresh snapshot: the configured one, unless it is blank.
fn configured_username(config: &HuntConfig) -> String {
    let name = config.username.trim();
    if name.is_empty() {
        DEFAULT_USERNAME.to_string()
    } else {
        name.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Missions,
    Badges,
}

/// Deferred transitions queued by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    CompleteMission(String),
    ReturnToDashboard,
}

pub struct HuntShell<S: ProgressStore> {
    catalog: Catalog,
    state: UserState,
    store: S,
    config: HuntConfig,
    view: View,
    active: Option<TerminalSession>,
    scheduler: Scheduler<ShellAction>,
}

impl<S: ProgressStore> HuntShell<S> {
    /// Restore the player's snapshot and start on the dashboard.
    pub fn open(catalog: Catalog, store: S, config: HuntConfig) -> Self {
        let mut state = sanitize_state(store.load(), &catalog);
        if state.username == DEFAULT_USERNAME {
            state.username = configured_username(&config);
        }
        info!(
            "Shell opened for {} (level {}, {} XP, {} missions done)",
            escape_log(&state.username),
            state.level,
            state.current_xp,
            state.completed_missions.len()
        );
        Self {
            catalog,
            state,
            store,
            config,
            view: View::Dashboard,
            active: None,
            scheduler: Scheduler::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn active(&self) -> Option<&TerminalSession> {
        self.active.as_ref()
    }

    /// Earliest pending deferred transition.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn has_pending(&self) -> bool {
        !self.scheduler.is_empty()
    }

    pub fn select_view(&mut self, view: View) {
        self.view = view;
    }

    /// Open the terminal for `mission_id`. Any previously open terminal is
    /// closed first.
    pub fn open_mission(&mut self, mission_id: &str) -> Result<&TerminalSession, HuntError> {
        let mission = self.catalog.mission(mission_id)?;
        if mission_status(&self.state, mission) == MissionStatus::Locked {
            return Err(HuntError::MissionLocked {
                mission_id: mission.id.clone(),
                required_level: mission.required_level,
            });
        }
        let session = TerminalSession::new(mission);
        self.close_mission();
        debug!("Opening terminal for {}", mission_id);
        Ok(self.active.insert(session))
    }

    /// Dismiss the terminal. Pending deferred transitions are dropped.
    pub fn close_mission(&mut self) {
        let dropped = self.scheduler.cancel_all();
        if let Some(session) = self.active.take() {
            if dropped > 0 {
                info!(
                    "Terminal for {} closed with {} pending transition(s) cancelled",
                    session.mission().id,
                    dropped
                );
            }
        }
    }

    /// Forward an answer to the open terminal. A correct answer schedules the
    /// reward after the configured success delay.
    pub fn submit(&mut self, input: &str, now: Instant) -> SubmitOutcome {
        let Some(session) = self.active.as_mut() else {
            return SubmitOutcome::Ignored;
        };
        let outcome = session.submit(input);
        if outcome == SubmitOutcome::Accepted {
            let mission_id = session.mission().id.clone();
            self.scheduler.schedule(
                now,
                self.config.success_delay(),
                ShellAction::CompleteMission(mission_id),
            );
        }
        outcome
    }

    /// Run every deferred transition due at `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<ShellAction> {
        let due = self.scheduler.poll_due(now);
        for action in &due {
            match action {
                ShellAction::CompleteMission(id) => {
                    let completion = self.complete_now(id);
                    if let Some(session) = self.active.as_mut() {
                        let text = match &completion {
                            Completion::Applied(report) => {
                                format!("REWARD APPLIED: +{} XP", report.xp_awarded)
                            }
                            Completion::Skipped(_) => "REWARD ALREADY CLAIMED.".to_string(),
                        };
                        session.log(LogLevel::Success, &text);
                    }
                    self.scheduler.schedule(
                        now,
                        self.config.completion_delay(),
                        ShellAction::ReturnToDashboard,
                    );
                }
                ShellAction::ReturnToDashboard => {
                    self.active = None;
                    self.view = View::Dashboard;
                    debug!("Returned to dashboard");
                }
            }
        }
        due
    }

    /// Apply the completion transition immediately and persist the result.
    pub fn complete_now(&mut self, mission_id: &str) -> Completion {
        let completion = complete_mission(&self.state, mission_id, &self.catalog);
        match &completion {
            Completion::Applied(report) => {
                self.state = report.state.clone();
                metrics::inc_missions_completed();
                info!(
                    "Mission {} completed: +{} XP, level {} -> {}, new badges {:?}",
                    report.mission_id,
                    report.xp_awarded,
                    report.previous_level,
                    report.new_level,
                    report.new_badges
                );
                self.persist();
            }
            Completion::Skipped(SkipReason::AlreadyCompleted) => {
                debug!("Mission {} already completed; nothing awarded", mission_id);
            }
            Completion::Skipped(SkipReason::UnknownMission) => {
                warn!("Completion for unknown mission {} ignored", mission_id);
            }
        }
        completion
    }

    pub fn begin_hint(&mut self, query: Option<&str>) -> Option<HintRequest> {
        self.active.as_mut()?.begin_hint(query)
    }

    pub fn finish_hint(&mut self, text: &str) {
        if let Some(session) = self.active.as_mut() {
            session.finish_hint(text);
        }
    }

    /// Change the display name and persist it.
    pub fn rename(&mut self, username: &str) -> Result<(), HuntError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(HuntError::InvalidUsername("username cannot be empty".into()));
        }
        self.state.username = username.to_string();
        self.store.save(&self.state)
    }

    /// Wipe all progress.
    pub fn reset(&mut self) -> Result<(), HuntError> {
        self.close_mission();
        self.store.reset()?;
        self.state = UserState::new(&configured_username(&self.config));
        self.view = View::Dashboard;
        info!("Progress reset for {}", escape_log(&self.state.username));
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.state) {
            warn!("Failed to save progress: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hunt::seeds::canonical_catalog;
    use crate::storage::MemoryStore;
    use std::time::Duration;

    fn shell() -> HuntShell<MemoryStore> {
        HuntShell::open(canonical_catalog(), MemoryStore::new(), HuntConfig::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn reward_is_deferred_then_dashboard_returns() {
        let mut shell = shell();
        let t0 = Instant::now();
        shell.select_view(View::Missions);
        shell.open_mission("m001").unwrap();

        assert_eq!(
            shell.submit("o tempo esta a despertar", t0),
            SubmitOutcome::Accepted
        );
        assert_eq!(shell.state().current_xp, 0);

        assert!(shell.tick(t0 + ms(1999)).is_empty());
        let fired = shell.tick(t0 + ms(2000));
        assert_eq!(fired, vec![ShellAction::CompleteMission("m001".into())]);
        assert_eq!(shell.state().level, 2);
        assert_eq!(shell.store().snapshot().unwrap(), *shell.state());
        assert!(shell.active().is_some());

        shell.tick(t0 + ms(4500));
        assert!(shell.active().is_none());
        assert_eq!(shell.view(), View::Dashboard);
    }

    #[test]
    fn closing_terminal_cancels_reward() {
        let mut shell = shell();
        let t0 = Instant::now();
        shell.open_mission("m002").unwrap();
        shell.submit("HTTP", t0);
        shell.close_mission();

        assert!(shell.tick(t0 + ms(10_000)).is_empty());
        assert_eq!(shell.state().current_xp, 0);
        assert!(shell.store().snapshot().is_none());
    }

    #[test]
    fn locked_and_unknown_missions_refused() {
        let mut shell = shell();
        assert!(matches!(
            shell.open_mission("m003"),
            Err(HuntError::MissionLocked { required_level: 2, .. })
        ));
        assert!(matches!(
            shell.open_mission("m999"),
            Err(HuntError::NotFound(_))
        ));
    }

    #[test]
    fn username_from_config_applies_to_fresh_snapshot() {
        let config = HuntConfig {
            username: "neo".into(),
            ..HuntConfig::default()
        };
        let shell = HuntShell::open(canonical_catalog(), MemoryStore::new(), config);
        assert_eq!(shell.state().username, "neo");
    }

    #[test]
    fn blank_configured_name_keeps_placeholder() {
        let config = HuntConfig {
            username: "   ".into(),
            ..HuntConfig::default()
        };
        let mut shell = HuntShell::open(canonical_catalog(), MemoryStore::new(), config);
        assert_eq!(shell.state().username, DEFAULT_USERNAME);

        shell.rename("neo").unwrap();
        shell.reset().unwrap();
        assert_eq!(shell.state().username, DEFAULT_USERNAME);
    }

    #[test]
    fn rename_and_reset_persist() {
        let mut shell = shell();
        shell.complete_now("m001");
        shell.rename("  trinity ").unwrap();
        assert_eq!(shell.store().snapshot().unwrap().username, "trinity");
        assert!(shell.rename("   ").is_err());

        shell.reset().unwrap();
        assert_eq!(shell.state().level, 1);
        assert!(shell.state().completed_missions.is_empty());
        assert!(shell.store().snapshot().is_none());
    }

    #[test]
    fn hints_need_an_open_terminal() {
        let mut shell = shell();
        assert!(shell.begin_hint(None).is_none());
        shell.open_mission("m001").unwrap();
        let request = shell.begin_hint(Some("where?")).unwrap();
        assert_eq!(request.mission_title, "O Portal");
        shell.finish_hint("Look at the comments.");
        assert!(!shell.active().unwrap().hint_in_flight());
    }
}
