//! Plain-text views for the command line.
//!
//! Each function is a pure projection of the current state and catalog into
//! a printable block; nothing here mutates or caches.

use std::fmt::Write;

use crate::hunt::catalog::Catalog;
use crate::hunt::status::{completion_summary, level_progress, mission_board, next_mission};
use crate::hunt::types::{Mission, MissionStatus, UserState};
use crate::shell::terminal::TerminalSession;

const BAR_WIDTH: usize = 20;

fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn status_marker(status: MissionStatus) -> &'static str {
    match status {
        MissionStatus::Locked => "[LOCKED]",
        MissionStatus::Active => "[ACTIVE]",
        MissionStatus::Completed => "[  OK  ]",
    }
}

/// Username, access level and XP bar.
pub fn render_sidebar(state: &UserState, catalog: &Catalog) -> String {
    let progress = level_progress(state, catalog);
    let target = match progress.next_threshold {
        Some(xp) => format!("{} / {} XP", progress.xp, xp),
        None => format!("{} XP (max level)", progress.xp),
    };
    format!(
        "{} | Access Level {} | {} {}% {}",
        state.username,
        progress.level,
        progress_bar(progress.percent),
        progress.percent,
        target
    )
}

pub fn render_dashboard(state: &UserState, catalog: &Catalog) -> String {
    let (done, total) = completion_summary(state, catalog);
    let mut out = String::new();
    let _ = writeln!(out, "== Control Panel ==");
    let _ = writeln!(out, "Systems online. Welcome, Engineer.");
    let _ = writeln!(out);
    let _ = writeln!(out, "Missions completed : {} / {}", done, total);
    let _ = writeln!(out, "Total XP           : {}", state.current_xp);
    let _ = writeln!(out, "Access level       : Lvl {}", state.level);
    let _ = writeln!(out);
    let _ = writeln!(out, "-- Next Protocol --");
    match next_mission(state, catalog) {
        Some(mission) => out.push_str(&render_mission_line(mission, MissionStatus::Active)),
        None => out.push_str("All available missions have been completed.\n"),
    }
    out
}

fn render_mission_line(mission: &Mission, status: MissionStatus) -> String {
    format!(
        "{} #{} {} ({}, {} XP, level {}) [{}]\n",
        status_marker(status),
        mission.number(),
        mission.title,
        mission.difficulty.label(),
        mission.xp_reward,
        mission.required_level,
        mission.id
    )
}

pub fn render_missions(state: &UserState, catalog: &Catalog) -> String {
    let mut out = String::from("== Mission Archive ==\n");
    for (mission, status) in mission_board(state, catalog) {
        out.push_str(&render_mission_line(mission, status));
        if status != MissionStatus::Locked {
            let _ = writeln!(out, "         {}", mission.description);
        }
    }
    out
}

pub fn render_badges(state: &UserState, catalog: &Catalog) -> String {
    let mut out = String::from("== Achievements ==\n");
    for badge in catalog.badges() {
        if state.has_badge(&badge.id) {
            let _ = writeln!(out, "{} {} - {}", badge.icon, badge.name, badge.description);
        } else {
            let _ = writeln!(out, "?? {} (locked) - {}", badge.name, badge.description);
        }
    }
    out
}

/// Storyline and clue shown when a terminal opens.
pub fn render_briefing(mission: &Mission) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} :: SECURE_SHELL_V2 ==", mission.title);
    let _ = writeln!(out, "{}", mission.storyline);
    if let Some(url) = &mission.clue_url {
        let _ = writeln!(out, "External data: {}", url);
    }
    out
}

/// Transcript lines from `from` onwards, one per line.
pub fn render_transcript(session: &TerminalSession, from: usize) -> String {
    session
        .logs()
        .iter()
        .skip(from)
        .map(|line| line.render() + "\n")
        .collect()
}
