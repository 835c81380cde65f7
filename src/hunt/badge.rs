//! Declarative badge unlock rules.
//!
//! Each rule pairs a trigger with the badge it awards. Rules are evaluated
//! independently against the post-transition state, so a single mission
//! completion can award several badges, and adding a badge never requires
//! touching the progress engine.
use serde::{Deserialize, Serialize};

/// Condition that earns a badge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTrigger {
    /// Complete a specific mission
    CompleteMission { mission_id: String },
    /// Reach (or pass) a level
    ReachLevel { level: u32 },
}

impl BadgeTrigger {
    /// Check the trigger against a completed-mission list and a level.
    pub fn is_satisfied(&self, completed: &[String], level: u32) -> bool {
        match self {
            BadgeTrigger::CompleteMission { mission_id } => {
                completed.iter().any(|id| id == mission_id)
            }
            BadgeTrigger::ReachLevel { level: required } => level >= *required,
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BadgeRule {
    pub badge_id: String,
    pub trigger: BadgeTrigger,
}

impl BadgeRule {
    pub fn on_mission(mission_id: &str, badge_id: &str) -> Self {
        Self {
            badge_id: badge_id.to_string(),
            trigger: BadgeTrigger::CompleteMission {
                mission_id: mission_id.to_string(),
            },
        }
    }

    pub fn on_level(level: u32, badge_id: &str) -> Self {
        Self {
            badge_id: badge_id.to_string(),
            trigger: BadgeTrigger::ReachLevel { level },
        }
    }
}

/// Return the badges newly earned under `rules`, in rule order.
///
/// Badges already in `unlocked` are skipped, and a badge reachable through
/// several rules is reported once.
pub fn evaluate_rules(
    rules: &[BadgeRule],
    completed: &[String],
    level: u32,
    unlocked: &[String],
) -> Vec<String> {
    let mut awarded: Vec<String> = Vec::new();

    for rule in rules {
        if unlocked.iter().any(|id| *id == rule.badge_id)
            || awarded.iter().any(|id| *id == rule.badge_id)
        {
            continue;
        }
        if rule.trigger.is_satisfied(completed, level) {
            awarded.push(rule.badge_id.clone());
        }
    }

    awarded
}
