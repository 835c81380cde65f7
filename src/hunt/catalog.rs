//! Read-only mission and badge catalog.
//!
//! The catalog is built once at startup (from the canonical seeds or a JSON
//! seed file) and never mutated. Catalog order is display order and decides
//! "next mission" precedence.
use std::collections::HashSet;

use crate::hunt::badge::{BadgeRule, BadgeTrigger};
use crate::hunt::errors::HuntError;
use crate::hunt::types::{Badge, Mission};

/// Threshold returned for levels past the end of the table ("max level reached").
pub const UNREACHABLE_XP: u32 = u32::MAX;

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    missions: Vec<Mission>,
    badges: Vec<Badge>,
    /// `thresholds[n]` is the cumulative XP needed to advance from level n to n+1.
    /// Index 0 is a sentinel.
    thresholds: Vec<u32>,
    rules: Vec<BadgeRule>,
}

impl Catalog {
    /// Build and validate a catalog.
    pub fn new(
        missions: Vec<Mission>,
        badges: Vec<Badge>,
        thresholds: Vec<u32>,
        rules: Vec<BadgeRule>,
    ) -> Result<Self, HuntError> {
        let catalog = Self {
            missions,
            badges,
            thresholds,
            rules,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Build without validation. Only for compiled-in data covered by tests.
    pub(crate) fn from_parts(
        missions: Vec<Mission>,
        badges: Vec<Badge>,
        thresholds: Vec<u32>,
        rules: Vec<BadgeRule>,
    ) -> Self {
        Self {
            missions,
            badges,
            thresholds,
            rules,
        }
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn thresholds(&self) -> &[u32] {
        &self.thresholds
    }

    pub fn rules(&self) -> &[BadgeRule] {
        &self.rules
    }

    pub fn mission(&self, id: &str) -> Result<&Mission, HuntError> {
        self.missions
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| HuntError::NotFound(format!("mission {}", id)))
    }

    pub fn badge(&self, id: &str) -> Result<&Badge, HuntError> {
        self.badges
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| HuntError::NotFound(format!("badge {}", id)))
    }

    pub fn contains_mission(&self, id: &str) -> bool {
        self.missions.iter().any(|m| m.id == id)
    }

    pub fn contains_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b.id == id)
    }

    /// XP required to advance from `level` to `level + 1`.
    ///
    /// Levels beyond the table, and zero entries, yield [`UNREACHABLE_XP`].
    pub fn threshold_for(&self, level: u32) -> u32 {
        match self.thresholds.get(level as usize) {
            Some(&xp) if xp > 0 => xp,
            _ => UNREACHABLE_XP,
        }
    }

    /// Highest level the threshold table lets a player reach.
    pub fn max_level(&self) -> u32 {
        let mut level = 1;
        while self.threshold_for(level) != UNREACHABLE_XP {
            level += 1;
        }
        level
    }

    /// Check structural rules: unique ids, rules pointing at known records,
    /// and a non-decreasing threshold table.
    pub fn validate(&self) -> Result<(), HuntError> {
        let mut seen = HashSet::new();
        for mission in &self.missions {
            if mission.id.trim().is_empty() {
                return Err(HuntError::InvalidCatalog("mission with empty id".into()));
            }
            if !seen.insert(mission.id.as_str()) {
                return Err(HuntError::InvalidCatalog(format!(
                    "duplicate mission id {}",
                    mission.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for badge in &self.badges {
            if !seen.insert(badge.id.as_str()) {
                return Err(HuntError::InvalidCatalog(format!(
                    "duplicate badge id {}",
                    badge.id
                )));
            }
        }

        for rule in &self.rules {
            if !self.contains_badge(&rule.badge_id) {
                return Err(HuntError::InvalidCatalog(format!(
                    "rule awards unknown badge {}",
                    rule.badge_id
                )));
            }
            match &rule.trigger {
                BadgeTrigger::CompleteMission { mission_id } => {
                    if !self.contains_mission(mission_id) {
                        return Err(HuntError::InvalidCatalog(format!(
                            "rule for badge {} references unknown mission {}",
                            rule.badge_id, mission_id
                        )));
                    }
                }
                BadgeTrigger::ReachLevel { level } => {
                    if *level == 0 {
                        return Err(HuntError::InvalidCatalog(format!(
                            "rule for badge {} requires level 0",
                            rule.badge_id
                        )));
                    }
                }
            }
        }

        let table = self.thresholds.iter().skip(1);
        for (prev, next) in table.clone().zip(table.skip(1)) {
            if next < prev {
                return Err(HuntError::InvalidCatalog(format!(
                    "threshold table decreases ({} -> {})",
                    prev, next
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hunt::types::Difficulty;

    fn mission(id: &str) -> Mission {
        Mission::new(id, "t", "d", "s", Difficulty::Beginner, 100, "a", "h", 1)
    }

    fn badge(id: &str) -> Badge {
        Badge::new(id, "n", "*", "d")
    }

    #[test]
    fn threshold_lookup_and_sentinel() {
        let catalog = Catalog::new(vec![], vec![], vec![0, 100, 300, 600, 1000, 1500], vec![])
            .unwrap();
        assert_eq!(catalog.threshold_for(1), 100);
        assert_eq!(catalog.threshold_for(5), 1500);
        assert_eq!(catalog.threshold_for(6), UNREACHABLE_XP);
        assert_eq!(catalog.threshold_for(0), UNREACHABLE_XP);
        assert_eq!(catalog.max_level(), 6);
    }

    #[test]
    fn lookup_reports_not_found() {
        let catalog = Catalog::new(vec![mission("m001")], vec![badge("b001")], vec![0, 100], vec![])
            .unwrap();
        assert_eq!(catalog.mission("m001").unwrap().id, "m001");
        assert!(matches!(catalog.mission("m404"), Err(HuntError::NotFound(_))));
        assert!(matches!(catalog.badge("b404"), Err(HuntError::NotFound(_))));
    }

    #[test]
    fn rejects_duplicate_mission_ids() {
        let err = Catalog::new(vec![mission("m001"), mission("m001")], vec![], vec![0], vec![])
            .unwrap_err();
        assert!(matches!(err, HuntError::InvalidCatalog(_)));
    }

    #[test]
    fn rejects_dangling_rules() {
        let err = Catalog::new(
            vec![mission("m001")],
            vec![badge("b001")],
            vec![0, 100],
            vec![BadgeRule::on_mission("m999", "b001")],
        )
        .unwrap_err();
        assert!(err.to_string().contains("m999"));

        let err = Catalog::new(
            vec![mission("m001")],
            vec![badge("b001")],
            vec![0, 100],
            vec![BadgeRule::on_level(5, "b404")],
        )
        .unwrap_err();
        assert!(err.to_string().contains("b404"));
    }

    #[test]
    fn rejects_decreasing_thresholds() {
        let err = Catalog::new(vec![], vec![], vec![0, 300, 100], vec![]).unwrap_err();
        assert!(matches!(err, HuntError::InvalidCatalog(_)));
    }
}
