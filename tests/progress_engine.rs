/// Integration tests for the completion transition and status projections.
/// Exercises the committed seed catalog end to end through the public API.
mod common;

use codexhunt::hunt::{
    canonical_catalog, complete_mission, level_progress, mission_status, next_mission,
    next_state, Badge, BadgeRule, Catalog, Completion, Difficulty, Mission, MissionStatus,
    SkipReason, UserState,
};

fn small_catalog() -> Catalog {
    Catalog::new(
        vec![
            Mission::new("a", "A", "d", "s", Difficulty::Beginner, 150, "x", "h", 1),
            Mission::new("b", "B", "d", "s", Difficulty::Expert, 5000, "y", "h", 1),
        ],
        vec![
            Badge::new("first", "First", "*", "did a"),
            Badge::new("veteran", "Veteran", "#", "level 3"),
        ],
        vec![0, 100, 300],
        vec![
            BadgeRule::on_mission("a", "first"),
            BadgeRule::on_level(3, "veteran"),
        ],
    )
    .unwrap()
}

#[test]
fn test_seed_file_matches_canonical_catalog() {
    assert_eq!(common::seed_catalog(), canonical_catalog());
}

#[test]
fn test_first_mission_flow() {
    let catalog = common::seed_catalog();
    let state = UserState::default();

    let after = next_state(&state, "m001", &catalog);
    assert_eq!(after.level, 2);
    assert_eq!(after.current_xp, 100);
    assert_eq!(after.completed_missions, vec!["m001"]);
    assert_eq!(after.unlocked_badges, vec!["b001"]);

    // m003 opens at level 2
    let m003 = catalog.mission("m003").unwrap();
    assert_eq!(mission_status(&state, m003), MissionStatus::Locked);
    assert_eq!(mission_status(&after, m003), MissionStatus::Active);
    assert_eq!(next_mission(&after, &catalog).unwrap().id, "m002");
}

#[test]
fn test_replay_is_a_no_op() {
    let catalog = common::seed_catalog();
    let once = next_state(&UserState::default(), "m002", &catalog);
    let twice = complete_mission(&once, "m002", &catalog);
    assert_eq!(twice, Completion::Skipped(SkipReason::AlreadyCompleted));
    assert_eq!(twice.into_state(&once), once);
}

#[test]
fn test_unknown_mission_is_a_no_op() {
    let catalog = common::seed_catalog();
    let state = UserState::new("neo");
    assert_eq!(
        complete_mission(&state, "m404", &catalog),
        Completion::Skipped(SkipReason::UnknownMission)
    );
    assert_eq!(next_state(&state, "m404", &catalog), state);
}

#[test]
fn test_level_up_is_single_step() {
    let catalog = small_catalog();
    let after = next_state(&UserState::default(), "b", &catalog);
    // 5000 XP crosses every threshold but only one level is gained
    assert_eq!(after.level, 2);
    assert_eq!(after.current_xp, 5000);

    let again = next_state(&after, "a", &catalog);
    assert_eq!(again.level, 3);
    assert_eq!(again.unlocked_badges, vec!["first", "veteran"]);
}

#[test]
fn test_full_seed_run() {
    let catalog = common::seed_catalog();
    let mut state = UserState::default();
    for id in ["m001", "m002", "m003"] {
        state = next_state(&state, id, &catalog);
    }
    assert_eq!(state.current_xp, 550);
    // 100 -> L2, 250 < 300 stays L2, 550 -> L3
    assert_eq!(state.level, 3);
    assert_eq!(state.unlocked_badges, vec!["b001", "b002"]);
    assert!(next_mission(&state, &catalog).is_none());

    let progress = level_progress(&state, &catalog);
    assert_eq!(progress.next_threshold, Some(600));
    assert_eq!(progress.percent, 92);
}

#[test]
fn test_state_invariants_hold_across_orders() {
    let catalog = small_catalog();
    for order in [["a", "b"], ["b", "a"]] {
        let mut state = UserState::default();
        for id in order {
            let before = state.clone();
            state = next_state(&state, id, &catalog);
            assert!(state.level >= before.level);
            assert!(state.current_xp >= before.current_xp);
            assert!(before
                .unlocked_badges
                .iter()
                .all(|b| state.unlocked_badges.contains(b)));
        }
        let mut unique = state.completed_missions.clone();
        unique.dedup();
        assert_eq!(unique.len(), state.completed_missions.len());
    }
}
