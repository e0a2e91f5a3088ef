//! Unit tests for the status transition guard.

use crate::task::domain::{
    Blocker, BlockingSet, DanglingPolicy, Task, TaskCode, TaskIndex, TaskStatus, TransitionGuard,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::collections::BTreeSet;

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn code(raw: &str) -> TaskCode {
    TaskCode::try_from(raw).expect("valid task code")
}

/// Builds a task with the given code, dependencies, and status.
fn task(raw_code: &str, dependencies: &[&str], status: TaskStatus) -> Task {
    let clock = DefaultClock;
    let deps: BTreeSet<TaskCode> = dependencies.iter().map(|raw| code(raw)).collect();
    let mut built = Task::new(code(raw_code), None, raw_code, "", deps, &clock)
        .expect("valid task");
    built.transition_to(status, &clock);
    built
}

fn blocker_codes(set: &BlockingSet) -> Vec<String> {
    set.iter().map(|blocker| blocker.code().to_string()).collect()
}

#[rstest]
#[case(TaskStatus::Open)]
#[case(TaskStatus::InProgress)]
fn non_close_targets_never_block(#[case] target: TaskStatus) {
    // Reopening or starting work is always safe, even with open deps.
    let board = vec![
        task("DEV-1", &[], TaskStatus::Open),
        task("DEV-2", &["DEV-1"], TaskStatus::Closed),
    ];
    let index = TaskIndex::from_tasks(&board);
    let guard = TransitionGuard::default();

    let blockers = guard.evaluate(&board[1], target, &index);
    assert!(blockers.is_clear());
}

#[rstest]
fn close_without_dependencies_is_clear() {
    let board = vec![task("DEV-1", &[], TaskStatus::InProgress)];
    let index = TaskIndex::from_tasks(&board);

    let blockers = TransitionGuard::default().evaluate(&board[0], TaskStatus::Closed, &index);
    assert!(blockers.is_clear());
}

#[rstest]
fn close_reports_exactly_the_unresolved_dependencies() {
    let board = vec![
        task("DEV-1", &[], TaskStatus::Open),
        task("DEV-2", &[], TaskStatus::InProgress),
        task("DEV-3", &[], TaskStatus::Closed),
        task("DEV-4", &["DEV-1", "DEV-2", "DEV-3"], TaskStatus::InProgress),
    ];
    let index = TaskIndex::from_tasks(&board);

    let blockers = TransitionGuard::default().evaluate(&board[3], TaskStatus::Closed, &index);
    assert_eq!(blocker_codes(&blockers), vec!["DEV-1", "DEV-2"]);

    let statuses: Vec<TaskStatus> = blockers
        .iter()
        .filter_map(|blocker| match blocker {
            Blocker::Unresolved { status, .. } => Some(*status),
            Blocker::Dangling { .. } => None,
        })
        .collect();
    assert_eq!(statuses, vec![TaskStatus::Open, TaskStatus::InProgress]);
}

#[rstest]
fn permissive_guard_skips_dangling_codes() {
    // TES-9 was deleted from the board; its edge remains.
    let board = vec![task("DEV-2", &["TES-9"], TaskStatus::InProgress)];
    let index = TaskIndex::from_tasks(&board);

    let blockers = TransitionGuard::default().evaluate(&board[0], TaskStatus::Closed, &index);
    assert!(blockers.is_clear());
}

#[rstest]
fn strict_guard_reports_dangling_codes() {
    let board = vec![task("DEV-2", &["TES-9"], TaskStatus::InProgress)];
    let index = TaskIndex::from_tasks(&board);
    let guard = TransitionGuard::new(DanglingPolicy::Strict);

    let blockers = guard.evaluate(&board[0], TaskStatus::Closed, &index);
    assert_eq!(
        blockers.iter().collect::<Vec<_>>(),
        vec![&Blocker::Dangling { code: code("TES-9") }]
    );
}

#[rstest]
fn evaluation_against_an_empty_board_is_tolerated() {
    let lone = task("DEV-1", &["DEV-2"], TaskStatus::Open);
    let index = TaskIndex::from_tasks(&[]);

    let blockers = TransitionGuard::default().evaluate(&lone, TaskStatus::Closed, &index);
    assert!(blockers.is_clear());
}

#[rstest]
fn evaluation_is_idempotent() {
    let board = vec![
        task("DEV-1", &[], TaskStatus::Open),
        task("DEV-2", &["DEV-1"], TaskStatus::InProgress),
    ];
    let index = TaskIndex::from_tasks(&board);
    let guard = TransitionGuard::default();

    let first = guard.evaluate(&board[1], TaskStatus::Closed, &index);
    let second = guard.evaluate(&board[1], TaskStatus::Closed, &index);
    assert_eq!(first, second);
    assert!(!first.is_clear());
}

#[rstest]
fn blocking_set_clears_once_the_dependency_closes(clock: DefaultClock) {
    let mut board = vec![
        task("DEV-1", &[], TaskStatus::Open),
        task("DEV-2", &["DEV-1"], TaskStatus::InProgress),
    ];

    let before = {
        let index = TaskIndex::from_tasks(&board);
        TransitionGuard::default().evaluate(&board[1], TaskStatus::Closed, &index)
    };
    assert_eq!(blocker_codes(&before), vec!["DEV-1"]);

    board[0].transition_to(TaskStatus::Closed, &clock);
    let after = {
        let index = TaskIndex::from_tasks(&board);
        TransitionGuard::default().evaluate(&board[1], TaskStatus::Closed, &index)
    };
    assert!(after.is_clear());
}
