//! Unit tests for dependency graph validation.

use crate::task::domain::{DependencyGraph, GraphError, Task, TaskCode};
use mockable::DefaultClock;
use rstest::rstest;
use std::collections::BTreeSet;

fn code(raw: &str) -> TaskCode {
    TaskCode::try_from(raw).expect("valid task code")
}

fn deps(codes: &[&str]) -> BTreeSet<TaskCode> {
    codes.iter().map(|raw| code(raw)).collect()
}

fn task(raw_code: &str, dependencies: &[&str]) -> Task {
    Task::new(
        code(raw_code),
        None,
        raw_code,
        "",
        deps(dependencies),
        &DefaultClock,
    )
    .expect("valid task")
}

#[rstest]
fn self_loop_is_rejected() {
    let graph = DependencyGraph::from_tasks(&[task("DEV-1", &[])]);
    let result = graph.validate_edges(&code("DEV-1"), &deps(&["DEV-1"]));
    assert_eq!(result, Err(GraphError::SelfLoop(code("DEV-1"))));
}

#[rstest]
fn direct_cycle_is_rejected() {
    let board = [task("DEV-1", &[]), task("DEV-2", &["DEV-1"])];
    let graph = DependencyGraph::from_tasks(&board);

    let result = graph.validate_edges(&code("DEV-1"), &deps(&["DEV-2"]));
    assert_eq!(
        result,
        Err(GraphError::Cycle {
            path: vec![code("DEV-1"), code("DEV-2"), code("DEV-1")],
        })
    );
}

#[rstest]
fn transitive_cycle_is_rejected() {
    let board = [
        task("REQ-1", &[]),
        task("DES-1", &["REQ-1"]),
        task("DEV-1", &["DES-1"]),
    ];
    let graph = DependencyGraph::from_tasks(&board);

    let result = graph.validate_edges(&code("REQ-1"), &deps(&["DEV-1"]));
    assert!(matches!(result, Err(GraphError::Cycle { .. })));
}

#[rstest]
fn diamond_dependencies_are_acyclic() {
    // DEV-4 -> {DEV-2, DEV-3} -> DEV-1 shares a prerequisite, no cycle.
    let board = [
        task("DEV-1", &[]),
        task("DEV-2", &["DEV-1"]),
        task("DEV-3", &["DEV-1"]),
        task("DEV-4", &[]),
    ];
    let graph = DependencyGraph::from_tasks(&board);

    let result = graph.validate_edges(&code("DEV-4"), &deps(&["DEV-2", "DEV-3"]));
    assert_eq!(result, Ok(()));
}

#[rstest]
fn candidate_set_replaces_current_edges() {
    // DEV-2 currently depends on DEV-1; swapping that edge for the reverse
    // direction on DEV-2 itself is only a cycle if the old edge survived.
    let board = [task("DEV-1", &[]), task("DEV-2", &["DEV-1"])];
    let graph = DependencyGraph::from_tasks(&board);

    let result = graph.validate_edges(&code("DEV-2"), &deps(&[]));
    assert_eq!(result, Ok(()));
}

#[rstest]
fn dangling_edges_never_form_cycles() {
    let board = [task("DEV-1", &["TES-9"])];
    let graph = DependencyGraph::from_tasks(&board);

    let result = graph.validate_edges(&code("DEV-2"), &deps(&["DEV-1", "TES-8"]));
    assert_eq!(result, Ok(()));
}
