//! Domain-focused tests for task value types and the task aggregate.

use crate::task::domain::{Task, TaskCode, TaskDomainError, TaskStatus, Team, Version};
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

#[rstest]
#[case("REQ-1", Team::Requirements, 1)]
#[case("DES-7", Team::Design, 7)]
#[case("DEV-42", Team::Development, 42)]
#[case("TES-3", Team::Testing, 3)]
fn task_code_parses_valid_values(#[case] raw: &str, #[case] team: Team, #[case] sequence: u64) {
    let parsed = code(raw);
    assert_eq!(parsed.team(), team);
    assert_eq!(parsed.sequence().get(), sequence);
    assert_eq!(parsed.to_string(), raw);
}

#[rstest]
fn task_code_normalises_whitespace_and_casing() {
    assert_eq!(code(" dev-2 "), code("DEV-2"));
}

#[rstest]
#[case("DEV")]
#[case("DEV-")]
#[case("DEV-0")]
#[case("DEV--1")]
#[case("OPS-1")]
#[case("1-DEV")]
#[case("")]
fn task_code_rejects_invalid_values(#[case] raw: &str) {
    assert!(TaskCode::try_from(raw).is_err());
}

#[rstest]
#[case("OPEN", TaskStatus::Open)]
#[case(" closed ", TaskStatus::Closed)]
#[case("in_progress", TaskStatus::InProgress)]
fn task_status_parses_canonical_values(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
#[case("aberto")]
#[case("em_andamento")]
#[case("concluido")]
#[case("DONE")]
fn task_status_rejects_legacy_and_unknown_values(#[case] raw: &str) {
    // The early mock-data board used Portuguese-cased statuses; only the
    // canonical uppercase enumeration survives.
    assert!(TaskStatus::try_from(raw).is_err());
}

#[rstest]
fn task_status_resolution_is_closed_only() {
    assert!(TaskStatus::Closed.is_resolved());
    assert!(!TaskStatus::Open.is_resolved());
    assert!(!TaskStatus::InProgress.is_resolved());
}

#[rstest]
fn team_parses_codes_case_insensitively() {
    assert_eq!(Team::try_from("req"), Ok(Team::Requirements));
    assert_eq!(Team::try_from(" TES "), Ok(Team::Testing));
    assert!(Team::try_from("QA").is_err());
}

#[rstest]
fn new_task_starts_open_at_initial_version(clock: DefaultClock) {
    let task = Task::new(
        code("DEV-1"),
        None,
        "Wire the login form",
        "Hook the form up to the session endpoint",
        BTreeSet::new(),
        &clock,
    )
    .expect("valid task");

    assert_eq!(task.status(), TaskStatus::Open);
    assert_eq!(task.version(), Version::INITIAL);
    assert_eq!(task.team(), Team::Development);
    assert_eq!(task.created_at(), task.updated_at());
}

#[rstest]
fn new_task_rejects_blank_name(clock: DefaultClock) {
    let result = Task::new(code("DEV-1"), None, "   ", "", BTreeSet::new(), &clock);
    assert_eq!(result.err(), Some(TaskDomainError::EmptyTaskName));
}

#[rstest]
fn new_task_rejects_self_dependency(clock: DefaultClock) {
    let own = code("DEV-1");
    let result = Task::new(
        own.clone(),
        None,
        "Bootstrap",
        "",
        BTreeSet::from([own.clone()]),
        &clock,
    );
    assert_eq!(result.err(), Some(TaskDomainError::SelfDependency(own)));
}

#[rstest]
fn mutators_touch_timestamp_and_bump_version(clock: DefaultClock) {
    let mut task = Task::new(
        code("TES-1"),
        None,
        "Regression pass",
        "",
        BTreeSet::new(),
        &clock,
    )
    .expect("valid task");
    let created = task.created_at();

    task.rename("Full regression pass", &clock)
        .expect("valid rename");
    assert_eq!(task.version(), Version::INITIAL.next());
    assert!(task.updated_at() >= created);

    task.transition_to(TaskStatus::InProgress, &clock);
    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.version(), Version::INITIAL.next().next());
}

#[rstest]
fn replace_dependencies_rejects_self_edge(clock: DefaultClock) {
    let mut task = Task::new(code("DEV-2"), None, "Follow-up", "", BTreeSet::new(), &clock)
        .expect("valid task");

    let result = task.replace_dependencies(BTreeSet::from([code("DEV-2")]), &clock);
    assert_eq!(
        result.err(),
        Some(TaskDomainError::SelfDependency(code("DEV-2")))
    );
    // Failed mutation leaves the aggregate untouched.
    assert_eq!(task.version(), Version::INITIAL);
    assert!(task.dependencies().is_empty());
}

#[rstest]
fn every_directed_status_transition_is_permitted(clock: DefaultClock) {
    // Closed is not terminal: a closed task can reopen or restart.
    for from in TaskStatus::ALL {
        for to in TaskStatus::ALL {
            let mut task =
                Task::new(code("DEV-3"), None, "Any", "", BTreeSet::new(), &clock)
                    .expect("valid task");
            task.transition_to(from, &clock);
            task.transition_to(to, &clock);
            assert_eq!(task.status(), to);
        }
    }
}
