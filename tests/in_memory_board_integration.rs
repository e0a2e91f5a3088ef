//! Behavioural integration tests for the in-memory board.
//!
//! These tests drive the board and use-case services together through the
//! in-memory adapters, covering the drag-to-close flow with its
//! confirmation dialog and the use-case progress roll-up.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::shadow_unrelated,
    reason = "Test code reuses variable names for clarity in sequential assertions"
)]

use std::sync::Arc;

use depend::case::{
    adapters::memory::InMemoryCaseRepository,
    services::{CaseOverviewService, CaseProgress},
};
use depend::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskCode, TaskStatus, Team},
    services::{
        BoardService, ConfirmationSlot, CreateTaskRequest, DragContext, TransitionOutcome,
    },
};
use mockable::DefaultClock;
use tokio::runtime::Runtime;

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

fn board() -> BoardService<InMemoryTaskRepository, DefaultClock> {
    BoardService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

fn code(raw: &str) -> TaskCode {
    TaskCode::try_from(raw).expect("valid task code")
}

/// Walks a dependent task through the full drag-to-close flow: the first
/// drop is intercepted, the prerequisite closes, and the retried drop
/// applies without a dialog.
#[test]
fn drag_to_close_is_intercepted_until_the_prerequisite_closes() {
    let rt = test_runtime();
    let board = board();
    let mut drag = DragContext::new();
    let mut slot = ConfirmationSlot::new();

    let prerequisite = rt
        .block_on(board.create_task(CreateTaskRequest::new(
            Team::Development,
            "Implement session endpoint",
            "",
        )))
        .expect("create prerequisite");
    let dependent = rt
        .block_on(
            board.create_task(
                CreateTaskRequest::new(Team::Development, "Wire the login form", "")
                    .with_dependencies([prerequisite.code().clone()]),
            ),
        )
        .expect("create dependent");

    // Drag the dependent card onto the closed column.
    drag.begin(dependent.code().clone());
    let (dropped, target) = drag.drop_on(TaskStatus::Closed).expect("drop yields a request");
    let outcome = rt
        .block_on(board.request_transition(&dropped, target))
        .expect("transition request");

    // The close is intercepted; the dialog opens and nothing has mutated.
    let TransitionOutcome::ConfirmationRequired(pending) = outcome else {
        panic!("expected the close to be intercepted");
    };
    slot.offer(pending);
    assert!(slot.is_occupied());
    let stored = rt
        .block_on(board.get_task(dependent.code()))
        .expect("lookup")
        .expect("dependent exists");
    assert_eq!(stored.status(), TaskStatus::Open);

    // The user cancels, closes the prerequisite instead, and retries.
    slot.cancel();
    let outcome = rt
        .block_on(board.request_transition(prerequisite.code(), TaskStatus::Closed))
        .expect("close prerequisite");
    assert!(matches!(outcome, TransitionOutcome::Applied(_)));

    drag.begin(dependent.code().clone());
    let (dropped, target) = drag.drop_on(TaskStatus::Closed).expect("drop yields a request");
    let outcome = rt
        .block_on(board.request_transition(&dropped, target))
        .expect("transition request");
    assert!(matches!(
        outcome,
        TransitionOutcome::Applied(task) if task.status() == TaskStatus::Closed
    ));
}

/// A confirmed dialog closes the task despite its open dependency.
#[test]
fn confirmed_dialog_overrides_the_blocking_set() {
    let rt = test_runtime();
    let board = board();
    let mut slot = ConfirmationSlot::new();

    rt.block_on(board.create_task(CreateTaskRequest::new(
        Team::Testing,
        "Author the smoke suite",
        "",
    )))
    .expect("create prerequisite");
    let dependent = rt
        .block_on(
            board.create_task(
                CreateTaskRequest::new(Team::Testing, "Run the release checklist", "")
                    .with_dependencies([code("TES-1")]),
            ),
        )
        .expect("create dependent");

    let outcome = rt
        .block_on(board.request_transition(dependent.code(), TaskStatus::Closed))
        .expect("transition request");
    let TransitionOutcome::ConfirmationRequired(pending) = outcome else {
        panic!("expected the close to be intercepted");
    };
    slot.offer(pending);

    let pending = slot.confirm().expect("slot holds the pending transition");
    let closed = rt
        .block_on(board.confirm_transition(pending))
        .expect("confirmed close");
    assert_eq!(closed.status(), TaskStatus::Closed);
}

/// Tasks grouped under a use-case roll up into a completion percentage.
#[test]
fn use_case_progress_rolls_up_task_statuses() {
    let rt = test_runtime();
    let board = board();
    let cases = CaseOverviewService::new(
        Arc::new(InMemoryCaseRepository::new()),
        Arc::new(DefaultClock),
    );

    let case = rt
        .block_on(cases.create_case("Checkout flow", "End-to-end purchase journey"))
        .expect("create case");

    for name in ["Cart totals", "Payment capture", "Order confirmation"] {
        rt.block_on(board.create_task(
            CreateTaskRequest::new(Team::Development, name, "").with_case(case.id()),
        ))
        .expect("create task");
    }
    let outcome = rt
        .block_on(board.request_transition(&code("DEV-1"), TaskStatus::Closed))
        .expect("close first task");
    assert!(matches!(outcome, TransitionOutcome::Applied(_)));

    let grouped = rt
        .block_on(board.tasks_for_case(case.id()))
        .expect("tasks for case");
    let progress = CaseProgress::from_statuses(grouped.iter().map(depend::task::domain::Task::status));
    assert_eq!(progress.total(), 3);
    assert_eq!(progress.closed(), 1);
    assert_eq!(progress.percent(), 33);
}
