//! Single-slot interaction state for the board surface.
//!
//! The board UI holds two transient references: the task currently being
//! dragged, and the one pending confirmation dialog. Both are single slots;
//! offering a new value displaces the old one, and the displaced value is
//! handed back so the caller can decide what to do with it instead of it
//! being silently lost.

use super::PendingTransition;
use crate::task::domain::{TaskCode, TaskStatus};

/// The one pending-confirmation slot of the board surface.
#[derive(Debug, Clone, Default)]
pub struct ConfirmationSlot {
    pending: Option<PendingTransition>,
}

impl ConfirmationSlot {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Returns `true` while a confirmation is pending.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the pending transition, if any, without consuming it.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    /// Places a pending transition in the slot.
    ///
    /// Returns the displaced transition when the slot was already occupied
    /// by a conflicting request.
    pub fn offer(&mut self, pending: PendingTransition) -> Option<PendingTransition> {
        self.pending.replace(pending)
    }

    /// Takes the pending transition for confirmation.
    pub fn confirm(&mut self) -> Option<PendingTransition> {
        self.pending.take()
    }

    /// Discards the pending transition; no mutation has happened.
    pub fn cancel(&mut self) -> Option<PendingTransition> {
        self.pending.take()
    }
}

/// Transient drag state: at most one task is dragged at a time.
#[derive(Debug, Clone, Default)]
pub struct DragContext {
    dragged: Option<TaskCode>,
}

impl DragContext {
    /// Creates an idle drag context.
    #[must_use]
    pub const fn new() -> Self {
        Self { dragged: None }
    }

    /// Returns the code of the task currently being dragged, if any.
    #[must_use]
    pub const fn dragged(&self) -> Option<&TaskCode> {
        self.dragged.as_ref()
    }

    /// Starts dragging a task, returning the code of any drag it replaces.
    pub fn begin(&mut self, code: TaskCode) -> Option<TaskCode> {
        self.dragged.replace(code)
    }

    /// Completes the drag over a status column.
    ///
    /// Returns the `(task, target)` pair to feed the transition guard, or
    /// `None` when no drag was in progress.
    pub fn drop_on(&mut self, target: TaskStatus) -> Option<(TaskCode, TaskStatus)> {
        self.dragged.take().map(|code| (code, target))
    }

    /// Abandons the drag gesture.
    pub fn cancel(&mut self) -> Option<TaskCode> {
        self.dragged.take()
    }
}
