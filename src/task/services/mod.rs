//! Orchestration services for the task board.

mod board;
mod interaction;

pub use board::{
    BoardError, BoardResult, BoardService, BoardSnapshot, CreateTaskRequest, PendingTransition,
    TaskEdit, TransitionOutcome,
};
pub use interaction::{ConfirmationSlot, DragContext};
