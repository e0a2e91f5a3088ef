//! Domain model for the task board.
//!
//! The task domain models team-prefixed task records, weak dependency
//! references between them, the dependency graph's acyclicity rules, and
//! the status transition guard, keeping all infrastructure concerns outside
//! of the domain boundary.

mod error;
mod graph;
mod guard;
mod ids;
mod status;
mod task;
mod team;

pub use error::{ParseTaskCodeError, ParseTaskStatusError, ParseTeamError, TaskDomainError};
pub use graph::{DependencyGraph, GraphError};
pub use guard::{Blocker, BlockingSet, DanglingPolicy, TaskIndex, TransitionGuard};
pub use ids::{TaskCode, TaskId, Version};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task};
pub use team::Team;
