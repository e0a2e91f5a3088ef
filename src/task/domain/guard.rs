//! Status transition guard.
//!
//! The guard sits between a user-initiated status change (button click or
//! drag-drop) and the actual mutation: it decides whether a requested
//! transition may proceed immediately or must first surface the unresolved
//! prerequisites to the user for confirmation. Evaluation is pure and
//! synchronous; the guard never mutates a task and never fails.

use super::{Task, TaskCode, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Policy for dependency codes that resolve to no known task.
///
/// The board tolerates dangling references: deleting a task does not scrub
/// the edges pointing at it. What a dangling code means for a close
/// transition is a product decision, so it is an explicit configuration
/// choice rather than an implicit default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingPolicy {
    /// Dangling codes never block; they are skipped during evaluation.
    #[default]
    Permissive,
    /// Dangling codes block a close and are reported as such.
    Strict,
}

/// A single unresolved prerequisite found during guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Blocker {
    /// The prerequisite exists but has not been closed.
    Unresolved {
        /// Code of the blocking task.
        code: TaskCode,
        /// Name of the blocking task, for the confirmation surface.
        name: String,
        /// Current status of the blocking task.
        status: TaskStatus,
    },
    /// The prerequisite code resolves to no known task.
    ///
    /// Only produced under [`DanglingPolicy::Strict`].
    Dangling {
        /// The unresolvable dependency code.
        code: TaskCode,
    },
}

impl Blocker {
    /// Returns the dependency code this blocker refers to.
    #[must_use]
    pub const fn code(&self) -> &TaskCode {
        match self {
            Self::Unresolved { code, .. } | Self::Dangling { code } => code,
        }
    }
}

/// The subset of a task's dependencies found unresolved at evaluation time.
///
/// An empty set means the transition may proceed immediately; a non-empty
/// set means the caller should surface the blockers and ask for explicit
/// confirmation before applying the mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockingSet {
    blockers: Vec<Blocker>,
}

impl BlockingSet {
    /// Returns an empty blocking set.
    #[must_use]
    pub const fn clear() -> Self {
        Self {
            blockers: Vec::new(),
        }
    }

    /// Returns `true` when nothing blocks the transition.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.blockers.is_empty()
    }

    /// Returns the number of blockers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blockers.len()
    }

    /// Returns `true` when the set contains no blockers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blockers.is_empty()
    }

    /// Iterates over the blockers in dependency-set order.
    pub fn iter(&self) -> std::slice::Iter<'_, Blocker> {
        self.blockers.iter()
    }
}

impl From<Vec<Blocker>> for BlockingSet {
    fn from(blockers: Vec<Blocker>) -> Self {
        Self { blockers }
    }
}

impl<'a> IntoIterator for &'a BlockingSet {
    type Item = &'a Blocker;
    type IntoIter = std::slice::Iter<'a, Blocker>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Code-keyed lookup over a task collection.
///
/// Dependency edges are resolved through this index rather than through
/// embedded task references, keeping edges weak and the collection free of
/// ownership cycles.
#[derive(Debug, Default)]
pub struct TaskIndex<'a> {
    by_code: HashMap<&'a TaskCode, &'a Task>,
}

impl<'a> TaskIndex<'a> {
    /// Builds an index over the given task collection.
    ///
    /// The index borrows the tasks; it is meant to be built per evaluation
    /// from the collection the caller considers current.
    #[must_use]
    pub fn from_tasks(tasks: &'a [Task]) -> Self {
        Self {
            by_code: tasks.iter().map(|task| (task.code(), task)).collect(),
        }
    }

    /// Resolves a task code, returning `None` for dangling references.
    #[must_use]
    pub fn get(&self, code: &TaskCode) -> Option<&'a Task> {
        self.by_code.get(code).copied()
    }

    /// Returns the number of indexed tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Returns `true` when the index holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Dependency-aware checkpoint on status transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionGuard {
    dangling: DanglingPolicy,
}

impl TransitionGuard {
    /// Creates a guard with the given dangling-reference policy.
    #[must_use]
    pub const fn new(dangling: DanglingPolicy) -> Self {
        Self { dangling }
    }

    /// Returns the configured dangling-reference policy.
    #[must_use]
    pub const fn dangling_policy(self) -> DanglingPolicy {
        self.dangling
    }

    /// Evaluates a requested status change against the task's prerequisites.
    ///
    /// Transitions into `Open` or `In Progress` are always safe and return
    /// an empty set without touching the index; only closing a task is
    /// checked. For a close, every dependency code is resolved against the
    /// board and each resolved task that is not itself closed joins the
    /// blocking set. Dangling codes follow the configured policy.
    ///
    /// The check is advisory: the caller decides whether a non-empty set
    /// aborts the transition or merely requires user confirmation.
    #[must_use]
    pub fn evaluate(self, task: &Task, target: TaskStatus, board: &TaskIndex<'_>) -> BlockingSet {
        if !target.is_resolved() {
            return BlockingSet::clear();
        }

        let mut blockers = Vec::new();
        for code in task.dependencies() {
            match board.get(code) {
                Some(dependency) if dependency.status().is_resolved() => {}
                Some(dependency) => blockers.push(Blocker::Unresolved {
                    code: code.clone(),
                    name: dependency.name().to_owned(),
                    status: dependency.status(),
                }),
                None => {
                    if self.dangling == DanglingPolicy::Strict {
                        blockers.push(Blocker::Dangling { code: code.clone() });
                    }
                }
            }
        }
        BlockingSet::from(blockers)
    }
}
