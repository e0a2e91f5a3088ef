//! Dependency graph validation.
//!
//! Blocked-close semantics only stay meaningful while dependency edges form
//! a DAG, so the graph rejects edge sets that would introduce a self-loop
//! or close a cycle. The graph is an adjacency structure keyed by task
//! code, built from the current task collection per validation.

use super::{Task, TaskCode};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors raised while validating dependency edges.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    /// The edge set contains the task's own code.
    #[error("task {0} cannot depend on itself")]
    SelfLoop(TaskCode),

    /// The edge set would close a dependency cycle.
    #[error("{}", cycle_message(path))]
    Cycle {
        /// The cycle, starting and ending at the task being edited.
        path: Vec<TaskCode>,
    },
}

fn cycle_message(path: &[TaskCode]) -> String {
    let joined = path
        .iter()
        .map(TaskCode::to_string)
        .collect::<Vec<_>>()
        .join(" -> ");
    format!("dependency cycle: {joined}")
}

/// Adjacency view over the dependency edges of a task collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: BTreeMap<TaskCode, BTreeSet<TaskCode>>,
}

impl DependencyGraph {
    /// Builds the adjacency structure from the given task collection.
    ///
    /// Dangling edges are kept as-is; they can never participate in a cycle
    /// because no task carries the missing code's out-edges.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            edges: tasks
                .iter()
                .map(|task| (task.code().clone(), task.dependencies().clone()))
                .collect(),
        }
    }

    /// Validates a replacement edge set for the given task.
    ///
    /// The candidate set stands in for the task's current out-edges, so an
    /// edit that removes an offending edge validates cleanly even while the
    /// stored graph still contains it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::SelfLoop`] when the set contains `source`
    /// itself, or [`GraphError::Cycle`] when any candidate edge can reach
    /// `source` through existing edges.
    pub fn validate_edges(
        &self,
        source: &TaskCode,
        dependencies: &BTreeSet<TaskCode>,
    ) -> Result<(), GraphError> {
        if dependencies.contains(source) {
            return Err(GraphError::SelfLoop(source.clone()));
        }
        for dependency in dependencies {
            if let Some(mut path) = self.path_between(dependency, source) {
                let mut cycle = vec![source.clone()];
                cycle.append(&mut path);
                return Err(GraphError::Cycle { path: cycle });
            }
        }
        Ok(())
    }

    /// Depth-first search for a path from `from` to `target`.
    ///
    /// Returns the path `from ..= target` when one exists. Traversal stops
    /// at `target`, so the out-edges of the task under validation are never
    /// followed.
    fn path_between(&self, from: &TaskCode, target: &TaskCode) -> Option<Vec<TaskCode>> {
        let mut visited: BTreeSet<&TaskCode> = BTreeSet::new();
        let mut stack: Vec<(&TaskCode, Vec<TaskCode>)> = vec![(from, vec![from.clone()])];

        while let Some((node, path)) = stack.pop() {
            if node == target {
                return Some(path);
            }
            if !visited.insert(node) {
                continue;
            }
            let Some(out_edges) = self.edges.get(node) else {
                continue;
            };
            for next in out_edges {
                if visited.contains(next) {
                    continue;
                }
                let mut next_path = path.clone();
                next_path.push(next.clone());
                stack.push((next, next_path));
            }
        }
        None
    }
}
