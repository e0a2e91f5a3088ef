//! Depend: dependency-aware task board core.
//!
//! This crate provides the in-process core behind a kanban-style task board:
//! task records grouped by team and use-case, a dependency graph between
//! tasks, and a status transition guard that intercepts risky close
//! transitions while prerequisite work is still unresolved.
//!
//! # Architecture
//!
//! Depend follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task aggregate, transition guard, and board orchestration
//! - [`case`]: Use-case grouping entities and progress summaries

pub mod case;
pub mod task;
