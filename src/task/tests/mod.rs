//! Unit tests for the task board module.
//!
//! Tests are organised by concern: domain value types, the dependency
//! graph, the transition guard, board interaction state, and the
//! orchestration service.

mod domain_tests;
mod graph_tests;
mod guard_tests;
