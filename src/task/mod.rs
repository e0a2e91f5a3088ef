//! Task board management for Depend.
//!
//! This module implements the board's behavioural core: team-prefixed task
//! records with weak dependency references, the dependency graph's
//! acyclicity rules, and the status transition guard that intercepts close
//! transitions while prerequisites remain unresolved. The guard is
//! advisory: a user-confirmed close proceeds regardless of its blocking
//! set. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
