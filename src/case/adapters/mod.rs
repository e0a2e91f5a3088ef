//! Adapter implementations of the use-case ports.

pub mod memory;
pub mod postgres;
