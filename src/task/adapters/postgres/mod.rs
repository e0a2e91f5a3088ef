//! `PostgreSQL` adapters for task persistence.

mod models;
mod repository;
mod schema;

pub use repository::{BoardPgPool, PostgresTaskRepository};
