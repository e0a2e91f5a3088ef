//! In-memory adapters for use-case persistence.

mod case;

pub use case::InMemoryCaseRepository;
