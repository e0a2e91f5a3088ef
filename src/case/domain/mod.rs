//! Domain model for use-case grouping.

mod case;
mod error;
mod ids;

pub use case::{Case, PersistedCaseData};
pub use error::CaseDomainError;
pub use ids::CaseId;
