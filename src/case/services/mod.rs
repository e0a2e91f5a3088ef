//! Orchestration services for use-case management.

mod overview;

pub use overview::{
    CaseEdit, CaseOverviewError, CaseOverviewResult, CaseOverviewService, CaseProgress,
};
