//! Service tests for the use-case overview.

use std::sync::Arc;

use crate::case::{
    adapters::memory::InMemoryCaseRepository,
    domain::{Case, CaseId},
    ports::CaseRepositoryError,
    services::{CaseEdit, CaseOverviewError, CaseOverviewService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = CaseOverviewService<InMemoryCaseRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    CaseOverviewService::new(
        Arc::new(InMemoryCaseRepository::new()),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_and_fetch_round_trip(service: TestService) {
    let created = service
        .create_case("Checkout flow", "End-to-end purchase journey")
        .await
        .expect("case creation should succeed");

    let fetched = service
        .get_case(created.id())
        .await
        .expect("lookup should succeed")
        .expect("case should exist");
    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_blank_name(service: TestService) {
    let result = service.create_case("   ", "").await;
    assert!(matches!(result, Err(CaseOverviewError::Domain(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_applies_partial_updates(service: TestService) {
    let created = service
        .create_case("Checkout flow", "Initial scope")
        .await
        .expect("case creation should succeed");

    let edited = service
        .edit_case(created.id(), CaseEdit::new().with_name("Returns flow"))
        .await
        .expect("edit should succeed");
    assert_eq!(edited.name(), "Returns flow");
    // The untouched description survives.
    assert_eq!(edited.description(), "Initial scope");
    assert_eq!(edited.version(), created.version().next());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_of_missing_case_reports_not_found(service: TestService) {
    let result = service
        .edit_case(CaseId::new(), CaseEdit::new().with_name("Ghost"))
        .await;
    assert!(matches!(
        result,
        Err(CaseOverviewError::Repository(CaseRepositoryError::NotFound(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_the_case(service: TestService) {
    let created = service
        .create_case("Checkout flow", "")
        .await
        .expect("case creation should succeed");

    service
        .delete_case(created.id())
        .await
        .expect("deletion should succeed");
    let fetched = service
        .get_case(created.id())
        .await
        .expect("lookup should succeed");
    assert!(fetched.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_every_stored_case(service: TestService) {
    let first = service
        .create_case("First", "")
        .await
        .expect("case creation should succeed");
    let second = service
        .create_case("Second", "")
        .await
        .expect("case creation should succeed");

    let listed = service.list_cases().await.expect("listing should succeed");
    let ids: Vec<CaseId> = listed.iter().map(Case::id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first.id()));
    assert!(ids.contains(&second.id()));
}
