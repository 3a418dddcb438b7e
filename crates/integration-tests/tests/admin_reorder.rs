//! Integration tests for carousel reordering under each persistence mode.
//!
//! Three images start at positions 0, 1, 2. Moving the last one up yields
//! the plan `i1 -> 0, i3 -> 1, i2 -> 2`, written in that order.
//!
//! Run with: cargo test -p shopdesk-integration-tests

use axum::http::{Method, StatusCode};
use serde_json::json;
use shopdesk_admin::controller::ResourceList;
use shopdesk_admin::models::CarouselImage;
use shopdesk_admin::notify::{Toast, ToastLog};
use shopdesk_admin::reorder::{Direction, ReorderError, ReorderMode, Rollback};
use shopdesk_integration_tests::{FailRule, MockBackend, fixtures};

async fn carousel() -> MockBackend {
    let mock = MockBackend::start()
        .await
        .expect("Failed to start mock backend");
    mock.seed(
        "images",
        vec![
            fixtures::image("i1", 0),
            fixtures::image("i2", 1),
            fixtures::image("i3", 2),
        ],
    );
    mock
}

fn positions(mock: &MockBackend) -> Vec<(String, i64)> {
    mock.items("images")
        .iter()
        .map(|image| {
            (
                image["_id"].as_str().unwrap_or_default().to_string(),
                image["order"].as_i64().unwrap_or(-1),
            )
        })
        .collect()
}

fn ids(list: &ResourceList<CarouselImage>) -> Vec<&str> {
    list.items().iter().map(|image| image.id.as_str()).collect()
}

fn pair(id: &str, order: i64) -> (String, i64) {
    (id.to_string(), order)
}

// ============================================================================
// Success
// ============================================================================

#[tokio::test]
async fn test_move_up_persists_every_position() {
    let mock = carousel().await;
    let client = mock
        .client_with_mode(Some("tok"), ReorderMode::Sequential)
        .expect("client");
    let mut toasts = ToastLog::new();

    let mut list = ResourceList::<CarouselImage>::new();
    list.load(&client, &mut toasts).await;

    let moved = list
        .reorder(&client, &mut toasts, 2, Direction::Up)
        .await
        .expect("reorder succeeds");
    assert!(moved);
    assert_eq!(ids(&list), vec!["i1", "i3", "i2"]);
    assert_eq!(
        positions(&mock),
        vec![pair("i1", 0), pair("i2", 2), pair("i3", 1)]
    );

    let puts: Vec<_> = mock
        .requests_with(&Method::PUT)
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(puts, vec!["/images/i1", "/images/i3", "/images/i2"]);
    assert_eq!(toasts.last(), Some(&Toast::success("Order updated")));
}

#[tokio::test]
async fn test_move_at_boundary_is_a_no_op() {
    let mock = carousel().await;
    let client = mock.client(Some("tok")).expect("client");
    let mut toasts = ToastLog::new();

    let mut list = ResourceList::<CarouselImage>::new();
    list.load(&client, &mut toasts).await;
    mock.clear_requests();

    let moved = list
        .reorder(&client, &mut toasts, 0, Direction::Up)
        .await
        .expect("nothing to persist");
    assert!(!moved);

    let moved = list
        .reorder(&client, &mut toasts, 2, Direction::Down)
        .await
        .expect("nothing to persist");
    assert!(!moved);

    assert!(mock.requests().is_empty());
    assert!(toasts.toasts().is_empty());
}

// ============================================================================
// Partial failure
// ============================================================================

#[tokio::test]
async fn test_sequential_failure_keeps_earlier_writes() {
    let mock = carousel().await;
    mock.fail(FailRule::once(
        Method::PUT,
        "/images/i2",
        StatusCode::INTERNAL_SERVER_ERROR,
        "Write failed",
    ));
    let client = mock
        .client_with_mode(Some("tok"), ReorderMode::Sequential)
        .expect("client");
    let mut toasts = ToastLog::new();

    let mut list = ResourceList::<CarouselImage>::new();
    list.load(&client, &mut toasts).await;

    let err = list
        .reorder(&client, &mut toasts, 2, Direction::Up)
        .await
        .expect_err("third write fails");
    match err {
        ReorderError::Partial {
            failed_index,
            rollback,
            ..
        } => {
            assert_eq!(failed_index, 2);
            assert_eq!(rollback, Rollback::NotAttempted);
        }
        other @ ReorderError::Batch(_) => panic!("unexpected error: {other:?}"),
    }

    // i3 already moved to 1, i2 still at 1.
    assert_eq!(
        positions(&mock),
        vec![pair("i1", 0), pair("i2", 1), pair("i3", 1)]
    );
    assert_eq!(toasts.last(), Some(&Toast::error("Write failed")));
    assert_eq!(
        mock.requests_with(&Method::GET).len(),
        2,
        "refetched after failure"
    );
}

#[tokio::test]
async fn test_saga_failure_restores_previous_positions() {
    let mock = carousel().await;
    mock.fail(FailRule::once(
        Method::PUT,
        "/images/i2",
        StatusCode::INTERNAL_SERVER_ERROR,
        "Write failed",
    ));
    let client = mock
        .client_with_mode(Some("tok"), ReorderMode::Saga)
        .expect("client");
    let mut toasts = ToastLog::new();

    let mut list = ResourceList::<CarouselImage>::new();
    list.load(&client, &mut toasts).await;

    let err = list
        .reorder(&client, &mut toasts, 2, Direction::Up)
        .await
        .expect_err("third write fails");
    assert!(matches!(
        err,
        ReorderError::Partial {
            failed_index: 2,
            rollback: Rollback::Complete,
            ..
        }
    ));

    assert_eq!(
        positions(&mock),
        vec![pair("i1", 0), pair("i2", 1), pair("i3", 2)]
    );
    assert_eq!(ids(&list), vec!["i1", "i2", "i3"]);

    // Compensation runs in reverse: i3 first, then i1.
    let puts: Vec<_> = mock
        .requests_with(&Method::PUT)
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(
        puts,
        vec![
            "/images/i1",
            "/images/i3",
            "/images/i2",
            "/images/i3",
            "/images/i1"
        ]
    );
}

#[tokio::test]
async fn test_saga_reports_ids_it_could_not_restore() {
    let mock = carousel().await;
    mock.fail(FailRule::once(
        Method::PUT,
        "/images/i2",
        StatusCode::INTERNAL_SERVER_ERROR,
        "Write failed",
    ));
    mock.fail(
        FailRule::once(
            Method::PUT,
            "/images/i3",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Still down",
        )
        .after(1),
    );
    let client = mock
        .client_with_mode(Some("tok"), ReorderMode::Saga)
        .expect("client");
    let mut toasts = ToastLog::new();

    let mut list = ResourceList::<CarouselImage>::new();
    list.load(&client, &mut toasts).await;

    let err = list
        .reorder(&client, &mut toasts, 2, Direction::Up)
        .await
        .expect_err("third write fails");
    assert!(matches!(
        err,
        ReorderError::Partial {
            rollback: Rollback::Incomplete(ref ids),
            ..
        } if ids == &vec!["i3".to_string()]
    ));
    assert_eq!(
        toasts.last(),
        Some(&Toast::error("Write failed (could not restore i3)"))
    );
    assert_eq!(
        positions(&mock),
        vec![pair("i1", 0), pair("i2", 1), pair("i3", 1)]
    );
}

// ============================================================================
// Batch
// ============================================================================

#[tokio::test]
async fn test_batch_sends_one_request() {
    let mock = carousel().await;
    let client = mock
        .client_with_mode(Some("tok"), ReorderMode::Batch)
        .expect("client");
    let mut toasts = ToastLog::new();

    let mut list = ResourceList::<CarouselImage>::new();
    list.load(&client, &mut toasts).await;

    list.reorder(&client, &mut toasts, 0, Direction::Down)
        .await
        .expect("batch succeeds");

    let puts: Vec<_> = mock
        .requests_with(&Method::PUT)
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(puts, vec!["/images/reorder"]);
    assert_eq!(ids(&list), vec!["i2", "i1", "i3"]);
}

#[tokio::test]
async fn test_batch_failure_changes_nothing() {
    let mock = carousel().await;
    mock.fail(
        FailRule::once(
            Method::PUT,
            "/images/reorder",
            StatusCode::BAD_GATEWAY,
            "",
        )
        .with_body(json!({ "error": "Upstream unavailable" })),
    );
    let client = mock
        .client_with_mode(Some("tok"), ReorderMode::Batch)
        .expect("client");
    let mut toasts = ToastLog::new();

    let mut list = ResourceList::<CarouselImage>::new();
    list.load(&client, &mut toasts).await;

    let err = list
        .reorder(&client, &mut toasts, 1, Direction::Up)
        .await
        .expect_err("batch fails");
    assert!(matches!(err, ReorderError::Batch(_)));
    assert_eq!(
        positions(&mock),
        vec![pair("i1", 0), pair("i2", 1), pair("i3", 2)]
    );
    assert_eq!(ids(&list), vec!["i1", "i2", "i3"]);
    assert_eq!(toasts.last(), Some(&Toast::error("Upstream unavailable")));
}
