//! Integration tests for inline row actions: order status and tracking,
//! customer bans and notes, review moderation, deletes.
//!
//! Run with: cargo test -p shopdesk-integration-tests

use axum::http::{Method, StatusCode};
use serde_json::json;
use shopdesk_admin::controller::{ResourceList, Screen};
use shopdesk_admin::dialog::SubmitOutcome;
use shopdesk_admin::models::{Customer, Order, Review, ReviewResponseInput, TrackingInput};
use shopdesk_admin::notify::{Toast, ToastLog};
use shopdesk_core::{CustomerId, OrderId, OrderStatus, ReviewId, ReviewStatus};
use shopdesk_integration_tests::{FailRule, MockBackend, fixtures};

async fn backend() -> MockBackend {
    MockBackend::start().await.expect("Failed to start mock backend")
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_status_change_touches_only_status() {
    let mock = backend().await;
    let original = fixtures::order("o1", 1001, "pending");
    mock.seed("orders", vec![original.clone()]);
    let client = mock.client(Some("tok")).expect("client");
    let mut toasts = ToastLog::new();

    let mut list = ResourceList::<Order>::new();
    list.load(&client, &mut toasts).await;

    let id = OrderId::new("o1");
    list.mutate(
        &client,
        &mut toasts,
        "Order status updated",
        client.update_order_status(&id, OrderStatus::Shipped),
    )
    .await
    .expect("status change succeeds");

    let patches = mock.requests_with(&Method::PATCH);
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].path, "/orders/o1/status");

    let order = list.find(|o| o.order_number == "1001").expect("order listed");
    assert_eq!(order.status, OrderStatus::Shipped);

    let mut expected = original;
    expected["status"] = json!("shipped");
    assert_eq!(mock.item("orders", "o1"), Some(expected));
    assert_eq!(toasts.last(), Some(&Toast::success("Order status updated")));
}

#[tokio::test]
async fn test_failed_status_change_leaves_order() {
    let mock = backend().await;
    mock.seed("orders", vec![fixtures::order("o1", 1001, "pending")]);
    mock.fail(FailRule::once(
        Method::PATCH,
        "/orders/o1/status",
        StatusCode::CONFLICT,
        "Order already cancelled",
    ));
    let client = mock.client(Some("tok")).expect("client");
    let mut toasts = ToastLog::new();

    let mut list = ResourceList::<Order>::new();
    list.load(&client, &mut toasts).await;
    let id = OrderId::new("o1");
    let out = list
        .mutate(
            &client,
            &mut toasts,
            "Order status updated",
            client.update_order_status(&id, OrderStatus::Delivered),
        )
        .await;

    assert!(out.is_none());
    assert_eq!(list.items()[0].status, OrderStatus::Pending);
    assert_eq!(toasts.last(), Some(&Toast::error("Order already cancelled")));
    assert_eq!(mock.requests_with(&Method::GET).len(), 1, "no refetch");
}

#[tokio::test]
async fn test_tracking_dialog() {
    let mock = backend().await;
    mock.seed("orders", vec![fixtures::order("o1", 1001, "processing")]);
    let client = mock.client(Some("tok")).expect("client");
    let mut toasts = ToastLog::new();

    let mut screen = Screen::<Order, TrackingInput>::new();
    screen.mount(&client, &mut toasts).await;

    let form = screen
        .edit_where(|o| o.id.as_str() == "o1")
        .expect("order listed");
    form.tracking_number = "1Z999".to_string();

    let outcome = screen.save(&client, &mut toasts).await;
    assert!(matches!(outcome, SubmitOutcome::Invalid(ref f) if f == &vec!["carrier"]));

    screen.dialog.form_mut().expect("still open").carrier = "UPS".to_string();
    assert!(screen.save(&client, &mut toasts).await.is_saved());

    let order = &screen.list.items()[0];
    assert_eq!(order.tracking_number.as_deref(), Some("1Z999"));
    assert_eq!(order.carrier.as_deref(), Some("UPS"));
    assert_eq!(order.status, OrderStatus::Processing);
}

#[tokio::test]
async fn test_get_order_by_id() {
    let mock = backend().await;
    mock.seed("orders", vec![fixtures::order("o1", 1001, "pending")]);
    let client = mock.client(Some("tok")).expect("client");

    let order = client
        .get_order(&OrderId::new("o1"))
        .await
        .expect("order exists");
    assert_eq!(order.order_number, "1001");
    assert_eq!(order.item_count(), 2);

    let err = client
        .get_order(&OrderId::new("missing"))
        .await
        .expect_err("unknown order");
    assert_eq!(err.status(), Some(404));
}

// ============================================================================
// Customers
// ============================================================================

#[tokio::test]
async fn test_ban_then_unban() {
    let mock = backend().await;
    mock.seed(
        "customers",
        vec![fixtures::customer("c1", "Robin Vale", "robin@example.com")],
    );
    let client = mock.client(Some("tok")).expect("client");
    let mut toasts = ToastLog::new();

    let mut list = ResourceList::<Customer>::new();
    list.load(&client, &mut toasts).await;
    let id = CustomerId::new("c1");

    list.mutate(&client, &mut toasts, "Customer banned", client.ban_customer(&id))
        .await
        .expect("ban succeeds");
    assert!(list.items()[0].is_banned);

    list.mutate(
        &client,
        &mut toasts,
        "Customer unbanned",
        client.unban_customer(&id),
    )
    .await
    .expect("unban succeeds");
    assert!(!list.items()[0].is_banned);

    let paths: Vec<_> = mock
        .requests_with(&Method::PATCH)
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, vec!["/customers/c1/ban", "/customers/c1/unban"]);
}

#[tokio::test]
async fn test_delete_customer_refetches() {
    let mock = backend().await;
    mock.seed(
        "customers",
        vec![
            fixtures::customer("c1", "Robin Vale", "robin@example.com"),
            fixtures::customer("c2", "Ash Quill", "ash@example.com"),
        ],
    );
    let client = mock.client(Some("tok")).expect("client");
    let mut toasts = ToastLog::new();

    let mut list = ResourceList::<Customer>::new();
    list.load(&client, &mut toasts).await;
    let id = CustomerId::new("c1");
    list.mutate(
        &client,
        &mut toasts,
        "Customer deleted",
        client.delete_customer(&id),
    )
    .await
    .expect("delete succeeds");

    let ids: Vec<_> = list.items().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c2"]);
}

// ============================================================================
// Reviews
// ============================================================================

#[tokio::test]
async fn test_approve_and_respond() {
    let mock = backend().await;
    mock.seed(
        "reviews",
        vec![
            fixtures::review("r1", "Linen Apron", "pending"),
            fixtures::review("r2", "Oak Board", "pending"),
        ],
    );
    let client = mock.client(Some("tok")).expect("client");
    let mut toasts = ToastLog::new();

    let mut screen = Screen::<Review, ReviewResponseInput>::new();
    screen.mount(&client, &mut toasts).await;

    let id = ReviewId::new("r1");
    screen
        .list
        .mutate(
            &client,
            &mut toasts,
            "Review approved",
            client.set_review_status(&id, ReviewStatus::Approved),
        )
        .await
        .expect("approve succeeds");

    let pending = screen
        .list
        .visible_where(|r| r.status == ReviewStatus::Pending);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id.as_str(), "r2");

    screen
        .edit_where(|r| r.id.as_str() == "r1")
        .expect("r1 listed")
        .admin_response = "Thank you!".to_string();
    assert!(screen.save(&client, &mut toasts).await.is_saved());

    let r1 = screen
        .list
        .find(|r| r.id.as_str() == "r1")
        .expect("r1 after refetch");
    assert_eq!(r1.status, ReviewStatus::Approved);
    assert_eq!(r1.admin_response.as_deref(), Some("Thank you!"));
    assert_eq!(r1.product.title, "Linen Apron");
}

#[tokio::test]
async fn test_empty_response_rejected() {
    let mock = backend().await;
    mock.seed(
        "reviews",
        vec![fixtures::review("r1", "Linen Apron", "approved")],
    );
    let client = mock.client(Some("tok")).expect("client");
    let mut toasts = ToastLog::new();

    let mut screen = Screen::<Review, ReviewResponseInput>::new();
    screen.mount(&client, &mut toasts).await;
    screen.edit_where(|r| r.id.as_str() == "r1");

    let outcome = screen.save(&client, &mut toasts).await;
    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert!(mock.requests_with(&Method::PATCH).is_empty());
    assert!(toasts.has_errors());
}
