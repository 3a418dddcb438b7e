//! Integration test support for Shopdesk.
//!
//! [`MockBackend`] is an in-process store backend built with axum. It serves
//! the REST routes the admin client talks to under an `/api` prefix on an
//! ephemeral port, keeps every collection in memory as raw JSON, and records
//! each request (method, path, `Authorization` header) for assertions.
//!
//! Failures are injected per method and path with [`FailRule`]; uploads can
//! be slowed down to exercise the upload timeout.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopdesk-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::extract::{Multipart, Path, Request, State};
use axum::http::{Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use shopdesk_admin::ApiClient;
use shopdesk_admin::reorder::ReorderMode;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Collections served by the mock, with the field that identifies an item.
const COLLECTIONS: &[(&str, &str)] = &[
    ("coupons", "code"),
    ("customers", "_id"),
    ("orders", "_id"),
    ("reviews", "_id"),
    ("images", "_id"),
    ("products", "_id"),
    ("subcategories", "_id"),
    ("users", "_id"),
];

/// A request as seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path relative to the API prefix, e.g. `/coupons/SPRING`.
    pub path: String,
    pub authorization: Option<String>,
}

/// Makes matching requests fail with a canned response.
#[derive(Debug, Clone)]
pub struct FailRule {
    pub method: Method,
    pub path: String,
    /// Matching requests let through before failing starts.
    pub skip: usize,
    /// Number of matching requests that fail once failing starts.
    pub times: usize,
    pub status: StatusCode,
    pub body: Value,
}

impl FailRule {
    /// Fail the next matching request with `status` and a JSON `message`.
    #[must_use]
    pub fn once(method: Method, path: &str, status: StatusCode, message: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            skip: 0,
            times: 1,
            status,
            body: json!({ "message": message }),
        }
    }

    /// Fail every matching request.
    #[must_use]
    pub const fn always(mut self) -> Self {
        self.times = usize::MAX;
        self
    }

    /// Let `skip` matching requests through first.
    #[must_use]
    pub const fn after(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Replace the response body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    collections: BTreeMap<&'static str, Vec<Value>>,
    settings: Value,
    requests: Vec<RecordedRequest>,
    rules: Vec<FailRule>,
    upload_delay: Option<Duration>,
    upload_omits_type: bool,
}

type Shared = Arc<Mutex<MockState>>;

fn lock(state: &Shared) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Running mock backend. The server stops when this is dropped.
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
    server: JoinHandle<()>,
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

impl MockBackend {
    /// Bind an ephemeral port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state: Shared = Arc::new(Mutex::new(MockState {
            settings: json!({ "currency": "USD" }),
            ..MockState::default()
        }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(state.clone());
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            state,
            server,
        })
    }

    /// Base URL the admin client should be configured with.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Client authenticated with `token`, using the default reorder mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn client(&self, token: Option<&str>) -> Result<ApiClient, shopdesk_admin::ApiError> {
        self.client_with_mode(token, ReorderMode::default())
    }

    /// Client authenticated with `token` persisting reorders with `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be
    /// built.
    pub fn client_with_mode(
        &self,
        token: Option<&str>,
        mode: ReorderMode,
    ) -> Result<ApiClient, shopdesk_admin::ApiError> {
        let base = url::Url::parse(&format!("{}/", self.base_url()))?;
        ApiClient::builder(base)
            .token(token.map(|t| secrecy::SecretString::from(t.to_string())))
            .reorder_mode(mode)
            .upload_timeout(Duration::from_secs(5))
            .build()
    }

    /// Replace the contents of `collection`.
    pub fn seed(&self, collection: &'static str, items: Vec<Value>) {
        lock(&self.state).collections.insert(collection, items);
    }

    /// Current contents of `collection`.
    #[must_use]
    pub fn items(&self, collection: &str) -> Vec<Value> {
        lock(&self.state)
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Item of `collection` whose identifying field equals `id`.
    #[must_use]
    pub fn item(&self, collection: &str, id: &str) -> Option<Value> {
        let key = key_field(collection)?;
        self.items(collection)
            .into_iter()
            .find(|item| item.get(key).and_then(Value::as_str) == Some(id))
    }

    /// Replace the settings document.
    pub fn seed_settings(&self, settings: Value) {
        lock(&self.state).settings = settings;
    }

    /// Current settings document.
    #[must_use]
    pub fn settings(&self) -> Value {
        lock(&self.state).settings.clone()
    }

    /// Register a failure rule.
    pub fn fail(&self, rule: FailRule) {
        lock(&self.state).rules.push(rule);
    }

    /// Delay every upload response by `delay`.
    pub fn delay_uploads(&self, delay: Duration) {
        lock(&self.state).upload_delay = Some(delay);
    }

    /// Leave `type` out of upload responses.
    pub fn omit_upload_type(&self) {
        lock(&self.state).upload_omits_type = true;
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }

    /// Requests with the given method, in arrival order.
    #[must_use]
    pub fn requests_with(&self, method: &Method) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| &r.method == method)
            .collect()
    }

    /// Forget recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.state).requests.clear();
    }
}

fn key_field(collection: &str) -> Option<&'static str> {
    COLLECTIONS
        .iter()
        .find(|(name, _)| *name == collection)
        .map(|(_, key)| *key)
}

// ============================================================================
// Router
// ============================================================================

fn router(state: Shared) -> Router {
    let mut api = Router::new()
        .route("/users/admin/all", get(|s: State<Shared>| list(s, "users")))
        .route(
            "/users/admin",
            post(|s: State<Shared>, body: Json<Value>| create(s, "users", body)),
        )
        .route(
            "/users/admin/{id}",
            put(|s: State<Shared>, id: Path<String>, body: Json<Value>| {
                update(s, "users", id, body)
            })
            .delete(|s: State<Shared>, id: Path<String>| remove(s, "users", id)),
        )
        .route("/settings", get(get_settings).put(put_settings))
        .route("/images/reorder", put(reorder_images))
        .route("/upload", post(upload));

    for &(name, _) in COLLECTIONS {
        if name == "users" {
            continue;
        }
        api = api
            .route(
                &format!("/{name}"),
                get(move |s: State<Shared>| list(s, name))
                    .post(move |s: State<Shared>, body: Json<Value>| create(s, name, body)),
            )
            .route(
                &format!("/{name}/{{id}}"),
                get(move |s: State<Shared>, id: Path<String>| get_one(s, name, id))
                    .put(move |s: State<Shared>, id: Path<String>, body: Json<Value>| {
                        update(s, name, id, body)
                    })
                    .delete(move |s: State<Shared>, id: Path<String>| remove(s, name, id)),
            )
            .route(
                &format!("/{name}/{{id}}/{{action}}"),
                patch(
                    move |s: State<Shared>, params: Path<(String, String)>, body: Json<Value>| {
                        act(s, name, params, body)
                    },
                ),
            );
    }

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

/// Record the request and apply failure rules before routing.
async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request
        .uri()
        .path()
        .strip_prefix("/api")
        .unwrap_or_else(|| request.uri().path())
        .to_string();
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let injected = {
        let mut guard = lock(&state);
        guard.requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            authorization,
        });
        guard
            .rules
            .iter_mut()
            .find(|rule| rule.method == method && rule.path == path && rule.times > 0)
            .and_then(|rule| {
                if rule.skip > 0 {
                    rule.skip -= 1;
                    None
                } else {
                    rule.times = rule.times.saturating_sub(1);
                    Some((rule.status, rule.body.clone()))
                }
            })
    };

    match injected {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => next.run(request).await,
    }
}

fn not_found(what: &str, id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{what} {id} not found") })),
    )
        .into_response()
}

fn matches_id(item: &Value, key: &str, id: &str) -> bool {
    item.get(key).and_then(Value::as_str) == Some(id)
}

fn merge(target: &mut Value, patch: &Value) {
    if let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn list(State(state): State<Shared>, name: &'static str) -> Json<Value> {
    let items = lock(&state)
        .collections
        .get(name)
        .cloned()
        .unwrap_or_default();
    Json(Value::Array(items))
}

async fn get_one(State(state): State<Shared>, name: &'static str, Path(id): Path<String>) -> Response {
    let key = key_field(name).unwrap_or("_id");
    let guard = lock(&state);
    guard
        .collections
        .get(name)
        .and_then(|items| items.iter().find(|item| matches_id(item, key, &id)))
        .map_or_else(
            || not_found(name, &id),
            |item| Json(item.clone()).into_response(),
        )
}

async fn create(
    State(state): State<Shared>,
    name: &'static str,
    Json(mut body): Json<Value>,
) -> Response {
    let key = key_field(name).unwrap_or("_id");
    let mut guard = lock(&state);
    let items = guard.collections.entry(name).or_default();

    if key == "_id" {
        if let Some(object) = body.as_object_mut() {
            object.insert("_id".to_string(), json!(Uuid::new_v4().to_string()));
            object.remove("password");
        }
    } else {
        let code = body.get(key).and_then(Value::as_str).unwrap_or_default();
        if items.iter().any(|item| matches_id(item, key, code)) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Coupon code already exists" })),
            )
                .into_response();
        }
    }

    items.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update(
    State(state): State<Shared>,
    name: &'static str,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    let key = key_field(name).unwrap_or("_id");
    if let Some(object) = body.as_object_mut() {
        object.remove("password");
    }
    let mut guard = lock(&state);
    let Some(item) = guard
        .collections
        .get_mut(name)
        .and_then(|items| items.iter_mut().find(|item| matches_id(item, key, &id)))
    else {
        return not_found(name, &id);
    };
    merge(item, &body);
    Json(item.clone()).into_response()
}

async fn remove(State(state): State<Shared>, name: &'static str, Path(id): Path<String>) -> Response {
    let key = key_field(name).unwrap_or("_id");
    let mut guard = lock(&state);
    let items = guard.collections.entry(name).or_default();
    let before = items.len();
    items.retain(|item| !matches_id(item, key, &id));
    if items.len() == before {
        return not_found(name, &id);
    }
    Json(json!({ "message": "Deleted" })).into_response()
}

/// Inline actions: `ban`, `unban`, `notes`, `status`, `tracking`, `response`.
async fn act(
    State(state): State<Shared>,
    name: &'static str,
    Path((id, action)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let key = key_field(name).unwrap_or("_id");
    let patch = match action.as_str() {
        "ban" => json!({ "isBanned": true }),
        "unban" => json!({ "isBanned": false }),
        "notes" | "status" | "tracking" | "response" => body,
        _ => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("Unknown action {action}") })),
            )
                .into_response();
        }
    };

    let mut guard = lock(&state);
    let Some(item) = guard
        .collections
        .get_mut(name)
        .and_then(|items| items.iter_mut().find(|item| matches_id(item, key, &id)))
    else {
        return not_found(name, &id);
    };
    merge(item, &patch);
    Json(item.clone()).into_response()
}

async fn get_settings(State(state): State<Shared>) -> Json<Value> {
    Json(lock(&state).settings.clone())
}

async fn put_settings(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut guard = lock(&state);
    merge(&mut guard.settings, &body);
    Json(guard.settings.clone())
}

/// All-or-nothing position update.
async fn reorder_images(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let entries: Vec<(String, i64)> = body
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|entry| {
                    Some((
                        entry.get("id")?.as_str()?.to_string(),
                        entry.get("order")?.as_i64()?,
                    ))
                })
                .collect()
        })
        .unwrap_or_default();

    let mut guard = lock(&state);
    let images = guard.collections.entry("images").or_default();
    if let Some((missing, _)) = entries
        .iter()
        .find(|(id, _)| !images.iter().any(|image| matches_id(image, "_id", id)))
    {
        return not_found("images", missing);
    }
    for (id, order) in &entries {
        if let Some(image) = images.iter_mut().find(|image| matches_id(image, "_id", id)) {
            merge(image, &json!({ "order": order }));
        }
    }
    Json(json!({ "message": "Reordered", "count": entries.len() })).into_response()
}

async fn upload(State(state): State<Shared>, mut multipart: Multipart) -> Response {
    let (delay, omit_type) = {
        let guard = lock(&state);
        (guard.upload_delay, guard.upload_omits_type)
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let is_video = field
            .content_type()
            .is_some_and(|mime| mime.starts_with("video/"));
        let size = field.bytes().await.map_or(0, |bytes| bytes.len());
        if size == 0 {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Empty file" })),
            )
                .into_response();
        }

        let url = format!("https://cdn.shopdesk.test/{}-{file_name}", Uuid::new_v4());
        let body = if omit_type {
            json!({ "url": url })
        } else {
            json!({ "url": url, "type": if is_video { "video" } else { "image" } })
        };
        return Json(body).into_response();
    }

    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "No file provided" })),
    )
        .into_response()
}

// ============================================================================
// Fixtures
// ============================================================================

/// Ready-made backend records.
pub mod fixtures {
    use serde_json::{Value, json};

    #[must_use]
    pub fn coupon(code: &str, value: f64) -> Value {
        json!({
            "code": code,
            "type": "percentage",
            "value": value,
            "usedCount": 0,
            "isStackable": false,
            "isActive": true
        })
    }

    #[must_use]
    pub fn order(id: &str, number: u32, status: &str) -> Value {
        json!({
            "_id": id,
            "orderNumber": number,
            "customer": { "name": "Robin Vale", "email": "robin@example.com" },
            "items": [
                { "product": "p1", "name": "Linen Apron", "quantity": 2, "price": 24.5 }
            ],
            "total": 49.0,
            "status": status,
            "createdAt": "2026-03-01T10:00:00Z"
        })
    }

    #[must_use]
    pub fn customer(id: &str, name: &str, email: &str) -> Value {
        json!({
            "_id": id,
            "name": name,
            "email": email,
            "totalOrders": 3,
            "totalSpent": 120.5,
            "isBanned": false
        })
    }

    #[must_use]
    pub fn review(id: &str, product: &str, status: &str) -> Value {
        json!({
            "_id": id,
            "product": { "_id": "p1", "name": product },
            "customer": { "name": "Sky" },
            "rating": 4,
            "comment": "Lovely fabric",
            "status": status
        })
    }

    #[must_use]
    pub fn image(id: &str, order: i32) -> Value {
        json!({
            "_id": id,
            "imageUrl": format!("https://cdn.shopdesk.test/{id}.jpg"),
            "order": order,
            "isActive": true
        })
    }

    #[must_use]
    pub fn admin_user(id: &str, name: &str, role: &str) -> Value {
        json!({
            "_id": id,
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "role": role,
            "isActive": true
        })
    }
}
