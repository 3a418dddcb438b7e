//! Store backend REST client.
//!
//! [`ApiClient`] is the explicit context every API operation runs against:
//! it carries the base URL, the bearer token (from configuration or the
//! persisted session) and the timeouts. Per-resource operations live in
//! [`crate::api`] as `impl ApiClient` blocks.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::reorder::ReorderMode;
use crate::session::{SessionError, SessionStore};

/// Store backend API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
    upload_timeout: Duration,
    reorder_mode: ReorderMode,
}

impl ApiClient {
    /// Create a client from configuration, reading the session file when no
    /// explicit token is configured.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client fails to build, or
    /// `ApiError::Parse` if the session file is unreadable.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let token = if config.has_explicit_token() {
            config.token.clone()
        } else {
            SessionStore::new(&config.session_path)
                .load()
                .map_err(|e: SessionError| ApiError::Parse(e.to_string()))?
                .map(|session| session.token)
        };

        Self::builder(config.base_url.clone())
            .token(token)
            .timeout(config.request_timeout)
            .upload_timeout(config.upload_timeout)
            .reorder_mode(config.reorder_mode)
            .build()
    }

    /// Start building a client against `base_url`.
    #[must_use]
    pub fn builder(base_url: Url) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url,
            token: None,
            timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(120),
            reorder_mode: ReorderMode::default(),
        }
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Whether requests carry a bearer token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.token.is_some()
    }

    /// Configured reorder persistence strategy.
    #[must_use]
    pub fn reorder_mode(&self) -> ReorderMode {
        self.inner.reorder_mode
    }

    /// Configured upload abort timeout.
    #[must_use]
    pub fn upload_timeout(&self) -> Duration {
        self.inner.upload_timeout
    }

    /// Resolve an API path (with or without leading `/`) against the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Build a request with the bearer token attached when present.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        let builder = self.inner.client.request(method, url);
        Ok(match &self.inner.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        })
    }

    /// Execute a GET request.
    #[instrument(skip(self))]
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path)?.send().await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    #[instrument(skip(self, body))]
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a PUT request with a JSON body.
    #[instrument(skip(self, body))]
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PUT, path)?.json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a PATCH request with a JSON body.
    #[instrument(skip(self, body))]
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PATCH, path)?.json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a DELETE request, ignoring any response body.
    #[instrument(skip(self))]
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path)?.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::parse_error(response).await)
    }

    /// Check status and decode a JSON body.
    ///
    /// Responses wrapped in a `{"data": ...}` envelope are unwrapped.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::parse_error(response).await);
        }

        let bytes = response.bytes().await?;
        let value: serde_json::Value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")))?
        };

        decode_body(value)
    }

    /// Turn a non-success response into an `ApiError::Request`.
    async fn parse_error(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status, &body);
        if err.is_unauthorized() {
            warn!(status, "Backend rejected credentials");
        } else {
            debug!(status, message = %err, "Backend returned error");
        }
        err
    }
}

/// Path of one item in `collection`.
///
/// The id is percent-encoded so characters such as `#`, `?` or `/` in a
/// user-entered code stay inside its path segment.
pub(crate) fn item_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", urlencoding::encode(id))
}

/// Path of an inline action on one item, e.g. `customers/{id}/ban`.
pub(crate) fn action_path(collection: &str, id: &str, action: &str) -> String {
    format!("{}/{action}", item_path(collection, id))
}

/// Keys allowed next to `data` in a response envelope.
const ENVELOPE_KEYS: &[&str] = &["data", "success", "message"];

/// Decode a response value, unwrapping a `{"data": ...}` envelope first.
///
/// An object counts as an envelope when it has a `data` key and no keys
/// besides `success` and `message`. The shape is checked before decoding:
/// settings accept any object and would otherwise decode the envelope.
fn decode_body<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiError> {
    let value = match value {
        serde_json::Value::Object(mut map)
            if map.contains_key("data")
                && map.keys().all(|key| ENVELOPE_KEYS.contains(&key.as_str())) =>
        {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")))
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("authenticated", &self.inner.token.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`].
#[derive(Debug)]
#[must_use]
pub struct ApiClientBuilder {
    base_url: Url,
    token: Option<SecretString>,
    timeout: Duration,
    upload_timeout: Duration,
    reorder_mode: ReorderMode,
}

impl ApiClientBuilder {
    /// Set (or clear) the bearer token.
    pub fn token(mut self, token: Option<SecretString>) -> Self {
        self.token = token;
        self
    }

    /// Per-request timeout.
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Upload abort timeout.
    pub const fn upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Reorder persistence strategy.
    pub const fn reorder_mode(mut self, mode: ReorderMode) -> Self {
        self.reorder_mode = mode;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client fails to build.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        Ok(ApiClient {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: self.base_url,
                token: self.token,
                upload_timeout: self.upload_timeout,
                reorder_mode: self.reorder_mode,
            }),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::builder(Url::parse(base).unwrap()).build().unwrap()
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        let client = client("https://api.example.test/api/");
        assert_eq!(
            client.url("/coupons").unwrap().as_str(),
            "https://api.example.test/api/coupons"
        );
        assert_eq!(
            client.url("users/admin/all").unwrap().as_str(),
            "https://api.example.test/api/users/admin/all"
        );
    }

    #[test]
    fn test_unauthenticated_by_default() {
        let client = client("http://localhost:5000/");
        assert!(!client.is_authenticated());

        let authed = ApiClient::builder(Url::parse("http://localhost:5000/").unwrap())
            .token(Some(SecretString::from("tok")))
            .build()
            .unwrap();
        assert!(authed.is_authenticated());
        assert!(!format!("{authed:?}").contains("tok\""));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    #[test]
    fn test_decode_body_direct() {
        let items: Vec<Item> = decode_body(serde_json::json!([{"name": "a"}])).unwrap();
        assert_eq!(items, vec![Item { name: "a".into() }]);
    }

    #[test]
    fn test_decode_body_data_envelope() {
        let items: Vec<Item> =
            decode_body(serde_json::json!({"success": true, "data": [{"name": "b"}]})).unwrap();
        assert_eq!(items, vec![Item { name: "b".into() }]);
    }

    #[test]
    fn test_decode_body_unwraps_envelope_for_open_objects() {
        let settings: crate::models::Settings = decode_body(serde_json::json!({
            "success": true,
            "data": {"currency": "EUR", "logo": "https://cdn.example.test/logo.png"}
        }))
        .unwrap();
        assert_eq!(settings.currency, "EUR");
        assert_eq!(settings.extra.keys().collect::<Vec<_>>(), vec!["logo"]);
    }

    #[test]
    fn test_decode_body_keeps_object_with_extra_keys() {
        let settings: crate::models::Settings =
            decode_body(serde_json::json!({"currency": "USD", "data": "kept"})).unwrap();
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.extra["data"], serde_json::json!("kept"));
    }

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(item_path("coupons", "SAVE#10"), "coupons/SAVE%2310");
        assert_eq!(item_path("coupons", "A/B?x"), "coupons/A%2FB%3Fx");
        assert_eq!(
            action_path("customers", "c 1", "ban"),
            "customers/c%201/ban"
        );
        let client = client("https://api.example.test/api/");
        assert_eq!(
            client.url(&item_path("coupons", "SAVE#10")).unwrap().as_str(),
            "https://api.example.test/api/coupons/SAVE%2310"
        );
    }

    #[test]
    fn test_decode_body_reports_parse_error() {
        let err = decode_body::<Vec<Item>>(serde_json::json!({"nope": 1})).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }
}
