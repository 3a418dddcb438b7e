//! Media upload.
//!
//! Files go to the backend's `/upload` endpoint as multipart form data in a
//! field named `file`. The backend stores them and answers with the public
//! URL and media type. Uploads are the one operation with their own abort
//! deadline ([`ApiClient::upload_timeout`]).

use std::path::Path;

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use shopdesk_core::MediaKind;
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::error::ApiError;

/// A stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub url: String,
    pub kind: MediaKind,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
    #[serde(rename = "type", default)]
    kind: Option<MediaKind>,
}

fn extension(file_name: &str) -> &str {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
}

fn mime_for(file_name: &str) -> &'static str {
    match extension(file_name).to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "ogv" => "video/ogg",
        _ => "application/octet-stream",
    }
}

impl ApiClient {
    /// Upload a local file.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Io` if the file cannot be read, `ApiError::Timeout`
    /// if the upload exceeds the upload timeout, or any request error.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn upload_file(&self, path: &Path) -> Result<UploadedMedia, ApiError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        self.upload_bytes(file_name, bytes).await
    }

    /// Upload in-memory file content under `file_name`.
    ///
    /// When the backend omits the media type it is inferred from the file
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Timeout` if the upload exceeds the upload timeout,
    /// or any request error.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_bytes(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<UploadedMedia, ApiError> {
        let fallback_kind = MediaKind::from_extension(extension(&file_name));
        let part = Part::bytes(bytes)
            .mime_str(mime_for(&file_name))?
            .file_name(file_name);
        let form = Form::new().part("file", part);
        // Overrides the client-wide request timeout.
        let deadline = self.upload_timeout();
        let request = self
            .request(Method::POST, "upload")?
            .multipart(form)
            .timeout(deadline);

        let parsed = tokio::time::timeout(deadline, async {
            let response = request.send().await?;
            Self::handle_response::<UploadResponse>(response).await
        })
        .await
        .unwrap_or(Err(ApiError::Timeout(deadline.as_secs())));
        let parsed = match parsed {
            Err(ApiError::Transport(e)) if e.is_timeout() => {
                return Err(ApiError::Timeout(deadline.as_secs()));
            }
            other => other?,
        };

        let media = UploadedMedia {
            url: parsed.url,
            kind: parsed.kind.unwrap_or(fallback_kind),
        };
        info!(url = %media.url, kind = %media.kind, "File uploaded");
        Ok(media)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_known_extensions() {
        assert_eq!(mime_for("hero.JPG"), "image/jpeg");
        assert_eq!(mime_for("promo.mp4"), "video/mp4");
        assert_eq!(mime_for("README"), "application/octet-stream");
    }

    #[test]
    fn test_response_type_is_optional() {
        let parsed: UploadResponse =
            serde_json::from_str(r#"{"url":"https://cdn.test/a.webm"}"#).unwrap();
        assert!(parsed.kind.is_none());
        assert_eq!(MediaKind::from_extension(extension("a.webm")), MediaKind::Video);
    }
}
