// src/services/immich.rs

//! Immich API client.
//!
//! Thin wrapper over the server endpoints this program consumes:
//! `POST /api/assets` (multipart upload), `GET /api/albums`, and
//! `PUT /api/albums/{id}/assets`. Authentication is the `x-api-key`
//! header on every request.

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{LocalCandidate, UploadOutcome};

const API_KEY_HEADER: &str = "x-api-key";

/// Client for a selected Immich endpoint.
pub struct ImmichClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ImmichClient {
    /// Create a client bound to the given base URL and API key.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// Upload one candidate and classify the server's answer.
    ///
    /// Transport failures surface as `Err`; any received response is
    /// classified by [`classify_upload_response`].
    pub async fn upload_asset(
        &self,
        candidate: &LocalCandidate,
        device_id: &str,
    ) -> Result<UploadOutcome> {
        let bytes = tokio::fs::read(&candidate.path).await?;

        let part = Part::bytes(bytes)
            .file_name(candidate.file_name.clone())
            .mime_str("application/octet-stream")?;

        let form = Form::new()
            .part("assetData", part)
            .text("deviceAssetId", candidate.device_asset_id())
            .text("deviceId", device_id.to_string())
            .text("fileCreatedAt", candidate.created.to_rfc3339())
            .text("fileModifiedAt", candidate.modified.to_rfc3339())
            .text("isFavorite", "false");

        let response = self
            .client
            .post(self.endpoint("assets"))
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        classify_upload_response(status, &body)
    }

    /// Look up an album id by its exact name.
    pub async fn find_album_id(&self, name: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(self.endpoint("albums"))
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;

        let albums: Vec<AlbumSummary> = response.json().await?;
        Ok(albums
            .into_iter()
            .find(|album| album.album_name == name)
            .map(|album| album.id))
    }

    /// Link one asset into an album.
    ///
    /// The server answers 200 even when the asset is already a member, so
    /// re-linking after an interrupted run is harmless.
    pub async fn add_to_album(&self, album_id: &str, asset_id: &str) -> Result<()> {
        self.client
            .put(self.endpoint(&format!("albums/{album_id}/assets")))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&serde_json::json!({ "ids": [asset_id] }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// One album in the server's album listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlbumSummary {
    id: String,
    album_name: String,
}

/// Fields of interest in an upload response body.
#[derive(Debug, Default, Deserialize)]
struct UploadResponseBody {
    id: Option<String>,
    status: Option<String>,
}

/// Classify an upload response into an outcome.
///
/// - 2xx with an id: `Created`, or `DuplicateMerged` when the body flags a
///   server-side duplicate.
/// - 409 carrying a recoverable id: `DuplicateMerged`.
/// - Other 4xx (or an id-less 409): `Conflict`, recorded and never retried.
/// - 5xx and malformed 2xx bodies: `Err`, treated like a transport failure
///   so the file is retried on the next run.
pub fn classify_upload_response(status: StatusCode, body: &str) -> Result<UploadOutcome> {
    let parsed: UploadResponseBody = serde_json::from_str(body).unwrap_or_default();

    if status.is_success() {
        return match parsed.id {
            Some(asset_id) if parsed.status.as_deref() == Some("duplicate") => {
                Ok(UploadOutcome::DuplicateMerged { asset_id })
            }
            Some(asset_id) => Ok(UploadOutcome::Created { asset_id }),
            None => Err(AppError::upload(
                "server response",
                format!("HTTP {status} without an asset id: {}", snippet(body)),
            )),
        };
    }

    if status == StatusCode::CONFLICT {
        return Ok(match parsed.id {
            Some(asset_id) => UploadOutcome::DuplicateMerged { asset_id },
            None => UploadOutcome::Conflict {
                message: snippet(body),
            },
        });
    }

    if status.is_client_error() {
        return Ok(UploadOutcome::Conflict {
            message: format!("HTTP {status}: {}", snippet(body)),
        });
    }

    Err(AppError::upload(
        "server response",
        format!("HTTP {status}: {}", snippet(body)),
    ))
}

fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}
