// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::config::UploaderSettings;
use crate::error::Result;

/// Create the HTTP client used for uploads and album calls.
pub fn create_client(settings: &UploaderSettings) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&settings.user_agent)
        .timeout(Duration::from_secs(settings.upload_timeout_secs))
        .build()?;
    Ok(client)
}

/// Create the short-timeout client used for the reachability probe.
pub fn create_probe_client(settings: &UploaderSettings) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&settings.user_agent)
        .timeout(Duration::from_secs(settings.probe_timeout_secs))
        .build()?;
    Ok(client)
}
