// src/pipeline/endpoint.rs

//! Endpoint selection with local-to-external fallback.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::utils::http;

/// Select the base URL used for the remainder of the run.
///
/// Probes the local URL first with the short probe timeout, then the
/// external URL. The selection happens once per run; no per-file
/// re-probing.
pub async fn select_endpoint(config: &Config) -> Result<String> {
    let client = http::create_probe_client(&config.uploader)?;

    log::info!("Checking connection to {}", config.local_url);
    if probe(&client, &config.local_url).await {
        log::info!("Local network detected.");
        return Ok(config.local_url.clone());
    }

    log::info!("Switching to external URL {}", config.external_url);
    if probe(&client, &config.external_url).await {
        return Ok(config.external_url.clone());
    }

    Err(AppError::NetworkUnavailable {
        local: config.local_url.clone(),
        external: config.external_url.clone(),
    })
}

/// Cheap reachability check against a server's ping endpoint.
async fn probe(client: &reqwest::Client, base_url: &str) -> bool {
    let url = format!("{}/api/server/ping", base_url.trim_end_matches('/'));
    match client.get(url).send().await {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}
