// src/pipeline/mod.rs

//! Pipeline entry points for the sync run.
//!
//! - `select_endpoint`: Probe the local URL, fall back to the external one
//! - `run_uploader`: Upload new files and classify server responses
//! - `resolve_album` / `link_assets`: Album pre-flight and linking

pub mod album;
pub mod endpoint;
pub mod upload;

pub use endpoint::select_endpoint;
pub use upload::run_uploader;

use crate::config::Config;
use crate::error::Result;
use crate::models::UploadReport;
use crate::services::ImmichClient;
use crate::storage::UploadHistory;
use crate::utils::http;

/// Run the full sync pipeline.
pub async fn run(config: &Config) -> Result<UploadReport> {
    let base_url = select_endpoint(config).await?;

    let client = http::create_client(&config.uploader)?;
    let server = ImmichClient::new(&base_url, &config.api_key, client);

    // Pre-flight: a missing album must abort before any file is touched.
    let album_id = album::resolve_album(&server, &config.album_name).await?;

    let mut history = UploadHistory::load(config.history_path()).await?;
    log::info!("Loaded {} upload history entries", history.len());

    let mut report = run_uploader(config, &server, &mut history).await?;

    report.linked = album::link_assets(&server, &album_id, &report.linkable).await;

    if report.processed() > 0 {
        log::info!(
            "Done! Processed {} images ({} created, {} merged, {} conflicts), linked {} to '{}'.",
            report.processed(),
            report.uploaded,
            report.merged,
            report.conflicts,
            report.linked,
            config.album_name
        );
    } else {
        log::info!("No new images to upload.");
    }

    if report.failures > 0 {
        log::warn!(
            "{} files failed to upload and will be retried next run",
            report.failures
        );
    }

    Ok(report)
}
