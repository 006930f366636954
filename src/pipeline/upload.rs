// src/pipeline/upload.rs

//! Upload orchestration.
//!
//! Processes candidates strictly sequentially: one upload in flight at a
//! time, history persisted after every recorded file so a mid-run crash
//! loses nothing already committed.

use crate::config::Config;
use crate::error::Result;
use crate::models::{LocalCandidate, UploadOutcome, UploadReport};
use crate::services::ImmichClient;
use crate::storage::{HistoryEntry, UploadHistory};
use crate::utils;

/// Upload every candidate not already present in history.
///
/// Transport failures are isolated per file: logged, left out of history
/// (retried next run), and never abort the batch.
pub async fn run_uploader(
    config: &Config,
    server: &ImmichClient,
    history: &mut UploadHistory,
) -> Result<UploadReport> {
    let candidates = LocalCandidate::collect(&config.folder, &config.uploader.extensions)?;

    let mut report = UploadReport {
        scanned: candidates.len(),
        ..UploadReport::default()
    };

    if candidates.is_empty() {
        log::info!("No image files found in {}", config.folder.display());
        return Ok(report);
    }

    for candidate in candidates {
        let digest = match utils::sha256_file(&candidate.path).await {
            Ok(digest) => digest,
            Err(error) => {
                report.failures += 1;
                log::error!("Failed to read {}: {}", candidate.file_name, error);
                continue;
            }
        };

        if history.contains(&digest) {
            report.skipped += 1;
            continue;
        }

        log::info!("Uploading: {}", candidate.file_name);
        match server
            .upload_asset(&candidate, &config.uploader.device_id)
            .await
        {
            Ok(outcome) => {
                match &outcome {
                    UploadOutcome::Created { asset_id } => {
                        report.uploaded += 1;
                        report.linkable.push(asset_id.clone());
                        log::info!("Created asset {} for {}", asset_id, candidate.file_name);
                    }
                    UploadOutcome::DuplicateMerged { asset_id } => {
                        report.merged += 1;
                        report.linkable.push(asset_id.clone());
                        log::warn!("Duplicate on server: {}", candidate.file_name);
                    }
                    UploadOutcome::Conflict { message } => {
                        report.conflicts += 1;
                        log::warn!("Conflict for {}: {}", candidate.file_name, message);
                    }
                }

                history.record(digest, HistoryEntry::new(&candidate, &outcome));
                history.save().await?;
            }
            Err(error) => {
                report.failures += 1;
                log::error!("Upload failed for {}: {}", candidate.file_name, error);
            }
        }
    }

    Ok(report)
}
