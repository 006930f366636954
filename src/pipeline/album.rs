// src/pipeline/album.rs

//! Album resolution and asset linking.

use crate::error::{AppError, Result};
use crate::services::ImmichClient;

/// Resolve the configured album name to its server-side id.
///
/// Runs pre-flight, before any file is uploaded: a missing album aborts
/// the run. Albums are never auto-created.
pub async fn resolve_album(server: &ImmichClient, name: &str) -> Result<String> {
    log::info!("Looking for album '{}'", name);
    match server.find_album_id(name).await? {
        Some(id) => Ok(id),
        None => Err(AppError::AlbumNotFound(name.to_string())),
    }
}

/// Link this run's finalized assets into the album.
///
/// Individual link failures are logged and skipped; they never abort
/// linking of the remaining assets. Returns the number linked.
pub async fn link_assets(server: &ImmichClient, album_id: &str, asset_ids: &[String]) -> usize {
    let mut linked = 0;
    for asset_id in asset_ids {
        match server.add_to_album(album_id, asset_id).await {
            Ok(()) => {
                linked += 1;
                log::debug!("Linked asset {}", asset_id);
            }
            Err(error) => log::warn!("Failed to link asset {}: {}", asset_id, error),
        }
    }
    linked
}
