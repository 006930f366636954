// src/storage/history.rs

//! Upload history store.
//!
//! Keeps the mapping of previously uploaded files so unchanged files are
//! never re-uploaded. Entries are append-only in practice; nothing in the
//! program removes them. Saves go through a temp file plus rename so a
//! crash mid-write cannot corrupt already-committed entries.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{LocalCandidate, UploadOutcome};

/// One recorded upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    /// File name at upload time, kept for inspection
    pub file_name: String,

    /// Server asset id; absent for conflicts, which produce none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,

    /// Outcome label ("created", "duplicate-merged", "conflict")
    pub outcome: String,

    /// When the entry was recorded
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Build an entry from a candidate and its upload outcome.
    pub fn new(candidate: &LocalCandidate, outcome: &UploadOutcome) -> Self {
        Self {
            file_name: candidate.file_name.clone(),
            asset_id: outcome.asset_id().map(str::to_string),
            outcome: outcome.label().to_string(),
            recorded_at: Utc::now(),
        }
    }
}

/// The persisted upload history, keyed by content digest.
#[derive(Debug)]
pub struct UploadHistory {
    path: PathBuf,
    entries: BTreeMap<String, HistoryEntry>,
}

impl UploadHistory {
    /// Load history from disk.
    ///
    /// A missing file yields an empty history. An unparseable file is
    /// treated the same after a warning: the server's own dedup merges any
    /// resulting re-uploads, so starting over is safe.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!(
                        "History file {} is unreadable ({}). Starting with empty history.",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(AppError::Io(e)),
        };

        Ok(Self { path, entries })
    }

    /// Whether a file identity has already been processed.
    pub fn contains(&self, digest: &str) -> bool {
        self.entries.contains_key(digest)
    }

    /// Look up the recorded entry for a file identity.
    pub fn get(&self, digest: &str) -> Option<&HistoryEntry> {
        self.entries.get(digest)
    }

    /// Record a processed file.
    pub fn record(&mut self, digest: String, entry: HistoryEntry) {
        self.entries.insert(digest, entry);
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persist the history atomically (write to temp, then rename).
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(&self.entries)?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(file_name: &str, asset_id: Option<&str>) -> HistoryEntry {
        HistoryEntry {
            file_name: file_name.to_string(),
            asset_id: asset_id.map(str::to_string),
            outcome: if asset_id.is_some() {
                "created".to_string()
            } else {
                "conflict".to_string()
            },
            recorded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn missing_file_yields_empty_history() {
        let tmp = TempDir::new().unwrap();
        let history = UploadHistory::load(tmp.path().join("history.json"))
            .await
            .unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn save_and_reload_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history.json");

        let mut history = UploadHistory::load(&path).await.unwrap();
        history.record("digest-f".to_string(), entry("f.png", Some("asset-a")));
        history.save().await.unwrap();

        let reloaded = UploadHistory::load(&path).await.unwrap();
        assert!(reloaded.contains("digest-f"));
        assert_eq!(
            reloaded.get("digest-f").unwrap().asset_id.as_deref(),
            Some("asset-a")
        );
    }

    #[tokio::test]
    async fn conflict_entries_persist_without_asset_id() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history.json");

        let mut history = UploadHistory::load(&path).await.unwrap();
        history.record("digest-c".to_string(), entry("c.png", None));
        history.save().await.unwrap();

        let reloaded = UploadHistory::load(&path).await.unwrap();
        let recorded = reloaded.get("digest-c").unwrap();
        assert_eq!(recorded.asset_id, None);
        assert_eq!(recorded.outcome, "conflict");
    }

    #[tokio::test]
    async fn corrupt_file_starts_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let history = UploadHistory::load(&path).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn save_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history.json");

        let mut history = UploadHistory::load(&path).await.unwrap();
        history.record("d".to_string(), entry("d.png", Some("a")));
        history.save().await.unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
