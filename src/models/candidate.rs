// src/models/candidate.rs

//! Local file candidates enumerated from the configured folder.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::Result;

/// A local image file considered for upload.
///
/// Candidates are ephemeral: enumerated fresh each run, filtered by
/// extension, and sorted oldest-modified first so uploads land on the
/// server in roughly chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCandidate {
    /// Absolute path of the file
    pub path: PathBuf,

    /// File name without directory components
    pub file_name: String,

    /// File size in bytes
    pub size: u64,

    /// Filesystem creation time (modification time where unavailable)
    pub created: DateTime<Utc>,

    /// Filesystem modification time
    pub modified: DateTime<Utc>,
}

impl LocalCandidate {
    /// Build a candidate from a file path.
    pub fn from_path(path: PathBuf) -> Result<Self> {
        let metadata = std::fs::metadata(&path)?;
        let modified = metadata.modified()?;
        // Not every filesystem reports a creation time
        let created = metadata.created().unwrap_or(modified);

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            file_name,
            size: metadata.len(),
            created: DateTime::<Utc>::from(created),
            modified: DateTime::<Utc>::from(modified),
            path,
        })
    }

    /// Enumerate candidates under `folder` matching the accepted extensions.
    pub fn collect(folder: &Path, extensions: &[String]) -> Result<Vec<Self>> {
        let mut candidates = Vec::new();

        for entry in std::fs::read_dir(folder)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if !has_accepted_extension(&path, extensions) {
                continue;
            }
            candidates.push(Self::from_path(path)?);
        }

        candidates.sort_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.file_name.cmp(&b.file_name))
        });

        Ok(candidates)
    }

    /// Device-scoped asset identifier reported to the server.
    pub fn device_asset_id(&self) -> String {
        format!("{}-{}", self.file_name, self.size)
    }
}

fn has_accepted_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| extensions.iter().any(|accepted| *accepted == ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn accepted() -> Vec<String> {
        vec!["png".into(), "jpg".into(), "jpeg".into(), "webp".into()]
    }

    #[test]
    fn collect_filters_by_extension() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("shot.png"), b"png").unwrap();
        std::fs::write(tmp.path().join("photo.JPG"), b"jpg").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), b"txt").unwrap();
        std::fs::write(tmp.path().join("noext"), b"?").unwrap();

        let candidates = LocalCandidate::collect(tmp.path(), &accepted()).unwrap();
        let mut names: Vec<_> = candidates.iter().map(|c| c.file_name.as_str()).collect();
        names.sort();
        assert_eq!(names, ["photo.JPG", "shot.png"]);
    }

    #[test]
    fn collect_skips_subdirectories() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("nested.png")).unwrap();
        std::fs::write(tmp.path().join("real.png"), b"png").unwrap();

        let candidates = LocalCandidate::collect(tmp.path(), &accepted()).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].file_name, "real.png");
    }

    #[test]
    fn collect_orders_by_modification_time() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b.png"), b"1").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        std::fs::write(tmp.path().join("a.png"), b"2").unwrap();

        let candidates = LocalCandidate::collect(tmp.path(), &accepted()).unwrap();
        let names: Vec<_> = candidates.iter().map(|c| c.file_name.as_str()).collect();
        assert_eq!(names, ["b.png", "a.png"]);
    }

    #[test]
    fn device_asset_id_includes_name_and_size() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shot.png");
        std::fs::write(&path, b"12345").unwrap();

        let candidate = LocalCandidate::from_path(path).unwrap();
        assert_eq!(candidate.device_asset_id(), "shot.png-5");
    }
}
