// src/utils/mod.rs

//! Utility functions and helpers.

pub mod http;

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::Result;

/// Compute the hex-encoded SHA-256 digest of a file's content.
///
/// The digest is the stable file identity used as the upload history key,
/// so renaming a file does not trigger a re-upload while editing it does.
pub async fn sha256_file(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn digest_matches_known_value() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("hello.png");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let digest = sha256_file(&path).await.unwrap();
        assert_eq!(
            digest,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[tokio::test]
    async fn digest_tracks_content_not_name() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.png");
        let b = tmp.path().join("b.png");
        let c = tmp.path().join("c.png");
        tokio::fs::write(&a, b"same").await.unwrap();
        tokio::fs::write(&b, b"same").await.unwrap();
        tokio::fs::write(&c, b"different").await.unwrap();

        let da = sha256_file(&a).await.unwrap();
        let db = sha256_file(&b).await.unwrap();
        let dc = sha256_file(&c).await.unwrap();
        assert_eq!(da, db);
        assert_ne!(da, dc);
    }
}
