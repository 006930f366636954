// src/config.rs

//! Application configuration.
//!
//! Connection settings come from required environment variables; tuning
//! knobs come from an optional `immich-sync.toml` next to the binary's
//! working directory, with sensible defaults when the file is absent.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Environment variable holding the folder to synchronize.
pub const ENV_FOLDER: &str = "SCREENSHOTS_PATH";
/// Environment variable holding the Immich API key.
pub const ENV_API_KEY: &str = "IMMICH_API_KEY";
/// Environment variable holding the LAN base URL.
pub const ENV_LOCAL_URL: &str = "IMMICH_LOCAL_URL";
/// Environment variable holding the WAN base URL.
pub const ENV_EXTERNAL_URL: &str = "IMMICH_EXTERNAL_URL";
/// Environment variable holding the target album name.
pub const ENV_ALBUM_NAME: &str = "IMMICH_ALBUM_NAME";

/// Default settings file name.
pub const SETTINGS_FILE: &str = "immich-sync.toml";

/// Root application configuration, immutable for the run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Folder whose image files are synchronized
    pub folder: PathBuf,

    /// Immich API key sent as the `x-api-key` header
    pub api_key: String,

    /// Base URL probed first (LAN address)
    pub local_url: String,

    /// Base URL used when the local one is unreachable
    pub external_url: String,

    /// Name of the server-side album uploads are linked into
    pub album_name: String,

    /// Uploader tuning knobs
    pub uploader: UploaderSettings,
}

impl Config {
    /// Build configuration from the process environment.
    pub fn from_env(uploader: UploaderSettings) -> Result<Self> {
        Self::from_vars(uploader, |key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key-value lookup.
    ///
    /// All five connection variables are required; an absent or blank value
    /// is a configuration error.
    pub fn from_vars<F>(uploader: UploaderSettings, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> Result<String> {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| AppError::config(format!("{key} is not set")))
        };

        Ok(Self {
            folder: PathBuf::from(require(ENV_FOLDER)?),
            api_key: require(ENV_API_KEY)?,
            local_url: require(ENV_LOCAL_URL)?,
            external_url: require(ENV_EXTERNAL_URL)?,
            album_name: require(ENV_ALBUM_NAME)?,
            uploader,
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if !self.folder.is_dir() {
            return Err(AppError::config(format!(
                "{} is not a readable directory: {}",
                ENV_FOLDER,
                self.folder.display()
            )));
        }
        Url::parse(&self.local_url)
            .map_err(|e| AppError::config(format!("{ENV_LOCAL_URL} is not a valid URL: {e}")))?;
        Url::parse(&self.external_url)
            .map_err(|e| AppError::config(format!("{ENV_EXTERNAL_URL} is not a valid URL: {e}")))?;
        self.uploader.validate()
    }

    /// Path of the upload history store.
    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.uploader.history_file)
    }
}

/// Uploader tuning knobs, loaded from the settings file when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploaderSettings {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Timeout for the endpoint reachability probe, in seconds
    #[serde(default = "defaults::probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Timeout for upload and album requests, in seconds
    #[serde(default = "defaults::upload_timeout")]
    pub upload_timeout_secs: u64,

    /// Device identifier reported with every upload
    #[serde(default = "defaults::device_id")]
    pub device_id: String,

    /// File extensions considered for upload (lowercase, no dot)
    #[serde(default = "defaults::extensions")]
    pub extensions: Vec<String>,

    /// Upload history file path
    #[serde(default = "defaults::history_file")]
    pub history_file: String,

    /// Append-only log file path
    #[serde(default = "defaults::log_file")]
    pub log_file: String,
}

impl UploaderSettings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load settings or return defaults if the file is absent or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        if !path.as_ref().exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Settings load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate settings values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.probe_timeout_secs == 0 {
            return Err(AppError::config("probe_timeout_secs must be > 0"));
        }
        if self.upload_timeout_secs == 0 {
            return Err(AppError::config("upload_timeout_secs must be > 0"));
        }
        if self.extensions.is_empty() {
            return Err(AppError::config("no file extensions configured"));
        }
        Ok(())
    }
}

impl Default for UploaderSettings {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            probe_timeout_secs: defaults::probe_timeout(),
            upload_timeout_secs: defaults::upload_timeout(),
            device_id: defaults::device_id(),
            extensions: defaults::extensions(),
            history_file: defaults::history_file(),
            log_file: defaults::log_file(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "immich-sync/0.1".into()
    }
    pub fn probe_timeout() -> u64 {
        2
    }
    pub fn upload_timeout() -> u64 {
        30
    }
    pub fn device_id() -> String {
        "immich-sync".into()
    }
    pub fn extensions() -> Vec<String> {
        vec!["png".into(), "jpg".into(), "jpeg".into(), "webp".into()]
    }
    pub fn history_file() -> String {
        "immich_upload_history.json".into()
    }
    pub fn log_file() -> String {
        "immich_sync.log".into()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn full_vars() -> HashMap<&'static str, String> {
        HashMap::from([
            (ENV_FOLDER, "/tmp/screenshots".to_string()),
            (ENV_API_KEY, "secret".to_string()),
            (ENV_LOCAL_URL, "http://192.168.1.10:2283".to_string()),
            (ENV_EXTERNAL_URL, "https://photos.example.com".to_string()),
            (ENV_ALBUM_NAME, "Screenshots".to_string()),
        ])
    }

    fn from_map(vars: &HashMap<&str, String>) -> Result<Config> {
        Config::from_vars(UploaderSettings::default(), |key| vars.get(key).cloned())
    }

    #[test]
    fn from_vars_reads_all_fields() {
        let config = from_map(&full_vars()).unwrap();
        assert_eq!(config.folder, PathBuf::from("/tmp/screenshots"));
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.album_name, "Screenshots");
    }

    #[test]
    fn from_vars_rejects_missing_field() {
        for key in [
            ENV_FOLDER,
            ENV_API_KEY,
            ENV_LOCAL_URL,
            ENV_EXTERNAL_URL,
            ENV_ALBUM_NAME,
        ] {
            let mut vars = full_vars();
            vars.remove(key);
            let err = from_map(&vars).unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "{key} should be required");
        }
    }

    #[test]
    fn from_vars_rejects_blank_field() {
        let mut vars = full_vars();
        vars.insert(ENV_ALBUM_NAME, "   ".to_string());
        assert!(from_map(&vars).is_err());
    }

    #[test]
    fn validate_rejects_missing_folder() {
        let mut vars = full_vars();
        vars.insert(ENV_FOLDER, "/definitely/not/a/real/path".to_string());
        let config = from_map(&vars).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_url() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut vars = full_vars();
        vars.insert(ENV_FOLDER, tmp.path().to_string_lossy().to_string());
        vars.insert(ENV_LOCAL_URL, "not a url".to_string());
        let config = from_map(&vars).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn settings_defaults_are_sane() {
        let settings = UploaderSettings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.probe_timeout_secs < settings.upload_timeout_secs);
        assert!(settings.extensions.contains(&"png".to_string()));
    }

    #[test]
    fn settings_load_partial_toml() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "probe_timeout_secs = 5\n").unwrap();

        let settings = UploaderSettings::load(&path).unwrap();
        assert_eq!(settings.probe_timeout_secs, 5);
        assert_eq!(settings.device_id, "immich-sync");
    }

    #[test]
    fn settings_missing_file_falls_back_to_defaults() {
        let settings = UploaderSettings::load_or_default("/no/such/settings.toml");
        assert_eq!(settings.upload_timeout_secs, 30);
    }
}
