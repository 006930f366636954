// src/services/mod.rs

//! Service layer for the uploader application.
//!
//! Wraps the Immich HTTP API consumed by the pipeline: asset upload,
//! album lookup, and album-asset linking.

mod immich;

pub use immich::{ImmichClient, classify_upload_response};
