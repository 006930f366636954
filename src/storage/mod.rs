// src/storage/mod.rs

//! Persistence for the upload history store.
//!
//! The history file is the only durable state this program owns. It is a
//! human-inspectable JSON map from file identity (content digest) to the
//! recorded upload:
//!
//! ```text
//! {
//!   "2cf24d...9824": {
//!     "file_name": "shot-001.png",
//!     "asset_id": "0195c7e0-...",
//!     "outcome": "created",
//!     "recorded_at": "2026-08-06T09:12:44Z"
//!   }
//! }
//! ```

pub mod history;

pub use history::{HistoryEntry, UploadHistory};
