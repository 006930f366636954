// src/models/outcome.rs

//! Upload outcome classification and run summary.

/// How the server answered a single upload attempt.
///
/// Per-file state machine: a candidate is either skipped (already in
/// history) or uploaded, and an upload terminates in exactly one of these
/// outcomes. A transport failure is not an outcome and leaves the file
/// eligible for the next run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The server created a new asset
    Created { asset_id: String },

    /// The server recognized identical content and merged into an
    /// existing asset
    DuplicateMerged { asset_id: String },

    /// The server reported a conflict it could not resolve into an asset
    Conflict { message: String },
}

impl UploadOutcome {
    /// Asset id usable for album linking, if the outcome produced one.
    pub fn asset_id(&self) -> Option<&str> {
        match self {
            UploadOutcome::Created { asset_id } | UploadOutcome::DuplicateMerged { asset_id } => {
                Some(asset_id)
            }
            UploadOutcome::Conflict { .. } => None,
        }
    }

    /// Short label recorded in the history store.
    pub fn label(&self) -> &'static str {
        match self {
            UploadOutcome::Created { .. } => "created",
            UploadOutcome::DuplicateMerged { .. } => "duplicate-merged",
            UploadOutcome::Conflict { .. } => "conflict",
        }
    }
}

/// Summary of one sync run.
#[derive(Debug, Default)]
pub struct UploadReport {
    /// Candidates found in the folder
    pub scanned: usize,
    /// Candidates already present in history
    pub skipped: usize,
    /// New assets created on the server
    pub uploaded: usize,
    /// Uploads merged into existing server assets
    pub merged: usize,
    /// Uploads the server reported as unresolvable conflicts
    pub conflicts: usize,
    /// Transport-level failures, retried on the next run
    pub failures: usize,
    /// Assets linked into the album
    pub linked: usize,
    /// Asset ids eligible for album linking this run
    pub linkable: Vec<String>,
}

impl UploadReport {
    /// Files that reached a terminal outcome this run.
    pub fn processed(&self) -> usize {
        self.uploaded + self.merged + self.conflicts
    }
}
