//! Upload collaborator boundary
//!
//! The engine never talks HTTP itself; it hands encoded bytes to an
//! [`Uploader`] and reports the outcome. Uploads are single-shot futures
//! and are never cancelled mid-flight — a superseding commit just makes the
//! older result moot when it finally resolves (last-write-wins).

use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::BoxFuture;
use thiserror::Error;

use crate::render::CropOutput;

/// Error payload surfaced verbatim from the upload collaborator.
///
/// The engine does not retry; the encoded bytes stay in the [`CropOutput`]
/// so the caller can retry the upload without redoing the crop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct UploadError {
    pub message: String,
}

impl UploadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// File-upload collaborator.
///
/// Resolves exactly once with the stored-asset URL or an error payload.
pub trait Uploader: Send + Sync {
    fn upload(&self, bytes: Vec<u8>) -> BoxFuture<'static, Result<String, UploadError>>;
}

/// Monotonic commit generation counter for last-write-wins uploads.
///
/// Each commit takes a ticket; when an upload resolves, only the holder of
/// the newest ticket gets to publish its result.
#[derive(Debug, Default)]
pub struct UploadTracker {
    latest: AtomicU64,
}

/// Proof of which commit generation an upload belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitTicket(u64);

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new commit, superseding all earlier tickets
    pub fn begin(&self) -> CommitTicket {
        CommitTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the newest commit
    pub fn is_current(&self, ticket: CommitTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Upload a crop output, honoring last-write-wins.
///
/// Returns `None` when the commit was superseded while the upload was in
/// flight — the result is discarded, not surfaced. Errors from a current
/// upload pass through verbatim.
pub async fn upload_output(
    uploader: &dyn Uploader,
    output: &CropOutput,
    tracker: &UploadTracker,
    ticket: CommitTicket,
) -> Option<Result<String, UploadError>> {
    let result = uploader.upload(output.bytes.clone()).await;
    if !tracker.is_current(ticket) {
        log::debug!("discarding superseded upload result");
        return None;
    }
    if let Err(err) = &result {
        log::warn!("upload failed: {err}");
    }
    Some(result)
}
