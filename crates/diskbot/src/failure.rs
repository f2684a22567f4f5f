//! Operator-facing record of failures swallowed by the search pipeline.
//!
//! Every failure is reported once through an injected [`FailureLog`] at the
//! call site that produced it and then treated as "no data" for that unit of
//! work. End users never see these.

use thiserror::Error;

use crate::infra::disk::DiskError;
use crate::infra::ocr::OcrError;

/// One swallowed failure, tagged with the provider path it concerns.
#[derive(Debug, Error)]
pub enum SearchFailure {
    /// A folder listing failed; the folder contributes no candidates.
    #[error("listing `{path}` failed: {source}")]
    Listing { path: String, source: DiskError },
    /// No download link could be resolved; the candidate is skipped.
    #[error("resolving download link for `{path}` failed: {source}")]
    LinkResolution { path: String, source: DiskError },
    /// The image bytes could not be downloaded; the candidate is skipped.
    #[error("downloading `{path}` failed: {source}")]
    Download { path: String, source: DiskError },
    /// Decoding or recognition failed; the candidate is skipped.
    #[error("recognizing text in `{path}` failed: {source}")]
    Recognition { path: String, source: OcrError },
}

impl SearchFailure {
    /// Returns the provider path the failure concerns.
    pub fn path(&self) -> &str {
        match self {
            Self::Listing { path, .. }
            | Self::LinkResolution { path, .. }
            | Self::Download { path, .. }
            | Self::Recognition { path, .. } => path,
        }
    }

    /// Returns whether the failure is a rejected or missing disk token.
    pub fn is_auth(&self) -> bool {
        match self {
            Self::Listing { source, .. }
            | Self::LinkResolution { source, .. }
            | Self::Download { source, .. } => source.is_auth(),
            Self::Recognition { .. } => false,
        }
    }
}

/// Sink for failures the pipeline swallows.
pub trait FailureLog: Send + Sync {
    /// Records one failure.
    fn record(&self, failure: &SearchFailure);
}

/// [`FailureLog`] that forwards to `tracing` at warn level.
pub struct TracingFailureLog;

impl FailureLog for TracingFailureLog {
    fn record(&self, failure: &SearchFailure) {
        tracing::warn!(path = failure.path(), auth = failure.is_auth(), "{failure}");
    }
}
