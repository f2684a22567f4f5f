//! Confirmation stage: OCR re-check of name-matched candidates.

use tracing::debug;

use crate::domain::query::Query;
use crate::failure::{FailureLog, SearchFailure};
use crate::infra::disk::DiskClient;
use crate::infra::ocr::OcrEngine;

/// Returns the candidates whose recognized text contains `query`, in
/// candidate order.
///
/// Each candidate is resolved, downloaded, and recognized one at a time. Any
/// failure is logged and skips only that candidate.
pub async fn confirm_candidates(
    disk: &dyn DiskClient,
    ocr: &dyn OcrEngine,
    log: &dyn FailureLog,
    query: &Query,
    candidates: &[String],
) -> Vec<String> {
    let mut confirmed = Vec::new();

    for path in candidates {
        match recognize_candidate(disk, ocr, path).await {
            Ok(text) if query.matches(&text) => confirmed.push(path.clone()),
            Ok(_) => debug!(path = path.as_str(), "recognized text does not match"),
            Err(failure) => log.record(&failure),
        }
    }
    debug!(
        candidates = candidates.len(),
        confirmed = confirmed.len(),
        "confirmation stage finished"
    );

    confirmed
}

async fn recognize_candidate(
    disk: &dyn DiskClient,
    ocr: &dyn OcrEngine,
    path: &str,
) -> Result<String, SearchFailure> {
    let link = disk
        .download_link(path.to_string())
        .await
        .map_err(|source| SearchFailure::LinkResolution {
            path: path.to_string(),
            source,
        })?;
    let bytes = disk
        .fetch(link)
        .await
        .map_err(|source| SearchFailure::Download {
            path: path.to_string(),
            source,
        })?;

    ocr.recognize(bytes)
        .await
        .map_err(|source| SearchFailure::Recognition {
            path: path.to_string(),
            source,
        })
}
