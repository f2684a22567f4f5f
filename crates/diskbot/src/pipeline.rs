//! Two-stage photo search: name matching over the disk listing, then
//! optional OCR confirmation of the matches.

/// OCR re-check of name-matched candidates.
pub mod confirmation;
/// Two-level folder listing with name filtering.
pub mod listing;

use std::sync::Arc;

use tracing::info;

use crate::config::PipelineConfig;
use crate::domain::query::Query;
use crate::failure::FailureLog;
use crate::infra::disk::DiskClient;
use crate::infra::ocr::OcrEngine;
use crate::pipeline::confirmation::confirm_candidates;
use crate::pipeline::listing::list_candidates;

/// Runs one query through the listing and confirmation stages.
///
/// Holds no per-query state; every call to [`SearchPipeline::search`] owns
/// its own candidate and result sets.
pub struct SearchPipeline {
    config: PipelineConfig,
    disk: Arc<dyn DiskClient>,
    log: Arc<dyn FailureLog>,
    ocr: Arc<dyn OcrEngine>,
}

impl SearchPipeline {
    /// Creates a pipeline over explicit collaborators.
    pub fn new(
        config: PipelineConfig,
        disk: Arc<dyn DiskClient>,
        ocr: Arc<dyn OcrEngine>,
        log: Arc<dyn FailureLog>,
    ) -> Self {
        Self {
            config,
            disk,
            log,
            ocr,
        }
    }

    /// Returns the provider paths of photos matching `text`, in delivery
    /// order.
    ///
    /// OCR-confirmed paths win when there is at least one; otherwise the
    /// name matches are returned unchanged. Failures never surface here;
    /// they are recorded through the injected [`FailureLog`] and an empty
    /// result is indistinguishable from "nothing matched".
    pub async fn search(&self, text: &str) -> Vec<String> {
        let query = Query::new(text);
        if query.is_blank() {
            return Vec::new();
        }

        let candidates = list_candidates(self.disk.as_ref(), self.log.as_ref(), &query).await;
        if candidates.is_empty() || !self.config.ocr_enabled {
            return candidates;
        }

        let confirmed = confirm_candidates(
            self.disk.as_ref(),
            self.ocr.as_ref(),
            self.log.as_ref(),
            &query,
            &candidates,
        )
        .await;
        info!(
            query = query.as_str(),
            candidates = candidates.len(),
            confirmed = confirmed.len(),
            "search finished"
        );

        prefer_confirmed(candidates, confirmed)
    }
}

/// OCR may only narrow a non-empty name-match set, never empty it.
fn prefer_confirmed(candidates: Vec<String>, confirmed: Vec<String>) -> Vec<String> {
    if confirmed.is_empty() {
        return candidates;
    }

    confirmed
}
