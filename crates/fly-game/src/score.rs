//! Score report sent by the game page through `Telegram.WebApp.sendData`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON payload posted by the page when the ball falls off the screen.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub score: u64,
}

/// A web-app payload that is not a score report.
#[derive(Debug, Error)]
#[error("invalid score report: {0}")]
pub struct ScoreError(#[from] serde_json::Error);

/// Parses the raw web-app payload into a [`ScoreReport`].
///
/// # Errors
/// Returns an error when `data` is not a JSON object with a non-negative
/// integer `score`.
pub fn parse_score_report(data: &str) -> Result<ScoreReport, ScoreError> {
    Ok(serde_json::from_str(data)?)
}

/// Chat reply announcing a finished game.
pub fn score_reply(report: ScoreReport) -> String {
    format!("🏆 Your score: {} points!", report.score)
}
