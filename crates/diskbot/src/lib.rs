/// Chat-facing routing and replies.
pub mod bot;
/// Startup configuration from flags and environment.
pub mod config;
/// Provider-independent entries and queries.
pub mod domain;
/// Operator log of swallowed search failures.
pub mod failure;
/// Cloud disk, OCR, and chat platform adapters.
pub mod infra;
/// Listing and confirmation stages of the photo search.
pub mod pipeline;
