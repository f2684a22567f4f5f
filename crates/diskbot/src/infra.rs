//! Infrastructure adapters for the cloud disk, OCR engine, and chat platform.

/// Chat platform long-polling client.
pub mod chat;
/// Cloud-disk REST client.
pub mod disk;
/// Scripted HTTP server backing adapter tests.
#[cfg(test)]
pub(crate) mod http_stub;
/// Text recognition over downloaded images.
pub mod ocr;
