//! Provider-independent values flowing through one search.

/// Folder listing entries.
pub mod entry;
/// Case-insensitive query matching and the image-name filter.
pub mod query;
