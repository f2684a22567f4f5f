//! Chat-facing layer: routes inbound messages to the greeting, the score
//! report, or the photo search.

/// Long-poll loop and per-message routing.
pub mod dispatch;
/// Fixed reply texts and command parsing.
pub mod reply;
