//! Fixed reply texts and inbound command parsing.

/// Answer to `/start`.
pub const GREETING: &str = "Hi! Send me a query to search for photos on your cloud disk.";
/// Appended to [`GREETING`] when the game is available.
pub const GAME_INVITE: &str = "Or tap the button below to play Fly!";
/// Label of the keyboard button opening the game.
pub const GAME_BUTTON_TEXT: &str = "🎮 Play Fly!";
/// Answer to a query without results.
pub const NOTHING_FOUND: &str = "Nothing found.";

/// Returns the command name of a `/command` message, without the leading
/// slash, any `@botname` suffix, or arguments.
pub fn command_name(text: &str) -> Option<&str> {
    let command = text.strip_prefix('/')?.split_whitespace().next()?;
    let name = command.split('@').next().unwrap_or(command);

    (!name.is_empty()).then_some(name)
}
