/// Game page rendering.
pub mod page;
/// Score report exchanged with the bot.
pub mod score;
/// HTTP routes serving the page.
pub mod server;
