//! Long-poll loop and per-message routing.

use std::sync::Arc;
use std::time::Duration;

use fly_game::score::{parse_score_report, score_reply};
use tracing::{debug, warn};
use url::Url;

use crate::bot::reply::{GAME_BUTTON_TEXT, GAME_INVITE, GREETING, NOTHING_FOUND, command_name};
use crate::infra::chat::{ChatError, ChatPlatform, IncomingMessage, Update, WebAppButton};
use crate::pipeline::SearchPipeline;

const START_COMMAND: &str = "start";

/// What an inbound message asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/start`, answered with the greeting.
    Start,
    /// Any other `/command`; not handled.
    UnknownCommand,
    /// Data posted back by the game web app.
    WebAppData(&'a str),
    /// Free text to search for.
    Query(&'a str),
    /// Nothing this bot reacts to (stickers, photos, service messages).
    Ignore,
}

/// Classifies `message`.
pub fn route(message: &IncomingMessage) -> Route<'_> {
    if let Some(data) = message.web_app_data.as_deref() {
        return Route::WebAppData(data);
    }

    let Some(text) = message.text.as_deref() else {
        return Route::Ignore;
    };
    if text.starts_with('/') {
        return match command_name(text) {
            Some(START_COMMAND) => Route::Start,
            _ => Route::UnknownCommand,
        };
    }

    Route::Query(text)
}

/// Drives the bot: polls the chat platform and answers each message to
/// completion before taking the next one.
pub struct Dispatcher {
    chat: Arc<dyn ChatPlatform>,
    game_url: Option<Url>,
    pipeline: SearchPipeline,
    retry_delay: Duration,
}

impl Dispatcher {
    /// Creates a dispatcher. `game_url` enables the game button on `/start`.
    pub fn new(
        chat: Arc<dyn ChatPlatform>,
        pipeline: SearchPipeline,
        game_url: Option<Url>,
        retry_delay: Duration,
    ) -> Self {
        Self {
            chat,
            game_url,
            pipeline,
            retry_delay,
        }
    }

    /// Polls and handles updates forever.
    pub async fn run(&self) {
        let mut offset = None;

        loop {
            offset = self.poll_once(offset).await;
        }
    }

    /// Fetches one batch of updates after `offset`, handles them in order,
    /// and returns the offset acknowledging everything handled.
    ///
    /// A failed poll is logged, followed by a pause of `retry_delay`, and
    /// leaves the offset unchanged.
    pub async fn poll_once(&self, offset: Option<i64>) -> Option<i64> {
        let updates = match self.chat.poll_updates(offset).await {
            Ok(updates) => updates,
            Err(error) => {
                warn!(%error, "polling chat updates failed");
                tokio::time::sleep(self.retry_delay).await;

                return offset;
            }
        };

        let mut next_offset = offset;
        for update in updates {
            next_offset = Some(update.update_id + 1);
            self.handle(update).await;
        }

        next_offset
    }

    /// Answers one update. Reply failures are logged, never propagated.
    pub async fn handle(&self, update: Update) {
        let Some(message) = update.message else {
            debug!(update_id = update.update_id, "skipping non-message update");

            return;
        };

        if let Err(error) = self.handle_message(&message).await {
            warn!(chat_id = message.chat_id, %error, "replying to chat failed");
        }
    }

    async fn handle_message(&self, message: &IncomingMessage) -> Result<(), ChatError> {
        let chat_id = message.chat_id;

        match route(message) {
            Route::Start => self.greet(chat_id).await,
            Route::WebAppData(data) => match parse_score_report(data) {
                Ok(report) => self.chat.send_text(chat_id, score_reply(report)).await,
                Err(error) => {
                    warn!(chat_id, %error, "ignoring web app data");

                    Ok(())
                }
            },
            Route::Query(text) => self.answer_query(chat_id, text).await,
            Route::UnknownCommand | Route::Ignore => Ok(()),
        }
    }

    async fn greet(&self, chat_id: i64) -> Result<(), ChatError> {
        let Some(game_url) = &self.game_url else {
            return self.chat.send_text(chat_id, GREETING.to_string()).await;
        };

        let button = WebAppButton {
            text: GAME_BUTTON_TEXT.to_string(),
            url: game_url.to_string(),
        };

        self.chat
            .send_with_button(chat_id, format!("{GREETING}\n{GAME_INVITE}"), button)
            .await
    }

    /// Sends one message per found path, or a single "nothing found".
    ///
    /// A failed send is logged and does not hold back the remaining paths.
    async fn answer_query(&self, chat_id: i64, text: &str) -> Result<(), ChatError> {
        let paths = self.pipeline.search(text).await;
        if paths.is_empty() {
            return self.chat.send_text(chat_id, NOTHING_FOUND.to_string()).await;
        }

        for path in paths {
            if let Err(error) = self.chat.send_text(chat_id, path.clone()).await {
                warn!(chat_id, path = path.as_str(), %error, "sending search result failed");
            }
        }

        Ok(())
    }
}
