//! Chat platform adapter: long polling for inbound messages and plain-text
//! replies, spoken over the Telegram Bot HTTP API.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ChatConfig;

/// Extra time granted to a long-poll request beyond the server-side wait.
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Boxed async result used by [`ChatPlatform`] trait methods.
pub type ChatFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Failure of one chat platform call.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request never produced a response. The URL is stripped because it
    /// embeds the bot token.
    #[error("chat request failed: {0}")]
    Transport(reqwest::Error),
    /// The platform answered with `ok: false`.
    #[error("chat platform rejected the call ({code}): {description}")]
    Api { code: i64, description: String },
    /// The response body did not match the expected JSON shape.
    #[error("unexpected chat response: {0}")]
    Payload(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ChatError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.without_url())
    }
}

/// One inbound event from the chat platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update {
    /// Monotonic identifier used to acknowledge handled updates.
    pub update_id: i64,
    /// The message carried by this update, when it is a message update.
    pub message: Option<IncomingMessage>,
}

/// An inbound chat message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Chat to answer into.
    pub chat_id: i64,
    /// Message text, absent for media-only messages.
    pub text: Option<String>,
    /// Payload sent by a web app opened from a keyboard button.
    pub web_app_data: Option<String>,
}

/// Keyboard button that opens a web page inside the chat client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebAppButton {
    pub text: String,
    pub url: String,
}

/// Async boundary to the chat platform.
#[cfg_attr(test, mockall::automock)]
pub trait ChatPlatform: Send + Sync {
    /// Waits for updates newer than `offset` and returns them in order.
    ///
    /// # Errors
    /// Returns an error on transport failure or when the platform rejects
    /// the call.
    fn poll_updates(&self, offset: Option<i64>) -> ChatFuture<Result<Vec<Update>, ChatError>>;

    /// Sends one plain-text message to `chat_id`.
    ///
    /// # Errors
    /// Returns an error on transport failure or when the platform rejects
    /// the call.
    fn send_text(&self, chat_id: i64, text: String) -> ChatFuture<Result<(), ChatError>>;

    /// Sends one message with a single-button reply keyboard attached.
    ///
    /// # Errors
    /// Returns an error on transport failure or when the platform rejects
    /// the call.
    fn send_with_button(
        &self,
        chat_id: i64,
        text: String,
        button: WebAppButton,
    ) -> ChatFuture<Result<(), ChatError>>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    error_code: Option<i64>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdatePayload {
    update_id: i64,
    message: Option<MessagePayload>,
}

#[derive(Debug, Deserialize)]
struct MessagePayload {
    chat: ChatPayload,
    text: Option<String>,
    web_app_data: Option<WebAppDataPayload>,
}

#[derive(Debug, Deserialize)]
struct ChatPayload {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct WebAppDataPayload {
    data: String,
}

#[derive(Debug, Serialize)]
struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: [&'static str; 1],
}

#[derive(Debug, Serialize)]
struct SendMessageRequest {
    chat_id: i64,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
struct ReplyKeyboardMarkup {
    keyboard: Vec<Vec<KeyboardButtonPayload>>,
    resize_keyboard: bool,
}

#[derive(Debug, Serialize)]
struct KeyboardButtonPayload {
    text: String,
    web_app: WebAppInfoPayload,
}

#[derive(Debug, Serialize)]
struct WebAppInfoPayload {
    url: String,
}

/// [`ChatPlatform`] backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramClient {
    bot_url: String,
    http: reqwest::Client,
    poll_timeout: Duration,
}

impl TelegramClient {
    /// Creates a client for the bot identified by `config.token`.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be initialized.
    pub fn new(config: &ChatConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            bot_url: format!("{}/bot{}", config.api_base.trim_end_matches('/'), config.token),
            http,
            poll_timeout: config.poll_timeout,
        })
    }

    async fn call<Request, Response>(
        &self,
        method: &str,
        request: &Request,
        timeout: Option<Duration>,
    ) -> Result<Response, ChatError>
    where
        Request: Serialize + Sync,
        Response: DeserializeOwned,
    {
        let mut builder = self
            .http
            .post(format!("{}/{method}", self.bot_url))
            .json(request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let body = builder.send().await?.text().await?;

        parse_api_response(&body)
    }

    async fn send_message(&self, request: SendMessageRequest) -> Result<(), ChatError> {
        let _sent: serde_json::Value = self.call("sendMessage", &request, None).await?;

        Ok(())
    }
}

impl ChatPlatform for TelegramClient {
    fn poll_updates(&self, offset: Option<i64>) -> ChatFuture<Result<Vec<Update>, ChatError>> {
        let client = self.clone();

        Box::pin(async move {
            let request = GetUpdatesRequest {
                offset,
                timeout: client.poll_timeout.as_secs(),
                allowed_updates: ["message"],
            };
            let payloads: Vec<UpdatePayload> = client
                .call("getUpdates", &request, Some(client.poll_timeout + POLL_GRACE))
                .await?;

            Ok(payloads.into_iter().map(Update::from).collect())
        })
    }

    fn send_text(&self, chat_id: i64, text: String) -> ChatFuture<Result<(), ChatError>> {
        let client = self.clone();

        Box::pin(async move {
            client
                .send_message(SendMessageRequest {
                    chat_id,
                    text,
                    reply_markup: None,
                })
                .await
        })
    }

    fn send_with_button(
        &self,
        chat_id: i64,
        text: String,
        button: WebAppButton,
    ) -> ChatFuture<Result<(), ChatError>> {
        let client = self.clone();

        Box::pin(async move {
            client
                .send_message(SendMessageRequest {
                    chat_id,
                    text,
                    reply_markup: Some(ReplyKeyboardMarkup::single(button)),
                })
                .await
        })
    }
}

impl ReplyKeyboardMarkup {
    fn single(button: WebAppButton) -> Self {
        Self {
            keyboard: vec![vec![KeyboardButtonPayload {
                text: button.text,
                web_app: WebAppInfoPayload { url: button.url },
            }]],
            resize_keyboard: true,
        }
    }
}

impl From<UpdatePayload> for Update {
    fn from(payload: UpdatePayload) -> Self {
        Self {
            update_id: payload.update_id,
            message: payload.message.map(|message| IncomingMessage {
                chat_id: message.chat.id,
                text: message.text,
                web_app_data: message.web_app_data.map(|web_app_data| web_app_data.data),
            }),
        }
    }
}

fn parse_api_response<T: DeserializeOwned>(body: &str) -> Result<T, ChatError> {
    let response: ApiResponse<T> = serde_json::from_str(body)?;
    match response.result {
        Some(result) if response.ok => Ok(result),
        _ => Err(ChatError::Api {
            code: response.error_code.unwrap_or_default(),
            description: response
                .description
                .unwrap_or_else(|| "no description".to_string()),
        }),
    }
}
