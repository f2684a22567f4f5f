//! Process configuration assembled once at startup.
//!
//! Values come from command-line flags with environment-variable fallbacks
//! and are handed to constructors explicitly; nothing reads the environment
//! after [`Cli::into_config`].

use std::time::Duration;

use clap::{ArgAction, Parser};
use url::Url;

/// Default Yandex Disk REST API root.
pub const DEFAULT_DISK_API: &str = "https://cloud-api.yandex.net/v1/disk";
/// Default Telegram Bot API root.
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

/// Command-line surface of the `diskbot` binary.
#[derive(Debug, Parser)]
#[command(name = "diskbot", version)]
#[command(about = "Chat bot that finds photos on a cloud disk by name and recognized text")]
pub struct Cli {
    /// Chat platform bot token
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", default_value = "", hide_env_values = true)]
    pub telegram_token: String,

    /// Cloud-disk OAuth token
    #[arg(long, env = "YANDEX_DISK_TOKEN", default_value = "", hide_env_values = true)]
    pub disk_token: String,

    /// Cloud-disk REST API root
    #[arg(long, env = "DISKBOT_DISK_API", default_value = DEFAULT_DISK_API)]
    pub disk_api: String,

    /// Maximum number of entries requested per folder listing
    #[arg(long, env = "DISKBOT_LIST_LIMIT", default_value_t = 1000)]
    pub list_limit: u32,

    /// Confirm name matches by recognizing text in the images
    #[arg(long, env = "DISKBOT_OCR", default_value_t = true, action = ArgAction::Set)]
    pub ocr: bool,

    /// Recognizer language set, in tesseract `-l` syntax
    #[arg(long, env = "DISKBOT_OCR_LANGUAGES", default_value = "rus+eng")]
    pub ocr_languages: String,

    /// Recognizer executable
    #[arg(long, env = "DISKBOT_TESSERACT", default_value = "tesseract")]
    pub tesseract: String,

    /// Public URL of the fly-game page; enables the game button on /start
    #[arg(long, env = "DISKBOT_GAME_URL")]
    pub game_url: Option<Url>,

    /// Chat platform Bot API root
    #[arg(long, env = "DISKBOT_TELEGRAM_API", default_value = DEFAULT_TELEGRAM_API)]
    pub telegram_api: String,

    /// Long-poll timeout in seconds
    #[arg(long, env = "DISKBOT_POLL_TIMEOUT", default_value_t = 30)]
    pub poll_timeout: u64,

    /// Delay in seconds before polling again after a failed poll
    #[arg(long, env = "DISKBOT_RETRY_DELAY", default_value_t = 5)]
    pub retry_delay: u64,
}

impl Cli {
    /// Splits the flat command line into per-component configuration.
    pub fn into_config(self) -> BotConfig {
        BotConfig {
            chat: ChatConfig {
                api_base: self.telegram_api,
                poll_timeout: Duration::from_secs(self.poll_timeout),
                token: self.telegram_token,
            },
            disk: DiskConfig {
                api_base: self.disk_api,
                list_limit: self.list_limit,
                token: self.disk_token,
            },
            game_url: self.game_url,
            ocr: OcrConfig {
                binary: self.tesseract,
                languages: self.ocr_languages,
            },
            pipeline: PipelineConfig {
                ocr_enabled: self.ocr,
            },
            retry_delay: Duration::from_secs(self.retry_delay),
        }
    }
}

/// Everything the bot process needs, resolved at startup.
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub chat: ChatConfig,
    pub disk: DiskConfig,
    pub game_url: Option<Url>,
    pub ocr: OcrConfig,
    pub pipeline: PipelineConfig,
    /// Pause after a failed poll.
    pub retry_delay: Duration,
}

/// Chat platform client settings.
#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub api_base: String,
    pub poll_timeout: Duration,
    pub token: String,
}

/// Cloud-disk client settings.
#[derive(Clone, Debug)]
pub struct DiskConfig {
    pub api_base: String,
    /// Page size for folder listings; the provider defaults to 20 otherwise.
    pub list_limit: u32,
    pub token: String,
}

/// Recognizer settings.
#[derive(Clone, Debug)]
pub struct OcrConfig {
    pub binary: String,
    pub languages: String,
}

/// Search pipeline switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Whether name matches go through OCR confirmation.
    pub ocr_enabled: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { ocr_enabled: true }
    }
}
