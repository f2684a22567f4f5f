use std::io;
use std::sync::Arc;

use clap::Parser;
use diskbot::bot::dispatch::Dispatcher;
use diskbot::config::Cli;
use diskbot::failure::TracingFailureLog;
use diskbot::infra::chat::TelegramClient;
use diskbot::infra::disk::YandexDiskClient;
use diskbot::infra::ocr::TesseractOcr;
use diskbot::pipeline::SearchPipeline;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> io::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    let config = Cli::parse().into_config();

    let disk = YandexDiskClient::new(&config.disk).map_err(io::Error::other)?;
    let chat = TelegramClient::new(&config.chat).map_err(io::Error::other)?;
    let pipeline = SearchPipeline::new(
        config.pipeline,
        Arc::new(disk),
        Arc::new(TesseractOcr::new(&config.ocr)),
        Arc::new(TracingFailureLog),
    );
    let dispatcher = Dispatcher::new(
        Arc::new(chat),
        pipeline,
        config.game_url,
        config.retry_delay,
    );

    info!(ocr = config.pipeline.ocr_enabled, "diskbot started");
    dispatcher.run().await;

    Ok(())
}
