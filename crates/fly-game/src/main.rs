use std::io;
use std::net::SocketAddr;

use clap::Parser;
use fly_game::page::GameSettings;
use fly_game::server::{router, serve};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Serves the fly game page for the chat web app.
#[derive(Debug, Parser)]
#[command(name = "fly-game", version)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "FLY_GAME_BIND", default_value = "0.0.0.0:5000")]
    bind: SocketAddr,

    /// Page title
    #[arg(long, default_value = "Fly Game")]
    title: String,

    /// Downward acceleration per frame
    #[arg(long, default_value_t = 0.5)]
    gravity: f64,

    /// Velocity applied on tap (negative moves up)
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    jump_velocity: f64,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    let cli = Cli::parse();
    let settings = GameSettings {
        title: cli.title,
        gravity: cli.gravity,
        jump_velocity: cli.jump_velocity,
        ..GameSettings::default()
    };

    let router = router(&settings).map_err(io::Error::other)?;
    let listener = TcpListener::bind(cli.bind).await?;

    serve(listener, router).await
}
