//! HTTP surface of the game: the page itself and a liveness probe.

use std::io;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::info;

use crate::page::{GameSettings, PageError, render_page};

/// Rendered page shared by all requests.
#[derive(Clone)]
struct PageState {
    html: Arc<String>,
}

/// Builds the game router. The page is rendered once, up front.
///
/// # Errors
/// Returns an error if the page template fails to render.
pub fn router(settings: &GameSettings) -> Result<Router, PageError> {
    let state = PageState {
        html: Arc::new(render_page(settings)?),
    };

    Ok(Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .with_state(state))
}

/// Serves `router` on `listener` until the process stops.
///
/// # Errors
/// Returns an error when the listener fails.
pub async fn serve(listener: TcpListener, router: Router) -> io::Result<()> {
    if let Ok(address) = listener.local_addr() {
        info!(%address, "serving fly game");
    }

    axum::serve(listener, router).await
}

async fn index(State(state): State<PageState>) -> Html<String> {
    Html(state.html.as_str().to_owned())
}

async fn health() -> &'static str {
    "ok"
}
