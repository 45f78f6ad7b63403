//! HTTP surface of the dashboard.
//!
//! Serves the embedded single-page frontend plus a small JSON API:
//!
//! **Frontend:**
//! - `GET /` — embedded `index.html`
//!
//! **Metadata:**
//! - `GET /api/status` — version, table counts, export manifest
//! - `GET /api/options` — page list and select options for topics/advisors
//!
//! **Pages:**
//! - `GET /api/page/overview` — corpus overview
//! - `GET /api/page/advisor-search?q=` — advisor search
//! - `GET /api/page/topic-filter?topic=` — documents of one topic
//! - `GET /api/page/advisor-profile?advisor=` — one advisor profile
//! - `GET /api/page/topic-evolution?topics=` — yearly share series
//!
//! Request failures map to JSON `{ "error", "code" }` bodies and never take
//! the process down. The store is loaded before serving and shared immutably,
//! so handlers run without locks.

pub mod handler;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use miette::Diagnostic;
use rust_embed::RustEmbed;
use thiserror::Error;
use tower_http::cors::CorsLayer;

use crate::artifact::ArtifactStore;
use crate::pages::RenderOptions;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Diagnostic)]
pub enum ServerError {
    #[error("failed to bind {addr}")]
    #[diagnostic(
        code(temascope::server::bind),
        help("Is another dashboard already running? Pick a different --port.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server terminated unexpectedly")]
    #[diagnostic(code(temascope::server::serve))]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

pub type ServerResult<T> = std::result::Result<T, ServerError>;

// ── State and routing ─────────────────────────────────────────────────────

/// Shared per-request state: the immutable store plus renderer tunables.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArtifactStore>,
    pub options: RenderOptions,
}

impl AppState {
    pub fn new(store: Arc<ArtifactStore>, options: RenderOptions) -> Self {
        Self { store, options }
    }
}

#[derive(RustEmbed)]
#[folder = "src/server/static/"]
struct Assets;

async fn index() -> Response {
    match Assets::get("index.html") {
        Some(file) => Html(file.data.into_owned()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            "index.html missing from the embedded assets",
        )
            .into_response(),
    }
}

/// Build the full application router. Separate from [`serve`] so tests can
/// drive it without a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Frontend.
        .route("/", get(index))
        // Metadata.
        .route("/api/status", get(handler::status))
        .route("/api/options", get(handler::options))
        // Pages.
        .route("/api/page/overview", get(handler::overview_page))
        .route("/api/page/advisor-search", get(handler::advisor_search_page))
        .route("/api/page/topic-filter", get(handler::topic_filter_page))
        .route(
            "/api/page/advisor-profile",
            get(handler::advisor_profile_page),
        )
        .route(
            "/api/page/topic-evolution",
            get(handler::topic_evolution_page),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is interrupted.
pub async fn serve(state: AppState, bind: &str, port: u16) -> ServerResult<()> {
    let addr = format!("{bind}:{port}");
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("dashboard listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|source| ServerError::Serve { source })
}
