//! HTTP surface of the learning assistant.
//!
//! Routes:
//! - `GET  /ping`
//! - `POST /explain`
//! - `POST /notes/add`, `GET /notes`, `GET /notes/pdf`
//! - `GET  /export?format=pdf|docx`

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use std::sync::Arc;

use ai_llm_service::config::gemini_config::GeminiConfig;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};

use crate::{
    core::{api_config::ApiConfig, app_state::AppState, cors::cors_layer},
    error_handler::{AppError, AppResult},
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        explain::explain_route::explain,
        export::export_route::export,
        notes::notes_route::{add_note, list_notes, notes_pdf},
        ping_route::ping,
    },
};

/// Routes with error mapping, without CORS or tracing layers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/explain", post(explain))
        .route("/notes/add", post(add_note))
        .route("/notes", get(list_notes))
        .route("/notes/pdf", get(notes_pdf))
        .route("/export", get(export))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Full application: routes plus CORS and request tracing.
pub fn app(state: Arc<AppState>, cfg: &ApiConfig) -> Router {
    router(state)
        .layer(cors_layer(&cfg.allowed_origins))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Reads configuration from the environment, binds and serves until Ctrl+C.
///
/// # Errors
/// Invalid Gemini configuration, bind failure or a server I/O error.
pub async fn start() -> AppResult<()> {
    let api_cfg = ApiConfig::from_env();
    let gemini_cfg = GeminiConfig::from_env()?;
    info!(?gemini_cfg, origins = api_cfg.allowed_origins.len(), "configuration loaded");

    let state = Arc::new(AppState::from_gemini_config(gemini_cfg)?);
    let app = app(state, &api_cfg);

    let listener = tokio::net::TcpListener::bind(&api_cfg.address)
        .await
        .map_err(|source| AppError::Bind {
            addr: api_cfg.address.clone(),
            source,
        })?;
    info!(address = %api_cfg.address, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
