//! GET /export: saved notes as a downloadable document.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use notes_store::{export::ExportFormat, repository::Note};
use tracing::{info, instrument};

use crate::{
    core::app_state::AppState, error_handler::AppResult,
    routes::export::export_query::ExportQuery,
};

/// Handler: GET /export?format=pdf|docx
///
/// # Example
/// ```bash
/// curl -OJ 'http://127.0.0.1:8000/export?format=docx'
/// ```
#[instrument(name = "export_route", skip_all, fields(format = ?query.format))]
pub async fn export(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let format = query.format()?;
    render_attachment(state.notes.list().await, format).await
}

/// Renders off the async runtime and wraps the bytes as an attachment.
pub async fn render_attachment(notes: Vec<Note>, format: ExportFormat) -> AppResult<Response> {
    let count = notes.len();
    let bytes = tokio::task::spawn_blocking(move || format.render(&notes)).await??;
    info!(notes = count, bytes = bytes.len(), ?format, "export rendered");

    let disposition = format!("attachment; filename={}", format.file_name());
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
