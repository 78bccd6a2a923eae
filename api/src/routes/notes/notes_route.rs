use std::sync::Arc;

use axum::{Json, extract::State, response::Response};
use notes_store::{export::ExportFormat, repository::Note};
use tracing::{debug, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::{
        export::export_route::render_attachment,
        notes::notes_request::{NoteAddRequest, NoteAddResponse},
    },
};

/// Handler: POST /notes/add
#[instrument(name = "notes_add_route", skip_all)]
pub async fn add_note(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NoteAddRequest>,
) -> Json<NoteAddResponse> {
    state.notes.add(Note::from(body)).await;
    debug!("note stored");
    Json(NoteAddResponse::added())
}

/// Handler: GET /notes
pub async fn list_notes(State(state): State<Arc<AppState>>) -> Json<Vec<Note>> {
    Json(state.notes.list().await)
}

/// Handler: GET /notes/pdf
#[instrument(name = "notes_pdf_route", skip_all)]
pub async fn notes_pdf(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    render_attachment(state.notes.list().await, ExportFormat::Pdf).await
}
