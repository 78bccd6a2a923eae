use std::sync::Arc;

use ai_llm_service::config::gemini_config::GeminiConfig;
use ai_llm_service::services::gemini_service::GeminiService;
use explainer::Explainer;
use notes_store::repository::{InMemoryNoteRepository, NoteRepository};
use tracing::info;

use crate::error_handler::AppResult;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Explanation pipeline (Gemini-backed, template fallback).
    pub explainer: Explainer,
    /// Saved notes.
    pub notes: Arc<dyn NoteRepository>,
}

impl AppState {
    pub fn new(explainer: Explainer, notes: Arc<dyn NoteRepository>) -> Self {
        Self { explainer, notes }
    }

    /// Gemini-backed explainer and an empty in-memory note store.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built from `gemini`.
    pub fn from_gemini_config(gemini: GeminiConfig) -> AppResult<Self> {
        let service = GeminiService::new(gemini)?;
        if service.is_configured() {
            info!("Gemini credential configured");
        } else {
            info!("GEMINI_API_KEY not set; answers use the local template");
        }

        Ok(Self::new(
            Explainer::new(Arc::new(service)),
            Arc::new(InMemoryNoteRepository::new()),
        ))
    }
}
