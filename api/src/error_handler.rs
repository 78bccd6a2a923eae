use ai_llm_service::error_handler::AiLlmError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notes_store::errors::NotesError;
use thiserror::Error;
use tracing::error;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] AiLlmError),

    // --- IO / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    /// One or more request fields are out of domain.
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<ApiErrorDetail>,
    },

    // --- Handler ---
    #[error(transparent)]
    Export(#[from] NotesError),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Vec<ApiErrorDetail>) -> Self {
        AppError::Validation {
            message: message.into(),
            details,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(_)
            | AppError::Bind { .. }
            | AppError::Server(_)
            | AppError::Export(_)
            | AppError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::Join(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let code = self.error_code();
        let message = self.to_string();
        let details = match self {
            AppError::Validation { details, .. } => details,
            _ => Vec::new(),
        };

        ApiResponse::error(code, message, details).into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
