use notes_store::export::ExportFormat;
use serde::Deserialize;

use crate::{core::http::response_envelope::ApiErrorDetail, error_handler::AppError};

/// Query string for /export.
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    /// `pdf` (default) or `docx`.
    #[serde(default)]
    pub format: Option<String>,
}

impl ExportQuery {
    /// # Errors
    /// [`AppError::Validation`] for any value other than `pdf` or `docx`.
    pub fn format(&self) -> Result<ExportFormat, AppError> {
        match self.format.as_deref() {
            None => Ok(ExportFormat::Pdf),
            Some(raw) => ExportFormat::parse(raw).ok_or_else(|| {
                AppError::validation(
                    "Unsupported export format.",
                    vec![ApiErrorDetail::field("format", "Use `pdf` or `docx`.")],
                )
            }),
        }
    }
}
