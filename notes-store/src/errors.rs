use thiserror::Error;

/// Result alias for the notes store.
pub type NotesResult<T> = Result<T, NotesError>;

/// Errors produced while rendering notes.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NotesError {
    #[error("[Notes Store] PDF rendering failed: {0}")]
    Pdf(String),

    #[error("[Notes Store] DOCX rendering failed: {0}")]
    Docx(String),
}
