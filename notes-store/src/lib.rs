//! Saved notes and their document exports.

pub mod errors;
pub mod export;
pub mod repository;

pub use errors::{NotesError, NotesResult};
pub use export::ExportFormat;
pub use repository::{InMemoryNoteRepository, Note, NoteRepository};
