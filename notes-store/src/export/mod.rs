//! Downloadable renderings of the saved notes.

pub mod docx;
pub mod pdf;

use crate::errors::NotesResult;
use crate::repository::Note;

/// Title printed at the top of every exported document.
pub const DOC_TITLE: &str = "CurioMindAI Notes";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    /// Parses `pdf` or `docx` (exact, lowercase).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pdf" => Some(ExportFormat::Pdf),
            "docx" => Some(ExportFormat::Docx),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "curiomindai-notes.pdf",
            ExportFormat::Docx => "curiomindai-notes.docx",
        }
    }

    /// Renders `notes` in this format.
    pub fn render(self, notes: &[Note]) -> NotesResult<Vec<u8>> {
        match self {
            ExportFormat::Pdf => pdf::notes_to_pdf(notes),
            ExportFormat::Docx => docx::notes_to_docx(notes),
        }
    }
}
