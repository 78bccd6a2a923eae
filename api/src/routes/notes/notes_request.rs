use notes_store::repository::Note;
use serde::{Deserialize, Serialize};

/// Request payload for /notes/add.
#[derive(Debug, Deserialize)]
pub struct NoteAddRequest {
    pub question: String,
    pub explanation: String,
}

impl From<NoteAddRequest> for Note {
    fn from(req: NoteAddRequest) -> Self {
        Note::new(req.question, req.explanation)
    }
}

/// Response payload for /notes/add.
#[derive(Debug, Serialize)]
pub struct NoteAddResponse {
    pub status: &'static str,
}

impl NoteAddResponse {
    pub fn added() -> Self {
        Self { status: "added" }
    }
}
