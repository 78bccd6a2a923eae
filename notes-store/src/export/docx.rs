use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use tracing::debug;

use crate::errors::{NotesError, NotesResult};
use crate::export::DOC_TITLE;
use crate::repository::Note;

/// Font sizes are in half-points.
const TITLE_SIZE: usize = 32;
const QUESTION_SIZE: usize = 24;
const BODY_SIZE: usize = 22;

/// Renders notes to a Word document: a title heading, then per note a
/// `Q{n}: question` heading and the explanation at 11pt.
///
/// # Errors
/// [`NotesError::Docx`] if packing the archive fails.
pub fn notes_to_docx(notes: &[Note]) -> NotesResult<Vec<u8>> {
    let mut docx = Docx::new()
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .bold()
                .size(TITLE_SIZE),
        )
        .add_style(
            Style::new("Heading3", StyleType::Paragraph)
                .name("Heading 3")
                .bold()
                .size(QUESTION_SIZE),
        )
        .add_paragraph(heading("Heading1", DOC_TITLE, TITLE_SIZE));

    for (i, note) in notes.iter().enumerate() {
        let question = format!("Q{}: {}", i + 1, note.question);
        docx = docx
            .add_paragraph(heading("Heading3", &question, QUESTION_SIZE))
            .add_paragraph(
                Paragraph::new().add_run(Run::new().add_text(&note.explanation).size(BODY_SIZE)),
            );
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| NotesError::Docx(e.to_string()))?;

    debug!(notes = notes.len(), "docx rendered");
    Ok(buf.into_inner())
}

fn heading(style: &str, text: &str, size: usize) -> Paragraph {
    Paragraph::new()
        .style(style)
        .add_run(Run::new().add_text(text).bold().size(size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_zip_container() {
        let notes = vec![
            Note::new("What is a volcano?", "A mountain that lets out hot melted rock."),
            Note::new("Why do cats purr?", "Purring helps cats feel calm."),
        ];
        let bytes = notes_to_docx(&notes).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn empty_notes_still_render() {
        let bytes = notes_to_docx(&[]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
