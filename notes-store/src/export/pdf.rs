//! Notes rendered as a US-Letter PDF with the built-in Helvetica faces.
//!
//! Layout is computed first ([`layout_pages`]) and only then drawn, so the
//! pagination rules are testable without parsing PDF output.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Pt};
use tracing::debug;

use crate::errors::{NotesError, NotesResult};
use crate::export::DOC_TITLE;
use crate::repository::Note;

/* ------------------------------------------------------------------------- */
/* Page geometry (points)                                                    */
/* ------------------------------------------------------------------------- */

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const LEFT: f32 = 40.0;
const HEADER_Y: f32 = PAGE_HEIGHT - 40.0;
const TOP_Y: f32 = PAGE_HEIGHT - 70.0;
const BOTTOM_LIMIT: f32 = 60.0;
const LINE_STEP: f32 = 18.0;
const NOTE_GAP: f32 = 12.0;

const HEADER_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;

/// Maximum characters per body line at 12pt across the printable width.
pub const WRAP_WIDTH: usize = 90;

const LAYER_NAME: &str = "Layer 1";

/// A body line with its baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub y: f32,
}

/// Renders notes to PDF bytes. An empty slice yields a single header-only page.
///
/// # Errors
/// [`NotesError::Pdf`] if a font cannot be registered or serialization fails.
pub fn notes_to_pdf(notes: &[Note]) -> NotesResult<Vec<u8>> {
    let pages = layout_pages(notes);

    let (doc, page, layer) =
        PdfDocument::new(DOC_TITLE, pt(PAGE_WIDTH), pt(PAGE_HEIGHT), LAYER_NAME);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| NotesError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| NotesError::Pdf(e.to_string()))?;

    for (idx, lines) in pages.iter().enumerate() {
        let current = if idx == 0 {
            doc.get_page(page).get_layer(layer)
        } else {
            let (p, l) = doc.add_page(pt(PAGE_WIDTH), pt(PAGE_HEIGHT), LAYER_NAME);
            doc.get_page(p).get_layer(l)
        };
        draw_page(&current, lines, &regular, &bold);
    }

    debug!(notes = notes.len(), pages = pages.len(), "pdf rendered");
    doc.save_to_bytes().map_err(|e| NotesError::Pdf(e.to_string()))
}

fn draw_page(
    layer: &PdfLayerReference,
    lines: &[PlacedLine],
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    layer.use_text(DOC_TITLE, HEADER_SIZE, pt(LEFT), pt(HEADER_Y), bold);
    for line in lines {
        layer.use_text(line.text.as_str(), BODY_SIZE, pt(LEFT), pt(line.y), regular);
    }
}

fn pt(v: f32) -> Mm {
    Mm::from(Pt(v))
}

/// Splits notes into pages of positioned lines.
///
/// Each note contributes `Q{n}: {question}` followed by its explanation, both
/// wrapped at [`WRAP_WIDTH`]. A page break happens before any line whose
/// baseline would fall below the bottom limit.
pub fn layout_pages(notes: &[Note]) -> Vec<Vec<PlacedLine>> {
    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut y = TOP_Y;

    for (i, note) in notes.iter().enumerate() {
        let heading = format!("Q{}: {}", i + 1, note.question);
        let lines = wrap_text(&heading, WRAP_WIDTH)
            .into_iter()
            .chain(wrap_text(&note.explanation, WRAP_WIDTH));

        for text in lines {
            if y < BOTTOM_LIMIT {
                pages.push(Vec::new());
                y = TOP_Y;
            }
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine { text, y });
            }
            y -= LINE_STEP;
        }
        y -= NOTE_GAP;
    }

    pages
}

/// Greedy word wrap. Embedded newlines start a new line; words longer than
/// `width` are split. Always yields at least one (possibly empty) line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for raw in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0usize;

        for word in raw.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                let chunk_len = chunk.len();
                let needed = if line_len == 0 { chunk_len } else { line_len + 1 + chunk_len };
                if needed > width && line_len > 0 {
                    out.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                if line_len > 0 {
                    line.push(' ');
                    line_len += 1;
                }
                line.extend(chunk);
                line_len += chunk_len;
            }
        }
        out.push(line);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_notes_render_a_header_only_document() {
        let bytes = notes_to_pdf(&[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        let pages = layout_pages(&[]);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn renders_notes_to_pdf_bytes() {
        let notes = vec![
            Note::new("Why is the sky blue?", "Sunlight bounces off tiny bits of air."),
            Note::new("What is rain?", "Water falling from clouds."),
        ];
        let bytes = notes_to_pdf(&notes).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 200);
    }

    #[test]
    fn lines_step_down_with_gap_between_notes() {
        let notes = vec![Note::new("A?", "a"), Note::new("B?", "b")];
        let page = &layout_pages(&notes)[0];
        let ys: Vec<f32> = page.iter().map(|l| l.y).collect();
        assert_eq!(ys, vec![722.0, 704.0, 674.0, 656.0]);
        assert_eq!(page[0].text, "Q1: A?");
        assert_eq!(page[2].text, "Q2: B?");
    }

    #[test]
    fn breaks_page_below_bottom_limit() {
        // Each note takes 48pt, so the 15th note starts on a new page.
        let notes: Vec<Note> = (0..25).map(|i| Note::new(format!("q{i}"), "e")).collect();
        let pages = layout_pages(&notes);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 28);
        assert!(pages.iter().flatten().all(|l| l.y >= BOTTOM_LIMIT));
        assert_eq!(pages[1][0].y, TOP_Y);
        let total: usize = pages.iter().map(Vec::len).sum();
        assert_eq!(total, 50);
    }

    #[test]
    fn wraps_long_text() {
        let text = "word ".repeat(40);
        let lines = wrap_text(text.trim(), 20);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
        assert_eq!(lines.join(" ").split(' ').count(), 40);
    }

    #[test]
    fn wrap_splits_oversized_words_and_keeps_newlines() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_text("one\ntwo", 80), vec!["one", "two"]);
        assert_eq!(wrap_text("", 80), vec![""]);
    }
}
