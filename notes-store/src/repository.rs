//! Storage for saved notes.
//!
//! The HTTP layer only sees [`NoteRepository`]; the bundled
//! [`InMemoryNoteRepository`] lives for the process lifetime.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

/// A saved question with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub question: String,
    pub explanation: String,
}

impl Note {
    pub fn new(question: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            explanation: explanation.into(),
        }
    }
}

/// Ordered note storage.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Appends a note.
    async fn add(&self, note: Note);

    /// Snapshot of all notes in insertion order.
    async fn list(&self) -> Vec<Note>;

    /// Removes every note.
    async fn clear(&self);
}

/// Process-local repository.
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    notes: RwLock<Vec<Note>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn add(&self, note: Note) {
        let mut guard = self.notes.write().await;
        guard.push(note);
        debug!(total = guard.len(), "note added");
    }

    async fn list(&self) -> Vec<Note> {
        self.notes.read().await.clone()
    }

    async fn clear(&self) {
        self.notes.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn keeps_insertion_order() {
        let repo = InMemoryNoteRepository::new();
        repo.add(Note::new("Q1", "A1")).await;
        repo.add(Note::new("Q2", "A2")).await;
        repo.add(Note::new("Q1", "A1")).await;

        let notes = repo.list().await;
        let questions: Vec<&str> = notes.iter().map(|n| n.question.as_str()).collect();
        assert_eq!(questions, ["Q1", "Q2", "Q1"]);
    }

    #[tokio::test]
    async fn list_is_a_snapshot() {
        let repo = InMemoryNoteRepository::new();
        repo.add(Note::new("Q", "A")).await;
        let snapshot = repo.list().await;
        repo.add(Note::new("Q2", "A2")).await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(repo.list().await.len(), 2);
    }

    #[tokio::test]
    async fn clear_empties_the_store() {
        let repo = InMemoryNoteRepository::new();
        repo.add(Note::new("Q", "A")).await;
        repo.clear().await;
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn concurrent_adds_are_all_kept() {
        let repo = Arc::new(InMemoryNoteRepository::new());
        let mut handles = Vec::new();
        for i in 0..20 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.add(Note::new(format!("Q{i}"), "A")).await;
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(repo.list().await.len(), 20);
    }
}
