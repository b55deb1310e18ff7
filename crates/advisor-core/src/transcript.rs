//! Session transcript.
//!
//! An append-only, in-memory log of the successful exchanges of one session.

use chrono::{DateTime, Utc};

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Persona that answered
    pub persona_id: String,
    /// Submitted (trimmed) question
    pub question: String,
    /// Text returned by the completion service
    pub answer: String,
    /// When the answer was recorded
    pub answered_at: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn new(
        persona_id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            persona_id: persona_id.into(),
            question: question.into(),
            answer: answer.into(),
            answered_at: Utc::now(),
        }
    }
}

/// Ordered history of a session, oldest first.
///
/// There is no way to remove or reorder entries; the log only grows until the
/// owning session is dropped.
#[derive(Debug, Default)]
pub struct SessionTranscript {
    entries: Vec<TranscriptEntry>,
}

impl SessionTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns a reference to it.
    pub fn append(&mut self, entry: TranscriptEntry) -> &TranscriptEntry {
        self.entries.push(entry);
        let index = self.entries.len() - 1;
        &self.entries[index]
    }

    /// Read-only view of all entries, oldest first.
    pub fn all(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
