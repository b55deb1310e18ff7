//! Per-session request pipeline.
//!
//! `AdvisorSession` owns the transcript of one interactive session and runs
//! each submission through build → complete → append. Mutating methods take
//! `&mut self`, so a session processes one request at a time.

use std::sync::Arc;

use advisor_core::prompt;
use advisor_core::{
    CompletionClient, Persona, PersonaRegistry, Result, SessionTranscript, TranscriptEntry,
};
use uuid::Uuid;

pub struct AdvisorSession {
    /// Session ID for this instance (log correlation only)
    session_id: String,
    registry: Arc<PersonaRegistry>,
    client: Arc<dyn CompletionClient>,
    selected: Persona,
    transcript: SessionTranscript,
}

impl AdvisorSession {
    /// Starts a session with an empty transcript and the registry's first
    /// persona selected.
    pub fn new(registry: Arc<PersonaRegistry>, client: Arc<dyn CompletionClient>) -> Self {
        let selected = registry.first().clone();
        let session_id = Uuid::new_v4().to_string();

        tracing::info!(
            session_id = %session_id,
            model = client.model(),
            personas = registry.len(),
            "Session started"
        );

        Self {
            session_id,
            registry,
            client,
            selected,
            transcript: SessionTranscript::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    pub fn personas(&self) -> &[Persona] {
        self.registry.list_personas()
    }

    pub fn selected_persona(&self) -> &Persona {
        &self.selected
    }

    /// Selects the persona used by [`submit`](Self::submit).
    ///
    /// Unknown ids fail with `UnknownPersona` and leave the selection unchanged.
    pub fn select_persona(&mut self, id: &str) -> Result<&Persona> {
        let persona = self.registry.get(id)?.clone();
        tracing::debug!(session_id = %self.session_id, persona = %persona.id, "Persona selected");
        self.selected = persona;
        Ok(&self.selected)
    }

    /// Submits `user_text` to the selected persona.
    pub async fn submit(&mut self, user_text: &str) -> Result<&TranscriptEntry> {
        let persona = self.selected.clone();
        self.run(&persona, user_text).await
    }

    /// Submits `user_text` to `persona_id` without changing the selection.
    pub async fn ask(&mut self, persona_id: &str, user_text: &str) -> Result<&TranscriptEntry> {
        let persona = self.registry.get(persona_id)?.clone();
        self.run(&persona, user_text).await
    }

    pub fn transcript(&self) -> &SessionTranscript {
        &self.transcript
    }

    async fn run(&mut self, persona: &Persona, user_text: &str) -> Result<&TranscriptEntry> {
        // Empty input short-circuits here, before any external call
        let exchange = prompt::build(persona, user_text)?;

        tracing::info!(
            session_id = %self.session_id,
            persona = %persona.id,
            question_len = exchange.user_text().len(),
            "Submitting question"
        );

        let answer = self.client.complete(&exchange).await.inspect_err(|err| {
            tracing::warn!(
                session_id = %self.session_id,
                persona = %persona.id,
                kind = err.kind(),
                "Submission failed; transcript unchanged"
            );
        })?;

        let entry = TranscriptEntry::new(persona.id.clone(), exchange.user_text(), answer);
        tracing::info!(
            session_id = %self.session_id,
            entries = self.transcript.len() + 1,
            "Answer recorded"
        );
        Ok(self.transcript.append(entry))
    }
}
