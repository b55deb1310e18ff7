//! Prompt builder.
//!
//! Turns a persona and the raw user text into the two-message exchange sent to
//! the completion service.

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::persona::Persona;

/// Role of a message in a chat-style exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// A single role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Instruction plus user text for one request.
///
/// Only obtainable through [`build`], so `user_text` is always non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    instruction: String,
    user_text: String,
}

impl Exchange {
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    /// The exchange as an ordered message list: system instruction, then user text.
    pub fn messages(&self) -> [ChatMessage; 2] {
        [
            ChatMessage {
                role: MessageRole::System,
                content: self.instruction.clone(),
            },
            ChatMessage {
                role: MessageRole::User,
                content: self.user_text.clone(),
            },
        ]
    }
}

/// Builds the exchange for `persona` and `user_text`.
///
/// # Errors
///
/// Returns `AdvisorError::EmptyInput` when `user_text` is empty after trimming.
pub fn build(persona: &Persona, user_text: &str) -> Result<Exchange> {
    let trimmed = user_text.trim();
    if trimmed.is_empty() {
        return Err(AdvisorError::EmptyInput);
    }

    Ok(Exchange {
        instruction: persona.instruction.clone(),
        user_text: trimmed.to_string(),
    })
}
