//! Persona domain model.
//!
//! A persona is a named instruction that conditions the voice and domain
//! framing of the completion model.

use serde::{Deserialize, Serialize};

/// An expert persona the user can put questions to.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Identifier and display label, unique within a registry
    pub id: String,
    /// System instruction sent ahead of every question
    pub instruction: String,
}

impl Persona {
    pub fn new(id: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            instruction: instruction.into(),
        }
    }
}
