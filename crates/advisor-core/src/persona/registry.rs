//! Persona registry.
//!
//! A fixed, ordered set of personas built once at startup. Lookups fail
//! closed: an id that was never registered is an error, never a fallback.

use std::collections::HashSet;

use super::model::Persona;
use super::preset::get_default_presets;
use crate::error::{AdvisorError, Result};

/// Immutable registry of the personas offered in a session.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    /// Builds a registry from personas in the order they should be listed.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Config` when the list is empty, an id is blank
    /// or duplicated, or a persona has no instruction.
    pub fn new(personas: Vec<Persona>) -> Result<Self> {
        if personas.is_empty() {
            return Err(AdvisorError::config("at least one persona is required"));
        }

        let mut seen = HashSet::new();
        for persona in &personas {
            if persona.id.trim().is_empty() {
                return Err(AdvisorError::config("persona id must not be blank"));
            }
            if persona.instruction.trim().is_empty() {
                return Err(AdvisorError::config(format!(
                    "persona '{}' has an empty instruction",
                    persona.id
                )));
            }
            if !seen.insert(persona.id.as_str()) {
                return Err(AdvisorError::config(format!(
                    "duplicate persona id '{}'",
                    persona.id
                )));
            }
        }

        Ok(Self { personas })
    }

    /// Registry holding only the built-in presets.
    pub fn builtin() -> Self {
        Self {
            personas: get_default_presets(),
        }
    }

    /// Built-in presets followed by `extra`, validated together.
    pub fn with_extra(extra: Vec<Persona>) -> Result<Self> {
        let mut personas = get_default_presets();
        personas.extend(extra);
        Self::new(personas)
    }

    /// All personas, in declaration order.
    pub fn list_personas(&self) -> &[Persona] {
        &self.personas
    }

    /// Looks up a persona by id.
    pub fn get(&self, id: &str) -> Result<&Persona> {
        self.personas
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AdvisorError::unknown_persona(id))
    }

    /// Returns the instruction registered for `id`.
    pub fn get_instruction(&self, id: &str) -> Result<&str> {
        self.get(id).map(|p| p.instruction.as_str())
    }

    /// Persona at a 1-based position in the listing, as shown to the user.
    pub fn get_by_position(&self, position: usize) -> Option<&Persona> {
        position
            .checked_sub(1)
            .and_then(|index| self.personas.get(index))
    }

    /// The persona selected when a session starts.
    pub fn first(&self) -> &Persona {
        // `new` and `builtin` never produce an empty registry
        &self.personas[0]
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}
