//! Domain layer of the advisor assistant.
//!
//! Holds the persona registry, the prompt builder, the session transcript and
//! the contract every completion backend implements. Nothing in this crate
//! performs I/O.

pub mod completion;
pub mod config;
pub mod error;
pub mod persona;
pub mod prompt;
pub mod transcript;

// Re-export common error type
pub use error::{AdvisorError, Result};

pub use completion::CompletionClient;
pub use persona::{Persona, PersonaRegistry};
pub use prompt::{ChatMessage, Exchange, MessageRole};
pub use transcript::{SessionTranscript, TranscriptEntry};
