//! Persona domain module.
//!
//! # Module Structure
//!
//! - `model`: The `Persona` domain model
//! - `preset`: Built-in personas
//! - `registry`: Fixed, ordered lookup of personas by id
//!
//! # Usage
//!
//! ```ignore
//! use advisor_core::persona::{PersonaRegistry, get_default_presets};
//! ```

mod model;
mod preset;
mod registry;

// Re-export public API
pub use model::Persona;
pub use preset::{
    FINANCIAL_ADVISOR_ID, NUTRITIONIST_ID, PROGRAMMING_INSTRUCTOR_ID, TRAVEL_GUIDE_ID,
    get_default_presets,
};
pub use registry::PersonaRegistry;
