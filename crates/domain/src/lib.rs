//! Domain layer for Hablamos
//!
//! Contains the tutoring vocabulary: proficiency levels, prompts, reply
//! truncation, translation outcomes and scratch audio file names.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
