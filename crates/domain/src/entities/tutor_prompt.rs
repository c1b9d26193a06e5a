//! Prompts sent to the completion API

use serde::{Deserialize, Serialize};

use crate::value_objects::ProficiencyLevel;

/// System instruction for the Spanish to Arabic translation call
pub const TRANSLATION_INSTRUCTION: &str = "You are a professional translator. Translate the \
                                           Spanish text to Arabic. Return only the Arabic \
                                           translation, no explanations.";

/// A single-turn prompt: one system instruction and one user message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorPrompt {
    /// System instruction
    pub instruction: String,
    /// User message
    pub message: String,
}

impl TutorPrompt {
    /// Create a prompt from raw parts
    pub fn new(instruction: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            message: message.into(),
        }
    }

    /// Conversation turn with the teacher persona for `level`
    pub fn conversation(level: ProficiencyLevel, message: impl Into<String>) -> Self {
        Self::new(level.instruction(), message)
    }

    /// Request for an Arabic translation of Spanish `text`
    pub fn translation(text: &str) -> Self {
        Self::new(
            TRANSLATION_INSTRUCTION,
            format!("Translate this Spanish text to Arabic: {text}"),
        )
    }
}
