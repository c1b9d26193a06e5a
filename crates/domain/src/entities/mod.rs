//! Domain entities - Prompts and replies exchanged with the tutor

mod tutor_prompt;
mod tutor_reply;

pub use tutor_prompt::{TRANSLATION_INSTRUCTION, TutorPrompt};
pub use tutor_reply::{
    DEFAULT_MAX_WORDS, TRANSLATION_PLACEHOLDER, TRUNCATION_MARKER, Translation, TruncatedText,
    TutorReply, truncate_words,
};
