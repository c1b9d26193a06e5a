//! CEFR proficiency level value object

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Language-ability tier of the learner
///
/// Follows the Common European Framework of Reference (CEFR), from
/// beginner (A1) to proficient (C2). Each level carries the instruction
/// handed to the completion API as its system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProficiencyLevel {
    /// Beginner
    #[default]
    A1,
    /// Elementary
    A2,
    /// Intermediate
    B1,
    /// Upper intermediate
    B2,
    /// Advanced
    C1,
    /// Proficient
    C2,
}

impl ProficiencyLevel {
    /// CEFR code as sent by clients (e.g. "B1")
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }

    /// Human-readable tier name
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::A1 => "Beginner",
            Self::A2 => "Elementary",
            Self::B1 => "Intermediate",
            Self::B2 => "Upper Intermediate",
            Self::C1 => "Advanced",
            Self::C2 => "Proficient",
        }
    }

    /// System prompt for the Spanish teacher persona at this level
    #[must_use]
    pub const fn instruction(&self) -> &'static str {
        match self {
            Self::A1 => {
                "You are a Spanish teacher for A1 (Beginner) level. Use very simple Spanish with \
                 basic vocabulary. Keep responses under 30 words. Use present tense only. Be \
                 encouraging and clear."
            },
            Self::A2 => {
                "You are a Spanish teacher for A2 (Elementary) level. Use simple Spanish with \
                 common vocabulary. Keep responses under 40 words. Use present and past tense. Be \
                 helpful and patient."
            },
            Self::B1 => {
                "You are a Spanish teacher for B1 (Intermediate) level. Use intermediate Spanish \
                 with varied vocabulary. Keep responses under 50 words. Use different tenses. Be \
                 engaging and supportive."
            },
            Self::B2 => {
                "You are a Spanish teacher for B2 (Upper Intermediate) level. Use advanced Spanish \
                 with complex vocabulary. Keep responses under 50 words. Use all tenses. Be \
                 challenging and motivating."
            },
            Self::C1 => {
                "You are a Spanish teacher for C1 (Advanced) level. Use sophisticated Spanish with \
                 nuanced vocabulary. Keep responses under 50 words. Use complex structures. Be \
                 intellectually stimulating."
            },
            Self::C2 => {
                "You are a Spanish teacher for C2 (Proficient) level. Use native-level Spanish \
                 with advanced vocabulary. Keep responses under 50 words. Use all linguistic \
                 features. Be challenging and sophisticated."
            },
        }
    }

    /// Resolve an optional client-supplied code
    ///
    /// Missing and unknown codes resolve to the default level (A1).
    #[must_use]
    pub fn resolve(code: Option<&str>) -> Self {
        code.and_then(|c| c.parse().ok()).unwrap_or_default()
    }

    /// All levels from easiest to hardest
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [Self::A1, Self::A2, Self::B1, Self::B2, Self::C1, Self::C2]
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ProficiencyLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|level| level.code() == s)
            .ok_or_else(|| DomainError::InvalidProficiencyLevel(s.to_string()))
    }
}
