//! Name of a file inside the scratch directory

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::value_objects::AudioFormat;

/// Longest name most filesystems accept for a single path component
const MAX_NAME_LEN: usize = 255;

/// A single, safe path segment naming a scratch audio file
///
/// Generated names are `<uuid-v4>.<extension>`, so two artifacts never
/// collide without any locking. Parsed names are restricted to one path
/// component so a lookup can never escape the scratch directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScratchFileName(String);

impl ScratchFileName {
    /// Generate a fresh random name with the extension of `format`
    #[must_use]
    pub fn generate(format: AudioFormat) -> Self {
        Self(format!("{}.{}", Uuid::new_v4(), format.extension()))
    }

    /// Validate a client-supplied name
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidFileName(name.to_string());

        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(invalid());
        }
        if name.starts_with('.') {
            return Err(invalid());
        }
        if name
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '\0' | ':') || c.is_control())
        {
            return Err(invalid());
        }

        Ok(Self(name.to_string()))
    }

    /// The name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Audio format implied by the extension, if recognised
    #[must_use]
    pub fn format(&self) -> Option<AudioFormat> {
        self.0
            .rsplit_once('.')
            .and_then(|(_, ext)| AudioFormat::from_extension(ext))
    }
}

impl fmt::Display for ScratchFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScratchFileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ScratchFileName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ScratchFileName> for String {
    fn from(name: ScratchFileName) -> Self {
        name.0
    }
}
