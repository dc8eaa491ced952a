//! Display Name Value Object
//!
//! The name shown next to a user's comments. Free text, not an identifier:
//! uniqueness is not required.
//!
//! Processing order: NFKC normalization, trim, validation.

use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum display name length (in characters)
pub const DISPLAY_NAME_MAX_LENGTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNameError {
    /// Empty after normalization
    Empty,

    /// Longer than DISPLAY_NAME_MAX_LENGTH
    TooLong { length: usize, max: usize },

    /// Contains a control character
    InvalidCharacter,
}

impl fmt::Display for DisplayNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter => write!(f, "Name contains invalid characters"),
        }
    }
}

impl std::error::Error for DisplayNameError {}

/// Validated, normalized display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, DisplayNameError> {
        let normalized = input.as_ref().nfkc().collect::<String>();
        let name = normalized.trim();

        if name.is_empty() {
            return Err(DisplayNameError::Empty);
        }

        let length = name.chars().count();
        if length > DISPLAY_NAME_MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                length,
                max: DISPLAY_NAME_MAX_LENGTH,
            });
        }

        if name.chars().any(char::is_control) {
            return Err(DisplayNameError::InvalidCharacter);
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
