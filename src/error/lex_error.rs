use thiserror::Error;

/// Represents all errors that can occur while tokenizing source text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that cannot begin any token.
    #[error("Error at offset {offset}: Unexpected character '{character}'.")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character.
        offset:    usize,
    },
    /// A string literal without its closing quote.
    #[error("Error at offset {offset}: Unterminated string literal.")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        offset: usize,
    },
}

impl LexError {
    /// Byte offset where tokenizing stopped.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { offset, .. } | Self::UnterminatedString { offset } => {
                *offset
            },
        }
    }
}
