use thiserror::Error;

/// Lexical errors.
///
/// Raised while converting source text into tokens. A lexical error is fatal:
/// tokenizing stops at the first offending character.
pub mod lex_error;
/// Parsing errors.
///
/// Defines the diagnostics recorded while building the syntax tree. The parser
/// never aborts on them; each one marks a statement that was skipped.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// division by zero, type mismatches, unknown names or exceeded limits.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure of the full source-to-result pipeline.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Tokenizing failed.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// Parsing recorded one or more diagnostics; nothing was evaluated.
    #[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))]
    Parse(Vec<ParseError>),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl From<Vec<ParseError>> for Error {
    fn from(diagnostics: Vec<ParseError>) -> Self {
        Self::Parse(diagnostics)
    }
}
