use thiserror::Error;

use crate::interpreter::lexer::{Span, Token, TokenKind};

/// Represents all diagnostics the parser can record.
///
/// Each diagnostic carries the source location it refers to, so a caller can
/// point at the exact lexeme that broke the statement.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token appeared where the grammar expected something else.
    #[error("Error at {span}: Unexpected token '{found}', expected {expected}.")]
    UnexpectedToken {
        /// The text of the unexpected token.
        found:    String,
        /// What the grammar expected at this point.
        expected: String,
        /// Source span of the unexpected token.
        span:     Span,
    },
    /// The input ended in the middle of a construct.
    #[error("Error at offset {offset}: Unexpected end of input, expected {expected}.")]
    UnexpectedEndOfInput {
        /// What the grammar expected at this point.
        expected: String,
        /// Byte offset of the end of input.
        offset:   usize,
    },
    /// The left-hand side of `=` is not a variable reference.
    #[error("Error at {span}: Invalid assignment target.")]
    InvalidAssignmentTarget {
        /// Source span of the `=` token.
        span: Span,
    },
    /// A numeric literal does not fit its 64-bit representation.
    #[error("Error at {span}: Numeric literal '{literal}' is too large.")]
    LiteralTooLarge {
        /// The literal text.
        literal: String,
        /// Source span of the literal.
        span:    Span,
    },
    /// Statements or expressions nest deeper than the parser allows.
    #[error("Error at {span}: Nesting deeper than {limit} levels.")]
    NestingTooDeep {
        /// The maximum nesting depth.
        limit: usize,
        /// Source span of the token where the limit was reached.
        span:  Span,
    },
}

impl ParseError {
    /// Builds the diagnostic for finding `token` where `expected` was wanted.
    ///
    /// Reaching the end-of-input token yields
    /// [`ParseError::UnexpectedEndOfInput`]; any other token yields
    /// [`ParseError::UnexpectedToken`].
    #[must_use]
    pub fn unexpected(token: &Token, expected: impl Into<String>) -> Self {
        if token.kind == TokenKind::Eof {
            Self::UnexpectedEndOfInput { expected: expected.into(),
                                         offset:   token.start, }
        } else {
            Self::UnexpectedToken { found:    token.text.clone(),
                                    expected: expected.into(),
                                    span:     token.span(), }
        }
    }

    /// Source span the diagnostic refers to.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::InvalidAssignmentTarget { span }
            | Self::LiteralTooLarge { span, .. }
            | Self::NestingTooDeep { span, .. } => *span,
            Self::UnexpectedEndOfInput { offset, .. } => Span { start: *offset,
                                                                end:   *offset, },
        }
    }
}
