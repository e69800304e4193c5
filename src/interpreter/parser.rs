/// Core parsing entry points and the token cursor.
///
/// Contains [`core::parse`], the expression entry point, assignment parsing
/// and the shared result type.
pub mod core;

/// Unary, call and primary expression parsing.
///
/// Handles prefix operators, casts, call postfixes, literals, grouping and
/// identifiers.
pub mod unary;

/// Binary operator parsing.
///
/// Implements every infix precedence level from logical or down to
/// exponentiation.
pub mod binary;

/// Statement lists and error recovery.
///
/// Parses sequences of statements, records diagnostics and resynchronizes
/// after a malformed statement.
pub mod block;

/// Statement parsing.
///
/// Implements `print`, `if`, `while`, `for`, `function`, `return` and
/// expression statements.
pub mod statement;

/// Utility functions for the parser.
///
/// Provides helpers for comma-separated lists, identifiers and statement
/// terminators.
pub mod utils;

pub use self::core::{ParseResult, TokenStream, parse, parse_expression};
