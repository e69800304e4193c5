//! # kestrel
//!
//! kestrel is a small dynamically typed scripting language written in Rust.
//! Programs are tokenized, parsed into a syntax tree with per-statement error
//! recovery, and then either evaluated against a [`Runtime`] or rendered back
//! to canonical source text.
//!
//! ```
//! use kestrel::{Runtime, Value, run};
//!
//! let mut runtime = Runtime::new();
//! let source = "
//!     function fib(n)
//!         if n < 2 return n; end
//!         return fib(n - 1) + fib(n - 2);
//!     end
//!     print fib(10);
//! ";
//!
//! assert_eq!(run(source, &mut runtime), Ok(Value::Null));
//! assert_eq!(runtime.output(), ["55"]);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::error::Error;

/// Defines the structure of parsed code.
///
/// This module declares the [`ast::Node`] enum and related types that
/// represent the syntactic structure of a program as a tree, together with the
/// [`ast::Visitor`] contract used to walk it. The tree is built by the parser
/// and consumed by the evaluator and the translator.
///
/// # Responsibilities
/// - Defines expression and statement variants for all language constructs.
/// - Attaches the originating token to every node for error reporting.
/// - Dispatches each variant to its visitor handler.
pub mod ast;
/// Limits applied while evaluating a program.
pub mod config;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while processing a
/// program. Every error carries the byte offset or span where it happened.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Formats errors as `Error at <location>: <message>`.
/// - Combines them into a single [`error::Error`] for the whole pipeline.
pub mod error;
/// The phases of the interpreter.
///
/// Source text flows through [`interpreter::lexer`] and
/// [`interpreter::parser`] into a tree, which [`interpreter::evaluator`] runs
/// against a [`interpreter::runtime::Runtime`] or
/// [`interpreter::translator`] prints back as source.
pub mod interpreter;
/// General numeric helpers.
///
/// Conversions between `i64` and `f64` and float formatting, shared by the
/// evaluator, the value casts and the translator.
pub mod util;

pub use config::RuntimeConfig;
pub use interpreter::{
    evaluator::core::evaluate, lexer::tokenize, parser::parse, runtime::Runtime,
    translator::render, value::core::Value,
};

/// Runs a program from source text.
///
/// The source is tokenized, parsed and evaluated against `runtime`. A program
/// with syntax errors is not evaluated at all; every diagnostic the parser
/// collected is returned. Output of `print` statements is appended to the
/// runtime's output log, including output produced before a runtime error.
///
/// # Parameters
/// - `source`: The program text.
/// - `runtime`: The state to run against. Variables and functions defined by
///   earlier runs stay visible.
///
/// # Returns
/// The value of the last top-level statement.
///
/// # Errors
/// - [`Error::Lex`] for invalid characters or an unterminated string.
/// - [`Error::Parse`] with all syntax errors of the program.
/// - [`Error::Runtime`] for the first runtime error.
///
/// # Example
/// ```
/// use kestrel::{Runtime, Value, error::Error, run};
///
/// let mut runtime = Runtime::new();
/// assert_eq!(run("x = 2 ** 3; x + 6;", &mut runtime), Ok(Value::Integer(14)));
/// assert_eq!(run("x;", &mut runtime), Ok(Value::Integer(8)));
///
/// assert!(matches!(run("print 1 +;", &mut runtime), Err(Error::Parse(_))));
/// assert!(matches!(run("1 / 0;", &mut runtime), Err(Error::Runtime(_))));
/// ```
pub fn run(source: &str, runtime: &mut Runtime) -> Result<Value, Error> {
    let tokens = tokenize(source)?;
    let (program, diagnostics) = parse(&tokens);

    if !diagnostics.is_empty() {
        debug!(count = diagnostics.len(), "program rejected with syntax errors");
        return Err(diagnostics.into());
    }

    Ok(evaluate(&program, runtime)?)
}
