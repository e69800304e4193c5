/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator is a [`Visitor`](crate::ast::Visitor) over the syntax tree.
/// It evaluates expressions and statements against a
/// [`Runtime`](runtime::Runtime), applying the dynamic typing rules of the
/// language, and carries `return` out of nested blocks as an explicit control
/// signal.
///
/// # Responsibilities
/// - Evaluates every node kind, performing all supported operations.
/// - Calls user-defined functions in their own frames.
/// - Reports runtime errors such as division by zero or unknown variables.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a sequence of tokens,
/// each corresponding to a number, string, identifier, keyword, operator or
/// delimiter. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input text into tokens with their byte offsets.
/// - Classifies keywords and applies maximal munch to operators.
/// - Reports lexical errors for invalid or unterminated input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a recursive descent parser with one function per grammar
/// rule. A malformed statement does not stop it: the error is recorded and
/// parsing resumes at the next statement.
pub mod parser;
/// Variable frames, the function table and the output log.
pub mod runtime;
/// Canonical source rendering of syntax trees.
///
/// A second [`Visitor`](crate::ast::Visitor) next to the evaluator. It prints
/// a tree back as source text with every operation parenthesised.
pub mod translator;
/// The value module defines the runtime data types for evaluation.
///
/// Values are integers, floats, booleans, strings and `null`. The module
/// also provides truthiness, display and the explicit casts.
pub mod value;
