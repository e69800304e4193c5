use tracing::trace;

use crate::{
    ast::Node,
    config::MAX_PARSE_DEPTH,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{binary::parse_logical_or, block::parse_program},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A cursor over a token slice.
///
/// Peeking past the last token keeps returning the end-of-input token, so
/// parsing functions never have to handle a missing token. The cursor also
/// tracks how deeply the construct being parsed is nested.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens:   &'a [Token],
    eof:      &'a Token,
    position: usize,
    depth:    usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a cursor over `tokens`; `eof` is returned once they run out.
    #[must_use]
    pub const fn new(tokens: &'a [Token], eof: &'a Token) -> Self {
        Self { tokens,
               eof,
               position: 0,
               depth: 0 }
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> &'a Token {
        self.tokens.get(self.position).unwrap_or(self.eof)
    }

    /// Consumes and returns the next token. The end-of-input token is never
    /// consumed.
    pub fn next(&mut self) -> &'a Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    /// Returns `true` if the next token has the given kind.
    #[must_use]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    /// Consumes the next token if it has the given kind.
    pub fn advance_if(&mut self, kind: TokenKind) -> Option<&'a Token> {
        if self.check(kind) { Some(self.next()) } else { None }
    }

    /// Consumes the next token, which must have the given kind.
    ///
    /// # Errors
    /// Returns a diagnostic naming `expected` if the next token has another
    /// kind; the token is left in place.
    pub fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<&'a Token> {
        self.advance_if(kind)
            .ok_or_else(|| ParseError::unexpected(self.peek(), expected))
    }

    /// Number of tokens consumed so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns `true` once only the end-of-input token remains.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Moves the cursor back to an earlier `position`.
    pub fn rewind(&mut self, position: usize) {
        self.position = position.min(self.position);
    }

    /// Current nesting depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Enters one more nesting level.
    ///
    /// # Errors
    /// `NestingTooDeep` at the next token once [`MAX_PARSE_DEPTH`] levels are
    /// open.
    pub fn descend(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_PARSE_DEPTH {
            return Err(ParseError::NestingTooDeep { limit: MAX_PARSE_DEPTH,
                                                    span:  self.peek().span(), });
        }
        self.depth += 1;
        Ok(())
    }

    /// Runs `parse` and then restores the nesting depth it started with, on
    /// success and failure alike. Levels entered by `parse` with
    /// [`descend`](Self::descend) are closed here.
    pub fn scoped<T>(&mut self, parse: impl FnOnce(&mut Self) -> T) -> T {
        let depth = self.depth;
        let result = parse(self);
        self.depth = depth;
        result
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// # Errors
    /// `NestingTooDeep` if the level cannot be entered, otherwise whatever
    /// `parse` returns.
    pub fn nested<T>(&mut self,
                     parse: impl FnOnce(&mut Self) -> ParseResult<T>)
                     -> ParseResult<T> {
        self.scoped(|tokens| -> ParseResult<T> {
                tokens.descend()?;
                parse(tokens)
            })
    }
}

/// Parses a token sequence into a program.
///
/// The result is always a [`Node::Block`] holding every well-formed top-level
/// statement, together with the diagnostics recorded for the malformed ones.
/// Parsing never stops early: after a syntax error the parser skips ahead to
/// the next statement and carries on. A missing end-of-input token is
/// supplied.
///
/// # Parameters
/// - `tokens`: Tokens as produced by
///   [`tokenize`](crate::interpreter::lexer::tokenize).
///
/// # Returns
/// The program root and the list of diagnostics (empty on success).
///
/// # Example
/// ```
/// use kestrel::{
///     ast::Node,
///     interpreter::{lexer::tokenize, parser::parse},
/// };
///
/// let tokens = tokenize("print 1 +; print 2; print 3;").unwrap();
/// let (root, diagnostics) = parse(&tokens);
///
/// assert_eq!(diagnostics.len(), 1);
/// let Node::Block { statements, .. } = root else { panic!("root is a block") };
/// assert_eq!(statements.len(), 2);
/// ```
#[must_use]
pub fn parse(tokens: &[Token]) -> (Node, Vec<ParseError>) {
    let synthetic;
    let eof = match tokens.last() {
        Some(last) if last.kind == TokenKind::Eof => last,
        last => {
            synthetic = Token::eof(last.map_or(0, |token| token.end + 1));
            &synthetic
        },
    };

    let mut stream = TokenStream::new(tokens, eof);
    let mut diagnostics = Vec::new();
    let root = parse_program(&mut stream, &mut diagnostics);

    if let Node::Block { statements, .. } = &root {
        trace!(statements = statements.len(),
               diagnostics = diagnostics.len(),
               "parsed program");
    }

    (root, diagnostics)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first token of the expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    tokens.nested(parse_assignment)
}

/// Parses a right-associative assignment.
///
/// The left-hand side is parsed as an ordinary expression first; only when an
/// `=` follows is it checked to be a plain variable reference.
///
/// Grammar: `assignment := logical_or ("=" assignment)?`
///
/// # Errors
/// - `InvalidAssignmentTarget` if the left side is not a variable.
/// - Propagates errors from the operands.
fn parse_assignment(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let target = parse_logical_or(tokens)?;

    let Some(equals) = tokens.advance_if(TokenKind::Equals) else {
        return Ok(target);
    };

    let value = tokens.nested(parse_assignment)?;

    match target {
        Node::Variable { name, .. } => Ok(Node::Assign { name,
                                                         value: Box::new(value),
                                                         token: equals.clone() }),
        _ => Err(ParseError::InvalidAssignmentTarget { span: equals.span() }),
    }
}
