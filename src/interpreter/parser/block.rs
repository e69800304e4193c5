use tracing::debug;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, TokenStream},
            statement::parse_statement,
        },
    },
};

/// Parses a whole program.
///
/// Top-level statements are parsed until the end of input. A stray `end`,
/// `else` or `}` at the top level closes nothing; it is recorded as a
/// diagnostic and skipped.
pub(in crate::interpreter::parser) fn parse_program(tokens: &mut TokenStream<'_>,
                                                    diagnostics: &mut Vec<ParseError>)
                                                    -> Node {
    let first = tokens.peek().clone();
    let mut statements = Vec::new();

    loop {
        statements.extend(parse_statement_list(tokens, diagnostics));
        if tokens.at_end() {
            break;
        }
        let stray = tokens.next();
        record(diagnostics, ParseError::unexpected(stray, "a statement"));
    }

    Node::Block { statements,
                  token: first }
}

/// Parses statements until a body closer (`end`, `else`, `}`) or the end of
/// input, which is left unconsumed.
///
/// This is where error recovery happens. A statement that fails to parse is
/// recorded in `diagnostics` and contributes no node. A broken `if`, `while`,
/// `for`, `function` or brace block is skipped up to its matching closer with
/// [`skip_body`]; any other statement is resynchronized with [`synchronize`].
/// Empty statements (a lone `;`) are skipped.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first statement.
/// - `diagnostics`: Collects one entry per malformed statement.
///
/// # Returns
/// The well-formed statements, in source order.
pub(in crate::interpreter::parser) fn parse_statement_list(tokens: &mut TokenStream<'_>,
                                                           diagnostics: &mut Vec<ParseError>)
                                                           -> Vec<Node> {
    let mut statements = Vec::new();

    loop {
        let kind = tokens.peek().kind;
        if kind == TokenKind::Eof || kind.closes_body() {
            break;
        }
        if kind == TokenKind::Semicolon {
            tokens.next();
            continue;
        }

        let start = tokens.position();
        match parse_statement(tokens, diagnostics) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                record(diagnostics, error);
                if kind.opens_body() {
                    skip_body(tokens, start);
                } else {
                    synchronize(tokens, start);
                }
            },
        }
    }

    statements
}

/// Parses a block delimited by braces.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
/// - `diagnostics`: Collects diagnostics of malformed inner statements.
///
/// # Returns
/// A `Node::Block` carrying the `{` token.
///
/// # Errors
/// Returns a `ParseError` if the block is not closed by `}`.
pub(in crate::interpreter::parser) fn parse_block(tokens: &mut TokenStream<'_>,
                                                  diagnostics: &mut Vec<ParseError>)
                                                  -> ParseResult<Node> {
    let brace = tokens.expect(TokenKind::LBrace, "'{'")?;
    let statements = parse_statement_list(tokens, diagnostics);
    tokens.expect(TokenKind::RBrace, "'}'")?;

    Ok(Node::Block { statements,
                     token: brace.clone() })
}

/// Parses the body of an `if`, `while`, `for` or `function` statement.
///
/// The body runs up to the next closer, which the caller consumes. It is
/// wrapped in a `Node::Block` carrying `keyword`.
pub(in crate::interpreter::parser) fn parse_body(tokens: &mut TokenStream<'_>,
                                                 diagnostics: &mut Vec<ParseError>,
                                                 keyword: &Token)
                                                 -> Node {
    Node::Block { statements: parse_statement_list(tokens, diagnostics),
                  token:      keyword.clone(), }
}

/// Skips tokens after a malformed statement.
///
/// Stops after consuming a `;`, or before a token that starts a statement or
/// closes a body, or at the end of input. A starter or closer only stops the
/// scan once at least one token of the broken statement, counted from
/// `start`, has been consumed; this guarantees progress.
fn synchronize(tokens: &mut TokenStream<'_>, start: usize) {
    loop {
        let kind = tokens.peek().kind;
        match kind {
            TokenKind::Eof => return,
            TokenKind::Semicolon => {
                tokens.next();
                return;
            },
            _ if (kind.starts_statement() || kind.closes_body()) && tokens.position() > start => {
                return;
            },
            _ => {
                tokens.next();
            },
        }
    }
}

/// Skips a compound statement that failed to parse.
///
/// The stream is moved back to `start`, the statement's opening keyword or
/// brace, and then past the `end` or `}` that balances it. Nested openers are
/// counted, so the body of the broken statement never leaks into the
/// enclosing statement list. Without a balancing closer everything up to the
/// end of input is skipped.
fn skip_body(tokens: &mut TokenStream<'_>, start: usize) {
    tokens.rewind(start);
    let mut open = 0usize;

    loop {
        let kind = tokens.peek().kind;
        if kind == TokenKind::Eof {
            return;
        }
        tokens.next();

        if kind.opens_body() {
            open += 1;
        } else if matches!(kind, TokenKind::End | TokenKind::RBrace) {
            open = open.saturating_sub(1);
            if open == 0 {
                return;
            }
        }
    }
}

fn record(diagnostics: &mut Vec<ParseError>, error: ParseError) {
    debug!(%error, "syntax error, skipping statement");
    diagnostics.push(error);
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::Node,
        error::ParseError,
        interpreter::{lexer::tokenize, parser::core::parse},
    };

    fn program(source: &str) -> (Vec<Node>, Vec<ParseError>) {
        let tokens = tokenize(source).unwrap();
        let (root, diagnostics) = parse(&tokens);
        let Node::Block { statements, .. } = root else {
            panic!("root must be a block");
        };
        (statements, diagnostics)
    }

    #[test]
    fn well_formed_statements_are_counted() {
        let (statements, diagnostics) = program("x = 1; print x; { y = 2; } ; ;");
        assert!(diagnostics.is_empty());
        assert_eq!(statements.len(), 3);
    }

    #[test]
    fn one_diagnostic_per_malformed_statement() {
        let (statements, diagnostics) = program("print 1 +; print 2; x = 3; print x;");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(statements.len(), 3);
    }

    #[test]
    fn missing_terminator_stops_before_next_statement() {
        let (statements, diagnostics) = program("print 1 2 print 3;");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(statements.len(), 1);
        assert!(matches!(statements[0], Node::Print { .. }));
    }

    #[test]
    fn recovery_inside_bodies_keeps_the_enclosing_statement() {
        let (statements, diagnostics) =
            program("while x print ); x = x - 1; end print 1;");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(statements.len(), 2);
        let Node::While { body, .. } = &statements[0] else {
            panic!("expected while");
        };
        assert!(matches!(**body, Node::Block { ref statements, .. } if statements.len() == 1));
    }

    #[test]
    fn stray_closer_at_top_level_is_reported() {
        let (statements, diagnostics) = program("print 1; end print 2;");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn broken_loop_header_skips_its_whole_body() {
        let (statements, diagnostics) = program("while ) print 1; end print 2; print 3;");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(statements.len(), 2);
        assert!(statements.iter().all(|s| matches!(s, Node::Print { .. })));
    }

    #[test]
    fn broken_headers_skip_nested_bodies() {
        let (statements, diagnostics) =
            program("for i in [1 2] if i print i; end while i end end print 2;
                     function (a) return a; end print 3;");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn broken_header_inside_a_body_keeps_the_enclosing_statement() {
        let (statements, diagnostics) =
            program("function f() if ) print 1; end return 2; end print f();");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(statements.len(), 2);
        let Node::Function(def) = &statements[0] else {
            panic!("expected function");
        };
        assert!(matches!(def.body, Node::Block { ref statements, .. } if statements.len() == 1));
    }

    #[test]
    fn deeply_nested_blocks_give_one_diagnostic() {
        let source = format!("{}print 1;{} print 2;", "{".repeat(5_000), "}".repeat(5_000));
        let (statements, diagnostics) = program(&source);
        assert!(matches!(diagnostics.as_slice(), [ParseError::NestingTooDeep { .. }]));
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn unclosed_body_reports_end_of_input() {
        let (statements, diagnostics) = program("if true print 1;");
        assert_eq!(statements.len(), 0);
        assert!(matches!(diagnostics.as_slice(),
                         [ParseError::UnexpectedEndOfInput { .. }]));
    }
}
