use std::rc::Rc;

use crate::{
    ast::{FunctionDef, Node},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::{parse_block, parse_body},
            core::{ParseResult, TokenStream, parse_expression},
            utils::{at_statement_end, expect_terminator, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - `print <expr>;`
/// - a `{ ... }` block,
/// - `if`, `while`, `for` or `function` with a body closed by `end`,
/// - `return [<expr>];`
/// - an expression used as a statement.
///
/// The leading keyword decides the construct; anything else is parsed as an
/// expression statement. Each statement is one nesting level deeper than the
/// statement list holding it.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first token of the statement.
/// - `diagnostics`: Collects diagnostics of malformed nested statements.
///
/// # Returns
/// A parsed statement node.
pub fn parse_statement(tokens: &mut TokenStream<'_>,
                       diagnostics: &mut Vec<ParseError>)
                       -> ParseResult<Node> {
    tokens.nested(|tokens| match tokens.peek().kind {
              TokenKind::Print => parse_print(tokens),
              TokenKind::LBrace => parse_block(tokens, diagnostics),
              TokenKind::If => parse_if(tokens, diagnostics),
              TokenKind::While => parse_while(tokens, diagnostics),
              TokenKind::For => parse_for(tokens, diagnostics),
              TokenKind::Function => parse_function(tokens, diagnostics),
              TokenKind::Return => parse_return(tokens),
              _ => parse_expression_statement(tokens),
          })
}

/// Parses `print <expr>;`.
fn parse_print(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let keyword = tokens.next().clone();
    let expr = parse_expression(tokens)?;
    expect_terminator(tokens)?;

    Ok(Node::Print { expr:  Box::new(expr),
                     token: keyword, })
}

/// Parses an `if` statement with an optional `else` branch.
///
/// Syntax:
/// ```text
///     if <condition> <statements> [else <statements>] end
/// ```
/// An `else if` chain is written by nesting: the `else` body holds another
/// `if` with its own `end`.
///
/// # Errors
/// - `UnexpectedToken` / `UnexpectedEndOfInput` if the closing `end` is
///   missing.
/// - Propagates any errors from the condition.
fn parse_if(tokens: &mut TokenStream<'_>, diagnostics: &mut Vec<ParseError>) -> ParseResult<Node> {
    let keyword = tokens.next();
    let condition = parse_expression(tokens)?;
    let then_branch = parse_body(tokens, diagnostics, keyword);

    let else_branch = match tokens.advance_if(TokenKind::Else) {
        Some(else_keyword) => Some(Box::new(parse_body(tokens, diagnostics, else_keyword))),
        None => None,
    };
    tokens.expect(TokenKind::End, "'end' to close 'if'")?;

    Ok(Node::If { condition: Box::new(condition),
                  then_branch: Box::new(then_branch),
                  else_branch,
                  token: keyword.clone() })
}

/// Parses `while <condition> <statements> end`.
fn parse_while(tokens: &mut TokenStream<'_>,
               diagnostics: &mut Vec<ParseError>)
               -> ParseResult<Node> {
    let keyword = tokens.next();
    let condition = parse_expression(tokens)?;
    let body = parse_body(tokens, diagnostics, keyword);
    tokens.expect(TokenKind::End, "'end' to close 'while'")?;

    Ok(Node::While { condition: Box::new(condition),
                     body:      Box::new(body),
                     token:     keyword.clone(), })
}

/// Parses a ranged `for` loop.
///
/// Syntax:
/// ```text
///     for <identifier> in [<start>, <end>] <statements> end
/// ```
/// Both bounds are inclusive.
fn parse_for(tokens: &mut TokenStream<'_>, diagnostics: &mut Vec<ParseError>) -> ParseResult<Node> {
    let keyword = tokens.next();
    let var = parse_identifier(tokens, "a loop variable")?;
    tokens.expect(TokenKind::In, "'in'")?;
    tokens.expect(TokenKind::LBracket, "'['")?;
    let start = parse_expression(tokens)?;
    tokens.expect(TokenKind::Comma, "','")?;
    let end = parse_expression(tokens)?;
    tokens.expect(TokenKind::RBracket, "']'")?;

    let body = parse_body(tokens, diagnostics, keyword);
    tokens.expect(TokenKind::End, "'end' to close 'for'")?;

    Ok(Node::For { var:   var.text.clone(),
                   start: Box::new(start),
                   end:   Box::new(end),
                   body:  Box::new(body),
                   token: keyword.clone(), })
}

/// Parses a function definition.
///
/// Syntax:
/// ```text
///     function <name>(<param>, ...) <statements> end
/// ```
fn parse_function(tokens: &mut TokenStream<'_>,
                  diagnostics: &mut Vec<ParseError>)
                  -> ParseResult<Node> {
    let keyword: &Token = tokens.next();
    let name = parse_identifier(tokens, "a function name")?;
    tokens.expect(TokenKind::LParen, "'('")?;
    let params = parse_comma_separated(tokens,
                                       |tokens| {
                                           parse_identifier(tokens, "a parameter name")
                                               .map(|param| param.text.clone())
                                       },
                                       TokenKind::RParen)?;

    let body = parse_body(tokens, diagnostics, keyword);
    tokens.expect(TokenKind::End, "'end' to close 'function'")?;

    Ok(Node::Function(Rc::new(FunctionDef { name: name.text.clone(),
                                            params,
                                            body,
                                            token: keyword.clone() })))
}

/// Parses `return [<expr>];`. A bare `return` returns `null`.
fn parse_return(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let keyword = tokens.next().clone();
    let value = if at_statement_end(tokens) {
        None
    } else {
        Some(Box::new(parse_expression(tokens)?))
    };
    expect_terminator(tokens)?;

    Ok(Node::Return { value,
                      token: keyword })
}

/// Parses `<expr>;`.
fn parse_expression_statement(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let first = tokens.peek().clone();
    let expr = parse_expression(tokens)?;
    expect_terminator(tokens)?;

    Ok(Node::Expression { expr:  Box::new(expr),
                          token: first, })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn statement(source: &str) -> (ParseResult<Node>, Vec<ParseError>) {
        let tokens = tokenize(source).unwrap();
        let eof = tokens.last().unwrap();
        let mut diagnostics = Vec::new();
        let result = parse_statement(&mut TokenStream::new(&tokens, eof), &mut diagnostics);
        (result, diagnostics)
    }

    #[test]
    fn if_with_else_branch() {
        let (node, diagnostics) = statement("if x < 1 print 1; else print 2; end");
        assert!(diagnostics.is_empty());
        let Node::If { else_branch, .. } = node.unwrap() else {
            panic!("expected if");
        };
        assert!(else_branch.is_some());
    }

    #[test]
    fn for_loop_reads_both_bounds() {
        let (node, _) = statement("for i in [1, n + 1] print i; end");
        let Node::For { var, end, .. } = node.unwrap() else {
            panic!("expected for");
        };
        assert_eq!(var, "i");
        assert!(matches!(*end, Node::BinaryOp { .. }));
    }

    #[test]
    fn function_definition_collects_parameters() {
        let (node, _) = statement("function add(a, b) return a + b; end");
        let Node::Function(def) = node.unwrap() else {
            panic!("expected function");
        };
        assert_eq!(def.name, "add");
        assert_eq!(def.params, ["a", "b"]);
        assert!(matches!(def.body, Node::Block { ref statements, .. } if statements.len() == 1));
    }

    #[test]
    fn bare_return_has_no_value() {
        let (node, _) = statement("return;");
        assert!(matches!(node.unwrap(), Node::Return { value: None, .. }));
    }

    #[test]
    fn terminator_is_optional_before_end() {
        let (node, diagnostics) = statement("while x x = x - 1 end");
        assert!(node.is_ok());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn missing_terminator_is_an_error() {
        let (node, _) = statement("print 1 print 2");
        assert!(matches!(node, Err(ParseError::UnexpectedToken { ref found, .. }) if found == "print"));
    }
}
