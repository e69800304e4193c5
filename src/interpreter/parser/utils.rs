use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, TokenStream},
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by call arguments and function parameter lists. It
/// repeatedly calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token kind that terminates the list (e.g. `)`).
///
/// # Returns
/// A vector of parsed items. The closing token is consumed.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, or if anything other
/// than a comma or the closing token follows an item.
pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
    tokens: &mut TokenStream<'_>,
    parse_item: impl Fn(&mut TokenStream<'_>) -> ParseResult<T>,
    closing: TokenKind)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if tokens.advance_if(closing).is_some() {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        let token = tokens.peek();
        match token.kind {
            TokenKind::Comma => {
                tokens.next();
            },
            kind if kind == closing => {
                tokens.next();
                break;
            },
            _ => return Err(ParseError::unexpected(token, "',' or a closing delimiter")),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its token.
///
/// # Errors
/// Returns a `ParseError` naming `what` if the next token is not an
/// identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a>(tokens: &mut TokenStream<'a>,
                                                           what: &str)
                                                           -> ParseResult<&'a Token> {
    tokens.expect(TokenKind::Identifier, what)
}

/// Consumes the terminator of a simple statement.
///
/// The terminator is `;`. It may be left out right before `end`, `else`,
/// `}` or the end of input, where the statement ends anyway.
///
/// # Errors
/// Returns a `ParseError` if any other token follows the statement.
pub(in crate::interpreter::parser) fn expect_terminator(tokens: &mut TokenStream<'_>)
                                                        -> ParseResult<()> {
    let token = tokens.peek();
    match token.kind {
        TokenKind::Semicolon => {
            tokens.next();
            Ok(())
        },
        kind if kind.closes_body() || kind == TokenKind::Eof => Ok(()),
        _ => Err(ParseError::unexpected(token, "';'")),
    }
}

/// Returns `true` if a statement may end at the next token, meaning an
/// optional expression is absent.
pub(in crate::interpreter::parser) fn at_statement_end(tokens: &TokenStream<'_>) -> bool {
    let kind = tokens.peek().kind;
    kind == TokenKind::Semicolon || kind == TokenKind::Eof || kind.closes_body()
}
