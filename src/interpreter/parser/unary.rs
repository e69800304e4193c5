use crate::{
    ast::{LiteralValue, Node, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, TokenStream, parse_expression},
            utils::parse_comma_separated,
        },
    },
};

/// Parses prefix unary operators.
///
/// Supports logical not `!`, negation `-` and bitwise complement `~`.
/// Prefix operators nest, so `!-x` is `!(-x)`.
///
/// The rule is: `unary := ("!" | "-" | "~") unary | call`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// A unary expression node or the call-level expression.
pub fn parse_unary(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let token = tokens.peek();
    let op = match token.kind {
        TokenKind::Bang => UnaryOperator::Not,
        TokenKind::Minus => UnaryOperator::Negate,
        TokenKind::Tilde => UnaryOperator::BitNot,
        _ => return parse_call(tokens),
    };
    tokens.next();

    let operand = tokens.nested(parse_unary)?;
    Ok(Node::UnaryOp { op,
                       operand: Box::new(operand),
                       token: token.clone() })
}

/// Parses call postfixes.
///
/// Any primary expression may be followed by one or more argument lists;
/// `f(1)(2)` calls the result of `f(1)`. Whether the callee names a function
/// is only checked at runtime.
///
/// The rule is: `call := primary ("(" arguments? ")")*`
pub fn parse_call(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    tokens.scoped(|tokens| -> ParseResult<Node> {
              let mut expr = parse_primary(tokens)?;

              while let Some(paren) = tokens.advance_if(TokenKind::LParen) {
                  tokens.descend()?;
                  let arguments =
                      parse_comma_separated(tokens, parse_expression, TokenKind::RParen)?;
                  expr = Node::Call { callee: Box::new(expr),
                                      arguments,
                                      token: paren.clone() };
              }

              Ok(expr)
          })
}

/// Parses primary expressions.
///
/// This is the lowest level of the expression grammar and includes:
/// - integer, float and string literals,
/// - `true`, `false` and `null`,
/// - parenthesized expressions,
/// - variable references,
/// - casts: `int` or `float` followed by a call-level expression.
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// A primary expression node.
///
/// # Errors
/// - `LiteralTooLarge` for integer literals outside the 64-bit range and
///   float literals too large to be finite.
/// - `UnexpectedToken` / `UnexpectedEndOfInput` when no expression starts
///   here.
pub fn parse_primary(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let token = tokens.peek();

    let value = match token.kind {
        TokenKind::Integer => {
            let value = token.text
                             .parse::<i64>()
                             .map_err(|_| ParseError::LiteralTooLarge { literal: token.text.clone(),
                                                                        span:    token.span(), })?;
            LiteralValue::Integer(value)
        },
        TokenKind::Float => {
            let value = token.text
                             .parse::<f64>()
                             .map_err(|_| ParseError::unexpected(token, "a float literal"))?;
            if !value.is_finite() {
                return Err(ParseError::LiteralTooLarge { literal: token.text.clone(),
                                                         span:    token.span(), });
            }
            LiteralValue::Float(value)
        },
        TokenKind::String => LiteralValue::Str(token.text.clone()),
        TokenKind::True => LiteralValue::Boolean(true),
        TokenKind::False => LiteralValue::Boolean(false),
        TokenKind::Null => LiteralValue::Null,
        TokenKind::Identifier => {
            tokens.next();
            return Ok(Node::Variable { name:  token.text.clone(),
                                       token: token.clone(), });
        },
        TokenKind::LParen => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            tokens.expect(TokenKind::RParen, "')'")?;
            return Ok(expr);
        },
        TokenKind::Int => return parse_cast(tokens, UnaryOperator::IntCast),
        TokenKind::FloatCast => return parse_cast(tokens, UnaryOperator::FloatCast),
        _ => return Err(ParseError::unexpected(token, "an expression")),
    };

    tokens.next();
    Ok(Node::Literal { value,
                       token: token.clone() })
}

/// Parses a cast keyword and its operand.
///
/// The operand is a call-level expression, so `int(x) + 1` casts only `x`.
fn parse_cast(tokens: &mut TokenStream<'_>, op: UnaryOperator) -> ParseResult<Node> {
    let keyword: &Token = tokens.next();
    let operand = tokens.nested(parse_call)?;

    Ok(Node::UnaryOp { op,
                       operand: Box::new(operand),
                       token: keyword.clone() })
}
