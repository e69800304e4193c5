use crate::{
    ast::{BinaryOperator, Node},
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, TokenStream},
            unary::parse_unary,
        },
    },
};

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("||" logical_and)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// A left-associative tree of `||` operations.
pub fn parse_logical_or(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_left_associative(tokens, parse_logical_and, &[BinaryOperator::Or])
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := bitwise ("&&" bitwise)*`
pub fn parse_logical_and(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_left_associative(tokens, parse_bitwise, &[BinaryOperator::And])
}

/// Parses bitwise expressions.
///
/// `&`, `|` and `^` share a single precedence level and associate to the
/// left, so `a | b & c` is `(a | b) & c`.
///
/// The rule is: `bitwise := equality (("&" | "|" | "^") equality)*`
pub fn parse_bitwise(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_left_associative(tokens,
                           parse_equality,
                           &[BinaryOperator::BitAnd, BinaryOperator::BitOr, BinaryOperator::BitXor])
}

/// Parses equality expressions.
///
/// The rule is: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_left_associative(tokens,
                           parse_relational,
                           &[BinaryOperator::Equal, BinaryOperator::NotEqual])
}

/// Parses relational expressions.
///
/// The rule is: `relational := shift (("<" | "<=" | ">" | ">=") shift)*`
pub fn parse_relational(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_left_associative(tokens,
                           parse_shift,
                           &[BinaryOperator::Less,
                             BinaryOperator::LessEqual,
                             BinaryOperator::Greater,
                             BinaryOperator::GreaterEqual])
}

/// Parses shift expressions.
///
/// The rule is: `shift := additive (("<<" | ">>") additive)*`
pub fn parse_shift(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_left_associative(tokens, parse_additive, &[BinaryOperator::Shl, BinaryOperator::Shr])
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`, so `10 - 3 - 2`
/// is `(10 - 3) - 2`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An `Node::BinaryOp` tree representing the parsed expression.
pub fn parse_additive(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_left_associative(tokens,
                           parse_multiplicative,
                           &[BinaryOperator::Add, BinaryOperator::Sub])
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := exponent (("*" | "/" | "%") exponent)*`
pub fn parse_multiplicative(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_left_associative(tokens,
                           parse_exponent,
                           &[BinaryOperator::Mul, BinaryOperator::Div, BinaryOperator::Mod])
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ** b ** c` parses as
/// `a ** (b ** c)`. Prefix operators bind tighter, so `-2 ** 2` is
/// `(-2) ** 2`.
///
/// The rule is: `exponent := unary ("**" exponent)?`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An exponentiation expression tree.
pub fn parse_exponent(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let base = parse_unary(tokens)?;

    let Some(token) = tokens.advance_if(TokenKind::StarStar) else {
        return Ok(base);
    };

    let exponent = tokens.nested(parse_exponent)?;

    Ok(Node::BinaryOp { left:  Box::new(base),
                        op:    BinaryOperator::Pow,
                        right: Box::new(exponent),
                        token: token.clone(), })
}

/// Parses one left-associative precedence level.
///
/// Repeatedly parses an operand with `operand` and folds it into the tree for
/// as long as the next token maps to one of `operators`. Each fold makes the
/// tree one level deeper, so each operator counts against the nesting limit.
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `operand`: Parser for the next-higher precedence level.
/// - `operators`: Operators belonging to this level.
fn parse_left_associative(tokens: &mut TokenStream<'_>,
                          operand: fn(&mut TokenStream<'_>) -> ParseResult<Node>,
                          operators: &[BinaryOperator])
                          -> ParseResult<Node> {
    tokens.scoped(|tokens| -> ParseResult<Node> {
              let mut left = operand(tokens)?;
              loop {
                  let token = tokens.peek();
                  if let Some(op) = token_to_binary_operator(token.kind)
                     && operators.contains(&op)
                  {
                      tokens.next();
                      tokens.descend()?;
                      let right = operand(tokens)?;
                      left = Node::BinaryOp { left: Box::new(left),
                                              op,
                                              right: Box::new(right),
                                              token: token.clone() };
                      continue;
                  }
                  break;
              }
              Ok(left)
          })
}

/// Maps a token kind to its binary operator, if it is one.
///
/// # Example
/// ```
/// use kestrel::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(TokenKind::StarStar), Some(BinaryOperator::Pow));
/// assert_eq!(token_to_binary_operator(TokenKind::Equals), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    let op = match kind {
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Minus => BinaryOperator::Sub,
        TokenKind::Star => BinaryOperator::Mul,
        TokenKind::Slash => BinaryOperator::Div,
        TokenKind::Percent => BinaryOperator::Mod,
        TokenKind::StarStar => BinaryOperator::Pow,
        TokenKind::ShiftLeft => BinaryOperator::Shl,
        TokenKind::ShiftRight => BinaryOperator::Shr,
        TokenKind::Ampersand => BinaryOperator::BitAnd,
        TokenKind::Pipe => BinaryOperator::BitOr,
        TokenKind::Caret => BinaryOperator::BitXor,
        TokenKind::EqualEqual => BinaryOperator::Equal,
        TokenKind::BangEqual => BinaryOperator::NotEqual,
        TokenKind::Less => BinaryOperator::Less,
        TokenKind::LessEqual => BinaryOperator::LessEqual,
        TokenKind::Greater => BinaryOperator::Greater,
        TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
        TokenKind::AndAnd => BinaryOperator::And,
        TokenKind::DoublePipe => BinaryOperator::Or,
        _ => return None,
    };
    Some(op)
}
