use crate::{
    ast::{Node, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        lexer::{Span, Token},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a unary operation on an expression.
    ///
    /// The operand is evaluated first, then [`eval_unary`] applies the
    /// operator.
    pub(in crate::interpreter::evaluator) fn eval_unary_op(&mut self,
                                                           op: UnaryOperator,
                                                           operand: &Node,
                                                           token: &Token)
                                                           -> EvalResult<Value> {
        let value = self.eval(operand)?;
        eval_unary(op, &value, token.span())
    }
}

/// Applies a unary operator to a value.
///
/// Supported operators:
/// - `Negate`: negates an integer (checked) or a float.
/// - `Not`: the boolean negation of the operand's truthiness.
/// - `BitNot`: the bitwise complement of an integer.
/// - `IntCast` / `FloatCast`: see [`Value::to_int`] and [`Value::to_float`].
///
/// # Parameters
/// - `op`: The unary operator.
/// - `value`: The operand.
/// - `span`: Source span for error reporting.
///
/// # Returns
/// The resulting value.
///
/// # Errors
/// - `TypeError` for negation of a non-number or complement of a non-int.
/// - `Overflow` for `-(-9223372036854775808)`.
/// - `InvalidCast` from the casts.
///
/// # Example
/// ```
/// use kestrel::{
///     ast::UnaryOperator,
///     interpreter::{evaluator::unary::eval_unary, lexer::Span, value::core::Value},
/// };
///
/// let span = Span::default();
/// assert_eq!(eval_unary(UnaryOperator::Negate, &Value::Integer(4), span),
///            Ok(Value::Integer(-4)));
/// assert_eq!(eval_unary(UnaryOperator::Not, &Value::Integer(0), span),
///            Ok(Value::Boolean(false)));
/// assert_eq!(eval_unary(UnaryOperator::BitNot, &Value::Integer(0), span),
///            Ok(Value::Integer(-1)));
/// ```
pub fn eval_unary(op: UnaryOperator, value: &Value, span: Span) -> EvalResult<Value> {
    match op {
        UnaryOperator::Negate => match value {
            Value::Integer(i) => i.checked_neg()
                                  .map(Value::Integer)
                                  .ok_or(RuntimeError::Overflow { span }),
            Value::Float(f) => Ok(Value::Float(-f)),
            _ => Err(unary_type_error(op, value, span)),
        },
        UnaryOperator::Not => Ok(Value::Boolean(!value.is_truthy())),
        UnaryOperator::BitNot => match value {
            Value::Integer(i) => Ok(Value::Integer(!i)),
            _ => Err(unary_type_error(op, value, span)),
        },
        UnaryOperator::IntCast => value.to_int(span),
        UnaryOperator::FloatCast => value.to_float(span),
    }
}

fn unary_type_error(op: UnaryOperator, value: &Value, span: Span) -> RuntimeError {
    RuntimeError::TypeError { details: format!("unsupported operand type for unary {op}: {}",
                                               value.type_name()),
                              span }
}
