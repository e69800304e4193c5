use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, utils::operand_type_error},
        lexer::Span,
        value::core::Value,
    },
};

/// Number of bits in an integer value.
const INTEGER_BITS: i64 = 64;

/// Evaluates `&`, `|`, `^`, `<<` and `>>`.
///
/// All of them require two integers. Shifts follow two's complement rules:
/// `<<` discards bits shifted out at the top and `>>` is an arithmetic shift
/// that keeps the sign.
///
/// # Errors
/// - `TypeError` unless both operands are integers.
/// - `NegativeShift` for a negative shift amount.
/// - `Overflow` for a left shift by 64 bits or more. A right shift by 64 bits
///   or more yields `0` or `-1` depending on the sign.
///
/// # Example
/// ```
/// use kestrel::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::bitwise::eval_bitwise, lexer::Span, value::core::Value},
/// };
///
/// let span = Span::default();
/// let shifted = eval_bitwise(BinaryOperator::Shl, &Value::Integer(1), &Value::Integer(4), span);
/// assert_eq!(shifted, Ok(Value::Integer(16)));
///
/// let masked = eval_bitwise(BinaryOperator::BitAnd,
///                           &Value::Integer(0b1100),
///                           &Value::Integer(0b1010),
///                           span);
/// assert_eq!(masked, Ok(Value::Integer(0b1000)));
/// ```
pub fn eval_bitwise(op: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    span: Span)
                    -> EvalResult<Value> {
    let (Value::Integer(a), Value::Integer(b)) = (left, right) else {
        return Err(operand_type_error(op, left, right, span));
    };
    let (a, b) = (*a, *b);

    let result = match op {
        BinaryOperator::BitAnd => a & b,
        BinaryOperator::BitOr => a | b,
        BinaryOperator::BitXor => a ^ b,
        BinaryOperator::Shl => shift_left(a, b, span)?,
        BinaryOperator::Shr => shift_right(a, b, span)?,
        _ => return Err(operand_type_error(op, left, right, span)),
    };

    Ok(Value::Integer(result))
}

fn shift_left(value: i64, amount: i64, span: Span) -> EvalResult<i64> {
    if amount < 0 {
        return Err(RuntimeError::NegativeShift { amount,
                                                 span });
    }

    u32::try_from(amount).ok()
                         .and_then(|amount| value.checked_shl(amount))
                         .ok_or(RuntimeError::Overflow { span })
}

fn shift_right(value: i64, amount: i64, span: Span) -> EvalResult<i64> {
    if amount < 0 {
        return Err(RuntimeError::NegativeShift { amount,
                                                 span });
    }

    let amount = amount.min(INTEGER_BITS - 1);
    Ok(value >> amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPAN: Span = Span { start: 0,
                              end:   0, };

    fn apply(op: BinaryOperator, left: i64, right: i64) -> EvalResult<Value> {
        eval_bitwise(op, &Value::Integer(left), &Value::Integer(right), SPAN)
    }

    #[test]
    fn logic_operators() {
        assert_eq!(apply(BinaryOperator::BitOr, 0b0101, 0b0011), Ok(Value::Integer(0b0111)));
        assert_eq!(apply(BinaryOperator::BitXor, 0b0101, 0b0011), Ok(Value::Integer(0b0110)));
    }

    #[test]
    fn right_shift_keeps_sign_and_saturates() {
        assert_eq!(apply(BinaryOperator::Shr, -16, 2), Ok(Value::Integer(-4)));
        assert_eq!(apply(BinaryOperator::Shr, -16, 200), Ok(Value::Integer(-1)));
        assert_eq!(apply(BinaryOperator::Shr, 16, 64), Ok(Value::Integer(0)));
    }

    #[test]
    fn invalid_shift_amounts() {
        assert_eq!(apply(BinaryOperator::Shl, 1, -1),
                   Err(RuntimeError::NegativeShift { amount: -1,
                                                     span:   SPAN, }));
        assert_eq!(apply(BinaryOperator::Shl, 1, 64),
                   Err(RuntimeError::Overflow { span: SPAN }));
    }

    #[test]
    fn floats_are_rejected() {
        assert!(matches!(eval_bitwise(BinaryOperator::BitAnd,
                                      &Value::Float(1.0),
                                      &Value::Integer(1),
                                      SPAN),
                         Err(RuntimeError::TypeError { .. })));
    }
}
