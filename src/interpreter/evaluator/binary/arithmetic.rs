use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, utils::operand_type_error},
        lexer::Span,
        value::core::Value,
    },
};

/// Evaluates `+`, `-`, `*`, `/` and `%`.
///
/// Two integers produce an integer; the operation is checked, so leaving the
/// 64-bit range is an error rather than a wrap-around. Integer division and
/// remainder truncate toward zero. If either operand is a float, both are
/// promoted and the result is a float. `%` only accepts integers.
///
/// # Errors
/// - `DivisionByZero` for a zero divisor, integer or float.
/// - `Overflow` when an integer result does not fit.
/// - `TypeError` for non-numeric operands, or float operands of `%`.
pub fn eval_arithmetic(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       span: Span)
                       -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => integer_arithmetic(op, *a, *b, span),
        _ if left.is_numeric() && right.is_numeric() && op != BinaryOperator::Mod => {
            float_arithmetic(op, left.as_float(span)?, right.as_float(span)?, span)
        },
        _ => Err(operand_type_error(op, left, right, span)),
    }
}

fn integer_arithmetic(op: BinaryOperator, a: i64, b: i64, span: Span) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Sub => a.checked_sub(b),
        BinaryOperator::Mul => a.checked_mul(b),
        BinaryOperator::Div | BinaryOperator::Mod if b == 0 => {
            return Err(RuntimeError::DivisionByZero { span });
        },
        BinaryOperator::Div => a.checked_div(b),
        BinaryOperator::Mod => a.checked_rem(b),
        _ => return Err(operand_type_error(op, &Value::Integer(a), &Value::Integer(b), span)),
    };

    result.map(Value::Integer)
          .ok_or(RuntimeError::Overflow { span })
}

fn float_arithmetic(op: BinaryOperator, a: f64, b: f64, span: Span) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div if b == 0.0 => return Err(RuntimeError::DivisionByZero { span }),
        BinaryOperator::Div => a / b,
        _ => return Err(operand_type_error(op, &Value::Float(a), &Value::Float(b), span)),
    };

    Ok(Value::Float(result))
}
