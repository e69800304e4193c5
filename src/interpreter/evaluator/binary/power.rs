use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, utils::operand_type_error},
        lexer::Span,
        value::core::Value,
    },
    util::num::i64_to_f64,
};

/// Evaluates exponentiation (`**`).
///
/// - An integer raised to a non-negative integer is an integer, computed
///   with overflow checking.
/// - An integer raised to a negative integer is a float (`2 ** -1` is `0.5`).
/// - If either operand is a float, the result is a float.
///
/// # Parameters
/// - `base`: The base.
/// - `exponent`: The exponent.
/// - `span`: Source span for error reporting.
///
/// # Returns
/// The result of raising `base` to `exponent`.
///
/// # Errors
/// - `Overflow` if an integer result does not fit in 64 bits.
/// - `TypeError` for non-numeric operands.
///
/// # Example
/// ```
/// use kestrel::interpreter::{
///     evaluator::binary::power::eval_power, lexer::Span, value::core::Value,
/// };
///
/// let span = Span::default();
/// assert_eq!(eval_power(&Value::Integer(2), &Value::Integer(9), span), Ok(Value::Integer(512)));
/// assert_eq!(eval_power(&Value::Integer(2), &Value::Integer(-1), span), Ok(Value::Float(0.5)));
/// assert_eq!(eval_power(&Value::Float(9.0), &Value::Float(0.5), span), Ok(Value::Float(3.0)));
/// ```
pub fn eval_power(base: &Value, exponent: &Value, span: Span) -> EvalResult<Value> {
    match (base, exponent) {
        (Value::Integer(b), Value::Integer(e)) if *e >= 0 => integer_power(*b, *e, span),
        (Value::Integer(b), Value::Integer(e)) => {
            Ok(Value::Float(i64_to_f64(*b).powf(i64_to_f64(*e))))
        },
        _ if base.is_numeric() && exponent.is_numeric() => {
            Ok(Value::Float(base.as_float(span)?.powf(exponent.as_float(span)?)))
        },
        _ => Err(operand_type_error(BinaryOperator::Pow, base, exponent, span)),
    }
}

/// Raises an integer to a non-negative integer power.
///
/// Bases `0`, `1` and `-1` never overflow, whatever the exponent; every other
/// base overflows long before the exponent leaves the `u32` range.
fn integer_power(base: i64, exponent: i64, span: Span) -> EvalResult<Value> {
    let result = match base {
        0 | 1 if exponent > 0 => Some(base),
        -1 => Some(if exponent % 2 == 0 { 1 } else { -1 }),
        _ => u32::try_from(exponent).ok().and_then(|e| base.checked_pow(e)),
    };

    result.map(Value::Integer)
          .ok_or(RuntimeError::Overflow { span })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPAN: Span = Span { start: 0,
                              end:   0, };

    #[test]
    fn zero_exponent_is_one() {
        assert_eq!(eval_power(&Value::Integer(0), &Value::Integer(0), SPAN),
                   Ok(Value::Integer(1)));
        assert_eq!(eval_power(&Value::Integer(-5), &Value::Integer(0), SPAN),
                   Ok(Value::Integer(1)));
    }

    #[test]
    fn trivial_bases_accept_huge_exponents() {
        assert_eq!(eval_power(&Value::Integer(1), &Value::Integer(i64::MAX), SPAN),
                   Ok(Value::Integer(1)));
        assert_eq!(eval_power(&Value::Integer(-1), &Value::Integer(i64::MAX), SPAN),
                   Ok(Value::Integer(-1)));
    }

    #[test]
    fn integer_overflow_is_an_error() {
        assert_eq!(eval_power(&Value::Integer(2), &Value::Integer(63), SPAN),
                   Err(RuntimeError::Overflow { span: SPAN }));
        assert_eq!(eval_power(&Value::Integer(2), &Value::Integer(62), SPAN),
                   Ok(Value::Integer(1 << 62)));
    }

    #[test]
    fn strings_are_rejected() {
        assert!(eval_power(&Value::from("2"), &Value::Integer(2), SPAN).is_err());
    }
}
