use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{core::EvalResult, utils::operand_type_error},
        lexer::Span,
        value::core::Value,
    },
    util::num::{f64_to_i64_truncated, i64_to_f64},
};

/// Decides whether two values are equal.
///
/// Numbers compare by mathematical value across integers and floats, so
/// `1 == 1.0` holds while `1 == 1.5` does not. Booleans, strings and `null`
/// compare with their own kind. Values of unrelated kinds are never equal;
/// this is not an error.
///
/// # Example
/// ```
/// use kestrel::interpreter::{evaluator::binary::comparison::values_equal, value::core::Value};
///
/// assert!(values_equal(&Value::Integer(3), &Value::Float(3.0)));
/// assert!(!values_equal(&Value::Integer(3), &Value::from("3")));
/// assert!(values_equal(&Value::Null, &Value::Null));
/// ```
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Integer(i), Value::Float(f)) | (Value::Float(f), Value::Integer(i)) => {
            integer_equals_float(*i, *f)
        },
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

/// Exact comparison of an integer with a float.
///
/// Converting the integer to a float would round large values, so the float
/// must be integral and is compared in the integer domain.
fn integer_equals_float(integer: i64, float: f64) -> bool {
    float.fract() == 0.0 && f64_to_i64_truncated(float, ()) == Ok(integer)
}

/// Evaluates `==`, `!=`, `<`, `<=`, `>` and `>=`.
///
/// Equality never fails, see [`values_equal`]. Ordering is defined for two
/// numbers, compared as floats when their kinds differ, and for two strings,
/// compared lexicographically.
///
/// # Parameters
/// - `op`: The comparison operator.
/// - `left`: The left-hand value.
/// - `right`: The right-hand value.
/// - `span`: Source span for error reporting.
///
/// # Returns
/// A boolean value.
///
/// # Errors
/// `TypeError` when ordering values that have no ordering between them.
///
/// # Example
/// ```
/// use kestrel::{
///     ast::BinaryOperator,
///     interpreter::{
///         evaluator::binary::comparison::eval_comparison, lexer::Span, value::core::Value,
///     },
/// };
///
/// let span = Span::default();
/// let result = eval_comparison(BinaryOperator::Less, &Value::Integer(3), &Value::Float(3.5), span);
/// assert_eq!(result, Ok(Value::Boolean(true)));
///
/// let result = eval_comparison(BinaryOperator::NotEqual, &Value::Null, &Value::Integer(0), span);
/// assert_eq!(result, Ok(Value::Boolean(true)));
/// ```
pub fn eval_comparison(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       span: Span)
                       -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Equal => values_equal(left, right),
        BinaryOperator::NotEqual => !values_equal(left, right),
        _ => {
            let Some(ordering) = compare(left, right) else {
                return Err(operand_type_error(op, left, right, span));
            };
            match op {
                BinaryOperator::Less => ordering == Some(Ordering::Less),
                BinaryOperator::LessEqual => {
                    matches!(ordering, Some(Ordering::Less | Ordering::Equal))
                },
                BinaryOperator::Greater => ordering == Some(Ordering::Greater),
                BinaryOperator::GreaterEqual => {
                    matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
                },
                _ => return Err(operand_type_error(op, left, right, span)),
            }
        },
    };

    Ok(Value::Boolean(result))
}

/// Orders two values.
///
/// The outer `Option` is `None` when the kinds cannot be ordered at all. The
/// inner one is `None` for unordered floats (a NaN operand), which makes every
/// relational operator false.
fn compare(left: &Value, right: &Value) -> Option<Option<Ordering>> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(Some(a.cmp(b))),
        (Value::Str(a), Value::Str(b)) => Some(Some(a.cmp(b))),
        _ if left.is_numeric() && right.is_numeric() => {
            Some(as_f64(left).partial_cmp(&as_f64(right)))
        },
        _ => None,
    }
}

fn as_f64(value: &Value) -> f64 {
    match value {
        Value::Integer(i) => i64_to_f64(*i),
        Value::Float(f) => *f,
        _ => f64::NAN,
    }
}
