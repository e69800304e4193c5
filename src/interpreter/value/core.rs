use std::rc::Rc;

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::Span},
    util::num::{format_float, i64_to_f64},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models every value a program can compute, assign, pass to a
/// function, return or print. Values are immutable; strings are shared
/// behind an `Rc` so copying a value never copies text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A boolean value (`true` or `false`).
    Boolean(bool),
    /// An immutable string.
    Str(Rc<str>),
    /// The absence of a value. Produced by statements, by functions that do
    /// not return a value and by the `null` literal.
    Null,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(i) => (*i).into(),
            LiteralValue::Float(f) => (*f).into(),
            LiteralValue::Boolean(b) => (*b).into(),
            LiteralValue::Str(s) => s.as_str().into(),
            LiteralValue::Null => Self::Null,
        }
    }
}

impl Value {
    /// Returns the truthiness of the value.
    ///
    /// Only `null` and `false` are falsy; every number (including `0`) and
    /// every string (including `""`) is truthy.
    ///
    /// # Example
    /// ```
    /// use kestrel::interpreter::value::core::Value;
    ///
    /// assert!(Value::Integer(0).is_truthy());
    /// assert!(Value::from("").is_truthy());
    /// assert!(!Value::Null.is_truthy());
    /// assert!(!Value::Boolean(false).is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Boolean(false))
    }

    /// Name of the value's type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "int",
            Self::Float(_) => "float",
            Self::Boolean(_) => "bool",
            Self::Str(_) => "string",
            Self::Null => "null",
        }
    }

    /// Returns `true` for integers and floats.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Converts a numeric value to `f64`, promoting integers.
    ///
    /// # Parameters
    /// - `span`: Source span for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is an integer or a float.
    /// - `Err(RuntimeError::TypeError)`: Otherwise.
    pub fn as_float(&self, span: Span) -> EvalResult<f64> {
        match self {
            Self::Float(f) => Ok(*f),
            Self::Integer(i) => Ok(i64_to_f64(*i)),
            _ => Err(RuntimeError::TypeError { details: format!("expected a number, found {}",
                                                                self.type_name()),
                                               span }),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{}", format_float(*x)),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Null => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(Value::Integer(-7).to_string(), "-7");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(3.5).to_string(), "3.5");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::from("a \"b\"").to_string(), "a \"b\"");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn floats_promote_integers() {
        let span = Span::default();
        assert_eq!(Value::Integer(2).as_float(span), Ok(2.0));
        assert!(Value::Null.as_float(span).is_err());
    }
}
