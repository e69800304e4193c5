use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::Span, value::core::Value},
    util::num::{f64_to_i64_truncated, i64_to_f64},
};

impl Value {
    /// Converts the value to an integer, as `int(x)` does.
    ///
    /// - integers are returned unchanged,
    /// - floats are truncated toward zero,
    /// - booleans become `1` or `0`,
    /// - strings are parsed as decimal integers after trimming whitespace,
    /// - `null` cannot be converted.
    ///
    /// # Parameters
    /// - `span`: Source span for error reporting.
    ///
    /// # Returns
    /// - `Ok(Value::Integer)`: The converted value.
    /// - `Err(RuntimeError::InvalidCast)`: For `null`, unparsable strings,
    ///   and floats that are NaN, infinite or outside the `i64` range.
    ///
    /// # Example
    /// ```
    /// use kestrel::interpreter::{lexer::Span, value::core::Value};
    ///
    /// let span = Span::default();
    /// assert_eq!(Value::Float(-2.7).to_int(span).unwrap(), Value::Integer(-2));
    /// assert_eq!(Value::from(" 12 ").to_int(span).unwrap(), Value::Integer(12));
    /// assert!(Value::Null.to_int(span).is_err());
    /// ```
    pub fn to_int(&self, span: Span) -> EvalResult<Self> {
        let value = match self {
            Self::Integer(i) => *i,
            Self::Float(f) => {
                f64_to_i64_truncated(*f, ()).map_err(|()| {
                                                cast_error(format!("{self} is out of range for an int"),
                                                           span)
                                            })?
            },
            Self::Boolean(b) => i64::from(*b),
            Self::Str(s) => {
                s.trim()
                 .parse()
                 .map_err(|_| cast_error(format!("cannot parse \"{s}\" as an int"), span))?
            },
            Self::Null => return Err(cast_error("cannot convert null to an int".into(), span)),
        };
        Ok(Self::Integer(value))
    }

    /// Converts the value to a float, as `float(x)` does.
    ///
    /// - integers are promoted,
    /// - floats are returned unchanged,
    /// - booleans become `1.0` or `0.0`,
    /// - strings are parsed after trimming whitespace,
    /// - `null` cannot be converted.
    ///
    /// # Parameters
    /// - `span`: Source span for error reporting.
    ///
    /// # Returns
    /// - `Ok(Value::Float)`: The converted value.
    /// - `Err(RuntimeError::InvalidCast)`: For `null` and unparsable strings.
    pub fn to_float(&self, span: Span) -> EvalResult<Self> {
        let value = match self {
            Self::Integer(i) => i64_to_f64(*i),
            Self::Float(f) => *f,
            Self::Boolean(b) => f64::from(u8::from(*b)),
            Self::Str(s) => {
                s.trim()
                 .parse()
                 .map_err(|_| cast_error(format!("cannot parse \"{s}\" as a float"), span))?
            },
            Self::Null => return Err(cast_error("cannot convert null to a float".into(), span)),
        };
        Ok(Self::Float(value))
    }
}

fn cast_error(details: String, span: Span) -> RuntimeError {
    RuntimeError::InvalidCast { details,
                                span }
}
