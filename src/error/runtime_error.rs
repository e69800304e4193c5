use thiserror::Error;

use crate::interpreter::lexer::Span;

/// Represents all errors that can occur during evaluation.
///
/// Every variant records the span of the syntax node whose evaluation failed.
/// A `return` unwinding out of a function is not an error and never appears
/// here, except when it is issued outside any function.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Tried to read an undefined variable.
    #[error("Error at {span}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// Source span of the reference.
        span: Span,
    },
    /// Called a function that was never defined.
    #[error("Error at {span}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// Source span of the call.
        span: Span,
    },
    /// The callee of a call is not a plain function name.
    #[error("Error at {span}: Expression is not callable.")]
    NotCallable {
        /// Source span of the call.
        span: Span,
    },
    /// A call passed the wrong number of arguments.
    #[error("Error at {span}: Function '{name}' expects {expected} argument(s), but {found} were given.")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
        /// Source span of the call.
        span:     Span,
    },
    /// An operand had an unexpected or incompatible type.
    #[error("Error at {span}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// Source span of the operation.
        span:    Span,
    },
    /// Integer or float division or remainder by zero.
    #[error("Error at {span}: Division by zero.")]
    DivisionByZero {
        /// Source span of the operation.
        span: Span,
    },
    /// A shift by a negative amount.
    #[error("Error at {span}: Cannot shift by negative amount {amount}.")]
    NegativeShift {
        /// The requested shift amount.
        amount: i64,
        /// Source span of the operation.
        span:   Span,
    },
    /// Integer arithmetic left the 64-bit range.
    #[error("Error at {span}: Integer overflow while trying to compute result.")]
    Overflow {
        /// Source span of the operation.
        span: Span,
    },
    /// An `int` or `float` cast could not convert its operand.
    #[error("Error at {span}: Invalid cast: {details}.")]
    InvalidCast {
        /// Details describing why the conversion failed.
        details: String,
        /// Source span of the cast.
        span:    Span,
    },
    /// The bounds of a `for` loop are not integers.
    #[error("Error at {span}: Invalid loop bounds: {details}.")]
    InvalidLoopBounds {
        /// Details describing why the bounds are invalid.
        details: String,
        /// Source span of the loop.
        span:    Span,
    },
    /// `return` executed while no function call is active.
    #[error("Error at {span}: 'return' outside of a function.")]
    ReturnOutsideFunction {
        /// Source span of the return statement.
        span: Span,
    },
    /// Function calls nested deeper than the configured limit.
    #[error("Error at {span}: Maximum call depth of {limit} exceeded.")]
    RecursionLimit {
        /// The configured maximum depth.
        limit: usize,
        /// Source span of the call that exceeded the limit.
        span:  Span,
    },
    /// Nodes nested deeper than the configured limit.
    #[error("Error at {span}: Maximum nesting depth of {limit} exceeded.")]
    NestingTooDeep {
        /// The configured maximum depth.
        limit: usize,
        /// Source span of the node that exceeded the limit.
        span:  Span,
    },
    /// The program ran more loop iterations and calls than the configured
    /// budget allows.
    #[error("Error at {span}: Step limit of {limit} exceeded.")]
    StepLimitExceeded {
        /// The configured step budget.
        limit: u64,
        /// Source span of the construct that ran out of budget.
        span:  Span,
    },
}

impl RuntimeError {
    /// Source span the error refers to.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnknownVariable { span, .. }
            | Self::UnknownFunction { span, .. }
            | Self::NotCallable { span }
            | Self::ArgumentCountMismatch { span, .. }
            | Self::TypeError { span, .. }
            | Self::DivisionByZero { span }
            | Self::NegativeShift { span, .. }
            | Self::Overflow { span }
            | Self::InvalidCast { span, .. }
            | Self::InvalidLoopBounds { span, .. }
            | Self::ReturnOutsideFunction { span }
            | Self::RecursionLimit { span, .. }
            | Self::NestingTooDeep { span, .. }
            | Self::StepLimitExceeded { span, .. } => *span,
        }
    }
}
