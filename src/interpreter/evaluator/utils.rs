use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        lexer::Span,
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Counts one step against the configured budget.
    ///
    /// Every loop iteration and every function call is a step. Without a
    /// `max_steps` limit this only increments the counter.
    ///
    /// # Errors
    /// `StepLimitExceeded` once the budget is used up.
    pub(in crate::interpreter::evaluator) fn tick(&mut self, span: Span) -> EvalResult<()> {
        self.steps += 1;
        match self.runtime.config().max_steps {
            Some(limit) if self.steps > limit => {
                Err(RuntimeError::StepLimitExceeded { limit,
                                                      span })
            },
            _ => Ok(()),
        }
    }
}

/// Builds the type error for an operator applied to unsupported operands.
pub(in crate::interpreter::evaluator) fn operand_type_error(op: BinaryOperator,
                                                            left: &Value,
                                                            right: &Value,
                                                            span: Span)
                                                            -> RuntimeError {
    RuntimeError::TypeError { details: format!("unsupported operand types for {op}: {} and {}",
                                               left.type_name(),
                                               right.type_name()),
                              span }
}
