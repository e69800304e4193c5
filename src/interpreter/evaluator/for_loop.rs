use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, Flow},
        lexer::Token,
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a `while` loop.
    ///
    /// The condition is evaluated before every iteration and the loop stops
    /// as soon as it is falsy. Each iteration counts as one step. The loop
    /// itself yields `null`; a `return` in the body ends it early and is
    /// passed on.
    pub(in crate::interpreter::evaluator) fn eval_while(&mut self,
                                                        condition: &Node,
                                                        body: &Node,
                                                        token: &Token)
                                                        -> EvalResult<Flow> {
        while self.eval(condition)?.is_truthy() {
            self.tick(token.span())?;
            if let flow @ Flow::Return(_) = self.exec(body)? {
                return Ok(flow);
            }
        }

        Ok(Flow::Normal(Value::Null))
    }

    /// Evaluates a ranged `for` loop.
    ///
    /// Both bounds are evaluated once, before the first iteration, and must
    /// be integers. The loop variable is bound in the current frame to every
    /// value from `start` to `end` inclusive; a range with `start > end` runs
    /// zero times. Each iteration counts as one step.
    ///
    /// The last evaluated body value is returned. If the loop executes zero
    /// times, the result is `null`.
    ///
    /// # Parameters
    /// - `var`: Name of the loop variable.
    /// - `start`: Expression for the first value.
    /// - `end`: Expression for the last value.
    /// - `body`: The loop body.
    /// - `token`: The `for` token, for error reporting.
    ///
    /// # Errors
    /// - `InvalidLoopBounds` if a bound is not an integer.
    /// - Any error raised by the bounds or the body.
    ///
    /// # Example
    /// ```
    /// use kestrel::{interpreter::runtime::Runtime, run};
    ///
    /// let mut runtime = Runtime::new();
    /// let value = run("sum = 0; for i in [1, 10] sum = sum + i; end", &mut runtime).unwrap();
    /// assert_eq!(value.to_string(), "55");
    /// assert_eq!(runtime.variable("i").map(ToString::to_string), Some("10".to_string()));
    /// ```
    pub(in crate::interpreter::evaluator) fn eval_for(&mut self,
                                                      var: &str,
                                                      start: &Node,
                                                      end: &Node,
                                                      body: &Node,
                                                      token: &Token)
                                                      -> EvalResult<Flow> {
        let start = self.eval(start)?;
        let end = self.eval(end)?;

        let (Value::Integer(first), Value::Integer(last)) = (&start, &end) else {
            return Err(RuntimeError::InvalidLoopBounds { details: format!("bounds must be ints, found {} and {}",
                                                                          start.type_name(),
                                                                          end.type_name()),
                                                         span:    token.span(), });
        };

        let mut result = Value::Null;
        for i in *first..=*last {
            self.tick(token.span())?;
            self.runtime.define(self.frame, var, Value::Integer(i));
            match self.exec(body)? {
                Flow::Normal(value) => result = value,
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }

        Ok(Flow::Normal(result))
    }
}
