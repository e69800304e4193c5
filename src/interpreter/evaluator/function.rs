use tracing::trace;

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
    /// Evaluates a call to a user-defined function.
    ///
    /// The callee must be a plain name. Arguments are evaluated left to right
    /// in the caller's frame. The body then runs in a fresh frame whose
    /// enclosing frame is the root, so a function sees its parameters, its own
    /// locals and the globals, but never the caller's locals. The frame is
    /// removed again on every exit path, errors included. Node nesting is
    /// counted afresh inside the body.
    ///
    /// # Parameters
    /// - `callee`: The called expression.
    /// - `arguments`: Argument expressions.
    /// - `token`: The call's `(` token, for error reporting.
    ///
    /// # Returns
    /// The value given to `return`, or `null` if the body finishes without
    /// returning.
    ///
    /// # Errors
    /// - `NotCallable` if the callee is not a name.
    /// - `UnknownFunction` if no function of that name has been defined.
    /// - `ArgumentCountMismatch` if the number of arguments differs from the
    ///   number of parameters.
    /// - `RecursionLimit` / `StepLimitExceeded` when a configured limit is
    ///   reached.
    pub(in crate::interpreter::evaluator) fn eval_call(&mut self,
                                                       callee: &Node,
                                                       arguments: &[Node],
                                                       token: &Token)
                                                       -> EvalResult<Value> {
        let span = token.span();

        let Node::Variable { name, .. } = callee else {
            return Err(RuntimeError::NotCallable { span });
        };

        let def = self.runtime
                      .function(name)
                      .ok_or_else(|| RuntimeError::UnknownFunction { name: name.clone(),
                                                                     span })?;

        if arguments.len() != def.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.clone(),
                                                             expected: def.params.len(),
                                                             found: arguments.len(),
                                                             span });
        }

        let values = arguments.iter()
                              .map(|argument| self.eval(argument))
                              .collect::<EvalResult<Vec<_>>>()?;

        let limit = self.runtime.config().max_call_depth;
        if self.call_depth >= limit {
            return Err(RuntimeError::RecursionLimit { limit,
                                                      span });
        }
        self.tick(span)?;

        trace!(function = %name, depth = self.call_depth + 1, "calling function");

        let root = self.runtime.root_of(self.frame);
        let frame = self.runtime.push_frame(root);
        for (param, value) in def.params.iter().zip(values) {
            self.runtime.define(frame, param, value);
        }

        let caller = std::mem::replace(&mut self.frame, frame);
        let nesting = std::mem::take(&mut self.nesting);
        self.call_depth += 1;
        let result = self.exec(&def.body);
        self.call_depth -= 1;
        self.nesting = nesting;
        self.frame = caller;
        self.runtime.pop_frame(frame);

        match result? {
            Flow::Normal(_) => Ok(Value::Null),
            Flow::Return(value) => Ok(value),
        }
    }

    /// Evaluates a `return` statement.
    ///
    /// The value (or `null`) travels up as [`Flow::Return`] until the
    /// enclosing call picks it up.
    ///
    /// # Errors
    /// `ReturnOutsideFunction` when no call is active.
    pub(in crate::interpreter::evaluator) fn eval_return(&mut self,
                                                         value: Option<&Node>,
                                                         token: &Token)
                                                         -> EvalResult<Flow> {
        if self.call_depth == 0 {
            return Err(RuntimeError::ReturnOutsideFunction { span: token.span() });
        }

        let value = match value {
            Some(expr) => self.eval(expr)?,
            None => Value::Null,
        };
        Ok(Flow::Return(value))
    }
}
