use crate::{
    ast::Node,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, Flow},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a sequence of statements in order.
    ///
    /// Blocks do not open a scope; their statements run in the current frame.
    /// The block's value is the value of its last statement, or `null` when it
    /// is empty. A `return` inside stops the block and is passed on.
    pub(in crate::interpreter::evaluator) fn eval_block(&mut self,
                                                        statements: &[Node])
                                                        -> EvalResult<Flow> {
        let mut last = Value::Null;

        for statement in statements {
            match self.exec(statement)? {
                Flow::Normal(value) => last = value,
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }

        Ok(Flow::Normal(last))
    }

    /// Evaluates an `if` statement.
    ///
    /// The condition is evaluated once. A truthy condition runs the then
    /// branch; otherwise the else branch runs if present, and the statement
    /// yields `null` if not.
    pub(in crate::interpreter::evaluator) fn eval_if(&mut self,
                                                     condition: &Node,
                                                     then_branch: &Node,
                                                     else_branch: Option<&Node>)
                                                     -> EvalResult<Flow> {
        if self.eval(condition)?.is_truthy() {
            self.exec(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.exec(else_branch)
        } else {
            Ok(Flow::Normal(Value::Null))
        }
    }
}
