use crate::{
    ast::{BinaryOperator, Node},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates `&&` or `||` with short-circuiting.
    ///
    /// The result is one of the operands themselves, not a boolean: `&&`
    /// yields the left side if it is falsy and the right side otherwise, `||`
    /// yields the left side if it is truthy and the right side otherwise. The
    /// right side is only evaluated when it becomes the result.
    ///
    /// # Example
    /// ```
    /// use kestrel::{interpreter::runtime::Runtime, run, Value};
    ///
    /// let mut runtime = Runtime::new();
    /// assert_eq!(run("0 || 5;", &mut runtime), Ok(Value::Integer(0)));
    /// assert_eq!(run("null || \"fallback\";", &mut runtime), Ok(Value::from("fallback")));
    /// assert_eq!(run("false && 1 / 0;", &mut runtime), Ok(Value::Boolean(false)));
    /// ```
    pub(in crate::interpreter::evaluator) fn eval_logic(&mut self,
                                                        left: &Node,
                                                        op: BinaryOperator,
                                                        right: &Node)
                                                        -> EvalResult<Value> {
        let left = self.eval(left)?;
        let decided = match op {
            BinaryOperator::And => !left.is_truthy(),
            _ => left.is_truthy(),
        };

        if decided { Ok(left) } else { self.eval(right) }
    }
}
