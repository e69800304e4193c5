use crate::{
    ast::{BinaryOperator, Node},
    interpreter::{
        evaluator::{
            binary::{
                arithmetic::eval_arithmetic, bitwise::eval_bitwise, comparison::eval_comparison,
                power::eval_power,
            },
            core::{EvalResult, Evaluator},
        },
        lexer::{Span, Token},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a binary operation on two expressions.
    ///
    /// `&&` and `||` decide themselves whether to evaluate their right side.
    /// For every other operator both operands are evaluated, left first, and
    /// handed to [`eval_binary`].
    pub(in crate::interpreter::evaluator) fn eval_binary_op(&mut self,
                                                            left: &Node,
                                                            op: BinaryOperator,
                                                            right: &Node,
                                                            token: &Token)
                                                            -> EvalResult<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logic(left, op, right);
        }

        let left = self.eval(left)?;
        let right = self.eval(right)?;
        eval_binary(op, &left, &right, token.span())
    }
}

/// Evaluates a binary operation between two values.
///
/// This function routes the operation to specialized handlers depending on
/// the operator: arithmetic, exponentiation, bitwise operations and
/// comparisons. The short-circuit operators are given the already evaluated
/// right side, which makes them plain selections here.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `span`: Source span for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing the evaluated result.
///
/// # Example
/// ```
/// use kestrel::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::core::eval_binary, lexer::Span, value::core::Value},
/// };
///
/// let span = Span::default();
/// let result = eval_binary(BinaryOperator::Add, &Value::Integer(1), &Value::Float(2.0), span);
/// assert_eq!(result, Ok(Value::Float(3.0)));
///
/// let result = eval_binary(BinaryOperator::Div, &Value::Integer(7), &Value::Integer(2), span);
/// assert_eq!(result, Ok(Value::Integer(3)));
/// ```
pub fn eval_binary(op: BinaryOperator,
                   left: &Value,
                   right: &Value,
                   span: Span)
                   -> EvalResult<Value> {
    use BinaryOperator::{
        Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod,
        Mul, NotEqual, Or, Pow, Shl, Shr, Sub,
    };

    match op {
        Add | Sub | Mul | Div | Mod => eval_arithmetic(op, left, right, span),
        Pow => eval_power(left, right, span),
        BitAnd | BitOr | BitXor | Shl | Shr => eval_bitwise(op, left, right, span),
        Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
            eval_comparison(op, left, right, span)
        },
        And => Ok(if left.is_truthy() { right.clone() } else { left.clone() }),
        Or => Ok(if left.is_truthy() { left.clone() } else { right.clone() }),
    }
}
