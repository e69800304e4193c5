use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, FunctionDef, LiteralValue, Node, UnaryOperator, Visitor},
    error::RuntimeError,
    interpreter::{
        lexer::Token,
        runtime::{FrameId, Runtime},
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
///
/// `Return` unwinds through enclosing blocks and loops until the function
/// call that is executing them turns it back into a plain value. It is a
/// control signal, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Completed normally with this value.
    Normal(Value),
    /// A `return` statement executed with this value.
    Return(Value),
}

impl Flow {
    /// The value carried by either kind of completion.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Normal(value) | Self::Return(value) => value,
        }
    }
}

/// Walks a syntax tree and executes it against a [`Runtime`].
///
/// The evaluator keeps the frame it currently executes in, the depth of
/// nested calls and nodes, and the number of steps taken. Everything that
/// outlives one evaluation lives in the runtime.
pub struct Evaluator<'r> {
    pub(in crate::interpreter::evaluator) runtime:    &'r mut Runtime,
    pub(in crate::interpreter::evaluator) frame:      FrameId,
    pub(in crate::interpreter::evaluator) call_depth: usize,
    pub(in crate::interpreter::evaluator) nesting:    usize,
    pub(in crate::interpreter::evaluator) steps:      u64,
}

impl<'r> Evaluator<'r> {
    /// Creates an evaluator that executes in the runtime's root frame.
    pub fn new(runtime: &'r mut Runtime) -> Self {
        Self { runtime,
               frame: FrameId::ROOT,
               call_depth: 0,
               nesting: 0,
               steps: 0 }
    }

    /// Evaluates a node and returns its value.
    ///
    /// # Errors
    /// Returns the first `RuntimeError` raised while evaluating `node`.
    pub fn eval(&mut self, node: &Node) -> EvalResult<Value> {
        self.exec(node).map(Flow::into_value)
    }

    /// Evaluates a node and reports how it finished.
    ///
    /// # Errors
    /// - `NestingTooDeep` if `node` sits deeper than the configured
    ///   `max_nesting_depth` within the current function body.
    /// - The first `RuntimeError` raised while evaluating `node`.
    pub fn exec(&mut self, node: &Node) -> EvalResult<Flow> {
        let limit = self.runtime.config().max_nesting_depth;
        if self.nesting >= limit {
            return Err(RuntimeError::NestingTooDeep { limit,
                                                      span: node.token().span() });
        }

        self.nesting += 1;
        let flow = node.accept(self);
        self.nesting -= 1;
        flow
    }
}

/// Evaluates a syntax tree.
///
/// This is the main entry point for evaluation. Top-level statements run in
/// the runtime's root frame; `print` output is appended to the runtime's
/// output log and function definitions land in its function table, both of
/// which outlive this call.
///
/// # Parameters
/// - `node`: The tree to evaluate, usually the block returned by
///   [`parse`](crate::interpreter::parser::parse).
/// - `runtime`: The state to evaluate against.
///
/// # Returns
/// The value of the last top-level statement, or `null` for an empty
/// program.
///
/// # Errors
/// Returns the first `RuntimeError`; evaluation stops there.
///
/// # Example
/// ```
/// use kestrel::interpreter::{
///     evaluator::core::evaluate, lexer::tokenize, parser::parse, runtime::Runtime,
///     value::core::Value,
/// };
///
/// let tokens = tokenize("function sq(x) return x * x; end print sq(7); sq(3);").unwrap();
/// let (program, diagnostics) = parse(&tokens);
/// assert!(diagnostics.is_empty());
///
/// let mut runtime = Runtime::new();
/// assert_eq!(evaluate(&program, &mut runtime), Ok(Value::Integer(9)));
/// assert_eq!(runtime.output(), ["49"]);
/// ```
pub fn evaluate(node: &Node, runtime: &mut Runtime) -> EvalResult<Value> {
    Evaluator::new(runtime).eval(node)
}

impl Visitor for Evaluator<'_> {
    type Output = EvalResult<Flow>;

    fn visit_literal(&mut self, value: &LiteralValue, _token: &Token) -> Self::Output {
        Ok(Flow::Normal(Value::from(value)))
    }

    fn visit_variable(&mut self, name: &str, token: &Token) -> Self::Output {
        self.runtime
            .lookup(self.frame, name)
            .cloned()
            .map(Flow::Normal)
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           span: token.span(), })
    }

    fn visit_assign(&mut self, name: &str, value: &Node, _token: &Token) -> Self::Output {
        let value = self.eval(value)?;
        self.runtime.assign(self.frame, name, value.clone());
        Ok(Flow::Normal(value))
    }

    fn visit_unary(&mut self, op: UnaryOperator, operand: &Node, token: &Token) -> Self::Output {
        self.eval_unary_op(op, operand, token).map(Flow::Normal)
    }

    fn visit_binary(&mut self,
                    left: &Node,
                    op: BinaryOperator,
                    right: &Node,
                    token: &Token)
                    -> Self::Output {
        self.eval_binary_op(left, op, right, token).map(Flow::Normal)
    }

    fn visit_print(&mut self, expr: &Node, _token: &Token) -> Self::Output {
        let value = self.eval(expr)?;
        self.runtime.emit(value.to_string());
        Ok(Flow::Normal(Value::Null))
    }

    fn visit_block(&mut self, statements: &[Node], _token: &Token) -> Self::Output {
        self.eval_block(statements)
    }

    fn visit_if(&mut self,
                condition: &Node,
                then_branch: &Node,
                else_branch: Option<&Node>,
                _token: &Token)
                -> Self::Output {
        self.eval_if(condition, then_branch, else_branch)
    }

    fn visit_while(&mut self, condition: &Node, body: &Node, token: &Token) -> Self::Output {
        self.eval_while(condition, body, token)
    }

    fn visit_for(&mut self,
                 var: &str,
                 start: &Node,
                 end: &Node,
                 body: &Node,
                 token: &Token)
                 -> Self::Output {
        self.eval_for(var, start, end, body, token)
    }

    fn visit_function(&mut self, def: &Rc<FunctionDef>) -> Self::Output {
        self.runtime.define_function(Rc::clone(def));
        Ok(Flow::Normal(Value::Null))
    }

    fn visit_return(&mut self, value: Option<&Node>, token: &Token) -> Self::Output {
        self.eval_return(value, token)
    }

    fn visit_expression(&mut self, expr: &Node, _token: &Token) -> Self::Output {
        self.eval(expr).map(Flow::Normal)
    }

    fn visit_call(&mut self, callee: &Node, arguments: &[Node], token: &Token) -> Self::Output {
        self.eval_call(callee, arguments, token).map(Flow::Normal)
    }
}
