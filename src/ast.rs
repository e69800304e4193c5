use std::rc::Rc;

use crate::interpreter::lexer::{Span, Token};

/// Represents a literal value in the language.
///
/// `LiteralValue` covers all raw, constant values that can appear directly in
/// source code: numbers, booleans, strings and `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Float(f64),
    /// A boolean literal value: `true` or `false`.
    Boolean(bool),
    /// A string literal, holding the raw text between the quotes.
    Str(String),
    /// The `null` literal.
    Null,
}

/// A node of the abstract syntax tree.
///
/// `Node` covers every construct of the language, expressions and statements
/// alike. Each variant keeps the token it was parsed from so later phases can
/// report errors at the right place. Nodes own their children, so a parsed
/// program is a strict tree; the only sharing is the [`FunctionDef`] behind
/// `Node::Function`, which the runtime's function table points at once the
/// definition has executed.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A literal value (number, string, boolean or null).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Originating token.
        token: Token,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name:  String,
        /// Originating token.
        token: Token,
    },
    /// Assignment of a value to a variable; evaluates to the assigned value.
    Assign {
        /// Name of the assigned variable.
        name:  String,
        /// The assigned expression.
        value: Box<Self>,
        /// The `=` token.
        token: Token,
    },
    /// A unary operation (negation, logical not, bitwise not or a cast).
    UnaryOp {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// The operator token.
        token:   Token,
    },
    /// A binary operation (arithmetic, bitwise, comparison or logical).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// The operator token.
        token: Token,
    },
    /// `print <expr>`
    Print {
        /// The printed expression.
        expr:  Box<Self>,
        /// The `print` token.
        token: Token,
    },
    /// A sequence of statements; the program root is a block as well.
    Block {
        /// Statements inside the block.
        statements: Vec<Self>,
        /// The opening token (`{`, a body keyword, or the first token of the
        /// program).
        token:      Token,
    },
    /// `if <condition> <then> [else <else>] end`
    If {
        /// The condition expression.
        condition:   Box<Self>,
        /// Block run when the condition is truthy.
        then_branch: Box<Self>,
        /// Block run otherwise, if present.
        else_branch: Option<Box<Self>>,
        /// The `if` token.
        token:       Token,
    },
    /// `while <condition> <body> end`
    While {
        /// The loop condition, evaluated before every iteration.
        condition: Box<Self>,
        /// The loop body.
        body:      Box<Self>,
        /// The `while` token.
        token:     Token,
    },
    /// `for <var> in [<start>, <end>] <body> end`, an inclusive integer range.
    For {
        /// The loop variable name.
        var:   String,
        /// The first value of the range.
        start: Box<Self>,
        /// The last value of the range.
        end:   Box<Self>,
        /// The loop body.
        body:  Box<Self>,
        /// The `for` token.
        token: Token,
    },
    /// A function definition statement.
    Function(Rc<FunctionDef>),
    /// `return [<expr>]`
    Return {
        /// The returned expression; `None` returns `null`.
        value: Option<Box<Self>>,
        /// The `return` token.
        token: Token,
    },
    /// An expression evaluated as a statement.
    Expression {
        /// The expression to evaluate.
        expr:  Box<Self>,
        /// The first token of the expression.
        token: Token,
    },
    /// A call `callee(arguments...)`.
    Call {
        /// The called expression; must name a function at runtime.
        callee:    Box<Self>,
        /// Arguments, evaluated left to right.
        arguments: Vec<Self>,
        /// The `(` token.
        token:     Token,
    },
}

impl Node {
    /// Gets the originating token of `self`.
    /// ## Example
    /// ```
    /// use kestrel::{
    ///     ast::Node,
    ///     interpreter::lexer::{Token, TokenKind},
    /// };
    ///
    /// let token = Token::new(TokenKind::Identifier, "x", 5, 5);
    /// let node = Node::Variable { name:  "x".to_string(),
    ///                             token: token.clone(), };
    ///
    /// assert_eq!(node.token(), &token);
    /// ```
    #[must_use]
    pub fn token(&self) -> &Token {
        match self {
            Self::Literal { token, .. }
            | Self::Variable { token, .. }
            | Self::Assign { token, .. }
            | Self::UnaryOp { token, .. }
            | Self::BinaryOp { token, .. }
            | Self::Print { token, .. }
            | Self::Block { token, .. }
            | Self::If { token, .. }
            | Self::While { token, .. }
            | Self::For { token, .. }
            | Self::Return { token, .. }
            | Self::Expression { token, .. }
            | Self::Call { token, .. } => token,
            Self::Function(def) => &def.token,
        }
    }

    /// Gets the source span of the originating token.
    #[must_use]
    pub fn span(&self) -> Span {
        self.token().span()
    }

    /// Dispatches to the visitor handler for this node's variant.
    ///
    /// This is the single place that knows how variants map onto
    /// [`Visitor`] methods. The handler receives the variant's fields and
    /// decides itself whether and in which order to visit the children.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Literal { value, token } => visitor.visit_literal(value, token),
            Self::Variable { name, token } => visitor.visit_variable(name, token),
            Self::Assign { name, value, token } => visitor.visit_assign(name, value, token),
            Self::UnaryOp { op, operand, token } => visitor.visit_unary(*op, operand, token),
            Self::BinaryOp { left,
                             op,
                             right,
                             token, } => visitor.visit_binary(left, *op, right, token),
            Self::Print { expr, token } => visitor.visit_print(expr, token),
            Self::Block { statements, token } => visitor.visit_block(statements, token),
            Self::If { condition,
                       then_branch,
                       else_branch,
                       token, } => {
                visitor.visit_if(condition, then_branch, else_branch.as_deref(), token)
            },
            Self::While { condition, body, token } => visitor.visit_while(condition, body, token),
            Self::For { var,
                        start,
                        end,
                        body,
                        token, } => visitor.visit_for(var, start, end, body, token),
            Self::Function(def) => visitor.visit_function(def),
            Self::Return { value, token } => visitor.visit_return(value.as_deref(), token),
            Self::Expression { expr, token } => visitor.visit_expression(expr, token),
            Self::Call { callee,
                         arguments,
                         token, } => visitor.visit_call(callee, arguments, token),
        }
    }
}

/// An operation over every [`Node`] variant.
///
/// There is one required handler per variant and no fallback, so adding a
/// variant to [`Node`] fails to compile until every visitor handles it. Use
/// [`Node::accept`] to dispatch.
pub trait Visitor {
    /// What a visit produces.
    type Output;

    /// Handles [`Node::Literal`].
    fn visit_literal(&mut self, value: &LiteralValue, token: &Token) -> Self::Output;
    /// Handles [`Node::Variable`].
    fn visit_variable(&mut self, name: &str, token: &Token) -> Self::Output;
    /// Handles [`Node::Assign`].
    fn visit_assign(&mut self, name: &str, value: &Node, token: &Token) -> Self::Output;
    /// Handles [`Node::UnaryOp`].
    fn visit_unary(&mut self, op: UnaryOperator, operand: &Node, token: &Token) -> Self::Output;
    /// Handles [`Node::BinaryOp`].
    fn visit_binary(&mut self,
                    left: &Node,
                    op: BinaryOperator,
                    right: &Node,
                    token: &Token)
                    -> Self::Output;
    /// Handles [`Node::Print`].
    fn visit_print(&mut self, expr: &Node, token: &Token) -> Self::Output;
    /// Handles [`Node::Block`].
    fn visit_block(&mut self, statements: &[Node], token: &Token) -> Self::Output;
    /// Handles [`Node::If`].
    fn visit_if(&mut self,
                condition: &Node,
                then_branch: &Node,
                else_branch: Option<&Node>,
                token: &Token)
                -> Self::Output;
    /// Handles [`Node::While`].
    fn visit_while(&mut self, condition: &Node, body: &Node, token: &Token) -> Self::Output;
    /// Handles [`Node::For`].
    fn visit_for(&mut self,
                 var: &str,
                 start: &Node,
                 end: &Node,
                 body: &Node,
                 token: &Token)
                 -> Self::Output;
    /// Handles [`Node::Function`].
    fn visit_function(&mut self, def: &Rc<FunctionDef>) -> Self::Output;
    /// Handles [`Node::Return`].
    fn visit_return(&mut self, value: Option<&Node>, token: &Token) -> Self::Output;
    /// Handles [`Node::Expression`].
    fn visit_expression(&mut self, expr: &Node, token: &Token) -> Self::Output;
    /// Handles [`Node::Call`].
    fn visit_call(&mut self, callee: &Node, arguments: &[Node], token: &Token) -> Self::Output;
}

/// Represents a user-defined function definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   String,
    /// The parameter names, in declaration order.
    pub params: Vec<String>,
    /// The body block executed when the function is called.
    pub body:   Node,
    /// The `function` token.
    pub token:  Token,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// Left shift (`<<`)
    Shl,
    /// Arithmetic right shift (`>>`)
    Shr,
    /// Bitwise and (`&`)
    BitAnd,
    /// Bitwise or (`|`)
    BitOr,
    /// Bitwise exclusive or (`^`)
    BitXor,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Short-circuit logical and (`&&`)
    And,
    /// Short-circuit logical or (`||`)
    Or,
}

/// Represents a unary operator.
///
/// Casts are unary operators too: `int x` and `float x` convert their operand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
    /// Bitwise complement (e.g. `~x`).
    BitNot,
    /// Conversion to integer (e.g. `int(x)`).
    IntCast,
    /// Conversion to float (e.g. `float(x)`).
    FloatCast,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, Less, LessEqual,
            Mod, Mul, NotEqual, Or, Pow, Shl, Shr, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "**",
            Shl => "<<",
            Shr => ">>",
            BitAnd => "&",
            BitOr => "|",
            BitXor => "^",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::IntCast => "int",
            Self::FloatCast => "float",
        };
        write!(f, "{operator}")
    }
}
