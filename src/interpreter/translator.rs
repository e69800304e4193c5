use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, FunctionDef, LiteralValue, Node, UnaryOperator, Visitor},
    interpreter::lexer::Token,
    util::num::format_float,
};

/// Renders syntax trees back to source text in a canonical form.
///
/// Every operator application is parenthesised, so the output never depends
/// on precedence or associativity. Statements inside a block are each
/// followed by `;`. Rendering never fails and evaluates nothing.
pub struct Translator;

/// Renders a syntax tree as canonical source text.
///
/// The result lexes and parses back into a tree that behaves like the
/// input. Rendering the re-parsed tree again produces the same text.
///
/// # Parameters
/// - `node`: The tree to render, usually a parsed program.
///
/// # Returns
/// The canonical source text.
///
/// # Example
/// ```
/// use kestrel::interpreter::{lexer::tokenize, parser::parse, translator::render};
///
/// let tokens = tokenize("x = 1 + 2 * 3; if x > 5 print int 2.5; end").unwrap();
/// let (program, _) = parse(&tokens);
///
/// assert_eq!(render(&program),
///            "{(x = (1 + (2 * 3))); if (x > 5) {print(int(2.5));} end;}");
/// ```
#[must_use]
pub fn render(node: &Node) -> String {
    Translator.render_body(node)
}

impl Translator {
    /// Renders the body of a compound statement, or a whole program.
    ///
    /// Bodies print as brace blocks, which parse back as a body holding a
    /// single brace block. That shape is printed like the plain body so a
    /// second round trip reproduces the same text.
    fn render_body(&mut self, body: &Node) -> String {
        match body {
            Node::Block { statements, .. }
                if statements.len() == 1 && matches!(statements[0], Node::Block { .. }) =>
            {
                statements[0].accept(self)
            },
            _ => body.accept(self),
        }
    }
}

/// Quotes a string literal, escaping `\` and `"`.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if matches!(c, '\\' | '"') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

impl Visitor for Translator {
    type Output = String;

    fn visit_literal(&mut self, value: &LiteralValue, _token: &Token) -> Self::Output {
        match value {
            LiteralValue::Integer(i) => i.to_string(),
            LiteralValue::Float(f) => format_float(*f),
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::Str(s) => quote(s),
            LiteralValue::Null => "null".to_string(),
        }
    }

    fn visit_variable(&mut self, name: &str, _token: &Token) -> Self::Output {
        name.to_string()
    }

    fn visit_assign(&mut self, name: &str, value: &Node, _token: &Token) -> Self::Output {
        format!("({name} = {})", value.accept(self))
    }

    fn visit_unary(&mut self, op: UnaryOperator, operand: &Node, _token: &Token) -> Self::Output {
        let operand = operand.accept(self);
        match op {
            UnaryOperator::IntCast | UnaryOperator::FloatCast => format!("{op}({operand})"),
            _ => format!("({op}{operand})"),
        }
    }

    fn visit_binary(&mut self,
                    left: &Node,
                    op: BinaryOperator,
                    right: &Node,
                    _token: &Token)
                    -> Self::Output {
        format!("({} {op} {})", left.accept(self), right.accept(self))
    }

    fn visit_print(&mut self, expr: &Node, _token: &Token) -> Self::Output {
        format!("print({})", expr.accept(self))
    }

    fn visit_block(&mut self, statements: &[Node], _token: &Token) -> Self::Output {
        let statements: Vec<String> = statements.iter()
                                                .map(|statement| {
                                                    format!("{};", statement.accept(self))
                                                })
                                                .collect();
        format!("{{{}}}", statements.join(" "))
    }

    fn visit_if(&mut self,
                condition: &Node,
                then_branch: &Node,
                else_branch: Option<&Node>,
                _token: &Token)
                -> Self::Output {
        let mut text = format!("if {} {}", condition.accept(self), self.render_body(then_branch));
        if let Some(else_branch) = else_branch {
            text.push_str(" else ");
            text.push_str(&self.render_body(else_branch));
        }
        text.push_str(" end");
        text
    }

    fn visit_while(&mut self, condition: &Node, body: &Node, _token: &Token) -> Self::Output {
        format!("while {} {} end", condition.accept(self), self.render_body(body))
    }

    fn visit_for(&mut self,
                 var: &str,
                 start: &Node,
                 end: &Node,
                 body: &Node,
                 _token: &Token)
                 -> Self::Output {
        format!("for {var} in [{}, {}] {} end",
                start.accept(self),
                end.accept(self),
                self.render_body(body))
    }

    fn visit_function(&mut self, def: &Rc<FunctionDef>) -> Self::Output {
        format!("function {}({}) {} end",
                def.name,
                def.params.join(", "),
                self.render_body(&def.body))
    }

    fn visit_return(&mut self, value: Option<&Node>, _token: &Token) -> Self::Output {
        match value {
            Some(value) => format!("return {}", value.accept(self)),
            None => "return".to_string(),
        }
    }

    fn visit_expression(&mut self, expr: &Node, _token: &Token) -> Self::Output {
        expr.accept(self)
    }

    fn visit_call(&mut self, callee: &Node, arguments: &[Node], _token: &Token) -> Self::Output {
        let arguments: Vec<String> = arguments.iter()
                                              .map(|argument| argument.accept(self))
                                              .collect();
        let callee = match callee {
            // `int(x)(y)` would parse as a cast of the call `x(y)`.
            Node::UnaryOp { op: UnaryOperator::IntCast | UnaryOperator::FloatCast,
                            .. } => format!("({})", callee.accept(self)),
            _ => callee.accept(self),
        };
        format!("{callee}({})", arguments.join(", "))
    }
}
