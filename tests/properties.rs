//! Property-based tests for the whole pipeline.
//!
//! 1. **Lexer never panics**: arbitrary text either tokenizes or fails with a
//!    `LexError`; successful output ends with exactly one `Eof`.
//! 2. **Parser never panics**: arbitrary token soup produces a tree plus
//!    diagnostics, and a clean tree renders to text that parses back to the
//!    same rendering.
//! 3. **Evaluation never panics**: well-formed but arbitrary programs finish
//!    with a value or a runtime error under a step budget.
//! 4. **Rendering preserves meaning**: generated expressions evaluate the same
//!    before and after a trip through the translator.

use std::mem::discriminant;

use kestrel::{
    Runtime, RuntimeConfig,
    error::Error,
    interpreter::lexer::{Token, TokenKind},
    parse, render, run, tokenize,
};
use proptest::prelude::*;

/// Fragments that lex cleanly; glued together they are mostly nonsense.
const FRAGMENTS: &[&str] = &[
    "x", "y", "f", "1", "2.5", "0", "\"s\"", "true", "null", "+", "-", "*", "/", "%", "**", "<<",
    ">>", "&", "&&", "|", "||", "^", "~", "!", "=", "==", "!=", "<", ">=", "(", ")", "{", "}", "[",
    "]", ",", ";", "print", "if", "else", "end", "while", "for", "in", "function", "return", "int",
    "float",
];

fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40).prop_map(|parts| parts.join(" "))
}

/// Small programs that always parse.
fn statement() -> impl Strategy<Value = String> {
    let expr = prop_oneof![
        Just("x".to_string()),
        Just("y".to_string()),
        (0i64..20).prop_map(|n| n.to_string()),
        Just("x + y".to_string()),
        Just("x * 2 - y".to_string()),
        Just("x / (y - 3)".to_string()),
        Just("x < y || y == 4".to_string()),
        Just("int \"7\"".to_string()),
        Just("step(x)".to_string()),
    ];

    prop_oneof![
        expr.clone().prop_map(|e| format!("x = {e};")),
        expr.clone().prop_map(|e| format!("y = {e};")),
        expr.clone().prop_map(|e| format!("print {e};")),
        expr.clone().prop_map(|e| format!("while {e} x = x - 1; end")),
        expr.prop_map(|e| format!("if {e} print 1; else y = y + 1; end")),
        (0i64..5, 0i64..5).prop_map(|(a, b)| format!("for i in [{a}, {b}] x = x + i; end")),
    ]
}

fn program() -> impl Strategy<Value = String> {
    prop::collection::vec(statement(), 0..12).prop_map(|statements| {
        format!("x = 1; y = 2; function step(v) return v + 1; end {}",
                statements.join(" "))
    })
}

/// Arithmetic expressions over integer and float literals.
fn arithmetic() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0i64..1000).prop_map(|n| n.to_string()),
        (0u32..100, 0u32..100).prop_map(|(whole, fraction)| format!("{whole}.{fraction}")),
    ];

    leaf.prop_recursive(4, 32, 2, |inner| {
        let op = prop::sample::select(&["+", "-", "*", "/", "<", "==", "&&", "||"][..]);
        prop_oneof![
            inner.clone().prop_map(|e| format!("-{e}")),
            (inner.clone(), op.clone(), inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            (inner.clone(), op, inner).prop_map(|(l, op, r)| format!("({l} {op} {r})")),
        ]
    })
}

fn bounded_runtime() -> Runtime {
    Runtime::with_config(RuntimeConfig { max_call_depth: 16,
                                         max_steps: Some(2_000),
                                         ..RuntimeConfig::default() })
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig { cases: default.cases.max(256),
                     ..default }
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn lexer_never_panics(input in "\\PC{0,200}") {
        if let Ok(tokens) = tokenize(&input) {
            let eofs = tokens.iter().filter(|t: &&Token| t.kind == TokenKind::Eof).count();
            prop_assert_eq!(eofs, 1);
            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
            for token in &tokens {
                prop_assert!(token.start <= input.len());
            }
        }
    }

    #[test]
    fn parser_never_panics(input in token_soup()) {
        let tokens = tokenize(&input).expect("fragments always lex");
        let (program, diagnostics) = parse(&tokens);
        if diagnostics.is_empty() {
            let rendered = render(&program);
            let tokens = tokenize(&rendered).expect("rendered text lexes");
            let (reparsed, diagnostics) = parse(&tokens);
            prop_assert!(diagnostics.is_empty(), "{} gave {:?}", rendered, diagnostics);
            prop_assert_eq!(render(&reparsed), rendered);
        }
    }

    #[test]
    fn evaluation_never_panics(source in program()) {
        let tokens = tokenize(&source).expect("generated programs lex");
        let (_, diagnostics) = parse(&tokens);
        prop_assert!(diagnostics.is_empty(), "{:?}", diagnostics);

        let mut runtime = bounded_runtime();
        match run(&source, &mut runtime) {
            Ok(_) | Err(Error::Runtime(_)) => {},
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn rendering_preserves_results(expr in arithmetic()) {
        let source = format!("print {expr};");
        let tokens = tokenize(&source).expect("generated expressions lex");
        let (program, diagnostics) = parse(&tokens);
        prop_assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        let rendered = render(&program);

        let mut before = Runtime::new();
        let mut after = Runtime::new();
        let first = run(&source, &mut before);
        let second = run(&rendered, &mut after);

        match (&first, &second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(Error::Runtime(a)), Err(Error::Runtime(b))) => {
                prop_assert_eq!(discriminant(a), discriminant(b));
            },
            _ => prop_assert!(false, "{:?} vs {:?} for {}", first, second, rendered),
        }
        prop_assert_eq!(before.output(), after.output());
    }
}
