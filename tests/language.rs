use std::fs::{self};

use kestrel::{
    Runtime, RuntimeConfig, Value,
    ast::{LiteralValue, Node, UnaryOperator},
    error::{Error, ParseError, RuntimeError},
    evaluate,
    interpreter::lexer::{Token, TokenKind},
    parse, render, run, tokenize,
};
use walkdir::WalkDir;

#[test]
fn readme_examples_work() {
    let content =
        fs::read_to_string("README.md").unwrap_or_else(|e| panic!("Failed to read README.md: {e}"));

    let blocks = extract_kestrel_blocks(&content);
    for (i, code) in blocks.iter().enumerate() {
        if let Err(e) = run(code, &mut Runtime::new()) {
            panic!("README example {} failed:\n{}\nError: {:?}", i + 1, code, e);
        }
    }

    assert!(!blocks.is_empty(), "No kestrel examples found in README.md");
}

#[test]
fn script_fixtures_produce_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "ks"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                             panic!("Failed to read {expected_path:?}: {e}")
                                                         });

        let mut runtime = Runtime::new();
        if let Err(e) = run(&source, &mut runtime) {
            panic!("Script {path:?} failed: {e}");
        }
        let expected: Vec<&str> = expected.lines().collect();
        assert_eq!(runtime.output(), expected, "output of {path:?}");

        count += 1;
    }

    assert!(count > 0, "No scripts found in tests/programs");
}

fn extract_kestrel_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```kestrel") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_value(src: &str, expected: Value) {
    match run(src, &mut Runtime::new()) {
        Ok(value) => assert_eq!(value, expected, "value of `{src}`"),
        Err(e) => panic!("Script `{src}` failed: {e}"),
    }
}

fn assert_output(src: &str, expected: &[&str]) {
    let mut runtime = Runtime::new();
    if let Err(e) = run(src, &mut runtime) {
        panic!("Script `{src}` failed: {e}");
    }
    assert_eq!(runtime.output(), expected, "output of `{src}`");
}

fn assert_failure(src: &str) -> Error {
    match run(src, &mut Runtime::new()) {
        Ok(value) => panic!("Script `{src}` succeeded with {value} but was expected to fail"),
        Err(e) => e,
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    match assert_failure(src) {
        Error::Runtime(e) => e,
        other => panic!("expected a runtime error for `{src}`, got {other:?}"),
    }
}

#[test]
fn precedence_and_associativity() {
    assert_value("2 + 3 * 4;", Value::Integer(14));
    assert_value("2 ** 3 ** 2;", Value::Integer(512));
    assert_value("10 - 3 - 2;", Value::Integer(5));
    assert_value("(2 + 3) * 4;", Value::Integer(20));
    assert_value("1 << 2 + 1;", Value::Integer(8));
    assert_value("1 + 1 == 2 && 3 > 2;", Value::Boolean(true));
    assert_value("6 & 3 | 8;", Value::Integer(10));
    assert!(matches!(runtime_error("6 & 3 == 2;"), RuntimeError::TypeError { .. }));
    assert_value("-2 ** 2;", Value::Integer(4));
}

#[test]
fn numeric_coercion() {
    assert_value("1 + 2.0;", Value::Float(3.0));
    assert_value("7 / 2;", Value::Integer(3));
    assert_value("7.0 / 2;", Value::Float(3.5));
    assert_value("2 ** -2;", Value::Float(0.25));
    assert_value("int 3.99 + float 1;", Value::Float(4.0));
    assert_value("int \"42\" * 2;", Value::Integer(84));
    assert_value("float true;", Value::Float(1.0));
}

#[test]
fn arithmetic_errors() {
    assert!(matches!(runtime_error("7 % 0;"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(runtime_error("1.5 / 0;"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(runtime_error("9223372036854775807 + 1;"), RuntimeError::Overflow { .. }));
    assert!(matches!(runtime_error("1 >> -1;"), RuntimeError::NegativeShift { amount: -1, .. }));
    assert!(matches!(runtime_error("\"a\" - 1;"), RuntimeError::TypeError { .. }));
    assert!(matches!(runtime_error("int null;"), RuntimeError::InvalidCast { .. }));
}

#[test]
fn short_circuit_returns_operands() {
    assert_value("0 || 5;", Value::Integer(0));
    assert_value("false && (1 / 0);", Value::Boolean(false));
    assert_value("null || \"x\";", Value::from("x"));
    assert_value("\"\" && 2;", Value::Integer(2));
}

#[test]
fn equality_and_ordering() {
    assert_value("1 == 1.0;", Value::Boolean(true));
    assert_value("null == false;", Value::Boolean(false));
    assert_value("\"a\" != \"b\";", Value::Boolean(true));
    assert_value("\"abc\" < \"abd\";", Value::Boolean(true));
    assert!(matches!(runtime_error("1 < \"2\";"), RuntimeError::TypeError { .. }));
}

#[test]
fn printing_uses_display_form() {
    assert_output("print 3.0; print 7 / 2; print \"hi\"; print null; print !0;",
                  &["3.0", "3", "hi", "null", "false"]);
}

#[test]
fn control_flow() {
    assert_output("x = 3; if x > 2 print \"big\"; else print \"small\"; end",
                  &["big"]);
    assert_output("n = 3; while n > 0 print n; n = n - 1; end", &["3", "2", "1"]);
    assert_output("for i in [3, 1] print i; end print \"done\";", &["done"]);
    assert_value("sum = 0; for i in [1, 10] sum = sum + i; end sum;", Value::Integer(55));
    assert!(matches!(runtime_error("for i in [1, 2.5] print i; end"),
                     RuntimeError::InvalidLoopBounds { .. }));
}

#[test]
fn recursive_functions() {
    assert_output("function fib(n)
                       if n < 2 return n; end
                       return fib(n - 1) + fib(n - 2);
                   end
                   print fib(10);",
                  &["55"]);
}

#[test]
fn functions_have_their_own_frame() {
    assert_value("x = 1;
                  function f(x) x = x + 10; return x; end
                  f(5) + x;",
                 Value::Integer(16));
    assert_value("g = 2;
                  function h() g = g * 3; end
                  h(); g;",
                 Value::Integer(6));
    assert_value("function nothing() end nothing();", Value::Null);
}

#[test]
fn return_unwinds_loops() {
    assert_value("function first_over(limit)
                      i = 0;
                      while true
                          i = i + 1;
                          if i * i > limit return i; end
                      end
                  end
                  first_over(50);",
                 Value::Integer(8));
}

#[test]
fn function_errors() {
    assert!(matches!(runtime_error("missing(1);"), RuntimeError::UnknownFunction { .. }));
    assert!(matches!(runtime_error("function f(a) return a; end f(1, 2);"),
                     RuntimeError::ArgumentCountMismatch { expected: 1, found: 2, .. }));
    assert!(matches!(runtime_error("3(1);"), RuntimeError::NotCallable { .. }));
    assert!(matches!(runtime_error("return 1;"), RuntimeError::ReturnOutsideFunction { .. }));
    assert!(matches!(runtime_error("print y;"), RuntimeError::UnknownVariable { .. }));
}

#[test]
fn limits_stop_runaway_programs() {
    let config = RuntimeConfig { max_call_depth: 50,
                                 ..RuntimeConfig::default() };
    let result = run("function down(n) return down(n + 1); end down(0);",
                     &mut Runtime::with_config(config));
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::RecursionLimit { limit: 50, .. }))));

    let config = RuntimeConfig { max_steps: Some(1000),
                                 ..RuntimeConfig::default() };
    let result = run("while true end", &mut Runtime::with_config(config));
    assert!(matches!(result,
                     Err(Error::Runtime(RuntimeError::StepLimitExceeded { limit: 1000, .. }))));
}

#[test]
fn deep_nesting_is_a_syntax_error() {
    let sum = format!("x = {};", vec!["1"; 5_000].join(" + "));
    let parens = format!("print {}1{};", "(".repeat(5_000), ")".repeat(5_000));

    for source in [sum, parens] {
        let Error::Parse(diagnostics) = assert_failure(&source) else {
            panic!("expected syntax errors");
        };
        assert!(matches!(diagnostics[..], [ParseError::NestingTooDeep { limit: 100, .. }]));
    }

    assert_value(&format!("{};", vec!["1"; 60].join(" + ")), Value::Integer(60));
}

#[test]
fn evaluation_depth_is_bounded() {
    let token = Token::new(TokenKind::Minus, "-", 0, 0);
    let mut node = Node::Literal { value: LiteralValue::Integer(1),
                                   token: token.clone(), };
    for _ in 0..300 {
        node = Node::UnaryOp { op:      UnaryOperator::Negate,
                               operand: Box::new(node),
                               token:   token.clone(), };
    }

    let result = evaluate(&node, &mut Runtime::new());
    assert!(matches!(result, Err(RuntimeError::NestingTooDeep { limit: 256, .. })));

    let config = RuntimeConfig { max_nesting_depth: 400,
                                 ..RuntimeConfig::default() };
    assert_eq!(evaluate(&node, &mut Runtime::with_config(config)), Ok(Value::Integer(1)));
}

#[test]
fn nesting_depth_restarts_in_each_call() {
    assert_value("function down(n)
                      if n == 0 return 0; end
                      return down(n - 1) + 1;
                  end
                  down(100);",
                 Value::Integer(100));
}

#[test]
fn infinite_float_literal_is_rejected() {
    let source = format!("x = 1{}.0 - 1.0; print x;", "0".repeat(400));
    let Error::Parse(diagnostics) = assert_failure(&source) else {
        panic!("expected syntax errors");
    };
    assert!(matches!(diagnostics[..], [ParseError::LiteralTooLarge { .. }]));
}

#[test]
fn output_before_an_error_is_kept() {
    let mut runtime = Runtime::new();
    assert!(run("print 1; print 2 / 0; print 3;", &mut runtime).is_err());
    assert_eq!(runtime.output(), ["1"]);
}

#[test]
fn syntax_errors_are_collected_per_statement() {
    let tokens = tokenize("x = 1; print (1 + ; y = 2; z = ) 3; print x;").unwrap();
    let (_, diagnostics) = parse(&tokens);
    assert_eq!(diagnostics.len(), 2);

    let Error::Parse(diagnostics) = assert_failure("print 1 +; print 2;") else {
        panic!("expected syntax errors");
    };
    assert!(matches!(diagnostics[..], [ParseError::UnexpectedToken { .. }]));
}

#[test]
fn lexical_errors_are_fatal() {
    assert!(matches!(assert_failure("x = 1 @ 2;"), Error::Lex(_)));
    assert!(matches!(assert_failure("print \"open;"), Error::Lex(_)));
}

#[test]
fn state_persists_across_runs() {
    let mut runtime = Runtime::new();
    run("function twice(v) return v * 2; end counter = 1;", &mut runtime).unwrap();
    assert_eq!(run("twice(counter);", &mut runtime), Ok(Value::Integer(2)));

    runtime.reset();
    assert!(run("counter;", &mut runtime).is_err());
}

#[test]
fn rendered_programs_behave_the_same() {
    let sources = ["x = 2; y = x ** 3 - -1; print y; print x < y && !(y == 9);",
                   "function fact(n) if n <= 1 return 1; else return n * fact(n - 1); end end \
                    print fact(6);",
                   "total = 0; for i in [1, 4] { total = total + i * i; } end print total;",
                   "s = \"a b\"; n = 0; while n < 2 print s; n = n + 1; end print float n;",
                   "print 5 ^ 3 | 8 & ~1; print int(7.9) % 3;"];

    for source in sources {
        let mut source_runtime = Runtime::new();
        let first = run(source, &mut source_runtime).unwrap_or_else(|e| panic!("`{source}` failed: {e}"));

        let tokens = tokenize(source).unwrap();
        let (program, _) = parse(&tokens);
        let rendered = render(&program);

        let mut again = Runtime::new();
        let second = run(&rendered, &mut again).unwrap_or_else(|e| panic!("`{rendered}` failed: {e}"));

        assert_eq!(first, second, "value of `{rendered}`");
        assert_eq!(source_runtime.output(), again.output(), "output of `{rendered}`");

        let tokens = tokenize(&rendered).unwrap();
        let (reparsed, diagnostics) = parse(&tokens);
        assert!(diagnostics.is_empty());
        assert_eq!(render(&reparsed), rendered);
    }
}
