// tests/arithmetic_tests.rs

use std::cell::RefCell;

use xjson::arithmetic::{render, tokenize};
use xjson::evaluator::MAX_NESTING;
use xjson::{
    Decoder, EvalError, Kind, Options, Primitive, SubstituteError, decode, get_with_arithmetic,
};
use yare::parameterized;

const DOC: &str = r#"{"name":"bob", "age":10,"magic":10.1, "zero":0, "debt":-3, "score":{"math":[1,2]}}"#;
const PEOPLE: &str = r#"{"people":[{"bob":{"age":10}},{"alice":{"age":10}}]}"#;

fn with_literals() -> Options {
    Options {
        numeric_literals: true,
        ..Options::default()
    }
}

fn rendered_with(json: &str, expression: &str, options: &Options) -> Result<String, SubstituteError> {
    let doc = decode(json).unwrap();
    let tokens = tokenize(expression, options.key_charset).unwrap();
    render(&doc, tokens, options)
}

fn rendered(json: &str, expression: &str) -> Result<String, SubstituteError> {
    rendered_with(json, expression, &Options::default())
}

// ============================================================================
// Substitution
// ============================================================================

#[test]
fn test_rendered_expressions() {
    let test_cases = vec![
        ("(age+age)*age+magic", "( 10 + 10 ) * 10 + 10.1"),
        ("score.math[1] / score.math[0]", "2 / 1"),
        ("age * score.math[1]", "10 * 2"),
        ("-age", "- 10"),
        ("age - debt", "10 - (-3)"),
        ("-debt*debt", "- (-3) * (-3)"),
        (
            "if age==magic {return true;} else {return false;}",
            "if 10 == 10.1 { return true ; } else { return false ; }",
        ),
    ];

    for (expression, expected) in test_cases {
        assert_eq!(
            rendered(DOC, expression).unwrap(),
            expected,
            "Failed for expression: {}",
            expression
        );
    }
}

#[test]
fn test_whole_float_keeps_decimal_point() {
    assert_eq!(rendered(r#"{"f":3.0}"#, "f + f").unwrap(), "3.0 + 3.0");
}

#[test]
fn test_numeric_literals_are_paths_by_default() {
    assert!(matches!(
        rendered(DOC, "age * 2"),
        Err(SubstituteError::Unresolved { path, .. }) if path == "2"
    ));
    assert!(!get_with_arithmetic(DOC, "age * 2").exists());
    assert!(!get_with_arithmetic(DOC, "if age > magic { return age; } else { return 0; }").exists());
}

#[test]
fn test_numeric_literals_option() {
    let options = with_literals();
    assert_eq!(rendered_with(DOC, "age * 2 + 0.5", &options).unwrap(), "10 * 2 + 0.5");
    // A key named like a number still wins
    assert_eq!(rendered_with(r#"{"2":5}"#, "2 * 2", &options).unwrap(), "5 * 5");
    assert_eq!(rendered(r#"{"2":5}"#, "2 * 2").unwrap(), "5 * 5");

    let decoder = Decoder::with_options(options);
    assert_eq!(decoder.get_with_arithmetic(DOC, "age * 2 + 0.5").string(), "20.5");
    assert_eq!(
        decoder
            .get_with_arithmetic(DOC, "if age >= 10 { return 1; } else { return 0; }")
            .int(),
        1
    );
}

#[test]
fn test_min_integer_substitutes() {
    let json = r#"{"a":-9223372036854775808,"b":1}"#;
    assert_eq!(rendered(json, "a").unwrap(), "(-9223372036854775808)");
    assert_eq!(get_with_arithmetic(json, "a").int(), i64::MIN);
    assert_eq!(get_with_arithmetic(json, "a + b").int(), i64::MIN + 1);
    assert!(!get_with_arithmetic(json, "a - b").exists());
}

#[test]
fn test_substitution_errors() {
    assert!(matches!(
        rendered(DOC, "name + 1"),
        Err(SubstituteError::NotNumeric { path }) if path == "name"
    ));
    assert!(matches!(
        rendered(DOC, "nobody + 1"),
        Err(SubstituteError::Unresolved { path, .. }) if path == "nobody"
    ));
    assert!(matches!(
        rendered(DOC, "score + 1"),
        Err(SubstituteError::NotNumeric { .. })
    ));
}

// ============================================================================
// Arithmetic queries
// ============================================================================

#[parameterized(
    mixed_float = { DOC, "(age+age)*age+magic", "210.1" },
    integer_product = { DOC, "(age+age)*age", "200" },
    plus_index = { DOC, "(age+age) * age + score.math[0]", "201" },
    minus_index = { DOC, "(age+age) * age - score.math[0]", "199" },
    exact_division = { DOC, "score.math[1] / score.math[0]", "2" },
    inexact_division = { DOC, "score.math[0] / score.math[1]", "0.5" },
    single_path = { DOC, "age", "10" },
    negation = { DOC, "-age + score.math[0]", "-9" },
    negative_value = { DOC, "age - debt * debt", "1" },
    nested_paths = { PEOPLE, "people[0].bob.age + people[1].alice.age", "20" },
    comparison = { DOC, "age > score.math[1]", "true" },
    control = { DOC, "if age == age { return magic; } else { return zero; }", "10.1" },
    else_branch = { DOC, "if age != age { return score.math[0]; } else { return score.math[1]; }", "2" },
)]
fn test_get_with_arithmetic(json: &str, expression: &str, expected: &str) {
    assert_eq!(get_with_arithmetic(json, expression).string(), expected);
}

#[test]
fn test_result_kinds() {
    assert_eq!(get_with_arithmetic(DOC, "(age+age)*age").kind(), Kind::Integer);
    assert_eq!(get_with_arithmetic(DOC, "(age+age)*age+magic").kind(), Kind::Float);
    assert_eq!(get_with_arithmetic(DOC, "age == age").kind(), Kind::Bool);
    assert_eq!(get_with_arithmetic(DOC, "(age+age)*age+magic").float(), 210.1);
    assert_eq!(get_with_arithmetic(DOC, "(age+age)*age").int(), 200);
}

#[parameterized(
    invalid_json = { r#"{"name":[}"#, "x" },
    array_root = { "[1,2]", "x" },
    boolean_operand = { r#"{"age":true}"#, "age" },
    string_operand = { DOC, "name * 2" },
    missing_path = { DOC, "nobody + 1" },
    unbalanced_parens = { DOC, "(age + age" },
    division_by_zero = { DOC, "age / zero" },
    numeric_literal = { DOC, "age + 1" },
    lone_assignment = { DOC, "age = 1" },
    bad_path = { DOC, "score.math[1.a] + 1" },
    empty_expression = { DOC, "" },
)]
fn test_failed_queries_are_empty(json: &str, expression: &str) {
    let result = get_with_arithmetic(json, expression);
    assert_eq!(result.kind(), Kind::Empty, "expression: {}", expression);
    assert_eq!(result.string(), "");
}

// ============================================================================
// Injected evaluators
// ============================================================================

#[test]
fn test_evaluator_receives_substituted_text() {
    let seen = RefCell::new(Vec::new());
    let recorder = |expression: &str| -> Result<Primitive, EvalError> {
        seen.borrow_mut().push(expression.to_string());
        Ok(Primitive::Bool(true))
    };

    let result = Decoder::new().get_with_evaluator(DOC, "score.math[0]+magic", &recorder);

    assert!(result.bool());
    assert_eq!(seen.into_inner(), vec!["1 + 10.1".to_string()]);
}

#[test]
fn test_evaluator_errors_become_empty() {
    let failing = |_: &str| -> Result<Primitive, EvalError> { Err(EvalError::NoValue) };
    let result = Decoder::new().get_with_evaluator(DOC, "age", &failing);
    assert!(!result.exists());
}

#[test]
fn test_try_arithmetic_reports_reason() {
    let doc = decode(DOC).unwrap();
    let evaluator = xjson::ExpressionEvaluator::new();

    let options = with_literals();

    let ok = doc.try_arithmetic("age / 4", &evaluator, &options).unwrap();
    assert_eq!(ok.float(), 2.5);

    assert_eq!(
        doc.try_arithmetic("age / 0", &evaluator, &options),
        Err(SubstituteError::Eval(EvalError::DivisionByZero))
    );
    assert!(matches!(
        doc.try_arithmetic("age / 0", &evaluator, &Options::default()),
        Err(SubstituteError::Unresolved { path, .. }) if path == "0"
    ));
}

#[test]
fn test_try_get_with_evaluator_reports_decode_failure() {
    let evaluator = xjson::ExpressionEvaluator::new();
    assert!(matches!(
        Decoder::new().try_get_with_evaluator(r#"{"name":[}"#, "x", &evaluator),
        Err(SubstituteError::Decode(_))
    ));
}

// ============================================================================
// Resource bounds
// ============================================================================

#[test]
fn test_long_path_sum() {
    let expression = vec!["age"; 20_000].join("+");
    let result = get_with_arithmetic(r#"{"age":1}"#, &expression);
    assert_eq!(result.int(), 20_000);
}

#[test]
fn test_deeply_nested_expression_is_empty() {
    let json = r#"{"age":1}"#;

    let parens = format!("{}age{}", "(".repeat(50_000), ")".repeat(50_000));
    assert!(!get_with_arithmetic(json, &parens).exists());

    let negations = format!("{}(age)", "-".repeat(50_000));
    assert!(!get_with_arithmetic(json, &negations).exists());

    let evaluator = xjson::ExpressionEvaluator::new();
    let doc = decode(json).unwrap();
    assert_eq!(
        doc.try_arithmetic(&parens, &evaluator, &Options::default()),
        Err(SubstituteError::Eval(EvalError::DepthLimit(MAX_NESTING)))
    );
}
