// tests/evaluator_tests.rs

use xjson::arithmetic::tokenize;
use xjson::ast::{BinOp, Expr, Statement};
use xjson::evaluator::{MAX_NESTING, Parser};
use xjson::{EvalError, Evaluate, ExpressionEvaluator, KeyCharset, Primitive};

fn eval(expression: &str) -> Result<Primitive, EvalError> {
    ExpressionEvaluator::new().evaluate(expression)
}

fn parse_expression(expression: &str) -> Expr {
    let tokens = tokenize(expression, KeyCharset::default()).unwrap();
    Parser::new(tokens).parse_expression().unwrap()
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_comparison_binds_looser_than_arithmetic() {
    let expr = parse_expression("1 + 2 > 2");
    match expr {
        Expr::BinaryOp { first, rest } => {
            assert!(matches!(*first, Expr::BinaryOp { .. }));
            assert_eq!(rest, vec![(BinOp::GreaterThan, Expr::Integer(2))]);
        }
        _ => panic!("Expected comparison"),
    }
}

#[test]
fn test_arithmetic_precedence() {
    let expr = parse_expression("1 + 2 * 3");

    // Should be: Add(1, Multiply(2, 3))
    match expr {
        Expr::BinaryOp { first, rest } => {
            assert!(matches!(*first, Expr::Integer(1)));
            assert_eq!(
                rest,
                vec![(
                    BinOp::Add,
                    Expr::BinaryOp {
                        first: Box::new(Expr::Integer(2)),
                        rest: vec![(BinOp::Multiply, Expr::Integer(3))],
                    }
                )]
            );
        }
        _ => panic!("Expected addition"),
    }
}

#[test]
fn test_same_precedence_is_left_associative() {
    let expr = parse_expression("10 - 4 + 2");
    assert_eq!(
        expr,
        Expr::BinaryOp {
            first: Box::new(Expr::Integer(10)),
            rest: vec![(BinOp::Subtract, Expr::Integer(4)), (BinOp::Add, Expr::Integer(2))],
        }
    );
    assert_eq!(eval("10 - 4 + 2"), Ok(Primitive::Integer(8)));
    assert_eq!(eval("8 / 2 / 2"), Ok(Primitive::Integer(2)));
}

#[test]
fn test_if_statement_shape() {
    let tokens = tokenize("if 1 == 1 { return 2; } else { 3 }", KeyCharset::default()).unwrap();
    let program = Parser::new(tokens).parse_program().unwrap();

    assert_eq!(program.statements.len(), 1);
    match &program.statements[0] {
        Statement::If {
            then_branch,
            else_branch: Some(else_branch),
            ..
        } => {
            assert!(matches!(then_branch[..], [Statement::Return(Expr::Integer(2))]));
            assert!(matches!(else_branch[..], [Statement::Expression(Expr::Integer(3))]));
        }
        _ => panic!("Expected if/else"),
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_arithmetic_results() {
    let test_cases = vec![
        ("( 10 + 10 ) * 10 + 10.1", Primitive::Float(210.1)),
        ("( 10 + 10 ) * 10", Primitive::Integer(200)),
        ("2 / 1", Primitive::Integer(2)),
        ("1 / 2", Primitive::Float(0.5)),
        ("0.1 + 0.2 * 10", Primitive::Float(2.1)),
        ("1.5 * 2", Primitive::Integer(3)),
        ("10 - 0.5 - 0.5", Primitive::Float(9.0)),
        ("- 3 * 2", Primitive::Integer(-6)),
        ("- ( 1 + 1 )", Primitive::Integer(-2)),
        ("2.5 * 2.0", Primitive::Float(5.0)),
        ("-9223372036854775808", Primitive::Integer(i64::MIN)),
        ("- 0.5 + 1", Primitive::Float(0.5)),
    ];

    for (expression, expected) in test_cases {
        assert_eq!(eval(expression), Ok(expected), "Failed for: {}", expression);
    }
}

#[test]
fn test_comparisons() {
    let test_cases = vec![
        ("10 == 10", true),
        ("10 == 10.0", true),
        ("10 != 3", true),
        ("1 < 2", true),
        ("2 <= 2", true),
        ("2.5 > 3", false),
        ("3 >= 3.5", false),
        ("true == true", true),
        ("true != false", true),
    ];

    for (expression, expected) in test_cases {
        assert_eq!(
            eval(expression),
            Ok(Primitive::Bool(expected)),
            "Failed for: {}",
            expression
        );
    }
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_control_flow() {
    let test_cases = vec![
        ("if 10 == 10 { return true ; } else { return false ; }", Primitive::Bool(true)),
        ("if 1 > 2 { return 1 ; } else if 2 > 1 { return 2 ; } else { return 3 ; }", Primitive::Integer(2)),
        ("if 1 > 2 { return 1 ; } 5", Primitive::Integer(5)),
        ("return 1 ; 2", Primitive::Integer(1)),
        ("1 ; 2 ; 3", Primitive::Integer(3)),
        ("if true { 7 }", Primitive::Integer(7)),
    ];

    for (expression, expected) in test_cases {
        assert_eq!(eval(expression), Ok(expected), "Failed for: {}", expression);
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_errors() {
    assert_eq!(eval("1 / 0"), Err(EvalError::DivisionByZero));
    assert_eq!(eval("1.5 / 0.0"), Err(EvalError::DivisionByZero));
    assert_eq!(eval("9223372036854775807 + 1"), Err(EvalError::Overflow));
    assert_eq!(eval(""), Err(EvalError::NoValue));
    assert_eq!(eval("if 1 > 2 { 1 }"), Err(EvalError::NoValue));
    assert_eq!(eval("( 1 + 2"), Err(EvalError::UnexpectedEnd));
    assert!(matches!(eval("true + 1"), Err(EvalError::TypeError(_))));
    assert!(matches!(eval("true < false"), Err(EvalError::TypeError(_))));
    assert!(matches!(eval("1 == true"), Err(EvalError::TypeError(_))));
    assert!(matches!(eval("if 1 { 2 }"), Err(EvalError::TypeError(_))));
    assert!(matches!(eval("age + 1"), Err(EvalError::InvalidNumber(_))));
    assert!(matches!(eval("1 )"), Err(EvalError::UnexpectedToken { .. })));
    assert!(matches!(eval("1 = 2"), Err(EvalError::Tokenize(_))));
}

// ============================================================================
// Resource bounds
// ============================================================================

#[test]
fn test_long_sum_evaluates_without_recursion() {
    let expression = vec!["1"; 20_000].join(" + ");
    assert_eq!(eval(&expression), Ok(Primitive::Integer(20_000)));
}

#[test]
fn test_deep_nesting_is_rejected() {
    let parens = format!("{}1{}", "(".repeat(50_000), ")".repeat(50_000));
    assert_eq!(eval(&parens), Err(EvalError::DepthLimit(MAX_NESTING)));

    let negations = format!("{}( 1 )", "- ".repeat(50_000));
    assert_eq!(eval(&negations), Err(EvalError::DepthLimit(MAX_NESTING)));
}
