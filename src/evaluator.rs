use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};

use crate::arithmetic;
use crate::ast::{BinOp, Expr, Program, Statement};
use crate::error::EvalError;
use crate::options::KeyCharset;

pub mod parser;

pub use parser::{MAX_NESTING, Parser};

/// The value an evaluator produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Primitive {
    fn type_name(&self) -> &'static str {
        match self {
            Primitive::Integer(_) => "integer",
            Primitive::Float(_) => "float",
            Primitive::Bool(_) => "boolean",
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Primitive::Integer(n) => Some(*n as f64),
            Primitive::Float(n) => Some(*n),
            Primitive::Bool(_) => None,
        }
    }

    fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Primitive::Integer(n) => Decimal::from_i64(*n),
            Primitive::Float(n) => Decimal::from_f64(*n),
            Primitive::Bool(_) => None,
        }
    }
}

/// Computes a fully substituted expression.
///
/// The input contains no paths, only numeric literals, operators, keywords
/// and punctuation, e.g. `( 10 + 10 ) * 10 + 10.1`. Implementations return
/// exactly one primitive or an error; callers of the arithmetic query turn
/// errors into an empty result.
///
/// Closures can be used directly:
///
/// ```
/// use xjson::{Decoder, EvalError, Primitive};
///
/// let always_one = |_: &str| -> Result<Primitive, EvalError> { Ok(Primitive::Integer(1)) };
/// let result = Decoder::new().get_with_evaluator(r#"{"a":5}"#, "a * a", &always_one);
/// assert_eq!(result.int(), 1);
/// ```
pub trait Evaluate {
    fn evaluate(&self, expression: &str) -> Result<Primitive, EvalError>;
}

impl<F> Evaluate for F
where
    F: Fn(&str) -> Result<Primitive, EvalError>,
{
    fn evaluate(&self, expression: &str) -> Result<Primitive, EvalError> {
        self(expression)
    }
}

/// Default evaluator for arithmetic queries.
///
/// Supports `+ - * /`, unary minus, parentheses, `== != < > <= >=`,
/// `true`/`false`, and `if`/`else`/`return` statements. Integer results stay
/// integers when exact; mixed integer/float arithmetic goes through
/// [`Decimal`] so that `200 + 10.1` is `210.1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressionEvaluator;

/// Outcome of running a statement.
enum Flow {
    /// Continue with the value of the last expression statement, if any
    Next(Option<Primitive>),
    Return(Primitive),
}

impl Evaluate for ExpressionEvaluator {
    fn evaluate(&self, expression: &str) -> Result<Primitive, EvalError> {
        let tokens = arithmetic::tokenize(expression, KeyCharset::default())?;
        let program = Parser::new(tokens).parse_program()?;
        self.run(&program)
    }
}

impl ExpressionEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Runs a parsed program: the first `return` wins, otherwise the last
    /// expression statement is the result.
    pub fn run(&self, program: &Program) -> Result<Primitive, EvalError> {
        match self.exec_block(&program.statements)? {
            Flow::Return(value) | Flow::Next(Some(value)) => Ok(value),
            Flow::Next(None) => Err(EvalError::NoValue),
        }
    }

    fn exec_block(&self, statements: &[Statement]) -> Result<Flow, EvalError> {
        let mut last = None;
        for stmt in statements {
            match self.exec_statement(stmt)? {
                Flow::Return(value) => return Ok(Flow::Return(value)),
                Flow::Next(Some(value)) => last = Some(value),
                Flow::Next(None) => {}
            }
        }
        Ok(Flow::Next(last))
    }

    fn exec_statement(&self, stmt: &Statement) -> Result<Flow, EvalError> {
        match stmt {
            Statement::Return(expr) => Ok(Flow::Return(self.eval_expr(expr)?)),
            Statement::Expression(expr) => Ok(Flow::Next(Some(self.eval_expr(expr)?))),
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => match self.eval_expr(condition)? {
                Primitive::Bool(true) => self.exec_block(then_branch),
                Primitive::Bool(false) => match else_branch {
                    Some(branch) => self.exec_block(branch),
                    None => Ok(Flow::Next(None)),
                },
                other => Err(EvalError::TypeError(format!(
                    "Condition must be a boolean, got {}",
                    other.type_name()
                ))),
            },
        }
    }

    pub fn eval_expr(&self, expr: &Expr) -> Result<Primitive, EvalError> {
        match expr {
            Expr::Integer(n) => Ok(Primitive::Integer(*n)),
            Expr::Float(n) => Ok(Primitive::Float(*n)),
            Expr::Boolean(b) => Ok(Primitive::Bool(*b)),
            Expr::BinaryOp { first, rest } => {
                let mut acc = self.eval_expr(first)?;
                for (op, operand) in rest {
                    let right_val = self.eval_expr(operand)?;
                    acc = self.apply_binop(*op, acc, right_val)?;
                }
                Ok(acc)
            }
        }
    }

    fn apply_binop(&self, op: BinOp, left: Primitive, right: Primitive) -> Result<Primitive, EvalError> {
        use Primitive::*;

        match op {
            BinOp::Equal | BinOp::NotEqual => {
                let equal = match (left, right) {
                    (Bool(a), Bool(b)) => a == b,
                    (Integer(a), Integer(b)) => a == b,
                    (a, b) => match (a.as_f64(), b.as_f64()) {
                        (Some(x), Some(y)) => x == y,
                        _ => return Err(type_error(op, a, b)),
                    },
                };
                Ok(Bool(if op == BinOp::Equal { equal } else { !equal }))
            }
            BinOp::LessThan | BinOp::GreaterThan | BinOp::LessEqual | BinOp::GreaterEqual => {
                let ordering = match (left, right) {
                    (Integer(a), Integer(b)) => a.partial_cmp(&b),
                    (a, b) => match (a.as_f64(), b.as_f64()) {
                        (Some(x), Some(y)) => x.partial_cmp(&y),
                        _ => return Err(type_error(op, a, b)),
                    },
                };
                let ordering = ordering.ok_or_else(|| type_error(op, left, right))?;
                Ok(Bool(match op {
                    BinOp::LessThan => ordering.is_lt(),
                    BinOp::GreaterThan => ordering.is_gt(),
                    BinOp::LessEqual => ordering.is_le(),
                    _ => ordering.is_ge(),
                }))
            }
            BinOp::Add | BinOp::Subtract | BinOp::Multiply | BinOp::Divide => {
                self.apply_arithmetic(op, left, right)
            }
        }
    }

    fn apply_arithmetic(&self, op: BinOp, left: Primitive, right: Primitive) -> Result<Primitive, EvalError> {
        use Primitive::*;

        if op == BinOp::Divide && right.as_f64() == Some(0.0) {
            return Err(EvalError::DivisionByZero);
        }

        match (left, right) {
            (Integer(a), Integer(b)) => {
                let result = match op {
                    BinOp::Add => a.checked_add(b),
                    BinOp::Subtract => a.checked_sub(b),
                    BinOp::Multiply => a.checked_mul(b),
                    // Check if division is exact; if not, return Float
                    _ if a.checked_rem(b) == Some(0) => a.checked_div(b),
                    _ => return Ok(Float(a as f64 / b as f64)),
                };
                result.map(Integer).ok_or(EvalError::Overflow)
            }
            (Float(a), Float(b)) => Ok(Float(float_op(op, a, b))),
            (Integer(_), Float(_)) | (Float(_), Integer(_)) => Ok(mixed_op(op, left, right)),
            (a, b) => Err(type_error(op, a, b)),
        }
    }
}

fn float_op(op: BinOp, a: f64, b: f64) -> f64 {
    match op {
        BinOp::Add => a + b,
        BinOp::Subtract => a - b,
        BinOp::Multiply => a * b,
        _ => a / b,
    }
}

/// Integer/float arithmetic through [`Decimal`], keeping an integer result
/// when it is whole. Falls back to `f64` when a value does not fit.
fn mixed_op(op: BinOp, left: Primitive, right: Primitive) -> Primitive {
    if let Some(ad) = left.as_decimal()
        && let Some(bd) = right.as_decimal()
    {
        let rd = match op {
            BinOp::Add => ad.checked_add(bd),
            BinOp::Subtract => ad.checked_sub(bd),
            BinOp::Multiply => ad.checked_mul(bd),
            _ => ad.checked_div(bd),
        };
        if let Some(rd) = rd {
            if rd.is_integer()
                && let Some(r) = rd.to_i64()
            {
                return Primitive::Integer(r);
            } else if let Some(r) = rd.to_f64() {
                return Primitive::Float(r);
            }
        }
    }
    let a = left.as_f64().unwrap_or_default();
    let b = right.as_f64().unwrap_or_default();
    Primitive::Float(float_op(op, a, b))
}

fn type_error(op: BinOp, a: Primitive, b: Primitive) -> EvalError {
    EvalError::TypeError(format!(
        "Cannot apply '{}' to {} and {}",
        op.symbol(),
        a.type_name(),
        b.type_name()
    ))
}
