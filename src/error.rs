use thiserror::Error;

use crate::arithmetic::ArithmeticKind;
use crate::tokens::TokenKind;

/// Errors produced while decoding JSON text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Tokenize error: {0}")]
    Tokenize(#[from] TokenizeError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Malformed bytes in JSON text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizeError {
    #[error("invalid literal at byte {offset}: expected '{expected}'")]
    InvalidLiteral { expected: &'static str, offset: usize },

    #[error("invalid number at byte {offset}: {reason}")]
    InvalidNumber { reason: &'static str, offset: usize },

    #[error("invalid escape sequence at byte {offset}")]
    InvalidEscape { offset: usize },

    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("unexpected byte {byte:#04x} at byte {offset}")]
    UnexpectedByte { byte: u8, offset: usize },
}

/// A well-formed token sequence that does not form a JSON document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unexpected {kind:?} token '{literal}'")]
    UnexpectedToken { kind: TokenKind, literal: String },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("number '{0}' is out of range")]
    InvalidNumber(String),

    #[error("nesting deeper than {0} levels")]
    DepthLimit(usize),
}

/// Malformed path expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("invalid array index at byte {offset}: only digits are allowed")]
    InvalidArrayIndex { offset: usize },

    #[error("array index is missing its closing ']'")]
    UnterminatedArrayIndex,

    #[error("path ends with an unfinished escape")]
    DanglingEscape,

    #[error("unexpected byte {byte:#04x} at byte {offset}")]
    UnexpectedByte { byte: u8, offset: usize },
}

/// Why a path did not resolve to a value.
///
/// The text-level query functions report every one of these as an empty
/// [`Result`](crate::Result).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("invalid path: {0}")]
    Path(#[from] PathError),

    #[error("invalid path syntax near '{0}'")]
    Syntax(String),

    #[error("cannot look up key '{0}' in a non-object value")]
    NotAnObject(String),

    #[error("cannot index non-array value with [{0}]")]
    NotAnArray(String),

    #[error("key '{0}' not found")]
    MissingKey(String),

    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: String, len: usize },
}

/// Malformed arithmetic expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArithmeticError {
    #[error("unexpected byte {byte:#04x} at byte {offset}")]
    UnexpectedByte { byte: u8, offset: usize },

    #[error("expression ends with an unfinished escape")]
    DanglingEscape,
}

/// Failure reported by an [`Evaluate`](crate::Evaluate) implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("invalid expression: {0}")]
    Tokenize(#[from] ArithmeticError),

    #[error("unexpected {kind:?} token '{literal}'")]
    UnexpectedToken { kind: ArithmeticKind, literal: String },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("expression produced no value")]
    NoValue,

    #[error("expression nested deeper than {0} levels")]
    DepthLimit(usize),
}

/// Why an arithmetic query produced an empty result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubstituteError {
    #[error(transparent)]
    Decode(#[from] Error),

    #[error(transparent)]
    Tokenize(#[from] ArithmeticError),

    #[error("'{path}' did not resolve: {source}")]
    Unresolved { path: String, source: QueryError },

    #[error("'{path}' resolved to a non-numeric value")]
    NotNumeric { path: String },

    #[error(transparent)]
    Eval(#[from] EvalError),
}
