use crate::arithmetic::lexer::{ArithmeticKind, ArithmeticToken};
use crate::error::SubstituteError;
use crate::evaluator::{Evaluate, Primitive};
use crate::options::Options;
use crate::output::format_float;
use crate::path;
use crate::tokens::TokenReader;
use crate::value::Value;

/// Replaces every identifier with the numeric text it resolves to and joins
/// the tokens into one expression string.
///
/// Negative numbers are wrapped in parentheses so that they stay one operand
/// next to a binary operator.
///
/// ```
/// use xjson::arithmetic::{render, tokenize};
/// use xjson::Options;
///
/// let options = Options::default();
/// let doc = xjson::decode(r#"{"age":10,"magic":10.1,"debt":-3}"#).unwrap();
/// let tokens = tokenize("(age+age)*age+magic-debt", options.key_charset).unwrap();
/// assert_eq!(
///     render(&doc, tokens, &options).unwrap(),
///     "( 10 + 10 ) * 10 + 10.1 - (-3)"
/// );
/// ```
pub fn render(
    root: &Value,
    tokens: Vec<ArithmeticToken>,
    options: &Options,
) -> Result<String, SubstituteError> {
    let mut reader = TokenReader::new(tokens);
    let mut parts = Vec::new();
    loop {
        let token = reader.read();
        match token.kind {
            ArithmeticKind::Identifier => parts.push(numeric_text(root, token.literal, options)?),
            ArithmeticKind::EndOfInput => break,
            _ => parts.push(token.literal),
        }
    }
    // Tokens are space separated so that `return` and its operand stay apart.
    Ok(parts.join(" "))
}

/// Substitutes the tokens and evaluates the resulting expression.
pub fn substitute(
    root: &Value,
    tokens: Vec<ArithmeticToken>,
    evaluator: &dyn Evaluate,
    options: &Options,
) -> Result<Primitive, SubstituteError> {
    let expression = render(root, tokens, options)?;
    tracing::trace!(%expression, "evaluating substituted expression");
    Ok(evaluator.evaluate(&expression)?)
}

fn numeric_text(root: &Value, path: String, options: &Options) -> Result<String, SubstituteError> {
    let text = match path::resolve(root, &path, options.key_charset) {
        Ok(Value::Integer(n)) => n.to_string(),
        Ok(Value::Float(n)) => format_float(*n),
        Ok(_) => return Err(SubstituteError::NotNumeric { path }),
        // Constants are only used when the document has no such key.
        Err(_) if options.numeric_literals && is_number_literal(&path) => return Ok(path),
        Err(source) => return Err(SubstituteError::Unresolved { path, source }),
    };
    if text.starts_with('-') {
        return Ok(format!("({})", text));
    }
    Ok(text)
}

/// Digits with at most one interior `.`.
fn is_number_literal(text: &str) -> bool {
    let mut parts = text.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match parts.next() {
        Some(fraction) => digits(whole) && digits(fraction),
        None => digits(whole),
    }
}
