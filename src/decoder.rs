//! Text-level entry points.
//!
//! [`decode`] is the only fallible one. The query functions [`get`] and
//! [`get_with_arithmetic`] fold every failure (malformed JSON, a path that
//! does not resolve, an expression the evaluator rejects) into an empty
//! [`Result`], logging the reason at `debug` level.

use crate::error::{Error, SubstituteError};
use crate::evaluator::{Evaluate, ExpressionEvaluator};
use crate::lexer;
use crate::options::Options;
use crate::parser::Parser;
use crate::result::Result;
use crate::value::Value;

/// Decodes and queries JSON text with a fixed set of [`Options`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: Options,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Decoder { options }
    }

    /// Decodes `text` into a value tree. The root must be an object or an
    /// array.
    pub fn decode(&self, text: &str) -> std::result::Result<Value, Error> {
        let tokens = lexer::tokenize(text)?;
        let value = Parser::with_options(tokens, self.options).parse()?;
        Ok(value)
    }

    /// Decodes `json` and resolves `path` against it.
    pub fn get(&self, json: &str, path: &str) -> Result<'static> {
        match self.decode(json) {
            Ok(value) => value.get_with(path, self.options.key_charset).into_owned(),
            Err(e) => {
                tracing::debug!(path, error = %e, "query input is not valid JSON");
                Result::empty()
            }
        }
    }

    /// Decodes `json` and evaluates `expression` with the default
    /// [`ExpressionEvaluator`].
    pub fn get_with_arithmetic(&self, json: &str, expression: &str) -> Result<'static> {
        self.get_with_evaluator(json, expression, &ExpressionEvaluator::new())
    }

    /// Decodes `json`, substitutes the paths in `expression` and hands the
    /// result to `evaluator`.
    pub fn get_with_evaluator(
        &self,
        json: &str,
        expression: &str,
        evaluator: &dyn Evaluate,
    ) -> Result<'static> {
        match self.try_get_with_evaluator(json, expression, evaluator) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(expression, error = %e, "arithmetic query failed");
                Result::empty()
            }
        }
    }

    /// Fallible form of [`Decoder::get_with_evaluator`].
    ///
    /// ```
    /// use xjson::{Decoder, ExpressionEvaluator, SubstituteError};
    ///
    /// let decoder = Decoder::new();
    /// let err = decoder
    ///     .try_get_with_evaluator(r#"{"name":"bob"}"#, "name + 1", &ExpressionEvaluator::new())
    ///     .unwrap_err();
    /// assert!(matches!(err, SubstituteError::NotNumeric { .. }));
    /// ```
    pub fn try_get_with_evaluator(
        &self,
        json: &str,
        expression: &str,
        evaluator: &dyn Evaluate,
    ) -> std::result::Result<Result<'static>, SubstituteError> {
        let value = self.decode(json)?;
        value.try_arithmetic(expression, evaluator, &self.options)
    }
}

/// Decodes `text` with default [`Options`].
///
/// ```
/// use xjson::{decode, Value};
///
/// let value = decode(r#"{"name":"xjson","tags":[1,2.5,null]}"#).unwrap();
/// assert_eq!(value.get("tags[1]").float(), 2.5);
///
/// assert!(decode(r#"{"name":[}"#).is_err());
/// assert!(decode("10").is_err());
/// ```
pub fn decode(text: &str) -> std::result::Result<Value, Error> {
    Decoder::new().decode(text)
}

/// Resolves `path` in `json`.
///
/// ```
/// let json = r#"{"people":[{"bob":{"age":"200"}}]}"#;
/// assert_eq!(xjson::get(json, "people[0].bob.age").int(), 200);
/// assert!(!xjson::get(json, "people[1]").exists());
/// ```
pub fn get(json: &str, path: &str) -> Result<'static> {
    Decoder::new().get(json, path)
}

/// Evaluates an arithmetic or control expression over `json`.
///
/// ```
/// let json = r#"{"age":10,"magic":10.1}"#;
/// assert_eq!(xjson::get_with_arithmetic(json, "(age+age)*age+magic").float(), 210.1);
/// assert!(xjson::get_with_arithmetic(json, "if magic > age { return true; }").bool());
///
/// // Every identifier is a path, so a bare constant does not resolve.
/// assert!(!xjson::get_with_arithmetic(json, "age * 2").exists());
/// ```
pub fn get_with_arithmetic(json: &str, expression: &str) -> Result<'static> {
    Decoder::new().get_with_arithmetic(json, expression)
}
