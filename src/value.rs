use std::collections::HashMap;

use crate::arithmetic;
use crate::error::{QueryError, SubstituteError};
use crate::evaluator::{Evaluate, ExpressionEvaluator};
use crate::options::{KeyCharset, Options};
use crate::path;
use crate::result::Result;

/// A decoded JSON value.
///
/// Integers and floats are kept apart: `10` decodes to [`Value::Integer`]
/// and `10.0` to [`Value::Float`].
///
/// # Examples
///
/// ```
/// use xjson::Value;
/// use std::collections::HashMap;
///
/// let array = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
///
/// let mut obj = HashMap::new();
/// obj.insert("list".to_string(), array);
/// let object = Value::Object(obj);
///
/// assert_eq!(object.get("list[1]").int(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Number with a decimal point
    Float(f64),

    /// Number without a decimal point
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Array of values
    Array(Vec<Value>),

    /// Object with string keys; a repeated key keeps its last value
    Object(HashMap<String, Value>),
}

impl Value {
    /// Resolves `path` against this value, reporting why it failed.
    ///
    /// ```
    /// use xjson::{decode, QueryError};
    ///
    /// let doc = decode(r#"{"score":{"math":[1,2]}}"#).unwrap();
    /// assert_eq!(doc.lookup("score.math[1]"), Ok(&xjson::Value::Integer(2)));
    /// assert!(matches!(doc.lookup("score.math[5]"), Err(QueryError::IndexOutOfRange { .. })));
    /// ```
    pub fn lookup(&self, path: &str) -> std::result::Result<&Value, QueryError> {
        path::resolve(self, path, KeyCharset::default())
    }

    /// Resolves `path` against this value. Any failure is an empty result.
    pub fn get(&self, path: &str) -> Result<'_> {
        self.get_with(path, KeyCharset::default())
    }

    /// Like [`Value::get`], with an explicit key character set.
    pub fn get_with(&self, path: &str, charset: KeyCharset) -> Result<'_> {
        match path::resolve(self, path, charset) {
            Ok(value) => Result::borrowed(value),
            Err(e) => {
                tracing::debug!(path, error = %e, "path did not resolve");
                Result::empty()
            }
        }
    }

    /// Substitutes every path in `expression` and evaluates it with the
    /// default [`ExpressionEvaluator`].
    ///
    /// ```
    /// let doc = xjson::decode(r#"{"age":10}"#).unwrap();
    /// assert_eq!(doc.arithmetic("(age+age)*age").int(), 200);
    /// ```
    pub fn arithmetic(&self, expression: &str) -> Result<'static> {
        self.arithmetic_with(expression, &ExpressionEvaluator::new(), &Options::default())
    }

    /// Substitutes every path in `expression` and hands the result to
    /// `evaluator`. Any failure is an empty result.
    pub fn arithmetic_with(
        &self,
        expression: &str,
        evaluator: &dyn Evaluate,
        options: &Options,
    ) -> Result<'static> {
        match self.try_arithmetic(expression, evaluator, options) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(expression, error = %e, "arithmetic query failed");
                Result::empty()
            }
        }
    }

    /// Fallible form of [`Value::arithmetic_with`].
    pub fn try_arithmetic(
        &self,
        expression: &str,
        evaluator: &dyn Evaluate,
        options: &Options,
    ) -> std::result::Result<Result<'static>, SubstituteError> {
        let tokens = arithmetic::tokenize(expression, options.key_charset)?;
        let primitive = arithmetic::substitute(self, tokens, evaluator, options)?;
        Ok(Result::from(primitive))
    }
}
