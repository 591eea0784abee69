use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::evaluator::Primitive;
use crate::output::{format_float, to_json};
use crate::value::Value;

/// Kind of a query [`Result`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Integer,
    Float,
    Bool,
    Null,
    Object,
    Array,
    /// The query found nothing or was invalid
    Empty,
}

/// Read view over a queried value.
///
/// Accessors never fail: each one coerces the value to the requested type
/// or falls back to that type's zero value. An [`Kind::Empty`] result
/// answers `""`, `0`, `0.0` and `false`.
///
/// ```
/// let doc = xjson::decode(r#"{"age":"200","ok":"T"}"#).unwrap();
///
/// assert_eq!(doc.get("age").int(), 200);
/// assert!(doc.get("ok").bool());
/// assert!(!doc.get("missing").exists());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Result<'a> {
    value: Option<Cow<'a, Value>>,
}

impl<'a> Result<'a> {
    /// A result viewing a value inside a decoded tree.
    pub fn borrowed(value: &'a Value) -> Self {
        Result {
            value: Some(Cow::Borrowed(value)),
        }
    }

    /// A result that owns its value.
    pub fn owned(value: Value) -> Self {
        Result {
            value: Some(Cow::Owned(value)),
        }
    }

    pub fn empty() -> Self {
        Result { value: None }
    }

    pub fn kind(&self) -> Kind {
        match self.value() {
            None => Kind::Empty,
            Some(Value::Null) => Kind::Null,
            Some(Value::Boolean(_)) => Kind::Bool,
            Some(Value::Integer(_)) => Kind::Integer,
            Some(Value::Float(_)) => Kind::Float,
            Some(Value::String(_)) => Kind::String,
            Some(Value::Array(_)) => Kind::Array,
            Some(Value::Object(_)) => Kind::Object,
        }
    }

    /// False only for [`Kind::Empty`]; a JSON null exists.
    pub fn exists(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_deref()
    }

    /// Detaches the result from the tree it was read from.
    pub fn into_owned(self) -> Result<'static> {
        Result {
            value: self.value.map(|v| Cow::Owned(v.into_owned())),
        }
    }

    /// Objects and arrays are rendered as compact JSON; null and empty
    /// results are `""`.
    pub fn string(&self) -> String {
        match self.value() {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Boolean(b)) => b.to_string(),
            Some(Value::Integer(n)) => n.to_string(),
            Some(Value::Float(n)) => format_float(*n),
            Some(v @ (Value::Array(_) | Value::Object(_))) => to_json(v),
        }
    }

    /// Floats are truncated toward zero; strings are parsed.
    pub fn int(&self) -> i64 {
        match self.value() {
            Some(Value::Integer(n)) => *n,
            Some(Value::Float(n)) => n.trunc() as i64,
            Some(Value::Boolean(b)) => i64::from(*b),
            Some(Value::String(s)) => s.parse().unwrap_or_default(),
            _ => 0,
        }
    }

    pub fn float(&self) -> f64 {
        match self.value() {
            Some(Value::Integer(n)) => *n as f64,
            Some(Value::Float(n)) => *n,
            Some(Value::Boolean(b)) => f64::from(u8::from(*b)),
            Some(Value::String(s)) => s.parse().unwrap_or_default(),
            _ => 0.0,
        }
    }

    /// Integers are true when non-zero. Strings accept `1 t T TRUE true True`
    /// and `0 f F FALSE false False`; anything else is false.
    pub fn bool(&self) -> bool {
        match self.value() {
            Some(Value::Boolean(b)) => *b,
            Some(Value::Integer(n)) => *n != 0,
            Some(Value::String(s)) => parse_bool(s).unwrap_or_default(),
            _ => false,
        }
    }

    /// Members of an object, empty for any other kind.
    pub fn map(&self) -> HashMap<&str, Result<'_>> {
        match self.value() {
            Some(Value::Object(obj)) => obj
                .iter()
                .map(|(k, v)| (k.as_str(), Result::borrowed(v)))
                .collect(),
            _ => HashMap::new(),
        }
    }

    /// Elements of an array, empty for any other kind.
    pub fn array(&self) -> Vec<Result<'_>> {
        match self.value() {
            Some(Value::Array(items)) => items.iter().map(Result::borrowed).collect(),
            _ => Vec::new(),
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl fmt::Display for Result<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string())
    }
}

impl From<Primitive> for Result<'static> {
    fn from(primitive: Primitive) -> Self {
        Result::owned(match primitive {
            Primitive::Integer(n) => Value::Integer(n),
            Primitive::Float(n) => Value::Float(n),
            Primitive::Bool(b) => Value::Boolean(b),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero_everywhere() {
        let empty = Result::empty();
        assert_eq!(empty.kind(), Kind::Empty);
        assert_eq!(empty.string(), "");
        assert_eq!(empty.int(), 0);
        assert_eq!(empty.float(), 0.0);
        assert!(!empty.bool());
        assert!(empty.map().is_empty());
        assert!(empty.array().is_empty());
    }

    #[test]
    fn test_null_exists() {
        let null = Result::owned(Value::Null);
        assert!(null.exists());
        assert_eq!(null.kind(), Kind::Null);
        assert_eq!(null.string(), "");
    }

    #[test]
    fn test_float_coercions() {
        let result = Result::owned(Value::Float(-2.7));
        assert_eq!(result.int(), -2);
        assert_eq!(result.string(), "-2.7");
        assert!(!result.bool());
    }

    #[test]
    fn test_bool_parse_set() {
        for s in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(Result::owned(Value::String(s.to_string())).bool(), "{}", s);
        }
        for s in ["0", "f", "F", "FALSE", "false", "False", "yes", "tRuE"] {
            assert!(!Result::owned(Value::String(s.to_string())).bool(), "{}", s);
        }
    }
}
