//! JSON serialization for decoded values.
//!
//! Output is deterministic: object keys are sorted, and floats always carry
//! a decimal point so that re-decoding yields a [`Value::Float`] again.
//!
//! # Examples
//!
//! ```
//! use xjson::Value;
//! use xjson::output::{to_json, to_json_pretty};
//!
//! let value = Value::Array(vec![Value::Integer(1), Value::Float(2.0)]);
//!
//! assert_eq!(to_json(&value), "[1,2.0]");
//! assert_eq!(to_json_pretty(&value), "[\n  1,\n  2.0\n]");
//! ```

use std::collections::HashMap;

use crate::value::Value;

/// Renders a float the way numbers are substituted into arithmetic
/// expressions: shortest round-trip form, with `.0` added to whole values.
///
/// ```
/// use xjson::output::format_float;
///
/// assert_eq!(format_float(10.1), "10.1");
/// assert_eq!(format_float(3.0), "3.0");
/// ```
pub fn format_float(n: f64) -> String {
    let text = n.to_string();
    if n.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        self.print_value(value, 0)
    }

    fn print_value(&self, value: &Value, indent: usize) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            // JSON has no NaN or infinity
            Value::Float(n) if !n.is_finite() => "null".to_string(),
            Value::Float(n) => format_float(*n),
            Value::String(s) => format!("\"{}\"", escape_string(s)),
            Value::Array(arr) => self.print_array(arr, indent),
            Value::Object(obj) => self.print_object(obj, indent),
        }
    }

    fn print_array(&self, arr: &[Value], indent: usize) -> String {
        if arr.is_empty() {
            return "[]".to_string();
        }

        let items: Vec<String> = arr
            .iter()
            .map(|v| self.print_value(v, indent + 1))
            .collect();
        self.wrap('[', ']', items, indent)
    }

    fn print_object(&self, obj: &HashMap<String, Value>, indent: usize) -> String {
        if obj.is_empty() {
            return "{}".to_string();
        }

        // Sort keys for deterministic output
        let mut entries: Vec<_> = obj.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let separator = if self.pretty { ": " } else { ":" };
        let items: Vec<String> = entries
            .into_iter()
            .map(|(k, v)| {
                format!(
                    "\"{}\"{}{}",
                    escape_string(k),
                    separator,
                    self.print_value(v, indent + 1)
                )
            })
            .collect();
        self.wrap('{', '}', items, indent)
    }

    fn wrap(&self, open: char, close: char, items: Vec<String>, indent: usize) -> String {
        if !self.pretty {
            return format!("{}{}{}", open, items.join(","), close);
        }

        let inner = self.indent(indent + 1);
        let mut result = format!("{}\n", open);
        let lines: Vec<String> = items.iter().map(|item| format!("{}{}", inner, item)).collect();
        result.push_str(&lines.join(",\n"));
        result.push('\n');
        result.push_str(&self.indent(indent));
        result.push(close);
        result
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }
}

fn escape_string(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '"' => vec!['\\', '"'],
            '\\' => vec!['\\', '\\'],
            '\n' => vec!['\\', 'n'],
            '\r' => vec!['\\', 'r'],
            '\t' => vec!['\\', 't'],
            c if c.is_control() => format!("\\u{:04x}", c as u32).chars().collect(),
            c => vec![c],
        })
        .collect()
}

/// Converts a value to compact JSON.
///
/// ```
/// use xjson::Value;
/// use xjson::output::to_json;
/// use std::collections::HashMap;
///
/// let mut obj = HashMap::new();
/// obj.insert("name".to_string(), Value::String("Alice".to_string()));
/// obj.insert("age".to_string(), Value::Integer(30));
///
/// assert_eq!(to_json(&Value::Object(obj)), r#"{"age":30,"name":"Alice"}"#);
/// ```
pub fn to_json(value: &Value) -> String {
    JsonPrinter::new(false).print(value)
}

/// Converts a value to JSON with 2-space indentation, one element or
/// property per line.
pub fn to_json_pretty(value: &Value) -> String {
    JsonPrinter::new(true).print(value)
}
