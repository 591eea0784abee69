//! Decoding and query configuration.

/// How JSON `null` is stored in the decoded tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NullMode {
    /// `null` decodes to [`Value::Null`](crate::Value::Null).
    #[default]
    Distinct,

    /// `null` decodes to an empty string, which makes `""` and `null`
    /// indistinguishable. Kept for callers relying on the older behavior.
    EmptyString,
}

/// Which bytes may form an unescaped path key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyCharset {
    /// ASCII letters, digits, `_` and any non-ASCII byte.
    #[default]
    Alphanumeric,

    /// The raw byte range `A`..=`z` plus digits, which also admits
    /// `\`, `^`, `_` and `` ` ``.
    Legacy,
}

/// Options for [`Decoder`](crate::Decoder).
///
/// # Examples
///
/// ```
/// use xjson::{Decoder, NullMode, Options};
///
/// let options = Options {
///     null_mode: NullMode::EmptyString,
///     ..Options::default()
/// };
/// let value = Decoder::with_options(options).decode(r#"{"a":null}"#).unwrap();
/// assert_eq!(value.get("a").kind(), xjson::Kind::String);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Representation of JSON `null`
    pub null_mode: NullMode,
    /// Key bytes accepted by path and arithmetic expressions
    pub key_charset: KeyCharset,
    /// Maximum container nesting accepted by the parser
    pub max_depth: usize,
    /// Let arithmetic identifiers such as `2` or `0.5` stand for
    /// themselves when the document has no key of that name. Off by
    /// default: every identifier must resolve to a number in the document.
    pub numeric_literals: bool,
}

pub const DEFAULT_MAX_DEPTH: usize = 512;

impl Default for Options {
    fn default() -> Self {
        Options {
            null_mode: NullMode::default(),
            key_charset: KeyCharset::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            numeric_literals: false,
        }
    }
}
