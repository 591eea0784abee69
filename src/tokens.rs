/// Kind of a JSON token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural
    /// `{`
    BeginObject,

    /// `}`
    EndObject,

    /// `[`
    BeginArray,

    /// `]`
    EndArray,

    /// `:` between an object key and its value
    Colon,

    /// `,` between members or elements
    Comma,

    // Literals
    /// String literal; the token literal holds the unescaped content
    /// without the surrounding quotes
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "tab\there"
    /// ```
    String,

    /// Integer literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -10
    /// ```
    Number,

    /// Decimal literal with exactly one `.`
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// -0.5
    /// ```
    Float,

    /// `true`
    True,

    /// `false`
    False,

    /// `null`
    Null,

    /// Past the last token
    EndOfInput,
}

/// A classified fragment of JSON text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Token {
            kind,
            literal: literal.into(),
        }
    }
}

/// Sentinel a [`TokenReader`] hands out once its tokens are exhausted.
pub trait EndOfInput {
    fn end_of_input() -> Self;
}

impl EndOfInput for Token {
    fn end_of_input() -> Self {
        Token::new(TokenKind::EndOfInput, "")
    }
}

/// Pull-style reader over a token sequence.
///
/// Every token is handed out exactly once, left to right. Reading past the
/// end keeps returning the end-of-input sentinel.
#[derive(Debug)]
pub struct TokenReader<T> {
    tokens: std::vec::IntoIter<T>,
}

impl<T: EndOfInput> TokenReader<T> {
    pub fn new(tokens: Vec<T>) -> Self {
        TokenReader {
            tokens: tokens.into_iter(),
        }
    }

    pub fn read(&mut self) -> T {
        self.tokens.next().unwrap_or_else(T::end_of_input)
    }
}

#[test]
fn test_reader_returns_sentinel_past_end() {
    let mut reader = TokenReader::new(vec![Token::new(TokenKind::BeginObject, "{")]);
    assert_eq!(reader.read().kind, TokenKind::BeginObject);
    assert_eq!(reader.read().kind, TokenKind::EndOfInput);
    assert_eq!(reader.read().kind, TokenKind::EndOfInput);
}
