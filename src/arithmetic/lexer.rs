use crate::bytes::{is_identifier_byte, is_whitespace};
use crate::error::ArithmeticError;
use crate::options::KeyCharset;
use crate::tokens::EndOfInput;

/// Kind of an arithmetic/grammar token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticKind {
    /// Path expression or numeric literal
    ///
    /// # Examples
    /// ```text
    /// age
    /// score.math[1]
    /// 10.5
    /// ```
    Identifier,

    // Arithmetic
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,

    // Comparison
    /// `==`
    Equals,
    /// `!=`
    NotEquals,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,

    // Keywords
    /// `if`
    If,
    /// `else`
    Else,
    /// `return`
    Return,
    /// `true`
    True,
    /// `false`
    False,

    // Delimiters
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `;`
    Semicolon,

    /// Past the last token
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticToken {
    pub kind: ArithmeticKind,
    pub literal: String,
}

impl ArithmeticToken {
    pub fn new(kind: ArithmeticKind, literal: impl Into<String>) -> Self {
        ArithmeticToken {
            kind,
            literal: literal.into(),
        }
    }
}

impl EndOfInput for ArithmeticToken {
    fn end_of_input() -> Self {
        ArithmeticToken::new(ArithmeticKind::EndOfInput, "")
    }
}

/// Completed identifiers with one of these spellings become keywords;
/// anything else, including a keyword prefix such as `ret`, stays an
/// identifier.
const KEYWORDS: &[(&str, ArithmeticKind)] = &[
    ("if", ArithmeticKind::If),
    ("else", ArithmeticKind::Else),
    ("return", ArithmeticKind::Return),
    ("true", ArithmeticKind::True),
    ("false", ArithmeticKind::False),
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Init,
    Identifier,
    /// Saw the first byte of an operator that may take a trailing `=`.
    Operator(u8),
}

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    state: State,
    buffer: String,
    tokens: Vec<ArithmeticToken>,
    charset: KeyCharset,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, charset: KeyCharset) -> Self {
        Lexer {
            input,
            position: 0,
            state: State::Init,
            buffer: String::new(),
            tokens: Vec::new(),
            charset,
        }
    }

    fn current_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn emit(&mut self, kind: ArithmeticKind, literal: &str) {
        self.tokens.push(ArithmeticToken::new(kind, literal));
        self.state = State::Init;
    }

    pub fn tokenize(mut self) -> Result<Vec<ArithmeticToken>, ArithmeticError> {
        while let Some(b) = self.current_byte() {
            match self.state {
                State::Init => self.begin_token(b)?,
                State::Identifier => match b {
                    b'\\' => self.read_escape()?,
                    b if is_identifier_byte(b, self.charset) => self.push_char(),
                    _ => self.flush_identifier(),
                },
                State::Operator(first) => self.finish_operator(first, Some(b))?,
            }
        }

        match self.state {
            State::Init => {}
            State::Identifier => self.flush_identifier(),
            State::Operator(first) => self.finish_operator(first, None)?,
        }
        Ok(self.tokens)
    }

    fn begin_token(&mut self, b: u8) -> Result<(), ArithmeticError> {
        let single = match b {
            b'+' => Some((ArithmeticKind::Plus, "+")),
            b'-' => Some((ArithmeticKind::Minus, "-")),
            b'*' => Some((ArithmeticKind::Star, "*")),
            b'/' => Some((ArithmeticKind::Slash, "/")),
            b'(' => Some((ArithmeticKind::LeftParen, "(")),
            b')' => Some((ArithmeticKind::RightParen, ")")),
            b'{' => Some((ArithmeticKind::LeftBrace, "{")),
            b'}' => Some((ArithmeticKind::RightBrace, "}")),
            b';' => Some((ArithmeticKind::Semicolon, ";")),
            _ => None,
        };
        if let Some((kind, literal)) = single {
            self.emit(kind, literal);
            self.advance();
            return Ok(());
        }

        match b {
            b if is_whitespace(b) => self.advance(),
            b'=' | b'!' | b'<' | b'>' => {
                self.state = State::Operator(b);
                self.advance();
            }
            b'\\' => {
                self.read_escape()?;
                self.state = State::Identifier;
            }
            b if is_identifier_byte(b, self.charset) => {
                self.push_char();
                self.state = State::Identifier;
            }
            byte => {
                return Err(ArithmeticError::UnexpectedByte {
                    byte,
                    offset: self.position,
                });
            }
        }
        Ok(())
    }

    /// Emits `==`, `!=`, `<=`, `>=`, `<` or `>`. A lone `=` or `!` is an error.
    fn finish_operator(&mut self, first: u8, next: Option<u8>) -> Result<(), ArithmeticError> {
        if next == Some(b'=') {
            let (kind, literal) = match first {
                b'=' => (ArithmeticKind::Equals, "=="),
                b'!' => (ArithmeticKind::NotEquals, "!="),
                b'<' => (ArithmeticKind::LessEqual, "<="),
                _ => (ArithmeticKind::GreaterEqual, ">="),
            };
            self.emit(kind, literal);
            self.advance();
            return Ok(());
        }

        match first {
            b'<' => self.emit(ArithmeticKind::LessThan, "<"),
            b'>' => self.emit(ArithmeticKind::GreaterThan, ">"),
            byte => {
                return Err(ArithmeticError::UnexpectedByte {
                    byte,
                    offset: self.position - 1,
                });
            }
        }
        Ok(())
    }

    fn push_char(&mut self) {
        if let Some(ch) = self.input[self.position..].chars().next() {
            self.buffer.push(ch);
            self.position += ch.len_utf8();
        }
    }

    /// Keeps the backslash and the escaped character so the path lexer can
    /// interpret the escape when the identifier is resolved.
    fn read_escape(&mut self) -> Result<(), ArithmeticError> {
        let ch = self.input[self.position + 1..]
            .chars()
            .next()
            .ok_or(ArithmeticError::DanglingEscape)?;
        self.buffer.push('\\');
        self.buffer.push(ch);
        self.position += 1 + ch.len_utf8();
        Ok(())
    }

    fn flush_identifier(&mut self) {
        let literal = std::mem::take(&mut self.buffer);
        let kind = KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == literal)
            .map(|(_, kind)| *kind)
            .unwrap_or(ArithmeticKind::Identifier);
        self.tokens.push(ArithmeticToken { kind, literal });
        self.state = State::Init;
    }
}

/// Tokenizes an arithmetic or control expression.
pub fn tokenize(expression: &str, charset: KeyCharset) -> Result<Vec<ArithmeticToken>, ArithmeticError> {
    Lexer::new(expression, charset).tokenize()
}

#[test]
fn test_keyword_prefix_stays_identifier() {
    let tokens = tokenize("iffy ret return", KeyCharset::default()).unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ArithmeticKind::Identifier,
            ArithmeticKind::Identifier,
            ArithmeticKind::Return
        ]
    );
}

#[test]
fn test_lone_assignment_is_rejected() {
    assert_eq!(
        tokenize("a = b", KeyCharset::default()),
        Err(ArithmeticError::UnexpectedByte {
            byte: b'=',
            offset: 2
        })
    );
    assert!(tokenize("a !", KeyCharset::default()).is_err());
}
