use crate::bytes::{is_digit, is_whitespace};
use crate::error::TokenizeError;
use crate::tokens::{Token, TokenKind};

/// A keyword literal matched byte by byte.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Keyword {
    spelling: &'static str,
    kind: TokenKind,
}

const TRUE: Keyword = Keyword {
    spelling: "true",
    kind: TokenKind::True,
};
const FALSE: Keyword = Keyword {
    spelling: "false",
    kind: TokenKind::False,
};
const NULL: Keyword = Keyword {
    spelling: "null",
    kind: TokenKind::Null,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Init,
    /// Inside a string opened at `start`; bytes from `run` onwards have not
    /// been copied into the buffer yet.
    String { start: usize, run: usize },
    Number,
    Float,
    /// `matched` bytes of `keyword` have been seen.
    Literal { keyword: Keyword, matched: usize },
}

/// Finite-state JSON tokenizer.
///
/// Scans the input once, left to right, tracking an explicit state instead
/// of backtracking. Keywords must be spelled out completely: `tru` or `nul`
/// is an error, never the start of another token.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    state: State,
    buffer: String,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            state: State::Init,
            buffer: String::new(),
            tokens: Vec::new(),
        }
    }

    fn current_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn byte_at(&self, position: usize) -> Option<u8> {
        self.input.as_bytes().get(position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn emit(&mut self, kind: TokenKind) {
        let literal = std::mem::take(&mut self.buffer);
        self.tokens.push(Token { kind, literal });
        self.state = State::Init;
    }

    fn emit_structural(&mut self, kind: TokenKind, b: u8) {
        self.tokens.push(Token::new(kind, (b as char).to_string()));
        self.advance();
    }

    /// Consumes the whole input and returns the token sequence.
    pub fn tokenize(mut self) -> Result<Vec<Token>, TokenizeError> {
        while let Some(b) = self.current_byte() {
            match self.state {
                State::Init => self.begin_token(b)?,
                State::String { start, run } => self.string_byte(b, start, run)?,
                State::Number => self.number_byte(b)?,
                State::Float => self.float_byte(b)?,
                State::Literal { keyword, matched } => self.literal_byte(b, keyword, matched)?,
            }
        }
        self.finish()?;
        Ok(self.tokens)
    }

    fn begin_token(&mut self, b: u8) -> Result<(), TokenizeError> {
        match b {
            b if is_whitespace(b) => self.advance(),
            b'{' => self.emit_structural(TokenKind::BeginObject, b),
            b'}' => self.emit_structural(TokenKind::EndObject, b),
            b'[' => self.emit_structural(TokenKind::BeginArray, b),
            b']' => self.emit_structural(TokenKind::EndArray, b),
            b':' => self.emit_structural(TokenKind::Colon, b),
            b',' => self.emit_structural(TokenKind::Comma, b),
            b'"' => {
                self.advance();
                self.state = State::String {
                    start: self.position - 1,
                    run: self.position,
                };
            }
            b'-' | b'0'..=b'9' => {
                self.buffer.push(b as char);
                self.advance();
                self.state = State::Number;
            }
            b't' | b'f' | b'n' => {
                let keyword = match b {
                    b't' => TRUE,
                    b'f' => FALSE,
                    _ => NULL,
                };
                self.buffer.push(b as char);
                self.advance();
                self.state = State::Literal {
                    keyword,
                    matched: 1,
                };
            }
            byte => {
                return Err(TokenizeError::UnexpectedByte {
                    byte,
                    offset: self.position,
                });
            }
        }
        Ok(())
    }

    fn string_byte(&mut self, b: u8, start: usize, run: usize) -> Result<(), TokenizeError> {
        match b {
            b'"' => {
                self.buffer.push_str(&self.input[run..self.position]);
                self.advance();
                self.emit(TokenKind::String);
            }
            b'\\' => {
                self.buffer.push_str(&self.input[run..self.position]);
                let ch = self.read_escape(start)?;
                self.buffer.push(ch);
                self.state = State::String {
                    start,
                    run: self.position,
                };
            }
            _ => self.advance(),
        }
        Ok(())
    }

    /// Decodes the escape sequence at the current backslash and moves past it.
    fn read_escape(&mut self, start: usize) -> Result<char, TokenizeError> {
        let offset = self.position;
        let escaped = self
            .byte_at(offset + 1)
            .ok_or(TokenizeError::UnterminatedString { offset: start })?;

        let ch = match escaped {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => return self.read_unicode_escape(),
            _ => return Err(TokenizeError::InvalidEscape { offset }),
        };
        self.position += 2;
        Ok(ch)
    }

    fn read_unicode_escape(&mut self) -> Result<char, TokenizeError> {
        let offset = self.position;
        let high = self.read_hex4(offset + 2)?;
        let code = match high {
            0xD800..=0xDBFF => {
                if self.byte_at(offset + 6) != Some(b'\\') || self.byte_at(offset + 7) != Some(b'u') {
                    return Err(TokenizeError::InvalidEscape { offset });
                }
                let low = self.read_hex4(offset + 8)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(TokenizeError::InvalidEscape { offset });
                }
                self.position += 12;
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(TokenizeError::InvalidEscape { offset }),
            code => {
                self.position += 6;
                code
            }
        };
        char::from_u32(code).ok_or(TokenizeError::InvalidEscape { offset })
    }

    fn read_hex4(&self, at: usize) -> Result<u32, TokenizeError> {
        let invalid = TokenizeError::InvalidEscape {
            offset: self.position,
        };
        let digits = self.input.as_bytes().get(at..at + 4).ok_or(invalid.clone())?;
        digits.iter().try_fold(0u32, |acc, &d| {
            (d as char)
                .to_digit(16)
                .map(|v| acc * 16 + v)
                .ok_or(invalid.clone())
        })
    }

    fn number_byte(&mut self, b: u8) -> Result<(), TokenizeError> {
        match b {
            b if is_digit(b) => {
                self.buffer.push(b as char);
                self.advance();
            }
            b'.' => {
                self.require_digits()?;
                self.buffer.push('.');
                self.advance();
                self.state = State::Float;
            }
            b'e' | b'E' => return Err(self.exponent_error()),
            _ => {
                self.require_digits()?;
                self.emit(TokenKind::Number);
            }
        }
        Ok(())
    }

    fn float_byte(&mut self, b: u8) -> Result<(), TokenizeError> {
        match b {
            b if is_digit(b) => {
                self.buffer.push(b as char);
                self.advance();
            }
            b'.' => {
                return Err(TokenizeError::InvalidNumber {
                    reason: "more than one decimal point",
                    offset: self.position,
                });
            }
            b'e' | b'E' => return Err(self.exponent_error()),
            _ => {
                self.require_fraction()?;
                self.emit(TokenKind::Float);
            }
        }
        Ok(())
    }

    fn require_digits(&self) -> Result<(), TokenizeError> {
        if self.buffer == "-" {
            return Err(TokenizeError::InvalidNumber {
                reason: "expected a digit after '-'",
                offset: self.position,
            });
        }
        Ok(())
    }

    fn require_fraction(&self) -> Result<(), TokenizeError> {
        if self.buffer.ends_with('.') {
            return Err(TokenizeError::InvalidNumber {
                reason: "expected a digit after '.'",
                offset: self.position,
            });
        }
        Ok(())
    }

    fn exponent_error(&self) -> TokenizeError {
        TokenizeError::InvalidNumber {
            reason: "exponent notation is not supported",
            offset: self.position,
        }
    }

    fn literal_byte(&mut self, b: u8, keyword: Keyword, matched: usize) -> Result<(), TokenizeError> {
        let spelling = keyword.spelling.as_bytes();
        if b != spelling[matched] {
            return Err(TokenizeError::InvalidLiteral {
                expected: keyword.spelling,
                offset: self.position,
            });
        }

        self.buffer.push(b as char);
        self.advance();
        if matched + 1 == spelling.len() {
            self.emit(keyword.kind);
        } else {
            self.state = State::Literal {
                keyword,
                matched: matched + 1,
            };
        }
        Ok(())
    }

    /// Flushes whatever token is still accumulating at end of input.
    fn finish(&mut self) -> Result<(), TokenizeError> {
        match self.state {
            State::Init => Ok(()),
            State::Number => {
                self.require_digits()?;
                self.emit(TokenKind::Number);
                Ok(())
            }
            State::Float => {
                self.require_fraction()?;
                self.emit(TokenKind::Float);
                Ok(())
            }
            State::String { start, .. } => Err(TokenizeError::UnterminatedString { offset: start }),
            State::Literal { keyword, .. } => Err(TokenizeError::InvalidLiteral {
                expected: keyword.spelling,
                offset: self.position,
            }),
        }
    }
}

/// Tokenizes JSON text.
pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizeError> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("true false null"),
        vec![TokenKind::True, TokenKind::False, TokenKind::Null]
    );
}

#[test]
fn test_structural() {
    use TokenKind::*;
    assert_eq!(
        kinds(r#"{"a":[1,2.5]}"#),
        vec![BeginObject, String, Colon, BeginArray, Number, Comma, Float, EndArray, EndObject]
    );
}

#[test]
fn test_partial_keyword_is_an_error() {
    assert!(matches!(
        tokenize("tr"),
        Err(TokenizeError::InvalidLiteral { expected: "true", .. })
    ));
    assert!(matches!(
        tokenize("nul,"),
        Err(TokenizeError::InvalidLiteral { expected: "null", offset: 3 })
    ));
}
