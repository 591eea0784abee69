use crate::bytes::{is_digit, is_key_byte};
use crate::error::PathError;
use crate::options::KeyCharset;
use crate::tokens::EndOfInput;

/// Kind of a path token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarKind {
    /// Object key, with escapes already removed
    Key,

    /// `.` between keys
    Dot,

    /// `[`
    BeginArrayIndex,

    /// Decimal digits between `[` and `]`
    ArrayIndex,

    /// `]`
    EndArrayIndex,

    /// Past the last token
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrammarToken {
    pub kind: GrammarKind,
    pub literal: String,
}

impl EndOfInput for GrammarToken {
    fn end_of_input() -> Self {
        GrammarToken {
            kind: GrammarKind::EndOfInput,
            literal: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Init,
    Key,
    ArrayIndex,
}

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    state: State,
    buffer: String,
    tokens: Vec<GrammarToken>,
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

    fn emit(&mut self, kind: GrammarKind) {
        let literal = std::mem::take(&mut self.buffer);
        self.tokens.push(GrammarToken { kind, literal });
    }

    fn emit_symbol(&mut self, kind: GrammarKind, symbol: &str) {
        self.tokens.push(GrammarToken {
            kind,
            literal: symbol.to_string(),
        });
    }

    fn is_key_byte(&self, b: u8) -> bool {
        is_key_byte(b, self.charset) || is_digit(b)
    }

    pub fn tokenize(mut self) -> Result<Vec<GrammarToken>, PathError> {
        while let Some(b) = self.current_byte() {
            match self.state {
                State::Init => self.begin_token(b)?,
                State::Key => self.key_byte(b)?,
                State::ArrayIndex => self.index_byte(b)?,
            }
        }

        match self.state {
            State::Init => {}
            State::Key => self.emit(GrammarKind::Key),
            State::ArrayIndex => return Err(PathError::UnterminatedArrayIndex),
        }
        Ok(self.tokens)
    }

    fn begin_token(&mut self, b: u8) -> Result<(), PathError> {
        match b {
            b'\\' => {
                self.read_escape()?;
                self.state = State::Key;
            }
            b'.' => {
                self.emit_symbol(GrammarKind::Dot, ".");
                self.advance();
            }
            b'[' => self.open_index(),
            b if self.is_key_byte(b) => {
                self.push_key_byte();
                self.state = State::Key;
            }
            byte => {
                return Err(PathError::UnexpectedByte {
                    byte,
                    offset: self.position,
                });
            }
        }
        Ok(())
    }

    fn key_byte(&mut self, b: u8) -> Result<(), PathError> {
        match b {
            b'\\' => self.read_escape()?,
            b'[' => {
                self.emit(GrammarKind::Key);
                self.open_index();
            }
            b if self.is_key_byte(b) => self.push_key_byte(),
            _ => {
                self.emit(GrammarKind::Key);
                self.state = State::Init;
            }
        }
        Ok(())
    }

    fn index_byte(&mut self, b: u8) -> Result<(), PathError> {
        match b {
            b if is_digit(b) => {
                self.buffer.push(b as char);
                self.advance();
            }
            b']' if !self.buffer.is_empty() => {
                self.emit(GrammarKind::ArrayIndex);
                self.emit_symbol(GrammarKind::EndArrayIndex, "]");
                self.advance();
                self.state = State::Init;
            }
            _ => {
                return Err(PathError::InvalidArrayIndex {
                    offset: self.position,
                });
            }
        }
        Ok(())
    }

    fn open_index(&mut self) {
        self.emit_symbol(GrammarKind::BeginArrayIndex, "[");
        self.advance();
        self.state = State::ArrayIndex;
    }

    /// Copies the character at the current position, whole if multi-byte.
    fn push_key_byte(&mut self) {
        if let Some(ch) = self.input[self.position..].chars().next() {
            self.buffer.push(ch);
            self.position += ch.len_utf8();
        }
    }

    /// Appends the character after a backslash verbatim.
    fn read_escape(&mut self) -> Result<(), PathError> {
        let ch = self.input[self.position + 1..]
            .chars()
            .next()
            .ok_or(PathError::DanglingEscape)?;
        self.buffer.push(ch);
        self.position += 1 + ch.len_utf8();
        Ok(())
    }
}

/// Tokenizes a path expression.
pub fn tokenize(path: &str, charset: KeyCharset) -> Result<Vec<GrammarToken>, PathError> {
    Lexer::new(path, charset).tokenize()
}
