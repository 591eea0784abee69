use std::collections::HashMap;

use crate::error::ParseError;
use crate::expect::{Expect, ExpectSet};
use crate::options::{NullMode, Options};
use crate::tokens::{Token, TokenKind, TokenReader};
use crate::value::Value;

/// Positions the parser may accept next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    ObjectKey,
    Colon,
    ObjectValue,
    Comma,
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    ArrayValue,
    EndOfInput,
}

impl Expect for Status {
    fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// A container under construction.
///
/// Each frame owns its container; a finished container is moved into the
/// frame below it, never copied or shared.
#[derive(Debug)]
enum Frame {
    Object(HashMap<String, Value>),
    /// Key waiting for its value, sitting above its object
    ObjectKey(String),
    Array(Vec<Value>),
}

/// Stack-based JSON parser driven by a set of valid next tokens.
pub struct Parser {
    reader: TokenReader<Token>,
    stack: Vec<Frame>,
    expected: ExpectSet<Status>,
    root: Option<Value>,
    depth: usize,
    options: Options,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, Options::default())
    }

    pub fn with_options(tokens: Vec<Token>, options: Options) -> Self {
        Parser {
            reader: TokenReader::new(tokens),
            stack: Vec::new(),
            expected: ExpectSet::of(&[Status::BeginObject, Status::BeginArray]),
            root: None,
            depth: 0,
            options,
        }
    }

    fn expect(&mut self, members: &[Status]) {
        self.expected = ExpectSet::of(members);
    }

    fn unexpected(token: Token) -> ParseError {
        ParseError::UnexpectedToken {
            kind: token.kind,
            literal: token.literal,
        }
    }

    /// Consumes every token and returns the document root.
    pub fn parse(mut self) -> Result<Value, ParseError> {
        loop {
            let token = self.reader.read();
            match token.kind {
                TokenKind::BeginObject => self.begin_object(token)?,
                TokenKind::BeginArray => self.begin_array(token)?,
                TokenKind::String => self.string(token)?,
                TokenKind::Number
                | TokenKind::Float
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null => self.scalar(token)?,
                TokenKind::Colon => self.colon(token)?,
                TokenKind::Comma => self.comma(token)?,
                TokenKind::EndObject | TokenKind::EndArray => self.end_container(token)?,
                TokenKind::EndOfInput => return self.finish(),
            }
        }
    }

    fn begin_object(&mut self, token: Token) -> Result<(), ParseError> {
        if !self.expected.contains(Status::BeginObject) {
            return Err(Self::unexpected(token));
        }
        self.enter()?;
        self.stack.push(Frame::Object(HashMap::new()));
        self.expect(&[Status::ObjectKey, Status::EndObject]);
        Ok(())
    }

    fn begin_array(&mut self, token: Token) -> Result<(), ParseError> {
        if !self.expected.contains(Status::BeginArray) {
            return Err(Self::unexpected(token));
        }
        self.enter()?;
        self.stack.push(Frame::Array(Vec::new()));
        self.expect(&[
            Status::ArrayValue,
            Status::BeginArray,
            Status::BeginObject,
            Status::EndArray,
        ]);
        Ok(())
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::DepthLimit(self.options.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    fn string(&mut self, token: Token) -> Result<(), ParseError> {
        if self.expected.contains(Status::ObjectKey) {
            self.stack.push(Frame::ObjectKey(token.literal));
            self.expect(&[Status::Colon]);
            return Ok(());
        }
        self.scalar(token)
    }

    fn scalar(&mut self, token: Token) -> Result<(), ParseError> {
        if !self.expected.contains(Status::ObjectValue) && !self.expected.contains(Status::ArrayValue) {
            return Err(Self::unexpected(token));
        }

        let value = match token.kind {
            TokenKind::String => Value::String(token.literal),
            TokenKind::Number => token
                .literal
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| ParseError::InvalidNumber(token.literal))?,
            TokenKind::Float => match token.literal.parse::<f64>() {
                Ok(n) if n.is_finite() => Value::Float(n),
                _ => return Err(ParseError::InvalidNumber(token.literal)),
            },
            TokenKind::True => Value::Boolean(true),
            TokenKind::False => Value::Boolean(false),
            TokenKind::Null => match self.options.null_mode {
                NullMode::Distinct => Value::Null,
                NullMode::EmptyString => Value::String(String::new()),
            },
            _ => return Err(Self::unexpected(token)),
        };
        self.attach(value)
    }

    fn colon(&mut self, token: Token) -> Result<(), ParseError> {
        if !self.expected.contains(Status::Colon) {
            return Err(Self::unexpected(token));
        }
        self.expect(&[Status::ObjectValue, Status::BeginObject, Status::BeginArray]);
        Ok(())
    }

    fn comma(&mut self, token: Token) -> Result<(), ParseError> {
        if !self.expected.contains(Status::Comma) {
            return Err(Self::unexpected(token));
        }
        // The closer that was legal before the comma tells which container
        // we are in.
        if self.expected.contains(Status::EndObject) {
            self.expect(&[Status::ObjectKey]);
        } else {
            self.expect(&[Status::ArrayValue, Status::BeginArray, Status::BeginObject]);
        }
        Ok(())
    }

    fn end_container(&mut self, token: Token) -> Result<(), ParseError> {
        let closer = match token.kind {
            TokenKind::EndObject => Status::EndObject,
            _ => Status::EndArray,
        };
        if !self.expected.contains(closer) {
            return Err(Self::unexpected(token));
        }

        let value = match (closer, self.stack.pop()) {
            (Status::EndObject, Some(Frame::Object(map))) => Value::Object(map),
            (Status::EndArray, Some(Frame::Array(items))) => Value::Array(items),
            _ => return Err(Self::unexpected(token)),
        };
        self.depth -= 1;
        self.attach(value)
    }

    /// Places a finished value into the container on top of the stack, or
    /// makes it the document root when the stack is empty.
    fn attach(&mut self, value: Value) -> Result<(), ParseError> {
        match self.stack.pop() {
            None => {
                self.root = Some(value);
                self.expect(&[Status::EndOfInput]);
            }
            Some(Frame::ObjectKey(key)) => match self.stack.last_mut() {
                Some(Frame::Object(map)) => {
                    map.insert(key, value);
                    self.expect(&[Status::Comma, Status::EndObject]);
                }
                _ => return Err(ParseError::UnexpectedEof),
            },
            Some(Frame::Array(mut items)) => {
                items.push(value);
                self.stack.push(Frame::Array(items));
                self.expect(&[Status::Comma, Status::EndArray]);
            }
            Some(frame @ Frame::Object(_)) => {
                self.stack.push(frame);
                return Err(ParseError::UnexpectedEof);
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<Value, ParseError> {
        if !self.expected.is_only(Status::EndOfInput) || !self.stack.is_empty() {
            return Err(ParseError::UnexpectedEof);
        }
        self.root.take().ok_or(ParseError::UnexpectedEof)
    }
}

/// Parses a token sequence with default options.
pub fn parse(tokens: Vec<Token>) -> Result<Value, ParseError> {
    Parser::new(tokens).parse()
}
