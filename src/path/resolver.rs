use crate::error::QueryError;
use crate::expect::{Expect, ExpectSet};
use crate::options::KeyCharset;
use crate::path::lexer::{self, GrammarKind, GrammarToken};
use crate::tokens::TokenReader;
use crate::value::Value;

impl Expect for GrammarKind {
    fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// Walks a value tree along a tokenized path.
pub struct Resolver<'v> {
    reader: TokenReader<GrammarToken>,
    current: &'v Value,
    expected: ExpectSet<GrammarKind>,
}

impl<'v> Resolver<'v> {
    pub fn new(root: &'v Value, tokens: Vec<GrammarToken>) -> Self {
        Resolver {
            reader: TokenReader::new(tokens),
            current: root,
            expected: ExpectSet::of(&[GrammarKind::Key]),
        }
    }

    fn expect(&mut self, members: &[GrammarKind]) {
        self.expected = ExpectSet::of(members);
    }

    pub fn resolve(mut self) -> Result<&'v Value, QueryError> {
        loop {
            let token = self.reader.read();
            if !self.expected.contains(token.kind) {
                // A path that still wants a key at its end has a dangling `.`
                // (or is empty).
                let near = match token.kind {
                    GrammarKind::EndOfInput => "<end of path>".to_string(),
                    _ => token.literal,
                };
                return Err(QueryError::Syntax(near));
            }

            tracing::trace!(kind = ?token.kind, literal = %token.literal, "resolving path token");
            match token.kind {
                GrammarKind::Key => {
                    self.current = self.key(token.literal)?;
                    self.expect(&[
                        GrammarKind::Dot,
                        GrammarKind::BeginArrayIndex,
                        GrammarKind::EndOfInput,
                    ]);
                }
                GrammarKind::Dot => self.expect(&[GrammarKind::Key]),
                GrammarKind::BeginArrayIndex => self.expect(&[GrammarKind::ArrayIndex]),
                GrammarKind::ArrayIndex => {
                    self.current = self.index(token.literal)?;
                    self.expect(&[GrammarKind::EndArrayIndex]);
                }
                GrammarKind::EndArrayIndex => self.expect(&[
                    GrammarKind::Dot,
                    GrammarKind::BeginArrayIndex,
                    GrammarKind::EndOfInput,
                ]),
                GrammarKind::EndOfInput => return Ok(self.current),
            }
        }
    }

    fn key(&self, key: String) -> Result<&'v Value, QueryError> {
        let Value::Object(map) = self.current else {
            return Err(QueryError::NotAnObject(key));
        };
        map.get(&key).ok_or(QueryError::MissingKey(key))
    }

    fn index(&self, index: String) -> Result<&'v Value, QueryError> {
        let Value::Array(items) = self.current else {
            return Err(QueryError::NotAnArray(index));
        };
        index
            .parse::<usize>()
            .ok()
            .and_then(|i| items.get(i))
            .ok_or(QueryError::IndexOutOfRange {
                index,
                len: items.len(),
            })
    }
}

/// Tokenizes `path` and resolves it against `root`.
pub fn resolve<'v>(root: &'v Value, path: &str, charset: KeyCharset) -> Result<&'v Value, QueryError> {
    let tokens = lexer::tokenize(path, charset)?;
    Resolver::new(root, tokens).resolve()
}
