//! Builds a [`Value`] tree from a token queue.
//!
//! Parsing never fails as a whole. A structural violation abandons the
//! nesting level it occurs in, which yields [`Value::Null`] for that subtree,
//! and parsing carries on in the enclosing level with whatever tokens are
//! left. Tokens consumed before the violation are not given back, so the
//! enclosing level may hit a violation of its own.
//!
//! # Examples
//!
//! ```rust
//! use serjson::{Reassembler, Value, parse};
//!
//! let mut r = Reassembler::default();
//! r.push(br#"{"mode":0,"on":true}"#).unwrap();
//! let mut tokens = r.finish_message();
//! let value = parse(&mut tokens);
//! assert_eq!(value.get("mode"), Some(&Value::Integer(0)));
//! assert_eq!(value.get("on"), Some(&Value::Boolean(true)));
//! ```

use alloc::{collections::VecDeque, vec::Vec};

use crate::{
    error::StructuralError,
    token::{Token, TokenKind},
    value::{Array, Map, Value},
};

/// Configuration for a [`Parser`].
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Deepest container nesting accepted; deeper subtrees become `Null`.
    ///
    /// # Default
    ///
    /// `32`
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { max_depth: 32 }
    }
}

/// Recursive-descent parser over a destructively consumed token queue.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
    errors: Vec<StructuralError>,
}

/// Parses one value with default options.
pub fn parse(tokens: &mut VecDeque<Token>) -> Value {
    Parser::new(ParserOptions::default()).parse(tokens)
}

/// Parses one value and also returns every structural error encountered.
pub fn parse_with_diagnostics(tokens: &mut VecDeque<Token>) -> (Value, Vec<StructuralError>) {
    let mut parser = Parser::new(ParserOptions::default());
    let value = parser.parse(tokens);
    (value, parser.take_errors())
}

impl Parser {
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            errors: Vec::new(),
        }
    }

    /// Consumes one root value from the front of `tokens`.
    ///
    /// Tokens after the root value are left in the queue.
    pub fn parse(&mut self, tokens: &mut VecDeque<Token>) -> Value {
        self.errors.clear();
        let value = self.value(tokens, 0);
        if !tokens.is_empty() {
            tracing::warn!(
                target: "serjson::parser",
                remaining = tokens.len(),
                "tokens left after the root value",
            );
        }
        value
    }

    /// Structural errors from the last [`parse`](Self::parse) call.
    #[must_use]
    pub fn errors(&self) -> &[StructuralError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<StructuralError> {
        core::mem::take(&mut self.errors)
    }

    fn value(&mut self, tokens: &mut VecDeque<Token>, depth: usize) -> Value {
        let Some(token) = tokens.pop_front() else {
            return self.fail(StructuralError::UnexpectedEnd {
                expected: "a value",
            });
        };

        match token {
            Token::StartObject | Token::StartArray if depth >= self.options.max_depth => {
                skip_container(tokens);
                self.fail(StructuralError::TooDeep(self.options.max_depth))
            }
            Token::StartObject => match self.object_entries(tokens, depth) {
                Ok(map) => Value::Object(map),
                Err(err) => self.fail(err),
            },
            Token::StartArray => match self.array_elements(tokens, depth) {
                Ok(array) => Value::Array(array),
                Err(err) => self.fail(err),
            },
            Token::String(s) => Value::String(s),
            Token::Boolean(b) => Value::Boolean(b),
            Token::Integer(n) => Value::Integer(n),
            Token::Float(n) => Value::Float(n),
            Token::Null => Value::Null,
            other => self.fail(StructuralError::UnexpectedToken {
                expected: "a value",
                found: other.kind(),
            }),
        }
    }

    fn object_entries(
        &mut self,
        tokens: &mut VecDeque<Token>,
        depth: usize,
    ) -> Result<Map, StructuralError> {
        let mut map = Map::new();
        if tokens.front() == Some(&Token::EndObject) {
            tokens.pop_front();
            return Ok(map);
        }

        loop {
            let key = match tokens.pop_front() {
                Some(Token::String(key)) => key,
                Some(other) => return Err(StructuralError::NonStringKey(other.kind())),
                None => {
                    return Err(StructuralError::UnexpectedEnd {
                        expected: "an object key",
                    });
                }
            };
            expect(tokens, TokenKind::Colon, "':'")?;

            let value = self.value(tokens, depth + 1);
            map.insert(key, value);

            match tokens.pop_front() {
                Some(Token::EndObject) => return Ok(map),
                Some(Token::Comma) => {}
                Some(other) => {
                    return Err(StructuralError::UnexpectedToken {
                        expected: "',' or '}'",
                        found: other.kind(),
                    });
                }
                None => {
                    return Err(StructuralError::UnexpectedEnd {
                        expected: "',' or '}'",
                    });
                }
            }
        }
    }

    fn array_elements(
        &mut self,
        tokens: &mut VecDeque<Token>,
        depth: usize,
    ) -> Result<Array, StructuralError> {
        let mut array = Array::new();
        if tokens.front() == Some(&Token::EndArray) {
            tokens.pop_front();
            return Ok(array);
        }

        loop {
            array.push(self.value(tokens, depth + 1));

            match tokens.pop_front() {
                Some(Token::EndArray) => return Ok(array),
                Some(Token::Comma) => {}
                Some(other) => {
                    return Err(StructuralError::UnexpectedToken {
                        expected: "',' or ']'",
                        found: other.kind(),
                    });
                }
                None => {
                    return Err(StructuralError::UnexpectedEnd {
                        expected: "',' or ']'",
                    });
                }
            }
        }
    }

    fn fail(&mut self, err: StructuralError) -> Value {
        tracing::error!(target: "serjson::parser", "{err}");
        self.errors.push(err);
        Value::Null
    }
}

fn expect(
    tokens: &mut VecDeque<Token>,
    kind: TokenKind,
    expected: &'static str,
) -> Result<(), StructuralError> {
    match tokens.pop_front() {
        Some(token) if token.kind() == kind => Ok(()),
        Some(other) => Err(StructuralError::UnexpectedToken {
            expected,
            found: other.kind(),
        }),
        None => Err(StructuralError::UnexpectedEnd { expected }),
    }
}

/// Drops tokens up to and including the close of an already opened container.
fn skip_container(tokens: &mut VecDeque<Token>) {
    let mut open = 1usize;
    while let Some(token) = tokens.pop_front() {
        match token {
            Token::StartObject | Token::StartArray => open += 1,
            Token::EndObject | Token::EndArray => {
                open -= 1;
                if open == 0 {
                    return;
                }
            }
            _ => {}
        }
    }
}
