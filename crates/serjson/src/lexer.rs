//! Single-pass, resumable tokenizer.
//!
//! The lexer never owns input across calls. When a chunk ends inside a token,
//! the returned [`LexerResult`] says where that token began so the caller can
//! keep those bytes and prefix them to the next chunk (see
//! [`Reassembler`](crate::Reassembler)). Lexing the stitched bytes from the
//! start of the open token yields the same tokens as lexing the whole text in
//! one call.
//!
//! ```rust
//! use serjson::{Token, lex};
//!
//! let res = lex(br#"{"on":tr"#);
//! assert!(!res.clean_boundary);
//! assert_eq!(res.resume_from, 6);
//! assert_eq!(res.tokens, vec![
//!     Token::StartObject,
//!     Token::String("on".into()),
//!     Token::Colon,
//! ]);
//! ```
#![allow(clippy::cast_precision_loss)]

use alloc::vec::Vec;
use core::ops::ControlFlow;

use bstr::ByteSlice;

use crate::{
    error::KeywordError,
    literal_buffer::{KeywordBuffer, Step},
    token::Token,
};

/// Everything one lex call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct LexerResult {
    /// Completed tokens, in input order.
    pub tokens: Vec<Token>,
    /// `true` iff the input ended exactly at a token boundary.
    pub clean_boundary: bool,
    /// Index in the input where the still-open token began, `0` if none.
    pub resume_from: usize,
    /// Set when a keyword literal failed to match and the call stopped early.
    ///
    /// `clean_boundary` and `resume_from` look the same as for a chunk that
    /// simply ended mid-keyword; this field is what tells the two apart.
    pub failure: Option<KeywordError>,
}

impl LexerResult {
    /// Returns `true` if the call ran to the end of its input.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Lexes one chunk.
#[must_use]
pub fn lex(chunk: &[u8]) -> LexerResult {
    let mut lexer = Lexer::new(chunk);
    let flow = lexer.run();
    lexer.finish(flow, false)
}

/// Lexes a chunk that ends a message.
///
/// Numbers have no terminator, so an integer or float still open at the end
/// of the input is emitted here. Open strings and keywords stay open.
#[must_use]
pub fn lex_final(chunk: &[u8]) -> LexerResult {
    let mut lexer = Lexer::new(chunk);
    let flow = lexer.run();
    lexer.finish(flow, true)
}

#[derive(Debug)]
enum OpenToken {
    String(Vec<u8>),
    Integer(i32),
    /// `divisor` is the place value of the last fraction digit seen.
    Float { value: f32, divisor: i32 },
    Keyword(KeywordBuffer),
}

/// What became of the byte under the cursor.
enum Advance {
    Consumed,
    /// The open token closed without consuming the byte; dispatch it again.
    Redispatch,
}

struct Lexer<'src> {
    input: &'src [u8],
    pos: usize,
    open: Option<OpenToken>,
    token_start: usize,
    tokens: Vec<Token>,
}

impl<'src> Lexer<'src> {
    fn new(input: &'src [u8]) -> Self {
        Self {
            input,
            pos: 0,
            open: None,
            token_start: 0,
            tokens: Vec::new(),
        }
    }

    fn run(&mut self) -> ControlFlow<KeywordError> {
        while let Some(&byte) = self.input.get(self.pos) {
            let advance = match self.open.take() {
                None => {
                    self.dispatch(byte);
                    Advance::Consumed
                }
                Some(open) => self.continue_token(open, byte)?,
            };
            if let Advance::Consumed = advance {
                self.pos += 1;
            }
        }
        ControlFlow::Continue(())
    }

    /// Boundary rules: the byte may start a new token.
    fn dispatch(&mut self, byte: u8) {
        if let Some(punct) = Token::punctuator(byte) {
            self.tokens.push(punct);
            return;
        }

        let open = match byte {
            b'"' => OpenToken::String(Vec::new()),
            b'0'..=b'9' => OpenToken::Integer(i32::from(byte - b'0')),
            _ => match KeywordBuffer::new(byte) {
                Some(buffer) => OpenToken::Keyword(buffer),
                // Anything else between tokens is skipped.
                None => return,
            },
        };
        self.token_start = self.pos;
        self.open = Some(open);
    }

    fn continue_token(
        &mut self,
        open: OpenToken,
        byte: u8,
    ) -> ControlFlow<KeywordError, Advance> {
        match open {
            OpenToken::String(mut bytes) => {
                if byte == b'"' {
                    self.tokens
                        .push(Token::String(bytes.to_str_lossy().into_owned()));
                } else {
                    bytes.push(byte);
                    self.open = Some(OpenToken::String(bytes));
                }
            }
            OpenToken::Integer(value) => match byte {
                b'0'..=b'9' => {
                    let digit = i32::from(byte - b'0');
                    self.open = Some(OpenToken::Integer(
                        value.wrapping_mul(10).wrapping_add(digit),
                    ));
                }
                b'.' => {
                    self.open = Some(OpenToken::Float {
                        value: value as f32,
                        divisor: 1,
                    });
                }
                _ => {
                    self.tokens.push(Token::Integer(value));
                    return ControlFlow::Continue(Advance::Redispatch);
                }
            },
            OpenToken::Float { value, divisor } => {
                if byte.is_ascii_digit() {
                    let divisor = divisor.saturating_mul(10);
                    let digit = f32::from(byte - b'0');
                    self.open = Some(OpenToken::Float {
                        value: value + digit / divisor as f32,
                        divisor,
                    });
                } else {
                    self.tokens.push(Token::Float(value));
                    return ControlFlow::Continue(Advance::Redispatch);
                }
            }
            OpenToken::Keyword(mut buffer) => match buffer.step(byte) {
                Step::NeedMore => self.open = Some(OpenToken::Keyword(buffer)),
                Step::Done(token) => self.tokens.push(token),
                Step::Reject(err) => {
                    tracing::error!(
                        target: "serjson::lexer",
                        kind = ?buffer.kind(),
                        at = self.pos,
                        "{err}, dropping {} remaining bytes",
                        self.input.len() - self.pos - 1,
                    );
                    self.open = Some(OpenToken::Keyword(buffer));
                    return ControlFlow::Break(err);
                }
            },
        }
        ControlFlow::Continue(Advance::Consumed)
    }

    fn finish(mut self, flow: ControlFlow<KeywordError>, end_of_message: bool) -> LexerResult {
        let failure = match flow {
            ControlFlow::Break(err) => Some(err),
            ControlFlow::Continue(()) => None,
        };

        if end_of_message && failure.is_none() {
            match self.open.take() {
                Some(OpenToken::Integer(value)) => self.tokens.push(Token::Integer(value)),
                Some(OpenToken::Float { value, .. }) => self.tokens.push(Token::Float(value)),
                other => self.open = other,
            }
        }

        let clean_boundary = self.open.is_none() && failure.is_none();
        let resume_from = if clean_boundary { 0 } else { self.token_start };

        tracing::trace!(
            target: "serjson::lexer",
            tokens = self.tokens.len(),
            clean_boundary,
            resume_from,
            "lexed {:?}",
            self.input.as_bstr(),
        );

        LexerResult {
            tokens: self.tokens,
            clean_boundary,
            resume_from,
            failure,
        }
    }
}
