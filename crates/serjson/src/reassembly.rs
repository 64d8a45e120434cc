//! Carry-over protocol that stitches short reads into one token stream.

use alloc::{collections::VecDeque, vec::Vec};

use bstr::ByteSlice;

use crate::{
    error::{KeywordError, ReassemblyError},
    lexer::{LexerResult, lex, lex_final},
    token::Token,
};

/// Configuration for a [`Reassembler`].
///
/// # Examples
///
/// ```rust
/// use serjson::{Reassembler, ReassemblyOptions};
///
/// let mut r = Reassembler::new(ReassemblyOptions { capacity: 128 });
/// r.push(br#"{"v":0."#).unwrap();
/// r.push(br#"5}"#).unwrap();
/// assert_eq!(r.finish_message().len(), 5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReassemblyOptions {
    /// Size of the carry-over buffer in bytes.
    ///
    /// This bounds the longest single token that can ever complete.
    ///
    /// # Default
    ///
    /// `64`
    pub capacity: usize,
}

impl Default for ReassemblyOptions {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

/// Feeds chunks through the lexer, keeping the unfinished tail of each one.
///
/// Tokens accumulate across chunks until the caller decides a message is
/// complete and calls [`finish_message`](Self::finish_message).
#[derive(Debug, Clone, Default)]
pub struct Reassembler {
    options: ReassemblyOptions,
    carry: Vec<u8>,
    tokens: VecDeque<Token>,
    failures: Vec<KeywordError>,
}

impl Reassembler {
    #[must_use]
    pub fn new(options: ReassemblyOptions) -> Self {
        Self {
            options,
            carry: Vec::with_capacity(options.capacity + 1),
            tokens: VecDeque::new(),
            failures: Vec::new(),
        }
    }

    /// Appends a chunk and lexes as far as the data allows.
    ///
    /// Returns how many tokens were added to the message accumulator.
    ///
    /// # Errors
    ///
    /// [`ReassemblyError::TokenTooLong`] when a token is still open after
    /// filling the whole carry-over buffer and seeing one more byte, the one
    /// that would close a number. The carry-over is dropped; tokens
    /// accumulated so far stay in place for the caller to inspect or
    /// [`reset`](Self::reset).
    pub fn push(&mut self, chunk: &[u8]) -> Result<usize, ReassemblyError> {
        let before = self.tokens.len();
        let mut rest = chunk;

        while !rest.is_empty() {
            let room = self.options.capacity.saturating_sub(self.carry.len());
            if room == 0 {
                // Numbers only close on the byte after their last digit.
                if let Some((&next, tail)) = rest.split_first() {
                    self.carry.push(next);
                    let res = lex(&self.carry);
                    if res.clean_boundary || res.resume_from > 0 || res.failure.is_some() {
                        self.absorb(res);
                        rest = tail;
                        continue;
                    }
                }
                let capacity = self.options.capacity;
                tracing::error!(
                    target: "serjson::reassembly",
                    "token starting with {:?} does not fit in {capacity} bytes",
                    self.carry.as_bstr(),
                );
                self.carry.clear();
                return Err(ReassemblyError::TokenTooLong { capacity });
            }

            let (head, tail) = rest.split_at(room.min(rest.len()));
            self.carry.extend_from_slice(head);
            rest = tail;

            let res = lex(&self.carry);
            self.absorb(res);
        }

        Ok(self.tokens.len() - before)
    }

    /// Ends the current message and hands over its tokens.
    ///
    /// A number still pending in the carry-over completes here; any other
    /// incomplete token is logged and dropped, and so are keyword failures
    /// not yet collected with [`take_failures`](Self::take_failures).
    pub fn finish_message(&mut self) -> VecDeque<Token> {
        if !self.carry.is_empty() {
            let res = lex_final(&self.carry);
            self.absorb(res);
        }
        if !self.carry.is_empty() {
            tracing::warn!(
                target: "serjson::reassembly",
                "dropping incomplete token {:?} at end of message",
                self.carry.as_bstr(),
            );
            self.carry.clear();
        }
        self.failures.clear();
        tracing::debug!(
            target: "serjson::reassembly",
            tokens = self.tokens.len(),
            "message complete",
        );
        core::mem::take(&mut self.tokens)
    }

    /// Drops carry-over, accumulated tokens and recorded failures.
    pub fn reset(&mut self) {
        self.carry.clear();
        self.tokens.clear();
        self.failures.clear();
    }

    /// Bytes kept for prefixing the next chunk.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.carry
    }

    /// Tokens of the message in progress.
    #[must_use]
    pub fn tokens(&self) -> &VecDeque<Token> {
        &self.tokens
    }

    /// Keyword failures of the message in progress, oldest first.
    pub fn take_failures(&mut self) -> Vec<KeywordError> {
        core::mem::take(&mut self.failures)
    }

    fn absorb(&mut self, res: LexerResult) {
        self.tokens.extend(res.tokens);

        if let Some(err) = res.failure {
            // The bad literal would fail again on every retry.
            self.carry.clear();
            self.failures.push(err);
        } else if res.clean_boundary {
            self.carry.clear();
        } else {
            self.carry.drain(..res.resume_from);
        }
    }
}
