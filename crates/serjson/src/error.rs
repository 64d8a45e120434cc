use alloc::string::String;

use thiserror::Error;

use crate::{token::TokenKind, value::ValueKind};

/// A `true`/`false`/`null` literal that cannot match its keyword.
///
/// The lex call that hits one stops immediately; the remaining bytes of the
/// chunk are discarded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeywordError {
    #[error("invalid null keyword, got {0:?}")]
    InvalidNull(String),
    #[error("invalid boolean keyword, got {0:?}")]
    InvalidBoolean(String),
}

/// A token of the wrong kind where the grammar requires a specific one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("unexpected end of tokens, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("unexpected token {found}, expected {expected}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
    },
    #[error("object key must be a string, got {0}")]
    NonStringKey(TokenKind),
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
}

/// An accessor was called on the wrong [`Value`](crate::Value) variant.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("type mismatch: expected {expected}, found {found}")]
pub struct TypeMismatch {
    pub expected: ValueKind,
    pub found: ValueKind,
}

/// Failures of the carry-over protocol, reported to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReassemblyError {
    #[error("token longer than the {capacity}-byte carry-over buffer")]
    TokenTooLong { capacity: usize },
}
