//! Lexical units produced by the [`lexer`](crate::lexer).

use alloc::string::String;
use core::fmt;

/// One atomic lexical unit: a punctuator or a scalar literal.
///
/// Exactly one payload is carried, and which one is fixed by the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Comma,
    Colon,
    String(String),
    Boolean(bool),
    Integer(i32),
    Float(f32),
    Null,
}

/// The payload-free discriminant of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Comma,
    Colon,
    String,
    Boolean,
    Integer,
    Float,
    Null,
}

impl Token {
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::StartObject => TokenKind::StartObject,
            Token::EndObject => TokenKind::EndObject,
            Token::StartArray => TokenKind::StartArray,
            Token::EndArray => TokenKind::EndArray,
            Token::Comma => TokenKind::Comma,
            Token::Colon => TokenKind::Colon,
            Token::String(_) => TokenKind::String,
            Token::Boolean(_) => TokenKind::Boolean,
            Token::Integer(_) => TokenKind::Integer,
            Token::Float(_) => TokenKind::Float,
            Token::Null => TokenKind::Null,
        }
    }

    /// Returns the single-byte token for a structural character, if `byte` is one.
    #[must_use]
    pub fn punctuator(byte: u8) -> Option<Self> {
        Some(match byte {
            b'{' => Token::StartObject,
            b'}' => Token::EndObject,
            b'[' => Token::StartArray,
            b']' => Token::EndArray,
            b',' => Token::Comma,
            b':' => Token::Colon,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::StartObject => "'{'",
            TokenKind::EndObject => "'}'",
            TokenKind::StartArray => "'['",
            TokenKind::EndArray => "']'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::String => "string",
            TokenKind::Boolean => "boolean",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::Null => "null",
        })
    }
}

/// Renders tokens back into wire text; adjacent scalars are not separated.
pub fn write_rendered_tokens<W: fmt::Write>(tokens: &[Token], f: &mut W) -> fmt::Result {
    for token in tokens {
        match token {
            Token::String(s) => write!(f, "\"{s}\"")?,
            Token::Boolean(b) => write!(f, "{b}")?,
            Token::Integer(n) => write!(f, "{n}")?,
            Token::Float(n) => write!(f, "{n}")?,
            Token::Null => f.write_str("null")?,
            Token::StartObject => f.write_char('{')?,
            Token::EndObject => f.write_char('}')?,
            Token::StartArray => f.write_char('[')?,
            Token::EndArray => f.write_char(']')?,
            Token::Comma => f.write_char(',')?,
            Token::Colon => f.write_char(':')?,
        }
    }
    Ok(())
}
