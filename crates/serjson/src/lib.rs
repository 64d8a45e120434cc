//! A resumable, chunk-tolerant codec for a small JSON-like control protocol.
//!
//! Bytes arrive from a serial link in short reads that may cut a token
//! anywhere. The [`lexer`] turns each chunk into tokens and reports where an
//! unfinished token began; the [`Reassembler`] keeps that tail and prefixes
//! it to the next chunk. Once the caller has seen a whole message, its tokens
//! go through the [`parser`] into a [`Value`], and responses are rendered
//! back to text with [`Value`]'s `Display`.
//!
//! ```rust
//! use serjson::{Reassembler, Value, parse};
//!
//! let mut r = Reassembler::default();
//! let chunks: [&[u8]; 3] = [br#"{"req""#, b":", b"0}"];
//! for chunk in chunks {
//!     r.push(chunk).unwrap();
//! }
//! let request = parse(&mut r.finish_message());
//! assert_eq!(request.get("req"), Some(&Value::Integer(0)));
//! assert_eq!(request.to_string(), r#"{"req":0}"#);
//! ```
//!
//! Nothing here returns an error for malformed input. Failures are logged
//! through [`tracing`] and degrade to partial output: see [`StructuralError`],
//! [`KeywordError`] and [`TypeMismatch`].

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod chunk_utils;
mod error;
mod literal_buffer;
mod reassembly;
mod token;
mod value;

pub mod lexer;
pub mod parser;

#[cfg(test)]
mod tests;

pub use chunk_utils::{produce_chunks, split_by_seeds};
pub use error::{KeywordError, ReassemblyError, StructuralError, TypeMismatch};
pub use lexer::{LexerResult, lex, lex_final};
pub use parser::{Parser, ParserOptions, parse, parse_with_diagnostics};
pub use reassembly::{Reassembler, ReassemblyOptions};
pub use token::{Token, TokenKind, write_rendered_tokens};
pub use value::{Array, Map, Value, ValueKind};
