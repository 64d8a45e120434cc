use alloc::string::String;

use crate::{error::KeywordError, token::Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordKind {
    Null,
    Boolean,
}

impl KeywordKind {
    /// Scratch length at which an unmatched literal is rejected.
    const fn max_len(self) -> usize {
        match self {
            KeywordKind::Null => 4,
            KeywordKind::Boolean => 5,
        }
    }
}

/// What happened after feeding one more byte into the keyword matcher?
#[derive(Debug)]
pub enum Step {
    /// Byte stored, the literal is not finished yet.
    NeedMore,
    /// The scratch now spells a keyword.
    Done(Token),
    /// The scratch reached its maximum length without spelling a keyword.
    Reject(KeywordError),
}

/// Scratch for an in-flight `null`, `true` or `false` literal.
///
/// Bytes are appended as they arrive and compared against the keyword as a
/// whole, so `tru` followed by `x` keeps going until the length limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordBuffer {
    kind: KeywordKind,
    scratch: Scratch,
}

impl KeywordBuffer {
    /// Start matching with the *first* byte (`n`, `t`, or `f`).
    pub fn new(first: u8) -> Option<Self> {
        let kind = match first {
            b'n' => KeywordKind::Null,
            b't' | b'f' => KeywordKind::Boolean,
            _ => return None,
        };
        let mut scratch = Scratch::default();
        scratch.push(first);
        Some(Self { kind, scratch })
    }

    pub fn kind(&self) -> KeywordKind {
        self.kind
    }

    /// Give the matcher the next input byte and learn what to do next.
    pub fn step(&mut self, byte: u8) -> Step {
        self.scratch.push(byte);
        let bytes = self.scratch.as_slice();

        match (self.kind, bytes) {
            (KeywordKind::Null, b"null") => return Step::Done(Token::Null),
            (KeywordKind::Boolean, b"true") => return Step::Done(Token::Boolean(true)),
            (KeywordKind::Boolean, b"false") => return Step::Done(Token::Boolean(false)),
            _ => {}
        }

        if bytes.len() >= self.kind.max_len() {
            let got: String = bstr::ByteSlice::to_str_lossy(bytes).into_owned();
            return Step::Reject(match self.kind {
                KeywordKind::Null => KeywordError::InvalidNull(got),
                KeywordKind::Boolean => KeywordError::InvalidBoolean(got),
            });
        }

        Step::NeedMore
    }
}

/// Fixed five-byte store; the longest keyword is `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Scratch {
    bytes: [u8; 5],
    len: usize,
}

impl Scratch {
    fn push(&mut self, byte: u8) {
        if let Some(slot) = self.bytes.get_mut(self.len) {
            *slot = byte;
            self.len += 1;
        }
    }

    fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(first: u8, rest: &[u8]) -> Step {
        let mut buf = KeywordBuffer::new(first).unwrap();
        let mut last = Step::NeedMore;
        for &b in rest {
            last = buf.step(b);
            if !matches!(last, Step::NeedMore) {
                break;
            }
        }
        last
    }

    #[test]
    fn matches_keywords() {
        assert!(matches!(feed(b'n', b"ull"), Step::Done(Token::Null)));
        assert!(matches!(feed(b't', b"rue"), Step::Done(Token::Boolean(true))));
        assert!(matches!(feed(b'f', b"alse"), Step::Done(Token::Boolean(false))));
    }

    #[test]
    fn rejects_only_at_max_len() {
        assert!(matches!(feed(b'n', b"ul"), Step::NeedMore));
        assert!(matches!(
            feed(b'n', b"ulx"),
            Step::Reject(KeywordError::InvalidNull(ref s)) if s == "nulx"
        ));
        // "trux" is still below the boolean limit.
        assert!(matches!(feed(b't', b"rux"), Step::NeedMore));
        assert!(matches!(
            feed(b't', b"ruxy"),
            Step::Reject(KeywordError::InvalidBoolean(ref s)) if s == "truxy"
        ));
    }

    #[test]
    fn non_keyword_start() {
        assert!(KeywordBuffer::new(b'x').is_none());
    }
}
