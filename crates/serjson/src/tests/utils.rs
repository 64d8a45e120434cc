use alloc::{collections::VecDeque, string::String, vec::Vec};
use std::{
    io,
    sync::{Arc, Mutex, PoisonError},
};

use tracing_subscriber::fmt::MakeWriter;

use crate::{Reassembler, ReassemblyOptions, Token, Value, lex_final, parse, write_rendered_tokens};

/// Number of quickcheck cases, larger on CI.
pub fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Lexes `text` in one call and parses the result.
pub fn parse_text(text: &str) -> Value {
    let mut tokens: VecDeque<Token> = lex_final(text.as_bytes()).tokens.into();
    parse(&mut tokens)
}

/// Feeds `chunks` through a reassembler of the given capacity.
pub fn reassemble(chunks: &[&[u8]], capacity: usize) -> Option<Vec<Token>> {
    let mut r = Reassembler::new(ReassemblyOptions { capacity });
    for chunk in chunks {
        r.push(chunk).ok()?;
    }
    Some(r.finish_message().into())
}

pub fn render_tokens(tokens: &[Token]) -> String {
    let mut rendered = String::new();
    write_rendered_tokens(tokens, &mut rendered).expect("rendering into a String cannot fail");
    rendered
}

/// Container nesting depth: leaves are 0.
pub fn depth(value: &Value) -> usize {
    match value {
        Value::Array(a) => 1 + a.iter().map(depth).max().unwrap_or(0),
        Value::Object(m) => 1 + m.values().map(depth).max().unwrap_or(0),
        _ => 0,
    }
}

/// Log sink shared by every writer it hands out.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with a thread-local subscriber and returns what it logged at
/// `warn` and above, one event per line.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::WARN)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8_lossy(&logs.0.lock().unwrap_or_else(PoisonError::into_inner))
        .into_owned();
    (out, text)
}
