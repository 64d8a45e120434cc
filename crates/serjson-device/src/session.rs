//! Line framing on top of the reassembler.

use std::io::{ErrorKind, Read, Write};

use bstr::ByteSlice;
use serjson::{Parser, Reassembler, Value};

use crate::{
    config::DeviceConfig,
    dispatch::Dispatcher,
    error::{CommandError, DeviceError},
};

/// Drops trailing `\r` and `\n` bytes.
///
/// ```rust
/// use serjson_device::strip_line_ending;
///
/// assert_eq!(strip_line_ending(b"{}\r\n"), b"{}");
/// assert_eq!(strip_line_ending(b"\n"), b"");
/// ```
#[must_use]
pub fn strip_line_ending(chunk: &[u8]) -> &[u8] {
    let end = chunk
        .iter()
        .rposition(|&b| b != b'\r' && b != b'\n')
        .map_or(0, |i| i + 1);
    &chunk[..end]
}

/// One command stream. Each `\n` ends a message.
pub struct Session {
    reassembler: Reassembler,
    parser: Parser,
    dispatcher: Dispatcher,
    overflowed: bool,
}

impl Session {
    #[must_use]
    pub fn new(config: &DeviceConfig, dispatcher: Dispatcher) -> Self {
        Self {
            reassembler: Reassembler::new(config.reassembly),
            parser: Parser::new(config.parser),
            dispatcher,
            overflowed: false,
        }
    }

    /// Feeds one read and returns a response for every line it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Value> {
        tracing::trace!(target: "serjson_device::session", "read {:?}", chunk.as_bstr());

        let mut responses = Vec::new();
        let mut lines = chunk.split(|&b| b == b'\n').peekable();
        while let Some(line) = lines.next() {
            self.push(strip_line_ending(line));
            // The last piece has no newline after it yet.
            if lines.peek().is_some() {
                responses.extend(self.end_message());
            }
        }
        responses
    }

    /// Ends a message left open when the input ran out.
    pub fn finish(&mut self) -> Option<Value> {
        self.end_message()
    }

    /// Reads `input` in `chunk_size` pieces until end of file, writing one
    /// response line per command to `output`.
    ///
    /// # Errors
    ///
    /// [`DeviceError::Read`] or [`DeviceError::Write`] on transport failure.
    pub fn run<R: Read, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
        chunk_size: usize,
    ) -> Result<(), DeviceError> {
        let mut buf = vec![0u8; chunk_size];
        loop {
            let n = match input.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(DeviceError::Read(err)),
            };
            for response in self.feed(&buf[..n]) {
                write_response(&mut output, &response)?;
            }
        }
        if let Some(response) = self.finish() {
            write_response(&mut output, &response)?;
        }
        Ok(())
    }

    fn push(&mut self, bytes: &[u8]) {
        if self.overflowed || bytes.is_empty() {
            return;
        }
        if let Err(err) = self.reassembler.push(bytes) {
            tracing::warn!(target: "serjson_device::session", "{err}, skipping to end of line");
            self.reassembler.reset();
            self.overflowed = true;
        }
    }

    fn end_message(&mut self) -> Option<Value> {
        if std::mem::take(&mut self.overflowed) {
            return Some(CommandError::MessageTooLong.to_response());
        }
        for failure in self.reassembler.take_failures() {
            tracing::debug!(target: "serjson_device::session", "message had {failure}");
        }
        if self.reassembler.tokens().is_empty() && self.reassembler.pending().is_empty() {
            return None;
        }

        let mut tokens = self.reassembler.finish_message();
        let command = self.parser.parse(&mut tokens);
        tracing::debug!(target: "serjson_device::session", %command, "command");
        Some(self.dispatcher.handle(&command))
    }
}

fn write_response<W: Write>(output: &mut W, response: &Value) -> Result<(), DeviceError> {
    writeln!(output, "{response}").map_err(DeviceError::Write)?;
    output.flush().map_err(DeviceError::Write)
}

#[cfg(test)]
mod tests {
    use serjson::ReassemblyOptions;

    use super::*;
    use crate::led::RecordingLed;

    fn session(capacity: usize) -> (Session, RecordingLed) {
        let led = RecordingLed::default();
        let config = DeviceConfig {
            reassembly: ReassemblyOptions { capacity },
            ..DeviceConfig::default()
        };
        (Session::new(&config, Dispatcher::new(led.clone())), led)
    }

    fn render(values: &[Value]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn strip_keeps_inner_bytes() {
        assert_eq!(strip_line_ending(b"a\rb\r"), b"a\rb");
        assert_eq!(strip_line_ending(b""), b"");
        assert_eq!(strip_line_ending(b"\r\n\r\n"), b"");
    }

    #[test]
    fn blank_lines_get_no_response() {
        let (mut s, _) = session(64);
        assert!(s.feed(b"\n\r\n\n").is_empty());
        assert!(s.finish().is_none());
    }

    #[test]
    fn command_split_across_reads() {
        let (mut s, led) = session(64);
        let chunks: [&[u8]; 4] = [b"{\"mo", b"de\":0,\"o", b"n\":tr", b"ue}"];
        for chunk in chunks {
            assert!(s.feed(chunk).is_empty());
        }
        assert_eq!(render(&s.feed(b"\r\n")), ["{}"]);
        assert_eq!(led.levels(), [1.0]);
    }

    #[test]
    fn several_commands_in_one_read() {
        let (mut s, _) = session(64);
        let out = s.feed(b"{\"req\":0}\n{\"req\":9}\n{\"req\"");
        assert_eq!(
            render(&out),
            [r#"{"status":{"led":0,"mode":0}}"#, r#"{"err":"unknown request"}"#]
        );
        assert!(s.feed(b":0}").is_empty());
        assert_eq!(
            render(&s.finish().into_iter().collect::<Vec<_>>()),
            [r#"{"status":{"led":0,"mode":0}}"#]
        );
    }

    #[test]
    fn overlong_token_rejects_the_line_only() {
        let (mut s, led) = session(8);
        let out = s.feed(b"{\"a-very-long-key\":1}\n{\"on\":true}\n");
        assert_eq!(render(&out), [r#"{"err":"message too long"}"#, "{}"]);
        assert_eq!(led.levels(), [1.0]);
    }

    #[test]
    fn keyword_failure_on_a_blank_line_does_not_leak() {
        let (mut s, _) = session(64);
        assert!(s.feed(b"nope
").is_empty());
        assert!(s.reassembler.take_failures().is_empty());
        assert_eq!(render(&s.feed(b"{\"req\":0}\n")), [r#"{"status":{"led":0,"mode":0}}"#]);
    }

    #[test]
    fn run_writes_one_line_per_command() {
        let (mut s, _) = session(64);
        let input: &[u8] = b"{\"mode\":1,\"v\":0.5}\n{\"req\":0}";
        let mut output = Vec::new();
        s.run(input, &mut output, 3).unwrap();
        assert_eq!(
            output.to_str().unwrap(),
            "{}\n{\"status\":{\"led\":0.5,\"mode\":1}}\n"
        );
    }
}
