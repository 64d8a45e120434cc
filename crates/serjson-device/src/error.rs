use std::io;

use serjson::{Map, Value};
use thiserror::Error;

/// Failures of the host process itself.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("failed to read from the transport")]
    Read(#[source] io::Error),
    #[error("failed to write a response")]
    Write(#[source] io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("invalid log filter")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// A command the dispatcher refuses. The message is sent back verbatim as
/// the `err` field of the response.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("expected object")]
    ExpectedObject,
    #[error("invalid mode")]
    InvalidMode,
    #[error("v out of range")]
    LevelOutOfRange,
    #[error("invalid period")]
    InvalidPeriod,
    #[error("unknown request")]
    UnknownRequest,
    #[error("message too long")]
    MessageTooLong,
}

impl CommandError {
    /// `{"err":"<message>"}`
    #[must_use]
    pub fn to_response(self) -> Value {
        let mut map = Map::new();
        map.insert("err".into(), Value::String(self.to_string()));
        Value::Object(map)
    }
}
