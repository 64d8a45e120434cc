//! Host side of the serjson link: turns newline-delimited commands into LED
//! actuation and writes a response line for each one.
//!
//! A [`Session`] owns the codec state for one transport. Each completed line
//! is parsed into a [`serjson::Value`] and handed to the [`Dispatcher`], which
//! drives an [`Led`] and builds the reply.
//!
//! ```rust
//! use serjson_device::{DeviceConfig, Dispatcher, RecordingLed, Session};
//!
//! let led = RecordingLed::default();
//! let mut session = Session::new(&DeviceConfig::default(), Dispatcher::new(led.clone()));
//!
//! let mut responses = session.feed(b"{\"mode\":1,\"v\"");
//! assert!(responses.is_empty());
//! responses.extend(session.feed(b":0.5}\r\n{\"req\":0}\n"));
//!
//! let lines: Vec<String> = responses.iter().map(ToString::to_string).collect();
//! assert_eq!(lines, [r#"{}"#, r#"{"status":{"led":0.5,"mode":1}}"#]);
//! assert_eq!(led.levels(), [0.5]);
//! ```

mod blink;
mod config;
mod dispatch;
mod error;
mod led;
mod session;
mod tracing_init;

pub use blink::BlinkHandle;
pub use config::{Args, DeviceConfig};
pub use dispatch::{DeviceState, Dispatcher, Mode};
pub use error::{CommandError, DeviceError};
pub use led::{Led, LoggingLed, RecordingLed, SharedLed};
pub use session::{Session, strip_line_ending};
pub use tracing_init::init_tracing;
