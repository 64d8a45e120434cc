//! Maps command objects onto LED actions.
//!
//! Recognised fields:
//!
//! | key    | meaning                                                     |
//! |--------|-------------------------------------------------------------|
//! | `mode` | `0` switch, `1` dim, `2` blink                              |
//! | `on`   | switch mode: full on or off                                 |
//! | `v`    | dim level, or blink on-level (default `1`), within `[0, 1]` |
//! | `d`    | blink period in seconds                                     |
//! | `req`  | `0` asks for a status reply                                 |
//!
//! A command is validated as a whole before anything changes, so a rejected
//! command leaves the LED as it was.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use serjson::{Map, Value};

use crate::{
    blink::BlinkHandle,
    error::CommandError,
    led::{Led, SharedLed, set_shared},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Switch,
    Dim,
    Blink,
}

impl Mode {
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Mode::Switch => 0,
            Mode::Dim => 1,
            Mode::Blink => 2,
        }
    }
}

impl TryFrom<i32> for Mode {
    type Error = CommandError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Mode::Switch),
            1 => Ok(Mode::Dim),
            2 => Ok(Mode::Blink),
            _ => Err(CommandError::InvalidMode),
        }
    }
}

/// What the LED was last told to do.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceState {
    pub mode: Mode,
    /// Steady level, or the on-level while blinking.
    pub level: f32,
    pub period: Option<Duration>,
}

enum Output {
    Steady(f32),
    Blink { period: Duration, level: f32 },
}

enum Request {
    Status,
}

impl TryFrom<i32> for Request {
    type Error = CommandError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Request::Status),
            _ => Err(CommandError::UnknownRequest),
        }
    }
}

/// Executes commands against one LED.
pub struct Dispatcher {
    led: SharedLed,
    state: DeviceState,
    blink: Option<BlinkHandle>,
}

impl Dispatcher {
    pub fn new(led: impl Led + 'static) -> Self {
        Self {
            led: Arc::new(Mutex::new(Box::new(led))),
            state: DeviceState::default(),
            blink: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Runs one command and returns the response to send back.
    pub fn handle(&mut self, command: &Value) -> Value {
        match self.apply(command) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(target: "serjson_device::dispatch", %command, "rejected: {err}");
                err.to_response()
            }
        }
    }

    fn apply(&mut self, command: &Value) -> Result<Value, CommandError> {
        let fields = command.as_object().ok_or(CommandError::ExpectedObject)?;

        let mode = match fields.get("mode") {
            Some(code) => Mode::try_from(code.int_or_default())?,
            None => self.state.mode,
        };
        let output = match mode {
            Mode::Switch => fields
                .get("on")
                .map(|on| Output::Steady(if on.bool_or_default() { 1.0 } else { 0.0 })),
            Mode::Dim => fields.get("v").map(level).transpose()?.map(Output::Steady),
            Mode::Blink => self.blink_output(fields)?,
        };
        let request = fields
            .get("req")
            .map(|code| Request::try_from(code.int_or_default()))
            .transpose()?;

        let mode_changed = mode != self.state.mode;
        self.state.mode = mode;
        match output {
            Some(output) => self.drive(output),
            // Leaving blink mode holds the LED at its last configured level.
            None if mode_changed && mode != Mode::Blink => {
                self.drive(Output::Steady(self.state.level));
            }
            None => {}
        }

        tracing::debug!(target: "serjson_device::dispatch", state = ?self.state, "applied");
        Ok(match request {
            Some(Request::Status) => self.status(),
            None => Value::Object(Map::new()),
        })
    }

    fn blink_output(&self, fields: &Map) -> Result<Option<Output>, CommandError> {
        let period = fields.get("d").map(period).transpose()?;
        let on_level = fields.get("v").map(level).transpose()?;
        if period.is_none() && on_level.is_none() && !fields.contains_key("mode") {
            return Ok(None);
        }
        let period = period
            .or(self.state.period)
            .ok_or(CommandError::InvalidPeriod)?;
        // Re-entering blink mode keeps the current on-level.
        let level = on_level.unwrap_or(if self.state.mode == Mode::Blink {
            self.state.level
        } else {
            1.0
        });
        Ok(Some(Output::Blink { period, level }))
    }

    fn drive(&mut self, output: Output) {
        if let Some(blink) = self.blink.take() {
            blink.stop();
        }
        match output {
            Output::Steady(level) => {
                self.state.level = level;
                set_shared(&self.led, level);
            }
            Output::Blink { period, level } => {
                self.state.level = level;
                self.state.period = Some(period);
                self.blink = Some(BlinkHandle::spawn(self.led.clone(), period, level));
            }
        }
    }

    fn status(&self) -> Value {
        let mut status = Map::new();
        status.insert("mode".into(), Value::Integer(self.state.mode.code()));
        status.insert("led".into(), Value::Float(self.state.level));
        let mut map = Map::new();
        map.insert("status".into(), Value::Object(status));
        Value::Object(map)
    }
}

/// A level in `[0, 1]`; integers are accepted.
fn level(value: &Value) -> Result<f32, CommandError> {
    let level = value.as_number().unwrap_or_else(|| value.float_or_default());
    if (0.0..=1.0).contains(&level) {
        Ok(level)
    } else {
        Err(CommandError::LevelOutOfRange)
    }
}

/// A strictly positive period in seconds.
fn period(value: &Value) -> Result<Duration, CommandError> {
    let seconds = value.as_number().unwrap_or_else(|| value.float_or_default());
    Duration::try_from_secs_f32(seconds)
        .ok()
        .filter(|d| !d.is_zero())
        .ok_or(CommandError::InvalidPeriod)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::led::RecordingLed;

    fn run(dispatcher: &mut Dispatcher, text: &str) -> String {
        let mut r = serjson::Reassembler::default();
        r.push(text.as_bytes()).unwrap();
        dispatcher.handle(&serjson::parse(&mut r.finish_message())).to_string()
    }

    fn fresh() -> (Dispatcher, RecordingLed) {
        let led = RecordingLed::default();
        (Dispatcher::new(led.clone()), led)
    }

    #[test]
    fn status_request_on_fresh_device() {
        let (mut d, led) = fresh();
        assert_eq!(run(&mut d, r#"{"req":0}"#), r#"{"status":{"led":0,"mode":0}}"#);
        assert!(led.levels().is_empty());
    }

    #[test]
    fn switch_mode_uses_on() {
        let (mut d, led) = fresh();
        assert_eq!(run(&mut d, r#"{"mode":0,"on":true}"#), "{}");
        assert_eq!(run(&mut d, r#"{"on":false}"#), "{}");
        assert_eq!(led.levels(), [1.0, 0.0]);
    }

    #[test]
    fn dim_accepts_integer_levels() {
        let (mut d, led) = fresh();
        run(&mut d, r#"{"mode":1,"v":1}"#);
        run(&mut d, r#"{"v":0.5}"#);
        assert_eq!(led.levels(), [1.0, 0.5]);
        assert_eq!(d.state().mode, Mode::Dim);
    }

    #[test]
    fn fields_of_other_modes_are_ignored() {
        let (mut d, led) = fresh();
        assert_eq!(run(&mut d, r#"{"v":0.5}"#), "{}");
        assert!(led.levels().is_empty());
    }

    #[test]
    fn type_mismatch_falls_back_to_default() {
        let (mut d, led) = fresh();
        run(&mut d, r#"{"on":"yes"}"#);
        assert_eq!(led.levels(), [0.0]);
    }

    #[rstest]
    #[case::not_an_object("[1]", "expected object")]
    #[case::bad_mode(r#"{"mode":7}"#, "invalid mode")]
    #[case::level_too_high(r#"{"mode":1,"v":1.5}"#, "v out of range")]
    #[case::level_int_too_high(r#"{"mode":1,"v":2}"#, "v out of range")]
    #[case::zero_period(r#"{"mode":2,"d":0}"#, "invalid period")]
    #[case::missing_period(r#"{"mode":2}"#, "invalid period")]
    #[case::unknown_request(r#"{"req":3}"#, "unknown request")]
    fn rejected_commands(#[case] text: &str, #[case] message: &str) {
        let (mut d, led) = fresh();
        assert_eq!(run(&mut d, text), format!(r#"{{"err":"{message}"}}"#));
        assert!(led.levels().is_empty());
        assert_eq!(d.state(), DeviceState::default());
    }

    #[test]
    fn blink_then_back_to_switch() {
        let (mut d, led) = fresh();
        assert_eq!(run(&mut d, r#"{"mode":2,"d":10,"v":0.25,"req":0}"#), r#"{"status":{"led":0.25,"mode":2}}"#);
        assert_eq!(d.state().period, Some(Duration::from_secs(10)));
        assert_eq!(led.levels(), [0.25]);

        // Leaving blink mode stops the thread and holds the on-level.
        run(&mut d, r#"{"mode":0}"#);
        assert_eq!(led.levels(), [0.25, 0.25]);
        assert!(d.blink.is_none());
    }

    #[test]
    fn repeated_blink_command_keeps_the_level() {
        let (mut d, led) = fresh();
        run(&mut d, r#"{"mode":2,"d":5,"v":0.5}"#);
        run(&mut d, r#"{"mode":2}"#);
        run(&mut d, r#"{"d":4}"#);
        let state = d.state();
        assert_eq!(state.level, 0.5);
        assert_eq!(state.period, Some(Duration::from_secs(4)));
        assert_eq!(led.levels(), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn blink_reuses_the_last_period() {
        let (mut d, _led) = fresh();
        run(&mut d, r#"{"mode":2,"d":5}"#);
        run(&mut d, r#"{"v":0.5}"#);
        let state = d.state();
        assert_eq!(state.period, Some(Duration::from_secs(5)));
        assert_eq!(state.level, 0.5);
        assert!(d.blink.is_some());
    }
}
