use std::sync::{Arc, Mutex, PoisonError};

/// Anything that can show a brightness between `0.0` (off) and `1.0` (full).
pub trait Led: Send {
    fn set_level(&mut self, level: f32);
}

/// An [`Led`] shared between the dispatcher and a blink thread.
pub type SharedLed = Arc<Mutex<Box<dyn Led>>>;

/// Reports every level change as a log event.
#[derive(Debug, Default)]
pub struct LoggingLed {
    level: f32,
}

impl Led for LoggingLed {
    fn set_level(&mut self, level: f32) {
        if (level - self.level).abs() > f32::EPSILON {
            tracing::info!(target: "serjson_device::led", from = self.level, to = level, "led level");
        }
        self.level = level;
    }
}

/// Remembers every level it was given. Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct RecordingLed {
    levels: Arc<Mutex<Vec<f32>>>,
}

impl RecordingLed {
    /// Levels in the order they were set.
    #[must_use]
    pub fn levels(&self) -> Vec<f32> {
        self.levels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Led for RecordingLed {
    fn set_level(&mut self, level: f32) {
        self.levels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(level);
    }
}

pub(crate) fn set_shared(led: &SharedLed, level: f32) {
    led.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .set_level(level);
}
