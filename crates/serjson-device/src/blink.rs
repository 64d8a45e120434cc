//! Background blinking, stopped through a channel.

use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::led::{SharedLed, set_shared};

const MIN_HALF_PERIOD: Duration = Duration::from_millis(1);

/// A running blink thread. Dropping the handle stops it.
#[derive(Debug)]
pub struct BlinkHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl BlinkHandle {
    /// Starts alternating `led` between `level` and off, one full cycle per
    /// `period`. The LED is switched on before this returns.
    #[must_use]
    pub fn spawn(led: SharedLed, period: Duration, level: f32) -> Self {
        let (stop, stopped) = mpsc::channel::<()>();
        let half = (period / 2).max(MIN_HALF_PERIOD);

        set_shared(&led, level);
        let thread = thread::spawn(move || {
            let mut lit = true;
            loop {
                match stopped.recv_timeout(half) {
                    Err(RecvTimeoutError::Timeout) => {
                        lit = !lit;
                        set_shared(&led, if lit { level } else { 0.0 });
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        tracing::debug!(target: "serjson_device::blink", ?period, level, "blink started");
        Self {
            stop: Some(stop),
            thread: Some(thread),
        }
    }

    /// Stops the thread and waits for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!(target: "serjson_device::blink", "blink thread panicked");
            }
            tracing::debug!(target: "serjson_device::blink", "blink stopped");
        }
    }
}

impl Drop for BlinkHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
