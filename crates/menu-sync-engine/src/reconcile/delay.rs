use std::time::Duration;

/// Waits between status phases. The waits are cosmetic: swapping in
/// [`NoDelay`] changes nothing but elapsed time.
pub trait Delay {
    fn wait(&mut self, duration: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleep;

impl Delay for ThreadSleep {
    fn wait(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn wait(&mut self, _duration: Duration) {}
}

/// Returns immediately but remembers every requested wait.
#[derive(Debug, Default, Clone)]
pub struct RecordingDelay {
    pub waits: Vec<Duration>,
}

impl Delay for RecordingDelay {
    fn wait(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}

/// Waits used by the reconciliation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTiming {
    /// Before fading the indicator when nothing changed.
    pub unchanged_fade: Duration,
    /// Before switching the indicator to "updating".
    pub updating_delay: Duration,
    /// Between "updating" and the re-render.
    pub render_delay: Duration,
    /// Before fading the "updated" confirmation.
    pub updated_fade: Duration,
    /// Between the fade and clearing the indicator text.
    pub clear_delay: Duration,
}

impl Default for PhaseTiming {
    fn default() -> Self {
        Self {
            unchanged_fade: Duration::from_millis(800),
            updating_delay: Duration::from_millis(800),
            render_delay: Duration::from_millis(600),
            updated_fade: Duration::from_millis(1500),
            clear_delay: Duration::from_millis(300),
        }
    }
}
