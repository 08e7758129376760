use std::time::{Duration, Instant};

/// Per-call-site log throttle. The owner keeps one instance per repeated
/// message and asks it before emitting; at most one emission per window,
/// with a count of what was suppressed in between.
#[derive(Debug)]
pub struct LogThrottle {
    interval: Duration,
    window_started_at: Option<Instant>,
    suppressed: u64,
}

impl LogThrottle {
    pub fn new(interval: Duration) -> Self {
        LogThrottle {
            interval,
            window_started_at: None,
            suppressed: 0,
        }
    }

    /// Returns `Some(suppressed_count)` when the caller should emit,
    /// otherwise `None` and the event is counted against the active window.
    pub fn should_emit(&mut self) -> Option<u64> {
        let now = Instant::now();
        match self.window_started_at {
            Some(started_at) if now.duration_since(started_at) < self.interval => {
                self.suppressed += 1;
                None
            }
            _ => {
                let suppressed = self.suppressed;
                self.window_started_at = Some(now);
                self.suppressed = 0;
                Some(suppressed)
            }
        }
    }
}
