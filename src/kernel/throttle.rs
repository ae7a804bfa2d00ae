use std::time::{Duration, Instant};

/// Leading-edge rate limiter: the first call in a window passes, the rest
/// are dropped until the window (measured from the passing call) has elapsed.
#[derive(Debug, Clone)]
pub struct Throttle {
    window: Duration,
    blocked_until: Option<Instant>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            blocked_until: None,
        }
    }

    pub fn admit(&mut self, now: Instant) -> bool {
        match self.blocked_until {
            Some(until) if now < until => false,
            _ => {
                self.blocked_until = Some(now + self.window);
                true
            }
        }
    }
}
