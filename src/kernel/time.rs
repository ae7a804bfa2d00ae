use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::{DateTime, SecondsFormat, Utc};

/// Scroll signals are sampled at most once per window.
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(500);

/// Dwell timer period; each tick credits exactly this many seconds.
pub const DWELL_PERIOD: Duration = Duration::from_secs(30);

/// Wall clock for timestamps plus a monotonic clock for rate limiting.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
    fn instant(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock. Both readings move together.
#[derive(Debug)]
pub struct ManualClock {
    inner: Mutex<(DateTime<Utc>, Instant)>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            inner: Mutex::new((start, Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = match self.inner.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.0 += chrono::Duration::milliseconds(by.as_millis() as i64);
        guard.1 += by;
    }

    fn read(&self) -> (DateTime<Utc>, Instant) {
        match self.inner.lock() {
            Ok(g) => *g,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.read().0
    }

    fn instant(&self) -> Instant {
        self.read().1
    }
}

/// Same shape as JavaScript `Date.prototype.toISOString`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Whole seconds between two instants, rounded half away from zero.
pub fn elapsed_secs(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    let ms = (to - from).num_milliseconds().max(0);
    ((ms as f64) / 1000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn iso_timestamp_has_millis_and_z() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn manual_clock_moves_both_readings() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        let (t0, i0) = (clock.now(), clock.instant());
        clock.advance(Duration::from_millis(1500));
        assert_eq!(elapsed_secs(t0, clock.now()), 2);
        assert_eq!(clock.instant() - i0, Duration::from_millis(1500));
    }
}
