use chrono::{DateTime, Utc};

use super::timer::DwellTimer;

/// The only ways session state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateDelta {
    /// A scroll sample reached this percentage.
    ScrollReached(u32),
    /// The dwell timer credited this many seconds.
    DwellCredited(u64),
}

/// Mutable state for one page session, owned by the tracker.
#[derive(Debug)]
pub struct TrackerState {
    /// Highest scroll percentage seen. Never decreases.
    pub max_scroll_depth: u32,
    pub page_load_time: DateTime<Utc>,
    /// Sum of dwell ticks, not wall time.
    pub time_spent_seconds: u64,
    pub(crate) dwell_timer: Option<DwellTimer>,
}

impl TrackerState {
    pub fn new(page_load_time: DateTime<Utc>) -> Self {
        Self {
            max_scroll_depth: 0,
            page_load_time,
            time_spent_seconds: 0,
            dwell_timer: None,
        }
    }

    pub fn reduce(&mut self, delta: StateDelta) {
        match delta {
            StateDelta::ScrollReached(depth) => {
                self.max_scroll_depth = self.max_scroll_depth.max(depth);
            }
            StateDelta::DwellCredited(secs) => {
                self.time_spent_seconds += secs;
            }
        }
    }

    pub fn dwell_timer_running(&self) -> bool {
        self.dwell_timer.as_ref().is_some_and(DwellTimer::is_running)
    }

    /// Releases the dwell timer. `false` if it was never started or is already stopped.
    pub fn stop_dwell_timer(&mut self) -> bool {
        self.dwell_timer.as_mut().is_some_and(DwellTimer::stop)
    }
}
