use crate::kernel::envelope::EventPayload;
use crate::kernel::state::{StateDelta, TrackerState};
use crate::kernel::time::DWELL_PERIOD;

/// Credits one timer period. Counts ticks, so throttled background timers drift.
pub fn on_dwell_tick(state: &mut TrackerState) -> EventPayload {
    state.reduce(StateDelta::DwellCredited(DWELL_PERIOD.as_secs()));
    EventPayload::TimeOnPage {
        seconds: state.time_spent_seconds,
    }
}
