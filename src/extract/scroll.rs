use crate::kernel::envelope::EventPayload;
use crate::kernel::event::ScrollMetrics;
use crate::kernel::state::{StateDelta, TrackerState};

/// Depths are reported only on these boundaries.
pub const REPORT_STEP: u32 = 25;

/// Scroll position as a whole percentage of the scrollable range, clamped
/// to 0..=100. `None` when the page cannot scroll.
pub fn scroll_percentage(m: &ScrollMetrics) -> Option<u32> {
    let scrollable = m.scroll_height - m.viewport_height;
    if scrollable.is_nan() || scrollable <= 0.0 || !m.scroll_y.is_finite() {
        return None;
    }
    let pct = (m.scroll_y / scrollable * 100.0).round();
    Some(pct.clamp(0.0, 100.0) as u32)
}

/// Raises the watermark and returns a payload when a new maximum lands on a
/// reporting boundary. Revisiting a depth never re-reports it.
pub fn track_scroll(state: &mut TrackerState, m: &ScrollMetrics) -> Option<EventPayload> {
    let depth = scroll_percentage(m)?;
    if depth <= state.max_scroll_depth {
        return None;
    }
    state.reduce(StateDelta::ScrollReached(depth));
    (depth % REPORT_STEP == 0).then_some(EventPayload::Scroll { depth })
}
