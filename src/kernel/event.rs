use serde::{Deserialize, Serialize};

use crate::page::NodeId;

/// Raw scroll geometry sampled when the scroll signal fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    /// Full document height (`documentElement.scrollHeight`).
    pub scroll_height: f64,
    pub viewport_height: f64,
}

/// Everything the page can tell the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum PageSignal {
    Click { target: NodeId, x: i32, y: i32 },
    Scroll(ScrollMetrics),
    Submit { form: NodeId },
    /// Periodic dwell timer fired.
    DwellTick,
    /// Manual connectivity check.
    Test,
    Unload,
}

impl PageSignal {
    pub fn name(&self) -> &'static str {
        match self {
            PageSignal::Click { .. } => "click",
            PageSignal::Scroll(_) => "scroll",
            PageSignal::Submit { .. } => "submit",
            PageSignal::DwellTick => "dwell-tick",
            PageSignal::Test => "test",
            PageSignal::Unload => "unload",
        }
    }
}
