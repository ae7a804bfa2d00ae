pub mod config;
pub mod error;
pub mod extract;
pub mod kernel;
pub mod page;
pub mod services;

pub use config::{FeatureConfig, TrackerConfig};
pub use error::{TrackerError, TrackerResult};
pub use kernel::envelope::{EventEnvelope, EventPayload, EventType};
pub use kernel::event::{PageSignal, ScrollMetrics};
pub use kernel::session::Session;
pub use kernel::tracker::Tracker;
