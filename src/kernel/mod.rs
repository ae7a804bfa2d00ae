//! Tracking kernel: session state, the instrumentation controller and
//! its async driver, and the envelope every event is wrapped in.
//!
//! Signals flow one way:
//!
//! ```text
//! page ──▶ Session (mpsc) ──▶ Tracker ──▶ extractor ──▶ EventEnvelope ──▶ Transport
//!                               │
//!                               └── TrackerState (scroll watermark, dwell timer)
//! ```

pub mod envelope;
pub mod event;
pub mod session;
pub mod state;
pub mod throttle;
pub mod time;
pub mod timer;
pub mod tracker;
