//! Signal extractors: each one turns a raw page signal into the `data`
//! payload of one event. They read the page and, where a metric is
//! stateful, the session's `TrackerState`; they never send anything.

pub mod admin;
pub mod click;
pub mod dwell;
pub mod form;
pub mod page_view;
pub mod scroll;

pub use admin::AdminAction;
pub use click::{ClickClassification, Position, ProductInfo};
pub use form::FormSubmission;
