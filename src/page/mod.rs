//! The host page as the tracker sees it: a DOM snapshot, ambient
//! browser state, and the coarse page classification.

pub mod classify;
pub mod context;
pub mod dom;

pub use classify::{classify, PageType};
pub use context::{PageContext, PageSnapshot, StaticPage, Viewport};
pub use dom::{Document, Element, NodeId, NodeTree};
