pub mod memory;
pub mod webhook;
pub mod wire;

use tokio_util::task::TaskTracker;

use crate::kernel::envelope::EventEnvelope;

pub use memory::MemoryTransport;
pub use webhook::WebhookTransport;
pub use wire::WireFormat;

/// Outbound sink for envelopes. `send` must return immediately: any I/O is
/// detached from the caller and failures are logged, never returned.
pub trait Transport: Send + Sync {
    fn send(&self, envelope: EventEnvelope);

    /// Detached sends still running, if the transport has any.
    fn in_flight(&self) -> Option<TaskTracker> {
        None
    }
}
