use tokio::sync::mpsc;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use super::event::PageSignal;
use super::tracker::Tracker;

const SIGNAL_BUFFER: usize = 100;

/// Async driver for one page session. Signals are handled one at a time,
/// in arrival order, on the task running `run`.
pub struct Session {
    id: Uuid,
    tracker: Tracker,
    sender: mpsc::Sender<PageSignal>,
    receiver: mpsc::Receiver<PageSignal>,
}

impl Session {
    /// Returns the session and the handle the page uses to deliver signals.
    pub fn new(tracker: Tracker) -> (Self, mpsc::Sender<PageSignal>) {
        let (sender, receiver) = mpsc::channel(SIGNAL_BUFFER);
        let handle = sender.clone();
        let session = Self {
            id: Uuid::new_v4(),
            tracker,
            sender,
            receiver,
        };
        (session, handle)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Initializes the tracker, then handles signals until the page unloads.
    /// Dropping every signal handle counts as an unload. Before returning,
    /// waits for in-flight sends so the exit event is not cut off.
    pub async fn run(self) -> Tracker {
        let span = info_span!("session", id = %self.id);
        self.drive().instrument(span).await
    }

    async fn drive(self) -> Tracker {
        let Session {
            mut tracker,
            sender,
            mut receiver,
            ..
        } = self;

        tracker.initialize(&sender);
        // The dwell timer only holds a weak handle; once this is gone the
        // channel closes when the page drops its handles.
        drop(sender);

        while let Some(signal) = receiver.recv().await {
            tracker.handle(signal);
            if tracker.has_exited() {
                break;
            }
        }

        if !tracker.has_exited() {
            debug!("signal channel closed without unload");
            tracker.on_page_exit();
        }

        if let Some(tasks) = tracker.transport().in_flight() {
            tasks.close();
            debug!("waiting for {} in-flight sends", tasks.len());
            tasks.wait().await;
        }

        info!(stats = ?tracker.stats(), "session finished");
        tracker
    }
}
