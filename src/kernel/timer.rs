use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

use super::event::PageSignal;

/// Handle to the recurring dwell timer. Stopping is idempotent and dropping
/// the handle stops the timer as well.
#[derive(Debug)]
pub struct DwellTimer {
    guard: Option<DropGuard>,
}

impl DwellTimer {
    /// Spawns the timer task. Must be called from inside a tokio runtime.
    /// The task holds only a weak sender, so it never keeps the signal channel open.
    pub fn start(period: Duration, signals: &mpsc::Sender<PageSignal>) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let weak = signals.downgrade();

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        let Some(tx) = weak.upgrade() else { break };
                        tokio::select! {
                            biased;
                            _ = cancelled.cancelled() => break,
                            sent = tx.send(PageSignal::DwellTick) => {
                                if sent.is_err() { break; }
                            }
                        }
                    }
                }
            }
            debug!("dwell timer task finished");
        });

        Self {
            guard: Some(token.drop_guard()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.guard.is_some()
    }

    /// Returns `true` only for the call that actually stopped the timer.
    pub fn stop(&mut self) -> bool {
        match self.guard.take() {
            Some(guard) => {
                drop(guard);
                true
            }
            None => false,
        }
    }
}
