use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::{Client, Url};
use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, warn};

use super::wire::WireFormat;
use super::Transport;
use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::kernel::envelope::EventEnvelope;

/// Fire-and-forget JSON POST to the configured collector. Each send is a
/// detached task on a `TaskTracker`, so it keeps running after the caller
/// (including the unload handler) has returned.
pub struct WebhookTransport {
    client: Client,
    endpoint: Result<Url, String>,
    format: WireFormat,
    tasks: TaskTracker,
    warned: AtomicBool,
}

impl WebhookTransport {
    pub fn new(config: &TrackerConfig) -> Self {
        let endpoint = config
            .validate()
            .map_err(|e| e.to_string())
            .and_then(|()| Url::parse(config.endpoint.trim()).map_err(|e| e.to_string()));

        Self {
            client: Client::builder()
                .timeout(config.request_timeout())
                .build()
                .unwrap_or_default(),
            endpoint,
            format: config.wire_format,
            tasks: TaskTracker::new(),
            warned: AtomicBool::new(false),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_ok()
    }

    fn warn_disabled_once(&self, reason: &str) {
        if !self.warned.swap(true, Ordering::Relaxed) {
            warn!("tracking disabled: {}", reason);
        }
    }
}

impl Transport for WebhookTransport {
    fn send(&self, envelope: EventEnvelope) {
        let kind = envelope.event_type.as_str();
        let url = match &self.endpoint {
            Ok(url) => url.clone(),
            Err(reason) => {
                self.warn_disabled_once(reason);
                debug!("skipping {} event, no endpoint", kind);
                return;
            }
        };

        let body = match self.format.encode(&envelope) {
            Ok(body) => body,
            Err(e) => {
                error!("dropping {} event: {}", kind, e);
                return;
            }
        };

        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                error!("dropping {} event: no async runtime to send from", kind);
                return;
            }
        };

        let request = self.client.post(url).json(&body);
        self.tasks.spawn_on(
            async move {
                match request.send().await {
                    Ok(resp) if resp.status().is_success() => {
                        debug!("{} event delivered", kind);
                    }
                    Ok(resp) => {
                        let err = TrackerError::Transport(format!("HTTP status {}", resp.status()));
                        error!("{} event dropped: {}", kind, err);
                    }
                    Err(e) => {
                        error!("{} event dropped: {}", kind, TrackerError::from(e));
                    }
                }
            },
            &runtime,
        );
    }

    fn in_flight(&self) -> Option<TaskTracker> {
        Some(self.tasks.clone())
    }
}
