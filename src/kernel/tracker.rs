use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::envelope::{EventEnvelope, EventPayload};
use super::event::{PageSignal, ScrollMetrics};
use super::state::TrackerState;
use super::throttle::Throttle;
use super::time::{elapsed_secs, Clock, DWELL_PERIOD, SCROLL_THROTTLE};
use super::timer::DwellTimer;
use crate::config::TrackerConfig;
use crate::extract::admin::{self, AdminAction, LOGOUT_BUTTON_ID, PRODUCT_FORM_ID};
use crate::extract::click::{classify_click, Position};
use crate::extract::form::{self, CONTACT_FORM_ID, LOGIN_FORM_ID};
use crate::extract::{dwell, page_view, scroll};
use crate::page::{NodeId, PageContext};
use crate::services::transport::Transport;

const TEST_MESSAGE: &str = "This is a test event";

/// Which observers `initialize` attached. Form and control listeners are
/// bound to the element present at init time, like DOM listeners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listeners {
    pub clicks: bool,
    pub scroll: bool,
    pub dwell_timer: bool,
    pub contact_form: Option<NodeId>,
    pub login_form: Option<NodeId>,
    pub admin_controls: bool,
    pub product_form: Option<NodeId>,
    pub logout_button: Option<NodeId>,
    pub unload: bool,
}

/// Counters for what the tracker has done this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerStats {
    pub dispatched: u64,
    /// Events lost to unreadable page context.
    pub dropped: u64,
    /// Scroll signals that passed the rate limiter.
    pub scroll_samples: u64,
    /// Scroll signals the rate limiter discarded.
    pub scroll_throttled: u64,
}

/// The instrumentation controller for one page session: owns `TrackerState`,
/// routes page signals to extractors and hands the resulting envelopes to
/// the transport. Handlers never block.
pub struct Tracker {
    config: TrackerConfig,
    page: Arc<dyn PageContext>,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    pub state: TrackerState,
    listeners: Listeners,
    scroll_throttle: Throttle,
    stats: TrackerStats,
    initialized: bool,
    exited: bool,
}

impl Tracker {
    pub fn new(
        config: TrackerConfig,
        page: Arc<dyn PageContext>,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let state = TrackerState::new(clock.now());
        Self {
            config,
            page,
            transport,
            clock,
            state,
            listeners: Listeners::default(),
            scroll_throttle: Throttle::new(SCROLL_THROTTLE),
            stats: TrackerStats::default(),
            initialized: false,
            exited: false,
        }
    }

    /// Attaches every enabled observer and emits the initial page view.
    /// Precondition: called once per page load. A second call is ignored.
    /// Starting the dwell timer needs a tokio runtime.
    pub fn initialize(&mut self, signals: &mpsc::Sender<PageSignal>) {
        if self.initialized {
            warn!("tracker already initialized; ignoring");
            return;
        }
        self.initialized = true;
        self.state.page_load_time = self.clock.now();

        let features = self.config.features;
        let page = Arc::clone(&self.page);
        let doc = page.document();
        let path = match page.path() {
            Ok(path) => path,
            Err(e) => {
                error!("cannot read page path: {}", e);
                String::new()
            }
        };

        if features.page_view {
            self.dispatch(page_view::page_view(&path));
        }

        if features.clicks {
            self.listeners.clicks = true;
            debug!("click tracking enabled");
        }

        if features.scroll_depth {
            self.listeners.scroll = true;
            debug!("scroll tracking enabled");
        }

        if features.time_on_page {
            self.state.time_spent_seconds = 0;
            self.state.dwell_timer = Some(DwellTimer::start(DWELL_PERIOD, signals));
            self.listeners.dwell_timer = true;
            debug!("time tracking enabled");
        }

        if features.form_submissions {
            self.listeners.contact_form = doc.element_by_id(CONTACT_FORM_ID);
            self.listeners.login_form = doc.element_by_id(LOGIN_FORM_ID);
            debug!(
                contact = self.listeners.contact_form.is_some(),
                login = self.listeners.login_form.is_some(),
                "form tracking enabled"
            );
        }

        if features.admin_actions && admin::is_admin_path(&path) {
            self.listeners.admin_controls = true;
            self.listeners.product_form = doc.element_by_id(PRODUCT_FORM_ID);
            self.listeners.logout_button = doc.element_by_id(LOGOUT_BUTTON_ID);
            debug!("admin tracking enabled");
        }

        self.listeners.unload = true;
        info!(path = %path, "tracker initialized");
    }

    /// Routes one signal. A failure tracking it never affects later signals.
    pub fn handle(&mut self, signal: PageSignal) {
        if !self.initialized {
            warn!("{} signal before initialize; dropped", signal.name());
            return;
        }
        if self.exited {
            debug!("{} signal after page exit; dropped", signal.name());
            return;
        }

        match signal {
            PageSignal::Click { target, x, y } => self.on_click(target, Position { x, y }),
            PageSignal::Scroll(metrics) => self.on_scroll(&metrics),
            PageSignal::Submit { form } => self.on_submit(form),
            PageSignal::DwellTick => self.on_dwell_tick(),
            PageSignal::Test => self.send_test(),
            PageSignal::Unload => self.on_page_exit(),
        }
    }

    fn on_click(&mut self, target: NodeId, position: Position) {
        // Element listeners run before the document-level ones.
        if let Some(logout) = self.listeners.logout_button {
            if self.page.document().contains(logout, target) {
                debug!("admin action tracked: logout");
                self.dispatch(EventPayload::AdminAction(AdminAction::Logout));
            }
        }

        if self.listeners.clicks {
            let base = self.page.url().unwrap_or_default();
            match classify_click(self.page.document(), target, position, &base) {
                Some(click) => {
                    debug!(element = %click.element, product = click.is_product_click, "click tracked");
                    self.dispatch(EventPayload::Click(click));
                }
                None => warn!("click on unknown node {:?}; dropped", target),
            }
        }

        if self.listeners.admin_controls {
            for action in admin::control_click(self.page.document(), target) {
                debug!(?action, "admin action tracked");
                self.dispatch(EventPayload::AdminAction(action));
            }
        }
    }

    fn on_scroll(&mut self, metrics: &ScrollMetrics) {
        if !self.listeners.scroll {
            return;
        }
        if !self.scroll_throttle.admit(self.clock.instant()) {
            self.stats.scroll_throttled += 1;
            return;
        }
        self.stats.scroll_samples += 1;
        if let Some(payload) = scroll::track_scroll(&mut self.state, metrics) {
            debug!("scroll depth tracked: {}%", self.state.max_scroll_depth);
            self.dispatch(payload);
        }
    }

    fn on_submit(&mut self, form: NodeId) {
        let l = &self.listeners;
        let is_tracked_form = l.contact_form == Some(form) || l.login_form == Some(form);
        let is_product_form = l.product_form == Some(form);

        if is_tracked_form {
            if let Some(submission) = form::capture_submit(self.page.document(), form) {
                debug!(?submission, "form submission tracked");
                self.dispatch(EventPayload::FormSubmit(submission));
            }
        }
        if is_product_form {
            let action = admin::product_form_submit(self.page.document());
            debug!(?action, "admin action tracked");
            self.dispatch(EventPayload::AdminAction(action));
        }
    }

    fn on_dwell_tick(&mut self) {
        if !self.state.dwell_timer_running() {
            debug!("dwell tick without a running timer; ignored");
            return;
        }
        let payload = dwell::on_dwell_tick(&mut self.state);
        debug!("time on page: {} seconds", self.state.time_spent_seconds);
        self.dispatch(payload);
    }

    /// Emits the final `pageExit` event. Only the first call does anything.
    pub fn on_page_exit(&mut self) {
        if self.exited {
            debug!("page exit already handled");
            return;
        }
        self.exited = true;
        self.state.stop_dwell_timer();

        let time_spent = elapsed_secs(self.state.page_load_time, self.clock.now());
        let max_scroll_depth = self.state.max_scroll_depth;
        debug!(
            "page exit tracked: {} seconds, scroll depth: {}%",
            time_spent, max_scroll_depth
        );
        self.dispatch(EventPayload::PageExit {
            time_spent,
            max_scroll_depth,
        });
    }

    /// Sends a `test` event through the normal pipeline.
    pub fn send_test(&mut self) {
        self.dispatch(EventPayload::Test {
            message: TEST_MESSAGE.to_string(),
        });
        info!("test event sent");
    }

    fn dispatch(&mut self, payload: EventPayload) {
        let kind = payload.event_type();
        match EventEnvelope::build(
            &self.config.site_id,
            payload,
            self.page.as_ref(),
            self.clock.now(),
        ) {
            Ok(envelope) => {
                self.stats.dispatched += 1;
                self.transport.send(envelope);
            }
            Err(e) => {
                self.stats.dropped += 1;
                error!("{} event dropped: {}", kind.as_str(), e);
            }
        }
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn stats(&self) -> TrackerStats {
        self.stats
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn has_exited(&self) -> bool {
        self.exited
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn page(&self) -> &Arc<dyn PageContext> {
        &self.page
    }
}
