#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use sitetrace::kernel::time::ManualClock;
use sitetrace::page::{Document, Element, StaticPage};
use sitetrace::services::transport::MemoryTransport;
use sitetrace::{FeatureConfig, PageSignal, Tracker, TrackerConfig};
use tokio::sync::mpsc;

pub struct Harness {
    pub tracker: Tracker,
    pub sent: Arc<MemoryTransport>,
    pub clock: Arc<ManualClock>,
    pub page: Arc<StaticPage>,
    pub signals: mpsc::Sender<PageSignal>,
    pub inbox: mpsc::Receiver<PageSignal>,
}

/// Storefront with every element the extractors look for.
pub fn shop_document() -> Document {
    let mut doc = Document::new(Element::new("body"));
    let root = doc.root();

    let nav = doc.append(root, Element::new("nav"));
    doc.append(
        nav,
        Element::new("a").with_id("nav-products").with_attr("href", "products.html"),
    );

    let card = doc.append(root, Element::new("div").with_class("product"));
    doc.append(card, Element::new("h4").with_text("Widget"));
    doc.append(card, Element::new("span").with_class("price").with_text("$9"));
    doc.append(card, Element::new("button").with_id("buy"));

    let contact = doc.append(root, Element::new("form").with_id("contactForm"));
    doc.append(contact, Element::new("input").with_id("subject").with_value("Bulk order"));

    let login = doc.append(root, Element::new("form").with_id("loginForm"));
    doc.append(login, Element::new("input").with_id("username").with_value("ana"));

    let logout = doc.append(root, Element::new("button").with_id("logout-btn"));
    doc.append(logout, Element::new("span").with_id("logout-label").with_text("Log out"));

    let product_form = doc.append(root, Element::new("form").with_id("product-form"));
    doc.append(product_form, Element::new("input").with_id("product-id").with_value(""));
    doc.append(product_form, Element::new("input").with_id("product-name").with_value("Foo"));

    doc.append(
        root,
        Element::new("button")
            .with_id("edit-7")
            .with_class("btn edit-btn")
            .with_attr("data-id", "7"),
    );
    doc.append(
        root,
        Element::new("button")
            .with_id("delete-7")
            .with_class("btn delete-btn")
            .with_attr("data-id", "7"),
    );
    doc
}

pub fn shop_page(path: &str) -> StaticPage {
    page_with(path, shop_document())
}

pub fn page_with(path: &str, doc: Document) -> StaticPage {
    StaticPage::new(&format!("https://shop.test{}", path), doc)
        .with_title("Shop")
        .with_referrer("https://search.test/")
        .with_user_agent("test-agent/1.0")
        .with_language("en-GB")
        .with_viewport(1024, 768)
}

pub fn config(features: FeatureConfig) -> TrackerConfig {
    TrackerConfig {
        site_id: "shop-main".to_string(),
        features,
        ..TrackerConfig::default()
    }
}

pub fn harness(features: FeatureConfig, page: StaticPage) -> Harness {
    let sent = Arc::new(MemoryTransport::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    ));
    let page = Arc::new(page);
    let tracker = Tracker::new(config(features), page.clone(), sent.clone(), clock.clone());
    let (signals, inbox) = mpsc::channel(16);
    Harness {
        tracker,
        sent,
        clock,
        page,
        signals,
        inbox,
    }
}

/// Harness with the tracker already initialized.
pub fn started(features: FeatureConfig, page: StaticPage) -> Harness {
    let mut h = harness(features, page);
    h.tracker.initialize(&h.signals);
    h
}

impl Harness {
    pub fn node(&self, id: &str) -> sitetrace::page::NodeId {
        use sitetrace::page::PageContext;
        self.page
            .document()
            .element_by_id(id)
            .unwrap_or_else(|| panic!("fixture has no #{}", id))
    }

    pub fn click(&mut self, id: &str, x: i32, y: i32) {
        let target = self.node(id);
        self.tracker.handle(PageSignal::Click { target, x, y });
    }

    pub fn submit(&mut self, id: &str) {
        let form = self.node(id);
        self.tracker.handle(PageSignal::Submit { form });
    }

    pub fn data(&self) -> Vec<serde_json::Value> {
        self.sent
            .envelopes()
            .iter()
            .map(|e| serde_json::to_value(&e.data).unwrap())
            .collect()
    }
}
