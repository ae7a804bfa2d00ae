mod common;

use std::time::Duration;

use common::{shop_page, started};
use sitetrace::{EventType, FeatureConfig, PageSignal, ScrollMetrics};

fn scroll_only() -> FeatureConfig {
    FeatureConfig {
        scroll_depth: true,
        ..FeatureConfig::none()
    }
}

/// 1000px of scrollable range, so `y / 10` is the percentage.
fn at(y: f64) -> PageSignal {
    PageSignal::Scroll(ScrollMetrics {
        scroll_y: y,
        scroll_height: 1800.0,
        viewport_height: 800.0,
    })
}

fn reported_depths(h: &common::Harness) -> Vec<u64> {
    h.sent
        .of_type(EventType::Scroll)
        .iter()
        .map(|e| serde_json::to_value(&e.data).unwrap()["depth"].as_u64().unwrap())
        .collect()
}

#[test]
fn test_each_threshold_reported_once() {
    let mut h = started(scroll_only(), shop_page("/products.html"));

    for y in [250.0, 500.0, 400.0, 500.0, 750.0, 250.0, 1000.0, 1000.0] {
        h.tracker.handle(at(y));
        h.clock.advance(Duration::from_millis(600));
    }

    assert_eq!(reported_depths(&h), vec![25, 50, 75, 100]);
    assert_eq!(h.tracker.state.max_scroll_depth, 100);
}

#[test]
fn test_off_boundary_maximum_suppresses_later_boundary() {
    let mut h = started(scroll_only(), shop_page("/products.html"));

    // 52% raises the watermark past 50, so reaching exactly 50 later is not new.
    for y in [520.0, 500.0, 530.0, 750.0] {
        h.tracker.handle(at(y));
        h.clock.advance(Duration::from_millis(500));
    }

    assert_eq!(reported_depths(&h), vec![75]);
    assert_eq!(h.tracker.state.max_scroll_depth, 75);
}

#[test]
fn test_burst_is_sampled_once() {
    let mut h = started(scroll_only(), shop_page("/products.html"));

    // Ten signals inside 100ms, each deeper than the last.
    for i in 1..=10 {
        h.tracker.handle(at(i as f64 * 100.0));
        h.clock.advance(Duration::from_millis(10));
    }

    let stats = h.tracker.stats();
    assert_eq!(stats.scroll_samples, 1);
    assert_eq!(stats.scroll_throttled, 9);
    assert_eq!(h.tracker.state.max_scroll_depth, 10);
    assert!(reported_depths(&h).is_empty());
}

#[test]
fn test_spaced_signals_each_sampled() {
    let mut h = started(scroll_only(), shop_page("/products.html"));

    for y in [100.0, 250.0, 300.0, 500.0] {
        h.tracker.handle(at(y));
        h.clock.advance(Duration::from_millis(500));
    }

    assert_eq!(h.tracker.stats().scroll_samples, 4);
    assert_eq!(h.tracker.stats().scroll_throttled, 0);
    assert_eq!(reported_depths(&h), vec![25, 50]);
}

#[test]
fn test_disabled_feature_ignores_scroll() {
    let mut h = started(FeatureConfig::none(), shop_page("/products.html"));
    h.tracker.handle(at(1000.0));
    assert!(h.sent.is_empty());
    assert_eq!(h.tracker.state.max_scroll_depth, 0);
    assert_eq!(h.tracker.stats().scroll_samples, 0);
}
