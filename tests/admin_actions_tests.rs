mod common;

use common::{page_with, shop_page, started};
use pretty_assertions::assert_eq;
use serde_json::json;
use sitetrace::page::{Document, Element};
use sitetrace::{EventType, FeatureConfig};

fn admin_only() -> FeatureConfig {
    FeatureConfig {
        admin_actions: true,
        ..FeatureConfig::none()
    }
}

#[test]
fn test_add_product_when_id_empty() {
    let mut h = started(admin_only(), shop_page("/admin_dashboard.html"));
    h.submit("product-form");

    assert_eq!(h.sent.event_types(), vec![EventType::AdminAction]);
    assert_eq!(
        h.data()[0],
        json!({ "action": "addProduct", "productId": "new", "productName": "Foo" })
    );
}

#[test]
fn test_update_product_when_id_present() {
    let mut doc = Document::new(Element::new("body"));
    let form = doc.append(doc.root(), Element::new("form").with_id("product-form"));
    doc.append(form, Element::new("input").with_id("product-id").with_value("7"));
    doc.append(form, Element::new("input").with_id("product-name").with_value("Foo"));

    let mut h = started(admin_only(), page_with("/admin_dashboard.html", doc));
    h.submit("product-form");

    assert_eq!(
        h.data()[0],
        json!({ "action": "updateProduct", "productId": "7", "productName": "Foo" })
    );
}

#[test]
fn test_edit_and_delete_controls() {
    let mut h = started(admin_only(), shop_page("/admin_dashboard.html"));
    h.click("edit-7", 0, 0);
    h.click("delete-7", 0, 0);

    assert_eq!(
        h.data(),
        vec![
            json!({ "action": "editProduct", "productId": "7" }),
            json!({ "action": "deleteProduct", "productId": "7" }),
        ]
    );
}

#[test]
fn test_control_without_data_id_reports_null() {
    let mut doc = Document::new(Element::new("body"));
    doc.append(doc.root(), Element::new("button").with_id("e").with_class("edit-btn"));

    let mut h = started(admin_only(), page_with("/admin.html", doc));
    h.click("e", 0, 0);
    assert_eq!(h.data(), vec![json!({ "action": "editProduct", "productId": null })]);
}

#[test]
fn test_logout_click_inside_button() {
    let mut h = started(admin_only(), shop_page("/admin_dashboard.html"));
    h.click("logout-label", 5, 5);
    assert_eq!(h.data(), vec![json!({ "action": "logout" })]);
}

#[test]
fn test_logout_fires_before_generic_click() {
    let features = FeatureConfig {
        clicks: true,
        admin_actions: true,
        ..FeatureConfig::none()
    };
    let mut h = started(features, shop_page("/admin_dashboard.html"));
    h.click("logout-btn", 5, 5);
    assert_eq!(
        h.sent.event_types(),
        vec![EventType::AdminAction, EventType::Click]
    );
}

#[test]
fn test_non_admin_path_has_no_admin_listeners() {
    let mut h = started(admin_only(), shop_page("/products.html"));
    assert!(!h.tracker.listeners().admin_controls);
    assert_eq!(h.tracker.listeners().product_form, None);

    h.click("edit-7", 0, 0);
    h.click("logout-btn", 0, 0);
    h.submit("product-form");
    assert!(h.sent.is_empty());
}

#[test]
fn test_admin_feature_disabled_on_admin_path() {
    let mut h = started(FeatureConfig::none(), shop_page("/admin_dashboard.html"));
    h.click("edit-7", 0, 0);
    assert!(h.sent.is_empty());
}
