use sitetrace::page::{classify, PageType};

#[test]
fn test_known_pages() {
    assert_eq!(classify("/products.html"), PageType::Products);
    assert_eq!(classify("/about.html"), PageType::About);
    assert_eq!(classify("/contact.html"), PageType::Contact);
    assert_eq!(classify("/admin_dashboard.html"), PageType::AdminDashboard);
    assert_eq!(classify("/admin.html"), PageType::AdminLogin);
}

#[test]
fn test_home_variants() {
    assert_eq!(classify(""), PageType::Home);
    assert_eq!(classify("/"), PageType::Home);
    assert_eq!(classify("/index.html"), PageType::Home);
    assert_eq!(classify("/shop/index.html"), PageType::Home);
}

#[test]
fn test_unknown_paths() {
    assert_eq!(classify("/xyz"), PageType::Unknown);
    assert_eq!(classify("/admin"), PageType::Unknown);
}

#[test]
fn test_first_match_wins() {
    // Both patterns present: the earlier rule takes it.
    assert_eq!(classify("/index.html?next=products.html"), PageType::Home);
    assert_eq!(classify("/legacy/products.html/about.html"), PageType::Products);
}

#[test]
fn test_labels_on_the_wire() {
    assert_eq!(
        serde_json::to_value(PageType::AdminDashboard).unwrap(),
        serde_json::json!("admin-dashboard")
    );
    assert_eq!(PageType::AdminLogin.to_string(), "admin-login");
}
