use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse label for the current page, attached to page views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageType {
    Home,
    Products,
    About,
    Contact,
    AdminDashboard,
    AdminLogin,
    Unknown,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Home => "home",
            PageType::Products => "products",
            PageType::About => "about",
            PageType::Contact => "contact",
            PageType::AdminDashboard => "admin-dashboard",
            PageType::AdminLogin => "admin-login",
            PageType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered match, first hit wins. Dashboard is tested before the login page.
pub fn classify(path: &str) -> PageType {
    if path.is_empty() || path == "/" || path.contains("index.html") {
        PageType::Home
    } else if path.contains("products.html") {
        PageType::Products
    } else if path.contains("about.html") {
        PageType::About
    } else if path.contains("contact.html") {
        PageType::Contact
    } else if path.contains("admin_dashboard.html") {
        PageType::AdminDashboard
    } else if path.contains("admin.html") {
        PageType::AdminLogin
    } else {
        PageType::Unknown
    }
}
