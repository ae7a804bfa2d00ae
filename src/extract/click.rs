use serde::{Deserialize, Serialize};

use crate::page::{Document, NodeId};

const PRODUCT_CLASS: &str = "product";
const PRICE_CLASS: &str = "price";
const BUTTON_CLASS: &str = "btn";
const UNKNOWN_PRODUCT: &str = "Unknown Product";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    pub price: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// What was clicked, derived fresh for each click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickClassification {
    /// Lowercase tag name.
    pub element: String,
    pub element_id: Option<String>,
    pub element_class: Option<String>,
    pub is_button: bool,
    pub is_nav_link: bool,
    pub link_url: Option<String>,
    pub is_product_click: bool,
    pub product_info: Option<ProductInfo>,
    pub position: Position,
}

/// Returns `None` if `target` is not part of `doc`.
pub fn classify_click(
    doc: &Document,
    target: NodeId,
    position: Position,
    base_url: &str,
) -> Option<ClickClassification> {
    let el = doc.get(target)?;

    let product = doc.closest(target, |e| e.has_class(PRODUCT_CLASS));
    let is_button = el.is("button") || el.has_class(BUTTON_CLASS);
    let is_nav_link = el.is("a") && doc.closest(target, |e| e.is("nav")).is_some();
    let link_url = doc
        .closest(target, |e| e.is("a"))
        .and_then(|a| doc.get(a))
        .and_then(|a| a.attr("href"))
        .map(|href| resolve_href(base_url, href));

    Some(ClickClassification {
        element: el.tag.to_ascii_lowercase(),
        element_id: el.id.clone().filter(|id| !id.is_empty()),
        element_class: Some(el.class_name.clone()).filter(|c| !c.is_empty()),
        is_button,
        is_nav_link,
        link_url,
        is_product_click: product.is_some(),
        product_info: product.map(|p| product_info(doc, p)),
        position,
    })
}

/// Name from the first nested `h4`, price from the first nested `.price`.
pub fn product_info(doc: &Document, product: NodeId) -> ProductInfo {
    let name = doc
        .query_first(product, |e| e.is("h4"))
        .map(|h| doc.text_content(h))
        .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());
    let price = doc
        .query_first(product, |e| e.has_class(PRICE_CLASS))
        .map(|p| doc.text_content(p));
    ProductInfo { name, price }
}

/// Anchors report their absolute URL, like `HTMLAnchorElement.href`.
fn resolve_href(base: &str, href: &str) -> String {
    reqwest::Url::parse(base)
        .and_then(|b| b.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Element;

    #[test]
    fn relative_links_resolve_against_page() {
        let mut doc = Document::new(Element::new("body"));
        let nav = doc.append(doc.root(), Element::new("nav"));
        let link = doc.append(nav, Element::new("a").with_attr("href", "products.html"));
        let c = classify_click(&doc, link, Position { x: 0, y: 0 }, "https://shop.test/index.html")
            .unwrap();
        assert!(c.is_nav_link);
        assert!(!c.is_button);
        assert_eq!(c.link_url.as_deref(), Some("https://shop.test/products.html"));
    }

    #[test]
    fn span_inside_anchor_is_not_nav_link() {
        let mut doc = Document::new(Element::new("body"));
        let nav = doc.append(doc.root(), Element::new("nav"));
        let link = doc.append(nav, Element::new("a").with_attr("href", "/about.html"));
        let label = doc.append(link, Element::new("span").with_class("btn"));
        let c = classify_click(&doc, label, Position { x: 1, y: 2 }, "https://shop.test/").unwrap();
        assert!(!c.is_nav_link);
        assert!(c.is_button);
        assert_eq!(c.element_class.as_deref(), Some("btn"));
        assert_eq!(c.link_url.as_deref(), Some("https://shop.test/about.html"));
    }

    #[test]
    fn product_without_heading_is_unknown() {
        let mut doc = Document::new(Element::new("body"));
        let card = doc.append(doc.root(), Element::new("div").with_class("product"));
        let img = doc.append(card, Element::new("img"));
        let c = classify_click(&doc, img, Position { x: 0, y: 0 }, "https://shop.test/").unwrap();
        assert_eq!(
            c.product_info,
            Some(ProductInfo { name: "Unknown Product".into(), price: None })
        );
        assert_eq!(c.element_id, None);
        assert_eq!(c.link_url, None);
    }
}
