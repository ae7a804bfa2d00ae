use serde::{Deserialize, Serialize};

use super::form::field_value;
use crate::page::{Document, NodeId};

/// Admin tracking only activates on paths containing this marker.
pub const ADMIN_PATH_MARKER: &str = "admin";
pub const PRODUCT_FORM_ID: &str = "product-form";
pub const LOGOUT_BUTTON_ID: &str = "logout-btn";
const PRODUCT_ID_FIELD: &str = "product-id";
const PRODUCT_NAME_FIELD: &str = "product-name";
const EDIT_CLASS: &str = "edit-btn";
const DELETE_CLASS: &str = "delete-btn";
const TARGET_ATTR: &str = "data-id";
const NEW_PRODUCT_ID: &str = "new";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum AdminAction {
    EditProduct {
        #[serde(rename = "productId")]
        product_id: Option<String>,
    },
    DeleteProduct {
        #[serde(rename = "productId")]
        product_id: Option<String>,
    },
    AddProduct {
        #[serde(rename = "productId")]
        product_id: String,
        #[serde(rename = "productName")]
        product_name: String,
    },
    UpdateProduct {
        #[serde(rename = "productId")]
        product_id: String,
        #[serde(rename = "productName")]
        product_name: String,
    },
    Logout,
}

pub fn is_admin_path(path: &str) -> bool {
    path.contains(ADMIN_PATH_MARKER)
}

/// Edit/delete controls are matched on the click target itself, not its
/// ancestors. A target carrying both markers yields both actions.
pub fn control_click(doc: &Document, target: NodeId) -> Vec<AdminAction> {
    let Some(el) = doc.get(target) else {
        return Vec::new();
    };
    let product_id = el.attr(TARGET_ATTR).map(str::to_string);
    let mut actions = Vec::new();
    if el.has_class(EDIT_CLASS) {
        actions.push(AdminAction::EditProduct {
            product_id: product_id.clone(),
        });
    }
    if el.has_class(DELETE_CLASS) {
        actions.push(AdminAction::DeleteProduct { product_id });
    }
    actions
}

/// A non-empty existing id means the form edits that product.
/// A missing name field reads as an empty name.
pub fn product_form_submit(doc: &Document) -> AdminAction {
    let product_id = field_value(doc, PRODUCT_ID_FIELD).filter(|id| !id.is_empty());
    let product_name = field_value(doc, PRODUCT_NAME_FIELD).unwrap_or_default();
    match product_id {
        Some(product_id) => AdminAction::UpdateProduct {
            product_id,
            product_name,
        },
        None => AdminAction::AddProduct {
            product_id: NEW_PRODUCT_ID.to_string(),
            product_name,
        },
    }
}
