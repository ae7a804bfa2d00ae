use serde::{Deserialize, Serialize};

use crate::page::{Document, NodeId};

pub const CONTACT_FORM_ID: &str = "contactForm";
pub const LOGIN_FORM_ID: &str = "loginForm";
const SUBJECT_FIELD_ID: &str = "subject";
const USERNAME_FIELD_ID: &str = "username";
const NO_SUBJECT: &str = "No subject";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "formType", rename_all = "camelCase")]
pub enum FormSubmission {
    Contact {
        subject: String,
    },
    Login {
        /// Omitted from the payload when the page has no username field.
        #[serde(skip_serializing_if = "Option::is_none")]
        username: Option<String>,
    },
}

/// Current value of the form control with `id`. A control without a value
/// reads as the empty string; a missing control reads as `None`.
pub fn field_value(doc: &Document, id: &str) -> Option<String> {
    doc.element_by_id(id)
        .and_then(|n| doc.get(n))
        .map(|e| e.value.clone().unwrap_or_default())
}

/// Payload for a submit on one of the tracked forms, `None` for any other form.
pub fn capture_submit(doc: &Document, form: NodeId) -> Option<FormSubmission> {
    let form_id = doc.get(form)?.id.as_deref()?;
    match form_id {
        CONTACT_FORM_ID => Some(FormSubmission::Contact {
            subject: field_value(doc, SUBJECT_FIELD_ID)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| NO_SUBJECT.to_string()),
        }),
        LOGIN_FORM_ID => Some(FormSubmission::Login {
            username: field_value(doc, USERNAME_FIELD_ID),
        }),
        _ => None,
    }
}
