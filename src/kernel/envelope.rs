use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TrackerResult;
use crate::extract::admin::AdminAction;
use crate::extract::click::ClickClassification;
use crate::extract::form::FormSubmission;
use crate::kernel::time::iso_timestamp;
use crate::page::{PageContext, PageType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "pageview")]
    PageView,
    #[serde(rename = "click")]
    Click,
    #[serde(rename = "scroll")]
    Scroll,
    #[serde(rename = "timeOnPage")]
    TimeOnPage,
    #[serde(rename = "pageExit")]
    PageExit,
    #[serde(rename = "formSubmit")]
    FormSubmit,
    #[serde(rename = "adminAction")]
    AdminAction,
    #[serde(rename = "test")]
    Test,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::PageView => "pageview",
            EventType::Click => "click",
            EventType::Scroll => "scroll",
            EventType::TimeOnPage => "timeOnPage",
            EventType::PageExit => "pageExit",
            EventType::FormSubmit => "formSubmit",
            EventType::AdminAction => "adminAction",
            EventType::Test => "test",
        }
    }
}

/// Event-specific `data` object. Serializes flat, without a variant tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    PageView {
        #[serde(rename = "pageType")]
        page_type: PageType,
    },
    Click(ClickClassification),
    Scroll {
        depth: u32,
    },
    TimeOnPage {
        seconds: u64,
    },
    PageExit {
        #[serde(rename = "timeSpent")]
        time_spent: u64,
        #[serde(rename = "maxScrollDepth")]
        max_scroll_depth: u32,
    },
    FormSubmit(FormSubmission),
    AdminAction(AdminAction),
    Test {
        message: String,
    },
}

impl EventPayload {
    pub fn event_type(&self) -> EventType {
        match self {
            EventPayload::PageView { .. } => EventType::PageView,
            EventPayload::Click(_) => EventType::Click,
            EventPayload::Scroll { .. } => EventType::Scroll,
            EventPayload::TimeOnPage { .. } => EventType::TimeOnPage,
            EventPayload::PageExit { .. } => EventType::PageExit,
            EventPayload::FormSubmit(_) => EventType::FormSubmit,
            EventPayload::AdminAction(_) => EventType::AdminAction,
            EventPayload::Test { .. } => EventType::Test,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub title: String,
    pub url: String,
    pub path: String,
    pub referrer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorInfo {
    pub user_agent: String,
    pub language: String,
    /// `<width>x<height>` of the viewport when the envelope was built.
    pub screen_size: String,
}

/// One outbound record. Built per event and consumed by a single send.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    pub site_id: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub page: PageInfo,
    pub visitor: VisitorInfo,
    pub data: EventPayload,
}

impl EventEnvelope {
    /// Reads page and browser state now; nothing is cached between envelopes.
    pub fn build(
        site_id: &str,
        data: EventPayload,
        ctx: &dyn PageContext,
        now: DateTime<Utc>,
    ) -> TrackerResult<Self> {
        let page = PageInfo {
            title: ctx.title()?,
            url: ctx.url()?,
            path: ctx.path()?,
            referrer: ctx.referrer()?,
        };
        let visitor = VisitorInfo {
            user_agent: ctx.user_agent()?,
            language: ctx.language()?,
            screen_size: ctx.viewport()?.to_string(),
        };
        Ok(Self {
            site_id: site_id.to_string(),
            timestamp: iso_timestamp(now),
            event_type: data.event_type(),
            page,
            visitor,
            data,
        })
    }
}
