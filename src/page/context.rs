use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::dom::{Document, NodeTree};
use crate::error::{TrackerError, TrackerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Ambient page and browser state. Every read happens at call time; implementations
/// must not hand back values cached from an earlier event.
pub trait PageContext: Send + Sync {
    fn title(&self) -> TrackerResult<String>;
    fn url(&self) -> TrackerResult<String>;
    fn path(&self) -> TrackerResult<String>;
    fn referrer(&self) -> TrackerResult<String>;
    fn user_agent(&self) -> TrackerResult<String>;
    fn language(&self) -> TrackerResult<String>;
    fn viewport(&self) -> TrackerResult<Viewport>;
    fn document(&self) -> &Document;
}

/// Serialized form of a page, as loaded by the replay binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub referrer: String,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default = "default_language")]
    pub language: String,
    pub viewport: Viewport,
    pub document: NodeTree,
}

fn default_language() -> String {
    "en-US".to_string()
}

/// Owned page context. The viewport can change between events.
#[derive(Debug)]
pub struct StaticPage {
    title: String,
    url: String,
    referrer: String,
    user_agent: String,
    language: String,
    viewport: RwLock<Viewport>,
    document: Document,
}

impl StaticPage {
    pub fn new(url: &str, document: Document) -> Self {
        Self {
            title: String::new(),
            url: url.to_string(),
            referrer: String::new(),
            user_agent: String::new(),
            language: default_language(),
            viewport: RwLock::new(Viewport { width: 1280, height: 800 }),
            document,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_referrer(mut self, referrer: &str) -> Self {
        self.referrer = referrer.to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn with_viewport(self, width: u32, height: u32) -> Self {
        self.resize(width, height);
        self
    }

    pub fn resize(&self, width: u32, height: u32) {
        match self.viewport.write() {
            Ok(mut vp) => *vp = Viewport { width, height },
            Err(poisoned) => *poisoned.into_inner() = Viewport { width, height },
        }
    }
}

impl From<PageSnapshot> for StaticPage {
    fn from(snap: PageSnapshot) -> Self {
        Self {
            title: snap.title,
            url: snap.url,
            referrer: snap.referrer,
            user_agent: snap.user_agent,
            language: snap.language,
            viewport: RwLock::new(snap.viewport),
            document: Document::from(&snap.document),
        }
    }
}

impl PageContext for StaticPage {
    fn title(&self) -> TrackerResult<String> {
        Ok(self.title.clone())
    }

    fn url(&self) -> TrackerResult<String> {
        Ok(self.url.clone())
    }

    fn path(&self) -> TrackerResult<String> {
        reqwest::Url::parse(&self.url)
            .map(|u| u.path().to_string())
            .map_err(|e| TrackerError::ContextRead(format!("location {:?}: {}", self.url, e)))
    }

    fn referrer(&self) -> TrackerResult<String> {
        Ok(self.referrer.clone())
    }

    fn user_agent(&self) -> TrackerResult<String> {
        Ok(self.user_agent.clone())
    }

    fn language(&self) -> TrackerResult<String> {
        Ok(self.language.clone())
    }

    fn viewport(&self) -> TrackerResult<Viewport> {
        self.viewport
            .read()
            .map(|vp| *vp)
            .map_err(|_| TrackerError::ContextRead("viewport lock poisoned".to_string()))
    }

    fn document(&self) -> &Document {
        &self.document
    }
}
