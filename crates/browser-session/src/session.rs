//! Legacy session model
//!
//! A [`Session`] is a flat, detached copy of what a tab looks like. It is
//! what the [`SessionManager`](crate::SessionManager) hands out and accepts.

use browser_state::{SessionSource, TabSessionState};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub id: String,
    pub url: String,
    pub private: bool,
    pub source: SessionSource,
    pub parent_id: Option<String>,
    pub title: String,
    pub reader_mode: bool,
    pub context_id: Option<String>,
    /// Lives in the custom tab list instead of the tab list
    pub custom_tab: bool,
}

impl Session {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    pub fn with_source(mut self, source: SessionSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    pub fn custom_tab(mut self) -> Self {
        self.custom_tab = true;
        self.source = SessionSource::CustomTab;
        self
    }

    pub fn from_tab(tab: &TabSessionState, custom_tab: bool) -> Self {
        Self {
            id: tab.id.clone(),
            url: tab.content.url.clone(),
            private: tab.content.private,
            source: tab.source,
            parent_id: tab.parent_id.clone(),
            title: tab.content.title.clone(),
            reader_mode: tab.reader_state.active,
            context_id: tab.context_id.clone(),
            custom_tab,
        }
    }

    /// Tab state for this session, without any engine state
    pub fn to_tab(&self) -> TabSessionState {
        let mut tab = TabSessionState::new(self.url.clone())
            .with_id(self.id.clone())
            .private(self.private)
            .with_title(self.title.clone())
            .with_source(self.source);
        tab.parent_id = self.parent_id.clone();
        tab.context_id = self.context_id.clone();
        tab.reader_state.active = self.reader_mode;
        tab
    }
}
