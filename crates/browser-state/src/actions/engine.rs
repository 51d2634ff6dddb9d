//! Actions binding tabs to engine sessions and requesting engine work
//!
//! Everything from `LoadUrl` downwards is a pure side effect request: the
//! reducer ignores it and the engine middleware performs it.

use browser_engine::{
    BrowsingData, EngineObserverHandle, EngineSessionHandle, EngineSessionState, LoadUrlFlags,
};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineAction {
    /// Make sure the tab has an engine session
    CreateEngineSession { tab_id: String, skip_loading: bool },

    /// Bind a live engine session to the tab, clearing its stored snapshot
    ///
    /// The tab url gets loaded into the session unless `skip_loading` is set.
    LinkEngineSession {
        tab_id: String,
        engine_session: EngineSessionHandle,
        engine_observer: Option<EngineObserverHandle>,
        skip_loading: bool,
    },

    /// Detach the engine session (and observer) from the tab
    UnlinkEngineSession { tab_id: String },

    /// Store a snapshot of the tab's engine session
    UpdateEngineSessionState {
        tab_id: String,
        state: EngineSessionState,
    },

    /// Replace the live engine session with a snapshot and close it
    SuspendEngineSession { tab_id: String },

    LoadUrl {
        tab_id: String,
        url: String,
        flags: LoadUrlFlags,
        additional_headers: HashMap<String, String>,
    },
    LoadData {
        tab_id: String,
        data: String,
        mime_type: String,
        encoding: String,
    },
    Reload { tab_id: String, flags: LoadUrlFlags },
    StopLoading { tab_id: String },
    GoBack { tab_id: String },
    GoForward { tab_id: String },
    GoToHistoryIndex { tab_id: String, index: usize },
    ToggleDesktopMode { tab_id: String, enable: bool },
    ExitFullscreenMode { tab_id: String },
    ClearData { tab_id: String, data: BrowsingData },
}

impl EngineAction {
    /// Id of the tab this action targets
    pub fn tab_id(&self) -> &str {
        match self {
            Self::CreateEngineSession { tab_id, .. }
            | Self::LinkEngineSession { tab_id, .. }
            | Self::UnlinkEngineSession { tab_id }
            | Self::UpdateEngineSessionState { tab_id, .. }
            | Self::SuspendEngineSession { tab_id }
            | Self::LoadUrl { tab_id, .. }
            | Self::LoadData { tab_id, .. }
            | Self::Reload { tab_id, .. }
            | Self::StopLoading { tab_id }
            | Self::GoBack { tab_id }
            | Self::GoForward { tab_id }
            | Self::GoToHistoryIndex { tab_id, .. }
            | Self::ToggleDesktopMode { tab_id, .. }
            | Self::ExitFullscreenMode { tab_id }
            | Self::ClearData { tab_id, .. } => tab_id,
        }
    }

    /// Load `url` without flags or extra headers
    pub fn load_url(tab_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self::LoadUrl {
            tab_id: tab_id.into(),
            url: url.into(),
            flags: LoadUrlFlags::empty(),
            additional_headers: HashMap::new(),
        }
    }

    /// Link a session without observer, loading the tab url
    pub fn link(tab_id: impl Into<String>, engine_session: EngineSessionHandle) -> Self {
        Self::LinkEngineSession {
            tab_id: tab_id.into(),
            engine_session,
            engine_observer: None,
            skip_loading: false,
        }
    }

    pub fn unlink(tab_id: impl Into<String>) -> Self {
        Self::UnlinkEngineSession {
            tab_id: tab_id.into(),
        }
    }

    pub fn suspend(tab_id: impl Into<String>) -> Self {
        Self::SuspendEngineSession {
            tab_id: tab_id.into(),
        }
    }
}
