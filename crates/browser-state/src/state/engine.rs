use browser_engine::{EngineObserverHandle, EngineSessionHandle, EngineSessionState};

/// Binding of a tab to its engine session
///
/// A tab is either linked (live `engine_session`, no snapshot), suspended
/// (`engine_session_state` only) or unbound (neither).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineState {
    pub engine_session: Option<EngineSessionHandle>,
    pub engine_session_state: Option<EngineSessionState>,
    pub engine_observer: Option<EngineObserverHandle>,
}

impl EngineState {
    pub fn is_linked(&self) -> bool {
        self.engine_session.is_some()
    }

    pub fn is_suspended(&self) -> bool {
        self.engine_session.is_none() && self.engine_session_state.is_some()
    }
}
