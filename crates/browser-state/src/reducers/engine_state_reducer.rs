//! Engine State Reducer
//!
//! Links and unlinks engine sessions. Requests for engine work (loading,
//! navigation, suspending) don't change state, the engine middleware
//! performs them.

use crate::actions::EngineAction;
use crate::state::{BrowserState, EngineState};

pub fn reduce(mut state: BrowserState, action: &EngineAction) -> BrowserState {
    match action {
        EngineAction::LinkEngineSession {
            tab_id,
            engine_session,
            engine_observer,
            ..
        } => update_engine_state(&mut state, tab_id, |engine_state| {
            engine_state.engine_session = Some(engine_session.clone());
            engine_state.engine_session_state = None;
            if let Some(observer) = engine_observer {
                engine_state.engine_observer = Some(observer.clone());
            }
        }),

        // The snapshot stays, suspending stores one right after unlinking
        EngineAction::UnlinkEngineSession { tab_id } => {
            update_engine_state(&mut state, tab_id, |engine_state| {
                engine_state.engine_session = None;
                engine_state.engine_observer = None;
            })
        }

        EngineAction::UpdateEngineSessionState {
            tab_id,
            state: session_state,
        } => update_engine_state(&mut state, tab_id, |engine_state| {
            engine_state.engine_session_state = Some(session_state.clone());
        }),

        EngineAction::CreateEngineSession { .. }
        | EngineAction::SuspendEngineSession { .. }
        | EngineAction::LoadUrl { .. }
        | EngineAction::LoadData { .. }
        | EngineAction::Reload { .. }
        | EngineAction::StopLoading { .. }
        | EngineAction::GoBack { .. }
        | EngineAction::GoForward { .. }
        | EngineAction::GoToHistoryIndex { .. }
        | EngineAction::ToggleDesktopMode { .. }
        | EngineAction::ExitFullscreenMode { .. }
        | EngineAction::ClearData { .. } => {}
    }

    state
}

fn update_engine_state(state: &mut BrowserState, tab_id: &str, update: impl FnOnce(&mut EngineState)) {
    state.update_tab(tab_id, |tab| update(&mut tab.engine_state));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TabSessionState;
    use browser_engine::{Engine, EngineObserverHandle, EngineSessionObserver, EngineSessionState, HeadlessEngine};
    use serde_json::json;
    use std::sync::Arc;

    struct NoopObserver;

    impl EngineSessionObserver for NoopObserver {}

    fn state() -> BrowserState {
        BrowserState::with_tabs(
            vec![TabSessionState::new("https://a.com")
                .with_id("a")
                .with_engine_session_state(EngineSessionState::new(json!({"history": []})))],
            Some("a"),
        )
    }

    #[test]
    fn test_link_clears_snapshot() {
        let engine = HeadlessEngine::new();
        let session = engine.create_session(false, None);

        let state = reduce(state(), &EngineAction::link("a", session.clone()));
        let engine_state = &state.tabs[0].engine_state;
        assert_eq!(engine_state.engine_session.as_ref(), Some(&session));
        assert_eq!(engine_state.engine_session_state, None);
        assert!(engine_state.is_linked());
    }

    #[test]
    fn test_link_keeps_observer_if_none_given() {
        let engine = HeadlessEngine::new();
        let observer = EngineObserverHandle::new(Arc::new(NoopObserver));

        let state = reduce(
            state(),
            &EngineAction::LinkEngineSession {
                tab_id: "a".to_string(),
                engine_session: engine.create_session(false, None),
                engine_observer: Some(observer.clone()),
                skip_loading: true,
            },
        );
        let state = reduce(state, &EngineAction::link("a", engine.create_session(false, None)));
        assert_eq!(state.tabs[0].engine_state.engine_observer, Some(observer));
    }

    #[test]
    fn test_unlink_keeps_snapshot() {
        let engine = HeadlessEngine::new();
        let snapshot = EngineSessionState::new(json!({"history": ["https://a.com"]}));

        let state = reduce(state(), &EngineAction::link("a", engine.create_session(false, None)));
        let state = reduce(
            state,
            &EngineAction::UpdateEngineSessionState {
                tab_id: "a".to_string(),
                state: snapshot.clone(),
            },
        );
        let state = reduce(state, &EngineAction::unlink("a"));

        let engine_state = &state.tabs[0].engine_state;
        assert_eq!(engine_state.engine_session, None);
        assert_eq!(engine_state.engine_observer, None);
        assert_eq!(engine_state.engine_session_state, Some(snapshot));
        assert!(engine_state.is_suspended());
    }

    #[test]
    fn test_side_effect_requests_are_noops() {
        let before = state();
        for action in [
            EngineAction::suspend("a"),
            EngineAction::load_url("a", "https://example.com"),
            EngineAction::GoBack {
                tab_id: "a".to_string(),
            },
        ] {
            assert_eq!(reduce(before.clone(), &action), before);
        }
    }
}
