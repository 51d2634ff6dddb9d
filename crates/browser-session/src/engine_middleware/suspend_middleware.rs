//! Suspend Middleware
//!
//! Swaps the live engine session of a tab for a snapshot and closes the
//! session. The next engine action for the tab creates a new session from
//! that snapshot.

use super::close_engine_session;
use crate::scope::EngineScope;
use browser_state::{Action, EngineAction, Middleware, MiddlewareContext};

pub struct SuspendMiddleware {
    scope: EngineScope,
}

impl SuspendMiddleware {
    pub fn new(scope: EngineScope) -> Self {
        Self { scope }
    }
}

impl Middleware for SuspendMiddleware {
    fn handle(&mut self, action: &Action, ctx: &mut MiddlewareContext<'_>) -> bool {
        let Action::Engine(EngineAction::SuspendEngineSession { tab_id }) = action else {
            return true;
        };

        let Some(tab) = ctx.state().find_tab_or_custom_tab(tab_id) else {
            log::warn!("SuspendMiddleware: tab {} does not exist", tab_id);
            return false;
        };
        let Some(engine_session) = tab.engine_state.engine_session.clone() else {
            log::debug!("SuspendMiddleware: tab {} has no engine session", tab_id);
            return false;
        };
        let observer = tab.engine_state.engine_observer.clone();

        let state = engine_session.save_state();
        log::info!("SuspendMiddleware: suspending engine session of tab {}", tab_id);

        ctx.dispatch(EngineAction::unlink(tab_id.clone()));
        ctx.dispatch(EngineAction::UpdateEngineSessionState {
            tab_id: tab_id.clone(),
            state,
        });
        self.scope
            .launch_cleanup("close", close_engine_session(engine_session, observer));

        false
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{tab, Harness};
    use browser_engine::{EngineCall, EngineSession};
    use browser_state::EngineAction;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_suspend_stores_snapshot_and_closes() {
        let mut harness = Harness::new(vec![tab("a"), tab("b")], Some("a"));
        harness.dispatch(EngineAction::load_url("b", "https://b.com/page")).await;
        let session = harness.session("b");

        harness.dispatch(EngineAction::suspend("b")).await;

        let state = harness.store.state();
        let engine_state = &state.tabs[1].engine_state;
        assert!(engine_state.is_suspended());
        assert_eq!(engine_state.engine_observer, None);
        assert_eq!(engine_state.engine_session_state, Some(session.save_state()));
        assert!(session.is_closed());
        assert_eq!(session.observer_count(), 0);
    }

    #[tokio::test]
    async fn test_relink_restores_snapshot_and_skips_loading() {
        let mut harness = Harness::new(vec![tab("a")], Some("a"));
        harness.dispatch(EngineAction::load_url("a", "https://a.com/one")).await;
        harness.dispatch(EngineAction::load_url("a", "https://a.com/two")).await;
        harness.dispatch(EngineAction::suspend("a")).await;

        harness
            .dispatch(EngineAction::Reload {
                tab_id: "a".to_string(),
                flags: Default::default(),
            })
            .await;

        let sessions = harness.engine.sessions();
        assert_eq!(sessions.len(), 2);
        let restored = harness.session("a");
        assert_eq!(restored.id(), sessions[1].id());
        assert_eq!(
            restored.history(),
            vec!["https://a.com/one".to_string(), "https://a.com/two".to_string()]
        );
        let loads = restored.count_calls(|call| matches!(call, EngineCall::LoadUrl { .. }));
        assert_eq!(loads, 0);
        assert_eq!(harness.store.state().tabs[0].engine_state.engine_session_state, None);
    }

    #[tokio::test]
    async fn test_suspend_without_session_does_nothing() {
        let mut harness = Harness::new(vec![tab("a")], Some("a"));
        let before = harness.store.state();

        harness.dispatch(EngineAction::suspend("a")).await;
        harness.dispatch(EngineAction::suspend("unknown")).await;

        assert_eq!(harness.store.state(), before);
        assert!(harness.engine.sessions().is_empty());
    }
}
