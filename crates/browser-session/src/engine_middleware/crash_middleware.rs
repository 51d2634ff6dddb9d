use super::get_or_create_engine_session;
use crate::scope::EngineScope;
use browser_engine::Engine;
use browser_state::{Action, CrashAction, Middleware, MiddlewareContext};
use std::sync::Arc;

/// Recovers the engine session of a crashed tab on `RestoreCrashedSession`
pub struct CrashMiddleware {
    engine: Arc<dyn Engine>,
    scope: EngineScope,
}

impl CrashMiddleware {
    pub fn new(engine: Arc<dyn Engine>, scope: EngineScope) -> Self {
        Self { engine, scope }
    }
}

impl Middleware for CrashMiddleware {
    fn handle(&mut self, action: &Action, ctx: &mut MiddlewareContext<'_>) -> bool {
        let Action::Crash(CrashAction::RestoreCrashedSession { tab_id }) = action else {
            return true;
        };

        if let Some(engine_session) = get_or_create_engine_session(&self.engine, tab_id, ctx, false)
        {
            let tab_id = tab_id.clone();
            self.scope.launch("recover_from_crash", async move {
                if !engine_session.recover_from_crash().await {
                    log::warn!("CrashMiddleware: engine session of tab {} not recovered", tab_id);
                }
            });
        }

        // The reducer clears the crashed flag
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{tab, Harness};
    use browser_engine::EngineCall;
    use browser_state::{CrashAction, EngineAction};

    #[tokio::test]
    async fn test_crash_and_restore() {
        let mut harness = Harness::new(vec![tab("a")], Some("a"));
        harness.dispatch(EngineAction::load_url("a", "https://a.com")).await;
        let session = harness.session("a");

        session.simulate_crash();
        harness.scope.settle(&mut harness.store).await;
        assert!(harness.store.state().tabs[0].crashed);

        harness
            .dispatch(CrashAction::RestoreCrashedSession {
                tab_id: "a".to_string(),
            })
            .await;

        assert!(!harness.store.state().tabs[0].crashed);
        assert!(!session.is_crashed());
        assert_eq!(session.count_calls(|call| *call == EngineCall::RecoverFromCrash), 1);
    }
}
