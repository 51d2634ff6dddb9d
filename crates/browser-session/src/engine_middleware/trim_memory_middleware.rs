//! Trim Memory Middleware
//!
//! Releases engine sessions of background tabs when the system runs low on
//! memory. Custom tabs and the selected tab are never touched.

use super::close_engine_session;
use crate::scope::EngineScope;
use browser_state::{Action, EngineAction, Middleware, MiddlewareContext, SystemAction};

pub struct TrimMemoryMiddleware {
    scope: EngineScope,
    suspend_on_critical: bool,
}

impl TrimMemoryMiddleware {
    pub fn new(scope: EngineScope, suspend_on_critical: bool) -> Self {
        Self {
            scope,
            suspend_on_critical,
        }
    }
}

impl Middleware for TrimMemoryMiddleware {
    fn handle(&mut self, action: &Action, ctx: &mut MiddlewareContext<'_>) -> bool {
        let Action::System(SystemAction::LowMemory { level, states }) = action else {
            return true;
        };

        let state = ctx.state();
        let background = state
            .tabs
            .iter()
            .filter(|tab| state.selected_tab_id.as_deref() != Some(tab.id.as_str()));

        // The reducer replaces these sessions with the supplied snapshots
        let mut released = Vec::new();
        let mut to_suspend = Vec::new();
        for tab in background {
            let Some(engine_session) = tab.engine_state.engine_session.clone() else {
                continue;
            };
            if states.contains_key(&tab.id) {
                released.push((engine_session, tab.engine_state.engine_observer.clone()));
            } else if level.is_critical() && self.suspend_on_critical {
                to_suspend.push(tab.id.clone());
            }
        }

        log::info!(
            "TrimMemoryMiddleware: memory level {}, releasing {} and suspending {} engine sessions",
            level,
            released.len(),
            to_suspend.len()
        );

        for (engine_session, observer) in released {
            self.scope
                .launch_cleanup("close", close_engine_session(engine_session, observer));
        }
        for tab_id in to_suspend {
            ctx.dispatch(EngineAction::suspend(tab_id));
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{tab, Harness};
    use browser_engine::EngineSessionState;
    use browser_state::{CustomTabListAction, EngineAction, MemoryLevel, SystemAction};
    use serde_json::json;
    use std::collections::HashMap;

    async fn setup() -> Harness {
        let mut harness = Harness::new(vec![tab("a"), tab("b"), tab("c")], Some("a"));
        harness
            .dispatch(CustomTabListAction::AddCustomTab { tab: tab("custom") })
            .await;
        for id in ["a", "b", "c", "custom"] {
            harness
                .dispatch(EngineAction::CreateEngineSession {
                    tab_id: id.to_string(),
                    skip_loading: false,
                })
                .await;
        }
        harness
    }

    #[tokio::test]
    async fn test_released_sessions_get_closed() {
        let mut harness = setup().await;
        let b = harness.session("b");
        let c = harness.session("c");

        harness
            .dispatch(SystemAction::LowMemory {
                level: MemoryLevel::RunningLow,
                states: HashMap::from([(
                    "b".to_string(),
                    EngineSessionState::new(json!({"history": []})),
                )]),
            })
            .await;

        let state = harness.store.state();
        assert!(b.is_closed());
        assert!(state.tabs[1].engine_state.is_suspended());
        assert!(!c.is_closed());
        assert!(state.tabs[2].engine_state.is_linked());
    }

    #[tokio::test]
    async fn test_critical_level_suspends_background_tabs() {
        let mut harness = setup().await;
        let a = harness.session("a");
        let custom = harness.session("custom");

        harness
            .dispatch(SystemAction::LowMemory {
                level: MemoryLevel::RunningCritical,
                states: HashMap::new(),
            })
            .await;

        let state = harness.store.state();
        assert!(state.tabs[0].engine_state.is_linked());
        assert!(state.tabs[1].engine_state.is_suspended());
        assert!(state.tabs[2].engine_state.is_suspended());
        assert!(state.custom_tabs[0].engine_state.is_linked());
        assert!(!a.is_closed());
        assert!(!custom.is_closed());
    }
}
