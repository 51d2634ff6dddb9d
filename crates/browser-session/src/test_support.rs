//! Store wired to a headless engine, for middleware tests

use crate::engine_middleware;
use crate::scope::EngineScope;
use browser_engine::{Engine, HeadlessEngine, HeadlessEngineSession};
use browser_state::{Action, BrowserState, Store, TabSessionState};
use std::sync::Arc;

pub(crate) fn tab(id: &str) -> TabSessionState {
    TabSessionState::new(format!("https://{}.com", id)).with_id(id)
}

pub(crate) struct Harness {
    pub engine: Arc<HeadlessEngine>,
    pub scope: EngineScope,
    pub store: Store,
}

impl Harness {
    /// Must be called from within a tokio runtime
    pub fn new(tabs: Vec<TabSessionState>, selected_tab_id: Option<&str>) -> Self {
        let engine = Arc::new(HeadlessEngine::new());
        let scope = EngineScope::current().expect("tests run on a tokio runtime");
        let dyn_engine: Arc<dyn Engine> = engine.clone();
        let store = Store::with_middleware(
            BrowserState::with_tabs(tabs, selected_tab_id),
            engine_middleware::create(dyn_engine, scope.clone()),
        );

        Self {
            engine,
            scope,
            store,
        }
    }

    /// Dispatch and wait for every engine call it caused
    pub async fn dispatch(&mut self, action: impl Into<Action>) {
        self.store.dispatch(action).expect("action rejected");
        self.scope.settle(&mut self.store).await;
    }

    /// Headless session currently linked to the tab
    pub fn session(&self, tab_id: &str) -> Arc<HeadlessEngineSession> {
        let state = self.store.state();
        let handle = state
            .find_tab_or_custom_tab(tab_id)
            .and_then(|tab| tab.engine_state.engine_session.clone())
            .expect("tab has no engine session");
        self.engine
            .session_for(&handle)
            .expect("session was not created by the headless engine")
    }
}
