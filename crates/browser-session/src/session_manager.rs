//! Session Manager
//!
//! Session based façade over the [`Store`]. Callers working with the flat
//! [`Session`] model add, remove and select sessions here; every call is
//! translated into store actions.
//!
//! # Default session
//!
//! With a default session factory set, a new default session gets added
//! and selected whenever removing sessions leaves nothing selected.

use crate::engine_middleware::{self, EngineMiddlewareConfig};
use crate::engine_observer::EngineObserver;
use crate::error::SessionError;
use crate::scope::EngineScope;
use crate::session::Session;
use crate::snapshot::{Snapshot, SnapshotItem};
use browser_engine::{Engine, EngineObserverHandle, EngineSessionHandle, EngineSessionState};
use browser_state::{
    Action, BrowserState, CustomTabListAction, Dispatcher, EngineAction, LoggingMiddleware,
    MemoryLevel, Middleware, Store, SystemAction, TabListAction, TabSessionState,
};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tokio::sync::watch;

/// Callbacks about session changes
///
/// All methods have empty default implementations.
pub trait SessionManagerObserver: Send + Sync {
    fn on_session_added(&self, _session: &Session) {}

    fn on_session_removed(&self, _session: &Session) {}

    fn on_session_selected(&self, _session: &Session) {}

    fn on_sessions_restored(&self) {}

    fn on_all_sessions_removed(&self) {}
}

type DefaultSession = Box<dyn Fn() -> Session + Send + Sync>;

pub struct SessionManager {
    store: Store,
    scope: EngineScope,
    observers: Vec<Weak<dyn SessionManagerObserver>>,
    default_session: Option<DefaultSession>,
}

impl SessionManager {
    pub fn new(engine: Arc<dyn Engine>, scope: EngineScope) -> Self {
        Self::with_config(engine, scope, EngineMiddlewareConfig::default())
    }

    pub fn with_config(
        engine: Arc<dyn Engine>,
        scope: EngineScope,
        config: EngineMiddlewareConfig,
    ) -> Self {
        let mut middleware: Vec<Box<dyn Middleware>> = vec![Box::new(LoggingMiddleware::new())];
        middleware.extend(engine_middleware::create_with_config(
            engine,
            scope.clone(),
            config,
        ));

        Self {
            store: Store::with_middleware(BrowserState::new(), middleware),
            scope,
            observers: Vec::new(),
            default_session: None,
        }
    }

    /// Session to add whenever removing leaves nothing selected
    pub fn with_default_session(
        mut self,
        default_session: impl Fn() -> Session + Send + Sync + 'static,
    ) -> Self {
        self.default_session = Some(Box::new(default_session));
        self
    }

    /// Register an observer, kept until the caller drops its `Arc`
    pub fn register(&mut self, observer: &Arc<dyn SessionManagerObserver>) {
        self.observers.push(Arc::downgrade(observer));
    }

    pub fn state(&self) -> Arc<BrowserState> {
        self.store.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<BrowserState>> {
        self.store.subscribe()
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.store.dispatcher()
    }

    pub fn dispatch(&mut self, action: impl Into<Action>) -> Result<(), SessionError> {
        self.store.dispatch(action)?;
        Ok(())
    }

    /// Wait for pending engine calls and the actions they caused
    pub async fn settle(&mut self) {
        self.scope.settle(&mut self.store).await;
    }

    pub fn add(
        &mut self,
        session: Session,
        selected: bool,
        engine_session: Option<EngineSessionHandle>,
        engine_session_state: Option<EngineSessionState>,
        parent: Option<&Session>,
    ) -> Result<(), SessionError> {
        let mut session = session;
        if let Some(parent) = parent.filter(|_| !session.custom_tab) {
            session.parent_id = Some(parent.id.clone());
        }

        let mut tab = session.to_tab();
        tab.engine_state.engine_session_state = engine_session_state;

        let previous = self.selected_tab_id();
        if session.custom_tab {
            self.store.dispatch(CustomTabListAction::AddCustomTab { tab })?;
        } else {
            self.store.dispatch(TabListAction::AddTab {
                tab,
                select: selected,
            })?;
        }

        if let Some(engine_session) = engine_session {
            self.link(&session.id, engine_session, false)?;
        }

        self.notify(|observer| observer.on_session_added(&session));
        self.notify_selection_change(previous);
        Ok(())
    }

    /// Add several sessions, none of them may have a parent
    pub fn add_all(&mut self, sessions: Vec<Session>) -> Result<(), SessionError> {
        let previous = self.selected_tab_id();
        let (custom, normal): (Vec<_>, Vec<_>) =
            sessions.into_iter().partition(|session| session.custom_tab);

        let tabs = normal.iter().map(Session::to_tab).collect();
        self.store.dispatch(TabListAction::AddMultipleTabs { tabs })?;
        for session in &custom {
            self.store.dispatch(CustomTabListAction::AddCustomTab {
                tab: session.to_tab(),
            })?;
        }

        for session in normal.iter().chain(custom.iter()) {
            self.notify(|observer| observer.on_session_added(session));
        }
        self.notify_selection_change(previous);
        Ok(())
    }

    /// Remove a session, unknown ids are ignored
    pub fn remove(&mut self, id: &str, select_parent_if_exists: bool) -> Result<(), SessionError> {
        let Some(session) = self.find_session_by_id(id) else {
            log::debug!("SessionManager: no session {} to remove", id);
            return Ok(());
        };

        let previous = self.selected_tab_id();
        if session.custom_tab {
            self.store.dispatch(CustomTabListAction::RemoveCustomTab {
                tab_id: id.to_string(),
            })?;
        } else {
            self.store.dispatch(TabListAction::RemoveTab {
                tab_id: id.to_string(),
                select_parent_if_exists,
            })?;
        }
        self.notify(|observer| observer.on_session_removed(&session));

        if !session.custom_tab && self.selected_tab_id().is_none() {
            self.add_default_session()?;
        }
        self.notify_selection_change(previous);
        Ok(())
    }

    /// Remove all normal and private sessions, custom tabs stay
    pub fn remove_sessions(&mut self) -> Result<(), SessionError> {
        self.store.dispatch(TabListAction::RemoveAllTabs)?;
        self.notify(|observer| observer.on_all_sessions_removed());
        self.add_default_session()
    }

    /// Remove every session including custom tabs
    pub fn remove_all(&mut self) -> Result<(), SessionError> {
        // Closing only custom tabs must not open a default session
        let had_tabs = !self.state().tabs.is_empty();

        self.store.dispatch(TabListAction::RemoveAllTabs)?;
        self.store.dispatch(CustomTabListAction::RemoveAllCustomTabs)?;
        self.notify(|observer| observer.on_all_sessions_removed());

        if had_tabs {
            self.add_default_session()?;
        }
        Ok(())
    }

    pub fn select(&mut self, id: &str) -> Result<(), SessionError> {
        let Some(session) = self
            .state()
            .find_tab(id)
            .map(|tab| Session::from_tab(tab, false))
        else {
            return Err(SessionError::UnknownSession(id.to_string()));
        };

        self.store.dispatch(TabListAction::select_tab(id))?;
        self.notify(|observer| observer.on_session_selected(&session));
        Ok(())
    }

    pub fn selected_session(&self) -> Option<Session> {
        self.state()
            .selected_tab()
            .map(|tab| Session::from_tab(tab, false))
    }

    /// Normal and private sessions, without custom tabs
    pub fn sessions(&self) -> Vec<Session> {
        self.state()
            .tabs
            .iter()
            .map(|tab| Session::from_tab(tab, false))
            .collect()
    }

    /// All sessions including custom tabs
    pub fn all(&self) -> Vec<Session> {
        let state = self.state();
        let tabs = state.tabs.iter().map(|tab| Session::from_tab(tab, false));
        let custom_tabs = state
            .custom_tabs
            .iter()
            .map(|tab| Session::from_tab(tab, true));
        tabs.chain(custom_tabs).collect()
    }

    pub fn find_session_by_id(&self, id: &str) -> Option<Session> {
        let state = self.state();
        state
            .find_tab(id)
            .map(|tab| Session::from_tab(tab, false))
            .or_else(|| state.find_custom_tab(id).map(|tab| Session::from_tab(tab, true)))
    }

    pub fn size(&self) -> usize {
        let state = self.state();
        state.tabs.len() + state.custom_tabs.len()
    }

    pub fn get_engine_session(&self, id: &str) -> Option<EngineSessionHandle> {
        self.state()
            .find_tab_or_custom_tab(id)
            .and_then(|tab| tab.engine_state.engine_session.clone())
    }

    /// Engine session of a session, created and linked if needed
    pub fn get_or_create_engine_session(
        &mut self,
        id: &str,
    ) -> Result<EngineSessionHandle, SessionError> {
        if let Some(engine_session) = self.get_engine_session(id) {
            return Ok(engine_session);
        }

        self.store.dispatch(EngineAction::CreateEngineSession {
            tab_id: id.to_string(),
            skip_loading: false,
        })?;

        self.get_engine_session(id)
            .ok_or_else(|| SessionError::UnknownSession(id.to_string()))
    }

    /// Snapshot of all normal sessions, `None` if there are none
    ///
    /// Private sessions and custom tabs are never part of a snapshot.
    pub fn create_snapshot(&self) -> Option<Snapshot> {
        let state = self.state();
        let items: Vec<SnapshotItem> = state
            .normal_tabs()
            .map(|tab| SnapshotItem {
                session: Session::from_tab(tab, false),
                engine_session: tab.engine_state.engine_session.clone(),
                engine_session_state: tab.engine_state.engine_session_state.clone(),
                reader_state: Some(tab.reader_state.clone()),
            })
            .collect();

        if items.is_empty() {
            return None;
        }

        let selected_session_index = state
            .selected_tab_id
            .as_deref()
            .and_then(|selected| items.iter().position(|item| item.session.id == selected))
            .unwrap_or(0);

        Some(Snapshot::new(items, selected_session_index))
    }

    /// Put the sessions of a snapshot in front of the existing ones
    ///
    /// Items with a live engine session get it linked without loading.
    /// With `update_selection` the selected item of the snapshot gets
    /// selected, otherwise only if nothing is selected yet.
    pub fn restore(&mut self, snapshot: Snapshot, update_selection: bool) -> Result<(), SessionError> {
        let Some(selected_id) = snapshot.selected_item().map(|item| item.session.id.clone()) else {
            return Err(SessionError::EmptySnapshot);
        };

        let previous = self.selected_tab_id();
        let tabs: Vec<TabSessionState> = snapshot
            .items
            .iter()
            .map(|item| {
                let mut tab = item.session.to_tab();
                tab.engine_state.engine_session_state = item.engine_session_state.clone();
                if let Some(reader_state) = &item.reader_state {
                    tab.reader_state = reader_state.clone();
                }
                tab
            })
            .collect();

        log::info!("SessionManager: restoring {} sessions", tabs.len());
        self.store.dispatch(TabListAction::Restore {
            tabs,
            selected_tab_id: Some(selected_id.clone()),
        })?;

        for item in snapshot.items {
            if let Some(engine_session) = item.engine_session {
                self.link(&item.session.id, engine_session, true)?;
            }
        }

        if update_selection {
            self.store.dispatch(TabListAction::select_tab(selected_id))?;
        }

        self.notify(|observer| observer.on_sessions_restored());
        self.notify_selection_change(previous);
        Ok(())
    }

    /// Release engine sessions of all tabs but the selected one
    pub fn on_low_memory(&mut self, level: MemoryLevel) -> Result<(), SessionError> {
        let state = self.state();
        let states: HashMap<String, EngineSessionState> = state
            .tabs
            .iter()
            .filter(|tab| state.selected_tab_id.as_deref() != Some(tab.id.as_str()))
            .filter_map(|tab| {
                tab.engine_state
                    .engine_session
                    .as_ref()
                    .map(|engine_session| (tab.id.clone(), engine_session.save_state()))
            })
            .collect();

        self.store.dispatch(SystemAction::LowMemory { level, states })?;
        Ok(())
    }

    /// Link a session handed in from outside, with an observer of our own
    fn link(
        &mut self,
        tab_id: &str,
        engine_session: EngineSessionHandle,
        skip_loading: bool,
    ) -> Result<(), SessionError> {
        let observer = EngineObserverHandle::new(Arc::new(EngineObserver::new(
            tab_id,
            self.store.dispatcher(),
        )));
        engine_session.register(observer.clone());

        self.store.dispatch(EngineAction::LinkEngineSession {
            tab_id: tab_id.to_string(),
            engine_session,
            engine_observer: Some(observer),
            skip_loading,
        })?;
        Ok(())
    }

    fn add_default_session(&mut self) -> Result<(), SessionError> {
        let Some(default_session) = &self.default_session else {
            return Ok(());
        };
        let session = default_session();
        log::debug!("SessionManager: adding default session {}", session.url);
        self.add(session, true, None, None, None)
    }

    fn selected_tab_id(&self) -> Option<String> {
        self.state().selected_tab_id.clone()
    }

    fn notify_selection_change(&mut self, previous: Option<String>) {
        let state = self.state();
        if state.selected_tab_id == previous {
            return;
        }
        if let Some(session) = state.selected_tab().map(|tab| Session::from_tab(tab, false)) {
            self.notify(|observer| observer.on_session_selected(&session));
        }
    }

    fn notify(&mut self, f: impl Fn(&dyn SessionManagerObserver)) {
        self.observers.retain(|observer| observer.strong_count() > 0);
        for observer in self.observers.iter().filter_map(Weak::upgrade) {
            f(observer.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use browser_engine::{EngineCall, HeadlessEngine};
    use browser_state::SessionSource;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Records events into a list shared with the test
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl Recorder {
        fn push(&self, event: String) {
            self.0.lock().unwrap().push(event);
        }
    }

    fn recorder() -> (Arc<dyn SessionManagerObserver>, Arc<Mutex<Vec<String>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (Arc::new(Recorder(events.clone())), events)
    }

    impl SessionManagerObserver for Recorder {
        fn on_session_added(&self, session: &Session) {
            self.push(format!("added {}", session.id));
        }

        fn on_session_removed(&self, session: &Session) {
            self.push(format!("removed {}", session.id));
        }

        fn on_session_selected(&self, session: &Session) {
            self.push(format!("selected {}", session.id));
        }

        fn on_sessions_restored(&self) {
            self.push("restored".to_string());
        }

        fn on_all_sessions_removed(&self) {
            self.push("all removed".to_string());
        }
    }

    fn manager() -> (SessionManager, Arc<HeadlessEngine>) {
        let engine = Arc::new(HeadlessEngine::new());
        let manager = SessionManager::new(engine.clone(), EngineScope::current().unwrap());
        (manager, engine)
    }

    fn session(id: &str) -> Session {
        Session::new(format!("https://{}.com", id)).with_id(id)
    }

    fn ids(sessions: &[Session]) -> Vec<&str> {
        sessions.iter().map(|s| s.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_add_with_parent_inserts_after_parent() {
        let (mut manager, _) = manager();
        let a = session("a");
        manager.add(a.clone(), false, None, None, None).unwrap();
        manager.add(session("b"), false, None, None, None).unwrap();
        manager.add(session("c"), true, None, None, Some(&a)).unwrap();

        assert_eq!(ids(&manager.sessions()), vec!["a", "c", "b"]);
        assert_eq!(manager.selected_session().unwrap().id, "c");
        assert_eq!(manager.find_session_by_id("c").unwrap().parent_id.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_observers_are_notified() {
        let (mut manager, _) = manager();
        let (observer, events) = recorder();
        manager.register(&observer);

        manager.add(session("a"), false, None, None, None).unwrap();
        manager.add(session("b"), true, None, None, None).unwrap();
        manager.remove("b", true).unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["added a", "selected a", "added b", "selected b", "removed b", "selected a"]
        );

        drop(observer);
        manager.add(session("c"), true, None, None, None).unwrap();
        assert_eq!(events.lock().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_removing_last_session_adds_default() {
        let (manager, _) = manager();
        let mut manager = manager.with_default_session(|| session("home"));
        manager.add(session("a"), true, None, None, None).unwrap();

        manager.remove("a", true).unwrap();

        assert_eq!(ids(&manager.sessions()), vec!["home"]);
        assert_eq!(manager.selected_session().unwrap().id, "home");
    }

    #[tokio::test]
    async fn test_remove_all_with_only_custom_tabs_adds_no_default() {
        let (manager, _) = manager();
        let mut manager = manager.with_default_session(|| session("home"));
        manager.add(session("custom").custom_tab(), false, None, None, None).unwrap();
        assert_eq!(manager.size(), 1);
        assert!(manager.sessions().is_empty());

        manager.remove_all().unwrap();
        assert_eq!(manager.size(), 0);
    }

    #[tokio::test]
    async fn test_remove_sessions_keeps_custom_tabs() {
        let (mut manager, _) = manager();
        manager.add(session("a"), false, None, None, None).unwrap();
        manager.add(session("p").private(true), false, None, None, None).unwrap();
        manager.add(session("custom").custom_tab(), false, None, None, None).unwrap();

        manager.remove_sessions().unwrap();

        assert!(manager.sessions().is_empty());
        assert_eq!(ids(&manager.all()), vec!["custom"]);
        assert!(manager.all()[0].custom_tab);
    }

    #[tokio::test]
    async fn test_select_unknown_session_fails() {
        let (mut manager, _) = manager();
        manager.add(session("a"), false, None, None, None).unwrap();

        let result = manager.select("unknown");
        assert!(matches!(result, Err(SessionError::UnknownSession(id)) if id == "unknown"));
        assert_eq!(manager.selected_session().unwrap().id, "a");
    }

    #[tokio::test]
    async fn test_snapshot_skips_private_and_custom_sessions() {
        let (mut manager, _) = manager();
        manager.add(session("p").private(true), false, None, None, None).unwrap();
        manager.add(session("a"), false, None, None, None).unwrap();
        manager.add(session("b"), false, None, None, None).unwrap();
        manager.add(session("custom").custom_tab(), false, None, None, None).unwrap();
        manager.select("b").unwrap();

        let snapshot = manager.create_snapshot().unwrap();
        let snapshot_ids: Vec<_> = snapshot.items.iter().map(|i| i.session.id.as_str()).collect();
        assert_eq!(snapshot_ids, vec!["a", "b"]);
        assert_eq!(snapshot.selected_session_index, 1);

        // A selected private session maps to the first item
        manager.select("p").unwrap();
        assert_eq!(manager.create_snapshot().unwrap().selected_session_index, 0);
    }

    #[tokio::test]
    async fn test_snapshot_of_private_sessions_only_is_none() {
        let (mut manager, _) = manager();
        assert!(manager.create_snapshot().is_none());

        manager.add(session("p").private(true), true, None, None, None).unwrap();
        assert!(manager.create_snapshot().is_none());
    }

    #[tokio::test]
    async fn test_restore() {
        let (mut manager, _) = manager();
        let (observer, events) = recorder();
        manager.register(&observer);
        manager.add(session("existing"), true, None, None, None).unwrap();

        let snapshot = Snapshot::new(
            vec![
                SnapshotItem::new(session("a").with_source(SessionSource::Restored)),
                SnapshotItem::new(session("b")),
            ],
            42,
        );
        manager.restore(snapshot, true).unwrap();

        assert_eq!(ids(&manager.sessions()), vec!["a", "b", "existing"]);
        // Out of range index falls back to the first item
        assert_eq!(manager.selected_session().unwrap().id, "a");
        assert!(events
            .lock()
            .unwrap()
            .ends_with(&["restored".to_string(), "selected a".to_string()]));
    }

    #[tokio::test]
    async fn test_restore_without_update_keeps_selection() {
        let (mut manager, _) = manager();
        manager.add(session("existing"), true, None, None, None).unwrap();

        manager
            .restore(Snapshot::new(vec![SnapshotItem::new(session("a"))], 0), false)
            .unwrap();

        assert_eq!(manager.selected_session().unwrap().id, "existing");
    }

    #[tokio::test]
    async fn test_restore_empty_snapshot_fails() {
        let (mut manager, _) = manager();
        let result = manager.restore(Snapshot::default(), true);
        assert!(matches!(result, Err(SessionError::EmptySnapshot)));
    }

    #[tokio::test]
    async fn test_restore_links_live_sessions_without_loading() {
        let (mut manager, engine) = manager();
        let engine_session = engine.create_session(false, None);
        let mut item = SnapshotItem::new(session("a"));
        item.engine_session = Some(engine_session.clone());

        manager.restore(Snapshot::new(vec![item], 0), true).unwrap();
        manager.settle().await;

        assert_eq!(manager.get_engine_session("a"), Some(engine_session.clone()));
        let headless = engine.session_for(&engine_session).unwrap();
        assert_eq!(headless.count_calls(|call| matches!(call, EngineCall::LoadUrl { .. })), 0);
        assert_eq!(headless.observer_count(), 1);
    }

    #[tokio::test]
    async fn test_get_or_create_engine_session() {
        let (mut manager, engine) = manager();
        manager.add(session("a"), true, None, None, None).unwrap();

        let engine_session = manager.get_or_create_engine_session("a").unwrap();
        assert_eq!(manager.get_or_create_engine_session("a").unwrap(), engine_session);
        manager.settle().await;

        let headless = engine.session_for(&engine_session).unwrap();
        assert_eq!(headless.current_url().as_deref(), Some("https://a.com"));
        assert!(matches!(
            manager.get_or_create_engine_session("unknown"),
            Err(SessionError::UnknownSession(_))
        ));
    }

    #[tokio::test]
    async fn test_add_with_engine_session_links_and_loads() {
        let (mut manager, engine) = manager();
        let engine_session = engine.create_session(false, None);

        manager
            .add(session("a"), true, Some(engine_session.clone()), None, None)
            .unwrap();
        manager.settle().await;

        let headless = engine.session_for(&engine_session).unwrap();
        assert_eq!(headless.history(), vec!["https://a.com".to_string()]);
    }

    #[tokio::test]
    async fn test_on_low_memory_releases_background_sessions() {
        let (mut manager, _) = manager();
        manager.add(session("a"), true, None, None, None).unwrap();
        manager.add(session("b"), false, None, None, None).unwrap();
        let a = manager.get_or_create_engine_session("a").unwrap();
        manager.get_or_create_engine_session("b").unwrap();
        manager.settle().await;

        manager.on_low_memory(MemoryLevel::RunningLow).unwrap();
        manager.settle().await;

        assert_eq!(manager.get_engine_session("a"), Some(a));
        assert_eq!(manager.get_engine_session("b"), None);
        assert!(manager.state().tabs[1].engine_state.is_suspended());
    }
}
