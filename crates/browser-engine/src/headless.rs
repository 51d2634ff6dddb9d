//! Headless in-memory engine
//!
//! Nothing gets rendered or fetched. Each session keeps a navigation history,
//! reports navigation to its observers the way a real engine would, and
//! records every call made against it.

use crate::engine::{Engine, EngineSession};
use crate::error::EngineError;
use crate::handle::{EngineObserverHandle, EngineSessionHandle};
use crate::types::{BrowsingData, EngineSessionState, LoadUrlFlags, SecurityInfo};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// A call made against a [`HeadlessEngineSession`]
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    LoadUrl {
        url: String,
        parent: Option<EngineSessionHandle>,
        flags: LoadUrlFlags,
    },
    LoadData {
        data: String,
        mime_type: String,
    },
    Reload(LoadUrlFlags),
    StopLoading,
    GoBack,
    GoForward,
    GoToHistoryIndex(usize),
    ToggleDesktopMode {
        enable: bool,
        reload: bool,
    },
    ExitFullscreenMode,
    ClearData(BrowsingData),
    RestoreState,
    Close,
    RecoverFromCrash,
    MarkActiveForWebExtensions(bool),
}

/// Engine creating [`HeadlessEngineSession`]s
#[derive(Default)]
pub struct HeadlessEngine {
    sessions: Mutex<Vec<Arc<HeadlessEngineSession>>>,
    next_id: AtomicU64,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sessions created so far, in creation order
    pub fn sessions(&self) -> Vec<Arc<HeadlessEngineSession>> {
        lock(&self.sessions).clone()
    }

    /// Look up the headless session behind a handle
    pub fn session_for(&self, handle: &EngineSessionHandle) -> Option<Arc<HeadlessEngineSession>> {
        lock(&self.sessions)
            .iter()
            .find(|session| session.handle() == *handle)
            .cloned()
    }
}

impl Engine for HeadlessEngine {
    fn name(&self) -> &str {
        "headless"
    }

    fn create_session(&self, private: bool, context_id: Option<&str>) -> EngineSessionHandle {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let session = Arc::new(HeadlessEngineSession::new(id, private, context_id));
        log::debug!("HeadlessEngine: created session {} (private: {})", id, private);

        lock(&self.sessions).push(Arc::clone(&session));
        session.handle()
    }

    fn create_session_state(&self, json: &serde_json::Value) -> EngineSessionState {
        EngineSessionState::new(json.clone())
    }
}

#[derive(Debug, Default)]
struct Inner {
    history: Vec<String>,
    index: Option<usize>,
    desktop_mode: bool,
    fullscreen: bool,
    closed: bool,
    crashed: bool,
    active_for_web_extensions: bool,
    calls: Vec<EngineCall>,
    observers: Vec<EngineObserverHandle>,
}

impl Inner {
    fn current_url(&self) -> Option<&str> {
        self.index
            .and_then(|index| self.history.get(index))
            .map(String::as_str)
    }
}

/// Session of the [`HeadlessEngine`]
pub struct HeadlessEngineSession {
    id: u64,
    private: bool,
    context_id: Option<String>,
    inner: Mutex<Inner>,
}

impl HeadlessEngineSession {
    fn new(id: u64, private: bool, context_id: Option<&str>) -> Self {
        Self {
            id,
            private,
            context_id: context_id.map(str::to_string),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Handle comparing equal to every other handle of this session
    pub fn handle(self: &Arc<Self>) -> EngineSessionHandle {
        EngineSessionHandle::new(Arc::clone(self) as Arc<dyn EngineSession>)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    pub fn context_id(&self) -> Option<&str> {
        self.context_id.as_deref()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.inner().calls.clone()
    }

    /// Number of recorded calls matching the predicate
    pub fn count_calls(&self, predicate: impl Fn(&EngineCall) -> bool) -> usize {
        self.inner().calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn current_url(&self) -> Option<String> {
        self.inner().current_url().map(str::to_string)
    }

    pub fn history(&self) -> Vec<String> {
        self.inner().history.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.inner().closed
    }

    pub fn is_crashed(&self) -> bool {
        self.inner().crashed
    }

    pub fn desktop_mode(&self) -> bool {
        self.inner().desktop_mode
    }

    pub fn is_active_for_web_extensions(&self) -> bool {
        self.inner().active_for_web_extensions
    }

    pub fn observer_count(&self) -> usize {
        self.inner().observers.len()
    }

    /// Let the session crash, observers get notified
    pub fn simulate_crash(&self) {
        let observers = {
            let mut inner = self.inner();
            inner.crashed = true;
            inner.observers.clone()
        };
        log::warn!("HeadlessEngineSession {}: crashed", self.id);
        for observer in observers {
            observer.on_crash();
        }
    }

    /// Report the page going into fullscreen, observers get notified
    pub fn simulate_fullscreen(&self) {
        let observers = {
            let mut inner = self.inner();
            inner.fullscreen = true;
            inner.observers.clone()
        };
        for observer in observers {
            observer.on_fullscreen_change(true);
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        lock(&self.inner)
    }

    /// Record a call and fail if the session can't accept calls anymore
    fn record(&self, call: EngineCall) -> Result<MutexGuard<'_, Inner>, EngineError> {
        let mut inner = self.inner();
        inner.calls.push(call);
        if inner.closed {
            return Err(EngineError::SessionClosed(self.id));
        }
        if inner.crashed {
            return Err(EngineError::SessionCrashed(self.id));
        }
        Ok(inner)
    }

    /// Tell observers about a finished navigation to `url`
    fn notify_navigation(&self, observers: Vec<EngineObserverHandle>, url: &str) {
        let security = security_info(url);
        for observer in observers {
            observer.on_loading_state_change(true);
            observer.on_location_change(url);
            observer.on_progress(100);
            observer.on_title_change(url);
            observer.on_security_change(&security);
            observer.on_loading_state_change(false);
        }
    }

    fn navigate_to_index(&self, mut inner: MutexGuard<'_, Inner>, index: usize) {
        inner.index = Some(index);
        let url = inner.history[index].clone();
        let observers = inner.observers.clone();
        drop(inner);
        self.notify_navigation(observers, &url);
    }
}

#[async_trait]
impl EngineSession for HeadlessEngineSession {
    async fn load_url(
        &self,
        url: &str,
        parent: Option<EngineSessionHandle>,
        flags: LoadUrlFlags,
        _additional_headers: &HashMap<String, String>,
    ) -> Result<(), EngineError> {
        let mut inner = self.record(EngineCall::LoadUrl {
            url: url.to_string(),
            parent,
            flags,
        })?;
        if url.trim().is_empty() {
            return Err(EngineError::InvalidUrl(url.to_string()));
        }

        log::debug!("HeadlessEngineSession {}: loading {}", self.id, url);
        let keep = inner.index.map(|index| index + 1).unwrap_or(0);
        inner.history.truncate(keep);
        inner.history.push(url.to_string());
        let index = inner.history.len() - 1;
        self.navigate_to_index(inner, index);
        Ok(())
    }

    async fn load_data(
        &self,
        data: &str,
        mime_type: &str,
        _encoding: &str,
    ) -> Result<(), EngineError> {
        let inner = self.record(EngineCall::LoadData {
            data: data.to_string(),
            mime_type: mime_type.to_string(),
        })?;
        let observers = inner.observers.clone();
        drop(inner);

        self.notify_navigation(observers, &format!("data:{}", mime_type));
        Ok(())
    }

    async fn reload(&self, flags: LoadUrlFlags) -> Result<(), EngineError> {
        let inner = self.record(EngineCall::Reload(flags))?;
        let current = inner.index;
        if let Some(index) = current {
            self.navigate_to_index(inner, index);
        }
        Ok(())
    }

    async fn stop_loading(&self) -> Result<(), EngineError> {
        let inner = self.record(EngineCall::StopLoading)?;
        let observers = inner.observers.clone();
        drop(inner);

        for observer in observers {
            observer.on_loading_state_change(false);
        }
        Ok(())
    }

    async fn go_back(&self) -> Result<(), EngineError> {
        let inner = self.record(EngineCall::GoBack)?;
        let current = inner.index;
        match current {
            Some(index) if index > 0 => self.navigate_to_index(inner, index - 1),
            _ => log::debug!("HeadlessEngineSession {}: can't go back", self.id),
        }
        Ok(())
    }

    async fn go_forward(&self) -> Result<(), EngineError> {
        let inner = self.record(EngineCall::GoForward)?;
        let (current, len) = (inner.index, inner.history.len());
        match current {
            Some(index) if index + 1 < len => {
                self.navigate_to_index(inner, index + 1)
            }
            _ => log::debug!("HeadlessEngineSession {}: can't go forward", self.id),
        }
        Ok(())
    }

    async fn go_to_history_index(&self, index: usize) -> Result<(), EngineError> {
        let inner = self.record(EngineCall::GoToHistoryIndex(index))?;
        let len = inner.history.len();
        if index >= len {
            return Err(EngineError::InvalidHistoryIndex { index, len });
        }
        self.navigate_to_index(inner, index);
        Ok(())
    }

    async fn toggle_desktop_mode(&self, enable: bool, reload: bool) -> Result<(), EngineError> {
        let mut inner = self.record(EngineCall::ToggleDesktopMode { enable, reload })?;
        inner.desktop_mode = enable;
        let observers = inner.observers.clone();
        let current = inner.index;
        drop(inner);

        for observer in &observers {
            observer.on_desktop_mode_change(enable);
        }
        if reload {
            if let Some(index) = current {
                self.navigate_to_index(self.inner(), index);
            }
        }
        Ok(())
    }

    async fn exit_fullscreen_mode(&self) -> Result<(), EngineError> {
        let mut inner = self.record(EngineCall::ExitFullscreenMode)?;
        let was_fullscreen = std::mem::replace(&mut inner.fullscreen, false);
        let observers = inner.observers.clone();
        drop(inner);

        if was_fullscreen {
            for observer in observers {
                observer.on_fullscreen_change(false);
            }
        }
        Ok(())
    }

    async fn clear_data(&self, data: BrowsingData) -> Result<(), EngineError> {
        self.record(EngineCall::ClearData(data))?;
        Ok(())
    }

    fn save_state(&self) -> EngineSessionState {
        let inner = self.inner();
        EngineSessionState::new(json!({
            "history": inner.history,
            "index": inner.index,
            "desktopMode": inner.desktop_mode,
        }))
    }

    fn restore_state(&self, state: &EngineSessionState) -> bool {
        let json = state.to_json();
        let Some(history) = json.get("history").and_then(|h| h.as_array()) else {
            return false;
        };

        let history: Vec<String> = history
            .iter()
            .filter_map(|entry| entry.as_str().map(str::to_string))
            .collect();
        let index = json
            .get("index")
            .and_then(|i| i.as_u64())
            .map(|i| i as usize)
            .filter(|i| *i < history.len());

        let mut inner = self.inner();
        inner.calls.push(EngineCall::RestoreState);
        inner.desktop_mode = json
            .get("desktopMode")
            .and_then(|d| d.as_bool())
            .unwrap_or(false);
        inner.history = history;
        inner.index = index;
        true
    }

    async fn close(&self) {
        let mut inner = self.inner();
        inner.calls.push(EngineCall::Close);
        inner.closed = true;
        inner.observers.clear();
        log::debug!("HeadlessEngineSession {}: closed", self.id);
    }

    async fn recover_from_crash(&self) -> bool {
        let mut inner = self.inner();
        inner.calls.push(EngineCall::RecoverFromCrash);
        if inner.closed || !inner.crashed {
            return false;
        }
        inner.crashed = false;
        log::info!("HeadlessEngineSession {}: recovered from crash", self.id);
        true
    }

    fn mark_active_for_web_extensions(&self, active: bool) {
        let mut inner = self.inner();
        inner.calls.push(EngineCall::MarkActiveForWebExtensions(active));
        inner.active_for_web_extensions = active;
    }

    fn register(&self, observer: EngineObserverHandle) {
        let mut inner = self.inner();
        if !inner.observers.contains(&observer) {
            inner.observers.push(observer);
        }
    }

    fn unregister(&self, observer: &EngineObserverHandle) {
        self.inner().observers.retain(|o| o != observer);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking observer must not take the whole engine down with it
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn security_info(url: &str) -> SecurityInfo {
    let (scheme, rest) = url.split_once("://").unwrap_or(("", url));
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let secure = scheme == "https";
    SecurityInfo::new(secure, host, if secure { "Headless CA" } else { "" })
}
