//! Engine capability traits
//!
//! `Engine` creates sessions, `EngineSession` is one live rendering surface,
//! `EngineSessionObserver` receives callbacks about what happens inside a
//! session.

use crate::error::EngineError;
use crate::handle::{EngineObserverHandle, EngineSessionHandle};
use crate::types::{BrowsingData, EngineSessionState, LoadUrlFlags, SecurityInfo};
use async_trait::async_trait;
use std::collections::HashMap;

/// Entry point of a web engine
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so they can be shared between the
/// store and the tasks running engine side effects.
pub trait Engine: Send + Sync {
    /// Name of the engine, used for logging only
    fn name(&self) -> &str;

    /// Create a new, empty engine session
    ///
    /// * `private` - whether the session is used for private browsing
    /// * `context_id` - optional container the session belongs to
    fn create_session(&self, private: bool, context_id: Option<&str>) -> EngineSessionHandle;

    /// Turn a previously persisted JSON value back into an [`EngineSessionState`]
    fn create_session_state(&self, json: &serde_json::Value) -> EngineSessionState;
}

/// A live session of the engine, usually backing exactly one tab
///
/// Navigation methods are asynchronous: the engine may take its time and the
/// caller is free to fire and forget them. `save_state` and `restore_state`
/// are synchronous because callers need their result to decide what to do
/// next.
#[async_trait]
pub trait EngineSession: Send + Sync {
    /// Load the given url
    ///
    /// `parent` is the session that opened this one, if any.
    async fn load_url(
        &self,
        url: &str,
        parent: Option<EngineSessionHandle>,
        flags: LoadUrlFlags,
        additional_headers: &HashMap<String, String>,
    ) -> Result<(), EngineError>;

    /// Load raw data (e.g. an html string)
    async fn load_data(&self, data: &str, mime_type: &str, encoding: &str)
        -> Result<(), EngineError>;

    async fn reload(&self, flags: LoadUrlFlags) -> Result<(), EngineError>;

    async fn stop_loading(&self) -> Result<(), EngineError>;

    async fn go_back(&self) -> Result<(), EngineError>;

    async fn go_forward(&self) -> Result<(), EngineError>;

    async fn go_to_history_index(&self, index: usize) -> Result<(), EngineError>;

    async fn toggle_desktop_mode(&self, enable: bool, reload: bool) -> Result<(), EngineError>;

    async fn exit_fullscreen_mode(&self) -> Result<(), EngineError>;

    async fn clear_data(&self, data: BrowsingData) -> Result<(), EngineError>;

    /// Capture the current state so the session can be recreated later
    fn save_state(&self) -> EngineSessionState;

    /// Restore a previously saved state, returns `false` if nothing was restored
    fn restore_state(&self, state: &EngineSessionState) -> bool;

    /// Close the session and release all its resources
    ///
    /// Pending operations on the session get interrupted. The session must
    /// not be used after it was closed.
    async fn close(&self);

    /// Try to recover a crashed session, returns `true` on success
    async fn recover_from_crash(&self) -> bool;

    /// Mark the session as the one web extensions consider active
    fn mark_active_for_web_extensions(&self, active: bool);

    fn register(&self, observer: EngineObserverHandle);

    fn unregister(&self, observer: &EngineObserverHandle);
}

/// Callbacks from an engine session
///
/// All methods have empty default implementations so observers only need
/// to implement what they care about.
pub trait EngineSessionObserver: Send + Sync {
    fn on_location_change(&self, _url: &str) {}

    fn on_title_change(&self, _title: &str) {}

    fn on_progress(&self, _progress: u8) {}

    fn on_loading_state_change(&self, _loading: bool) {}

    fn on_security_change(&self, _info: &SecurityInfo) {}

    fn on_desktop_mode_change(&self, _enabled: bool) {}

    fn on_fullscreen_change(&self, _enabled: bool) {}

    fn on_crash(&self) {}
}
