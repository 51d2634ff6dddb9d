//! Middleware connecting the store to an [`Engine`]
//!
//! Reducers never touch engine sessions. Everything that creates, drives or
//! closes a session happens here, with the engine calls running as tasks on
//! an [`EngineScope`].

use crate::engine_observer::EngineObserver;
use crate::scope::EngineScope;
use browser_engine::{Engine, EngineObserverHandle, EngineSessionHandle};
use browser_state::{EngineAction, Middleware, MiddlewareContext};
use std::sync::Arc;

pub mod crash_middleware;
pub mod create_engine_session_middleware;
pub mod engine_delegate_middleware;
pub mod linking_middleware;
pub mod suspend_middleware;
pub mod tabs_removed_middleware;
pub mod trim_memory_middleware;
pub mod web_extensions_middleware;

pub use crash_middleware::CrashMiddleware;
pub use create_engine_session_middleware::CreateEngineSessionMiddleware;
pub use engine_delegate_middleware::EngineDelegateMiddleware;
pub use linking_middleware::LinkingMiddleware;
pub use suspend_middleware::SuspendMiddleware;
pub use tabs_removed_middleware::TabsRemovedMiddleware;
pub use trim_memory_middleware::TrimMemoryMiddleware;
pub use web_extensions_middleware::WebExtensionsMiddleware;

/// Tunables of the engine middleware chain
#[derive(Debug, Clone, Copy)]
pub struct EngineMiddlewareConfig {
    /// Suspend background tabs when memory gets critically low
    pub suspend_on_critical_memory: bool,
}

impl Default for EngineMiddlewareConfig {
    fn default() -> Self {
        Self {
            suspend_on_critical_memory: true,
        }
    }
}

/// The engine middleware chain with default settings
pub fn create(engine: Arc<dyn Engine>, scope: EngineScope) -> Vec<Box<dyn Middleware>> {
    create_with_config(engine, scope, EngineMiddlewareConfig::default())
}

pub fn create_with_config(
    engine: Arc<dyn Engine>,
    scope: EngineScope,
    config: EngineMiddlewareConfig,
) -> Vec<Box<dyn Middleware>> {
    log::debug!("Creating engine middleware for engine {}", engine.name());

    vec![
        Box::new(EngineDelegateMiddleware::new(engine.clone(), scope.clone())),
        Box::new(CreateEngineSessionMiddleware::new(engine.clone())),
        Box::new(LinkingMiddleware::new(scope.clone())),
        Box::new(TabsRemovedMiddleware::new(scope.clone())),
        Box::new(SuspendMiddleware::new(scope.clone())),
        Box::new(WebExtensionsMiddleware::new()),
        Box::new(TrimMemoryMiddleware::new(
            scope.clone(),
            config.suspend_on_critical_memory,
        )),
        Box::new(CrashMiddleware::new(engine, scope)),
    ]
}

/// Engine session of the tab, creating and linking one if there is none
///
/// A new session gets an [`EngineObserver`] and the snapshot stored for the
/// tab, if any. The link action is queued, so the state only shows the new
/// session once the current action is done.
///
/// Returns `None` if the tab does not exist.
pub(crate) fn get_or_create_engine_session(
    engine: &Arc<dyn Engine>,
    tab_id: &str,
    ctx: &mut MiddlewareContext<'_>,
    skip_loading: bool,
) -> Option<EngineSessionHandle> {
    let Some(tab) = ctx.state().find_tab_or_custom_tab(tab_id) else {
        log::warn!("Requested engine session for tab {}, but tab does not exist", tab_id);
        return None;
    };

    if let Some(engine_session) = &tab.engine_state.engine_session {
        return Some(engine_session.clone());
    }

    let private = tab.content.private;
    let context_id = tab.context_id.clone();
    let stored_state = tab.engine_state.engine_session_state.clone();

    let engine_session = engine.create_session(private, context_id.as_deref());
    let observer = EngineObserverHandle::new(Arc::new(EngineObserver::new(
        tab_id,
        ctx.dispatcher(),
    )));
    engine_session.register(observer.clone());

    let restored = stored_state
        .as_ref()
        .is_some_and(|state| engine_session.restore_state(state));
    log::debug!(
        "Created engine session for tab {} (restored: {})",
        tab_id,
        restored
    );

    ctx.dispatch(EngineAction::LinkEngineSession {
        tab_id: tab_id.to_string(),
        engine_session: engine_session.clone(),
        engine_observer: Some(observer),
        skip_loading: restored || skip_loading,
    });

    Some(engine_session)
}

/// Detach the observer and close the session
pub(crate) async fn close_engine_session(
    engine_session: EngineSessionHandle,
    observer: Option<EngineObserverHandle>,
) {
    if let Some(observer) = &observer {
        engine_session.unregister(observer);
    }
    engine_session.close().await;
}
