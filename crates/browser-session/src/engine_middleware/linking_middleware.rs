//! Linking Middleware
//!
//! Loads the tab url into a freshly linked engine session, unless the link
//! asked to skip loading (the session was restored or a load is already on
//! its way).
//!
//! A live engine session belongs to at most one tab. Before a link reaches
//! the reducer, the session the tab held so far gets unlinked and closed, and
//! a tab still holding the incoming session gets unlinked. The link is then
//! dispatched again.

use super::close_engine_session;
use crate::scope::EngineScope;
use browser_engine::{EngineObserverHandle, EngineSessionHandle, LoadUrlFlags};
use browser_state::{Action, EngineAction, Middleware, MiddlewareContext};
use std::collections::HashMap;

const EXTENSION_URL_SCHEME: &str = "moz-extension://";

pub struct LinkingMiddleware {
    scope: EngineScope,
}

impl LinkingMiddleware {
    pub fn new(scope: EngineScope) -> Self {
        Self { scope }
    }
}

impl Middleware for LinkingMiddleware {
    fn handle(&mut self, action: &Action, ctx: &mut MiddlewareContext<'_>) -> bool {
        let Action::Engine(EngineAction::LinkEngineSession {
            tab_id,
            engine_session,
            ..
        }) = action
        else {
            return true;
        };

        let state = ctx.state();
        let replaced: Option<(EngineSessionHandle, Option<EngineObserverHandle>)> = state
            .find_tab_or_custom_tab(tab_id)
            .and_then(|tab| {
                tab.engine_state
                    .engine_session
                    .as_ref()
                    .filter(|current| *current != engine_session)
                    .map(|current| (current.clone(), tab.engine_state.engine_observer.clone()))
            });
        let holders: Vec<(String, Option<EngineObserverHandle>)> = state
            .tabs
            .iter()
            .chain(&state.custom_tabs)
            .filter(|tab| {
                tab.id != *tab_id && tab.engine_state.engine_session.as_ref() == Some(engine_session)
            })
            .map(|tab| (tab.id.clone(), tab.engine_state.engine_observer.clone()))
            .collect();

        if replaced.is_none() && holders.is_empty() {
            return true;
        }

        if let Some((previous, observer)) = replaced {
            log::debug!("LinkingMiddleware: closing replaced engine session of tab {}", tab_id);
            ctx.dispatch(EngineAction::unlink(tab_id.clone()));
            self.scope
                .launch_cleanup("close", close_engine_session(previous, observer));
        }

        for (holder, observer) in holders {
            log::debug!(
                "LinkingMiddleware: moving engine session from tab {} to tab {}",
                holder,
                tab_id
            );
            if let Some(observer) = &observer {
                engine_session.unregister(observer);
            }
            ctx.dispatch(EngineAction::unlink(holder));
        }

        ctx.dispatch(action.clone());
        false
    }

    fn after(&mut self, action: &Action, ctx: &mut MiddlewareContext<'_>) {
        let Action::Engine(EngineAction::LinkEngineSession {
            tab_id,
            engine_session,
            skip_loading: false,
            ..
        }) = action
        else {
            return;
        };

        let state = ctx.state();
        let Some(tab) = state.find_tab_or_custom_tab(tab_id) else {
            log::warn!("LinkingMiddleware: linked tab {} does not exist", tab_id);
            return;
        };

        let url = tab.content.url.clone();
        if url.is_empty() {
            log::debug!("LinkingMiddleware: tab {} has no url to load", tab_id);
            return;
        }

        // Extension pages must not get an opener
        let parent = if url.starts_with(EXTENSION_URL_SCHEME) {
            None
        } else {
            tab.parent_id
                .as_deref()
                .and_then(|parent_id| state.find_tab(parent_id))
                .and_then(|parent| parent.engine_state.engine_session.clone())
        };

        let engine_session = engine_session.clone();
        let tab_id = tab_id.clone();
        self.scope.launch("load_url", async move {
            if let Err(e) = engine_session
                .load_url(&url, parent, LoadUrlFlags::empty(), &HashMap::new())
                .await
            {
                log::error!("LinkingMiddleware: loading {} failed for tab {}: {}", url, tab_id, e);
            }
        });
    }
}
