//! Web Extensions Middleware
//!
//! Keeps exactly the engine session of the selected tab marked as active for
//! web extensions.

use browser_state::{Action, EngineAction, Middleware, MiddlewareContext};

#[derive(Default)]
pub struct WebExtensionsMiddleware {
    /// Tab whose engine session is currently marked active
    active_tab_id: Option<String>,
}

impl WebExtensionsMiddleware {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Middleware for WebExtensionsMiddleware {
    fn handle(&mut self, _action: &Action, _ctx: &mut MiddlewareContext<'_>) -> bool {
        true
    }

    fn after(&mut self, action: &Action, ctx: &mut MiddlewareContext<'_>) {
        let relinked = match action {
            Action::TabList(_) => None,
            Action::Engine(EngineAction::LinkEngineSession {
                tab_id,
                engine_session,
                ..
            }) => Some((tab_id, engine_session)),
            _ => return,
        };

        let state = ctx.state();
        let selected = state.selected_tab_id.clone();

        if selected == self.active_tab_id {
            // A new session for the active tab takes over
            if let Some((tab_id, engine_session)) = relinked {
                if self.active_tab_id.as_ref() == Some(tab_id) {
                    engine_session.mark_active_for_web_extensions(true);
                }
            }
            return;
        }

        if let Some(previous) = self.active_tab_id.take() {
            if let Some(engine_session) = state
                .find_tab(&previous)
                .and_then(|tab| tab.engine_state.engine_session.as_ref())
            {
                engine_session.mark_active_for_web_extensions(false);
            }
        }

        let selected_session = selected.as_deref().and_then(|tab_id| {
            state
                .find_tab(tab_id)
                .and_then(|tab| tab.engine_state.engine_session.as_ref())
        });
        if let Some(engine_session) = selected_session {
            log::debug!("WebExtensionsMiddleware: tab {:?} is now active", selected);
            engine_session.mark_active_for_web_extensions(true);
            self.active_tab_id = selected;
        }
    }
}
