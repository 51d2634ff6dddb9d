//! Tabs Removed Middleware
//!
//! Closes the engine sessions of tabs about to be removed. The removal
//! itself passes through to the reducer.

use super::close_engine_session;
use crate::scope::EngineScope;
use browser_state::{
    Action, CustomTabListAction, EngineAction, Middleware, MiddlewareContext, TabListAction,
    TabSessionState,
};

pub struct TabsRemovedMiddleware {
    scope: EngineScope,
}

impl TabsRemovedMiddleware {
    pub fn new(scope: EngineScope) -> Self {
        Self { scope }
    }
}

impl Middleware for TabsRemovedMiddleware {
    fn handle(&mut self, action: &Action, ctx: &mut MiddlewareContext<'_>) -> bool {
        let state = ctx.state();
        let removed: Vec<&TabSessionState> = match action {
            Action::TabList(TabListAction::RemoveTab { tab_id, .. }) => {
                state.find_tab(tab_id).into_iter().collect()
            }
            Action::TabList(TabListAction::RemoveAllTabs) => state.tabs.iter().collect(),
            Action::TabList(TabListAction::RemoveAllNormalTabs) => state.normal_tabs().collect(),
            Action::TabList(TabListAction::RemoveAllPrivateTabs) => {
                state.private_tabs().collect()
            }
            Action::CustomTabList(CustomTabListAction::RemoveCustomTab { tab_id }) => {
                state.find_custom_tab(tab_id).into_iter().collect()
            }
            Action::CustomTabList(CustomTabListAction::RemoveAllCustomTabs) => {
                state.custom_tabs.iter().collect()
            }
            _ => return true,
        };

        let linked: Vec<_> = removed
            .into_iter()
            .filter_map(|tab| {
                tab.engine_state.engine_session.clone().map(|engine_session| {
                    (
                        tab.id.clone(),
                        engine_session,
                        tab.engine_state.engine_observer.clone(),
                    )
                })
            })
            .collect();

        for (tab_id, engine_session, observer) in linked {
            log::debug!("TabsRemovedMiddleware: closing engine session of tab {}", tab_id);
            ctx.dispatch(EngineAction::unlink(tab_id));
            self.scope
                .launch_cleanup("close", close_engine_session(engine_session, observer));
        }

        true
    }
}
