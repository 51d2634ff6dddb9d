//! Engine Delegate Middleware
//!
//! Turns engine actions (load, reload, navigate, ...) into calls on the
//! tab's engine session. The session is created on demand. The actions are
//! consumed, the reducer has nothing to do for them.

use super::get_or_create_engine_session;
use crate::scope::EngineScope;
use browser_engine::{Engine, EngineError, EngineSessionHandle};
use browser_state::{Action, EngineAction, Middleware, MiddlewareContext};
use std::future::Future;
use std::sync::Arc;

pub struct EngineDelegateMiddleware {
    engine: Arc<dyn Engine>,
    scope: EngineScope,
}

impl EngineDelegateMiddleware {
    pub fn new(engine: Arc<dyn Engine>, scope: EngineScope) -> Self {
        Self { engine, scope }
    }

    /// Run an engine call on the scope, logging a failure
    fn launch<F, Fut>(&self, label: &'static str, tab_id: &str, session: EngineSessionHandle, call: F)
    where
        F: FnOnce(EngineSessionHandle) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), EngineError>> + Send + 'static,
    {
        let tab_id = tab_id.to_string();
        self.scope.launch(label, async move {
            if let Err(e) = call(session).await {
                log::error!("EngineDelegate: {} failed for tab {}: {}", label, tab_id, e);
            }
        });
    }

    fn session(
        &self,
        tab_id: &str,
        ctx: &mut MiddlewareContext<'_>,
        skip_loading: bool,
    ) -> Option<EngineSessionHandle> {
        get_or_create_engine_session(&self.engine, tab_id, ctx, skip_loading)
    }
}

impl Middleware for EngineDelegateMiddleware {
    fn handle(&mut self, action: &Action, ctx: &mut MiddlewareContext<'_>) -> bool {
        let Action::Engine(action) = action else {
            return true;
        };

        match action {
            EngineAction::LoadUrl {
                tab_id,
                url,
                flags,
                additional_headers,
            } => {
                // The url gets loaded right here, linking must not load it again
                let Some(session) = self.session(tab_id, ctx, true) else {
                    return false;
                };
                let state = ctx.state();
                let parent = state
                    .find_tab(tab_id)
                    .and_then(|tab| tab.parent_id.as_deref())
                    .and_then(|parent_id| state.find_tab(parent_id))
                    .and_then(|parent| parent.engine_state.engine_session.clone());

                let url = url.clone();
                let flags = *flags;
                let headers = additional_headers.clone();
                self.launch("load_url", tab_id, session, move |session| async move {
                    session.load_url(&url, parent, flags, &headers).await
                });
            }

            EngineAction::LoadData {
                tab_id,
                data,
                mime_type,
                encoding,
            } => {
                let Some(session) = self.session(tab_id, ctx, true) else {
                    return false;
                };
                let data = data.clone();
                let mime_type = mime_type.clone();
                let encoding = encoding.clone();
                self.launch("load_data", tab_id, session, move |session| async move {
                    session.load_data(&data, &mime_type, &encoding).await
                });
            }

            EngineAction::Reload { tab_id, flags } => {
                let Some(session) = self.session(tab_id, ctx, false) else {
                    return false;
                };
                let flags = *flags;
                self.launch("reload", tab_id, session, move |session| async move {
                    session.reload(flags).await
                });
            }

            EngineAction::StopLoading { tab_id } => {
                let Some(session) = self.session(tab_id, ctx, false) else {
                    return false;
                };
                self.launch("stop_loading", tab_id, session, |session| async move {
                    session.stop_loading().await
                });
            }

            EngineAction::GoBack { tab_id } => {
                let Some(session) = self.session(tab_id, ctx, false) else {
                    return false;
                };
                self.launch("go_back", tab_id, session, |session| async move {
                    session.go_back().await
                });
            }

            EngineAction::GoForward { tab_id } => {
                let Some(session) = self.session(tab_id, ctx, false) else {
                    return false;
                };
                self.launch("go_forward", tab_id, session, |session| async move {
                    session.go_forward().await
                });
            }

            EngineAction::GoToHistoryIndex { tab_id, index } => {
                let Some(session) = self.session(tab_id, ctx, false) else {
                    return false;
                };
                let index = *index;
                self.launch("go_to_history_index", tab_id, session, move |session| async move {
                    session.go_to_history_index(index).await
                });
            }

            EngineAction::ToggleDesktopMode { tab_id, enable } => {
                let Some(session) = self.session(tab_id, ctx, false) else {
                    return false;
                };
                let enable = *enable;
                self.launch("toggle_desktop_mode", tab_id, session, move |session| async move {
                    session.toggle_desktop_mode(enable, true).await
                });
            }

            EngineAction::ExitFullscreenMode { tab_id } => {
                let Some(session) = self.session(tab_id, ctx, false) else {
                    return false;
                };
                self.launch("exit_fullscreen_mode", tab_id, session, |session| async move {
                    session.exit_fullscreen_mode().await
                });
            }

            EngineAction::ClearData { tab_id, data } => {
                let Some(session) = self.session(tab_id, ctx, false) else {
                    return false;
                };
                let data = *data;
                self.launch("clear_data", tab_id, session, move |session| async move {
                    session.clear_data(data).await
                });
            }

            _ => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{tab, Harness};
    use browser_engine::{EngineCall, LoadUrlFlags};
    use browser_state::{EngineAction, TabListAction};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_load_url_creates_session_and_loads_once() {
        let mut harness = Harness::new(vec![tab("a")], Some("a"));

        harness
            .dispatch(EngineAction::load_url("a", "https://mozilla.org"))
            .await;

        let session = harness.session("a");
        let loads = session.count_calls(|call| matches!(call, EngineCall::LoadUrl { .. }));
        assert_eq!(loads, 1);
        assert_eq!(session.current_url().as_deref(), Some("https://mozilla.org"));
        // Observer callbacks made it back into the state
        assert_eq!(harness.store.state().tabs[0].content.url, "https://mozilla.org");
    }

    #[tokio::test]
    async fn test_load_url_passes_parent_session() {
        let mut harness = Harness::new(vec![tab("parent")], Some("parent"));
        harness
            .dispatch(EngineAction::load_url("parent", "https://parent.com"))
            .await;
        harness
            .dispatch(TabListAction::add_tab(tab("child").with_parent("parent")))
            .await;

        harness
            .dispatch(EngineAction::load_url("child", "https://child.com"))
            .await;

        let parent = harness.session("parent").handle();
        let child = harness.session("child");
        assert_eq!(
            child.calls()[0],
            EngineCall::LoadUrl {
                url: "https://child.com".to_string(),
                parent: Some(parent),
                flags: LoadUrlFlags::empty(),
            }
        );
    }

    #[tokio::test]
    async fn test_navigation_actions_reach_the_session() {
        let mut harness = Harness::new(vec![tab("a")], Some("a"));
        harness.dispatch(EngineAction::load_url("a", "https://one.com")).await;
        harness.dispatch(EngineAction::load_url("a", "https://two.com")).await;

        harness
            .dispatch(EngineAction::GoBack {
                tab_id: "a".to_string(),
            })
            .await;
        assert_eq!(harness.store.state().tabs[0].content.url, "https://one.com");

        harness
            .dispatch(EngineAction::ToggleDesktopMode {
                tab_id: "a".to_string(),
                enable: true,
            })
            .await;

        let session = harness.session("a");
        assert!(session.calls().contains(&EngineCall::ToggleDesktopMode {
            enable: true,
            reload: true,
        }));
        assert!(harness.store.state().tabs[0].content.desktop_mode);
    }

    #[tokio::test]
    async fn test_missing_tab_is_ignored() {
        let mut harness = Harness::new(vec![tab("a")], Some("a"));
        harness
            .dispatch(EngineAction::load_url("unknown", "https://mozilla.org"))
            .await;

        assert!(harness.engine.sessions().is_empty());
    }
}
