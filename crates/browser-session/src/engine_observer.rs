use browser_engine::{EngineSessionObserver, SecurityInfo};
use browser_state::{ContentAction, CrashAction, Dispatcher};

/// Forwards engine session callbacks to the store as actions for one tab
pub struct EngineObserver {
    tab_id: String,
    dispatcher: Dispatcher,
}

impl EngineObserver {
    pub fn new(tab_id: impl Into<String>, dispatcher: Dispatcher) -> Self {
        Self {
            tab_id: tab_id.into(),
            dispatcher,
        }
    }

    pub fn tab_id(&self) -> &str {
        &self.tab_id
    }

    fn tab(&self) -> String {
        self.tab_id.clone()
    }
}

impl EngineSessionObserver for EngineObserver {
    fn on_location_change(&self, url: &str) {
        self.dispatcher.dispatch(ContentAction::UpdateUrl {
            tab_id: self.tab(),
            url: url.to_string(),
        });
    }

    fn on_title_change(&self, title: &str) {
        self.dispatcher.dispatch(ContentAction::UpdateTitle {
            tab_id: self.tab(),
            title: title.to_string(),
        });
    }

    fn on_progress(&self, progress: u8) {
        self.dispatcher.dispatch(ContentAction::UpdateProgress {
            tab_id: self.tab(),
            progress,
        });
    }

    fn on_loading_state_change(&self, loading: bool) {
        self.dispatcher.dispatch(ContentAction::UpdateLoadingState {
            tab_id: self.tab(),
            loading,
        });
    }

    fn on_security_change(&self, info: &SecurityInfo) {
        self.dispatcher.dispatch(ContentAction::UpdateSecurityInfo {
            tab_id: self.tab(),
            security_info: info.clone(),
        });
    }

    fn on_desktop_mode_change(&self, enabled: bool) {
        self.dispatcher.dispatch(ContentAction::UpdateDesktopMode {
            tab_id: self.tab(),
            enabled,
        });
    }

    fn on_fullscreen_change(&self, enabled: bool) {
        self.dispatcher.dispatch(ContentAction::FullscreenChanged {
            tab_id: self.tab(),
            enabled,
        });
    }

    fn on_crash(&self) {
        log::warn!("EngineObserver: engine session of tab {} crashed", self.tab_id);
        self.dispatcher.dispatch(CrashAction::SessionCrashed {
            tab_id: self.tab(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use browser_state::{BrowserState, Store, TabSessionState};

    #[test]
    fn test_callbacks_update_the_tab() {
        let mut store = Store::new(BrowserState::with_tabs(
            vec![TabSessionState::new("https://a.com").with_id("a")],
            Some("a"),
        ));
        let observer = EngineObserver::new("a", store.dispatcher());

        observer.on_location_change("https://b.com");
        observer.on_title_change("B");
        observer.on_progress(40);
        observer.on_loading_state_change(true);
        observer.on_security_change(&SecurityInfo::new(true, "b.com", "CA"));
        observer.on_desktop_mode_change(true);
        observer.on_crash();

        assert_eq!(store.process_pending(), 7);

        let state = store.state();
        let tab = &state.tabs[0];
        assert_eq!(tab.content.url, "https://b.com");
        assert_eq!(tab.content.title, "B");
        assert_eq!(tab.content.progress, 40);
        assert!(tab.content.loading);
        assert!(tab.content.security_info.secure);
        assert!(tab.content.desktop_mode);
        assert!(tab.crashed);
    }
}
