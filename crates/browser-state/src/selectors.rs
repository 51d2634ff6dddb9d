//! Read helpers on [`BrowserState`]

use crate::state::{BrowserState, TabSessionState};

impl BrowserState {
    pub fn find_tab(&self, tab_id: &str) -> Option<&TabSessionState> {
        self.tabs.iter().find(|tab| tab.id == tab_id)
    }

    pub fn find_custom_tab(&self, tab_id: &str) -> Option<&TabSessionState> {
        self.custom_tabs.iter().find(|tab| tab.id == tab_id)
    }

    pub fn find_tab_or_custom_tab(&self, tab_id: &str) -> Option<&TabSessionState> {
        self.find_tab(tab_id).or_else(|| self.find_custom_tab(tab_id))
    }

    /// The selected tab, `None` if nothing is selected or the id is unknown
    pub fn selected_tab(&self) -> Option<&TabSessionState> {
        self.selected_tab_id
            .as_deref()
            .and_then(|tab_id| self.find_tab(tab_id))
    }

    pub fn normal_tabs(&self) -> impl Iterator<Item = &TabSessionState> + '_ {
        self.tabs.iter().filter(|tab| !tab.is_private())
    }

    pub fn private_tabs(&self) -> impl Iterator<Item = &TabSessionState> + '_ {
        self.tabs.iter().filter(|tab| tab.is_private())
    }

    /// First tab of the given privacy showing `url`
    pub fn find_tab_by_url(&self, url: &str, private: bool) -> Option<&TabSessionState> {
        self.tabs
            .iter()
            .find(|tab| tab.content.url == url && tab.is_private() == private)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> BrowserState {
        let mut state = BrowserState::with_tabs(
            vec![
                TabSessionState::new("https://mozilla.org").with_id("a"),
                TabSessionState::new("https://example.com")
                    .with_id("b")
                    .private(true),
            ],
            Some("b"),
        );
        state
            .custom_tabs
            .push(TabSessionState::new("https://rust-lang.org").with_id("c"));
        state
    }

    #[test]
    fn test_find_tabs() {
        let state = state();
        assert_eq!(state.find_tab("a").map(|t| t.id.as_str()), Some("a"));
        assert!(state.find_tab("c").is_none());
        assert_eq!(state.find_tab_or_custom_tab("c").map(|t| t.id.as_str()), Some("c"));
        assert_eq!(state.selected_tab().map(|t| t.id.as_str()), Some("b"));
        assert_eq!(
            state.find_tab_by_url("https://example.com", true).map(|t| t.id.as_str()),
            Some("b")
        );
        assert!(state.find_tab_by_url("https://example.com", false).is_none());
    }

    #[test]
    fn test_normal_and_private_tabs() {
        let state = state();
        let normal: Vec<_> = state.normal_tabs().map(|t| t.id.as_str()).collect();
        let private: Vec<_> = state.private_tabs().map(|t| t.id.as_str()).collect();
        assert_eq!(normal, vec!["a"]);
        assert_eq!(private, vec!["b"]);
    }

    #[test]
    fn test_selected_tab_with_unknown_id() {
        let mut state = state();
        state.selected_tab_id = Some("unknown".to_string());
        assert!(state.selected_tab().is_none());
    }
}
