use super::{DownloadState, MediaState, TabSessionState, TopSite, WebExtensionState};
use std::collections::BTreeMap;

/// Root of the state tree
///
/// Normal and private tabs live in one ordered `tabs` list. The selected tab
/// is always one of `tabs`, never a custom tab.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrowserState {
    pub tabs: Vec<TabSessionState>,
    pub custom_tabs: Vec<TabSessionState>,
    pub selected_tab_id: Option<String>,
    pub queued_downloads: Vec<DownloadState>,
    pub media: MediaState,
    pub top_sites: Vec<TopSite>,
    /// Installed extensions by id
    pub extensions: BTreeMap<String, WebExtensionState>,
}

impl BrowserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with the given tabs, selecting `selected_tab_id`
    pub fn with_tabs(tabs: Vec<TabSessionState>, selected_tab_id: Option<&str>) -> Self {
        Self {
            tabs,
            selected_tab_id: selected_tab_id.map(str::to_string),
            ..Default::default()
        }
    }

    /// Whether a tab or custom tab with this id exists
    pub fn contains_id(&self, id: &str) -> bool {
        self.tabs.iter().chain(&self.custom_tabs).any(|tab| tab.id == id)
    }

    /// Apply `update` to the tab or custom tab with the given id
    ///
    /// Returns `false` if there is no such tab.
    pub fn update_tab(&mut self, id: &str, update: impl FnOnce(&mut TabSessionState)) -> bool {
        match self
            .tabs
            .iter_mut()
            .chain(self.custom_tabs.iter_mut())
            .find(|tab| tab.id == id)
        {
            Some(tab) => {
                update(tab);
                true
            }
            None => {
                log::debug!("No tab with id {} to update", id);
                false
            }
        }
    }
}
