//! Actions modifying the list of tabs

use crate::state::TabSessionState;

#[derive(Debug, Clone, PartialEq)]
pub enum TabListAction {
    /// Add a tab, selecting it if `select` is set or no tab is selected yet
    ///
    /// A tab with a parent is inserted right after its parent.
    AddTab { tab: TabSessionState, select: bool },

    /// Append several tabs at once, none of them may have a parent
    AddMultipleTabs { tabs: Vec<TabSessionState> },

    /// Select a tab, the id is not checked
    SelectTab { tab_id: String },

    /// Remove a tab, selecting its parent instead if requested
    RemoveTab {
        tab_id: String,
        select_parent_if_exists: bool,
    },

    /// Put restored tabs in front of the existing ones
    Restore {
        tabs: Vec<TabSessionState>,
        selected_tab_id: Option<String>,
    },

    RemoveAllTabs,
    RemoveAllPrivateTabs,
    RemoveAllNormalTabs,
}

impl TabListAction {
    pub fn add_tab(tab: TabSessionState) -> Self {
        Self::AddTab { tab, select: false }
    }

    pub fn select_tab(tab_id: impl Into<String>) -> Self {
        Self::SelectTab {
            tab_id: tab_id.into(),
        }
    }

    pub fn remove_tab(tab_id: impl Into<String>) -> Self {
        Self::RemoveTab {
            tab_id: tab_id.into(),
            select_parent_if_exists: true,
        }
    }
}
