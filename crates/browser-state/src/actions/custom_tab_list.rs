//! Actions modifying the list of custom tabs

use crate::state::TabSessionState;

#[derive(Debug, Clone, PartialEq)]
pub enum CustomTabListAction {
    AddCustomTab { tab: TabSessionState },
    RemoveCustomTab { tab_id: String },
    RemoveAllCustomTabs,
}
