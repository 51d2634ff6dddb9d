//! Web extension actions

use crate::state::WebExtensionState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebExtensionAction {
    Install { extension: WebExtensionState },
    Uninstall { extension_id: String },
    UpdateEnabled { extension_id: String, enabled: bool },
    UninstallAll,
}
