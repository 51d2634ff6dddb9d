use crate::actions::WebExtensionAction;
use crate::state::BrowserState;

/// Reducer for installed web extensions
pub fn reduce(mut state: BrowserState, action: &WebExtensionAction) -> BrowserState {
    match action {
        WebExtensionAction::Install { extension } => {
            state
                .extensions
                .insert(extension.id.clone(), extension.clone());
        }
        WebExtensionAction::Uninstall { extension_id } => {
            state.extensions.remove(extension_id);
        }
        WebExtensionAction::UpdateEnabled {
            extension_id,
            enabled,
        } => match state.extensions.get_mut(extension_id) {
            Some(extension) => extension.enabled = *enabled,
            None => log::warn!("UpdateEnabled: extension {} is not installed", extension_id),
        },
        WebExtensionAction::UninstallAll => {
            state.extensions.clear();
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WebExtensionState;

    #[test]
    fn test_install_disable_uninstall() {
        let extension = WebExtensionState::new("ublock@example.org", "uBlock", "moz-extension://ublock/");
        let state = reduce(BrowserState::new(), &WebExtensionAction::Install { extension });
        assert!(state.extensions["ublock@example.org"].enabled);

        let state = reduce(
            state,
            &WebExtensionAction::UpdateEnabled {
                extension_id: "ublock@example.org".to_string(),
                enabled: false,
            },
        );
        assert!(!state.extensions["ublock@example.org"].enabled);

        let state = reduce(
            state,
            &WebExtensionAction::Uninstall {
                extension_id: "ublock@example.org".to_string(),
            },
        );
        assert!(state.extensions.is_empty());
    }
}
