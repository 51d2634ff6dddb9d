use crate::actions::CustomTabListAction;
use crate::error::ReducerError;
use crate::state::BrowserState;

/// Reducer for the list of custom tabs
pub fn reduce(
    mut state: BrowserState,
    action: &CustomTabListAction,
) -> Result<BrowserState, ReducerError> {
    match action {
        CustomTabListAction::AddCustomTab { tab } => {
            if state.contains_id(&tab.id) {
                return Err(ReducerError::DuplicateTab(tab.id.clone()));
            }
            state.custom_tabs.push(tab.clone());
        }
        CustomTabListAction::RemoveCustomTab { tab_id } => {
            state.custom_tabs.retain(|tab| tab.id != *tab_id);
        }
        CustomTabListAction::RemoveAllCustomTabs => {
            state.custom_tabs.clear();
        }
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TabSessionState;

    #[test]
    fn test_add_and_remove_custom_tabs() {
        let state = BrowserState::with_tabs(vec![TabSessionState::new("https://a.com").with_id("a")], Some("a"));
        let custom = TabSessionState::new("https://b.com").with_id("b");

        let state = reduce(state, &CustomTabListAction::AddCustomTab { tab: custom.clone() }).unwrap();
        assert_eq!(state.custom_tabs, vec![custom.clone()]);
        assert_eq!(state.selected_tab_id.as_deref(), Some("a"));

        let err = reduce(state.clone(), &CustomTabListAction::AddCustomTab { tab: custom }).unwrap_err();
        assert_eq!(err, ReducerError::DuplicateTab("b".to_string()));

        let state = reduce(
            state,
            &CustomTabListAction::RemoveCustomTab {
                tab_id: "b".to_string(),
            },
        )
        .unwrap();
        assert!(state.custom_tabs.is_empty());
        assert_eq!(state.tabs.len(), 1);
    }
}
