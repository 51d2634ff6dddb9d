//! Tab List Reducer
//!
//! Adds, selects, removes and restores tabs. Removing the selected tab picks
//! a new one of the same privacy close to where the removed tab was.

use crate::actions::TabListAction;
use crate::error::ReducerError;
use crate::state::{BrowserState, TabSessionState};
use std::collections::HashSet;

pub fn reduce(
    mut state: BrowserState,
    action: &TabListAction,
) -> Result<BrowserState, ReducerError> {
    match action {
        TabListAction::AddTab { tab, select } => {
            require_unique_tabs(&state, std::slice::from_ref(tab))?;

            let index = match &tab.parent_id {
                Some(parent_id) => {
                    let parent_index = state
                        .tabs
                        .iter()
                        .position(|t| t.id == *parent_id)
                        .ok_or_else(|| ReducerError::MissingParent {
                            tab_id: tab.id.clone(),
                            parent_id: parent_id.clone(),
                        })?;
                    // Child goes right next to its parent
                    parent_index + 1
                }
                None => state.tabs.len(),
            };
            state.tabs.insert(index, tab.clone());

            if *select || state.selected_tab_id.is_none() {
                state.selected_tab_id = Some(tab.id.clone());
            }
        }

        TabListAction::AddMultipleTabs { tabs } => {
            require_unique_tabs(&state, tabs)?;
            if let Some(tab) = tabs.iter().find(|tab| tab.parent_id.is_some()) {
                return Err(ReducerError::ParentNotSupported(tab.id.clone()));
            }

            if state.selected_tab_id.is_none() {
                state.selected_tab_id = tabs
                    .iter()
                    .find(|tab| !tab.is_private())
                    .map(|tab| tab.id.clone());
            }
            state.tabs.extend(tabs.iter().cloned());
        }

        TabListAction::SelectTab { tab_id } => {
            state.selected_tab_id = Some(tab_id.clone());
        }

        TabListAction::RemoveTab {
            tab_id,
            select_parent_if_exists,
        } => {
            let Some(index) = state.tabs.iter().position(|tab| tab.id == *tab_id) else {
                log::debug!("RemoveTab: no tab with id {}", tab_id);
                return Ok(state);
            };
            let removed = state.tabs.remove(index);

            // Children of the removed tab move up to its parent
            for tab in state
                .tabs
                .iter_mut()
                .filter(|tab| tab.parent_id.as_deref() == Some(removed.id.as_str()))
            {
                tab.parent_id = removed.parent_id.clone();
            }

            if state.selected_tab_id.as_deref() == Some(removed.id.as_str()) {
                let parent = removed
                    .parent_id
                    .as_deref()
                    .filter(|parent_id| *select_parent_if_exists && state.find_tab(parent_id).is_some());

                state.selected_tab_id = match parent {
                    Some(parent_id) => Some(parent_id.to_string()),
                    None => find_new_selected_tab_id(&state.tabs, removed.is_private(), index),
                };
            }
        }

        TabListAction::Restore {
            tabs,
            selected_tab_id,
        } => {
            require_unique_tabs(&state, tabs)?;

            // Restoring may finish after other tabs were opened already, the
            // restored tabs still come first.
            let mut restored = tabs.clone();
            restored.append(&mut state.tabs);
            state.tabs = restored;

            if state.selected_tab_id.is_none() {
                state.selected_tab_id = selected_tab_id.clone();
            }
        }

        TabListAction::RemoveAllTabs => {
            state.tabs.clear();
            state.selected_tab_id = None;
        }

        TabListAction::RemoveAllPrivateTabs => {
            let selection_affected = state.selected_tab().is_some_and(|tab| tab.is_private());
            state.tabs.retain(|tab| !tab.is_private());
            clear_dangling_parents(&mut state.tabs);

            if selection_affected {
                state.selected_tab_id = state.tabs.last().map(|tab| tab.id.clone());
            }
        }

        TabListAction::RemoveAllNormalTabs => {
            let selection_affected = state.selected_tab().is_some_and(|tab| !tab.is_private());
            state.tabs.retain(|tab| tab.is_private());
            clear_dangling_parents(&mut state.tabs);

            // Never fall back to a private tab
            if selection_affected {
                state.selected_tab_id = None;
            }
        }
    }

    Ok(state)
}

/// Ids must be unique across tabs, custom tabs and the new tabs themselves
fn require_unique_tabs(state: &BrowserState, tabs: &[TabSessionState]) -> Result<(), ReducerError> {
    let mut seen = HashSet::new();
    for tab in tabs {
        if state.contains_id(&tab.id) || !seen.insert(tab.id.as_str()) {
            return Err(ReducerError::DuplicateTab(tab.id.clone()));
        }
    }
    Ok(())
}

fn clear_dangling_parents(tabs: &mut [TabSessionState]) {
    let ids: HashSet<String> = tabs.iter().map(|tab| tab.id.clone()).collect();
    for tab in tabs.iter_mut() {
        if tab.parent_id.as_ref().is_some_and(|parent| !ids.contains(parent)) {
            tab.parent_id = None;
        }
    }
}

/// Pick the tab to select after the selected tab at `index` was removed
///
/// `tabs` no longer contains the removed tab. A normal tab is never
/// replaced by a private one.
fn find_new_selected_tab_id(
    tabs: &[TabSessionState],
    private: bool,
    index: usize,
) -> Option<String> {
    let same_privacy = |tab: &TabSessionState| tab.is_private() == private;

    if let Some(tab) = tabs.get(index).filter(|tab| same_privacy(tab)) {
        return Some(tab.id.clone());
    }

    if let Some(tab) = find_nearby_tab(tabs, index, same_privacy) {
        return Some(tab.id.clone());
    }

    if private {
        tabs.last().map(|tab| tab.id.clone())
    } else {
        None
    }
}

/// Search outward from `index`, trying left before right at each distance
fn find_nearby_tab(
    tabs: &[TabSessionState],
    index: usize,
    predicate: impl Fn(&TabSessionState) -> bool,
) -> Option<&TabSessionState> {
    let last = tabs.len().checked_sub(1)?;
    let max_steps = last.saturating_sub(index).max(index);

    for steps in 1..=max_steps {
        let left = index.checked_sub(steps);
        let right = Some(index + steps).filter(|current| *current <= last);

        for current in [left, right].into_iter().flatten() {
            if predicate(&tabs[current]) {
                return Some(&tabs[current]);
            }
        }
    }

    None
}
