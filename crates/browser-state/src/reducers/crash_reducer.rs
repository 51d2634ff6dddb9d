use crate::actions::CrashAction;
use crate::state::BrowserState;

/// Reducer for the crashed flag of a tab
///
/// Recovering the engine session itself is up to the crash middleware.
pub fn reduce(mut state: BrowserState, action: &CrashAction) -> BrowserState {
    match action {
        CrashAction::SessionCrashed { tab_id } => {
            state.update_tab(tab_id, |tab| tab.crashed = true);
        }
        CrashAction::RestoreCrashedSession { tab_id } => {
            state.update_tab(tab_id, |tab| tab.crashed = false);
        }
    }
    state
}
