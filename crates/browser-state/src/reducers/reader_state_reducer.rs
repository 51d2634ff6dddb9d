use crate::actions::ReaderAction;
use crate::state::BrowserState;

/// Reducer for the reader view state of a tab
pub fn reduce(mut state: BrowserState, action: &ReaderAction) -> BrowserState {
    match action {
        ReaderAction::UpdateReaderable { tab_id, readerable } => {
            state.update_tab(tab_id, |tab| tab.reader_state.readerable = *readerable);
        }
        ReaderAction::UpdateReaderActive { tab_id, active } => {
            state.update_tab(tab_id, |tab| tab.reader_state.active = *active);
        }
        ReaderAction::UpdateReaderCheckRequired {
            tab_id,
            check_required,
        } => {
            state.update_tab(tab_id, |tab| tab.reader_state.check_required = *check_required);
        }
        ReaderAction::UpdateReaderConnectRequired {
            tab_id,
            connect_required,
        } => {
            state.update_tab(tab_id, |tab| {
                tab.reader_state.connect_required = *connect_required
            });
        }
        ReaderAction::UpdateReaderBaseUrl { tab_id, url } => {
            state.update_tab(tab_id, |tab| tab.reader_state.base_url = Some(url.clone()));
        }
        ReaderAction::UpdateReaderActiveUrl { tab_id, url } => {
            state.update_tab(tab_id, |tab| tab.reader_state.active_url = Some(url.clone()));
        }
        ReaderAction::ClearReaderActiveUrl { tab_id } => {
            state.update_tab(tab_id, |tab| tab.reader_state.active_url = None);
        }
    }

    state
}
