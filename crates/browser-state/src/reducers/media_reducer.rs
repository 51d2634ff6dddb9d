use crate::actions::MediaAction;
use crate::state::{BrowserState, MediaAggregate};

/// Reducer for per tab media sessions and the playback aggregate
pub fn reduce(mut state: BrowserState, action: &MediaAction) -> BrowserState {
    match action {
        MediaAction::UpdateMediaSessionState {
            tab_id,
            state: media,
        } => {
            state.update_tab(tab_id, |tab| tab.media_session_state = Some(media.clone()));
        }
        MediaAction::RemoveMediaSessionState { tab_id } => {
            state.update_tab(tab_id, |tab| tab.media_session_state = None);
        }
        MediaAction::UpdateMediaAggregate { aggregate } => {
            state.media.aggregate = aggregate.clone();
        }
    }

    state
}

/// Reset the aggregate if the tab it points to is gone
pub fn prune_aggregate(mut state: BrowserState) -> BrowserState {
    let gone = state
        .media
        .aggregate
        .active_tab_id
        .as_deref()
        .is_some_and(|tab_id| !state.contains_id(tab_id));

    if gone {
        log::debug!("Media: active tab removed, resetting aggregate");
        state.media.aggregate = MediaAggregate::default();
    }

    state
}
