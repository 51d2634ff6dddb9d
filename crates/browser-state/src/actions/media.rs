//! Media playback actions

use crate::state::{MediaAggregate, MediaSessionState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaAction {
    UpdateMediaSessionState {
        tab_id: String,
        state: MediaSessionState,
    },
    RemoveMediaSessionState { tab_id: String },
    UpdateMediaAggregate { aggregate: MediaAggregate },
}
