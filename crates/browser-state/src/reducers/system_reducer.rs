//! System Reducer
//!
//! Frees memory on `LowMemory`: non-selected tabs lose their thumbnail and,
//! when a snapshot was handed in, their live engine session. The selected
//! tab is never touched.

use crate::actions::SystemAction;
use crate::state::{BrowserState, EngineState};

pub fn reduce(mut state: BrowserState, action: &SystemAction) -> BrowserState {
    match action {
        SystemAction::LowMemory { states, .. } => {
            let selected = state.selected_tab_id.clone();

            for tab in state
                .tabs
                .iter_mut()
                .filter(|tab| selected.as_deref() != Some(tab.id.as_str()))
            {
                tab.content.thumbnail = None;

                if let Some(snapshot) = states.get(&tab.id) {
                    tab.engine_state = EngineState {
                        engine_session: None,
                        engine_session_state: Some(snapshot.clone()),
                        engine_observer: None,
                    };
                }
            }
        }
    }

    state
}
