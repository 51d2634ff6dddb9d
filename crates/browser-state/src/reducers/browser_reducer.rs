use crate::actions::Action;
use crate::error::ReducerError;
use crate::reducers::{
    content_reducer, crash_reducer, custom_tab_list_reducer, download_reducer,
    engine_state_reducer, media_reducer, reader_state_reducer, system_reducer,
    tab_list_reducer, top_site_reducer, web_extension_reducer,
};
use crate::state::BrowserState;

/// Root reducer - hands each action family to the reducer of its slice
///
/// On error the caller keeps its previous state.
pub fn reduce(state: BrowserState, action: &Action) -> Result<BrowserState, ReducerError> {
    let state = match action {
        Action::TabList(action) => {
            media_reducer::prune_aggregate(tab_list_reducer::reduce(state, action)?)
        }
        Action::CustomTabList(action) => {
            media_reducer::prune_aggregate(custom_tab_list_reducer::reduce(state, action)?)
        }
        Action::Content(action) => content_reducer::reduce(state, action),
        Action::Engine(action) => engine_state_reducer::reduce(state, action),
        Action::Reader(action) => reader_state_reducer::reduce(state, action),
        Action::Crash(action) => crash_reducer::reduce(state, action),
        Action::System(action) => system_reducer::reduce(state, action),
        Action::Download(action) => download_reducer::reduce(state, action),
        Action::Media(action) => media_reducer::reduce(state, action),
        Action::TopSite(action) => top_site_reducer::reduce(state, action),
        Action::WebExtension(action) => web_extension_reducer::reduce(state, action),
    };

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{MediaAction, TabListAction};
    use crate::state::{MediaAggregate, PlaybackState, TabSessionState};

    #[test]
    fn test_removing_tab_prunes_media_aggregate() {
        let state = BrowserState::with_tabs(
            vec![
                TabSessionState::new("https://a.com").with_id("a"),
                TabSessionState::new("https://b.com").with_id("b"),
            ],
            Some("a"),
        );
        let state = reduce(
            state,
            &MediaAction::UpdateMediaAggregate {
                aggregate: MediaAggregate {
                    active_tab_id: Some("b".to_string()),
                    state: PlaybackState::Playing,
                },
            }
            .into(),
        )
        .unwrap();

        let state = reduce(state, &TabListAction::remove_tab("a").into()).unwrap();
        assert_eq!(state.media.aggregate.active_tab_id.as_deref(), Some("b"));

        let state = reduce(state, &TabListAction::remove_tab("b").into()).unwrap();
        assert_eq!(state.media.aggregate, MediaAggregate::default());
    }
}
