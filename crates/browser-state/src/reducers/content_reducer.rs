//! Content State Reducer
//!
//! Field updates on the content of one tab, regular or custom.

use crate::actions::ContentAction;
use crate::state::BrowserState;

pub fn reduce(mut state: BrowserState, action: &ContentAction) -> BrowserState {
    state.update_tab(action.tab_id(), |tab| {
        let content = &mut tab.content;
        match action {
            ContentAction::UpdateUrl { url, .. } => content.url = url.clone(),
            ContentAction::UpdateTitle { title, .. } => content.title = title.clone(),
            ContentAction::UpdateProgress { progress, .. } => content.progress = (*progress).min(100),
            ContentAction::UpdateLoadingState { loading, .. } => content.loading = *loading,
            ContentAction::UpdateSearchTerms { search_terms, .. } => {
                content.search_terms = search_terms.clone()
            }
            ContentAction::UpdateSecurityInfo { security_info, .. } => {
                content.security_info = security_info.clone()
            }
            ContentAction::UpdateIcon { icon, .. } => content.icon = Some(icon.clone()),
            ContentAction::RemoveIcon { .. } => content.icon = None,
            ContentAction::UpdateThumbnail { thumbnail, .. } => {
                content.thumbnail = Some(thumbnail.clone())
            }
            ContentAction::RemoveThumbnail { .. } => content.thumbnail = None,
            ContentAction::UpdateDesktopMode { enabled, .. } => content.desktop_mode = *enabled,
            ContentAction::FullscreenChanged { enabled, .. } => content.fullscreen = *enabled,
        }
    });

    state
}
