//! Actions updating the content of a single tab or custom tab

use crate::state::Bitmap;
use browser_engine::SecurityInfo;

#[derive(Debug, Clone, PartialEq)]
pub enum ContentAction {
    UpdateUrl { tab_id: String, url: String },
    UpdateTitle { tab_id: String, title: String },
    UpdateProgress { tab_id: String, progress: u8 },
    UpdateLoadingState { tab_id: String, loading: bool },
    UpdateSearchTerms { tab_id: String, search_terms: String },
    UpdateSecurityInfo {
        tab_id: String,
        security_info: SecurityInfo,
    },
    UpdateIcon { tab_id: String, icon: Bitmap },
    RemoveIcon { tab_id: String },
    UpdateThumbnail { tab_id: String, thumbnail: Bitmap },
    RemoveThumbnail { tab_id: String },
    UpdateDesktopMode { tab_id: String, enabled: bool },
    FullscreenChanged { tab_id: String, enabled: bool },
}

impl ContentAction {
    /// Id of the tab this action targets
    pub fn tab_id(&self) -> &str {
        match self {
            Self::UpdateUrl { tab_id, .. }
            | Self::UpdateTitle { tab_id, .. }
            | Self::UpdateProgress { tab_id, .. }
            | Self::UpdateLoadingState { tab_id, .. }
            | Self::UpdateSearchTerms { tab_id, .. }
            | Self::UpdateSecurityInfo { tab_id, .. }
            | Self::UpdateIcon { tab_id, .. }
            | Self::RemoveIcon { tab_id }
            | Self::UpdateThumbnail { tab_id, .. }
            | Self::RemoveThumbnail { tab_id }
            | Self::UpdateDesktopMode { tab_id, .. }
            | Self::FullscreenChanged { tab_id, .. } => tab_id,
        }
    }
}
