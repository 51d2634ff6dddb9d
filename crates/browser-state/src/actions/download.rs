//! Download queue actions

use crate::state::DownloadState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadAction {
    /// Queue a download, replacing a queued one with the same id
    QueueDownload { download: DownloadState },
    RemoveQueuedDownload { download_id: String },
    RemoveAllQueuedDownloads,
}
