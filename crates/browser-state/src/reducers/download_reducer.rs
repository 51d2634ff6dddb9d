use crate::actions::DownloadAction;
use crate::state::BrowserState;

/// Reducer for the download queue
pub fn reduce(mut state: BrowserState, action: &DownloadAction) -> BrowserState {
    match action {
        DownloadAction::QueueDownload { download } => {
            match state
                .queued_downloads
                .iter()
                .position(|queued| queued.id == download.id)
            {
                Some(index) => state.queued_downloads[index] = download.clone(),
                None => state.queued_downloads.push(download.clone()),
            }
        }
        DownloadAction::RemoveQueuedDownload { download_id } => {
            state
                .queued_downloads
                .retain(|queued| queued.id != *download_id);
        }
        DownloadAction::RemoveAllQueuedDownloads => {
            state.queued_downloads.clear();
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DownloadState, DownloadStatus};

    #[test]
    fn test_queue_replaces_by_id() {
        let download = DownloadState::new("https://a.com/file.zip").with_file_name("file.zip");
        let state = reduce(
            BrowserState::new(),
            &DownloadAction::QueueDownload {
                download: download.clone(),
            },
        );
        let updated = download.clone().with_status(DownloadStatus::Downloading);
        let state = reduce(
            state,
            &DownloadAction::QueueDownload {
                download: updated.clone(),
            },
        );
        assert_eq!(state.queued_downloads, vec![updated]);

        let state = reduce(
            state,
            &DownloadAction::RemoveQueuedDownload {
                download_id: download.id,
            },
        );
        assert!(state.queued_downloads.is_empty());
    }
}
