use strum::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DownloadStatus {
    #[default]
    Initiated,
    Downloading,
    Paused,
    Completed,
    Failed,
    Cancelled,
}

/// A download waiting to be picked up by the download service
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadState {
    pub id: String,
    pub url: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub private: bool,
    pub status: DownloadStatus,
}

impl DownloadState {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_status(mut self, status: DownloadStatus) -> Self {
        self.status = status;
        self
    }
}
