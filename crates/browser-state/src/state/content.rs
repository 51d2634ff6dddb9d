use browser_engine::SecurityInfo;
use std::sync::Arc;

/// Raw image data (favicons, thumbnails)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub data: Arc<Vec<u8>>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data: Arc::new(data),
        }
    }
}

/// Content of a tab as reported by the engine
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentState {
    pub url: String,
    pub private: bool,
    pub title: String,
    pub loading: bool,
    /// Loading progress in percent
    pub progress: u8,
    pub security_info: SecurityInfo,
    pub icon: Option<Bitmap>,
    pub thumbnail: Option<Bitmap>,
    pub search_terms: String,
    pub desktop_mode: bool,
    pub fullscreen: bool,
}

impl ContentState {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}
