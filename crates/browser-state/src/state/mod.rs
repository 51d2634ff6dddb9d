//! Browser state
//!
//! The state tree is a plain value: every struct is `Clone + PartialEq` so
//! the store can tell whether an action changed anything.

mod browser;
mod content;
mod download;
mod engine;
mod media;
mod reader;
mod tab;
mod top_site;
mod web_extension;

pub use browser::BrowserState;
pub use content::{Bitmap, ContentState};
pub use download::{DownloadState, DownloadStatus};
pub use engine::EngineState;
pub use media::{MediaAggregate, MediaSessionState, MediaState, PlaybackState};
pub use reader::ReaderState;
pub use tab::{SessionSource, TabSessionState};
pub use top_site::{TopSite, TopSiteKind};
pub use web_extension::WebExtensionState;
