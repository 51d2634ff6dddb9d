use super::{ContentState, EngineState, MediaSessionState, ReaderState};
use browser_engine::EngineSessionState;
use strum::{Display, EnumString};
use uuid::Uuid;

/// Where a tab came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionSource {
    #[default]
    None,
    ActionView,
    ActionSend,
    CustomTab,
    HomeScreen,
    Internal,
    MenuItem,
    NewTab,
    Restored,
    TextSelection,
    UserEntered,
}

/// State of a single tab
///
/// Custom tabs use the same struct and are kept in
/// [`BrowserState::custom_tabs`](super::BrowserState::custom_tabs); they never
/// have a parent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabSessionState {
    pub id: String,
    /// The tab that opened this one
    pub parent_id: Option<String>,
    pub content: ContentState,
    pub engine_state: EngineState,
    pub reader_state: ReaderState,
    pub crashed: bool,
    pub media_session_state: Option<MediaSessionState>,
    /// Container the tab belongs to
    pub context_id: Option<String>,
    /// Last time the tab was selected, milliseconds since the epoch
    pub last_access: i64,
    pub source: SessionSource,
}

impl TabSessionState {
    /// Create a normal tab with a random id
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: ContentState::new(url),
            last_access: chrono::Utc::now().timestamp_millis(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn private(mut self, private: bool) -> Self {
        self.content.private = private;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.content.title = title.into();
        self
    }

    pub fn with_context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    pub fn with_source(mut self, source: SessionSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_engine_session_state(mut self, state: EngineSessionState) -> Self {
        self.engine_state.engine_session_state = Some(state);
        self
    }

    pub fn with_reader_state(mut self, reader_state: ReaderState) -> Self {
        self.reader_state = reader_state;
        self
    }

    pub fn is_private(&self) -> bool {
        self.content.private
    }
}
