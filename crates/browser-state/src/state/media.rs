use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum PlaybackState {
    #[default]
    None,
    Playing,
    Paused,
    Stopped,
}

/// Media session of a single tab
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaSessionState {
    pub playback_state: PlaybackState,
    pub muted: bool,
    pub fullscreen: bool,
}

/// Playback state across all tabs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaAggregate {
    /// Tab currently playing (or last playing) media
    pub active_tab_id: Option<String>,
    pub state: PlaybackState,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaState {
    pub aggregate: MediaAggregate,
}
