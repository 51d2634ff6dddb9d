//! Engine session crash actions

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrashAction {
    /// The engine session of the tab crashed
    SessionCrashed { tab_id: String },
    /// Recover the crashed engine session of the tab
    RestoreCrashedSession { tab_id: String },
}

impl CrashAction {
    pub fn tab_id(&self) -> &str {
        match self {
            Self::SessionCrashed { tab_id } | Self::RestoreCrashedSession { tab_id } => tab_id,
        }
    }
}
