use crate::session::Session;
use browser_engine::{EngineSessionHandle, EngineSessionState};
use browser_state::state::ReaderState;

/// Restorable copy of the normal tabs of a browser
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub items: Vec<SnapshotItem>,
    /// Index into `items`, may be out of range for hand crafted snapshots
    pub selected_session_index: usize,
}

impl Snapshot {
    pub fn new(items: Vec<SnapshotItem>, selected_session_index: usize) -> Self {
        Self {
            items,
            selected_session_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The selected item, the first one if the index is out of range
    pub fn selected_item(&self) -> Option<&SnapshotItem> {
        self.items
            .get(self.selected_session_index)
            .or_else(|| self.items.first())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotItem {
    pub session: Session,
    pub engine_session: Option<EngineSessionHandle>,
    pub engine_session_state: Option<EngineSessionState>,
    pub reader_state: Option<ReaderState>,
}

impl SnapshotItem {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            engine_session: None,
            engine_session_state: None,
            reader_state: None,
        }
    }

    pub fn with_engine_session_state(mut self, state: EngineSessionState) -> Self {
        self.engine_session_state = Some(state);
        self
    }
}
