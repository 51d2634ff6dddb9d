//! JSON format of persisted snapshots
//!
//! ```json
//! {
//!   "version": 1,
//!   "selectedSessionIndex": 0,
//!   "sessionStateTuples": [
//!     {
//!       "session": {
//!         "url": "https://mozilla.org",
//!         "source": "ACTION_VIEW",
//!         "uuid": "…",
//!         "parentUuid": "",
//!         "title": "Mozilla",
//!         "readerMode": false
//!       },
//!       "engineSession": {}
//!     }
//!   ]
//! }
//! ```

use crate::error::SessionError;
use crate::session::Session;
use crate::snapshot::{Snapshot, SnapshotItem};
use browser_engine::Engine;
use browser_state::state::ReaderState;
use browser_state::SessionSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;

const VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotJson {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    selected_session_index: usize,
    #[serde(default)]
    session_state_tuples: Vec<SessionStateTuple>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionStateTuple {
    session: SessionJson,
    #[serde(default)]
    engine_session: Value,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionJson {
    url: String,
    #[serde(default)]
    source: String,
    uuid: String,
    /// Empty for sessions without parent
    #[serde(default)]
    parent_uuid: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    reader_mode: bool,
}

/// Converts snapshots from and to JSON
///
/// Engine session snapshots are opaque JSON, the engine turns them back
/// into session states.
pub struct SnapshotSerializer {
    engine: Arc<dyn Engine>,
}

impl SnapshotSerializer {
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }

    pub fn to_json(&self, snapshot: &Snapshot) -> Value {
        let tuples = snapshot
            .items
            .iter()
            .map(|item| {
                // Prefer the stored snapshot, a live session is asked for a fresh one
                let engine_session = match (&item.engine_session_state, &item.engine_session) {
                    (Some(state), _) => state.to_json().clone(),
                    (None, Some(engine_session)) => engine_session.save_state().into_json(),
                    (None, None) => Value::Object(serde_json::Map::new()),
                };

                SessionStateTuple {
                    session: session_to_json(&item.session),
                    engine_session,
                }
            })
            .collect();

        let json = SnapshotJson {
            version: VERSION,
            selected_session_index: snapshot.selected_session_index,
            session_state_tuples: tuples,
        };

        serde_json::to_value(json).unwrap_or_else(|e| {
            log::error!("SnapshotSerializer: failed to serialize snapshot: {}", e);
            Value::Null
        })
    }

    pub fn from_json(&self, json: &Value) -> Result<Snapshot, SessionError> {
        let json = SnapshotJson::deserialize(json)?;
        if json.version != VERSION {
            log::warn!(
                "SnapshotSerializer: reading snapshot version {}, expected {}",
                json.version,
                VERSION
            );
        }

        let items = json
            .session_state_tuples
            .into_iter()
            .map(|tuple| {
                let session = session_from_json(tuple.session);
                let engine_session_state = match &tuple.engine_session {
                    Value::Null => None,
                    Value::Object(map) if map.is_empty() => None,
                    value => Some(self.engine.create_session_state(value)),
                };
                let reader_state = ReaderState {
                    active: session.reader_mode,
                    ..Default::default()
                };

                SnapshotItem {
                    session,
                    engine_session: None,
                    engine_session_state,
                    reader_state: Some(reader_state),
                }
            })
            .collect();

        Ok(Snapshot::new(items, json.selected_session_index))
    }
}

fn session_to_json(session: &Session) -> SessionJson {
    SessionJson {
        url: session.url.clone(),
        source: session.source.to_string(),
        uuid: session.id.clone(),
        parent_uuid: session.parent_id.clone().unwrap_or_default(),
        title: Some(session.title.clone()),
        reader_mode: session.reader_mode,
    }
}

/// Sessions read back are never private
fn session_from_json(json: SessionJson) -> Session {
    let mut session = Session::new(json.url)
        .with_id(json.uuid)
        .with_source(SessionSource::from_str(&json.source).unwrap_or_default())
        .with_title(json.title.unwrap_or_default());
    session.parent_id = Some(json.parent_uuid).filter(|id| !id.is_empty());
    session.reader_mode = json.reader_mode;
    session
}
