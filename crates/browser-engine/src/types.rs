//! Value types exchanged with an engine

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Flags changing how a url gets loaded
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LoadUrlFlags: u32 {
        const BYPASS_CACHE = 1 << 0;
        const BYPASS_PROXY = 1 << 1;
        const EXTERNAL = 1 << 2;
        const ALLOW_POPUPS = 1 << 3;
        const BYPASS_CLASSIFIER = 1 << 4;
        const ALLOW_ADDITIONAL_HEADERS = 1 << 5;
    }
}

bitflags! {
    /// Kinds of browsing data a session can be asked to clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BrowsingData: u32 {
        const COOKIES = 1 << 0;
        const NETWORK_CACHE = 1 << 1;
        const IMAGE_CACHE = 1 << 2;
        const DOM_STORAGES = 1 << 3;
        const AUTH_SESSIONS = 1 << 4;
        const PERMISSIONS = 1 << 5;
        const ALL_CACHES = Self::NETWORK_CACHE.bits() | Self::IMAGE_CACHE.bits();
        const ALL_SITE_DATA = Self::COOKIES.bits()
            | Self::ALL_CACHES.bits()
            | Self::DOM_STORAGES.bits()
            | Self::AUTH_SESSIONS.bits()
            | Self::PERMISSIONS.bits();
    }
}

/// Serialized, engine specific state of an engine session
///
/// The content is opaque to everything but the engine that produced it.
/// It can be persisted as JSON and handed back to
/// [`Engine::create_session_state`](crate::Engine::create_session_state).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineSessionState(serde_json::Value);

impl EngineSessionState {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// An empty state, restoring it is a no-op
    pub fn empty() -> Self {
        Self(serde_json::Value::Object(serde_json::Map::new()))
    }

    pub fn to_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_json(self) -> serde_json::Value {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            serde_json::Value::Null => true,
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}

/// Security information of the currently loaded page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityInfo {
    pub secure: bool,
    pub host: String,
    pub issuer: String,
}

impl SecurityInfo {
    pub fn new(secure: bool, host: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secure,
            host: host.into(),
            issuer: issuer.into(),
        }
    }
}
