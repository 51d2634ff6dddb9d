//! Shared handles to engine sessions and observers
//!
//! Handles compare by identity: two handles are equal if they point to the
//! same session (or observer) instance. That is what state comparisons need,
//! the content of a live session is never compared.

use crate::engine::{EngineSession, EngineSessionObserver};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Cloneable reference to a live engine session
#[derive(Clone)]
pub struct EngineSessionHandle(Arc<dyn EngineSession>);

impl EngineSessionHandle {
    pub fn new(session: Arc<dyn EngineSession>) -> Self {
        Self(session)
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl Deref for EngineSessionHandle {
    type Target = dyn EngineSession;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for EngineSessionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for EngineSessionHandle {}

impl fmt::Debug for EngineSessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EngineSessionHandle({:p})", self.addr())
    }
}

/// Cloneable reference to an engine session observer
#[derive(Clone)]
pub struct EngineObserverHandle(Arc<dyn EngineSessionObserver>);

impl EngineObserverHandle {
    pub fn new(observer: Arc<dyn EngineSessionObserver>) -> Self {
        Self(observer)
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl Deref for EngineObserverHandle {
    type Target = dyn EngineSessionObserver;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for EngineObserverHandle {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for EngineObserverHandle {}

impl fmt::Debug for EngineObserverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EngineObserverHandle({:p})", self.addr())
    }
}
