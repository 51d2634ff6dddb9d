//! Engine integration for the browser state container
//!
//! `browser-state` only knows about actions and state. This crate adds
//! what is needed to drive a real [`Engine`](browser_engine::Engine):
//!
//! - [`engine_middleware`] creates, drives, suspends and closes engine
//!   sessions in response to actions
//! - [`EngineObserver`] feeds engine callbacks back into the store
//! - [`EngineScope`] owns the tasks running engine calls
//! - [`SessionManager`] offers the session based API on top of a store
//! - [`storage`] persists [`Snapshot`]s as JSON
//!
//! # Example
//!
//! ```rust
//! use browser_engine::HeadlessEngine;
//! use browser_session::{EngineScope, Session, SessionManager};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), browser_session::SessionError> {
//! let engine = Arc::new(HeadlessEngine::new());
//! let scope = EngineScope::current().expect("running on tokio");
//! let mut manager = SessionManager::new(engine, scope);
//!
//! manager.add(Session::new("https://mozilla.org"), true, None, None, None)?;
//! let selected = manager.selected_session().unwrap();
//! manager.get_or_create_engine_session(&selected.id)?;
//! manager.settle().await;
//!
//! assert_eq!(manager.state().tabs[0].content.title, "https://mozilla.org");
//! # Ok(())
//! # }
//! ```

pub mod engine_middleware;
pub mod engine_observer;
pub mod error;
pub mod scope;
pub mod session;
pub mod session_manager;
pub mod snapshot;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use engine_middleware::EngineMiddlewareConfig;
pub use engine_observer::EngineObserver;
pub use error::SessionError;
pub use scope::EngineScope;
pub use session::Session;
pub use session_manager::{SessionManager, SessionManagerObserver};
pub use snapshot::{Snapshot, SnapshotItem};
pub use storage::{SessionStorage, SnapshotSerializer};
