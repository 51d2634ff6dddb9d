//! Browser engine capability traits
//!
//! This crate defines the boundary between the tab state container and a
//! web rendering engine. The state container never talks to a concrete
//! engine; it only sees the traits defined here.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 Engine trait                  │
//! │  - create_session()                           │
//! │  - create_session_state()                     │
//! └──────────────────────────────────────────────┘
//!                        │ creates
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │              EngineSession trait              │
//! │  - load_url() / reload() / go_back() / ...    │
//! │  - save_state() / restore_state()             │
//! │  - close() / recover_from_crash()             │
//! └──────────────────────────────────────────────┘
//!                        │ notifies
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │          EngineSessionObserver trait          │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! [`HeadlessEngine`] is an in-memory implementation without any rendering.
//! It keeps a navigation history per session and records every call made
//! against it, which makes it usable both for headless runs and as a test
//! double.
//!
//! # Example
//!
//! ```rust
//! use browser_engine::{Engine, HeadlessEngine};
//!
//! let engine = HeadlessEngine::new();
//! let session = engine.create_session(false, None);
//! let state = session.save_state();
//! assert!(session.restore_state(&state));
//! ```

pub mod engine;
pub mod error;
pub mod handle;
pub mod headless;
pub mod types;

pub use engine::{Engine, EngineSession, EngineSessionObserver};
pub use error::EngineError;
pub use handle::{EngineObserverHandle, EngineSessionHandle};
pub use headless::{EngineCall, HeadlessEngine, HeadlessEngineSession};
pub use types::{BrowsingData, EngineSessionState, LoadUrlFlags, SecurityInfo};
