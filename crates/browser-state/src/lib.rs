//! Browser state container
//!
//! A single [`BrowserState`] value describes every open tab. It only
//! changes by dispatching an [`Action`] to the [`Store`]:
//!
//! ```text
//! dispatch(action)
//!     │
//!     ▼
//! Middleware::handle ──(false)──▶ consumed
//!     │ (true)
//!     ▼
//! reducers ──▶ new state ──▶ observers
//!     │
//!     ▼
//! Middleware::after
//!     │
//!     ▼
//! follow-up actions, then the dispatcher channel
//! ```
//!
//! Reducers are pure functions; side effects live in middleware, which may
//! spawn tasks that report back through the [`Dispatcher`].
//!
//! # Example
//!
//! ```rust
//! use browser_state::{BrowserState, Store, TabListAction, TabSessionState};
//!
//! let mut store = Store::new(BrowserState::new());
//! store
//!     .dispatch(TabListAction::add_tab(TabSessionState::new("https://mozilla.org")))
//!     .unwrap();
//! assert_eq!(store.state().tabs.len(), 1);
//! ```

pub mod actions;
pub mod browser_store;
pub mod dispatcher;
pub mod error;
pub mod middleware;
pub mod reducers;
pub mod selectors;
pub mod state;
pub mod store;

pub use actions::{
    Action, ContentAction, CrashAction, CustomTabListAction, DownloadAction, EngineAction,
    MediaAction, MemoryLevel, ReaderAction, SystemAction, TabListAction, TopSiteAction,
    WebExtensionAction,
};
pub use browser_store::BrowserStore;
pub use dispatcher::Dispatcher;
pub use error::{ReducerError, StoreError};
pub use middleware::{LoggingMiddleware, Middleware, MiddlewareContext};
pub use state::{BrowserState, EngineState, SessionSource, TabSessionState};
pub use store::{Store, StoreObserver};
