//! Store running on its own task
//!
//! [`BrowserStore`] is a cheap handle: actions go into the store's channel,
//! state reads come from the last published snapshot.

use crate::actions::Action;
use crate::dispatcher::{Dispatcher, StoreMessage};
use crate::error::StoreError;
use crate::state::BrowserState;
use crate::store::Store;
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct BrowserStore {
    dispatcher: Dispatcher,
    state: watch::Receiver<Arc<BrowserState>>,
}

impl BrowserStore {
    /// Move the store onto a tokio task
    ///
    /// The join handle resolves to the store once [`shutdown`](Self::shutdown)
    /// was processed.
    pub fn spawn(store: Store) -> (Self, JoinHandle<Store>) {
        let handle = Self {
            dispatcher: store.dispatcher(),
            state: store.subscribe(),
        };
        let task = tokio::spawn(store.run());
        (handle, task)
    }

    pub fn dispatch(&self, action: impl Into<Action>) {
        self.dispatcher.dispatch(action);
    }

    /// The last state published by the store
    pub fn state(&self) -> Arc<BrowserState> {
        Arc::clone(&self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<BrowserState>> {
        self.state.clone()
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Wait until every action dispatched before this call was processed
    pub async fn wait_until_idle(&self) -> Result<(), StoreError> {
        let (done, idle) = oneshot::channel();
        self.dispatcher.send(StoreMessage::Flush(done))?;
        idle.await.map_err(|_| StoreError::Closed)
    }

    /// Stop the store loop after the actions queued so far
    pub fn shutdown(&self) -> Result<(), StoreError> {
        self.dispatcher.send(StoreMessage::Shutdown)
    }
}
